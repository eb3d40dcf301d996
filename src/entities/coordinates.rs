use geo_types::Point;
use serde::{Deserialize, Serialize};

use crate::error::{invalid_input_error, Error};

pub const CURRENT_LOCATION: &str = "Current GPS Location";

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Result<Self, Error> {
        let coordinates = Self { lat, lng };
        coordinates.validate()?;

        Ok(coordinates)
    }

    pub fn validate(&self) -> Result<(), Error> {
        let lat_ok = self.lat.is_finite() && (-90.0..=90.0).contains(&self.lat);
        let lng_ok = self.lng.is_finite() && (-180.0..=180.0).contains(&self.lng);

        if !(lat_ok && lng_ok) {
            return Err(invalid_input_error());
        }

        Ok(())
    }
}

impl From<Coordinates> for Point<f64> {
    fn from(coordinates: Coordinates) -> Self {
        Point::new(coordinates.lng, coordinates.lat)
    }
}

/// A resolved pickup or drop-off: what the user saw plus where it is.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Endpoint {
    pub description: String,
    pub coordinates: Coordinates,
}

impl Endpoint {
    pub fn new(description: String, coordinates: Coordinates) -> Self {
        Self {
            description,
            coordinates,
        }
    }

    /// Pickup taken from the device's own position fix.
    pub fn current_location(coordinates: Coordinates) -> Self {
        Self::new(CURRENT_LOCATION.into(), coordinates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_uses_lng_as_x() {
        let point: Point<f64> = Coordinates::new(-26.1367, 28.2411).unwrap().into();
        assert_eq!(point.x(), 28.2411);
        assert_eq!(point.y(), -26.1367);
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(Coordinates::new(91.0, 0.0).is_err());
        assert!(Coordinates::new(0.0, -181.0).is_err());
        assert!(Coordinates::new(f64::NAN, 0.0).is_err());
        assert!(Coordinates::new(-33.92, 18.42).is_ok());
    }
}
