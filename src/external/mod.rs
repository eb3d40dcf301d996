pub mod nominatim;
pub mod osrm;

use async_trait::async_trait;

use crate::entities::{Coordinates, PlaceCandidate};
use crate::error::Error;

#[async_trait]
pub trait DistanceProvider {
    /// Driving distance in meters along the best route.
    async fn driving_distance(
        &self,
        origin: Coordinates,
        destination: Coordinates,
    ) -> Result<f64, Error>;
}

#[async_trait]
pub trait PlaceLookup {
    async fn search_places(&self, query: &str) -> Result<Vec<PlaceCandidate>, Error>;
}

pub type DynDistanceProvider = Box<dyn DistanceProvider + Send + Sync>;
pub type DynPlaceLookup = Box<dyn PlaceLookup + Send + Sync>;
