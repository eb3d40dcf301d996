use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::entities::place;
use crate::error::{configuration_error, invalid_input_error, unknown_vehicle_class_error, Error};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FareTier {
    pub upper_bound_km: f64,
    pub rate_per_km: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VehicleClassPricing {
    pub base_fare: f64,
    pub tiers: Vec<FareTier>,
}

impl VehicleClassPricing {
    /// Banded fare: each tier only charges the kilometres that fall inside it,
    /// and tiers past the one containing `distance_km` are never visited.
    pub fn price(&self, distance_km: f64) -> i64 {
        let mut cost = self.base_fare;
        let mut previous_bound = 0.0;

        for tier in self.tiers.iter() {
            let band = (distance_km.min(tier.upper_bound_km) - previous_bound).max(0.0);
            cost += band * tier.rate_per_km;
            previous_bound = tier.upper_bound_km;

            if distance_km <= tier.upper_bound_km {
                break;
            }
        }

        cost.ceil() as i64
    }

    fn validate(&self, key: &str) -> Result<(), Error> {
        if !(self.base_fare.is_finite() && self.base_fare >= 0.0) {
            return Err(configuration_error(format!(
                "{}: base fare must be a non-negative number",
                key
            )));
        }

        let mut previous_bound = 0.0;
        for tier in self.tiers.iter() {
            if !(tier.upper_bound_km.is_finite() && tier.upper_bound_km > previous_bound) {
                return Err(configuration_error(format!(
                    "{}: tier bounds must be strictly increasing",
                    key
                )));
            }

            if !(tier.rate_per_km.is_finite() && tier.rate_per_km >= 0.0) {
                return Err(configuration_error(format!(
                    "{}: tier rates must be non-negative",
                    key
                )));
            }

            previous_bound = tier.upper_bound_km;
        }

        Ok(())
    }
}

/// How a vehicle class is shown on a price card.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Presentation {
    pub title: String,
    pub label: String,
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VehicleClass {
    pub key: String,
    pub pricing: VehicleClassPricing,
    pub tiered: Presentation,
    pub fixed_route: Presentation,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LongDistanceEntry {
    pub place: String,
    pub prices: BTreeMap<String, i64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tariff {
    pub currency_prefix: String,
    pub long_distance_threshold_km: f64,
    pub default_class: String,
    pub vehicle_classes: Vec<VehicleClass>,
    pub long_distance: Vec<LongDistanceEntry>,
}

impl Tariff {
    pub fn vehicle_class(&self, key: &str) -> Result<&VehicleClass, Error> {
        self.vehicle_classes
            .iter()
            .find(|class| class.key == key)
            .ok_or_else(|| unknown_vehicle_class_error(key))
    }

    pub fn tiered_price(&self, distance_km: f64, key: &str) -> Result<i64, Error> {
        if !(distance_km.is_finite() && distance_km >= 0.0) {
            return Err(invalid_input_error());
        }

        let class = self.vehicle_class(key)?;

        Ok(class.pricing.price(distance_km))
    }

    pub fn match_long_distance_key(&self, text: &str) -> Option<&str> {
        place::match_entry(&self.long_distance, text).map(|entry| entry.place.as_str())
    }

    pub fn fixed_price(&self, place: &str, key: &str) -> Result<i64, Error> {
        let entry = self
            .long_distance
            .iter()
            .find(|entry| entry.place == place)
            .ok_or_else(invalid_input_error)?;

        entry
            .prices
            .get(key)
            .copied()
            .ok_or_else(|| unknown_vehicle_class_error(key))
    }

    pub fn is_long_distance(&self, distance_km: f64) -> bool {
        distance_km > self.long_distance_threshold_km
    }

    pub fn format_amount(&self, amount: i64) -> String {
        format!("{}{}", self.currency_prefix, amount)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.vehicle_classes.is_empty() {
            return Err(configuration_error("no vehicle classes configured"));
        }

        if !(self.long_distance_threshold_km.is_finite() && self.long_distance_threshold_km > 0.0)
        {
            return Err(configuration_error(
                "long distance threshold must be positive",
            ));
        }

        for (index, class) in self.vehicle_classes.iter().enumerate() {
            if self.vehicle_classes[..index]
                .iter()
                .any(|other| other.key == class.key)
            {
                return Err(configuration_error(format!(
                    "duplicate vehicle class: {}",
                    class.key
                )));
            }

            class.pricing.validate(&class.key)?;
        }

        self.vehicle_class(&self.default_class)?;

        for entry in self.long_distance.iter() {
            if entry.place.is_empty() || place::normalize(&entry.place) != entry.place {
                return Err(configuration_error(format!(
                    "long distance place must be a normalized name: {:?}",
                    entry.place
                )));
            }

            for class in self.vehicle_classes.iter() {
                if !entry.prices.contains_key(&class.key) {
                    return Err(configuration_error(format!(
                        "{} has no fixed price for {}",
                        entry.place, class.key
                    )));
                }
            }
        }

        Ok(())
    }
}

fn tiers(rates: [f64; 3]) -> Vec<FareTier> {
    [30.0, 120.0, 250.0]
        .into_iter()
        .zip(rates)
        .map(|(upper_bound_km, rate_per_km)| FareTier {
            upper_bound_km,
            rate_per_km,
        })
        .collect()
}

fn presentation(title: &str, label: &str, description: &str) -> Presentation {
    Presentation {
        title: title.into(),
        label: label.into(),
        description: description.into(),
    }
}

fn long_distance_entry(place: &str, standard: i64, vito: i64, vip: i64) -> LongDistanceEntry {
    LongDistanceEntry {
        place: place.into(),
        prices: BTreeMap::from([
            ("standard".to_string(), standard),
            ("vito".to_string(), vito),
            ("vip".to_string(), vip),
        ]),
    }
}

impl Default for Tariff {
    fn default() -> Self {
        Self {
            currency_prefix: "R".into(),
            long_distance_threshold_km: 250.0,
            default_class: "vito".into(),
            vehicle_classes: vec![
                VehicleClass {
                    key: "standard".into(),
                    pricing: VehicleClassPricing {
                        base_fare: 250.0,
                        tiers: tiers([18.0, 14.0, 11.0]),
                    },
                    tiered: presentation("Standard", "Standard", "Standard sedan"),
                    fixed_route: presentation(
                        "Express Sedan",
                        "Express Sedan (1-3 pax)",
                        "1–3 pax • Fixed route",
                    ),
                },
                VehicleClass {
                    key: "vito".into(),
                    pricing: VehicleClassPricing {
                        base_fare: 500.0,
                        tiers: tiers([20.0, 16.0, 13.0]),
                    },
                    tiered: presentation("Business Van", "Mercedes Vito", "Mercedes Vito"),
                    fixed_route: presentation(
                        "Express Van",
                        "Express Van (2-6 pax)",
                        "2–6 pax • Fixed route",
                    ),
                },
                VehicleClass {
                    key: "vip".into(),
                    pricing: VehicleClassPricing {
                        base_fare: 650.0,
                        tiers: tiers([24.0, 19.0, 16.0]),
                    },
                    tiered: presentation("VIP Class", "VIP E-Class", "Mercedes E-Class"),
                    fixed_route: presentation(
                        "Express VIP",
                        "Express VIP",
                        "Premium • Fixed route",
                    ),
                },
            ],
            long_distance: vec![
                long_distance_entry("durban", 7000, 8900, 10500),
                long_distance_entry("cape town", 22000, 25000, 28000),
                long_distance_entry("bloemfontein", 8500, 10500, 12500),
                long_distance_entry("polokwane", 3500, 4800, 6000),
                long_distance_entry("nelspruit", 3000, 4200, 5200),
                long_distance_entry("mbombela", 3000, 4200, 5200),
                long_distance_entry("rustenburg", 1800, 2500, 3200),
                long_distance_entry("gaborone", 5500, 7200, 8800),
                long_distance_entry("maputo", 6000, 7800, 9500),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_distance_costs_base_fare() {
        let tariff = Tariff::default();

        for class in tariff.vehicle_classes.iter() {
            let price = tariff.tiered_price(0.0, &class.key).unwrap();
            assert_eq!(price, class.pricing.base_fare.ceil() as i64);
        }
    }

    #[test]
    fn standard_class_bands() {
        let tariff = Tariff::default();

        assert_eq!(tariff.tiered_price(30.0, "standard").unwrap(), 790);
        assert_eq!(tariff.tiered_price(120.0, "standard").unwrap(), 2050);
        // 250 + 30*18 + 90*14 + 130*11
        assert_eq!(tariff.tiered_price(250.0, "standard").unwrap(), 3480);
    }

    #[test]
    fn partial_kilometres_round_up() {
        let tariff = Tariff::default();

        // 500 + 10.5*20 = 710 exactly, 500 + 10.52*20 = 710.4
        assert_eq!(tariff.tiered_price(10.5, "vito").unwrap(), 710);
        assert_eq!(tariff.tiered_price(10.52, "vito").unwrap(), 711);
    }

    #[test]
    fn price_never_decreases_with_distance() {
        let tariff = Tariff::default();

        for class in tariff.vehicle_classes.iter() {
            let mut previous = 0;
            for step in 0..=600 {
                let distance = step as f64 * 0.5;
                let price = tariff.tiered_price(distance, &class.key).unwrap();
                assert!(
                    price >= previous,
                    "{} dropped at {} km",
                    class.key,
                    distance
                );
                previous = price;
            }
        }
    }

    #[test]
    fn unknown_class_is_rejected() {
        let tariff = Tariff::default();

        let err = tariff.tiered_price(12.0, "bus").unwrap_err();
        assert!(err.is_unknown_vehicle_class_error());
    }

    #[test]
    fn negative_distance_is_rejected() {
        let tariff = Tariff::default();

        let err = tariff.tiered_price(-1.0, "standard").unwrap_err();
        assert!(err.is_invalid_input_error());
        assert!(tariff.tiered_price(f64::INFINITY, "standard").is_err());
    }

    #[test]
    fn fixed_prices_by_place() {
        let tariff = Tariff::default();

        assert_eq!(tariff.fixed_price("durban", "standard").unwrap(), 7000);
        assert_eq!(tariff.fixed_price("durban", "vito").unwrap(), 8900);
        assert_eq!(tariff.fixed_price("durban", "vip").unwrap(), 10500);
        assert!(tariff.fixed_price("atlantis", "vip").is_err());
    }

    #[test]
    fn threshold_is_exclusive() {
        let tariff = Tariff::default();

        assert!(!tariff.is_long_distance(250.0));
        assert!(tariff.is_long_distance(250.1));
    }

    #[test]
    fn default_tariff_is_valid() {
        assert!(Tariff::default().validate().is_ok());
    }

    #[test]
    fn overlapping_tiers_are_rejected() {
        let mut tariff = Tariff::default();
        tariff.vehicle_classes[0].pricing.tiers[1].upper_bound_km = 20.0;

        assert!(tariff.validate().is_err());
    }

    #[test]
    fn unpriced_long_distance_entry_is_rejected() {
        let mut tariff = Tariff::default();
        tariff.long_distance[0].prices.remove("vip");

        assert!(tariff.validate().is_err());
    }

    #[test]
    fn unnormalized_place_is_rejected() {
        let mut tariff = Tariff::default();
        tariff.long_distance[1].place = "Cape  Town".into();

        assert!(tariff.validate().is_err());
    }

    #[test]
    fn missing_default_class_is_rejected() {
        let tariff = Tariff {
            default_class: "van".into(),
            ..Tariff::default()
        };

        assert!(tariff.validate().is_err());
    }
}
