#![allow(dead_code)]

use std::time::Duration;

use async_trait::async_trait;

use fareline::config::{Config, PlacesConfig, Profile};
use fareline::engine::Engine;
use fareline::entities::{Coordinates, Endpoint, PlaceCandidate};
use fareline::error::{upstream_error, Error};
use fareline::external::{DistanceProvider, PlaceLookup};

pub struct StubDistance {
    pub outcome: Result<f64, Error>,
    pub delay: Duration,
}

impl StubDistance {
    pub fn meters(meters: f64) -> Self {
        Self {
            outcome: Ok(meters),
            delay: Duration::ZERO,
        }
    }

    pub fn slow(meters: f64, delay: Duration) -> Self {
        Self {
            outcome: Ok(meters),
            delay,
        }
    }

    /// Fails every call, for flows that must never reach the router.
    pub fn unreachable() -> Self {
        Self {
            outcome: Err(upstream_error()),
            delay: Duration::ZERO,
        }
    }
}

#[async_trait]
impl DistanceProvider for StubDistance {
    async fn driving_distance(
        &self,
        _origin: Coordinates,
        _destination: Coordinates,
    ) -> Result<f64, Error> {
        tokio::time::sleep(self.delay).await;

        self.outcome.clone()
    }
}

/// Answers every query with a single candidate named after it. Queries
/// starting with "slow" take `delay` to come back.
pub struct StubPlaces {
    pub delay: Duration,
}

#[async_trait]
impl PlaceLookup for StubPlaces {
    async fn search_places(&self, query: &str) -> Result<Vec<PlaceCandidate>, Error> {
        if query.starts_with("slow") {
            tokio::time::sleep(self.delay).await;
        }

        Ok(vec![PlaceCandidate {
            title: query.to_string(),
            display_name: format!("{}, South Africa", query),
            coordinates: Coordinates::new(-26.2041, 28.0473)?,
        }])
    }
}

pub fn test_config(profile: Profile) -> Config {
    Config {
        profile,
        places: PlacesConfig {
            debounce_ms: 0,
            ..PlacesConfig::default()
        },
        ..Config::default()
    }
}

pub fn engine_with(distances: StubDistance) -> Engine {
    Engine::new(
        test_config(Profile::default()),
        Box::new(distances),
        Box::new(StubPlaces {
            delay: Duration::from_millis(50),
        }),
    )
}

pub fn airport() -> Endpoint {
    Endpoint::new(
        "O.R. Tambo International Airport, Kempton Park".into(),
        Coordinates::new(-26.1367, 28.2411).unwrap(),
    )
}

pub fn sandton() -> Endpoint {
    Endpoint::new(
        "Sandton City, Sandton".into(),
        Coordinates::new(-26.1076, 28.0567).unwrap(),
    )
}

pub fn durban() -> Endpoint {
    Endpoint::new(
        "Durban Beachfront, Durban".into(),
        Coordinates::new(-29.8587, 31.0218).unwrap(),
    )
}

pub fn kimberley() -> Endpoint {
    Endpoint::new(
        "Big Hole, Kimberley".into(),
        Coordinates::new(-28.7383, 24.7581).unwrap(),
    )
}
