use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{
    config::PlacesConfig,
    entities::{Coordinates, PlaceCandidate},
    error::{invalid_input_error, upstream_error, Error},
    external::PlaceLookup,
};

const USER_AGENT: &str = concat!("fareline/", env!("CARGO_PKG_VERSION"));

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
struct Address {
    road: Option<String>,
    suburb: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Place {
    lat: String,
    lon: String,
    display_name: String,
    name: Option<String>,
    address: Option<Address>,
}

impl Place {
    fn title(&self) -> String {
        let address = self.address.clone().unwrap_or_default();

        [self.name.clone(), address.road, address.suburb]
            .into_iter()
            .flatten()
            .find(|value| !value.trim().is_empty())
            .unwrap_or_else(|| "Location".into())
    }

    fn into_candidate(self) -> Option<PlaceCandidate> {
        let lat = self.lat.parse().ok()?;
        let lng = self.lon.parse().ok()?;
        let coordinates = Coordinates::new(lat, lng).ok()?;

        Some(PlaceCandidate {
            title: self.title(),
            display_name: self.display_name,
            coordinates,
        })
    }
}

#[derive(Debug)]
pub struct NominatimClient {
    client: reqwest::Client,
    base_url: String,
    country_codes: String,
    limit: u8,
}

impl NominatimClient {
    pub fn new(config: &PlacesConfig) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            country_codes: config.country_codes.clone(),
            limit: config.limit,
        })
    }
}

#[async_trait]
impl PlaceLookup for NominatimClient {
    #[tracing::instrument(skip(self))]
    async fn search_places(&self, query: &str) -> Result<Vec<PlaceCandidate>, Error> {
        let url = format!("{}/search", self.base_url);

        let mut request = self
            .client
            .get(url)
            .query(&[("format", "json"), ("q", query), ("addressdetails", "1")])
            .query(&[("limit", self.limit)]);

        if !self.country_codes.is_empty() {
            request = request.query(&[("countrycodes", self.country_codes.as_str())]);
        }

        let res = request.send().await?;

        let status_code = res.status().as_u16();

        if (400..500).contains(&status_code) {
            return Err(invalid_input_error());
        } else if status_code != 200 {
            return Err(upstream_error());
        }

        let places: Vec<Place> = res.json().await?;
        let total = places.len();

        let candidates: Vec<PlaceCandidate> = places
            .into_iter()
            .filter_map(Place::into_candidate)
            .collect();

        if candidates.len() < total {
            tracing::warn!(
                dropped = total - candidates.len(),
                "skipped places with unusable coordinates"
            );
        }

        Ok(candidates)
    }
}
