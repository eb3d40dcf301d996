use async_trait::async_trait;
use geo_types::Point;
use serde::{Deserialize, Serialize};

use crate::{
    config::RoutingConfig,
    entities::Coordinates,
    error::{route_unavailable_error, upstream_error, Error},
    external::DistanceProvider,
};

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Route {
    distance: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Response {
    code: String,
    routes: Option<Vec<Route>>,
}

#[derive(Debug)]
pub struct OsrmClient {
    client: reqwest::Client,
    base_url: String,
}

impl OsrmClient {
    pub fn new(config: &RoutingConfig) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl DistanceProvider for OsrmClient {
    #[tracing::instrument(skip(self))]
    async fn driving_distance(
        &self,
        origin: Coordinates,
        destination: Coordinates,
    ) -> Result<f64, Error> {
        // OSRM takes lon,lat pairs
        let origin: Point<f64> = origin.into();
        let destination: Point<f64> = destination.into();

        let url = format!(
            "{}/route/v1/driving/{},{};{},{}",
            self.base_url,
            origin.x(),
            origin.y(),
            destination.x(),
            destination.y()
        );

        let res = self
            .client
            .get(url)
            .query(&[("overview", "false")])
            .send()
            .await?;

        let status_code = res.status().as_u16();

        if (400..500).contains(&status_code) {
            tracing::warn!(status_code, "routing request rejected");
            return Err(route_unavailable_error());
        } else if status_code != 200 {
            return Err(upstream_error());
        }

        let data: Response = res.json().await?;

        if data.code != "Ok" {
            tracing::warn!(code = %data.code, "no route");
            return Err(route_unavailable_error());
        }

        let route = data
            .routes
            .and_then(|routes| routes.into_iter().next())
            .ok_or_else(route_unavailable_error)?;

        if !(route.distance.is_finite() && route.distance >= 0.0) {
            return Err(upstream_error());
        }

        Ok(route.distance)
    }
}
