mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::Extension,
    routing::{get, patch, post},
    Router,
};

use crate::api::API;
use crate::error::{unexpected_error, Error};
use crate::server::handlers::{bookings, places, quotes, tariff};

type DynAPI = Arc<dyn API + Send + Sync>;

pub fn router<T: API + Sync + Send + 'static>(api: T) -> Router {
    let api = Arc::new(api) as DynAPI;

    Router::new()
        .route("/bookings", post(bookings::create))
        .route("/bookings/:id", get(bookings::find))
        .route("/bookings/:id/service", patch(bookings::set_service))
        .route("/bookings/:id/pickup", patch(bookings::set_pickup))
        .route("/bookings/:id/dropoff", patch(bookings::set_dropoff))
        .route("/bookings/:id/pickup/device", patch(bookings::use_device_location))
        .route("/bookings/:id/suggestions", get(places::suggestions))
        .route("/bookings/:id/quote", patch(quotes::calculate))
        .route("/bookings/:id/selection", patch(quotes::select))
        .route("/bookings/:id/submit", post(bookings::submit))
        .route("/tariff", get(tariff::find))
        .layer(Extension(api))
}

pub async fn serve<T: API + Sync + Send + 'static>(api: T, addr: SocketAddr) -> Result<(), Error> {
    let app = router(api);

    tracing::info!("listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .map_err(|err| {
            tracing::error!(%err, "server stopped");
            unexpected_error()
        })
}
