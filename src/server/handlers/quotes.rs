use axum::extract::{Extension, Json, Path};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::Booking;
use crate::error::Error;
use crate::server::DynAPI;

#[derive(Serialize, Deserialize)]
pub struct SelectParams {
    vehicle_class: String,
}

pub async fn calculate(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<Uuid>,
) -> Result<Json<Booking>, Error> {
    let booking = api.calculate_quote(id).await?;

    Ok(booking.into())
}

pub async fn select(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<Uuid>,
    Json(params): Json<SelectParams>,
) -> Result<Json<Booking>, Error> {
    let booking = api.select_option(id, params.vehicle_class).await?;

    Ok(booking.into())
}
