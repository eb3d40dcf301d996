use axum::extract::{Extension, Json, Path};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::{Booking, BookingForm, Coordinates, Dispatch, Endpoint, EndpointKind, ServiceKind};
use crate::error::Error;
use crate::server::DynAPI;

#[derive(Serialize, Deserialize)]
pub struct ServiceParams {
    #[serde(default)]
    service: ServiceKind,
}

#[derive(Serialize, Deserialize)]
pub struct DeviceLocationParams {
    coordinates: Option<Coordinates>,
}

pub async fn create(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<ServiceParams>,
) -> Result<Json<Booking>, Error> {
    let booking = api.create_booking(params.service).await?;

    Ok(booking.into())
}

pub async fn find(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<Uuid>,
) -> Result<Json<Booking>, Error> {
    let booking = api.find_booking(id).await?;

    Ok(booking.into())
}

pub async fn set_service(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<Uuid>,
    Json(params): Json<ServiceParams>,
) -> Result<Json<Booking>, Error> {
    let booking = api.set_service(id, params.service).await?;

    Ok(booking.into())
}

pub async fn set_pickup(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<Uuid>,
    Json(endpoint): Json<Endpoint>,
) -> Result<Json<Booking>, Error> {
    let booking = api.set_endpoint(id, EndpointKind::Pickup, endpoint).await?;

    Ok(booking.into())
}

pub async fn set_dropoff(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<Uuid>,
    Json(endpoint): Json<Endpoint>,
) -> Result<Json<Booking>, Error> {
    let booking = api.set_endpoint(id, EndpointKind::Dropoff, endpoint).await?;

    Ok(booking.into())
}

pub async fn use_device_location(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<Uuid>,
    Json(params): Json<DeviceLocationParams>,
) -> Result<Json<Booking>, Error> {
    let booking = api.use_device_location(id, params.coordinates).await?;

    Ok(booking.into())
}

pub async fn submit(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<Uuid>,
    Json(form): Json<BookingForm>,
) -> Result<Json<Dispatch>, Error> {
    let dispatch = api.submit_booking(id, form).await?;

    Ok(dispatch.into())
}
