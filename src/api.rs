use async_trait::async_trait;
use uuid::Uuid;

use crate::entities::{
    Booking, BookingForm, Coordinates, Dispatch, Endpoint, EndpointKind, ServiceKind,
    Suggestions, Tariff,
};
use crate::error::Error;

#[async_trait]
pub trait BookingAPI {
    async fn create_booking(&self, service: ServiceKind) -> Result<Booking, Error>;

    async fn find_booking(&self, id: Uuid) -> Result<Booking, Error>;

    async fn set_service(&self, id: Uuid, service: ServiceKind) -> Result<Booking, Error>;

    async fn set_endpoint(
        &self,
        id: Uuid,
        kind: EndpointKind,
        endpoint: Endpoint,
    ) -> Result<Booking, Error>;

    /// `None` means the device refused or failed to report a position.
    async fn use_device_location(
        &self,
        id: Uuid,
        coordinates: Option<Coordinates>,
    ) -> Result<Booking, Error>;

    /// Builds the outgoing message and closes the session.
    async fn submit_booking(&self, id: Uuid, form: BookingForm) -> Result<Dispatch, Error>;
}

#[async_trait]
pub trait QuoteAPI {
    async fn calculate_quote(&self, id: Uuid) -> Result<Booking, Error>;

    async fn select_option(&self, id: Uuid, vehicle_class: String) -> Result<Booking, Error>;

    fn tariff(&self) -> &Tariff;
}

#[async_trait]
pub trait PlaceAPI {
    async fn suggest_places(
        &self,
        id: Uuid,
        kind: EndpointKind,
        query: String,
    ) -> Result<Suggestions, Error>;
}

pub trait API: BookingAPI + QuoteAPI + PlaceAPI {}
