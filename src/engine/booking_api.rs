use super::{evict_idle, live_session, Engine, Session};

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    api::BookingAPI,
    entities::{
        Booking, BookingForm, BookingMessage, Coordinates, Dispatch, Endpoint, EndpointKind,
        ServiceKind,
    },
    error::{geolocation_denied_error, Error},
};

#[async_trait]
impl BookingAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn create_booking(&self, service: ServiceKind) -> Result<Booking, Error> {
        let booking = Booking::new(service);

        let mut sessions = self.sessions.lock().await;
        evict_idle(&mut sessions, self.config.session_ttl());
        sessions.insert(booking.id, Session::new(booking.clone()));

        tracing::info!(id = %booking.id, service = %service.name(), "opened booking");

        Ok(booking)
    }

    #[tracing::instrument(skip(self))]
    async fn find_booking(&self, id: Uuid) -> Result<Booking, Error> {
        self.with_session(id, |session| Ok(session.booking.clone()))
            .await
    }

    #[tracing::instrument(skip(self))]
    async fn set_service(&self, id: Uuid, service: ServiceKind) -> Result<Booking, Error> {
        self.with_session(id, |session| {
            session.booking.set_service(service);

            Ok(session.booking.clone())
        })
        .await
    }

    #[tracing::instrument(skip(self))]
    async fn set_endpoint(
        &self,
        id: Uuid,
        kind: EndpointKind,
        endpoint: Endpoint,
    ) -> Result<Booking, Error> {
        endpoint.coordinates.validate()?;

        self.with_session(id, move |session| {
            match kind {
                EndpointKind::Pickup => session.booking.set_pickup(endpoint),
                EndpointKind::Dropoff => session.booking.set_dropoff(endpoint),
            }

            // a chosen address outranks any lookup still in flight for it
            session.lookups.issue(kind);

            Ok(session.booking.clone())
        })
        .await
    }

    #[tracing::instrument(skip(self))]
    async fn use_device_location(
        &self,
        id: Uuid,
        coordinates: Option<Coordinates>,
    ) -> Result<Booking, Error> {
        let coordinates = match coordinates {
            Some(coordinates) if coordinates.validate().is_ok() => coordinates,
            _ => {
                tracing::warn!(%id, "device location unavailable");
                return Err(geolocation_denied_error());
            }
        };

        self.set_endpoint(
            id,
            EndpointKind::Pickup,
            Endpoint::current_location(coordinates),
        )
        .await
    }

    #[tracing::instrument(skip(self, form), fields(channel = ?form.channel))]
    async fn submit_booking(&self, id: Uuid, form: BookingForm) -> Result<Dispatch, Error> {
        let mut sessions = self.sessions.lock().await;

        let session = live_session(&mut sessions, id, self.config.session_ttl())?;

        let message = BookingMessage::build(&session.booking, &form, &self.config.tariff)?;
        let dispatch = Dispatch::new(&message, &form, &self.config.profile)?;

        sessions.remove(&id);

        tracing::info!(%id, "booking submitted");

        Ok(dispatch)
    }
}
