use super::{live_session, Engine};

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    api::QuoteAPI,
    entities::{Booking, QuotePlan, Tariff},
    error::Error,
};

#[async_trait]
impl QuoteAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn calculate_quote(&self, id: Uuid) -> Result<Booking, Error> {
        let tour_requires_dropoff = self.config.profile.tour_requires_dropoff;

        let request = {
            let mut sessions = self.sessions.lock().await;
            let session = live_session(&mut sessions, id, self.config.session_ttl())?;

            let request = session.booking.trip_request(tour_requires_dropoff)?;

            // tours are always quoted by hand, so no distance is needed
            if request.service.is_tour() {
                session.booking.close_tour_loop();
                session.booking.apply_plan(QuotePlan::for_tour());

                return Ok(session.booking.clone());
            }

            request
        };

        let meters = self
            .distances
            .driving_distance(request.origin, request.destination)
            .await?;

        let distance_km = meters / 1000.0;
        let plan = QuotePlan::for_transfer(&self.config.tariff, distance_km, &request.dropoff_text)?;

        self.with_session(id, move |session| {
            if !session.booking.is_current(request.revision) {
                tracing::warn!(
                    %id,
                    revision = request.revision,
                    current = session.booking.revision,
                    "discarding stale calculation"
                );

                return Ok(session.booking.clone());
            }

            session.booking.apply_plan(plan);

            tracing::info!(%id, distance_km, status = %session.booking.status.name(), "quoted");

            Ok(session.booking.clone())
        })
        .await
    }

    #[tracing::instrument(skip(self))]
    async fn select_option(&self, id: Uuid, vehicle_class: String) -> Result<Booking, Error> {
        self.with_session(id, |session| {
            session.booking.select_option(&vehicle_class)?;

            Ok(session.booking.clone())
        })
        .await
    }

    fn tariff(&self) -> &Tariff {
        &self.config.tariff
    }
}
