use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::{
    Coordinates, Endpoint, Notice, PriceState, Quote, QuoteOption, QuotePlan,
    QuoteRequiredReason, TripClassification,
};
use crate::error::{invalid_input_error, invalid_invocation_error, missing_endpoint_error, Error};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceKind {
    #[default]
    Transfer,
    Tour,
}

impl ServiceKind {
    pub fn name(&self) -> String {
        match self {
            Self::Transfer => "transfer".into(),
            Self::Tour => "tour".into(),
        }
    }

    pub fn is_tour(&self) -> bool {
        matches!(self, Self::Tour)
    }

    /// Price shown before anything has been calculated.
    pub fn initial_price(&self) -> PriceState {
        match self {
            Self::Transfer => PriceState::Pending,
            Self::Tour => PriceState::QuoteRequired,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum Status {
    AwaitingEndpoints,
    Priced { classification: TripClassification },
    QuoteRequired { reason: QuoteRequiredReason },
}

impl Status {
    pub fn name(&self) -> String {
        match self {
            Self::AwaitingEndpoints => "awaiting_endpoints".into(),
            Self::Priced { classification: _ } => "priced".into(),
            Self::QuoteRequired { reason: _ } => "quote_required".into(),
        }
    }
}

/// The endpoints a calculation was started with, captured so the result can be
/// matched back against the booking once the distance is known.
#[derive(Clone, Debug, PartialEq)]
pub struct TripRequest {
    pub revision: u64,
    pub service: ServiceKind,
    pub origin: Coordinates,
    pub destination: Coordinates,
    pub dropoff_text: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub revision: u64,
    pub service: ServiceKind,
    pub pickup: Option<Endpoint>,
    pub dropoff: Option<Endpoint>,
    /// Set when `dropoff` was copied from the pickup to close a tour loop.
    #[serde(default)]
    pub looped_dropoff: bool,
    pub distance_km: Option<f64>,
    pub status: Status,
    pub options: Vec<QuoteOption>,
    pub quote: Quote,
    pub notice: Option<Notice>,
    pub note: Option<String>,
}

impl Booking {
    pub fn new(service: ServiceKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            revision: 0,
            service,
            pickup: None,
            dropoff: None,
            looped_dropoff: false,
            distance_km: None,
            status: Status::AwaitingEndpoints,
            options: vec![],
            quote: Quote::not_selected(service.initial_price()),
            notice: None,
            note: None,
        }
    }

    pub fn is_current(&self, revision: u64) -> bool {
        self.revision == revision
    }

    #[tracing::instrument(skip(self), fields(id = %self.id))]
    pub fn set_service(&mut self, service: ServiceKind) {
        self.service = service;
        self.reset();
    }

    #[tracing::instrument(skip(self), fields(id = %self.id))]
    pub fn set_pickup(&mut self, endpoint: Endpoint) {
        self.reset();
        self.pickup = Some(endpoint);
    }

    #[tracing::instrument(skip(self), fields(id = %self.id))]
    pub fn set_dropoff(&mut self, endpoint: Endpoint) {
        self.reset();
        self.dropoff = Some(endpoint);
    }

    /// Drops every quote-derived field so nothing computed for the old
    /// endpoints survives, including a drop-off the user never chose.
    fn reset(&mut self) {
        if self.looped_dropoff {
            self.dropoff = None;
            self.looped_dropoff = false;
        }

        self.revision += 1;
        self.distance_km = None;
        self.status = Status::AwaitingEndpoints;
        self.options.clear();
        self.quote = Quote::not_selected(self.service.initial_price());
        self.notice = None;
        self.note = None;
    }

    /// Validates that a calculation can start, without touching the booking.
    pub fn trip_request(&self, tour_requires_dropoff: bool) -> Result<TripRequest, Error> {
        let pickup = self
            .pickup
            .as_ref()
            .ok_or_else(missing_endpoint_error)?;

        let dropoff = match (&self.dropoff, self.service) {
            (Some(dropoff), _) => dropoff,
            (None, ServiceKind::Tour) if !tour_requires_dropoff => pickup,
            (None, _) => return Err(missing_endpoint_error()),
        };

        Ok(TripRequest {
            revision: self.revision,
            service: self.service,
            origin: pickup.coordinates,
            destination: dropoff.coordinates,
            dropoff_text: dropoff.description.clone(),
        })
    }

    /// A tour without a drop-off ends where it started.
    pub fn close_tour_loop(&mut self) {
        if self.service.is_tour() && self.dropoff.is_none() && self.pickup.is_some() {
            self.dropoff = self.pickup.clone();
            self.looped_dropoff = true;
        }
    }

    #[tracing::instrument(skip(self, plan), fields(id = %self.id, status = %plan.status.name()))]
    pub fn apply_plan(&mut self, plan: QuotePlan) {
        self.distance_km = plan.distance_km;
        self.status = plan.status;
        self.options = plan.options;
        self.quote = plan.quote;
        self.notice = plan.notice;
        self.note = Some(plan.note);
    }

    #[tracing::instrument(skip(self), fields(id = %self.id))]
    pub fn select_option(&mut self, vehicle_class: &str) -> Result<(), Error> {
        match self.status {
            Status::Priced { classification: _ } => {}
            _ => return Err(invalid_invocation_error()),
        }

        let quote = self
            .options
            .iter()
            .find(|option| option.vehicle_class == vehicle_class)
            .map(QuoteOption::quote)
            .ok_or_else(invalid_input_error)?;

        for option in self.options.iter_mut() {
            option.selected = option.vehicle_class == vehicle_class;
        }
        self.quote = quote;

        Ok(())
    }

    pub fn selected_option(&self) -> Option<&QuoteOption> {
        self.options.iter().find(|option| option.selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Tariff;

    fn endpoint(description: &str, lat: f64, lng: f64) -> Endpoint {
        Endpoint::new(description.into(), Coordinates::new(lat, lng).unwrap())
    }

    fn priced_transfer() -> Booking {
        let mut booking = Booking::new(ServiceKind::Transfer);
        booking.set_pickup(endpoint("OR Tambo International Airport", -26.1367, 28.2411));
        booking.set_dropoff(endpoint("Sandton, Johannesburg", -26.1076, 28.0567));

        let plan = QuotePlan::for_transfer(&Tariff::default(), 30.0, "Sandton").unwrap();
        booking.apply_plan(plan);

        booking
    }

    #[test]
    fn new_booking_starts_unpriced() {
        let transfer = Booking::new(ServiceKind::Transfer);
        assert_eq!(transfer.status, Status::AwaitingEndpoints);
        assert_eq!(transfer.quote, Quote::not_selected(PriceState::Pending));

        let tour = Booking::new(ServiceKind::Tour);
        assert_eq!(tour.quote, Quote::not_selected(PriceState::QuoteRequired));
    }

    #[test]
    fn transfer_requires_both_endpoints() {
        let mut booking = Booking::new(ServiceKind::Transfer);
        let err = booking.trip_request(false).unwrap_err();
        assert!(err.is_missing_endpoint_error());

        booking.set_pickup(endpoint("Rosebank", -26.146, 28.041));
        let err = booking.trip_request(false).unwrap_err();
        assert!(err.is_missing_endpoint_error());
        assert_eq!(booking.status, Status::AwaitingEndpoints);

        booking.set_dropoff(endpoint("Pretoria", -25.747, 28.229));
        let request = booking.trip_request(false).unwrap();
        assert_eq!(request.revision, booking.revision);
        assert_eq!(request.dropoff_text, "Pretoria");
    }

    #[test]
    fn tour_without_dropoff_loops_back_to_pickup() {
        let mut booking = Booking::new(ServiceKind::Tour);
        booking.set_pickup(endpoint("Soweto", -26.267, 27.858));

        let request = booking.trip_request(false).unwrap();
        assert_eq!(request.origin, request.destination);
        assert_eq!(request.dropoff_text, "Soweto");

        booking.close_tour_loop();
        assert_eq!(booking.dropoff, booking.pickup);
        assert!(booking.looped_dropoff);
    }

    #[test]
    fn looped_dropoff_is_cleared_on_reset() {
        let mut booking = Booking::new(ServiceKind::Tour);
        booking.set_pickup(endpoint("Soweto", -26.267, 27.858));
        booking.close_tour_loop();
        booking.apply_plan(QuotePlan::for_tour());

        booking.set_pickup(endpoint("Rosebank", -26.146, 28.041));

        assert_eq!(booking.dropoff, None);
        assert!(!booking.looped_dropoff);
        assert_eq!(booking.quote, Quote::not_selected(PriceState::QuoteRequired));

        booking.set_service(ServiceKind::Transfer);
        let err = booking.trip_request(false).unwrap_err();
        assert!(err.is_missing_endpoint_error());
    }

    #[test]
    fn chosen_dropoff_survives_reset() {
        let mut booking = Booking::new(ServiceKind::Tour);
        booking.set_pickup(endpoint("Soweto", -26.267, 27.858));
        booking.set_dropoff(endpoint("Pretoria", -25.747, 28.229));
        booking.close_tour_loop();

        booking.set_pickup(endpoint("Rosebank", -26.146, 28.041));

        assert_eq!(booking.dropoff.unwrap().description, "Pretoria");
    }

    #[test]
    fn strict_profile_requires_tour_dropoff() {
        let mut booking = Booking::new(ServiceKind::Tour);
        booking.set_pickup(endpoint("Soweto", -26.267, 27.858));

        let err = booking.trip_request(true).unwrap_err();
        assert!(err.is_missing_endpoint_error());
    }

    #[test]
    fn changing_pickup_discards_quote() {
        let mut booking = priced_transfer();
        let revision = booking.revision;
        assert_eq!(booking.distance_km, Some(30.0));

        booking.set_pickup(endpoint("Midrand", -25.996, 28.128));

        assert_eq!(booking.distance_km, None);
        assert_eq!(booking.status, Status::AwaitingEndpoints);
        assert!(booking.options.is_empty());
        assert_eq!(booking.quote, Quote::not_selected(PriceState::Pending));
        assert!(!booking.is_current(revision));
    }

    #[test]
    fn changing_service_to_tour_requires_quote() {
        let mut booking = priced_transfer();

        booking.set_service(ServiceKind::Tour);

        assert_eq!(booking.distance_km, None);
        assert_eq!(booking.quote.price, PriceState::QuoteRequired);
        assert_eq!(booking.quote.vehicle_label, "Not Selected");
    }

    #[test]
    fn selecting_moves_the_single_selection() {
        let mut booking = priced_transfer();
        assert_eq!(booking.selected_option().unwrap().vehicle_class, "vito");

        booking.select_option("vip").unwrap();
        booking.select_option("standard").unwrap();

        let selected: Vec<_> = booking
            .options
            .iter()
            .filter(|option| option.selected)
            .collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].vehicle_class, "standard");
        assert_eq!(
            booking.quote,
            Quote::new("Standard".into(), PriceState::Fixed { amount: 790 })
        );
    }

    #[test]
    fn selecting_unknown_option_leaves_selection() {
        let mut booking = priced_transfer();

        let err = booking.select_option("bus").unwrap_err();
        assert!(err.is_invalid_input_error());
        assert_eq!(booking.selected_option().unwrap().vehicle_class, "vito");
    }

    #[test]
    fn selecting_before_pricing_is_invalid() {
        let mut booking = Booking::new(ServiceKind::Transfer);

        let err = booking.select_option("vito").unwrap_err();
        assert!(err.is_invalid_invocation_error());
        assert!(booking.quote.is_pending());
    }
}
