mod booking;
mod coordinates;
mod message;
pub mod place;
mod quote;
mod suggestion;
mod tariff;

pub use booking::{Booking, ServiceKind, Status, TripRequest};
pub use coordinates::{Coordinates, Endpoint, CURRENT_LOCATION};
pub use message::{BookingForm, BookingMessage, Channel, Dispatch, MULTIPLE_DAYS};
pub use quote::{
    Notice, PriceState, Quote, QuoteOption, QuotePlan, QuoteRequiredReason, TripClassification,
    MANUAL_QUOTE_LABEL, NOT_SELECTED,
};
pub use suggestion::{EndpointKind, PlaceCandidate, Suggestions};
pub use tariff::{
    FareTier, LongDistanceEntry, Presentation, Tariff, VehicleClass, VehicleClassPricing,
};
