pub mod bookings;
pub mod places;
pub mod quotes;
pub mod tariff;
