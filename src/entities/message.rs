use chrono::{NaiveDate, NaiveTime};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

use crate::config::Profile;
use crate::entities::{Booking, ServiceKind, Tariff};
use crate::error::{missing_email_error, price_pending_error, Error};

pub const MULTIPLE_DAYS: &str = "Multiple days";

/// Same unreserved set as JavaScript's `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    #[default]
    Chat,
    Email,
}

/// Fields the customer fills in next to the trip itself.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BookingForm {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub passengers: Option<u32>,
    pub notes: String,
    pub tour_destination: String,
    pub tour_duration: String,
    pub tour_days: String,
    pub channel: Channel,
}

fn present(value: &str) -> Option<String> {
    let value = value.trim();

    if value.is_empty() {
        return None;
    }

    Some(value.to_string())
}

fn push_field(lines: &mut Vec<String>, label: &str, value: &Option<String>) {
    if let Some(value) = value {
        lines.push(format!("{}: {}", label, value));
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingMessage {
    pub service: String,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub pickup: Option<String>,
    pub dropoff: Option<String>,
    pub distance: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub passengers: Option<String>,
    pub tour_destination: Option<String>,
    pub tour_duration: Option<String>,
    pub tour_days: Option<String>,
    pub notes: Option<String>,
    pub vehicle: String,
    pub price: String,
}

impl BookingMessage {
    pub fn build(booking: &Booking, form: &BookingForm, tariff: &Tariff) -> Result<Self, Error> {
        let is_tour = booking.service.is_tour();

        if !is_tour && booking.quote.is_pending() {
            return Err(price_pending_error());
        }

        let tour_field = |value: &str| if is_tour { present(value) } else { None };
        let tour_days = if form.tour_duration.trim() == MULTIPLE_DAYS {
            tour_field(&form.tour_days)
        } else {
            None
        };

        Ok(Self {
            service: booking.service.name(),
            name: present(&form.name),
            phone: present(&form.phone),
            email: present(&form.email),
            pickup: booking
                .pickup
                .as_ref()
                .and_then(|endpoint| present(&endpoint.description)),
            dropoff: booking
                .dropoff
                .as_ref()
                .and_then(|endpoint| present(&endpoint.description)),
            distance: booking.distance_km.map(|km| format!("{:.1}", km)),
            date: form.date.map(|date| date.format("%Y-%m-%d").to_string()),
            time: form.time.map(|time| time.format("%H:%M").to_string()),
            passengers: form.passengers.map(|count| count.to_string()),
            tour_destination: tour_field(&form.tour_destination),
            tour_duration: tour_field(&form.tour_duration),
            tour_days,
            notes: present(&form.notes),
            vehicle: booking.quote.vehicle_label.clone(),
            price: booking.quote.price.display(tariff),
        })
    }

    pub fn text(&self) -> String {
        let mut lines: Vec<String> = vec![];

        lines.push("Web Booking".into());
        lines.push(String::new());

        lines.push(format!("Service: {}", self.service));
        push_field(&mut lines, "Name", &self.name);
        push_field(&mut lines, "Phone", &self.phone);
        push_field(&mut lines, "Email", &self.email);
        lines.push(String::new());

        push_field(&mut lines, "Pickup", &self.pickup);
        push_field(&mut lines, "Drop", &self.dropoff);
        push_field(&mut lines, "Km", &self.distance);
        lines.push(String::new());

        push_field(&mut lines, "Date", &self.date);
        push_field(&mut lines, "Time", &self.time);
        push_field(&mut lines, "Pax", &self.passengers);

        if self.service == ServiceKind::Tour.name() {
            push_field(&mut lines, "Tour", &self.tour_destination);
            push_field(&mut lines, "Duration", &self.tour_duration);
            push_field(&mut lines, "Days", &self.tour_days);
        }

        if self.notes.is_some() {
            lines.push(String::new());
            push_field(&mut lines, "Notes", &self.notes);
        }

        lines.push(String::new());
        lines.push(format!("Vehicle: {}", self.vehicle));
        lines.push(format!("Estimate: {}", self.price));

        lines.join("\n")
    }
}

/// A finished deep link for the messaging collaborator to open.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "channel", rename_all = "snake_case")]
pub enum Dispatch {
    Chat {
        url: String,
        text: String,
    },
    Email {
        url: String,
        subject: String,
        body: String,
    },
}

impl Dispatch {
    pub fn new(message: &BookingMessage, form: &BookingForm, profile: &Profile) -> Result<Self, Error> {
        let text = message.text();

        match form.channel {
            Channel::Chat => Ok(Self::Chat {
                url: format!(
                    "https://wa.me/{}?text={}",
                    profile.chat_number,
                    utf8_percent_encode(&text, URI_COMPONENT)
                ),
                text,
            }),
            Channel::Email => {
                if present(&form.email).is_none() {
                    return Err(missing_email_error());
                }

                Ok(Self::Email {
                    url: format!(
                        "mailto:{}?subject={}&body={}",
                        profile.business_email,
                        utf8_percent_encode(&profile.email_subject, URI_COMPONENT),
                        utf8_percent_encode(&text, URI_COMPONENT)
                    ),
                    subject: profile.email_subject.clone(),
                    body: text,
                })
            }
        }
    }

    pub fn url(&self) -> &str {
        match self {
            Self::Chat { url, text: _ } => url,
            Self::Email {
                url,
                subject: _,
                body: _,
            } => url,
        }
    }
}
