use serde::{Deserialize, Serialize};

use crate::entities::{Presentation, Status, Tariff};
use crate::error::{invalid_input_error, unknown_vehicle_class_error, Error};

pub const NOT_SELECTED: &str = "Not Selected";
pub const MANUAL_QUOTE_LABEL: &str = "Long distance or cross-border";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum PriceState {
    Pending,
    QuoteRequired,
    Fixed { amount: i64 },
}

impl PriceState {
    pub fn name(&self) -> String {
        match self {
            Self::Pending => "pending".into(),
            Self::QuoteRequired => "quote_required".into(),
            Self::Fixed { amount: _ } => "fixed".into(),
        }
    }

    pub fn display(&self, tariff: &Tariff) -> String {
        match self {
            Self::Pending => "Pending".into(),
            Self::QuoteRequired => "Quote required".into(),
            Self::Fixed { amount } => tariff.format_amount(*amount),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub vehicle_label: String,
    pub price: PriceState,
}

impl Quote {
    pub fn new(vehicle_label: String, price: PriceState) -> Self {
        Self {
            vehicle_label,
            price,
        }
    }

    pub fn not_selected(price: PriceState) -> Self {
        Self::new(NOT_SELECTED.into(), price)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.price, PriceState::Pending)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum TripClassification {
    ShortDistance,
    LongDistanceMatched { place: String },
    LongDistanceUnmatched,
}

impl TripClassification {
    pub fn classify(tariff: &Tariff, distance_km: f64, dropoff_text: &str) -> Self {
        if !tariff.is_long_distance(distance_km) {
            return Self::ShortDistance;
        }

        match tariff.match_long_distance_key(dropoff_text) {
            Some(place) => Self::LongDistanceMatched {
                place: place.into(),
            },
            None => Self::LongDistanceUnmatched,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteRequiredReason {
    LongDistanceUnmatched,
    Tour,
}

/// One selectable price card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteOption {
    pub vehicle_class: String,
    pub title: String,
    pub label: String,
    pub description: String,
    pub amount: i64,
    pub selected: bool,
}

impl QuoteOption {
    fn new(vehicle_class: &str, presentation: &Presentation, amount: i64) -> Self {
        Self {
            vehicle_class: vehicle_class.into(),
            title: presentation.title.clone(),
            label: presentation.label.clone(),
            description: presentation.description.clone(),
            amount,
            selected: false,
        }
    }

    pub fn quote(&self) -> Quote {
        Quote::new(
            self.label.clone(),
            PriceState::Fixed {
                amount: self.amount,
            },
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub headline: String,
    pub detail: String,
}

/// Everything a calculation decides, applied to a booking in one step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuotePlan {
    pub distance_km: Option<f64>,
    pub status: Status,
    pub options: Vec<QuoteOption>,
    pub quote: Quote,
    pub notice: Option<Notice>,
    pub note: String,
}

impl QuotePlan {
    #[tracing::instrument(skip(tariff))]
    pub fn for_transfer(tariff: &Tariff, distance_km: f64, dropoff_text: &str) -> Result<Self, Error> {
        if !(distance_km.is_finite() && distance_km >= 0.0) {
            return Err(invalid_input_error());
        }

        let classification = TripClassification::classify(tariff, distance_km, dropoff_text);

        let plan = match &classification {
            TripClassification::ShortDistance => {
                let options = tariff
                    .vehicle_classes
                    .iter()
                    .map(|class| -> Result<QuoteOption, Error> {
                        let amount = tariff.tiered_price(distance_km, &class.key)?;
                        Ok(QuoteOption::new(&class.key, &class.tiered, amount))
                    })
                    .collect::<Result<Vec<_>, Error>>()?;

                Self::priced(
                    tariff,
                    distance_km,
                    classification.clone(),
                    options,
                    None,
                    "Tap a price to select it. Final quote confirmed after request.",
                )?
            }
            TripClassification::LongDistanceMatched { place } => {
                let options = tariff
                    .vehicle_classes
                    .iter()
                    .map(|class| -> Result<QuoteOption, Error> {
                        let amount = tariff.fixed_price(place, &class.key)?;
                        Ok(QuoteOption::new(&class.key, &class.fixed_route, amount))
                    })
                    .collect::<Result<Vec<_>, Error>>()?;

                let notice = Notice {
                    headline: format!(
                        "Route pricing available for {} ({:.0} km)",
                        place.to_uppercase(),
                        distance_km
                    ),
                    detail: "Select an option below".into(),
                };

                Self::priced(
                    tariff,
                    distance_km,
                    classification.clone(),
                    options,
                    Some(notice),
                    "Fixed route pricing is confirmed after request.",
                )?
            }
            TripClassification::LongDistanceUnmatched => Self {
                distance_km: Some(distance_km),
                status: Status::QuoteRequired {
                    reason: QuoteRequiredReason::LongDistanceUnmatched,
                },
                options: vec![],
                quote: Quote::new(MANUAL_QUOTE_LABEL.into(), PriceState::QuoteRequired),
                notice: Some(Notice {
                    headline: format!("Long distance trip detected ({:.0} km)", distance_km),
                    detail: "Pricing for long distance or cross-border trips is arranged manually. Submit your request and we will confirm the quote.".into(),
                }),
                note: "Long distance pricing is confirmed after request.".into(),
            },
        };

        Ok(plan)
    }

    pub fn for_tour() -> Self {
        Self {
            distance_km: None,
            status: Status::QuoteRequired {
                reason: QuoteRequiredReason::Tour,
            },
            options: vec![],
            quote: Quote::not_selected(PriceState::QuoteRequired),
            notice: Some(Notice {
                headline: "Tour pricing is confirmed after request".into(),
                detail: "Submit your tour details and we will confirm the quote.".into(),
            }),
            note: "Quote required for tours.".into(),
        }
    }

    fn priced(
        tariff: &Tariff,
        distance_km: f64,
        classification: TripClassification,
        mut options: Vec<QuoteOption>,
        notice: Option<Notice>,
        note: &str,
    ) -> Result<Self, Error> {
        let default = options
            .iter_mut()
            .find(|option| option.vehicle_class == tariff.default_class)
            .ok_or_else(|| unknown_vehicle_class_error(&tariff.default_class))?;
        default.selected = true;
        let quote = default.quote();

        Ok(Self {
            distance_km: Some(distance_km),
            status: Status::Priced { classification },
            options,
            quote,
            notice,
            note: note.into(),
        })
    }
}
