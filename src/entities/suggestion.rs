use serde::{Deserialize, Serialize};

use crate::entities::Coordinates;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlaceCandidate {
    pub title: String,
    pub display_name: String,
    pub coordinates: Coordinates,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndpointKind {
    Pickup,
    Dropoff,
}

/// Result of an address lookup. A lookup overtaken by a newer one for the same
/// field comes back `Superseded` and must not replace what is displayed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Suggestions {
    Fresh {
        ticket: u64,
        candidates: Vec<PlaceCandidate>,
    },
    Superseded {
        ticket: u64,
    },
}

impl Suggestions {
    pub fn ticket(&self) -> u64 {
        match self {
            Self::Fresh {
                ticket,
                candidates: _,
            } => *ticket,
            Self::Superseded { ticket } => *ticket,
        }
    }

    pub fn is_superseded(&self) -> bool {
        matches!(self, Self::Superseded { ticket: _ })
    }
}
