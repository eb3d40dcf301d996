use axum::extract::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::env;
use std::fmt::{self, Display};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    pub code: i32,
    pub message: String,
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code {})", self.message, self.code)
    }
}

impl std::error::Error for Error {}

impl From<env::VarError> for Error {
    fn from(err: env::VarError) -> Self {
        env_var_error(err)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        reqwest_error(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        configuration_error(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        configuration_error(err)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_message) = match self.code {
            1..=99 => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
            SESSION_NOT_FOUND => (StatusCode::NOT_FOUND, self.message.as_str()),
            _ => (StatusCode::BAD_REQUEST, self.message.as_str()),
        };

        let body = Json(json!({
            "code": self.code,
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

// internal
const ENV_VAR: i32 = 1;
const REQWEST: i32 = 3;
const UPSTREAM: i32 = 4;
const UNEXPECTED: i32 = 5;
const UNKNOWN_VEHICLE_CLASS: i32 = 6;
const CONFIGURATION: i32 = 7;

// user facing
const INVALID_INVOCATION: i32 = 100;
const INVALID_INPUT: i32 = 101;
const MISSING_ENDPOINT: i32 = 102;
const ROUTE_UNAVAILABLE: i32 = 103;
const GEOLOCATION_DENIED: i32 = 104;
const PRICE_PENDING: i32 = 105;
const MISSING_EMAIL: i32 = 106;
const SESSION_NOT_FOUND: i32 = 107;

pub fn invalid_invocation_error() -> Error {
    Error {
        code: INVALID_INVOCATION,
        message: "invalid invocation".into(),
    }
}

pub fn invalid_input_error() -> Error {
    Error {
        code: INVALID_INPUT,
        message: "invalid input".into(),
    }
}

pub fn missing_endpoint_error() -> Error {
    Error {
        code: MISSING_ENDPOINT,
        message: "Please select pickup and drop-off from the suggestions list first.".into(),
    }
}

pub fn route_unavailable_error() -> Error {
    Error {
        code: ROUTE_UNAVAILABLE,
        message: "Could not calculate route. Try selecting again.".into(),
    }
}

pub fn geolocation_denied_error() -> Error {
    Error {
        code: GEOLOCATION_DENIED,
        message: "Could not access location.".into(),
    }
}

pub fn price_pending_error() -> Error {
    Error {
        code: PRICE_PENDING,
        message: "Please check the price estimate before confirming.".into(),
    }
}

pub fn missing_email_error() -> Error {
    Error {
        code: MISSING_EMAIL,
        message: "Please enter your email address to send by email.".into(),
    }
}

pub fn session_not_found_error() -> Error {
    Error {
        code: SESSION_NOT_FOUND,
        message: "booking session not found".into(),
    }
}

pub fn env_var_error(_: env::VarError) -> Error {
    Error {
        code: ENV_VAR,
        message: "environment variable error".into(),
    }
}

pub fn reqwest_error(err: reqwest::Error) -> Error {
    if err.is_decode() {
        return upstream_error();
    }

    Error {
        code: REQWEST,
        message: "reqwest error".into(),
    }
}

pub fn upstream_error() -> Error {
    Error {
        code: UPSTREAM,
        message: "upstream error".into(),
    }
}

pub fn unexpected_error() -> Error {
    Error {
        code: UNEXPECTED,
        message: "unexpected error".into(),
    }
}

pub fn unknown_vehicle_class_error(key: &str) -> Error {
    Error {
        code: UNKNOWN_VEHICLE_CLASS,
        message: format!("unknown vehicle class: {}", key),
    }
}

pub fn configuration_error<T: Display>(err: T) -> Error {
    Error {
        code: CONFIGURATION,
        message: format!("configuration error: {}", err),
    }
}

impl Error {
    pub fn is_user_facing(&self) -> bool {
        self.code >= 100
    }

    pub fn is_invalid_invocation_error(&self) -> bool {
        self.code == INVALID_INVOCATION
    }

    pub fn is_invalid_input_error(&self) -> bool {
        self.code == INVALID_INPUT
    }

    pub fn is_missing_endpoint_error(&self) -> bool {
        self.code == MISSING_ENDPOINT
    }

    pub fn is_route_unavailable_error(&self) -> bool {
        self.code == ROUTE_UNAVAILABLE
    }

    pub fn is_geolocation_denied_error(&self) -> bool {
        self.code == GEOLOCATION_DENIED
    }

    pub fn is_price_pending_error(&self) -> bool {
        self.code == PRICE_PENDING
    }

    pub fn is_missing_email_error(&self) -> bool {
        self.code == MISSING_EMAIL
    }

    pub fn is_session_not_found_error(&self) -> bool {
        self.code == SESSION_NOT_FOUND
    }

    pub fn is_unknown_vehicle_class_error(&self) -> bool {
        self.code == UNKNOWN_VEHICLE_CLASS
    }

    pub fn is_upstream_error(&self) -> bool {
        self.code == UPSTREAM
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn internal_errors_hide_their_message() {
        let response = unknown_vehicle_class_error("bus").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let err = unknown_vehicle_class_error("bus");
        assert!(!err.is_user_facing());
        assert!(err.message.contains("bus"));
    }

    #[test]
    fn user_facing_errors_are_bad_requests() {
        let response = missing_endpoint_error().into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = session_not_found_error().into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        assert!(route_unavailable_error().is_user_facing());
        assert!(geolocation_denied_error().is_user_facing());
    }
}
