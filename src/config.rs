use std::env;
use std::fs;
use std::net::SocketAddr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::entities::Tariff;
use crate::error::{configuration_error, Error};

/// Where finished bookings are sent, plus the behaviour that differs between
/// deployments of the same engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub chat_number: String,
    pub business_email: String,
    pub email_subject: String,
    pub tour_requires_dropoff: bool,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: "default".into(),
            chat_number: "27000000000".into(),
            business_email: "bookings@example.com".into(),
            email_subject: "Booking Request".into(),
            tour_requires_dropoff: false,
        }
    }
}

impl Profile {
    pub fn strict() -> Self {
        Self {
            name: "strict".into(),
            tour_requires_dropoff: true,
            ..Self::default()
        }
    }

    pub fn named(name: &str) -> Result<Self, Error> {
        match name {
            "default" => Ok(Self::default()),
            "strict" => Ok(Self::strict()),
            other => Err(configuration_error(format!("unknown profile: {}", other))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoutingConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            base_url: "https://router.project-osrm.org".into(),
            timeout_secs: 10,
        }
    }
}

impl RoutingConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlacesConfig {
    pub base_url: String,
    pub country_codes: String,
    pub limit: u8,
    pub min_query_chars: usize,
    pub debounce_ms: u64,
    pub timeout_secs: u64,
}

impl Default for PlacesConfig {
    fn default() -> Self {
        Self {
            base_url: "https://nominatim.openstreetmap.org".into(),
            country_codes: "za".into(),
            limit: 6,
            min_query_chars: 3,
            debounce_ms: 300,
            timeout_secs: 10,
        }
    }
}

impl PlacesConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub listen_addr: SocketAddr,
    /// Idle booking sessions older than this are dropped.
    pub session_ttl_secs: u64,
    pub tariff: Tariff,
    pub profile: Profile,
    pub routing: RoutingConfig,
    pub places: PlacesConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            session_ttl_secs: 1800,
            tariff: Tariff::default(),
            profile: Profile::default(),
            routing: RoutingConfig::default(),
            places: PlacesConfig::default(),
        }
    }
}

impl Config {
    /// Loads `.env` (if any) and then reads the process environment.
    pub fn from_env() -> Result<Self, Error> {
        dotenv::dotenv().ok();

        Self::from_lookup(|key| env::var(key))
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Result<String, env::VarError>,
    {
        let mut config = Self::default();

        if let Ok(addr) = lookup("FARELINE_LISTEN_ADDR") {
            config.listen_addr = addr
                .parse()
                .map_err(|_| configuration_error("FARELINE_LISTEN_ADDR is not an address"))?;
        }

        if let Ok(raw) = lookup("FARELINE_SESSION_TTL_SECS") {
            config.session_ttl_secs = raw
                .parse()
                .map_err(|_| configuration_error("FARELINE_SESSION_TTL_SECS is not a number"))?;
        }

        if let Ok(path) = lookup("FARELINE_TARIFF_PATH") {
            config.tariff = load_tariff(&path)?;
        }

        if let Ok(name) = lookup("FARELINE_PROFILE") {
            config.profile = Profile::named(&name)?;
        }

        if let Ok(number) = lookup("FARELINE_CHAT_NUMBER") {
            config.profile.chat_number = number;
        }

        if let Ok(email) = lookup("FARELINE_BUSINESS_EMAIL") {
            config.profile.business_email = email;
        }

        if let Ok(subject) = lookup("FARELINE_EMAIL_SUBJECT") {
            config.profile.email_subject = subject;
        }

        if let Ok(base) = lookup("OSRM_API_BASE") {
            config.routing.base_url = base;
        }

        if let Ok(base) = lookup("NOMINATIM_API_BASE") {
            config.places.base_url = base;
        }

        if let Ok(codes) = lookup("NOMINATIM_COUNTRY_CODES") {
            config.places.country_codes = codes;
        }

        if let Ok(raw) = lookup("HTTP_TIMEOUT_SECS") {
            let timeout_secs: u64 = raw
                .parse()
                .map_err(|_| configuration_error("HTTP_TIMEOUT_SECS is not a number"))?;
            config.routing.timeout_secs = timeout_secs;
            config.places.timeout_secs = timeout_secs;
        }

        config.validate()?;

        Ok(config)
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }

    pub fn validate(&self) -> Result<(), Error> {
        self.tariff.validate()?;

        if self.routing.base_url.is_empty() || self.places.base_url.is_empty() {
            return Err(configuration_error("provider base url must not be empty"));
        }

        if self.session_ttl_secs == 0 {
            return Err(configuration_error("session ttl must be greater than 0"));
        }

        if self.routing.timeout_secs == 0 || self.places.timeout_secs == 0 {
            return Err(configuration_error("timeouts must be greater than 0"));
        }

        if self.profile.chat_number.is_empty() || self.profile.business_email.is_empty() {
            return Err(configuration_error("messaging destination must be set"));
        }

        Ok(())
    }
}

#[tracing::instrument]
pub fn load_tariff(path: &str) -> Result<Tariff, Error> {
    let raw = fs::read_to_string(path)?;
    let tariff: Tariff = serde_json::from_str(&raw)?;

    tariff.validate()?;

    tracing::info!(
        classes = tariff.vehicle_classes.len(),
        places = tariff.long_distance.len(),
        "loaded tariff"
    );

    Ok(tariff)
}
