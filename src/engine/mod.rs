mod booking_api;
mod lookup;
mod place_api;
mod quote_api;

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;
use uuid::Uuid;

use crate::{
    api::API,
    config::Config,
    entities::Booking,
    error::{session_not_found_error, Error},
    external::{DynDistanceProvider, DynPlaceLookup},
};

use lookup::LookupSequencer;

#[derive(Debug)]
struct Session {
    booking: Booking,
    lookups: LookupSequencer,
    last_touched: Instant,
}

impl Session {
    fn new(booking: Booking) -> Self {
        Self {
            booking,
            lookups: LookupSequencer::default(),
            last_touched: Instant::now(),
        }
    }

    fn is_idle(&self, ttl: Duration) -> bool {
        self.last_touched.elapsed() >= ttl
    }
}

type Sessions = HashMap<Uuid, Session>;

/// Looks up a session that has not idled out, refreshing its activity time.
/// An idle session is dropped on the spot.
fn live_session(sessions: &mut Sessions, id: Uuid, ttl: Duration) -> Result<&mut Session, Error> {
    let idle = sessions
        .get(&id)
        .map(|session| session.is_idle(ttl))
        .ok_or_else(session_not_found_error)?;

    if idle {
        sessions.remove(&id);
        tracing::info!(%id, "booking session expired");
        return Err(session_not_found_error());
    }

    let session = sessions
        .get_mut(&id)
        .ok_or_else(session_not_found_error)?;
    session.last_touched = Instant::now();

    Ok(session)
}

fn evict_idle(sessions: &mut Sessions, ttl: Duration) -> usize {
    let before = sessions.len();
    sessions.retain(|_, session| !session.is_idle(ttl));

    let evicted = before - sessions.len();
    if evicted > 0 {
        tracing::info!(evicted, "evicted idle booking sessions");
    }

    evicted
}

/// Holds every open booking session in memory. Each session is only ever
/// touched under the registry lock, and the lock is never held across a
/// provider call.
pub struct Engine {
    config: Config,
    sessions: Mutex<Sessions>,
    distances: DynDistanceProvider,
    places: DynPlaceLookup,
}

impl Engine {
    #[tracing::instrument(name = "Engine::new", skip_all, fields(profile = %config.profile.name))]
    pub fn new(config: Config, distances: DynDistanceProvider, places: DynPlaceLookup) -> Self {
        Self {
            config,
            sessions: Mutex::new(HashMap::new()),
            distances,
            places,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.lock().await.len()
    }

    pub async fn evict_idle_sessions(&self) -> usize {
        let mut sessions = self.sessions.lock().await;

        evict_idle(&mut sessions, self.config.session_ttl())
    }

    async fn with_session<T, F>(&self, id: Uuid, f: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Session) -> Result<T, Error> + Send,
        T: Send,
    {
        let mut sessions = self.sessions.lock().await;
        let session = live_session(&mut sessions, id, self.config.session_ttl())?;

        f(session)
    }
}

impl API for Engine {}

#[test]
fn new_engine() {
    use crate::api::BookingAPI;
    use crate::entities::ServiceKind;
    use crate::external::{nominatim::NominatimClient, osrm::OsrmClient};
    use tokio_test::block_on;

    let config = Config::default();
    let distances = OsrmClient::new(&config.routing).unwrap();
    let places = NominatimClient::new(&config.places).unwrap();

    let engine = Engine::new(config, Box::new(distances), Box::new(places));

    let booking = block_on(engine.create_booking(ServiceKind::Tour)).unwrap();
    let found = block_on(engine.find_booking(booking.id)).unwrap();

    assert_eq!(found.id, booking.id);
    assert_eq!(found.service, ServiceKind::Tour);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::ServiceKind;

    #[test]
    fn idle_sessions_are_dropped() {
        let ttl = Duration::from_secs(60);
        let mut sessions = Sessions::new();

        let fresh = Session::new(Booking::new(ServiceKind::Transfer));
        let fresh_id = fresh.booking.id;
        sessions.insert(fresh_id, fresh);

        let mut stale = Session::new(Booking::new(ServiceKind::Tour));
        let stale_id = stale.booking.id;
        // only move the clock back when the platform can represent it
        if let Some(earlier) = Instant::now().checked_sub(ttl * 2) {
            stale.last_touched = earlier;
            sessions.insert(stale_id, stale);

            let err = live_session(&mut sessions, stale_id, ttl).unwrap_err();
            assert!(err.is_session_not_found_error());
            assert!(!sessions.contains_key(&stale_id));
        }

        assert!(live_session(&mut sessions, fresh_id, ttl).is_ok());
        assert_eq!(evict_idle(&mut sessions, ttl), 0);
        assert_eq!(sessions.len(), 1);
    }
}
