use crate::entities::EndpointKind;

/// Hands out increasing tickets per address field. Results may only be
/// published by the holder of the latest ticket for that field.
#[derive(Debug, Default)]
pub(super) struct LookupSequencer {
    pickup: u64,
    dropoff: u64,
}

impl LookupSequencer {
    fn slot(&mut self, kind: EndpointKind) -> &mut u64 {
        match kind {
            EndpointKind::Pickup => &mut self.pickup,
            EndpointKind::Dropoff => &mut self.dropoff,
        }
    }

    pub(super) fn issue(&mut self, kind: EndpointKind) -> u64 {
        let slot = self.slot(kind);
        *slot += 1;

        *slot
    }

    pub(super) fn is_latest(&self, kind: EndpointKind, ticket: u64) -> bool {
        let latest = match kind {
            EndpointKind::Pickup => self.pickup,
            EndpointKind::Dropoff => self.dropoff,
        };

        latest == ticket
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_ticket_supersedes_older() {
        let mut lookups = LookupSequencer::default();

        let first = lookups.issue(EndpointKind::Pickup);
        let second = lookups.issue(EndpointKind::Pickup);

        assert!(!lookups.is_latest(EndpointKind::Pickup, first));
        assert!(lookups.is_latest(EndpointKind::Pickup, second));
    }

    #[test]
    fn fields_are_sequenced_independently() {
        let mut lookups = LookupSequencer::default();

        let pickup = lookups.issue(EndpointKind::Pickup);
        lookups.issue(EndpointKind::Dropoff);
        lookups.issue(EndpointKind::Dropoff);

        assert!(lookups.is_latest(EndpointKind::Pickup, pickup));
        assert!(lookups.is_latest(EndpointKind::Dropoff, 2));
    }
}
