use std::collections::HashSet;

use shared::{
    domain::PartyId,
    protocol::{Guest, Party, Rsvp},
};

/// Everything the planner has loaded from the API. Lives as long as the app does.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    pub parties: Vec<Party>,
    pub selected_party: Option<Party>,
    pub rsvps: Vec<Rsvp>,
    pub guests: Vec<Guest>,
}

impl AppState {
    pub fn selected_party_id(&self) -> Option<PartyId> {
        self.selected_party.as_ref().map(|party| party.id)
    }

    pub fn is_selected(&self, party_id: PartyId) -> bool {
        self.selected_party_id() == Some(party_id)
    }

    /// Guests holding an rsvp for the selected party, in `guests` order.
    pub fn guests_at_selected_party(&self) -> Vec<&Guest> {
        let Some(party_id) = self.selected_party_id() else {
            return Vec::new();
        };

        let attending: HashSet<_> = self
            .rsvps
            .iter()
            .filter(|rsvp| rsvp.event_id == party_id)
            .map(|rsvp| rsvp.guest_id)
            .collect();

        let mut seen = HashSet::new();
        self.guests
            .iter()
            .filter(|guest| attending.contains(&guest.id) && seen.insert(guest.id))
            .collect()
    }
}
