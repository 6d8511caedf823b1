use std::sync::Arc;

use shared::{domain::PartyId, protocol::NewParty};
use tokio::sync::{broadcast, Mutex};
use tracing::{error, info, warn};

use crate::{
    api::{HttpPartyApi, PartyApi},
    config::ApiConfig,
    error::{ClientError, ErrorKind},
    form::{DraftError, NewPartyDraft},
    state::AppState,
    view::{self, AppView},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ListParties,
    GetParty,
    ListRsvps,
    ListGuests,
    CreateParty,
    RemoveParty,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ListParties => "list_parties",
            Self::GetParty => "get_party",
            Self::ListRsvps => "list_rsvps",
            Self::ListGuests => "list_guests",
            Self::CreateParty => "create_party",
            Self::RemoveParty => "remove_party",
        }
    }
}

#[derive(Debug, Clone)]
pub enum PlannerEvent {
    Rendered(AppView),
    OperationFailed {
        operation: Operation,
        kind: ErrorKind,
        message: String,
    },
}

/// Handlers for every user action. Each one talks to the API, updates the
/// state and renders; failed loads are logged and leave the state alone.
///
/// The state lock is never held across a request, so responses are applied
/// in the order they arrive rather than the order they were asked for.
pub struct PartyPlanner {
    api: Arc<dyn PartyApi>,
    state: Mutex<AppState>,
    events: broadcast::Sender<PlannerEvent>,
}

impl PartyPlanner {
    pub fn new(api: Arc<dyn PartyApi>) -> Arc<Self> {
        let (events, _) = broadcast::channel(256);
        Arc::new(Self {
            api,
            state: Mutex::new(AppState::default()),
            events,
        })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Arc<Self>, ClientError> {
        let api = HttpPartyApi::new(config)?;
        info!(api_root = api.api_root(), "planner: using events api");
        Ok(Self::new(Arc::new(api)))
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<PlannerEvent> {
        self.events.subscribe()
    }

    pub async fn snapshot(&self) -> AppState {
        self.state.lock().await.clone()
    }

    /// Rebuilds the whole view from the current state and publishes it.
    ///
    /// Publishing happens under the state lock, so views go out in the order
    /// they were built and the last one always matches the latest state.
    pub async fn render(&self) -> AppView {
        let state = self.state.lock().await;
        let view = view::render(&state);
        let _ = self.events.send(PlannerEvent::Rendered(view.clone()));
        view
    }

    /// Loads parties, rsvps and guests one after another, then renders once.
    pub async fn init(&self) {
        self.load_parties().await;
        self.load_rsvps().await;
        self.load_guests().await;
        self.render().await;
    }

    pub async fn load_parties(&self) {
        match self.api.list_parties().await {
            Ok(parties) => {
                info!(count = parties.len(), "planner: parties loaded");
                self.state.lock().await.parties = parties;
                self.render().await;
            }
            Err(err) => self.report_failure(Operation::ListParties, &err),
        }
    }

    pub async fn select_party(&self, party_id: PartyId) {
        match self.api.get_party(party_id).await {
            Ok(party) => {
                info!(party_id = party.id.0, "planner: party selected");
                self.state.lock().await.selected_party = Some(party);
                self.render().await;
            }
            Err(err) => self.report_failure(Operation::GetParty, &err),
        }
    }

    pub async fn load_rsvps(&self) {
        match self.api.list_rsvps().await {
            Ok(rsvps) => {
                info!(count = rsvps.len(), "planner: rsvps loaded");
                self.state.lock().await.rsvps = rsvps;
                self.render().await;
            }
            Err(err) => self.report_failure(Operation::ListRsvps, &err),
        }
    }

    pub async fn load_guests(&self) {
        match self.api.list_guests().await {
            Ok(guests) => {
                info!(count = guests.len(), "planner: guests loaded");
                self.state.lock().await.guests = guests;
                self.render().await;
            }
            Err(err) => self.report_failure(Operation::ListGuests, &err),
        }
    }

    /// Posts the party, then reloads the list whatever the outcome.
    pub async fn create_party(&self, party: NewParty) {
        match self.api.create_party(&party).await {
            Ok(()) => info!(name = %party.name, "planner: party created"),
            Err(err) => self.report_failure(Operation::CreateParty, &err),
        }
        self.load_parties().await;
    }

    /// Validates the form values before handing them to [`Self::create_party`].
    pub async fn submit_new_party(&self, draft: NewPartyDraft) -> Result<(), DraftError> {
        let party = draft.into_new_party()?;
        self.create_party(party).await;
        Ok(())
    }

    /// Deletes the party, drops the selection and reloads the list. A failed
    /// delete is only logged.
    pub async fn remove_party(&self, party_id: PartyId) {
        if let Err(err) = self.api.delete_party(party_id).await {
            warn!(party_id = party_id.0, "planner: remove_party failed: {err}");
        }
        self.state.lock().await.selected_party = None;
        self.load_parties().await;
    }

    fn report_failure(&self, operation: Operation, err: &ClientError) {
        error!(operation = operation.as_str(), "planner: {err}");
        let _ = self.events.send(PlannerEvent::OperationFailed {
            operation,
            kind: err.kind(),
            message: err.to_string(),
        });
    }
}

#[cfg(test)]
#[path = "tests/planner_tests.rs"]
mod tests;
