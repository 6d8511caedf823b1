use super::*;
use async_trait::async_trait;
use reqwest::StatusCode;
use shared::{
    domain::GuestId,
    protocol::{Guest, Party, Rsvp},
};
use std::{
    collections::HashMap,
    sync::atomic::{AtomicBool, Ordering},
};
use tokio::sync::oneshot;

use crate::view::SelectedPartyView;

#[derive(Default)]
struct FakeApi {
    parties: Mutex<Vec<Party>>,
    rsvps: Vec<Rsvp>,
    guests: Vec<Guest>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    failing: Mutex<Vec<&'static str>>,
    created: Mutex<Vec<NewParty>>,
    calls: Mutex<Vec<&'static str>>,
    gates: Mutex<HashMap<PartyId, oneshot::Receiver<()>>>,
}

impl FakeApi {
    fn with_parties(parties: Vec<Party>) -> Self {
        Self {
            parties: Mutex::new(parties),
            rsvps: vec![rsvp(10, 42), rsvp(20, 7)],
            guests: vec![guest(10, "Ada"), guest(20, "Grace")],
            ..Self::default()
        }
    }

    async fn record(&self, call: &'static str) -> Result<(), ClientError> {
        self.calls.lock().await.push(call);
        if self.fail_reads.load(Ordering::SeqCst) || self.failing.lock().await.contains(&call) {
            return Err(server_error(call));
        }
        Ok(())
    }

    async fn record_write(&self, call: &'static str) -> Result<(), ClientError> {
        self.calls.lock().await.push(call);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(server_error(call));
        }
        Ok(())
    }
}

fn server_error(call: &str) -> ClientError {
    ClientError::Status {
        url: format!("http://fake/{call}"),
        status: StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[async_trait]
impl PartyApi for FakeApi {
    async fn list_parties(&self) -> Result<Vec<Party>, ClientError> {
        self.record("list_parties").await?;
        Ok(self.parties.lock().await.clone())
    }

    async fn get_party(&self, party_id: PartyId) -> Result<Party, ClientError> {
        let gate = self.gates.lock().await.remove(&party_id);
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        self.record("get_party").await?;
        self.parties
            .lock()
            .await
            .iter()
            .find(|party| party.id == party_id)
            .cloned()
            .ok_or_else(|| ClientError::Status {
                url: format!("http://fake/events/{party_id}"),
                status: StatusCode::NOT_FOUND,
            })
    }

    async fn list_rsvps(&self) -> Result<Vec<Rsvp>, ClientError> {
        self.record("list_rsvps").await?;
        Ok(self.rsvps.clone())
    }

    async fn list_guests(&self) -> Result<Vec<Guest>, ClientError> {
        self.record("list_guests").await?;
        Ok(self.guests.clone())
    }

    async fn create_party(&self, party: &NewParty) -> Result<(), ClientError> {
        self.record_write("create_party").await?;
        self.created.lock().await.push(party.clone());
        let mut parties = self.parties.lock().await;
        let next_id = parties.iter().map(|p| p.id.0).max().unwrap_or(0) + 1;
        parties.push(Party {
            id: PartyId(next_id),
            name: party.name.clone(),
            description: party.description.clone(),
            date: party.date.to_rfc3339(),
            location: party.location.clone(),
        });
        Ok(())
    }

    async fn delete_party(&self, party_id: PartyId) -> Result<(), ClientError> {
        self.record_write("delete_party").await?;
        self.parties
            .lock()
            .await
            .retain(|party| party.id != party_id);
        Ok(())
    }
}

fn party(id: i64, name: &str) -> Party {
    Party {
        id: PartyId(id),
        name: name.to_string(),
        description: format!("{name} description"),
        date: "2025-06-01T18:30:00.000Z".to_string(),
        location: "Hall".to_string(),
    }
}

fn guest(id: i64, name: &str) -> Guest {
    Guest {
        id: GuestId(id),
        name: name.to_string(),
        email: None,
        phone: None,
        bio: None,
        job: None,
    }
}

fn rsvp(guest_id: i64, event_id: i64) -> Rsvp {
    Rsvp {
        id: None,
        guest_id: GuestId(guest_id),
        event_id: PartyId(event_id),
    }
}

fn gala_draft() -> NewPartyDraft {
    NewPartyDraft {
        name: "Gala".to_string(),
        description: "Fundraiser".to_string(),
        date: "2025-06-01".to_string(),
        location: "Hall".to_string(),
    }
}

fn drain(rx: &mut broadcast::Receiver<PlannerEvent>) -> Vec<PlannerEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

fn rendered_views(events: &[PlannerEvent]) -> Vec<&AppView> {
    events
        .iter()
        .filter_map(|event| match event {
            PlannerEvent::Rendered(view) => Some(view),
            PlannerEvent::OperationFailed { .. } => None,
        })
        .collect()
}

#[tokio::test]
async fn init_loads_lists_sequentially_then_renders() {
    let api = Arc::new(FakeApi::with_parties(vec![party(42, "Gala"), party(7, "Picnic")]));
    let planner = PartyPlanner::new(api.clone());
    let mut rx = planner.subscribe_events();

    planner.init().await;

    assert_eq!(
        *api.calls.lock().await,
        vec!["list_parties", "list_rsvps", "list_guests"]
    );
    let state = planner.snapshot().await;
    assert_eq!(state.parties.len(), 2);
    assert_eq!(state.rsvps.len(), 2);
    assert_eq!(state.guests.len(), 2);
    assert!(state.selected_party.is_none());

    let events = drain(&mut rx);
    let views = rendered_views(&events);
    assert_eq!(views.len(), 4, "one render per load plus the final one");
    assert_eq!(*views[3], view::render(&state));
}

#[tokio::test]
async fn init_keeps_other_lists_and_still_renders_when_one_load_fails() {
    let api = Arc::new(FakeApi::with_parties(vec![party(42, "Gala"), party(7, "Picnic")]));
    api.failing.lock().await.push("list_rsvps");
    let planner = PartyPlanner::new(api.clone());
    let mut rx = planner.subscribe_events();

    planner.init().await;

    assert_eq!(
        *api.calls.lock().await,
        vec!["list_parties", "list_rsvps", "list_guests"]
    );
    let state = planner.snapshot().await;
    assert_eq!(state.parties.len(), 2);
    assert!(state.rsvps.is_empty());
    assert_eq!(state.guests.len(), 2);

    let events = drain(&mut rx);
    let failed: Vec<_> = events
        .iter()
        .filter_map(|event| match event {
            PlannerEvent::OperationFailed {
                operation, kind, ..
            } => Some((*operation, *kind)),
            PlannerEvent::Rendered(_) => None,
        })
        .collect();
    assert_eq!(failed, [(Operation::ListRsvps, ErrorKind::Server)]);
    let views = rendered_views(&events);
    assert_eq!(views.len(), 3, "parties, guests and the final render");
    assert_eq!(**views.last().expect("final render"), view::render(&state));
}

#[tokio::test]
async fn failed_load_keeps_state_and_skips_render() {
    let api = Arc::new(FakeApi::with_parties(vec![party(42, "Gala")]));
    let planner = PartyPlanner::new(api.clone());
    planner.init().await;
    let before = planner.snapshot().await;
    let mut rx = planner.subscribe_events();

    api.parties.lock().await.clear();
    api.fail_reads.store(true, Ordering::SeqCst);
    planner.load_parties().await;
    planner.select_party(PartyId(42)).await;

    assert_eq!(planner.snapshot().await, before);
    let events = drain(&mut rx);
    assert!(rendered_views(&events).is_empty());
    let failed: Vec<_> = events
        .iter()
        .filter_map(|event| match event {
            PlannerEvent::OperationFailed { operation, .. } => Some(*operation),
            PlannerEvent::Rendered(_) => None,
        })
        .collect();
    assert_eq!(failed, [Operation::ListParties, Operation::GetParty]);
}

#[tokio::test]
async fn selecting_a_party_renders_its_details_and_guests() {
    let api = Arc::new(FakeApi::with_parties(vec![party(42, "Gala"), party(7, "Picnic")]));
    let planner = PartyPlanner::new(api);
    planner.init().await;

    planner.select_party(PartyId(42)).await;
    let view = planner.render().await;

    assert!(view.party_list.items[0].selected);
    assert!(!view.party_list.items[1].selected);
    let SelectedPartyView::Details(details) = view.selected_party else {
        panic!("expected details");
    };
    assert_eq!(details.heading, "Gala #42");
    let guests: Vec<_> = details.guests.entries.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(guests, ["Ada"]);
}

#[tokio::test]
async fn submitting_form_posts_full_timestamp_then_reloads_parties() {
    let api = Arc::new(FakeApi::with_parties(Vec::new()));
    let planner = PartyPlanner::new(api.clone());

    planner
        .submit_new_party(gala_draft())
        .await
        .expect("valid draft");

    let created = api.created.lock().await;
    let body = serde_json::to_value(&created[0]).expect("serialize");
    assert_eq!(body["date"], "2025-06-01T00:00:00.000Z");
    assert_eq!(body["name"], "Gala");
    assert_eq!(*api.calls.lock().await, vec!["create_party", "list_parties"]);
    let state = planner.snapshot().await;
    assert_eq!(state.parties.len(), 1);
    assert_eq!(state.parties[0].name, "Gala");
}

#[tokio::test]
async fn invalid_draft_never_reaches_the_api() {
    let api = Arc::new(FakeApi::with_parties(Vec::new()));
    let planner = PartyPlanner::new(api.clone());
    let mut draft = gala_draft();
    draft.name.clear();

    let err = planner.submit_new_party(draft).await.expect_err("must fail");

    assert_eq!(err, DraftError::MissingField("name"));
    assert!(api.calls.lock().await.is_empty());
}

#[tokio::test]
async fn failed_create_still_reloads_parties() {
    let api = Arc::new(FakeApi::with_parties(vec![party(7, "Picnic")]));
    api.fail_writes.store(true, Ordering::SeqCst);
    let planner = PartyPlanner::new(api.clone());
    let mut rx = planner.subscribe_events();

    planner
        .submit_new_party(gala_draft())
        .await
        .expect("valid draft");

    assert_eq!(*api.calls.lock().await, vec!["create_party", "list_parties"]);
    let events = drain(&mut rx);
    assert!(matches!(
        events[0],
        PlannerEvent::OperationFailed {
            operation: Operation::CreateParty,
            ..
        }
    ));
    assert_eq!(rendered_views(&events).len(), 1);
}

#[tokio::test]
async fn removing_selected_party_clears_selection_and_reloads() {
    let api = Arc::new(FakeApi::with_parties(vec![party(42, "Gala"), party(7, "Picnic")]));
    let planner = PartyPlanner::new(api.clone());
    planner.init().await;
    planner.select_party(PartyId(42)).await;
    assert_eq!(planner.snapshot().await.selected_party_id(), Some(PartyId(42)));

    planner.remove_party(PartyId(42)).await;

    let state = planner.snapshot().await;
    assert!(state.selected_party.is_none());
    assert!(state.parties.iter().all(|party| party.id != PartyId(42)));
    assert_eq!(
        view::selected_party(&state),
        SelectedPartyView::Prompt(view::SELECT_PROMPT.to_string())
    );
}

#[tokio::test]
async fn failed_delete_is_not_reported_but_selection_is_cleared() {
    let api = Arc::new(FakeApi::with_parties(vec![party(42, "Gala")]));
    let planner = PartyPlanner::new(api.clone());
    planner.init().await;
    planner.select_party(PartyId(42)).await;
    api.fail_writes.store(true, Ordering::SeqCst);
    let mut rx = planner.subscribe_events();

    planner.remove_party(PartyId(42)).await;

    let state = planner.snapshot().await;
    assert!(state.selected_party.is_none());
    assert_eq!(state.parties.len(), 1, "server kept the party");
    let events = drain(&mut rx);
    assert!(events
        .iter()
        .all(|event| matches!(event, PlannerEvent::Rendered(_))));
}

/// Detail requests are not cancelled: a slow response for an earlier click
/// lands after a newer one and wins. This is the expected behavior.
#[tokio::test]
async fn stale_selection_response_overwrites_newer_click() {
    let api = Arc::new(FakeApi::with_parties(vec![party(1, "A"), party(2, "B")]));
    let (release_a, gate_a) = oneshot::channel();
    let (release_b, gate_b) = oneshot::channel();
    {
        let mut gates = api.gates.lock().await;
        gates.insert(PartyId(1), gate_a);
        gates.insert(PartyId(2), gate_b);
    }
    let planner = PartyPlanner::new(api.clone());

    let click_a = tokio::spawn({
        let planner = Arc::clone(&planner);
        async move { planner.select_party(PartyId(1)).await }
    });
    let click_b = tokio::spawn({
        let planner = Arc::clone(&planner);
        async move { planner.select_party(PartyId(2)).await }
    });

    release_b.send(()).expect("release b");
    click_b.await.expect("click b");
    assert_eq!(planner.snapshot().await.selected_party_id(), Some(PartyId(2)));

    release_a.send(()).expect("release a");
    click_a.await.expect("click a");
    assert_eq!(planner.snapshot().await.selected_party_id(), Some(PartyId(1)));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn last_published_view_matches_final_state_under_concurrent_clicks() {
    let parties: Vec<_> = (1..=16).map(|id| party(id, &format!("P{id}"))).collect();
    let api = Arc::new(FakeApi::with_parties(parties));
    let planner = PartyPlanner::new(api);

    for _ in 0..50 {
        let mut rx = planner.subscribe_events();
        let clicks: Vec<_> = (1..=16)
            .map(|id| {
                let planner = Arc::clone(&planner);
                tokio::spawn(async move { planner.select_party(PartyId(id)).await })
            })
            .collect();
        for click in clicks {
            click.await.expect("click");
        }

        let events = drain(&mut rx);
        let views = rendered_views(&events);
        assert_eq!(views.len(), 16);
        let state = planner.snapshot().await;
        assert_eq!(**views.last().expect("last render"), view::render(&state));
    }
}
