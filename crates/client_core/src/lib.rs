pub mod api;
pub mod config;
pub mod error;
pub mod form;
mod planner;
pub mod state;
pub mod view;

pub use api::{HttpPartyApi, PartyApi};
pub use config::ApiConfig;
pub use error::{ClientError, ErrorKind};
pub use form::{DraftError, NewPartyDraft};
pub use planner::{Operation, PartyPlanner, PlannerEvent};
pub use state::AppState;
pub use view::{Action, AppView};
