//! Backend commands queued from UI to backend worker.

use client_core::NewPartyDraft;
use shared::domain::PartyId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    Init,
    SelectParty { party_id: PartyId },
    CreateParty { draft: NewPartyDraft },
    RemoveParty { party_id: PartyId },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Init => "init",
            BackendCommand::SelectParty { .. } => "select_party",
            BackendCommand::CreateParty { .. } => "create_party",
            BackendCommand::RemoveParty { .. } => "remove_party",
        }
    }
}
