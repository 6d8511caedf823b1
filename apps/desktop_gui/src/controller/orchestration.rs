//! Command orchestration helpers from UI actions to backend command queue.

use client_core::{Action, NewPartyDraft};
use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

/// The command a clicked view element asks for. Submitting takes the current form values.
pub fn command_for_action(action: Action, draft: &NewPartyDraft) -> BackendCommand {
    match action {
        Action::SelectParty(party_id) => BackendCommand::SelectParty { party_id },
        Action::RemoveParty(party_id) => BackendCommand::RemoveParty { party_id },
        Action::SubmitNewParty => BackendCommand::CreateParty {
            draft: draft.clone(),
        },
    }
}

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) {
    let cmd_name = cmd.name();

    match cmd_tx.try_send(cmd) {
        Ok(()) => tracing::debug!(command = cmd_name, "queued ui->backend command"),
        Err(TrySendError::Full(_)) => {
            *status = "UI command queue is full; please retry".to_string();
        }
        Err(TrySendError::Disconnected(_)) => {
            *status =
                "Backend command processor disconnected (possible startup/runtime failure); restart the app"
                    .to_string();
        }
    }
}
