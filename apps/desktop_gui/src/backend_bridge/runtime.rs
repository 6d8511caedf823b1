//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::{ApiConfig, PartyPlanner, PlannerEvent};
use crossbeam_channel::{Receiver, Sender};
use tokio::sync::broadcast::error::RecvError;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorCategory, UiErrorContext, UiEvent};

/// Starts the backend worker thread. Each command runs as its own task, so a
/// slow request never holds back later clicks.
pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, config: ApiConfig) {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::new(
                    UiErrorCategory::Unknown,
                    UiErrorContext::BackendStartup,
                    format!("failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let planner = match PartyPlanner::from_config(&config) {
                Ok(planner) => planner,
                Err(err) => {
                    tracing::error!("backend: planner setup failed: {err}");
                    let _ = ui_tx.try_send(UiEvent::Error(UiError::from_client(
                        UiErrorContext::BackendStartup,
                        &err,
                    )));
                    return;
                }
            };

            let mut events = planner.subscribe_events();
            let ui_tx_events = ui_tx.clone();
            tokio::spawn(async move {
                loop {
                    let evt = match events.recv().await {
                        Ok(PlannerEvent::Rendered(view)) => UiEvent::Rendered(view),
                        Ok(PlannerEvent::OperationFailed {
                            operation,
                            kind,
                            message,
                        }) => UiEvent::Error(UiError::new(kind.into(), operation.into(), message)),
                        Err(RecvError::Lagged(skipped)) => {
                            tracing::warn!(skipped, "backend: ui lagged behind planner events");
                            continue;
                        }
                        Err(RecvError::Closed) => break,
                    };
                    let _ = ui_tx_events.try_send(evt);
                }
            });
            let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));

            while let Ok(cmd) = cmd_rx.recv() {
                tracing::info!(command = cmd.name(), "backend: command received");
                tokio::spawn(run_command(Arc::clone(&planner), cmd, ui_tx.clone()));
            }
        });
    });
}

async fn run_command(planner: Arc<PartyPlanner>, cmd: BackendCommand, ui_tx: Sender<UiEvent>) {
    match cmd {
        BackendCommand::Init => planner.init().await,
        BackendCommand::SelectParty { party_id } => planner.select_party(party_id).await,
        BackendCommand::RemoveParty { party_id } => planner.remove_party(party_id).await,
        BackendCommand::CreateParty { draft } => {
            if let Err(err) = planner.submit_new_party(draft).await {
                tracing::warn!("backend: new party form rejected: {err}");
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_draft(&err)));
            }
        }
    }
}
