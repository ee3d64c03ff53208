//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::{execute, HttpUserApi};
use crossbeam_channel::{Receiver, Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

/// Spawns the worker thread. Each command runs as its own task, so requests
/// overlap and complete in whatever order the server answers.
pub fn launch(api_url: String, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::WorkerFailed(format!(
                    "backend worker startup failure: failed to build runtime: {err}"
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        let api = Arc::new(HttpUserApi::new(api_url));
        let _ = ui_tx.try_send(UiEvent::Info(format!("Using API at {}", api.base_url())));

        while let Ok(cmd) = cmd_rx.recv() {
            let cmd_name = cmd.name();
            let BackendCommand::Execute(request) = cmd;
            let api = Arc::clone(&api);
            let ui_tx = ui_tx.clone();
            runtime.spawn(async move {
                let completion = execute(api.as_ref(), request).await;
                match ui_tx.try_send(UiEvent::Completed(completion)) {
                    Ok(()) => tracing::debug!(command = cmd_name, "request completed"),
                    Err(TrySendError::Full(_)) => {
                        tracing::warn!(command = cmd_name, "ui event queue is full; dropping completion")
                    }
                    Err(TrySendError::Disconnected(_)) => {
                        tracing::debug!(command = cmd_name, "ui closed before completion arrived")
                    }
                }
            });
        }

        tracing::debug!("ui command queue closed; backend worker exiting");
    });
}
