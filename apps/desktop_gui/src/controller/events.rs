//! Events flowing from the backend worker to the UI thread.

use client_core::ApiCompletion;

#[derive(Debug)]
pub enum UiEvent {
    Info(String),
    Completed(ApiCompletion),
    WorkerFailed(String),
}
