//! Backend commands queued from UI to backend worker.

use client_core::ApiRequest;

#[derive(Debug)]
pub enum BackendCommand {
    Execute(ApiRequest),
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Execute(request) => request.name(),
        }
    }
}
