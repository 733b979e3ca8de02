use std::path::PathBuf;

use crate::roster::{Roster, StudentRecord};
use crate::session::{CredentialVerifier, SessionGate};
use crate::store::SessionStore;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

/// A parsed upload waiting for the admin to confirm or cancel. Confirm must
/// quote the batch id so a stale confirmation can't apply a different file.
pub struct PendingImport {
    pub batch_id: String,
    pub records: Vec<StudentRecord>,
}

pub struct AppState {
    pub workspace: Option<PathBuf>,
    pub store: Option<SessionStore>,
    pub roster: Roster,
    pub gate: SessionGate,
    pub verifier: Option<Box<dyn CredentialVerifier>>,
    pub pending_import: Option<PendingImport>,
}

impl AppState {
    pub fn new() -> Self {
        AppState {
            workspace: None,
            store: None,
            roster: Roster::seeded(),
            gate: SessionGate::default(),
            verifier: None,
            pending_import: None,
        }
    }
}
