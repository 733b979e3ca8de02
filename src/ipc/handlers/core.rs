use crate::ipc::error::{respond, HandlerErr};
use crate::ipc::helpers::{get_optional_str, get_required_str};
use crate::ipc::types::{AppState, Request};
use crate::session::{HttpCredentialVerifier, SessionGate};
use crate::store::SessionStore;
use serde_json::json;
use std::path::PathBuf;

fn handle_health(state: &mut AppState, _req: &Request) -> Result<serde_json::Value, HandlerErr> {
    Ok(json!({
        "version": env!("CARGO_PKG_VERSION"),
        "workspacePath": state.workspace.as_ref().map(|p| p.to_string_lossy().to_string()),
        "rosterCount": state.roster.len(),
        "authenticated": state.gate.is_authenticated(),
    }))
}

/// Selects the workspace directory holding the session store. Opening the
/// store also runs the best-effort restore of a persisted admin session, and
/// `verifyUrl` (when given) configures the credential-verification endpoint.
fn handle_workspace_select(
    state: &mut AppState,
    req: &Request,
) -> Result<serde_json::Value, HandlerErr> {
    let path = PathBuf::from(get_required_str(&req.params, "path")?);

    let store = SessionStore::open(&path)
        .map_err(|e| HandlerErr::new("db_open_failed", format!("{e:?}")))?;

    state.gate = SessionGate::restore(&store);
    state.workspace = Some(path.clone());
    state.store = Some(store);

    if let Some(url) = get_optional_str(&req.params, "verifyUrl") {
        state.verifier = Some(Box::new(HttpCredentialVerifier::new(url)));
    }

    Ok(json!({
        "workspacePath": path.to_string_lossy(),
        "admin": state.gate.current().map(|a| json!({ "id": a.id, "email": a.email })),
    }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let outcome = match req.method.as_str() {
        "health" => handle_health(state, req),
        "workspace.select" => handle_workspace_select(state, req),
        _ => return None,
    };
    Some(respond(&req.id, outcome))
}
