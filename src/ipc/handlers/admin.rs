use crate::ipc::error::{respond, HandlerErr};
use crate::ipc::helpers::get_required_str;
use crate::ipc::types::{AppState, Request};
use serde_json::json;

fn handle_login(state: &mut AppState, req: &Request) -> Result<serde_json::Value, HandlerErr> {
    let email = get_required_str(&req.params, "email")?;
    let password = get_required_str(&req.params, "password")?;

    let store = state
        .store
        .as_ref()
        .ok_or_else(|| HandlerErr::new("no_workspace", "select a workspace first"))?;
    let verifier = state.verifier.as_deref().ok_or_else(|| {
        HandlerErr::new(
            "no_verifier",
            "no credential verification endpoint configured",
        )
    })?;

    let identity = state
        .gate
        .login(store, verifier, &email, &password)
        .map_err(|e| HandlerErr::new("auth_failed", e.to_string()))?;

    log::info!("admin login: {}", identity.email);
    Ok(json!({ "admin": { "id": identity.id, "email": identity.email } }))
}

fn handle_logout(state: &mut AppState, _req: &Request) -> Result<serde_json::Value, HandlerErr> {
    let store = state
        .store
        .as_ref()
        .ok_or_else(|| HandlerErr::new("no_workspace", "select a workspace first"))?;
    // Logout while anonymous is a harmless no-op.
    state.gate.logout(store);
    Ok(json!({}))
}

fn handle_status(state: &mut AppState, _req: &Request) -> Result<serde_json::Value, HandlerErr> {
    Ok(json!({
        "admin": state.gate.current().map(|a| json!({ "id": a.id, "email": a.email })),
    }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let outcome = match req.method.as_str() {
        "admin.login" => handle_login(state, req),
        "admin.logout" => handle_logout(state, req),
        "admin.status" => handle_status(state, req),
        _ => return None,
    };
    Some(respond(&req.id, outcome))
}
