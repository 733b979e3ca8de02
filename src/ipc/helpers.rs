use crate::ipc::error::HandlerErr;
use crate::ipc::types::AppState;
use crate::session::AdminIdentity;

pub fn get_required_str(params: &serde_json::Value, key: &str) -> Result<String, HandlerErr> {
    params
        .get(key)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| HandlerErr::new("bad_params", format!("missing {}", key)))
}

pub fn get_optional_str(params: &serde_json::Value, key: &str) -> Option<String> {
    params
        .get(key)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
}

/// Numeric form fields arrive as JSON numbers or as strings; anything that
/// fails to parse as an integer counts as 0.
pub fn get_int_or_zero(params: &serde_json::Value, key: &str) -> i64 {
    match params.get(key) {
        Some(v) => v
            .as_i64()
            .or_else(|| v.as_str().and_then(|s| s.trim().parse().ok()))
            .unwrap_or(0),
        None => 0,
    }
}

/// Single authorization gate for every mutating method. Refusing here means
/// no handler mutates anything before the session check has passed.
pub fn require_admin(state: &AppState) -> Result<&AdminIdentity, HandlerErr> {
    state.gate.current().ok_or_else(|| {
        HandlerErr::new(
            "not_authorized",
            "Access denied: admin login required for this action",
        )
    })
}
