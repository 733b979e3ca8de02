use crate::csv::{parse_batch, ImportError};
use crate::ipc::error::{respond, HandlerErr};
use crate::ipc::helpers::{get_required_str, require_admin};
use crate::ipc::types::{AppState, PendingImport, Request};
use crate::roster::reconcile;
use serde_json::json;
use uuid::Uuid;

/// Parses uploaded CSV text into a preview batch. The batch is held in
/// daemon state until the admin confirms or cancels; nothing touches the
/// roster yet.
fn handle_preview(state: &mut AppState, req: &Request) -> Result<serde_json::Value, HandlerErr> {
    require_admin(state)?;
    let text = get_required_str(&req.params, "text")?;

    let records = parse_batch(&text)
        .map_err(|e| HandlerErr::new("csv_format", e.to_string()))?;
    if records.is_empty() {
        return Err(HandlerErr::new(
            "csv_empty",
            ImportError::NoValidRecords.to_string(),
        ));
    }

    let batch_id = Uuid::new_v4().to_string();
    let preview: Vec<serde_json::Value> = records
        .iter()
        .map(|r| serde_json::to_value(r).unwrap_or_default())
        .collect();
    state.pending_import = Some(PendingImport {
        batch_id: batch_id.clone(),
        records,
    });

    Ok(json!({
        "batchId": batch_id,
        "count": preview.len(),
        "records": preview,
    }))
}

/// Applies the held batch: records colliding with existing roll numbers are
/// reported and dropped, the rest are appended.
fn handle_confirm(state: &mut AppState, req: &Request) -> Result<serde_json::Value, HandlerErr> {
    require_admin(state)?;
    let batch_id = get_required_str(&req.params, "batchId")?;

    let Some(pending) = state.pending_import.take() else {
        return Err(HandlerErr::new(
            "no_pending_import",
            "no import batch awaiting confirmation",
        ));
    };
    if pending.batch_id != batch_id {
        // Put the batch back; a stale confirm must not discard a live one.
        let held = pending.batch_id.clone();
        state.pending_import = Some(pending);
        return Err(HandlerErr::with_details(
            "stale_batch",
            "batchId does not match the pending import",
            json!({ "pendingBatchId": held }),
        ));
    }

    let outcome = reconcile(state.roster.records(), pending.records);
    let imported = outcome.importable.len();
    let duplicates: Vec<String> = outcome
        .duplicates
        .iter()
        .map(|r| r.roll_number.clone())
        .collect();
    if !duplicates.is_empty() {
        log::info!(
            "import skipped {} duplicate roll number(s)",
            duplicates.len()
        );
    }
    state.roster.bulk_add(outcome.importable);

    Ok(json!({
        "imported": imported,
        "duplicates": duplicates,
        "rosterCount": state.roster.len(),
    }))
}

fn handle_cancel(state: &mut AppState, _req: &Request) -> Result<serde_json::Value, HandlerErr> {
    require_admin(state)?;
    let discarded = state.pending_import.take().is_some();
    Ok(json!({ "discarded": discarded }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let outcome = match req.method.as_str() {
        "import.preview" => handle_preview(state, req),
        "import.confirm" => handle_confirm(state, req),
        "import.cancel" => handle_cancel(state, req),
        _ => return None,
    };
    Some(respond(&req.id, outcome))
}
