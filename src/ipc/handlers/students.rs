use crate::ipc::error::{respond, HandlerErr};
use crate::ipc::helpers::{get_int_or_zero, get_optional_str, get_required_str, require_admin};
use crate::ipc::types::{AppState, Request};
use crate::roster::{classify, StudentRecord};
use serde_json::json;

fn record_json(record: &StudentRecord) -> serde_json::Value {
    let performance = classify(record.marks, record.backlogs, record.attendance);
    json!({
        "rollNumber": record.roll_number,
        "fullName": record.full_name,
        "marks": record.marks,
        "backlogs": record.backlogs,
        "attendance": record.attendance,
        "semester": record.semester,
        "branch": record.branch,
        "performance": {
            "label": performance.label,
            "severity": performance.severity,
        },
    })
}

fn handle_search(state: &mut AppState, req: &Request) -> Result<serde_json::Value, HandlerErr> {
    let roll_number = get_required_str(&req.params, "rollNumber")?;
    Ok(json!({
        "student": state.roster.search(&roll_number).map(record_json),
    }))
}

fn handle_list(state: &mut AppState, _req: &Request) -> Result<serde_json::Value, HandlerErr> {
    let students: Vec<serde_json::Value> = state.roster.records().iter().map(record_json).collect();
    Ok(json!({
        "count": students.len(),
        "students": students,
    }))
}

fn handle_create(state: &mut AppState, req: &Request) -> Result<serde_json::Value, HandlerErr> {
    require_admin(state)?;

    let roll_number = get_optional_str(&req.params, "rollNumber")
        .map(|s| s.trim().to_string())
        .unwrap_or_default();
    let full_name = get_optional_str(&req.params, "fullName")
        .map(|s| s.trim().to_string())
        .unwrap_or_default();
    if roll_number.is_empty() || full_name.is_empty() {
        return Err(HandlerErr::new(
            "bad_params",
            "rollNumber and fullName are required",
        ));
    }

    if state.roster.contains(&roll_number) {
        return Err(HandlerErr::with_details(
            "duplicate_roll_number",
            format!("a student with roll number {} already exists", roll_number),
            json!({ "rollNumber": roll_number }),
        ));
    }

    let record = StudentRecord {
        roll_number,
        full_name,
        marks: get_int_or_zero(&req.params, "marks"),
        backlogs: get_int_or_zero(&req.params, "backlogs"),
        attendance: get_int_or_zero(&req.params, "attendance"),
        semester: get_optional_str(&req.params, "semester").unwrap_or_default(),
        branch: get_optional_str(&req.params, "branch").unwrap_or_default(),
    };
    let student = record_json(&record);
    state.roster.add(record);

    Ok(json!({
        "student": student,
        "rosterCount": state.roster.len(),
    }))
}

fn handle_delete(state: &mut AppState, req: &Request) -> Result<serde_json::Value, HandlerErr> {
    require_admin(state)?;
    let roll_number = get_required_str(&req.params, "rollNumber")?;

    let removed = state.roster.delete(&roll_number);
    Ok(json!({
        "removed": removed,
        "rosterCount": state.roster.len(),
    }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let outcome = match req.method.as_str() {
        "students.search" => handle_search(state, req),
        "students.list" => handle_list(state, req),
        "students.create" => handle_create(state, req),
        "students.delete" => handle_delete(state, req),
        _ => return None,
    };
    Some(respond(&req.id, outcome))
}
