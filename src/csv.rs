use crate::roster::StudentRecord;
use thiserror::Error;

/// Logical columns every upload must carry, in canonical (normalized) form.
/// Header cells are matched after lower-casing and stripping all whitespace,
/// so `Roll Number`, `rollnumber` and `ROLLNUMBER` all satisfy `rollnumber`.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "rollnumber",
    "fullname",
    "marks",
    "backlogs",
    "attendance",
    "semester",
    "branch",
];

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("CSV file must contain at least a header row and one data row")]
    TooFewLines,
    #[error("Missing required columns: {0}")]
    MissingColumns(String),
    #[error("No valid student records found in the CSV file")]
    NoValidRecords,
}

fn normalize_header(cell: &str) -> String {
    cell.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}

fn column_index(headers: &[String], name: &str) -> Option<usize> {
    headers.iter().position(|h| h == name)
}

fn cell<'a>(row: &'a [&str], idx: Option<usize>) -> &'a str {
    idx.and_then(|i| row.get(i).copied()).unwrap_or("")
}

fn int_cell(row: &[&str], idx: Option<usize>) -> i64 {
    cell(row, idx).parse::<i64>().unwrap_or(0)
}

/// Parses uploaded CSV text into student records.
///
/// The first non-blank line is the header; the seven required columns may
/// appear in any order. Fields are comma-separated with no quoting support,
/// so a comma inside a field reads as a separator. Rows that are too short
/// or lack a roll number / full name are skipped with a warning; numeric
/// cells that fail to parse default to 0. An upload in which no row survives
/// yields an empty vec, not an error — callers decide what emptiness means.
pub fn parse_batch(text: &str) -> Result<Vec<StudentRecord>, ImportError> {
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    if lines.len() < 2 {
        return Err(ImportError::TooFewLines);
    }

    let headers: Vec<String> = lines[0].split(',').map(normalize_header).collect();

    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .filter(|name| !headers.iter().any(|h| h == *name))
        .copied()
        .collect();
    if !missing.is_empty() {
        return Err(ImportError::MissingColumns(missing.join(", ")));
    }

    let roll_idx = column_index(&headers, "rollnumber");
    let name_idx = column_index(&headers, "fullname");
    let marks_idx = column_index(&headers, "marks");
    let backlogs_idx = column_index(&headers, "backlogs");
    let attendance_idx = column_index(&headers, "attendance");
    let semester_idx = column_index(&headers, "semester");
    let branch_idx = column_index(&headers, "branch");

    let mut records = Vec::new();
    for (line_no, line) in lines.iter().enumerate().skip(1) {
        let row: Vec<&str> = line.split(',').map(str::trim).collect();

        if row.len() < headers.len() {
            log::warn!(
                "row {} has fewer columns than the header, skipping",
                line_no + 1
            );
            continue;
        }

        let roll_number = cell(&row, roll_idx).to_string();
        let full_name = cell(&row, name_idx).to_string();
        if roll_number.is_empty() || full_name.is_empty() {
            log::warn!(
                "row {} missing roll number or full name, skipping",
                line_no + 1
            );
            continue;
        }

        records.push(StudentRecord {
            roll_number,
            full_name,
            marks: int_cell(&row, marks_idx),
            backlogs: int_cell(&row, backlogs_idx),
            attendance: int_cell(&row, attendance_idx),
            semester: cell(&row, semester_idx).to_string(),
            branch: cell(&row, branch_idx).to_string(),
        });
    }

    Ok(records)
}
