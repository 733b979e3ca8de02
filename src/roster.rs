use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    pub roll_number: String,
    pub full_name: String,
    #[serde(default)]
    pub marks: i64,
    #[serde(default)]
    pub backlogs: i64,
    #[serde(default)]
    pub attendance: i64,
    #[serde(default)]
    pub semester: String,
    #[serde(default)]
    pub branch: String,
}

fn roll_key(roll: &str) -> String {
    roll.trim().to_ascii_lowercase()
}

/// The in-memory student roster. Roll numbers are the unique key, compared
/// case-insensitively. Records are never mutated in place; callers delete
/// and recreate.
#[derive(Debug, Default)]
pub struct Roster {
    records: Vec<StudentRecord>,
}

impl Roster {
    /// The demo roster the application ships with.
    pub fn seeded() -> Self {
        let records = vec![
            StudentRecord {
                roll_number: "CS2021001".into(),
                full_name: "Alice Johnson".into(),
                marks: 92,
                backlogs: 0,
                attendance: 95,
                semester: "6th".into(),
                branch: "Computer Science".into(),
            },
            StudentRecord {
                roll_number: "CS2021002".into(),
                full_name: "Bob Smith".into(),
                marks: 78,
                backlogs: 1,
                attendance: 82,
                semester: "6th".into(),
                branch: "Computer Science".into(),
            },
            StudentRecord {
                roll_number: "EE2021001".into(),
                full_name: "Carol Davis".into(),
                marks: 85,
                backlogs: 0,
                attendance: 90,
                semester: "6th".into(),
                branch: "Electrical Engineering".into(),
            },
            StudentRecord {
                roll_number: "ME2021001".into(),
                full_name: "David Wilson".into(),
                marks: 65,
                backlogs: 2,
                attendance: 75,
                semester: "6th".into(),
                branch: "Mechanical Engineering".into(),
            },
        ];
        Roster { records }
    }

    pub fn records(&self) -> &[StudentRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn search(&self, roll_number: &str) -> Option<&StudentRecord> {
        let key = roll_key(roll_number);
        self.records.iter().find(|r| roll_key(&r.roll_number) == key)
    }

    pub fn contains(&self, roll_number: &str) -> bool {
        self.search(roll_number).is_some()
    }

    pub fn add(&mut self, record: StudentRecord) {
        self.records.push(record);
    }

    /// Removes every record matching the roll number case-insensitively and
    /// returns how many were removed. No-op when absent.
    pub fn delete(&mut self, roll_number: &str) -> usize {
        let key = roll_key(roll_number);
        let before = self.records.len();
        self.records.retain(|r| roll_key(&r.roll_number) != key);
        before - self.records.len()
    }

    /// Appends a reconciled batch. Duplicate checking is the caller's job;
    /// batches must be pre-filtered through `reconcile`.
    pub fn bulk_add(&mut self, records: Vec<StudentRecord>) {
        self.records.extend(records);
    }
}

pub struct ReconcileOutcome {
    pub importable: Vec<StudentRecord>,
    pub duplicates: Vec<StudentRecord>,
}

/// Splits an incoming batch against the existing roster: records whose roll
/// number (case-insensitive) already exists land in `duplicates` and are
/// dropped by the import, never overwriting the roster. Rows duplicated
/// within the batch itself are not collapsed.
pub fn reconcile(existing: &[StudentRecord], incoming: Vec<StudentRecord>) -> ReconcileOutcome {
    let taken: HashSet<String> = existing.iter().map(|r| roll_key(&r.roll_number)).collect();

    let mut importable = Vec::new();
    let mut duplicates = Vec::new();
    for rec in incoming {
        if taken.contains(&roll_key(&rec.roll_number)) {
            duplicates.push(rec);
        } else {
            importable.push(rec);
        }
    }

    ReconcileOutcome {
        importable,
        duplicates,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PerformanceStatus {
    pub label: &'static str,
    pub severity: &'static str,
}

/// Tiered performance classification. Tiers are checked in fixed priority
/// order; the first match wins.
pub fn classify(marks: i64, backlogs: i64, attendance: i64) -> PerformanceStatus {
    if marks >= 85 && backlogs == 0 && attendance >= 90 {
        return PerformanceStatus {
            label: "Excellent",
            severity: "success",
        };
    }
    if marks >= 70 && backlogs <= 1 && attendance >= 80 {
        return PerformanceStatus {
            label: "Good",
            severity: "info",
        };
    }
    if marks >= 60 && backlogs <= 2 && attendance >= 70 {
        return PerformanceStatus {
            label: "Average",
            severity: "warning",
        };
    }
    PerformanceStatus {
        label: "Needs Improvement",
        severity: "critical",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(roll: &str, name: &str) -> StudentRecord {
        StudentRecord {
            roll_number: roll.to_string(),
            full_name: name.to_string(),
            marks: 0,
            backlogs: 0,
            attendance: 0,
            semester: String::new(),
            branch: String::new(),
        }
    }

    #[test]
    fn search_is_case_insensitive() {
        let roster = Roster::seeded();
        let hit = roster.search("cs2021001").expect("seeded roll number");
        assert_eq!(hit.full_name, "Alice Johnson");
        assert!(roster.search("CS9999999").is_none());
    }

    #[test]
    fn delete_removes_all_case_insensitive_matches() {
        let mut roster = Roster::default();
        roster.add(rec("CS2021001", "Alice"));
        roster.add(rec("cs2021001", "Alice Again"));
        roster.add(rec("EE2021001", "Carol"));

        assert_eq!(roster.delete("Cs2021001"), 2);
        assert_eq!(roster.len(), 1);
        assert_eq!(roster.delete("Cs2021001"), 0);
    }

    #[test]
    fn reconcile_partitions_against_existing_roster() {
        let existing = vec![rec("CS2021001", "Alice")];
        let incoming = vec![rec("cs2021001", "Alice Dup"), rec("CS2021099", "Zed")];

        let out = reconcile(&existing, incoming);
        assert_eq!(out.duplicates.len(), 1);
        assert_eq!(out.duplicates[0].roll_number, "cs2021001");
        assert_eq!(out.importable.len(), 1);
        assert_eq!(out.importable[0].roll_number, "CS2021099");
    }

    #[test]
    fn reconcile_keeps_batch_internal_duplicates() {
        let existing = vec![rec("CS2021001", "Alice")];
        let incoming = vec![rec("CS2021050", "Eve"), rec("cs2021050", "Eve Again")];

        let out = reconcile(&existing, incoming);
        assert!(out.duplicates.is_empty());
        assert_eq!(out.importable.len(), 2);
    }

    #[test]
    fn reconcile_covers_whole_batch() {
        let existing = vec![rec("A1", "a"), rec("B2", "b")];
        let incoming = vec![rec("a1", "x"), rec("C3", "y"), rec("b2", "z")];
        let total = incoming.len();

        let out = reconcile(&existing, incoming);
        assert_eq!(out.importable.len() + out.duplicates.len(), total);
    }

    #[test]
    fn classify_tier_order() {
        assert_eq!(classify(88, 0, 92).label, "Excellent");
        assert_eq!(classify(78, 1, 82).label, "Good");
        assert_eq!(classify(65, 2, 75).label, "Average");
        assert_eq!(classify(50, 4, 60).label, "Needs Improvement");
    }

    #[test]
    fn classify_boundaries() {
        // Exact thresholds land in the tier.
        assert_eq!(classify(85, 0, 90).label, "Excellent");
        assert_eq!(classify(70, 1, 80).label, "Good");
        assert_eq!(classify(60, 2, 70).label, "Average");
        // One backlog drops Excellent to Good even with top marks.
        assert_eq!(classify(95, 1, 95).label, "Good");
        // Attendance alone can push a strong student down the tiers.
        assert_eq!(classify(90, 0, 89).label, "Good");
        assert_eq!(classify(90, 0, 79).label, "Average");
        assert_eq!(classify(90, 0, 69).label, "Needs Improvement");
    }

    #[test]
    fn classify_severity_tracks_label() {
        assert_eq!(classify(88, 0, 92).severity, "success");
        assert_eq!(classify(78, 1, 82).severity, "info");
        assert_eq!(classify(65, 2, 75).severity, "warning");
        assert_eq!(classify(10, 9, 10).severity, "critical");
    }
}
