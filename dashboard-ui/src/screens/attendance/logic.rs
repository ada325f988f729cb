//! Sheet merging, edit accumulation, and flush payload assembly.
//!
//! Edits are keyed by player id, so however many times one row is
//! touched inside the idle window, the flush carries a single mark with
//! the row's final status and note. The queue remembers which sheet its
//! marks were made on; a flush posts to that sheet, not to whatever the
//! selectors point at by the time it runs.

use shared_types::{empty_to_none, AttendanceRecord, AttendanceStatus, Player};

use crate::api::attendance::AttendanceMark;

use super::types::{PendingFlush, SheetKey, SheetRow};

/// Merge the course roster with whatever records exist for the day.
/// Roster order is preserved; players without a record start unmarked.
pub fn build_rows(roster: Vec<Player>, records: &[AttendanceRecord]) -> Vec<SheetRow> {
    roster
        .into_iter()
        .map(|player| {
            let record = records.iter().find(|r| r.player_id == player.id);
            SheetRow {
                record_id: record.map(|r| r.id.clone()),
                status: record.map(|r| r.status).unwrap_or(AttendanceStatus::Absent),
                note: record.and_then(|r| r.note.clone()).unwrap_or_default(),
                marked: record.is_some(),
                player,
            }
        })
        .collect()
}

/// Apply a status edit and queue the row for the next flush.
pub fn set_status(
    rows: &mut [SheetRow],
    pending: &mut PendingFlush,
    sheet: &SheetKey,
    player_id: &str,
    status: AttendanceStatus,
) -> bool {
    let Some(row) = rows.iter_mut().find(|r| r.player.id == player_id) else {
        return false;
    };
    row.status = status;
    row.marked = true;
    queue_mark(pending, sheet, row);
    true
}

/// Apply a note edit and queue the row for the next flush.
pub fn set_note(
    rows: &mut [SheetRow],
    pending: &mut PendingFlush,
    sheet: &SheetKey,
    player_id: &str,
    note: String,
) -> bool {
    let Some(row) = rows.iter_mut().find(|r| r.player.id == player_id) else {
        return false;
    };
    row.note = note;
    row.marked = true;
    queue_mark(pending, sheet, row);
    true
}

fn queue_mark(pending: &mut PendingFlush, sheet: &SheetKey, row: &SheetRow) {
    if pending.sheet.is_none() {
        pending.sheet = Some(sheet.clone());
    }
    pending.marks.insert(
        row.player.id.clone(),
        AttendanceMark {
            player_id: row.player.id.clone(),
            status: row.status,
            note: empty_to_none(&row.note),
        },
    );
}

/// Drain the accumulated edits into a flush payload, together with the
/// sheet they belong to.
pub fn take_flush(pending: &mut PendingFlush) -> (Option<SheetKey>, Vec<AttendanceMark>) {
    let drained = std::mem::take(pending);
    (drained.sheet, drained.marks.into_values().collect())
}

/// Copies of the rows a flush is about to touch, for rollback.
pub fn snapshot_rows(rows: &[SheetRow], marks: &[AttendanceMark]) -> Vec<SheetRow> {
    rows.iter()
        .filter(|row| marks.iter().any(|m| m.player_id == row.player.id))
        .cloned()
        .collect()
}

/// Put the pre-flush copies back after a failed flush.
pub fn restore_rows(rows: &mut [SheetRow], snapshot: Vec<SheetRow>) {
    for saved in snapshot {
        if let Some(row) = rows.iter_mut().find(|r| r.player.id == saved.player.id) {
            *row = saved;
        }
    }
}

/// Fold the persisted records from a successful flush back into the
/// sheet, so new rows pick up their server-assigned record ids.
pub fn apply_saved_records(rows: &mut [SheetRow], records: &[AttendanceRecord]) {
    for record in records {
        if let Some(row) = rows.iter_mut().find(|r| r.player.id == record.player_id) {
            row.record_id = Some(record.id.clone());
            row.status = record.status;
            row.note = record.note.clone().unwrap_or_default();
            row.marked = true;
        }
    }
}

pub fn present_count(rows: &[SheetRow]) -> usize {
    rows.iter()
        .filter(|r| r.marked && r.status == AttendanceStatus::Present)
        .count()
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};

    use super::*;

    fn player(id: &str, name: &str) -> Player {
        Player {
            id: id.to_string(),
            academy_id: "a1".to_string(),
            program_id: Some("p1".to_string()),
            name: name.to_string(),
            name_ar: String::new(),
            guardian_phone: None,
            birth_date: None,
            archived: false,
            created_at: Utc::now(),
        }
    }

    fn record(id: &str, player_id: &str, status: AttendanceStatus) -> AttendanceRecord {
        AttendanceRecord {
            id: id.to_string(),
            course_id: "c1".to_string(),
            player_id: player_id.to_string(),
            date: NaiveDate::from_ymd_opt(2025, 3, 10).expect("valid date"),
            status,
            note: None,
        }
    }

    fn sheet() -> Vec<SheetRow> {
        build_rows(
            vec![player("p1", "Omar"), player("p2", "Sara"), player("p3", "Ali")],
            &[record("r1", "p2", AttendanceStatus::Present)],
        )
    }

    fn key(course: &str) -> SheetKey {
        (
            course.to_string(),
            NaiveDate::from_ymd_opt(2025, 3, 10).expect("valid date"),
        )
    }

    #[test]
    fn build_rows_merges_records_and_keeps_roster_order() {
        let rows = sheet();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].player.id, "p1");
        assert!(!rows[0].marked);
        assert_eq!(rows[1].record_id.as_deref(), Some("r1"));
        assert_eq!(rows[1].status, AttendanceStatus::Present);
        assert!(rows[1].marked);
        assert!(!rows[2].marked);
    }

    #[test]
    fn repeated_edits_to_one_row_collapse_into_one_mark() {
        let mut rows = sheet();
        let mut pending = PendingFlush::default();
        let sheet_key = key("c1");

        set_status(&mut rows, &mut pending, &sheet_key, "p1", AttendanceStatus::Present);
        set_note(&mut rows, &mut pending, &sheet_key, "p1", "left early".to_string());
        set_status(&mut rows, &mut pending, &sheet_key, "p1", AttendanceStatus::Late);

        let (_, marks) = take_flush(&mut pending);
        assert_eq!(marks.len(), 1);
        assert_eq!(marks[0].status, AttendanceStatus::Late);
        assert_eq!(marks[0].note.as_deref(), Some("left early"));
    }

    #[test]
    fn edits_to_different_rows_each_get_a_mark() {
        let mut rows = sheet();
        let mut pending = PendingFlush::default();
        let sheet_key = key("c1");

        set_status(&mut rows, &mut pending, &sheet_key, "p1", AttendanceStatus::Present);
        set_status(&mut rows, &mut pending, &sheet_key, "p3", AttendanceStatus::Excused);

        let (_, marks) = take_flush(&mut pending);
        assert_eq!(marks.len(), 2);
    }

    #[test]
    fn take_flush_drains_the_queue() {
        let mut rows = sheet();
        let mut pending = PendingFlush::default();
        set_status(&mut rows, &mut pending, &key("c1"), "p1", AttendanceStatus::Present);

        assert_eq!(take_flush(&mut pending).1.len(), 1);
        let (sheet_key, marks) = take_flush(&mut pending);
        assert_eq!(sheet_key, None);
        assert!(marks.is_empty());
    }

    #[test]
    fn flush_targets_the_sheet_the_marks_were_made_on() {
        // Marks queued under one course must not follow the selectors
        // to another course while an earlier flush is still in flight.
        let mut rows = sheet();
        let mut pending = PendingFlush::default();
        set_status(&mut rows, &mut pending, &key("c1"), "p1", AttendanceStatus::Present);

        // The selectors have since moved to another course
        assert!(pending.is_for(&key("c1")));
        assert!(!pending.is_for(&key("c2")));

        let (sheet_key, marks) = take_flush(&mut pending);
        assert_eq!(sheet_key, Some(key("c1")));
        assert_eq!(marks.len(), 1);
    }

    #[test]
    fn cleared_queue_accepts_any_sheet() {
        let mut pending = PendingFlush::default();
        assert!(pending.is_for(&key("c1")));

        let mut rows = sheet();
        set_status(&mut rows, &mut pending, &key("c1"), "p1", AttendanceStatus::Present);
        pending.clear();
        assert!(pending.is_empty());
        assert!(pending.is_for(&key("c2")));
    }

    #[test]
    fn edit_to_unknown_player_is_rejected() {
        let mut rows = sheet();
        let mut pending = PendingFlush::default();
        assert!(!set_status(
            &mut rows,
            &mut pending,
            &key("c1"),
            "ghost",
            AttendanceStatus::Present
        ));
        assert!(pending.is_empty());
        assert_eq!(pending.sheet, None);
    }

    #[test]
    fn failed_flush_rolls_back_only_the_touched_rows() {
        let mut rows = sheet();
        let mut pending = PendingFlush::default();
        set_status(&mut rows, &mut pending, &key("c1"), "p1", AttendanceStatus::Present);
        let (_, marks) = take_flush(&mut pending);
        let snapshot = snapshot_rows(&rows, &marks);
        assert_eq!(snapshot.len(), 1);

        // A later local edit the flush never saw
        rows[2].note = "untouched".to_string();

        restore_rows(&mut rows, snapshot);
        assert!(!rows[0].marked);
        assert_eq!(rows[0].status, AttendanceStatus::Absent);
        assert_eq!(rows[2].note, "untouched");
    }

    #[test]
    fn saved_records_assign_ids_to_new_rows() {
        let mut rows = sheet();
        let mut pending = PendingFlush::default();
        set_status(&mut rows, &mut pending, &key("c1"), "p1", AttendanceStatus::Late);

        apply_saved_records(&mut rows, &[record("r9", "p1", AttendanceStatus::Late)]);
        assert_eq!(rows[0].record_id.as_deref(), Some("r9"));
        assert_eq!(rows[0].status, AttendanceStatus::Late);
    }

    #[test]
    fn present_count_ignores_unmarked_rows() {
        let mut rows = sheet();
        let mut pending = PendingFlush::default();
        let sheet_key = key("c1");
        assert_eq!(present_count(&rows), 1);

        set_status(&mut rows, &mut pending, &sheet_key, "p1", AttendanceStatus::Present);
        assert_eq!(present_count(&rows), 2);

        set_status(&mut rows, &mut pending, &sheet_key, "p2", AttendanceStatus::Absent);
        assert_eq!(present_count(&rows), 1);
    }
}
