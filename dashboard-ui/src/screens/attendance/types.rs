//! Attendance sheet state types

use std::collections::BTreeMap;

use chrono::NaiveDate;
use shared_types::{AttendanceStatus, Player};

use crate::api::attendance::AttendanceMark;

/// The (course, date) a sheet belongs to.
pub type SheetKey = (String, NaiveDate);

/// How long the sheet sits idle after the last edit before the touched
/// marks are flushed to the server.
pub const IDLE_FLUSH_MS: u32 = 1_500;

/// Poll interval while a fired idle timer waits for an earlier flush
/// to finish. Only one flush runs at a time.
pub const FLUSH_WAIT_MS: u32 = 200;

/// Status choices in the order the sheet renders them.
pub const STATUS_CHOICES: [AttendanceStatus; 4] = [
    AttendanceStatus::Present,
    AttendanceStatus::Absent,
    AttendanceStatus::Late,
    AttendanceStatus::Excused,
];

/// Save state for the sheet
#[derive(Debug, Clone, PartialEq)]
pub enum SaveState {
    /// No unsaved edits
    Clean,
    /// Edits waiting out the idle window
    Dirty,
    /// Flush in progress
    Saving,
    /// Recently flushed (shown briefly)
    Saved,
    /// Flush failed; the touched rows were rolled back
    Failed(String),
}

/// Edits queued for the next flush, tagged with the sheet they were
/// made on. A flush posts to that sheet even when the course or date
/// selector has already moved on.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PendingFlush {
    pub sheet: Option<SheetKey>,
    pub marks: BTreeMap<String, AttendanceMark>,
}

impl PendingFlush {
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    pub fn clear(&mut self) {
        self.sheet = None;
        self.marks.clear();
    }

    /// True when the queued marks belong to the given sheet, or the
    /// queue is empty.
    pub fn is_for(&self, sheet: &SheetKey) -> bool {
        self.sheet.is_none() || self.sheet.as_ref() == Some(sheet)
    }
}

/// One roster row merged with its attendance record, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetRow {
    pub player: Player,
    pub record_id: Option<String>,
    pub status: AttendanceStatus,
    pub note: String,
    /// True once the row has a persisted record or a local edit.
    /// Unmarked rows render with no status selected.
    pub marked: bool,
}
