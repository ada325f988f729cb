//! Attendance sheet screen
//!
//! Per-row marks accumulate locally and flush to the server after the
//! sheet has been idle for a short window, rather than on explicit submit.

pub mod logic;
pub mod types;
pub mod view;

pub use view::AttendanceScreen;
