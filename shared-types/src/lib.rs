//! Shared types between frontend and backend
//!
//! These types are used by both:
//! - Dioxus components (WASM)
//! - The actions layer (TypeScript, via the generated bindings)
//!
//! Serializable with serde for JSON over HTTP

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

// ============================================================================
// Core Types
// ============================================================================

/// UI language. Arabic fields fall back to English when blank.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "../../bindings/generated.ts")]
pub enum Locale {
    En,
    Ar,
}

impl Locale {
    pub fn as_str(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Ar => "ar",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Locale> {
        match tag {
            "en" => Some(Locale::En),
            "ar" => Some(Locale::Ar),
            _ => None,
        }
    }

    pub fn is_rtl(self) -> bool {
        matches!(self, Locale::Ar)
    }
}

impl Default for Locale {
    fn default() -> Self {
        Locale::En
    }
}

/// Pick the localized variant of a bilingual pair.
/// Arabic falls back to the English value when the Arabic one is blank.
pub fn localized<'a>(locale: Locale, name: &'a str, name_ar: &'a str) -> &'a str {
    match locale {
        Locale::Ar if !name_ar.trim().is_empty() => name_ar,
        _ => name,
    }
}

/// Trim a form field and convert the empty string to an absent value,
/// so optional fields are omitted from request payloads instead of
/// being sent as "".
pub fn empty_to_none(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Client-generated reference for optimistic entries, unique per call.
pub fn new_client_ref() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Check a wall-clock time against the zero-padded "HH:MM" form used by
/// [`SessionPlan::start_time`].
pub fn valid_hhmm(value: &str) -> bool {
    let bytes = value.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return false;
    }
    let (Ok(hh), Ok(mm)) = (value[0..2].parse::<u32>(), value[3..5].parse::<u32>()) else {
        return false;
    };
    hh < 24 && mm < 60
}

// ============================================================================
// Action Errors
// ============================================================================

/// Fallback shown for transport and decode failures. The raw error goes
/// to the log, never to the user.
pub const GENERIC_ACTION_ERROR: &str = "Something went wrong. Please try again.";

/// Failure of a backend action call, as seen by the UI.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    /// The server handled the request and said no. The message is
    /// display-ready and shown verbatim.
    #[error("{0}")]
    Rejected(String),

    /// The request never completed: network failure, non-2xx status,
    /// or a response body that did not decode.
    #[error("{0}")]
    Transport(String),
}

impl ActionError {
    pub fn user_message(&self) -> &str {
        match self {
            ActionError::Rejected(message) => message,
            ActionError::Transport(_) => GENERIC_ACTION_ERROR,
        }
    }

    pub fn is_rejection(&self) -> bool {
        matches!(self, ActionError::Rejected(_))
    }
}

// ============================================================================
// Academies
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "../../bindings/generated.ts")]
pub struct Academy {
    pub id: String,
    pub name: String,
    pub name_ar: String,
    /// URL-safe identifier, derived server-side when not provided
    pub slug: String,
    pub city: Option<String>,
    pub contact_email: Option<String>,
    pub archived: bool,
    pub created_at: DateTime<Utc>,
}

impl Academy {
    pub fn display_name(&self, locale: Locale) -> &str {
        localized(locale, &self.name, &self.name_ar)
    }
}

// ============================================================================
// Programs & Courses
// ============================================================================

/// A training program within an academy (e.g. "U12 Football").
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "../../bindings/generated.ts")]
pub struct Program {
    pub id: String,
    pub academy_id: String,
    pub name: String,
    pub name_ar: String,
    pub description: Option<String>,
    pub capacity: u32,
    /// Monthly fee in minor currency units (halalas, cents)
    pub monthly_fee_minor: i64,
    pub archived: bool,
    pub created_at: DateTime<Utc>,
}

impl Program {
    pub fn display_name(&self, locale: Locale) -> &str {
        localized(locale, &self.name, &self.name_ar)
    }
}

/// A coached group inside a program, with its own session schedule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "../../bindings/generated.ts")]
pub struct Course {
    pub id: String,
    pub academy_id: String,
    pub program_id: String,
    pub name: String,
    pub name_ar: String,
    pub coach: Option<String>,
    pub start_date: NaiveDate,
    pub archived: bool,
    pub created_at: DateTime<Utc>,
}

impl Course {
    pub fn display_name(&self, locale: Locale) -> &str {
        localized(locale, &self.name, &self.name_ar)
    }
}

/// One scheduled training session of a course.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "../../bindings/generated.ts")]
pub struct SessionPlan {
    pub id: String,
    pub course_id: String,
    pub title: String,
    pub date: NaiveDate,
    /// Local wall-clock start, "HH:MM"
    pub start_time: Option<String>,
    pub duration_min: u32,
    pub location: Option<String>,
    pub completed: bool,
}

// ============================================================================
// Players
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "../../bindings/generated.ts")]
pub struct Player {
    pub id: String,
    pub academy_id: String,
    pub program_id: Option<String>,
    pub name: String,
    pub name_ar: String,
    pub guardian_phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub archived: bool,
    pub created_at: DateTime<Utc>,
}

impl Player {
    pub fn display_name(&self, locale: Locale) -> &str {
        localized(locale, &self.name, &self.name_ar)
    }

    pub fn age_on(&self, today: NaiveDate) -> Option<u32> {
        self.birth_date.and_then(|birth| today.years_since(birth))
    }
}

// ============================================================================
// Attendance
// ============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "../../bindings/generated.ts")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
    Excused,
}

impl AttendanceStatus {
    pub fn label(self) -> &'static str {
        match self {
            AttendanceStatus::Present => "Present",
            AttendanceStatus::Absent => "Absent",
            AttendanceStatus::Late => "Late",
            AttendanceStatus::Excused => "Excused",
        }
    }
}

/// One player's mark for one course on one date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "../../bindings/generated.ts")]
pub struct AttendanceRecord {
    pub id: String,
    pub course_id: String,
    pub player_id: String,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub note: Option<String>,
}

// ============================================================================
// Messaging
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "../../bindings/generated.ts")]
pub struct Conversation {
    pub id: String,
    pub academy_id: String,
    pub subject: String,
    /// Display name of the other party (guardian, coach)
    pub participant: String,
    pub last_message: Option<String>,
    pub last_message_at: Option<DateTime<Utc>>,
    pub unread: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "../../bindings/generated.ts")]
pub struct Message {
    pub id: String,
    pub conversation_id: String,
    pub sender_id: String,
    pub body: String,
    pub sent_at: DateTime<Utc>,
    /// Echo of the client-generated ref the sender attached, used to
    /// match a persisted row back to its optimistic bubble.
    pub client_ref: Option<String>,
    pub pending: bool, // True if optimistic (not confirmed by the server yet)
}

// ============================================================================
// Notifications
// ============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "../../bindings/generated.ts")]
pub enum NotificationKind {
    Message,
    Payment,
    Attendance,
    System,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "../../bindings/generated.ts")]
pub struct Notification {
    pub id: String,
    pub kind: NotificationKind,
    pub title: String,
    pub body: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Payments
// ============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "../../bindings/generated.ts")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Overdue,
    Refunded,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "../../bindings/generated.ts")]
pub enum PaymentMethod {
    Cash,
    Card,
    Transfer,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "../../bindings/generated.ts")]
pub struct Payment {
    pub id: String,
    pub academy_id: String,
    pub player_id: String,
    /// Denormalized for display; the actions layer joins it in
    pub player_name: String,
    /// Minor currency units (halalas, cents)
    pub amount_minor: i64,
    pub currency: String,
    pub status: PaymentStatus,
    pub method: Option<PaymentMethod>,
    pub due_date: NaiveDate,
    pub paid_at: Option<DateTime<Utc>>,
    pub reference: Option<String>,
}

/// Currency assumed when an entity carries only a minor-unit amount.
pub const DEFAULT_CURRENCY: &str = "SAR";

/// Render minor currency units as "SAR 150.00".
pub fn format_amount(amount_minor: i64, currency: &str) -> String {
    let sign = if amount_minor < 0 { "-" } else { "" };
    let abs = amount_minor.unsigned_abs();
    format!("{sign}{currency} {}.{:02}", abs / 100, abs % 100)
}

/// Parse "150", "150.5", or "150.00" into minor units without going
/// through floating point. Negative and malformed amounts are refused.
pub fn parse_amount_minor(input: &str) -> Option<i64> {
    let trimmed = input.trim();
    let (major, minor) = match trimmed.split_once('.') {
        Some((major, minor)) => (major, minor),
        None => (trimmed, ""),
    };
    if minor.len() > 2 || !minor.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    if major.is_empty() || !major.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let major: i64 = major.parse().ok()?;
    let cents: i64 = match minor.len() {
        0 => 0,
        1 => minor.parse::<i64>().ok()? * 10,
        _ => minor.parse().ok()?,
    };
    Some(major * 100 + cents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ts_rs::Config;

    #[test]
    fn test_locale_tags() {
        assert_eq!(Locale::from_tag("ar"), Some(Locale::Ar));
        assert_eq!(Locale::from_tag("en"), Some(Locale::En));
        assert_eq!(Locale::from_tag("fr"), None);
        assert_eq!(Locale::Ar.as_str(), "ar");
        assert!(Locale::Ar.is_rtl());
        assert!(!Locale::En.is_rtl());
    }

    #[test]
    fn test_localized_falls_back_to_english() {
        assert_eq!(localized(Locale::Ar, "Jeddah United", "نادي جدة"), "نادي جدة");
        assert_eq!(localized(Locale::Ar, "Jeddah United", ""), "Jeddah United");
        assert_eq!(localized(Locale::Ar, "Jeddah United", "   "), "Jeddah United");
        assert_eq!(localized(Locale::En, "Jeddah United", "نادي جدة"), "Jeddah United");
    }

    #[test]
    fn test_empty_to_none() {
        assert_eq!(empty_to_none(""), None);
        assert_eq!(empty_to_none("   "), None);
        assert_eq!(empty_to_none(" riyadh "), Some("riyadh".to_string()));
    }

    #[test]
    fn test_client_refs_are_unique() {
        let a = new_client_ref();
        let b = new_client_ref();
        assert_ne!(a, b);
        assert_eq!(a.len(), 36); // UUID length
    }

    #[test]
    fn test_valid_hhmm() {
        assert!(valid_hhmm("00:00"));
        assert!(valid_hhmm("17:30"));
        assert!(valid_hhmm("23:59"));
        assert!(!valid_hhmm("24:00"));
        assert!(!valid_hhmm("17:60"));
        assert!(!valid_hhmm("9:30"));
        assert!(!valid_hhmm("1730"));
    }

    #[test]
    fn test_action_error_user_message() {
        let rejected = ActionError::Rejected("Slug already in use".to_string());
        assert_eq!(rejected.user_message(), "Slug already in use");
        assert!(rejected.is_rejection());

        let transport = ActionError::Transport("HTTP error: 502".to_string());
        assert_eq!(transport.user_message(), GENERIC_ACTION_ERROR);
        assert!(!transport.is_rejection());
        // The raw detail stays available for logging
        assert_eq!(transport.to_string(), "HTTP error: 502");
    }

    #[test]
    fn test_attendance_status_serialization() {
        let json = serde_json::to_string(&AttendanceStatus::Excused).unwrap();
        assert_eq!(json, "\"excused\"");
        let back: AttendanceStatus = serde_json::from_str("\"late\"").unwrap();
        assert_eq!(back, AttendanceStatus::Late);
    }

    #[test]
    fn test_academy_serialization() {
        let academy = Academy {
            id: "aca_1".to_string(),
            name: "Jeddah United".to_string(),
            name_ar: "نادي جدة".to_string(),
            slug: "jeddah-united".to_string(),
            city: None,
            contact_email: Some("office@jeddah.example".to_string()),
            archived: false,
            created_at: Utc::now(),
        };

        let json = serde_json::to_string(&academy).unwrap();
        let back: Academy = serde_json::from_str(&json).unwrap();
        assert_eq!(academy, back);
        assert_eq!(academy.display_name(Locale::Ar), "نادي جدة");
    }

    #[test]
    fn test_player_age() {
        let player = Player {
            id: "ply_1".to_string(),
            academy_id: "aca_1".to_string(),
            program_id: None,
            name: "Sami".to_string(),
            name_ar: String::new(),
            guardian_phone: None,
            birth_date: NaiveDate::from_ymd_opt(2014, 6, 1),
            archived: false,
            created_at: Utc::now(),
        };

        let today = NaiveDate::from_ymd_opt(2026, 5, 31).unwrap();
        assert_eq!(player.age_on(today), Some(11));
        let after_birthday = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap();
        assert_eq!(player.age_on(after_birthday), Some(12));
    }

    #[test]
    fn test_parse_amount_minor() {
        assert_eq!(parse_amount_minor("150"), Some(15_000));
        assert_eq!(parse_amount_minor("150.5"), Some(15_050));
        assert_eq!(parse_amount_minor("150.00"), Some(15_000));
        assert_eq!(parse_amount_minor(" 0.99 "), Some(99));
        assert_eq!(parse_amount_minor("150.999"), None);
        assert_eq!(parse_amount_minor("-5"), None);
        assert_eq!(parse_amount_minor("abc"), None);
        assert_eq!(parse_amount_minor(""), None);
        assert_eq!(parse_amount_minor(".50"), None);
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(15000, "SAR"), "SAR 150.00");
        assert_eq!(format_amount(9, "SAR"), "SAR 0.09");
        assert_eq!(format_amount(-2550, "SAR"), "-SAR 25.50");
        assert_eq!(format_amount(0, "SAR"), "SAR 0.00");
    }

    #[test]
    fn export_types() {
        // Export all types to TypeScript
        // The export_to attribute in each type's #[ts] macro specifies the output file
        let config = Config::default();
        Locale::export(&config).unwrap();
        Academy::export(&config).unwrap();
        Program::export(&config).unwrap();
        Course::export(&config).unwrap();
        SessionPlan::export(&config).unwrap();
        Player::export(&config).unwrap();
        AttendanceStatus::export(&config).unwrap();
        AttendanceRecord::export(&config).unwrap();
        Conversation::export(&config).unwrap();
        Message::export(&config).unwrap();
        NotificationKind::export(&config).unwrap();
        Notification::export(&config).unwrap();
        PaymentStatus::export(&config).unwrap();
        PaymentMethod::export(&config).unwrap();
        Payment::export(&config).unwrap();
    }
}
