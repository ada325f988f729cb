//! Browser-session helpers
//!
//! LocalStorage conveniences for what the user last used. The server
//! stays the source of truth for all data; nothing here is load-bearing
//! beyond picking sensible defaults on boot.

use chrono::{DateTime, NaiveDate, Utc};
use shared_types::Locale;

const LOCALE_KEY: &str = "academyos.locale";
const ACADEMY_KEY: &str = "academyos.active-academy";

fn storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

pub fn cached_locale() -> Locale {
    storage()
        .and_then(|s| s.get_item(LOCALE_KEY).ok().flatten())
        .and_then(|tag| Locale::from_tag(&tag))
        .unwrap_or_default()
}

pub fn set_cached_locale(locale: Locale) {
    if let Some(storage) = storage() {
        let _ = storage.set_item(LOCALE_KEY, locale.as_str());
    }
}

pub fn cached_academy_id() -> Option<String> {
    storage()
        .and_then(|s| s.get_item(ACADEMY_KEY).ok().flatten())
        .filter(|id| !id.is_empty())
}

pub fn set_cached_academy_id(id: &str) {
    if let Some(storage) = storage() {
        let _ = storage.set_item(ACADEMY_KEY, id);
    }
}

/// Today in the browser's timezone. Attendance and due dates are wall
/// clock concepts; UTC would flip the date early in Gulf evenings.
pub fn today_local() -> NaiveDate {
    let js = js_sys::Date::new_0();
    NaiveDate::from_ymd_opt(js.get_full_year() as i32, js.get_month() + 1, js.get_date())
        .unwrap_or_else(|| Utc::now().date_naive())
}

/// "HH:MM" in the browser's timezone, for message timestamps.
pub fn local_hhmm(at: DateTime<Utc>) -> String {
    let js = js_sys::Date::new(&wasm_bindgen::JsValue::from_f64(
        at.timestamp_millis() as f64
    ));
    format!("{:02}:{:02}", js.get_hours(), js.get_minutes())
}
