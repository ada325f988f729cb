//! App-wide observable values
//!
//! Values read by more than one screen live in one GlobalSignal instead
//! of being threaded through props or re-fetched per screen: the active
//! academy, the locale, and the unread badge count. Writes go through
//! the helpers here so localStorage and the document attributes stay in
//! step with the signal.

use dioxus::prelude::*;
use shared_types::Locale;

use crate::session;
use crate::theme;

#[derive(Debug, Clone, PartialEq)]
pub struct SharedStore {
    /// Academy every academy-scoped screen loads under
    pub active_academy_id: Option<String>,
    pub locale: Locale,
    pub theme: String,
    pub unread_notifications: u32,
}

impl Default for SharedStore {
    fn default() -> Self {
        Self {
            active_academy_id: None,
            locale: Locale::default(),
            theme: theme::DEFAULT_THEME.to_string(),
            unread_notifications: 0,
        }
    }
}

pub static STORE: GlobalSignal<SharedStore> = GlobalSignal::new(SharedStore::default);

pub fn select_academy(id: &str) {
    STORE.write().active_academy_id = Some(id.to_string());
    session::set_cached_academy_id(id);
}

/// Both the header toggle and the settings screen change the theme;
/// routing the write through here keeps them in agreement.
pub fn set_theme(theme: &str) {
    STORE.write().theme = theme.to_string();
    theme::apply_theme_to_document(theme);
    theme::set_cached_theme_preference(theme);
}

pub fn set_locale(locale: Locale) {
    STORE.write().locale = locale;
    session::set_cached_locale(locale);
    theme::apply_locale_to_document(locale);
}

pub fn set_unread(count: u32) {
    STORE.write().unread_notifications = count;
}

/// Drop the badge locally after notifications were marked read. The next
/// poll corrects any drift.
pub fn notifications_marked_read(marked: u32) {
    let current = STORE.read().unread_notifications;
    STORE.write().unread_notifications = unread_after_marking(current, marked);
}

fn unread_after_marking(count: u32, marked: u32) -> u32 {
    count.saturating_sub(marked)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_defaults_are_empty() {
        let store = SharedStore::default();
        assert_eq!(store.active_academy_id, None);
        assert_eq!(store.locale, Locale::En);
        assert_eq!(store.theme, theme::DEFAULT_THEME);
        assert_eq!(store.unread_notifications, 0);
    }

    #[test]
    fn unread_badge_never_underflows() {
        assert_eq!(unread_after_marking(5, 2), 3);
        assert_eq!(unread_after_marking(2, 5), 0);
        assert_eq!(unread_after_marking(0, 1), 0);
    }
}
