//! Application frame: sidebar navigation, header, global concerns
//!
//! Navigation is a plain enum switch. Every screen owns its data and
//! loads it on mount; the shell only carries what is genuinely shared:
//! the academy switcher, the unread badge, theme and locale.

use std::cell::Cell;
use std::rc::Rc;

use dioxus::prelude::*;
use gloo_timers::future::TimeoutFuture;

use shared_types::Academy;

use crate::api::{academies, notifications};
use crate::screens::{
    AcademiesScreen, AttendanceScreen, CoursesScreen, MessagingScreen, NotificationsScreen,
    OverviewScreen, PaymentsScreen, PlayersScreen, ProgramsScreen, SessionPlansScreen,
    SettingsScreen,
};
use crate::session;
use crate::store::{self, STORE};
use crate::styles::APP_STYLES;
use crate::theme;
use crate::toast::ToastHost;

const UNREAD_POLL_MS: u32 = 60_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Overview,
    Academies,
    Programs,
    Courses,
    SessionPlans,
    Players,
    Attendance,
    Messaging,
    Notifications,
    Payments,
    Settings,
}

impl Screen {
    pub const ALL: [Screen; 11] = [
        Screen::Overview,
        Screen::Academies,
        Screen::Programs,
        Screen::Courses,
        Screen::SessionPlans,
        Screen::Players,
        Screen::Attendance,
        Screen::Messaging,
        Screen::Notifications,
        Screen::Payments,
        Screen::Settings,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Screen::Overview => "Overview",
            Screen::Academies => "Academies",
            Screen::Programs => "Programs",
            Screen::Courses => "Courses",
            Screen::SessionPlans => "Sessions",
            Screen::Players => "Players",
            Screen::Attendance => "Attendance",
            Screen::Messaging => "Messages",
            Screen::Notifications => "Notifications",
            Screen::Payments => "Payments",
            Screen::Settings => "Settings",
        }
    }

    fn icon(self) -> &'static str {
        match self {
            Screen::Overview => "📊",
            Screen::Academies => "🏛️",
            Screen::Programs => "🏅",
            Screen::Courses => "📘",
            Screen::SessionPlans => "📅",
            Screen::Players => "👥",
            Screen::Attendance => "✅",
            Screen::Messaging => "💬",
            Screen::Notifications => "🔔",
            Screen::Payments => "💳",
            Screen::Settings => "⚙️",
        }
    }
}

#[component]
pub fn Shell() -> Element {
    let mut active_screen = use_signal(|| Screen::Overview);
    let mut academy_options = use_signal(Vec::<Academy>::new);
    let mut boot_done = use_signal(|| false);

    // The poller must stop when the app unmounts (hot reload, tests)
    let poll_alive = use_hook(|| Rc::new(Cell::new(true)));
    {
        let poll_alive = poll_alive.clone();
        use_drop(move || {
            poll_alive.set(false);
        });
    }

    // One-time boot: restore preferences, seed the academy switcher,
    // start the unread badge poller
    let poll_alive_for_effect = poll_alive.clone();
    use_effect(move || {
        if boot_done() {
            return;
        }
        boot_done.set(true);

        store::set_locale(session::cached_locale());
        store::set_theme(
            &theme::get_cached_theme_preference()
                .unwrap_or_else(|| theme::DEFAULT_THEME.to_string()),
        );

        if let Some(id) = session::cached_academy_id() {
            store::select_academy(&id);
        }

        spawn(async move {
            match academies::list_academies().await {
                Ok(list) => {
                    // Nothing cached yet: default to the first academy
                    if STORE.read().active_academy_id.is_none() {
                        if let Some(first) = list.first() {
                            store::select_academy(&first.id);
                        }
                    }
                    academy_options.set(list);
                }
                Err(e) => {
                    dioxus_logger::tracing::warn!("Failed to load academies for the switcher: {e}")
                }
            }
        });

        let alive = poll_alive_for_effect.clone();
        spawn(async move {
            loop {
                match notifications::unread_count().await {
                    Ok(count) => store::set_unread(count),
                    Err(e) => dioxus_logger::tracing::warn!("Unread poll failed: {e}"),
                }
                TimeoutFuture::new(UNREAD_POLL_MS).await;
                if !alive.get() {
                    return;
                }
            }
        });
    });

    let on_switch_academy = use_callback(move |id: String| {
        if id.is_empty() {
            return;
        }
        store::select_academy(&id);
    });

    let toggle_theme = move |_| {
        let next = theme::next_theme(&STORE.read().theme);
        store::set_theme(&next);
    };

    let unread = STORE.read().unread_notifications;
    let active_academy_id = STORE.read().active_academy_id.clone().unwrap_or_default();
    let locale = STORE.read().locale;
    let theme_is_light = STORE.read().theme == "light";

    rsx! {
        style { {APP_STYLES} }
        div {
            class: "app-frame",

            aside {
                class: "sidebar",
                div { class: "sidebar-brand", "AcademyOS" }
                for screen in Screen::ALL {
                    button {
                        class: if active_screen() == screen { "nav-item active" } else { "nav-item" },
                        onclick: move |_| active_screen.set(screen),
                        span { {screen.icon()} }
                        span { {screen.label()} }
                        if screen == Screen::Notifications && unread > 0 {
                            span { class: "nav-badge", "{unread}" }
                        }
                    }
                }
            }

            div {
                class: "main-column",

                header {
                    class: "app-header",
                    div {
                        style: "display: flex; align-items: center; gap: 0.75rem;",
                        span { style: "font-size: 0.8125rem; color: var(--text-secondary);", "Academy" }
                        select {
                            class: "select",
                            style: "width: 240px;",
                            value: "{active_academy_id}",
                            onchange: move |e| on_switch_academy.call(e.value()),
                            for academy in academy_options() {
                                option {
                                    value: "{academy.id}",
                                    selected: academy.id == active_academy_id,
                                    "{academy.display_name(locale)}"
                                }
                            }
                        }
                    }
                    div {
                        style: "display: flex; align-items: center; gap: 0.5rem;",
                        button {
                            class: "btn",
                            onclick: toggle_theme,
                            if theme_is_light { "🌙 Dark" } else { "☀️ Light" }
                        }
                    }
                }

                main {
                    class: "screen-body",
                    match active_screen() {
                        Screen::Overview => rsx! { OverviewScreen {} },
                        Screen::Academies => rsx! { AcademiesScreen {} },
                        Screen::Programs => rsx! { ProgramsScreen {} },
                        Screen::Courses => rsx! { CoursesScreen {} },
                        Screen::SessionPlans => rsx! { SessionPlansScreen {} },
                        Screen::Players => rsx! { PlayersScreen {} },
                        Screen::Attendance => rsx! { AttendanceScreen {} },
                        Screen::Messaging => rsx! { MessagingScreen {} },
                        Screen::Notifications => rsx! { NotificationsScreen {} },
                        Screen::Payments => rsx! { PaymentsScreen {} },
                        Screen::Settings => rsx! { SettingsScreen {} },
                    }
                }
            }
        }
        ToastHost {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_screen_is_reachable_from_the_sidebar() {
        assert_eq!(Screen::ALL.len(), 11);
        for screen in Screen::ALL {
            assert!(!screen.label().is_empty());
            assert!(!screen.icon().is_empty());
        }
    }
}
