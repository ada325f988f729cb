//! Settings screen
//!
//! Language and theme apply immediately through the shared store, which
//! also writes localStorage and the document attributes. The server copy
//! is synced on demand so preferences follow the user across devices.

use dioxus::prelude::*;

use shared_types::Locale;

use crate::api::preferences as preferences_api;
use crate::api::preferences::SavePreferencesRequest;
use crate::scope::TaskScope;
use crate::store::{self, STORE};
use crate::toast;
use crate::widgets::Field;

fn build_request(locale: Locale, theme: &str) -> SavePreferencesRequest {
    SavePreferencesRequest {
        locale: locale.as_str().to_string(),
        theme: theme.to_string(),
    }
}

#[component]
pub fn SettingsScreen() -> Element {
    let mut syncing = use_signal(|| false);

    let scope = use_hook(TaskScope::new);
    {
        let scope = scope.clone();
        use_drop(move || scope.retire());
    }

    let sync_preferences = use_callback({
        let scope = scope.clone();
        move |_: ()| {
            if syncing() {
                return;
            }
            let request = build_request(STORE.read().locale, &STORE.read().theme);
            let scope = scope.clone();
            syncing.set(true);
            spawn(async move {
                match preferences_api::save_preferences(&request).await {
                    Ok(()) => {
                        if !scope.is_alive() {
                            return;
                        }
                        toast::push_success("Preferences synced");
                        syncing.set(false);
                    }
                    Err(e) => {
                        if !scope.is_alive() {
                            return;
                        }
                        dioxus_logger::tracing::error!("Preference sync failed: {e}");
                        toast::push_error(e.user_message());
                        syncing.set(false);
                    }
                }
            });
        }
    });

    let locale = STORE.read().locale;
    let theme = STORE.read().theme.clone();

    rsx! {
        div {
            h2 { class: "screen-title", "Settings" }

            div {
                class: "card",
                style: "max-width: 480px; display: flex; flex-direction: column; gap: 1rem;",

                Field {
                    label: "Language",
                    div {
                        style: "display: flex; gap: 0.5rem;",
                        button {
                            class: if locale == Locale::En { "btn btn-primary" } else { "btn" },
                            onclick: move |_| store::set_locale(Locale::En),
                            "English"
                        }
                        button {
                            class: if locale == Locale::Ar { "btn btn-primary" } else { "btn" },
                            onclick: move |_| store::set_locale(Locale::Ar),
                            "العربية"
                        }
                    }
                }

                Field {
                    label: "Theme",
                    div {
                        style: "display: flex; gap: 0.5rem;",
                        button {
                            class: if theme == "light" { "btn btn-primary" } else { "btn" },
                            onclick: move |_| store::set_theme("light"),
                            "☀️ Light"
                        }
                        button {
                            class: if theme == "dark" { "btn btn-primary" } else { "btn" },
                            onclick: move |_| store::set_theme("dark"),
                            "🌙 Dark"
                        }
                    }
                }

                div {
                    style: "display: flex; align-items: center; gap: 0.75rem;",
                    button {
                        class: "btn",
                        disabled: syncing(),
                        onclick: move |_| sync_preferences.call(()),
                        if syncing() { "Syncing..." } else { "Sync to account" }
                    }
                    span {
                        class: "row-muted",
                        style: "font-size: 0.8125rem;",
                        "Applies on this device right away; syncing carries it to your other devices."
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_carries_locale_tag_and_theme() {
        let request = build_request(Locale::Ar, "dark");
        assert_eq!(request.locale, "ar");
        assert_eq!(request.theme, "dark");

        let request = build_request(Locale::En, "light");
        assert_eq!(request.locale, "en");
        assert_eq!(request.theme, "light");
    }
}
