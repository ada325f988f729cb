//! Shared chrome for the CRUD screens
//!
//! Every screen renders the same dialog skeleton: backdrop, title, fields,
//! an inline error slot, and a footer whose confirm button is disabled
//! while a submission is in flight.

use dioxus::prelude::*;

/// Modal wrapper around screen-supplied form fields.
#[component]
pub fn FormDialog(
    title: String,
    confirm_text: String,
    submitting: bool,
    error: Option<String>,
    on_confirm: Callback<()>,
    on_cancel: Callback<()>,
    children: Element,
) -> Element {
    rsx! {
        div {
            class: "dialog-backdrop",
            onclick: move |_| on_cancel.call(()),
            div {
                class: "dialog-box",
                onclick: move |e| e.stop_propagation(),
                onkeydown: move |e| {
                    if e.key() == Key::Escape {
                        on_cancel.call(());
                    }
                },
                h3 { class: "dialog-title", "{title}" }
                if let Some(message) = error {
                    div { class: "error-banner", "{message}" }
                }
                {children}
                div {
                    class: "dialog-footer",
                    button {
                        class: "btn",
                        onclick: move |_| on_cancel.call(()),
                        "Cancel"
                    }
                    button {
                        class: "btn btn-primary",
                        disabled: submitting,
                        onclick: move |_| on_confirm.call(()),
                        if submitting { "Saving..." } else { "{confirm_text}" }
                    }
                }
            }
        }
    }
}

/// Confirmation dialog component
#[component]
pub fn ConfirmDialog(
    title: String,
    message: String,
    on_confirm: Callback<()>,
    on_cancel: Callback<()>,
    confirm_text: String,
    is_dangerous: bool,
    submitting: bool,
) -> Element {
    let confirm_class = if is_dangerous {
        "btn btn-danger"
    } else {
        "btn btn-primary"
    };

    rsx! {
        div {
            class: "dialog-backdrop",
            onclick: move |_| on_cancel.call(()),
            div {
                class: "dialog-box",
                onclick: move |e| e.stop_propagation(),
                h3 { class: "dialog-title", "{title}" }
                p {
                    style: "margin: 0 0 1rem 0; font-size: 0.875rem; color: var(--text-secondary);",
                    "{message}"
                }
                div {
                    class: "dialog-footer",
                    button {
                        class: "btn",
                        onclick: move |_| on_cancel.call(()),
                        "Cancel"
                    }
                    button {
                        class: "{confirm_class}",
                        disabled: submitting,
                        onclick: move |_| on_confirm.call(()),
                        "{confirm_text}"
                    }
                }
            }
        }
    }
}

/// Labelled form field wrapper.
#[component]
pub fn Field(label: String, children: Element) -> Element {
    rsx! {
        div {
            class: "field",
            span { class: "field-label", "{label}" }
            {children}
        }
    }
}

/// Dismissible screen-level error banner.
#[component]
pub fn ErrorBanner(message: String, on_dismiss: Callback<()>) -> Element {
    rsx! {
        div {
            class: "error-banner",
            span { "{message}" }
            button {
                class: "btn-link",
                style: "color: inherit;",
                onclick: move |_| on_dismiss.call(()),
                "✕"
            }
        }
    }
}

#[component]
pub fn EmptyState(message: String) -> Element {
    rsx! {
        div { class: "empty-state", "{message}" }
    }
}
