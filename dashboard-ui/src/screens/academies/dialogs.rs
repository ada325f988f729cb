//! Academy dialog rendering

use dioxus::prelude::*;

use crate::widgets::{ConfirmDialog, Field, FormDialog};

use super::types::{AcademyForm, DialogState};

/// Render dialog overlays
pub fn render_dialog(
    dialog: Signal<DialogState>,
    form: Signal<AcademyForm>,
    form_error: Signal<Option<String>>,
    submitting: Signal<bool>,
    on_save: Callback<()>,
    on_delete: Callback<()>,
    on_cancel: Callback<()>,
) -> Element {
    match dialog() {
        DialogState::None => rsx! {},
        DialogState::Create => rsx! {
            FormDialog {
                title: "New Academy",
                confirm_text: "Create",
                submitting: submitting(),
                error: form_error(),
                on_confirm: on_save,
                on_cancel: on_cancel,
                AcademyFields { form }
            }
        },
        DialogState::Edit { .. } => rsx! {
            FormDialog {
                title: "Edit Academy",
                confirm_text: "Save",
                submitting: submitting(),
                error: form_error(),
                on_confirm: on_save,
                on_cancel: on_cancel,
                AcademyFields { form }
            }
        },
        DialogState::Delete { name, .. } => rsx! {
            ConfirmDialog {
                title: "Delete Academy",
                message: format!(
                    "Are you sure you want to delete '{name}'? Programs, players and payments under it go too."
                ),
                on_confirm: on_delete,
                on_cancel: on_cancel,
                confirm_text: "Delete",
                is_dangerous: true,
                submitting: submitting(),
            }
        },
    }
}

#[component]
fn AcademyFields(form: Signal<AcademyForm>) -> Element {
    let mut form = form;
    rsx! {
        Field {
            label: "Name",
            input {
                class: "input",
                value: "{form().name}",
                placeholder: "Jeddah United",
                autofocus: true,
                oninput: move |e| form.write().name = e.value(),
            }
        }
        Field {
            label: "Name (Arabic)",
            input {
                class: "input",
                dir: "rtl",
                value: "{form().name_ar}",
                oninput: move |e| form.write().name_ar = e.value(),
            }
        }
        Field {
            label: "Slug (optional)",
            input {
                class: "input",
                value: "{form().slug}",
                placeholder: "derived from the name when left empty",
                oninput: move |e| form.write().slug = e.value(),
            }
        }
        Field {
            label: "City (optional)",
            input {
                class: "input",
                value: "{form().city}",
                oninput: move |e| form.write().city = e.value(),
            }
        }
        Field {
            label: "Contact email (optional)",
            input {
                class: "input",
                value: "{form().contact_email}",
                oninput: move |e| form.write().contact_email = e.value(),
            }
        }
    }
}
