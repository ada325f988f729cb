//! Academy screen component

use dioxus::prelude::*;

use shared_types::Academy;

use crate::api::academies as academies_api;
use crate::scope::TaskScope;
use crate::store::STORE;
use crate::toast;
use crate::widgets::{EmptyState, ErrorBanner};

use super::dialogs::render_dialog;
use super::logic;
use super::types::{AcademyForm, ArchiveFilter, DialogState};

#[component]
pub fn AcademiesScreen() -> Element {
    let mut academies = use_signal(Vec::<Academy>::new);
    let mut loading = use_signal(|| false);
    let mut load_error = use_signal(|| None::<String>);
    let mut dialog = use_signal(|| DialogState::None);
    let mut form = use_signal(AcademyForm::default);
    let mut form_error = use_signal(|| None::<String>);
    let mut submitting = use_signal(|| false);
    let mut search = use_signal(String::new);
    let mut archive_filter = use_signal(|| ArchiveFilter::Active);
    let mut initial_load_done = use_signal(|| false);

    let scope = use_hook(TaskScope::new);
    {
        let scope = scope.clone();
        use_drop(move || scope.retire());
    }

    // Load the full list; replaces whatever is on screen. A failed load
    // keeps the previous rows and shows a banner instead.
    let load_academies = use_callback({
        let scope = scope.clone();
        move |_: ()| {
            let token = scope.begin();
            spawn(async move {
                loading.set(true);
                match academies_api::list_academies().await {
                    Ok(list) => {
                        if !token.is_live() {
                            return;
                        }
                        academies.set(list);
                        load_error.set(None);
                        loading.set(false);
                    }
                    Err(e) => {
                        if !token.is_live() {
                            return;
                        }
                        dioxus_logger::tracing::error!("Failed to load academies: {e}");
                        load_error.set(Some(e.user_message().to_string()));
                        loading.set(false);
                    }
                }
            });
        }
    });

    // Initial load - only run once
    use_effect(move || {
        if initial_load_done() {
            return;
        }
        initial_load_done.set(true);
        load_academies.call(());
    });

    let show_create = move |_| {
        form.set(AcademyForm::default());
        form_error.set(None);
        dialog.set(DialogState::Create);
    };

    let mut show_edit = move |academy: Academy| {
        form.set(AcademyForm::from_academy(&academy));
        form_error.set(None);
        dialog.set(DialogState::Edit { academy });
    };

    let mut show_delete = move |academy: Academy| {
        let locale = STORE.read().locale;
        dialog.set(DialogState::Delete {
            id: academy.id.clone(),
            name: academy.display_name(locale).to_string(),
        });
    };

    // Create or update, depending on the open dialog
    let confirm_save = use_callback({
        let scope = scope.clone();
        move |_: ()| {
            if submitting() {
                return;
            }
            form_error.set(None);
            let form_snapshot = form();
            if let Err(message) = logic::validate_form(&form_snapshot) {
                form_error.set(Some(message));
                return;
            }
            let current_dialog = dialog();
            let scope = scope.clone();
            submitting.set(true);
            spawn(async move {
                let result = match &current_dialog {
                    DialogState::Create => {
                        academies_api::create_academy(&logic::build_create_request(&form_snapshot))
                            .await
                            .map(|_| ())
                    }
                    DialogState::Edit { academy } => academies_api::update_academy(
                        &academy.id,
                        &logic::build_update_request(&form_snapshot),
                    )
                    .await
                    .map(|_| ()),
                    _ => Ok(()),
                };
                if !scope.is_alive() {
                    return;
                }
                match result {
                    Ok(()) => {
                        submitting.set(false);
                        dialog.set(DialogState::None);
                        toast::push_success("Academy saved");
                        load_academies.call(());
                    }
                    Err(e) => {
                        dioxus_logger::tracing::error!("Academy save failed: {e}");
                        form_error.set(Some(e.user_message().to_string()));
                        submitting.set(false);
                    }
                }
            });
        }
    });

    let confirm_delete = use_callback({
        let scope = scope.clone();
        move |_: ()| {
            if submitting() {
                return;
            }
            let DialogState::Delete { id, .. } = dialog() else {
                return;
            };
            let scope = scope.clone();
            submitting.set(true);
            spawn(async move {
                match academies_api::delete_academy(&id).await {
                    Ok(()) => {
                        if !scope.is_alive() {
                            return;
                        }
                        submitting.set(false);
                        dialog.set(DialogState::None);
                        toast::push_success("Academy deleted");
                        load_academies.call(());
                    }
                    Err(e) => {
                        if !scope.is_alive() {
                            return;
                        }
                        dioxus_logger::tracing::error!("Academy delete failed: {e}");
                        toast::push_error(e.user_message());
                        submitting.set(false);
                    }
                }
            });
        }
    });

    // Optimistic archive flip; rolls back from the snapshot on failure
    let toggle_archived = use_callback({
        let scope = scope.clone();
        move |academy: Academy| {
            let desired = !academy.archived;
            let Some(snapshot) = logic::apply_archived(&mut academies.write(), &academy.id, desired)
            else {
                return;
            };
            let scope = scope.clone();
            spawn(async move {
                match academies_api::set_academy_archived(&academy.id, desired).await {
                    Ok(updated) => {
                        if !scope.is_alive() {
                            return;
                        }
                        logic::replace_row(&mut academies.write(), updated);
                    }
                    Err(e) => {
                        if !scope.is_alive() {
                            return;
                        }
                        dioxus_logger::tracing::error!("Archive toggle failed: {e}");
                        logic::restore_row(&mut academies.write(), snapshot);
                        toast::push_error(e.user_message());
                    }
                }
            });
        }
    });

    let cancel_dialog = use_callback(move |_: ()| {
        dialog.set(DialogState::None);
        form_error.set(None);
    });

    let locale = STORE.read().locale;
    let filtered = logic::filter_academies(&academies(), archive_filter(), &search());

    rsx! {
        div {
            h2 { class: "screen-title", "Academies" }

            if let Some(message) = load_error() {
                ErrorBanner {
                    message,
                    on_dismiss: move |_| load_error.set(None),
                }
            }

            div {
                class: "toolbar",
                div {
                    style: "display: flex; gap: 0.5rem; flex: 1; max-width: 480px;",
                    input {
                        class: "input",
                        placeholder: "Search by name or slug...",
                        value: "{search}",
                        oninput: move |e| search.set(e.value()),
                    }
                    select {
                        class: "select",
                        style: "width: 140px;",
                        onchange: move |e| {
                            let filter = if e.value() == "all" {
                                ArchiveFilter::All
                            } else {
                                ArchiveFilter::Active
                            };
                            archive_filter.set(filter);
                        },
                        option { value: "active", "Active" }
                        option { value: "all", "All" }
                    }
                }
                div {
                    style: "display: flex; gap: 0.5rem;",
                    button {
                        class: "btn",
                        disabled: loading(),
                        onclick: move |_| load_academies.call(()),
                        if loading() { "Refreshing..." } else { "⟳ Refresh" }
                    }
                    button {
                        class: "btn btn-primary",
                        onclick: show_create,
                        "+ New Academy"
                    }
                }
            }

            if filtered.is_empty() && !loading() {
                EmptyState { message: "No academies match. Create the first one to get going." }
            } else {
                table {
                    class: "data-table",
                    thead {
                        tr {
                            th { "Name" }
                            th { "Slug" }
                            th { "City" }
                            th { "Contact" }
                            th { "Status" }
                            th { "" }
                        }
                    }
                    tbody {
                        for academy in filtered {
                            tr {
                                key: "{academy.id}",
                                td { "{academy.display_name(locale)}" }
                                td { class: "row-muted", "{academy.slug}" }
                                td { class: "row-muted", {academy.city.clone().unwrap_or_default()} }
                                td { class: "row-muted", {academy.contact_email.clone().unwrap_or_default()} }
                                td {
                                    if academy.archived {
                                        span { class: "pill pill-gray", "Archived" }
                                    } else {
                                        span { class: "pill pill-green", "Active" }
                                    }
                                }
                                td {
                                    style: "text-align: end; white-space: nowrap;",
                                    button {
                                        class: "btn-link",
                                        onclick: {
                                            let academy = academy.clone();
                                            move |_| show_edit(academy.clone())
                                        },
                                        "Edit"
                                    }
                                    button {
                                        class: "btn-link",
                                        onclick: {
                                            let academy = academy.clone();
                                            move |_| toggle_archived.call(academy.clone())
                                        },
                                        if academy.archived { "Restore" } else { "Archive" }
                                    }
                                    button {
                                        class: "btn-link",
                                        style: "color: var(--danger-bg);",
                                        onclick: {
                                            let academy = academy.clone();
                                            move |_| show_delete(academy.clone())
                                        },
                                        "Delete"
                                    }
                                }
                            }
                        }
                    }
                }
            }

            {render_dialog(dialog, form, form_error, submitting, confirm_save, confirm_delete, cancel_dialog)}
        }
    }
}
