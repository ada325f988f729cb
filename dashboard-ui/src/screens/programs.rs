//! Program management screen
//!
//! Programs are the billing unit: each carries a capacity and a monthly
//! fee. The fee is edited in major units ("150.00") and stored in minor
//! units, so parsing stays integer-only.

use dioxus::prelude::*;

use shared_types::{
    empty_to_none, format_amount, parse_amount_minor, Locale, Program, DEFAULT_CURRENCY,
};

use crate::api::programs as programs_api;
use crate::api::programs::{CreateProgramRequest, UpdateProgramRequest};
use crate::scope::TaskScope;
use crate::store::STORE;
use crate::toast;
use crate::widgets::{ConfirmDialog, EmptyState, ErrorBanner, Field, FormDialog};

#[derive(Debug, Clone, PartialEq)]
enum DialogState {
    None,
    Create,
    Edit { program: Program },
    Delete { id: String, name: String },
}

#[derive(Debug, Clone, Default, PartialEq)]
struct ProgramForm {
    name: String,
    name_ar: String,
    description: String,
    capacity: String,
    monthly_fee: String,
}

impl ProgramForm {
    fn from_program(program: &Program) -> Self {
        Self {
            name: program.name.clone(),
            name_ar: program.name_ar.clone(),
            description: program.description.clone().unwrap_or_default(),
            capacity: program.capacity.to_string(),
            monthly_fee: amount_input_value(program.monthly_fee_minor),
        }
    }
}

/// Form fields parsed into their wire types.
#[derive(Debug, Clone, PartialEq)]
struct ProgramDraft {
    name: String,
    name_ar: String,
    description: Option<String>,
    capacity: u32,
    monthly_fee_minor: i64,
}

const CAPACITY_RANGE: std::ops::RangeInclusive<u32> = 1..=500;

fn validate_form(form: &ProgramForm) -> Result<ProgramDraft, String> {
    let name = form.name.trim();
    let name_ar = form.name_ar.trim();
    if name.is_empty() || name_ar.is_empty() {
        return Err("Name and Arabic name are required".to_string());
    }
    let capacity: u32 = form
        .capacity
        .trim()
        .parse()
        .map_err(|_| "Capacity must be a whole number".to_string())?;
    if !CAPACITY_RANGE.contains(&capacity) {
        return Err("Capacity must be between 1 and 500".to_string());
    }
    let monthly_fee_minor = parse_amount_minor(&form.monthly_fee)
        .ok_or_else(|| "Monthly fee must be an amount like 150.00".to_string())?;
    Ok(ProgramDraft {
        name: name.to_string(),
        name_ar: name_ar.to_string(),
        description: empty_to_none(&form.description),
        capacity,
        monthly_fee_minor,
    })
}

fn amount_input_value(amount_minor: i64) -> String {
    let sign = if amount_minor < 0 { "-" } else { "" };
    let abs = amount_minor.unsigned_abs();
    format!("{sign}{}.{:02}", abs / 100, abs % 100)
}

fn build_create_request(academy_id: &str, draft: ProgramDraft) -> CreateProgramRequest {
    CreateProgramRequest {
        academy_id: academy_id.to_string(),
        name: draft.name,
        name_ar: draft.name_ar,
        description: draft.description,
        capacity: draft.capacity,
        monthly_fee_minor: draft.monthly_fee_minor,
    }
}

fn build_update_request(draft: ProgramDraft) -> UpdateProgramRequest {
    UpdateProgramRequest {
        name: draft.name,
        name_ar: draft.name_ar,
        description: draft.description,
        capacity: draft.capacity,
        monthly_fee_minor: draft.monthly_fee_minor,
    }
}

fn apply_archived(programs: &mut [Program], id: &str, archived: bool) -> Option<Program> {
    let program = programs.iter_mut().find(|p| p.id == id)?;
    let snapshot = program.clone();
    program.archived = archived;
    Some(snapshot)
}

fn restore_row(programs: &mut [Program], snapshot: Program) {
    if let Some(program) = programs.iter_mut().find(|p| p.id == snapshot.id) {
        *program = snapshot;
    }
}

fn replace_row(programs: &mut [Program], updated: Program) {
    if let Some(program) = programs.iter_mut().find(|p| p.id == updated.id) {
        *program = updated;
    }
}

#[component]
pub fn ProgramsScreen() -> Element {
    let mut programs = use_signal(Vec::<Program>::new);
    let mut loading = use_signal(|| false);
    let mut load_error = use_signal(|| None::<String>);
    let mut dialog = use_signal(|| DialogState::None);
    let mut form = use_signal(ProgramForm::default);
    let mut form_error = use_signal(|| None::<String>);
    let mut submitting = use_signal(|| false);
    let mut show_archived = use_signal(|| false);
    let mut loaded_academy = use_signal(|| None::<Option<String>>);

    let scope = use_hook(TaskScope::new);
    {
        let scope = scope.clone();
        use_drop(move || scope.retire());
    }

    let load_programs = use_callback({
        let scope = scope.clone();
        move |_: ()| {
            let Some(academy) = STORE.read().active_academy_id.clone() else {
                programs.set(Vec::new());
                return;
            };
            let token = scope.begin();
            spawn(async move {
                loading.set(true);
                match programs_api::list_programs(&academy).await {
                    Ok(list) => {
                        if !token.is_live() {
                            return;
                        }
                        programs.set(list);
                        load_error.set(None);
                    }
                    Err(e) => {
                        if !token.is_live() {
                            return;
                        }
                        dioxus_logger::tracing::error!("Failed to load programs: {e}");
                        load_error.set(Some(e.user_message().to_string()));
                    }
                }
                loading.set(false);
            });
        }
    });

    // Reload when the active academy changes
    use_effect(move || {
        let academy = STORE.read().active_academy_id.clone();
        if loaded_academy() == Some(academy.clone()) {
            return;
        }
        loaded_academy.set(Some(academy));
        load_programs.call(());
    });

    let show_create = move |_| {
        form.set(ProgramForm::default());
        form_error.set(None);
        dialog.set(DialogState::Create);
    };

    let mut show_edit = move |program: Program| {
        form.set(ProgramForm::from_program(&program));
        form_error.set(None);
        dialog.set(DialogState::Edit { program });
    };

    let mut show_delete = move |program: Program| {
        let locale = STORE.read().locale;
        dialog.set(DialogState::Delete {
            id: program.id.clone(),
            name: program.display_name(locale).to_string(),
        });
    };

    let confirm_save = use_callback({
        let scope = scope.clone();
        move |_: ()| {
            if submitting() {
                return;
            }
            form_error.set(None);
            let draft = match validate_form(&form()) {
                Ok(draft) => draft,
                Err(message) => {
                    form_error.set(Some(message));
                    return;
                }
            };
            let Some(academy) = STORE.read().active_academy_id.clone() else {
                form_error.set(Some("Select an academy first".to_string()));
                return;
            };
            let current_dialog = dialog();
            let scope = scope.clone();
            submitting.set(true);
            spawn(async move {
                let result = match &current_dialog {
                    DialogState::Create => {
                        programs_api::create_program(&build_create_request(&academy, draft))
                            .await
                            .map(|_| ())
                    }
                    DialogState::Edit { program } => {
                        programs_api::update_program(&program.id, &build_update_request(draft))
                            .await
                            .map(|_| ())
                    }
                    _ => Ok(()),
                };
                if !scope.is_alive() {
                    return;
                }
                match result {
                    Ok(()) => {
                        submitting.set(false);
                        dialog.set(DialogState::None);
                        toast::push_success("Program saved");
                        load_programs.call(());
                    }
                    Err(e) => {
                        dioxus_logger::tracing::error!("Program save failed: {e}");
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
                match programs_api::delete_program(&id).await {
                    Ok(()) => {
                        if !scope.is_alive() {
                            return;
                        }
                        submitting.set(false);
                        dialog.set(DialogState::None);
                        toast::push_success("Program deleted");
                        load_programs.call(());
                    }
                    Err(e) => {
                        if !scope.is_alive() {
                            return;
                        }
                        dioxus_logger::tracing::error!("Program delete failed: {e}");
                        toast::push_error(e.user_message());
                        submitting.set(false);
                    }
                }
            });
        }
    });

    let toggle_archived = use_callback({
        let scope = scope.clone();
        move |program: Program| {
            let desired = !program.archived;
            let Some(snapshot) = apply_archived(&mut programs.write(), &program.id, desired)
            else {
                return;
            };
            let scope = scope.clone();
            spawn(async move {
                match programs_api::set_program_archived(&program.id, desired).await {
                    Ok(updated) => {
                        if !scope.is_alive() {
                            return;
                        }
                        replace_row(&mut programs.write(), updated);
                    }
                    Err(e) => {
                        if !scope.is_alive() {
                            return;
                        }
                        dioxus_logger::tracing::error!("Archive toggle failed: {e}");
                        restore_row(&mut programs.write(), snapshot);
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
    let has_academy = STORE.read().active_academy_id.is_some();
    let visible: Vec<Program> = programs()
        .into_iter()
        .filter(|p| show_archived() || !p.archived)
        .collect();

    rsx! {
        div {
            h2 { class: "screen-title", "Programs" }

            if let Some(message) = load_error() {
                ErrorBanner {
                    message,
                    on_dismiss: move |_| load_error.set(None),
                }
            }

            div {
                class: "toolbar",
                label {
                    class: "row-muted",
                    style: "display: flex; align-items: center; gap: 0.375rem; font-size: 0.875rem;",
                    input {
                        r#type: "checkbox",
                        checked: show_archived(),
                        onchange: move |e| show_archived.set(e.checked()),
                    }
                    "Show archived"
                }
                button {
                    class: "btn btn-primary",
                    disabled: !has_academy,
                    onclick: show_create,
                    "+ New Program"
                }
            }

            if !has_academy {
                EmptyState { message: "Select an academy to manage its programs." }
            } else if visible.is_empty() && !loading() {
                EmptyState { message: "No programs yet. Create the first one." }
            } else {
                table {
                    class: "data-table",
                    thead {
                        tr {
                            th { "Name" }
                            th { "Capacity" }
                            th { "Monthly fee" }
                            th { "Status" }
                            th { "" }
                        }
                    }
                    tbody {
                        for program in visible {
                            tr {
                                key: "{program.id}",
                                td {
                                    "{program.display_name(locale)}"
                                    if let Some(description) = &program.description {
                                        div {
                                            class: "row-muted",
                                            style: "font-size: 0.8125rem;",
                                            "{description}"
                                        }
                                    }
                                }
                                td { "{program.capacity}" }
                                td { {format_amount(program.monthly_fee_minor, DEFAULT_CURRENCY)} }
                                td {
                                    if program.archived {
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
                                            let program = program.clone();
                                            move |_| show_edit(program.clone())
                                        },
                                        "Edit"
                                    }
                                    button {
                                        class: "btn-link",
                                        onclick: {
                                            let program = program.clone();
                                            move |_| toggle_archived.call(program.clone())
                                        },
                                        if program.archived { "Restore" } else { "Archive" }
                                    }
                                    button {
                                        class: "btn-link",
                                        style: "color: var(--danger-bg);",
                                        onclick: {
                                            let program = program.clone();
                                            move |_| show_delete(program.clone())
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

fn render_dialog(
    dialog: Signal<DialogState>,
    form: Signal<ProgramForm>,
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
                title: "New Program",
                confirm_text: "Create",
                submitting: submitting(),
                error: form_error(),
                on_confirm: on_save,
                on_cancel,
                ProgramFields { form }
            }
        },
        DialogState::Edit { .. } => rsx! {
            FormDialog {
                title: "Edit Program",
                confirm_text: "Save",
                submitting: submitting(),
                error: form_error(),
                on_confirm: on_save,
                on_cancel,
                ProgramFields { form }
            }
        },
        DialogState::Delete { name, .. } => rsx! {
            ConfirmDialog {
                title: "Delete Program",
                message: format!(
                    "Delete \"{name}\"? Its courses, rosters, and attendance history go with it."
                ),
                confirm_text: "Delete",
                is_dangerous: true,
                submitting: submitting(),
                on_confirm: on_delete,
                on_cancel,
            }
        },
    }
}

#[component]
fn ProgramFields(form: Signal<ProgramForm>) -> Element {
    let mut form = form;
    rsx! {
        Field {
            label: "Name",
            input {
                class: "input",
                value: "{form.read().name}",
                autofocus: true,
                oninput: move |e| form.write().name = e.value(),
            }
        }
        Field {
            label: "Arabic name",
            input {
                class: "input",
                dir: "rtl",
                value: "{form.read().name_ar}",
                oninput: move |e| form.write().name_ar = e.value(),
            }
        }
        Field {
            label: "Description",
            input {
                class: "input",
                value: "{form.read().description}",
                oninput: move |e| form.write().description = e.value(),
            }
        }
        Field {
            label: "Capacity",
            input {
                class: "input",
                r#type: "number",
                min: "1",
                value: "{form.read().capacity}",
                oninput: move |e| form.write().capacity = e.value(),
            }
        }
        Field {
            label: "Monthly fee ({DEFAULT_CURRENCY})",
            input {
                class: "input",
                placeholder: "150.00",
                value: "{form.read().monthly_fee}",
                oninput: move |e| form.write().monthly_fee = e.value(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> ProgramForm {
        ProgramForm {
            name: "Football U12".to_string(),
            name_ar: "كرة القدم تحت 12".to_string(),
            description: String::new(),
            capacity: "20".to_string(),
            monthly_fee: "250.00".to_string(),
        }
    }

    #[test]
    fn amount_input_roundtrips() {
        assert_eq!(amount_input_value(15_050), "150.50");
        assert_eq!(parse_amount_minor(&amount_input_value(99)), Some(99));
    }

    #[test]
    fn amount_input_keeps_the_sign_out_of_the_cents() {
        assert_eq!(amount_input_value(-150), "-1.50");
        assert_eq!(amount_input_value(-9), "-0.09");
    }

    #[test]
    fn validation_requires_both_names() {
        let mut form = valid_form();
        form.name_ar = "  ".to_string();
        let error = validate_form(&form).unwrap_err();
        assert!(error.contains("Arabic name"));
    }

    #[test]
    fn validation_bounds_capacity() {
        let mut form = valid_form();
        form.capacity = "0".to_string();
        assert!(validate_form(&form).is_err());

        form.capacity = "501".to_string();
        assert!(validate_form(&form).is_err());

        form.capacity = "500".to_string();
        assert!(validate_form(&form).is_ok());
    }

    #[test]
    fn validation_rejects_garbled_fees() {
        let mut form = valid_form();
        form.monthly_fee = "two hundred".to_string();
        let error = validate_form(&form).unwrap_err();
        assert!(error.contains("Monthly fee"));
    }

    #[test]
    fn draft_trims_and_drops_blank_description() {
        let mut form = valid_form();
        form.name = "  Football U12  ".to_string();
        let draft = validate_form(&form).expect("valid form");
        assert_eq!(draft.name, "Football U12");
        assert_eq!(draft.description, None);
        assert_eq!(draft.monthly_fee_minor, 25_000);

        let request = build_create_request("a1", draft);
        assert_eq!(request.academy_id, "a1");
        assert_eq!(request.capacity, 20);
    }

    #[test]
    fn archive_flip_snapshots_and_restores() {
        let program = Program {
            id: "p1".to_string(),
            academy_id: "a1".to_string(),
            name: "Swim".to_string(),
            name_ar: "سباحة".to_string(),
            description: None,
            capacity: 15,
            monthly_fee_minor: 30_000,
            archived: false,
            created_at: chrono::Utc::now(),
        };
        let mut programs = vec![program];

        let snapshot = apply_archived(&mut programs, "p1", true).expect("row exists");
        assert!(programs[0].archived);
        assert!(!snapshot.archived);

        restore_row(&mut programs, snapshot);
        assert!(!programs[0].archived);

        assert!(apply_archived(&mut programs, "nope", true).is_none());
    }
}
