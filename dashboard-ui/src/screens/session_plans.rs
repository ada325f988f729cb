//! Session plan screen
//!
//! Flat list of a course's scheduled sessions, ordered by date and
//! start time regardless of how the server returns them. Completion is
//! a per-row optimistic toggle; the rest is dialog CRUD like the other
//! screens.

use chrono::NaiveDate;
use dioxus::prelude::*;

use shared_types::{empty_to_none, valid_hhmm, Program, SessionPlan};

use crate::api::programs as programs_api;
use crate::api::session_plans as session_plans_api;
use crate::api::session_plans::{SessionPlanDraft, UpdateSessionPlanRequest};
use crate::scope::TaskScope;
use crate::session;
use crate::store::STORE;
use crate::toast;
use crate::widgets::{ConfirmDialog, EmptyState, ErrorBanner, Field, FormDialog};

#[derive(Debug, Clone, PartialEq)]
enum DialogState {
    None,
    Create,
    Edit { plan: SessionPlan },
    Delete { id: String, title: String },
}

#[derive(Debug, Clone, Default, PartialEq)]
struct PlanForm {
    title: String,
    date: String,
    start_time: String,
    duration: String,
    location: String,
}

impl PlanForm {
    fn new_today() -> Self {
        Self {
            date: session::today_local().to_string(),
            duration: "60".to_string(),
            ..Self::default()
        }
    }

    fn from_plan(plan: &SessionPlan) -> Self {
        Self {
            title: plan.title.clone(),
            date: plan.date.to_string(),
            start_time: plan.start_time.clone().unwrap_or_default(),
            duration: plan.duration_min.to_string(),
            location: plan.location.clone().unwrap_or_default(),
        }
    }
}

fn validate_form(form: &PlanForm) -> Result<SessionPlanDraft, String> {
    let title = form.title.trim();
    if title.is_empty() {
        return Err("Title is required".to_string());
    }
    let date: NaiveDate = form
        .date
        .trim()
        .parse()
        .map_err(|_| "Date is required".to_string())?;
    let duration_min: u32 = form
        .duration
        .trim()
        .parse()
        .map_err(|_| "Duration must be minutes".to_string())?;
    if !(15..=480).contains(&duration_min) {
        return Err("Duration must be 15 to 480 minutes".to_string());
    }
    let start_time = empty_to_none(&form.start_time);
    if let Some(time) = &start_time {
        if !valid_hhmm(time) {
            return Err("Start time must look like 17:30".to_string());
        }
    }
    Ok(SessionPlanDraft {
        title: title.to_string(),
        date,
        start_time,
        duration_min,
        location: empty_to_none(&form.location),
    })
}

fn update_request_from(draft: SessionPlanDraft) -> UpdateSessionPlanRequest {
    UpdateSessionPlanRequest {
        title: draft.title,
        date: draft.date,
        start_time: draft.start_time,
        duration_min: draft.duration_min,
        location: draft.location,
    }
}

fn apply_completed(plans: &mut [SessionPlan], id: &str, completed: bool) -> Option<SessionPlan> {
    let plan = plans.iter_mut().find(|p| p.id == id)?;
    let snapshot = plan.clone();
    plan.completed = completed;
    Some(snapshot)
}

fn restore_row(plans: &mut [SessionPlan], snapshot: SessionPlan) {
    if let Some(plan) = plans.iter_mut().find(|p| p.id == snapshot.id) {
        *plan = snapshot;
    }
}

fn replace_row(plans: &mut [SessionPlan], updated: SessionPlan) {
    if let Some(plan) = plans.iter_mut().find(|p| p.id == updated.id) {
        *plan = updated;
    }
}

fn remove_row(plans: &mut Vec<SessionPlan>, id: &str) {
    plans.retain(|p| p.id != id);
}

/// The schedule as rendered: earliest date first, then by start time
/// within a day, sessions with no time ahead of timed ones.
fn order_plans(plans: &[SessionPlan]) -> Vec<SessionPlan> {
    let mut ordered = plans.to_vec();
    ordered.sort_by(|a, b| (a.date, &a.start_time).cmp(&(b.date, &b.start_time)));
    ordered
}

#[component]
pub fn SessionPlansScreen() -> Element {
    let mut programs = use_signal(Vec::<Program>::new);
    let mut program_id = use_signal(|| None::<String>);
    let mut courses = use_signal(Vec::<shared_types::Course>::new);
    let mut course_id = use_signal(|| None::<String>);
    let mut plans = use_signal(Vec::<SessionPlan>::new);
    let mut loading = use_signal(|| false);
    let mut load_error = use_signal(|| None::<String>);
    let mut dialog = use_signal(|| DialogState::None);
    let mut form = use_signal(PlanForm::default);
    let mut form_error = use_signal(|| None::<String>);
    let mut submitting = use_signal(|| false);

    let mut loaded_academy = use_signal(|| None::<Option<String>>);
    let mut loaded_program = use_signal(|| None::<Option<String>>);
    let mut loaded_course = use_signal(|| None::<Option<String>>);

    let scope = use_hook(TaskScope::new);
    {
        let scope = scope.clone();
        use_drop(move || scope.retire());
    }

    let load_plans = use_callback({
        let scope = scope.clone();
        move |_: ()| {
            let Some(course) = course_id() else {
                plans.set(Vec::new());
                return;
            };
            let token = scope.begin();
            spawn(async move {
                loading.set(true);
                match session_plans_api::list_session_plans(&course).await {
                    Ok(list) => {
                        if !token.is_live() {
                            return;
                        }
                        plans.set(list);
                        load_error.set(None);
                    }
                    Err(e) => {
                        if !token.is_live() {
                            return;
                        }
                        dioxus_logger::tracing::error!("Failed to load session plans: {e}");
                        load_error.set(Some(e.user_message().to_string()));
                    }
                }
                loading.set(false);
            });
        }
    });

    // Reload programs when the active academy changes
    use_effect({
        let scope = scope.clone();
        move || {
            let academy = STORE.read().active_academy_id.clone();
            if loaded_academy() == Some(academy.clone()) {
                return;
            }
            loaded_academy.set(Some(academy.clone()));
            program_id.set(None);
            course_id.set(None);
            programs.set(Vec::new());
            courses.set(Vec::new());
            plans.set(Vec::new());
            let Some(academy) = academy else {
                return;
            };
            let token = scope.begin();
            spawn(async move {
                match programs_api::list_programs(&academy).await {
                    Ok(list) => {
                        if !token.is_live() {
                            return;
                        }
                        if program_id().is_none() {
                            program_id.set(list.first().map(|p| p.id.clone()));
                        }
                        programs.set(list);
                    }
                    Err(e) => {
                        if !token.is_live() {
                            return;
                        }
                        dioxus_logger::tracing::error!("Failed to load programs: {e}");
                        load_error.set(Some(e.user_message().to_string()));
                    }
                }
            });
        }
    });

    // Reload courses when the program changes
    use_effect({
        let scope = scope.clone();
        move || {
            let program = program_id();
            if loaded_program() == Some(program.clone()) {
                return;
            }
            loaded_program.set(Some(program.clone()));
            course_id.set(None);
            courses.set(Vec::new());
            plans.set(Vec::new());
            let Some(program) = program else {
                return;
            };
            let token = scope.begin();
            spawn(async move {
                match crate::api::courses::list_courses(&program).await {
                    Ok(list) => {
                        if !token.is_live() {
                            return;
                        }
                        if course_id().is_none() {
                            course_id.set(list.first().map(|c| c.id.clone()));
                        }
                        courses.set(list);
                    }
                    Err(e) => {
                        if !token.is_live() {
                            return;
                        }
                        dioxus_logger::tracing::error!("Failed to load courses: {e}");
                        load_error.set(Some(e.user_message().to_string()));
                    }
                }
            });
        }
    });

    // Reload plans when the course changes
    use_effect(move || {
        let course = course_id();
        if loaded_course() == Some(course.clone()) {
            return;
        }
        loaded_course.set(Some(course));
        load_plans.call(());
    });

    let show_create = move |_| {
        form.set(PlanForm::new_today());
        form_error.set(None);
        dialog.set(DialogState::Create);
    };

    let mut show_edit = move |plan: SessionPlan| {
        form.set(PlanForm::from_plan(&plan));
        form_error.set(None);
        dialog.set(DialogState::Edit { plan });
    };

    let mut show_delete = move |plan: &SessionPlan| {
        dialog.set(DialogState::Delete {
            id: plan.id.clone(),
            title: plan.title.clone(),
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
            let current_dialog = dialog();
            let course = course_id();
            let scope = scope.clone();
            submitting.set(true);
            spawn(async move {
                let result = match &current_dialog {
                    DialogState::Create => {
                        let Some(course) = course else {
                            if scope.is_alive() {
                                submitting.set(false);
                                form_error.set(Some("Select a course first".to_string()));
                            }
                            return;
                        };
                        session_plans_api::create_session_plans(&course, &[draft])
                            .await
                            .map(|_| ())
                    }
                    DialogState::Edit { plan } => {
                        session_plans_api::update_session_plan(&plan.id, &update_request_from(draft))
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
                        toast::push_success("Session saved");
                        load_plans.call(());
                    }
                    Err(e) => {
                        dioxus_logger::tracing::error!("Session save failed: {e}");
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
                match session_plans_api::delete_session_plan(&id).await {
                    Ok(()) => {
                        if !scope.is_alive() {
                            return;
                        }
                        submitting.set(false);
                        dialog.set(DialogState::None);
                        remove_row(&mut plans.write(), &id);
                        toast::push_success("Session deleted");
                    }
                    Err(e) => {
                        if !scope.is_alive() {
                            return;
                        }
                        dioxus_logger::tracing::error!("Session delete failed: {e}");
                        toast::push_error(e.user_message());
                        submitting.set(false);
                    }
                }
            });
        }
    });

    let toggle_completed = use_callback({
        let scope = scope.clone();
        move |plan: SessionPlan| {
            let desired = !plan.completed;
            let Some(snapshot) = apply_completed(&mut plans.write(), &plan.id, desired) else {
                return;
            };
            let scope = scope.clone();
            spawn(async move {
                match session_plans_api::set_session_plan_completed(&plan.id, desired).await {
                    Ok(updated) => {
                        if !scope.is_alive() {
                            return;
                        }
                        replace_row(&mut plans.write(), updated);
                    }
                    Err(e) => {
                        if !scope.is_alive() {
                            return;
                        }
                        dioxus_logger::tracing::error!("Completed toggle failed: {e}");
                        restore_row(&mut plans.write(), snapshot);
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

    rsx! {
        div {
            h2 { class: "screen-title", "Session Plans" }

            if let Some(message) = load_error() {
                ErrorBanner {
                    message,
                    on_dismiss: move |_| load_error.set(None),
                }
            }

            div {
                class: "toolbar",
                div {
                    style: "display: flex; gap: 0.5rem; flex: 1; flex-wrap: wrap;",
                    select {
                        class: "select",
                        style: "max-width: 200px;",
                        disabled: programs.read().is_empty(),
                        onchange: move |e| program_id.set(Some(e.value())),
                        if programs.read().is_empty() {
                            option { value: "", "No programs" }
                        }
                        for program in programs() {
                            option {
                                value: "{program.id}",
                                selected: program_id().as_deref() == Some(program.id.as_str()),
                                "{program.display_name(locale)}"
                            }
                        }
                    }
                    select {
                        class: "select",
                        style: "max-width: 200px;",
                        disabled: courses.read().is_empty(),
                        onchange: move |e| course_id.set(Some(e.value())),
                        if courses.read().is_empty() {
                            option { value: "", "No courses" }
                        }
                        for course in courses() {
                            option {
                                value: "{course.id}",
                                selected: course_id().as_deref() == Some(course.id.as_str()),
                                "{course.display_name(locale)}"
                            }
                        }
                    }
                }
                button {
                    class: "btn btn-primary",
                    disabled: course_id().is_none(),
                    onclick: show_create,
                    "+ Add Session"
                }
            }

            if loading() {
                p { class: "row-muted", "Loading sessions..." }
            } else if plans.read().is_empty() {
                EmptyState {
                    message: "No sessions scheduled. Add one, or generate a schedule from the course dialog.",
                }
            } else {
                table {
                    class: "data-table",
                    thead {
                        tr {
                            th { "Done" }
                            th { "Title" }
                            th { "Date" }
                            th { "Time" }
                            th { "Minutes" }
                            th { "Location" }
                            th { "" }
                        }
                    }
                    tbody {
                        for plan in order_plans(&plans.read()) {
                            tr {
                                key: "{plan.id}",
                                td {
                                    input {
                                        r#type: "checkbox",
                                        checked: plan.completed,
                                        onchange: {
                                            let plan = plan.clone();
                                            move |_| toggle_completed.call(plan.clone())
                                        },
                                    }
                                }
                                td {
                                    class: if plan.completed { "row-muted" } else { "" },
                                    "{plan.title}"
                                }
                                td { class: "row-muted", "{plan.date}" }
                                td {
                                    class: "row-muted",
                                    {plan.start_time.clone().unwrap_or_default()}
                                }
                                td { class: "row-muted", "{plan.duration_min}" }
                                td {
                                    class: "row-muted",
                                    {plan.location.clone().unwrap_or_default()}
                                }
                                td {
                                    style: "text-align: end; white-space: nowrap;",
                                    button {
                                        class: "btn-link",
                                        onclick: {
                                            let plan = plan.clone();
                                            move |_| show_edit(plan.clone())
                                        },
                                        "Edit"
                                    }
                                    button {
                                        class: "btn-link",
                                        style: "color: var(--danger-bg);",
                                        onclick: {
                                            let plan = plan.clone();
                                            move |_| show_delete(&plan)
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
    form: Signal<PlanForm>,
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
                title: "Add Session",
                confirm_text: "Add",
                submitting: submitting(),
                error: form_error(),
                on_confirm: on_save,
                on_cancel,
                PlanFields { form }
            }
        },
        DialogState::Edit { .. } => rsx! {
            FormDialog {
                title: "Edit Session",
                confirm_text: "Save",
                submitting: submitting(),
                error: form_error(),
                on_confirm: on_save,
                on_cancel,
                PlanFields { form }
            }
        },
        DialogState::Delete { title, .. } => rsx! {
            ConfirmDialog {
                title: "Delete Session",
                message: format!("Delete \"{title}\" from the schedule?"),
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
fn PlanFields(form: Signal<PlanForm>) -> Element {
    let mut form = form;
    rsx! {
        Field {
            label: "Title",
            input {
                class: "input",
                value: "{form.read().title}",
                autofocus: true,
                oninput: move |e| form.write().title = e.value(),
            }
        }
        Field {
            label: "Date",
            input {
                class: "input",
                r#type: "date",
                value: "{form.read().date}",
                oninput: move |e| form.write().date = e.value(),
            }
        }
        Field {
            label: "Start time",
            input {
                class: "input",
                r#type: "time",
                value: "{form.read().start_time}",
                oninput: move |e| form.write().start_time = e.value(),
            }
        }
        Field {
            label: "Duration (minutes)",
            input {
                class: "input",
                r#type: "number",
                min: "15",
                value: "{form.read().duration}",
                oninput: move |e| form.write().duration = e.value(),
            }
        }
        Field {
            label: "Location",
            input {
                class: "input",
                value: "{form.read().location}",
                oninput: move |e| form.write().location = e.value(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(id: &str, completed: bool) -> SessionPlan {
        SessionPlan {
            id: id.to_string(),
            course_id: "c1".to_string(),
            title: format!("Session {id}"),
            date: NaiveDate::from_ymd_opt(2025, 4, 7).expect("valid date"),
            start_time: Some("17:30".to_string()),
            duration_min: 60,
            location: None,
            completed,
        }
    }

    fn valid_form() -> PlanForm {
        PlanForm {
            title: "Passing drills".to_string(),
            date: "2025-04-07".to_string(),
            start_time: "17:30".to_string(),
            duration: "60".to_string(),
            location: "  ".to_string(),
        }
    }

    #[test]
    fn validation_builds_a_draft_with_blank_optionals_dropped() {
        let draft = validate_form(&valid_form()).expect("valid form");
        assert_eq!(draft.title, "Passing drills");
        assert_eq!(draft.start_time.as_deref(), Some("17:30"));
        assert_eq!(draft.location, None);
    }

    #[test]
    fn validation_requires_title_and_parseable_date() {
        let mut form = valid_form();
        form.title = "   ".to_string();
        assert!(validate_form(&form).is_err());

        let mut form = valid_form();
        form.date = "next tuesday".to_string();
        assert!(validate_form(&form).is_err());
    }

    #[test]
    fn validation_bounds_duration_and_time_format() {
        let mut form = valid_form();
        form.duration = "500".to_string();
        assert!(validate_form(&form).is_err());

        let mut form = valid_form();
        form.start_time = "17-30".to_string();
        assert!(validate_form(&form).is_err());
    }

    #[test]
    fn completed_flip_snapshots_and_rolls_back() {
        let mut plans = vec![plan("p1", false), plan("p2", true)];

        let snapshot = apply_completed(&mut plans, "p1", true).expect("row exists");
        assert!(plans[0].completed);
        assert!(!snapshot.completed);

        restore_row(&mut plans, snapshot);
        assert!(!plans[0].completed);
        assert!(apply_completed(&mut plans, "ghost", true).is_none());
    }

    #[test]
    fn plans_render_in_date_then_time_order() {
        let mut late = plan("p1", false);
        late.date = NaiveDate::from_ymd_opt(2025, 4, 14).expect("valid date");
        let mut untimed = plan("p2", false);
        untimed.start_time = None;
        let mut morning = plan("p3", false);
        morning.start_time = Some("09:00".to_string());

        let ordered = order_plans(&[late, untimed, morning]);
        assert_eq!(ordered[0].id, "p2");
        assert_eq!(ordered[1].id, "p3");
        assert_eq!(ordered[2].id, "p1");
    }

    #[test]
    fn delete_removes_only_the_target_row() {
        let mut plans = vec![plan("p1", false), plan("p2", true)];
        remove_row(&mut plans, "p1");
        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].id, "p2");
    }
}
