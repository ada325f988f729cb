//! Course management screen
//!
//! Courses live under a program. Creating one can also generate its
//! session schedule: pick training weekdays and a length in weeks, and
//! the drafts go to the bulk session-plan action right after the course
//! is created. The two writes are separate actions, so a schedule
//! failure leaves the course in place; the error says so.

use chrono::{Datelike, Duration, NaiveDate};
use dioxus::prelude::*;

use shared_types::{empty_to_none, valid_hhmm, Course, Program};

use crate::api::courses as courses_api;
use crate::api::courses::{CreateCourseRequest, UpdateCourseRequest};
use crate::api::programs as programs_api;
use crate::api::session_plans as session_plans_api;
use crate::api::session_plans::SessionPlanDraft;
use crate::scope::TaskScope;
use crate::session;
use crate::store::STORE;
use crate::toast;
use crate::widgets::{ConfirmDialog, EmptyState, ErrorBanner, Field, FormDialog};

const WEEKDAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

#[derive(Debug, Clone, PartialEq)]
enum DialogState {
    None,
    Create,
    Edit { course: Course },
    Delete { id: String, name: String },
}

#[derive(Debug, Clone, Default, PartialEq)]
struct CourseForm {
    name: String,
    name_ar: String,
    coach: String,
    start_date: String,
    gen_enabled: bool,
    gen_weeks: String,
    /// Monday-first, matching WEEKDAY_LABELS
    gen_weekdays: [bool; 7],
    gen_start_time: String,
    gen_duration: String,
    gen_location: String,
}

impl CourseForm {
    fn new_today() -> Self {
        Self {
            start_date: session::today_local().to_string(),
            gen_weeks: "8".to_string(),
            gen_duration: "60".to_string(),
            ..Self::default()
        }
    }

    fn from_course(course: &Course) -> Self {
        Self {
            name: course.name.clone(),
            name_ar: course.name_ar.clone(),
            coach: course.coach.clone().unwrap_or_default(),
            start_date: course.start_date.to_string(),
            gen_weeks: "8".to_string(),
            gen_duration: "60".to_string(),
            ..Self::default()
        }
    }
}

/// Validated course fields plus any generated schedule drafts.
#[derive(Debug, Clone, PartialEq)]
struct CourseDraft {
    name: String,
    name_ar: String,
    coach: Option<String>,
    start_date: NaiveDate,
    schedule: Vec<SessionPlanDraft>,
}

fn validate_form(form: &CourseForm) -> Result<CourseDraft, String> {
    let name = form.name.trim();
    let name_ar = form.name_ar.trim();
    if name.is_empty() || name_ar.is_empty() {
        return Err("Name and Arabic name are required".to_string());
    }
    let start_date: NaiveDate = form
        .start_date
        .trim()
        .parse()
        .map_err(|_| "Start date is required".to_string())?;

    let schedule = if form.gen_enabled {
        let weeks: u32 = form
            .gen_weeks
            .trim()
            .parse()
            .map_err(|_| "Schedule length must be a whole number of weeks".to_string())?;
        if !(1..=52).contains(&weeks) {
            return Err("Schedule length must be 1 to 52 weeks".to_string());
        }
        if !form.gen_weekdays.iter().any(|&picked| picked) {
            return Err("Pick at least one training day".to_string());
        }
        let duration: u32 = form
            .gen_duration
            .trim()
            .parse()
            .map_err(|_| "Session duration must be minutes".to_string())?;
        if !(15..=480).contains(&duration) {
            return Err("Session duration must be 15 to 480 minutes".to_string());
        }
        let start_time = empty_to_none(&form.gen_start_time);
        if let Some(time) = &start_time {
            if !valid_hhmm(time) {
                return Err("Start time must look like 17:30".to_string());
            }
        }
        generate_schedule(
            start_date,
            weeks,
            &form.gen_weekdays,
            start_time,
            duration,
            empty_to_none(&form.gen_location),
        )
    } else {
        Vec::new()
    };

    Ok(CourseDraft {
        name: name.to_string(),
        name_ar: name_ar.to_string(),
        coach: empty_to_none(&form.coach),
        start_date,
        schedule,
    })
}

/// Walk the window day by day, emitting a draft for every picked
/// weekday. Titles are numbered in date order.
fn generate_schedule(
    start: NaiveDate,
    weeks: u32,
    weekdays: &[bool; 7],
    start_time: Option<String>,
    duration_min: u32,
    location: Option<String>,
) -> Vec<SessionPlanDraft> {
    let mut drafts = Vec::new();
    for offset in 0..(i64::from(weeks) * 7) {
        let date = start + Duration::days(offset);
        let index = date.weekday().num_days_from_monday() as usize;
        if weekdays[index] {
            drafts.push(SessionPlanDraft {
                title: format!("Session {}", drafts.len() + 1),
                date,
                start_time: start_time.clone(),
                duration_min,
                location: location.clone(),
            });
        }
    }
    drafts
}

fn apply_archived(courses: &mut [Course], id: &str, archived: bool) -> Option<Course> {
    let course = courses.iter_mut().find(|c| c.id == id)?;
    let snapshot = course.clone();
    course.archived = archived;
    Some(snapshot)
}

fn restore_row(courses: &mut [Course], snapshot: Course) {
    if let Some(course) = courses.iter_mut().find(|c| c.id == snapshot.id) {
        *course = snapshot;
    }
}

fn replace_row(courses: &mut [Course], updated: Course) {
    if let Some(course) = courses.iter_mut().find(|c| c.id == updated.id) {
        *course = updated;
    }
}

#[component]
pub fn CoursesScreen() -> Element {
    let mut programs = use_signal(Vec::<Program>::new);
    let mut program_id = use_signal(|| None::<String>);
    let mut courses = use_signal(Vec::<Course>::new);
    let mut loading = use_signal(|| false);
    let mut load_error = use_signal(|| None::<String>);
    let mut dialog = use_signal(|| DialogState::None);
    let mut form = use_signal(CourseForm::default);
    let mut form_error = use_signal(|| None::<String>);
    let mut submitting = use_signal(|| false);

    let mut loaded_academy = use_signal(|| None::<Option<String>>);
    let mut loaded_program = use_signal(|| None::<Option<String>>);

    let scope = use_hook(TaskScope::new);
    {
        let scope = scope.clone();
        use_drop(move || scope.retire());
    }

    let load_courses = use_callback({
        let scope = scope.clone();
        move |_: ()| {
            let Some(program) = program_id() else {
                courses.set(Vec::new());
                return;
            };
            let token = scope.begin();
            spawn(async move {
                loading.set(true);
                match courses_api::list_courses(&program).await {
                    Ok(list) => {
                        if !token.is_live() {
                            return;
                        }
                        courses.set(list);
                        load_error.set(None);
                    }
                    Err(e) => {
                        if !token.is_live() {
                            return;
                        }
                        dioxus_logger::tracing::error!("Failed to load courses: {e}");
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
            programs.set(Vec::new());
            courses.set(Vec::new());
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
    use_effect(move || {
        let program = program_id();
        if loaded_program() == Some(program.clone()) {
            return;
        }
        loaded_program.set(Some(program));
        load_courses.call(());
    });

    let show_create = move |_| {
        form.set(CourseForm::new_today());
        form_error.set(None);
        dialog.set(DialogState::Create);
    };

    let mut show_edit = move |course: Course| {
        form.set(CourseForm::from_course(&course));
        form_error.set(None);
        dialog.set(DialogState::Edit { course });
    };

    let mut show_delete = move |course: Course| {
        let locale = STORE.read().locale;
        dialog.set(DialogState::Delete {
            id: course.id.clone(),
            name: course.display_name(locale).to_string(),
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
            let academy = STORE.read().active_academy_id.clone();
            let current_dialog = dialog();
            let program = program_id();
            let scope = scope.clone();
            submitting.set(true);
            spawn(async move {
                match current_dialog {
                    DialogState::Create => {
                        let (Some(academy), Some(program)) = (academy, program) else {
                            submitting.set(false);
                            form_error.set(Some("Select a program first".to_string()));
                            return;
                        };
                        let request = CreateCourseRequest {
                            academy_id: academy,
                            program_id: program,
                            name: draft.name,
                            name_ar: draft.name_ar,
                            coach: draft.coach,
                            start_date: draft.start_date,
                        };
                        let created = courses_api::create_course(&request).await;
                        if !scope.is_alive() {
                            return;
                        }
                        let course = match created {
                            Ok(course) => course,
                            Err(e) => {
                                dioxus_logger::tracing::error!("Course create failed: {e}");
                                form_error.set(Some(e.user_message().to_string()));
                                submitting.set(false);
                                return;
                            }
                        };
                        if draft.schedule.is_empty() {
                            toast::push_success("Course created");
                        } else {
                            // Separate action; the course above is already
                            // persisted even if this one fails.
                            match session_plans_api::create_session_plans(
                                &course.id,
                                &draft.schedule,
                            )
                            .await
                            {
                                Ok(plans) => toast::push_success(format!(
                                    "Course created with {} sessions",
                                    plans.len()
                                )),
                                Err(e) => {
                                    dioxus_logger::tracing::error!(
                                        "Schedule create failed for course {}: {e}",
                                        course.id
                                    );
                                    toast::push_error(format!(
                                        "Course created, but the schedule was not: {}",
                                        e.user_message()
                                    ));
                                }
                            }
                            if !scope.is_alive() {
                                return;
                            }
                        }
                        submitting.set(false);
                        dialog.set(DialogState::None);
                        load_courses.call(());
                    }
                    DialogState::Edit { course } => {
                        let request = UpdateCourseRequest {
                            name: draft.name,
                            name_ar: draft.name_ar,
                            coach: draft.coach,
                            start_date: draft.start_date,
                        };
                        let result = courses_api::update_course(&course.id, &request).await;
                        if !scope.is_alive() {
                            return;
                        }
                        match result {
                            Ok(_) => {
                                submitting.set(false);
                                dialog.set(DialogState::None);
                                toast::push_success("Course saved");
                                load_courses.call(());
                            }
                            Err(e) => {
                                dioxus_logger::tracing::error!("Course save failed: {e}");
                                form_error.set(Some(e.user_message().to_string()));
                                submitting.set(false);
                            }
                        }
                    }
                    _ => submitting.set(false),
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
                match courses_api::delete_course(&id).await {
                    Ok(()) => {
                        if !scope.is_alive() {
                            return;
                        }
                        submitting.set(false);
                        dialog.set(DialogState::None);
                        toast::push_success("Course deleted");
                        load_courses.call(());
                    }
                    Err(e) => {
                        if !scope.is_alive() {
                            return;
                        }
                        dioxus_logger::tracing::error!("Course delete failed: {e}");
                        toast::push_error(e.user_message());
                        submitting.set(false);
                    }
                }
            });
        }
    });

    let toggle_archived = use_callback({
        let scope = scope.clone();
        move |course: Course| {
            let desired = !course.archived;
            let Some(snapshot) = apply_archived(&mut courses.write(), &course.id, desired) else {
                return;
            };
            let scope = scope.clone();
            spawn(async move {
                match courses_api::set_course_archived(&course.id, desired).await {
                    Ok(updated) => {
                        if !scope.is_alive() {
                            return;
                        }
                        replace_row(&mut courses.write(), updated);
                    }
                    Err(e) => {
                        if !scope.is_alive() {
                            return;
                        }
                        dioxus_logger::tracing::error!("Archive toggle failed: {e}");
                        restore_row(&mut courses.write(), snapshot);
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
            h2 { class: "screen-title", "Courses" }

            if let Some(message) = load_error() {
                ErrorBanner {
                    message,
                    on_dismiss: move |_| load_error.set(None),
                }
            }

            div {
                class: "toolbar",
                select {
                    class: "select",
                    style: "max-width: 240px;",
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
                button {
                    class: "btn btn-primary",
                    disabled: program_id().is_none(),
                    onclick: show_create,
                    "+ New Course"
                }
            }

            if courses.read().is_empty() && !loading() {
                EmptyState { message: "No courses in this program yet." }
            } else {
                table {
                    class: "data-table",
                    thead {
                        tr {
                            th { "Name" }
                            th { "Coach" }
                            th { "Starts" }
                            th { "Status" }
                            th { "" }
                        }
                    }
                    tbody {
                        for course in courses() {
                            tr {
                                key: "{course.id}",
                                td { "{course.display_name(locale)}" }
                                td {
                                    class: "row-muted",
                                    {course.coach.clone().unwrap_or_default()}
                                }
                                td { class: "row-muted", "{course.start_date}" }
                                td {
                                    if course.archived {
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
                                            let course = course.clone();
                                            move |_| show_edit(course.clone())
                                        },
                                        "Edit"
                                    }
                                    button {
                                        class: "btn-link",
                                        onclick: {
                                            let course = course.clone();
                                            move |_| toggle_archived.call(course.clone())
                                        },
                                        if course.archived { "Restore" } else { "Archive" }
                                    }
                                    button {
                                        class: "btn-link",
                                        style: "color: var(--danger-bg);",
                                        onclick: {
                                            let course = course.clone();
                                            move |_| show_delete(course.clone())
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
    form: Signal<CourseForm>,
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
                title: "New Course",
                confirm_text: "Create",
                submitting: submitting(),
                error: form_error(),
                on_confirm: on_save,
                on_cancel,
                CourseFields { form, with_generator: true }
            }
        },
        DialogState::Edit { .. } => rsx! {
            FormDialog {
                title: "Edit Course",
                confirm_text: "Save",
                submitting: submitting(),
                error: form_error(),
                on_confirm: on_save,
                on_cancel,
                CourseFields { form, with_generator: false }
            }
        },
        DialogState::Delete { name, .. } => rsx! {
            ConfirmDialog {
                title: "Delete Course",
                message: format!("Delete \"{name}\"? Its session plans and attendance go with it."),
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
fn CourseFields(form: Signal<CourseForm>, with_generator: bool) -> Element {
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
            label: "Coach",
            input {
                class: "input",
                value: "{form.read().coach}",
                oninput: move |e| form.write().coach = e.value(),
            }
        }
        Field {
            label: "Start date",
            input {
                class: "input",
                r#type: "date",
                value: "{form.read().start_date}",
                oninput: move |e| form.write().start_date = e.value(),
            }
        }

        if with_generator {
            label {
                style: "display: flex; align-items: center; gap: 0.375rem; margin: 0.75rem 0; font-size: 0.875rem;",
                input {
                    r#type: "checkbox",
                    checked: form.read().gen_enabled,
                    onchange: move |e| form.write().gen_enabled = e.checked(),
                }
                "Generate a session schedule"
            }
            if form.read().gen_enabled {
                div {
                    style: "display: flex; gap: 0.375rem; margin-bottom: 0.75rem; flex-wrap: wrap;",
                    for (index, day) in WEEKDAY_LABELS.iter().enumerate() {
                        label {
                            style: "display: flex; align-items: center; gap: 0.25rem; font-size: 0.8125rem;",
                            input {
                                r#type: "checkbox",
                                checked: form.read().gen_weekdays[index],
                                onchange: move |e| form.write().gen_weekdays[index] = e.checked(),
                            }
                            "{day}"
                        }
                    }
                }
                Field {
                    label: "Weeks",
                    input {
                        class: "input",
                        r#type: "number",
                        min: "1",
                        max: "52",
                        value: "{form.read().gen_weeks}",
                        oninput: move |e| form.write().gen_weeks = e.value(),
                    }
                }
                Field {
                    label: "Start time",
                    input {
                        class: "input",
                        r#type: "time",
                        value: "{form.read().gen_start_time}",
                        oninput: move |e| form.write().gen_start_time = e.value(),
                    }
                }
                Field {
                    label: "Duration (minutes)",
                    input {
                        class: "input",
                        r#type: "number",
                        min: "15",
                        value: "{form.read().gen_duration}",
                        oninput: move |e| form.write().gen_duration = e.value(),
                    }
                }
                Field {
                    label: "Location",
                    input {
                        class: "input",
                        value: "{form.read().gen_location}",
                        oninput: move |e| form.write().gen_location = e.value(),
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monday() -> NaiveDate {
        // 2025-03-03 is a Monday
        NaiveDate::from_ymd_opt(2025, 3, 3).expect("valid date")
    }

    fn schedule_form() -> CourseForm {
        CourseForm {
            name: "U12 Evening Group".to_string(),
            name_ar: "مجموعة المساء".to_string(),
            coach: String::new(),
            start_date: monday().to_string(),
            gen_enabled: true,
            gen_weeks: "2".to_string(),
            gen_weekdays: [true, false, true, false, false, false, false],
            gen_start_time: "17:30".to_string(),
            gen_duration: "60".to_string(),
            gen_location: "Field A".to_string(),
        }
    }

    #[test]
    fn generator_emits_picked_weekdays_in_date_order() {
        let mut weekdays = [false; 7];
        weekdays[0] = true; // Mon
        weekdays[2] = true; // Wed
        let drafts = generate_schedule(monday(), 2, &weekdays, None, 60, None);

        let dates: Vec<String> = drafts.iter().map(|d| d.date.to_string()).collect();
        assert_eq!(dates, ["2025-03-03", "2025-03-05", "2025-03-10", "2025-03-12"]);
        assert_eq!(drafts[0].title, "Session 1");
        assert_eq!(drafts[3].title, "Session 4");
    }

    #[test]
    fn generator_window_is_exactly_weeks_times_seven_days() {
        let mut weekdays = [false; 7];
        weekdays[6] = true; // Sun
        // Starting Monday, one week covers exactly one Sunday
        let drafts = generate_schedule(monday(), 1, &weekdays, None, 45, None);
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].date.to_string(), "2025-03-09");
    }

    #[test]
    fn generator_stamps_time_and_location_on_every_draft() {
        let mut weekdays = [false; 7];
        weekdays[4] = true; // Fri
        let drafts = generate_schedule(
            monday(),
            3,
            &weekdays,
            Some("17:30".to_string()),
            90,
            Some("Field A".to_string()),
        );
        assert_eq!(drafts.len(), 3);
        assert!(drafts
            .iter()
            .all(|d| d.start_time.as_deref() == Some("17:30")
                && d.location.as_deref() == Some("Field A")
                && d.duration_min == 90));
    }

    #[test]
    fn validation_produces_the_schedule() {
        let draft = validate_form(&schedule_form()).expect("valid form");
        assert_eq!(draft.schedule.len(), 4);
        assert_eq!(draft.coach, None);
    }

    #[test]
    fn validation_requires_a_training_day_when_generating() {
        let mut form = schedule_form();
        form.gen_weekdays = [false; 7];
        let error = validate_form(&form).unwrap_err();
        assert!(error.contains("training day"));
    }

    #[test]
    fn validation_bounds_weeks_and_duration() {
        let mut form = schedule_form();
        form.gen_weeks = "53".to_string();
        assert!(validate_form(&form).is_err());

        let mut form = schedule_form();
        form.gen_duration = "10".to_string();
        assert!(validate_form(&form).is_err());
    }

    #[test]
    fn validation_checks_the_time_format() {
        let mut form = schedule_form();
        form.gen_start_time = "5pm".to_string();
        assert!(validate_form(&form).is_err());

        form.gen_start_time = String::new();
        let draft = validate_form(&form).expect("time is optional");
        assert!(draft.schedule.iter().all(|d| d.start_time.is_none()));
    }

    #[test]
    fn validation_skips_the_generator_when_disabled() {
        let mut form = schedule_form();
        form.gen_enabled = false;
        form.gen_weeks = "not a number".to_string();
        let draft = validate_form(&form).expect("generator fields ignored");
        assert!(draft.schedule.is_empty());
    }
}
