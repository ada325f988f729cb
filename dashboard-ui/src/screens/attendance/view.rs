//! Attendance sheet component
//!
//! Selector chain: active academy -> program -> course -> date. Edits
//! queue locally and flush after the idle window; see the module docs.

use chrono::NaiveDate;
use dioxus::prelude::*;
use futures_util::future::join;
use gloo_timers::future::TimeoutFuture;

use shared_types::AttendanceStatus;

use crate::api::attendance as attendance_api;
use crate::api::courses as courses_api;
use crate::api::players as players_api;
use crate::api::programs as programs_api;
use crate::scope::TaskScope;
use crate::session;
use crate::store::STORE;
use crate::toast;
use crate::widgets::{EmptyState, ErrorBanner};

use super::logic;
use super::types::{
    PendingFlush, SaveState, SheetKey, SheetRow, FLUSH_WAIT_MS, IDLE_FLUSH_MS, STATUS_CHOICES,
};

#[component]
pub fn AttendanceScreen() -> Element {
    // Selector chain
    let mut programs = use_signal(Vec::<shared_types::Program>::new);
    let mut program_id = use_signal(|| None::<String>);
    let mut courses = use_signal(Vec::<shared_types::Course>::new);
    let mut course_id = use_signal(|| None::<String>);
    let mut date = use_signal(session::today_local);

    // Sheet state
    let mut rows = use_signal(Vec::<SheetRow>::new);
    // The sheet the rows were loaded for; edits queue under this key
    let mut rows_sheet = use_signal(|| None::<SheetKey>);
    let mut pending = use_signal(PendingFlush::default);
    let mut save_state = use_signal(|| SaveState::Clean);
    let mut flushing = use_signal(|| false);
    let mut edit_epoch = use_signal(|| 0u64);

    let mut loading = use_signal(|| false);
    let mut load_error = use_signal(|| None::<String>);

    // Chain guards so each effect only reacts to a real change
    let mut loaded_academy = use_signal(|| None::<Option<String>>);
    let mut loaded_program = use_signal(|| None::<Option<String>>);
    let mut loaded_sheet = use_signal(|| None::<(String, NaiveDate)>);

    let scope = use_hook(TaskScope::new);
    {
        let scope = scope.clone();
        use_drop(move || scope.retire());
    }

    // Drain the queued marks and save them to the sheet they were made
    // on. When a flush is already running the queue is left intact; the
    // armed idle timer retries once that flush settles, still under the
    // queue's own sheet key.
    let run_flush = use_callback({
        let scope = scope.clone();
        move |_: ()| {
            if flushing() {
                return;
            }
            let (sheet, marks) = logic::take_flush(&mut pending.write());
            let Some((course, day)) = sheet else {
                return;
            };
            let snapshot = logic::snapshot_rows(&rows.read(), &marks);
            flushing.set(true);
            save_state.set(SaveState::Saving);
            let scope = scope.clone();
            spawn(async move {
                let result = attendance_api::save_attendance(&course, day, &marks).await;
                if !scope.is_alive() {
                    return;
                }
                flushing.set(false);
                // The user may have moved to another course or day while
                // the request was in flight; only touch rows that still
                // belong to the flushed sheet.
                let same_sheet = rows_sheet() == Some((course.clone(), day));
                match result {
                    Ok(records) => {
                        if same_sheet {
                            logic::apply_saved_records(&mut rows.write(), &records);
                        }
                        if !pending.read().is_empty() {
                            save_state.set(SaveState::Dirty);
                            return;
                        }
                        save_state.set(SaveState::Saved);
                        // Clear the "Saved" flash after 2 seconds
                        let scope = scope.clone();
                        spawn(async move {
                            TimeoutFuture::new(2000).await;
                            if scope.is_alive() && matches!(save_state(), SaveState::Saved) {
                                save_state.set(SaveState::Clean);
                            }
                        });
                    }
                    Err(e) => {
                        dioxus_logger::tracing::error!("Attendance flush failed: {e}");
                        if same_sheet {
                            logic::restore_rows(&mut rows.write(), snapshot);
                        }
                        save_state.set(SaveState::Failed(e.user_message().to_string()));
                        toast::push_error(e.user_message());
                    }
                }
            });
        }
    });

    // Restart the idle window. The flush only happens once the newest
    // timer survives the window with no later edit behind it.
    let schedule_flush = use_callback({
        let scope = scope.clone();
        move |_: ()| {
            let my_epoch = edit_epoch() + 1;
            edit_epoch.set(my_epoch);
            let scope = scope.clone();
            spawn(async move {
                TimeoutFuture::new(IDLE_FLUSH_MS).await;
                if !scope.is_alive() || edit_epoch() != my_epoch {
                    return;
                }
                // One flush at a time; wait for the running one to settle
                while flushing() {
                    TimeoutFuture::new(FLUSH_WAIT_MS).await;
                    if !scope.is_alive() || edit_epoch() != my_epoch {
                        return;
                    }
                }
                run_flush.call(());
            });
        }
    });

    let on_status = use_callback(move |(player_id, status): (String, AttendanceStatus)| {
        let Some(sheet) = rows_sheet() else {
            return;
        };
        let touched = logic::set_status(
            &mut rows.write(),
            &mut pending.write(),
            &sheet,
            &player_id,
            status,
        );
        if touched {
            save_state.set(SaveState::Dirty);
            schedule_flush.call(());
        }
    });

    let on_note = use_callback(move |(player_id, note): (String, String)| {
        let Some(sheet) = rows_sheet() else {
            return;
        };
        let touched = logic::set_note(
            &mut rows.write(),
            &mut pending.write(),
            &sheet,
            &player_id,
            note,
        );
        if touched {
            save_state.set(SaveState::Dirty);
            schedule_flush.call(());
        }
    });

    let load_sheet = use_callback({
        let scope = scope.clone();
        move |(course, day): (String, NaiveDate)| {
            let token = scope.begin();
            spawn(async move {
                loading.set(true);
                let (roster, records) = join(
                    players_api::list_course_roster(&course),
                    attendance_api::get_attendance(&course, day),
                )
                .await;
                if !token.is_live() {
                    return;
                }
                match roster.and_then(|roster| records.map(|records| (roster, records))) {
                    Ok((roster, records)) => {
                        let key = (course.clone(), day);
                        rows.set(logic::build_rows(roster, &records));
                        rows_sheet.set(Some(key.clone()));
                        // Marks queued for another sheet stay queued;
                        // the armed timer still owes them a flush
                        if pending.read().is_for(&key) {
                            pending.write().clear();
                        }
                        if pending.read().is_empty() {
                            save_state.set(SaveState::Clean);
                        }
                        load_error.set(None);
                    }
                    Err(e) => {
                        dioxus_logger::tracing::error!("Failed to load the attendance sheet: {e}");
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
            if !pending.read().is_empty() {
                run_flush.call(());
            }
            loaded_academy.set(Some(academy.clone()));
            program_id.set(None);
            course_id.set(None);
            programs.set(Vec::new());
            courses.set(Vec::new());
            rows.set(Vec::new());
            rows_sheet.set(None);
            if pending.read().is_empty() {
                save_state.set(SaveState::Clean);
            }
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
            rows.set(Vec::new());
            rows_sheet.set(None);
            let Some(program) = program else {
                return;
            };
            let token = scope.begin();
            spawn(async move {
                match courses_api::list_courses(&program).await {
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

    // Reload the sheet when the course or date changes
    use_effect(move || {
        let key = course_id().map(|course| (course, date()));
        if loaded_sheet() == key {
            return;
        }
        loaded_sheet.set(key.clone());
        let Some((course, day)) = key else {
            rows.set(Vec::new());
            rows_sheet.set(None);
            return;
        };
        load_sheet.call((course, day));
    });

    let locale = STORE.read().locale;
    let day = date();

    rsx! {
        div {
            h2 { class: "screen-title", "Attendance" }

            if let Some(message) = load_error() {
                ErrorBanner {
                    message,
                    on_dismiss: move |_| load_error.set(None),
                }
            }

            div {
                class: "toolbar",
                div {
                    style: "display: flex; gap: 0.5rem; flex-wrap: wrap; flex: 1;",
                    select {
                        class: "select",
                        style: "max-width: 200px;",
                        disabled: programs.read().is_empty(),
                        onchange: move |e| {
                            run_flush.call(());
                            program_id.set(Some(e.value()));
                        },
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
                        onchange: move |e| {
                            run_flush.call(());
                            course_id.set(Some(e.value()));
                        },
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
                    input {
                        class: "input",
                        style: "max-width: 170px;",
                        r#type: "date",
                        value: "{day}",
                        onchange: move |e| {
                            if let Ok(picked) = e.value().parse::<NaiveDate>() {
                                run_flush.call(());
                                date.set(picked);
                            }
                        },
                    }
                }
                div {
                    style: "display: flex; align-items: center; gap: 0.5rem;",
                    span { class: "save-state", {save_label(&save_state())} }
                    button {
                        class: "btn",
                        disabled: flushing() || pending.read().is_empty(),
                        onclick: move |_| run_flush.call(()),
                        "Save now"
                    }
                }
            }

            if loading() {
                p { class: "row-muted", "Loading sheet..." }
            } else if rows.read().is_empty() {
                EmptyState {
                    message: "No players to mark. Pick a program and course with a roster.",
                }
            } else {
                p {
                    class: "row-muted",
                    "{logic::present_count(&rows.read())} of {rows.read().len()} present"
                }
                table {
                    class: "data-table",
                    thead {
                        tr {
                            th { "Player" }
                            th { "Age" }
                            th { "Status" }
                            th { "Note" }
                        }
                    }
                    tbody {
                        for row in rows() {
                            tr {
                                key: "{row.player.id}",
                                td { "{row.player.display_name(locale)}" }
                                td {
                                    class: "row-muted",
                                    {row.player.age_on(day).map(|a| a.to_string()).unwrap_or_else(|| "-".to_string())}
                                }
                                td {
                                    class: "status-cell",
                                    for status in STATUS_CHOICES {
                                        button {
                                            class: if row.marked && row.status == status { "status-btn selected" } else { "status-btn" },
                                            onclick: {
                                                let id = row.player.id.clone();
                                                move |_| on_status.call((id.clone(), status))
                                            },
                                            "{status.label()}"
                                        }
                                    }
                                }
                                td {
                                    input {
                                        class: "input",
                                        style: "max-width: 220px;",
                                        placeholder: "Note",
                                        value: "{row.note}",
                                        oninput: {
                                            let id = row.player.id.clone();
                                            move |e| on_note.call((id.clone(), e.value()))
                                        },
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn save_label(state: &SaveState) -> String {
    match state {
        SaveState::Clean => String::new(),
        SaveState::Dirty => "Unsaved marks".to_string(),
        SaveState::Saving => "Saving...".to_string(),
        SaveState::Saved => "Saved".to_string(),
        SaveState::Failed(message) => format!("Save failed: {message}"),
    }
}
