//! Player roster screen
//!
//! Players belong to an academy and optionally to one program. The
//! roster is searchable by name or guardian phone. Players who leave
//! are archived, not deleted, so their attendance and payment history
//! stays intact.

use chrono::NaiveDate;
use dioxus::prelude::*;

use shared_types::{empty_to_none, Locale, Player, Program};

use crate::api::players as players_api;
use crate::api::players::{CreatePlayerRequest, UpdatePlayerRequest};
use crate::api::programs as programs_api;
use crate::scope::TaskScope;
use crate::session;
use crate::store::STORE;
use crate::toast;
use crate::widgets::{ConfirmDialog, EmptyState, ErrorBanner, Field, FormDialog};

#[derive(Debug, Clone, PartialEq)]
enum DialogState {
    None,
    Create,
    Edit { player: Player },
    Delete { id: String, name: String },
}

#[derive(Debug, Clone, Default, PartialEq)]
struct PlayerForm {
    name: String,
    name_ar: String,
    /// Empty string means unassigned
    program_id: String,
    guardian_phone: String,
    birth_date: String,
}

impl PlayerForm {
    fn from_player(player: &Player) -> Self {
        Self {
            name: player.name.clone(),
            name_ar: player.name_ar.clone(),
            program_id: player.program_id.clone().unwrap_or_default(),
            guardian_phone: player.guardian_phone.clone().unwrap_or_default(),
            birth_date: player
                .birth_date
                .map(|d| d.to_string())
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct PlayerDraft {
    name: String,
    name_ar: String,
    program_id: Option<String>,
    guardian_phone: Option<String>,
    birth_date: Option<NaiveDate>,
}

fn validate_form(form: &PlayerForm) -> Result<PlayerDraft, String> {
    let name = form.name.trim();
    let name_ar = form.name_ar.trim();
    if name.is_empty() || name_ar.is_empty() {
        return Err("Name and Arabic name are required".to_string());
    }
    let guardian_phone = empty_to_none(&form.guardian_phone);
    if let Some(phone) = &guardian_phone {
        if !valid_phone(phone) {
            return Err("Guardian phone must be a phone number".to_string());
        }
    }
    let birth_date = match form.birth_date.trim() {
        "" => None,
        raw => Some(
            raw.parse::<NaiveDate>()
                .map_err(|_| "Birth date must be a valid date".to_string())?,
        ),
    };
    Ok(PlayerDraft {
        name: name.to_string(),
        name_ar: name_ar.to_string(),
        program_id: empty_to_none(&form.program_id),
        guardian_phone,
        birth_date,
    })
}

/// At least seven digits, nothing but digits and common separators.
fn valid_phone(value: &str) -> bool {
    let digits = value.chars().filter(char::is_ascii_digit).count();
    digits >= 7
        && value
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | ' ' | '-'))
}

fn build_create_request(academy_id: &str, draft: PlayerDraft) -> CreatePlayerRequest {
    CreatePlayerRequest {
        academy_id: academy_id.to_string(),
        program_id: draft.program_id,
        name: draft.name,
        name_ar: draft.name_ar,
        guardian_phone: draft.guardian_phone,
        birth_date: draft.birth_date,
    }
}

fn build_update_request(draft: PlayerDraft) -> UpdatePlayerRequest {
    UpdatePlayerRequest {
        program_id: draft.program_id,
        name: draft.name,
        name_ar: draft.name_ar,
        guardian_phone: draft.guardian_phone,
        birth_date: draft.birth_date,
    }
}

/// Search matches either name, or the guardian phone. Arabic input is
/// matched as-is; lowercasing only affects the Latin fields.
fn filter_players(players: &[Player], search: &str, show_archived: bool) -> Vec<Player> {
    let raw = search.trim();
    let needle = raw.to_lowercase();
    players
        .iter()
        .filter(|p| show_archived || !p.archived)
        .filter(|p| {
            raw.is_empty()
                || p.name.to_lowercase().contains(&needle)
                || p.name_ar.contains(raw)
                || p.guardian_phone
                    .as_deref()
                    .is_some_and(|phone| phone.contains(raw))
        })
        .cloned()
        .collect()
}

fn program_label(programs: &[Program], id: Option<&str>, locale: Locale) -> String {
    id.and_then(|id| programs.iter().find(|p| p.id == id))
        .map(|p| p.display_name(locale).to_string())
        .unwrap_or_else(|| "—".to_string())
}

fn apply_archived(players: &mut [Player], id: &str, archived: bool) -> Option<Player> {
    let player = players.iter_mut().find(|p| p.id == id)?;
    let snapshot = player.clone();
    player.archived = archived;
    Some(snapshot)
}

fn restore_row(players: &mut [Player], snapshot: Player) {
    if let Some(player) = players.iter_mut().find(|p| p.id == snapshot.id) {
        *player = snapshot;
    }
}

fn replace_row(players: &mut [Player], updated: Player) {
    if let Some(player) = players.iter_mut().find(|p| p.id == updated.id) {
        *player = updated;
    }
}

#[component]
pub fn PlayersScreen() -> Element {
    let mut players = use_signal(Vec::<Player>::new);
    let mut programs = use_signal(Vec::<Program>::new);
    let mut loading = use_signal(|| false);
    let mut load_error = use_signal(|| None::<String>);
    let mut dialog = use_signal(|| DialogState::None);
    let mut form = use_signal(PlayerForm::default);
    let mut form_error = use_signal(|| None::<String>);
    let mut submitting = use_signal(|| false);
    let mut search = use_signal(String::new);
    let mut show_archived = use_signal(|| false);
    let mut loaded_academy = use_signal(|| None::<Option<String>>);

    let scope = use_hook(TaskScope::new);
    {
        let scope = scope.clone();
        use_drop(move || scope.retire());
    }

    let load_players = use_callback({
        let scope = scope.clone();
        move |_: ()| {
            let Some(academy) = STORE.read().active_academy_id.clone() else {
                players.set(Vec::new());
                return;
            };
            let token = scope.begin();
            spawn(async move {
                loading.set(true);
                match players_api::list_players(&academy).await {
                    Ok(list) => {
                        if !token.is_live() {
                            return;
                        }
                        players.set(list);
                        load_error.set(None);
                    }
                    Err(e) => {
                        if !token.is_live() {
                            return;
                        }
                        dioxus_logger::tracing::error!("Failed to load players: {e}");
                        load_error.set(Some(e.user_message().to_string()));
                    }
                }
                loading.set(false);
            });
        }
    });

    // Reload the roster and the program dropdown when the academy changes
    use_effect({
        let scope = scope.clone();
        move || {
            let academy = STORE.read().active_academy_id.clone();
            if loaded_academy() == Some(academy.clone()) {
                return;
            }
            loaded_academy.set(Some(academy.clone()));
            programs.set(Vec::new());
            load_players.call(());
            let Some(academy) = academy else {
                return;
            };
            let scope = scope.clone();
            spawn(async move {
                match programs_api::list_programs(&academy).await {
                    Ok(list) => {
                        if !scope.is_alive() {
                            return;
                        }
                        programs.set(list);
                    }
                    Err(e) => {
                        // The roster still renders; only the program
                        // column and dropdown degrade
                        dioxus_logger::tracing::warn!("Failed to load programs for roster: {e}");
                    }
                }
            });
        }
    });

    let show_create = move |_| {
        form.set(PlayerForm::default());
        form_error.set(None);
        dialog.set(DialogState::Create);
    };

    let mut show_edit = move |player: Player| {
        form.set(PlayerForm::from_player(&player));
        form_error.set(None);
        dialog.set(DialogState::Edit { player });
    };

    let mut show_delete = move |player: Player| {
        let locale = STORE.read().locale;
        dialog.set(DialogState::Delete {
            id: player.id.clone(),
            name: player.display_name(locale).to_string(),
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
                        players_api::create_player(&build_create_request(&academy, draft))
                            .await
                            .map(|_| ())
                    }
                    DialogState::Edit { player } => {
                        players_api::update_player(&player.id, &build_update_request(draft))
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
                        toast::push_success("Player saved");
                        load_players.call(());
                    }
                    Err(e) => {
                        dioxus_logger::tracing::error!("Player save failed: {e}");
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
                match players_api::delete_player(&id).await {
                    Ok(()) => {
                        if !scope.is_alive() {
                            return;
                        }
                        submitting.set(false);
                        dialog.set(DialogState::None);
                        toast::push_success("Player deleted");
                        load_players.call(());
                    }
                    Err(e) => {
                        if !scope.is_alive() {
                            return;
                        }
                        dioxus_logger::tracing::error!("Player delete failed: {e}");
                        toast::push_error(e.user_message());
                        submitting.set(false);
                    }
                }
            });
        }
    });

    let toggle_archived = use_callback({
        let scope = scope.clone();
        move |player: Player| {
            let desired = !player.archived;
            let Some(snapshot) = apply_archived(&mut players.write(), &player.id, desired) else {
                return;
            };
            let scope = scope.clone();
            spawn(async move {
                match players_api::set_player_archived(&player.id, desired).await {
                    Ok(updated) => {
                        if !scope.is_alive() {
                            return;
                        }
                        replace_row(&mut players.write(), updated);
                    }
                    Err(e) => {
                        if !scope.is_alive() {
                            return;
                        }
                        dioxus_logger::tracing::error!("Archive toggle failed: {e}");
                        restore_row(&mut players.write(), snapshot);
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
    let today = session::today_local();
    let visible = filter_players(&players(), &search(), show_archived());
    let program_list = programs();

    rsx! {
        div {
            h2 { class: "screen-title", "Players" }

            if let Some(message) = load_error() {
                ErrorBanner {
                    message,
                    on_dismiss: move |_| load_error.set(None),
                }
            }

            div {
                class: "toolbar",
                div {
                    style: "display: flex; gap: 0.5rem; flex: 1; max-width: 480px; align-items: center;",
                    input {
                        class: "input",
                        placeholder: "Search by name or phone...",
                        value: "{search}",
                        oninput: move |e| search.set(e.value()),
                    }
                    label {
                        class: "row-muted",
                        style: "display: flex; align-items: center; gap: 0.375rem; font-size: 0.875rem; white-space: nowrap;",
                        input {
                            r#type: "checkbox",
                            checked: show_archived(),
                            onchange: move |e| show_archived.set(e.checked()),
                        }
                        "Show archived"
                    }
                }
                button {
                    class: "btn btn-primary",
                    disabled: !has_academy,
                    onclick: show_create,
                    "+ New Player"
                }
            }

            if !has_academy {
                EmptyState { message: "Select an academy to manage its players." }
            } else if visible.is_empty() && !loading() {
                EmptyState { message: "No players match. Register the first one." }
            } else {
                table {
                    class: "data-table",
                    thead {
                        tr {
                            th { "Name" }
                            th { "Program" }
                            th { "Guardian phone" }
                            th { "Age" }
                            th { "Status" }
                            th { "" }
                        }
                    }
                    tbody {
                        for player in visible {
                            tr {
                                key: "{player.id}",
                                td { "{player.display_name(locale)}" }
                                td {
                                    class: "row-muted",
                                    {program_label(&program_list, player.program_id.as_deref(), locale)}
                                }
                                td {
                                    class: "row-muted",
                                    {player.guardian_phone.clone().unwrap_or_default()}
                                }
                                td {
                                    class: "row-muted",
                                    {player.age_on(today).map(|age| age.to_string()).unwrap_or_default()}
                                }
                                td {
                                    if player.archived {
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
                                            let player = player.clone();
                                            move |_| show_edit(player.clone())
                                        },
                                        "Edit"
                                    }
                                    button {
                                        class: "btn-link",
                                        onclick: {
                                            let player = player.clone();
                                            move |_| toggle_archived.call(player.clone())
                                        },
                                        if player.archived { "Restore" } else { "Archive" }
                                    }
                                    button {
                                        class: "btn-link",
                                        style: "color: var(--danger-bg);",
                                        onclick: {
                                            let player = player.clone();
                                            move |_| show_delete(player.clone())
                                        },
                                        "Delete"
                                    }
                                }
                            }
                        }
                    }
                }
            }

            {render_dialog(dialog, form, programs, form_error, submitting, confirm_save, confirm_delete, cancel_dialog)}
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn render_dialog(
    dialog: Signal<DialogState>,
    form: Signal<PlayerForm>,
    programs: Signal<Vec<Program>>,
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
                title: "New Player",
                confirm_text: "Create",
                submitting: submitting(),
                error: form_error(),
                on_confirm: on_save,
                on_cancel,
                PlayerFields { form, programs }
            }
        },
        DialogState::Edit { .. } => rsx! {
            FormDialog {
                title: "Edit Player",
                confirm_text: "Save",
                submitting: submitting(),
                error: form_error(),
                on_confirm: on_save,
                on_cancel,
                PlayerFields { form, programs }
            }
        },
        DialogState::Delete { name, .. } => rsx! {
            ConfirmDialog {
                title: "Delete Player",
                message: format!(
                    "Delete \"{name}\"? Attendance and payment history go with them. \
                     Archiving keeps the history."
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
fn PlayerFields(form: Signal<PlayerForm>, programs: Signal<Vec<Program>>) -> Element {
    let mut form = form;
    let locale = STORE.read().locale;
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
            label: "Program",
            select {
                class: "select",
                value: "{form.read().program_id}",
                onchange: move |e| form.write().program_id = e.value(),
                option { value: "", "Unassigned" }
                for program in programs() {
                    option {
                        value: "{program.id}",
                        selected: program.id == form.read().program_id,
                        "{program.display_name(locale)}"
                    }
                }
            }
        }
        Field {
            label: "Guardian phone",
            input {
                class: "input",
                placeholder: "+966 5x xxx xxxx",
                value: "{form.read().guardian_phone}",
                oninput: move |e| form.write().guardian_phone = e.value(),
            }
        }
        Field {
            label: "Birth date",
            input {
                class: "input",
                r#type: "date",
                value: "{form.read().birth_date}",
                oninput: move |e| form.write().birth_date = e.value(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn player(id: &str, name: &str, archived: bool) -> Player {
        Player {
            id: id.to_string(),
            academy_id: "a1".to_string(),
            program_id: None,
            name: name.to_string(),
            name_ar: String::new(),
            guardian_phone: None,
            birth_date: None,
            archived,
            created_at: Utc::now(),
        }
    }

    fn valid_form() -> PlayerForm {
        PlayerForm {
            name: "Sami Al-Harbi".to_string(),
            name_ar: "سامي الحربي".to_string(),
            program_id: String::new(),
            guardian_phone: "+966 550 123 456".to_string(),
            birth_date: "2014-06-01".to_string(),
        }
    }

    #[test]
    fn phone_validation() {
        assert!(valid_phone("+966 550 123 456"));
        assert!(valid_phone("0550123456"));
        assert!(valid_phone("055-012-3456"));
        assert!(!valid_phone("12345"));
        assert!(!valid_phone("call me maybe"));
        assert!(!valid_phone("0550123456x"));
    }

    #[test]
    fn validation_requires_both_names() {
        let mut form = valid_form();
        form.name = String::new();
        assert!(validate_form(&form).is_err());

        let mut form = valid_form();
        form.name_ar = "  ".to_string();
        assert!(validate_form(&form).is_err());
    }

    #[test]
    fn validation_rejects_bad_phone_and_date() {
        let mut form = valid_form();
        form.guardian_phone = "nope".to_string();
        assert!(validate_form(&form).unwrap_err().contains("phone"));

        let mut form = valid_form();
        form.birth_date = "01/06/2014".to_string();
        assert!(validate_form(&form).unwrap_err().contains("date"));
    }

    #[test]
    fn optional_fields_become_none_when_blank() {
        let mut form = valid_form();
        form.guardian_phone = String::new();
        form.birth_date = "  ".to_string();
        form.program_id = String::new();
        let draft = validate_form(&form).expect("valid form");
        assert_eq!(draft.guardian_phone, None);
        assert_eq!(draft.birth_date, None);
        assert_eq!(draft.program_id, None);

        let request = build_create_request("a1", draft);
        assert_eq!(request.academy_id, "a1");
        assert_eq!(request.program_id, None);
    }

    #[test]
    fn filter_hides_archived_by_default() {
        let players = vec![player("p1", "Sami", false), player("p2", "Omar", true)];
        let visible = filter_players(&players, "", false);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "p1");

        let all = filter_players(&players, "", true);
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn filter_matches_name_and_phone() {
        let mut with_phone = player("p1", "Sami", false);
        with_phone.guardian_phone = Some("0550123456".to_string());
        let players = vec![with_phone, player("p2", "Omar", false)];

        assert_eq!(filter_players(&players, "sami", false).len(), 1);
        assert_eq!(filter_players(&players, "0550", false).len(), 1);
        assert_eq!(filter_players(&players, "zzz", false).len(), 0);
    }

    #[test]
    fn filter_matches_arabic_names() {
        let mut arabic = player("p1", "Sami", false);
        arabic.name_ar = "سامي".to_string();
        let players = vec![arabic];
        assert_eq!(filter_players(&players, "سامي", false).len(), 1);
    }

    #[test]
    fn program_label_falls_back_to_dash() {
        let program = Program {
            id: "pr1".to_string(),
            academy_id: "a1".to_string(),
            name: "Football U12".to_string(),
            name_ar: String::new(),
            description: None,
            capacity: 20,
            monthly_fee_minor: 25_000,
            archived: false,
            created_at: Utc::now(),
        };
        let programs = vec![program];
        assert_eq!(
            program_label(&programs, Some("pr1"), Locale::En),
            "Football U12"
        );
        assert_eq!(program_label(&programs, Some("gone"), Locale::En), "—");
        assert_eq!(program_label(&programs, None, Locale::En), "—");
    }
}
