//! Payments screen
//!
//! Payments are recorded against a player and move through a small
//! lifecycle: pending, paid, overdue, refunded. Status changes apply
//! optimistically and roll back from a snapshot if the server refuses.

use chrono::NaiveDate;
use dioxus::prelude::*;

use shared_types::{
    empty_to_none, format_amount, parse_amount_minor, Payment, PaymentMethod, PaymentStatus,
    Player, DEFAULT_CURRENCY,
};

use crate::api::payments as payments_api;
use crate::api::payments::RecordPaymentRequest;
use crate::api::players as players_api;
use crate::scope::TaskScope;
use crate::session;
use crate::store::STORE;
use crate::toast;
use crate::widgets::{ConfirmDialog, EmptyState, ErrorBanner, Field, FormDialog};

#[derive(Debug, Clone, PartialEq)]
enum DialogState {
    None,
    Record,
    Delete { id: String, label: String },
}

#[derive(Debug, Clone, Default, PartialEq)]
struct PaymentForm {
    player_id: String,
    amount: String,
    /// Empty string means not captured
    method: String,
    due_date: String,
    reference: String,
}

impl PaymentForm {
    fn new_today() -> Self {
        Self {
            due_date: session::today_local().to_string(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct PaymentDraft {
    player_id: String,
    amount_minor: i64,
    method: Option<PaymentMethod>,
    due_date: NaiveDate,
    reference: Option<String>,
}

fn validate_form(form: &PaymentForm) -> Result<PaymentDraft, String> {
    if form.player_id.trim().is_empty() {
        return Err("Pick a player".to_string());
    }
    let amount_minor = parse_amount_minor(&form.amount)
        .ok_or_else(|| "Amount must look like 250.00".to_string())?;
    if amount_minor == 0 {
        return Err("Amount must be more than zero".to_string());
    }
    let due_date: NaiveDate = form
        .due_date
        .trim()
        .parse()
        .map_err(|_| "Due date is required".to_string())?;
    Ok(PaymentDraft {
        player_id: form.player_id.trim().to_string(),
        amount_minor,
        method: parse_method(&form.method),
        due_date,
        reference: empty_to_none(&form.reference),
    })
}

fn parse_method(value: &str) -> Option<PaymentMethod> {
    match value {
        "cash" => Some(PaymentMethod::Cash),
        "card" => Some(PaymentMethod::Card),
        "transfer" => Some(PaymentMethod::Transfer),
        _ => None,
    }
}

fn method_label(method: Option<PaymentMethod>) -> &'static str {
    match method {
        Some(PaymentMethod::Cash) => "Cash",
        Some(PaymentMethod::Card) => "Card",
        Some(PaymentMethod::Transfer) => "Transfer",
        None => "—",
    }
}

fn status_value(status: PaymentStatus) -> &'static str {
    match status {
        PaymentStatus::Pending => "pending",
        PaymentStatus::Paid => "paid",
        PaymentStatus::Overdue => "overdue",
        PaymentStatus::Refunded => "refunded",
    }
}

fn parse_status(value: &str) -> Option<PaymentStatus> {
    match value {
        "pending" => Some(PaymentStatus::Pending),
        "paid" => Some(PaymentStatus::Paid),
        "overdue" => Some(PaymentStatus::Overdue),
        "refunded" => Some(PaymentStatus::Refunded),
        _ => None,
    }
}

fn status_pill(status: PaymentStatus) -> (&'static str, &'static str) {
    match status {
        PaymentStatus::Pending => ("pill pill-amber", "Pending"),
        PaymentStatus::Paid => ("pill pill-green", "Paid"),
        PaymentStatus::Overdue => ("pill pill-red", "Overdue"),
        PaymentStatus::Refunded => ("pill pill-gray", "Refunded"),
    }
}

fn build_request(academy_id: &str, draft: PaymentDraft) -> RecordPaymentRequest {
    RecordPaymentRequest {
        academy_id: academy_id.to_string(),
        player_id: draft.player_id,
        amount_minor: draft.amount_minor,
        currency: DEFAULT_CURRENCY.to_string(),
        method: draft.method,
        due_date: draft.due_date,
        reference: draft.reference,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct PaymentTotals {
    collected_minor: i64,
    outstanding_minor: i64,
    overdue_count: usize,
}

/// Refunded payments count toward neither collected nor outstanding.
fn totals(payments: &[Payment]) -> PaymentTotals {
    let mut sums = PaymentTotals::default();
    for payment in payments {
        match payment.status {
            PaymentStatus::Paid => sums.collected_minor += payment.amount_minor,
            PaymentStatus::Pending => sums.outstanding_minor += payment.amount_minor,
            PaymentStatus::Overdue => {
                sums.outstanding_minor += payment.amount_minor;
                sums.overdue_count += 1;
            }
            PaymentStatus::Refunded => {}
        }
    }
    sums
}

fn filter_payments(payments: &[Payment], status: Option<PaymentStatus>) -> Vec<Payment> {
    payments
        .iter()
        .filter(|p| status.map_or(true, |wanted| p.status == wanted))
        .cloned()
        .collect()
}

fn apply_status(payments: &mut [Payment], id: &str, status: PaymentStatus) -> Option<Payment> {
    let payment = payments.iter_mut().find(|p| p.id == id)?;
    if payment.status == status {
        return None;
    }
    let snapshot = payment.clone();
    payment.status = status;
    Some(snapshot)
}

fn restore_row(payments: &mut [Payment], snapshot: Payment) {
    if let Some(payment) = payments.iter_mut().find(|p| p.id == snapshot.id) {
        *payment = snapshot;
    }
}

fn replace_row(payments: &mut [Payment], updated: Payment) {
    if let Some(payment) = payments.iter_mut().find(|p| p.id == updated.id) {
        *payment = updated;
    }
}

#[component]
pub fn PaymentsScreen() -> Element {
    let mut payments = use_signal(Vec::<Payment>::new);
    let mut players = use_signal(Vec::<Player>::new);
    let mut loading = use_signal(|| false);
    let mut load_error = use_signal(|| None::<String>);
    let mut dialog = use_signal(|| DialogState::None);
    let mut form = use_signal(PaymentForm::default);
    let mut form_error = use_signal(|| None::<String>);
    let mut submitting = use_signal(|| false);
    let mut status_filter = use_signal(|| None::<PaymentStatus>);
    let mut loaded_academy = use_signal(|| None::<Option<String>>);

    let scope = use_hook(TaskScope::new);
    {
        let scope = scope.clone();
        use_drop(move || scope.retire());
    }

    let load_payments = use_callback({
        let scope = scope.clone();
        move |_: ()| {
            let Some(academy) = STORE.read().active_academy_id.clone() else {
                payments.set(Vec::new());
                return;
            };
            let token = scope.begin();
            spawn(async move {
                loading.set(true);
                match payments_api::list_payments(&academy).await {
                    Ok(list) => {
                        if !token.is_live() {
                            return;
                        }
                        payments.set(list);
                        load_error.set(None);
                    }
                    Err(e) => {
                        if !token.is_live() {
                            return;
                        }
                        dioxus_logger::tracing::error!("Failed to load payments: {e}");
                        load_error.set(Some(e.user_message().to_string()));
                    }
                }
                loading.set(false);
            });
        }
    });

    // Reload the ledger and the player dropdown when the academy changes
    use_effect({
        let scope = scope.clone();
        move || {
            let academy = STORE.read().active_academy_id.clone();
            if loaded_academy() == Some(academy.clone()) {
                return;
            }
            loaded_academy.set(Some(academy.clone()));
            players.set(Vec::new());
            load_payments.call(());
            let Some(academy) = academy else {
                return;
            };
            let scope = scope.clone();
            spawn(async move {
                match players_api::list_players(&academy).await {
                    Ok(list) => {
                        if !scope.is_alive() {
                            return;
                        }
                        players.set(list);
                    }
                    Err(e) => {
                        dioxus_logger::tracing::warn!("Failed to load players for payments: {e}");
                    }
                }
            });
        }
    });

    let show_record = move |_| {
        form.set(PaymentForm::new_today());
        form_error.set(None);
        dialog.set(DialogState::Record);
    };

    let mut show_delete = move |payment: Payment| {
        dialog.set(DialogState::Delete {
            id: payment.id.clone(),
            label: format!(
                "{} ({})",
                payment.player_name,
                format_amount(payment.amount_minor, &payment.currency)
            ),
        });
    };

    let confirm_record = use_callback({
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
            let scope = scope.clone();
            submitting.set(true);
            spawn(async move {
                match payments_api::record_payment(&build_request(&academy, draft)).await {
                    Ok(_) => {
                        if !scope.is_alive() {
                            return;
                        }
                        submitting.set(false);
                        dialog.set(DialogState::None);
                        toast::push_success("Payment recorded");
                        load_payments.call(());
                    }
                    Err(e) => {
                        if !scope.is_alive() {
                            return;
                        }
                        dioxus_logger::tracing::error!("Payment record failed: {e}");
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
                match payments_api::delete_payment(&id).await {
                    Ok(()) => {
                        if !scope.is_alive() {
                            return;
                        }
                        submitting.set(false);
                        dialog.set(DialogState::None);
                        toast::push_success("Payment deleted");
                        load_payments.call(());
                    }
                    Err(e) => {
                        if !scope.is_alive() {
                            return;
                        }
                        dioxus_logger::tracing::error!("Payment delete failed: {e}");
                        toast::push_error(e.user_message());
                        submitting.set(false);
                    }
                }
            });
        }
    });

    let change_status = use_callback({
        let scope = scope.clone();
        move |(id, status): (String, PaymentStatus)| {
            let Some(snapshot) = apply_status(&mut payments.write(), &id, status) else {
                return;
            };
            let scope = scope.clone();
            spawn(async move {
                match payments_api::update_payment_status(&id, status).await {
                    Ok(updated) => {
                        if !scope.is_alive() {
                            return;
                        }
                        replace_row(&mut payments.write(), updated);
                    }
                    Err(e) => {
                        if !scope.is_alive() {
                            return;
                        }
                        dioxus_logger::tracing::error!("Payment status change failed: {e}");
                        restore_row(&mut payments.write(), snapshot);
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

    let has_academy = STORE.read().active_academy_id.is_some();
    let all_payments = payments();
    let sums = totals(&all_payments);
    let visible = filter_payments(&all_payments, status_filter());

    rsx! {
        div {
            h2 { class: "screen-title", "Payments" }

            if let Some(message) = load_error() {
                ErrorBanner {
                    message,
                    on_dismiss: move |_| load_error.set(None),
                }
            }

            div {
                class: "stat-grid",
                div {
                    class: "card",
                    div { class: "stat-value", {format_amount(sums.collected_minor, DEFAULT_CURRENCY)} }
                    div { class: "stat-label", "Collected" }
                }
                div {
                    class: "card",
                    div { class: "stat-value", {format_amount(sums.outstanding_minor, DEFAULT_CURRENCY)} }
                    div { class: "stat-label", "Outstanding" }
                }
                div {
                    class: "card",
                    div { class: "stat-value", "{sums.overdue_count}" }
                    div { class: "stat-label", "Overdue" }
                }
            }

            div {
                class: "toolbar",
                select {
                    class: "select",
                    style: "width: 160px;",
                    onchange: move |e| status_filter.set(parse_status(&e.value())),
                    option { value: "all", "All statuses" }
                    option { value: "pending", "Pending" }
                    option { value: "paid", "Paid" }
                    option { value: "overdue", "Overdue" }
                    option { value: "refunded", "Refunded" }
                }
                button {
                    class: "btn btn-primary",
                    disabled: !has_academy,
                    onclick: show_record,
                    "+ Record Payment"
                }
            }

            if !has_academy {
                EmptyState { message: "Select an academy to see its payments." }
            } else if visible.is_empty() && !loading() {
                EmptyState { message: "No payments here yet." }
            } else {
                table {
                    class: "data-table",
                    thead {
                        tr {
                            th { "Player" }
                            th { "Amount" }
                            th { "Status" }
                            th { "Method" }
                            th { "Due" }
                            th { "Reference" }
                            th { "" }
                        }
                    }
                    tbody {
                        for payment in visible {
                            tr {
                                key: "{payment.id}",
                                td { "{payment.player_name}" }
                                td { {format_amount(payment.amount_minor, &payment.currency)} }
                                td {
                                    {
                                        let (class, label) = status_pill(payment.status);
                                        rsx! { span { class, "{label}" } }
                                    }
                                }
                                td { class: "row-muted", {method_label(payment.method)} }
                                td { class: "row-muted", "{payment.due_date}" }
                                td { class: "row-muted", {payment.reference.clone().unwrap_or_default()} }
                                td {
                                    style: "text-align: end; white-space: nowrap;",
                                    select {
                                        class: "select",
                                        style: "width: 120px; display: inline-block; margin-inline-end: 0.5rem;",
                                        value: status_value(payment.status),
                                        onchange: {
                                            let id = payment.id.clone();
                                            move |e: FormEvent| {
                                                if let Some(status) = parse_status(&e.value()) {
                                                    change_status.call((id.clone(), status));
                                                }
                                            }
                                        },
                                        option { value: "pending", "Pending" }
                                        option { value: "paid", "Paid" }
                                        option { value: "overdue", "Overdue" }
                                        option { value: "refunded", "Refunded" }
                                    }
                                    button {
                                        class: "btn-link",
                                        style: "color: var(--danger-bg);",
                                        onclick: {
                                            let payment = payment.clone();
                                            move |_| show_delete(payment.clone())
                                        },
                                        "Delete"
                                    }
                                }
                            }
                        }
                    }
                }
            }

            {render_dialog(dialog, form, players, form_error, submitting, confirm_record, confirm_delete, cancel_dialog)}
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn render_dialog(
    dialog: Signal<DialogState>,
    form: Signal<PaymentForm>,
    players: Signal<Vec<Player>>,
    form_error: Signal<Option<String>>,
    submitting: Signal<bool>,
    on_record: Callback<()>,
    on_delete: Callback<()>,
    on_cancel: Callback<()>,
) -> Element {
    match dialog() {
        DialogState::None => rsx! {},
        DialogState::Record => rsx! {
            FormDialog {
                title: "Record Payment",
                confirm_text: "Record",
                submitting: submitting(),
                error: form_error(),
                on_confirm: on_record,
                on_cancel,
                PaymentFields { form, players }
            }
        },
        DialogState::Delete { label, .. } => rsx! {
            ConfirmDialog {
                title: "Delete Payment",
                message: format!("Delete the payment for {label}? This cannot be undone."),
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
fn PaymentFields(form: Signal<PaymentForm>, players: Signal<Vec<Player>>) -> Element {
    let mut form = form;
    let locale = STORE.read().locale;
    rsx! {
        Field {
            label: "Player",
            select {
                class: "select",
                value: "{form.read().player_id}",
                onchange: move |e| form.write().player_id = e.value(),
                option { value: "", "Pick a player..." }
                for player in players() {
                    option {
                        value: "{player.id}",
                        selected: player.id == form.read().player_id,
                        "{player.display_name(locale)}"
                    }
                }
            }
        }
        Field {
            label: "Amount ({DEFAULT_CURRENCY})",
            input {
                class: "input",
                placeholder: "250.00",
                value: "{form.read().amount}",
                oninput: move |e| form.write().amount = e.value(),
            }
        }
        Field {
            label: "Method",
            select {
                class: "select",
                value: "{form.read().method}",
                onchange: move |e| form.write().method = e.value(),
                option { value: "", "Not captured" }
                option { value: "cash", "Cash" }
                option { value: "card", "Card" }
                option { value: "transfer", "Transfer" }
            }
        }
        Field {
            label: "Due date",
            input {
                class: "input",
                r#type: "date",
                value: "{form.read().due_date}",
                oninput: move |e| form.write().due_date = e.value(),
            }
        }
        Field {
            label: "Reference",
            input {
                class: "input",
                placeholder: "Invoice or transfer number",
                value: "{form.read().reference}",
                oninput: move |e| form.write().reference = e.value(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payment(id: &str, amount_minor: i64, status: PaymentStatus) -> Payment {
        Payment {
            id: id.to_string(),
            academy_id: "a1".to_string(),
            player_id: "p1".to_string(),
            player_name: "Sami".to_string(),
            amount_minor,
            currency: DEFAULT_CURRENCY.to_string(),
            status,
            method: None,
            due_date: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            paid_at: None,
            reference: None,
        }
    }

    fn valid_form() -> PaymentForm {
        PaymentForm {
            player_id: "p1".to_string(),
            amount: "250.00".to_string(),
            method: "cash".to_string(),
            due_date: "2026-09-01".to_string(),
            reference: String::new(),
        }
    }

    #[test]
    fn validation_requires_player_and_positive_amount() {
        let mut form = valid_form();
        form.player_id = String::new();
        assert!(validate_form(&form).unwrap_err().contains("player"));

        let mut form = valid_form();
        form.amount = "0".to_string();
        assert!(validate_form(&form).is_err());

        let mut form = valid_form();
        form.amount = "abc".to_string();
        assert!(validate_form(&form).is_err());
    }

    #[test]
    fn draft_carries_parsed_fields() {
        let draft = validate_form(&valid_form()).expect("valid form");
        assert_eq!(draft.amount_minor, 25_000);
        assert_eq!(draft.method, Some(PaymentMethod::Cash));
        assert_eq!(draft.reference, None);

        let request = build_request("a1", draft);
        assert_eq!(request.currency, DEFAULT_CURRENCY);
        assert_eq!(request.academy_id, "a1");
    }

    #[test]
    fn unknown_method_is_not_captured() {
        assert_eq!(parse_method(""), None);
        assert_eq!(parse_method("crypto"), None);
        assert_eq!(parse_method("transfer"), Some(PaymentMethod::Transfer));
    }

    #[test]
    fn totals_split_by_status() {
        let payments = vec![
            payment("p1", 10_000, PaymentStatus::Paid),
            payment("p2", 5_000, PaymentStatus::Pending),
            payment("p3", 7_500, PaymentStatus::Overdue),
            payment("p4", 99_999, PaymentStatus::Refunded),
        ];
        let sums = totals(&payments);
        assert_eq!(sums.collected_minor, 10_000);
        assert_eq!(sums.outstanding_minor, 12_500);
        assert_eq!(sums.overdue_count, 1);
    }

    #[test]
    fn filter_by_status() {
        let payments = vec![
            payment("p1", 10_000, PaymentStatus::Paid),
            payment("p2", 5_000, PaymentStatus::Pending),
        ];
        assert_eq!(filter_payments(&payments, None).len(), 2);
        let paid = filter_payments(&payments, Some(PaymentStatus::Paid));
        assert_eq!(paid.len(), 1);
        assert_eq!(paid[0].id, "p1");
    }

    #[test]
    fn status_flip_snapshots_and_restores() {
        let mut payments = vec![payment("p1", 10_000, PaymentStatus::Pending)];

        let snapshot =
            apply_status(&mut payments, "p1", PaymentStatus::Paid).expect("row exists");
        assert_eq!(payments[0].status, PaymentStatus::Paid);
        assert_eq!(snapshot.status, PaymentStatus::Pending);

        restore_row(&mut payments, snapshot);
        assert_eq!(payments[0].status, PaymentStatus::Pending);

        // Same-status change is a no-op, no call should be made
        assert!(apply_status(&mut payments, "p1", PaymentStatus::Pending).is_none());
        assert!(apply_status(&mut payments, "gone", PaymentStatus::Paid).is_none());
    }

    #[test]
    fn status_values_roundtrip() {
        for status in [
            PaymentStatus::Pending,
            PaymentStatus::Paid,
            PaymentStatus::Overdue,
            PaymentStatus::Refunded,
        ] {
            assert_eq!(parse_status(status_value(status)), Some(status));
        }
        assert_eq!(parse_status("all"), None);
    }
}
