//! Overview screen
//!
//! Headline numbers for the active academy, derived from the same
//! collections the detail screens use. Everything here is read-only.

use dioxus::prelude::*;

use shared_types::{format_amount, Payment, PaymentStatus, Player, Program, DEFAULT_CURRENCY};

use crate::api::payments as payments_api;
use crate::api::players as players_api;
use crate::api::programs as programs_api;
use crate::scope::TaskScope;
use crate::store::STORE;
use crate::widgets::{EmptyState, ErrorBanner};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct OverviewStats {
    active_players: usize,
    active_programs: usize,
    collected_minor: i64,
    outstanding_minor: i64,
    overdue_count: usize,
}

fn compute_stats(programs: &[Program], players: &[Player], payments: &[Payment]) -> OverviewStats {
    let mut stats = OverviewStats {
        active_players: players.iter().filter(|p| !p.archived).count(),
        active_programs: programs.iter().filter(|p| !p.archived).count(),
        ..OverviewStats::default()
    };
    for payment in payments {
        match payment.status {
            PaymentStatus::Paid => stats.collected_minor += payment.amount_minor,
            PaymentStatus::Pending => stats.outstanding_minor += payment.amount_minor,
            PaymentStatus::Overdue => {
                stats.outstanding_minor += payment.amount_minor;
                stats.overdue_count += 1;
            }
            PaymentStatus::Refunded => {}
        }
    }
    stats
}

/// Unsettled payments, soonest due first, capped for the card.
fn next_due(payments: &[Payment], cap: usize) -> Vec<Payment> {
    let mut due: Vec<Payment> = payments
        .iter()
        .filter(|p| matches!(p.status, PaymentStatus::Pending | PaymentStatus::Overdue))
        .cloned()
        .collect();
    due.sort_by_key(|p| p.due_date);
    due.truncate(cap);
    due
}

#[component]
pub fn OverviewScreen() -> Element {
    let mut programs = use_signal(Vec::<Program>::new);
    let mut players = use_signal(Vec::<Player>::new);
    let mut payments = use_signal(Vec::<Payment>::new);
    let mut loading = use_signal(|| false);
    let mut load_error = use_signal(|| None::<String>);
    let mut loaded_academy = use_signal(|| None::<Option<String>>);

    let scope = use_hook(TaskScope::new);
    {
        let scope = scope.clone();
        use_drop(move || scope.retire());
    }

    // One load for all three collections; the first failure wins the
    // banner and the rest of the numbers still render from what arrived
    use_effect({
        let scope = scope.clone();
        move || {
            let academy = STORE.read().active_academy_id.clone();
            if loaded_academy() == Some(academy.clone()) {
                return;
            }
            loaded_academy.set(Some(academy.clone()));
            let Some(academy) = academy else {
                programs.set(Vec::new());
                players.set(Vec::new());
                payments.set(Vec::new());
                return;
            };
            let token = scope.begin();
            spawn(async move {
                loading.set(true);
                let mut first_error = None::<String>;

                match programs_api::list_programs(&academy).await {
                    Ok(list) => {
                        if !token.is_live() {
                            return;
                        }
                        programs.set(list);
                    }
                    Err(e) => {
                        dioxus_logger::tracing::error!("Overview programs load failed: {e}");
                        first_error.get_or_insert_with(|| e.user_message().to_string());
                    }
                }
                match players_api::list_players(&academy).await {
                    Ok(list) => {
                        if !token.is_live() {
                            return;
                        }
                        players.set(list);
                    }
                    Err(e) => {
                        dioxus_logger::tracing::error!("Overview players load failed: {e}");
                        first_error.get_or_insert_with(|| e.user_message().to_string());
                    }
                }
                match payments_api::list_payments(&academy).await {
                    Ok(list) => {
                        if !token.is_live() {
                            return;
                        }
                        payments.set(list);
                    }
                    Err(e) => {
                        dioxus_logger::tracing::error!("Overview payments load failed: {e}");
                        first_error.get_or_insert_with(|| e.user_message().to_string());
                    }
                }

                if !token.is_live() {
                    return;
                }
                load_error.set(first_error);
                loading.set(false);
            });
        }
    });

    let has_academy = STORE.read().active_academy_id.is_some();
    let stats = compute_stats(&programs(), &players(), &payments());
    let due_soon = next_due(&payments(), 5);

    rsx! {
        div {
            h2 { class: "screen-title", "Overview" }

            if let Some(message) = load_error() {
                ErrorBanner {
                    message,
                    on_dismiss: move |_| load_error.set(None),
                }
            }

            if !has_academy {
                EmptyState { message: "Select an academy to see its numbers." }
            } else {
                div {
                    class: "stat-grid",
                    div {
                        class: "card",
                        div { class: "stat-value", "{stats.active_players}" }
                        div { class: "stat-label", "Active players" }
                    }
                    div {
                        class: "card",
                        div { class: "stat-value", "{stats.active_programs}" }
                        div { class: "stat-label", "Active programs" }
                    }
                    div {
                        class: "card",
                        div { class: "stat-value", {format_amount(stats.collected_minor, DEFAULT_CURRENCY)} }
                        div { class: "stat-label", "Collected" }
                    }
                    div {
                        class: "card",
                        div { class: "stat-value", {format_amount(stats.outstanding_minor, DEFAULT_CURRENCY)} }
                        div { class: "stat-label", "Outstanding" }
                    }
                    div {
                        class: "card",
                        div { class: "stat-value", "{stats.overdue_count}" }
                        div { class: "stat-label", "Overdue payments" }
                    }
                }

                h3 {
                    style: "margin: 1.5rem 0 0.5rem 0; font-size: 1rem;",
                    "Payments due soon"
                }
                if due_soon.is_empty() && !loading() {
                    EmptyState { message: "Nothing outstanding. The ledger is clear." }
                } else {
                    table {
                        class: "data-table",
                        thead {
                            tr {
                                th { "Player" }
                                th { "Amount" }
                                th { "Due" }
                                th { "Status" }
                            }
                        }
                        tbody {
                            for payment in due_soon {
                                tr {
                                    key: "{payment.id}",
                                    td { "{payment.player_name}" }
                                    td { {format_amount(payment.amount_minor, &payment.currency)} }
                                    td { class: "row-muted", "{payment.due_date}" }
                                    td {
                                        if payment.status == PaymentStatus::Overdue {
                                            span { class: "pill pill-red", "Overdue" }
                                        } else {
                                            span { class: "pill pill-amber", "Pending" }
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    fn program(id: &str, archived: bool) -> Program {
        Program {
            id: id.to_string(),
            academy_id: "a1".to_string(),
            name: "Football".to_string(),
            name_ar: String::new(),
            description: None,
            capacity: 20,
            monthly_fee_minor: 25_000,
            archived,
            created_at: Utc::now(),
        }
    }

    fn player(id: &str, archived: bool) -> Player {
        Player {
            id: id.to_string(),
            academy_id: "a1".to_string(),
            program_id: None,
            name: "Sami".to_string(),
            name_ar: String::new(),
            guardian_phone: None,
            birth_date: None,
            archived,
            created_at: Utc::now(),
        }
    }

    fn payment(id: &str, amount_minor: i64, status: PaymentStatus, due: &str) -> Payment {
        Payment {
            id: id.to_string(),
            academy_id: "a1".to_string(),
            player_id: "p1".to_string(),
            player_name: "Sami".to_string(),
            amount_minor,
            currency: DEFAULT_CURRENCY.to_string(),
            status,
            method: None,
            due_date: due.parse::<NaiveDate>().unwrap(),
            paid_at: None,
            reference: None,
        }
    }

    #[test]
    fn stats_skip_archived_rows_and_refunds() {
        let programs = vec![program("pr1", false), program("pr2", true)];
        let players = vec![
            player("p1", false),
            player("p2", false),
            player("p3", true),
        ];
        let payments = vec![
            payment("pay1", 10_000, PaymentStatus::Paid, "2026-09-01"),
            payment("pay2", 5_000, PaymentStatus::Overdue, "2026-08-01"),
            payment("pay3", 9_999, PaymentStatus::Refunded, "2026-07-01"),
        ];

        let stats = compute_stats(&programs, &players, &payments);
        assert_eq!(stats.active_programs, 1);
        assert_eq!(stats.active_players, 2);
        assert_eq!(stats.collected_minor, 10_000);
        assert_eq!(stats.outstanding_minor, 5_000);
        assert_eq!(stats.overdue_count, 1);
    }

    #[test]
    fn empty_collections_produce_zero_stats() {
        assert_eq!(compute_stats(&[], &[], &[]), OverviewStats::default());
    }

    #[test]
    fn next_due_sorts_and_caps() {
        let payments = vec![
            payment("pay1", 1_000, PaymentStatus::Pending, "2026-09-15"),
            payment("pay2", 2_000, PaymentStatus::Overdue, "2026-08-01"),
            payment("pay3", 3_000, PaymentStatus::Paid, "2026-01-01"),
            payment("pay4", 4_000, PaymentStatus::Pending, "2026-09-01"),
        ];

        let due = next_due(&payments, 5);
        assert_eq!(due.len(), 3);
        assert_eq!(due[0].id, "pay2");
        assert_eq!(due[1].id, "pay4");
        assert_eq!(due[2].id, "pay1");

        let capped = next_due(&payments, 2);
        assert_eq!(capped.len(), 2);
    }
}
