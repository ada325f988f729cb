//! Notification inbox
//!
//! Mark-as-read applies optimistically: the row flips first, the badge
//! drops, and a snapshot restores both if the server refuses. The shell
//! poller corrects any badge drift within a minute either way.

use dioxus::prelude::*;

use shared_types::{Notification, NotificationKind};

use crate::api::notifications as notifications_api;
use crate::scope::TaskScope;
use crate::store;
use crate::toast;
use crate::widgets::{EmptyState, ErrorBanner};

fn kind_pill(kind: NotificationKind) -> (&'static str, &'static str) {
    match kind {
        NotificationKind::Message => ("pill pill-green", "Message"),
        NotificationKind::Payment => ("pill pill-amber", "Payment"),
        NotificationKind::Attendance => ("pill pill-gray", "Attendance"),
        NotificationKind::System => ("pill pill-red", "System"),
    }
}

fn unread_in(notifications: &[Notification]) -> u32 {
    notifications.iter().filter(|n| !n.read).count() as u32
}

fn filter_notifications(notifications: &[Notification], only_unread: bool) -> Vec<Notification> {
    notifications
        .iter()
        .filter(|n| !only_unread || !n.read)
        .cloned()
        .collect()
}

/// Flip one row to read, returning its snapshot for rollback. Rows that
/// are already read return `None` so no call is made.
fn apply_read(notifications: &mut [Notification], id: &str) -> Option<Notification> {
    let notification = notifications.iter_mut().find(|n| n.id == id)?;
    if notification.read {
        return None;
    }
    let snapshot = notification.clone();
    notification.read = true;
    Some(snapshot)
}

/// Flip every unread row, returning snapshots of the ones that changed.
fn apply_all_read(notifications: &mut [Notification]) -> Vec<Notification> {
    let mut snapshots = Vec::new();
    for notification in notifications.iter_mut() {
        if !notification.read {
            snapshots.push(notification.clone());
            notification.read = true;
        }
    }
    snapshots
}

fn restore_rows(notifications: &mut [Notification], snapshots: Vec<Notification>) {
    for snapshot in snapshots {
        if let Some(notification) = notifications.iter_mut().find(|n| n.id == snapshot.id) {
            *notification = snapshot;
        }
    }
}

#[component]
pub fn NotificationsScreen() -> Element {
    let mut notifications = use_signal(Vec::<Notification>::new);
    let mut loading = use_signal(|| false);
    let mut load_error = use_signal(|| None::<String>);
    let mut only_unread = use_signal(|| false);
    let mut marking_all = use_signal(|| false);
    let mut initial_load_done = use_signal(|| false);

    let scope = use_hook(TaskScope::new);
    {
        let scope = scope.clone();
        use_drop(move || scope.retire());
    }

    let load_notifications = use_callback({
        let scope = scope.clone();
        move |_: ()| {
            let token = scope.begin();
            spawn(async move {
                loading.set(true);
                match notifications_api::list_notifications().await {
                    Ok(list) => {
                        if !token.is_live() {
                            return;
                        }
                        // The inbox is fresher than the last poll; sync
                        // the badge to what we can actually see
                        store::set_unread(unread_in(&list));
                        notifications.set(list);
                        load_error.set(None);
                    }
                    Err(e) => {
                        if !token.is_live() {
                            return;
                        }
                        dioxus_logger::tracing::error!("Failed to load notifications: {e}");
                        load_error.set(Some(e.user_message().to_string()));
                    }
                }
                loading.set(false);
            });
        }
    });

    use_effect(move || {
        if initial_load_done() {
            return;
        }
        initial_load_done.set(true);
        load_notifications.call(());
    });

    let mark_read = use_callback({
        let scope = scope.clone();
        move |id: String| {
            let Some(snapshot) = apply_read(&mut notifications.write(), &id) else {
                return;
            };
            store::notifications_marked_read(1);
            let scope = scope.clone();
            spawn(async move {
                match notifications_api::set_notification_read(&id, true).await {
                    Ok(()) => {}
                    Err(e) => {
                        if !scope.is_alive() {
                            return;
                        }
                        dioxus_logger::tracing::error!("Mark-as-read failed: {e}");
                        restore_rows(&mut notifications.write(), vec![snapshot]);
                        store::set_unread(unread_in(&notifications.read()));
                        toast::push_error(e.user_message());
                    }
                }
            });
        }
    });

    let mark_all = use_callback({
        let scope = scope.clone();
        move |_: ()| {
            if marking_all() {
                return;
            }
            let snapshots = apply_all_read(&mut notifications.write());
            if snapshots.is_empty() {
                return;
            }
            store::notifications_marked_read(snapshots.len() as u32);
            let scope = scope.clone();
            marking_all.set(true);
            spawn(async move {
                match notifications_api::mark_all_read().await {
                    Ok(()) => {
                        if !scope.is_alive() {
                            return;
                        }
                        marking_all.set(false);
                    }
                    Err(e) => {
                        if !scope.is_alive() {
                            return;
                        }
                        dioxus_logger::tracing::error!("Mark-all-read failed: {e}");
                        restore_rows(&mut notifications.write(), snapshots);
                        store::set_unread(unread_in(&notifications.read()));
                        toast::push_error(e.user_message());
                        marking_all.set(false);
                    }
                }
            });
        }
    });

    let all = notifications();
    let unread = unread_in(&all);
    let visible = filter_notifications(&all, only_unread());

    rsx! {
        div {
            h2 { class: "screen-title", "Notifications" }

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
                        checked: only_unread(),
                        onchange: move |e| only_unread.set(e.checked()),
                    }
                    "Unread only"
                }
                div {
                    style: "display: flex; gap: 0.5rem;",
                    button {
                        class: "btn",
                        disabled: loading(),
                        onclick: move |_| load_notifications.call(()),
                        if loading() { "Refreshing..." } else { "⟳ Refresh" }
                    }
                    button {
                        class: "btn",
                        disabled: marking_all() || unread == 0,
                        onclick: move |_| mark_all.call(()),
                        "Mark all read"
                    }
                }
            }

            if visible.is_empty() && !loading() {
                EmptyState {
                    message: if only_unread() {
                        "Nothing unread. All caught up."
                    } else {
                        "No notifications yet."
                    }
                }
            } else {
                table {
                    class: "data-table",
                    tbody {
                        for notification in visible {
                            tr {
                                key: "{notification.id}",
                                td {
                                    style: "width: 110px;",
                                    {
                                        let (class, label) = kind_pill(notification.kind);
                                        rsx! { span { class, "{label}" } }
                                    }
                                }
                                td {
                                    div {
                                        style: if notification.read { "" } else { "font-weight: 600;" },
                                        "{notification.title}"
                                    }
                                    div {
                                        class: "row-muted",
                                        style: "font-size: 0.8125rem;",
                                        "{notification.body}"
                                    }
                                }
                                td {
                                    class: "row-muted",
                                    style: "white-space: nowrap;",
                                    {notification.created_at.format("%Y-%m-%d %H:%M").to_string()}
                                }
                                td {
                                    style: "text-align: end;",
                                    if !notification.read {
                                        button {
                                            class: "btn-link",
                                            onclick: {
                                                let id = notification.id.clone();
                                                move |_| mark_read.call(id.clone())
                                            },
                                            "Mark read"
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
    use chrono::Utc;

    fn notification(id: &str, read: bool) -> Notification {
        Notification {
            id: id.to_string(),
            kind: NotificationKind::System,
            title: "title".to_string(),
            body: "body".to_string(),
            read,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn unread_counts_only_unread() {
        let list = vec![
            notification("n1", false),
            notification("n2", true),
            notification("n3", false),
        ];
        assert_eq!(unread_in(&list), 2);
        assert_eq!(unread_in(&[]), 0);
    }

    #[test]
    fn filter_unread_only() {
        let list = vec![notification("n1", false), notification("n2", true)];
        assert_eq!(filter_notifications(&list, false).len(), 2);
        let unread = filter_notifications(&list, true);
        assert_eq!(unread.len(), 1);
        assert_eq!(unread[0].id, "n1");
    }

    #[test]
    fn mark_read_snapshots_only_unread_rows() {
        let mut list = vec![notification("n1", false), notification("n2", true)];

        let snapshot = apply_read(&mut list, "n1").expect("was unread");
        assert!(list[0].read);
        assert!(!snapshot.read);

        // Already-read rows produce no snapshot and no call
        assert!(apply_read(&mut list, "n2").is_none());
        assert!(apply_read(&mut list, "gone").is_none());
    }

    #[test]
    fn mark_all_flips_and_rolls_back() {
        let mut list = vec![
            notification("n1", false),
            notification("n2", true),
            notification("n3", false),
        ];

        let snapshots = apply_all_read(&mut list);
        assert_eq!(snapshots.len(), 2);
        assert!(list.iter().all(|n| n.read));

        restore_rows(&mut list, snapshots);
        assert_eq!(unread_in(&list), 2);
        assert!(!list[0].read);
        assert!(list[1].read);
    }

    #[test]
    fn mark_all_on_read_inbox_is_a_noop() {
        let mut list = vec![notification("n1", true)];
        assert!(apply_all_read(&mut list).is_empty());
    }
}
