//! Transient feedback line
//!
//! One queue for the whole app. Mutation handlers push a toast for
//! outcomes that have no natural place on the screen (a rolled-back
//! toggle, a background save); form dialogs keep their own inline error
//! instead.

use std::cell::Cell;

use dioxus::prelude::*;
use gloo_timers::future::TimeoutFuture;

const TOAST_DISMISS_MS: u32 = 4000;
const MAX_QUEUED_TOASTS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub text: String,
}

pub static TOASTS: GlobalSignal<Vec<Toast>> = GlobalSignal::new(Vec::new);

thread_local! {
    static NEXT_TOAST_ID: Cell<u64> = const { Cell::new(1) };
}

fn next_toast_id() -> u64 {
    NEXT_TOAST_ID.with(|cell| {
        let id = cell.get();
        cell.set(id + 1);
        id
    })
}

pub fn push_toast(kind: ToastKind, text: impl Into<String>) {
    let toast = Toast {
        id: next_toast_id(),
        kind,
        text: text.into(),
    };
    push_capped(&mut TOASTS.write(), toast);
}

pub fn push_success(text: impl Into<String>) {
    push_toast(ToastKind::Success, text);
}

pub fn push_error(text: impl Into<String>) {
    push_toast(ToastKind::Error, text);
}

pub fn dismiss_toast(id: u64) {
    remove_toast(&mut TOASTS.write(), id);
}

/// Append, dropping the oldest entries once the queue is full.
fn push_capped(list: &mut Vec<Toast>, toast: Toast) {
    list.push(toast);
    while list.len() > MAX_QUEUED_TOASTS {
        list.remove(0);
    }
}

fn remove_toast(list: &mut Vec<Toast>, id: u64) {
    list.retain(|toast| toast.id != id);
}

fn kind_class(kind: ToastKind) -> &'static str {
    match kind {
        ToastKind::Success => "toast toast-success",
        ToastKind::Error => "toast toast-error",
        ToastKind::Info => "toast toast-info",
    }
}

/// Renders the queue and expires entries after a few seconds.
#[component]
pub fn ToastHost() -> Element {
    let mut expiry_scheduled_up_to = use_signal(|| 0u64);

    use_effect(move || {
        let toasts = TOASTS();
        let Some(max_id) = toasts.iter().map(|t| t.id).max() else {
            return;
        };
        if max_id <= expiry_scheduled_up_to() {
            return;
        }
        let fresh: Vec<u64> = toasts
            .iter()
            .map(|t| t.id)
            .filter(|id| *id > expiry_scheduled_up_to())
            .collect();
        expiry_scheduled_up_to.set(max_id);
        for id in fresh {
            spawn(async move {
                TimeoutFuture::new(TOAST_DISMISS_MS).await;
                dismiss_toast(id);
            });
        }
    });

    rsx! {
        div {
            class: "toast-stack",
            for toast in TOASTS() {
                div {
                    key: "{toast.id}",
                    class: kind_class(toast.kind),
                    onclick: move |_| dismiss_toast(toast.id),
                    "{toast.text}"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toast(id: u64, text: &str) -> Toast {
        Toast {
            id,
            kind: ToastKind::Info,
            text: text.to_string(),
        }
    }

    #[test]
    fn queue_caps_at_limit_dropping_oldest() {
        let mut list = Vec::new();
        for id in 1..=6 {
            push_capped(&mut list, toast(id, "x"));
        }
        assert_eq!(list.len(), MAX_QUEUED_TOASTS);
        assert_eq!(list.first().map(|t| t.id), Some(3));
        assert_eq!(list.last().map(|t| t.id), Some(6));
    }

    #[test]
    fn remove_clears_only_the_target() {
        let mut list = vec![toast(1, "a"), toast(2, "b")];
        remove_toast(&mut list, 1);
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].id, 2);
        // Removing an id that is already gone is a no-op
        remove_toast(&mut list, 1);
        assert_eq!(list.len(), 1);
    }
}
