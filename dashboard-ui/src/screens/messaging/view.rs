//! Messaging screen component

use dioxus::prelude::*;
use gloo_timers::future::TimeoutFuture;

use shared_types::{new_client_ref, Conversation, Message};

use crate::api::messaging as messaging_api;
use crate::scope::TaskScope;
use crate::session;
use crate::store::STORE;
use crate::toast;
use crate::widgets::{EmptyState, ErrorBanner};

use super::logic;
use super::types::{SELF_SENDER_ID, THREAD_POLL_MS};

#[component]
pub fn MessagingScreen() -> Element {
    let mut conversations = use_signal(Vec::<Conversation>::new);
    let mut selected_id = use_signal(|| None::<String>);
    let mut messages = use_signal(Vec::<Message>::new);
    let mut draft = use_signal(String::new);
    let mut sending = use_signal(|| false);
    let mut loading_thread = use_signal(|| false);
    let mut load_error = use_signal(|| None::<String>);

    let mut loaded_academy = use_signal(|| None::<Option<String>>);
    let mut poll_started = use_signal(|| false);

    let scope = use_hook(TaskScope::new);
    {
        let scope = scope.clone();
        use_drop(move || scope.retire());
    }

    let load_thread = use_callback({
        let scope = scope.clone();
        move |conversation: String| {
            let token = scope.begin();
            spawn(async move {
                loading_thread.set(true);
                match messaging_api::fetch_messages(&conversation).await {
                    Ok(fetched) => {
                        if !token.is_live() {
                            return;
                        }
                        messages.set(fetched);
                        load_error.set(None);
                    }
                    Err(e) => {
                        if !token.is_live() {
                            return;
                        }
                        dioxus_logger::tracing::error!("Failed to load messages: {e}");
                        load_error.set(Some(e.user_message().to_string()));
                    }
                }
                loading_thread.set(false);
            });
        }
    });

    let select_conversation = use_callback({
        let scope = scope.clone();
        move |id: String| {
            if selected_id().as_deref() == Some(id.as_str()) {
                return;
            }
            selected_id.set(Some(id.clone()));
            messages.set(Vec::new());
            draft.set(String::new());
            load_thread.call(id.clone());

            // Zero the badge right away; put it back if the server says no
            let Some(before) = logic::clear_unread(&mut conversations.write(), &id) else {
                return;
            };
            if before == 0 {
                return;
            }
            let scope = scope.clone();
            spawn(async move {
                if let Err(e) = messaging_api::mark_conversation_read(&id).await {
                    if !scope.is_alive() {
                        return;
                    }
                    dioxus_logger::tracing::warn!("Failed to mark conversation read: {e}");
                    logic::restore_unread(&mut conversations.write(), &id, before);
                }
            });
        }
    });

    let send_message = use_callback({
        let scope = scope.clone();
        move |_: ()| {
            if sending() {
                return;
            }
            let Some(conversation) = selected_id() else {
                return;
            };
            let body = draft();
            let body = body.trim().to_string();
            if body.is_empty() {
                return;
            }

            // Optimistic bubble
            let client_ref = new_client_ref();
            let bubble = logic::optimistic_message(&conversation, &body, &client_ref);
            messages.write().push(bubble);
            draft.set(String::new());
            sending.set(true);

            let scope = scope.clone();
            spawn(async move {
                match messaging_api::send_message(&conversation, &body, &client_ref).await {
                    Ok(persisted) => {
                        if !scope.is_alive() {
                            return;
                        }
                        let sent_at = persisted.sent_at;
                        logic::reconcile_sent(&mut messages.write(), &client_ref, persisted);
                        logic::touch_conversation(
                            &mut conversations.write(),
                            &conversation,
                            &body,
                            sent_at,
                        );
                        sending.set(false);
                    }
                    Err(e) => {
                        if !scope.is_alive() {
                            return;
                        }
                        dioxus_logger::tracing::error!("Failed to send message: {e}");
                        logic::remove_pending(&mut messages.write(), &client_ref);
                        // Give the user their text back, unless they
                        // already started typing something new
                        if draft.read().trim().is_empty() {
                            draft.set(body);
                        }
                        toast::push_error(e.user_message());
                        sending.set(false);
                    }
                }
            });
        }
    });

    let onkeydown = use_callback(move |e: KeyboardEvent| {
        if e.key() == Key::Enter && !e.modifiers().shift() {
            e.prevent_default();
            send_message.call(());
        }
    });

    let oninput = use_callback(move |e: FormEvent| {
        draft.set(e.value());
    });

    // Reload the conversation list when the active academy changes
    use_effect({
        let scope = scope.clone();
        move || {
            let academy = STORE.read().active_academy_id.clone();
            if loaded_academy() == Some(academy.clone()) {
                return;
            }
            loaded_academy.set(Some(academy.clone()));
            conversations.set(Vec::new());
            selected_id.set(None);
            messages.set(Vec::new());
            let Some(academy) = academy else {
                return;
            };
            let token = scope.begin();
            spawn(async move {
                match messaging_api::list_conversations(&academy).await {
                    Ok(list) => {
                        if !token.is_live() {
                            return;
                        }
                        conversations.set(list);
                        load_error.set(None);
                    }
                    Err(e) => {
                        if !token.is_live() {
                            return;
                        }
                        dioxus_logger::tracing::error!("Failed to load conversations: {e}");
                        load_error.set(Some(e.user_message().to_string()));
                    }
                }
            });
        }
    });

    // Poll the open thread so replies appear without a manual refresh
    use_effect({
        let scope = scope.clone();
        move || {
            if poll_started() {
                return;
            }
            poll_started.set(true);
            let scope = scope.clone();
            spawn(async move {
                loop {
                    TimeoutFuture::new(THREAD_POLL_MS).await;
                    if !scope.is_alive() {
                        break;
                    }
                    let Some(conversation) = selected_id() else {
                        continue;
                    };
                    // Skip the tick while a send is in flight; a poll
                    // response landing mid-send would drop the
                    // optimistic bubble
                    if sending() {
                        continue;
                    }
                    match messaging_api::fetch_messages(&conversation).await {
                        Ok(fetched) => {
                            if !scope.is_alive()
                                || selected_id().as_deref() != Some(conversation.as_str())
                            {
                                continue;
                            }
                            logic::merge_poll(&mut messages.write(), fetched);
                        }
                        Err(e) => {
                            dioxus_logger::tracing::warn!("Thread poll failed: {e}");
                        }
                    }
                }
            });
        }
    });

    let selected = selected_id();
    let open_conversation = selected
        .as_deref()
        .and_then(|id| conversations.read().iter().find(|c| c.id == id).cloned());

    rsx! {
        div {
            h2 { class: "screen-title", "Messaging" }

            if let Some(message) = load_error() {
                ErrorBanner {
                    message,
                    on_dismiss: move |_| load_error.set(None),
                }
            }

            div {
                style: "display: flex; height: calc(100vh - 160px); background: var(--surface-bg); border: 1px solid var(--border-color); border-radius: 0.5rem; overflow: hidden;",
                div {
                    class: "thread-list",
                    if conversations.read().is_empty() {
                        EmptyState { message: "No conversations yet." }
                    }
                    for conversation in conversations() {
                        button {
                            key: "{conversation.id}",
                            class: if selected.as_deref() == Some(conversation.id.as_str()) { "thread-item selected" } else { "thread-item" },
                            onclick: {
                                let id = conversation.id.clone();
                                move |_| select_conversation.call(id.clone())
                            },
                            div {
                                style: "display: flex; justify-content: space-between; align-items: center; gap: 0.5rem;",
                                strong { "{conversation.subject}" }
                                if conversation.unread > 0 {
                                    span { class: "pill pill-red", "{conversation.unread}" }
                                }
                            }
                            div {
                                class: "row-muted",
                                style: "font-size: 0.75rem;",
                                "{conversation.participant}"
                            }
                            if let Some(last) = &conversation.last_message {
                                div {
                                    class: "row-muted",
                                    style: "font-size: 0.8125rem;",
                                    "{logic::preview(last)}"
                                }
                            }
                        }
                    }
                }

                div {
                    style: "flex: 1; display: flex; flex-direction: column; min-width: 0;",
                    if let Some(conversation) = open_conversation {
                        div {
                            style: "padding: 0.75rem 1rem; border-bottom: 1px solid var(--border-color);",
                            strong { "{conversation.subject}" }
                            span {
                                class: "row-muted",
                                style: "margin-inline-start: 0.5rem; font-size: 0.8125rem;",
                                "{conversation.participant}"
                            }
                        }
                        div {
                            style: "flex: 1; overflow: auto; padding: 1rem; display: flex; flex-direction: column;",
                            if loading_thread() && messages.read().is_empty() {
                                p { class: "row-muted", "Loading messages..." }
                            }
                            for message in messages() {
                                ThreadBubble { key: "{message.id}", message }
                            }
                        }
                        div {
                            style: "display: flex; gap: 0.5rem; padding: 0.75rem; border-top: 1px solid var(--border-color);",
                            input {
                                class: "input",
                                placeholder: "Type a message...",
                                value: "{draft}",
                                oninput,
                                onkeydown,
                            }
                            button {
                                class: "btn btn-primary",
                                disabled: sending() || draft.read().trim().is_empty(),
                                onclick: move |_| send_message.call(()),
                                if sending() { "Sending..." } else { "Send" }
                            }
                        }
                    } else {
                        EmptyState { message: "Select a conversation to read and reply." }
                    }
                }
            }
        }
    }
}

#[component]
fn ThreadBubble(message: Message) -> Element {
    let own = message.pending || message.sender_id == SELF_SENDER_ID;
    rsx! {
        div {
            class: if own { "bubble bubble-own" } else { "bubble bubble-other" },
            div { "{message.body}" }
            div {
                class: "pending-badge",
                if message.pending {
                    "sending..."
                } else {
                    "{session::local_hhmm(message.sent_at)}"
                }
            }
        }
    }
}
