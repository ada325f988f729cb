//! Thread state transitions: optimistic sends, poll merges, unread
//! bookkeeping on the conversation list.

use chrono::{DateTime, Utc};
use shared_types::{Conversation, Message};

use super::types::{PREVIEW_CHARS, SELF_SENDER_ID};

/// The bubble shown the moment the user hits send, before the server
/// confirms. Carries the client_ref the persisted row will echo back.
pub fn optimistic_message(conversation_id: &str, body: &str, client_ref: &str) -> Message {
    Message {
        id: format!("local-{client_ref}"),
        conversation_id: conversation_id.to_string(),
        sender_id: SELF_SENDER_ID.to_string(),
        body: body.to_string(),
        sent_at: Utc::now(),
        client_ref: Some(client_ref.to_string()),
        pending: true,
    }
}

/// Swap the optimistic bubble for the persisted row. If a poll already
/// merged the persisted row in, the bubble is simply dropped.
pub fn reconcile_sent(messages: &mut Vec<Message>, client_ref: &str, persisted: Message) {
    messages.retain(|m| !(m.pending && m.client_ref.as_deref() == Some(client_ref)));
    let already_there = messages
        .iter()
        .any(|m| m.client_ref.as_deref() == Some(client_ref));
    if !already_there {
        messages.push(persisted);
    }
}

/// Drop the optimistic bubble after a failed send.
pub fn remove_pending(messages: &mut Vec<Message>, client_ref: &str) {
    messages.retain(|m| !(m.pending && m.client_ref.as_deref() == Some(client_ref)));
}

/// Replace the thread with a fresh server snapshot, keeping any local
/// bubbles whose send has not settled yet.
pub fn merge_poll(local: &mut Vec<Message>, fetched: Vec<Message>) {
    let mut merged = fetched;
    for message in local.iter() {
        if message.pending && !merged.iter().any(|m| same_send(m, message)) {
            merged.push(message.clone());
        }
    }
    *local = merged;
}

fn same_send(a: &Message, b: &Message) -> bool {
    match (&a.client_ref, &b.client_ref) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}

/// Zero a conversation's unread badge, returning the prior count so a
/// failed mark-read call can put it back.
pub fn clear_unread(conversations: &mut [Conversation], id: &str) -> Option<u32> {
    let conversation = conversations.iter_mut().find(|c| c.id == id)?;
    let before = conversation.unread;
    conversation.unread = 0;
    Some(before)
}

pub fn restore_unread(conversations: &mut [Conversation], id: &str, unread: u32) {
    if let Some(conversation) = conversations.iter_mut().find(|c| c.id == id) {
        conversation.unread = unread;
    }
}

/// Reflect a sent message on the conversation list without a reload:
/// update the preview and move the conversation to the top.
pub fn touch_conversation(
    conversations: &mut Vec<Conversation>,
    id: &str,
    body: &str,
    at: DateTime<Utc>,
) {
    let Some(index) = conversations.iter().position(|c| c.id == id) else {
        return;
    };
    let mut conversation = conversations.remove(index);
    conversation.last_message = Some(body.to_string());
    conversation.last_message_at = Some(at);
    conversations.insert(0, conversation);
}

/// Conversation-list preview, truncated on a character boundary.
pub fn preview(text: &str) -> String {
    let mut out = String::new();
    for (count, ch) in text.chars().enumerate() {
        if count == PREVIEW_CHARS {
            out.push_str("...");
            return out;
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conversation(id: &str, unread: u32) -> Conversation {
        Conversation {
            id: id.to_string(),
            academy_id: "a1".to_string(),
            subject: format!("Subject {id}"),
            participant: "Guardian".to_string(),
            last_message: None,
            last_message_at: None,
            unread,
        }
    }

    fn server_message(id: &str, client_ref: Option<&str>) -> Message {
        Message {
            id: id.to_string(),
            conversation_id: "c1".to_string(),
            sender_id: "me".to_string(),
            body: "hello".to_string(),
            sent_at: Utc::now(),
            client_ref: client_ref.map(str::to_string),
            pending: false,
        }
    }

    #[test]
    fn reconcile_swaps_the_bubble_for_the_persisted_row() {
        let mut messages = vec![optimistic_message("c1", "hello", "ref-1")];
        reconcile_sent(&mut messages, "ref-1", server_message("m1", Some("ref-1")));
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].id, "m1");
        assert!(!messages[0].pending);
    }

    #[test]
    fn reconcile_after_poll_merge_does_not_duplicate() {
        // A poll already brought in the persisted row
        let mut messages = vec![
            server_message("m1", Some("ref-1")),
            optimistic_message("c1", "hi", "ref-2"),
        ];
        reconcile_sent(&mut messages, "ref-1", server_message("m1", Some("ref-1")));
        assert_eq!(messages.len(), 2);
    }

    #[test]
    fn poll_merge_keeps_unsettled_bubbles() {
        let mut local = vec![optimistic_message("c1", "typing", "ref-9")];
        merge_poll(&mut local, vec![server_message("m1", None)]);
        assert_eq!(local.len(), 2);
        assert!(local[1].pending);
    }

    #[test]
    fn poll_merge_drops_a_bubble_the_server_already_has() {
        let mut local = vec![optimistic_message("c1", "hello", "ref-1")];
        merge_poll(&mut local, vec![server_message("m1", Some("ref-1"))]);
        assert_eq!(local.len(), 1);
        assert!(!local[0].pending);
    }

    #[test]
    fn failed_send_removes_only_its_own_bubble() {
        let mut messages = vec![
            optimistic_message("c1", "first", "ref-1"),
            optimistic_message("c1", "second", "ref-2"),
        ];
        remove_pending(&mut messages, "ref-1");
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].client_ref.as_deref(), Some("ref-2"));
    }

    #[test]
    fn unread_roundtrip_restores_the_badge() {
        let mut conversations = vec![conversation("c1", 3), conversation("c2", 1)];
        let before = clear_unread(&mut conversations, "c1");
        assert_eq!(before, Some(3));
        assert_eq!(conversations[0].unread, 0);

        restore_unread(&mut conversations, "c1", 3);
        assert_eq!(conversations[0].unread, 3);
        assert_eq!(conversations[1].unread, 1);
    }

    #[test]
    fn touch_moves_the_conversation_up_with_its_preview() {
        let mut conversations = vec![conversation("c1", 0), conversation("c2", 0)];
        let at = Utc::now();
        touch_conversation(&mut conversations, "c2", "see you at practice", at);
        assert_eq!(conversations[0].id, "c2");
        assert_eq!(
            conversations[0].last_message.as_deref(),
            Some("see you at practice")
        );
        assert_eq!(conversations[0].last_message_at, Some(at));
    }

    #[test]
    fn preview_truncates_on_character_boundaries() {
        let short = preview("quick note");
        assert_eq!(short, "quick note");

        let long = preview(&"م".repeat(60));
        assert_eq!(long.chars().count(), PREVIEW_CHARS + 3);
        assert!(long.ends_with("..."));
    }
}
