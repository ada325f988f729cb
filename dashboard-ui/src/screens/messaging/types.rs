//! Messaging screen constants

/// Re-fetch interval for the open thread.
pub const THREAD_POLL_MS: u32 = 5_000;

/// Longest conversation-list preview before truncation.
pub const PREVIEW_CHARS: usize = 48;

/// The actions API addresses the signed-in operator as "me" in sender
/// ids, so the client never needs to know its own account id.
pub const SELF_SENDER_ID: &str = "me";
