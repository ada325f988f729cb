//! Guardian messaging screen
//!
//! Conversation list plus an open thread. Sends show an optimistic
//! bubble immediately; the open thread is re-fetched on a short poll so
//! replies appear without a manual refresh.

pub mod logic;
pub mod types;
pub mod view;

pub use view::MessagingScreen;
