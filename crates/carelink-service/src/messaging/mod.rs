//! Conversations and messaging between matched users.

pub mod service;

pub use service::{MessagingService, StartConversationResult};
