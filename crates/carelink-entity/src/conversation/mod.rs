//! Conversation and message entities.

pub mod message;
pub mod model;

pub use message::Message;
pub use model::{Conversation, Participant, participant_pair};
