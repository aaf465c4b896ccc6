//! Match request workflow.

pub mod service;

pub use service::{InitiateMatchRequest, MatchService};
