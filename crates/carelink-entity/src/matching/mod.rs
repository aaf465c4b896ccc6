//! Match request entity and status machine.

pub mod model;
pub mod status;

pub use model::{CreateMatchRequest, MatchRequest};
pub use status::{MatchResponseAction, MatchStatus};
