//! Match request status machine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a match request.
///
/// `Pending` is the sole initial state. The three remaining states are
/// terminal: once reached, the request never changes again and a fresh
/// request must be created to retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "match_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    /// Awaiting the caregiver's response.
    Pending,
    /// Accepted by the caregiver; the pair is mutually matched.
    Accepted,
    /// Withdrawn by the initiating family.
    DeclinedByFamily,
    /// Declined by the targeted caregiver.
    DeclinedByCaregiver,
}

impl MatchStatus {
    /// Whether this state permits no further transitions.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Whether a transition from `self` to `next` is legal.
    pub fn can_transition_to(&self, next: MatchStatus) -> bool {
        matches!(self, Self::Pending) && next != Self::Pending
    }

    /// Return the status as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::DeclinedByFamily => "declined_by_family",
            Self::DeclinedByCaregiver => "declined_by_caregiver",
        }
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A caregiver's answer to a pending match request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchResponseAction {
    /// Accept the proposal.
    Accept,
    /// Decline the proposal.
    Decline,
}

impl MatchResponseAction {
    /// The terminal status this action produces.
    pub fn resulting_status(&self) -> MatchStatus {
        match self {
            Self::Accept => MatchStatus::Accepted,
            Self::Decline => MatchStatus::DeclinedByCaregiver,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_is_the_only_non_terminal_state() {
        assert!(!MatchStatus::Pending.is_terminal());
        assert!(MatchStatus::Accepted.is_terminal());
        assert!(MatchStatus::DeclinedByFamily.is_terminal());
        assert!(MatchStatus::DeclinedByCaregiver.is_terminal());
    }

    #[test]
    fn test_no_transition_out_of_terminal_states() {
        let terminal = [
            MatchStatus::Accepted,
            MatchStatus::DeclinedByFamily,
            MatchStatus::DeclinedByCaregiver,
        ];
        for from in terminal {
            for to in [
                MatchStatus::Pending,
                MatchStatus::Accepted,
                MatchStatus::DeclinedByFamily,
                MatchStatus::DeclinedByCaregiver,
            ] {
                assert!(!from.can_transition_to(to), "{from} -> {to} must be illegal");
            }
        }
    }

    #[test]
    fn test_pending_cannot_loop_back_to_pending() {
        assert!(!MatchStatus::Pending.can_transition_to(MatchStatus::Pending));
        assert!(MatchStatus::Pending.can_transition_to(MatchStatus::Accepted));
        assert!(MatchStatus::Pending.can_transition_to(MatchStatus::DeclinedByFamily));
    }

    #[test]
    fn test_response_action_statuses() {
        assert_eq!(
            MatchResponseAction::Accept.resulting_status(),
            MatchStatus::Accepted
        );
        assert_eq!(
            MatchResponseAction::Decline.resulting_status(),
            MatchStatus::DeclinedByCaregiver
        );
    }
}
