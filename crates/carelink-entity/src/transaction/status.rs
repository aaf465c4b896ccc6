//! Transaction status machine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a payment transaction.
///
/// Created `Pending`; moves to exactly one terminal state and is then
/// immutable apart from provider reference identifiers recorded on
/// success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "transaction_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    /// Created, awaiting payer approval and execution.
    Pending,
    /// Successfully captured by the provider.
    Completed,
    /// The provider rejected or failed the payment.
    Failed,
    /// Refunded after completion.
    Refunded,
    /// Cancelled by the payer before execution.
    Cancelled,
}

impl TransactionStatus {
    /// Whether this state permits no further transitions.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Return the status as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Refunded => "refunded",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_is_the_only_open_state() {
        assert!(!TransactionStatus::Pending.is_terminal());
        for status in [
            TransactionStatus::Completed,
            TransactionStatus::Failed,
            TransactionStatus::Refunded,
            TransactionStatus::Cancelled,
        ] {
            assert!(status.is_terminal());
        }
    }
}
