//! Payment transaction repository.
//!
//! Status changes are compare-and-set on `status = 'pending'`; once a
//! row reaches a terminal status no further UPDATE can touch it.

use sqlx::PgPool;
use uuid::Uuid;

use carelink_core::error::{AppError, ErrorKind};
use carelink_core::result::AppResult;
use carelink_core::types::pagination::{PageRequest, PageResponse};
use carelink_entity::transaction::model::{CreateTransaction, Transaction};
use carelink_entity::transaction::status::TransactionStatus;

/// Repository for payment transaction records.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    pool: PgPool,
}

impl TransactionRepository {
    /// Create a new transaction repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a transaction by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Transaction>> {
        sqlx::query_as::<_, Transaction>("SELECT * FROM transactions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find transaction", e)
            })
    }

    /// Find a transaction by the provider's payment id.
    pub async fn find_by_payment_id(&self, paypal_payment_id: &str) -> AppResult<Option<Transaction>> {
        sqlx::query_as::<_, Transaction>(
            "SELECT * FROM transactions WHERE paypal_payment_id = $1",
        )
        .bind(paypal_payment_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find transaction", e))
    }

    /// Record a new pending transaction with its provider payment id.
    pub async fn create(
        &self,
        data: &CreateTransaction,
        paypal_payment_id: &str,
    ) -> AppResult<Transaction> {
        sqlx::query_as::<_, Transaction>(
            "INSERT INTO transactions (payer_id, payee_id, match_request_id, amount, currency, \
             paypal_payment_id) VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(data.payer_id)
        .bind(data.payee_id)
        .bind(data.match_request_id)
        .bind(data.amount)
        .bind(&data.currency)
        .bind(paypal_payment_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to create transaction", e)
        })
    }

    /// Atomically move a pending transaction to a terminal status,
    /// recording the provider capture reference when present.
    ///
    /// Returns `None` when the row is missing or already terminal; the
    /// caller re-reads to classify which.
    pub async fn transition_from_pending(
        &self,
        id: Uuid,
        next: TransactionStatus,
        provider_reference_id: Option<&str>,
    ) -> AppResult<Option<Transaction>> {
        sqlx::query_as::<_, Transaction>(
            "UPDATE transactions SET status = $2, \
             provider_reference_id = COALESCE($3, provider_reference_id), \
             updated_at = NOW() \
             WHERE id = $1 AND status = 'pending' RETURNING *",
        )
        .bind(id)
        .bind(next)
        .bind(provider_reference_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update transaction", e)
        })
    }

    /// List transactions where the user is payer or payee, newest first.
    pub async fn list_for_user(
        &self,
        user_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Transaction>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM transactions WHERE payer_id = $1 OR payee_id = $1",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count transactions", e)
        })?;

        let transactions = sqlx::query_as::<_, Transaction>(
            "SELECT * FROM transactions WHERE payer_id = $1 OR payee_id = $1 \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(user_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list transactions", e)
        })?;

        Ok(PageResponse::new(
            transactions,
            page.page,
            page.page_size,
            total as u64,
        ))
    }
}
