//! Payment service.
//!
//! Orchestrates the gateway and the transaction ledger. Every status
//! change is a compare-and-set from `pending`, so a transaction settles
//! exactly once no matter how many execute or cancel calls race.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

use carelink_core::error::AppError;
use carelink_core::types::pagination::{PageRequest, PageResponse};
use carelink_database::repositories::{
    CaregiverProfileRepository, FamilyProfileRepository, MatchRequestRepository,
    TransactionRepository, UserRepository,
};
use carelink_entity::matching::model::MatchRequest;
use carelink_entity::transaction::model::{CreateTransaction, Transaction};
use carelink_entity::transaction::status::TransactionStatus;
use carelink_entity::user::UserRole;
use carelink_payment::PaymentGateway;

use crate::context::RequestContext;

/// Request to initiate a payment.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct InitiatePaymentRequest {
    /// Receiving user.
    pub payee_id: Uuid,
    /// The match this payment references, if any.
    pub match_request_id: Option<Uuid>,
    /// Payment amount.
    pub amount: Decimal,
    /// ISO currency code, e.g. "USD".
    pub currency: String,
}

/// Result of initiating a payment.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PaymentInitiation {
    /// The recorded pending transaction.
    pub transaction: Transaction,
    /// URL the payer must visit to approve the payment.
    pub approval_url: String,
}

/// Manages the payment transaction lifecycle against the gateway.
#[derive(Clone)]
pub struct PaymentService {
    /// Transaction repository.
    transaction_repo: Arc<TransactionRepository>,
    /// Match request repository, for reference validation.
    match_repo: Arc<MatchRequestRepository>,
    /// User repository, for payee checks.
    user_repo: Arc<UserRepository>,
    /// Caregiver profile repository, for match participation checks.
    caregiver_repo: Arc<CaregiverProfileRepository>,
    /// Family profile repository, for match participation checks.
    family_repo: Arc<FamilyProfileRepository>,
    /// Payment provider gateway.
    gateway: Arc<dyn PaymentGateway>,
}

impl std::fmt::Debug for PaymentService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentService").finish()
    }
}

impl PaymentService {
    /// Creates a new payment service.
    pub fn new(
        transaction_repo: Arc<TransactionRepository>,
        match_repo: Arc<MatchRequestRepository>,
        user_repo: Arc<UserRepository>,
        caregiver_repo: Arc<CaregiverProfileRepository>,
        family_repo: Arc<FamilyProfileRepository>,
        gateway: Arc<dyn PaymentGateway>,
    ) -> Self {
        Self {
            transaction_repo,
            match_repo,
            user_repo,
            caregiver_repo,
            family_repo,
            gateway,
        }
    }

    /// Creates a payment at the gateway and records a pending transaction.
    pub async fn initiate(
        &self,
        ctx: &RequestContext,
        req: InitiatePaymentRequest,
    ) -> Result<PaymentInitiation, AppError> {
        if req.amount <= Decimal::ZERO {
            return Err(AppError::validation("Payment amount must be positive"));
        }
        if req.payee_id == ctx.user_id {
            return Err(AppError::validation("Cannot pay yourself"));
        }
        self.user_repo
            .find_by_id(req.payee_id)
            .await?
            .filter(|u| u.is_active)
            .ok_or_else(|| AppError::not_found("Payee not found"))?;
        if let Some(match_id) = req.match_request_id {
            let request = self
                .match_repo
                .find_by_id(match_id)
                .await?
                .ok_or_else(|| AppError::not_found("Match request not found"))?;
            self.ensure_payer_in_match(ctx, &request).await?;
        }

        let description = format!("CareLink payment from {}", ctx.username);
        let authorization = self
            .gateway
            .create_payment(req.amount, &req.currency, &description)
            .await?;

        let transaction = self
            .transaction_repo
            .create(
                &CreateTransaction {
                    payer_id: ctx.user_id,
                    payee_id: req.payee_id,
                    match_request_id: req.match_request_id,
                    amount: req.amount,
                    currency: req.currency.to_uppercase(),
                },
                &authorization.payment_id,
            )
            .await?;

        info!(
            user_id = %ctx.user_id,
            transaction_id = %transaction.id,
            payment_id = %authorization.payment_id,
            "Initiated payment"
        );
        Ok(PaymentInitiation {
            transaction,
            approval_url: authorization.approval_url,
        })
    }

    /// Executes an approved payment and settles the transaction.
    ///
    /// `payer_provider_id` is the payer id the provider hands back on the
    /// approval redirect.
    pub async fn execute(
        &self,
        ctx: &RequestContext,
        transaction_id: Uuid,
        payer_provider_id: &str,
    ) -> Result<Transaction, AppError> {
        let transaction = self.own_pending_as_payer(ctx, transaction_id).await?;
        let payment_id = transaction
            .paypal_payment_id
            .as_deref()
            .ok_or_else(|| AppError::internal("Transaction has no provider payment id"))?;

        match self
            .gateway
            .execute_payment(payment_id, payer_provider_id)
            .await
        {
            Ok(capture) => {
                let settled = self
                    .transaction_repo
                    .transition_from_pending(
                        transaction_id,
                        TransactionStatus::Completed,
                        Some(&capture.reference_id),
                    )
                    .await?;
                match settled {
                    Some(transaction) => {
                        info!(
                            transaction_id = %transaction.id,
                            reference_id = %capture.reference_id,
                            "Payment completed"
                        );
                        Ok(transaction)
                    }
                    None => self.classify_lost_transition(transaction_id).await,
                }
            }
            Err(gateway_err) => {
                warn!(
                    transaction_id = %transaction_id,
                    error = %gateway_err,
                    "Payment execution failed at the provider"
                );
                self.transaction_repo
                    .transition_from_pending(transaction_id, TransactionStatus::Failed, None)
                    .await?;
                Err(AppError::external_service(format!(
                    "Payment provider rejected the payment: {gateway_err}"
                )))
            }
        }
    }

    /// Cancels a pending payment before execution.
    pub async fn cancel(
        &self,
        ctx: &RequestContext,
        transaction_id: Uuid,
    ) -> Result<Transaction, AppError> {
        self.own_pending_as_payer(ctx, transaction_id).await?;
        let cancelled = self
            .transaction_repo
            .transition_from_pending(transaction_id, TransactionStatus::Cancelled, None)
            .await?;
        match cancelled {
            Some(transaction) => {
                info!(transaction_id = %transaction.id, "Payment cancelled");
                Ok(transaction)
            }
            None => self.classify_lost_transition(transaction_id).await,
        }
    }

    /// Returns one transaction, visible to its payer and payee only.
    pub async fn get(
        &self,
        ctx: &RequestContext,
        transaction_id: Uuid,
    ) -> Result<Transaction, AppError> {
        let transaction = self
            .transaction_repo
            .find_by_id(transaction_id)
            .await?
            .ok_or_else(|| AppError::not_found("Transaction not found"))?;
        if transaction.payer_id != ctx.user_id && transaction.payee_id != ctx.user_id {
            return Err(AppError::authorization(
                "Transaction involves other users",
            ));
        }
        Ok(transaction)
    }

    /// Looks up a transaction by the provider's payment id, as handed
    /// back on the approval redirect. Payer and payee only.
    pub async fn get_by_payment_id(
        &self,
        ctx: &RequestContext,
        payment_id: &str,
    ) -> Result<Transaction, AppError> {
        let transaction = self
            .transaction_repo
            .find_by_payment_id(payment_id)
            .await?
            .ok_or_else(|| AppError::not_found("Transaction not found"))?;
        if transaction.payer_id != ctx.user_id && transaction.payee_id != ctx.user_id {
            return Err(AppError::authorization(
                "Transaction involves other users",
            ));
        }
        Ok(transaction)
    }

    /// Lists the current user's transactions on either side.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        page: PageRequest,
    ) -> Result<PageResponse<Transaction>, AppError> {
        self.transaction_repo.list_for_user(ctx.user_id, &page).await
    }

    /// The referenced match must have the payer on one of its two sides.
    async fn ensure_payer_in_match(
        &self,
        ctx: &RequestContext,
        request: &MatchRequest,
    ) -> Result<(), AppError> {
        let profile_id = match ctx.role {
            UserRole::Family => self
                .family_repo
                .find_by_user_id(ctx.user_id)
                .await?
                .map(|p| p.id),
            UserRole::Caregiver => self
                .caregiver_repo
                .find_by_user_id(ctx.user_id)
                .await?
                .map(|p| p.id),
        };
        let involved =
            profile_id.is_some_and(|id| Self::profile_participates(ctx.role, id, request));
        if involved {
            Ok(())
        } else {
            Err(AppError::authorization(
                "Match request involves other users",
            ))
        }
    }

    fn profile_participates(role: UserRole, profile_id: Uuid, request: &MatchRequest) -> bool {
        match role {
            UserRole::Family => request.family_profile_id == profile_id,
            UserRole::Caregiver => request.caregiver_profile_id == profile_id,
        }
    }

    async fn own_pending_as_payer(
        &self,
        ctx: &RequestContext,
        transaction_id: Uuid,
    ) -> Result<Transaction, AppError> {
        let transaction = self
            .transaction_repo
            .find_by_id(transaction_id)
            .await?
            .ok_or_else(|| AppError::not_found("Transaction not found"))?;
        if transaction.payer_id != ctx.user_id {
            return Err(AppError::authorization(
                "Only the payer can act on this transaction",
            ));
        }
        Ok(transaction)
    }

    async fn classify_lost_transition(
        &self,
        transaction_id: Uuid,
    ) -> Result<Transaction, AppError> {
        match self.transaction_repo.find_by_id(transaction_id).await? {
            None => Err(AppError::not_found("Transaction not found")),
            Some(transaction) => Err(AppError::conflict(format!(
                "Transaction was already settled as {}",
                transaction.status
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use carelink_entity::matching::status::MatchStatus;

    use super::*;

    fn request(family: Uuid, caregiver: Uuid) -> MatchRequest {
        MatchRequest {
            id: Uuid::new_v4(),
            family_profile_id: family,
            caregiver_profile_id: caregiver,
            status: MatchStatus::Accepted,
            message_to_caregiver: None,
            proposed_start_date: None,
            requested_hours_per_week: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_payer_must_sit_on_their_own_side_of_the_match() {
        let family = Uuid::new_v4();
        let caregiver = Uuid::new_v4();
        let req = request(family, caregiver);

        assert!(PaymentService::profile_participates(
            UserRole::Family,
            family,
            &req
        ));
        assert!(PaymentService::profile_participates(
            UserRole::Caregiver,
            caregiver,
            &req
        ));
    }

    #[test]
    fn test_unrelated_profile_is_not_a_participant() {
        let req = request(Uuid::new_v4(), Uuid::new_v4());
        let outsider = Uuid::new_v4();

        assert!(!PaymentService::profile_participates(
            UserRole::Family,
            outsider,
            &req
        ));
        assert!(!PaymentService::profile_participates(
            UserRole::Caregiver,
            outsider,
            &req
        ));
    }

    #[test]
    fn test_sides_are_not_interchangeable() {
        let family = Uuid::new_v4();
        let caregiver = Uuid::new_v4();
        let req = request(family, caregiver);

        // A caregiver id on the family side must not pass, and vice versa.
        assert!(!PaymentService::profile_participates(
            UserRole::Family,
            caregiver,
            &req
        ));
        assert!(!PaymentService::profile_participates(
            UserRole::Caregiver,
            family,
            &req
        ));
    }
}
