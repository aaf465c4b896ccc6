//! Match request service.
//!
//! The database owns the race-sensitive invariants: the partial unique
//! index guarantees one pending request per pair, and every state change
//! is a compare-and-set. This service resolves actors to their profiles,
//! enforces who may do what, and classifies lost races.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use carelink_core::error::AppError;
use carelink_core::types::pagination::{PageRequest, PageResponse};
use carelink_database::repositories::{
    CaregiverProfileRepository, FamilyProfileRepository, MatchRequestRepository,
};
use carelink_entity::matching::model::{CreateMatchRequest, MatchRequest};
use carelink_entity::matching::status::{MatchResponseAction, MatchStatus};
use carelink_entity::user::UserRole;

use crate::context::RequestContext;

/// Request to initiate a match with a caregiver.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct InitiateMatchRequest {
    /// Targeted caregiver profile.
    pub caregiver_profile_id: Uuid,
    /// Optional note to the caregiver.
    pub message_to_caregiver: Option<String>,
    /// Proposed start date.
    pub proposed_start_date: Option<DateTime<Utc>>,
    /// Requested weekly hours.
    pub requested_hours_per_week: Option<i32>,
}

/// Manages the family-to-caregiver match request lifecycle.
#[derive(Debug, Clone)]
pub struct MatchService {
    /// Match request repository.
    match_repo: Arc<MatchRequestRepository>,
    /// Caregiver profile repository.
    caregiver_repo: Arc<CaregiverProfileRepository>,
    /// Family profile repository.
    family_repo: Arc<FamilyProfileRepository>,
}

impl MatchService {
    /// Creates a new match service.
    pub fn new(
        match_repo: Arc<MatchRequestRepository>,
        caregiver_repo: Arc<CaregiverProfileRepository>,
        family_repo: Arc<FamilyProfileRepository>,
    ) -> Self {
        Self {
            match_repo,
            caregiver_repo,
            family_repo,
        }
    }

    /// Initiates a match request toward a caregiver. Families only.
    ///
    /// A second pending request for the same pair is rejected with a
    /// conflict; a declined pair may be retried with a fresh request.
    pub async fn initiate(
        &self,
        ctx: &RequestContext,
        req: InitiateMatchRequest,
    ) -> Result<MatchRequest, AppError> {
        if !ctx.is_family() {
            return Err(AppError::authorization(
                "Only families can initiate match requests",
            ));
        }
        if let Some(hours) = req.requested_hours_per_week {
            if !(1..=168).contains(&hours) {
                return Err(AppError::validation(
                    "requested_hours_per_week must be between 1 and 168",
                ));
            }
        }

        let family = self.own_family_profile(ctx).await?;
        self.caregiver_repo
            .find_by_id(req.caregiver_profile_id)
            .await?
            .ok_or_else(|| AppError::not_found("Caregiver not found"))?;

        let request = self
            .match_repo
            .create(&CreateMatchRequest {
                family_profile_id: family.id,
                caregiver_profile_id: req.caregiver_profile_id,
                message_to_caregiver: req.message_to_caregiver,
                proposed_start_date: req.proposed_start_date,
                requested_hours_per_week: req.requested_hours_per_week,
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            match_id = %request.id,
            caregiver_profile_id = %req.caregiver_profile_id,
            "Initiated match request"
        );
        Ok(request)
    }

    /// Accepts or declines a pending request. The targeted caregiver only.
    pub async fn respond(
        &self,
        ctx: &RequestContext,
        match_id: Uuid,
        action: MatchResponseAction,
    ) -> Result<MatchRequest, AppError> {
        if !ctx.is_caregiver() {
            return Err(AppError::authorization(
                "Only caregivers can respond to match requests",
            ));
        }
        let caregiver = self.own_caregiver_profile(ctx).await?;
        let request = self
            .match_repo
            .find_by_id(match_id)
            .await?
            .ok_or_else(|| AppError::not_found("Match request not found"))?;
        if request.caregiver_profile_id != caregiver.id {
            return Err(AppError::authorization(
                "Match request is addressed to another caregiver",
            ));
        }

        let updated = self
            .match_repo
            .transition_from_pending(match_id, action.resulting_status())
            .await?;
        match updated {
            Some(request) => {
                info!(
                    user_id = %ctx.user_id,
                    match_id = %request.id,
                    status = %request.status,
                    "Responded to match request"
                );
                Ok(request)
            }
            None => self.classify_lost_transition(match_id).await,
        }
    }

    /// Withdraws a pending request. The initiating family only.
    pub async fn withdraw(
        &self,
        ctx: &RequestContext,
        match_id: Uuid,
    ) -> Result<MatchRequest, AppError> {
        if !ctx.is_family() {
            return Err(AppError::authorization(
                "Only families can withdraw match requests",
            ));
        }
        let family = self.own_family_profile(ctx).await?;
        let request = self
            .match_repo
            .find_by_id(match_id)
            .await?
            .ok_or_else(|| AppError::not_found("Match request not found"))?;
        if request.family_profile_id != family.id {
            return Err(AppError::authorization(
                "Match request belongs to another family",
            ));
        }

        let updated = self
            .match_repo
            .transition_from_pending(match_id, MatchStatus::DeclinedByFamily)
            .await?;
        match updated {
            Some(request) => {
                info!(user_id = %ctx.user_id, match_id = %request.id, "Withdrew match request");
                Ok(request)
            }
            None => self.classify_lost_transition(match_id).await,
        }
    }

    /// Returns a single request, visible only to its two participants.
    pub async fn get(&self, ctx: &RequestContext, match_id: Uuid) -> Result<MatchRequest, AppError> {
        let request = self
            .match_repo
            .find_by_id(match_id)
            .await?
            .ok_or_else(|| AppError::not_found("Match request not found"))?;
        self.ensure_participant(ctx, &request).await?;
        Ok(request)
    }

    /// Lists the current user's requests on their side of the market,
    /// optionally filtered by status.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        status: Option<MatchStatus>,
        page: PageRequest,
    ) -> Result<PageResponse<MatchRequest>, AppError> {
        match ctx.role {
            UserRole::Family => {
                let family = self.own_family_profile(ctx).await?;
                self.match_repo.list_for_family(family.id, status, &page).await
            }
            UserRole::Caregiver => {
                let caregiver = self.own_caregiver_profile(ctx).await?;
                self.match_repo
                    .list_for_caregiver(caregiver.id, status, &page)
                    .await
            }
        }
    }

    /// Lists the current user's accepted (mutual) matches.
    pub async fn list_mutual(
        &self,
        ctx: &RequestContext,
        page: PageRequest,
    ) -> Result<PageResponse<MatchRequest>, AppError> {
        self.list(ctx, Some(MatchStatus::Accepted), page).await
    }

    /// A zero-row CAS means the request vanished or was already resolved;
    /// re-read to tell the two apart.
    async fn classify_lost_transition(&self, match_id: Uuid) -> Result<MatchRequest, AppError> {
        match self.match_repo.find_by_id(match_id).await? {
            None => Err(AppError::not_found("Match request not found")),
            Some(request) => Err(AppError::conflict(format!(
                "Match request was already resolved as {}",
                request.status
            ))),
        }
    }

    async fn ensure_participant(
        &self,
        ctx: &RequestContext,
        request: &MatchRequest,
    ) -> Result<(), AppError> {
        let is_participant = match ctx.role {
            UserRole::Family => self
                .family_repo
                .find_by_user_id(ctx.user_id)
                .await?
                .is_some_and(|p| p.id == request.family_profile_id),
            UserRole::Caregiver => self
                .caregiver_repo
                .find_by_user_id(ctx.user_id)
                .await?
                .is_some_and(|p| p.id == request.caregiver_profile_id),
        };
        if is_participant {
            Ok(())
        } else {
            Err(AppError::authorization(
                "Match request involves another user",
            ))
        }
    }

    async fn own_family_profile(
        &self,
        ctx: &RequestContext,
    ) -> Result<carelink_entity::profile::family::FamilyProfile, AppError> {
        self.family_repo
            .find_by_user_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Family profile not found"))
    }

    async fn own_caregiver_profile(
        &self,
        ctx: &RequestContext,
    ) -> Result<carelink_entity::profile::caregiver::CaregiverProfile, AppError> {
        self.caregiver_repo
            .find_by_user_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Caregiver profile not found"))
    }
}
