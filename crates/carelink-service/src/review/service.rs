//! Review service.
//!
//! Reviews are gated on an accepted match: a family may review a
//! caregiver only after working with them, and only once per pair (the
//! UNIQUE constraint backs that up under concurrency).

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use carelink_core::error::AppError;
use carelink_core::types::pagination::{PageRequest, PageResponse};
use carelink_database::repositories::review::ReviewListing;
use carelink_database::repositories::{
    CaregiverProfileRepository, FamilyProfileRepository, MatchRequestRepository, ReviewRepository,
};
use carelink_entity::review::model::{CreateReview, Review, rating_in_range};

use crate::context::RequestContext;

/// Request to review a caregiver.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SubmitReviewRequest {
    /// Reviewed caregiver profile.
    pub caregiver_profile_id: Uuid,
    /// Rating in `[1, 5]`.
    pub rating: i16,
    /// Optional comment.
    pub comment: Option<String>,
}

/// Manages caregiver reviews.
#[derive(Debug, Clone)]
pub struct ReviewService {
    /// Review repository.
    review_repo: Arc<ReviewRepository>,
    /// Match request repository, for the accepted-match gate.
    match_repo: Arc<MatchRequestRepository>,
    /// Caregiver profile repository.
    caregiver_repo: Arc<CaregiverProfileRepository>,
    /// Family profile repository.
    family_repo: Arc<FamilyProfileRepository>,
}

impl ReviewService {
    /// Creates a new review service.
    pub fn new(
        review_repo: Arc<ReviewRepository>,
        match_repo: Arc<MatchRequestRepository>,
        caregiver_repo: Arc<CaregiverProfileRepository>,
        family_repo: Arc<FamilyProfileRepository>,
    ) -> Self {
        Self {
            review_repo,
            match_repo,
            caregiver_repo,
            family_repo,
        }
    }

    /// Submits a review of a caregiver. Families with an accepted match
    /// only, one review per pair.
    pub async fn submit(
        &self,
        ctx: &RequestContext,
        req: SubmitReviewRequest,
    ) -> Result<Review, AppError> {
        if !ctx.is_family() {
            return Err(AppError::authorization("Only families can submit reviews"));
        }
        if !rating_in_range(req.rating) {
            return Err(AppError::validation("Rating must be between 1 and 5"));
        }

        let family = self.own_family_profile(ctx).await?;
        self.caregiver_repo
            .find_by_id(req.caregiver_profile_id)
            .await?
            .ok_or_else(|| AppError::not_found("Caregiver not found"))?;

        if !self
            .match_repo
            .exists_accepted_between(family.id, req.caregiver_profile_id)
            .await?
        {
            return Err(AppError::authorization(
                "Reviews require an accepted match with the caregiver",
            ));
        }

        let review = self
            .review_repo
            .create(&CreateReview {
                family_profile_id: family.id,
                caregiver_profile_id: req.caregiver_profile_id,
                rating: req.rating,
                comment: req.comment,
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            review_id = %review.id,
            caregiver_profile_id = %req.caregiver_profile_id,
            "Submitted review"
        );
        Ok(review)
    }

    /// Edits the current family's own review.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        review_id: Uuid,
        rating: Option<i16>,
        comment: Option<&str>,
    ) -> Result<Review, AppError> {
        if let Some(rating) = rating {
            if !rating_in_range(rating) {
                return Err(AppError::validation("Rating must be between 1 and 5"));
            }
        }
        self.own_review(ctx, review_id).await?;
        self.review_repo
            .update(review_id, rating, comment)
            .await?
            .ok_or_else(|| AppError::not_found("Review not found"))
    }

    /// Deletes the current family's own review.
    pub async fn delete(&self, ctx: &RequestContext, review_id: Uuid) -> Result<(), AppError> {
        self.own_review(ctx, review_id).await?;
        self.review_repo.delete(review_id).await?;
        Ok(())
    }

    /// Lists reviews of a caregiver, public.
    pub async fn list_for_caregiver(
        &self,
        caregiver_profile_id: Uuid,
        page: PageRequest,
    ) -> Result<PageResponse<ReviewListing>, AppError> {
        self.caregiver_repo
            .find_by_id(caregiver_profile_id)
            .await?
            .ok_or_else(|| AppError::not_found("Caregiver not found"))?;
        self.review_repo
            .list_for_caregiver(caregiver_profile_id, &page)
            .await
    }

    async fn own_review(&self, ctx: &RequestContext, review_id: Uuid) -> Result<Review, AppError> {
        let review = self
            .review_repo
            .find_by_id(review_id)
            .await?
            .ok_or_else(|| AppError::not_found("Review not found"))?;
        let family = self.own_family_profile(ctx).await?;
        if review.family_profile_id != family.id {
            return Err(AppError::authorization("Review belongs to another family"));
        }
        Ok(review)
    }

    async fn own_family_profile(
        &self,
        ctx: &RequestContext,
    ) -> Result<carelink_entity::profile::family::FamilyProfile, AppError> {
        if !ctx.is_family() {
            return Err(AppError::authorization("Only families can manage reviews"));
        }
        self.family_repo
            .find_by_user_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Family profile not found"))
    }
}
