//! Directory service: caregiver and family search, public caregiver
//! detail pages, and caregiver gallery/availability management.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use carelink_core::error::AppError;
use carelink_core::types::pagination::{PageRequest, PageResponse};
use carelink_database::repositories::caregiver_profile::{
    CaregiverListing, CaregiverSearchFilter,
};
use carelink_database::repositories::family_profile::{FamilyListing, FamilySearchFilter};
use carelink_database::repositories::{
    AvailabilityRepository, CaregiverProfileRepository, FamilyProfileRepository, PhotoRepository,
    ReviewRepository, UserRepository,
};
use carelink_entity::profile::availability::{AvailabilitySlot, NewAvailabilitySlot};
use carelink_entity::profile::photo::Photo;

use crate::context::RequestContext;

/// A caregiver's public detail page.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CaregiverDetail {
    /// Profile and public user fields.
    pub listing: CaregiverListing,
    /// Gallery photos, newest first.
    pub photos: Vec<Photo>,
    /// Weekly availability slots.
    pub availability: Vec<AvailabilitySlot>,
    /// Average review rating, absent when unreviewed.
    pub average_rating: Option<f64>,
}

/// Serves the marketplace directories and caregiver self-presentation.
#[derive(Debug, Clone)]
pub struct DirectoryService {
    /// Caregiver profile repository.
    caregiver_repo: Arc<CaregiverProfileRepository>,
    /// Family profile repository.
    family_repo: Arc<FamilyProfileRepository>,
    /// Availability slot repository.
    availability_repo: Arc<AvailabilityRepository>,
    /// Photo repository.
    photo_repo: Arc<PhotoRepository>,
    /// Review repository, for average ratings.
    review_repo: Arc<ReviewRepository>,
    /// User repository, for active checks.
    user_repo: Arc<UserRepository>,
}

impl DirectoryService {
    /// Creates a new directory service.
    pub fn new(
        caregiver_repo: Arc<CaregiverProfileRepository>,
        family_repo: Arc<FamilyProfileRepository>,
        availability_repo: Arc<AvailabilityRepository>,
        photo_repo: Arc<PhotoRepository>,
        review_repo: Arc<ReviewRepository>,
        user_repo: Arc<UserRepository>,
    ) -> Self {
        Self {
            caregiver_repo,
            family_repo,
            availability_repo,
            photo_repo,
            review_repo,
            user_repo,
        }
    }

    /// Searches the public caregiver directory.
    pub async fn search_caregivers(
        &self,
        filter: CaregiverSearchFilter,
        page: PageRequest,
    ) -> Result<PageResponse<CaregiverListing>, AppError> {
        if let (Some(min), Some(max)) = (filter.min_hourly_rate, filter.max_hourly_rate) {
            if min > max {
                return Err(AppError::validation(
                    "min_hourly_rate must not exceed max_hourly_rate",
                ));
            }
        }
        self.caregiver_repo.search(&filter, &page).await
    }

    /// Searches the family directory. Caregiver accounts only.
    pub async fn search_families(
        &self,
        ctx: &RequestContext,
        filter: FamilySearchFilter,
        page: PageRequest,
    ) -> Result<PageResponse<FamilyListing>, AppError> {
        if !ctx.is_caregiver() {
            return Err(AppError::authorization(
                "Only caregivers can browse family listings",
            ));
        }
        self.family_repo.search(&filter, &page).await
    }

    /// Returns a caregiver's public detail page.
    pub async fn caregiver_detail(&self, profile_id: Uuid) -> Result<CaregiverDetail, AppError> {
        let profile = self
            .caregiver_repo
            .find_by_id(profile_id)
            .await?
            .ok_or_else(|| AppError::not_found("Caregiver not found"))?;

        let user = self
            .user_repo
            .find_by_id(profile.user_id)
            .await?
            .filter(|u| u.is_active)
            .ok_or_else(|| AppError::not_found("Caregiver not found"))?;

        let photos = self.photo_repo.list_for_profile(profile.id).await?;
        let availability = self.availability_repo.list_for_profile(profile.id).await?;
        let average_rating = self.review_repo.average_rating(profile.id).await?;

        Ok(CaregiverDetail {
            listing: CaregiverListing {
                profile_id: profile.id,
                user_id: user.id,
                username: user.username,
                first_name: user.first_name,
                last_name: user.last_name,
                city: user.city,
                state: user.state,
                country: user.country,
                bio: user.bio,
                profile_picture: user.profile_picture,
                hourly_rate: profile.hourly_rate,
                years_of_experience: profile.years_of_experience,
                skills_description: profile.skills_description,
                certifications: profile.certifications,
                languages_spoken: profile.languages_spoken,
                availability_status: profile.availability_status,
            },
            photos,
            availability,
            average_rating,
        })
    }

    /// Adds a gallery photo to the current caregiver's profile.
    pub async fn add_photo(
        &self,
        ctx: &RequestContext,
        image_url: &str,
        caption: Option<&str>,
    ) -> Result<Photo, AppError> {
        if image_url.trim().is_empty() {
            return Err(AppError::validation("Image URL must not be empty"));
        }
        let profile = self.own_caregiver_profile(ctx).await?;
        let photo = self.photo_repo.create(profile.id, image_url, caption).await?;
        info!(user_id = %ctx.user_id, photo_id = %photo.id, "Added gallery photo");
        Ok(photo)
    }

    /// Deletes a gallery photo owned by the current caregiver.
    pub async fn delete_photo(&self, ctx: &RequestContext, photo_id: Uuid) -> Result<(), AppError> {
        let photo = self
            .photo_repo
            .find_by_id(photo_id)
            .await?
            .ok_or_else(|| AppError::not_found("Photo not found"))?;
        let profile = self.own_caregiver_profile(ctx).await?;
        if photo.caregiver_profile_id != profile.id {
            return Err(AppError::authorization("Photo belongs to another caregiver"));
        }
        self.photo_repo.delete(photo_id).await?;
        Ok(())
    }

    /// Adds a weekly availability slot for the current caregiver.
    ///
    /// Rejects inverted windows and slots overlapping an existing one on
    /// the same day.
    pub async fn add_availability(
        &self,
        ctx: &RequestContext,
        slot: NewAvailabilitySlot,
    ) -> Result<AvailabilitySlot, AppError> {
        if slot.start_time >= slot.end_time {
            return Err(AppError::validation("Slot start must be before its end"));
        }
        let profile = self.own_caregiver_profile(ctx).await?;

        let existing = self.availability_repo.list_for_profile(profile.id).await?;
        if overlaps_existing(&existing, profile.id, &slot, None) {
            return Err(AppError::conflict(
                "Slot overlaps an existing availability window",
            ));
        }

        self.availability_repo.create(profile.id, &slot).await
    }

    /// Lists the current caregiver's own availability slots.
    pub async fn list_availability(
        &self,
        ctx: &RequestContext,
    ) -> Result<Vec<AvailabilitySlot>, AppError> {
        let profile = self.own_caregiver_profile(ctx).await?;
        self.availability_repo.list_for_profile(profile.id).await
    }

    /// Replaces an availability slot owned by the current caregiver.
    ///
    /// The slot being edited is excluded from the overlap check so a
    /// window can be narrowed or shifted in place.
    pub async fn update_availability(
        &self,
        ctx: &RequestContext,
        slot_id: Uuid,
        slot: NewAvailabilitySlot,
    ) -> Result<AvailabilitySlot, AppError> {
        if slot.start_time >= slot.end_time {
            return Err(AppError::validation("Slot start must be before its end"));
        }
        let current = self
            .availability_repo
            .find_by_id(slot_id)
            .await?
            .ok_or_else(|| AppError::not_found("Availability slot not found"))?;
        let profile = self.own_caregiver_profile(ctx).await?;
        if current.caregiver_profile_id != profile.id {
            return Err(AppError::authorization("Slot belongs to another caregiver"));
        }

        let existing = self.availability_repo.list_for_profile(profile.id).await?;
        if overlaps_existing(&existing, profile.id, &slot, Some(slot_id)) {
            return Err(AppError::conflict(
                "Slot overlaps an existing availability window",
            ));
        }

        self.availability_repo
            .update(slot_id, &slot)
            .await?
            .ok_or_else(|| AppError::not_found("Availability slot not found"))
    }

    /// Deletes an availability slot owned by the current caregiver.
    pub async fn delete_availability(
        &self,
        ctx: &RequestContext,
        slot_id: Uuid,
    ) -> Result<(), AppError> {
        let slot = self
            .availability_repo
            .find_by_id(slot_id)
            .await?
            .ok_or_else(|| AppError::not_found("Availability slot not found"))?;
        let profile = self.own_caregiver_profile(ctx).await?;
        if slot.caregiver_profile_id != profile.id {
            return Err(AppError::authorization("Slot belongs to another caregiver"));
        }
        self.availability_repo.delete(slot_id).await?;
        Ok(())
    }

    async fn own_caregiver_profile(
        &self,
        ctx: &RequestContext,
    ) -> Result<carelink_entity::profile::caregiver::CaregiverProfile, AppError> {
        if !ctx.is_caregiver() {
            return Err(AppError::authorization(
                "Only caregivers can manage a caregiver profile",
            ));
        }
        self.caregiver_repo
            .find_by_user_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Caregiver profile not found"))
    }
}

/// Whether a proposed window overlaps any existing slot, skipping the
/// slot named by `exclude` (the one being edited).
fn overlaps_existing(
    existing: &[AvailabilitySlot],
    profile_id: Uuid,
    slot: &NewAvailabilitySlot,
    exclude: Option<Uuid>,
) -> bool {
    let candidate = AvailabilitySlot {
        id: Uuid::nil(),
        caregiver_profile_id: profile_id,
        day_of_week: slot.day_of_week,
        start_time: slot.start_time,
        end_time: slot.end_time,
    };
    existing
        .iter()
        .filter(|s| exclude != Some(s.id))
        .any(|s| s.overlaps(&candidate))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveTime;

    use carelink_entity::profile::availability::DayOfWeek;

    use super::*;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn slot(profile_id: Uuid, day: DayOfWeek, start: u32, end: u32) -> AvailabilitySlot {
        AvailabilitySlot {
            id: Uuid::new_v4(),
            caregiver_profile_id: profile_id,
            day_of_week: day,
            start_time: time(start, 0),
            end_time: time(end, 0),
        }
    }

    #[test]
    fn test_overlap_detected_against_existing_slots() {
        let profile_id = Uuid::new_v4();
        let existing = vec![slot(profile_id, DayOfWeek::Monday, 9, 12)];
        let candidate = NewAvailabilitySlot {
            day_of_week: DayOfWeek::Monday,
            start_time: time(11, 0),
            end_time: time(14, 0),
        };
        assert!(overlaps_existing(&existing, profile_id, &candidate, None));
    }

    #[test]
    fn test_editing_a_slot_ignores_its_own_window() {
        let profile_id = Uuid::new_v4();
        let monday = slot(profile_id, DayOfWeek::Monday, 9, 12);
        let existing = vec![monday.clone()];

        // Narrowing the same slot collides only with itself.
        let narrowed = NewAvailabilitySlot {
            day_of_week: DayOfWeek::Monday,
            start_time: time(10, 0),
            end_time: time(11, 0),
        };
        assert!(overlaps_existing(&existing, profile_id, &narrowed, None));
        assert!(!overlaps_existing(
            &existing,
            profile_id,
            &narrowed,
            Some(monday.id)
        ));
    }

    #[test]
    fn test_excluded_slot_does_not_mask_other_overlaps() {
        let profile_id = Uuid::new_v4();
        let edited = slot(profile_id, DayOfWeek::Monday, 9, 10);
        let other = slot(profile_id, DayOfWeek::Monday, 12, 14);
        let existing = vec![edited.clone(), other];

        let moved = NewAvailabilitySlot {
            day_of_week: DayOfWeek::Monday,
            start_time: time(13, 0),
            end_time: time(15, 0),
        };
        assert!(overlaps_existing(
            &existing,
            profile_id,
            &moved,
            Some(edited.id)
        ));
    }
}
