//! Request DTOs with input validation.

use chrono::{DateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use carelink_entity::matching::status::{MatchResponseAction, MatchStatus};
use carelink_entity::profile::availability::DayOfWeek;
use carelink_entity::user::UserRole;

/// Registration payload.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterBody {
    /// Desired username.
    #[validate(length(min = 3, max = 100, message = "Username must be 3-100 characters"))]
    pub username: String,
    /// Email address.
    #[validate(email(message = "Email address is not valid"))]
    pub email: String,
    /// Plaintext password.
    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,
    /// Marketplace side, fixed at registration.
    pub role: UserRole,
    /// First name.
    #[validate(length(max = 100))]
    pub first_name: Option<String>,
    /// Last name.
    #[validate(length(max = 100))]
    pub last_name: Option<String>,
}

/// Login payload. `username` also accepts an email address.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginBody {
    /// Username or email.
    #[validate(length(min = 1, message = "Username must not be empty"))]
    pub username: String,
    /// Plaintext password.
    #[validate(length(min = 1, message = "Password must not be empty"))]
    pub password: String,
}

/// Token refresh payload.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RefreshBody {
    /// A valid refresh token.
    #[validate(length(min = 1, message = "Refresh token must not be empty"))]
    pub refresh_token: String,
}

/// Gallery photo payload.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddPhotoBody {
    /// Image URL.
    #[validate(length(min = 1, max = 500, message = "image_url must be 1-500 characters"))]
    pub image_url: String,
    /// Optional caption.
    #[validate(length(max = 500))]
    pub caption: Option<String>,
}

/// Weekly availability slot payload.
#[derive(Debug, Clone, Deserialize)]
pub struct AddAvailabilityBody {
    /// Day of the week.
    pub day_of_week: DayOfWeek,
    /// Window start, e.g. `"09:00:00"`.
    pub start_time: NaiveTime,
    /// Window end.
    pub end_time: NaiveTime,
}

/// Match request initiation payload.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct InitiateMatchBody {
    /// Targeted caregiver profile.
    pub caregiver_profile_id: Uuid,
    /// Optional note to the caregiver.
    #[validate(length(max = 2000))]
    pub message_to_caregiver: Option<String>,
    /// Proposed start date.
    pub proposed_start_date: Option<DateTime<Utc>>,
    /// Requested weekly hours.
    #[validate(range(min = 1, max = 168))]
    pub requested_hours_per_week: Option<i32>,
}

/// A caregiver's answer to a pending match request.
#[derive(Debug, Clone, Deserialize)]
pub struct RespondMatchBody {
    /// `"accept"` or `"decline"`.
    pub action: MatchResponseAction,
}

/// Conversation open payload.
#[derive(Debug, Clone, Deserialize)]
pub struct StartConversationBody {
    /// The other participant.
    pub user_id: Uuid,
}

/// New message payload.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PostMessageBody {
    /// Message text.
    #[validate(length(min = 1, max = 5000, message = "Message must be 1-5000 characters"))]
    pub body: String,
}

/// Review submission payload.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubmitReviewBody {
    /// Reviewed caregiver profile.
    pub caregiver_profile_id: Uuid,
    /// Rating in `[1, 5]`.
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i16,
    /// Optional comment.
    #[validate(length(max = 2000))]
    pub comment: Option<String>,
}

/// Review edit payload. Absent fields retain their prior value.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateReviewBody {
    /// New rating.
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: Option<i16>,
    /// New comment.
    #[validate(length(max = 2000))]
    pub comment: Option<String>,
}

/// Payment initiation payload.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct InitiatePaymentBody {
    /// Receiving user.
    pub payee_id: Uuid,
    /// The match this payment references, if any.
    pub match_request_id: Option<Uuid>,
    /// Payment amount.
    pub amount: Decimal,
    /// ISO currency code.
    #[validate(length(min = 3, max = 3, message = "Currency must be a 3-letter code"))]
    pub currency: String,
}

/// Payment execution payload, carrying the provider's payer id from the
/// approval redirect.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ExecutePaymentBody {
    /// Provider payer id.
    #[validate(length(min = 1, message = "payer_id must not be empty"))]
    pub payer_id: String,
}

/// Caregiver directory query string: filters plus pagination.
#[derive(Debug, Clone, Deserialize)]
pub struct CaregiverSearchQuery {
    /// Page number (1-based).
    pub page: Option<u64>,
    /// Items per page.
    pub per_page: Option<u64>,
    /// Case-insensitive city filter.
    pub city: Option<String>,
    /// Minimum hourly rate.
    pub min_hourly_rate: Option<Decimal>,
    /// Maximum hourly rate.
    pub max_hourly_rate: Option<Decimal>,
    /// Minimum years of experience.
    pub min_years_of_experience: Option<i32>,
    /// Availability headline filter.
    pub availability_status: Option<String>,
    /// Spoken language filter.
    pub language: Option<String>,
}

/// Family directory query string: filters plus pagination.
#[derive(Debug, Clone, Deserialize)]
pub struct FamilySearchQuery {
    /// Page number (1-based).
    pub page: Option<u64>,
    /// Items per page.
    pub per_page: Option<u64>,
    /// Case-insensitive city filter.
    pub city: Option<String>,
    /// Preferred care type filter.
    pub preferred_care_type: Option<String>,
    /// Maximum number of children.
    pub max_children: Option<i32>,
}

/// Match list query string.
#[derive(Debug, Clone, Deserialize)]
pub struct MatchListQuery {
    /// Page number (1-based).
    pub page: Option<u64>,
    /// Items per page.
    pub per_page: Option<u64>,
    /// Status filter.
    pub status: Option<MatchStatus>,
}
