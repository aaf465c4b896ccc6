//! Account service: registration, login, token refresh, and the
//! authenticated user's own account.

use std::sync::Arc;

use tracing::info;

use carelink_auth::jwt::{JwtDecoder, JwtEncoder, TokenPair};
use carelink_auth::password::{PasswordHasher, PasswordValidator};
use carelink_core::error::AppError;
use carelink_database::repositories::{
    CaregiverProfileRepository, FamilyProfileRepository, UserRepository,
};
use carelink_entity::profile::caregiver::{CaregiverProfile, UpdateCaregiverProfile};
use carelink_entity::profile::family::{FamilyProfile, UpdateFamilyProfile};
use carelink_entity::user::{CreateUser, UpdateUser, User, UserRole};

use crate::context::RequestContext;

/// Request to register a new account.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RegisterRequest {
    /// Desired username.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Plaintext password; hashed before storage.
    pub password: String,
    /// Marketplace side, fixed at registration.
    pub role: UserRole,
    /// First name (optional).
    pub first_name: Option<String>,
    /// Last name (optional).
    pub last_name: Option<String>,
}

/// Request to log in.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct LoginRequest {
    /// Username or email address.
    pub username: String,
    /// Plaintext password.
    pub password: String,
}

/// Successful login result.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct LoginResponse {
    /// The authenticated user.
    pub user: User,
    /// Fresh access and refresh tokens.
    pub tokens: TokenPair,
}

/// A user together with their role-specific profile.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AccountProfile {
    /// The account itself.
    pub user: User,
    /// Caregiver profile, present for caregiver accounts.
    pub caregiver_profile: Option<CaregiverProfile>,
    /// Family profile, present for family accounts.
    pub family_profile: Option<FamilyProfile>,
}

/// Manages account registration, authentication, and self-service
/// profile updates.
#[derive(Debug, Clone)]
pub struct AccountService {
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Caregiver profile repository.
    caregiver_repo: Arc<CaregiverProfileRepository>,
    /// Family profile repository.
    family_repo: Arc<FamilyProfileRepository>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Password policy validator.
    password_validator: Arc<PasswordValidator>,
    /// JWT encoder for token issuance.
    encoder: Arc<JwtEncoder>,
    /// JWT decoder for refresh tokens.
    decoder: Arc<JwtDecoder>,
}

impl AccountService {
    /// Creates a new account service.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_repo: Arc<UserRepository>,
        caregiver_repo: Arc<CaregiverProfileRepository>,
        family_repo: Arc<FamilyProfileRepository>,
        hasher: Arc<PasswordHasher>,
        password_validator: Arc<PasswordValidator>,
        encoder: Arc<JwtEncoder>,
        decoder: Arc<JwtDecoder>,
    ) -> Self {
        Self {
            user_repo,
            caregiver_repo,
            family_repo,
            hasher,
            password_validator,
            encoder,
            decoder,
        }
    }

    /// Registers a new account and its empty role profile atomically.
    pub async fn register(&self, req: RegisterRequest) -> Result<AccountProfile, AppError> {
        let username = req.username.trim();
        let email = req.email.trim();
        if username.is_empty() {
            return Err(AppError::validation("Username must not be empty"));
        }
        if !email.contains('@') {
            return Err(AppError::validation("Email address is not valid"));
        }
        self.password_validator.validate(&req.password)?;

        let password_hash = self.hasher.hash_password(&req.password)?;
        let create = CreateUser {
            username: username.to_string(),
            email: email.to_string(),
            password_hash,
            role: req.role,
            first_name: req.first_name,
            last_name: req.last_name,
        };

        let mut tx = self.user_repo.begin().await?;
        let user = self.user_repo.create_in_tx(&mut tx, &create).await?;

        let (caregiver_profile, family_profile) = match req.role {
            UserRole::Caregiver => {
                let profile = self.caregiver_repo.create_in_tx(&mut tx, user.id).await?;
                (Some(profile), None)
            }
            UserRole::Family => {
                let profile = self.family_repo.create_in_tx(&mut tx, user.id).await?;
                (None, Some(profile))
            }
        };

        tx.commit().await.map_err(|e| {
            AppError::with_source(
                carelink_core::error::ErrorKind::Database,
                "Failed to commit registration",
                e,
            )
        })?;

        info!(user_id = %user.id, role = %user.role, "Registered new account");

        Ok(AccountProfile {
            user,
            caregiver_profile,
            family_profile,
        })
    }

    /// Authenticates a user by username or email and issues tokens.
    pub async fn login(&self, req: LoginRequest) -> Result<LoginResponse, AppError> {
        let user = match self.user_repo.find_by_username(&req.username).await? {
            Some(user) => Some(user),
            None if req.username.contains('@') => {
                self.user_repo.find_by_email(&req.username).await?
            }
            None => None,
        };

        // Same error for unknown user and wrong password.
        let user = user.ok_or_else(|| AppError::authentication("Invalid credentials"))?;
        if !self
            .hasher
            .verify_password(&req.password, &user.password_hash)?
        {
            return Err(AppError::authentication("Invalid credentials"));
        }
        if !user.can_login() {
            return Err(AppError::authentication("Account is deactivated"));
        }

        self.user_repo.touch_last_login(user.id).await?;
        let tokens = self
            .encoder
            .generate_token_pair(user.id, user.role, &user.username)?;

        info!(user_id = %user.id, "User logged in");

        Ok(LoginResponse { user, tokens })
    }

    /// Exchanges a refresh token for a new access token.
    pub async fn refresh(
        &self,
        refresh_token: &str,
    ) -> Result<(String, chrono::DateTime<chrono::Utc>), AppError> {
        let claims = self.decoder.decode_refresh_token(refresh_token)?;
        let user = self
            .user_repo
            .find_by_id(claims.sub)
            .await?
            .ok_or_else(|| AppError::authentication("Account no longer exists"))?;
        if !user.can_login() {
            return Err(AppError::authentication("Account is deactivated"));
        }
        self.encoder
            .generate_access_token(user.id, user.role, &user.username)
    }

    /// Returns the current user's account with its role profile.
    pub async fn me(&self, ctx: &RequestContext) -> Result<AccountProfile, AppError> {
        let user = self
            .user_repo
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Account not found"))?;

        let (caregiver_profile, family_profile) = match user.role {
            UserRole::Caregiver => (self.caregiver_repo.find_by_user_id(user.id).await?, None),
            UserRole::Family => (None, self.family_repo.find_by_user_id(user.id).await?),
        };

        Ok(AccountProfile {
            user,
            caregiver_profile,
            family_profile,
        })
    }

    /// Updates the current user's shared account fields.
    pub async fn update_me(&self, ctx: &RequestContext, data: UpdateUser) -> Result<User, AppError> {
        self.user_repo
            .update(ctx.user_id, &data)
            .await?
            .ok_or_else(|| AppError::not_found("Account not found"))
    }

    /// Updates the current caregiver's role profile.
    pub async fn update_caregiver_profile(
        &self,
        ctx: &RequestContext,
        data: UpdateCaregiverProfile,
    ) -> Result<CaregiverProfile, AppError> {
        if !ctx.is_caregiver() {
            return Err(AppError::authorization(
                "Only caregivers can edit a caregiver profile",
            ));
        }
        let profile = self
            .caregiver_repo
            .find_by_user_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Caregiver profile not found"))?;
        self.caregiver_repo
            .update(profile.id, &data)
            .await?
            .ok_or_else(|| AppError::not_found("Caregiver profile not found"))
    }

    /// Updates the current family's role profile.
    pub async fn update_family_profile(
        &self,
        ctx: &RequestContext,
        data: UpdateFamilyProfile,
    ) -> Result<FamilyProfile, AppError> {
        if !ctx.is_family() {
            return Err(AppError::authorization(
                "Only families can edit a family profile",
            ));
        }
        let profile = self
            .family_repo
            .find_by_user_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Family profile not found"))?;
        self.family_repo
            .update(profile.id, &data)
            .await?
            .ok_or_else(|| AppError::not_found("Family profile not found"))
    }

    /// Deactivates the current user's account.
    pub async fn deactivate(&self, ctx: &RequestContext) -> Result<(), AppError> {
        if !self.user_repo.deactivate(ctx.user_id).await? {
            return Err(AppError::not_found("Account not found"));
        }
        info!(user_id = %ctx.user_id, "Account deactivated");
        Ok(())
    }
}
