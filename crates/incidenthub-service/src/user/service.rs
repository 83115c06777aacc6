//! User operations — login, token refresh, profile, password changes, and
//! admin management.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use incidenthub_auth::password::policy::meets_complexity;
use incidenthub_auth::password::{PasswordHasher, PasswordPolicy};
use incidenthub_auth::token::{TokenDecoder, TokenEncoder};
use incidenthub_core::error::AppError;
use incidenthub_core::types::pagination::{PageRequest, PageResponse};
use incidenthub_database::repositories::user::UserRepository;
use incidenthub_entity::user::model::{CreateUser, UpdateUser};
use incidenthub_entity::user::{User, UserRole, UserStatus};

use crate::context::CurrentUser;

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    /// The authenticated user.
    pub user: User,
    /// Signed access token.
    pub access_token: String,
    /// Access token expiry.
    pub access_expires_at: DateTime<Utc>,
    /// Signed refresh token.
    pub refresh_token: String,
    /// Refresh token expiry.
    pub refresh_expires_at: DateTime<Utc>,
    /// Whether the password is past its maximum age.
    pub password_expired: bool,
}

/// Result of a successful token refresh.
#[derive(Debug, Clone)]
pub struct RefreshOutcome {
    /// Fresh access token.
    pub access_token: String,
    /// Access token expiry.
    pub access_expires_at: DateTime<Utc>,
}

/// Handles user authentication, self-service, and admin management.
#[derive(Debug, Clone)]
pub struct UserService {
    user_repo: Arc<UserRepository>,
    encoder: Arc<TokenEncoder>,
    decoder: Arc<TokenDecoder>,
    hasher: Arc<PasswordHasher>,
    policy: Arc<PasswordPolicy>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        encoder: Arc<TokenEncoder>,
        decoder: Arc<TokenDecoder>,
        hasher: Arc<PasswordHasher>,
        policy: Arc<PasswordPolicy>,
    ) -> Self {
        Self {
            user_repo,
            encoder,
            decoder,
            hasher,
            policy,
        }
    }

    /// Authenticates a username/password pair and issues a token pair.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginOutcome, AppError> {
        let user = self
            .user_repo
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::authentication("Invalid username or password"))?;

        if !user.can_login() {
            return Err(AppError::authentication("Account is inactive"));
        }

        if !self.hasher.verify(password, &user.password_hash)? {
            return Err(AppError::authentication("Invalid username or password"));
        }

        let (access_token, access_expires_at) = self.encoder.sign_access(&user)?;
        let (refresh_token, refresh_expires_at) = self.encoder.sign_refresh(user.id)?;
        let password_expired = self.policy.is_expired_for(&user);

        info!(user_id = user.id, username = %user.username, "User logged in");

        Ok(LoginOutcome {
            user,
            access_token,
            access_expires_at,
            refresh_token,
            refresh_expires_at,
            password_expired,
        })
    }

    /// Exchanges a valid refresh token for a fresh access token.
    pub async fn refresh(&self, refresh_token: &str) -> Result<RefreshOutcome, AppError> {
        let claims = self
            .decoder
            .verify_refresh(refresh_token)
            .map_err(|_| AppError::authentication("Invalid or expired refresh token"))?;

        let user = self
            .user_repo
            .find_by_id(claims.id)
            .await?
            .ok_or_else(|| AppError::authentication("User no longer exists"))?;

        if !user.can_login() {
            return Err(AppError::authentication("Account is inactive"));
        }

        let (access_token, access_expires_at) = self.encoder.sign_access(&user)?;

        Ok(RefreshOutcome {
            access_token,
            access_expires_at,
        })
    }

    /// Gets the acting user's full profile.
    pub async fn get_profile(&self, ctx: &CurrentUser) -> Result<User, AppError> {
        self.user_repo
            .find_by_id(ctx.id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Changes the acting user's password.
    ///
    /// The current password must verify and the new one must meet the
    /// complexity rules. The repository refreshes `password_changed_at`,
    /// which clears any expiry gate on the next request.
    pub async fn change_password(
        &self,
        ctx: &CurrentUser,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        let user = self.get_profile(ctx).await?;

        if !self.hasher.verify(current_password, &user.password_hash)? {
            return Err(AppError::validation("Current password is incorrect"));
        }

        if !meets_complexity(new_password) {
            return Err(AppError::validation(
                "Password must be at least 8 characters and contain an uppercase letter, \
                 a lowercase letter, a digit, and a symbol",
            ));
        }

        let hash = self.hasher.hash(new_password)?;
        self.user_repo.update_password(user.id, &hash).await?;

        info!(user_id = user.id, "Password changed");
        Ok(())
    }

    // ── Admin operations (routes are system-admin gated) ─────────

    /// Lists users with pagination.
    pub async fn list_users(&self, page: &PageRequest) -> Result<PageResponse<User>, AppError> {
        self.user_repo.find_all(page).await
    }

    /// Gets a user by ID.
    pub async fn get_user(&self, id: i64) -> Result<User, AppError> {
        self.user_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {id} not found")))
    }

    /// Creates a new user account with a hashed password.
    pub async fn create_user(
        &self,
        username: String,
        fullname: String,
        position: Option<String>,
        password: &str,
        role: UserRole,
    ) -> Result<User, AppError> {
        if !meets_complexity(password) {
            return Err(AppError::validation(
                "Password must be at least 8 characters and contain an uppercase letter, \
                 a lowercase letter, a digit, and a symbol",
            ));
        }

        let password_hash = self.hasher.hash(password)?;
        let user = self
            .user_repo
            .create(&CreateUser {
                username,
                fullname,
                position,
                password_hash,
                role,
            })
            .await?;

        info!(user_id = user.id, username = %user.username, "User created");
        Ok(user)
    }

    /// Updates a user's profile fields.
    pub async fn update_user(&self, data: &UpdateUser) -> Result<User, AppError> {
        self.user_repo.update(data).await
    }

    /// Changes a user's role.
    pub async fn change_role(&self, user_id: i64, role: UserRole) -> Result<User, AppError> {
        self.user_repo.update_role(user_id, role).await
    }

    /// Changes a user's account status.
    pub async fn change_status(&self, user_id: i64, status: UserStatus) -> Result<User, AppError> {
        self.user_repo.update_status(user_id, status).await
    }

    /// Resets a user's password to an admin-supplied value.
    pub async fn reset_password(&self, user_id: i64, new_password: &str) -> Result<(), AppError> {
        if !meets_complexity(new_password) {
            return Err(AppError::validation(
                "Password must be at least 8 characters and contain an uppercase letter, \
                 a lowercase letter, a digit, and a symbol",
            ));
        }
        let hash = self.hasher.hash(new_password)?;
        self.user_repo.update_password(user_id, &hash).await?;
        info!(user_id, "Password reset by admin");
        Ok(())
    }

    /// Deletes a user account.
    pub async fn delete_user(&self, user_id: i64) -> Result<(), AppError> {
        if !self.user_repo.delete(user_id).await? {
            return Err(AppError::not_found(format!("User {user_id} not found")));
        }
        Ok(())
    }
}
