//! User account repository.

use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use carelink_core::error::{AppError, ErrorKind};
use carelink_core::result::AppResult;
use carelink_entity::user::model::{CreateUser, UpdateUser, User};

/// Repository for user account CRUD and lookup operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Begin a transaction on the underlying pool.
    ///
    /// Registration inserts the user row and its empty role profile
    /// atomically, so callers need direct transaction access.
    pub async fn begin(&self) -> AppResult<Transaction<'static, Postgres>> {
        self.pool
            .begin()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e))
    }

    /// Find a user by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user", e))
    }

    /// Find a user by username.
    pub async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by username", e)
            })
    }

    /// Find a user by email.
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by email", e)
            })
    }

    /// Insert a new user inside an existing transaction.
    ///
    /// A unique violation on username or email surfaces as `Conflict`.
    pub async fn create_in_tx(
        &self,
        tx: &mut Transaction<'static, Postgres>,
        data: &CreateUser,
    ) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (username, email, password_hash, role, first_name, last_name) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(&data.username)
        .bind(&data.email)
        .bind(&data.password_hash)
        .bind(data.role)
        .bind(&data.first_name)
        .bind(&data.last_name)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::conflict("Username or email is already taken")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create user", e),
        })
    }

    /// Apply a partial update to a user's shared account fields.
    pub async fn update(&self, id: Uuid, data: &UpdateUser) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET \
             first_name = COALESCE($2, first_name), \
             last_name = COALESCE($3, last_name), \
             phone_number = COALESCE($4, phone_number), \
             address = COALESCE($5, address), \
             city = COALESCE($6, city), \
             state = COALESCE($7, state), \
             country = COALESCE($8, country), \
             bio = COALESCE($9, bio), \
             profile_picture = COALESCE($10, profile_picture), \
             updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(&data.phone_number)
        .bind(&data.address)
        .bind(&data.city)
        .bind(&data.state)
        .bind(&data.country)
        .bind(&data.bio)
        .bind(&data.profile_picture)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update user", e))
    }

    /// Record a successful login.
    pub async fn touch_last_login(&self, id: Uuid) -> AppResult<()> {
        sqlx::query("UPDATE users SET last_login_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to record login time", e)
            })?;
        Ok(())
    }

    /// Deactivate an account, hiding it from listings and blocking login.
    pub async fn deactivate(&self, id: Uuid) -> AppResult<bool> {
        let result =
            sqlx::query("UPDATE users SET is_active = FALSE, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to deactivate user", e)
                })?;
        Ok(result.rows_affected() > 0)
    }
}
