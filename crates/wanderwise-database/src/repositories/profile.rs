//! Profile repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use wanderwise_core::error::{AppError, ErrorKind};
use wanderwise_core::result::AppResult;
use wanderwise_entity::user::{ProfileRow, ProfileUpdate, Registration};

/// Repository for the `profiles` table.
#[derive(Debug, Clone)]
pub struct ProfileRepository {
    pool: PgPool,
}

impl ProfileRepository {
    /// Create a new profile repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a profile by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ProfileRow>> {
        sqlx::query_as::<_, ProfileRow>("SELECT * FROM profiles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find profile by id", e)
            })
    }

    /// Find a profile by email (case-insensitive).
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<ProfileRow>> {
        sqlx::query_as::<_, ProfileRow>("SELECT * FROM profiles WHERE LOWER(email) = LOWER($1)")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find profile by email", e)
            })
    }

    /// Insert a new profile and return it.
    ///
    /// A duplicate email or username is reported as a conflict.
    pub async fn create(
        &self,
        id: Uuid,
        registration: &Registration,
        password_hash: &str,
    ) -> AppResult<ProfileRow> {
        sqlx::query_as::<_, ProfileRow>(
            "INSERT INTO profiles \
                (id, email, username, password_hash, role, first_name, last_name, \
                 phone, date_of_birth, gender) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING *",
        )
        .bind(id)
        .bind(registration.email.trim())
        .bind(registration.username.trim())
        .bind(password_hash)
        .bind(registration.role.as_str())
        .bind(registration.first_name.trim())
        .bind(registration.last_name.trim())
        .bind(registration.phone.as_deref())
        .bind(registration.date_of_birth)
        .bind(registration.gender.map(|g| g.as_str()))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            let unique = e
                .as_database_error()
                .is_some_and(|db| db.is_unique_violation());
            if unique {
                AppError::conflict("An account with this email or username already exists")
            } else {
                AppError::with_source(ErrorKind::Database, "Failed to create profile", e)
            }
        })
    }

    /// Apply a partial profile update. Returns whether a row was changed.
    pub async fn update(&self, id: Uuid, update: &ProfileUpdate) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE profiles SET \
                first_name = COALESCE($2, first_name), \
                last_name = COALESCE($3, last_name), \
                phone = COALESCE($4, phone), \
                location = COALESCE($5, location), \
                bio = COALESCE($6, bio), \
                avatar_url = COALESCE($7, avatar_url), \
                languages = COALESCE($8, languages), \
                experience = COALESCE($9, experience), \
                date_of_birth = COALESCE($10, date_of_birth), \
                gender = COALESCE($11, gender), \
                updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(update.first_name.as_deref())
        .bind(update.last_name.as_deref())
        .bind(update.phone.as_deref())
        .bind(update.location.as_deref())
        .bind(update.bio.as_deref())
        .bind(update.avatar_url.as_deref())
        .bind(update.languages.as_deref())
        .bind(update.experience.as_deref())
        .bind(update.date_of_birth)
        .bind(update.gender.map(|g| g.as_str()))
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update profile", e))?;

        Ok(result.rows_affected() > 0)
    }

    /// Replace the stored password hash.
    pub async fn update_password_hash(&self, id: Uuid, password_hash: &str) -> AppResult<()> {
        sqlx::query("UPDATE profiles SET password_hash = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to update password", e)
            })?;
        Ok(())
    }
}
