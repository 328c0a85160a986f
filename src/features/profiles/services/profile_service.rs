use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::session::{ProfileSource, RetryPolicy};
use crate::features::profiles::dtos::{ProfileResponseDto, UpdateProfileDto};
use crate::features::profiles::models::Profile;

const SELECT_COLUMNS: &str =
    "id, user_id, email, phone, setor, is_admin, is_blocked, created_at";

/// Service for profile rows
pub struct ProfileService {
    pool: PgPool,
    retry: RetryPolicy,
}

impl ProfileService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            retry: RetryPolicy::default(),
        }
    }

    /// Single-attempt lookup. A missing row is the expected state right
    /// after sign-up (the provider-side trigger has not run yet) and is
    /// returned as `None`, not as an error.
    pub async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Profile>> {
        let profile = sqlx::query_as::<_, Profile>(&format!(
            "SELECT {} FROM profiles WHERE user_id = $1",
            SELECT_COLUMNS
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch profile: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(profile)
    }

    /// Lookup under the bounded retry policy: transient failures are
    /// retried with a fixed backoff and degrade to `None` on exhaustion, so
    /// callers never hang on a profile that cannot be resolved.
    pub async fn fetch_with_retry(&self, user_id: Uuid) -> Option<Profile> {
        let mut remaining = self.retry.max_attempts;

        while remaining > 0 {
            match self.find_by_user_id(user_id).await {
                Ok(found) => return found,
                Err(e) => {
                    remaining -= 1;
                    tracing::warn!("Profile fetch attempt failed: {}", e);
                    if remaining > 0 {
                        tokio::time::sleep(self.retry.backoff).await;
                    }
                }
            }
        }

        tracing::warn!("All profile fetch attempts failed for {}", user_id);
        None
    }

    /// List all profiles, newest first (admin user management)
    pub async fn list(&self, search: Option<&str>) -> Result<Vec<ProfileResponseDto>> {
        let profiles = sqlx::query_as::<_, Profile>(&format!(
            "SELECT {} FROM profiles ORDER BY created_at DESC",
            SELECT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list profiles: {:?}", e);
            AppError::Database(e)
        })?;

        let filtered = match search {
            Some(term) if !term.trim().is_empty() => profiles
                .into_iter()
                .filter(|p| Self::matches_search(p, term))
                .collect(),
            _ => profiles,
        };

        Ok(filtered.into_iter().map(Into::into).collect())
    }

    /// Case-insensitive substring match across email, phone and sector
    pub fn matches_search(profile: &Profile, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }

        profile.email.to_lowercase().contains(&term)
            || profile
                .phone
                .as_deref()
                .is_some_and(|p| p.to_lowercase().contains(&term))
            || profile.setor.to_lowercase().contains(&term)
    }

    /// Admin update of sector, phone and the admin/blocked flags
    pub async fn update(&self, id: Uuid, dto: UpdateProfileDto) -> Result<ProfileResponseDto> {
        let profile = sqlx::query_as::<_, Profile>(&format!(
            r#"
            UPDATE profiles
            SET phone = COALESCE($1, phone),
                setor = COALESCE($2, setor),
                is_admin = COALESCE($3, is_admin),
                is_blocked = COALESCE($4, is_blocked)
            WHERE id = $5
            RETURNING {}
            "#,
            SELECT_COLUMNS
        ))
        .bind(dto.phone)
        .bind(dto.setor.map(|s| s.as_str().to_string()))
        .bind(dto.is_admin)
        .bind(dto.is_blocked)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update profile: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound(format!("Profile {} not found", id)))?;

        Ok(profile.into())
    }

    /// Remove the profile row. The underlying identity record at the auth
    /// provider is intentionally left in place (administrative removal of
    /// the application profile, not of the account).
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM profiles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete profile: {:?}", e);
                AppError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Profile {} not found", id)));
        }

        tracing::info!("Profile deleted: {}", id);
        Ok(())
    }
}

#[async_trait]
impl ProfileSource for ProfileService {
    async fn profile_by_user_id(&self, user_id: Uuid) -> Result<Option<Profile>> {
        self.find_by_user_id(user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn profile(email: &str, phone: Option<&str>, setor: &str) -> Profile {
        Profile {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            email: email.to_string(),
            phone: phone.map(String::from),
            setor: setor.to_string(),
            is_admin: false,
            is_blocked: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_search_matches_email_case_insensitively() {
        let p = profile("Maria@Loja.com.br", None, "varejo");
        assert!(ProfileService::matches_search(&p, "maria"));
        assert!(ProfileService::matches_search(&p, "LOJA"));
        assert!(!ProfileService::matches_search(&p, "joao"));
    }

    #[test]
    fn test_search_matches_phone_and_sector() {
        let p = profile("user@example.com", Some("85 98765-4321"), "revenda");
        assert!(ProfileService::matches_search(&p, "98765"));
        assert!(ProfileService::matches_search(&p, "revenda"));
        assert!(!ProfileService::matches_search(&p, "varejo"));
    }

    #[test]
    fn test_blank_search_matches_everything() {
        let p = profile("user@example.com", None, "varejo");
        assert!(ProfileService::matches_search(&p, ""));
        assert!(ProfileService::matches_search(&p, "   "));
    }
}
