//! User repository for database operations

use common::error::DatabaseResult;
use sqlx::{PgPool, Row};
use std::collections::HashMap;
use tracing::info;
use uuid::Uuid;

use crate::models::{GroupSummary, UpdateUserRequest, User, UserResponse};

const USER_COLUMNS: &str = "id, email, name, password_hash, avatar_url, created_at, updated_at";

/// User repository
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new user from an already hashed password
    pub async fn create(&self, name: &str, email: &str, password_hash: &str) -> DatabaseResult<User> {
        info!("Creating new user: {}", email);

        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (name, email, password_hash) VALUES ($1, $2, $3) RETURNING {}",
            USER_COLUMNS
        ))
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    /// Find a user by email
    pub async fn find_by_email(&self, email: &str) -> DatabaseResult<Option<User>> {
        info!("Finding user by email: {}", email);

        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE email = $1",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Find a user by ID
    pub async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Get a user with its group memberships
    pub async fn get(&self, id: Uuid) -> DatabaseResult<Option<UserResponse>> {
        info!("Finding user by ID: {}", id);

        let Some(user) = self.find_by_id(id).await? else {
            return Ok(None);
        };
        let mut groups = self.load_groups(&[id]).await?;

        Ok(Some(user.into_response(groups.remove(&id).unwrap_or_default())))
    }

    /// Get all users with their group memberships
    pub async fn get_all(&self) -> DatabaseResult<Vec<UserResponse>> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users ORDER BY created_at DESC",
            USER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        let ids: Vec<Uuid> = users.iter().map(|u| u.id).collect();
        let mut groups = self.load_groups(&ids).await?;

        Ok(users
            .into_iter()
            .map(|user| {
                let memberships = groups.remove(&user.id).unwrap_or_default();
                user.into_response(memberships)
            })
            .collect())
    }

    /// Apply the provided fields; absent fields keep their value and `null` clears the avatar
    pub async fn update(
        &self,
        id: Uuid,
        changes: &UpdateUserRequest,
    ) -> DatabaseResult<Option<UserResponse>> {
        info!("Updating user: {}", id);

        let updated = sqlx::query(
            r#"
            UPDATE users
            SET name = COALESCE($2, name),
                email = COALESCE($3, email),
                avatar_url = CASE WHEN $4 THEN $5 ELSE avatar_url END,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&changes.name)
        .bind(&changes.email)
        .bind(changes.avatar_url.is_some())
        .bind(changes.avatar_url.as_ref().and_then(Option::as_deref))
        .execute(&self.pool)
        .await?;

        if updated.rows_affected() == 0 {
            return Ok(None);
        }

        self.get(id).await
    }

    /// Delete a user by ID
    pub async fn delete(&self, id: Uuid) -> DatabaseResult<bool> {
        info!("Deleting user: {}", id);

        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn load_groups(&self, user_ids: &[Uuid]) -> DatabaseResult<HashMap<Uuid, Vec<GroupSummary>>> {
        let rows = sqlx::query(
            r#"
            SELECT gu.user_id, g.id, g.name
            FROM group_users gu
            JOIN groups g ON g.id = gu.group_id
            WHERE gu.user_id = ANY($1)
            ORDER BY gu.created_at
            "#,
        )
        .bind(user_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut groups: HashMap<Uuid, Vec<GroupSummary>> = HashMap::new();
        for row in rows {
            groups
                .entry(row.get("user_id"))
                .or_default()
                .push(GroupSummary {
                    id: row.get("id"),
                    name: row.get("name"),
                });
        }

        Ok(groups)
    }
}
