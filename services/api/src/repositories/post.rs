//! Post repository for database operations

use common::error::DatabaseResult;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use super::group::load_members;
use crate::models::{CreatePostRequest, PostResponse, PostRow, UpdatePostRequest};

const SELECT_POSTS: &str = r#"
    SELECT p.id, p.title, p.activity_type, p.body, p.image_url, p.location,
           p.created_at, p.updated_at,
           u.id AS user_id, u.name AS user_name,
           g.id AS group_id, g.name AS group_name, g.description AS group_description,
           g.image_url AS group_image_url, g.created_at AS group_created_at,
           g.updated_at AS group_updated_at
    FROM posts p
    JOIN users u ON u.id = p.user_id
    JOIN groups g ON g.id = p.group_id
"#;

/// Post repository
#[derive(Clone)]
pub struct PostRepository {
    pool: PgPool,
}

impl PostRepository {
    /// Create a new post repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a post authored by `user_id`
    pub async fn create(
        &self,
        payload: &CreatePostRequest,
        user_id: Uuid,
    ) -> DatabaseResult<Option<PostResponse>> {
        info!("Creating post in group {} for user {}", payload.group_id, user_id);

        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO posts (title, activity_type, body, image_url, location, group_id, user_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(&payload.title)
        .bind(payload.activity_type)
        .bind(&payload.body)
        .bind(&payload.image_url)
        .bind(&payload.location)
        .bind(payload.group_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        self.get_by_id(id).await
    }

    /// Get all posts, newest first
    pub async fn get_all(&self) -> DatabaseResult<Vec<PostResponse>> {
        let rows = sqlx::query_as::<_, PostRow>(&format!(
            "{} ORDER BY p.created_at DESC",
            SELECT_POSTS
        ))
        .fetch_all(&self.pool)
        .await?;

        self.with_members(rows).await
    }

    /// Get the posts of one group, newest first
    pub async fn get_by_group(&self, group_id: Uuid) -> DatabaseResult<Vec<PostResponse>> {
        info!("Finding posts for group: {}", group_id);

        let rows = sqlx::query_as::<_, PostRow>(&format!(
            "{} WHERE p.group_id = $1 ORDER BY p.created_at DESC",
            SELECT_POSTS
        ))
        .bind(group_id)
        .fetch_all(&self.pool)
        .await?;

        self.with_members(rows).await
    }

    /// Get a post by ID
    pub async fn get_by_id(&self, id: Uuid) -> DatabaseResult<Option<PostResponse>> {
        let row = sqlx::query_as::<_, PostRow>(&format!("{} WHERE p.id = $1", SELECT_POSTS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(self.with_members(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    /// Author of a post, if the post exists
    pub async fn get_owner(&self, id: Uuid) -> DatabaseResult<Option<Uuid>> {
        let owner = sqlx::query_scalar("SELECT user_id FROM posts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(owner)
    }

    /// Apply the provided fields; absent fields keep their value and `null` clears a nullable one
    pub async fn update(
        &self,
        id: Uuid,
        changes: &UpdatePostRequest,
    ) -> DatabaseResult<Option<PostResponse>> {
        info!("Updating post: {}", id);

        let updated = sqlx::query(
            r#"
            UPDATE posts
            SET title = COALESCE($2, title),
                activity_type = COALESCE($3, activity_type),
                body = CASE WHEN $4 THEN $5 ELSE body END,
                image_url = CASE WHEN $6 THEN $7 ELSE image_url END,
                location = CASE WHEN $8 THEN $9 ELSE location END,
                group_id = COALESCE($10, group_id),
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&changes.title)
        .bind(changes.activity_type)
        .bind(changes.body.is_some())
        .bind(changes.body.as_ref().and_then(Option::as_deref))
        .bind(changes.image_url.is_some())
        .bind(changes.image_url.as_ref().and_then(Option::as_deref))
        .bind(changes.location.is_some())
        .bind(changes.location.as_ref().and_then(Option::as_deref))
        .bind(changes.group_id)
        .execute(&self.pool)
        .await?;

        if updated.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_by_id(id).await
    }

    /// Delete a post by ID
    pub async fn delete(&self, id: Uuid) -> DatabaseResult<bool> {
        info!("Deleting post: {}", id);

        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn with_members(&self, rows: Vec<PostRow>) -> DatabaseResult<Vec<PostResponse>> {
        let mut group_ids: Vec<Uuid> = rows.iter().map(|r| r.group_id).collect();
        group_ids.sort_unstable();
        group_ids.dedup();

        let members = load_members(&self.pool, &group_ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let users = members.get(&row.group_id).cloned().unwrap_or_default();
                row.into_response(users)
            })
            .collect())
    }
}
