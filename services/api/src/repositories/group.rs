//! Group repository for database operations

use common::error::DatabaseResult;
use sqlx::{PgPool, Row};
use std::collections::HashMap;
use tracing::info;
use uuid::Uuid;

use super::contains_pattern;
use crate::models::{
    CreateGroupRequest, Group, GroupResponse, MembershipResponse, UpdateGroupRequest, UserSummary,
};

const GROUP_COLUMNS: &str = "g.id, g.name, g.description, g.image_url, g.created_at, g.updated_at";

/// Load the members of each group, in join order
pub(crate) async fn load_members(
    pool: &PgPool,
    group_ids: &[Uuid],
) -> DatabaseResult<HashMap<Uuid, Vec<UserSummary>>> {
    let rows = sqlx::query(
        r#"
        SELECT gu.group_id, u.id, u.name
        FROM group_users gu
        JOIN users u ON u.id = gu.user_id
        WHERE gu.group_id = ANY($1)
        ORDER BY gu.created_at
        "#,
    )
    .bind(group_ids)
    .fetch_all(pool)
    .await?;

    let mut members: HashMap<Uuid, Vec<UserSummary>> = HashMap::new();
    for row in rows {
        members
            .entry(row.get("group_id"))
            .or_default()
            .push(UserSummary {
                id: row.get("id"),
                name: row.get("name"),
            });
    }

    Ok(members)
}

/// Group repository
#[derive(Clone)]
pub struct GroupRepository {
    pool: PgPool,
}

impl GroupRepository {
    /// Create a new group repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a group and join its creator as the first member
    ///
    /// Both rows are written in one transaction, so a failed join leaves no group behind.
    pub async fn create(
        &self,
        payload: &CreateGroupRequest,
        owner_id: Uuid,
    ) -> DatabaseResult<GroupResponse> {
        info!("Creating group {} for user {}", payload.name, owner_id);

        let mut tx = self.pool.begin().await?;

        let group = sqlx::query_as::<_, Group>(
            r#"
            INSERT INTO groups (name, description, image_url)
            VALUES ($1, $2, $3)
            RETURNING id, name, description, image_url, created_at, updated_at
            "#,
        )
        .bind(&payload.name)
        .bind(&payload.description)
        .bind(&payload.image_url)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("INSERT INTO group_users (user_id, group_id) VALUES ($1, $2)")
            .bind(owner_id)
            .bind(group.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        let mut members = load_members(&self.pool, &[group.id]).await?;
        let users = members.remove(&group.id).unwrap_or_default();
        Ok(group.into_response(users))
    }

    /// Get all groups
    pub async fn get_all(&self) -> DatabaseResult<Vec<GroupResponse>> {
        let groups = sqlx::query_as::<_, Group>(&format!(
            "SELECT {} FROM groups g ORDER BY g.created_at DESC",
            GROUP_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        self.with_members(groups).await
    }

    /// Groups the user has not joined yet
    pub async fn get_not_joined(&self, user_id: Uuid) -> DatabaseResult<Vec<GroupResponse>> {
        info!("Finding groups to explore for user: {}", user_id);

        let groups = sqlx::query_as::<_, Group>(&format!(
            r#"
            SELECT {}
            FROM groups g
            WHERE NOT EXISTS (
                SELECT 1 FROM group_users gu WHERE gu.group_id = g.id AND gu.user_id = $1
            )
            ORDER BY g.created_at DESC
            "#,
            GROUP_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        self.with_members(groups).await
    }

    /// Groups whose name contains `name`, ignoring case
    pub async fn search_by_name(&self, name: &str) -> DatabaseResult<Vec<GroupResponse>> {
        let groups = sqlx::query_as::<_, Group>(&format!(
            "SELECT {} FROM groups g WHERE g.name ILIKE $1 ORDER BY g.name",
            GROUP_COLUMNS
        ))
        .bind(contains_pattern(name))
        .fetch_all(&self.pool)
        .await?;

        self.with_members(groups).await
    }

    /// The user's groups whose name contains `name`, ignoring case
    pub async fn search_user_groups(
        &self,
        user_id: Uuid,
        name: &str,
    ) -> DatabaseResult<Vec<GroupResponse>> {
        let groups = sqlx::query_as::<_, Group>(&format!(
            r#"
            SELECT {}
            FROM groups g
            JOIN group_users gu ON gu.group_id = g.id
            WHERE gu.user_id = $1 AND g.name ILIKE $2
            ORDER BY g.name
            "#,
            GROUP_COLUMNS
        ))
        .bind(user_id)
        .bind(contains_pattern(name))
        .fetch_all(&self.pool)
        .await?;

        self.with_members(groups).await
    }

    /// Get a group by ID
    pub async fn get_by_id(&self, id: Uuid) -> DatabaseResult<Option<GroupResponse>> {
        let group = sqlx::query_as::<_, Group>(&format!(
            "SELECT {} FROM groups g WHERE g.id = $1",
            GROUP_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match group {
            Some(group) => Ok(self.with_members(vec![group]).await?.pop()),
            None => Ok(None),
        }
    }

    /// Apply the provided fields; absent fields keep their value and `null` clears a nullable one
    pub async fn update(
        &self,
        id: Uuid,
        changes: &UpdateGroupRequest,
    ) -> DatabaseResult<Option<GroupResponse>> {
        info!("Updating group: {}", id);

        let updated = sqlx::query(
            r#"
            UPDATE groups
            SET name = COALESCE($2, name),
                description = CASE WHEN $3 THEN $4 ELSE description END,
                image_url = CASE WHEN $5 THEN $6 ELSE image_url END,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&changes.name)
        .bind(changes.description.is_some())
        .bind(changes.description.as_ref().and_then(Option::as_deref))
        .bind(changes.image_url.is_some())
        .bind(changes.image_url.as_ref().and_then(Option::as_deref))
        .execute(&self.pool)
        .await?;

        if updated.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_by_id(id).await
    }

    /// Delete a group; memberships and posts go with it
    pub async fn delete(&self, id: Uuid) -> DatabaseResult<bool> {
        info!("Deleting group: {}", id);

        let result = sqlx::query("DELETE FROM groups WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Add a user to a group
    pub async fn add_member(&self, group_id: Uuid, user_id: Uuid) -> DatabaseResult<MembershipResponse> {
        info!("Adding user {} to group {}", user_id, group_id);

        let membership = sqlx::query_as::<_, MembershipResponse>(
            r#"
            INSERT INTO group_users (user_id, group_id)
            VALUES ($1, $2)
            RETURNING user_id, group_id, created_at
            "#,
        )
        .bind(user_id)
        .bind(group_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(membership)
    }

    /// Remove a user from a group
    pub async fn remove_member(&self, group_id: Uuid, user_id: Uuid) -> DatabaseResult<bool> {
        info!("Removing user {} from group {}", user_id, group_id);

        let result = sqlx::query("DELETE FROM group_users WHERE user_id = $1 AND group_id = $2")
            .bind(user_id)
            .bind(group_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn with_members(&self, groups: Vec<Group>) -> DatabaseResult<Vec<GroupResponse>> {
        let ids: Vec<Uuid> = groups.iter().map(|g| g.id).collect();
        let mut members = load_members(&self.pool, &ids).await?;

        Ok(groups
            .into_iter()
            .map(|group| {
                let users = members.remove(&group.id).unwrap_or_default();
                group.into_response(users)
            })
            .collect())
    }
}
