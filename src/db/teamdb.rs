// db/teamdb.rs
use async_trait::async_trait;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::teammodel::{TeamLeaderRow, TeamMemberRow, TeamMembership};

#[async_trait]
pub trait TeamExt {
    /// Leaders that currently have at least one active member.
    async fn get_team_leaders(&self) -> Result<Vec<TeamLeaderRow>, sqlx::Error>;

    async fn get_team_members(&self, leader_id: Uuid) -> Result<Vec<TeamMemberRow>, sqlx::Error>;

    async fn add_team_member(
        &self,
        leader_id: Uuid,
        agent_id: Uuid,
    ) -> Result<TeamMembership, sqlx::Error>;

    async fn deactivate_team_member(
        &self,
        membership_id: Uuid,
    ) -> Result<Option<TeamMembership>, sqlx::Error>;
}

#[async_trait]
impl TeamExt for DBClient {
    async fn get_team_leaders(&self) -> Result<Vec<TeamLeaderRow>, sqlx::Error> {
        let leaders = sqlx::query_as::<_, TeamLeaderRow>(
            r#"
            SELECT DISTINCT tm.leader_id, u.name AS leader_name
            FROM team_members tm
            JOIN users u ON u.id = tm.leader_id
            WHERE tm.active
            ORDER BY u.name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(leaders)
    }

    async fn get_team_members(&self, leader_id: Uuid) -> Result<Vec<TeamMemberRow>, sqlx::Error> {
        let members = sqlx::query_as::<_, TeamMemberRow>(
            r#"
            SELECT tm.id AS membership_id, u.id AS agent_id, u.name, u.email
            FROM team_members tm
            JOIN users u ON u.id = tm.agent_id
            WHERE tm.leader_id = $1 AND tm.active
            ORDER BY u.name
            "#,
        )
        .bind(leader_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(members)
    }

    async fn add_team_member(
        &self,
        leader_id: Uuid,
        agent_id: Uuid,
    ) -> Result<TeamMembership, sqlx::Error> {
        // Re-adding a removed member reactivates the existing row
        let membership = sqlx::query_as::<_, TeamMembership>(
            r#"
            INSERT INTO team_members (leader_id, agent_id)
            VALUES ($1, $2)
            ON CONFLICT (leader_id, agent_id)
            DO UPDATE SET active = TRUE
            RETURNING *
            "#,
        )
        .bind(leader_id)
        .bind(agent_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(membership)
    }

    async fn deactivate_team_member(
        &self,
        membership_id: Uuid,
    ) -> Result<Option<TeamMembership>, sqlx::Error> {
        let membership = sqlx::query_as::<_, TeamMembership>(
            r#"
            UPDATE team_members
            SET active = FALSE
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(membership_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(membership)
    }
}
