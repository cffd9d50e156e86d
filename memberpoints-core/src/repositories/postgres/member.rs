// src/repositories/postgres/member.rs

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;
use memberpoints_common::models::Member;
use memberpoints_common::traits::repository_traits::MemberRepository;
use crate::Error;

#[derive(Clone)]
pub struct PostgresMemberRepository {
    pool: Pool<Postgres>,
}

impl PostgresMemberRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemberRepository for PostgresMemberRepository {
    async fn create_member(&self, member: &Member) -> Result<(), Error> {
        sqlx::query(
            r#"
            INSERT INTO members (
                member_id, username, email, display_name,
                is_superuser, is_active, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
            .bind(member.member_id)
            .bind(&member.username)
            .bind(&member.email)
            .bind(&member.display_name)
            .bind(member.is_superuser)
            .bind(member.is_active)
            .bind(member.created_at)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn get_member(&self, member_id: Uuid) -> Result<Option<Member>, Error> {
        let row = sqlx::query_as::<_, Member>(
            r#"
            SELECT member_id, username, email, display_name,
                   is_superuser, is_active, created_at
            FROM members
            WHERE member_id = $1
            "#,
        )
            .bind(member_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn get_member_by_username(&self, username: &str) -> Result<Option<Member>, Error> {
        let row = sqlx::query_as::<_, Member>(
            r#"
            SELECT member_id, username, email, display_name,
                   is_superuser, is_active, created_at
            FROM members
            WHERE username = $1
            "#,
        )
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_members_by_email(&self, email: &str) -> Result<Vec<Member>, Error> {
        let rows = sqlx::query_as::<_, Member>(
            r#"
            SELECT member_id, username, email, display_name,
                   is_superuser, is_active, created_at
            FROM members
            WHERE email = $1
            ORDER BY username ASC
            "#,
        )
            .bind(email)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn list_members(&self) -> Result<Vec<Member>, Error> {
        let rows = sqlx::query_as::<_, Member>(
            r#"
            SELECT member_id, username, email, display_name,
                   is_superuser, is_active, created_at
            FROM members
            ORDER BY username ASC
            "#,
        )
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn update_member(&self, member: &Member) -> Result<(), Error> {
        let result = sqlx::query(
            r#"
            UPDATE members
            SET username = $1,
                email = $2,
                display_name = $3,
                is_superuser = $4,
                is_active = $5
            WHERE member_id = $6
            "#,
        )
            .bind(&member.username)
            .bind(&member.email)
            .bind(&member.display_name)
            .bind(member.is_superuser)
            .bind(member.is_active)
            .bind(member.member_id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound(format!("member {}", member.member_id)));
        }
        Ok(())
    }

    async fn delete_member(&self, member_id: Uuid) -> Result<(), Error> {
        sqlx::query("DELETE FROM members WHERE member_id = $1")
            .bind(member_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
