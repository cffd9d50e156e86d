use std::sync::Arc;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;
use memberpoints_common::models::Member;
use memberpoints_common::traits::repository_traits::MemberRepository;
use crate::Error;

#[derive(Debug, Clone, Deserialize)]
pub struct NewMember {
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub is_superuser: bool,
}

/// Partial update. `Some("")` clears an optional text field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MemberUpdate {
    pub username: Option<String>,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub is_superuser: Option<bool>,
    pub is_active: Option<bool>,
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

pub struct MemberService {
    member_repo: Arc<dyn MemberRepository + Send + Sync>,
}

impl MemberService {
    pub fn new(member_repo: Arc<dyn MemberRepository + Send + Sync>) -> Self {
        Self { member_repo }
    }

    pub async fn create_member(&self, new: NewMember) -> Result<Member, Error> {
        let username = non_empty(&new.username)
            .ok_or_else(|| Error::Validation("username must not be empty".into()))?;
        self.ensure_username_free(&username, None).await?;

        let mut member = Member::new(&username, new.email.as_deref());
        member.display_name = new.display_name.as_deref().and_then(non_empty);
        member.is_superuser = new.is_superuser;

        self.member_repo.create_member(&member).await?;
        info!("Created member '{}' ({})", member.username, member.member_id);
        Ok(member)
    }

    /// Fails with `NotFound` for an unknown id.
    pub async fn get_member(&self, member_id: Uuid) -> Result<Member, Error> {
        self.member_repo
            .get_member(member_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("member {}", member_id)))
    }

    pub async fn list_members(&self) -> Result<Vec<Member>, Error> {
        self.member_repo.list_members().await
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Vec<Member>, Error> {
        self.member_repo.find_members_by_email(email.trim()).await
    }

    pub async fn update_member(&self, member_id: Uuid, update: MemberUpdate) -> Result<Member, Error> {
        let mut member = self.get_member(member_id).await?;

        if let Some(name) = update.username.as_deref() {
            let name = non_empty(name)
                .ok_or_else(|| Error::Validation("username must not be empty".into()))?;
            if name != member.username {
                self.ensure_username_free(&name, Some(member_id)).await?;
                member.username = name;
            }
        }
        if let Some(email) = update.email.as_deref() {
            member.email = non_empty(email);
        }
        if let Some(display_name) = update.display_name.as_deref() {
            member.display_name = non_empty(display_name);
        }
        if let Some(flag) = update.is_superuser {
            member.is_superuser = flag;
        }
        if let Some(flag) = update.is_active {
            member.is_active = flag;
        }

        self.member_repo.update_member(&member).await?;
        Ok(member)
    }

    pub async fn delete_member(&self, member_id: Uuid) -> Result<(), Error> {
        let member = self.get_member(member_id).await?;
        self.member_repo.delete_member(member_id).await?;
        info!("Deleted member '{}' ({}) and their records", member.username, member_id);
        Ok(())
    }

    async fn ensure_username_free(&self, username: &str, except: Option<Uuid>) -> Result<(), Error> {
        match self.member_repo.get_member_by_username(username).await? {
            Some(existing) if Some(existing.member_id) != except => Err(Error::Validation(
                format!("username '{}' is already taken", username),
            )),
            _ => Ok(()),
        }
    }
}
