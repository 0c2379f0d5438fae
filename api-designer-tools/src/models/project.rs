use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Eq, PartialEq, Copy, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityStatus {
    #[default]
    Active,
    Inactive,
}

impl ActivityStatus {
    pub fn toggled(self) -> Self {
        match self {
            ActivityStatus::Active => ActivityStatus::Inactive,
            ActivityStatus::Inactive => ActivityStatus::Active,
        }
    }
}

#[derive(Debug, Eq, PartialEq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: ActivityStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    #[serde(default)]
    pub members: Vec<ProjectMember>,
}

impl Project {
    pub fn find_member(&self, member_id: &str) -> Option<&ProjectMember> {
        self.members.iter().find(|m| m.id == member_id)
    }

    pub fn member_for_user(&self, user_id: &str) -> Option<&ProjectMember> {
        self.members.iter().find(|m| m.user_id == user_id)
    }

    /// Case-insensitive substring match on name and description, as used by the project search box.
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.name.to_lowercase().contains(&term) || self.description.to_lowercase().contains(&term)
    }
}

/// Roles are ordered by how much they are allowed to do.
#[derive(Debug, Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    Member,
    Admin,
    Owner,
}

#[derive(Debug, Eq, PartialEq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMember {
    pub id: String,
    pub project_id: String,
    pub user_id: String,
    pub username: String,
    #[serde(default)]
    pub email: String,
    pub role: MemberRole,
    #[serde(with = "time::serde::rfc3339")]
    pub joined_at: OffsetDateTime,
    #[serde(default)]
    pub status: ActivityStatus,
}

#[derive(Debug, Eq, PartialEq, Clone)]
pub struct ProjectDraft {
    pub name: String,
    pub description: String,
    pub status: ActivityStatus,
}

impl ProjectDraft {
    pub fn new(name: &str, description: &str) -> Self {
        ProjectDraft {
            name: name.to_string(),
            description: description.to_string(),
            status: ActivityStatus::Active,
        }
    }
}

#[derive(Debug, Eq, PartialEq, Clone)]
pub struct MemberDraft {
    pub user_id: String,
    pub username: String,
    pub email: String,
    pub role: MemberRole,
}

impl MemberDraft {
    pub fn new(user_id: &str, username: &str, role: MemberRole) -> Self {
        MemberDraft {
            user_id: user_id.to_string(),
            username: username.to_string(),
            email: String::new(),
            role,
        }
    }
}
