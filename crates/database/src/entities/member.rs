//! Member entity definitions

use serde::{Deserialize, Serialize};

/// A directory record keyed by its unique numeric identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub identifier: i64,
    pub display_name: String,
    pub email: String,
    pub sex: String,
    pub grade: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Fields required to insert a member. The password must already be hashed.
#[derive(Debug, Clone)]
pub struct NewMember {
    pub identifier: i64,
    pub display_name: String,
    pub email: String,
    pub sex: String,
    pub grade: String,
    pub password_hash: String,
}

/// Partial rewrite of a member's non-identifier fields.
#[derive(Debug, Clone, Default)]
pub struct MemberChanges {
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub sex: Option<String>,
    pub grade: Option<String>,
    pub password_hash: Option<String>,
}

impl MemberChanges {
    pub fn is_empty(&self) -> bool {
        self.display_name.is_none()
            && self.email.is_none()
            && self.sex.is_none()
            && self.grade.is_none()
            && self.password_hash.is_none()
    }
}

/// Selection applied to paged member listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberFilter {
    All,
    /// Exact display-name match.
    DisplayName(String),
}
