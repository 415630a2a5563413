use super::serde_fmt::{self, NEVER};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::User => "User",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

/// A person known to the directory (⇔ one object in `users.json`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u32,
    pub name: String,
    pub role: Role,
    pub has_face_registered: bool,
    /// `None` ⇔ "Never"
    #[serde(with = "serde_fmt::last_active")]
    pub last_active: Option<NaiveDateTime>,
}

impl User {
    pub fn new(id: u32, name: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            name: name.into(),
            role,
            has_face_registered: false,
            last_active: None,
        }
    }

    pub fn last_active_str(&self) -> String {
        self.last_active
            .as_ref()
            .map(serde_fmt::format_datetime)
            .unwrap_or_else(|| NEVER.to_string())
    }
}
