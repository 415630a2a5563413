//! User directory: id → profile.

use crate::core::registry::IdentityRegistry;
use crate::db::store::Collection;
use crate::errors::{AppError, AppResult};
use crate::models::user::{Role, User};
use crate::utils::time::now_local;
use chrono::NaiveDateTime;

pub const DEFAULT_ADMIN_NAME: &str = "Admin";

pub struct UserDirectory<'a> {
    users: &'a Collection<User>,
    admin_name: String,
}

impl<'a> UserDirectory<'a> {
    pub fn new(users: &'a Collection<User>) -> Self {
        Self::with_admin_name(users, DEFAULT_ADMIN_NAME)
    }

    pub fn with_admin_name(users: &'a Collection<User>, admin_name: &str) -> Self {
        Self {
            users,
            admin_name: admin_name.to_string(),
        }
    }

    /// Seed a default Admin when the directory is empty. Idempotent.
    /// Returns true when the Admin was created.
    pub fn ensure_seeded(&self) -> AppResult<bool> {
        self.ensure_seeded_at(now_local())
    }

    pub fn ensure_seeded_at(&self, now: NaiveDateTime) -> AppResult<bool> {
        let name = self.admin_name.clone();
        let seeded = self.users.update_when(|users| {
            if !users.is_empty() {
                return Ok((false, false));
            }

            let mut admin = User::new(1, name, Role::Admin);
            admin.has_face_registered = true;
            admin.last_active = Some(now);
            users.push(admin);
            Ok((true, true))
        })?;

        if seeded {
            tracing::info!(admin = %self.admin_name, "empty directory seeded with default admin");
        }
        Ok(seeded)
    }

    /// All users; seeds the default Admin first (see [`ensure_seeded`](Self::ensure_seeded)).
    pub fn list_all(&self) -> AppResult<Vec<User>> {
        self.ensure_seeded()?;
        self.users.load()
    }

    pub fn add(&self, name: &str) -> AppResult<User> {
        let name = name.trim();
        if name.chars().count() < 2 {
            return Err(AppError::InvalidName(name.to_string()));
        }

        let user = self.users.update(|users| {
            if users.iter().any(|u| u.name == name) {
                return Err(AppError::Duplicate(format!("user '{name}'")));
            }

            let id = users.iter().map(|u| u.id).max().unwrap_or(0) + 1;
            let user = User::new(id, name, Role::User);
            users.push(user.clone());
            Ok(user)
        })?;

        tracing::info!(id = user.id, name = %user.name, "user added");
        Ok(user)
    }

    /// Delete a user; a registered face is dropped from the registry too.
    pub fn remove(&self, id: u32, registry: &IdentityRegistry<'_>) -> AppResult<User> {
        let removed = self.users.update(|users| {
            let pos = users
                .iter()
                .position(|u| u.id == id)
                .ok_or_else(|| AppError::NotFound(format!("user with id {id}")))?;
            Ok(users.remove(pos))
        })?;

        if removed.has_face_registered {
            match registry.remove(&removed.name) {
                Ok(true) => tracing::debug!(name = %removed.name, "face entry removed"),
                Ok(false) => {}
                Err(e) => {
                    tracing::warn!(name = %removed.name, error = %e, "face entry not removed")
                }
            }
        }

        tracing::info!(id, name = %removed.name, "user removed");
        Ok(removed)
    }

    /// Mark `name` as having a face and refresh `lastActive`.
    /// Returns false when the name is unknown.
    pub fn touch(&self, name: &str) -> AppResult<bool> {
        self.touch_at(name, now_local())
    }

    pub fn touch_at(&self, name: &str, now: NaiveDateTime) -> AppResult<bool> {
        self.users.update_when(|users| match users.iter_mut().find(|u| u.name == name) {
            Some(u) => {
                u.has_face_registered = true;
                u.last_active = Some(now);
                Ok((true, true))
            }
            None => Ok((false, false)),
        })
    }

    pub fn find_by_name(&self, name: &str) -> AppResult<Option<User>> {
        Ok(self.users.load()?.into_iter().find(|u| u.name == name))
    }

    pub fn get(&self, id: u32) -> AppResult<Option<User>> {
        Ok(self.users.load()?.into_iter().find(|u| u.id == id))
    }
}
