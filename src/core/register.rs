use crate::core::directory::UserDirectory;
use crate::core::registry::IdentityRegistry;
use crate::db::Stores;
use crate::db::log::ttlog_quiet;
use crate::errors::{AppError, AppResult};
use crate::models::face::FaceScan;
use crate::models::user::User;

/// High-level business logic for the `register` command.
pub struct RegisterLogic;

#[derive(Debug)]
pub struct RegisterOutcome {
    pub user: User,
    /// A user was created for the name on the fly
    pub created_user: bool,
    /// An existing face entry was replaced
    pub replaced: bool,
}

impl RegisterLogic {
    pub fn apply(
        stores: &Stores,
        directory: &UserDirectory<'_>,
        name: &str,
        scan: &FaceScan,
        replace: bool,
    ) -> AppResult<RegisterOutcome> {
        let name = name.trim();

        // ------------------------------------------------
        // 1️⃣ exactly one face
        // ------------------------------------------------
        let embedding = scan.single()?.clone();

        // ------------------------------------------------
        // 2️⃣ validate before touching the directory
        // ------------------------------------------------
        let registry = IdentityRegistry::new(&stores.faces);
        registry.check_embedding(name, &embedding)?;

        let already = registry.contains(name)?;
        if already && !replace {
            return Err(AppError::Duplicate(format!(
                "name '{name}' already registered (use --replace to re-register)"
            )));
        }

        // ------------------------------------------------
        // 3️⃣ resolve user (created when unknown), register + touch
        // ------------------------------------------------
        directory.ensure_seeded()?;

        let (user, created_user) = match directory.find_by_name(name)? {
            Some(u) => (u, false),
            None => (directory.add(name)?, true),
        };

        if let Err(e) = registry.register(&user.name, embedding) {
            if created_user && let Err(undo) = directory.remove(user.id, &registry) {
                tracing::warn!(name = %user.name, error = %undo, "new user not rolled back");
            }
            return Err(e);
        }
        directory.touch(&user.name)?;

        let user = directory.find_by_name(&user.name)?.unwrap_or(user);

        ttlog_quiet(
            &stores.log,
            "register",
            &user.name,
            if already {
                "Face re-registered"
            } else {
                "Face registered"
            },
        );

        Ok(RegisterOutcome {
            user,
            created_user,
            replaced: already,
        })
    }
}
