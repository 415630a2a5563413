use crate::cli::commands::ask_confirmation;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::directory::UserDirectory;
use crate::core::registry::IdentityRegistry;
use crate::db::Stores;
use crate::db::log::ttlog_quiet;
use crate::errors::{AppError, AppResult};
use crate::models::user::User;
use crate::ui::messages::{info, success};
use crate::utils::colors::{GREEN, GREY, RESET};
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Users { add, del, yes } = cmd {
        let stores = Stores::open(cfg)?;
        let directory = UserDirectory::with_admin_name(&stores.users, &cfg.admin_name);

        if let Some(name) = add {
            let user = directory.add(name)?;
            ttlog_quiet(&stores.log, "user_add", &user.name, &format!("User #{} added", user.id));
            success(format!("User '{}' added with id {}.", user.name, user.id));
            return Ok(());
        }

        if let Some(id) = del {
            let user = directory
                .get(*id)?
                .ok_or_else(|| AppError::NotFound(format!("user {id}")))?;

            let prompt = format!(
                "Delete user #{} '{}' and its registered face? This action is irreversible.",
                user.id, user.name
            );
            if !*yes && !ask_confirmation(&prompt) {
                info("Operation cancelled.");
                return Ok(());
            }

            let registry = IdentityRegistry::new(&stores.faces);
            let removed = directory.remove(*id, &registry)?;
            ttlog_quiet(
                &stores.log,
                "user_del",
                &removed.name,
                &format!("User #{} deleted", removed.id),
            );
            success(format!("User '{}' has been deleted.", removed.name));
            return Ok(());
        }

        print_users(&directory.list_all()?);
    }

    Ok(())
}

fn print_users(users: &[User]) {
    let mut table = Table::with_headers(&["ID", "NAME", "ROLE", "FACE", "LAST ACTIVE"]);

    for u in users {
        let face = if u.has_face_registered {
            format!("{GREEN}yes{RESET}")
        } else {
            format!("{GREY}no{RESET}")
        };
        table.add_row(vec![
            u.id.to_string(),
            u.name.clone(),
            u.role.as_str().to_string(),
            face,
            u.last_active_str(),
        ]);
    }

    println!("👥 Users ({}):\n", users.len());
    print!("{}", table.render());
}
