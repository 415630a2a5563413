use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::directory::UserDirectory;
use crate::core::register::RegisterLogic;
use crate::db::Stores;
use crate::errors::AppResult;
use crate::models::face::FaceScan;
use crate::ui::messages::{info, success};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Register {
        name,
        faces,
        replace,
    } = cmd
    {
        let scan = FaceScan::load(faces)?;
        let stores = Stores::open(cfg)?;
        let directory = UserDirectory::with_admin_name(&stores.users, &cfg.admin_name);

        let outcome = RegisterLogic::apply(&stores, &directory, name, &scan, *replace)?;

        if outcome.created_user {
            info(format!(
                "User '{}' was not in the directory and has been added with id {}.",
                outcome.user.name, outcome.user.id
            ));
        }

        if outcome.replaced {
            success(format!("Face for '{}' re-registered.", outcome.user.name));
        } else {
            success(format!("Face registered for '{}'.", outcome.user.name));
        }
    }

    Ok(())
}
