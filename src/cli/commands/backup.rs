use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::backup::BackupLogic;
use crate::db::Stores;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Backup {
        file,
        compress,
        force,
    } = cmd
    {
        let stores = Stores::open(cfg)?;
        BackupLogic::backup(&stores, cfg, file, *force, *compress)?;
    }

    Ok(())
}
