use crate::cli::commands::build_filter;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::Stores;
use crate::errors::AppResult;
use crate::export::ExportLogic;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        filter,
        force,
    } = cmd
    {
        let f = build_filter(filter)?;
        let stores = Stores::open(cfg)?;
        ExportLogic::export(&stores, *format, file, &f, *force)?;
    }
    Ok(())
}
