use crate::cli::parser::Cli;
use crate::config::Config;
use crate::core::directory::UserDirectory;
use crate::db::log;
use crate::db::Stores;
use crate::errors::AppResult;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory and file (skipped in test mode)
///  - the data directory with its collections
///  - the seeded administrator
pub fn handle(cli: &Cli) -> AppResult<()> {
    //
    // 1️⃣ PREPARA CONFIGURAZIONE
    //
    let cfg = Config::init_all(cli.data_dir.clone(), cli.test)?;

    println!("⚙️  Initializing rAttendance…");
    if !cli.test {
        println!("📄 Config file : {}", Config::config_file().display());
    }
    println!("🗄️  Storage    : {}", cfg.storage.as_str());

    //
    // 2️⃣ APERTURA STORE
    //
    let stores = Stores::open(&cfg)?;

    //
    // 3️⃣ SEED AMMINISTRATORE
    //
    let directory = UserDirectory::with_admin_name(&stores.users, &cfg.admin_name);
    if directory.ensure_seeded()? {
        println!("👤 Administrator '{}' created", cfg.admin_name);
    }

    //
    // 4️⃣ LOG INTERNO (non bloccante)
    //
    if let Err(e) = log::ttlog(
        &stores.log,
        "init",
        "",
        &format!("Data directory initialized at {}", cfg.data_dir_path().display()),
    ) {
        eprintln!("⚠️ Failed to write internal log: {}", e);
    }

    println!("🎉 rAttendance initialization completed!");
    Ok(())
}
