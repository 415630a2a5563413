use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};
use std::path::Path;
use std::process::Command;

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        edit_config,
        editor,
    } = cmd
    {
        let path = Config::config_file();

        if *print_config {
            println!("📄 Current configuration ({}):\n", path.display());
            println!("{}", cfg.to_yaml()?);
        }

        if *edit_config {
            if !path.exists() {
                return Err(AppError::Config(format!(
                    "{} does not exist, run `rattendance init` first",
                    path.display()
                )));
            }

            let fallback = platform_editor();
            let requested = editor.clone().unwrap_or_else(|| fallback.clone());

            if open_in(&requested, &path) {
                success(format!("Configuration edited with '{requested}'"));
            } else if requested != fallback && open_in(&fallback, &path) {
                warning(format!("Editor '{requested}' not available, used '{fallback}'"));
                success(format!("Configuration edited with '{fallback}'"));
            } else {
                return Err(AppError::Config(format!(
                    "could not open {} with '{requested}'",
                    path.display()
                )));
            }
        }
    }

    Ok(())
}

/// $EDITOR, then $VISUAL, then notepad / nano
fn platform_editor() -> String {
    std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| {
            if cfg!(target_os = "windows") {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        })
}

fn open_in(editor: &str, path: &Path) -> bool {
    match Command::new(editor).arg(path).status() {
        Ok(s) => s.success(),
        Err(e) => {
            tracing::debug!(editor, error = %e, "editor failed to start");
            false
        }
    }
}
