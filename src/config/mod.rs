use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use crate::utils::time::parse_time;
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

/// Persistence backend for the four collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    #[default]
    Json,
    Sqlite,
}

impl StorageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKind::Json => "json",
            StorageKind::Sqlite => "sqlite",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default)]
    pub storage: StorageKind,
    /// Maximum embedding distance accepted as a match
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    /// Check-ins after this time (HH:MM) are classified as late when a record is amended
    #[serde(default = "default_late_after")]
    pub late_after: String,
    #[serde(default = "default_admin_name")]
    pub admin_name: String,
}

fn default_data_dir() -> String {
    Config::config_dir()
        .join("data")
        .to_string_lossy()
        .to_string()
}
fn default_tolerance() -> f64 {
    0.5
}
fn default_late_after() -> String {
    "09:00".to_string()
}
fn default_admin_name() -> String {
    "Admin".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            storage: StorageKind::default(),
            tolerance: default_tolerance(),
            late_after: default_late_after(),
            admin_name: default_admin_name(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rattendance")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".rattendance")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rattendance.conf")
    }

    /// Resolved data directory (`~` expanded)
    pub fn data_dir_path(&self) -> PathBuf {
        expand_tilde(&self.data_dir)
    }

    /// Parsed `late_after` threshold
    pub fn late_after_time(&self) -> AppResult<NaiveTime> {
        parse_time(&self.late_after).ok_or_else(|| {
            AppError::Config(format!("invalid late_after '{}', use HH:MM", self.late_after))
        })
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        if !path.exists() {
            tracing::debug!(file = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .map_err(|e| AppError::Config(format!("failed to read {}: {e}", path.display())))?;
        let cfg: Config = serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("failed to parse {}: {e}", path.display())))?;

        if !(cfg.tolerance.is_finite() && cfg.tolerance >= 0.0) {
            return Err(AppError::Config(format!(
                "tolerance must be a non-negative number, got {}",
                cfg.tolerance
            )));
        }

        Ok(cfg)
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        serde_yaml::to_string(self).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Initialize configuration file and data directory.
    /// In test mode the configuration file is left untouched.
    pub fn init_all(custom_data_dir: Option<String>, is_test: bool) -> AppResult<Self> {
        let dir = Self::config_dir();

        let mut config = if is_test {
            Self::default()
        } else {
            Self::load().unwrap_or_default()
        };

        // data dir: user provided or default
        if let Some(custom) = custom_data_dir {
            let p = expand_tilde(&custom);
            config.data_dir = if p.is_absolute() || is_test {
                custom
            } else {
                dir.join(p).to_string_lossy().to_string()
            };
        }

        // Write config file
        if !is_test {
            fs::create_dir_all(&dir)?;
            let yaml = config.to_yaml()?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        fs::create_dir_all(config.data_dir_path())?;
        println!("✅ Data dir:    {:?}", config.data_dir_path());

        Ok(config)
    }
}
