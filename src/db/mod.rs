pub mod initialize;
pub mod log;
pub mod pool;
pub mod store;

use crate::config::{Config, StorageKind};
use crate::errors::AppResult;
use crate::models::attendance::AttendanceRecord;
use crate::models::face::FaceEntry;
use crate::models::log_entry::LogEntry;
use crate::models::user::User;
use std::fs;
use std::path::PathBuf;
use store::{Collection, JsonFileStore, SqliteStore};

pub const FACES_COLLECTION: &str = "known_faces";
pub const USERS_COLLECTION: &str = "users";
pub const ATTENDANCE_COLLECTION: &str = "attendance";
pub const LOG_COLLECTION: &str = "log";

pub const SQLITE_FILE: &str = "rattendance.sqlite";

/// The four persisted collections, opened on the configured backend.
pub struct Stores {
    pub faces: Collection<FaceEntry>,
    pub users: Collection<User>,
    pub attendance: Collection<AttendanceRecord>,
    pub log: Collection<LogEntry>,
}

impl Stores {
    pub fn open(cfg: &Config) -> AppResult<Self> {
        let dir = cfg.data_dir_path();
        fs::create_dir_all(&dir)?;

        tracing::debug!(dir = %dir.display(), storage = ?cfg.storage, "opening stores");

        let stores = match cfg.storage {
            StorageKind::Json => Self {
                faces: Collection::new(JsonFileStore::new(json_path(&dir, FACES_COLLECTION))),
                users: Collection::new(JsonFileStore::new(json_path(&dir, USERS_COLLECTION))),
                attendance: Collection::new(JsonFileStore::new(json_path(
                    &dir,
                    ATTENDANCE_COLLECTION,
                ))),
                log: Collection::new(JsonFileStore::new(json_path(&dir, LOG_COLLECTION))),
            },
            StorageKind::Sqlite => {
                let db = dir.join(SQLITE_FILE);
                Self {
                    faces: Collection::new(SqliteStore::new(&db, FACES_COLLECTION)),
                    users: Collection::new(SqliteStore::new(&db, USERS_COLLECTION)),
                    attendance: Collection::new(SqliteStore::new(&db, ATTENDANCE_COLLECTION)),
                    log: Collection::new(SqliteStore::new(&db, LOG_COLLECTION)),
                }
            }
        };

        Ok(stores)
    }

    /// Fresh in-memory stores (tests and dry runs).
    pub fn in_memory() -> Self {
        Self {
            faces: Collection::in_memory(),
            users: Collection::in_memory(),
            attendance: Collection::in_memory(),
            log: Collection::in_memory(),
        }
    }
}

/// Files that make up the persisted state for the configured backend.
pub fn store_files(cfg: &Config) -> Vec<PathBuf> {
    let dir = cfg.data_dir_path();
    match cfg.storage {
        StorageKind::Json => [
            FACES_COLLECTION,
            USERS_COLLECTION,
            ATTENDANCE_COLLECTION,
            LOG_COLLECTION,
        ]
        .iter()
        .map(|c| json_path(&dir, c))
        .collect(),
        StorageKind::Sqlite => vec![dir.join(SQLITE_FILE)],
    }
}

fn json_path(dir: &std::path::Path, collection: &str) -> PathBuf {
    dir.join(format!("{collection}.json"))
}
