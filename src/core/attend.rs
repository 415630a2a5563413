use crate::core::directory::UserDirectory;
use crate::core::ledger::AttendanceLedger;
use crate::core::registry::IdentityRegistry;
use crate::db::Stores;
use crate::db::log::ttlog_quiet;
use crate::errors::{AppError, AppResult};
use crate::models::attendance::AttendanceRecord;
use crate::models::event_type::EventType;
use crate::models::face::FaceScan;
use chrono::NaiveDateTime;

pub const UNKNOWN: &str = "Unknown";

/// High-level business logic for the `attend` command.
pub struct AttendLogic;

/// Recognition failures are results, not errors.
#[derive(Debug)]
pub enum AttendOutcome {
    Recognized {
        name: String,
        distance: f64,
        record: AttendanceRecord,
    },
    Unknown {
        message: String,
        /// Closest distance seen, when there was something to compare against
        closest: Option<f64>,
    },
}

impl AttendOutcome {
    pub fn name(&self) -> &str {
        match self {
            AttendOutcome::Recognized { name, .. } => name,
            AttendOutcome::Unknown { .. } => UNKNOWN,
        }
    }
}

impl AttendLogic {
    pub fn apply(
        stores: &Stores,
        scan: &FaceScan,
        kind: EventType,
        force: bool,
        tolerance: f64,
        now: NaiveDateTime,
    ) -> AppResult<AttendOutcome> {
        // 1️⃣ no face → unknown
        let Some(query) = scan.first() else {
            return Ok(AttendOutcome::Unknown {
                message: "No face detected.".into(),
                closest: None,
            });
        };

        if scan.face_count() > 1 {
            tracing::debug!(
                faces = scan.face_count(),
                "several faces detected, using the first one"
            );
        }

        // 2️⃣ recognition
        let registry = IdentityRegistry::new(&stores.faces);
        let result = match registry.match_face(query, tolerance) {
            Ok(r) => r,
            Err(AppError::EmptyRegistry) => {
                tracing::info!("attendance attempt with an empty registry");
                return Ok(AttendOutcome::Unknown {
                    message: "Face not recognized: no faces registered in the system.".into(),
                    closest: None,
                });
            }
            Err(e) => return Err(e),
        };

        let Some(name) = result.name.filter(|_| result.matched) else {
            tracing::info!(closest = result.distance, "no match within tolerance");
            return Ok(AttendOutcome::Unknown {
                message: "Face not recognized.".into(),
                closest: Some(result.distance),
            });
        };

        // 3️⃣ ledger + directory refresh
        let ledger = AttendanceLedger::new(&stores.attendance);
        let record = ledger.record_event_at(&name, kind, force, now)?;

        let directory = UserDirectory::new(&stores.users);
        if !directory.touch_at(&name, now)? {
            tracing::warn!(name = %name, "recognized face has no directory entry");
        }

        ttlog_quiet(
            &stores.log,
            kind.et_as_str(),
            &name,
            &format!(
                "{} at {} (distance {:.4})",
                kind.label(),
                now.format("%Y-%m-%d %H:%M:%S"),
                result.distance
            ),
        );

        Ok(AttendOutcome::Recognized {
            name,
            distance: result.distance,
            record,
        })
    }
}
