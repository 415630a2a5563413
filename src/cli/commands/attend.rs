use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::attend::{AttendLogic, AttendOutcome};
use crate::db::Stores;
use crate::errors::{AppError, AppResult};
use crate::models::event_type::EventType;
use crate::models::face::FaceScan;
use crate::ui::messages::{recognized, unknown};
use crate::utils::formatting::{describe_status, mins2readable};
use crate::utils::colors::RESET;
use crate::utils::time::now_local;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Attend {
        faces,
        kind,
        force,
        tolerance,
    } = cmd
    {
        let kind = EventType::parse(kind)?;
        let tolerance = tolerance.unwrap_or(cfg.tolerance);
        if !(tolerance.is_finite() && tolerance >= 0.0) {
            return Err(AppError::InvalidInput(format!(
                "tolerance must be a non-negative number, got {tolerance}"
            )));
        }

        let scan = FaceScan::load(faces)?;
        let stores = Stores::open(cfg)?;

        match AttendLogic::apply(&stores, &scan, kind, *force, tolerance, now_local())? {
            AttendOutcome::Recognized {
                name,
                distance,
                record,
            } => {
                recognized(format!("Welcome, {name}! (distance {distance:.4})"));

                let (label, color) = describe_status(record.status);
                let time = if kind.is_in() {
                    record.check_in_str()
                } else {
                    record.check_out_str()
                };
                println!(
                    "   {} recorded at {} on {} → {}{}{}",
                    kind.label(),
                    time,
                    record.date_str(),
                    color,
                    label,
                    RESET
                );
                if let Some(d) = record.duration_minutes {
                    println!("   Worked: {}", mins2readable(d, false));
                }
            }
            AttendOutcome::Unknown { message, closest } => {
                unknown(message);
                if let Some(d) = closest {
                    println!("   Closest distance {d:.4} (tolerance {tolerance})");
                }
            }
        }
    }

    Ok(())
}
