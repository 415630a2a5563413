use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::ledger::{AttendanceLedger, TimeEdit};
use crate::db::Stores;
use crate::db::log::ttlog_quiet;
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::formatting::describe_status;
use crate::utils::time::parse_optional_time;

fn to_edit(value: Option<&String>, clear: bool) -> AppResult<TimeEdit> {
    if clear {
        return Ok(TimeEdit::Clear);
    }
    Ok(match parse_optional_time(value)? {
        Some(t) => TimeEdit::Set(t),
        None => TimeEdit::Keep,
    })
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Edit {
        id,
        check_in,
        check_out,
        clear_in,
        clear_out,
    } = cmd
    {
        let in_edit = to_edit(check_in.as_ref(), *clear_in)?;
        let out_edit = to_edit(check_out.as_ref(), *clear_out)?;
        let late_after = cfg.late_after_time()?;

        let stores = Stores::open(cfg)?;
        let ledger = AttendanceLedger::new(&stores.attendance);
        let record = ledger.amend(*id, in_edit, out_edit, late_after)?;

        let (label, _) = describe_status(record.status);
        ttlog_quiet(
            &stores.log,
            "edit",
            &record.name,
            &format!(
                "Record #{} on {} amended: in={} out={} status={}",
                record.id,
                record.date_str(),
                record.check_in_str(),
                record.check_out_str(),
                record.status
            ),
        );

        success(format!(
            "Record #{} for '{}' on {} updated → {}",
            record.id,
            record.name,
            record.date_str(),
            label
        ));
    }

    Ok(())
}
