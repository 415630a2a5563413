use crate::cli::commands::build_filter;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::ledger::AttendanceLedger;
use crate::db::Stores;
use crate::errors::AppResult;
use crate::models::attendance::AttendanceRecord;
use crate::utils::colors::{RESET, colorize_in_out, colorize_optional};
use crate::utils::date;
use crate::utils::formatting::{describe_status, mins2readable};
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { filter, today } = cmd {
        let mut f = build_filter(filter)?;
        if *today {
            f.date = Some(date::today().format("%Y-%m-%d").to_string());
        }

        let stores = Stores::open(cfg)?;
        let ledger = AttendanceLedger::new(&stores.attendance);

        let mut records = ledger.query(&f)?;
        records.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.name.cmp(&b.name)));

        if records.is_empty() {
            println!("No attendance records found.");
            return Ok(());
        }

        print_records(&records);
    }
    Ok(())
}

fn print_records(records: &[AttendanceRecord]) {
    let mut table = Table::with_headers(&["ID", "DATE", "NAME", "IN", "OUT", "WORKED", "STATUS"]);

    for r in records {
        let check_in = if r.has_sentinel_check_in() {
            colorize_optional("")
        } else {
            colorize_in_out(&r.check_in_str(), true, r.check_in_verified)
        };
        let (label, color) = describe_status(r.status);

        table.add_row(vec![
            r.id.to_string(),
            r.date_str(),
            r.name.clone(),
            check_in,
            colorize_in_out(&r.check_out_str(), false, r.check_out_verified),
            r.duration_minutes
                .map(|d| mins2readable(d, true))
                .unwrap_or_else(|| colorize_optional("")),
            format!("{color}{label}{RESET}"),
        ]);
    }

    print!("{}", table.render());

    let worked: f64 = records.iter().filter_map(|r| r.duration_minutes).sum();
    println!("\n📋 {} record(s), worked {}", records.len(), mins2readable(worked, false));
}
