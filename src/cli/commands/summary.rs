use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::directory::UserDirectory;
use crate::core::ledger::AttendanceLedger;
use crate::core::report::summarize;
use crate::db::Stores;
use crate::errors::AppResult;
use crate::models::summary::MonthSummary;
use crate::ui::messages::header;
use crate::utils::date::{current_year_month, month_name};
use crate::utils::formatting::{bold, mins2readable};
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Summary { year, month, json } = cmd {
        let (cur_y, cur_m) = current_year_month();
        let year = year.unwrap_or(cur_y);
        let month = month.unwrap_or(cur_m);

        let stores = Stores::open(cfg)?;
        let directory = UserDirectory::with_admin_name(&stores.users, &cfg.admin_name);
        let users = directory.list_all()?;
        let records = AttendanceLedger::new(&stores.attendance).all()?;

        let summary = summarize(&users, &records, year, month)?;

        if *json {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        } else {
            print_summary(&summary);
        }
    }
    Ok(())
}

fn print_summary(s: &MonthSummary) {
    header(format!(
        "{} {} ({} days)",
        month_name(s.month),
        s.year,
        s.total_days
    ));

    // 1️⃣ per user
    let mut users = Table::with_headers(&[
        "NAME",
        "PRESENT",
        "LATE",
        "INCOMPLETE",
        "ABSENT",
        "MARKED ABSENT",
        "WORKED",
        "AVERAGE",
    ]);
    for u in &s.users {
        users.add_row(vec![
            u.name.clone(),
            u.present_days.to_string(),
            u.late_days.to_string(),
            u.incomplete_days.to_string(),
            u.absent_days.to_string(),
            u.absent_records.to_string(),
            mins2readable(u.total_duration_minutes, false),
            mins2readable(u.average_duration_minutes, false),
        ]);
    }
    println!("{}", bold("Per user"));
    print!("{}", users.render());

    // 2️⃣ per day, only days with something recorded
    let mut days = Table::with_headers(&[
        "DATE",
        "PRESENT",
        "LATE",
        "INCOMPLETE",
        "ABSENT",
        "WORKED",
    ]);
    for d in s.days.iter().filter(|d| d.present + d.late + d.incomplete > 0) {
        days.add_row(vec![
            d.date.clone(),
            d.present.to_string(),
            d.late.to_string(),
            d.incomplete.to_string(),
            d.absent.to_string(),
            mins2readable(d.total_duration_minutes, false),
        ]);
    }
    println!("\n{}", bold("Per day"));
    if days.rows.is_empty() {
        println!("No attendance recorded this month.");
    } else {
        print!("{}", days.render());
    }

    // 3️⃣ totals
    let t = &s.totals;
    println!("\n{}", bold("Totals"));
    println!("  Records          : {}", t.records);
    println!(
        "  Present/Late/Inc.: {} / {} / {}",
        t.present, t.late, t.incomplete
    );
    println!("  Absent slots     : {}", t.absent);
    println!("  Marked absent    : {}", t.absent_records);
    println!("  Worked           : {}", mins2readable(t.total_duration_minutes, false));
    println!("  Average per rec. : {}", mins2readable(t.average_duration_minutes, false));
    println!("  Attendance rate  : {:.2}%", t.attendance_rate);
}
