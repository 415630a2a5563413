use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;
use std::path::Path;

mod common;
use common::{
    ALICE, ALICE_AGAIN, BOB, STRANGER, init_with_faces, run_in, setup_test_dir, temp_out,
    write_scan,
};

#[test]
fn test_init_seeds_admin() {
    let dir = setup_test_dir("cli_init");

    run_in(&dir, &["init"])
        .success()
        .stdout(contains("Administrator 'Admin' created"))
        .stdout(contains("initialization completed"));

    assert!(Path::new(&dir).join("users.json").exists());

    run_in(&dir, &["users"])
        .success()
        .stdout(contains("Admin"))
        .stdout(contains("Users (1)"));
}

#[test]
fn test_users_add_and_delete() {
    let dir = setup_test_dir("cli_users");
    run_in(&dir, &["init"]).success();

    run_in(&dir, &["users", "--add", "  Carol  "])
        .success()
        .stdout(contains("User 'Carol' added with id 2"));

    run_in(&dir, &["users", "--add", "Carol"])
        .failure()
        .stderr(contains("Already exists"));

    run_in(&dir, &["users", "--add", "C"])
        .failure()
        .stderr(contains("Invalid name"));

    run_in(&dir, &["users", "--del", "2", "--yes"])
        .success()
        .stdout(contains("User 'Carol' has been deleted"));

    run_in(&dir, &["users", "--del", "99", "--yes"])
        .failure()
        .stderr(contains("Not found"));

    run_in(&dir, &["users"])
        .success()
        .stdout(contains("Carol").not());
}

#[test]
fn test_register_and_duplicate() {
    let dir = setup_test_dir("cli_register");
    run_in(&dir, &["init"]).success();

    let alice = write_scan(&dir, "alice", &[ALICE]);
    run_in(&dir, &["register", "Alice", "--faces", &alice])
        .success()
        .stdout(contains("has been added with id 2"))
        .stdout(contains("Face registered for 'Alice'"));

    run_in(&dir, &["register", "Alice", "--faces", &alice])
        .failure()
        .stderr(contains("--replace"));

    run_in(&dir, &["register", "Alice", "--faces", &alice, "--replace"])
        .success()
        .stdout(contains("re-registered"));

    run_in(&dir, &["users"])
        .success()
        .stdout(contains("Alice"))
        .stdout(contains("yes"));
}

#[test]
fn test_register_requires_exactly_one_face() {
    let dir = setup_test_dir("cli_register_faces");
    run_in(&dir, &["init"]).success();

    let two = write_scan(&dir, "two", &[ALICE, BOB]);
    run_in(&dir, &["register", "Alice", "--faces", &two])
        .failure()
        .stderr(contains("Multiple faces detected (2)"));

    let none = write_scan(&dir, "none", &[]);
    run_in(&dir, &["register", "Alice", "--faces", &none])
        .failure()
        .stderr(contains("No face detected"));
}

#[test]
fn test_attend_with_empty_registry() {
    let dir = setup_test_dir("cli_attend_empty");
    run_in(&dir, &["init"]).success();

    let scan = write_scan(&dir, "q", &[ALICE]);
    run_in(&dir, &["attend", "--faces", &scan])
        .success()
        .stdout(contains("no faces registered in the system"));
}

#[test]
fn test_attend_recognizes_and_rejects_strangers() {
    let dir = setup_test_dir("cli_attend");
    init_with_faces(&dir);

    let again = write_scan(&dir, "again", &[ALICE_AGAIN]);
    run_in(&dir, &["attend", "--faces", &again])
        .success()
        .stdout(contains("Welcome, Alice! (distance 0.0200)"))
        .stdout(contains("Check-in recorded"));

    let stranger = write_scan(&dir, "stranger", &[STRANGER]);
    run_in(&dir, &["attend", "--faces", &stranger])
        .success()
        .stdout(contains("Face not recognized."));

    // a tight tolerance turns the match into a miss
    run_in(&dir, &["attend", "--faces", &again, "--tolerance", "0.001"])
        .success()
        .stdout(contains("Face not recognized."));

    run_in(&dir, &["attend", "--faces", &again, "--type", "check_out"])
        .success()
        .stdout(contains("Check-out recorded"))
        .stdout(contains("Worked"));

    run_in(&dir, &["list", "--today"])
        .success()
        .stdout(contains("Alice"))
        .stdout(contains("1 record(s)"));
}

#[test]
fn test_attend_rejects_bad_event_type() {
    let dir = setup_test_dir("cli_attend_type");
    init_with_faces(&dir);

    let scan = write_scan(&dir, "q", &[ALICE]);
    run_in(&dir, &["attend", "--faces", &scan, "--type", "lunch"])
        .failure()
        .stderr(contains("Invalid event type"));
}

#[test]
fn test_edit_marks_late() {
    let dir = setup_test_dir("cli_edit");
    init_with_faces(&dir);

    let scan = write_scan(&dir, "q", &[BOB]);
    run_in(&dir, &["attend", "--faces", &scan]).success();

    run_in(&dir, &["edit", "1", "--in", "09:30", "--out", "17:00"])
        .success()
        .stdout(contains("Late"));

    run_in(&dir, &["list", "--status", "late"])
        .success()
        .stdout(contains("Bob"))
        .stdout(contains("07:30"));

    run_in(&dir, &["edit", "1"])
        .failure()
        .stderr(contains("Nothing to do"));

    run_in(&dir, &["edit", "7", "--in", "09:00"])
        .failure()
        .stderr(contains("Not found"));
}

#[test]
fn test_list_without_records() {
    let dir = setup_test_dir("cli_list_empty");
    run_in(&dir, &["init"]).success();

    run_in(&dir, &["list"])
        .success()
        .stdout(contains("No attendance records found"));

    run_in(&dir, &["list", "--status", "sleeping"])
        .failure()
        .stderr(contains("Invalid attendance status"));
}

#[test]
fn test_summary_json() {
    let dir = setup_test_dir("cli_summary");
    init_with_faces(&dir);

    let scan = write_scan(&dir, "q", &[ALICE]);
    run_in(&dir, &["attend", "--faces", &scan]).success();

    let out = run_in(&dir, &["summary", "--json"]).success().get_output().stdout.clone();
    let value: serde_json::Value = serde_json::from_slice(&out).expect("summary json");

    let names: Vec<&str> = value["users"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Alice", "Bob"]);
    assert_eq!(value["totals"]["records"], 1);
    assert_eq!(value["totals"]["present"], 1);

    run_in(&dir, &["summary", "--year", "2024", "--month", "2"])
        .success()
        .stdout(contains("February 2024 (29 days)"));

    run_in(&dir, &["summary", "--month", "13"])
        .failure()
        .stderr(contains("invalid month"));
}

#[test]
fn test_export_csv_header_and_empty_fields() {
    let dir = setup_test_dir("cli_export_csv");
    init_with_faces(&dir);

    let scan = write_scan(&dir, "q", &[ALICE]);
    run_in(&dir, &["attend", "--faces", &scan]).success();

    let out = temp_out("cli_export_csv", "csv");
    run_in(&dir, &["export", "--format", "csv", "--file", &out, "--force"])
        .success()
        .stdout(contains("CSV export completed"));

    let content = fs::read_to_string(&out).expect("read exported csv");
    let mut lines = content.lines();
    assert_eq!(
        lines.next(),
        Some(concat!(
            "id,name,date,check_in,check_in_verified,",
            "check_out,check_out_verified,duration_minutes,status"
        ))
    );
    let row = lines.next().expect("one data row");
    assert!(row.starts_with("1,Alice,"));
    assert!(row.ends_with(",true,,false,,present"));
}

#[test]
fn test_export_json_and_xlsx() {
    let dir = setup_test_dir("cli_export_other");
    init_with_faces(&dir);

    let scan = write_scan(&dir, "q", &[BOB]);
    run_in(&dir, &["attend", "--faces", &scan]).success();

    let json_out = temp_out("cli_export_other", "json");
    run_in(&dir, &["export", "--format", "json", "--file", &json_out, "--name", "bob"])
        .success();
    let records: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json_out).unwrap()).unwrap();
    assert_eq!(records[0]["name"], "Bob");

    let xlsx_out = temp_out("cli_export_other", "xlsx");
    run_in(&dir, &["export", "--format", "xlsx", "--file", &xlsx_out])
        .success();
    assert!(fs::metadata(&xlsx_out).unwrap().len() > 0);
}

#[test]
fn test_export_filters_and_paths() {
    let dir = setup_test_dir("cli_export_filters");
    init_with_faces(&dir);

    let scan = write_scan(&dir, "q", &[ALICE]);
    run_in(&dir, &["attend", "--faces", &scan]).success();

    let out = temp_out("cli_export_filters", "csv");
    run_in(&dir, &["export", "--file", &out, "--range", "1999"])
        .success()
        .stdout(contains("No attendance records found"));
    assert!(!Path::new(&out).exists());

    run_in(&dir, &["export", "--file", "relative.csv"])
        .failure()
        .stderr(contains("must be absolute"));

    run_in(&dir, &["export", "--file", &out, "--format", "pdf"]).failure();

    run_in(&dir, &["export", "--file", &out, "--range", "2025-13"])
        .failure()
        .stderr(contains("Invalid date"));
}

#[test]
fn test_backup_and_log() {
    let dir = setup_test_dir("cli_backup");
    init_with_faces(&dir);

    let bk_dir = setup_test_dir("cli_backup_out");
    let dest = Path::new(&bk_dir).join("bk.json");
    let dest = dest.to_string_lossy().to_string();

    run_in(&dir, &["backup", "--file", &dest])
        .success()
        .stdout(contains("Backup created"));
    assert!(Path::new(&bk_dir).join("bk_users.json").exists());
    assert!(Path::new(&bk_dir).join("bk_known_faces.json").exists());

    run_in(&dir, &["backup", "--file", &dest])
        .failure()
        .stderr(contains("--force"));

    run_in(&dir, &["backup", "--file", &dest, "--compress"])
        .success()
        .stdout(contains("Compressed"));
    assert!(Path::new(&bk_dir).join("bk.zip").exists());

    run_in(&dir, &["log", "--print"])
        .success()
        .stdout(contains("init"))
        .stdout(contains("register"))
        .stdout(contains("backup"));
}

#[test]
fn test_config_print_shows_defaults() {
    let dir = setup_test_dir("cli_config_print");

    run_in(&dir, &["config", "--print"])
        .success()
        .stdout(contains("tolerance: 0.5"))
        .stdout(contains("storage: json"))
        .stdout(contains(dir.as_str()));
}
