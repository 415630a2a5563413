#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rti() -> Command {
    cargo_bin_cmd!("rattendance")
}

/// Create a unique, empty data directory inside the system temp dir
pub fn setup_test_dir(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rattendance", name));
    fs::remove_dir_all(&path).ok();
    fs::create_dir_all(&path).expect("create test dir");
    path.to_string_lossy().to_string()
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Write a face scan (`{"faces": [...]}`) next to the data dir and return its path
pub fn write_scan(dir: &str, name: &str, faces: &[&[f64]]) -> String {
    let body = serde_json::json!({ "faces": faces });
    let path = PathBuf::from(dir).join(format!("{name}.scan.json"));
    fs::write(&path, body.to_string()).expect("write scan");
    path.to_string_lossy().to_string()
}

/// Run a command against `dir` in test mode
pub fn run_in(dir: &str, args: &[&str]) -> assert_cmd::assert::Assert {
    let mut full = vec!["--test", "--data-dir", dir];
    full.extend_from_slice(args);
    rti().args(full).assert()
}

pub const ALICE: &[f64] = &[0.1, 0.2, 0.3, 0.4];
pub const BOB: &[f64] = &[0.9, 0.8, 0.7, 0.6];
/// Close to ALICE (distance 0.02)
pub const ALICE_AGAIN: &[f64] = &[0.11, 0.21, 0.31, 0.41];
/// Far from everyone
pub const STRANGER: &[f64] = &[5.0, 5.0, 5.0, 5.0];

/// Init `dir` and register Alice and Bob through the CLI
pub fn init_with_faces(dir: &str) {
    run_in(dir, &["init"]).success();

    let alice = write_scan(dir, "alice", &[ALICE]);
    run_in(dir, &["register", "Alice", "--faces", &alice]).success();

    let bob = write_scan(dir, "bob", &[BOB]);
    run_in(dir, &["register", "Bob", "--faces", &bob]).success();
}
