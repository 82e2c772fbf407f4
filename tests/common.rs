#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn sess() -> Command {
    let mut cmd = cargo_bin_cmd!("account-session");
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_account_session.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Write a config file into the temp dir and return its path
pub fn write_config(name: &str, yaml: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_account_session.yaml", name));
    let p = path.to_string_lossy().to_string();
    fs::write(&p, yaml).expect("write config");
    p
}
