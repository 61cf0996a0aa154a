//! Command-line smoke tests; only loopback addresses are contacted

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

fn openfood() -> Command {
    let mut cmd = Command::cargo_bin("openfood").unwrap();
    cmd.env_remove("OPENFOOD_CONFIG").env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_lists_subcommands() {
    openfood()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("search"))
        .stdout(predicate::str::contains("product"))
        .stdout(predicate::str::contains("categories"))
        .stdout(predicate::str::contains("browse"));
}

#[test]
fn test_version() {
    openfood()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_unknown_subcommand_fails() {
    openfood().arg("checkout").assert().failure();
}

#[test]
fn test_invalid_sort_key_rejected() {
    openfood()
        .args(["search", "milk", "--sort", "price"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("price"));
}

#[test]
fn test_pages_must_be_positive() {
    openfood()
        .args(["search", "milk", "--pages", "0"])
        .assert()
        .failure();
}

#[test]
fn test_product_requires_barcode() {
    openfood().arg("product").assert().failure();
}

#[test]
fn test_missing_config_file_is_config_error() {
    openfood()
        .args(["--config", "/nonexistent/openfood.toml", "categories"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_invalid_config_value_is_config_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[catalog]\npage_size = 0").unwrap();

    openfood()
        .arg("--config")
        .arg(file.path())
        .arg("categories")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("page_size"));
}

#[test]
fn test_json_format_reports_coded_error() {
    openfood()
        .args(["--format", "json", "--config", "/nonexistent/openfood.toml", "categories"])
        .assert()
        .code(3)
        .stdout(predicate::str::contains("\"CONFIG_NOT_FOUND\""))
        .stdout(predicate::str::contains("E3001"));
}

#[test]
fn test_unreachable_catalog_is_network_error() {
    let home = tempfile::tempdir().unwrap();

    openfood()
        .current_dir(home.path())
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path())
        .env("OPENFOOD_API_URL", "http://127.0.0.1:9")
        .env("OPENFOOD_TIMEOUT_SECS", "2")
        .env_remove("OPENFOOD_ENV")
        .args(["search", "milk"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Error:"));
}
