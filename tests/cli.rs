use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn cashbook(data_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("cashbook").unwrap();
    cmd.env("CASHBOOK_DATA_DIR", data_dir).env("RUST_LOG", "off");
    cmd
}

fn write_csv(dir: &Path, name: &str, rows: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, format!("title,type,value,category\n{}", rows)).unwrap();
    path
}

#[test]
fn init_creates_settings() {
    let temp_dir = TempDir::new().unwrap();

    cashbook(temp_dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialization complete!"));

    assert!(temp_dir.path().join("config.json").exists());
    assert!(temp_dir.path().join("data").join("transactions.json").exists());
}

#[test]
fn add_and_balance() {
    let temp_dir = TempDir::new().unwrap();

    cashbook(temp_dir.path())
        .args(["transaction", "add", "Salary", "1000", "--type", "income", "--category", "Job"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Recorded income 'Salary' of $1000.00 in Job"));

    cashbook(temp_dir.path())
        .args([
            "transaction", "add", "Rent", "800.50", "--type", "outcome", "--category", "Housing",
        ])
        .assert()
        .success();

    cashbook(temp_dir.path())
        .arg("balance")
        .assert()
        .success()
        .stdout(predicate::str::contains("$199.50"));
}

#[test]
fn overdraft_is_rejected() {
    let temp_dir = TempDir::new().unwrap();

    cashbook(temp_dir.path())
        .args(["transaction", "add", "Rent", "100", "--type", "outcome", "--category", "Housing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Insufficient funds: need $100.00, have $0.00"));
}

#[test]
fn unknown_type_is_rejected() {
    let temp_dir = TempDir::new().unwrap();

    cashbook(temp_dir.path())
        .args(["transaction", "add", "Move", "10", "--type", "transfer", "--category", "Misc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid transaction type 'transfer'"));
}

#[test]
fn import_then_list() {
    let temp_dir = TempDir::new().unwrap();
    let csv = write_csv(
        temp_dir.path(),
        "batch.csv",
        "Salary,income,1000,Job\nRent,outcome,800,Housing\n",
    );

    cashbook(temp_dir.path())
        .arg("import")
        .arg(&csv)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 2 transactions"));

    cashbook(temp_dir.path())
        .args(["transaction", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Salary"))
        .stdout(predicate::str::contains("Housing"))
        .stdout(predicate::str::contains("$200.00"));

    cashbook(temp_dir.path())
        .args(["category", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Job"))
        .stdout(predicate::str::contains("Housing"));
}

#[test]
fn rejected_import_changes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let csv = write_csv(
        temp_dir.path(),
        "batch.csv",
        "Salary,income,1000,Job\nRent,outcome,1200,Housing\n",
    );

    cashbook(temp_dir.path())
        .arg("import")
        .arg(&csv)
        .assert()
        .failure()
        .stderr(predicate::str::contains("(row 2)"));

    cashbook(temp_dir.path())
        .args(["balance", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"total\": 0"));

    cashbook(temp_dir.path())
        .args(["category", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No categories yet."));
}

#[test]
fn malformed_import_names_row() {
    let temp_dir = TempDir::new().unwrap();
    let csv = write_csv(temp_dir.path(), "batch.csv", "Salary,income,1000,Job\nRent,outcome\n");

    cashbook(temp_dir.path())
        .arg("import")
        .arg(&csv)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Parse error (row 2)"));
}
