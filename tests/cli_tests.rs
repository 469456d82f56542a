use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use tempfile::TempDir;

const BIN_NAME: &str = "kharcha";

fn kharcha(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin(BIN_NAME).expect("binary exists");
    cmd.env("KHARCHA_DATA_DIR", data_dir.path())
        .env_remove("KHARCHA_USER")
        .env_remove("KHARCHA_LOG")
        .env_remove("RUST_LOG");
    cmd
}

fn as_user(data_dir: &TempDir, email: &str) -> Command {
    let mut cmd = kharcha(data_dir);
    cmd.env("KHARCHA_USER", email);
    cmd
}

#[test]
fn no_user_prints_hint() {
    let dir = TempDir::new().unwrap();
    kharcha(&dir)
        .assert()
        .success()
        .stdout(contains("user switch"));
}

#[test]
fn expense_commands_require_user() {
    let dir = TempDir::new().unwrap();
    kharcha(&dir)
        .args(["expense", "list"])
        .assert()
        .failure()
        .stderr(contains("No user selected"));
}

#[test]
fn added_expense_is_listed_with_total() {
    let dir = TempDir::new().unwrap();
    as_user(&dir, "ravi@example.com")
        .args(["expense", "add", "Lunch", "12.50", "-c", "food", "-d", "2024-05-03"])
        .assert()
        .success()
        .stdout(contains("Added expense"));

    as_user(&dir, "ravi@example.com")
        .args(["expense", "list"])
        .assert()
        .success()
        .stdout(contains("Lunch").and(contains("1 expense, total $12.50")));
}

#[test]
fn principals_do_not_see_each_other() {
    let dir = TempDir::new().unwrap();
    as_user(&dir, "ravi@example.com")
        .args(["expense", "add", "Rent", "900", "-c", "utilities", "-d", "2024-05-01"])
        .assert()
        .success();

    as_user(&dir, "meera@example.com")
        .args(["expense", "list"])
        .assert()
        .success()
        .stdout(contains("No expenses found.").and(contains("Rent").not()));
}

#[test]
fn invalid_amount_is_rejected() {
    let dir = TempDir::new().unwrap();
    as_user(&dir, "ravi@example.com")
        .args(["expense", "add", "Lunch", "-5"])
        .assert()
        .failure();

    as_user(&dir, "ravi@example.com")
        .args(["expense", "add", "Lunch", "abc"])
        .assert()
        .failure()
        .stderr(contains("Validation error"));
}

#[test]
fn filtered_listing_by_category() {
    let dir = TempDir::new().unwrap();
    for (description, amount, category) in [
        ("Groceries", "40", "food"),
        ("Bus pass", "25", "transport"),
    ] {
        as_user(&dir, "ravi@example.com")
            .args(["expense", "add", description, amount, "-c", category, "-d", "2024-05-02"])
            .assert()
            .success();
    }

    as_user(&dir, "ravi@example.com")
        .args(["expense", "list", "--category", "transport"])
        .assert()
        .success()
        .stdout(contains("Bus pass").and(contains("Groceries").not()));
}

#[test]
fn budget_status_reports_over_budget() {
    let dir = TempDir::new().unwrap();
    as_user(&dir, "ravi@example.com")
        .args(["budget", "set", "100", "--year", "2024", "--month", "5"])
        .assert()
        .success();
    as_user(&dir, "ravi@example.com")
        .args(["expense", "add", "Concert", "150", "-c", "entertainment", "-d", "2024-05-10"])
        .assert()
        .success();

    as_user(&dir, "ravi@example.com")
        .args(["budget", "status", "--year", "2024", "--month", "5"])
        .assert()
        .success()
        .stdout(contains("Budget for 2024-05").and(contains("150%")));
}

#[test]
fn user_switch_is_remembered() {
    let dir = TempDir::new().unwrap();
    kharcha(&dir)
        .args(["user", "switch", "meera@example.com"])
        .assert()
        .success();

    kharcha(&dir)
        .args(["user", "show"])
        .assert()
        .success()
        .stdout(contains("Active user: meera@example.com"));
}

#[test]
fn dashboard_shows_totals() {
    let dir = TempDir::new().unwrap();
    as_user(&dir, "ravi@example.com")
        .args(["expense", "add", "Taxi", "30", "-c", "transport", "-d", "2024-05-04"])
        .assert()
        .success();

    as_user(&dir, "ravi@example.com")
        .args(["report", "dashboard", "--date", "2024-05-20"])
        .assert()
        .success()
        .stdout(contains("Total Spending").and(contains("Transport")));
}

#[test]
fn history_lists_changes() {
    let dir = TempDir::new().unwrap();
    as_user(&dir, "ravi@example.com")
        .args(["trip", "add", "Goa", "2024-12-20", "2024-12-27", "900"])
        .assert()
        .success();

    as_user(&dir, "ravi@example.com")
        .args(["history"])
        .assert()
        .success()
        .stdout(contains("Goa"));
}
