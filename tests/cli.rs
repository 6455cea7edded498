use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use tempfile::TempDir;

const BIN_NAME: &str = "nest";

fn nest(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin(BIN_NAME).expect("binary exists");
    cmd.env("NEST_WEALTH_DATA_DIR", data_dir.path());
    cmd.env_remove("RUST_LOG");
    cmd
}

fn add_groceries(data_dir: &TempDir) -> String {
    let output = nest(data_dir)
        .args(["txn", "add", "Groceries", "89.50", "--category", "Food & Dining"])
        .output()
        .expect("command runs");
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).expect("utf-8 output");
    stdout
        .lines()
        .find_map(|line| line.trim().strip_prefix("ID: "))
        .expect("id line")
        .to_string()
}

#[test]
fn init_seeds_default_categories() {
    let dir = TempDir::new().unwrap();

    nest(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(contains("Initialization complete!").and(contains("18 default categories")));

    assert!(dir.path().join("config.json").exists());
    assert!(dir.path().join("data").join("book.json").exists());

    nest(&dir)
        .args(["category", "list"])
        .assert()
        .success()
        .stdout(contains("Salary").and(contains("Other Expense")));
}

#[test]
fn config_shows_paths() {
    let dir = TempDir::new().unwrap();

    nest(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(contains("Base directory").and(contains("Currency symbol")));
}

#[test]
fn add_list_show_and_delete_transaction() {
    let dir = TempDir::new().unwrap();
    let id = add_groceries(&dir);

    nest(&dir)
        .args(["txn", "list", "--type", "expense"])
        .assert()
        .success()
        .stdout(contains("Groceries").and(contains("-$89.50")));

    nest(&dir)
        .args(["txn", "list", "--type", "income"])
        .assert()
        .success()
        .stdout(contains("No transactions found"));

    nest(&dir)
        .args(["txn", "show", &id])
        .assert()
        .success()
        .stdout(contains("Food & Dining"));

    nest(&dir)
        .args(["txn", "delete", &id])
        .assert()
        .success()
        .stdout(contains("Deleted transaction: Groceries"));

    nest(&dir)
        .args(["txn", "show", &id])
        .assert()
        .failure()
        .stderr(contains("not found"));
}

#[test]
fn edit_transaction_amount() {
    let dir = TempDir::new().unwrap();
    let id = add_groceries(&dir);

    nest(&dir)
        .args(["txn", "edit", &id, "--amount", "12"])
        .assert()
        .success()
        .stdout(contains("Updated transaction: Groceries"));

    nest(&dir)
        .args(["txn", "show", &id])
        .assert()
        .success()
        .stdout(contains("$12.00"));
}

#[test]
fn unknown_category_is_rejected() {
    let dir = TempDir::new().unwrap();

    nest(&dir)
        .args(["txn", "add", "Lunch", "10", "--category", "Snacks"])
        .assert()
        .failure()
        .stderr(contains("Validation error"));

    nest(&dir)
        .args(["txn", "add", "Lunch", "0", "--category", "Food & Dining"])
        .assert()
        .failure()
        .stderr(contains("Validation error"));
}

#[test]
fn default_category_cannot_be_deleted() {
    let dir = TempDir::new().unwrap();

    nest(&dir)
        .args(["category", "delete", "Salary"])
        .assert()
        .failure()
        .stderr(contains("Forbidden"));
}

#[test]
fn custom_category_lifecycle() {
    let dir = TempDir::new().unwrap();

    nest(&dir)
        .args(["category", "add", "Pets", "--type", "expense", "--color", "orange"])
        .assert()
        .success()
        .stdout(contains("Created category: Pets"));

    nest(&dir)
        .args(["category", "add", "pets"])
        .assert()
        .failure()
        .stderr(contains("Validation error"));

    nest(&dir)
        .args(["category", "delete", "Pets"])
        .assert()
        .success()
        .stdout(contains("Deleted category: Pets"));
}

#[test]
fn budget_tracks_spending() {
    let dir = TempDir::new().unwrap();
    add_groceries(&dir);

    nest(&dir)
        .args(["budget", "create", "Food & Dining", "400"])
        .assert()
        .success()
        .stdout(contains("Created budget: Food & Dining $400.00 (monthly"));

    nest(&dir)
        .args(["budget", "list"])
        .assert()
        .success()
        .stdout(
            contains("$89.50")
                .and(contains("$310.50"))
                .and(contains("On Track")),
        );

    nest(&dir)
        .args(["budget", "roll"])
        .assert()
        .success()
        .stdout(contains("current period"));
}

#[test]
fn summary_report_as_json() {
    let dir = TempDir::new().unwrap();
    add_groceries(&dir);

    nest(&dir)
        .args(["report", "summary", "--json"])
        .assert()
        .success()
        .stdout(contains("\"expense\": 8950"));

    nest(&dir)
        .args(["report", "categories"])
        .assert()
        .success()
        .stdout(contains("Food & Dining").and(contains("100.0%")));
}

#[test]
fn export_writes_filtered_csv() {
    let dir = TempDir::new().unwrap();
    add_groceries(&dir);
    let output = dir.path().join("out.csv");

    nest(&dir)
        .args(["export", "--format", "csv", "--search", "grocer", "--output"])
        .arg(&output)
        .assert()
        .success()
        .stdout(contains("Exported 1 transactions"));

    let contents = std::fs::read_to_string(&output).unwrap();
    assert!(contents.starts_with("id,date,title,category,type,amount,description"));
    assert!(contents.contains("Groceries"));
}

#[test]
fn audit_records_mutations() {
    let dir = TempDir::new().unwrap();
    let id = add_groceries(&dir);

    nest(&dir)
        .args(["txn", "edit", &id, "--title", "Market"])
        .assert()
        .success();

    nest(&dir)
        .args(["audit", "--limit", "5"])
        .assert()
        .success()
        .stdout(
            contains("CREATE Transaction")
                .and(contains("UPDATE Transaction"))
                .and(contains("Market")),
        );
}
