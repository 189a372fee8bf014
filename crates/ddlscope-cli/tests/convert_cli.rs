use std::io::Write;
use std::process::{Command, Stdio};

use tempfile::tempdir;

const ORDERS_DDL: &str = "
    CREATE TABLE Shop.Orders (
      Order_Id bigint PRIMARY KEY,
      Placed_At timestamp NOT NULL,
      Tags varchar(20)[] COMMENT 'labels'
    );
";

fn ddlscope() -> Command {
    Command::new(env!("CARGO_BIN_EXE_ddlscope"))
}

#[test]
fn writes_bigquery_ddl_to_file() {
    let dir = tempdir().expect("temp dir");
    let sql_path = dir.path().join("orders.sql");
    let output_path = dir.path().join("orders.bq.sql");
    std::fs::write(&sql_path, ORDERS_DDL).expect("write sql");

    let status = ddlscope()
        .args([
            "-f",
            "ddl",
            "-n",
            "lower",
            "-o",
            output_path.to_str().expect("output path"),
            sql_path.to_str().expect("sql path"),
        ])
        .status()
        .expect("run CLI");

    assert!(status.success());
    let ddl = std::fs::read_to_string(&output_path).expect("output exists");
    assert_eq!(
        ddl,
        "#standardSQL\nCREATE TABLE `project.shop.orders`\n(\n  order_id INT64 NOT NULL,\n  placed_at DATETIME NOT NULL,\n  tags ARRAY<STRING> OPTIONS (description = \"labels\")\n)"
    );
}

#[test]
fn prints_compact_fields_from_stdin() {
    let mut child = ddlscope()
        .args(["-f", "fields", "-c", "-d", "oracle"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("run CLI");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(b"CREATE TABLE t (d date, n number)")
        .expect("write stdin");
    let output = child.wait_with_output().expect("wait CLI");

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim_end(),
        r#"[{"name":"d","type":"DATETIME","mode":"NULLABLE"},{"name":"n","type":"NUMERIC","mode":"NULLABLE"}]"#
    );
}

#[test]
fn json_format_serializes_table_model() {
    let dir = tempdir().expect("temp dir");
    let sql_path = dir.path().join("orders.sql");
    std::fs::write(&sql_path, ORDERS_DDL).expect("write sql");

    let output = ddlscope()
        .args(["-f", "json", sql_path.to_str().expect("sql path")])
        .output()
        .expect("run CLI");

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(json["table"]["name"], "Orders");
    assert_eq!(json["table"]["schema"], "Shop");
    assert_eq!(json["table"]["columns"][0]["primaryKey"], true);
    assert_eq!(json["table"]["columns"][2]["arrayDimensional"], 1);
}

#[test]
fn parse_failure_exits_with_failure_code() {
    let dir = tempdir().expect("temp dir");
    let good = dir.path().join("good.sql");
    let bad = dir.path().join("bad.sql");
    std::fs::write(&good, "CREATE TABLE a (x int)").expect("write sql");
    std::fs::write(&bad, "CREATE TABLE b (").expect("write sql");

    let output = ddlscope()
        .args([
            "-f",
            "fields",
            good.to_str().expect("good path"),
            bad.to_str().expect("bad path"),
        ])
        .output()
        .expect("run CLI");

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"name\": \"x\""));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ddlscope: error:"));
    assert!(stderr.contains("bad.sql"));
}

#[test]
fn missing_file_is_config_error() {
    let output = ddlscope()
        .arg("/nonexistent/orders.sql")
        .output()
        .expect("run CLI");

    assert_eq!(output.status.code(), Some(66));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to read file"));
}

#[test]
fn table_format_lists_columns() {
    let dir = tempdir().expect("temp dir");
    let sql_path = dir.path().join("orders.sql");
    std::fs::write(&sql_path, ORDERS_DDL).expect("write sql");

    let output = ddlscope()
        .arg(sql_path.to_str().expect("sql path"))
        .output()
        .expect("run CLI");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Shop.Orders"));
    assert!(stdout.contains("Columns (3):"));
    assert!(stdout.contains("-> INTEGER REQUIRED"));
}

#[test]
fn empty_file_is_reported_by_path() {
    let dir = tempdir().expect("temp dir");
    let empty = dir.path().join("empty.sql");
    std::fs::write(&empty, "\n  \n").expect("write sql");

    let output = ddlscope()
        .args(["-f", "fields", empty.to_str().expect("empty path")])
        .output()
        .expect("run CLI");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("empty.sql: no CREATE TABLE statement (input is empty)"),
        "{stderr}"
    );
}
