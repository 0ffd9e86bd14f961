use assert_cmd::cargo::cargo_bin_cmd;
use chrono::{Duration, Local};
use serde_json::Value;
use std::path::Path;
use std::process::Output;
use tempfile::TempDir;

fn run_raw(temp: &TempDir, args: &[&str]) -> Output {
    let db_path = temp.path().join("clientele.sqlite3");
    cargo_bin_cmd!("clientele")
        .env("XDG_CONFIG_HOME", temp.path().join("config"))
        .env_remove("RUST_LOG")
        .args(["--db-path", db_path.to_str().expect("db path")])
        .args(args)
        .output()
        .expect("run command")
}

fn run_cmd(temp: &TempDir, args: &[&str]) -> String {
    let output = run_raw(temp, args);
    assert!(output.status.success(), "command failed: {:?}", output);
    String::from_utf8(output.stdout).expect("utf8")
}

fn run_cmd_json(temp: &TempDir, args: &[&str]) -> Value {
    let mut full = vec!["--json"];
    full.extend_from_slice(args);
    let output = run_raw(temp, &full);
    assert!(output.status.success(), "command failed: {:?}", output);
    serde_json::from_slice(&output.stdout).expect("parse json")
}

fn add_customer(temp: &TempDir, name: &str, email: &str) -> String {
    let created = run_cmd_json(
        temp,
        &[
            "customer",
            "add",
            "--name",
            name,
            "--phone",
            "0123456789",
            "--email",
            email,
        ],
    );
    created["id"].as_str().expect("id").to_string()
}

#[test]
fn customer_crud_flow() {
    let temp = TempDir::new().expect("temp dir");
    let id = add_customer(&temp, "Ada Lovelace", "ada@example.com");

    let list = run_cmd_json(&temp, &["customer", "list"]);
    let items = list.as_array().expect("array");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["full_name"], "Ada Lovelace");
    assert_eq!(items[0]["category"], "NEW");

    run_cmd(&temp, &["customer", "edit", &id, "--category", "vip"]);
    let vips = run_cmd_json(&temp, &["customer", "list", "--category", "vip"]);
    assert_eq!(vips.as_array().expect("array").len(), 1);

    let found = run_cmd_json(&temp, &["customer", "find-email", "ada@example.com"]);
    assert_eq!(found["id"], id.as_str());

    run_cmd(&temp, &["customer", "delete", &id]);
    let list = run_cmd_json(&temp, &["customer", "list"]);
    assert!(list.as_array().expect("array").is_empty());
}

#[test]
fn validation_failure_exits_with_invalid_input() {
    let temp = TempDir::new().expect("temp dir");
    let output = run_raw(
        &temp,
        &[
            "customer", "add", "--name", " ", "--phone", "123", "--email", "nope",
        ],
    );
    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8(output.stderr).expect("utf8");
    assert!(stderr.contains("Name is required."));
    assert!(stderr.contains("Enter a valid email."));
    assert!(stderr.contains("Phone number length must be 10 digits"));
}

#[test]
fn missing_records_exit_with_not_found() {
    let temp = TempDir::new().expect("temp dir");
    let missing = "00000000-0000-4000-8000-000000000000";

    let output = run_raw(&temp, &["customer", "show", missing]);
    assert_eq!(output.status.code(), Some(2));

    let output = run_raw(
        &temp,
        &["appointment", "add", missing, "--title", "Intro", "--at", "2099-01-01 10:00"],
    );
    assert_eq!(output.status.code(), Some(2));

    let output = run_raw(&temp, &["task", "show", "not-an-id"]);
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn appointment_and_task_flow() {
    let temp = TempDir::new().expect("temp dir");
    let customer = add_customer(&temp, "Grace Hopper", "grace@example.com");

    let appointment = run_cmd_json(
        &temp,
        &[
            "appointment",
            "add",
            &customer,
            "--title",
            "Kickoff",
            "--at",
            "2099-01-01 10:00",
            "--location",
            "HQ",
        ],
    );
    assert_eq!(appointment["status"], "PENDING");
    let appointment_id = appointment["id"].as_str().expect("id").to_string();

    let done = run_cmd_json(&temp, &["appointment", "done", &appointment_id]);
    assert_eq!(done["status"], "DONE");

    let past = run_raw(
        &temp,
        &["appointment", "add", &customer, "--title", "Late", "--at", "2000-01-01"],
    );
    assert_eq!(past.status.code(), Some(3));

    let task = run_cmd_json(
        &temp,
        &["task", "add", &customer, "--title", "Send contract", "--due", "2099-02-01"],
    );
    let task_id = task["id"].as_str().expect("id").to_string();
    assert!(task["due_at"].is_number());

    let cleared = run_cmd_json(&temp, &["task", "edit", &task_id, "--clear-due"]);
    assert!(cleared["due_at"].is_null());

    let overview = run_cmd_json(&temp, &["customer", "show", &customer]);
    assert_eq!(overview["appointments"].as_array().expect("array").len(), 1);
    assert_eq!(overview["tasks"].as_array().expect("array").len(), 1);
}

#[test]
fn communication_flow() {
    let temp = TempDir::new().expect("temp dir");
    let customer = add_customer(&temp, "Alan Turing", "alan@example.com");

    let call = run_cmd_json(
        &temp,
        &[
            "comm",
            "add-call",
            &customer,
            "--subject",
            "Follow up",
            "--duration",
            "90",
            "--outcome",
            "no-answer",
        ],
    );
    assert_eq!(call["channel"]["type"], "CALL");
    assert_eq!(call["channel"]["outcome"], "NO_ANSWER");

    let email = run_cmd_json(
        &temp,
        &[
            "comm",
            "add-email",
            &customer,
            "--subject",
            "Quote",
            "--to",
            "alan@example.com",
        ],
    );
    let email_id = email["id"].as_str().expect("id").to_string();

    let calls = run_cmd_json(&temp, &["comm", "list", "--type", "call"]);
    assert_eq!(calls.as_array().expect("array").len(), 1);
    let all = run_cmd_json(&temp, &["comm", "list", "--customer", &customer]);
    assert_eq!(all.as_array().expect("array").len(), 2);

    let mismatch = run_raw(&temp, &["comm", "edit", &email_id, "--duration", "5"]);
    assert_eq!(mismatch.status.code(), Some(3));

    let updated = run_cmd_json(
        &temp,
        &["comm", "edit", &email_id, "--attachment", "quote.pdf"],
    );
    assert_eq!(updated["channel"]["attachment_name"], "quote.pdf");
}

#[test]
fn agenda_window_is_bounded_by_days() {
    let temp = TempDir::new().expect("temp dir");
    let customer = add_customer(&temp, "Edsger Dijkstra", "ed@example.com");
    run_cmd(
        &temp,
        &["appointment", "add", &customer, "--title", "Far away", "--at", "2099-01-01"],
    );

    let agenda = run_cmd_json(&temp, &["agenda"]);
    assert!(agenda["upcoming_appointments"]
        .as_array()
        .expect("array")
        .is_empty());

    let soon = (Local::now() + Duration::days(30))
        .format("%Y-%m-%d %H:%M")
        .to_string();
    run_cmd(
        &temp,
        &["appointment", "add", &customer, "--title", "Next month", "--at", &soon],
    );

    let year = run_cmd_json(&temp, &["agenda", "--days", "365"]);
    let upcoming = year["upcoming_appointments"].as_array().expect("array");
    assert_eq!(upcoming.len(), 1);
    assert_eq!(upcoming[0]["title"], "Next month");
}

#[test]
fn agenda_rejects_out_of_range_window() {
    let temp = TempDir::new().expect("temp dir");
    for days in ["0", "-1", "366", "200000000000"] {
        let flag = format!("--days={days}");
        let output = run_raw(&temp, &["agenda", &flag]);
        assert_eq!(output.status.code(), Some(3), "days {days}: {:?}", output);
    }
}

#[test]
fn backup_writes_copy() {
    let temp = TempDir::new().expect("temp dir");
    add_customer(&temp, "Barbara Liskov", "barbara@example.com");
    let backup_path = temp.path().join("backup.sqlite3");

    run_cmd(
        &temp,
        &["backup", backup_path.to_str().expect("backup path")],
    );
    assert!(Path::new(&backup_path).exists());
}

#[test]
fn completions_skip_database() {
    let output = cargo_bin_cmd!("clientele")
        .args(["completions", "bash"])
        .output()
        .expect("run command");
    assert!(output.status.success());
    assert!(!output.stdout.is_empty());
}
