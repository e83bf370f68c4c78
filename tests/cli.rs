use std::fs;
use std::process::{Command, Output};

use tempfile::TempDir;

fn run_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_string-bloom"))
        .args(args)
        .output()
        .expect("run CLI")
}

fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "cli exited with {}: {}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn hash_writes_csv() {
    let tmp = TempDir::new().expect("create temp dir");
    let dir = tmp.path();
    let input = dir.join("keys.txt");
    let output = dir.join("hashes.csv");
    fs::write(&input, "abc\nxyz\n").unwrap();

    let result = run_cli(&[
        "hash",
        "--input",
        input.to_str().unwrap(),
        "--output",
        output.to_str().unwrap(),
        "--size",
        "101",
    ]);
    assert_success(&result);

    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "\"simpleHash\",\"crossHash\",\"indexValueHash\",\"primeHash\"\n0,1,69,65\n13,10,14,41\n"
    );
}

#[test]
fn distinct_writes_one_line_per_size() {
    let tmp = TempDir::new().expect("create temp dir");
    let dir = tmp.path();
    let input = dir.join("keys.txt");
    let output = dir.join("distinct.csv");
    fs::write(&input, "abc\nxyz\n").unwrap();

    let result = run_cli(&[
        "distinct",
        "--input",
        input.to_str().unwrap(),
        "--output",
        output.to_str().unwrap(),
        "--size",
        "1",
        "--size",
        "101",
        "--function",
        "crossHash",
        "--function",
        "prime_hash",
    ]);
    assert_success(&result);

    assert_eq!(fs::read_to_string(&output).unwrap(), "1,1\n2,2\n");
}

#[test]
fn probe_reports_inserted_keys() {
    let tmp = TempDir::new().expect("create temp dir");
    let dir = tmp.path();
    let insert = dir.join("insert.txt");
    let query = dir.join("query.txt");
    fs::write(&insert, "abc\n").unwrap();
    fs::write(&query, "abc\nxyz\n").unwrap();

    let result = run_cli(&[
        "probe",
        "--size",
        "101",
        "--insert",
        insert.to_str().unwrap(),
        "--query",
        query.to_str().unwrap(),
    ]);
    assert_success(&result);

    assert_eq!(
        String::from_utf8_lossy(&result.stdout),
        "abc\tmaybe\nxyz\tabsent\n"
    );
}

#[test]
fn run_uses_json_config() {
    let tmp = TempDir::new().expect("create temp dir");
    let dir = tmp.path();
    let input = dir.join("keys.txt");
    let config = dir.join("config.json");
    fs::write(&input, "abc\nxyz\n").unwrap();
    let json = serde_json::json!({
        "input": input,
        "hash_output": dir.join("hashes.csv"),
        "distinct_output": dir.join("distinct.csv"),
        "functions": ["crossHash"],
        "hash_size": 101,
        "distinct_sizes": [101],
    });
    fs::write(&config, json.to_string()).unwrap();

    let result = run_cli(&["run", "--config", config.to_str().unwrap()]);
    assert_success(&result);

    assert_eq!(
        fs::read_to_string(dir.join("hashes.csv")).unwrap(),
        "\"crossHash\"\n1\n10\n"
    );
    assert_eq!(fs::read_to_string(dir.join("distinct.csv")).unwrap(), "2\n");
}

#[test]
fn zero_size_fails() {
    let tmp = TempDir::new().expect("create temp dir");
    let dir = tmp.path();
    let insert = dir.join("insert.txt");
    fs::write(&insert, "abc\n").unwrap();

    let result = run_cli(&["probe", "--size", "0", "--insert", insert.to_str().unwrap()]);
    assert!(!result.status.success());
    assert!(String::from_utf8_lossy(&result.stderr).contains("invalid modulus 0"));
}

#[test]
fn unknown_function_is_rejected() {
    let result = run_cli(&[
        "hash",
        "--input",
        "keys.txt",
        "--output",
        "out.csv",
        "--function",
        "md5",
    ]);
    assert!(!result.status.success());
    assert!(String::from_utf8_lossy(&result.stderr).contains("unknown hash function: md5"));
}

#[test]
fn hash_with_missing_input_keeps_output() {
    let tmp = TempDir::new().expect("create temp dir");
    let output = tmp.path().join("hashes.csv");
    fs::write(&output, "previous results\n").unwrap();

    let result = run_cli(&[
        "hash",
        "--input",
        tmp.path().join("missing.txt").to_str().unwrap(),
        "--output",
        output.to_str().unwrap(),
    ]);
    assert!(!result.status.success());
    assert!(String::from_utf8_lossy(&result.stderr).contains("failed to open input"));
    assert_eq!(fs::read_to_string(&output).unwrap(), "previous results\n");
}

#[test]
fn distinct_with_missing_input_keeps_output() {
    let tmp = TempDir::new().expect("create temp dir");
    let output = tmp.path().join("distinct.csv");
    fs::write(&output, "1,1,1,1\n").unwrap();

    let result = run_cli(&[
        "distinct",
        "--input",
        tmp.path().join("missing.txt").to_str().unwrap(),
        "--output",
        output.to_str().unwrap(),
        "--size",
        "101",
    ]);
    assert!(!result.status.success());
    assert_eq!(fs::read_to_string(&output).unwrap(), "1,1,1,1\n");
}
