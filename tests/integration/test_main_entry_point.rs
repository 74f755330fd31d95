// バイナリのエントリーポイントのテスト
use std::process::{Command, Output};

fn run_binary(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_batch_pipeline"))
        .args(args)
        .output()
        .expect("Failed to execute binary")
}

fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8(output.stdout.clone())
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_cli_help() {
    let output = run_binary(&["--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("--arr-size"));
    assert!(stdout.contains("--writers"));
    assert!(stdout.contains("--iter-count"));
}

#[test]
fn test_cli_no_flags_exits_cleanly() {
    let output = run_binary(&[]);

    assert!(output.status.success());
    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("done: 0 tasks"));
}

#[test]
fn test_cli_prints_generated_and_summary_lines() {
    let output = run_binary(&[
        "--arr-size",
        "5",
        "--writers",
        "2",
        "--iter-count",
        "3",
        "--seed",
        "1",
    ]);

    assert!(output.status.success());
    let lines = stdout_lines(&output);
    let generated = lines.iter().filter(|l| l.starts_with("producer ")).count();
    let summaries = lines
        .iter()
        .filter(|l| l.starts_with("{producer id: "))
        .count();

    assert_eq!(generated, 6);
    assert_eq!(summaries, 6);
    assert!(lines.last().unwrap().starts_with("done: 6 tasks (6 summarized, 0 degenerate)"));
}

#[test]
fn test_cli_json_quiet_output() {
    let output = run_binary(&[
        "--arr-size=4",
        "--writers=1",
        "--iter-count=2",
        "--seed=3",
        "--format=json",
        "--quiet",
    ]);

    assert!(output.status.success());
    let lines = stdout_lines(&output);
    // quietでも集計行と完了行は出る
    assert_eq!(lines.len(), 3);
    let (completed, summaries) = lines.split_last().unwrap();
    for line in summaries {
        let value: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(value["event"], "summarized");
        assert!(value["min"].as_u64().unwrap() <= value["max"].as_u64().unwrap());
    }

    let completed: serde_json::Value = serde_json::from_str(completed).unwrap();
    assert_eq!(completed["event"], "completed");
    assert_eq!(completed["total_tasks"], 2);
}

#[test]
fn test_cli_empty_batches_warn_and_succeed() {
    let output = run_binary(&["--arr-size", "0", "--writers", "1", "--iter-count", "2"]);

    assert!(output.status.success());
    let stderr = String::from_utf8(output.stderr.clone()).unwrap();
    assert_eq!(stderr.matches("has an empty batch").count(), 2);
    assert!(stdout_lines(&output)
        .last()
        .unwrap()
        .starts_with("done: 2 tasks (0 summarized, 2 degenerate)"));
}

#[test]
fn test_cli_rejects_negative_values() {
    let output = run_binary(&["--writers", "-2", "--iter-count", "1"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("writers"));
    assert!(stderr.contains("non-negative"));
}
