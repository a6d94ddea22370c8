use std::path::PathBuf;
use std::process::{Command, Output};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn food_nutri(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_food-nutri"))
        .args(args)
        .output()
        .unwrap()
}

fn assert_usage_exit(out: &Output) {
    assert_eq!(out.status.code(), Some(2));
    assert!(out.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Usage:"));
    assert!(stderr.contains("--nutrient"));
}

#[test]
fn missing_nutrient_prints_usage_and_exits_2() {
    assert_usage_exit(&food_nutri(&[]));
}

#[test]
fn empty_nutrient_prints_usage_and_exits_2() {
    assert_usage_exit(&food_nutri(&["-n", ""]));
}

#[test]
fn fixture_run_prints_progress_then_leaderboard() {
    let supporting = fixture("supporting.zip");
    let foundation = fixture("foundation.zip");
    let out = food_nutri(&[
        "-n",
        "Cholesterol",
        "--supporting",
        supporting.to_str().unwrap(),
        "--foundation",
        foundation.to_str().unwrap(),
    ]);

    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();

    assert_eq!(lines[0], format!("reading ZIP file: {}", supporting.display()));
    assert!(lines.contains(&"reading CSV file: nutrient.csv"));
    assert!(lines.contains(&"skipping non-CSV file: Download & API Field Descriptions.txt"));

    let title = lines
        .iter()
        .position(|l| *l == "Top foods by nutrient 'Cholesterol'")
        .unwrap();
    assert_eq!(title, 11);
    assert_eq!(lines[title - 1], "");
    assert_eq!(lines[title + 1], "");

    let ranked = &lines[title + 2..];
    assert_eq!(ranked.len(), 4);
    assert!(ranked[0].starts_with("0001. Beef, ground, 80% lean meat / 20% fat, raw"));
    assert!(ranked[0].ends_with("(95.00 MG)"));
    assert!(ranked[3].starts_with("0004. Kale, raw"));
    assert!(ranked[3].ends_with("(0.00 MG)"));
}

#[test]
fn raw_flag_ranks_every_duplicate() {
    let supporting = fixture("supporting.zip");
    let foundation = fixture("foundation.zip");
    let out = food_nutri(&[
        "-q",
        "--raw",
        "-n",
        "Cholesterol",
        "--supporting",
        supporting.to_str().unwrap(),
        "--foundation",
        foundation.to_str().unwrap(),
    ]);

    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    let ranked: Vec<&str> = stdout.lines().filter(|l| l.starts_with("000")).collect();
    assert_eq!(ranked.len(), 5);
    assert!(stdout.starts_with("\nTop foods by nutrient 'Cholesterol'\n\n"));
}

#[test]
fn missing_archive_fails_with_status_1() {
    let out = food_nutri(&[
        "-q",
        "-n",
        "Cholesterol",
        "--supporting",
        fixture("does_not_exist.zip").to_str().unwrap(),
    ]);

    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("error: Couldn't load the food database"));
}
