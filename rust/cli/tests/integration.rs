//! End-to-end checks through the public `run` entry point: a simulated
//! match history flows from `sim` into `stats`, and the scoring command
//! agrees with the engine on canonical hands.

use cribbage_cli::{exit_code, run};

#[test]
fn sim_then_stats_round_trips_a_history() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("games.jsonl");
    let path_str = path.to_string_lossy().to_string();

    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = run(
        vec![
            "cribbage",
            "sim",
            "--games",
            "3",
            "--seed",
            "9",
            "--output",
            path_str.as_str(),
        ],
        &mut out,
        &mut err,
    );
    assert_eq!(code, exit_code::SUCCESS, "stderr: {}", String::from_utf8(err).unwrap());
    assert!(path.exists());

    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = run(
        vec!["cribbage", "stats", "--input", path_str.as_str()],
        &mut out,
        &mut err,
    );
    assert_eq!(code, exit_code::SUCCESS);
    let output = String::from_utf8(out).unwrap();
    assert!(output.contains("Games: 3"), "got: {}", output);
}

#[test]
fn score_command_handles_crib_flag() {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = run(
        vec![
            "cribbage", "score", "--cards", "2H,6H,TH,QH", "--cut", "7S", "--crib",
        ],
        &mut out,
        &mut err,
    );
    assert_eq!(code, exit_code::SUCCESS);
    let output = String::from_utf8(out).unwrap();
    assert!(output.contains("(crib)"));
    assert!(!output.contains("Flush"));
}

#[test]
fn deal_is_reproducible_through_the_cli() {
    let mut out1 = Vec::new();
    let mut out2 = Vec::new();
    let mut err = Vec::new();
    assert_eq!(
        run(
            vec!["cribbage", "deal", "--seed", "5", "--players", "3"],
            &mut out1,
            &mut err
        ),
        exit_code::SUCCESS
    );
    assert_eq!(
        run(
            vec!["cribbage", "deal", "--seed", "5", "--players", "3"],
            &mut out2,
            &mut err
        ),
        exit_code::SUCCESS
    );
    assert_eq!(out1, out2);
}

#[test]
fn bad_arguments_exit_with_code_two() {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = run(vec!["cribbage", "score", "--cards", "5H"], &mut out, &mut err);
    assert_eq!(code, exit_code::ERROR);
}
