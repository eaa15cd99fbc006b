//! Statistics aggregation command for game history analysis.
//!
//! Reads a JSONL game history produced by `sim` and computes summary
//! metrics: games played, win distribution by seat, skunk counts, and
//! how many records were corrupted or abandoned.

use std::collections::BTreeMap;
use std::io::Write;

use cribbage_engine::logger::GameRecord;

use crate::error::CliError;
use crate::io_utils::read_text;
use crate::ui;

/// Aggregates statistics from a JSONL game history file.
///
/// Corrupted lines are skipped with a warning rather than aborting, so a
/// partially written history still reports what it can.
pub fn handle_stats_command(
    input: String,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let content = read_text(&input).map_err(CliError::from)?;

    let mut games = 0u64;
    let mut wins: BTreeMap<String, u64> = BTreeMap::new();
    let mut skunks = 0u64;
    let mut double_skunks = 0u64;
    let mut abandoned = 0u64;
    let mut corrupted = 0u64;

    for line in content.lines().filter(|l| !l.trim().is_empty()) {
        let record: GameRecord = match serde_json::from_str(line) {
            Ok(record) => record,
            Err(_) => {
                corrupted += 1;
                continue;
            }
        };
        games += 1;
        match record.result {
            Some(result) => {
                *wins.entry(result.winner_player_id).or_default() += 1;
                match result.payout_multiplier {
                    2 => skunks += 1,
                    3 => double_skunks += 1,
                    _ => {}
                }
            }
            None => abandoned += 1,
        }
    }

    if corrupted > 0 {
        ui::display_warning(err, &format!("{} corrupted record(s) skipped", corrupted))?;
    }

    writeln!(out, "Games: {}", games)?;
    for (pid, count) in &wins {
        writeln!(out, "Wins {}: {}", pid, count)?;
    }
    writeln!(out, "Skunks: {}", skunks)?;
    writeln!(out, "Double skunks: {}", double_skunks)?;
    if abandoned > 0 {
        writeln!(out, "Abandoned: {}", abandoned)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cribbage_engine::logger::MatchResult;

    fn record(winner: &str, multiplier: u32) -> String {
        let record = GameRecord {
            game_id: "20250101-000001".to_string(),
            seed: Some(1),
            commands: Vec::new(),
            result: Some(MatchResult {
                winner_player_id: winner.to_string(),
                loser_score: 80,
                payout_multiplier: multiplier,
            }),
            ts: None,
            meta: None,
        };
        serde_json::to_string(&record).unwrap()
    }

    #[test]
    fn test_stats_missing_file_is_an_error() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let result = handle_stats_command("nonexistent.jsonl".to_string(), &mut out, &mut err);
        assert!(result.is_err());
    }

    #[test]
    fn test_stats_aggregates_wins_and_skunks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.jsonl");
        let content = format!(
            "{}\n{}\n{}\nnot json\n",
            record("bot_a", 1),
            record("bot_a", 2),
            record("bot_b", 3)
        );
        std::fs::write(&path, content).unwrap();

        let mut out = Vec::new();
        let mut err = Vec::new();
        handle_stats_command(path.to_string_lossy().to_string(), &mut out, &mut err).unwrap();

        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("Games: 3"));
        assert!(output.contains("Wins bot_a: 2"));
        assert!(output.contains("Wins bot_b: 1"));
        assert!(output.contains("Skunks: 1"));
        assert!(output.contains("Double skunks: 1"));
        let warnings = String::from_utf8(err).unwrap();
        assert!(warnings.contains("1 corrupted record(s) skipped"));
    }
}
