use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::events::GameEvent;

/// A player command as recorded in a game history, with the concrete cards
/// resolved so a record stands on its own without the deck seed.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum RecordedCommand {
    Discard { player_id: String, cards: Vec<Card> },
    PlayCard { player_id: String, card: Card },
    CallGo { player_id: String },
}

/// One command applied during a match, tagged with the hand it belonged to.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct CommandRecord {
    /// 1-based hand number within the match
    pub hand_no: u32,
    pub command: RecordedCommand,
    /// Scoring event the command produced, if any
    #[serde(default)]
    pub event: Option<GameEvent>,
}

/// How a match ended: who won, the decisive losing score, and the payout
/// multiplier derived from it.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub winner_player_id: String,
    pub loser_score: u32,
    pub payout_multiplier: u32,
}

/// Complete record of one match, serialized to JSONL for history storage
/// and downstream statistics.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Unique identifier for this game (format: YYYYMMDD-NNNNNN)
    pub game_id: String,
    /// RNG seed used for every shuffle in the match (deterministic replay)
    pub seed: Option<u64>,
    /// Chronological list of all player commands
    pub commands: Vec<CommandRecord>,
    /// Final outcome, absent if the match was abandoned
    pub result: Option<MatchResult>,
    /// Timestamp when the record was written (RFC3339 format)
    #[serde(default)]
    pub ts: Option<String>,
    /// Additional metadata (extensible JSON object)
    #[serde(default)]
    pub meta: Option<serde_json::Value>,
}

pub fn format_game_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

use chrono::{SecondsFormat, Utc};
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// JSONL writer for [`GameRecord`]s, one record per line.
pub struct GameLogger {
    writer: Option<BufWriter<File>>,
    date: String,
    seq: u32,
}

impl GameLogger {
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                let _ = create_dir_all(parent);
            }
        }
        let f = File::create(path)?;
        Ok(Self {
            writer: Some(BufWriter::new(f)),
            date: "19700101".to_string(),
            seq: 0,
        })
    }

    pub fn with_seq_for_test(date: &str) -> Self {
        Self {
            writer: None,
            date: date.to_string(),
            seq: 0,
        }
    }

    pub fn next_id(&mut self) -> String {
        self.seq += 1;
        format_game_id(&self.date, self.seq)
    }

    pub fn write(&mut self, record: &GameRecord) -> std::io::Result<()> {
        // inject timestamp if missing
        let mut rec = record.clone();
        if rec.ts.is_none() {
            rec.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let line = serde_json::to_string(&rec).map_err(std::io::Error::other)?;
        if let Some(w) = &mut self.writer {
            w.write_all(line.as_bytes())?;
            w.write_all(b"\n")?;
            w.flush()?;
        }
        Ok(())
    }
}
