//! Argument definitions for the cribbage CLI.
//!
//! Kept separate from the dispatch logic in `lib.rs` so the parser can be
//! exercised directly in tests.

use clap::{Parser, Subcommand};

/// Top-level argument parser for the `cribbage` binary.
#[derive(Debug, Parser)]
#[command(name = "cribbage", version, about = "Cribbage engine CLI")]
pub struct CribbageCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Display the resolved configuration and where each value came from
    Cfg,
    /// Deal a single hand for inspection
    Deal {
        /// RNG seed for a reproducible deal
        #[arg(long)]
        seed: Option<u64>,
        /// Number of seats at the table
        #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u8).range(2..=4))]
        players: u8,
    },
    /// Score four cards against a cut card
    Score {
        /// Hand cards, comma separated (e.g. 5H,5D,5S,JC)
        #[arg(long)]
        cards: String,
        /// The cut card (e.g. 5C)
        #[arg(long)]
        cut: String,
        /// Score with the crib flush rule
        #[arg(long)]
        crib: bool,
    },
    /// Play a match against the baseline bot
    Play {
        /// Number of matches to play
        #[arg(long)]
        games: Option<u32>,
        /// RNG seed for reproducible matches
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Simulate bot-vs-bot matches and record JSONL game histories
    Sim {
        /// Number of matches to simulate
        #[arg(long)]
        games: u64,
        /// Path for the JSONL game history
        #[arg(long)]
        output: Option<String>,
        /// Base RNG seed (each match uses seed + match index)
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Aggregate statistics from a JSONL game history
    Stats {
        /// Path to a JSONL file produced by `sim`
        #[arg(long)]
        input: String,
    },
    /// Verify RNG determinism
    Rng {
        /// Seed for the sample
        #[arg(long)]
        seed: Option<u64>,
    },
}
