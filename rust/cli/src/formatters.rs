//! Card, combo, and event formatters for terminal display.
//!
//! This module provides pure functions for formatting game elements
//! (cards, hands, scoring combos, narration events) for terminal output.
//! It supports Unicode suit symbols with ASCII fallback for terminal
//! environments that don't support Unicode rendering.
//!
//! ## Unicode vs ASCII Fallback
//!
//! The module automatically detects whether the terminal supports Unicode
//! symbols by checking environment variables on Windows (WT_SESSION,
//! TERM_PROGRAM, VSCODE_INJECTION) and assumes Unicode support on
//! Unix-like systems.
//!
//! - **Unicode mode**: Uses ♥ ♦ ♣ ♠ symbols
//! - **ASCII mode**: Uses h d c s letters

use cribbage_engine::cards::{Card, Rank, Suit};
use cribbage_engine::events::GameEvent;
use cribbage_engine::scoring::ScoringCombo;

/// Check if the terminal supports Unicode card symbols by detecting
/// modern terminal environments.
pub fn supports_unicode() -> bool {
    if cfg!(windows) {
        std::env::var("WT_SESSION").is_ok()
            || std::env::var("TERM_PROGRAM").is_ok()
            || std::env::var("VSCODE_INJECTION").is_ok()
    } else {
        true
    }
}

/// Format a Suit as a string using Unicode symbols with ASCII fallback.
pub fn format_suit(suit: &Suit) -> String {
    if supports_unicode() {
        match suit {
            Suit::Hearts => "♥",
            Suit::Diamonds => "♦",
            Suit::Clubs => "♣",
            Suit::Spades => "♠",
        }
        .to_string()
    } else {
        match suit {
            Suit::Hearts => "h",
            Suit::Diamonds => "d",
            Suit::Clubs => "c",
            Suit::Spades => "s",
        }
        .to_string()
    }
}

/// Format a Rank as a string (A, 2-9, T, J, Q, K).
pub fn format_rank(rank: &Rank) -> String {
    match rank {
        Rank::Ace => "A",
        Rank::Two => "2",
        Rank::Three => "3",
        Rank::Four => "4",
        Rank::Five => "5",
        Rank::Six => "6",
        Rank::Seven => "7",
        Rank::Eight => "8",
        Rank::Nine => "9",
        Rank::Ten => "T",
        Rank::Jack => "J",
        Rank::Queen => "Q",
        Rank::King => "K",
    }
    .to_string()
}

/// Format a single card, e.g. "5♥" or "5h".
pub fn format_card(card: &Card) -> String {
    format!("{}{}", format_rank(&card.rank), format_suit(&card.suit))
}

/// Format a sequence of cards separated by spaces.
pub fn format_cards(cards: &[Card]) -> String {
    cards
        .iter()
        .map(format_card)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Format a hand with 1-based positions for interactive selection,
/// e.g. "1:5♥ 2:J♠ 3:Q♦".
pub fn format_hand_indexed(cards: &[Card]) -> String {
    cards
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{}:{}", i + 1, format_card(c)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Format a scoring combo with its cards, e.g. "Fifteen (5♥ J♠) - 2".
pub fn format_combo(combo: &ScoringCombo) -> String {
    format!(
        "{} ({}) - {}",
        combo.label,
        format_cards(&combo.cards),
        combo.points
    )
}

/// One-line narration for a scoring event, e.g. "bob scores 2 (His heels)".
pub fn format_event(event: &GameEvent) -> String {
    format!(
        "{} scores {} ({})",
        event.player_id, event.points, event.label
    )
}
