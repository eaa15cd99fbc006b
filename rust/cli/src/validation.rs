//! Input parsing and validation for interactive commands.
//!
//! This module provides functions for parsing and validating user input
//! in interactive CLI commands. It handles:
//! - Player command parsing (discard, play, go)
//! - Card notation parsing for the `score` command
//!
//! ## Error Handling
//!
//! Validation functions return structured `Result` types or custom enums
//! (like `ParseResult`) to provide clear error messages to users.

use cribbage_engine::cards::{Card, Rank, Suit};

/// Result type for parsing user input into player commands.
///
/// This enum represents the possible outcomes when parsing user input in
/// interactive gameplay:
/// - A valid command (discard, play, go)
/// - Quit command (user wants to exit)
/// - Invalid input with error message
#[derive(Debug, PartialEq)]
pub enum ParseResult {
    /// Discard the cards at these 0-based hand indices
    Discard(Vec<usize>),
    /// Play the card at this 0-based hand index
    Play(usize),
    /// Call go
    Go,
    /// User entered quit command (q or quit)
    Quit,
    /// Invalid input with error message
    Invalid(String),
}

/// Parse user input into a player command or special commands.
///
/// Card positions are entered 1-based, as displayed next to the hand, and
/// returned 0-based. Accepts the following input formats
/// (case-insensitive):
/// - "discard 1 3" or "d 1 3" → Discard
/// - "play 2" or "p 2" → Play
/// - "go" or "g" → Go
/// - "q" or "quit" → Quit
pub fn parse_player_command(input: &str) -> ParseResult {
    let input = input.trim().to_lowercase();
    let parts: Vec<&str> = input.split_whitespace().collect();

    if parts.is_empty() {
        return ParseResult::Invalid("Empty input".to_string());
    }

    if parts[0] == "q" || parts[0] == "quit" {
        return ParseResult::Quit;
    }

    match parts[0] {
        "go" | "g" => ParseResult::Go,
        "play" | "p" => {
            if parts.len() != 2 {
                return ParseResult::Invalid(
                    "Play takes one card position (e.g., 'play 2')".to_string(),
                );
            }
            match parse_position(parts[1]) {
                Some(index) => ParseResult::Play(index),
                None => ParseResult::Invalid(format!("Invalid card position '{}'", parts[1])),
            }
        }
        "discard" | "d" => {
            if parts.len() < 2 {
                return ParseResult::Invalid(
                    "Discard takes card positions (e.g., 'discard 1 3')".to_string(),
                );
            }
            let mut indices = Vec::with_capacity(parts.len() - 1);
            for part in &parts[1..] {
                match parse_position(part) {
                    Some(index) => indices.push(index),
                    None => {
                        return ParseResult::Invalid(format!("Invalid card position '{}'", part))
                    }
                }
            }
            ParseResult::Discard(indices)
        }
        _ => ParseResult::Invalid(format!(
            "Unrecognized command '{}'. Valid commands: discard <positions>, play <position>, go, q",
            parts[0]
        )),
    }
}

// 1-based display position -> 0-based index.
fn parse_position(s: &str) -> Option<usize> {
    match s.parse::<usize>() {
        Ok(n) if n >= 1 => Some(n - 1),
        _ => None,
    }
}

/// Parse compact card notation like "5H", "TC", "10c", or "JS".
pub fn parse_card(input: &str) -> Result<Card, String> {
    let s = input.trim().to_uppercase();
    if s.len() < 2 || !s.is_ascii() {
        return Err(format!("'{}' is not a card (expected e.g. 5H or JC)", input));
    }
    let (rank_part, suit_part) = s.split_at(s.len() - 1);
    let rank = match rank_part {
        "A" => Rank::Ace,
        "2" => Rank::Two,
        "3" => Rank::Three,
        "4" => Rank::Four,
        "5" => Rank::Five,
        "6" => Rank::Six,
        "7" => Rank::Seven,
        "8" => Rank::Eight,
        "9" => Rank::Nine,
        "T" | "10" => Rank::Ten,
        "J" => Rank::Jack,
        "Q" => Rank::Queen,
        "K" => Rank::King,
        other => return Err(format!("'{}' is not a rank", other)),
    };
    let suit = match suit_part {
        "C" => Suit::Clubs,
        "D" => Suit::Diamonds,
        "H" => Suit::Hearts,
        "S" => Suit::Spades,
        other => return Err(format!("'{}' is not a suit (use C, D, H, or S)", other)),
    };
    Ok(Card { suit, rank })
}

/// Parse a comma-separated card list, rejecting duplicates.
pub fn parse_card_list(input: &str) -> Result<Vec<Card>, String> {
    let mut cards = Vec::new();
    for part in input.split(',') {
        let card = parse_card(part)?;
        if cards.contains(&card) {
            return Err(format!("duplicate card '{}'", part.trim()));
        }
        cards.push(card);
    }
    Ok(cards)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_discard_converts_to_zero_based() {
        assert_eq!(
            parse_player_command("discard 1 3"),
            ParseResult::Discard(vec![0, 2])
        );
        assert_eq!(parse_player_command("d 6"), ParseResult::Discard(vec![5]));
    }

    #[test]
    fn test_parse_play_and_go() {
        assert_eq!(parse_player_command("play 2"), ParseResult::Play(1));
        assert_eq!(parse_player_command("P 1"), ParseResult::Play(0));
        assert_eq!(parse_player_command("go"), ParseResult::Go);
        assert_eq!(parse_player_command("g"), ParseResult::Go);
    }

    #[test]
    fn test_parse_quit() {
        assert_eq!(parse_player_command("q"), ParseResult::Quit);
        assert_eq!(parse_player_command("quit"), ParseResult::Quit);
    }

    #[test]
    fn test_parse_rejects_bad_positions() {
        match parse_player_command("play 0") {
            ParseResult::Invalid(msg) => assert!(msg.contains("position")),
            other => panic!("expected Invalid, got {:?}", other),
        }
        match parse_player_command("discard one two") {
            ParseResult::Invalid(msg) => assert!(msg.contains("position")),
            other => panic!("expected Invalid, got {:?}", other),
        }
        match parse_player_command("raise 50") {
            ParseResult::Invalid(msg) => assert!(msg.contains("Unrecognized")),
            other => panic!("expected Invalid, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_card_notation() {
        assert_eq!(
            parse_card("5h").unwrap(),
            Card {
                suit: Suit::Hearts,
                rank: Rank::Five
            }
        );
        assert_eq!(
            parse_card("TC").unwrap(),
            Card {
                suit: Suit::Clubs,
                rank: Rank::Ten
            }
        );
        assert_eq!(
            parse_card("10c").unwrap(),
            Card {
                suit: Suit::Clubs,
                rank: Rank::Ten
            }
        );
        assert!(parse_card("5X").is_err());
        assert!(parse_card("ZH").is_err());
        assert!(parse_card("5").is_err());
        assert!(parse_card("5♥").is_err(), "suit letters only, no symbols");
    }

    #[test]
    fn test_parse_card_list_rejects_duplicates() {
        let cards = parse_card_list("5H,5D,5S,JC").unwrap();
        assert_eq!(cards.len(), 4);
        assert!(parse_card_list("5H,5h").is_err());
    }
}
