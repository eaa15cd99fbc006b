//! Deal command handler for single hand dealing and display.
//!
//! This module provides the `deal` command which deals a single cribbage
//! hand and displays each seat's cards. The command supports optional
//! seeding for deterministic dealing.

use std::io::Write;

use cribbage_engine::deck::Deck;
use cribbage_engine::game::MatchConfig;
use cribbage_engine::hand::CribbageHandState;

use crate::error::CliError;
use crate::formatters::format_cards;

/// Handle the deal command.
///
/// Deals a single cribbage hand (6 cards each for 2 seats, 5 for 3-4) and
/// displays every seat's cards plus the pending crib obligation. Supports
/// optional seeding for reproducibility.
pub fn handle_deal_command(
    seed: Option<u64>,
    players: u8,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let base_seed = seed.unwrap_or_else(rand::random);
    let ids: Vec<String> = (1..=players).map(|i| format!("p{}", i)).collect();
    let mut deck = Deck::new_with_seed(base_seed);
    let state = CribbageHandState::deal(&ids, &ids[0], MatchConfig::default(), &mut deck)?;

    writeln!(out, "Seed: {}", base_seed)?;
    writeln!(out, "Dealer: {}", state.dealer_player_id)?;
    for pid in &ids {
        writeln!(
            out,
            "Hand {}: {}",
            pid,
            format_cards(&state.player_states[pid].hand)
        )?;
    }
    writeln!(
        out,
        "Each seat discards {} card(s) to {}'s crib.",
        state.expected_discard_count(),
        state.crib_owner_player_id
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deal_command_with_seed() {
        let mut out = Vec::new();
        let result = handle_deal_command(Some(42), 2, &mut out);
        assert!(result.is_ok(), "Deal command should succeed");

        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("Dealer: p1"));
        assert!(output.contains("Hand p1:"));
        assert!(output.contains("Hand p2:"));
        assert!(output.contains("discards 2 card(s)"));
    }

    #[test]
    fn test_deal_command_deterministic() {
        let mut out1 = Vec::new();
        let mut out2 = Vec::new();
        handle_deal_command(Some(12345), 2, &mut out1).unwrap();
        handle_deal_command(Some(12345), 2, &mut out2).unwrap();
        assert_eq!(out1, out2, "Same seed should produce identical output");
    }

    #[test]
    fn test_deal_command_three_players() {
        let mut out = Vec::new();
        handle_deal_command(Some(7), 3, &mut out).unwrap();
        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("Hand p3:"));
        assert!(output.contains("discards 1 card(s)"));
    }

    #[test]
    fn test_deal_command_without_seed() {
        let mut out = Vec::new();
        let result = handle_deal_command(None, 2, &mut out);
        assert!(result.is_ok(), "Deal command should succeed without seed");
        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("Seed: "));
    }
}
