//! Score command handler: run the scoring engine on an arbitrary hand.
//!
//! Takes four hand cards and a cut card in compact notation and prints
//! every scoring combination with its contributing cards, plus the total.
//! Useful for checking a disputed count without dealing a full hand.

use std::io::Write;

use cribbage_engine::scoring::{score_hand, total_from_combos};

use crate::error::CliError;
use crate::formatters::{format_card, format_cards, format_combo};
use crate::ui;
use crate::validation::{parse_card, parse_card_list};

/// Handle the score command.
///
/// Parses the hand and cut card, scores them with the hand or crib flush
/// rule, and prints the combo breakdown.
pub fn handle_score_command(
    cards: &str,
    cut: &str,
    is_crib: bool,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let hand = match parse_card_list(cards) {
        Ok(hand) => hand,
        Err(msg) => {
            ui::write_error(err, &msg)?;
            return Err(CliError::InvalidInput(msg));
        }
    };
    if hand.len() != 4 {
        let msg = format!("expected exactly 4 hand cards, got {}", hand.len());
        ui::write_error(err, &msg)?;
        return Err(CliError::InvalidInput(msg));
    }
    let cut = match parse_card(cut) {
        Ok(cut) => cut,
        Err(msg) => {
            ui::write_error(err, &msg)?;
            return Err(CliError::InvalidInput(msg));
        }
    };
    if hand.contains(&cut) {
        let msg = "the cut card duplicates a hand card".to_string();
        ui::write_error(err, &msg)?;
        return Err(CliError::InvalidInput(msg));
    }

    let combos = score_hand(&hand, cut, is_crib)?;
    writeln!(
        out,
        "Hand: {}  Cut: {}{}",
        format_cards(&hand),
        format_card(&cut),
        if is_crib { "  (crib)" } else { "" }
    )?;
    for combo in &combos {
        writeln!(out, "  {}", format_combo(combo))?;
    }
    writeln!(out, "Total: {}", total_from_combos(&combos))?;
    Ok(())
}
