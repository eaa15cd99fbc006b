//! # Play Command
//!
//! Interactive cribbage against the baseline bot.
//!
//! This module provides the `handle_play_command` function for playing
//! complete matches in the terminal. The human seat is prompted for
//! discards and pegging plays; the bot answers with the same command set
//! through the same engine, so both seats are bound by identical rules.
//!
//! ## Features
//!
//! - Dealer selection by draw, with re-draws narrated on ties
//! - Interactive input validation with clear error messages
//! - Engine rejections (wrong turn, illegal count) re-prompt instead of
//!   aborting the match
//! - Graceful quit with 'q' or end of input

use std::io::{BufRead, Write};

use cribbage_ai::{create_bot, BotPolicy};
use cribbage_engine::dealer::deal_initial_dealer;
use cribbage_engine::deck::Deck;
use cribbage_engine::errors::GameError;
use cribbage_engine::events::EventKind;
use cribbage_engine::game::MatchConfig;
use cribbage_engine::hand::{CribbageHandState, Phase};

use crate::error::CliError;
use crate::formatters::{format_card, format_cards, format_event, format_hand_indexed};
use crate::io_utils::read_stdin_line;
use crate::ui;
use crate::validation::{parse_player_command, ParseResult};

const YOU: &str = "you";
const BOT: &str = "bot";

/// Handle the play command: interactive cribbage against the bot.
///
/// # Arguments
///
/// * `games` - Number of matches to play (must be >= 1, default: 1)
/// * `seed` - RNG seed for reproducibility (default: random)
/// * `out` - Output stream for game display
/// * `err` - Error stream for warnings and errors
/// * `stdin` - Input stream for player commands
pub fn handle_play_command(
    games: Option<u32>,
    seed: Option<u64>,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<(), CliError> {
    let games = games.unwrap_or(1);
    if games == 0 {
        ui::write_error(err, "games must be >= 1")?;
        return Err(CliError::InvalidInput("games must be >= 1".to_string()));
    }
    let seed = seed.unwrap_or_else(rand::random);
    writeln!(out, "play: games={} seed={}", games, seed)?;

    let bot = create_bot("baseline");
    let mut your_wins = 0u32;
    let mut bot_wins = 0u32;

    for game_no in 1..=games {
        writeln!(out, "Game {}", game_no)?;
        let mut deck = Deck::new_with_seed(seed.wrapping_add(game_no as u64 - 1));
        let ids = vec![YOU.to_string(), BOT.to_string()];

        let draw = deal_initial_dealer(&ids, &mut deck)?;
        for round in &draw.rounds {
            let cards: Vec<String> = round
                .iter()
                .map(|d| format!("{} {}", d.player_id, format_card(&d.card)))
                .collect();
            writeln!(out, "Draw: {}", cards.join("  "))?;
        }
        writeln!(out, "{} deals first.", draw.dealer_player_id)?;

        let mut state = CribbageHandState::deal(
            &ids,
            &draw.dealer_player_id,
            MatchConfig::default(),
            &mut deck,
        )?;

        loop {
            match state.phase {
                Phase::Discarding => {
                    let pending = state
                        .turn_order
                        .iter()
                        .find(|p| state.player_states[*p].discarded_to_crib.is_empty())
                        .cloned()
                        .ok_or_else(|| {
                            CliError::Engine("discarding phase with nothing to discard".to_string())
                        })?;
                    if pending == YOU {
                        match prompt_discard(&state, out, err, stdin)? {
                            Some(next) => state = next,
                            None => return quit(out),
                        }
                    } else {
                        let hand = &state.player_states[BOT].hand;
                        let indices =
                            bot.choose_discard(hand, ids.len(), BOT == state.dealer_player_id);
                        state = state.discard_to_crib(BOT, &indices)?;
                        writeln!(out, "Bot discards 2 cards to the crib.")?;
                    }
                    if state.phase != Phase::Discarding {
                        if let Some(cut) = state.cut_card {
                            writeln!(out, "Cut: {}", format_card(&cut))?;
                        }
                        if let Some(event) = &state.last_event {
                            if event.kind == EventKind::HisHeels {
                                writeln!(out, "{}", format_event(event))?;
                            }
                        }
                    }
                }
                Phase::Pegging => {
                    if state.pegging.current_turn_player_id == YOU {
                        match prompt_pegging(&state, out, err, stdin)? {
                            Some(next) => state = next,
                            None => return quit(out),
                        }
                    } else {
                        let before = state.last_event.clone();
                        let hand = &state.player_states[BOT].hand;
                        let choice = bot.choose_pegging_card(
                            hand,
                            state.pegging.current_count,
                            state.pegging.active_sequence(),
                        );
                        match choice {
                            Some(index) => {
                                let card = hand[index];
                                let count_after =
                                    state.pegging.current_count + card.pip_value();
                                state = state.play_card(BOT, index)?;
                                writeln!(
                                    out,
                                    "Bot plays {} (count {})",
                                    format_card(&card),
                                    count_after
                                )?;
                            }
                            None => {
                                state = state.call_go(BOT)?;
                                writeln!(out, "Bot calls go.")?;
                            }
                        }
                        if state.last_event != before {
                            if let Some(event) = &state.last_event {
                                writeln!(out, "{}", format_event(event))?;
                            }
                        }
                    }
                }
                Phase::Counting => {
                    state = state.apply_hand_count_scores()?;
                    if let Some(entries) = &state.last_hand_count {
                        for entry in entries {
                            let what = if entry.is_crib { "crib" } else { "hand" };
                            writeln!(
                                out,
                                "{} counts {} for the {}.",
                                entry.player_id, entry.points, what
                            )?;
                        }
                    }
                    writeln!(
                        out,
                        "Scores: you {} - bot {}",
                        state.score_of(YOU)?,
                        state.score_of(BOT)?
                    )?;
                }
                Phase::Complete => {
                    if let Some(winner) = state.winner_player_id.clone() {
                        writeln!(
                            out,
                            "{} wins with {} points (multiplier x{}).",
                            winner,
                            state.score_of(&winner)?,
                            state.payout_multiplier
                        )?;
                        if winner == YOU {
                            your_wins += 1;
                        } else {
                            bot_wins += 1;
                        }
                        break;
                    }
                    state = state.start_new_hand(&mut deck)?;
                    writeln!(out, "New hand. {} deals.", state.dealer_player_id)?;
                }
                Phase::Cutting => {
                    return Err(CliError::Engine("unexpected cutting phase".to_string()));
                }
            }
        }
    }

    writeln!(out, "Final: you {} - bot {}", your_wins, bot_wins)?;
    Ok(())
}

fn quit(out: &mut dyn Write) -> Result<(), CliError> {
    writeln!(out, "Goodbye.")?;
    Ok(())
}

// Prompt until the discard applies, the user quits, or input ends.
// Engine rejections re-prompt; only I/O and invariant failures abort.
fn prompt_discard(
    state: &CribbageHandState,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<Option<CribbageHandState>, CliError> {
    loop {
        writeln!(
            out,
            "Your hand: {}",
            format_hand_indexed(&state.player_states[YOU].hand)
        )?;
        write!(
            out,
            "Discard {} card(s) to {}'s crib (e.g. 'discard 1 2'): ",
            state.expected_discard_count(),
            state.crib_owner_player_id
        )?;
        out.flush()?;

        let Some(line) = read_stdin_line(stdin) else {
            return Ok(None);
        };
        match parse_player_command(&line) {
            ParseResult::Quit => return Ok(None),
            ParseResult::Discard(indices) => match state.discard_to_crib(YOU, &indices) {
                Ok(next) => return Ok(Some(next)),
                Err(GameError::IllegalMove(reason)) => {
                    ui::write_error(err, &reason.to_string())?;
                }
                Err(fatal) => return Err(fatal.into()),
            },
            ParseResult::Invalid(msg) => ui::write_error(err, &msg)?,
            _ => ui::write_error(err, "discard first (e.g. 'discard 1 2')")?,
        }
    }
}

fn prompt_pegging(
    state: &CribbageHandState,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<Option<CribbageHandState>, CliError> {
    loop {
        let active: Vec<_> = state
            .pegging
            .active_sequence()
            .iter()
            .map(|p| p.card)
            .collect();
        writeln!(
            out,
            "Count: {}  Table: {}",
            state.pegging.current_count,
            if active.is_empty() {
                "-".to_string()
            } else {
                format_cards(&active)
            }
        )?;
        writeln!(
            out,
            "Your hand: {}",
            format_hand_indexed(&state.player_states[YOU].hand)
        )?;
        write!(out, "Enter command (play <position>/go/q): ")?;
        out.flush()?;

        let Some(line) = read_stdin_line(stdin) else {
            return Ok(None);
        };
        let before = state.last_event.clone();
        let applied = match parse_player_command(&line) {
            ParseResult::Quit => return Ok(None),
            ParseResult::Play(index) => {
                let card = state.player_states[YOU].hand.get(index).copied();
                match state.play_card(YOU, index) {
                    Ok(next) => {
                        if let Some(card) = card {
                            let count_after = state.pegging.current_count + card.pip_value();
                            writeln!(
                                out,
                                "You play {} (count {})",
                                format_card(&card),
                                count_after
                            )?;
                        }
                        Some(next)
                    }
                    Err(GameError::IllegalMove(reason)) => {
                        ui::write_error(err, &reason.to_string())?;
                        None
                    }
                    Err(fatal) => return Err(fatal.into()),
                }
            }
            ParseResult::Go => match state.call_go(YOU) {
                Ok(next) => {
                    writeln!(out, "You call go.")?;
                    Some(next)
                }
                Err(GameError::IllegalMove(reason)) => {
                    ui::write_error(err, &reason.to_string())?;
                    None
                }
                Err(fatal) => return Err(fatal.into()),
            },
            ParseResult::Invalid(msg) => {
                ui::write_error(err, &msg)?;
                None
            }
            ParseResult::Discard(_) => {
                ui::write_error(err, "discarding is over; play a card or call go")?;
                None
            }
        };
        if let Some(next) = applied {
            if next.last_event != before {
                if let Some(event) = &next.last_event {
                    writeln!(out, "{}", format_event(event))?;
                }
            }
            return Ok(Some(next));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_play_rejects_zero_games() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let mut stdin = Cursor::new(Vec::<u8>::new());
        let result = handle_play_command(Some(0), Some(1), &mut out, &mut err, &mut stdin);
        assert!(result.is_err());
    }

    #[test]
    fn test_play_quits_on_q() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let mut stdin = Cursor::new(b"q\n".to_vec());
        handle_play_command(Some(1), Some(42), &mut out, &mut err, &mut stdin)
            .expect("quit is a clean exit");
        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("play: games=1 seed=42"));
        assert!(output.contains("Goodbye."));
    }

    #[test]
    fn test_play_quits_on_eof() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let mut stdin = Cursor::new(Vec::<u8>::new());
        handle_play_command(Some(1), Some(42), &mut out, &mut err, &mut stdin)
            .expect("EOF is a clean exit");
        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("Goodbye."));
    }

    #[test]
    fn test_play_reprompts_on_invalid_input() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let mut stdin = Cursor::new(b"bet 50\ndiscard 1\nq\n".to_vec());
        handle_play_command(Some(1), Some(42), &mut out, &mut err, &mut stdin)
            .expect("invalid input re-prompts, then quits");
        let messages = String::from_utf8(err).unwrap();
        assert!(messages.contains("Unrecognized"), "got: {}", messages);
        assert!(
            messages.contains("discard exactly 2"),
            "wrong discard count must be rejected: {}",
            messages
        );
    }

    // Feed a repeating block of every useful command; whichever is legal
    // at each prompt makes progress, and EOF ends the session cleanly.
    #[test]
    fn test_play_makes_progress_with_scripted_input() {
        let block = "discard 1 2\nplay 1\nplay 2\nplay 3\nplay 4\ngo\n";
        let script = block.repeat(400);
        let mut out = Vec::new();
        let mut err = Vec::new();
        let mut stdin = Cursor::new(script.into_bytes());
        handle_play_command(Some(1), Some(7), &mut out, &mut err, &mut stdin)
            .expect("scripted session must not error");
        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("deals first."));
        assert!(output.contains("Cut: "), "a cut card must be revealed");
        assert!(
            output.contains("Count: "),
            "pegging prompts must be shown: {}",
            &output[..output.len().min(2000)]
        );
    }
}
