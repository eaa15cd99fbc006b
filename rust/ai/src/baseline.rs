//! Baseline bot implementation for cribbage gameplay.
//!
//! Provides a simple opponent for interactive play and simulation. The
//! discard decision maximizes the expected value of the kept hand over
//! every possible cut, nudged by whether the crib works for or against
//! this seat; pegging greedily takes immediate points while avoiding the
//! counts that hand the opponent an easy fifteen or thirty-one.

use cribbage_engine::cards::{full_deck, Card};
use cribbage_engine::pegging::{can_play, has_playable, preview_points, PlayedCard};
use cribbage_engine::scoring::{score_hand, total_from_combos};

use crate::BotPolicy;

/// Simple baseline bot for interactive play and simulation.
///
/// # Strategy
///
/// **Discarding:**
/// - Enumerates every legal discard and keeps the four cards with the
///   highest total score summed over all unseen cut cards
/// - Adds the discarded cards' crib potential when dealing, subtracts it
///   when feeding an opponent's crib
///
/// **Pegging:**
/// - Plays the legal card scoring the most immediate points
/// - On ties, avoids leaving the count at 5 or 21 and prefers dumping
///   high cards early
/// - Deterministic throughout, so replays reproduce the same match
#[derive(Debug, Clone)]
pub struct BaselineBot;

impl BaselineBot {
    pub fn new() -> Self {
        Self
    }

    // Total show score of a kept hand summed over every cut card not
    // visible to this seat. Unscaled: comparisons only.
    fn kept_value_over_cuts(kept: &[Card], seen: &[Card]) -> i64 {
        let mut total = 0i64;
        for cut in full_deck() {
            if seen.contains(&cut) {
                continue;
            }
            let combos = score_hand(kept, cut, false).unwrap_or_default();
            total += total_from_combos(&combos) as i64;
        }
        total
    }

    // Rough points a discard feeds into a crib: fives are gold, pairs and
    // fifteens score directly, touching cards promise runs.
    fn crib_potential(discards: &[Card]) -> i64 {
        let mut value = 0i64;
        for c in discards {
            if c.pip_value() == 5 {
                value += 2;
            }
        }
        if let [a, b] = discards {
            if a.rank == b.rank {
                value += 2;
            }
            let pips = a.pip_value() + b.pip_value();
            if pips == 15 {
                value += 2;
            } else if pips == 5 {
                value += 1;
            }
            let gap = a.rank.run_order().abs_diff(b.rank.run_order());
            if gap == 1 {
                value += 1;
            }
        }
        value
    }

    // Every way to pick `discard_count` indices from a hand.
    fn discard_options(hand_len: usize, discard_count: usize) -> Vec<Vec<usize>> {
        if discard_count == 1 {
            return (0..hand_len).map(|i| vec![i]).collect();
        }
        let mut options = Vec::new();
        for i in 0..hand_len {
            for j in (i + 1)..hand_len {
                options.push(vec![i, j]);
            }
        }
        options
    }
}

impl Default for BaselineBot {
    fn default() -> Self {
        Self::new()
    }
}

impl BotPolicy for BaselineBot {
    fn choose_discard(&self, hand: &[Card], player_count: usize, is_dealer: bool) -> Vec<usize> {
        let discard_count = if player_count == 2 { 2 } else { 1 };
        if hand.len() <= discard_count {
            return (0..hand.len().min(discard_count)).collect();
        }

        let crib_direction: i64 = if is_dealer { 1 } else { -1 };
        let mut best: Option<(i64, Vec<usize>)> = None;
        for option in Self::discard_options(hand.len(), discard_count) {
            let discarded: Vec<Card> = option.iter().map(|&i| hand[i]).collect();
            let kept: Vec<Card> = hand
                .iter()
                .enumerate()
                .filter(|(i, _)| !option.contains(i))
                .map(|(_, &c)| c)
                .collect();

            // The crib bias competes with a value summed over 46 cuts, so
            // scale it to the same units.
            let unseen = 52 - hand.len() as i64;
            let value = Self::kept_value_over_cuts(&kept, hand)
                + crib_direction * Self::crib_potential(&discarded) * unseen;

            match &best {
                Some((best_value, _)) if *best_value >= value => {}
                _ => best = Some((value, option)),
            }
        }
        best.map(|(_, option)| option).unwrap_or_default()
    }

    fn choose_pegging_card(
        &self,
        hand: &[Card],
        current_count: u8,
        played: &[PlayedCard],
    ) -> Option<usize> {
        let mut best: Option<(u32, bool, u8, usize)> = None;
        for (index, &card) in hand.iter().enumerate() {
            if !can_play(card, current_count) {
                continue;
            }
            let points = preview_points(played, card, current_count);
            let resulting = current_count + card.pip_value();
            // Counts of 5 and 21 invite a ten-card fifteen or thirty-one.
            let safe = resulting != 5 && resulting != 21;
            let key = (points, safe, card.pip_value(), index);
            match best {
                Some((p, s, v, _)) if (p, s, v) >= (points, safe, card.pip_value()) => {}
                _ => best = Some(key),
            }
        }
        best.map(|(_, _, _, index)| index)
    }

    fn should_call_go(&self, hand: &[Card], current_count: u8) -> bool {
        !has_playable(hand, current_count)
    }

    fn name(&self) -> &str {
        "BaselineBot"
    }
}
