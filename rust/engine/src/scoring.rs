use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Rank};
use crate::errors::GameError;

/// One scoring combination found in a shown hand: a label for narration,
/// its point value, and the exact cards that formed it.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ScoringCombo {
    pub label: String,
    pub points: u32,
    pub cards: Vec<Card>,
}

/// Enumerate every scoring combination in a 4-card hand plus the shared cut
/// card: fifteens, runs, pairs, flush, his nobs, in that order.
///
/// `is_crib` tightens the flush rule: a crib only scores a flush when all
/// five cards (hand and cut) share a suit, while a player's hand scores 4
/// for a hand-only flush and 5 when the cut matches too.
///
/// The same five cards always produce the same combos in the same order.
/// A hand of the wrong size is a caller defect and fails fast.
pub fn score_hand(hand: &[Card], cut: Card, is_crib: bool) -> Result<Vec<ScoringCombo>, GameError> {
    if hand.len() != 4 {
        return Err(GameError::InvariantViolation(format!(
            "show scoring expects a 4-card hand, got {}",
            hand.len()
        )));
    }
    let all = [hand[0], hand[1], hand[2], hand[3], cut];

    let mut combos = Vec::new();
    fifteens(&all, &mut combos);
    runs(&all, &mut combos);
    pairs(&all, &mut combos);
    flush(hand, cut, is_crib, &mut combos);
    nobs(hand, cut, &mut combos);
    Ok(combos)
}

/// Sum of all combo points.
pub fn total_from_combos(combos: &[ScoringCombo]) -> u32 {
    combos.iter().map(|c| c.points).sum()
}

// Every subset of 2..=5 cards whose pip values sum to 15 scores 2.
// Subsets are distinct card-identity combinations, never permutations.
fn fifteens(all: &[Card; 5], out: &mut Vec<ScoringCombo>) {
    for mask in 1u32..32 {
        if mask.count_ones() < 2 {
            continue;
        }
        let mut sum = 0u8;
        let mut cards = Vec::new();
        for (i, &c) in all.iter().enumerate() {
            if mask & (1 << i) != 0 {
                sum += c.pip_value();
                cards.push(c);
            }
        }
        if sum == 15 {
            out.push(ScoringCombo {
                label: "Fifteen".to_string(),
                points: 2,
                cards,
            });
        }
    }
}

// Longest consecutive-rank sequences of length >= 3. A duplicated rank
// multiplies the run count (each choice of duplicate is its own combo);
// shorter runs inside a longer one never score separately.
fn runs(all: &[Card; 5], out: &mut Vec<ScoringCombo>) {
    let mut by_order: BTreeMap<u8, Vec<Card>> = BTreeMap::new();
    for &c in all {
        by_order.entry(c.rank.run_order()).or_default().push(c);
    }
    let orders: Vec<u8> = by_order.keys().copied().collect();

    // Five cards hold at most five distinct ranks, so at most one maximal
    // streak of length >= 3 can exist; scan anyway for uniformity.
    let mut i = 0;
    while i < orders.len() {
        let mut j = i;
        while j + 1 < orders.len() && orders[j + 1] == orders[j] + 1 {
            j += 1;
        }
        let len = j - i + 1;
        if len >= 3 {
            emit_run_products(&orders[i..=j], &by_order, out);
        }
        i = j + 1;
    }
}

// Cartesian product over the duplicates at each rank of the streak.
fn emit_run_products(streak: &[u8], by_order: &BTreeMap<u8, Vec<Card>>, out: &mut Vec<ScoringCombo>) {
    let mut picks: Vec<Vec<Card>> = vec![Vec::new()];
    for order in streak {
        let mut extended = Vec::new();
        for prefix in &picks {
            for &c in &by_order[order] {
                let mut run = prefix.clone();
                run.push(c);
                extended.push(run);
            }
        }
        picks = extended;
    }
    for cards in picks {
        out.push(ScoringCombo {
            label: format!("Run of {}", streak.len()),
            points: streak.len() as u32,
            cards,
        });
    }
}

// Every unordered pair of equal rank scores 2; four of a kind therefore
// contributes C(4,2) = 6 pairs for 12.
fn pairs(all: &[Card; 5], out: &mut Vec<ScoringCombo>) {
    for i in 0..all.len() {
        for j in (i + 1)..all.len() {
            if all[i].rank == all[j].rank {
                out.push(ScoringCombo {
                    label: "Pair".to_string(),
                    points: 2,
                    cards: vec![all[i], all[j]],
                });
            }
        }
    }
}

fn flush(hand: &[Card], cut: Card, is_crib: bool, out: &mut Vec<ScoringCombo>) {
    let suit = hand[0].suit;
    if hand.iter().any(|c| c.suit != suit) {
        return;
    }
    if cut.suit == suit {
        let mut cards = hand.to_vec();
        cards.push(cut);
        out.push(ScoringCombo {
            label: "Five-card flush".to_string(),
            points: 5,
            cards,
        });
    } else if !is_crib {
        // A 4-card flush scores in a hand but never in the crib.
        out.push(ScoringCombo {
            label: "Flush".to_string(),
            points: 4,
            cards: hand.to_vec(),
        });
    }
}

// The held Jack matching the cut card's suit. The combo references the cut
// card itself, not a hand card of the same rank and suit.
fn nobs(hand: &[Card], cut: Card, out: &mut Vec<ScoringCombo>) {
    for &c in hand {
        if c.rank == Rank::Jack && c.suit == cut.suit {
            out.push(ScoringCombo {
                label: "His nobs".to_string(),
                points: 1,
                cards: vec![c, cut],
            });
        }
    }
}
