use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::scoring::{total_from_combos, ScoringCombo};

/// The count a pegging sequence may never exceed.
pub const MAX_COUNT: u8 = 31;

/// One card laid during pegging, tagged with the seat that played it.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayedCard {
    pub player_id: String,
    pub card: Card,
}

/// Turn-by-turn state of the pegging phase.
///
/// `played_cards` spans the whole phase, across count resets;
/// `sequence_start_index` marks where the cards still in play for the
/// current count begin, so a client can redraw only the active run after
/// a reset.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct PeggingState {
    pub played_cards: Vec<PlayedCard>,
    pub current_count: u8,
    pub current_turn_player_id: String,
    pub sequence_start_index: usize,
}

impl PeggingState {
    pub fn new(first_turn_player_id: String) -> Self {
        Self {
            played_cards: Vec::new(),
            current_count: 0,
            current_turn_player_id: first_turn_player_id,
            sequence_start_index: 0,
        }
    }

    /// Cards still in play for the current count.
    pub fn active_sequence(&self) -> &[PlayedCard] {
        &self.played_cards[self.sequence_start_index..]
    }

    /// End the current count: back to 0, with the active sequence starting
    /// after everything already played.
    pub fn reset_sequence(&mut self) {
        self.current_count = 0;
        self.sequence_start_index = self.played_cards.len();
    }

    /// Who played the last card of the active sequence, if any card has
    /// been laid since the last reset.
    pub fn last_player_in_sequence(&self) -> Option<&str> {
        self.active_sequence()
            .last()
            .map(|p| p.player_id.as_str())
    }
}

/// Whether `card` can legally be laid on the current count.
pub fn can_play(card: Card, current_count: u8) -> bool {
    current_count + card.pip_value() <= MAX_COUNT
}

/// Whether any card in `hand` can legally be laid on the current count.
pub fn has_playable(hand: &[Card], current_count: u8) -> bool {
    hand.iter().any(|&c| can_play(c, current_count))
}

/// Points formed by the newly extended play sequence, evaluated against the
/// active cards only, never the whole hand: a fifteen or thirty-one on the
/// count, the longest same-rank tail as a pair set, and the longest suffix
/// forming a consecutive-rank run.
pub fn sequence_combos(active: &[PlayedCard], current_count: u8) -> Vec<ScoringCombo> {
    let mut combos = Vec::new();
    let cards: Vec<Card> = active.iter().map(|p| p.card).collect();

    if current_count == 15 {
        combos.push(ScoringCombo {
            label: "Fifteen".to_string(),
            points: 2,
            cards: cards.clone(),
        });
    }
    if current_count == MAX_COUNT {
        combos.push(ScoringCombo {
            label: "Thirty-one".to_string(),
            points: 2,
            cards: cards.clone(),
        });
    }

    if let Some(combo) = tail_pairs(&cards) {
        combos.push(combo);
    }
    if let Some(combo) = tail_run(&cards) {
        combos.push(combo);
    }
    combos
}

/// Points `candidate` would score if laid on the active sequence right
/// now. Advisory: decision policies and previews use this without going
/// through a full command application.
pub fn preview_points(active: &[PlayedCard], candidate: Card, current_count: u8) -> u32 {
    let mut extended = active.to_vec();
    extended.push(PlayedCard {
        player_id: String::new(),
        card: candidate,
    });
    total_from_combos(&sequence_combos(
        &extended,
        current_count + candidate.pip_value(),
    ))
}

// Consecutive same-rank cards ending at the newest play: 2 for a pair,
// 6 for three of a kind, 12 for four.
fn tail_pairs(cards: &[Card]) -> Option<ScoringCombo> {
    let &last = cards.last()?;
    let mut matched = 1;
    for c in cards.iter().rev().skip(1) {
        if c.rank == last.rank {
            matched += 1;
        } else {
            break;
        }
    }
    let (points, label) = match matched {
        2 => (2, "Pair"),
        3 => (6, "Pair royal"),
        4 => (12, "Double pair royal"),
        _ => return None,
    };
    Some(ScoringCombo {
        label: label.to_string(),
        points,
        cards: cards[cards.len() - matched..].to_vec(),
    })
}

// Longest suffix of the active sequence whose ranks are consecutive (in
// any order of play); scored once, at its full length.
fn tail_run(cards: &[Card]) -> Option<ScoringCombo> {
    for take in (3..=cards.len()).rev() {
        let suffix = &cards[cards.len() - take..];
        if is_run(suffix) {
            return Some(ScoringCombo {
                label: format!("Run of {}", take),
                points: take as u32,
                cards: suffix.to_vec(),
            });
        }
    }
    None
}

fn is_run(cards: &[Card]) -> bool {
    let mut orders: Vec<u8> = cards.iter().map(|c| c.rank.run_order()).collect();
    orders.sort_unstable();
    orders.windows(2).all(|w| w[1] == w[0] + 1)
}
