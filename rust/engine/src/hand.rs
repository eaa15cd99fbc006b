use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Rank};
use crate::deck::Deck;
use crate::errors::{GameError, IllegalMove};
use crate::events::{EventKind, GameEvent};
use crate::game::{turn_order_for_dealer, MatchConfig};
use crate::pegging::{self, PeggingState, PlayedCard};
use crate::scoring::{score_hand, total_from_combos, ScoringCombo};

/// Outer phase of one cribbage hand. Transitions are strictly forward; a
/// new hand starts over with a fresh state rather than revisiting a phase.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum Phase {
    Cutting,
    Discarding,
    Pegging,
    Counting,
    Complete,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Cutting => "cutting",
            Phase::Discarding => "discarding",
            Phase::Pegging => "pegging",
            Phase::Counting => "counting",
            Phase::Complete => "complete",
        }
    }
}

/// Per-seat state. `peg_score` is the cumulative match total and survives
/// across hands; everything else is reset by each new deal.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerHandState {
    pub hand: Vec<Card>,
    pub discarded_to_crib: Vec<Card>,
    pub peg_score: u32,
}

/// One step of the counting phase: whose cards were shown, what they made,
/// and the running total after the award. Kept on the snapshot so a host
/// never has to reconstruct pre-counting scores by subtraction.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandCountEntry {
    pub player_id: String,
    pub is_crib: bool,
    pub combos: Vec<ScoringCombo>,
    pub points: u32,
    pub score_after: u32,
}

/// The complete, serializable snapshot of one cribbage hand.
///
/// Every operation is all-or-nothing: it either returns a new snapshot or
/// a [`GameError`] leaving the input untouched, so independent clients can
/// apply the same command to the same snapshot and converge.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct CribbageHandState {
    pub phase: Phase,
    pub dealer_player_id: String,
    pub crib_owner_player_id: String,
    /// Seating order starting left of the dealer; the dealer is last.
    pub turn_order: Vec<String>,
    pub crib: Vec<Card>,
    pub cut_card: Option<Card>,
    /// Remainder of the deck between dealing and the cut; emptied once the
    /// cut card is revealed.
    pub stock: Vec<Card>,
    pub player_states: BTreeMap<String, PlayerHandState>,
    pub pegging: PeggingState,
    pub config: MatchConfig,
    pub payout_multiplier: u32,
    pub winner_player_id: Option<String>,
    pub loser_score: Option<u32>,
    pub last_event: Option<GameEvent>,
    /// Set by the counting phase; `None` after a pegging-phase win, which
    /// is how hosts tell the two kinds of win apart.
    pub last_hand_count: Option<Vec<HandCountEntry>>,
}

impl CribbageHandState {
    /// Deal a fresh hand: shuffle, deal 6 cards each to 2 players or 5 to
    /// 3-4, and open the discarding phase. All peg scores start at zero;
    /// [`CribbageHandState::start_new_hand`] carries them forward instead.
    pub fn deal(
        player_ids: &[String],
        dealer_id: &str,
        config: MatchConfig,
        deck: &mut Deck,
    ) -> Result<Self, GameError> {
        Self::deal_with_scores(player_ids, dealer_id, config, deck, &BTreeMap::new())
    }

    fn deal_with_scores(
        player_ids: &[String],
        dealer_id: &str,
        config: MatchConfig,
        deck: &mut Deck,
        carried_scores: &BTreeMap<String, u32>,
    ) -> Result<Self, GameError> {
        if !(2..=4).contains(&player_ids.len()) {
            return Err(IllegalMove::BadPlayerCount {
                count: player_ids.len(),
            }
            .into());
        }
        let mut seen = std::collections::BTreeSet::new();
        for pid in player_ids {
            if !seen.insert(pid) {
                return Err(GameError::InvariantViolation(format!(
                    "duplicate player id {}",
                    pid
                )));
            }
        }
        if !player_ids.iter().any(|p| p == dealer_id) {
            return Err(IllegalMove::UnknownPlayer {
                player_id: dealer_id.to_string(),
            }
            .into());
        }
        config.validate()?;

        let turn_order = turn_order_for_dealer(player_ids, dealer_id);
        let cards_each = if player_ids.len() == 2 { 6 } else { 5 };

        let mut state = Self {
            phase: Phase::Cutting,
            dealer_player_id: dealer_id.to_string(),
            crib_owner_player_id: dealer_id.to_string(),
            turn_order: turn_order.clone(),
            crib: Vec::new(),
            cut_card: None,
            stock: Vec::new(),
            player_states: BTreeMap::new(),
            pegging: PeggingState::new(turn_order[0].clone()),
            config,
            payout_multiplier: 1,
            winner_player_id: None,
            loser_score: None,
            last_event: None,
            last_hand_count: None,
        };

        deck.shuffle();
        for pid in player_ids {
            state.player_states.insert(
                pid.clone(),
                PlayerHandState {
                    hand: Vec::with_capacity(cards_each),
                    discarded_to_crib: Vec::new(),
                    peg_score: carried_scores.get(pid).copied().unwrap_or(0),
                },
            );
        }
        // One card at a time, starting left of the dealer.
        for _ in 0..cards_each {
            for pid in &turn_order {
                let card = deck.deal_card().ok_or_else(|| {
                    GameError::InvariantViolation("deck exhausted during deal".to_string())
                })?;
                if let Some(ps) = state.player_states.get_mut(pid) {
                    ps.hand.push(card);
                }
            }
        }
        state.stock = deck.deal_remaining();
        state.phase = Phase::Discarding;
        Ok(state)
    }

    /// How many cards each seat sends to the crib this hand.
    pub fn expected_discard_count(&self) -> usize {
        if self.player_states.len() == 2 {
            2
        } else {
            1
        }
    }

    /// Send the cards at `indices` from `player_id`'s hand to the crib.
    ///
    /// Once the last seat discards, the crib is topped up to four from the
    /// stock if needed (three-handed play), the cut card is revealed, his
    /// heels is scored, and the pegging phase opens.
    pub fn discard_to_crib(&self, player_id: &str, indices: &[usize]) -> Result<Self, GameError> {
        self.require_phase(Phase::Discarding, "discard")?;
        let ps = self.player_state(player_id)?;
        if !ps.discarded_to_crib.is_empty() {
            return Err(IllegalMove::AlreadyDiscarded {
                player_id: player_id.to_string(),
            }
            .into());
        }
        let expected = self.expected_discard_count();
        if indices.len() != expected {
            return Err(IllegalMove::WrongDiscardCount {
                expected,
                actual: indices.len(),
            }
            .into());
        }
        let mut sorted = indices.to_vec();
        sorted.sort_unstable();
        for pair in sorted.windows(2) {
            if pair[0] == pair[1] {
                return Err(IllegalMove::DuplicateCardIndex { index: pair[0] }.into());
            }
        }
        for &index in &sorted {
            if index >= ps.hand.len() {
                return Err(IllegalMove::BadCardIndex {
                    index,
                    hand_len: ps.hand.len(),
                }
                .into());
            }
        }

        let mut next = self.clone();
        {
            let ps = next
                .player_states
                .get_mut(player_id)
                .ok_or_else(|| unknown_player(player_id))?;
            // Highest index first so earlier removals don't shift later ones.
            for &index in sorted.iter().rev() {
                let card = ps.hand.remove(index);
                ps.discarded_to_crib.insert(0, card);
            }
            next.crib.extend(ps.discarded_to_crib.iter().copied());
        }

        let everyone_done = next
            .player_states
            .values()
            .all(|p| !p.discarded_to_crib.is_empty());
        if everyone_done {
            next.finish_discarding()?;
        }
        Ok(next)
    }

    // Crib top-up, cut reveal, his heels, and the move into pegging.
    fn finish_discarding(&mut self) -> Result<(), GameError> {
        while self.crib.len() < 4 {
            if self.stock.is_empty() {
                return Err(GameError::InvariantViolation(
                    "stock exhausted before the crib reached 4 cards".to_string(),
                ));
            }
            self.crib.push(self.stock.remove(0));
        }
        if self.crib.len() != 4 {
            return Err(GameError::InvariantViolation(format!(
                "discarding ended with a crib of {} cards",
                self.crib.len()
            )));
        }
        if self.stock.is_empty() {
            return Err(GameError::InvariantViolation(
                "stock exhausted before the cut".to_string(),
            ));
        }
        let cut = self.stock.remove(0);
        self.cut_card = Some(cut);
        // The deck is done once dealing and cutting are complete.
        self.stock.clear();

        if cut.rank == Rank::Jack {
            let dealer = self.dealer_player_id.clone();
            self.award_points(&dealer, 2, EventKind::HisHeels, "His heels")?;
            if self.winner_player_id.is_some() {
                return Ok(());
            }
        }
        self.pegging.current_turn_player_id = self.turn_order[0].clone();
        self.phase = Phase::Pegging;
        Ok(())
    }

    /// Lay the card at `card_index` from `player_id`'s hand onto the count.
    ///
    /// Scores whatever the newly extended sequence makes (fifteen, pairs,
    /// run, thirty-one), then resolves the turn: reset on 31, an automatic
    /// go/last-card point when nobody can lay another card, otherwise the
    /// turn passes to the next seat still holding cards.
    pub fn play_card(&self, player_id: &str, card_index: usize) -> Result<Self, GameError> {
        self.require_phase(Phase::Pegging, "play")?;
        let ps = self.player_state(player_id)?;
        if self.pegging.current_turn_player_id != player_id {
            return Err(IllegalMove::NotYourTurn {
                player_id: player_id.to_string(),
            }
            .into());
        }
        if card_index >= ps.hand.len() {
            return Err(IllegalMove::BadCardIndex {
                index: card_index,
                hand_len: ps.hand.len(),
            }
            .into());
        }
        let card = ps.hand[card_index];
        if !pegging::can_play(card, self.pegging.current_count) {
            return Err(IllegalMove::CountWouldExceed31 {
                pip: card.pip_value(),
                would_be: self.pegging.current_count + card.pip_value(),
            }
            .into());
        }

        let mut next = self.clone();
        if let Some(ps) = next.player_states.get_mut(player_id) {
            ps.hand.remove(card_index);
        }
        next.pegging.played_cards.push(PlayedCard {
            player_id: player_id.to_string(),
            card,
        });
        next.pegging.current_count += card.pip_value();

        let combos =
            pegging::sequence_combos(next.pegging.active_sequence(), next.pegging.current_count);
        if !combos.is_empty() {
            let points = total_from_combos(&combos);
            let label = combos
                .iter()
                .map(|c| c.label.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            next.award_points(player_id, points, EventKind::Pegging, &label)?;
            if next.winner_player_id.is_some() {
                return Ok(next);
            }
        }

        let reached_31 = next.pegging.current_count == pegging::MAX_COUNT;
        if reached_31 {
            next.pegging.reset_sequence();
        }

        let all_empty = next.player_states.values().all(|p| p.hand.is_empty());
        if all_empty {
            if !reached_31 {
                next.award_points(player_id, 1, EventKind::Go, "Last card")?;
                if next.winner_player_id.is_some() {
                    return Ok(next);
                }
            }
            next.pegging.reset_sequence();
            next.phase = Phase::Counting;
            return Ok(next);
        }

        if !reached_31 && !next.anyone_can_play() {
            // Universal go resolved without waiting for explicit calls.
            next.award_points(player_id, 1, EventKind::Go, "Go")?;
            if next.winner_player_id.is_some() {
                return Ok(next);
            }
            next.pegging.reset_sequence();
        }

        if let Some(turn) = next.next_player_with_cards(player_id) {
            next.pegging.current_turn_player_id = turn;
        }
        Ok(next)
    }

    /// Declare that `player_id` cannot lay a card without passing 31.
    ///
    /// Fails while the caller still holds a playable card. Passes the turn
    /// to the next seat that can play; when nobody can, the last player to
    /// lay a card takes the go point and the count resets.
    pub fn call_go(&self, player_id: &str) -> Result<Self, GameError> {
        self.require_phase(Phase::Pegging, "go")?;
        let ps = self.player_state(player_id)?;
        if self.pegging.current_turn_player_id != player_id {
            return Err(IllegalMove::NotYourTurn {
                player_id: player_id.to_string(),
            }
            .into());
        }
        if pegging::has_playable(&ps.hand, self.pegging.current_count) {
            return Err(IllegalMove::GoWithPlayableCard.into());
        }

        let mut next = self.clone();
        if let Some(turn) = next.next_player_able_to_play(player_id) {
            next.pegging.current_turn_player_id = turn;
            return Ok(next);
        }

        let scorer = next
            .pegging
            .last_player_in_sequence()
            .map(str::to_string)
            .ok_or_else(|| {
                GameError::InvariantViolation("go called on an empty sequence".to_string())
            })?;
        next.award_points(&scorer, 1, EventKind::Go, "Go")?;
        if next.winner_player_id.is_some() {
            return Ok(next);
        }
        next.pegging.reset_sequence();
        let lead = next.next_player_with_cards(&scorer).ok_or_else(|| {
            GameError::InvariantViolation("go resolved with no cards left in play".to_string())
        })?;
        next.pegging.current_turn_player_id = lead;
        Ok(next)
    }

    /// Count every hand in fixed order (each non-dealer starting left of
    /// the dealer, then the dealer, then the crib), applying all additions
    /// atomically and recording the per-step deltas on the snapshot.
    ///
    /// The first seat to reach the match target in this order wins; later
    /// steps are not applied, so ties cannot occur.
    pub fn apply_hand_count_scores(&self) -> Result<Self, GameError> {
        self.require_phase(Phase::Counting, "count")?;
        let cut = self.cut_card.ok_or_else(|| {
            GameError::InvariantViolation("counting phase without a cut card".to_string())
        })?;

        let mut next = self.clone();
        let mut entries = Vec::with_capacity(next.turn_order.len() + 1);

        for pid in next.turn_order.clone() {
            let cards = next.played_hand_of(&pid);
            if cards.len() != 4 {
                return Err(GameError::InvariantViolation(format!(
                    "player {} finished pegging with {} cards, expected 4",
                    pid,
                    cards.len()
                )));
            }
            let combos = score_hand(&cards, cut, false)?;
            let points = total_from_combos(&combos);
            next.award_points(&pid, points, EventKind::HandCount, "Hand count")?;
            entries.push(HandCountEntry {
                player_id: pid.clone(),
                is_crib: false,
                combos,
                points,
                score_after: next.score_of(&pid)?,
            });
            if next.winner_player_id.is_some() {
                next.last_hand_count = Some(entries);
                return Ok(next);
            }
        }

        let dealer = next.dealer_player_id.clone();
        let combos = score_hand(&next.crib, cut, true)?;
        let points = total_from_combos(&combos);
        next.award_points(&dealer, points, EventKind::CribCount, "Crib count")?;
        entries.push(HandCountEntry {
            player_id: dealer.clone(),
            is_crib: true,
            combos,
            points,
            score_after: next.score_of(&dealer)?,
        });

        next.last_hand_count = Some(entries);
        next.phase = Phase::Complete;
        Ok(next)
    }

    /// Start the next hand of the match: the deal rotates one seat to the
    /// left, peg scores carry forward, and everything else is fresh.
    /// Only legal once the current hand is complete without a match winner.
    pub fn start_new_hand(&self, deck: &mut Deck) -> Result<Self, GameError> {
        self.require_phase(Phase::Complete, "start_new_hand")?;
        if self.winner_player_id.is_some() {
            return Err(IllegalMove::MatchSettled.into());
        }
        let next_dealer = self.turn_order[0].clone();
        let carried: BTreeMap<String, u32> = self
            .player_states
            .iter()
            .map(|(pid, ps)| (pid.clone(), ps.peg_score))
            .collect();
        Self::deal_with_scores(
            &self.turn_order,
            &next_dealer,
            self.config.clone(),
            deck,
            &carried,
        )
    }

    /// Current score of a seat.
    pub fn score_of(&self, player_id: &str) -> Result<u32, GameError> {
        Ok(self.player_state(player_id)?.peg_score)
    }

    fn player_state(&self, player_id: &str) -> Result<&PlayerHandState, GameError> {
        self.player_states
            .get(player_id)
            .ok_or_else(|| unknown_player(player_id))
    }

    fn require_phase(&self, expected: Phase, op: &'static str) -> Result<(), GameError> {
        if self.phase != expected {
            return Err(IllegalMove::WrongPhase {
                op,
                phase: self.phase.as_str(),
            }
            .into());
        }
        Ok(())
    }

    // The four cards a seat laid during pegging, in play order; the
    // counting phase shows these, since the hand itself is empty by then.
    fn played_hand_of(&self, player_id: &str) -> Vec<Card> {
        self.pegging
            .played_cards
            .iter()
            .filter(|p| p.player_id == player_id)
            .map(|p| p.card)
            .collect()
    }

    fn anyone_can_play(&self) -> bool {
        self.player_states
            .values()
            .any(|p| pegging::has_playable(&p.hand, self.pegging.current_count))
    }

    // Next seat after `after` in rotation still holding cards; wraps all
    // the way around to `after` itself.
    fn next_player_with_cards(&self, after: &str) -> Option<String> {
        self.seats_after(after).into_iter().find(|pid| {
            self.player_states
                .get(pid)
                .is_some_and(|p| !p.hand.is_empty())
        })
    }

    fn next_player_able_to_play(&self, after: &str) -> Option<String> {
        let count = self.pegging.current_count;
        self.seats_after(after).into_iter().find(|pid| {
            pid != after
                && self
                    .player_states
                    .get(pid)
                    .is_some_and(|p| pegging::has_playable(&p.hand, count))
        })
    }

    fn seats_after(&self, after: &str) -> Vec<String> {
        let n = self.turn_order.len();
        let at = self
            .turn_order
            .iter()
            .position(|p| p == after)
            .unwrap_or(n - 1);
        (1..=n)
            .map(|offset| self.turn_order[(at + offset) % n].clone())
            .collect()
    }

    // Single choke point for score changes: bumps the seat's total, leaves
    // the narration event, and settles the match the moment a total
    // reaches the target. Never mutates after a winner exists.
    fn award_points(
        &mut self,
        player_id: &str,
        points: u32,
        kind: EventKind,
        label: &str,
    ) -> Result<(), GameError> {
        if self.winner_player_id.is_some() {
            return Ok(());
        }
        let ps = self
            .player_states
            .get_mut(player_id)
            .ok_or_else(|| unknown_player(player_id))?;
        ps.peg_score += points;
        let reached = ps.peg_score >= self.config.points_to_win;
        self.last_event = Some(GameEvent {
            kind,
            player_id: player_id.to_string(),
            label: label.to_string(),
            points,
        });
        if reached {
            self.settle(player_id);
        }
        Ok(())
    }

    fn settle(&mut self, winner_id: &str) {
        let loser_score = self
            .player_states
            .iter()
            .filter(|(pid, _)| pid.as_str() != winner_id)
            .map(|(_, ps)| ps.peg_score)
            .min()
            .unwrap_or(0);
        self.winner_player_id = Some(winner_id.to_string());
        self.loser_score = Some(loser_score);
        self.payout_multiplier = self.config.payout_multiplier(loser_score);
        self.phase = Phase::Complete;
    }
}

fn unknown_player(player_id: &str) -> GameError {
    IllegalMove::UnknownPlayer {
        player_id: player_id.to_string(),
    }
    .into()
}
