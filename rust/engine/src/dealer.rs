use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::deck::Deck;
use crate::errors::GameError;

/// One face-up card drawn by a contender during dealer selection.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct DrawnCard {
    pub player_id: String,
    pub card: Card,
}

/// Result of the dealer-selection protocol, with the full draw history so
/// a client can stack each re-draw on top of the previous round.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct DealerDraw {
    pub rounds: Vec<Vec<DrawnCard>>,
    pub dealer_player_id: String,
}

/// Pick the first dealer: every contender draws one card face up, highest
/// draw value wins (Ace high, 14 down to 2). A tie re-draws among the tied
/// players only, repeating until a unique maximum emerges.
///
/// The tie set shrinks or re-draws each round, so this terminates almost
/// surely, but there is no fixed bound on the number of rounds; the deck
/// is reshuffled whenever it runs out mid-protocol.
pub fn deal_initial_dealer(
    player_ids: &[String],
    deck: &mut Deck,
) -> Result<DealerDraw, GameError> {
    if player_ids.len() < 2 {
        return Err(GameError::InvariantViolation(format!(
            "dealer selection needs at least 2 players, got {}",
            player_ids.len()
        )));
    }
    deck.shuffle();

    let mut contenders: Vec<String> = player_ids.to_vec();
    let mut rounds = Vec::new();
    loop {
        let mut round = Vec::with_capacity(contenders.len());
        for pid in &contenders {
            let card = draw_one(deck)?;
            round.push(DrawnCard {
                player_id: pid.clone(),
                card,
            });
        }
        let best = round
            .iter()
            .map(|d| d.card.rank.draw_value())
            .max()
            .ok_or_else(|| {
                GameError::InvariantViolation("dealer draw round was empty".to_string())
            })?;
        let tied: Vec<String> = round
            .iter()
            .filter(|d| d.card.rank.draw_value() == best)
            .map(|d| d.player_id.clone())
            .collect();
        rounds.push(round);

        if tied.len() == 1 {
            let dealer_player_id = tied.into_iter().next().ok_or_else(|| {
                GameError::InvariantViolation("dealer draw lost its winner".to_string())
            })?;
            return Ok(DealerDraw {
                rounds,
                dealer_player_id,
            });
        }
        contenders = tied;
    }
}

fn draw_one(deck: &mut Deck) -> Result<Card, GameError> {
    if let Some(card) = deck.deal_card() {
        return Ok(card);
    }
    deck.shuffle();
    deck.deal_card().ok_or_else(|| {
        GameError::InvariantViolation("deck empty immediately after reshuffle".to_string())
    })
}
