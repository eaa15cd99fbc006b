//! # cribbage-ai: Bot Opponent System for Cribbage
//!
//! Provides bot opponent implementations for cribbage gameplay. Bots are
//! pure decision policies: they consume exactly the information a human in
//! that seat would have (their own hand, the count, the cards on the
//! table) and return the same commands a human would issue. They never
//! touch the rules themselves, so any policy that only selects among
//! legal moves conforms.
//!
//! ## Core Components
//!
//! - [`BotPolicy`] - Trait defining the interface for bot decision-making
//! - [`baseline`] - Baseline bot implementation for play and simulation
//! - [`create_bot`] - Factory function for creating bot opponents
//!
//! ## Quick Start
//!
//! ```rust
//! use cribbage_ai::{create_bot, BotPolicy};
//! use cribbage_engine::cards::{Card, Rank, Suit};
//!
//! let bot = create_bot("baseline");
//! let hand = vec![
//!     Card { suit: Suit::Spades, rank: Rank::Five },
//!     Card { suit: Suit::Hearts, rank: Rank::Five },
//!     Card { suit: Suit::Diamonds, rank: Rank::Six },
//!     Card { suit: Suit::Clubs, rank: Rank::Four },
//!     Card { suit: Suit::Spades, rank: Rank::King },
//!     Card { suit: Suit::Hearts, rank: Rank::Queen },
//! ];
//! // Two-player cribbage: pick two cards for the crib.
//! let discard = bot.choose_discard(&hand, 2, true);
//! assert_eq!(discard.len(), 2);
//! ```

use cribbage_engine::cards::Card;
use cribbage_engine::pegging::PlayedCard;

pub mod baseline;

/// Trait defining the interface for bot opponents.
///
/// Every method is a pure function of the visible state; implementations
/// must be deterministic so a replayed match makes the same decisions.
pub trait BotPolicy: Send + Sync {
    /// Pick which cards to send to the crib.
    ///
    /// Returns indices into `hand`: two of them in a 2-player game, one
    /// otherwise. `is_dealer` tells the policy whether the crib scores for
    /// this seat or for an opponent.
    fn choose_discard(&self, hand: &[Card], player_count: usize, is_dealer: bool) -> Vec<usize>;

    /// Pick the card to lay on the current count, given the active
    /// sequence of the pegging phase.
    ///
    /// Returns `None` exactly when no card in `hand` is legal, which is
    /// the signal to call go.
    fn choose_pegging_card(
        &self,
        hand: &[Card],
        current_count: u8,
        played: &[PlayedCard],
    ) -> Option<usize>;

    /// Whether this seat must call go: true exactly when no card in `hand`
    /// can be played without exceeding 31.
    fn should_call_go(&self, hand: &[Card], current_count: u8) -> bool;

    /// Return the name/identifier of this bot implementation.
    fn name(&self) -> &str;
}

/// Factory function to create bot opponents by type string.
///
/// # Supported Bot Types
///
/// - `"baseline"` - Expected-value discard and greedy pegging
///
/// # Example
///
/// ```rust
/// use cribbage_ai::create_bot;
///
/// let bot = create_bot("baseline");
/// assert_eq!(bot.name(), "BaselineBot");
/// ```
///
/// # Panics
///
/// Panics if an unknown bot type is requested. Currently only "baseline"
/// is supported.
pub fn create_bot(bot_type: &str) -> Box<dyn BotPolicy> {
    match bot_type {
        "baseline" => Box::new(baseline::BaselineBot::new()),
        _ => panic!("Unknown bot type: {}", bot_type),
    }
}
