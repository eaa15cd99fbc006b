use serde::{Deserialize, Serialize};

/// Represents one of the four suits in a standard 52-card deck.
/// Used as a component of [`Card`] to fully define a playing card.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Suit {
    /// Clubs suit (♣)
    Clubs,
    /// Diamonds suit (♦)
    Diamonds,
    /// Hearts suit (♥)
    Hearts,
    /// Spades suit (♠)
    Spades,
}

/// Represents the rank (face value) of a playing card from Ace through King.
///
/// The discriminant is the run order used for consecutive-rank sequences:
/// Ace is low (1) and King is high (13). Counting and dealer-draw values
/// differ from the run order; see [`Rank::pip_value`] and
/// [`Rank::draw_value`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Rank {
    /// Ace (low in runs, worth 1 toward the count)
    Ace = 1,
    /// Rank 2
    Two,
    /// Rank 3
    Three,
    /// Rank 4
    Four,
    /// Rank 5
    Five,
    /// Rank 6
    Six,
    /// Rank 7
    Seven,
    /// Rank 8
    Eight,
    /// Rank 9
    Nine,
    /// Rank 10
    Ten,
    /// Jack (11 in runs, worth 10 toward the count)
    Jack,
    /// Queen (12 in runs, worth 10 toward the count)
    Queen,
    /// King (13 in runs, worth 10 toward the count)
    King,
}

impl Rank {
    /// Position of this rank in a run: Ace=1 up through King=13.
    pub fn run_order(self) -> u8 {
        self as u8
    }

    /// Pip value used by the count and by fifteens: Ace=1, face cards=10,
    /// number cards their face value.
    pub fn pip_value(self) -> u8 {
        match self {
            Rank::Jack | Rank::Queen | Rank::King => 10,
            r => r as u8,
        }
    }

    /// Draw value used only by dealer selection, where Ace ranks highest:
    /// Ace=14, King=13, Queen=12, Jack=11, others their face value.
    pub fn draw_value(self) -> u8 {
        match self {
            Rank::Ace => 14,
            r => r as u8,
        }
    }
}

/// Represents a single playing card with a suit and rank.
/// Cards are the fundamental unit of the game, used in player hands, the
/// crib, the pegging sequence, and the deck. Immutable value object.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Card {
    /// The suit of the card (Clubs, Diamonds, Hearts, or Spades)
    pub suit: Suit,
    /// The rank of the card (Ace through King)
    pub rank: Rank,
}

impl Card {
    /// Pip value of this card toward the pegging count and fifteens.
    pub fn pip_value(self) -> u8 {
        self.rank.pip_value()
    }
}

pub fn all_suits() -> [Suit; 4] {
    [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades]
}

pub fn all_ranks() -> [Rank; 13] {
    [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ]
}

pub fn full_deck() -> Vec<Card> {
    let mut v = Vec::with_capacity(52);
    for &s in &all_suits() {
        for &r in &all_ranks() {
            v.push(Card { suit: s, rank: r });
        }
    }
    v
}
