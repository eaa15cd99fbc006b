use serde::{Deserialize, Serialize};

/// Classifies a scoring or flow event so a presentation layer can narrate
/// or animate it without re-deriving the rules.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum EventKind {
    /// Dealer scored 2 because the cut card is a Jack.
    HisHeels,
    /// Points made by the newly extended pegging sequence.
    Pegging,
    /// Go or last-card point at the end of a pegging sequence.
    Go,
    /// A player's hand total applied during counting.
    HandCount,
    /// The dealer's crib total applied during counting.
    CribCount,
}

/// The most recent scoring event, kept on the snapshot for narration.
/// Purely descriptive: applying it again would double-count.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameEvent {
    pub kind: EventKind,
    pub player_id: String,
    pub label: String,
    pub points: u32,
}
