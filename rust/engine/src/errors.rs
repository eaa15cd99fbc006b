use thiserror::Error;

/// A command the engine refuses to apply. Always recoverable: the host
/// should surface the message and leave its copy of the state untouched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IllegalMove {
    #[error("it is not player {player_id}'s turn")]
    NotYourTurn { player_id: String },
    #[error("unknown player {player_id}")]
    UnknownPlayer { player_id: String },
    #[error("{op} is not legal during the {phase} phase")]
    WrongPhase { op: &'static str, phase: &'static str },
    #[error("card index {index} is out of range for a hand of {hand_len}")]
    BadCardIndex { index: usize, hand_len: usize },
    #[error("card index {index} appears more than once")]
    DuplicateCardIndex { index: usize },
    #[error("must discard exactly {expected} card(s), got {actual}")]
    WrongDiscardCount { expected: usize, actual: usize },
    #[error("player {player_id} has already discarded this hand")]
    AlreadyDiscarded { player_id: String },
    #[error("a card worth {pip} would take the count to {would_be}, past 31")]
    CountWouldExceed31 { pip: u8, would_be: u8 },
    #[error("cannot call go while holding a playable card")]
    GoWithPlayableCard,
    #[error("a hand needs 2 to 4 players, got {count}")]
    BadPlayerCount { count: usize },
    #[error("the match is already settled")]
    MatchSettled,
}

/// Top-level error type for engine operations.
///
/// `IllegalMove` is the host-recoverable class (reject the action, prompt
/// again). `InvariantViolation` marks a state the rules should make
/// unreachable and is a defect to log, never to retry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("illegal move: {0}")]
    IllegalMove(#[from] IllegalMove),
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}
