use serde::{Deserialize, Serialize};

use crate::errors::GameError;

/// Match-level rules configuration carried on every hand snapshot.
///
/// Thresholds are strict: a loser finishing exactly on a threshold is not
/// skunked. With the defaults, a loser on 90 is skunked and a loser on 91
/// is not.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    pub points_to_win: u32,
    pub skunk_enabled: bool,
    pub skunk_threshold: u32,
    pub double_skunk_enabled: bool,
    pub double_skunk_threshold: u32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            points_to_win: 121,
            skunk_enabled: true,
            skunk_threshold: 91,
            double_skunk_enabled: true,
            double_skunk_threshold: 61,
        }
    }
}

impl MatchConfig {
    pub fn validate(&self) -> Result<(), GameError> {
        if self.points_to_win == 0 {
            return Err(GameError::InvariantViolation(
                "points_to_win must be at least 1".to_string(),
            ));
        }
        if self.skunk_enabled && self.skunk_threshold > self.points_to_win {
            return Err(GameError::InvariantViolation(format!(
                "skunk threshold {} exceeds points to win {}",
                self.skunk_threshold, self.points_to_win
            )));
        }
        if self.double_skunk_enabled
            && self.skunk_enabled
            && self.double_skunk_threshold > self.skunk_threshold
        {
            return Err(GameError::InvariantViolation(format!(
                "double-skunk threshold {} exceeds skunk threshold {}",
                self.double_skunk_threshold, self.skunk_threshold
            )));
        }
        Ok(())
    }

    /// Payout multiplier from the losing score at the moment of the win:
    /// 3 for a double skunk, 2 for a skunk, otherwise 1.
    pub fn payout_multiplier(&self, loser_score: u32) -> u32 {
        if self.double_skunk_enabled && loser_score < self.double_skunk_threshold {
            3
        } else if self.skunk_enabled && loser_score < self.skunk_threshold {
            2
        } else {
            1
        }
    }
}

/// Seating order rotated so play starts left of the dealer and the dealer
/// acts (and counts) last.
pub fn turn_order_for_dealer(seating: &[String], dealer_id: &str) -> Vec<String> {
    let dealer_at = seating
        .iter()
        .position(|p| p == dealer_id)
        .unwrap_or(seating.len().saturating_sub(1));
    let mut order = Vec::with_capacity(seating.len());
    for offset in 1..=seating.len() {
        order.push(seating[(dealer_at + offset) % seating.len()].clone());
    }
    order
}
