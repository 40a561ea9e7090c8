//! Turn management for combat
//!
//! Tracks whose turn it is and the current round number.

use serde::{Deserialize, Serialize};

/// Which side of a fight is acting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Side {
    #[default]
    Player,
    Enemy,
}

/// Turn order for a one-on-one fight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnTracker {
    /// Side whose turn it is
    current: Side,
    /// Current round number
    round: u32,
}

impl TurnTracker {
    /// Create a new tracker: player first, round 1
    pub fn new() -> Self {
        Self {
            current: Side::Player,
            round: 1,
        }
    }

    /// Get the side whose turn it is
    pub fn current(&self) -> Side {
        self.current
    }

    /// Give the turn to `side` within the current round
    pub fn hand_over(&mut self, side: Side) {
        self.current = side;
    }

    /// Close the round: the player opens the next one
    pub fn end_round(&mut self) {
        self.current = Side::Player;
        self.round += 1;
    }

    /// Get current round number
    pub fn round(&self) -> u32 {
        self.round
    }
}

impl Default for TurnTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_advances_only_at_round_end() {
        let mut turns = TurnTracker::new();
        assert_eq!(turns.round(), 1);
        turns.hand_over(Side::Enemy);
        assert_eq!(turns.current(), Side::Enemy);
        assert_eq!(turns.round(), 1);
        turns.end_round();
        assert_eq!(turns.current(), Side::Player);
        assert_eq!(turns.round(), 2);
    }
}
