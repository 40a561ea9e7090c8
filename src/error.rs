//! Error types
//!
//! Every fallible core operation reports a [`CombatError`]. Callers that
//! still speak the old dictionary contract can render it with
//! [`CombatError::to_payload`].

use serde_json::{json, Value};
use thiserror::Error;

/// Errors raised by the combat and progression core
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CombatError {
    #[error("Player not found: {0}")]
    UnknownPlayer(String),

    #[error("Player already exists: {0}")]
    DuplicatePlayer(String),

    #[error("Boss encounter not found: {0}")]
    UnknownBoss(String),

    #[error("Boss template not found: {0}")]
    UnknownBossTemplate(String),

    #[error("Player {0} is already fighting a boss")]
    BossAlreadyActive(String),

    #[error("Skill not found: {0}")]
    UnknownSkill(String),

    #[error("Not enough {kind} points: need {needed}, have {available}")]
    InsufficientPoints {
        kind: &'static str,
        needed: u32,
        available: u32,
    },

    #[error("Invalid allocation: {0}")]
    InvalidAllocation(String),
}

impl CombatError {
    /// Render as `{"error": "<message>"}`
    pub fn to_payload(&self) -> Value {
        json!({ "error": self.to_string() })
    }
}

/// Errors raised while loading configuration or content files
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("Serialization error: {0}")]
    Serialize(#[from] ron::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_payload_shape() {
        let err = CombatError::UnknownBoss("crypt-7".to_string());
        let payload = err.to_payload();
        assert_eq!(payload["error"], "Boss encounter not found: crypt-7");
        assert_eq!(payload.as_object().map(|o| o.len()), Some(1));
    }

    #[test]
    fn test_insufficient_points_message() {
        let err = CombatError::InsufficientPoints { kind: "class", needed: 1, available: 0 };
        assert_eq!(err.to_string(), "Not enough class points: need 1, have 0");
    }
}
