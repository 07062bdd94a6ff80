use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, DomainResult};

/// The participant acting on the board.
///
/// A nickname is the only identity there is: two people typing the same
/// nickname are the same voter. A Session is passed explicitly into every
/// operation that needs one; nothing reads it from ambient state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Session {
    #[serde(rename = "name")]
    nickname: String,
}

impl Session {
    /// Start a session for a typed nickname. Surrounding whitespace is dropped.
    pub fn new(raw_nickname: &str) -> DomainResult<Self> {
        let nickname = raw_nickname.trim();
        if nickname.is_empty() {
            return Err(DomainError::InvariantViolation(
                "Nickname cannot be empty".to_string(),
            ));
        }
        Ok(Self {
            nickname: nickname.to_string(),
        })
    }

    pub fn nickname(&self) -> &str {
        &self.nickname
    }
}

impl std::fmt::Display for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.nickname)
    }
}
