//! Identifikationstypen fuer Ultramar
//!
//! IDs verwenden das Newtype-Pattern, damit eine Mitglieds-ID nicht mit
//! einer beliebigen UUID verwechselt werden kann.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Eindeutige Mitglieds-ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(pub Uuid);

impl MemberId {
    /// Erstellt eine neue zufaellige MemberId
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MemberId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for MemberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "member:{}", self.0)
    }
}

impl From<Uuid> for MemberId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}
