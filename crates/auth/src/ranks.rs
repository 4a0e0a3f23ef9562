//! Rang- und Scope-Tabellen
//!
//! Raenge sind total geordnet. Jeder Scope verlangt eine Mindeststufe; ein
//! Rang erhaelt alle Scopes, deren Mindeststufe er erreicht. Unbekannte
//! Rang-Strings haben Stufe 0 und erhalten damit keinen einzigen Scope.
//! Beide Tabellen sind statisch und zur Laufzeit unveraenderlich.

use serde::{Deserialize, Serialize};

/// Scope-Namen
pub mod scopes {
    pub const VIEW: &str = "view";
    pub const UPDATE: &str = "update";
    pub const DELETE: &str = "delete";
    pub const RE_WRITE: &str = "re-write";
}

/// Scope -> Mindeststufe, in fester Reihenfolge
const SCOPE_ANFORDERUNGEN: [(&str, u8); 4] = [
    (scopes::VIEW, 1),
    (scopes::UPDATE, 3),   // ab Lieutenant
    (scopes::DELETE, 5),   // ab Legatus
    (scopes::RE_WRITE, 6), // nur Chapter Master
];

/// Stufe fuer Rang-Strings die keinem bekannten Rang entsprechen
pub const UNBEKANNTE_STUFE: u8 = 0;

/// Die Raenge eines Ordens, aufsteigend geordnet
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Rang {
    Legionary = 1,
    Sergeant = 2,
    Lieutenant = 3,
    Captain = 4,
    Legatus = 5,
    ChapterMaster = 6,
}

impl Rang {
    /// Alle Raenge in aufsteigender Reihenfolge
    pub const ALLE: [Rang; 6] = [
        Rang::Legionary,
        Rang::Sergeant,
        Rang::Lieutenant,
        Rang::Captain,
        Rang::Legatus,
        Rang::ChapterMaster,
    ];

    /// Parst einen gespeicherten Rang-String
    ///
    /// Gross-/Kleinschreibung und umgebende Leerzeichen werden ignoriert,
    /// `-` und `_` zaehlen als Leerzeichen ("Chapter Master" == "chapter-master").
    pub fn parsen(rang: &str) -> Option<Self> {
        let normalisiert = rang.trim().to_lowercase().replace(['-', '_'], " ");
        match normalisiert.as_str() {
            "legionary" => Some(Self::Legionary),
            "sergeant" => Some(Self::Sergeant),
            "lieutenant" => Some(Self::Lieutenant),
            "captain" => Some(Self::Captain),
            "legatus" => Some(Self::Legatus),
            "chapter master" => Some(Self::ChapterMaster),
            _ => None,
        }
    }

    /// Numerische Stufe (1..=6)
    pub fn stufe(self) -> u8 {
        self as u8
    }

    /// Anzeigename
    pub fn als_str(self) -> &'static str {
        match self {
            Self::Legionary => "legionary",
            Self::Sergeant => "sergeant",
            Self::Lieutenant => "lieutenant",
            Self::Captain => "captain",
            Self::Legatus => "legatus",
            Self::ChapterMaster => "chapter master",
        }
    }
}

impl std::fmt::Display for Rang {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.als_str())
    }
}

/// Stufe eines gespeicherten Rang-Strings, `0` fuer unbekannte Raenge
pub fn stufe_von(rang: &str) -> u8 {
    Rang::parsen(rang).map_or(UNBEKANNTE_STUFE, Rang::stufe)
}

/// Mindeststufe fuer einen Scope, `None` fuer unbekannte Scopes
pub fn benoetigte_stufe(scope: &str) -> Option<u8> {
    SCOPE_ANFORDERUNGEN
        .iter()
        .find(|(name, _)| *name == scope)
        .map(|(_, stufe)| *stufe)
}

/// Alle Scopes die ein Rang erhaelt, in Tabellenreihenfolge
pub fn scopes_fuer(rang: &str) -> Vec<&'static str> {
    scopes_fuer_stufe(stufe_von(rang))
}

/// Alle Scopes deren Mindeststufe `stufe` erreicht
pub fn scopes_fuer_stufe(stufe: u8) -> Vec<&'static str> {
    SCOPE_ANFORDERUNGEN
        .iter()
        .filter(|(_, benoetigt)| stufe >= *benoetigt)
        .map(|(name, _)| *name)
        .collect()
}
