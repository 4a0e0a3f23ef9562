//! Datenmodelle fuer Mitglieder

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ultramar_core::MemberId;

// ---------------------------------------------------------------------------
// Mitglieder
// ---------------------------------------------------------------------------

/// Mitglieds-Datensatz aus dem Speicher
///
/// Der Passwort-Hash wird nie mitserialisiert, damit ein Datensatz gefahrlos
/// als Antwort ausgegeben werden kann.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRecord {
    pub id: MemberId,
    pub name: String,
    #[serde(skip_serializing, default)]
    pub passwort_hash: String,
    /// Rang so wie er gespeichert ist (z.B. "Sergeant", "chapter master")
    pub rang: String,
    pub aktiv: bool,
    pub erstellt_am: DateTime<Utc>,
}

/// Daten zum Anlegen eines neuen Mitglieds
#[derive(Debug, Clone)]
pub struct NeuesMitglied<'a> {
    pub name: &'a str,
    pub passwort_hash: &'a str,
    pub rang: &'a str,
    pub aktiv: bool,
}

/// Teil-Aktualisierung eines Mitglieds
///
/// Nur die hier aufgefuehrten Felder duerfen sich aendern; `id` und
/// `erstellt_am` sind unveraenderlich.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberPatch {
    pub name: Option<String>,
    pub passwort_hash: Option<String>,
    pub rang: Option<String>,
    pub aktiv: Option<bool>,
}

impl MemberPatch {
    /// Gibt `true` zurueck wenn kein Feld gesetzt ist
    pub fn ist_leer(&self) -> bool {
        self.name.is_none()
            && self.passwort_hash.is_none()
            && self.rang.is_none()
            && self.aktiv.is_none()
    }

    /// Uebernimmt alle gesetzten Felder in den Datensatz
    pub fn anwenden(self, record: &mut MemberRecord) {
        if let Some(name) = self.name {
            record.name = name;
        }
        if let Some(hash) = self.passwort_hash {
            record.passwort_hash = hash;
        }
        if let Some(rang) = self.rang {
            record.rang = rang;
        }
        if let Some(aktiv) = self.aktiv {
            record.aktiv = aktiv;
        }
    }
}
