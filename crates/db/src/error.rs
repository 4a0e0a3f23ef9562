//! Fehler des Mitglieder-Speichers
//!
//! Der In-Memory-Store scheitert nur an seinen Eingaben: doppelte Namen,
//! unbekannte IDs, unvollstaendige Datensaetze oder eine kaputte
//! Mitgliederdatei.

use thiserror::Error;

use ultramar_core::MemberId;

#[derive(Debug, Error)]
pub enum DbError {
    /// Name gehoert bereits einem anderen Mitglied (Namen sind case-sensitiv)
    #[error("Mitgliedsname '{0}' bereits vergeben")]
    NameVergeben(String),

    #[error("Kein Mitglied mit {0}")]
    MitgliedUnbekannt(MemberId),

    /// Pflichtfeld fehlt oder ist leer
    #[error("Mitglied unvollstaendig: {0}")]
    Unvollstaendig(String),

    #[error("Mitgliederdatei ungueltig: {0}")]
    MitgliederDatei(#[from] toml::de::Error),
}

impl DbError {
    pub(crate) fn unvollstaendig(msg: impl Into<String>) -> Self {
        Self::Unvollstaendig(msg.into())
    }
}
