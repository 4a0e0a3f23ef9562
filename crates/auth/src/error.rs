//! Fehlertypen fuer den Auth-Service

use thiserror::Error;

/// Meldung fuer alle Token-Fehler, die nach aussen nicht unterscheidbar sein sollen
const MELDUNG_TOKEN_UNGUELTIG: &str = "Anmeldedaten konnten nicht validiert werden";

/// Alle moeglichen Fehler im Auth-Service
#[derive(Debug, Error)]
pub enum AuthError {
    // --- Passwort ---
    #[error("Passwort-Hashing fehlgeschlagen: {0}")]
    PasswortHashing(String),

    // --- Authentifizierung ---
    #[error("Name oder Passwort falsch")]
    UngueltigeAnmeldedaten,

    // --- Token ---
    #[error("Token ungueltig")]
    TokenUngueltig,

    #[error("Token abgelaufen")]
    TokenAbgelaufen,

    #[error("Token konnte nicht erstellt werden: {0}")]
    TokenErstellung(String),

    // --- Autorisierung ---
    #[error("Mitglied aus Token nicht gefunden: {0}")]
    MitgliedNichtGefunden(String),

    #[error("Unzureichende Berechtigung: Scope '{0}' fehlt")]
    ScopeFehlend(String),

    #[error("Mitglied deaktiviert")]
    MitgliedDeaktiviert,

    // --- Speicher ---
    #[error("Speicherfehler: {0}")]
    Speicher(#[from] ultramar_db::DbError),

    // --- Intern ---
    #[error("Interner Fehler: {0}")]
    Intern(String),
}

impl AuthError {
    pub fn intern(msg: impl Into<String>) -> Self {
        Self::Intern(msg.into())
    }

    /// HTTP-Statuscode, auf den die Transportschicht diesen Fehler abbildet
    pub fn http_status(&self) -> u16 {
        match self {
            Self::UngueltigeAnmeldedaten
            | Self::TokenUngueltig
            | Self::TokenAbgelaufen
            | Self::MitgliedNichtGefunden(_) => 401,
            Self::ScopeFehlend(_) => 403,
            Self::MitgliedDeaktiviert => 400,
            Self::PasswortHashing(_)
            | Self::TokenErstellung(_)
            | Self::Speicher(_)
            | Self::Intern(_) => 500,
        }
    }

    /// Meldung fuer den Aufrufer
    ///
    /// `MitgliedNichtGefunden` liefert dieselbe Meldung wie `TokenUngueltig`,
    /// damit von aussen nicht erkennbar ist ob ein Name existiert.
    /// Interne Fehler geben keine Details preis.
    pub fn oeffentliche_meldung(&self) -> String {
        match self {
            Self::TokenUngueltig | Self::MitgliedNichtGefunden(_) => {
                MELDUNG_TOKEN_UNGUELTIG.to_string()
            }
            Self::UngueltigeAnmeldedaten
            | Self::TokenAbgelaufen
            | Self::ScopeFehlend(_)
            | Self::MitgliedDeaktiviert => self.to_string(),
            Self::PasswortHashing(_)
            | Self::TokenErstellung(_)
            | Self::Speicher(_)
            | Self::Intern(_) => "Interner Fehler".to_string(),
        }
    }
}

/// Result-Alias fuer den Auth-Service
pub type AuthResult<T> = Result<T, AuthError>;
