//! Konfiguration
//!
//! Wird beim Start aus einer TOML-Datei geladen. Alle Felder haben
//! Standardwerte, die CLI laeuft also auch ohne Konfigurationsdatei.
//! Ohne konfiguriertes Geheimnis wird pro Prozess ein Schluessel erzeugt;
//! Tokens ueberleben dann keinen Neustart.

use anyhow::{Context, Result};
use chrono::Duration;
use serde::{Deserialize, Serialize};

use ultramar_auth::{SigningKey, STANDARD_TOKEN_TTL_MINUTEN};
use ultramar_observability::{log_format_gueltig, log_level_gueltig};

/// Obergrenze fuer `token.ttl_minuten`: 30 Tage
const MAX_TOKEN_TTL_MINUTEN: i64 = 30 * 24 * 60;

/// Vollstaendige Konfiguration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Token-Einstellungen
    pub token: TokenEinstellungen,
    /// Quelle der Mitglieder
    pub mitglieder: MitgliederEinstellungen,
    /// Logging-Einstellungen
    pub logging: LoggingEinstellungen,
}

/// Token-Einstellungen
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenEinstellungen {
    /// Signiergeheimnis (leer = pro Prozess generiert)
    pub geheimnis: Option<String>,
    /// Lebensdauer ausgestellter Tokens in Minuten
    pub ttl_minuten: i64,
}

impl Default for TokenEinstellungen {
    fn default() -> Self {
        Self {
            geheimnis: None,
            ttl_minuten: STANDARD_TOKEN_TTL_MINUTEN,
        }
    }
}

impl std::fmt::Debug for TokenEinstellungen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenEinstellungen")
            .field("geheimnis", &self.geheimnis.as_ref().map(|_| "***"))
            .field("ttl_minuten", &self.ttl_minuten)
            .finish()
    }
}

/// Quelle der Mitglieder
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MitgliederEinstellungen {
    /// Pfad zur TOML-Mitgliederdatei (leer = keine Mitglieder)
    pub datei: Option<String>,
}

/// Logging-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingEinstellungen {
    /// Log-Level: "trace", "debug", "info", "warn", "error"
    pub level: String,
    /// Format: "json" oder "text"
    pub format: String,
}

impl Default for LoggingEinstellungen {
    fn default() -> Self {
        Self {
            level: "warn".into(),
            format: "text".into(),
        }
    }
}

impl ServerConfig {
    /// Laedt die Konfiguration aus einer TOML-Datei.
    /// Gibt die Standardkonfiguration zurueck wenn die Datei nicht existiert.
    pub fn laden(pfad: &str) -> Result<Self> {
        match std::fs::read_to_string(pfad) {
            Ok(inhalt) => {
                let config: Self = toml::from_str(&inhalt)
                    .with_context(|| format!("Konfigurationsfehler in '{pfad}'"))?;
                config
                    .pruefen()
                    .with_context(|| format!("Konfigurationsfehler in '{pfad}'"))?;
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(
                    pfad = pfad,
                    "Konfigurationsdatei nicht gefunden, verwende Standardwerte"
                );
                Ok(Self::default())
            }
            Err(e) => Err(anyhow::Error::new(e)
                .context(format!("Konfigurationsdatei '{pfad}' nicht lesbar"))),
        }
    }

    /// Prueft die Werte, die serde nicht pruefen kann
    pub fn pruefen(&self) -> Result<()> {
        self.token_ttl()?;
        anyhow::ensure!(
            log_level_gueltig(&self.logging.level),
            "logging.level '{}' unbekannt (trace, debug, info, warn, error)",
            self.logging.level
        );
        anyhow::ensure!(
            log_format_gueltig(&self.logging.format),
            "logging.format '{}' unbekannt (text, json)",
            self.logging.format
        );
        Ok(())
    }

    /// Ueberschreibt das Geheimnis, z.B. aus `ULTRAMAR_SECRET_KEY`
    pub fn geheimnis_ueberschreiben(mut self, geheimnis: Option<String>) -> Self {
        if let Some(geheimnis) = geheimnis.filter(|g| !g.is_empty()) {
            self.token.geheimnis = Some(geheimnis);
        }
        self
    }

    /// Baut den Signierschluessel aus der Konfiguration
    pub fn signierschluessel(&self) -> Result<SigningKey> {
        match &self.token.geheimnis {
            Some(geheimnis) => {
                SigningKey::aus_geheimnis(geheimnis).context("Signiergeheimnis ungueltig")
            }
            None => {
                tracing::warn!(
                    "Kein Signiergeheimnis konfiguriert, Schluessel wird generiert; \
                     Tokens sind nur in diesem Prozess gueltig"
                );
                Ok(SigningKey::generieren())
            }
        }
    }

    /// Token-Lebensdauer, muss zwischen 1 Minute und 30 Tagen liegen
    pub fn token_ttl(&self) -> Result<Duration> {
        let minuten = self.token.ttl_minuten;
        anyhow::ensure!(
            (1..=MAX_TOKEN_TTL_MINUTEN).contains(&minuten),
            "token.ttl_minuten muss zwischen 1 und {MAX_TOKEN_TTL_MINUTEN} liegen (ist {minuten})"
        );
        Duration::try_minutes(minuten)
            .with_context(|| format!("token.ttl_minuten {minuten} nicht darstellbar"))
    }
}
