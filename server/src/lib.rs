//! ultramar-server – Bibliotheks-Root
//!
//! Baut aus der Konfiguration den Mitglieder-Store und den AuthService und
//! fuehrt die CLI-Befehle aus. Als Bibliothek, damit die Befehle ohne
//! Prozessgrenze getestet werden koennen.

pub mod config;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use ultramar_auth::{passwort_hashen, AuthError, AuthService, TokenCodec};
use ultramar_db::InMemoryMemberStore;

use config::ServerConfig;

/// Kommandozeile
#[derive(Debug, Parser)]
#[command(name = "ultramar", version, about = "Login und rangbasierte Autorisierung")]
pub struct Cli {
    /// Pfad zur Konfigurationsdatei
    #[arg(long, env = "ULTRAMAR_CONFIG", default_value = "ultramar.toml")]
    pub config: String,

    #[command(subcommand)]
    pub befehl: Befehl,
}

#[derive(Debug, Subcommand)]
pub enum Befehl {
    /// Passwort hashen (PHC-String fuer die Mitgliederdatei)
    Hash { passwort: String },

    /// Anmelden und Zugriffstoken ausgeben
    Login { name: String, passwort: String },

    /// Token fuer die angegebenen Scopes pruefen
    Autorisieren {
        token: String,
        /// Benoetigter Scope, mehrfach angebbar (Pruefreihenfolge)
        #[arg(long = "scope")]
        scopes: Vec<String>,
    },
}

/// Ergebnis eines Befehls
#[derive(Debug)]
pub enum Ausgang {
    /// Erfolgreich, Ausgabe fuer stdout
    Erfolg(String),
    /// Von der Auth-Pipeline abgewiesen
    Abgewiesen { status: u16, meldung: String },
}

impl Ausgang {
    /// Exit-Code des Prozesses: 0 bei Erfolg, 1 bei Abweisung
    pub fn exit_status(&self) -> u8 {
        match self {
            Self::Erfolg(_) => 0,
            Self::Abgewiesen { .. } => 1,
        }
    }
}

/// Haelt den AuthService zusammen
pub struct App {
    service: AuthService<InMemoryMemberStore>,
}

impl App {
    /// Baut die App aus der Konfiguration, liest die Mitgliederdatei
    pub fn aus_config(config: &ServerConfig) -> Result<Self> {
        let store = match &config.mitglieder.datei {
            Some(pfad) => {
                let inhalt = std::fs::read_to_string(pfad)
                    .with_context(|| format!("Mitgliederdatei '{pfad}' nicht lesbar"))?;
                InMemoryMemberStore::aus_toml(&inhalt)
                    .with_context(|| format!("Mitgliederdatei '{pfad}' ungueltig"))?
            }
            None => {
                tracing::info!("Keine Mitgliederdatei konfiguriert, Store bleibt leer");
                InMemoryMemberStore::neu()
            }
        };
        Self::neu(store, config)
    }

    /// Baut die App um einen vorhandenen Store
    pub fn neu(store: Arc<InMemoryMemberStore>, config: &ServerConfig) -> Result<Self> {
        let codec = Arc::new(TokenCodec::neu(&config.signierschluessel()?));
        let service = AuthService::mit_ttl(store, codec, config.token_ttl()?);
        Ok(Self { service })
    }

    /// Fuehrt einen Befehl aus
    ///
    /// Abweisungen der Auth-Pipeline sind kein Fehler sondern ein `Ausgang`;
    /// `Err` nur bei internen Fehlern.
    pub async fn ausfuehren(&self, befehl: Befehl) -> Result<Ausgang> {
        match befehl {
            Befehl::Hash { passwort } => {
                let hash = passwort_hashen(&passwort).context("Hashing fehlgeschlagen")?;
                Ok(Ausgang::Erfolg(hash))
            }
            Befehl::Login { name, passwort } => {
                match self.service.anmelden(&name, &passwort).await {
                    Ok(token) => Ok(Ausgang::Erfolg(serde_json::to_string_pretty(&token)?)),
                    Err(e) => abgewiesen(e),
                }
            }
            Befehl::Autorisieren { token, scopes } => {
                let scopes: Vec<&str> = scopes.iter().map(String::as_str).collect();
                match self.service.autorisieren(&token, &scopes).await {
                    Ok(mitglied) => Ok(Ausgang::Erfolg(serde_json::to_string_pretty(&mitglied)?)),
                    Err(e) => abgewiesen(e),
                }
            }
        }
    }
}

fn abgewiesen(fehler: AuthError) -> Result<Ausgang> {
    let status = fehler.http_status();
    if status >= 500 {
        return Err(anyhow::Error::new(fehler));
    }
    tracing::debug!(fehler = %fehler, status, "Anfrage abgewiesen");
    Ok(Ausgang::Abgewiesen {
        status,
        meldung: fehler.oeffentliche_meldung(),
    })
}
