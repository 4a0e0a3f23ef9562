//! Auth-Service fuer Ultramar
//!
//! Zentraler Service fuer Login und Autorisierung. Greift lesend ueber den
//! `MemberStore` auf Mitglieder zu und haelt selbst keinen veraenderlichen
//! Zustand: Signierschluessel und Rang-Tabellen werden nur gelesen.

use std::sync::{Arc, OnceLock};

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use ultramar_db::{MemberRecord, MemberStore};

use crate::{
    error::{AuthError, AuthResult},
    password::{passwort_hashen, passwort_verifizieren},
    ranks::{benoetigte_stufe, scopes_fuer, stufe_von},
    token::TokenCodec,
};

/// Standard-Lebensdauer eines Zugriffstokens: 30 Minuten
pub const STANDARD_TOKEN_TTL_MINUTEN: i64 = 30;

/// Klartext hinter dem Platzhalter-Hash, kein Mitglied kann ihn besitzen
const PLATZHALTER_PASSWORT: &str = "ultramar-platzhalter";

/// Ergebnis eines erfolgreichen Logins
#[derive(Debug, Clone, Serialize)]
pub struct IssuedToken {
    pub access_token: String,
    /// Immer "Bearer"
    pub token_typ: &'static str,
    /// Scopes die beim Login vergeben wurden
    pub scopes: Vec<String>,
    pub laeuft_ab_am: DateTime<Utc>,
}

/// Auth-Service – Einstiegspunkt fuer Login und Autorisierung
pub struct AuthService<S: MemberStore> {
    store: Arc<S>,
    codec: Arc<TokenCodec>,
    token_ttl: Duration,
}

impl<S: MemberStore> AuthService<S> {
    /// Erstellt einen AuthService mit der Standard-Token-Lebensdauer
    pub fn neu(store: Arc<S>, codec: Arc<TokenCodec>) -> Self {
        Self::mit_ttl(store, codec, Duration::minutes(STANDARD_TOKEN_TTL_MINUTEN))
    }

    /// Erstellt einen AuthService mit eigener Token-Lebensdauer
    pub fn mit_ttl(store: Arc<S>, codec: Arc<TokenCodec>, token_ttl: Duration) -> Self {
        Self {
            store,
            codec,
            token_ttl,
        }
    }

    /// Meldet ein Mitglied an und stellt ein Zugriffstoken aus
    ///
    /// Unbekannter Name und falsches Passwort liefern beide
    /// `AuthError::UngueltigeAnmeldedaten`.
    pub async fn anmelden(&self, name: &str, passwort: &str) -> AuthResult<IssuedToken> {
        self.anmelden_zum(name, passwort, Utc::now()).await
    }

    /// Wie [`anmelden`](Self::anmelden), mit explizitem Ausstellungszeitpunkt
    pub async fn anmelden_zum(
        &self,
        name: &str,
        passwort: &str,
        jetzt: DateTime<Utc>,
    ) -> AuthResult<IssuedToken> {
        let Some(mitglied) = self.store.finde_nach_name(name).await? else {
            // Gleicher Argon2-Aufwand wie bei falschem Passwort
            passwort_verifizieren(passwort, platzhalter_hash()?)?;
            tracing::warn!(name = %name, "Login mit unbekanntem Namen");
            return Err(AuthError::UngueltigeAnmeldedaten);
        };

        if !passwort_verifizieren(passwort, &mitglied.passwort_hash)? {
            tracing::warn!(name = %name, "Fehlgeschlagener Login-Versuch");
            return Err(AuthError::UngueltigeAnmeldedaten);
        }

        let laeuft_ab_am = jetzt.checked_add_signed(self.token_ttl).ok_or_else(|| {
            AuthError::TokenErstellung(format!(
                "Ablaufzeit ausserhalb des Wertebereichs (ttl {})",
                self.token_ttl
            ))
        })?;
        let scopes = scopes_fuer(&mitglied.rang);
        let access_token = self
            .codec
            .ausstellen_zum(&mitglied.name, &scopes, self.token_ttl, jetzt)?;

        tracing::info!(
            member_id = %mitglied.id,
            name = %mitglied.name,
            rang = %mitglied.rang,
            scopes = ?scopes,
            "Mitglied angemeldet"
        );

        Ok(IssuedToken {
            access_token,
            token_typ: "Bearer",
            scopes: scopes.into_iter().map(String::from).collect(),
            laeuft_ab_am,
        })
    }

    /// Autorisiert den Inhaber eines Tokens fuer alle `benoetigte_scopes`
    ///
    /// Reihenfolge, Abbruch beim ersten Fehler:
    /// 1. Token pruefen (`TokenUngueltig` / `TokenAbgelaufen`)
    /// 2. Mitglied zum Subject laden (`MitgliedNichtGefunden`)
    /// 3. Aktuellen Rang gegen jeden Scope pruefen (`ScopeFehlend`)
    /// 4. Aktiv-Status pruefen (`MitgliedDeaktiviert`)
    ///
    /// Schritt 3 und 4 nutzen den aktuellen Datensatz, nicht die Scopes im
    /// Token. Deaktivierung wirkt dadurch sofort auf bereits ausgestellte Tokens.
    pub async fn autorisieren(
        &self,
        token: &str,
        benoetigte_scopes: &[&str],
    ) -> AuthResult<MemberRecord> {
        self.autorisieren_zum(token, benoetigte_scopes, Utc::now()).await
    }

    /// Wie [`autorisieren`](Self::autorisieren), geprueft gegen den Zeitpunkt `jetzt`
    pub async fn autorisieren_zum(
        &self,
        token: &str,
        benoetigte_scopes: &[&str],
        jetzt: DateTime<Utc>,
    ) -> AuthResult<MemberRecord> {
        let claims = self.codec.pruefen_zum(token, jetzt)?;

        let mitglied = self
            .store
            .finde_nach_name(&claims.sub)
            .await?
            .ok_or_else(|| AuthError::MitgliedNichtGefunden(claims.sub.clone()))?;

        scopes_pruefen(&mitglied, benoetigte_scopes)?;

        if !mitglied.aktiv {
            tracing::debug!(name = %mitglied.name, "Autorisierung fuer deaktiviertes Mitglied");
            return Err(AuthError::MitgliedDeaktiviert);
        }

        Ok(mitglied)
    }
}

/// PHC-Hash mit Standardparametern fuer Logins mit unbekanntem Namen
///
/// Wird beim ersten Bedarf einmal pro Prozess erzeugt.
fn platzhalter_hash() -> AuthResult<&'static str> {
    static HASH: OnceLock<String> = OnceLock::new();

    if let Some(hash) = HASH.get() {
        return Ok(hash.as_str());
    }
    let hash = passwort_hashen(PLATZHALTER_PASSWORT)?;
    Ok(HASH.get_or_init(|| hash).as_str())
}

/// Prueft die aktuelle Rangstufe gegen die Mindeststufe jedes Scopes
///
/// Scopes werden in der angefragten Reihenfolge geprueft; der erste nicht
/// erfuellte wird gemeldet. Unbekannte Scopes sind nie erfuellbar.
fn scopes_pruefen(mitglied: &MemberRecord, benoetigte_scopes: &[&str]) -> AuthResult<()> {
    let stufe = stufe_von(&mitglied.rang);

    for scope in benoetigte_scopes {
        match benoetigte_stufe(scope) {
            Some(benoetigt) if stufe >= benoetigt => continue,
            _ => {
                tracing::debug!(
                    name = %mitglied.name,
                    stufe,
                    scope = %scope,
                    "Scope nicht erfuellt"
                );
                return Err(AuthError::ScopeFehlend(scope.to_string()));
            }
        }
    }

    Ok(())
}
