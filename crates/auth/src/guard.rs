//! Autorisierungs-Grenze fuer Routen-Handler
//!
//! Ein `ScopeGuard` wird pro Route mit den benoetigten Scopes erstellt und vor
//! dem Handler ausgefuehrt. Er liefert das authentifizierte Mitglied oder
//! einen `AuthError`, den die Transportschicht per `http_status()` abbildet.

use ultramar_db::{MemberRecord, MemberStore};

use crate::{
    error::{AuthError, AuthResult},
    service::AuthService,
};

/// Prefix des Authorization-Headers
const BEARER_PRAEFIX: &str = "Bearer ";

/// Guard fuer eine feste Menge benoetigter Scopes
#[derive(Debug, Clone)]
pub struct ScopeGuard {
    scopes: Vec<&'static str>,
}

impl ScopeGuard {
    /// Guard der alle angegebenen Scopes verlangt (in dieser Pruefreihenfolge)
    pub fn neu(scopes: &[&'static str]) -> Self {
        Self {
            scopes: scopes.to_vec(),
        }
    }

    pub fn scopes(&self) -> &[&'static str] {
        &self.scopes
    }

    /// Prueft ein bereits extrahiertes Token
    pub async fn pruefen<S: MemberStore>(
        &self,
        service: &AuthService<S>,
        token: &str,
    ) -> AuthResult<MemberRecord> {
        service.autorisieren(token, &self.scopes).await
    }

    /// Prueft den Wert eines `Authorization`-Headers (`Bearer <token>`)
    pub async fn pruefen_header<S: MemberStore>(
        &self,
        service: &AuthService<S>,
        header: &str,
    ) -> AuthResult<MemberRecord> {
        let token = bearer_token(header).ok_or(AuthError::TokenUngueltig)?;
        self.pruefen(service, token).await
    }
}

/// Extrahiert das Token aus einem `Authorization`-Header
pub fn bearer_token(header: &str) -> Option<&str> {
    let token = header.strip_prefix(BEARER_PRAEFIX)?.trim();
    (!token.is_empty()).then_some(token)
}
