//! ultramar-auth – Authentifizierung und rangbasierte Autorisierung
//!
//! Dieses Crate implementiert:
//! - Passwort-Hashing mit Argon2id
//! - Rang-Tabelle (Rang -> Scopes, Scope -> Mindeststufe)
//! - Signierte, zeitlich begrenzte Tokens (HS256)
//! - AuthService (Login und mehrstufige Autorisierung)
//! - ScopeGuard als Grenze zu den Routen-Handlern

pub mod error;
pub mod guard;
pub mod password;
pub mod ranks;
pub mod service;
pub mod token;

// Bequeme Re-Exporte
pub use error::{AuthError, AuthResult};
pub use guard::ScopeGuard;
pub use password::{passwort_hashen, passwort_verifizieren};
pub use ranks::{benoetigte_stufe, scopes, scopes_fuer, stufe_von, Rang};
pub use service::{AuthService, IssuedToken, STANDARD_TOKEN_TTL_MINUTEN};
pub use token::{SigningKey, TokenClaims, TokenCodec};
