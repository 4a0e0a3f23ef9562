//! Signierte Zugriffstokens
//!
//! Tokens sind kompakte JWS (HS256) mit den Claims `sub`, `scopes`, `iat`
//! und `exp`. Sie sind zustandslos und reine Bearer-Tokens: wer das Token
//! besitzt, kann es vorlegen. Eine Bindung an Verbindung oder Session gibt
//! es nicht, ebenso keine Widerrufsliste.
//!
//! Pruefreihenfolge: erst Signatur und Algorithmus (`TokenUngueltig`), dann
//! Ablauf (`TokenAbgelaufen`).

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::error::{AuthError, AuthResult};

/// Laenge eines generierten Schluessels in Bytes
const GENERIERTE_SCHLUESSEL_LAENGE: usize = 32;

/// Einziger akzeptierter Signatur-Algorithmus
const ALGORITHMUS: Algorithm = Algorithm::HS256;

/// Claims eines Zugriffstokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Name des Mitglieds
    pub sub: String,
    /// Scopes zum Zeitpunkt der Ausstellung
    pub scopes: Vec<String>,
    /// Ausstellungszeitpunkt (Unix-Sekunden)
    pub iat: i64,
    /// Ablaufzeitpunkt (Unix-Sekunden)
    pub exp: i64,
}

impl TokenClaims {
    /// Gibt `true` zurueck wenn das Token zum Zeitpunkt `jetzt` abgelaufen ist
    pub fn ist_abgelaufen(&self, jetzt: DateTime<Utc>) -> bool {
        jetzt.timestamp() >= self.exp
    }
}

/// Prozessweiter Signierschluessel
///
/// Wird einmal beim Start erzeugt oder aus der Konfiguration gelesen und danach
/// nur noch gelesen. `Debug` gibt das Schluesselmaterial nicht aus.
#[derive(Clone)]
pub struct SigningKey {
    geheimnis: Vec<u8>,
}

impl SigningKey {
    /// Schluessel aus einem konfigurierten Geheimnis
    pub fn aus_geheimnis(geheimnis: &str) -> AuthResult<Self> {
        if geheimnis.is_empty() {
            return Err(AuthError::intern("Signiergeheimnis darf nicht leer sein"));
        }
        Ok(Self {
            geheimnis: geheimnis.as_bytes().to_vec(),
        })
    }

    /// Erzeugt einen zufaelligen Schluessel (nur fuer die Lebensdauer des Prozesses)
    pub fn generieren() -> Self {
        let mut bytes = vec![0u8; GENERIERTE_SCHLUESSEL_LAENGE];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self { geheimnis: bytes }
    }
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKey")
            .field("laenge", &self.geheimnis.len())
            .finish_non_exhaustive()
    }
}

/// Stellt Tokens aus und prueft sie
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validierung: Validation,
}

impl TokenCodec {
    /// Erstellt einen Codec mit dem uebergebenen Schluessel
    pub fn neu(schluessel: &SigningKey) -> Self {
        let mut validierung = Validation::new(ALGORITHMUS);
        // Ablauf wird selbst gegen eine injizierbare Uhr ohne Toleranz geprueft
        validierung.validate_exp = false;
        validierung.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(&schluessel.geheimnis),
            decoding: DecodingKey::from_secret(&schluessel.geheimnis),
            validierung,
        }
    }

    /// Stellt ein Token aus, gueltig ab jetzt fuer `ttl`
    pub fn ausstellen(&self, subject: &str, scopes: &[&str], ttl: Duration) -> AuthResult<String> {
        self.ausstellen_zum(subject, scopes, ttl, Utc::now())
    }

    /// Stellt ein Token zum Zeitpunkt `jetzt` aus
    pub fn ausstellen_zum(
        &self,
        subject: &str,
        scopes: &[&str],
        ttl: Duration,
        jetzt: DateTime<Utc>,
    ) -> AuthResult<String> {
        let ablauf = jetzt.checked_add_signed(ttl).ok_or_else(|| {
            AuthError::TokenErstellung(format!("Ablaufzeit ausserhalb des Wertebereichs (ttl {ttl})"))
        })?;
        let claims = TokenClaims {
            sub: subject.to_string(),
            scopes: scopes.iter().map(|s| s.to_string()).collect(),
            iat: jetzt.timestamp(),
            exp: ablauf.timestamp(),
        };

        encode(&Header::new(ALGORITHMUS), &claims, &self.encoding)
            .map_err(|e| AuthError::TokenErstellung(e.to_string()))
    }

    /// Prueft ein Token gegen die aktuelle Zeit
    pub fn pruefen(&self, token: &str) -> AuthResult<TokenClaims> {
        self.pruefen_zum(token, Utc::now())
    }

    /// Prueft ein Token gegen den Zeitpunkt `jetzt`
    pub fn pruefen_zum(&self, token: &str, jetzt: DateTime<Utc>) -> AuthResult<TokenClaims> {
        let claims = decode::<TokenClaims>(token, &self.decoding, &self.validierung)
            .map_err(|e| {
                tracing::debug!(fehler = %e, "Token-Pruefung fehlgeschlagen");
                AuthError::TokenUngueltig
            })?
            .claims;

        if claims.ist_abgelaufen(jetzt) {
            return Err(AuthError::TokenAbgelaufen);
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn codec() -> TokenCodec {
        TokenCodec::neu(&SigningKey::aus_geheimnis("test-geheimnis-fuer-tokens").unwrap())
    }

    #[test]
    fn ausstellen_und_pruefen() {
        let codec = codec();
        let token = codec
            .ausstellen("Cato", &["view"], Duration::minutes(30))
            .expect("Ausstellung fehlgeschlagen");

        let claims = codec.pruefen(&token).expect("Pruefung fehlgeschlagen");
        assert_eq!(claims.sub, "Cato");
        assert_eq!(claims.scopes, vec!["view".to_string()]);
        assert_eq!(claims.exp - claims.iat, 30 * 60);
    }

    #[test]
    fn token_kurz_vor_ablauf_ist_gueltig() {
        let codec = codec();
        let ausgestellt = Utc::now();
        let token = codec
            .ausstellen_zum("Cato", &["view", "update"], Duration::seconds(10), ausgestellt)
            .unwrap();

        let claims = codec
            .pruefen_zum(&token, ausgestellt + Duration::seconds(9))
            .unwrap();
        assert_eq!(claims.scopes, vec!["view", "update"]);
    }

    #[test]
    fn ttl_null_ist_eine_sekunde_spaeter_abgelaufen() {
        let codec = codec();
        let ausgestellt = Utc::now();
        let token = codec
            .ausstellen_zum("Cato", &["view"], Duration::zero(), ausgestellt)
            .unwrap();

        let ergebnis = codec.pruefen_zum(&token, ausgestellt + Duration::seconds(1));
        assert!(matches!(ergebnis, Err(AuthError::TokenAbgelaufen)));
    }

    #[test]
    fn ablauf_genau_zum_exp_zeitpunkt() {
        let codec = codec();
        let ausgestellt = Utc::now();
        let token = codec
            .ausstellen_zum("Cato", &[], Duration::seconds(60), ausgestellt)
            .unwrap();

        let ergebnis = codec.pruefen_zum(&token, ausgestellt + Duration::seconds(60));
        assert!(matches!(ergebnis, Err(AuthError::TokenAbgelaufen)));
    }

    #[test]
    fn fremder_schluessel_wird_abgelehnt() {
        let fremd = TokenCodec::neu(&SigningKey::generieren());
        let token = fremd.ausstellen("Cato", &["view"], Duration::minutes(5)).unwrap();

        assert!(matches!(codec().pruefen(&token), Err(AuthError::TokenUngueltig)));
    }

    #[test]
    fn abgelaufenes_token_mit_fremdem_schluessel_ist_ungueltig() {
        // Signatur wird vor dem Ablauf geprueft
        let fremd = TokenCodec::neu(&SigningKey::generieren());
        let ausgestellt = Utc::now() - Duration::hours(2);
        let token = fremd
            .ausstellen_zum("Cato", &["view"], Duration::minutes(5), ausgestellt)
            .unwrap();

        assert!(matches!(codec().pruefen(&token), Err(AuthError::TokenUngueltig)));
    }

    #[test]
    fn anderer_algorithmus_wird_abgelehnt() {
        let geheimnis = "test-geheimnis-fuer-tokens";
        let claims = TokenClaims {
            sub: "Cato".into(),
            scopes: vec!["view".into()],
            iat: Utc::now().timestamp(),
            exp: (Utc::now() + Duration::minutes(5)).timestamp(),
        };
        let token = encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(geheimnis.as_bytes()),
        )
        .unwrap();

        assert!(matches!(codec().pruefen(&token), Err(AuthError::TokenUngueltig)));
    }

    #[test]
    fn muell_wird_abgelehnt() {
        let codec = codec();
        for kaputt in ["", "abc", "a.b.c", "Bearer xyz", "...."] {
            assert!(
                matches!(codec.pruefen(kaputt), Err(AuthError::TokenUngueltig)),
                "'{kaputt}' muss abgelehnt werden"
            );
        }
    }

    #[test]
    fn leeres_geheimnis_abgelehnt() {
        assert!(SigningKey::aus_geheimnis("").is_err());
    }

    #[test]
    fn debug_zeigt_keinen_schluessel() {
        let schluessel = SigningKey::aus_geheimnis("streng-geheim").unwrap();
        let ausgabe = format!("{schluessel:?}");
        assert!(!ausgabe.contains("streng-geheim"));
        assert!(ausgabe.contains("laenge"));
    }

    #[test]
    fn generierte_schluessel_sind_verschieden() {
        let a = TokenCodec::neu(&SigningKey::generieren());
        let b = TokenCodec::neu(&SigningKey::generieren());
        let token = a.ausstellen("Cato", &[], Duration::minutes(1)).unwrap();
        assert!(a.pruefen(&token).is_ok());
        assert!(matches!(b.pruefen(&token), Err(AuthError::TokenUngueltig)));
    }

    #[test]
    fn ueberlaufende_ttl_ergibt_fehler() {
        let ergebnis = codec().ausstellen("Cato", &["view"], Duration::minutes(1_000_000_000_000));
        assert!(matches!(ergebnis, Err(AuthError::TokenErstellung(_))));
    }

    proptest! {
        #[test]
        fn jede_veraenderung_macht_token_ungueltig(position in 0usize..512) {
            let codec = codec();
            let token = codec
                .ausstellen("Marneus", &["view", "update", "delete", "re-write"], Duration::minutes(30))
                .unwrap();
            let position = position % token.len();

            let mut bytes = token.into_bytes();
            bytes[position] = if bytes[position] == b'A' { b'B' } else { b'A' };
            let veraendert = String::from_utf8(bytes).unwrap();

            prop_assert!(matches!(codec.pruefen(&veraendert), Err(AuthError::TokenUngueltig)));
        }
    }
}
