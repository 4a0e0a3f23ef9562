//! Passwort-Hashing mit Argon2id
//!
//! Hashes werden als PHC-String gespeichert
//! (`$argon2id$v=19$m=65536,t=3,p=1$<salt>$<hash>`). Algorithmus, Kostenparameter
//! und Salt stecken im String selbst, die Verifikation braucht deshalb keinen
//! weiteren Zustand. Der Vergleich der Digests erfolgt in konstanter Zeit.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};

use crate::error::{AuthError, AuthResult};

/// Speicherbedarf in KiB fuer neue Hashes (64 MiB)
const M_COST_KIB: u32 = 64 * 1024;
/// Iterationen fuer neue Hashes
const T_COST: u32 = 3;
/// Parallelismus fuer neue Hashes
const P_COST: u32 = 1;

/// Argon2id-Hasher mit festen Kostenparametern
///
/// Die Parameter gelten nur fuer neu erzeugte Hashes. Beim Verifizieren
/// werden die im PHC-String hinterlegten Parameter verwendet.
#[derive(Clone)]
pub struct PasswortHasher {
    argon2: Argon2<'static>,
}

impl PasswortHasher {
    /// Hasher mit den Standardparametern (64 MiB, 3 Iterationen, 1 Thread)
    pub fn standard() -> AuthResult<Self> {
        Self::mit_parametern(M_COST_KIB, T_COST, P_COST)
    }

    /// Hasher mit eigenen Kostenparametern
    pub fn mit_parametern(m_cost_kib: u32, t_cost: u32, p_cost: u32) -> AuthResult<Self> {
        let params = Params::new(m_cost_kib, t_cost, p_cost, None)
            .map_err(|e| AuthError::PasswortHashing(format!("Argon2-Parameter ungueltig: {e}")))?;
        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Hasht ein Passwort mit einem zufaelligen Salt und gibt den PHC-String zurueck
    pub fn hashen(&self, passwort: &str) -> AuthResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(passwort.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AuthError::PasswortHashing(e.to_string()))
    }

    /// Verifiziert ein Passwort gegen einen gespeicherten PHC-String
    ///
    /// `Ok(false)` bei falschem Passwort, `Err` nur bei kaputtem Hash-Format.
    pub fn verifizieren(&self, passwort: &str, hash: &str) -> AuthResult<bool> {
        let gespeichert = PasswordHash::new(hash)
            .map_err(|e| AuthError::PasswortHashing(format!("Ungueltiges Hash-Format: {e}")))?;

        match self.argon2.verify_password(passwort.as_bytes(), &gespeichert) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AuthError::PasswortHashing(e.to_string())),
        }
    }
}

/// Hasht ein Passwort mit den Standardparametern
pub fn passwort_hashen(passwort: &str) -> AuthResult<String> {
    PasswortHasher::standard()?.hashen(passwort)
}

/// Verifiziert ein Passwort gegen einen gespeicherten PHC-Hash
pub fn passwort_verifizieren(passwort: &str, hash: &str) -> AuthResult<bool> {
    PasswortHasher::standard()?.verifizieren(passwort, hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schneller_hasher() -> PasswortHasher {
        PasswortHasher::mit_parametern(8 * 1024, 1, 1).expect("Parameter muessen gueltig sein")
    }

    #[test]
    fn standard_hash_ist_selbstbeschreibend() {
        let hash = passwort_hashen("#CaJNHbFr0").expect("Hashing fehlgeschlagen");

        assert!(hash.starts_with("$argon2id$v=19$"), "Hash muss Algorithmus und Version tragen");
        assert!(hash.contains("m=65536,t=3,p=1"), "Hash muss die Kostenparameter tragen");
        assert!(passwort_verifizieren("#CaJNHbFr0", &hash).unwrap());
    }

    #[test]
    fn falsches_passwort_wird_abgelehnt() {
        let hasher = schneller_hasher();
        let hash = hasher.hashen("richtiges_passwort").unwrap();

        let korrekt = hasher.verifizieren("falsches_passwort", &hash).unwrap();
        assert!(!korrekt, "Falsches Passwort muss abgelehnt werden");
    }

    #[test]
    fn gleiche_passwoerter_unterschiedliche_hashes() {
        let hasher = schneller_hasher();
        let hash1 = hasher.hashen("gleiches_passwort").unwrap();
        let hash2 = hasher.hashen("gleiches_passwort").unwrap();

        assert_ne!(hash1, hash2, "Gleiche Passwoerter muessen verschiedene Hashes erzeugen (Salt)");
    }

    #[test]
    fn verifikation_nutzt_parameter_aus_dem_hash() {
        // Mit billigen Parametern erzeugt, mit dem Standard-Hasher geprueft
        let hash = schneller_hasher().hashen("passwort").unwrap();
        assert!(hash.contains("m=8192,t=1,p=1"));
        assert!(passwort_verifizieren("passwort", &hash).unwrap());
    }

    #[test]
    fn ungueltiges_hash_format_gibt_fehler() {
        let ergebnis = passwort_verifizieren("passwort", "kein_gueltiger_hash");
        assert!(matches!(ergebnis, Err(AuthError::PasswortHashing(_))));
    }

    #[test]
    fn ungueltige_parameter_gibt_fehler() {
        let ergebnis = PasswortHasher::mit_parametern(1, 0, 0);
        assert!(matches!(ergebnis, Err(AuthError::PasswortHashing(_))));
    }
}
