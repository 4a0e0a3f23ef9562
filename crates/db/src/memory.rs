//! In-Memory-Implementierung des MemberStore
//!
//! Haelt alle Mitglieder in einer HashMap hinter einem `RwLock`. Kann leer
//! erzeugt oder aus einer TOML-Mitgliederdatei befuellt werden:
//!
//! ```toml
//! [[mitglied]]
//! name = "Cato"
//! passwort_hash = "$argon2id$v=19$..."
//! rang = "Sergeant"
//! aktiv = true
//! ```

use std::{collections::HashMap, sync::Arc};

use chrono::Utc;
use serde::Deserialize;
use tokio::sync::RwLock;

use ultramar_core::MemberId;

use crate::{
    error::DbError,
    models::{MemberPatch, MemberRecord, NeuesMitglied},
    repository::{DbResult, MemberStore},
};

/// Ein Eintrag der Mitgliederdatei
#[derive(Debug, Deserialize)]
struct DateiEintrag {
    name: String,
    passwort_hash: String,
    rang: String,
    #[serde(default = "standard_aktiv")]
    aktiv: bool,
}

fn standard_aktiv() -> bool {
    true
}

#[derive(Debug, Deserialize)]
struct MitgliederDatei {
    #[serde(default)]
    mitglied: Vec<DateiEintrag>,
}

/// In-Memory Mitglieder-Store
#[derive(Debug, Default)]
pub struct InMemoryMemberStore {
    /// id -> MemberRecord
    mitglieder: RwLock<HashMap<MemberId, MemberRecord>>,
}

impl InMemoryMemberStore {
    /// Erstellt einen neuen leeren Store
    pub fn neu() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Erstellt einen Store aus dem Inhalt einer TOML-Mitgliederdatei
    ///
    /// Doppelte Namen werden als `DbError::NameVergeben` abgelehnt.
    pub fn aus_toml(inhalt: &str) -> DbResult<Arc<Self>> {
        let datei: MitgliederDatei = toml::from_str(inhalt)?;
        let mut mitglieder: HashMap<MemberId, MemberRecord> = HashMap::new();

        for eintrag in datei.mitglied {
            pruefe_eingabe(&eintrag.name, &eintrag.passwort_hash)?;
            if mitglieder.values().any(|m| m.name == eintrag.name) {
                return Err(DbError::NameVergeben(eintrag.name));
            }
            let record = MemberRecord {
                id: MemberId::new(),
                name: eintrag.name,
                passwort_hash: eintrag.passwort_hash,
                rang: eintrag.rang,
                aktiv: eintrag.aktiv,
                erstellt_am: Utc::now(),
            };
            mitglieder.insert(record.id, record);
        }

        tracing::info!(anzahl = mitglieder.len(), "Mitglieder aus Datei geladen");

        Ok(Arc::new(Self {
            mitglieder: RwLock::new(mitglieder),
        }))
    }

    /// Legt ein neues Mitglied an
    pub async fn erstellen(&self, daten: NeuesMitglied<'_>) -> DbResult<MemberRecord> {
        pruefe_eingabe(daten.name, daten.passwort_hash)?;

        let mut mitglieder = self.mitglieder.write().await;
        if mitglieder.values().any(|m| m.name == daten.name) {
            return Err(DbError::NameVergeben(daten.name.to_string()));
        }

        let record = MemberRecord {
            id: MemberId::new(),
            name: daten.name.to_string(),
            passwort_hash: daten.passwort_hash.to_string(),
            rang: daten.rang.to_string(),
            aktiv: daten.aktiv,
            erstellt_am: Utc::now(),
        };
        mitglieder.insert(record.id, record.clone());

        tracing::debug!(member_id = %record.id, name = %record.name, "Mitglied angelegt");
        Ok(record)
    }

    /// Wendet eine Teil-Aktualisierung auf ein Mitglied an
    pub async fn aktualisieren(&self, id: MemberId, patch: MemberPatch) -> DbResult<MemberRecord> {
        let mut mitglieder = self.mitglieder.write().await;

        if let Some(neuer_name) = &patch.name {
            if neuer_name.is_empty() {
                return Err(DbError::unvollstaendig("Mitgliedsname darf nicht leer sein"));
            }
            if mitglieder.values().any(|m| m.id != id && &m.name == neuer_name) {
                return Err(DbError::NameVergeben(neuer_name.clone()));
            }
        }

        let record = mitglieder
            .get_mut(&id)
            .ok_or(DbError::MitgliedUnbekannt(id))?;
        patch.anwenden(record);
        Ok(record.clone())
    }

    /// Entfernt ein Mitglied, gibt `true` zurueck wenn es existierte
    pub async fn loeschen(&self, id: MemberId) -> bool {
        self.mitglieder.write().await.remove(&id).is_some()
    }

    /// Anzahl gespeicherter Mitglieder
    pub async fn anzahl(&self) -> usize {
        self.mitglieder.read().await.len()
    }
}

fn pruefe_eingabe(name: &str, passwort_hash: &str) -> DbResult<()> {
    if name.is_empty() {
        return Err(DbError::unvollstaendig("Mitgliedsname darf nicht leer sein"));
    }
    if passwort_hash.is_empty() {
        return Err(DbError::unvollstaendig(format!(
            "Mitglied '{name}' hat keinen Passwort-Hash"
        )));
    }
    Ok(())
}

impl MemberStore for InMemoryMemberStore {
    async fn finde_nach_name(&self, name: &str) -> DbResult<Option<MemberRecord>> {
        let mitglieder = self.mitglieder.read().await;
        Ok(mitglieder.values().find(|m| m.name == name).cloned())
    }

    async fn finde_nach_id(&self, id: MemberId) -> DbResult<Option<MemberRecord>> {
        Ok(self.mitglieder.read().await.get(&id).cloned())
    }
}
