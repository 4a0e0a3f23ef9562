//! Repository-Trait fuer Mitglieder-Lookups
//!
//! Der Auth-Kern kennt nur diese zwei Punktabfragen. Jeder Aufruf gilt als
//! einzelner atomarer Lesezugriff mit den Ausgaengen gefunden / nicht
//! gefunden. Nebenlaeufigkeit und Timeouts liegen bei der Implementierung.

use ultramar_core::MemberId;

use crate::{error::DbError, models::MemberRecord};

/// Result-Alias fuer Speicher-Operationen
pub type DbResult<T> = Result<T, DbError>;

/// Lesezugriff auf Mitglieder-Datensaetze
#[allow(async_fn_in_trait)]
pub trait MemberStore: Send + Sync {
    /// Laedt ein Mitglied anhand seines Namens (Gross-/Kleinschreibung relevant)
    async fn finde_nach_name(&self, name: &str) -> DbResult<Option<MemberRecord>>;

    /// Laedt ein Mitglied anhand seiner ID
    async fn finde_nach_id(&self, id: MemberId) -> DbResult<Option<MemberRecord>>;
}
