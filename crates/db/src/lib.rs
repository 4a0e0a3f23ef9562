//! ultramar-db – Mitglieder-Speicher
//!
//! Die Auth-Pipeline liest Mitglieder ausschliesslich ueber den
//! [`MemberStore`]-Trait. Dieses Crate liefert den Trait, die Datensaetze
//! und eine In-Memory-Implementierung, die wahlweise aus einer TOML-Datei
//! befuellt wird.

pub mod error;
pub mod memory;
pub mod models;
pub mod repository;

pub use error::DbError;
pub use memory::InMemoryMemberStore;
pub use models::{MemberPatch, MemberRecord, NeuesMitglied};
pub use repository::{DbResult, MemberStore};
