//! ultramar-core – Gemeinsame Typen
//!
//! Dieses Crate stellt die Identifikationstypen bereit, die von Speicher-
//! und Auth-Crate gemeinsam genutzt werden.

pub mod types;

pub use types::MemberId;
