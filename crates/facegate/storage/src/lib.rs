//! Facegate credential storage abstractions.
//!
//! This crate defines the persistence contract the re-authentication gate
//! depends on: a point upsert/fetch key-value store for enrolled face
//! credentials, keyed by user identity.
//!
//! Design stance:
//! - One record per user. Upsert replaces the whole record or writes
//!   nothing; a concurrent fetch sees the old or the new credential, never a
//!   torn one.
//! - "Not found" is `Ok(None)`, never an error. Errors mean the backend
//!   itself is unavailable, and the gate treats them as a failed
//!   verification.

#![deny(unsafe_code)]
#![warn(rust_2018_idioms)]

mod error;
pub mod memory;
#[cfg(feature = "sqlite")]
pub mod sqlite;
mod traits;

pub use error::{StoreError, StoreResult};
pub use memory::InMemoryCredentialStore;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteCredentialStore;
pub use traits::CredentialStore;
