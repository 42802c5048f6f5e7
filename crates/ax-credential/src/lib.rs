//! # ax-credential
//!
//! Persistent storage of the bearer credential.
//!
//! The store reads from two tiers (durable and session-scoped) across a
//! primary and a legacy key, writes only to the durable primary key, and
//! clears every recognized slot atomically. When no tier can persist,
//! the credential lives in a process-local overlay for the page
//! lifetime.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod backend;
pub mod store;

pub use backend::{MemoryBackend, StorageBackend, UnavailableBackend};
pub use store::{keys, CredentialStore};
