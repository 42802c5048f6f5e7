//! # ax-core
//!
//! Core utilities for the Aurax client session stack: configuration,
//! the shared error taxonomy, and structured session event logging.
//!
//! Every other `ax-*` crate builds on the types in this crate.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod config;
pub mod error;
pub mod event;

pub use config::Config;
pub use error::{Error, Result};
