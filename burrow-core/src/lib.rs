//! Burrow Core - Foundation types and errors
//!
//! This crate provides the core abstractions used throughout Burrow.

#![warn(missing_docs, clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod types;

pub use error::{Error, ExecError, NamespaceError, Result, RootSwitchError};
pub use types::{LaunchSpec, NamespaceKind, ProcessId};
