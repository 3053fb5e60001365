//! Error types for Burrow
//!
//! Every step of the enter sequence is fatal on failure. Components return
//! these errors instead of exiting so the binary owns the single point of
//! process termination.

use std::path::PathBuf;

use nix::errno::Errno;
use thiserror::Error;

use crate::types::{NamespaceKind, ProcessId};

/// A namespace join failed
#[derive(Error, Debug)]
pub enum NamespaceError {
    /// The `/proc/<pid>/ns/<kind>` file could not be opened
    ///
    /// Raised when the target process is gone, the caller lacks access, or
    /// the kernel does not support the namespace kind.
    #[error("opening {kind} namespace of pid {pid}: {source}")]
    OpenFailed {
        /// Namespace kind being joined
        kind: NamespaceKind,
        /// Target process id
        pid: ProcessId,
        /// Underlying OS error
        source: std::io::Error,
    },

    /// The setns(2) call itself failed
    ///
    /// Typically EPERM (missing CAP_SYS_ADMIN) or EINVAL (e.g. joining a
    /// mount namespace from a multi-threaded process).
    #[error("joining {kind} namespace of pid {pid}: {source}")]
    AttachFailed {
        /// Namespace kind being joined
        kind: NamespaceKind,
        /// Target process id
        pid: ProcessId,
        /// Underlying OS error
        source: Errno,
    },
}

impl NamespaceError {
    /// The namespace kind the failed join was targeting
    #[must_use]
    pub const fn kind(&self) -> NamespaceKind {
        match self {
            Self::OpenFailed { kind, .. } | Self::AttachFailed { kind, .. } => *kind,
        }
    }
}

/// The root switch failed, tagged with the sub-step that failed
#[derive(Error, Debug)]
pub enum RootSwitchError {
    /// The new root could not be stat'ed (missing or inaccessible)
    #[error("stat {path}: {source}", path = .path.display())]
    StatFailed {
        /// Path that was checked
        path: PathBuf,
        /// Underlying OS error
        source: Errno,
    },

    /// Changing the working directory into the new root failed
    #[error("chdir into {path}: {source}", path = .path.display())]
    ChdirFailed {
        /// Path that was entered
        path: PathBuf,
        /// Underlying OS error
        source: Errno,
    },

    /// The chroot(2) call failed (insufficient privilege, or disallowed by
    /// a hardened kernel configuration)
    #[error("chroot: {source}")]
    ChrootFailed {
        /// Underlying OS error
        source: Errno,
    },

    /// Re-anchoring the working directory to `/` after the chroot failed
    #[error("chdir to /: {source}")]
    ChdirRootFailed {
        /// Underlying OS error
        source: Errno,
    },
}

/// Replacing the process image failed
///
/// Exec success has no value: the process becomes the launched command.
/// Any returned error is itself the failure signal.
#[derive(Error, Debug)]
pub enum ExecError {
    /// The command was not found on the search path
    #[error("command not found: {command}")]
    NotFound {
        /// Command name as given
        command: String,
    },

    /// The command exists but is not executable
    #[error("command not executable: {command}: {source}")]
    NotExecutable {
        /// Command name as given
        command: String,
        /// Underlying OS error
        source: Errno,
    },

    /// Any other exec failure
    #[error("exec {command}: {source}")]
    System {
        /// Command name as given
        command: String,
        /// Underlying OS error
        source: Errno,
    },
}

/// Burrow error types
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Namespace join failed
    #[error(transparent)]
    Namespace(#[from] NamespaceError),

    /// Root switch failed
    #[error(transparent)]
    RootSwitch(#[from] RootSwitchError),

    /// Exec failed
    #[error(transparent)]
    Exec(#[from] ExecError),

    /// Invalid input (bad pid, empty command, embedded NUL)
    #[error("invalid configuration: {message}")]
    InvalidConfig {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Name of the step that failed, for operator-facing diagnostics
    #[must_use]
    pub const fn step(&self) -> &'static str {
        match self {
            Self::Namespace(_) => "join namespace",
            Self::RootSwitch(_) => "switch root",
            Self::Exec(_) => "exec",
            Self::InvalidConfig { .. } | Self::Io(_) => "setup",
        }
    }
}

/// Result type alias for Burrow operations
pub type Result<T> = std::result::Result<T, Error>;
