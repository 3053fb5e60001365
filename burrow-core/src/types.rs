//! Core type definitions with strong typing and validation

use std::ffi::CString;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use nix::sched::CloneFlags;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Process identifier of the target whose namespaces are joined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(transparent)]
#[serde(transparent)]
pub struct ProcessId(i32);

impl ProcessId {
    /// Create a validated `ProcessId`
    ///
    /// # Errors
    /// Returns error if the pid is not positive. Existence of the process is
    /// not checked here; a dead pid surfaces later when its namespace file
    /// cannot be opened.
    pub fn new(pid: i32) -> Result<Self> {
        if pid <= 0 {
            return Err(Error::InvalidConfig {
                message: format!("pid must be positive, got {pid}"),
            });
        }
        Ok(Self(pid))
    }

    /// Create from raw PID without validation
    #[must_use]
    pub const fn from_raw(pid: i32) -> Self {
        Self(pid)
    }

    /// Get the current process ID
    #[must_use]
    pub fn current() -> Self {
        #[allow(clippy::cast_possible_wrap)]
        Self(std::process::id() as i32)
    }

    /// Convert to `nix::unistd::Pid`
    #[must_use]
    pub const fn as_nix_pid(self) -> nix::unistd::Pid {
        nix::unistd::Pid::from_raw(self.0)
    }

    /// Get raw PID value
    #[must_use]
    pub const fn as_raw(self) -> i32 {
        self.0
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProcessId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let pid: i32 = s.parse().map_err(|_| Error::InvalidConfig {
            message: format!("pid must be a positive integer, got {s:?}"),
        })?;
        Self::new(pid)
    }
}

impl From<nix::unistd::Pid> for ProcessId {
    fn from(pid: nix::unistd::Pid) -> Self {
        Self(pid.as_raw())
    }
}

impl From<ProcessId> for nix::unistd::Pid {
    fn from(pid: ProcessId) -> Self {
        nix::unistd::Pid::from_raw(pid.as_raw())
    }
}

/// The namespace kinds this launcher joins
///
/// The set and its order are part of the contract: pid and uts namespaces
/// are joined before mnt, and mnt before net. Later joins depend on
/// identity and filesystem state established by the earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamespaceKind {
    /// Process-id namespace
    Pid,
    /// Hostname/domainname namespace
    Uts,
    /// Mount namespace
    Mnt,
    /// Network namespace
    Net,
}

impl NamespaceKind {
    /// The fixed attachment order: pid, uts, mnt, net
    pub const JOIN_ORDER: [Self; 4] = [Self::Pid, Self::Uts, Self::Mnt, Self::Net];

    /// File name under `/proc/<pid>/ns/`
    #[must_use]
    pub const fn proc_name(self) -> &'static str {
        match self {
            Self::Pid => "pid",
            Self::Uts => "uts",
            Self::Mnt => "mnt",
            Self::Net => "net",
        }
    }

    /// The matching clone flag, passed to setns(2) so the kernel verifies
    /// the handle is of this kind
    #[must_use]
    pub const fn clone_flag(self) -> CloneFlags {
        match self {
            Self::Pid => CloneFlags::CLONE_NEWPID,
            Self::Uts => CloneFlags::CLONE_NEWUTS,
            Self::Mnt => CloneFlags::CLONE_NEWNS,
            Self::Net => CloneFlags::CLONE_NEWNET,
        }
    }

    /// Path of the namespace handle for a target process
    #[must_use]
    pub fn ns_path(self, pid: ProcessId) -> PathBuf {
        PathBuf::from(format!("/proc/{pid}/ns/{}", self.proc_name()))
    }
}

impl fmt::Display for NamespaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.proc_name())
    }
}

/// The command to exec once namespaces and root are switched
///
/// Taken verbatim from caller input and consumed exactly once, at
/// process-image replacement time. The command name is argv[0] by
/// convention.
#[derive(Debug, Clone)]
pub struct LaunchSpec {
    command: String,
    argv: Vec<CString>,
}

impl LaunchSpec {
    /// Create a `LaunchSpec` from a command name and its arguments
    ///
    /// # Errors
    /// Returns error if the command name is empty or any argument contains
    /// an embedded NUL byte.
    pub fn new(command: impl Into<String>, args: &[String]) -> Result<Self> {
        let command = command.into();
        if command.is_empty() {
            return Err(Error::InvalidConfig {
                message: "command cannot be empty".to_string(),
            });
        }

        let mut argv = Vec::with_capacity(args.len() + 1);
        for arg in std::iter::once(command.as_str()).chain(args.iter().map(String::as_str)) {
            argv.push(CString::new(arg).map_err(|_| Error::InvalidConfig {
                message: format!("argument contains NUL byte: {arg:?}"),
            })?);
        }

        Ok(Self { command, argv })
    }

    /// The command name as given by the caller
    #[must_use]
    pub fn command(&self) -> &str {
        &self.command
    }

    /// The argument vector, command name included as argv[0]
    #[must_use]
    pub fn argv(&self) -> &[CString] {
        &self.argv
    }
}

impl fmt::Display for LaunchSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for arg in &self.argv {
            if !first {
                f.write_str(" ")?;
            }
            write!(f, "{}", arg.to_string_lossy())?;
            first = false;
        }
        Ok(())
    }
}
