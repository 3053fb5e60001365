//! Reading namespace identities from /proc
//!
//! Purely informational: used for debug logging before a join, never as a
//! precondition check.

use std::fmt;
use std::fs;

use burrow_core::{NamespaceKind, ProcessId};

/// The namespace ids of a process, one per supported kind
///
/// Each id is the `ns:[inode]` text of the `/proc/<pid>/ns/<kind>` symlink,
/// or `None` where the link could not be read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamespaceIds {
    /// PID namespace id
    pub pid: Option<String>,
    /// UTS namespace id
    pub uts: Option<String>,
    /// Mount namespace id
    pub mnt: Option<String>,
    /// Network namespace id
    pub net: Option<String>,
}

impl NamespaceIds {
    /// Read the namespace ids of a target process
    #[must_use]
    pub fn for_pid(pid: ProcessId) -> Self {
        let read_ns = |kind: NamespaceKind| -> Option<String> {
            fs::read_link(kind.ns_path(pid))
                .map(|p| p.to_string_lossy().into_owned())
                .ok()
        };

        Self {
            pid: read_ns(NamespaceKind::Pid),
            uts: read_ns(NamespaceKind::Uts),
            mnt: read_ns(NamespaceKind::Mnt),
            net: read_ns(NamespaceKind::Net),
        }
    }

    /// Read the namespace ids of the calling process
    #[must_use]
    pub fn current() -> Self {
        Self::for_pid(ProcessId::current())
    }

    /// Whether every readable kind matches between the two reports
    #[must_use]
    pub fn same_namespaces(&self, other: &Self) -> bool {
        self.pid == other.pid
            && self.uts == other.uts
            && self.mnt == other.mnt
            && self.net == other.net
    }
}

impl fmt::Display for NamespaceIds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kinds = [
            ("pid", &self.pid),
            ("uts", &self.uts),
            ("mnt", &self.mnt),
            ("net", &self.net),
        ];
        for (name, id) in kinds {
            match id {
                Some(id) => writeln!(f, "  {name}: {id}")?,
                None => writeln!(f, "  {name}: <unreadable>")?,
            }
        }
        Ok(())
    }
}
