//! Joining another process's namespaces via setns(2)

use std::fs::File;

use nix::sched::setns;

use burrow_core::{NamespaceError, NamespaceKind, ProcessId};

/// Attach the calling process to one namespace of the target
///
/// Opens `/proc/<target>/ns/<kind>` read-only and attaches the calling
/// process's namespace context of that kind to it. The handle is owned for
/// the duration of the attach call only and is closed whether the attach
/// succeeds or fails.
///
/// On success the change is permanent for the rest of this process's life.
pub fn join(target: ProcessId, kind: NamespaceKind) -> Result<(), NamespaceError> {
    let path = kind.ns_path(target);

    tracing::debug!(pid = %target, %kind, path = %path.display(), "Joining namespace");

    let handle = File::open(&path).map_err(|source| {
        tracing::error!(pid = %target, %kind, error = %source, "Failed to open namespace handle");
        NamespaceError::OpenFailed {
            kind,
            pid: target,
            source,
        }
    })?;

    // The kind's clone flag makes the kernel verify the handle matches.
    setns(&handle, kind.clone_flag()).map_err(|source| {
        tracing::error!(pid = %target, %kind, error = %source, "setns failed");
        NamespaceError::AttachFailed {
            kind,
            pid: target,
            source,
        }
    })?;

    tracing::debug!(pid = %target, %kind, "Namespace joined");

    Ok(())
}

/// Attach to all four namespace kinds in the contractual order
///
/// Joins pid, uts, mnt and net, in exactly that order, stopping at the
/// first failure. No kind is skipped, retried or reordered.
pub fn join_all(target: ProcessId) -> Result<(), NamespaceError> {
    tracing::info!(pid = %target, "Joining namespaces");

    for kind in NamespaceKind::JOIN_ORDER {
        join(target, kind)?;
    }

    tracing::debug!(pid = %target, "All namespaces joined");

    Ok(())
}
