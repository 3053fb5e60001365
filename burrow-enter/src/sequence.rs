//! Typed state machine for the enter sequence
//!
//! The kernel imposes a strict order on the transitions: all four namespace
//! joins, then the root switch, then the exec. Each state here is produced
//! only by the previous step's success and consumed by the next step, so an
//! out-of-order, skipped or repeated step does not compile. There are no
//! back edges: once a step succeeds the process cannot be restored, and a
//! second full run in the same process is unsupported.

use std::convert::Infallible;
use std::path::Path;

use burrow_core::{ExecError, LaunchSpec, NamespaceError, ProcessId, RootSwitchError};

use crate::{exec, join, root};

/// Entry state: nothing attached yet
#[derive(Debug)]
pub struct EnterSequence {
    target: ProcessId,
}

impl EnterSequence {
    /// Start a sequence targeting the given process
    #[must_use]
    pub const fn new(target: ProcessId) -> Self {
        Self { target }
    }

    /// The process whose namespaces will be joined
    #[must_use]
    pub const fn target(&self) -> ProcessId {
        self.target
    }

    /// Join all four namespaces in the fixed order
    ///
    /// The first failure aborts the sequence; the process is then left in
    /// whatever prefix of namespaces was already joined.
    pub fn join_namespaces(self) -> Result<Joined, NamespaceError> {
        join::join_all(self.target)?;
        Ok(Joined { target: self.target })
    }
}

/// All four namespace joins have succeeded
#[derive(Debug)]
pub struct Joined {
    target: ProcessId,
}

impl Joined {
    /// The process whose namespaces were joined
    #[must_use]
    pub const fn target(&self) -> ProcessId {
        self.target
    }

    /// Pivot the filesystem root into `new_root`
    ///
    /// Resolved inside the target's mount namespace, which this state
    /// proves has been joined.
    pub fn switch_root(self, new_root: &Path) -> Result<RootSwitched, RootSwitchError> {
        root::switch_root(new_root)?;
        Ok(RootSwitched { _sealed: () })
    }
}

/// Namespaces joined and root switched; only the exec remains
#[derive(Debug)]
pub struct RootSwitched {
    _sealed: (),
}

impl RootSwitched {
    /// Replace the process image with the command
    ///
    /// Never returns on success; an `Err` is the only possible return.
    pub fn dispatch(self, spec: &LaunchSpec) -> Result<Infallible, ExecError> {
        exec::dispatch(spec)
    }
}
