//! Entering a running container: namespace join, root switch, exec
//!
//! This crate implements the ordered sequence of privileged state
//! transitions behind "exec into a running container":
//! - Join the target's pid, uts, mnt and net namespaces, in that order
//! - Pivot the filesystem root into the container's rootfs
//! - Replace the process image with the requested command
//!
//! Every transition is irreversible and the order is part of the contract.
//! [`sequence::EnterSequence`] makes the ordering structural: each step
//! consumes the previous step's state, so skipping or reordering does not
//! compile.
//!
//! The whole sequence must run on a single-threaded process. setns(2) on a
//! mount namespace can fail (EINVAL) or misbehave when other threads are
//! running, so nothing in this crate spawns threads and callers must not
//! drive it from a threaded runtime.

#![warn(missing_docs, clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]

pub mod exec;
pub mod inspect;
pub mod join;
pub mod root;
pub mod sequence;

pub use inspect::NamespaceIds;
pub use sequence::{EnterSequence, Joined, RootSwitched};
