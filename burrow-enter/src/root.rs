//! Rebinding the filesystem root into the container's rootfs

use std::path::Path;

use nix::sys::stat::stat;
use nix::unistd::{chdir, chroot};

use burrow_core::RootSwitchError;

/// Switch the process's filesystem root to `new_root`
///
/// Four sequential sub-steps, each gating the next: stat the path, chdir
/// into it, chroot to the working directory, then chdir to `/` so relative
/// path resolution inside the new root behaves as the launched command
/// expects.
///
/// Must run after all namespace joins succeeded, so the path is resolved
/// inside the target's mount namespace. The switch is permanent.
pub fn switch_root(new_root: &Path) -> Result<(), RootSwitchError> {
    tracing::info!(path = %new_root.display(), "Switching root");

    stat(new_root).map_err(|source| {
        tracing::error!(path = %new_root.display(), error = %source, "rootfs not accessible");
        RootSwitchError::StatFailed {
            path: new_root.to_path_buf(),
            source,
        }
    })?;

    chdir(new_root).map_err(|source| {
        tracing::error!(path = %new_root.display(), error = %source, "chdir into rootfs failed");
        RootSwitchError::ChdirFailed {
            path: new_root.to_path_buf(),
            source,
        }
    })?;

    chroot(".").map_err(|source| {
        tracing::error!(error = %source, "chroot failed");
        RootSwitchError::ChrootFailed { source }
    })?;

    chdir("/").map_err(|source| {
        tracing::error!(error = %source, "chdir to new root failed");
        RootSwitchError::ChdirRootFailed { source }
    })?;

    tracing::debug!("Root switched");

    Ok(())
}
