//! Replacing the process image with the launched command

use std::convert::Infallible;

use nix::errno::Errno;
use nix::unistd::execvp;

use burrow_core::{ExecError, LaunchSpec};

/// Replace the current process image with the command in `spec`
///
/// The command name is resolved through the PATH search of execvp(3);
/// argv[0] is the command name as given. The process id, descriptors not
/// marked close-on-exec, and the namespace/root state all carry over.
///
/// On success this function does not return: the process becomes the
/// launched command. Any return value at all is the failure signal.
pub fn dispatch(spec: &LaunchSpec) -> Result<Infallible, ExecError> {
    tracing::info!(command = %spec, "Replacing process image");

    let argv = spec.argv();

    match execvp(&argv[0], argv) {
        Ok(never) => match never {},
        Err(Errno::ENOENT) => Err(ExecError::NotFound {
            command: spec.command().to_string(),
        }),
        Err(source @ (Errno::EACCES | Errno::ENOEXEC)) => Err(ExecError::NotExecutable {
            command: spec.command().to_string(),
            source,
        }),
        Err(source) => Err(ExecError::System {
            command: spec.command().to_string(),
            source,
        }),
    }
}
