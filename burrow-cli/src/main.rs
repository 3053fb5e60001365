//! Burrow CLI
//!
//! `burrow <pid> <rootfs> <command> [args...]` attaches to the target
//! process's namespaces, switches into its root filesystem, and replaces
//! itself with the command. Exit code 0 is unreachable from this program's
//! own success path: a successful run no longer is this program.

use std::convert::Infallible;
use std::process;

use clap::Parser;
use tracing::Level;

use burrow_core::{Error, LaunchSpec};
use burrow_enter::{EnterSequence, NamespaceIds};

mod cli;

use cli::Cli;

// Plain fn main, no async runtime and no thread spawning anywhere below:
// setns(2) on a mount namespace is refused from a multi-threaded process.
fn main() {
    // Parse command-line arguments
    let cli = Cli::parse();

    // Setup logging based on verbosity; logs go to stderr so stdout stays
    // clean for the launched command
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Success leaves through the exec inside run(); the only way back here
    // is an error, which the reporter turns into a diagnostic and a
    // non-zero exit.
    let err = match run(&cli) {
        Ok(never) => match never {},
        Err(e) => e,
    };

    report(&err);
}

fn run(cli: &Cli) -> burrow_core::Result<Infallible> {
    let spec = LaunchSpec::new(cli.command[0].as_str(), &cli.command[1..])?;

    tracing::debug!(
        pid = %cli.pid,
        "Target namespaces:\n{}",
        NamespaceIds::for_pid(cli.pid)
    );

    let joined = EnterSequence::new(cli.pid).join_namespaces()?;
    let switched = joined.switch_root(&cli.rootfs)?;
    let never = switched.dispatch(&spec)?;
    match never {}
}

/// Failure reporter: the single point of process termination
fn report(err: &Error) -> ! {
    eprintln!("❌ Error: {}: {}", err.step(), err);
    process::exit(1);
}
