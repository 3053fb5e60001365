//! CLI argument definitions

use std::path::PathBuf;

use burrow_core::ProcessId;
use clap::Parser;

#[derive(Parser)]
#[command(name = "burrow")]
#[command(about = "Exec a command inside a running container's namespaces", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Target process whose namespaces are joined
    pub pid: ProcessId,

    /// Root filesystem to switch into
    pub rootfs: PathBuf,

    /// Command to run inside the container, with its arguments
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}
