use anyhow::Result;
use clap::Parser;
use log::debug;

use crate::config::{SandboxConfig, VERSION_INFO};
use crate::launch;
use crate::supervise;

/// Run the Claude Code CLI in an isolated, ephemeral Docker container.
///
/// Only the current directory is visible inside the container; the
/// Anthropic API key is forwarded from the environment. Every argument is
/// passed through to claude itself.
#[derive(Parser)]
#[command(name = "claude-sandbox")]
pub struct Cli {
    /// Arguments forwarded verbatim to claude inside the sandbox
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

/// Resolve the config, create the container and supervise it to completion.
/// Returns the exit code to propagate.
pub fn run() -> Result<i32> {
    let cli = Cli::parse();
    debug!("claude-sandbox {VERSION_INFO}");

    let config = SandboxConfig::resolve(cli.args)?;
    let handle = launch::launch(&config)?;
    supervise::supervise(handle)
}
