//! Extension trait for `std::process::Command`.

use std::process::Command;

use anyhow::{Result, anyhow};

/// Extension trait adding a success-or-detailed-error runner.
pub trait CommandExt {
    /// Executes the command and returns stdout if it exits successfully.
    ///
    /// On failure, returns an error carrying the command line, both output
    /// streams and the exit status.
    fn success(&mut self) -> Result<Vec<u8>>;
}

impl CommandExt for Command {
    fn success(&mut self) -> Result<Vec<u8>> {
        let output = self.output()?;

        if output.status.success() {
            Ok(output.stdout)
        } else {
            let stdout = String::from_utf8_lossy(&output.stdout);
            let stderr = String::from_utf8_lossy(&output.stderr);
            let exit_info = match output.status.code() {
                Some(code) => format!("exit code: {}", code),
                None => "killed by signal".to_string(),
            };
            Err(anyhow!("$ {:?}\n{}{}{}", self, stdout, stderr, exit_info))
        }
    }
}
