//! Typed launch failures and their process exit codes.
//!
//! Failures that happen before the inner CLI runs get their own exit codes so
//! callers can tell them apart from the propagated inner exit code. 126, 127
//! and 125 are left alone (shell and Docker conventions).

use crate::config::API_KEY_VAR;

/// A failure that prevents the sandboxed process from running.
#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    /// The credential environment variable is absent or empty.
    #[error(
        "{var} is not set. Export your Anthropic API key first:\n  export {var}=\"sk-ant-...\"",
        var = API_KEY_VAR
    )]
    MissingCredential,

    /// The Docker engine is unreachable or the CLI is missing.
    #[error("container engine unavailable: {0}")]
    RuntimeUnavailable(String),

    /// The base image is absent and could not be pulled.
    #[error("failed to pull image '{image}': {reason}")]
    ImagePullError { image: String, reason: String },
}

impl LaunchError {
    /// Process exit code for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            LaunchError::MissingCredential => 2,
            LaunchError::RuntimeUnavailable(_) => 3,
            LaunchError::ImagePullError { .. } => 4,
        }
    }
}
