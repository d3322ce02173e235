//! Thin wrappers around the `docker` CLI.
//!
//! The launcher drives the engine exclusively through the CLI so it works
//! unchanged against Docker Desktop, OrbStack and plain dockerd. Probe-style
//! helpers discard output; anything whose failure the user must see captures
//! stderr and includes it in the error.

use std::process::{Command, Stdio};

use anyhow::{Context, Result, bail};
use log::{debug, info};

use crate::command_ext::CommandExt;
use crate::error::LaunchError;

/// Check that the docker CLI exists and the engine responds.
pub fn check_engine() -> Result<()> {
    let status = Command::new("docker")
        .args(["version", "--format", "{{.Server.Version}}"])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match status {
        Ok(status) if status.success() => Ok(()),
        Ok(_) => Err(LaunchError::RuntimeUnavailable(
            "the docker daemon is not responding (is OrbStack or Docker running?)".to_string(),
        )
        .into()),
        Err(e) => Err(LaunchError::RuntimeUnavailable(format!(
            "could not run the docker CLI: {e}"
        ))
        .into()),
    }
}

/// Check if an image with the given tag exists locally.
pub fn image_exists(tag: &str) -> Result<bool> {
    let status = Command::new("docker")
        .args(["image", "inspect", tag])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .context("Failed to run docker image inspect")?;

    Ok(status.success())
}

/// Pull an image from its registry.
pub fn pull_image(tag: &str) -> Result<()> {
    info!("Pulling image {tag} (first run may take a while)");

    let output = Command::new("docker")
        .args(["pull", tag])
        .stdout(Stdio::null())
        .output()
        .context("Failed to run docker pull")?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(LaunchError::ImagePullError {
            image: tag.to_string(),
            reason: stderr.trim().to_string(),
        }
        .into());
    }

    Ok(())
}

/// Create a container from prepared `docker create` arguments and return its
/// ID. The container is not started.
pub fn create_container(create_args: &[String]) -> Result<String> {
    let stdout = Command::new("docker")
        .arg("create")
        .args(create_args)
        .success()
        .context("Failed to create container")?;

    let id = String::from_utf8(stdout)
        .context("docker create printed non-UTF-8 output")?
        .trim()
        .to_string();
    if id.is_empty() {
        bail!("docker create returned an empty container ID");
    }

    debug!("Created container {id}");
    Ok(id)
}

/// Ask the engine to stop a running container. Stopping an already-stopped
/// container is fine; errors are reported but the caller usually ignores
/// them, since removal follows either way.
pub fn stop_container(id: &str) -> Result<()> {
    let status = Command::new("docker")
        .args(["stop", id])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .context("Failed to run docker stop")?;

    if !status.success() {
        bail!("docker stop failed for container {id}");
    }
    Ok(())
}

/// Force-remove a container.
pub fn remove_container(id: &str) -> Result<()> {
    let status = Command::new("docker")
        .args(["rm", "-f", id])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .context("Failed to run docker rm")?;

    if !status.success() {
        bail!("Failed to remove container {id}");
    }

    debug!("Removed container {id}");
    Ok(())
}
