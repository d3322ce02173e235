//! Container specification and creation.
//!
//! A `ContainerSpec` is derived immutably from the resolved config and
//! materialized as `docker create` arguments. The container exposes exactly
//! one host path: the working directory, mounted read-write at
//! `/workspace`. Environment variables are forwarded name-only (`-e NAME`),
//! so the API key is read from the launcher's environment by the docker CLI
//! and never appears in any argv.

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::Result;
use log::{debug, warn};

use crate::config::{API_KEY_VAR, SandboxConfig, WORKSPACE_MOUNT_POINT};
use crate::docker;

/// The npm package that provides the claude CLI on stock images.
const CLAUDE_CODE_PACKAGE: &str = "@anthropic-ai/claude-code";

/// The single host-to-container bind mount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindMount {
    pub host_path: PathBuf,
    pub container_path: &'static str,
}

/// Everything needed to create the ephemeral container.
#[derive(Debug, Clone)]
pub struct ContainerSpec {
    pub image: String,
    pub mount: BindMount,
    /// Environment variable names to forward (name-only, values come from
    /// the launcher's environment).
    pub env: Vec<String>,
    pub command: Vec<String>,
    pub tty: bool,
}

impl ContainerSpec {
    /// Derive the spec from the resolved config. `tty` controls whether the
    /// container gets a pseudo-terminal; pass whether stdin is a terminal.
    pub fn from_config(config: &SandboxConfig, tty: bool) -> Self {
        let mut env = vec![API_KEY_VAR.to_string()];
        env.extend(config.env_passthrough.iter().cloned());

        // A custom image is expected to ship the claude CLI; the stock image
        // bootstraps it through npx.
        let mut command: Vec<String> = if config.custom_image {
            vec!["claude".to_string()]
        } else {
            vec![
                "npx".to_string(),
                "--yes".to_string(),
                CLAUDE_CODE_PACKAGE.to_string(),
            ]
        };
        command.extend(config.extra_args.iter().cloned());

        ContainerSpec {
            image: config.image.clone(),
            mount: BindMount {
                host_path: config.working_dir.clone(),
                container_path: WORKSPACE_MOUNT_POINT,
            },
            env,
            command,
            tty,
        }
    }

    /// Arguments for `docker create`.
    pub fn create_args(&self) -> Vec<String> {
        let mut args = vec!["-i".to_string()];
        if self.tty {
            args.push("-t".to_string());
        }

        args.push("-v".to_string());
        args.push(format!(
            "{}:{}",
            self.mount.host_path.display(),
            self.mount.container_path
        ));
        args.push("-w".to_string());
        args.push(self.mount.container_path.to_string());

        for name in &self.env {
            args.push("-e".to_string());
            args.push(name.clone());
        }

        args.push(self.image.clone());
        args.extend(self.command.iter().cloned());
        args
    }
}

/// Owning reference to the created container. Dropping the handle removes
/// the container, so removal happens on every exit path.
pub struct ContainerHandle {
    id: String,
}

impl ContainerHandle {
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl Drop for ContainerHandle {
    fn drop(&mut self) {
        if let Err(e) = docker::remove_container(&self.id) {
            warn!("Failed to remove container {}: {e:#}", self.id);
        }
    }
}

/// Verify the engine, ensure the image is present and create the container.
pub fn launch(config: &SandboxConfig) -> Result<ContainerHandle> {
    docker::check_engine()?;

    if !docker::image_exists(&config.image)? {
        docker::pull_image(&config.image)?;
    }

    let spec = ContainerSpec::from_config(config, std::io::stdin().is_terminal());
    debug!(
        "Launching {} with {} mounted at {}",
        spec.image,
        spec.mount.host_path.display(),
        spec.mount.container_path
    );

    let id = docker::create_container(&spec.create_args())?;
    Ok(ContainerHandle { id })
}
