//! Sandbox configuration resolution.
//!
//! A `SandboxConfig` is built once per invocation from the process
//! environment (the API key), the current working directory (the single
//! bind-mount source) and the forwarded CLI arguments. An optional
//! `.claude-sandbox.toml` in the working directory can override the image
//! and forward additional environment variables.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use crate::error::LaunchError;

/// Environment variable holding the Anthropic API key.
pub const API_KEY_VAR: &str = "ANTHROPIC_API_KEY";

/// Image used when no override is configured. A stock Node image; the
/// Claude Code CLI is bootstrapped with npx at container start.
pub const DEFAULT_IMAGE: &str = "node:22-bookworm";

/// Fixed mount point of the working directory inside the container.
pub const WORKSPACE_MOUNT_POINT: &str = "/workspace";

/// Per-project configuration file name, looked up in the working directory.
pub const CONFIG_FILE: &str = ".claude-sandbox.toml";

/// Version string stamped by build.rs.
pub const VERSION_INFO: &str = env!("CLAUDE_SANDBOX_VERSION_INFO");

/// Resolved per-invocation configuration.
#[derive(Clone)]
pub struct SandboxConfig {
    /// Canonicalized directory to bind-mount into the container.
    pub working_dir: PathBuf,
    /// The Anthropic API key. Forwarded into the container name-only; must
    /// never appear in argv or log output.
    pub api_key: String,
    /// CLI arguments forwarded verbatim to the inner claude invocation.
    pub extra_args: Vec<String>,
    /// Image tag to run.
    pub image: String,
    /// True when the image came from `.claude-sandbox.toml`. Custom images
    /// are expected to have the claude CLI baked in.
    pub custom_image: bool,
    /// Extra environment variable names forwarded into the container.
    pub env_passthrough: Vec<String>,
}

// The api_key must not leak through debug formatting.
impl std::fmt::Debug for SandboxConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SandboxConfig")
            .field("working_dir", &self.working_dir)
            .field("api_key", &"<redacted>")
            .field("extra_args", &self.extra_args)
            .field("image", &self.image)
            .field("custom_image", &self.custom_image)
            .field("env_passthrough", &self.env_passthrough)
            .finish()
    }
}

impl SandboxConfig {
    /// Resolve the configuration from the process environment and the given
    /// forwarded arguments. Fails with `MissingCredential` before any
    /// container side effect when the API key is absent.
    pub fn resolve(extra_args: Vec<String>) -> Result<Self> {
        let api_key = std::env::var(API_KEY_VAR).ok();
        let working_dir =
            std::env::current_dir().context("Failed to determine working directory")?;
        Self::from_parts(api_key, working_dir, extra_args)
    }

    fn from_parts(
        api_key: Option<String>,
        working_dir: PathBuf,
        extra_args: Vec<String>,
    ) -> Result<Self> {
        let api_key = match api_key {
            Some(key) if !key.trim().is_empty() => key,
            _ => return Err(LaunchError::MissingCredential.into()),
        };

        let working_dir = working_dir.canonicalize().with_context(|| {
            format!("Working directory {} does not exist", working_dir.display())
        })?;
        if !working_dir.is_dir() {
            bail!("{} is not a directory", working_dir.display());
        }

        let file_config = TomlConfig::load(&working_dir)?;

        let (image, custom_image) = match file_config.image {
            Some(image) => (image, true),
            None => (DEFAULT_IMAGE.to_string(), false),
        };

        for name in &file_config.env_passthrough {
            if name.is_empty() || name.contains('=') {
                bail!("Invalid env-passthrough entry '{name}': must be a variable name");
            }
        }

        Ok(SandboxConfig {
            working_dir,
            api_key,
            extra_args,
            image,
            custom_image,
            env_passthrough: file_config.env_passthrough,
        })
    }
}

/// Contents of `.claude-sandbox.toml`.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct TomlConfig {
    /// Image tag override. The image must provide the `claude` CLI.
    pub image: Option<String>,

    /// Names of additional environment variables to forward into the
    /// container. The API key is always forwarded and need not be listed.
    #[serde(default)]
    pub env_passthrough: Vec<String>,
}

impl TomlConfig {
    /// Load the config file from the given directory, if present.
    pub fn load(dir: &Path) -> Result<Self> {
        let config_path = dir.join(CONFIG_FILE);
        if !config_path.exists() {
            return Ok(TomlConfig::default());
        }

        let contents = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", config_path.display()))
    }
}
