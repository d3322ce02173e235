//! Lifecycle supervision of the running container.
//!
//! Attaches the created container to the caller's terminal and blocks until
//! it exits. SIGINT/SIGTERM during the wait are forwarded as a container
//! stop; the attached process then exits on its own and its exit code is
//! propagated. The caller's `ContainerHandle` is consumed here, so its drop
//! removes the container whether supervision returns normally, errors or
//! unwinds.

use std::future::Future;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use log::info;
use tokio::runtime::Runtime;
use tokio::signal::unix::{SignalKind, signal};

use crate::docker;
use crate::launch::ContainerHandle;

// The async machinery is only needed for the select over {child exit,
// signals}; everything around it stays synchronous.
static RUNTIME: LazyLock<Runtime> =
    LazyLock::new(|| Runtime::new().expect("Failed to create tokio runtime"));

fn block_on<F: Future>(future: F) -> F::Output {
    RUNTIME.block_on(future)
}

/// Wait for the container to finish and return its exit code. The container
/// is removed when `handle` is dropped, on every path out of this function.
pub fn supervise(handle: ContainerHandle) -> Result<i32> {
    block_on(wait_attached(handle.id()))
}

async fn wait_attached(id: &str) -> Result<i32> {
    // Handlers must be in place before the attach starts; a signal landing
    // in between would kill us with the container still present.
    let mut sigint = signal(SignalKind::interrupt()).context("Failed to install SIGINT handler")?;
    let mut sigterm =
        signal(SignalKind::terminate()).context("Failed to install SIGTERM handler")?;
    let mut stopping = false;

    // Inherited stdio: interactive pass-through, not buffered.
    let mut child = tokio::process::Command::new("docker")
        .args(["start", "-ai", id])
        .spawn()
        .context("Failed to attach to container")?;

    loop {
        tokio::select! {
            status = child.wait() => {
                let status = status.context("Failed to wait for the attached container")?;
                return Ok(exit_code_of(status));
            }
            _ = sigint.recv() => {
                forward_stop(id, "SIGINT", &mut stopping);
            }
            _ = sigterm.recv() => {
                forward_stop(id, "SIGTERM", &mut stopping);
            }
        }
    }
}

/// Ask the engine to stop the container once; repeated signals while the
/// stop is in flight are ignored. The attached child exits when the
/// container does, which ends the select loop.
fn forward_stop(id: &str, signal_name: &str, stopping: &mut bool) {
    if *stopping {
        return;
    }
    *stopping = true;
    info!("Received {signal_name}, stopping the sandbox container");

    let id = id.to_string();
    tokio::task::spawn_blocking(move || {
        let _ = docker::stop_container(&id);
    });
}

/// Map an exit status to a process exit code. A status without a code means
/// the attached CLI was killed by a signal; follow the shell convention of
/// 128 + signal number.
fn exit_code_of(status: std::process::ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;

    match status.code() {
        Some(code) => code,
        None => 128 + status.signal().unwrap_or(1),
    }
}
