use std::process::Command;

use sha2::{Digest, Sha256};

fn git_output(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    Some(String::from_utf8(output.stdout).ok()?.trim().to_string())
}

fn main() {
    // Builds from a release tarball have no git checkout; fall back to the
    // crate version alone.
    let Some(commit) = git_output(&["rev-parse", "HEAD"]) else {
        println!(
            "cargo:rustc-env=CLAUDE_SANDBOX_VERSION_INFO={}",
            env!("CARGO_PKG_VERSION")
        );
        return;
    };

    let date =
        git_output(&["log", "-1", "--format=%cd", "--date=short", "HEAD"]).unwrap_or_default();

    let version = git_output(&["describe", "--tags", "--exact-match", "HEAD"])
        .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string());

    let diff = git_output(&["diff", "HEAD"]).unwrap_or_default();
    let untracked_list =
        git_output(&["ls-files", "--others", "--exclude-standard"]).unwrap_or_default();

    let dirty_suffix = if !diff.is_empty() || !untracked_list.is_empty() {
        let mut hasher = Sha256::new();
        hasher.update(diff.as_bytes());
        for path in untracked_list.lines() {
            hasher.update(path.as_bytes());
            if let Ok(contents) = std::fs::read(path) {
                hasher.update(&contents);
            }
        }
        let hash = hex::encode(hasher.finalize());
        format!("+{}", &hash[..40])
    } else {
        String::new()
    };

    println!("cargo:rustc-env=CLAUDE_SANDBOX_VERSION_INFO={version} {date} {commit}{dirty_suffix}");
}
