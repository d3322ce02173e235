//! `.claude-sandbox.toml` overrides observed end to end.

use indoc::indoc;

use super::common::{FakeDocker, TestProject, sandbox_command};

#[test]
fn custom_image_runs_claude_directly() {
    let docker = FakeDocker::new();
    let project = TestProject::new();
    project.write_config(indoc! {r#"
        image = "ghcr.io/example/claude:latest"
    "#});

    let output = sandbox_command(&project, &docker)
        .arg("--resume")
        .output()
        .expect("failed to run claude-sandbox");
    assert_eq!(output.status.code(), Some(0));

    let create = docker.invocations_of("create").remove(0);
    assert!(create.ends_with("ghcr.io/example/claude:latest claude --resume"));
    assert!(!create.contains("npx"));
}

#[test]
fn env_passthrough_forwards_names_only() {
    let docker = FakeDocker::new();
    let project = TestProject::new();
    project.write_config(indoc! {r#"
        env-passthrough = ["ANTHROPIC_MODEL"]
    "#});

    let output = sandbox_command(&project, &docker)
        .env("ANTHROPIC_MODEL", "claude-opus-4-5")
        .output()
        .expect("failed to run claude-sandbox");
    assert_eq!(output.status.code(), Some(0));

    let create = docker.invocations_of("create").remove(0);
    assert!(create.contains("-e ANTHROPIC_API_KEY"));
    assert!(create.contains("-e ANTHROPIC_MODEL"));
    assert!(!create.contains("claude-opus-4-5"));
}

#[test]
fn malformed_config_fails_with_the_file_named() {
    let docker = FakeDocker::new();
    let project = TestProject::new();
    project.write_config("image = [not toml\n");

    let output = sandbox_command(&project, &docker)
        .output()
        .expect("failed to run claude-sandbox");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains(".claude-sandbox.toml"), "got: {stderr}");
    assert!(docker.invocations().is_empty());
}
