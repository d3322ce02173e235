//! Engine and image failures get distinct exit codes and never leave a
//! container behind.

use super::common::{
    FakeDocker, STUB_INSPECT_EXIT_ENV, STUB_PULL_EXIT_ENV, STUB_VERSION_EXIT_ENV, TestProject,
    sandbox_command,
};

#[test]
fn unresponsive_engine_exits_3_without_creating_anything() {
    let docker = FakeDocker::new();
    let project = TestProject::new();

    let output = sandbox_command(&project, &docker)
        .env(STUB_VERSION_EXIT_ENV, "1")
        .output()
        .expect("failed to run claude-sandbox");

    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("engine unavailable"), "got: {stderr}");

    assert!(docker.invocations_of("create").is_empty());
    assert!(docker.invocations_of("rm").is_empty());
}

#[test]
fn missing_docker_cli_exits_3() {
    let docker = FakeDocker::new();
    let project = TestProject::new();
    let empty = tempfile::TempDir::new().unwrap();

    let output = sandbox_command(&project, &docker)
        .env("PATH", empty.path())
        .output()
        .expect("failed to run claude-sandbox");

    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn failed_pull_exits_4_and_names_the_image() {
    let docker = FakeDocker::new();
    let project = TestProject::new();

    let output = sandbox_command(&project, &docker)
        .env(STUB_INSPECT_EXIT_ENV, "1")
        .env(STUB_PULL_EXIT_ENV, "1")
        .output()
        .expect("failed to run claude-sandbox");

    assert_eq!(output.status.code(), Some(4));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("node:22-bookworm"), "got: {stderr}");
    assert!(stderr.contains("manifest unknown"), "got: {stderr}");

    assert!(docker.invocations_of("create").is_empty());
    assert!(docker.invocations_of("rm").is_empty());
}

#[test]
fn image_present_locally_is_not_pulled() {
    let docker = FakeDocker::new();
    let project = TestProject::new();

    let output = sandbox_command(&project, &docker)
        .output()
        .expect("failed to run claude-sandbox");

    assert_eq!(output.status.code(), Some(0));
    assert!(docker.invocations_of("pull").is_empty());
}

#[test]
fn absent_image_is_pulled_before_create() {
    let docker = FakeDocker::new();
    let project = TestProject::new();

    let output = sandbox_command(&project, &docker)
        .env(STUB_INSPECT_EXIT_ENV, "1")
        .output()
        .expect("failed to run claude-sandbox");

    assert_eq!(output.status.code(), Some(0));

    let lines = docker.invocations();
    let pull_pos = lines.iter().position(|l| l.starts_with("pull")).unwrap();
    let create_pos = lines.iter().position(|l| l.starts_with("create")).unwrap();
    assert!(pull_pos < create_pos);
}
