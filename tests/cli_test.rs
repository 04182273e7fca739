//! Integration tests for the campfire binary.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use httpmock::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const SHA: &str = "1234567890abcdef1234567890abcdef12345678";

const TEMPLATE: &str = r#"
kind: Template
parameters:
  - name: IMAGE_TAG
  - name: ENV_NAME
objects:
  - kind: ClowdApp
    metadata:
      name: rbac
    spec:
      envName: ${ENV_NAME}
      deployments:
        - name: service
          podSpec:
            image: quay.io/cloudservices/rbac:${IMAGE_TAG}
"#;

fn write_registry(temp: &TempDir, content: &str) -> PathBuf {
    let path = temp.path().join("config.yml");
    fs::write(&path, content).unwrap();
    path
}

fn registry_for(server: &MockServer) -> String {
    format!(
        r#"
apps:
  - name: rbac
    host: github
    repo: RedHatInsights/insights-rbac
    path: deploy/rbac-clowdapp.yml
  - name: advisor
    host: gitlab
    repo: insights-platform/advisor
    path: deploy/clowdapp.yaml
settings:
  github:
    apiUrl: {base}
    rawUrl: {base}/raw
"#,
        base = server.base_url()
    )
}

fn campfire() -> Command {
    let mut cmd = Command::new(cargo_bin("campfire"));
    cmd.env_remove("CAMPFIRE_CONFIG").env_remove("RUST_LOG");
    cmd
}

fn mock_rbac(server: &MockServer) {
    server.mock(|when, then| {
        when.method(GET)
            .path("/repos/RedHatInsights/insights-rbac/git/refs/heads/master");
        then.status(200)
            .json_body(serde_json::json!({ "object": { "sha": SHA } }));
    });
    server.mock(|when, then| {
        when.method(GET).path(format!(
            "/raw/RedHatInsights/insights-rbac/{}/deploy/rbac-clowdapp.yml",
            SHA
        ));
        then.status(200).body(TEMPLATE);
    });
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = campfire();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("process"))
        .stdout(predicate::str::contains("completions"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = campfire();
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn cli_process_requires_namespace() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = campfire();
    cmd.args(["process", "rbac"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("--namespace"));
    Ok(())
}

#[test]
fn cli_lists_apps() -> Result<(), Box<dyn std::error::Error>> {
    let server = MockServer::start();
    let temp = TempDir::new()?;
    let path = write_registry(&temp, &registry_for(&server));

    let mut cmd = campfire();
    cmd.arg("--no-color").arg("--config").arg(&path).arg("apps");
    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("advisor"))
        .stdout(predicate::str::contains(
            "rbac  github RedHatInsights/insights-rbac:deploy/rbac-clowdapp.yml",
        ));
    Ok(())
}

#[test]
fn cli_reads_config_from_env() -> Result<(), Box<dyn std::error::Error>> {
    let server = MockServer::start();
    let temp = TempDir::new()?;
    let path = write_registry(&temp, &registry_for(&server));

    let mut cmd = campfire();
    cmd.env("CAMPFIRE_CONFIG", &path).args(["apps", "--names-only"]);
    cmd.assert().success().stdout("advisor\nrbac\n");
    Ok(())
}

#[test]
fn cli_missing_config_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let mut cmd = campfire();
    cmd.arg("--config")
        .arg(temp.path().join("absent.yml"))
        .args(["process", "rbac", "-n", "ns"]);
    cmd.assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("absent.yml"));
    Ok(())
}

#[test]
fn cli_process_unknown_app_fails() -> Result<(), Box<dyn std::error::Error>> {
    let server = MockServer::start();
    let temp = TempDir::new()?;
    let path = write_registry(&temp, &registry_for(&server));

    let mut cmd = campfire();
    cmd.arg("--config")
        .arg(&path)
        .args(["process", "missing", "--namespace", "ns"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("app missing not found in local config"));
    Ok(())
}

#[test]
fn cli_process_prints_json_list() -> Result<(), Box<dyn std::error::Error>> {
    let server = MockServer::start();
    mock_rbac(&server);
    let temp = TempDir::new()?;
    let path = write_registry(&temp, &registry_for(&server));

    let mut cmd = campfire();
    cmd.arg("--config")
        .arg(&path)
        .args(["process", "rbac", "--namespace", "ephemeral-02", "--timeout", "10"]);
    let output = cmd.assert().success().get_output().stdout.clone();

    let list: serde_json::Value = serde_json::from_slice(&output)?;
    assert_eq!(list["kind"], "List");
    assert_eq!(list["items"][0]["spec"]["envName"], "env-ephemeral-02");
    assert_eq!(
        list["items"][0]["spec"]["deployments"][0]["podSpec"]["image"],
        "quay.io/cloudservices/rbac:1234567"
    );
    Ok(())
}

#[test]
fn cli_process_prints_yaml_and_logs_to_stderr() -> Result<(), Box<dyn std::error::Error>> {
    let server = MockServer::start();
    mock_rbac(&server);
    let temp = TempDir::new()?;
    let path = write_registry(&temp, &registry_for(&server));

    let mut cmd = campfire();
    cmd.arg("--config")
        .arg(&path)
        .args(["process", "rbac", "-n", "ns", "-o", "yaml"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("kind: List"))
        .stderr(predicate::str::contains("processing app 'rbac'"));
    Ok(())
}

#[test]
fn cli_generates_completions() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = campfire();
    cmd.args(["completions", "bash"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("campfire"));
    Ok(())
}
