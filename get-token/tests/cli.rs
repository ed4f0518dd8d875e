use httpmock::Method::POST;
use httpmock::MockServer;
use std::path::Path;
use std::process::{Command, Output};

const KEY_FILE: &str = include_str!("../../auth/testdata/service-account.json");

fn key_file(dir: &Path, token_uri: &str) -> std::path::PathBuf {
    let mut key = serde_json::from_str::<serde_json::Value>(KEY_FILE).unwrap();
    key["token_uri"] = token_uri.into();
    let path = dir.join("valid-key.json");
    std::fs::write(&path, serde_json::to_vec(&key).unwrap()).unwrap();
    path
}

fn get_token(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_get-token"))
        .args(args)
        .current_dir(dir)
        .env_remove("GOOGLE_APPLICATION_CREDENTIALS")
        .env_remove("SCOPES")
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

#[test]
fn test_prints_token() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/token")
            .form_urlencoded_tuple("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer");
        then.status(200).json_body(serde_json::json!({
            "access_token": "ya29.c.b0AXv0zTN",
            "expires_in": 3599,
            "token_type": "Bearer",
        }));
    });
    let dir = tempfile::tempdir().unwrap();
    let path = key_file(dir.path(), &server.url("/token"));

    let output = get_token(dir.path(), &["--key-file", path.to_str().unwrap()]);

    assert!(output.status.success(), "{output:?}");
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "ya29.c.b0AXv0zTN\n");
    mock.assert_calls(1);
}

#[test]
fn test_key_file_from_env() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/token");
        then.status(200).json_body(serde_json::json!({
            "access_token": "ya29.from-env",
            "expires_in": 3599,
        }));
    });
    let dir = tempfile::tempdir().unwrap();
    let path = key_file(dir.path(), &server.url("/token"));

    let output = Command::new(env!("CARGO_BIN_EXE_get-token"))
        .current_dir(dir.path())
        .env("GOOGLE_APPLICATION_CREDENTIALS", &path)
        .env("SCOPES", "https://example.com/a,,https://example.com/b,")
        .env_remove("RUST_LOG")
        .output()
        .unwrap();

    assert!(output.status.success(), "{output:?}");
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "ya29.from-env\n");
    mock.assert_calls(1);
}

#[test]
fn test_missing_key_file() {
    let dir = tempfile::tempdir().unwrap();

    let output = get_token(dir.path(), &["--key-file", "missing.json"]);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("missing.json"));
}

#[test]
fn test_default_key_file_is_missing() {
    let dir = tempfile::tempdir().unwrap();

    let output = get_token(dir.path(), &[]);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("key.json"));
}

#[test]
fn test_rejected_key() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/token");
        then.status(400).json_body(serde_json::json!({
            "error": "invalid_grant",
            "error_description": "Invalid JWT Signature.",
        }));
    });
    let dir = tempfile::tempdir().unwrap();
    let path = key_file(dir.path(), &server.url("/token"));

    let output = get_token(dir.path(), &["--key-file", path.to_str().unwrap()]);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid_grant"));
    mock.assert_calls(1);
}

#[test]
fn test_blank_scope_makes_no_request() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/token");
        then.status(200).json_body(serde_json::json!({
            "access_token": "ya29.unused",
            "expires_in": 3599,
        }));
    });
    let dir = tempfile::tempdir().unwrap();
    let path = key_file(dir.path(), &server.url("/token"));

    let output = get_token(
        dir.path(),
        &["--key-file", path.to_str().unwrap(), "--scope", ""],
    );

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("scope"));
    mock.assert_calls(0);
}
