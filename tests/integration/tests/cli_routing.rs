//! CLI binary integration tests.
//!
//! These tests exercise the compiled `lockbox` binary to verify command
//! routing, help text, and error reporting.

use lockbox_integration_tests::lockbox_cmd;
use tempfile::TempDir;

#[test]
fn test_cli_version() {
    let home = TempDir::new().unwrap();
    let output = lockbox_cmd(home.path())
        .arg("version")
        .output()
        .expect("failed to run lockbox");
    assert!(output.status.success(), "version command should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("lockbox"),
        "version output should contain 'lockbox', got: {}",
        stdout
    );
}

#[test]
fn test_cli_help_lists_commands() {
    let home = TempDir::new().unwrap();
    let output = lockbox_cmd(home.path())
        .arg("--help")
        .output()
        .expect("failed to run lockbox");
    assert!(output.status.success(), "--help should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    for command in ["encrypt", "decrypt", "queue", "worker", "config"] {
        assert!(
            stdout.contains(command),
            "help output should mention '{}', got: {}",
            command,
            stdout
        );
    }
}

#[test]
fn test_cli_unknown_command_fails() {
    let home = TempDir::new().unwrap();
    let output = lockbox_cmd(home.path())
        .arg("frobnicate")
        .output()
        .expect("failed to run lockbox");
    assert!(!output.status.success());
}

#[test]
fn test_cli_encrypt_then_decrypt() {
    let home = TempDir::new().unwrap();
    let output = lockbox_cmd(home.path())
        .args(["encrypt", "--value", "p@ssw0rd!"])
        .env("LOCKBOX_PASSPHRASE", "secret123")
        .output()
        .expect("failed to run lockbox");
    assert!(output.status.success(), "encrypt should succeed");

    let envelope = String::from_utf8_lossy(&output.stdout).trim().to_string();
    let lengths: Vec<usize> = envelope.split(':').map(str::len).collect();
    assert_eq!(lengths, vec![24, 32, 32, 18]);

    let output = lockbox_cmd(home.path())
        .args(["decrypt", &envelope, "--passphrase", "secret123"])
        .output()
        .expect("failed to run lockbox");
    assert!(output.status.success(), "decrypt should succeed");
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "p@ssw0rd!");
}

#[test]
fn test_cli_decrypt_wrong_passphrase_fails() {
    let home = TempDir::new().unwrap();
    let envelope = "a0a1a2a3a4a5a6a7a8a9aaab:000102030405060708090a0b0c0d0e0f:\
                    47c90de999bd5392f6d3c7c55a1c03e4:d65591d6f09b27f89c";
    let output = lockbox_cmd(home.path())
        .args(["decrypt", envelope, "--passphrase", "wrongpass"])
        .output()
        .expect("failed to run lockbox");
    assert!(!output.status.success());
    assert!(output.stdout.is_empty(), "no plaintext may be printed");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("authentication failed"), "got: {}", stderr);
}

#[test]
fn test_cli_config_path_uses_home() {
    let home = TempDir::new().unwrap();
    let output = lockbox_cmd(home.path())
        .args(["config", "path"])
        .output()
        .expect("failed to run lockbox");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.trim().ends_with("lockbox.json5"), "got: {}", stdout);
    assert!(
        stdout.contains(&*home.path().to_string_lossy()),
        "got: {}",
        stdout
    );
}

#[test]
fn test_cli_config_validate_reports_errors() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("bad.json5");
    std::fs::write(&path, "{ queue: { url: 'http://localhost:6379' } }").unwrap();

    let output = lockbox_cmd(home.path())
        .args(["config", "validate"])
        .arg("--config")
        .arg(&path)
        .output()
        .expect("failed to run lockbox");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Queue url"), "got: {}", stderr);
}

#[test]
fn test_cli_config_show_redacts_password() {
    let home = TempDir::new().unwrap();
    let output = lockbox_cmd(home.path())
        .args(["config", "show"])
        .env("REDIS_USER", "worker")
        .env("REDIS_PASSWORD", "hunter2")
        .output()
        .expect("failed to run lockbox");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("hunter2"));
    assert!(stdout.contains("\"username\": \"worker\""), "got: {}", stdout);
}
