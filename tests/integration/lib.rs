//! Shared helpers for the Lockbox integration tests.

use std::path::{Path, PathBuf};
use std::process::Command;

/// Locate the compiled `lockbox` binary.
///
/// Looks in `$CARGO_TARGET_DIR/debug` when set, otherwise in the workspace
/// `target/debug` directory.
pub fn lockbox_bin() -> PathBuf {
    let target = match std::env::var_os("CARGO_TARGET_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => workspace_root().join("target"),
    };
    let bin = target.join("debug").join(format!("lockbox{}", std::env::consts::EXE_SUFFIX));
    assert!(
        bin.exists(),
        "lockbox binary not found at {}; run `cargo build -p lockbox-cli` first",
        bin.display()
    );
    bin
}

/// `lockbox` command isolated from the caller's environment.
///
/// Runs in `home` (so no stray `.env` is picked up) with `LOCKBOX_HOME`
/// pointing there too.
pub fn lockbox_cmd(home: &Path) -> Command {
    let mut cmd = Command::new(lockbox_bin());
    cmd.current_dir(home)
        .env("LOCKBOX_HOME", home)
        .env_remove("LOCKBOX_CONFIG")
        .env_remove("LOCKBOX_PASSPHRASE")
        .env_remove("LOCKBOX_QUEUE_NAMESPACE")
        .env_remove("REDIS_URL")
        .env_remove("REDIS_USER")
        .env_remove("REDIS_PASSWORD")
        .env_remove("FRONTEND_URL")
        .env_remove("RUST_LOG");
    cmd
}

fn workspace_root() -> PathBuf {
    // tests/integration -> workspace root
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(Path::parent)
        .map(Path::to_path_buf)
        .unwrap_or(manifest_dir)
}
