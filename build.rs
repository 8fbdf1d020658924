use std::env;
use std::process::Command;

/// `name` from the build environment if set and non-empty, else `fallback()`.
fn pinned_or(name: &str, fallback: impl FnOnce() -> Option<String>) -> String {
    println!("cargo:rerun-if-env-changed={name}");
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .or_else(fallback)
        .unwrap_or_else(|| "unknown".into())
}

fn git_short_head() -> Option<String> {
    let out = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()?;
    out.status
        .success()
        .then(|| String::from_utf8_lossy(&out.stdout).trim().to_owned())
        .filter(|s| !s.is_empty())
}

fn main() {
    let version = pinned_or("ROLL_CALL_VERSION", || env::var("CARGO_PKG_VERSION").ok());
    let commit = pinned_or("ROLL_CALL_COMMIT", git_short_head);

    for (key, value) in [("ROLL_CALL_VERSION", version), ("ROLL_CALL_COMMIT", commit)] {
        println!("cargo:rustc-env={key}={value}");
    }
    println!("cargo:rerun-if-changed=.git/HEAD");
}
