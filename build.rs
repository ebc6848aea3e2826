//! Build script for the HRIS admin console
//!
//! Embeds git revision, build time, target and compiler version as
//! `HRIS_*` compile-time environment variables (read by `src/version.rs`).

use std::env;
use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/index");

    let git_hash = command_stdout("git", &["rev-parse", "--short=8", "HEAD"]);
    let git_branch = command_stdout("git", &["rev-parse", "--abbrev-ref", "HEAD"]);
    let git_dirty = match Command::new("git").args(["status", "--porcelain"]).output() {
        Ok(output) if output.status.success() => (!output.stdout.is_empty()).to_string(),
        _ => "unknown".to_string(),
    };

    let vars = [
        ("HRIS_GIT_HASH", git_hash),
        ("HRIS_GIT_BRANCH", git_branch),
        ("HRIS_GIT_DIRTY", git_dirty),
        (
            "HRIS_BUILD_TIMESTAMP",
            chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        ),
        ("HRIS_TARGET", env_or_unknown("TARGET")),
        ("HRIS_PROFILE", env_or_unknown("PROFILE")),
        ("HRIS_RUSTC_VERSION", command_stdout("rustc", &["--version"])),
    ];

    for (name, value) in &vars {
        println!("cargo:rustc-env={}={}", name, value);
    }
}

fn env_or_unknown(name: &str) -> String {
    env::var(name).unwrap_or_else(|_| "unknown".to_string())
}

/// Trimmed stdout of a successful command, "unknown" otherwise
fn command_stdout(program: &str, args: &[&str]) -> String {
    Command::new(program)
        .args(args)
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
