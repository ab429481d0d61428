//! Build script for persona-builder
//!
//! Embeds git revision, build timestamp, target, profile and compiler
//! version so `persona-builder version` can report them.

use std::env;
use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/index");

    let git_hash = run(&["git", "rev-parse", "--short=8", "HEAD"]);
    let git_branch = run(&["git", "rev-parse", "--abbrev-ref", "HEAD"]);
    let git_dirty = match run(&["git", "status", "--porcelain"]).as_deref() {
        Some("") => "false",
        Some(_) => "true",
        None => "unknown",
    };

    let vars = [
        ("GIT_HASH", git_hash.unwrap_or_else(unknown)),
        ("GIT_BRANCH", git_branch.unwrap_or_else(unknown)),
        ("GIT_DIRTY", git_dirty.to_string()),
        (
            "BUILD_TIMESTAMP",
            chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        ),
        ("TARGET", env::var("TARGET").unwrap_or_else(|_| unknown())),
        ("PROFILE", env::var("PROFILE").unwrap_or_else(|_| unknown())),
        ("RUSTC_VERSION", run(&["rustc", "--version"]).unwrap_or_else(unknown)),
    ];

    for (key, value) in vars {
        println!("cargo:rustc-env=PERSONA_BUILDER_{}={}", key, value);
    }
}

/// Run a command and return its trimmed stdout if it succeeded
fn run(argv: &[&str]) -> Option<String> {
    let output = Command::new(argv[0]).args(&argv[1..]).output().ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout)
        .ok()
        .map(|s| s.trim().to_string())
}

fn unknown() -> String {
    "unknown".to_string()
}
