//! Common test utilities and fixtures
//!
//! This module provides shared test infrastructure

#![allow(dead_code)]

use std::path::PathBuf;

use assert_cmd::cargo::CommandCargoExt;
use assert_cmd::Command;

/// Get the path to the test fixtures directory
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Get a path to a specific fixture file
pub fn fixture_path(name: &str) -> PathBuf {
    fixtures_dir().join(name)
}

/// Get the valid config fixture path
pub fn valid_config_fixture() -> PathBuf {
    fixture_path("valid_config.toml")
}

/// Get the invalid config fixture path
pub fn invalid_config_fixture() -> PathBuf {
    fixture_path("invalid_config.toml")
}

/// Snapshot of the support agent persona
pub fn support_agent_fixture() -> PathBuf {
    fixture_path("support_agent.json")
}

/// Home directory used by test commands; it never contains a config file
pub fn isolated_home() -> PathBuf {
    fixtures_dir().join("isolated-home")
}

/// A persona-builder process isolated from the user's config and environment
pub fn builder_std_cmd() -> std::process::Command {
    let mut cmd = std::process::Command::cargo_bin("persona-builder").unwrap();
    for var in [
        "PERSONA_BUILDER_CONFIG",
        "PERSONA_BUILDER_EXPORT_DIR",
        "PERSONA_BUILDER_FILE_PREFIX",
        "PERSONA_BUILDER_CLIPBOARD_ENABLED",
        "PERSONA_BUILDER_CLIPBOARD_COMMAND",
        "PERSONA_BUILDER_LOG_LEVEL",
        "PERSONA_BUILDER_LOG_FILE",
        "PERSONA_BUILDER_LOG_JSON",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }

    let home = isolated_home();
    cmd.env("HOME", &home)
        .env("XDG_CONFIG_HOME", home.join(".config"));
    cmd
}

/// [`builder_std_cmd`] wrapped for assert_cmd assertions
pub fn builder_cmd() -> Command {
    Command::from_std(builder_std_cmd())
}
