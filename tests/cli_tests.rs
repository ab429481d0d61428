//! CLI integration tests
//!
//! Tests the command-line interface using assert_cmd

mod common;

use std::fs;
use std::io::Read;
use std::process::Stdio;

use predicates::prelude::*;
use tempfile::TempDir;

use common::{builder_cmd, builder_std_cmd, support_agent_fixture, valid_config_fixture};

// ─────────────────────────────────────────────────────────────────
// Help and Version Tests
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_help_flag() {
    builder_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("persona-builder"))
        .stdout(predicate::str::contains("prompt"))
        .stdout(predicate::str::contains("export"))
        .stdout(predicate::str::contains("fields"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_version_command() {
    builder_cmd()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("persona-builder"))
        .stdout(predicate::str::contains("Build Information"))
        .stdout(predicate::str::contains("Git Hash"));
}

#[test]
fn test_short_version_flag() {
    builder_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("persona-builder"));
}

// ─────────────────────────────────────────────────────────────────
// Prompt Command Tests
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_prompt_support_agent() {
    let expected = "ROLE:\nYou are a support agent.\n\n\
GENERAL GUIDELINES:\n\n\n\
VOICE SPECIFIC INSTRUCTIONS:\n\n\n\
STYLE:\n\n\n\
CALL FLOW OBJECTIVE:\n\n\n\
OFF SCOPE QUESTIONS:\n\n\n\
USER CONSIDERATIONS:\n\n\n\
CLOSING:\n\n\n\
VOICE SETTINGS:\n- Gender: female\n- Language: english\n";

    builder_cmd()
        .args([
            "prompt",
            "--set",
            "role=You are a support agent.",
            "--set",
            "voice_gender=female",
            "--set",
            "language=english",
        ])
        .assert()
        .success()
        .stdout(expected);
}

#[test]
fn test_prompt_from_snapshot_matches_inline_edits() {
    let from_snapshot = builder_cmd()
        .arg("prompt")
        .arg("--persona")
        .arg(support_agent_fixture())
        .output()
        .unwrap();
    let inline = builder_cmd()
        .args([
            "prompt",
            "-s",
            "role=You are a support agent.",
            "-s",
            "voice_gender=Female",
            "-s",
            "language=ENGLISH",
        ])
        .output()
        .unwrap();

    assert!(from_snapshot.status.success());
    assert_eq!(from_snapshot.stdout, inline.stdout);
}

#[test]
fn test_prompt_empty_persona_keeps_sections() {
    builder_cmd()
        .arg("prompt")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("ROLE:\n\n\nGENERAL GUIDELINES:"))
        .stdout(predicate::str::ends_with("VOICE SETTINGS:\n- Gender: \n- Language: \n"));
}

#[test]
fn test_prompt_set_file() {
    let tmp = TempDir::new().unwrap();
    let style = tmp.path().join("style.txt");
    fs::write(&style, "Warm.\nConcise.\n").unwrap();

    builder_cmd()
        .arg("prompt")
        .arg("--set-file")
        .arg(format!("style={}", style.display()))
        .assert()
        .success()
        .stdout(predicate::str::contains("STYLE:\nWarm.\nConcise.\n\nCALL FLOW OBJECTIVE:"));
}

#[test]
fn test_prompt_edits_apply_in_command_line_order() {
    let tmp = TempDir::new().unwrap();
    let role = tmp.path().join("role.txt");
    fs::write(&role, "From file.\n").unwrap();
    let file_edit = format!("role={}", role.display());

    builder_cmd()
        .args(["prompt", "--set", "role=Inline.", "--set-file", &file_edit])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("ROLE:\nFrom file.\n\n"));

    builder_cmd()
        .args(["prompt", "--set-file", &file_edit, "--set", "role=Inline."])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("ROLE:\nInline.\n\n"));
}

#[cfg(unix)]
#[test]
fn test_prompt_reader_closing_early_is_not_a_crash() {
    let tmp = TempDir::new().unwrap();
    let role = tmp.path().join("role.txt");
    fs::write(&role, "A long role line.\n".repeat(100_000)).unwrap();

    let mut child = builder_std_cmd()
        .arg("prompt")
        .arg("--set-file")
        .arg(format!("role={}", role.display()))
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    let mut stdout = child.stdout.take().unwrap();
    let mut head = [0u8; 6];
    stdout.read_exact(&mut head).unwrap();
    assert_eq!(&head, b"ROLE:\n");
    drop(stdout);

    let output = child.wait_with_output().unwrap();
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(output.status.success(), "exit {:?}: {}", output.status, stderr);
    assert!(!stderr.contains("panicked"));
}

#[test]
fn test_prompt_invalid_choice() {
    builder_cmd()
        .args(["prompt", "--set", "language=klingon"])
        .assert()
        .code(30)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("E301"))
        .stderr(predicate::str::contains("english, spanish"));
}

#[test]
fn test_prompt_unknown_field() {
    builder_cmd()
        .args(["prompt", "--set", "mood=cheerful"])
        .assert()
        .code(30)
        .stderr(predicate::str::contains("E300"))
        .stderr(predicate::str::contains("persona-builder fields"));
}

#[test]
fn test_prompt_malformed_edit() {
    builder_cmd()
        .args(["prompt", "--set", "role"])
        .assert()
        .code(30)
        .stderr(predicate::str::contains("FIELD=VALUE"));
}

#[test]
fn test_prompt_copy_survives_missing_clipboard() {
    builder_cmd()
        .env("PERSONA_BUILDER_CLIPBOARD_COMMAND", "persona-builder-no-such-clipboard")
        .args(["prompt", "--copy", "--set", "role=Agent"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("ROLE:\nAgent\n"))
        .stderr(predicate::str::contains("Clipboard write failed"));
}

#[cfg(unix)]
#[test]
fn test_prompt_copy_with_working_clipboard() {
    builder_cmd()
        .env("PERSONA_BUILDER_CLIPBOARD_COMMAND", "cat")
        .args(["prompt", "--copy", "--set", "role=Agent"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("ROLE:\nAgent\n"))
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_prompt_missing_snapshot() {
    builder_cmd()
        .args(["prompt", "--persona", "/nonexistent/persona.json"])
        .assert()
        .code(20);
}

// ─────────────────────────────────────────────────────────────────
// Export Command Tests
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_export_writes_snapshot() {
    let tmp = TempDir::new().unwrap();

    let output = builder_cmd()
        .arg("export")
        .arg("--persona")
        .arg(support_agent_fixture())
        .arg("--dir")
        .arg(tmp.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let written = String::from_utf8(output.stdout).unwrap();
    let written = written.trim();
    let name = std::path::Path::new(written)
        .file_name()
        .unwrap()
        .to_str()
        .unwrap();
    assert!(name.starts_with("persona-"), "unexpected name {}", name);
    assert!(name.ends_with(".json"));

    let original = fs::read_to_string(support_agent_fixture()).unwrap();
    let exported = fs::read_to_string(written).unwrap();
    assert_eq!(exported, original.trim_end());
}

#[test]
fn test_export_stdout() {
    builder_cmd()
        .args(["export", "--stdout", "--set", "closing=Goodbye."])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("{\n  \"role\": \"\",\n"))
        .stdout(predicate::str::contains("  \"closing\": \"Goodbye.\",\n"))
        .stdout(predicate::str::ends_with("  \"language\": \"\"\n}\n"));
}

#[test]
fn test_export_uses_config_prefix() {
    let tmp = TempDir::new().unwrap();
    let config = tmp.path().join("config.toml");
    fs::write(
        &config,
        format!(
            "[export]\ndir = \"{}\"\nfile_prefix = \"agent\"\n",
            tmp.path().join("out").display()
        ),
    )
    .unwrap();

    builder_cmd()
        .arg("export")
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("agent-"));

    let files: Vec<_> = fs::read_dir(tmp.path().join("out")).unwrap().collect();
    assert_eq!(files.len(), 1);
}

// ─────────────────────────────────────────────────────────────────
// Fields Command Tests
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_fields_lists_all() {
    let assert = builder_cmd().arg("fields").assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();

    for id in [
        "role",
        "general_guidelines",
        "voice_instructions",
        "style",
        "call_flow_objective",
        "off_scope_questions",
        "user_considerations",
        "closing",
        "voice_gender",
        "language",
    ] {
        assert!(stdout.contains(&format!("{} (", id)), "missing {}", id);
    }
    assert!(stdout.contains("values: male (Male), female (Female)"));
    assert!(stdout.contains("values: english (English), spanish (Spanish)"));
}

// ─────────────────────────────────────────────────────────────────
// Config Command Tests
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_config_show_fixture() {
    builder_cmd()
        .arg("config")
        .arg("show")
        .arg("--config")
        .arg(valid_config_fixture())
        .assert()
        .success()
        .stdout(predicate::str::contains("[export]"))
        .stdout(predicate::str::contains("file_prefix = \"agent\""))
        .stdout(predicate::str::contains("[clipboard]"))
        .stdout(predicate::str::contains("[logging]"));
}

#[test]
fn test_config_validate_nonexistent_file() {
    builder_cmd()
        .arg("config")
        .arg("validate")
        .arg("--config")
        .arg("/nonexistent/path/config.toml")
        .assert()
        .code(10)
        .stderr(predicate::str::contains("not found"));
}

// ─────────────────────────────────────────────────────────────────
// Error Handling Tests
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_unknown_command() {
    builder_cmd()
        .arg("unknown-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_missing_subcommand() {
    builder_cmd().assert().failure();
}
