//! Clipboard sink backed by a platform clipboard program.
//!
//! The text is piped to the program's stdin. Candidates are tried in
//! order until one starts; the first that starts decides the outcome.

use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};

use tracing::{debug, trace};

use crate::error::{Error, Result};

use super::traits::ClipboardSink;

/// A program invocation: executable plus arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl ClipboardCommand {
    pub fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Split a configured command line on whitespace.
    pub fn parse(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace();
        let program = parts.next()?.to_string();
        Some(Self {
            program,
            args: parts.map(str::to_string).collect(),
        })
    }
}

/// Clipboard sink that shells out to `pbcopy`, `clip`, `wl-copy`, `xclip` or `xsel`.
#[derive(Debug, Clone)]
pub struct CommandClipboard {
    candidates: Vec<ClipboardCommand>,
}

impl CommandClipboard {
    /// Use an explicit command, or detect one for this platform.
    pub fn new(command: Option<&str>) -> Self {
        let candidates = match command.and_then(ClipboardCommand::parse) {
            Some(cmd) => vec![cmd],
            None => platform_candidates(),
        };
        Self { candidates }
    }

    #[cfg(test)]
    pub fn candidates(&self) -> &[ClipboardCommand] {
        &self.candidates
    }

    fn run(&self, cmd: &ClipboardCommand, text: &str) -> std::io::Result<std::process::ExitStatus> {
        let mut child = Command::new(&cmd.program)
            .args(&cmd.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;

        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(text.as_bytes()),
            None => Ok(()),
        };

        // The child must be reaped even when it stops reading early
        if let Err(e) = written {
            let _ = child.kill();
            let _ = child.wait();
            return Err(e);
        }
        child.wait()
    }
}

impl ClipboardSink for CommandClipboard {
    fn name(&self) -> &str {
        "command"
    }

    fn write_text(&self, text: &str) -> Result<()> {
        for cmd in &self.candidates {
            trace!(program = %cmd.program, "Trying clipboard program");
            match self.run(cmd, text) {
                Ok(status) if status.success() => {
                    debug!(program = %cmd.program, "Clipboard program accepted text");
                    return Ok(());
                }
                Ok(status) => {
                    return Err(Error::ClipboardFailed {
                        program: cmd.program.clone(),
                        message: format!("exited with {}", status),
                    });
                }
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => {
                    return Err(Error::ClipboardFailed {
                        program: cmd.program.clone(),
                        message: e.to_string(),
                    });
                }
            }
        }

        Err(Error::ClipboardUnavailable {
            tried: self
                .candidates
                .iter()
                .map(|c| c.program.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        })
    }
}

/// Clipboard programs for the current platform, in preference order.
fn platform_candidates() -> Vec<ClipboardCommand> {
    if cfg!(target_os = "macos") {
        vec![ClipboardCommand::new("pbcopy", &[])]
    } else if cfg!(windows) {
        vec![ClipboardCommand::new("clip", &[])]
    } else {
        let mut candidates = Vec::new();
        if std::env::var_os("WAYLAND_DISPLAY").is_some() {
            candidates.push(ClipboardCommand::new("wl-copy", &[]));
        }
        candidates.push(ClipboardCommand::new("xclip", &["-selection", "clipboard"]));
        candidates.push(ClipboardCommand::new("xsel", &["--clipboard", "--input"]));
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command_line() {
        let cmd = ClipboardCommand::parse("xclip -selection clipboard").unwrap();
        assert_eq!(cmd.program, "xclip");
        assert_eq!(cmd.args, ["-selection", "clipboard"]);

        assert!(ClipboardCommand::parse("   ").is_none());
    }

    #[test]
    fn test_explicit_command_overrides_detection() {
        let sink = CommandClipboard::new(Some("my-copy --quiet"));
        assert_eq!(sink.candidates(), [ClipboardCommand::new("my-copy", &["--quiet"])]);
    }

    #[test]
    fn test_platform_candidates_not_empty() {
        let sink = CommandClipboard::new(None);
        assert!(!sink.candidates().is_empty());
    }

    #[test]
    fn test_missing_program_is_unavailable() {
        let sink = CommandClipboard::new(Some("persona-builder-no-such-clipboard"));
        let err = sink.write_text("hello").unwrap_err();
        assert!(matches!(err, Error::ClipboardUnavailable { .. }));
        assert!(err.to_string().contains("persona-builder-no-such-clipboard"));
    }

    #[cfg(unix)]
    #[test]
    fn test_program_receives_text() {
        let sink = CommandClipboard::new(Some("cat"));
        assert!(sink.write_text("ROLE:\nagent").is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn test_program_that_ignores_input_is_reported() {
        let sink = CommandClipboard::new(Some("true"));
        let text = "x".repeat(1024 * 1024);
        let err = sink.write_text(&text).unwrap_err();
        assert!(matches!(err, Error::ClipboardFailed { ref program, .. } if program == "true"));
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_program_is_reported() {
        let sink = CommandClipboard::new(Some("false"));
        let err = sink.write_text("ROLE:\nagent").unwrap_err();
        assert!(matches!(err, Error::ClipboardFailed { .. }));
    }
}
