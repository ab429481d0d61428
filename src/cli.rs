//! CLI argument parsing using clap v4
//!
//! Defines the command-line interface for persona-builder.

use std::ffi::OsString;

use clap::{ArgMatches, Args, CommandFactory, FromArgMatches, Parser, Subcommand};

/// persona-builder - Build AI conversational personas
///
/// Fill in the persona fields with --set, then render them as a system
/// prompt or export them as a JSON snapshot.
#[derive(Parser, Debug)]
#[command(name = "persona-builder")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate the system prompt for a persona
    Prompt {
        #[command(flatten)]
        persona: PersonaArgs,

        /// Also copy the prompt to the clipboard
        #[arg(long)]
        copy: bool,

        /// Path to configuration file
        #[arg(short, long, env = "PERSONA_BUILDER_CONFIG")]
        config: Option<String>,
    },

    /// Export a persona as a JSON snapshot
    Export {
        #[command(flatten)]
        persona: PersonaArgs,

        /// Directory to write the snapshot into (overrides export.dir)
        #[arg(short, long)]
        dir: Option<String>,

        /// Print the snapshot to stdout instead of writing a file
        #[arg(long, conflicts_with = "dir")]
        stdout: bool,

        /// Path to configuration file
        #[arg(short, long, env = "PERSONA_BUILDER_CONFIG")]
        config: Option<String>,
    },

    /// List the persona fields and their accepted values
    Fields,

    /// Display version and build information
    Version,

    /// Configuration management
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

/// Field edits shared by `prompt` and `export`
#[derive(Args, Debug, Clone, Default)]
pub struct PersonaArgs {
    /// Start from a previously exported snapshot
    #[arg(short, long, value_name = "FILE")]
    pub persona: Option<String>,

    /// Set a field, e.g. --set role="You are a support agent." (repeatable)
    #[arg(short = 's', long = "set", value_name = "FIELD=VALUE")]
    pub set: Vec<String>,

    /// Set a field from a file's contents (repeatable)
    #[arg(long = "set-file", value_name = "FIELD=PATH")]
    pub set_file: Vec<String>,

    /// Which flag each edit came from, in command-line order
    #[arg(skip)]
    pub order: Vec<EditSource>,
}

/// Flag an edit was given with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditSource {
    Inline,
    File,
}

/// One raw `--set` or `--set-file` argument
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditArg<'a> {
    Inline(&'a str),
    File(&'a str),
}

impl PersonaArgs {
    /// All edits in the order they were given.
    ///
    /// Edits with no recorded position keep file edits ahead of inline ones.
    pub fn edits(&self) -> Vec<EditArg<'_>> {
        let mut inline = self.set.iter();
        let mut files = self.set_file.iter();

        let mut edits: Vec<EditArg<'_>> = self
            .order
            .iter()
            .filter_map(|source| match source {
                EditSource::Inline => inline.next().map(|s| EditArg::Inline(s)),
                EditSource::File => files.next().map(|s| EditArg::File(s)),
            })
            .collect();
        edits.extend(files.map(|s| EditArg::File(s)));
        edits.extend(inline.map(|s| EditArg::Inline(s)));
        edits
    }
}

impl Cli {
    /// Parse the process arguments, keeping the relative order of field edits
    pub fn parse_ordered() -> Self {
        Self::parse_ordered_from(std::env::args_os())
    }

    pub fn parse_ordered_from<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = Self::command().get_matches_from(args);
        let mut cli = match Self::from_arg_matches(&matches) {
            Ok(cli) => cli,
            Err(e) => e.format(&mut Self::command()).exit(),
        };

        if let Commands::Prompt { persona, .. } | Commands::Export { persona, .. } = &mut cli.command {
            if let Some((_, sub)) = matches.subcommand() {
                persona.order = edit_order(sub);
            }
        }
        cli
    }
}

/// Sort `--set` and `--set-file` occurrences by argument index
fn edit_order(matches: &ArgMatches) -> Vec<EditSource> {
    let mut tagged: Vec<(usize, EditSource)> = Vec::new();
    for (id, source) in [("set", EditSource::Inline), ("set_file", EditSource::File)] {
        if let Some(indices) = matches.indices_of(id) {
            tagged.extend(indices.map(|i| (i, source)));
        }
    }
    tagged.sort_by_key(|(index, _)| *index);
    tagged.into_iter().map(|(_, source)| source).collect()
}

/// Configuration subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigSubcommand {
    /// Display the current configuration
    Show {
        /// Path to configuration file
        #[arg(short, long)]
        config: Option<String>,
    },

    /// Initialize a new configuration file
    Init {
        /// Path where to create the config file
        #[arg(short, long)]
        path: Option<String>,

        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Validate a configuration file
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        config: Option<String>,
    },
}
