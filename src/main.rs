//! persona-builder - Build AI conversational personas
//!
//! Collects the ten persona fields from the command line, then renders
//! them into a system prompt or exports them as a JSON snapshot.

mod cli;
mod config;
mod error;
mod export;
mod logging;
mod persona;
mod prompt;
mod sink;
mod version;

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::cli::{Cli, Commands, ConfigSubcommand, EditArg, PersonaArgs};
use crate::config::BuilderConfig;
use crate::error::{Error, Result};
use crate::export::EXPORT_CLOCK;
use crate::persona::{FieldCatalog, FieldEdit, PersonaField, PersonaStore};
use crate::sink::{CommandClipboard, DirectorySink, DownloadSink};

fn main() {
    // Parse CLI arguments first (before logging, so we know verbosity)
    let cli = Cli::parse_ordered();

    if let Err(e) = run(cli) {
        eprint!("{}", e.format_for_terminal());
        std::process::exit(e.exit_code());
    }
}

fn run(cli: Cli) -> Result<()> {
    // Commands that don't need the configuration
    let config_path = match &cli.command {
        Commands::Version => {
            return write_stdout(&version::BuildInfo::current().to_string());
        }
        Commands::Fields => {
            return write_stdout(&render_fields());
        }
        Commands::Config { subcommand } => {
            logging::init_simple(tracing::Level::WARN)?;
            return handle_config_command(subcommand.clone());
        }
        Commands::Prompt { config, .. } | Commands::Export { config, .. } => config.clone(),
    };

    let config = BuilderConfig::load(config_path.as_deref())?;

    // The guards must be kept alive for the lifetime of the program
    let _log_guards = logging::init_logging(&config.logging, cli.verbose, cli.quiet)?;

    let build = version::BuildInfo::current();
    debug!(version = %build.full_version(), "Starting persona-builder");

    match cli.command {
        Commands::Prompt { persona, copy, .. } => run_prompt(&config, &persona, copy),
        Commands::Export {
            persona,
            dir,
            stdout,
            ..
        } => run_export(&config, &persona, dir.as_deref(), stdout),
        Commands::Version | Commands::Fields | Commands::Config { .. } => {
            // Already handled above
            unreachable!()
        }
    }
}

/// Build the session store from a snapshot and the command-line edits
fn build_store(args: &PersonaArgs) -> Result<PersonaStore> {
    let mut store = match args.persona {
        Some(ref path) => PersonaStore::open(Path::new(&config::expand_path(path)))?,
        None => PersonaStore::new(),
    };

    let edits = args
        .edits()
        .into_iter()
        .map(|arg| match arg {
            EditArg::Inline(arg) => arg.parse::<FieldEdit>(),
            EditArg::File(arg) => read_file_edit(arg),
        })
        .collect::<Result<Vec<_>>>()?;

    store.apply_all(&edits)?;
    debug!(
        edits = store.edit_count(),
        empty = store.record().is_empty(),
        "Persona assembled"
    );
    Ok(store)
}

/// Parse `FIELD=PATH` and read the value from the file
fn read_file_edit(arg: &str) -> Result<FieldEdit> {
    let (name, path) = arg
        .split_once('=')
        .filter(|(name, path)| !name.trim().is_empty() && !path.is_empty())
        .ok_or_else(|| Error::malformed_edit(arg))?;
    let field: PersonaField = name.parse()?;

    let path = PathBuf::from(config::expand_path(path));
    let content = fs::read_to_string(&path).map_err(|e| Error::IoRead {
        path: path.clone(),
        source: e,
    })?;

    Ok(FieldEdit::new(field, strip_line_ending(&content)))
}

/// Drop a single trailing line ending left by editors
fn strip_line_ending(content: &str) -> &str {
    content
        .strip_suffix("\r\n")
        .or_else(|| content.strip_suffix('\n'))
        .unwrap_or(content)
}

fn run_prompt(config: &BuilderConfig, args: &PersonaArgs, copy: bool) -> Result<()> {
    let store = build_store(args)?;
    let document = prompt::generate_system_prompt(store.record());

    write_stdout(&format!("{}\n", document))?;

    if copy {
        if config.clipboard.enabled {
            let clipboard = CommandClipboard::new(config.clipboard.command.as_deref());
            sink::copy_best_effort(&clipboard, &document);
        } else {
            info!("Clipboard disabled in configuration, skipping copy");
        }
    }

    Ok(())
}

fn run_export(
    config: &BuilderConfig,
    args: &PersonaArgs,
    dir: Option<&str>,
    to_stdout: bool,
) -> Result<()> {
    let store = build_store(args)?;
    let artifact = export::export_snapshot(
        &store.snapshot(),
        &EXPORT_CLOCK,
        &config.export.file_prefix,
    )?;

    if to_stdout {
        return write_stdout(&format!("{}\n", artifact.contents));
    }

    let target = dir
        .map(|d| PathBuf::from(config::expand_path(d)))
        .unwrap_or_else(|| config.export_dir());
    let sink = DirectorySink::new(target);
    debug!(sink = sink.name(), dir = %sink.dir().display(), "Saving export");

    let path = sink.save(&artifact)?;
    write_stdout(&format!("{}\n", path.display()))
}

/// Write command output to stdout. A reader that hangs up early ends the
/// command quietly.
fn write_stdout(text: &str) -> Result<()> {
    let mut out = io::stdout().lock();
    match out.write_all(text.as_bytes()).and_then(|_| out.flush()) {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
            debug!("stdout closed before output was written");
            Ok(())
        }
        result => result.map_err(Error::Io),
    }
}

/// Render the field catalog
fn render_fields() -> String {
    let mut text = String::new();
    for listing in FieldCatalog::new().list() {
        text.push_str(&format!("{} ({})\n", listing.field.id(), listing.title));
        text.push_str(&format!("    {}\n", listing.description));
        if let Some(example) = listing.placeholder {
            text.push_str(&format!("    e.g. {}\n", example));
        }
        if listing.field.is_choice() {
            let values: Vec<String> = listing
                .choices
                .iter()
                .zip(&listing.labels)
                .map(|(value, label)| format!("{} ({})", value, label))
                .collect();
            text.push_str(&format!("    values: {}\n", values.join(", ")));
        }
    }
    text
}

/// Handle configuration subcommands
fn handle_config_command(subcommand: ConfigSubcommand) -> Result<()> {
    match subcommand {
        ConfigSubcommand::Show { config } => {
            let cfg = BuilderConfig::load(config.as_deref())?;
            write_stdout(&format!("{}\n", toml::to_string_pretty(&cfg)?))
        }
        ConfigSubcommand::Init { path, force } => {
            let written = config::init_config(path.as_deref(), force)?;
            write_stdout(&format!("Configuration file created: {}\n", written.display()))
        }
        ConfigSubcommand::Validate { config } => {
            BuilderConfig::load(config.as_deref())?;
            write_stdout("Configuration is valid.\n")
        }
    }
}
