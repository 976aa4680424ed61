//! bagdupe - Manifest-driven duplicate finder for BagIt bags
//!
//! Reads the payload manifest of a bag, groups files by recorded hash and
//! plans the removal of every copy but one. A remote manifest can demote
//! local copies of content that already exists elsewhere. Plans are either
//! reported or executed.

pub mod actions;
pub mod bag;
pub mod cli;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod manifest;
pub mod output;
pub mod progress;

use std::io::{self, Write};

use anyhow::{Context, Result};

use crate::actions::execute_plan;
use crate::cli::{BagArgs, Cli, Commands, DedupeArgs, GroupsArgs};
use crate::config::Config;
use crate::duplicates::{DedupeConfig, DuplicateFinder, ExecutionMode, FinderResult};
use crate::error::ExitCode;
use crate::manifest::MalformedLinePolicy;
use crate::output::{JsonOutput, OutputFormat, ScriptOutput, ScriptType};
use crate::progress::Progress;

/// Run the application for parsed CLI arguments.
///
/// Initializes logging, loads the configuration and dispatches the
/// subcommand. Reports go to stdout, everything else to stderr.
///
/// # Errors
///
/// Returns an error for any fatal condition: missing bag or manifest,
/// malformed manifest under the strict policy, or a failed deletion.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    logging::init_logging(cli.verbose, cli.quiet);
    yansi::whenever(color_condition(cli.no_color));

    let config = Config::load(cli.config.as_deref())?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Dedupe(args) => run_dedupe(&args, &config, cli.quiet, &mut out),
        Commands::Groups(args) => run_groups(&args, &config, &mut out),
        Commands::Config => {
            out.write_all(config.to_toml_string()?.as_bytes())?;
            out.flush()?;
            Ok(ExitCode::Success)
        }
    }
}

/// When to style diagnostics on stderr: never with `--no-color`/`NO_COLOR`,
/// otherwise only if stderr is a terminal.
#[must_use]
pub fn color_condition(no_color: bool) -> yansi::Condition {
    if no_color {
        yansi::Condition::NEVER
    } else {
        yansi::Condition::STDERR_IS_TTY
    }
}

/// Plan a run and either report or execute it.
///
/// # Errors
///
/// Returns an error if planning, writing the report or a deletion fails.
pub fn run_dedupe<W: Write>(
    args: &DedupeArgs,
    config: &Config,
    quiet: bool,
    out: &mut W,
) -> Result<ExitCode> {
    let mode = if args.execute {
        ExecutionMode::Delete
    } else {
        ExecutionMode::ReportOnly
    };
    let dedupe_config = build_dedupe_config(&args.bag, config)
        .with_mode(mode)
        .with_delete_method(args.delete_method().unwrap_or(config.delete_method));

    let result = find(dedupe_config.clone())?;

    match dedupe_config.mode {
        ExecutionMode::ReportOnly => {
            let format = args.output.unwrap_or(config.output);
            write_plan(&result, format, args.script, out)?;
        }
        ExecutionMode::Delete => {
            if result.plan.is_empty() {
                log::info!("Nothing to delete");
                return Ok(ExitCode::Success);
            }
            let progress = Progress::new(quiet);
            let batch = execute_plan(
                &result.plan,
                dedupe_config.delete_method,
                Some(&progress),
            )
            .context("deletion aborted")?;
            log::debug!("{} file(s) removed", batch.success_count());
        }
    }

    Ok(ExitCode::Success)
}

/// List hash groups that contain duplicates.
///
/// # Errors
///
/// Returns an error if planning or writing fails.
pub fn run_groups<W: Write>(args: &GroupsArgs, config: &Config, out: &mut W) -> Result<ExitCode> {
    let result = find(build_dedupe_config(&args.bag, config))?;

    if args.json {
        let groups: Vec<_> = result.groups.with_duplicates().collect();
        serde_json::to_writer_pretty(&mut *out, &groups)?;
        writeln!(out)?;
        out.flush()?;
    } else {
        output::text::write_groups(&result.groups, out)?;
    }

    Ok(ExitCode::Success)
}

/// Render a report-only plan in the chosen format.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_plan<W: Write>(
    result: &FinderResult,
    format: OutputFormat,
    script: Option<ScriptType>,
    out: &mut W,
) -> Result<()> {
    match format {
        OutputFormat::Text => output::text::write_report(&result.plan, out)?,
        OutputFormat::Json => JsonOutput::new(result).write_to(out, true)?,
        OutputFormat::Script => {
            let script_type = script.unwrap_or_else(ScriptType::detect);
            ScriptOutput::new(result, script_type).write_to(out)?;
        }
    }
    Ok(())
}

/// Overlay bag-related CLI flags on the loaded configuration.
fn build_dedupe_config(args: &BagArgs, config: &Config) -> DedupeConfig {
    let policy = if args.strict {
        MalformedLinePolicy::Fail
    } else {
        config.malformed_lines
    };

    let mut dedupe_config =
        DedupeConfig::new(&args.bag_root).with_malformed_lines(policy);
    if let Some(algorithm) = args.algorithm.or(config.algorithm) {
        dedupe_config = dedupe_config.with_algorithm(algorithm);
    }
    if let Some(remote) = &args.remote {
        dedupe_config = dedupe_config.with_remote_manifest(remote);
    }
    dedupe_config
}

fn find(config: DedupeConfig) -> Result<FinderResult> {
    log::debug!("Planning run for {}", config.bag_root.display());
    let bag_root = config.bag_root.clone();
    DuplicateFinder::new(config)
        .find_duplicates()
        .with_context(|| format!("cannot plan deduplication of {}", bag_root.display()))
}
