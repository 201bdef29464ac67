//! treecopy - all-or-nothing directory tree replication
//!
//! Copies a directory tree under a destination parent. A failed copy leaves
//! nothing behind.

mod display;
mod json_output;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use console::style;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use treecopy_config::{Config, ConfigLoader, LoggingConfig};
use treecopy_engine::{ReplicationOptions, Replicator};
use treecopy_io::is_valid_absolute_path;
use treecopy_store::{save_json, ChangeTracker, TreeFingerprint};

use display::{
    create_spinner, display_error, display_success, display_warning, failure_summary,
    print_copy_stats,
};
use json_output::CopyReport;

/// treecopy - all-or-nothing directory tree replication
#[derive(Parser)]
#[command(
    name = "treecopy",
    version = env!("CARGO_PKG_VERSION"),
    about = "Replicate a directory tree, rolling back on failure",
    long_about = "treecopy copies a directory with all nested directories and files into a\n\
                  new directory under a destination parent. If any step fails, the partial\n\
                  copy is deleted and the error is reported."
)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Quiet mode - minimal output
    #[arg(short, long)]
    quiet: bool,

    /// Verbose mode - detailed output
    #[arg(short, long)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Copy a directory tree into a new directory under DESTINATION_PARENT
    Copy {
        /// Source directory
        source: PathBuf,
        /// Existing directory that receives the copy
        destination_parent: PathBuf,
        /// Write a JSON report to this file
        #[arg(long)]
        report: Option<PathBuf>,
        /// Skip the check that the source did not change during the copy
        #[arg(long)]
        no_verify: bool,
    },
    /// Show configuration
    Config {
        /// Show default configuration
        #[arg(long)]
        default: bool,
    },
    /// Check whether a path is absolute and free of invalid characters
    CheckPath {
        /// Path to check
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    init_logging(cli.debug, cli.quiet, cli.verbose, &config.logging)?;

    info!("treecopy v{} starting", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Copy {
            source,
            destination_parent,
            report,
            no_verify,
        } => copy_command(
            &config,
            &source,
            &destination_parent,
            report.as_deref(),
            !no_verify && config.replication.verify_source_unchanged,
            cli.quiet,
        ),
        Commands::Config { default } => config_command(&config, default),
        Commands::CheckPath { path } => check_path_command(&path),
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => ConfigLoader::load_from_file(path)
            .with_context(|| format!("failed to load configuration from {}", path.display())),
        None => ConfigLoader::load_default().context("failed to load configuration"),
    }
}

fn init_logging(debug: bool, quiet: bool, verbose: bool, logging: &LoggingConfig) -> Result<()> {
    use tracing_subscriber::{fmt, EnvFilter};

    let level = if debug {
        "debug"
    } else if verbose {
        "info"
    } else if quiet {
        "error"
    } else {
        logging.level.as_str()
    };

    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_ansi(logging.colored_output)
        .with_writer(std::io::stderr);

    let installed = if logging.json_format {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| anyhow::anyhow!("failed to initialize logging: {}", e))
}

fn copy_command(
    config: &Config,
    source: &Path,
    destination_parent: &Path,
    report: Option<&Path>,
    verify: bool,
    quiet: bool,
) -> Result<()> {
    info!("Source: {}", source.display());
    info!("Destination parent: {}", destination_parent.display());

    // Resolve before copying so a bad report path fails early
    let report = report.map(absolute).transpose()?;

    if !quiet {
        println!(
            "{} Copying {} into {}",
            style("→").green().bold(),
            style(source.display()).cyan(),
            style(destination_parent.display()).cyan()
        );
    }

    let tracker = if verify && source.is_dir() {
        Some(ChangeTracker::snapshot(TreeFingerprint::new(source))?)
    } else {
        None
    };

    let replicator = Replicator::new().with_options(ReplicationOptions::from_config(config));
    let spinner = create_spinner(quiet, "Copying files...");
    let outcome = replicator.replicate(source, destination_parent);
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    let stats = match outcome {
        Ok(stats) => stats,
        Err(error) => {
            if let Some(failure) = error.rollback_failure() {
                display_warning(&failure.to_string());
            }
            if let Some(path) = &report {
                save_json(&CopyReport::failure(source, destination_parent, &error), path)?;
            }
            if !quiet {
                display_error(&failure_summary(&error));
            }
            return Err(error.into());
        }
    };

    let source_unchanged = match &tracker {
        Some(tracker) => Some(tracker.is_not_changed()?),
        None => None,
    };
    if source_unchanged == Some(false) {
        display_warning("The source directory changed while it was being copied");
    }

    if let Some(path) = &report {
        save_json(
            &CopyReport::success(source, destination_parent, &stats, source_unchanged),
            path,
        )?;
        debug!("Report written to {}", path.display());
    }

    if !quiet {
        print_copy_stats(&stats);
        display_success("Copy completed");
    }

    Ok(())
}

fn config_command(config: &Config, default: bool) -> Result<()> {
    let (title, shown) = if default {
        ("Default configuration:", Config::default())
    } else {
        ("Current configuration:", config.clone())
    };

    println!("{} {}", style("⚙").blue().bold(), title);
    print!("{}", serde_yaml::to_string(&shown)?);
    Ok(())
}

fn check_path_command(path: &Path) -> Result<()> {
    if !is_valid_absolute_path(path) {
        bail!(
            "`{}` contains invalid characters or is not absolute",
            path.display()
        );
    }

    display_success(&format!("`{}` is a valid absolute path", path.display()));
    Ok(())
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().context("failed to read the current directory")?;
    Ok(cwd.join(path))
}
