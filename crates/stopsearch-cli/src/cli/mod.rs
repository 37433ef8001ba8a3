//! CLI for the stop-and-search downloader.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use stopsearch_core::config;

use commands::{
    run_available, run_dates, run_download, run_forces, run_plan, run_show_config, RunOptions,
};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "stopsearch")]
#[command(about = "Download police.uk stop-and-search data by force and month", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Summarize which forces and months have data, optionally exporting the table.
    Available {
        /// Write the normalized (force, date, type) table to this file.
        #[arg(long, value_name = "PATH")]
        export: Option<PathBuf>,
    },

    /// List forces that have data.
    Forces,

    /// List months that have data.
    Dates,

    /// Queue the cross-product of months and forces, then download each pair.
    Download {
        /// Months (YYYY-MM), comma separated. Omit to use every available month.
        #[arg(long, value_delimiter = ',', value_name = "MONTHS")]
        dates: Option<Vec<String>>,
        /// Force identifiers, comma separated. Omit to use every available force.
        #[arg(long, value_delimiter = ',', value_name = "FORCES")]
        forces: Option<Vec<String>>,
        #[command(flatten)]
        run: RunArgs,
    },

    /// Queue jobs from a JSON plan file, then download them.
    ///
    /// The file holds one object or a list of objects, each with optional
    /// "dates" and "forces" lists.
    Plan {
        /// Path to the plan file.
        path: PathBuf,
        #[command(flatten)]
        run: RunArgs,
    },

    /// Show the config file path and effective settings.
    Config,
}

/// Options shared by commands that execute jobs.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RunArgs {
    /// Seconds to wait before each request (positive integer; invalid values use the config default).
    #[arg(long, value_name = "SECS", allow_hyphen_values = true)]
    pub delay: Option<String>,
    /// Folder to write downloaded files to (created if missing).
    #[arg(long, value_name = "DIR")]
    pub savefolder: Option<PathBuf>,
    /// Queue and list jobs without downloading.
    #[arg(long)]
    pub dry_run: bool,
}

impl RunArgs {
    fn into_options(self, cfg: &mut config::StopSearchConfig) -> RunOptions {
        if let Some(dir) = self.savefolder {
            cfg.savefolder = Some(dir);
        }
        let delay = self
            .delay
            .map(|raw| config::coerce_positive(&raw, cfg.delay_secs) as i64);
        RunOptions {
            delay,
            dry_run: self.dry_run,
        }
    }
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let mut cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Available { export } => run_available(cfg, export.as_deref())?,
            CliCommand::Forces => run_forces(cfg)?,
            CliCommand::Dates => run_dates(cfg)?,
            CliCommand::Download { dates, forces, run } => {
                let opts = run.into_options(&mut cfg);
                run_download(cfg, dates, forces, opts)?;
            }
            CliCommand::Plan { path, run } => {
                let opts = run.into_options(&mut cfg);
                run_plan(cfg, &path, opts)?;
            }
            CliCommand::Config => run_show_config(&cfg)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
