//! CLI argument structures
//!
//! This module defines the command-line interface of relibot: global options
//! selecting configuration and backend, plus one subcommand per operation.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::filter::LogFilter;
use crate::report::ExportFormat;
use crate::storage::BackendType;

/// Reliability dashboard for asset failure and repair logs
#[derive(Parser)]
#[command(name = "relibot")]
#[command(about = "relibot - MTBF/MTTR reporting over asset failure logs", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace, -vvv for all)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to a configuration file
    #[arg(short = 'c', long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Where assets and logs are stored
    #[arg(long, value_enum, default_value_t = BackendType::Rest, global = true)]
    pub store: BackendType,

    /// Snapshot file used by `--store file`
    #[arg(long, global = true, value_name = "PATH")]
    pub data_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Narrowing options shared by the read commands
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Only logs for assets with this exact name
    #[arg(long, value_name = "NAME")]
    pub asset: Option<String>,

    /// Earliest event date to include (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub from: Option<NaiveDate>,

    /// Latest event date to include (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub to: Option<NaiveDate>,
}

impl From<FilterArgs> for LogFilter {
    fn from(args: FilterArgs) -> Self {
        LogFilter {
            asset_name: args.asset,
            start_date: args.from,
            end_date: args.to,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a CSV of failure/repair events and store it
    Upload {
        /// CSV file to upload
        file: PathBuf,

        /// Store the rows; without this the upload is only previewed
        #[arg(short = 'y', long = "yes")]
        yes: bool,
    },

    /// List assets
    Assets {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// List failure and repair logs
    Logs {
        #[command(flatten)]
        filter: FilterArgs,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show MTBF and MTTR per asset
    Stats {
        #[command(flatten)]
        filter: FilterArgs,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Rank failure modes by frequency
    Pareto {
        #[command(flatten)]
        filter: FilterArgs,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Write a report file
    Export {
        /// Output format: xlsx, pdf, md or json
        #[arg(short = 'f', long, value_name = "FORMAT")]
        format: ExportFormat,

        /// Output path (defaults to a standard name in the output directory)
        #[arg(short = 'o', long, value_name = "PATH")]
        output: Option<PathBuf>,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Mark every asset and log as deleted
    Clear {
        /// Confirm the deletion
        #[arg(long)]
        confirm: bool,
    },

    /// Run the webhook receiver
    Webhook {
        /// Address to listen on (overrides configuration)
        #[arg(long, value_name = "ADDR")]
        bind: Option<String>,
    },
}
