use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::info;

use taxcast_core::{default_year, selectable_years, Clock, FixedClock, SystemClock};
use taxcast_finance::{
    estimate_corporate_tax, estimate_individual_tax, CorporateOptions, EstimationResult,
    IndividualOptions, Regime,
};
use taxcast_ingest::{load_snapshot, parse_ledger_csv, parse_receipts_csv, LedgerSnapshot};

mod config;
mod logging;
mod report;
mod state;

#[derive(Parser, Debug)]
#[command(
    name = "taxcast",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("TAXCAST_BUILD_SHA"), ")"),
    about = "Projected annual tax from a bookkeeping ledger"
)]
struct Cli {
    /// Debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Estimate this year's tax from a ledger snapshot
    Estimate {
        #[command(flatten)]
        source: SourceArgs,

        /// Taxpayer regime (defaults to config)
        #[arg(long, value_enum)]
        regime: Option<RegimeArg>,

        /// Fiscal year to estimate (defaults to the detected year)
        #[arg(long)]
        year: Option<i32>,

        /// Apply the blue-return deduction (individual only)
        #[arg(long, conflicts_with = "no_blue_return")]
        blue_return: bool,

        /// Do not apply the blue-return deduction even if configured
        #[arg(long)]
        no_blue_return: bool,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the fiscal years found in a ledger snapshot
    Years {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Manage ~/.taxcast/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// JSON ledger export with transactions and receipts
    #[arg(long)]
    ledger: Option<PathBuf>,

    /// Ledger CSV (date,amount,type,status,tags,description)
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Receipts CSV (date,amount,status[,transaction_id])
    #[arg(long)]
    receipts: Option<PathBuf>,

    /// Treat this date as today (YYYY-MM-DD)
    #[arg(long)]
    today: Option<NaiveDate>,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config if none exists
    Init,
    /// Print the effective config
    Show,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum RegimeArg {
    Individual,
    Corporate,
}

impl From<RegimeArg> for Regime {
    fn from(arg: RegimeArg) -> Self {
        match arg {
            RegimeArg::Individual => Regime::Individual,
            RegimeArg::Corporate => Regime::Corporate,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);

    match cli.command {
        Command::Estimate {
            source,
            regime,
            year,
            blue_return,
            no_blue_return,
            json,
        } => {
            let cfg = config::load_config()?;
            let regime = regime.map(Regime::from).unwrap_or(cfg.estimate.regime);
            let blue_return = if no_blue_return {
                false
            } else {
                blue_return || cfg.estimate.blue_return
            };

            let snapshot = load_sources(&source)?;
            let clock = clock_for(&source);
            let result = estimate(&snapshot, regime, year, blue_return, &clock);

            if json || cfg.output.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&result).context("serialize result")?
                );
            } else {
                print!("{}", report::render(&result));
            }
        }

        Command::Years { source } => {
            let snapshot = load_sources(&source)?;
            let today = clock_for(&source).today();
            let years = selectable_years(&snapshot.transactions, &snapshot.receipts, today);
            let default = default_year(&years, today);
            for y in years {
                let marker = if y == default { " (default)" } else { "" };
                println!("{y}{marker}");
            }
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                let cfg = config::load_config()?;
                println!("# {}", config::config_path()?.display());
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

fn clock_for(source: &SourceArgs) -> FixedClock {
    FixedClock(source.today.unwrap_or_else(|| SystemClock.today()))
}

fn load_sources(source: &SourceArgs) -> Result<LedgerSnapshot> {
    if source.ledger.is_none() && source.csv.is_none() && source.receipts.is_none() {
        bail!("no ledger given (pass --ledger <export.json>, --csv <ledger.csv> or --receipts <receipts.csv>)");
    }

    let mut snapshot = LedgerSnapshot::default();

    if let Some(path) = &source.ledger {
        snapshot.extend(load_snapshot(path)?);
    }
    if let Some(path) = &source.csv {
        snapshot.transactions.extend(parse_ledger_csv(path)?);
    }
    if let Some(path) = &source.receipts {
        snapshot.receipts.extend(parse_receipts_csv(path)?);
    }

    info!(
        transactions = snapshot.transactions.len(),
        receipts = snapshot.receipts.len(),
        "loaded ledger"
    );
    Ok(snapshot)
}

fn estimate(
    snapshot: &LedgerSnapshot,
    regime: Regime,
    year: Option<i32>,
    blue_return: bool,
    clock: &impl Clock,
) -> EstimationResult {
    match regime {
        Regime::Individual => estimate_individual_tax(
            &snapshot.transactions,
            &snapshot.receipts,
            &IndividualOptions {
                year,
                enable_blue_return_deduction: blue_return,
            },
            clock,
        ),
        Regime::Corporate => estimate_corporate_tax(
            &snapshot.transactions,
            &snapshot.receipts,
            &CorporateOptions { year },
            clock,
        ),
    }
}
