//! statopt - Stationary points of single-variable functions
//!
//! Command-line front end for the `optimiser_core` solvers, with functions
//! given as expressions (`optimiser_expr`).
//!
//! # Commands
//!
//! - `statopt newton --function <EXPR> --x0 <X>` - Newton iteration on f'
//! - `statopt secant --function <EXPR> --x0 <X> --x1 <X>` - Secant-bracket iteration on f'
//! - `statopt derive --function <EXPR>` - Print symbolic derivatives
//! - `statopt menu` - Interactive menu
//!
//! Results go to stdout; logs go to stderr.

use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing::{debug, error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;
mod render;

use config::{build_config, CliArgs, LogLevel, OracleKind, OutputFormat, DEFAULT_CONFIG_FILE};
pub use error::{CliError, Result};

/// Stationary-point optimiser for single-variable functions
#[derive(Parser)]
#[command(name = "statopt")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (TOML format); defaults to ./optimiser.toml if present
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output format (table, json)
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    /// Derivative oracle (dual, symbolic)
    #[arg(long, global = true)]
    oracle: Option<OracleKind>,

    #[command(subcommand)]
    command: Commands,
}

/// Solver overrides shared by the solving commands
#[derive(Args, Debug, Default)]
struct SolveOptions {
    /// Convergence threshold on |f'|
    #[arg(short, long)]
    tolerance: Option<f64>,

    /// Iteration cap
    #[arg(short = 'n', long)]
    max_iterations: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Find a stationary point with Newton's method
    Newton {
        /// Function of x, e.g. "x**2 + 54/x"
        #[arg(short = 'e', long)]
        function: String,

        /// Initial guess
        #[arg(long, allow_negative_numbers = true)]
        x0: f64,

        #[command(flatten)]
        options: SolveOptions,
    },

    /// Find a stationary point with the secant-bracket method
    Secant {
        /// Function of x, e.g. "x**2 + 54/x"
        #[arg(short = 'e', long)]
        function: String,

        /// First endpoint
        #[arg(long, allow_negative_numbers = true)]
        x0: f64,

        /// Second endpoint
        #[arg(long, allow_negative_numbers = true)]
        x1: f64,

        #[command(flatten)]
        options: SolveOptions,
    },

    /// Print symbolic derivatives of a function
    Derive {
        /// Function of x
        #[arg(short = 'e', long)]
        function: String,

        /// Highest derivative order to print
        #[arg(short, long, default_value_t = 2)]
        order: u32,
    },

    /// Interactive menu
    Menu,
}

impl Cli {
    fn config_args(&self) -> CliArgs {
        let options = match &self.command {
            Commands::Newton { options, .. } | Commands::Secant { options, .. } => Some(options),
            Commands::Derive { .. } | Commands::Menu => None,
        };

        CliArgs {
            config_file: self.config.clone().or_else(default_config_file),
            tolerance: options.and_then(|o| o.tolerance),
            max_iterations: options.and_then(|o| o.max_iterations),
            format: self.format,
            oracle: self.oracle,
            verbose: self.verbose,
        }
    }
}

fn default_config_file() -> Option<PathBuf> {
    let path = Path::new(DEFAULT_CONFIG_FILE);
    path.is_file().then(|| path.to_path_buf())
}

fn init_tracing(log_level: LogLevel) {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(log_level.as_filter_str())),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = build_config(&cli.config_args())?;

    init_tracing(config.log_level);
    debug!(
        tolerance = config.tolerance,
        max_iterations = config.max_iterations,
        format = %config.format,
        oracle = %config.oracle,
        "Configuration loaded"
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Newton { function, x0, .. } => commands::newton::run(&function, x0, &config, &mut out),
        Commands::Secant {
            function, x0, x1, ..
        } => commands::secant::run(&function, x0, x1, &config, &mut out),
        Commands::Derive { function, order } => {
            commands::derive::run(&function, order, &config, &mut out)
        }
        Commands::Menu => commands::menu::run(&mut io::stdin().lock(), &mut out, &config),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "Command failed");
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_newton_arguments() {
        let cli = Cli::try_parse_from([
            "statopt",
            "--format",
            "json",
            "newton",
            "--function",
            "x**2 + 54/x",
            "--x0",
            "-2.5",
            "--tolerance",
            "1e-8",
        ])
        .unwrap();

        let args = cli.config_args();
        assert_eq!(args.format, Some(OutputFormat::Json));
        assert_eq!(args.tolerance, Some(1e-8));
        assert_eq!(args.max_iterations, None);
        match cli.command {
            Commands::Newton { function, x0, .. } => {
                assert_eq!(function, "x**2 + 54/x");
                assert_eq!(x0, -2.5);
            }
            _ => panic!("expected newton"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "statopt", "secant", "-e", "x**2", "--x0", "-1", "--x1", "1", "--oracle", "symbolic",
            "-n", "20", "-v",
        ])
        .unwrap();

        let args = cli.config_args();
        assert_eq!(args.oracle, Some(OracleKind::Symbolic));
        assert_eq!(args.max_iterations, Some(20));
        assert!(args.verbose);
    }

    #[test]
    fn test_invalid_format_rejected() {
        assert!(Cli::try_parse_from(["statopt", "--format", "xml", "menu"]).is_err());
    }

    #[test]
    fn test_derive_default_order() {
        let cli = Cli::try_parse_from(["statopt", "derive", "-e", "sin(x)"]).unwrap();
        assert!(matches!(cli.command, Commands::Derive { order: 2, .. }));
    }
}
