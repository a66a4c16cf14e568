//! Numlab CLI - numerical methods from the command line
//!
//! Thin front end over `numlab_core`: parses arguments or a problem file,
//! runs one method and prints the result with its step trace.
//!
//! # Commands
//!
//! - `numlab bisection` / `numlab newton` - roots of `f(x) = 0`
//! - `numlab interpolate` - Newton divided-difference interpolation
//! - `numlab gauss` / `numlab cramer` - square linear systems
//! - `numlab central` - central divided-difference derivative
//! - `numlab simpson` - composite Simpson's rule
//! - `numlab solve --problem <file>` - any of the above from a TOML file
//! - `numlab check` - built-in reference problems
//!
//! Logs go to stderr; `RUST_LOG` overrides the configured level.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;
mod output;
mod problem;

pub use error::{CliError, Result};

use config::{build_config, CliArgs, CliConfig, LogLevel};

/// Numlab numerical methods CLI
#[derive(Parser)]
#[command(name = "numlab")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (TOML)
    #[arg(short, long, global = true, env = "NUMLAB_CONFIG")]
    config: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(short, long, global = true)]
    output: Option<String>,

    /// Decimal places in text output
    #[arg(short, long, global = true)]
    precision: Option<usize>,

    /// Iteration cap for the root finders
    #[arg(long, global = true)]
    max_iterations: Option<usize>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find a root by bisection
    Bisection {
        /// Equation in x, e.g. "x^2 - 7"
        #[arg(short, long, allow_hyphen_values = true)]
        equation: String,

        /// Left end of the bracket
        #[arg(long, allow_negative_numbers = true)]
        xl: f64,

        /// Right end of the bracket
        #[arg(long, allow_negative_numbers = true)]
        xr: f64,

        /// Stopping tolerance in percent
        #[arg(short, long)]
        tolerance: Option<f64>,
    },

    /// Find a root by Newton-Raphson
    Newton {
        /// Equation in x
        #[arg(short, long, allow_hyphen_values = true)]
        equation: String,

        /// Initial guess
        #[arg(long, allow_negative_numbers = true)]
        x0: f64,

        /// Stopping tolerance in percent
        #[arg(short, long)]
        tolerance: Option<f64>,
    },

    /// Interpolate through sample points
    Interpolate {
        /// Points as "x:fx,x:fx,..."
        #[arg(long, allow_hyphen_values = true)]
        points: String,

        /// Where to evaluate the polynomial
        #[arg(long, allow_negative_numbers = true)]
        x: f64,

        /// Point numbers to use, starting at 1 (e.g. "1,3"); all when omitted
        #[arg(short, long)]
        select: Option<String>,
    },

    /// Solve A x = b by Gauss elimination
    Gauss {
        /// Row-major matrix entries, comma-separated
        #[arg(short, long, allow_hyphen_values = true)]
        matrix: String,

        /// Right-hand side, comma-separated
        #[arg(short = 'b', long, allow_hyphen_values = true)]
        constants: String,
    },

    /// Solve A x = b by Cramer's rule
    Cramer {
        /// Row-major matrix entries, comma-separated
        #[arg(short, long, allow_hyphen_values = true)]
        matrix: String,

        /// Right-hand side, comma-separated
        #[arg(short = 'b', long, allow_hyphen_values = true)]
        constants: String,
    },

    /// Estimate a derivative by central divided difference
    Central {
        /// Function of x
        #[arg(short, long, allow_hyphen_values = true)]
        function: String,

        /// Evaluation point
        #[arg(long, allow_negative_numbers = true)]
        x: f64,

        /// Step size
        #[arg(long, allow_negative_numbers = true)]
        h: f64,

        /// Derivative order
        #[arg(long, default_value = "1", allow_negative_numbers = true)]
        order: i64,
    },

    /// Integrate by composite Simpson's rule
    Simpson {
        /// Integrand in x
        #[arg(short, long, allow_hyphen_values = true)]
        function: String,

        /// Lower limit
        #[arg(long, allow_negative_numbers = true)]
        a: f64,

        /// Upper limit
        #[arg(long, allow_negative_numbers = true)]
        b: f64,

        /// Number of subintervals (even)
        #[arg(short, long)]
        n: usize,
    },

    /// Solve the problem described in a TOML file
    Solve {
        /// Path to the problem file
        #[arg(long)]
        problem: PathBuf,
    },

    /// Run the built-in reference problems
    Check,
}

impl Cli {
    fn config_args(&self) -> CliArgs {
        CliArgs {
            config_file: self.config.clone(),
            tolerance_percent: None,
            max_iterations: self.max_iterations,
            output: self.output.clone(),
            precision: self.precision,
            log_level: self.log_level.clone(),
            verbose: self.verbose,
        }
    }
}

fn init_tracing(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_filter_str()));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn run(command: Commands, config: &CliConfig) -> Result<()> {
    let report = match command {
        Commands::Bisection {
            equation,
            xl,
            xr,
            tolerance,
        } => commands::roots::bisection(config, &equation, xl, xr, tolerance)?,
        Commands::Newton {
            equation,
            x0,
            tolerance,
        } => commands::roots::newton(config, &equation, x0, tolerance)?,
        Commands::Interpolate { points, x, select } => {
            let points = problem::parse_points(&points)?;
            let select = select.as_deref().map(problem::parse_select).transpose()?;
            commands::interpolate::interpolate(&points, x, select.as_deref())?
        }
        Commands::Gauss { matrix, constants } => {
            let (a, b) = commands::linear::parse_system(&matrix, &constants)?;
            commands::linear::gauss(&a, &b)?
        }
        Commands::Cramer { matrix, constants } => {
            let (a, b) = commands::linear::parse_system(&matrix, &constants)?;
            commands::linear::cramer(&a, &b)?
        }
        Commands::Central {
            function,
            x,
            h,
            order,
        } => commands::differentiate::central(&function, x, h, order)?,
        Commands::Simpson { function, a, b, n } => commands::integrate::simpson(&function, a, b, n)?,
        Commands::Solve { problem } => return commands::solve::run(config, &problem),
        Commands::Check => return commands::check::run(config),
    };
    output::emit(&report, config)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = build_config(&cli.config_args()).context("failed to load configuration")?;
    init_tracing(config.log_level);
    debug!(?config, "configuration loaded");

    run(cli.command, &config)?;
    Ok(())
}
