use clap::{Args, Parser, Subcommand, ValueEnum};
use miette::{IntoDiagnostic, Result};
use mortgage_estimator::application::estimator::Estimator;
use mortgage_estimator::domain::mortgage::MortgageType;
use mortgage_estimator::interfaces::csv::estimate_writer::EstimateWriter;
use mortgage_estimator::interfaces::csv::scenario_reader::ScenarioReader;
use mortgage_estimator::interfaces::form::{DepositMode, MortgageForm};
use mortgage_estimator::interfaces::report::{TextReport, render_json};
use mortgage_estimator::interfaces::session::Session;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Exit status when validation blocks the estimate.
const INVALID_INPUT: u8 = 2;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Estimate a single mortgage
    Estimate(EstimateArgs),
    /// Estimate every scenario in a CSV file and write the results as CSV
    Batch {
        /// Input scenarios CSV file
        input: PathBuf,
    },
    /// Edit the form line by line on stdin, re-estimating after each change
    Session,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Numeric values are free text: "300,000" and " 4.5 " are accepted.
/// Unset flags fall back to the environment, then to the form defaults
/// (300000 price, 60000 deposit, 25 years, 4.5%, no fees, repayment).
#[derive(Args)]
struct EstimateArgs {
    /// Property price in pounds
    #[arg(long, env = "MORTGAGE_PRICE", allow_hyphen_values = true)]
    price: Option<String>,

    /// Deposit, in pounds or as a percentage of the price (see --deposit-mode)
    #[arg(long, env = "MORTGAGE_DEPOSIT", allow_hyphen_values = true)]
    deposit: Option<String>,

    /// How to read --deposit: amount or percent
    #[arg(long, env = "MORTGAGE_DEPOSIT_MODE")]
    deposit_mode: Option<DepositMode>,

    /// Term in years
    #[arg(long, env = "MORTGAGE_TERM", allow_hyphen_values = true)]
    term: Option<String>,

    /// Interest rate (APR), percent per year
    #[arg(long, env = "MORTGAGE_RATE", allow_hyphen_values = true)]
    rate: Option<String>,

    /// Upfront fees in pounds
    #[arg(long, env = "MORTGAGE_FEES", allow_hyphen_values = true)]
    fees: Option<String>,

    /// repayment or interest-only
    #[arg(long = "type", env = "MORTGAGE_TYPE")]
    mortgage_type: Option<MortgageType>,

    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Explain how the figures are calculated
    #[arg(long)]
    explain: bool,
}

impl EstimateArgs {
    fn form(&self) -> MortgageForm {
        let defaults = MortgageForm::default();
        MortgageForm {
            price: self.price.clone().unwrap_or(defaults.price),
            deposit: self.deposit.clone().unwrap_or(defaults.deposit),
            deposit_mode: self.deposit_mode.unwrap_or(defaults.deposit_mode),
            term: self.term.clone().unwrap_or(defaults.term),
            rate: self.rate.clone().unwrap_or(defaults.rate),
            fees: self.fees.clone().unwrap_or(defaults.fees),
            mortgage_type: self.mortgage_type.unwrap_or(defaults.mortgage_type),
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Estimate(args) => estimate(&args),
        Command::Batch { input } => batch(input),
        Command::Session => {
            let stdin = io::stdin();
            let stdout = io::stdout();
            Session::new(stdin.lock(), stdout.lock())
                .run()
                .into_diagnostic()?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn estimate(args: &EstimateArgs) -> Result<ExitCode> {
    let estimate = Estimator::new().estimate(&args.form().to_request());

    match args.format {
        OutputFormat::Text => println!(
            "{}",
            TextReport::new(&estimate).with_explanation(args.explain)
        ),
        OutputFormat::Json => println!("{}", render_json(&estimate).into_diagnostic()?),
    }

    if estimate.is_valid() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(INVALID_INPUT))
    }
}

fn batch(input: PathBuf) -> Result<ExitCode> {
    let file = File::open(input).into_diagnostic()?;
    let reader = ScenarioReader::new(file);

    let stdout = io::stdout();
    let mut writer = EstimateWriter::new(stdout.lock());
    let mut estimator = Estimator::new();
    let mut written = 0usize;

    // Scenario numbers follow data rows, including the ones that fail to read.
    for (index, scenario) in reader.scenarios().enumerate() {
        let number = index + 1;
        match scenario {
            Ok(scenario) => {
                let request = MortgageForm::from(scenario).to_request();
                let estimate = estimator.estimate(&request);
                writer.write_estimate(number, &estimate).into_diagnostic()?;
                written += 1;
            }
            Err(e) => {
                eprintln!("Error reading scenario {number}: {e}");
            }
        }
    }

    writer.flush().into_diagnostic()?;
    info!(
        written,
        computations = estimator.computations(),
        "batch complete"
    );
    Ok(ExitCode::SUCCESS)
}
