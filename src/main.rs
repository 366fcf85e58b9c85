//! debt-ledger CLI
//!
//! Track who owes whom in a group and simplify the debts.
//!
//! # Usage
//!
//! ```bash
//! # Start an interactive session on an empty ledger
//! debt-ledger new
//!
//! # Resume a saved ledger
//! debt-ledger load trip.txt
//!
//! # One-shot report, simplified, as JSON
//! debt-ledger report --input trip.txt --simplify --format json
//!
//! # Generate a random ledger for testing
//! debt-ledger generate --participants 10 --debts 40 --output random.txt
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use debt_ledger::command::parser::Command;
use debt_ledger::command::repl;
use debt_ledger::command::router::Session;
use debt_ledger::config::{SessionConfig, DEFAULT_MAX_ROUNDS};
use debt_ledger::core::ledger::Ledger;
use debt_ledger::optimization::simplify::Strategy;
use debt_ledger::persistence::report::LedgerReport;
use debt_ledger::persistence::snapshot;
use debt_ledger::simulation::random_ledger::{generate_random_ledger, GeneratorConfig};
use log::info;
use rust_decimal::Decimal;
use std::error::Error;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser, Debug)]
#[command(name = "debt-ledger", version)]
#[command(about = "Shared-expense debt ledger with debt simplification")]
struct Cli {
    /// Algorithm used by `simplify`: single-pass or fixed-point.
    #[arg(
        long,
        global = true,
        env = "DEBT_LEDGER_STRATEGY",
        default_value = "single-pass"
    )]
    strategy: Strategy,

    /// Anti-symmetry tolerance accepted when loading a snapshot.
    #[arg(long, global = true, env = "DEBT_LEDGER_TOLERANCE", default_value = "0.01")]
    tolerance: Decimal,

    /// Pass limit for the fixed-point strategy.
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_ROUNDS)]
    max_rounds: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Interactive session on an empty ledger.
    New,
    /// Interactive session on a saved ledger.
    Load {
        /// Snapshot file written by `save`.
        file: PathBuf,
    },
    /// Print debts and balances of a saved ledger.
    Report(ReportArgs),
    /// Write a random ledger snapshot.
    Generate(GenerateArgs),
}

#[derive(Args, Debug)]
struct ReportArgs {
    /// Snapshot file to report on.
    #[arg(long)]
    input: PathBuf,
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
    /// Simplify before reporting (the file is not modified).
    #[arg(long)]
    simplify: bool,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    #[arg(long, default_value_t = 10)]
    participants: usize,
    #[arg(long, default_value_t = 30)]
    debts: usize,
    /// Largest number of people sharing one expense.
    #[arg(long, default_value_t = 3)]
    max_debtors: usize,
    /// Write to file instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = SessionConfig {
        tolerance: cli.tolerance,
        strategy: cli.strategy,
        max_rounds: cli.max_rounds,
        ..Default::default()
    };

    match cli.command {
        Commands::New => interactive(Ledger::new(), config)?,
        Commands::Load { file } => {
            let ledger = load_snapshot(&file, &config)?;
            interactive(ledger, config)?;
        }
        Commands::Report(args) => cmd_report(args, config)?,
        Commands::Generate(args) => cmd_generate(args)?,
    }
    Ok(())
}

fn load_snapshot(file: &Path, config: &SessionConfig) -> Result<Ledger, Box<dyn Error>> {
    let loaded = snapshot::load(file, config.tolerance)?;
    let names: Vec<&str> = loaded.ledger.names().iter().map(|n| n.as_str()).collect();
    eprintln!(
        "Loaded {}. Current participants are {}",
        file.display(),
        names.join(", ")
    );
    Ok(loaded.ledger)
}

fn interactive(ledger: Ledger, config: SessionConfig) -> io::Result<()> {
    info!("starting session with {} participants", ledger.len());
    let mut session = Session::new(ledger, config);
    let stdin = io::stdin();
    let stdout = io::stdout();
    repl::run(&mut session, stdin.lock(), &mut stdout.lock())
}

fn cmd_report(args: ReportArgs, config: SessionConfig) -> Result<(), Box<dyn Error>> {
    let ledger = load_snapshot(&args.input, &config)?;
    let mut session = Session::new(ledger, config);
    let simplification = args.simplify.then(|| session.simplify());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match args.format {
        Format::Json => {
            let report = LedgerReport::from_ledger(session.ledger(), simplification)?;
            writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
        }
        Format::Text => {
            if let Some(simplification) = simplification {
                writeln!(out, "{simplification}\n")?;
            }
            writeln!(out, "=== Debts ===")?;
            session.execute(Command::Print, &mut out)?;
            writeln!(out, "\n=== Balances ===")?;
            session.execute(Command::Balances, &mut out)?;
        }
    }
    Ok(())
}

fn cmd_generate(args: GenerateArgs) -> Result<(), Box<dyn Error>> {
    let config = GeneratorConfig {
        participant_count: args.participants,
        debt_count: args.debts,
        max_debtors: args.max_debtors,
        ..Default::default()
    };
    let ledger = generate_random_ledger(&config)?;

    match args.output {
        Some(path) => {
            snapshot::save(&path, &ledger)?;
            eprintln!(
                "Generated {} debts across {} participants -> {}",
                ledger.edge_count(),
                ledger.len(),
                path.display()
            );
        }
        None => print!("{}", snapshot::render(&ledger)),
    }
    Ok(())
}
