use std::{
    fs::File,
    io::{self, Read},
    path::PathBuf,
};

use anyhow::{Context, Result};
use bank_ledger::{
    bin_utils::{
        Service,
        csv_printer::{AccountSnapshot, print_accounts},
    },
    ledger::bank::{Bank, DEFAULT_BANK_NAME},
};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Replays a CSV script of bank actions against an in-memory ledger.
#[derive(Parser, Debug)]
#[command(name = "bank-ledger", version)]
struct Args {
    /// Script with a `type,account,holder,recipient,amount` header. Read from stdin when omitted.
    script: Option<PathBuf>,

    #[arg(long, default_value = DEFAULT_BANK_NAME)]
    bank_name: String,

    /// Write the final state of every account to this file as CSV.
    #[arg(long, value_name = "PATH")]
    snapshot: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let input: Box<dyn Read> = match &args.script {
        Some(path) => Box::new(
            File::open(path).with_context(|| format!("Failed to open `{}`", path.display()))?,
        ),
        None => Box::new(io::stdin()),
    };

    let service = Service {
        input,
        output: &mut io::stdout(),
        ledger: Bank::new(args.bank_name),
        error_printer: Box::new(|line, err| warn!(line, %err, "skipping script row")),
    };
    let bank = service.run()?;
    info!(accounts = bank.accounts().count(), "script finished");

    if let Some(path) = args.snapshot {
        let mut file = File::create(&path)
            .with_context(|| format!("Failed to create `{}`", path.display()))?;
        print_accounts(&mut file, bank.accounts().map(AccountSnapshot::from))?;
    }
    Ok(())
}
