//! Drives a [`Ledger`] from a script of user actions, the way a form based front end
//! would: every action produces one notification, success or not.

use std::io::{Read, Write};

use crate::{
    command::{CommandError, LedgerCommand},
    ledger::Ledger,
};
use anyhow::{Context, Result};
use csv_parser::CsvScriptParser;
use thiserror::Error;
use tracing::debug;
pub mod csv_parser;
pub mod csv_printer;

/// Problems with the script itself. The ledger never sees these rows.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Malformed row: {0}")]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Command(#[from] CommandError),
}

pub struct Service<'w, R, W: 'w, L> {
    pub input: R,
    pub output: &'w mut W,
    pub ledger: L,
    pub error_printer: Box<dyn FnMut(u64, ScriptError)>,
}

impl<'w, R, W, L> Service<'w, R, W, L>
where
    R: Read,
    W: Write + 'w,
    L: Ledger,
{
    /// Replays the whole script and hands the ledger back for inspection.
    pub fn run(mut self) -> Result<L> {
        let parser = CsvScriptParser::new(self.input);

        for (line, row) in parser {
            let command = match row
                .map_err(ScriptError::from)
                .and_then(|row| {
                    let (kind, input) = row.into_input();
                    LedgerCommand::parse_command(kind, input).map_err(ScriptError::from)
                }) {
                Ok(command) => command,
                Err(err) => {
                    (self.error_printer)(line, err);
                    continue;
                }
            };
            debug!(line, ?command, "executing");
            let notification = match self.ledger.execute(command) {
                Ok(outcome) => outcome.to_string(),
                Err(err) => err.to_string(),
            };
            writeln!(self.output, "{notification}")
                .with_context(|| format!("Failed to write notification for line {line}"))?;
        }
        self.output.flush().context("Failed to flush output")?;

        Ok(self.ledger)
    }
}
