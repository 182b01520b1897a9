use std::io::Read;

use crate::command::{CommandInput, CommandKind};
use csv::{DeserializeRecordsIntoIter, Trim};
use serde::Deserialize;

/// One user action, as written in the script.
#[derive(Debug, Deserialize)]
pub struct ScriptRow {
    #[serde(rename = "type")]
    pub kind: CommandKind,
    pub account: Option<String>,
    pub holder: Option<String>,
    pub recipient: Option<String>,
    pub amount: Option<String>,
}

impl ScriptRow {
    pub fn into_input(self) -> (CommandKind, CommandInput) {
        (
            self.kind,
            CommandInput {
                account: self.account,
                holder: self.holder,
                recipient: self.recipient,
                amount: self.amount,
            },
        )
    }
}

/// Parses a script of user actions in CSV format, yielding each row together with
/// the line it starts on. Rows that cannot be parsed are yielded as errors.
pub struct CsvScriptParser<R> {
    iter: DeserializeRecordsIntoIter<R, ScriptRow>,
}

impl<R> CsvScriptParser<R>
where
    R: Read,
{
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(source);

        Self {
            iter: reader.into_deserialize(),
        }
    }
}

impl<R> Iterator for CsvScriptParser<R>
where
    R: Read,
{
    type Item = (u64, Result<ScriptRow, csv::Error>);

    fn next(&mut self) -> Option<Self::Item> {
        let curr_line = self.iter.reader().position().line();
        self.iter.next().map(|row| (curr_line, row))
    }
}
