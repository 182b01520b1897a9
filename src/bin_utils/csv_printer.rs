use std::io::Write;

use crate::account::Account;
use csv::Writer;
use rust_decimal::Decimal;
use serde::Serialize;

/// Final state of an account, one CSV row each.
#[derive(Debug, Serialize)]
pub struct AccountSnapshot<'a> {
    pub account: &'a str,
    pub holder: &'a str,
    pub balance: Decimal,
    pub transactions: usize,
}

impl<'a> From<&'a Account> for AccountSnapshot<'a> {
    fn from(acc: &'a Account) -> Self {
        Self {
            account: acc.number(),
            holder: acc.holder(),
            balance: acc.balance(),
            transactions: acc.history().len(),
        }
    }
}

pub fn print_accounts<'a, W>(
    output: &mut W,
    accounts: impl Iterator<Item = AccountSnapshot<'a>>,
) -> anyhow::Result<()>
where
    W: Write,
{
    let mut writer = Writer::from_writer(output);
    for acc in accounts {
        if let Err(err) = writer.serialize(acc) {
            anyhow::bail!("Failed to write to CSV: {err}")
        }
    }
    // Ensure all data is flushed to the output
    if let Err(err) = writer.flush() {
        anyhow::bail!("Failed to flush CSV writer: {err}")
    }
    Ok(())
}
