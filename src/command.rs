use std::{fmt, str::FromStr};

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use crate::account::AccountNumber;

/// The user actions a front end can trigger.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CommandKind {
    Create,
    Deposit,
    Withdraw,
    Transfer,
    Balance,
    History,
    Summary,
}

/// Input fields a command may need.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Account,
    Holder,
    Recipient,
    Amount,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Field::Account => "account",
            Field::Holder => "holder",
            Field::Recipient => "recipient",
            Field::Amount => "amount",
        })
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("`{field}` is required for {kind:?}")]
    MissingField { kind: CommandKind, field: Field },
    #[error("`{value}` is not a valid amount")]
    MalformedAmount { value: String },
}

/// Raw, untyped input as entered by the user.
#[derive(Debug, Clone, Default)]
pub struct CommandInput {
    pub account: Option<String>,
    pub holder: Option<String>,
    pub recipient: Option<String>,
    pub amount: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerCommand {
    CreateAccount {
        number: AccountNumber,
        holder: String,
    },
    Deposit {
        number: AccountNumber,
        amount: Decimal,
    },
    Withdraw {
        number: AccountNumber,
        amount: Decimal,
    },
    Transfer {
        from: AccountNumber,
        to: AccountNumber,
        amount: Decimal,
    },
    Balance {
        number: AccountNumber,
    },
    History {
        number: AccountNumber,
    },
    Summary,
}

impl LedgerCommand {
    /// Checks that every field `kind` needs is present and parses the amount text.
    ///
    /// Only presence and number format are checked here; sign and balance checks
    /// belong to the ledger.
    pub fn parse_command(kind: CommandKind, input: CommandInput) -> Result<Self, CommandError> {
        let CommandInput {
            account,
            holder,
            recipient,
            amount,
        } = input;
        let require = |value: Option<String>, field| {
            value.ok_or(CommandError::MissingField { kind, field })
        };

        match kind {
            CommandKind::Create => Ok(Self::CreateAccount {
                number: require(account, Field::Account)?,
                holder: require(holder, Field::Holder)?,
            }),
            CommandKind::Deposit => Ok(Self::Deposit {
                number: require(account, Field::Account)?,
                amount: Self::parse_amount(require(amount, Field::Amount)?)?,
            }),
            CommandKind::Withdraw => Ok(Self::Withdraw {
                number: require(account, Field::Account)?,
                amount: Self::parse_amount(require(amount, Field::Amount)?)?,
            }),
            CommandKind::Transfer => Ok(Self::Transfer {
                from: require(account, Field::Account)?,
                to: require(recipient, Field::Recipient)?,
                amount: Self::parse_amount(require(amount, Field::Amount)?)?,
            }),
            CommandKind::Balance => Ok(Self::Balance {
                number: require(account, Field::Account)?,
            }),
            CommandKind::History => Ok(Self::History {
                number: require(account, Field::Account)?,
            }),
            CommandKind::Summary => Ok(Self::Summary),
        }
    }

    fn parse_amount(value: String) -> Result<Decimal, CommandError> {
        Decimal::from_str(value.trim())
            .or_else(|_| Decimal::from_scientific(value.trim()))
            .map_err(|_| CommandError::MalformedAmount { value })
    }
}
