use std::fmt;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    account::{Account, AccountError, AccountNumber},
    command::LedgerCommand,
    transaction::Transaction,
};

pub mod bank;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Account number already exists.")]
    DuplicateAccount { number: AccountNumber },
    #[error("Account number must not be blank.")]
    BlankAccountNumber,
    #[error("Account not found.")]
    AccountNotFound { number: AccountNumber },
    #[error("One or both accounts not found.")]
    TransferAccountsNotFound {
        from: AccountNumber,
        to: AccountNumber,
    },
    #[error("Cannot transfer to the same account.")]
    SelfTransfer { number: AccountNumber },
    #[error(transparent)]
    AccountErr(#[from] AccountError),
}

/// Notification produced by a successful [`LedgerCommand`], rendered with `Display`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    AccountCreated {
        number: AccountNumber,
        holder: String,
    },
    Deposited(Transaction),
    Withdrew(Transaction),
    Transferred {
        to: AccountNumber,
        transaction: Transaction,
    },
    Balance {
        number: AccountNumber,
        balance: Decimal,
    },
    History {
        number: AccountNumber,
        transactions: Vec<Transaction>,
    },
    Summary(String),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::AccountCreated { number, holder } => {
                write!(f, "Account created for {holder} with account number {number}.")
            }
            Outcome::Deposited(tx) => write!(
                f,
                "Deposited {}. New balance is {}.",
                tx.amount(),
                tx.balance()
            ),
            Outcome::Withdrew(tx) => write!(
                f,
                "Withdrew {}. New balance is {}.",
                tx.amount(),
                tx.balance()
            ),
            Outcome::Transferred { to, transaction } => write!(
                f,
                "Transferred {} to account {to}. New balance is {}.",
                transaction.amount(),
                transaction.balance()
            ),
            Outcome::Balance { number, balance } => {
                write!(f, "Balance for account {number}: {balance}")
            }
            Outcome::History {
                number,
                transactions,
            } => {
                writeln!(f, "Transaction history for account {number}:")?;
                for (i, tx) in transactions.iter().enumerate() {
                    if i > 0 {
                        f.write_str("\n")?;
                    }
                    write!(f, "{tx}")?;
                }
                Ok(())
            }
            Outcome::Summary(summary) => f.write_str(summary),
        }
    }
}

/// Operations a front end can run against a set of accounts.
///
/// [`bank::Bank`] is the in-memory implementation.
pub trait Ledger {
    /// Opens a zero balance account. Fails if `number` is taken or blank.
    fn create_account(&mut self, number: &str, holder: &str) -> Result<&Account, LedgerError>;

    fn account(&self, number: &str) -> Option<&Account>;

    fn deposit_to(&mut self, number: &str, amount: Decimal) -> Result<Transaction, LedgerError>;

    fn withdraw_from(
        &mut self,
        number: &str,
        amount: Decimal,
    ) -> Result<Transaction, LedgerError>;

    /// Debits `from` and credits `to` as one step. Returns the transaction recorded on `from`.
    fn transfer_between(
        &mut self,
        from: &str,
        to: &str,
        amount: Decimal,
    ) -> Result<Transaction, LedgerError>;

    fn summary(&self) -> String;

    fn balance_of(&self, number: &str) -> Result<Decimal, LedgerError> {
        self.account(number)
            .map(Account::balance)
            .ok_or_else(|| LedgerError::AccountNotFound {
                number: number.to_owned(),
            })
    }

    fn history_of(&self, number: &str) -> Result<&[Transaction], LedgerError> {
        self.account(number)
            .map(Account::history)
            .ok_or_else(|| LedgerError::AccountNotFound {
                number: number.to_owned(),
            })
    }

    fn execute(&mut self, command: LedgerCommand) -> Result<Outcome, LedgerError> {
        match command {
            LedgerCommand::CreateAccount { number, holder } => {
                self.create_account(&number, &holder)?;
                Ok(Outcome::AccountCreated { number, holder })
            }
            LedgerCommand::Deposit { number, amount } => {
                self.deposit_to(&number, amount).map(Outcome::Deposited)
            }
            LedgerCommand::Withdraw { number, amount } => {
                self.withdraw_from(&number, amount).map(Outcome::Withdrew)
            }
            LedgerCommand::Transfer { from, to, amount } => {
                let transaction = self.transfer_between(&from, &to, amount)?;
                Ok(Outcome::Transferred { to, transaction })
            }
            LedgerCommand::Balance { number } => {
                let balance = self.balance_of(&number)?;
                Ok(Outcome::Balance { number, balance })
            }
            LedgerCommand::History { number } => {
                let transactions = self.history_of(&number)?.to_vec();
                Ok(Outcome::History {
                    number,
                    transactions,
                })
            }
            LedgerCommand::Summary => Ok(Outcome::Summary(self.summary())),
        }
    }
}
