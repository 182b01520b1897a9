use std::fmt;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::transaction::{Transaction, TransactionKind};

pub type AccountNumber = String;

/// Operations that take funds out of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebitAction {
    Withdraw,
    Transfer,
}

impl fmt::Display for DebitAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DebitAction::Withdraw => "withdraw",
            DebitAction::Transfer => "transfer",
        })
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccountError {
    #[error("Deposit amount must be positive.")]
    InvalidAmount,
    #[error("Invalid {action} amount or insufficient balance.")]
    InsufficientFunds { action: DebitAction },
    #[error("Resulting balance is out of the supported range.")]
    BalanceOverflow,
}

/// A named balance together with the ordered history that produced it.
///
/// Every change goes through two steps: an operation is first checked against the
/// current state and turned into a [`Transaction`], which is then applied. Nothing is
/// mutated until every check of an operation has passed.
#[derive(Debug, Clone)]
pub struct Account {
    number: AccountNumber,
    holder: String,
    opening_balance: Decimal,
    balance: Decimal,
    transactions: Vec<Transaction>,
}

impl Account {
    pub fn new(number: impl Into<AccountNumber>, holder: impl Into<String>) -> Self {
        Self::with_opening_balance(number, holder, Decimal::ZERO)
    }

    pub fn with_opening_balance(
        number: impl Into<AccountNumber>,
        holder: impl Into<String>,
        opening_balance: Decimal,
    ) -> Self {
        Self {
            number: number.into(),
            holder: holder.into(),
            opening_balance,
            balance: opening_balance,
            transactions: Vec::new(),
        }
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn holder(&self) -> &str {
        &self.holder
    }

    pub fn opening_balance(&self) -> Decimal {
        self.opening_balance
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// Transactions in the order they were recorded.
    pub fn history(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Balance recomputed from the opening balance and the history alone.
    /// Always equal to [`Account::balance`].
    pub fn replayed_balance(&self) -> Decimal {
        self.transactions
            .iter()
            .fold(self.opening_balance, |acc, tx| acc + tx.signed_amount())
    }

    pub fn deposit(&mut self, amount: Decimal) -> Result<Transaction, AccountError> {
        let tx = self.handle_credit(TransactionKind::Deposit, amount)?;
        Ok(self.apply(tx))
    }

    pub fn withdraw(&mut self, amount: Decimal) -> Result<Transaction, AccountError> {
        let tx = self.handle_debit(TransactionKind::Withdraw, amount, DebitAction::Withdraw)?;
        Ok(self.apply(tx))
    }

    /// Moves `amount` from this account to `recipient`.
    ///
    /// Both sides are checked before either is applied, so on error neither account
    /// has changed. Returns the `TransferOut` recorded on this account.
    pub fn transfer(
        &mut self,
        amount: Decimal,
        recipient: &mut Account,
    ) -> Result<Transaction, AccountError> {
        let outgoing =
            self.handle_debit(TransactionKind::TransferOut, amount, DebitAction::Transfer)?;
        let incoming = recipient.handle_credit(TransactionKind::TransferIn, amount)?;
        recipient.apply(incoming);
        Ok(self.apply(outgoing))
    }

    fn handle_credit(
        &self,
        kind: TransactionKind,
        amount: Decimal,
    ) -> Result<Transaction, AccountError> {
        if amount <= Decimal::ZERO {
            return Err(AccountError::InvalidAmount);
        }
        let balance = self
            .balance
            .checked_add(amount)
            .ok_or(AccountError::BalanceOverflow)?;
        Ok(Transaction::new(kind, amount, balance))
    }

    fn handle_debit(
        &self,
        kind: TransactionKind,
        amount: Decimal,
        action: DebitAction,
    ) -> Result<Transaction, AccountError> {
        if amount <= Decimal::ZERO || amount > self.balance {
            return Err(AccountError::InsufficientFunds { action });
        }
        Ok(Transaction::new(kind, amount, self.balance - amount))
    }

    // the transaction is the source of truth, no more validation happens here
    fn apply(&mut self, tx: Transaction) -> Transaction {
        self.balance = tx.balance();
        self.transactions.push(tx);
        tx
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Account[{}]: {}, Balance: {}",
            self.number, self.holder, self.balance
        )
    }
}
