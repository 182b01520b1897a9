/// Immutable records of balance-affecting events.
pub mod transaction;

/// A single account: balance, opening balance and ordered history.
/// Operations are checked first and applied as a [`transaction::Transaction`] afterwards.
pub mod account;

/// Turns raw user input into typed [`command::LedgerCommand`]s.
/// Presence of fields and amount format are checked here, before anything reaches the ledger.
pub mod command;

/// Ledger interface, plus the in-memory [`ledger::bank::Bank`] implementation.
/// Routes every operation to the right account(s) by account number.
pub mod ledger;

/// Script driven front end, used by the binary and by integration tests.
pub mod bin_utils;
