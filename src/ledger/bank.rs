use std::fmt;

use indexmap::{IndexMap, map::Entry};
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::{
    account::{Account, AccountNumber},
    transaction::Transaction,
};

use super::{Ledger, LedgerError};

pub const DEFAULT_BANK_NAME: &str = "My Bank";

/// In-memory [`Ledger`]. Accounts are kept in the order they were created, which is
/// also the order of the summary listing.
#[derive(Debug, Clone)]
pub struct Bank {
    name: String,
    accounts: IndexMap<AccountNumber, Account>,
}

impl Default for Bank {
    fn default() -> Self {
        Self::new(DEFAULT_BANK_NAME)
    }
}

impl Bank {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            accounts: IndexMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    fn account_mut(&mut self, number: &str) -> Result<&mut Account, LedgerError> {
        self.accounts
            .get_mut(number)
            .ok_or_else(|| LedgerError::AccountNotFound {
                number: number.to_owned(),
            })
    }
}

impl Ledger for Bank {
    fn create_account(&mut self, number: &str, holder: &str) -> Result<&Account, LedgerError> {
        if number.trim().is_empty() {
            debug!(holder, "account creation rejected: blank account number");
            return Err(LedgerError::BlankAccountNumber);
        }
        match self.accounts.entry(number.to_owned()) {
            Entry::Occupied(_) => {
                debug!(account = number, "account creation rejected: duplicate number");
                Err(LedgerError::DuplicateAccount {
                    number: number.to_owned(),
                })
            }
            Entry::Vacant(entry) => {
                info!(account = number, holder, "account created");
                Ok(&*entry.insert(Account::new(number, holder)))
            }
        }
    }

    fn account(&self, number: &str) -> Option<&Account> {
        self.accounts.get(number)
    }

    fn deposit_to(&mut self, number: &str, amount: Decimal) -> Result<Transaction, LedgerError> {
        let tx = self
            .account_mut(number)?
            .deposit(amount)
            .inspect_err(|err| debug!(account = number, %amount, %err, "deposit rejected"))?;
        debug!(account = number, %amount, balance = %tx.balance(), "deposit accepted");
        Ok(tx)
    }

    fn withdraw_from(
        &mut self,
        number: &str,
        amount: Decimal,
    ) -> Result<Transaction, LedgerError> {
        let tx = self
            .account_mut(number)?
            .withdraw(amount)
            .inspect_err(|err| debug!(account = number, %amount, %err, "withdrawal rejected"))?;
        debug!(account = number, %amount, balance = %tx.balance(), "withdrawal accepted");
        Ok(tx)
    }

    fn transfer_between(
        &mut self,
        from: &str,
        to: &str,
        amount: Decimal,
    ) -> Result<Transaction, LedgerError> {
        let not_found = || LedgerError::TransferAccountsNotFound {
            from: from.to_owned(),
            to: to.to_owned(),
        };
        // lookups below need two distinct keys
        if from == to {
            if !self.accounts.contains_key(from) {
                return Err(not_found());
            }
            debug!(account = from, "transfer rejected: same source and destination");
            return Err(LedgerError::SelfTransfer {
                number: from.to_owned(),
            });
        }
        let [Some(source), Some(recipient)] = self.accounts.get_disjoint_mut([from, to]) else {
            return Err(not_found());
        };
        let tx = source
            .transfer(amount, recipient)
            .inspect_err(|err| debug!(from, to, %amount, %err, "transfer rejected"))?;
        debug!(from, to, %amount, balance = %tx.balance(), "transfer accepted");
        Ok(tx)
    }

    fn summary(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Bank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bank: {}\nAccounts:\n", self.name)?;
        for (i, account) in self.accounts.values().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{account}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use crate::{
        account::{AccountError, DebitAction},
        command::LedgerCommand,
        ledger::Outcome,
        transaction::TransactionKind,
    };

    use super::*;

    fn bank_with(accounts: &[(&str, Decimal)]) -> Bank {
        let mut bank = Bank::default();
        for (number, balance) in accounts {
            bank.create_account(number, "Holder").unwrap();
            if *balance > Decimal::ZERO {
                bank.deposit_to(number, *balance).unwrap();
            }
        }
        bank
    }

    #[test]
    fn create_account() {
        let mut bank = Bank::new("Test Bank");
        let acc = bank.create_account("100", "Alice").unwrap();
        assert_eq!(acc.number(), "100");
        assert_eq!(acc.holder(), "Alice");
        assert_eq!(acc.balance(), Decimal::ZERO);

        bank.deposit_to("100", dec!(5)).unwrap();
        let err = bank.create_account("100", "Mallory").unwrap_err();
        assert_eq!(
            err,
            LedgerError::DuplicateAccount {
                number: "100".to_string()
            }
        );
        assert_eq!(err.to_string(), "Account number already exists.");
        // existing account is untouched
        let acc = bank.account("100").unwrap();
        assert_eq!(acc.holder(), "Alice");
        assert_eq!(acc.balance(), dec!(5));
        assert_eq!(bank.accounts().count(), 1);
    }

    #[test]
    fn blank_account_number() {
        let mut bank = Bank::default();
        for number in ["", "   "] {
            let err = bank.create_account(number, "Alice").unwrap_err();
            assert_eq!(err, LedgerError::BlankAccountNumber);
        }
        assert_eq!(bank.accounts().count(), 0);
    }

    #[test]
    fn deposit_then_history() {
        let mut bank = Bank::default();
        bank.create_account("100", "Alice").unwrap();
        bank.deposit_to("100", dec!(50)).unwrap();

        assert_eq!(bank.balance_of("100").unwrap(), dec!(50));
        let history = bank.history_of("100").unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].kind(), TransactionKind::Deposit);
        assert_eq!(history[0].amount(), dec!(50));
        assert_eq!(history[0].balance(), dec!(50));
    }

    #[test]
    fn rejected_operations_leave_state_unchanged() {
        let mut bank = bank_with(&[("100", dec!(50))]);

        let err = bank.withdraw_from("100", dec!(60)).unwrap_err();
        assert_eq!(
            err,
            LedgerError::AccountErr(AccountError::InsufficientFunds {
                action: DebitAction::Withdraw
            })
        );
        let err = bank.deposit_to("100", dec!(0)).unwrap_err();
        assert_eq!(err, LedgerError::AccountErr(AccountError::InvalidAmount));
        assert_eq!(err.to_string(), "Deposit amount must be positive.");

        assert_eq!(bank.balance_of("100").unwrap(), dec!(50));
        assert_eq!(bank.history_of("100").unwrap().len(), 1);
    }

    #[test]
    fn unknown_accounts() {
        let mut bank = Bank::default();
        let err = bank.deposit_to("999", dec!(10)).unwrap_err();
        assert_eq!(
            err,
            LedgerError::AccountNotFound {
                number: "999".to_string()
            }
        );
        assert_eq!(err.to_string(), "Account not found.");
        assert!(bank.account("999").is_none());
        assert_eq!(bank.accounts().count(), 0);

        assert!(matches!(
            bank.withdraw_from("999", dec!(1)),
            Err(LedgerError::AccountNotFound { .. })
        ));
        assert!(matches!(
            bank.balance_of("999"),
            Err(LedgerError::AccountNotFound { .. })
        ));
        assert!(matches!(
            bank.history_of("999"),
            Err(LedgerError::AccountNotFound { .. })
        ));

        bank.create_account("100", "Alice").unwrap();
        for (from, to) in [("100", "999"), ("999", "100"), ("999", "999")] {
            let err = bank.transfer_between(from, to, dec!(1)).unwrap_err();
            assert!(matches!(err, LedgerError::TransferAccountsNotFound { .. }));
            assert_eq!(err.to_string(), "One or both accounts not found.");
        }
    }

    #[test]
    fn transfer_between() {
        let mut bank = bank_with(&[("100", dec!(50)), ("200", dec!(0))]);

        let tx = bank.transfer_between("100", "200", dec!(30)).unwrap();
        assert_eq!(tx.kind(), TransactionKind::TransferOut);
        assert_eq!(bank.balance_of("100").unwrap(), dec!(20));
        assert_eq!(bank.balance_of("200").unwrap(), dec!(30));
        assert_eq!(
            bank.history_of("100").unwrap().last().unwrap().kind(),
            TransactionKind::TransferOut
        );
        assert_eq!(
            bank.history_of("200").unwrap(),
            &[Transaction::new(TransactionKind::TransferIn, dec!(30), dec!(30))]
        );

        // the other direction works too, regardless of key order
        bank.transfer_between("200", "100", dec!(10)).unwrap();
        assert_eq!(bank.balance_of("100").unwrap(), dec!(30));
        assert_eq!(bank.balance_of("200").unwrap(), dec!(20));

        let err = bank.transfer_between("100", "200", dec!(31)).unwrap_err();
        assert!(matches!(
            err,
            LedgerError::AccountErr(AccountError::InsufficientFunds {
                action: DebitAction::Transfer
            })
        ));
        assert_eq!(bank.balance_of("100").unwrap(), dec!(30));
        assert_eq!(bank.balance_of("200").unwrap(), dec!(20));

        for account in bank.accounts() {
            assert_eq!(account.replayed_balance(), account.balance());
        }
    }

    #[test]
    fn self_transfer_is_rejected() {
        let mut bank = bank_with(&[("100", dec!(50))]);
        let err = bank.transfer_between("100", "100", dec!(10)).unwrap_err();
        assert_eq!(
            err,
            LedgerError::SelfTransfer {
                number: "100".to_string()
            }
        );
        assert_eq!(bank.balance_of("100").unwrap(), dec!(50));
        assert_eq!(bank.history_of("100").unwrap().len(), 1);
    }

    #[test]
    fn full_balance_withdrawal() {
        let mut bank = bank_with(&[("100", dec!(50))]);
        let tx = bank.withdraw_from("100", dec!(50)).unwrap();
        assert_eq!(tx.balance(), Decimal::ZERO);
        assert_eq!(bank.balance_of("100").unwrap(), Decimal::ZERO);
    }

    #[test]
    fn summary() {
        let mut bank = Bank::new("Test Bank");
        assert_eq!(bank.summary(), "Bank: Test Bank\nAccounts:\n");

        bank.create_account("200", "Bob").unwrap();
        bank.create_account("100", "Alice").unwrap();
        bank.deposit_to("100", dec!(12.5)).unwrap();
        assert_eq!(
            bank.summary(),
            "Bank: Test Bank\nAccounts:\n\
             Account[200]: Bob, Balance: 0\n\
             Account[100]: Alice, Balance: 12.5"
        );

        // creation order, not textual or numeric order of the numbers
        let mut bank = Bank::new("Test Bank");
        bank.create_account("9", "Nine").unwrap();
        bank.create_account("10", "Ten").unwrap();
        bank.create_account("1", "One").unwrap();
        assert_eq!(
            bank.summary(),
            "Bank: Test Bank\nAccounts:\n\
             Account[9]: Nine, Balance: 0\n\
             Account[10]: Ten, Balance: 0\n\
             Account[1]: One, Balance: 0"
        );
        let numbers: Vec<_> = bank.accounts().map(Account::number).collect();
        assert_eq!(numbers, ["9", "10", "1"]);
    }

    #[test]
    fn empty_history_notification() {
        let mut bank = Bank::default();
        bank.create_account("1", "Alice").unwrap();
        let outcome = bank
            .execute(LedgerCommand::History {
                number: "1".to_string(),
            })
            .unwrap();
        assert_eq!(outcome.to_string(), "Transaction history for account 1:\n");
    }

    #[test]
    fn execute_commands() {
        let mut bank = Bank::default();
        let run = |bank: &mut Bank, cmd| bank.execute(cmd).map(|outcome| outcome.to_string());

        assert_eq!(
            run(
                &mut bank,
                LedgerCommand::CreateAccount {
                    number: "100".to_string(),
                    holder: "Alice".to_string()
                }
            )
            .unwrap(),
            "Account created for Alice with account number 100."
        );
        bank.create_account("200", "Bob").unwrap();
        assert_eq!(
            run(
                &mut bank,
                LedgerCommand::Deposit {
                    number: "100".to_string(),
                    amount: dec!(50)
                }
            )
            .unwrap(),
            "Deposited 50. New balance is 50."
        );
        assert_eq!(
            run(
                &mut bank,
                LedgerCommand::Withdraw {
                    number: "100".to_string(),
                    amount: dec!(5)
                }
            )
            .unwrap(),
            "Withdrew 5. New balance is 45."
        );
        assert_eq!(
            run(
                &mut bank,
                LedgerCommand::Transfer {
                    from: "100".to_string(),
                    to: "200".to_string(),
                    amount: dec!(15)
                }
            )
            .unwrap(),
            "Transferred 15 to account 200. New balance is 30."
        );
        assert_eq!(
            run(
                &mut bank,
                LedgerCommand::Balance {
                    number: "200".to_string()
                }
            )
            .unwrap(),
            "Balance for account 200: 15"
        );
        assert_eq!(
            run(
                &mut bank,
                LedgerCommand::History {
                    number: "100".to_string()
                }
            )
            .unwrap(),
            "Transaction history for account 100:\n\
             Deposit: 50, Balance after transaction: 50\n\
             Withdraw: 5, Balance after transaction: 45\n\
             Transfer Out: 15, Balance after transaction: 30"
        );
        assert_eq!(
            bank.execute(LedgerCommand::Summary).unwrap(),
            Outcome::Summary(bank.summary())
        );

        let err = run(
            &mut bank,
            LedgerCommand::Withdraw {
                number: "100".to_string(),
                amount: dec!(1000),
            },
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid withdraw amount or insufficient balance."
        );
    }
}
