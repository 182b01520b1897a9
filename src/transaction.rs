use std::fmt;

use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    Deposit,
    Withdraw,
    TransferOut,
    TransferIn,
}

impl TransactionKind {
    /// Whether this kind of event adds funds to the account that records it.
    pub fn is_credit(self) -> bool {
        matches!(self, TransactionKind::Deposit | TransactionKind::TransferIn)
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TransactionKind::Deposit => "Deposit",
            TransactionKind::Withdraw => "Withdraw",
            TransactionKind::TransferOut => "Transfer Out",
            TransactionKind::TransferIn => "Transfer In",
        })
    }
}

/// A single balance-affecting event, as recorded by the account it happened to.
///
/// Fields are private: once an account has recorded a transaction it can only be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transaction {
    kind: TransactionKind,
    amount: Decimal,
    balance: Decimal,
}

impl Transaction {
    pub(crate) fn new(kind: TransactionKind, amount: Decimal, balance: Decimal) -> Self {
        Self {
            kind,
            amount,
            balance,
        }
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Balance of the owning account right after this transaction.
    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// Amount with the sign it contributes to the balance.
    pub fn signed_amount(&self) -> Decimal {
        if self.kind.is_credit() {
            self.amount
        } else {
            -self.amount
        }
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}, Balance after transaction: {}",
            self.kind, self.amount, self.balance
        )
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn signed_amount_follows_kind() {
        let deposit = Transaction::new(TransactionKind::Deposit, dec!(10), dec!(10));
        let transfer_in = Transaction::new(TransactionKind::TransferIn, dec!(5), dec!(15));
        let withdraw = Transaction::new(TransactionKind::Withdraw, dec!(3), dec!(12));
        let transfer_out = Transaction::new(TransactionKind::TransferOut, dec!(2), dec!(10));
        assert_eq!(deposit.signed_amount(), dec!(10));
        assert_eq!(transfer_in.signed_amount(), dec!(5));
        assert_eq!(withdraw.signed_amount(), dec!(-3));
        assert_eq!(transfer_out.signed_amount(), dec!(-2));
    }

    #[test]
    fn display() {
        let tx = Transaction::new(TransactionKind::TransferOut, dec!(30), dec!(20));
        assert_eq!(
            tx.to_string(),
            "Transfer Out: 30, Balance after transaction: 20"
        );
        let tx = Transaction::new(TransactionKind::Deposit, dec!(12.50), dec!(12.50));
        assert_eq!(tx.to_string(), "Deposit: 12.50, Balance after transaction: 12.50");
    }
}
