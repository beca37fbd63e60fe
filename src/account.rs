use std::fmt;

use chrono::{DateTime, Local};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::command::{AccountAction, AccountCommand};

pub type AccountId = String;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
    TransferOut { to: AccountId },
    TransferIn { from: AccountId },
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionKind::Deposit => f.write_str("Deposit"),
            TransactionKind::Withdrawal => f.write_str("Withdrawal"),
            TransactionKind::TransferOut { to } => write!(f, "Transfer to {to}"),
            TransactionKind::TransferIn { from } => write!(f, "Transfer from {from}"),
        }
    }
}

/// One balance change. The amount is signed: credits are positive, debits negative.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRecord {
    timestamp: DateTime<Local>,
    kind: TransactionKind,
    amount: Decimal,
}

impl TransactionRecord {
    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    pub fn kind(&self) -> &TransactionKind {
        &self.kind
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccountError {
    #[error("Insufficient funds.")]
    InsufficientFunds,
    #[error("Balance limit exceeded.")]
    BalanceOverflow,
}

#[derive(Debug, Clone)]
pub struct Account {
    id: AccountId,
    pin: String,
    balance: Decimal,
    history: Vec<TransactionRecord>,
}

impl Account {
    pub fn new(id: AccountId, pin: String) -> Self {
        Self::restore(id, pin, Decimal::ZERO)
    }

    /// Rebuilds an account from persisted data. History is never persisted,
    /// so it always starts empty.
    pub fn restore(id: AccountId, pin: String, balance: Decimal) -> Self {
        Self {
            id,
            pin,
            balance,
            history: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn pin(&self) -> &str {
        &self.pin
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn history(&self) -> &[TransactionRecord] {
        &self.history
    }

    pub fn pin_matches(&self, pin: &str) -> bool {
        self.pin == pin
    }

    pub fn change_pin(&mut self, pin: String) {
        self.pin = pin;
    }

    pub fn apply(&mut self, record: TransactionRecord) {
        self.balance += record.amount;
        self.history.push(record);
    }

    pub fn handle_command(
        &self,
        command: &AccountCommand,
        timestamp: DateTime<Local>,
    ) -> Result<TransactionRecord, AccountError> {
        let amount = command.amount;
        let (kind, amount) = match &command.action {
            AccountAction::Deposit => (TransactionKind::Deposit, amount),
            AccountAction::TransferIn { from } => {
                (TransactionKind::TransferIn { from: from.clone() }, amount)
            }
            AccountAction::Withdraw => {
                self.ensure_funds(amount)?;
                (TransactionKind::Withdrawal, -amount)
            }
            AccountAction::TransferOut { to } => {
                self.ensure_funds(amount)?;
                (TransactionKind::TransferOut { to: to.clone() }, -amount)
            }
        };
        // apply() adds without checking
        self.balance
            .checked_add(amount)
            .ok_or(AccountError::BalanceOverflow)?;
        Ok(TransactionRecord {
            timestamp,
            kind,
            amount,
        })
    }

    fn ensure_funds(&self, amount: Decimal) -> Result<(), AccountError> {
        if self.balance >= amount {
            Ok(())
        } else {
            Err(AccountError::InsufficientFunds)
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn command(action: AccountAction, amount: Decimal) -> AccountCommand {
        AccountCommand::new(action, amount).unwrap()
    }

    #[test]
    fn apply_records() {
        let now = Local::now();
        let mut acc = Account::new("alice".to_string(), "1111".to_string());
        acc.apply(TransactionRecord {
            timestamp: now,
            kind: TransactionKind::Deposit,
            amount: dec!(10),
        });
        assert_eq!(acc.balance(), dec!(10));
        assert_eq!(acc.history().len(), 1);

        // records are the source of truth, there's no more validation happening
        acc.apply(TransactionRecord {
            timestamp: now,
            kind: TransactionKind::Withdrawal,
            amount: dec!(-25),
        });
        assert_eq!(acc.balance(), dec!(-15));
        assert_eq!(acc.history().len(), 2);
        assert_eq!(acc.history()[1].kind(), &TransactionKind::Withdrawal);
    }

    #[test]
    fn handle_deposit_and_withdrawal() {
        let now = Local::now();
        let mut acc = Account::new("alice".to_string(), "1111".to_string());

        let withdrawal = command(AccountAction::Withdraw, dec!(5));
        let err = acc.handle_command(&withdrawal, now).unwrap_err();
        assert_eq!(err, AccountError::InsufficientFunds);
        assert!(acc.history().is_empty());

        let deposit = acc
            .handle_command(&command(AccountAction::Deposit, dec!(13)), now)
            .unwrap();
        assert_eq!(deposit.amount(), dec!(13));
        assert_eq!(deposit.kind(), &TransactionKind::Deposit);
        acc.apply(deposit);

        let withdrawn = acc.handle_command(&withdrawal, now).unwrap();
        assert_eq!(withdrawn.amount(), dec!(-5));
        assert_eq!(withdrawn.kind(), &TransactionKind::Withdrawal);
        acc.apply(withdrawn);
        assert_eq!(acc.balance(), dec!(8));

        // exact balance can be withdrawn
        let all = acc
            .handle_command(&command(AccountAction::Withdraw, dec!(8)), now)
            .unwrap();
        acc.apply(all);
        assert_eq!(acc.balance(), Decimal::ZERO);
    }

    #[test]
    fn handle_transfer_sides() {
        let now = Local::now();
        let acc = Account::restore("alice".to_string(), "1111".to_string(), dec!(50));

        let out = acc
            .handle_command(
                &command(
                    AccountAction::TransferOut {
                        to: "bob".to_string(),
                    },
                    dec!(20),
                ),
                now,
            )
            .unwrap();
        assert_eq!(out.amount(), dec!(-20));
        assert_eq!(out.kind().to_string(), "Transfer to bob");

        let err = acc
            .handle_command(
                &command(
                    AccountAction::TransferOut {
                        to: "bob".to_string(),
                    },
                    dec!(50.01),
                ),
                now,
            )
            .unwrap_err();
        assert_eq!(err, AccountError::InsufficientFunds);

        // incoming side never checks funds
        let empty = Account::new("bob".to_string(), "2222".to_string());
        let incoming = empty
            .handle_command(
                &command(
                    AccountAction::TransferIn {
                        from: "alice".to_string(),
                    },
                    dec!(20),
                ),
                now,
            )
            .unwrap();
        assert_eq!(incoming.amount(), dec!(20));
        assert_eq!(incoming.kind().to_string(), "Transfer from alice");
    }

    #[test]
    fn credit_past_max_balance_is_rejected() {
        let now = Local::now();
        let acc = Account::restore("alice".to_string(), "1111".to_string(), Decimal::MAX);

        let err = acc
            .handle_command(&command(AccountAction::Deposit, dec!(1)), now)
            .unwrap_err();
        assert_eq!(err, AccountError::BalanceOverflow);
        assert_eq!(err.to_string(), "Balance limit exceeded.");

        let err = acc
            .handle_command(
                &command(
                    AccountAction::TransferIn {
                        from: "bob".to_string(),
                    },
                    dec!(0.01),
                ),
                now,
            )
            .unwrap_err();
        assert_eq!(err, AccountError::BalanceOverflow);

        // debits still work at the limit
        let out = acc
            .handle_command(&command(AccountAction::Withdraw, Decimal::MAX), now)
            .unwrap();
        assert_eq!(out.amount(), -Decimal::MAX);
    }

    #[test]
    fn pin_comparison_is_exact() {
        let mut acc = Account::new("alice".to_string(), "abcd".to_string());
        assert!(acc.pin_matches("abcd"));
        assert!(!acc.pin_matches("ABCD"));
        assert!(!acc.pin_matches("abcd "));
        acc.change_pin("9999".to_string());
        assert!(acc.pin_matches("9999"));
        assert!(!acc.pin_matches("abcd"));
    }
}
