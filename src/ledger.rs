use std::collections::BTreeMap;

use chrono::Local;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    account::{Account, AccountError, AccountId},
    command::{AccountAction, AccountCommand, CommandError},
};

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Account `{id}` not found.")]
    AccountNotFound { id: AccountId },
    #[error("Authentication failed. Invalid user ID or PIN.")]
    AuthenticationFailed,
    #[error("User ID `{id}` already exists. Please choose a different one.")]
    DuplicateAccountId { id: AccountId },
    #[error(transparent)]
    CommandErr(#[from] CommandError),
    #[error(transparent)]
    AccountErr(#[from] AccountError),
}

/// All accounts known to the teller, keyed by id.
#[derive(Debug, Default)]
pub struct Ledger {
    accounts: BTreeMap<AccountId, Account>,
}

impl Ledger {
    pub fn from_accounts(accounts: impl IntoIterator<Item = Account>) -> Self {
        Self {
            accounts: accounts
                .into_iter()
                .map(|acc| (acc.id().to_owned(), acc))
                .collect(),
        }
    }

    /// Accounts in id order.
    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.accounts.contains_key(id)
    }

    pub fn account(&self, id: &str) -> Result<&Account, LedgerError> {
        self.accounts
            .get(id)
            .ok_or_else(|| LedgerError::AccountNotFound { id: id.to_owned() })
    }

    fn account_mut(&mut self, id: &str) -> Result<&mut Account, LedgerError> {
        self.accounts
            .get_mut(id)
            .ok_or_else(|| LedgerError::AccountNotFound { id: id.to_owned() })
    }

    /// Unknown ids and wrong pins are reported the same way.
    pub fn authenticate(&self, id: &str, pin: &str) -> Result<&Account, LedgerError> {
        match self.accounts.get(id) {
            Some(acc) if acc.pin_matches(pin) => Ok(acc),
            _ => Err(LedgerError::AuthenticationFailed),
        }
    }

    pub fn create_account(&mut self, id: &str, pin: &str) -> Result<&Account, LedgerError> {
        if self.accounts.contains_key(id) {
            return Err(LedgerError::DuplicateAccountId { id: id.to_owned() });
        }
        let acc = Account::new(id.to_owned(), pin.to_owned());
        Ok(self.accounts.entry(id.to_owned()).or_insert(acc))
    }

    pub fn change_pin(&mut self, id: &str, new_pin: &str) -> Result<(), LedgerError> {
        self.account_mut(id)?.change_pin(new_pin.to_owned());
        Ok(())
    }

    pub fn deposit(&mut self, id: &str, amount: Decimal) -> Result<(), LedgerError> {
        let command = AccountCommand::new(AccountAction::Deposit, amount)?;
        self.execute(id, &command)
    }

    pub fn withdraw(&mut self, id: &str, amount: Decimal) -> Result<(), LedgerError> {
        let command = AccountCommand::new(AccountAction::Withdraw, amount)?;
        self.execute(id, &command)
    }

    /// Moves `amount` from `from` to `to`.
    ///
    /// Both sides are validated before either is applied, so a rejected
    /// transfer leaves both accounts untouched. Both records share one
    /// timestamp. Transferring to oneself is allowed and only adds the two
    /// records.
    pub fn transfer(&mut self, from: &str, to: &str, amount: Decimal) -> Result<(), LedgerError> {
        let debit_command = AccountCommand::new(
            AccountAction::TransferOut { to: to.to_owned() },
            amount,
        )?;
        let credit_command = AccountCommand::new(
            AccountAction::TransferIn {
                from: from.to_owned(),
            },
            amount,
        )?;
        let timestamp = Local::now();
        let debit = self.account(from)?.handle_command(&debit_command, timestamp)?;
        let credit = self.account(to)?.handle_command(&credit_command, timestamp)?;
        self.account_mut(from)?.apply(debit);
        self.account_mut(to)?.apply(credit);
        Ok(())
    }

    fn execute(&mut self, id: &str, command: &AccountCommand) -> Result<(), LedgerError> {
        let acc = self.account_mut(id)?;
        let record = acc.handle_command(command, Local::now())?;
        acc.apply(record);
        Ok(())
    }
}
