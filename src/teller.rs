use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    account::Account,
    ledger::{Ledger, LedgerError},
    store::{AccountStore, StoreError},
};

#[derive(Debug, Error)]
pub enum TellerError {
    #[error(transparent)]
    LedgerErr(#[from] LedgerError),
    #[error(transparent)]
    StoreErr(#[from] StoreError),
}

/// A [`Ledger`] bound to the store it is flushed to.
///
/// Every successful state change (account creation, pin change, deposit,
/// withdrawal, transfer) rewrites the store. When the flush fails the change
/// stays applied in memory and the store error is returned.
pub struct Teller<S> {
    ledger: Ledger,
    store: S,
}

impl<S> Teller<S>
where
    S: AccountStore,
{
    pub fn open(store: S) -> Result<Self, StoreError> {
        let ledger = store.load()?;
        info!(accounts = ledger.len(), "Ledger loaded");
        Ok(Self { ledger, store })
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn authenticate(&self, id: &str, pin: &str) -> Result<&Account, TellerError> {
        self.ledger.authenticate(id, pin).map_err(|err| {
            warn!(id, "Authentication failed");
            err.into()
        })
    }

    pub fn create_account(&mut self, id: &str, pin: &str) -> Result<(), TellerError> {
        self.ledger.create_account(id, pin)?;
        info!(id, "Account created");
        self.flush()
    }

    pub fn change_pin(&mut self, id: &str, new_pin: &str) -> Result<(), TellerError> {
        self.ledger.change_pin(id, new_pin)?;
        info!(id, "Pin changed");
        self.flush()
    }

    pub fn deposit(&mut self, id: &str, amount: Decimal) -> Result<(), TellerError> {
        self.ledger.deposit(id, amount)?;
        debug!(id, %amount, "Deposit");
        self.flush()
    }

    pub fn withdraw(&mut self, id: &str, amount: Decimal) -> Result<(), TellerError> {
        self.ledger.withdraw(id, amount)?;
        debug!(id, %amount, "Withdrawal");
        self.flush()
    }

    pub fn transfer(&mut self, from: &str, to: &str, amount: Decimal) -> Result<(), TellerError> {
        self.ledger.transfer(from, to, amount)?;
        debug!(from, to, %amount, "Transfer");
        self.flush()
    }

    fn flush(&mut self) -> Result<(), TellerError> {
        self.store.save(&self.ledger)?;
        debug!(accounts = self.ledger.len(), "Ledger flushed");
        Ok(())
    }
}
