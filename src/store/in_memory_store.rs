use super::{AccountStore, StoreError, StoredAccounts, restore, snapshot};
use crate::ledger::Ledger;

/// Keeps the last saved snapshot in memory. Nothing survives the process.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    accounts: StoredAccounts,
    saves: usize,
}

impl InMemoryStore {
    pub fn new(accounts: StoredAccounts) -> Self {
        Self { accounts, saves: 0 }
    }

    pub fn accounts(&self) -> &StoredAccounts {
        &self.accounts
    }

    /// Number of flushes received so far.
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl AccountStore for InMemoryStore {
    fn load(&self) -> Result<Ledger, StoreError> {
        Ok(restore(self.accounts.clone()))
    }

    fn save(&mut self, ledger: &Ledger) -> Result<(), StoreError> {
        self.accounts = snapshot(ledger);
        self.saves += 1;
        Ok(())
    }
}
