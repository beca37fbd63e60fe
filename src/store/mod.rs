use std::{collections::BTreeMap, io, path::PathBuf};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    account::{Account, AccountId},
    ledger::Ledger,
};

pub mod in_memory_store;
pub mod json_file_store;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to access `{}`: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Malformed account data in `{}`: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Persisted part of an account. History is intentionally left out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredAccount {
    pub pin: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub balance: Decimal,
}

/// Account id to account data, the shape of the data file.
pub type StoredAccounts = BTreeMap<AccountId, StoredAccount>;

/// Where the ledger lives between runs.
///
/// Every save is a full rewrite of the account set.
pub trait AccountStore {
    fn load(&self) -> Result<Ledger, StoreError>;

    fn save(&mut self, ledger: &Ledger) -> Result<(), StoreError>;
}

pub fn snapshot(ledger: &Ledger) -> StoredAccounts {
    ledger
        .accounts()
        .map(|acc| {
            (
                acc.id().to_owned(),
                StoredAccount {
                    pin: acc.pin().to_owned(),
                    balance: acc.balance(),
                },
            )
        })
        .collect()
}

pub fn restore(accounts: StoredAccounts) -> Ledger {
    Ledger::from_accounts(
        accounts
            .into_iter()
            .map(|(id, stored)| Account::restore(id, stored.pin, stored.balance)),
    )
}
