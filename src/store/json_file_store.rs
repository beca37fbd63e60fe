use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tracing::debug;

use super::{AccountStore, StoreError, StoredAccounts, restore, snapshot};
use crate::ledger::Ledger;

pub const DEFAULT_DATA_FILE: &str = "users.json";

/// Stores accounts as a single JSON object: `{ "<id>": { "pin": "..", "balance": 0 } }`.
///
/// Saving truncates and rewrites the file in place, it is not atomic.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_err(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn json_err(&self, source: serde_json::Error) -> StoreError {
        StoreError::Json {
            path: self.path.clone(),
            source,
        }
    }
}

impl AccountStore for JsonFileStore {
    /// A missing file is an empty ledger.
    fn load(&self) -> Result<Ledger, StoreError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No data file, starting empty");
                return Ok(Ledger::default());
            }
            Err(err) => return Err(self.io_err(err)),
        };
        let accounts: StoredAccounts =
            serde_json::from_reader(BufReader::new(file)).map_err(|err| self.json_err(err))?;
        debug!(path = %self.path.display(), accounts = accounts.len(), "Loaded accounts");
        Ok(restore(accounts))
    }

    fn save(&mut self, ledger: &Ledger) -> Result<(), StoreError> {
        let accounts = snapshot(ledger);
        let file = File::create(&self.path).map_err(|err| self.io_err(err))?;
        let mut writer = BufWriter::new(file);
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(b"    "));
        accounts
            .serialize(&mut serializer)
            .map_err(|err| self.json_err(err))?;
        writer.flush().map_err(|err| self.io_err(err))?;
        debug!(path = %self.path.display(), accounts = accounts.len(), "Saved accounts");
        Ok(())
    }
}
