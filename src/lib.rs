/// Account state: balance, pin and transaction history.
/// Balance changes are records produced by handling commands, then applied.
pub mod account;

/// Validated amount commands executed by [`account`].
pub mod command;

/// In-memory collection of all accounts, coordinating command parsing and
/// account lookups.
pub mod ledger;

/// Persistence interface, with a JSON file and an in-memory implementation.
pub mod store;

/// Ledger plus store. Decides when the ledger is flushed.
pub mod teller;

/// Interactive text menu. Lives here rather than in the binary so it can be
/// driven from integration tests.
pub mod console;
