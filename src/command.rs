use std::{fmt, str::FromStr};

use rust_decimal::{Decimal, prelude::Zero};
use thiserror::Error;

use crate::account::AccountId;

/// Entered amounts are whole cents at most.
pub const AMOUNT_SCALE: u32 = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountAction {
    Deposit,
    Withdraw,
    TransferOut { to: AccountId },
    TransferIn { from: AccountId },
}

impl fmt::Display for AccountAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountAction::Deposit => f.write_str("deposit"),
            AccountAction::Withdraw => f.write_str("withdrawal"),
            AccountAction::TransferOut { .. } | AccountAction::TransferIn { .. } => {
                f.write_str("transfer")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AccountCommand {
    pub action: AccountAction,
    pub amount: Decimal,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Invalid amount for {action}.")]
    InvalidAmount { action: AccountAction },
    #[error("Invalid input `{input}`. Please enter a valid number.")]
    MalformedAmount { input: String },
}

impl AccountCommand {
    /// Builds a command, rejecting amounts that are not strictly positive.
    pub fn new(action: AccountAction, amount: Decimal) -> Result<Self, CommandError> {
        if amount > Decimal::zero() {
            Ok(Self { action, amount })
        } else {
            Err(CommandError::InvalidAmount { action })
        }
    }
}

/// Parses free-text amount entry, e.g. `" 12.50 "`.
///
/// Surrounding whitespace is ignored and scientific notation (`1e3`) is
/// accepted. Anything that is not a number, or that carries more than
/// [`AMOUNT_SCALE`] significant fractional digits, is reported as
/// [`CommandError::MalformedAmount`]. The sign is not checked here, see
/// [`AccountCommand::new`].
pub fn parse_amount(input: &str) -> Result<Decimal, CommandError> {
    let trimmed = input.trim();
    let malformed = || CommandError::MalformedAmount {
        input: trimmed.to_string(),
    };
    let amount = Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| malformed())?;
    if amount.normalize().scale() > AMOUNT_SCALE {
        return Err(malformed());
    }
    Ok(amount)
}
