//! Text menu front end of the [`Teller`]. Generic over its input and output
//! so it can be driven by a script in tests.

use std::{
    fmt,
    io::{BufRead, Write},
};

use anyhow::Result;
use rust_decimal::Decimal;

use crate::{account::AccountId, command::parse_amount, store::AccountStore, teller::Teller};
use format::{format_amount, format_record};
use menu::{MainChoice, SessionChoice};

pub mod format;
pub mod menu;

enum Flow {
    Continue,
    Exit,
}

enum AmountEntry {
    Amount(Decimal),
    /// Already reported to the user.
    Rejected,
    Closed,
}

pub struct Console<'w, R, W: 'w> {
    pub input: R,
    pub output: &'w mut W,
}

impl<'w, R, W> Console<'w, R, W>
where
    R: BufRead,
    W: Write + 'w,
{
    /// Runs until the user quits or the input ends.
    ///
    /// Domain errors are printed and the menu is shown again; only I/O
    /// errors on the console itself are returned.
    pub fn run<S: AccountStore>(mut self, teller: &mut Teller<S>) -> Result<()> {
        writeln!(self.output, "Welcome to the ATM system!")?;
        loop {
            writeln!(self.output, "\n{}", MainChoice::MENU)?;
            let Some(choice) = self.prompt("Enter your choice: ")? else {
                return Ok(());
            };
            let flow = match MainChoice::parse(&choice) {
                Some(MainChoice::LogIn) => self.log_in(teller)?,
                Some(MainChoice::CreateAccount) => self.create_account(teller)?,
                Some(MainChoice::Quit) => {
                    writeln!(self.output, "Thank you for using the ATM system!")?;
                    Flow::Exit
                }
                None => {
                    writeln!(self.output, "Invalid choice. Please try again.")?;
                    Flow::Continue
                }
            };
            if let Flow::Exit = flow {
                return Ok(());
            }
        }
    }

    /// Reads one line. `None` once the input is exhausted.
    fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.output, "{message}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let len = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(len);
        Ok(Some(line))
    }

    fn report(&mut self, err: impl fmt::Display) -> Result<()> {
        writeln!(self.output, "{err}")?;
        Ok(())
    }

    fn create_account<S: AccountStore>(&mut self, teller: &mut Teller<S>) -> Result<Flow> {
        let Some(id) = self.prompt("Enter your desired user ID: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(pin) = self.prompt("Enter your desired PIN: ")? else {
            return Ok(Flow::Exit);
        };
        match teller.create_account(&id, &pin) {
            Ok(()) => writeln!(self.output, "Account created successfully.")?,
            Err(err) => self.report(err)?,
        }
        Ok(Flow::Continue)
    }

    fn log_in<S: AccountStore>(&mut self, teller: &mut Teller<S>) -> Result<Flow> {
        let Some(id) = self.prompt("Enter your user ID: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(pin) = self.prompt("Enter your PIN: ")? else {
            return Ok(Flow::Exit);
        };
        let id: AccountId = match teller.authenticate(&id, &pin) {
            Ok(acc) => acc.id().to_owned(),
            Err(err) => {
                self.report(err)?;
                return Ok(Flow::Continue);
            }
        };
        writeln!(self.output, "Authentication successful.")?;
        self.session(teller, &id)
    }

    fn session<S: AccountStore>(&mut self, teller: &mut Teller<S>, id: &str) -> Result<Flow> {
        loop {
            writeln!(self.output, "\n{}", SessionChoice::MENU)?;
            let Some(choice) = self.prompt("Enter your choice: ")? else {
                return Ok(Flow::Exit);
            };
            let flow = match SessionChoice::parse(&choice) {
                Some(SessionChoice::History) => self.history(teller, id)?,
                Some(SessionChoice::Withdraw) => self.withdraw(teller, id)?,
                Some(SessionChoice::Deposit) => self.deposit(teller, id)?,
                Some(SessionChoice::Transfer) => self.transfer(teller, id)?,
                Some(SessionChoice::Balance) => self.balance(teller, id)?,
                Some(SessionChoice::ChangePin) => self.change_pin(teller, id)?,
                Some(SessionChoice::LogOut) => {
                    writeln!(self.output, "Logging out.")?;
                    return Ok(Flow::Continue);
                }
                None => {
                    writeln!(self.output, "Invalid option. Please try again.")?;
                    Flow::Continue
                }
            };
            if let Flow::Exit = flow {
                return Ok(Flow::Exit);
            }
        }
    }

    fn history<S: AccountStore>(&mut self, teller: &Teller<S>, id: &str) -> Result<Flow> {
        let acc = match teller.ledger().account(id) {
            Ok(acc) => acc,
            Err(err) => {
                self.report(err)?;
                return Ok(Flow::Continue);
            }
        };
        writeln!(self.output, "Transaction History:")?;
        if acc.history().is_empty() {
            writeln!(self.output, "No transactions yet.")?;
        }
        for record in acc.history() {
            writeln!(self.output, "{}", format_record(record))?;
        }
        Ok(Flow::Continue)
    }

    fn balance<S: AccountStore>(&mut self, teller: &Teller<S>, id: &str) -> Result<Flow> {
        match teller.ledger().account(id) {
            Ok(acc) => writeln!(
                self.output,
                "Your current balance is: $ {}",
                format_amount(acc.balance())
            )?,
            Err(err) => self.report(err)?,
        }
        Ok(Flow::Continue)
    }

    fn read_amount(&mut self, message: &str) -> Result<AmountEntry> {
        let Some(input) = self.prompt(message)? else {
            return Ok(AmountEntry::Closed);
        };
        match parse_amount(&input) {
            Ok(amount) => Ok(AmountEntry::Amount(amount)),
            Err(err) => {
                self.report(err)?;
                Ok(AmountEntry::Rejected)
            }
        }
    }

    fn withdraw<S: AccountStore>(&mut self, teller: &mut Teller<S>, id: &str) -> Result<Flow> {
        let amount = match self.read_amount("Enter the amount to withdraw: $")? {
            AmountEntry::Amount(amount) => amount,
            AmountEntry::Rejected => return Ok(Flow::Continue),
            AmountEntry::Closed => return Ok(Flow::Exit),
        };
        match teller.withdraw(id, amount) {
            Ok(()) => writeln!(self.output, "Withdrew $ {}.", format_amount(amount))?,
            Err(err) => self.report(err)?,
        }
        Ok(Flow::Continue)
    }

    fn deposit<S: AccountStore>(&mut self, teller: &mut Teller<S>, id: &str) -> Result<Flow> {
        let amount = match self.read_amount("Enter the amount to deposit: $")? {
            AmountEntry::Amount(amount) => amount,
            AmountEntry::Rejected => return Ok(Flow::Continue),
            AmountEntry::Closed => return Ok(Flow::Exit),
        };
        match teller.deposit(id, amount) {
            Ok(()) => writeln!(self.output, "Deposited $ {}.", format_amount(amount))?,
            Err(err) => self.report(err)?,
        }
        Ok(Flow::Continue)
    }

    fn transfer<S: AccountStore>(&mut self, teller: &mut Teller<S>, id: &str) -> Result<Flow> {
        let Some(recipient) = self.prompt("Enter the recipient's user ID: ")? else {
            return Ok(Flow::Exit);
        };
        if !teller.ledger().contains(&recipient) {
            writeln!(self.output, "Recipient not found.")?;
            return Ok(Flow::Continue);
        }
        let amount = match self.read_amount("Enter the amount to transfer: $")? {
            AmountEntry::Amount(amount) => amount,
            AmountEntry::Rejected => return Ok(Flow::Continue),
            AmountEntry::Closed => return Ok(Flow::Exit),
        };
        match teller.transfer(id, &recipient, amount) {
            Ok(()) => writeln!(
                self.output,
                "Transferred $ {} to {recipient}.",
                format_amount(amount)
            )?,
            Err(err) => self.report(err)?,
        }
        Ok(Flow::Continue)
    }

    fn change_pin<S: AccountStore>(&mut self, teller: &mut Teller<S>, id: &str) -> Result<Flow> {
        let Some(new_pin) = self.prompt("Enter your new PIN: ")? else {
            return Ok(Flow::Exit);
        };
        match teller.change_pin(id, &new_pin) {
            Ok(()) => writeln!(self.output, "PIN changed successfully.")?,
            Err(err) => self.report(err)?,
        }
        Ok(Flow::Continue)
    }
}
