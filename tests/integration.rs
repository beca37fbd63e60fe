use std::str::from_utf8;

use atm_ledger::{
    console::Console,
    store::{
        AccountStore,
        in_memory_store::InMemoryStore,
        json_file_store::JsonFileStore,
    },
    teller::Teller,
};
use rust_decimal_macros::dec;
use tempfile::TempDir;

const SESSION: &str = include_str!("session.txt");

fn run_script<S: AccountStore>(teller: &mut Teller<S>, script: &str) -> String {
    let mut output = Vec::new();
    let console = Console {
        input: script.as_bytes(),
        output: &mut output,
    };
    console.run(teller).unwrap();
    from_utf8(&output).unwrap().to_owned()
}

#[test]
fn scripted_session() {
    let mut teller = Teller::open(InMemoryStore::default()).unwrap();
    let output = run_script(&mut teller, SESSION);

    assert!(output.starts_with("Welcome to the ATM system!"));
    assert_eq!(output.matches("Account created successfully.").count(), 2);
    assert!(output.contains("User ID `alice` already exists. Please choose a different one."));
    assert!(output.contains("Authentication failed. Invalid user ID or PIN."));
    assert!(output.contains("Authentication successful."));
    assert!(output.contains("Deposited $ 1,000.00."));
    assert!(output.contains("Invalid input `ten`. Please enter a valid number."));
    assert!(output.contains("Invalid amount for deposit."));
    assert!(output.contains("Recipient not found."));
    assert!(output.contains("Transferred $ 400.00 to bob."));
    assert!(output.contains("Insufficient funds."));
    assert!(output.contains("Withdrew $ 99.50."));
    assert!(output.contains("Your current balance is: $ 500.50"));
    assert!(output.contains("Invalid option. Please try again."));
    assert!(output.contains("PIN changed successfully."));
    assert!(output.contains("Logging out."));
    assert!(output.contains("Invalid choice. Please try again."));
    assert!(output.trim_end().ends_with("Thank you for using the ATM system!"));

    let history: Vec<&str> = output
        .lines()
        .skip_while(|line| *line != "Transaction History:")
        .skip(1)
        .take(3)
        .collect();
    assert!(history[0].ends_with(" - Deposit - $ 1,000.00"), "{history:?}");
    assert!(history[1].ends_with(" - Transfer to bob - $ -400.00"), "{history:?}");
    assert!(history[2].ends_with(" - Withdrawal - $ -99.50"), "{history:?}");

    let ledger = teller.ledger();
    assert_eq!(ledger.account("alice").unwrap().balance(), dec!(500.50));
    assert_eq!(ledger.account("bob").unwrap().balance(), dec!(400));
    assert!(ledger.authenticate("alice", "4321").is_ok());

    let stored = teller.store().accounts();
    assert_eq!(stored["alice"].pin, "4321");
    assert_eq!(stored["alice"].balance, dec!(500.50));
    assert_eq!(stored["bob"].balance, dec!(400));
}

#[test]
fn accounts_survive_restart() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("users.json");

    let mut teller = Teller::open(JsonFileStore::new(&path)).unwrap();
    run_script(
        &mut teller,
        "2\ncarol\n7777\n1\ncarol\n7777\n3\n250.25\n7\n3\n",
    );
    drop(teller);

    let mut teller = Teller::open(JsonFileStore::new(&path)).unwrap();
    let output = run_script(&mut teller, "1\ncarol\n7777\n5\n1\n7\n3\n");
    assert!(output.contains("Your current balance is: $ 250.25"));
    // history is not persisted
    assert!(output.contains("No transactions yet."));
}

#[test]
fn failed_save_is_reported_and_session_continues() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing").join("users.json");

    let mut teller = Teller::open(JsonFileStore::new(&path)).unwrap();
    let output = run_script(
        &mut teller,
        "2\nerin\n5555\n1\nerin\n5555\n3\n20\n5\n7\n3\n",
    );

    assert_eq!(output.matches("Failed to access `").count(), 2, "{output}");
    assert!(!output.contains("Account created successfully."));
    assert!(!output.contains("Deposited $"));
    assert!(output.contains("Authentication successful."));
    assert!(output.contains("Your current balance is: $ 20.00"));
    assert!(output.trim_end().ends_with("Thank you for using the ATM system!"));
    assert!(!path.exists());
}

#[test]
fn balance_overflow_is_reported() {
    let mut teller = Teller::open(InMemoryStore::default()).unwrap();
    let output = run_script(
        &mut teller,
        "2\nalice\n1\n1\nalice\n1\n3\n79228162514264337593543950335\n3\n1\n7\n3\n",
    );

    assert!(output.contains("Balance limit exceeded."), "{output}");
    assert!(output.contains("Logging out."));
    let acc = teller.ledger().account("alice").unwrap();
    assert_eq!(acc.balance(), rust_decimal::Decimal::MAX);
    assert_eq!(acc.history().len(), 1);
}

#[test]
fn end_of_input_stops_quietly() {
    let mut teller = Teller::open(InMemoryStore::default()).unwrap();
    let output = run_script(&mut teller, "2\ndave\n");
    assert!(!output.contains("Account created successfully."));
    assert!(teller.ledger().is_empty());
    assert_eq!(teller.store().saves(), 0);
}
