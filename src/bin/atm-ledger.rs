use std::io;

use anyhow::{Context, Result};
use atm_ledger::{
    console::Console,
    store::json_file_store::{DEFAULT_DATA_FILE, JsonFileStore},
    teller::Teller,
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(true),
        )
        .init();

    let filename = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_DATA_FILE.to_string());
    let mut teller = Teller::open(JsonFileStore::new(&filename))
        .with_context(|| format!("Failed to load accounts from `{filename}`"))?;

    let console = Console {
        input: io::stdin().lock(),
        output: &mut io::stdout(),
    };
    console.run(&mut teller)
}
