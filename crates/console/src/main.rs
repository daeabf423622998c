use std::io;

use anyhow::Context;

use stockkeep_console::{Console, ConsoleConfig};

fn main() -> anyhow::Result<()> {
    let config = ConsoleConfig::from_env().context("invalid configuration")?;
    stockkeep_observability::init(&config.log_directive, config.log_format);

    tracing::info!(
        report_format = ?config.report_format,
        currency = %config.money.symbol,
        max_top_n = config.max_top_n,
        "starting inventory console"
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = Console::new(config, stdin.lock(), stdout.lock());
    console.run().context("console session failed")?;

    tracing::info!(products = console.store().size(), "inventory console closed");
    Ok(())
}
