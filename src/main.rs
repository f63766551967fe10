use clap::Parser;
use prepaidcard::bank::Bank;
use prepaidcard::cli_io::CliOptions;
use prepaidcard::logging::{init_logging, LoggingConfig};

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::from_env()).map_err(|e| anyhow::anyhow!("logging: {e}"))?;

    let cli_options = CliOptions::parse();
    let mut bank = Bank::with_config(cli_options.bank_config());
    bank.streaming_execute(&cli_options)?;
    Ok(())
}
