use crate::account::Account;
use crate::config::BankConfig;
use crate::constants::{DEFAULT_EXCHANGE_RATE, PRECISION};
use crate::currency::{parse_exchange_rate, Currency};
use clap::Parser;
use csv::Writer;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io;
use std::path::PathBuf;

/// Options and data to export results
pub enum OutputMethod {
    /// Output to csv file
    Csv(PathBuf),
    /// Output to console
    StdOutput,
}

/// Output a collection of accounts
pub fn output_accounts(accounts: &[Account], output: &OutputMethod) -> Result<(), csv::Error> {
    match output {
        OutputMethod::Csv(file_path) => write_accounts(accounts, &mut Writer::from_path(file_path)?),
        OutputMethod::StdOutput => write_accounts(accounts, &mut Writer::from_writer(io::stdout())),
    }
}

/// Output one account's transaction log, oldest first
pub fn output_transactions(account: &Account, output: &OutputMethod) -> Result<(), csv::Error> {
    match output {
        OutputMethod::Csv(file_path) => {
            write_transactions(account, &mut Writer::from_path(file_path)?)
        }
        OutputMethod::StdOutput => {
            write_transactions(account, &mut Writer::from_writer(io::stdout()))
        }
    }
}

fn write_accounts<W: io::Write>(accounts: &[Account], wtr: &mut Writer<W>) -> Result<(), csv::Error> {
    wtr.write_record(["id", "name", "card", "balance", "style", "unread"])?;
    for acnt in accounts {
        wtr.write_record(&[
            acnt.id.to_string(),
            acnt.name.clone(),
            acnt.card_number.clone(),
            format!("{:.*}", PRECISION as usize, acnt.balance),
            acnt.card_style.to_string(),
            acnt.unread_count().to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

fn write_transactions<W: io::Write>(account: &Account, wtr: &mut Writer<W>) -> Result<(), csv::Error> {
    wtr.write_record([
        "id",
        "kind",
        "amount",
        "timestamp",
        "counterparty",
        "counterparty_card",
    ])?;
    for txn in &account.transactions {
        wtr.write_record(&[
            txn.id.to_string(),
            txn.kind.to_string(),
            format!("{:.*}", PRECISION as usize, txn.amount),
            txn.timestamp.to_rfc3339(),
            txn.counterparty_name.clone().unwrap_or_default(),
            txn.counterparty_card.clone().unwrap_or_default(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Replays a prepaid card session script and reports the resulting accounts
#[derive(Debug, Parser)]
#[command(name = "prepaidcard", version)]
pub struct CliOptions {
    /// Session script, csv with header `command,user,password,amount,target`
    pub input_file: PathBuf,

    /// Write the report to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Currency the script's amounts are typed in
    #[arg(long, default_value = "EUR")]
    pub currency: Currency,

    /// Fixed EUR -> USD rate, strictly positive
    #[arg(long, default_value = DEFAULT_EXCHANGE_RATE, value_parser = parse_exchange_rate)]
    pub exchange_rate: Decimal,

    /// Report this user's transaction log instead of the account list
    #[arg(long, value_name = "USER")]
    pub history: Option<String>,
}

impl CliOptions {
    pub fn output_method(&self) -> OutputMethod {
        match &self.output {
            Some(path) => OutputMethod::Csv(path.clone()),
            None => OutputMethod::StdOutput,
        }
    }

    pub fn bank_config(&self) -> BankConfig {
        BankConfig {
            exchange_rate: self.exchange_rate,
            display_currency: self.currency,
            ..BankConfig::default()
        }
    }
}

/// A session step as typed by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Register { user: String, password: String },
    Login { user: String, password: String },
    Logout,
    Deposit { amount: String },
    Withdraw { amount: String },
    /// `target` is a card number or a user name
    Transfer { amount: String, target: String },
    AddContact { target: String },
    MarkRead,
    ClearNotifications,
    SetStyle { style: String },
}

/// One row of a session script
#[derive(Debug, Deserialize)]
pub struct RawInputCmd {
    command: String,
    #[serde(default)]
    user: Option<String>,
    #[serde(default)]
    password: Option<String>,
    #[serde(default)]
    amount: Option<String>,
    #[serde(default)]
    target: Option<String>,
}

#[derive(PartialEq, Debug)]
pub enum InputCmdErr {
    MissingAmount,
    MissingTarget,
    UnsupportedCommand,
}

impl RawInputCmd {
    pub fn convert_to_cmd(self) -> Result<Command, InputCmdErr> {
        let amount = || self.amount.clone().ok_or(InputCmdErr::MissingAmount);
        let target = || self.target.clone().ok_or(InputCmdErr::MissingTarget);
        // Empty credentials are left for the bank to reject
        let user = || self.user.clone().unwrap_or_default();
        let password = || self.password.clone().unwrap_or_default();

        match self.command.as_str() {
            "register" => Ok(Command::Register {
                user: user(),
                password: password(),
            }),
            "login" => Ok(Command::Login {
                user: user(),
                password: password(),
            }),
            "logout" => Ok(Command::Logout),
            "deposit" => Ok(Command::Deposit { amount: amount()? }),
            "withdraw" | "withdrawal" => Ok(Command::Withdraw { amount: amount()? }),
            "transfer" => Ok(Command::Transfer {
                amount: amount()?,
                target: target()?,
            }),
            "add_contact" => Ok(Command::AddContact { target: target()? }),
            "mark_read" => Ok(Command::MarkRead),
            "clear_notifications" => Ok(Command::ClearNotifications),
            "set_style" => Ok(Command::SetStyle { style: target()? }),
            _ => Err(InputCmdErr::UnsupportedCommand),
        }
    }
}
