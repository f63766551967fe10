use super::Bank;
use crate::card_number::is_valid_format;
use crate::cli_io::{output_accounts, output_transactions, CliOptions, Command, RawInputCmd};
use crate::errors::BankError;
use crate::workflow::{ConfirmationWorkflow, OperationKind};
use csv::{ReaderBuilder, Trim};
use std::io;
use std::path::Path;

/// Row counts of a replayed session
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub applied: usize,
    /// Well formed rows the bank refused
    pub rejected: usize,
    /// Rows that could not be read as a command
    pub skipped: usize,
}

impl Bank {
    /// Returns error in the event that file cannot be read
    /// Else mutates the bank state
    /// Rows with correct format that fail business rules are logged & counted, never fatal
    pub fn stream_process_csv(
        &mut self,
        in_file_path: &Path,
        workflow: &mut ConfirmationWorkflow,
    ) -> Result<SessionSummary, io::Error> {
        let rdr = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .has_headers(true)
            .from_path(in_file_path)?;
        self.stream_process(rdr, workflow)
    }

    pub fn stream_process_reader<R: io::Read>(
        &mut self,
        input: R,
        workflow: &mut ConfirmationWorkflow,
    ) -> Result<SessionSummary, io::Error> {
        let rdr = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .has_headers(true)
            .from_reader(input);
        self.stream_process(rdr, workflow)
    }

    fn stream_process<R: io::Read>(
        &mut self,
        mut rdr: csv::Reader<R>,
        workflow: &mut ConfirmationWorkflow,
    ) -> Result<SessionSummary, io::Error> {
        let mut summary = SessionSummary::default();

        for (row, result) in rdr.deserialize::<RawInputCmd>().enumerate() {
            let record = match result {
                Ok(record) => record,
                Err(e) if e.is_io_error() => return Err(e.into()),
                Err(e) => {
                    tracing::warn!(row, error = %e, "unreadable row skipped");
                    summary.skipped += 1;
                    continue;
                }
            };
            let cmd = match record.convert_to_cmd() {
                Ok(cmd) => cmd,
                Err(e) => {
                    tracing::warn!(row, error = ?e, "invalid command skipped");
                    summary.skipped += 1;
                    continue;
                }
            };
            match self.apply_command(workflow, &cmd) {
                Ok(()) => summary.applied += 1,
                Err(e) => {
                    tracing::warn!(row, command = ?cmd, error = %e, "command rejected");
                    summary.rejected += 1;
                }
            }
        }

        Ok(summary)
    }

    /// Runs one session step against the logged in account.
    /// Money movements go through stage & confirm.
    pub fn apply_command(
        &mut self,
        workflow: &mut ConfirmationWorkflow,
        cmd: &Command,
    ) -> Result<(), BankError> {
        match cmd {
            Command::Register { user, password } => {
                self.register(user, password)?;
            }
            Command::Login { user, password } => {
                self.login(user, password)?;
            }
            Command::Logout => {
                if workflow.staged().is_some() {
                    workflow.cancel()?;
                }
                self.logout();
            }
            Command::Deposit { amount } => {
                self.stage_and_confirm(workflow, OperationKind::Deposit, amount, None)?;
            }
            Command::Withdraw { amount } => {
                self.stage_and_confirm(workflow, OperationKind::Withdrawal, amount, None)?;
            }
            Command::Transfer { amount, target } => {
                let card = self.card_for_target(target);
                self.stage_and_confirm(workflow, OperationKind::Transfer, amount, Some(&card))?;
            }
            Command::AddContact { target } => {
                let id = self.require_current()?;
                let card = self.card_for_target(target);
                let contact = self.lookup_contact(id, &card)?;
                self.add_contact(id, contact)?;
            }
            Command::MarkRead => {
                let id = self.require_current()?;
                self.mark_all_read(id)?;
            }
            Command::ClearNotifications => {
                let id = self.require_current()?;
                self.clear_all(id)?;
            }
            Command::SetStyle { style } => {
                let id = self.require_current()?;
                self.set_card_style(id, style)?;
            }
        }
        Ok(())
    }

    fn stage_and_confirm(
        &mut self,
        workflow: &mut ConfirmationWorkflow,
        kind: OperationKind,
        amount: &str,
        recipient_card: Option<&str>,
    ) -> Result<(), BankError> {
        let id = self.require_current()?;
        workflow.stage(self, id, kind, amount, recipient_card)?;
        let receipt = workflow.confirm(self)?;
        if let Some(contact) = &receipt.suggested_contact {
            tracing::info!(account = id, card = %contact.card_number, "recipient not in contacts");
        }
        Ok(())
    }

    /// Card numbers pass through, anything else is looked up as a user name
    fn card_for_target(&self, target: &str) -> String {
        if is_valid_format(target) {
            return target.to_string();
        }
        self.find_by_name(target)
            .map(|acnt| acnt.card_number.clone())
            .unwrap_or_else(|| target.to_string())
    }

    /// Replays the session named on the command line and writes the report
    pub fn streaming_execute(&mut self, cli_input: &CliOptions) -> anyhow::Result<SessionSummary> {
        let mut workflow = ConfirmationWorkflow::new(self.config.currency_view());
        let summary = self.stream_process_csv(&cli_input.input_file, &mut workflow)?;
        tracing::info!(
            applied = summary.applied,
            rejected = summary.rejected,
            skipped = summary.skipped,
            "session replayed"
        );

        let output = cli_input.output_method();
        match &cli_input.history {
            Some(name) => {
                let acnt = self
                    .find_by_name(name)
                    .ok_or_else(|| anyhow::anyhow!("no account named `{name}`"))?;
                output_transactions(acnt, &output)?;
            }
            None => output_accounts(self.list_accounts(), &output)?,
        }
        Ok(summary)
    }
}

#[cfg(test)]
pub mod tests {
    use crate::bank::tests::tst_bank;
    use crate::bank::SessionSummary;
    use crate::cli_io::Command;
    use crate::errors::BankError;
    use crate::test::utils::get_test_input_file;
    use crate::workflow::ConfirmationWorkflow;
    use rust_decimal_macros::dec;

    #[test]
    fn tst_stream_process_csv() {
        let mut bank = tst_bank();
        let mut workflow = ConfirmationWorkflow::default();
        let summary = bank
            .stream_process_csv(&get_test_input_file("session.csv"), &mut workflow)
            .unwrap();
        assert_eq!(
            summary,
            SessionSummary {
                applied: 10,
                rejected: 2,
                skipped: 1
            }
        );

        let ana = bank.find_by_name("Ana").unwrap();
        assert_eq!(ana.balance, dec!(60));
        assert_eq!(ana.contacts.len(), 1);
        let luis = bank.find_by_name("Luis").unwrap();
        assert_eq!(luis.balance, dec!(40));
        assert_eq!(luis.unread_count(), 0);
        assert_eq!(luis.card_style.key(), "ocean");
    }

    #[test]
    fn tst_stream_process_missing_file() {
        let mut bank = tst_bank();
        let mut workflow = ConfirmationWorkflow::default();
        let res = bank.stream_process_csv(&get_test_input_file("does_not_exist.csv"), &mut workflow);
        assert!(res.is_err());
    }

    #[test]
    fn tst_stream_process_reader_broken_rows() {
        let data = "command,user,password,amount,target\n\
                    register,Ana,pw1,,\n\
                    deposit,,,ten,\n\
                    deposit,,,\n\
                    deposit,,,5,\n";
        let mut bank = tst_bank();
        let mut workflow = ConfirmationWorkflow::default();
        let summary = bank
            .stream_process_reader(data.as_bytes(), &mut workflow)
            .unwrap();
        assert_eq!(summary.applied, 2);
        assert_eq!(summary.rejected, 1, "`ten` is not an amount");
        assert_eq!(summary.skipped, 1, "Deposit without amount");
        assert_eq!(bank.find_by_name("Ana").unwrap().balance, dec!(5));
    }

    #[test]
    fn tst_apply_command_requires_login() {
        let mut bank = tst_bank();
        let mut workflow = ConfirmationWorkflow::default();
        let res = bank.apply_command(
            &mut workflow,
            &Command::Deposit {
                amount: "5".to_string(),
            },
        );
        assert_eq!(res, Err(BankError::NotLoggedIn));
        assert_eq!(
            bank.apply_command(&mut workflow, &Command::MarkRead),
            Err(BankError::NotLoggedIn)
        );
    }
}
