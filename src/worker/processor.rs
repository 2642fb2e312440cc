use crate::{
    common::{
        command::{Command, OpenKind},
        error::AppError,
    },
    domain::{bank::Bank, customer::Customer},
};

/// Applies parsed commands to the bank, one at a time. Policy refusals
/// (unknown account, insufficient funds, locked account) are logged and
/// skipped; only caller misuse aborts the run.
#[derive(Debug, Default)]
pub struct Processor {}

impl Processor {
    pub fn new() -> Self {
        Self {}
    }

    pub fn process(&mut self, bank: &mut Bank, command: Command) -> Result<(), AppError> {
        match command {
            Command::Open { kind, owner } => {
                let customer = Customer::new(
                    owner.first_name,
                    owner.last_name,
                    owner.address,
                    owner.birth_date,
                );
                match kind {
                    OpenKind::Checking => bank.create_checking(customer),
                    OpenKind::Savings => bank.create_savings(customer),
                };
            }
            Command::Close { account } => {
                if !bank.delete_account(account) {
                    tracing::warn!(account, "close refused: unknown account");
                }
            }
            Command::Deposit {
                account,
                amount,
                currency,
            } => {
                let done = match currency {
                    Some(currency) => bank.deposit_in(account, amount, currency)?,
                    None => bank.deposit(account, amount)?,
                };
                if !done {
                    tracing::warn!(account, %amount, "deposit refused");
                }
            }
            Command::Withdraw {
                account,
                amount,
                currency,
            } => {
                let done = match currency {
                    Some(currency) => bank.withdraw_in(account, amount, currency)?,
                    None => bank.withdraw(account, amount)?,
                };
                if !done {
                    tracing::warn!(account, %amount, "withdrawal refused");
                }
            }
            Command::Transfer {
                from,
                to,
                amount,
                memo,
            } => {
                if !bank.transfer(from, to, amount, &memo)? {
                    tracing::warn!(from, to, %amount, "transfer refused");
                }
            }
            Command::Lock { account } => {
                if !bank.lock(account) {
                    tracing::warn!(account, "lock refused: unknown account");
                }
            }
            Command::Unlock { account } => {
                if !bank.unlock(account) {
                    tracing::warn!(account, "unlock refused: unknown account");
                }
            }
            Command::ChangeCurrency { account, currency } => {
                if !bank.change_currency(account, currency) {
                    tracing::warn!(account, "currency change refused: unknown account");
                }
            }
        }
        Ok(())
    }
}
