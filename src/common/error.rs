use crate::common::money::Money;
use crate::domain::account::AccountNumber;

/// Caller-misuse failures raised by account and bank operations. Insufficient
/// funds and unknown account numbers are ordinary `false` results, not errors.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BankError {
    #[error("invalid amount: {0}")]
    InvalidAmount(Money),
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    #[error("account {0} is locked")]
    Locked(AccountNumber),
}

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("missing input csv path. usage: cargo run -- <commands.csv> [routing-number]")]
    MissingArg,
    #[error("failed to open input file: {0}")]
    OpenInput(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("bank error: {0}")]
    Bank(#[from] BankError),
}
