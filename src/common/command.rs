use chrono::NaiveDate;

use crate::common::money::Money;
use crate::domain::account::AccountNumber;
use crate::domain::currency::Currency;

/// Owner details carried by an `open` row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOwner {
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub address: String,
}

/// Which account kind an `open` row asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenKind {
    Checking,
    Savings,
}

/// A bank command parsed from one CSV row, sent from the reader to the worker.
/// Deposit and withdraw carry an optional source currency; without one the
/// amount is taken in the account's own currency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Open {
        kind: OpenKind,
        owner: NewOwner,
    },
    Close {
        account: AccountNumber,
    },
    Deposit {
        account: AccountNumber,
        amount: Money,
        currency: Option<Currency>,
    },
    Withdraw {
        account: AccountNumber,
        amount: Money,
        currency: Option<Currency>,
    },
    Transfer {
        from: AccountNumber,
        to: AccountNumber,
        amount: Money,
        memo: String,
    },
    Lock {
        account: AccountNumber,
    },
    Unlock {
        account: AccountNumber,
    },
    ChangeCurrency {
        account: AccountNumber,
        currency: Currency,
    },
}
