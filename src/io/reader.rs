use chrono::NaiveDate;
use std::{io::Read, str::FromStr};

use crate::common::{
    command::{Command, NewOwner, OpenKind},
    money::Money,
};
use crate::domain::currency::Currency;

#[derive(serde::Deserialize)]
/// Internal CSV row representation matching the input headers. Most cells
/// stay empty on any given row; each op reads just the columns it needs.
struct CsvRow {
    op: String,
    account: Option<u64>,
    to: Option<u64>,
    amount: Option<String>,
    currency: Option<String>,
    kind: Option<String>,
    first: Option<String>,
    last: Option<String>,
    born: Option<String>,
    address: Option<String>,
    memo: Option<String>,
}

/// Reads and validates bank commands from a CSV reader.
///
/// Supported headers:
/// `op,account,to,amount,currency,kind,first,last,born,address,memo`.
/// The `op` field is normalized to lowercase; `open` rows need
/// kind/first/last/born/address, the money ops need account and amount, and
/// `currency` stays optional on deposit/withdraw rows. Errors carry the
/// account context where one exists.
///
/// # Examples
///
/// ```
/// use bank_ledger::io::reader::read_commands;
/// use bank_ledger::common::command::Command;
/// use csv::ReaderBuilder;
///
/// let data = "op,account,to,amount,currency,kind,first,last,born,address,memo\n\
/// open,,,,,checking,Max,Mustermann,1990-01-20,Musterstadt,\n\
/// deposit,1,,100.00,,,,,,,\n";
/// let mut rdr = ReaderBuilder::new().from_reader(data.as_bytes());
/// let commands: Vec<_> = read_commands(&mut rdr).collect();
///
/// assert!(matches!(commands[0], Ok(Command::Open { .. })));
/// assert!(matches!(commands[1], Ok(Command::Deposit { account: 1, .. })));
/// ```
pub fn read_commands<R: Read>(
    rdr: &mut csv::Reader<R>,
) -> impl Iterator<Item = Result<Command, String>> + '_ {
    rdr.deserialize::<CsvRow>().map(|res| {
        let row = res.map_err(|e| e.to_string())?;
        let op = row.op.trim().to_ascii_lowercase();

        match op.as_str() {
            "open" => parse_open(&row),
            "close" => Ok(Command::Close {
                account: require_account(&row, "close")?,
            }),
            "deposit" => Ok(Command::Deposit {
                account: require_account(&row, "deposit")?,
                amount: require_amount(&row, "deposit")?,
                currency: optional_currency(&row)?,
            }),
            "withdraw" => Ok(Command::Withdraw {
                account: require_account(&row, "withdraw")?,
                amount: require_amount(&row, "withdraw")?,
                currency: optional_currency(&row)?,
            }),
            "transfer" => {
                let from = require_account(&row, "transfer")?;
                let to = row
                    .to
                    .ok_or_else(|| format!("transfer missing destination for account {from}"))?;
                Ok(Command::Transfer {
                    from,
                    to,
                    amount: require_amount(&row, "transfer")?,
                    memo: row.memo.clone().unwrap_or_default(),
                })
            }
            "lock" => Ok(Command::Lock {
                account: require_account(&row, "lock")?,
            }),
            "unlock" => Ok(Command::Unlock {
                account: require_account(&row, "unlock")?,
            }),
            "currency" => {
                let account = require_account(&row, "currency")?;
                let code = row
                    .currency
                    .as_deref()
                    .ok_or_else(|| format!("currency missing code for account {account}"))?;
                Ok(Command::ChangeCurrency {
                    account,
                    currency: Currency::from_str(code)?,
                })
            }
            other => Err(format!("unknown op: {other}")),
        }
    })
}

fn parse_open(row: &CsvRow) -> Result<Command, String> {
    let kind = match row.kind.as_deref().map(str::trim) {
        Some("checking") => OpenKind::Checking,
        Some("savings") => OpenKind::Savings,
        Some(other) => return Err(format!("open has unknown kind: {other}")),
        None => return Err("open missing kind".to_string()),
    };
    let first = row.first.clone().ok_or("open missing first name")?;
    let last = row.last.clone().ok_or("open missing last name")?;
    let address = row.address.clone().ok_or("open missing address")?;
    let born = row.born.as_deref().ok_or("open missing birth date")?;
    let birth_date = NaiveDate::parse_from_str(born, "%Y-%m-%d")
        .map_err(|e| format!("open has invalid birth date {born}: {e}"))?;

    Ok(Command::Open {
        kind,
        owner: NewOwner {
            first_name: first,
            last_name: last,
            birth_date,
            address,
        },
    })
}

fn require_account(row: &CsvRow, op: &str) -> Result<u64, String> {
    row.account.ok_or_else(|| format!("{op} missing account"))
}

fn require_amount(row: &CsvRow, op: &str) -> Result<Money, String> {
    let raw = row.amount.as_deref().ok_or_else(|| {
        let account = row.account.unwrap_or_default();
        format!("{op} missing amount for account {account}")
    })?;
    Money::from_str(raw).map_err(|e| e.to_string())
}

fn optional_currency(row: &CsvRow) -> Result<Option<Currency>, String> {
    row.currency
        .as_deref()
        .map(Currency::from_str)
        .transpose()
}
