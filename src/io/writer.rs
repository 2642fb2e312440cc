use std::{collections::HashMap, io::Write};

use crate::domain::account::{Account, AccountNumber};

#[derive(serde::Serialize)]
/// Internal CSV output row representation matching the statement headers.
///
/// Headers written (in this order):
/// `account,kind,owner,currency,balance,overdraft_limit,locked`.
/// Monetary fields are formatted to 2 decimal places as strings; the
/// overdraft column stays empty for savings accounts.
struct StatementRow {
    account: AccountNumber,
    kind: &'static str,
    owner: String,
    currency: &'static str,
    balance: String,
    overdraft_limit: String,
    locked: bool,
}

/// Writes the final account statement to a CSV writer.
///
/// The output includes a header row:
/// `account,kind,owner,currency,balance,overdraft_limit,locked`.
/// For deterministic output, accounts are sorted by number ascending before
/// writing.
///
/// # Errors
///
/// Returns a `csv::Error` if writing/serializing any row fails.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use bank_ledger::io::writer::write_statement;
/// use bank_ledger::domain::account::{Account, AccountKind};
/// use bank_ledger::domain::customer::Customer;
/// use chrono::NaiveDate;
///
/// let owner = Customer::new("Max", "Mustermann", "Musterstadt",
///     NaiveDate::from_ymd_opt(1990, 1, 20).unwrap());
/// let mut accounts = HashMap::new();
/// accounts.insert(2, Account::new(2, owner.clone(), AccountKind::Savings));
/// accounts.insert(1, Account::new(1, owner, AccountKind::checking()));
///
/// let mut out = Vec::new();
/// write_statement(&mut out, &accounts).unwrap();
///
/// let s = String::from_utf8(out).unwrap();
/// assert!(s.starts_with("account,kind,owner,currency,balance,overdraft_limit,locked\n"));
/// // and rows are sorted by account number
/// assert!(s.contains("\n1,checking,"));
/// assert!(s.contains("\n2,savings,"));
/// ```
pub fn write_statement<W: Write>(
    writer: W,
    accounts: &HashMap<AccountNumber, Account>,
) -> Result<(), csv::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(writer);

    // Deterministic output: sort by account number.
    let mut numbers: Vec<AccountNumber> = accounts.keys().copied().collect();
    numbers.sort_unstable();

    for number in numbers {
        let acc = accounts.get(&number).expect("account exists");
        let row = StatementRow {
            account: number,
            kind: acc.kind().label(),
            owner: acc.owner().full_name(),
            currency: acc.currency().code(),
            balance: acc.balance().to_string_2dp(),
            overdraft_limit: acc
                .overdraft_limit()
                .map(|limit| limit.to_string_2dp())
                .unwrap_or_default(),
            locked: acc.is_locked(),
        };
        wtr.serialize(row)?;
    }

    wtr.flush()?;
    Ok(())
}
