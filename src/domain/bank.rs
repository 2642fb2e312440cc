use std::collections::HashMap;

use crate::common::error::BankError;
use crate::common::money::Money;
use crate::domain::account::{Account, AccountKind, AccountNumber, RoutingNumber};
use crate::domain::currency::Currency;
use crate::domain::customer::Customer;

/// Account registry of a single institution. The bank owns its accounts,
/// hands out the account numbers, and orchestrates transfers between two of
/// its own accounts.
///
/// Unknown account numbers and refused operations come back as `false`;
/// errors mean caller misuse. A locked account counts as a refusal at this
/// level, only the account itself reports it as `Locked`.
#[derive(Debug)]
pub struct Bank {
    routing_number: RoutingNumber,
    accounts: HashMap<AccountNumber, Account>,
    next_number: AccountNumber,
}

impl Bank {
    pub fn new(routing_number: RoutingNumber) -> Self {
        Self {
            routing_number,
            accounts: HashMap::new(),
            next_number: 1,
        }
    }

    pub fn routing_number(&self) -> RoutingNumber {
        self.routing_number
    }

    /// Creates an account of the given kind and returns its number. Numbers
    /// strictly increase and are never reused, not even after deletion.
    pub fn open_account(&mut self, kind: AccountKind, owner: Customer) -> AccountNumber {
        let number = self.next_number;
        self.next_number += 1;
        self.accounts.insert(number, Account::new(number, owner, kind));
        tracing::info!(account = number, kind = kind.label(), "account opened");
        number
    }

    pub fn create_checking(&mut self, owner: Customer) -> AccountNumber {
        self.open_account(AccountKind::checking(), owner)
    }

    pub fn create_savings(&mut self, owner: Customer) -> AccountNumber {
        self.open_account(AccountKind::Savings, owner)
    }

    pub fn delete_account(&mut self, number: AccountNumber) -> bool {
        let removed = self.accounts.remove(&number).is_some();
        if removed {
            tracing::info!(account = number, "account closed");
        }
        removed
    }

    /// Credits the account in its own currency. `Ok(false)` only for an
    /// unknown number; the plain deposit never minds the lock.
    pub fn deposit(&mut self, number: AccountNumber, amount: Money) -> Result<bool, BankError> {
        let Some(account) = self.accounts.get_mut(&number) else {
            return Ok(false);
        };
        account.deposit(amount)?;
        Ok(true)
    }

    pub fn deposit_in(
        &mut self,
        number: AccountNumber,
        amount: Money,
        currency: Currency,
    ) -> Result<bool, BankError> {
        let Some(account) = self.accounts.get_mut(&number) else {
            return Ok(false);
        };
        match account.deposit_in(amount, currency) {
            Ok(()) => Ok(true),
            Err(BankError::Locked(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Debits the account; the account's own floor decides, the bank adds no
    /// balance check of its own.
    pub fn withdraw(&mut self, number: AccountNumber, amount: Money) -> Result<bool, BankError> {
        let Some(account) = self.accounts.get_mut(&number) else {
            return Ok(false);
        };
        match account.withdraw(amount) {
            Ok(done) => Ok(done),
            Err(BankError::Locked(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    pub fn withdraw_in(
        &mut self,
        number: AccountNumber,
        amount: Money,
        currency: Currency,
    ) -> Result<bool, BankError> {
        let Some(account) = self.accounts.get_mut(&number) else {
            return Ok(false);
        };
        match account.withdraw_in(amount, currency) {
            Ok(done) => Ok(done),
            Err(BankError::Locked(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    pub fn balance(&self, number: AccountNumber) -> Option<Money> {
        self.accounts.get(&number).map(Account::balance)
    }

    pub fn lock(&mut self, number: AccountNumber) -> bool {
        match self.accounts.get_mut(&number) {
            Some(account) => {
                account.lock();
                true
            }
            None => false,
        }
    }

    pub fn unlock(&mut self, number: AccountNumber) -> bool {
        match self.accounts.get_mut(&number) {
            Some(account) => {
                account.unlock();
                true
            }
            None => false,
        }
    }

    pub fn change_currency(&mut self, number: AccountNumber, currency: Currency) -> bool {
        match self.accounts.get_mut(&number) {
            Some(account) => {
                account.change_currency(currency);
                true
            }
            None => false,
        }
    }

    /// Moves `amount` between two accounts of this bank. Fails fast with
    /// `false` on a self-transfer, an unknown side, or a locked side; the
    /// amount is validated before any debit so a committed debit is always
    /// followed by the credit.
    pub fn transfer(
        &mut self,
        from: AccountNumber,
        to: AccountNumber,
        amount: Money,
        memo: &str,
    ) -> Result<bool, BankError> {
        if from == to {
            return Ok(false);
        }
        let (Some(source), Some(dest)) = (self.accounts.get(&from), self.accounts.get(&to)) else {
            return Ok(false);
        };
        if source.is_locked() || dest.is_locked() {
            return Ok(false);
        }
        if amount.is_negative() {
            return Err(BankError::InvalidAmount(amount));
        }

        let Some(source) = self.accounts.get_mut(&from) else {
            return Ok(false);
        };
        match source.withdraw(amount) {
            Ok(true) => {}
            // insufficient funds, or a lock raced in; funds unmoved either way
            Ok(false) | Err(BankError::Locked(_)) => return Ok(false),
            Err(e) => return Err(e),
        }

        // the amount is non-negative and the destination was just checked
        let dest = self.accounts.get_mut(&to).expect("destination exists");
        dest.deposit(amount)?;

        tracing::debug!(from, to, %amount, memo, "transfer completed");
        Ok(true)
    }

    pub fn accounts(&self) -> &HashMap<AccountNumber, Account> {
        &self.accounts
    }

    pub fn account(&self, number: AccountNumber) -> Option<&Account> {
        self.accounts.get(&number)
    }

    pub fn account_mut(&mut self, number: AccountNumber) -> Option<&mut Account> {
        self.accounts.get_mut(&number)
    }

    /// Account numbers in the registry's own (unordered) iteration order.
    pub fn account_numbers(&self) -> impl Iterator<Item = AccountNumber> + '_ {
        self.accounts.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::str::FromStr;

    use chrono::NaiveDate;

    use super::*;

    fn owner() -> Customer {
        Customer::new(
            "Max",
            "Mustermann",
            "Musterstadt",
            NaiveDate::from_ymd_opt(1990, 1, 20).unwrap(),
        )
    }

    fn bank() -> Bank {
        Bank::new(10010010)
    }

    fn money(s: &str) -> Money {
        Money::from_str(s).unwrap()
    }

    #[test]
    fn open_accounts_get_distinct_numbers() {
        let mut bank = bank();
        let mut numbers = HashSet::new();
        for i in 0..5 {
            let number = if i % 2 == 0 {
                bank.create_checking(owner())
            } else {
                bank.create_savings(owner())
            };
            assert!(numbers.insert(number));
        }
        assert_eq!(bank.accounts().len(), 5);
    }

    #[test]
    fn deleted_numbers_are_never_reused() {
        let mut bank = bank();
        let first = bank.create_checking(owner());
        let second = bank.create_checking(owner());

        assert!(bank.delete_account(second));
        let third = bank.create_savings(owner());

        assert_ne!(third, second);
        assert_ne!(third, first);
        assert!(third > second);
        assert!(!bank.delete_account(second));
    }

    #[test]
    fn money_endpoints_report_unknown_accounts_as_false() {
        let mut bank = bank();
        assert!(!bank.deposit(99, money("1.00")).unwrap());
        assert!(!bank.withdraw(99, money("1.00")).unwrap());
        assert!(!bank.deposit_in(99, money("1.00"), Currency::Eur).unwrap());
        assert!(!bank.withdraw_in(99, money("1.00"), Currency::Eur).unwrap());
        assert_eq!(bank.balance(99), None);
        assert!(!bank.lock(99));
        assert!(!bank.unlock(99));
        assert!(!bank.change_currency(99, Currency::Dobra));
    }

    #[test]
    fn withdraw_delegates_to_the_account_floor() {
        let mut bank = bank();
        let acc = bank.create_checking(owner());
        bank.deposit(acc, money("100.00")).unwrap();

        // the overdraft makes this legal even though the balance is smaller
        assert!(bank.withdraw(acc, money("300.00")).unwrap());
        assert_eq!(bank.balance(acc), Some(money("-200.00")));

        let sav = bank.create_savings(owner());
        bank.deposit(sav, money("10.00")).unwrap();
        assert!(!bank.withdraw(sav, money("10.01")).unwrap());
        assert_eq!(bank.balance(sav), Some(money("10.00")));
    }

    #[test]
    fn locked_accounts_refuse_at_the_bank_surface() {
        let mut bank = bank();
        let acc = bank.create_checking(owner());
        bank.deposit(acc, money("100.00")).unwrap();
        assert!(bank.lock(acc));

        assert!(!bank.withdraw(acc, money("10.00")).unwrap());
        assert!(!bank.deposit_in(acc, money("10.00"), Currency::Eur).unwrap());
        assert!(!bank.withdraw_in(acc, money("10.00"), Currency::Eur).unwrap());
        // the plain deposit still lands
        assert!(bank.deposit(acc, money("10.00")).unwrap());
        assert_eq!(bank.balance(acc), Some(money("110.00")));

        assert!(bank.unlock(acc));
        assert!(bank.withdraw(acc, money("10.00")).unwrap());
    }

    #[test]
    fn negative_amounts_propagate_as_errors() {
        let mut bank = bank();
        let acc = bank.create_checking(owner());

        assert_eq!(
            bank.deposit(acc, money("-1.00")).unwrap_err(),
            BankError::InvalidAmount(money("-1.00"))
        );
        assert_eq!(
            bank.withdraw(acc, money("-1.00")).unwrap_err(),
            BankError::InvalidAmount(money("-1.00"))
        );
        assert_eq!(
            bank.deposit_in(acc, money("-1.00"), Currency::Eur).unwrap_err(),
            BankError::InvalidAmount(money("-1.00"))
        );
    }

    #[test]
    fn foreign_currency_endpoints_convert() {
        let mut bank = bank();
        let acc = bank.create_checking(owner());

        bank.deposit_in(acc, money("100.00"), Currency::Escudo).unwrap();
        assert_eq!(bank.balance(acc), Some(money("0.91")));
    }

    #[test]
    fn transfer_moves_funds_between_accounts() {
        let mut bank = bank();
        let a = bank.create_checking(owner());
        let b = bank.create_checking(owner());
        bank.deposit(a, money("1000.00")).unwrap();

        assert!(bank.transfer(a, b, money("100.00"), "rent").unwrap());
        assert_eq!(bank.balance(a), Some(money("900.00")));
        assert_eq!(bank.balance(b), Some(money("100.00")));
    }

    #[test]
    fn transfer_refuses_self_unknown_and_locked() {
        let mut bank = bank();
        let a = bank.create_checking(owner());
        let b = bank.create_checking(owner());
        bank.deposit(a, money("1000.00")).unwrap();

        assert!(!bank.transfer(a, a, money("10.00"), "self").unwrap());
        assert!(!bank.transfer(a, 99, money("10.00"), "gone").unwrap());
        assert!(!bank.transfer(99, a, money("10.00"), "gone").unwrap());

        bank.lock(b);
        assert!(!bank.transfer(a, b, money("10.00"), "frozen").unwrap());
        bank.unlock(b);
        bank.lock(a);
        assert!(!bank.transfer(a, b, money("10.00"), "frozen").unwrap());

        assert_eq!(bank.balance(a), Some(money("1000.00")));
        assert_eq!(bank.balance(b), Some(money("0.00")));
    }

    #[test]
    fn failed_transfers_leave_both_balances_unchanged() {
        let mut bank = bank();
        let a = bank.create_savings(owner());
        let b = bank.create_checking(owner());
        bank.deposit(a, money("50.00")).unwrap();

        // savings floor refuses the debit, nothing was credited
        assert!(!bank.transfer(a, b, money("60.00"), "too much").unwrap());
        assert_eq!(bank.balance(a), Some(money("50.00")));
        assert_eq!(bank.balance(b), Some(money("0.00")));

        assert_eq!(
            bank.transfer(b, a, money("-1.00"), "negative").unwrap_err(),
            BankError::InvalidAmount(money("-1.00"))
        );
        assert_eq!(bank.balance(a), Some(money("50.00")));
        assert_eq!(bank.balance(b), Some(money("0.00")));
    }

    #[test]
    fn transfer_works_for_savings_within_their_floor() {
        let mut bank = bank();
        let a = bank.create_savings(owner());
        let b = bank.create_savings(owner());
        bank.deposit(a, money("50.00")).unwrap();

        assert!(bank.transfer(a, b, money("20.00"), "gift").unwrap());
        assert_eq!(bank.balance(a), Some(money("30.00")));
        assert_eq!(bank.balance(b), Some(money("20.00")));
    }

    #[test]
    fn listings_are_unordered_but_complete() {
        let mut bank = bank();
        let mut created: Vec<AccountNumber> = (0..4).map(|_| bank.create_checking(owner())).collect();
        let mut listed: Vec<AccountNumber> = bank.account_numbers().collect();

        created.sort_unstable();
        listed.sort_unstable();
        assert_eq!(created, listed);
    }

    #[test]
    fn account_access_by_number() {
        let mut bank = bank();
        let acc = bank.create_checking(owner());

        assert!(bank.account(acc).is_some());
        assert!(bank.account(99).is_none());

        // account-level operations stay reachable for embedders
        bank.account_mut(acc).unwrap().lock();
        assert_eq!(
            bank.account_mut(acc).unwrap().withdraw(money("1.00")),
            Err(BankError::Locked(acc))
        );
    }

    #[test]
    fn routing_number_is_exposed() {
        assert_eq!(bank().routing_number(), 10010010);
    }
}
