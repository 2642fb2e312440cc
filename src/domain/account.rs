use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::common::error::BankError;
use crate::common::money::Money;
use crate::domain::currency::Currency;
use crate::domain::customer::Customer;
use crate::domain::observer::{AccountObserver, ObserverId};

pub type AccountNumber = u64;
pub type RoutingNumber = u64;

/// Starting overdraft limit for a fresh checking account.
pub const DEFAULT_OVERDRAFT_LIMIT: Money = Money::new(50_000);

/// Closed set of account kinds. The kind decides how deep a withdrawal may
/// go and whether the transfer operations exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountKind {
    /// May overdraw down to the negated limit.
    Checking { overdraft_limit: Money },
    /// Never overdraws.
    Savings,
}

impl AccountKind {
    /// Checking kind with the standard starting limit.
    pub fn checking() -> Self {
        AccountKind::Checking {
            overdraft_limit: DEFAULT_OVERDRAFT_LIMIT,
        }
    }

    /// Lowest balance a withdrawal may leave behind.
    pub fn withdrawal_floor(&self) -> Money {
        match self {
            AccountKind::Checking { overdraft_limit } => -*overdraft_limit,
            AccountKind::Savings => Money::zero(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AccountKind::Checking { .. } => "checking",
            AccountKind::Savings => "savings",
        }
    }
}

/// One bank account: balance and overdraft limit are denominated in the
/// account's current currency. Equality, ordering and the observer callbacks
/// all key on the account number.
pub struct Account {
    number: AccountNumber,
    owner: Customer,
    balance: Money,
    currency: Currency,
    locked: bool,
    kind: AccountKind,
    observers: Vec<(ObserverId, Box<dyn AccountObserver>)>,
    next_observer_id: u64,
}

impl Account {
    /// Fresh account: zero balance in the base currency, unlocked, no
    /// observers.
    pub fn new(number: AccountNumber, owner: Customer, kind: AccountKind) -> Self {
        Self {
            number,
            owner,
            balance: Money::zero(),
            currency: Currency::BASE,
            locked: false,
            kind,
            observers: Vec::new(),
            next_observer_id: 0,
        }
    }

    pub fn number(&self) -> AccountNumber {
        self.number
    }

    pub fn owner(&self) -> &Customer {
        &self.owner
    }

    pub fn balance(&self) -> Money {
        self.balance
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn kind(&self) -> AccountKind {
        self.kind
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Overdraft limit of a checking account, `None` for savings.
    pub fn overdraft_limit(&self) -> Option<Money> {
        match self.kind {
            AccountKind::Checking { overdraft_limit } => Some(overdraft_limit),
            AccountKind::Savings => None,
        }
    }

    pub fn lock(&mut self) {
        if !self.locked {
            self.locked = true;
            tracing::info!(account = self.number, "account locked");
            self.notify_observers();
        }
    }

    pub fn unlock(&mut self) {
        if self.locked {
            self.locked = false;
            tracing::info!(account = self.number, "account unlocked");
            self.notify_observers();
        }
    }

    /// Credits `amount` in the account's own currency. Deliberately works on
    /// a locked account: freezing an account must not bounce incoming money.
    pub fn deposit(&mut self, amount: Money) -> Result<(), BankError> {
        if amount.is_negative() {
            return Err(BankError::InvalidAmount(amount));
        }
        self.balance += amount;
        self.notify_observers();
        Ok(())
    }

    /// Credits an amount stated in a foreign currency. Unlike the plain
    /// deposit this one refuses locked accounts, and it refuses before
    /// looking at the amount.
    pub fn deposit_in(&mut self, amount: Money, currency: Currency) -> Result<(), BankError> {
        if self.locked {
            return Err(BankError::Locked(self.number));
        }
        if amount.is_negative() {
            return Err(BankError::InvalidAmount(amount));
        }
        let credited = self.to_account_currency(amount, currency);
        self.balance += credited;
        self.notify_observers();
        Ok(())
    }

    /// Debits `amount` in the account's own currency. `Ok(false)` means the
    /// withdrawal would have pushed the balance below the kind's floor.
    pub fn withdraw(&mut self, amount: Money) -> Result<bool, BankError> {
        if self.locked {
            return Err(BankError::Locked(self.number));
        }
        if amount.is_negative() {
            return Err(BankError::InvalidAmount(amount));
        }
        Ok(self.debit_within_floor(amount))
    }

    /// Debits an amount stated in a foreign currency.
    pub fn withdraw_in(&mut self, amount: Money, currency: Currency) -> Result<bool, BankError> {
        if self.locked {
            return Err(BankError::Locked(self.number));
        }
        if amount.is_negative() {
            return Err(BankError::InvalidAmount(amount));
        }
        let debited = self.to_account_currency(amount, currency);
        Ok(self.debit_within_floor(debited))
    }

    pub fn change_owner(&mut self, owner: Customer) -> Result<(), BankError> {
        if self.locked {
            return Err(BankError::Locked(self.number));
        }
        self.owner = owner;
        Ok(())
    }

    /// Redenominates balance and overdraft limit through the base currency.
    /// No observer runs: the value is unchanged up to rounding, no funds
    /// moved.
    pub fn change_currency(&mut self, new: Currency) {
        if new == self.currency {
            return;
        }
        let old = self.currency;
        self.balance = new.from_base(old.to_base(self.balance));
        if let AccountKind::Checking { overdraft_limit } = &mut self.kind {
            *overdraft_limit = new.from_base(old.to_base(*overdraft_limit));
        }
        self.currency = new;
        tracing::info!(
            account = self.number,
            currency = new.code(),
            "currency changed"
        );
    }

    pub fn set_overdraft_limit(&mut self, limit: Money) -> Result<(), BankError> {
        match &mut self.kind {
            AccountKind::Checking { overdraft_limit } => {
                if limit.is_negative() {
                    return Err(BankError::InvalidArgument("overdraft limit must not be negative"));
                }
                *overdraft_limit = limit;
                Ok(())
            }
            AccountKind::Savings => Err(BankError::InvalidArgument(
                "savings accounts have no overdraft limit",
            )),
        }
    }

    /// Debit side of an outgoing transfer; checking only. The receiving side
    /// posts separately, so no observer runs here.
    pub fn send_transfer(
        &mut self,
        amount: Money,
        payee: &str,
        payee_account: AccountNumber,
        payee_routing: RoutingNumber,
        memo: &str,
    ) -> Result<bool, BankError> {
        self.require_checking("savings accounts cannot send transfers")?;
        if self.locked {
            return Err(BankError::Locked(self.number));
        }
        if amount.is_negative() {
            return Err(BankError::InvalidAmount(amount));
        }
        if payee.trim().is_empty() {
            return Err(BankError::InvalidArgument("payee must not be blank"));
        }
        if memo.trim().is_empty() {
            return Err(BankError::InvalidArgument("memo must not be blank"));
        }
        if self.balance - amount < self.kind.withdrawal_floor() {
            return Ok(false);
        }
        self.balance -= amount;
        tracing::debug!(
            account = self.number,
            payee_account,
            payee_routing,
            memo,
            "transfer sent"
        );
        Ok(true)
    }

    /// Credit side of an incoming transfer; checking only. Locked accounts
    /// still receive.
    pub fn receive_transfer(
        &mut self,
        amount: Money,
        payer: &str,
        payer_account: AccountNumber,
        payer_routing: RoutingNumber,
        memo: &str,
    ) -> Result<(), BankError> {
        self.require_checking("savings accounts cannot receive transfers")?;
        if amount.is_negative() {
            return Err(BankError::InvalidAmount(amount));
        }
        if payer.trim().is_empty() {
            return Err(BankError::InvalidArgument("payer must not be blank"));
        }
        if memo.trim().is_empty() {
            return Err(BankError::InvalidArgument("memo must not be blank"));
        }
        self.balance += amount;
        tracing::debug!(
            account = self.number,
            payer_account,
            payer_routing,
            memo,
            "transfer received"
        );
        self.notify_observers();
        Ok(())
    }

    /// Registers an observer and returns the token that removes it again.
    pub fn add_observer<O>(&mut self, observer: O) -> ObserverId
    where
        O: AccountObserver + 'static,
    {
        let id = ObserverId(self.next_observer_id);
        self.next_observer_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    pub fn remove_observer(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(oid, _)| *oid != id);
        self.observers.len() != before
    }

    fn notify_observers(&self) {
        for (_, observer) in &self.observers {
            observer.account_changed(self);
        }
    }

    fn require_checking(&self, msg: &'static str) -> Result<(), BankError> {
        match self.kind {
            AccountKind::Checking { .. } => Ok(()),
            AccountKind::Savings => Err(BankError::InvalidArgument(msg)),
        }
    }

    /// Both conversion hops always run, so a same-currency amount may shift
    /// by a cent of rounding (euro excepted, its rate is exactly one).
    fn to_account_currency(&self, amount: Money, currency: Currency) -> Money {
        self.currency.from_base(currency.to_base(amount))
    }

    fn debit_within_floor(&mut self, amount: Money) -> bool {
        if self.balance - amount < self.kind.withdrawal_floor() {
            return false;
        }
        self.balance -= amount;
        self.notify_observers();
        true
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("number", &self.number)
            .field("owner", &self.owner)
            .field("balance", &self.balance)
            .field("currency", &self.currency)
            .field("locked", &self.locked)
            .field("kind", &self.kind)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl PartialEq for Account {
    fn eq(&self, other: &Self) -> bool {
        self.number == other.number
    }
}
impl Eq for Account {}

impl Hash for Account {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.number.hash(state);
    }
}

impl PartialOrd for Account {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Account {
    fn cmp(&self, other: &Self) -> Ordering {
        self.number.cmp(&other.number)
    }
}
