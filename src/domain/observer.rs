use crate::domain::account::Account;

/// Callback interface for account state changes. Observers run synchronously
/// on the mutating call, in registration order, and receive the account after
/// the change has been applied.
pub trait AccountObserver {
    fn account_changed(&self, account: &Account);
}

/// Any matching closure observes without a named type.
impl<F: Fn(&Account)> AccountObserver for F {
    fn account_changed(&self, account: &Account) {
        self(account)
    }
}

/// Registration token; removing by token avoids comparing trait objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(pub(crate) u64);
