use chrono::NaiveDate;

/// Holder of an account. Plain data: the bank keeps no customer registry and
/// never deduplicates owners, so two accounts may carry equal customers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    first_name: String,
    last_name: String,
    address: String,
    birth_date: NaiveDate,
}

impl Customer {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        address: impl Into<String>,
        birth_date: NaiveDate,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            address: address.into(),
            birth_date,
        }
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn set_address(&mut self, address: impl Into<String>) {
        self.address = address.into();
    }

    pub fn birth_date(&self) -> NaiveDate {
        self.birth_date
    }
}
