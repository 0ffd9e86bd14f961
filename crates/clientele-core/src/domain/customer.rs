use crate::domain::char_len;
use crate::domain::ids::CustomerId;
use crate::error::{ensure_no_violations, CoreError, Violation};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

pub const MIN_PHONE_LEN: usize = 10;
pub const MAX_NOTES_LEN: usize = 250;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CustomerCategory {
    #[default]
    New,
    Regular,
    Vip,
}

impl CustomerCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            CustomerCategory::New => "NEW",
            CustomerCategory::Regular => "REGULAR",
            CustomerCategory::Vip => "VIP",
        }
    }
}

impl fmt::Display for CustomerCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CustomerCategory {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NEW" => Ok(CustomerCategory::New),
            "REGULAR" => Ok(CustomerCategory::Regular),
            "VIP" => Ok(CustomerCategory::Vip),
            other => Err(CoreError::InvalidCategory(other.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CustomerNew {
    pub full_name: String,
    pub phone: String,
    pub email: String,
    pub category: CustomerCategory,
    pub notes: Option<String>,
}

/// A customer record. Equality and hashing consider only the id.
#[derive(Debug, Clone, Serialize)]
pub struct Customer {
    id: CustomerId,
    pub full_name: String,
    pub phone: String,
    pub email: String,
    pub category: CustomerCategory,
    pub notes: Option<String>,
    created_at: i64,
}

impl Customer {
    pub fn new(now_utc: i64, input: CustomerNew) -> Self {
        Self::restore(CustomerId::new(), now_utc, input)
    }

    /// Rebuilds a customer that already has an identity, e.g. from a stored row.
    pub fn restore(id: CustomerId, created_at: i64, input: CustomerNew) -> Self {
        Self {
            id,
            full_name: input.full_name,
            phone: input.phone,
            email: input.email,
            category: input.category,
            notes: input.notes,
            created_at,
        }
    }

    pub fn id(&self) -> CustomerId {
        self.id
    }

    pub fn created_at(&self) -> i64 {
        self.created_at
    }

    pub fn validate(&self) -> Vec<Violation> {
        let mut violations = Vec::new();

        if self.full_name.trim().is_empty() {
            violations.push(Violation::NameRequired);
        }
        if char_len(&self.phone) < MIN_PHONE_LEN {
            violations.push(Violation::PhoneTooShort);
        }
        if !(self.email.contains('@') && self.email.contains('.')) {
            violations.push(Violation::InvalidEmail);
        }
        if let Some(notes) = self.notes.as_deref() {
            if char_len(notes) > MAX_NOTES_LEN {
                violations.push(Violation::NotesTooLong);
            }
        }

        violations
    }

    pub fn ensure_valid(&self) -> Result<(), CoreError> {
        ensure_no_violations(self.validate())
    }

    pub fn is_vip(&self) -> bool {
        self.category == CustomerCategory::Vip
    }

    pub fn is_regular(&self) -> bool {
        self.category == CustomerCategory::Regular
    }

    pub fn is_new(&self) -> bool {
        self.category == CustomerCategory::New
    }
}

impl PartialEq for Customer {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Customer {}

impl Hash for Customer {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
