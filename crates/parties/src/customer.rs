use serde::{Deserialize, Serialize};

use jewelbill_core::{CustomerId, DomainError, DomainResult, Entity};

/// Customer fields as they appear on a bill.
///
/// Everything except the name is optional free text; GSTIN and state code are
/// opaque registration strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDetails {
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub gstin: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub state_code: String,
}

impl CustomerDetails {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    pub fn with_gstin(mut self, gstin: impl Into<String>) -> Self {
        self.gstin = gstin.into();
        self
    }

    pub fn with_state(mut self, state: impl Into<String>, state_code: impl Into<String>) -> Self {
        self.state = state.into();
        self.state_code = state_code.into();
        self
    }

    /// Invariant: a customer must have a non-blank name.
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("customer name cannot be empty"));
        }
        Ok(())
    }

    /// Whether these details identify the same customer as `other`.
    ///
    /// Names compare case-insensitively, phone numbers exactly.
    pub fn same_customer_as(&self, other: &CustomerDetails) -> bool {
        names_match(&self.name, &other.name) && self.phone.trim() == other.phone.trim()
    }
}

/// Case-insensitive, whitespace-trimmed name comparison.
pub fn names_match(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

/// A saved customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    id: CustomerId,
    #[serde(flatten)]
    details: CustomerDetails,
}

impl Customer {
    /// Register a new customer with a fresh id.
    pub fn register(details: CustomerDetails) -> DomainResult<Self> {
        details.validate()?;
        Ok(Self {
            id: CustomerId::new(),
            details,
        })
    }

    /// Rebuild a customer with a known id (e.g. from a remote store).
    pub fn with_id(id: CustomerId, details: CustomerDetails) -> DomainResult<Self> {
        details.validate()?;
        Ok(Self { id, details })
    }

    pub fn id_typed(&self) -> CustomerId {
        self.id
    }

    pub fn details(&self) -> &CustomerDetails {
        &self.details
    }

    pub fn name(&self) -> &str {
        &self.details.name
    }

    pub fn phone(&self) -> &str {
        &self.details.phone
    }

    /// Replace the details, keeping the id.
    pub fn update_details(&mut self, details: CustomerDetails) -> DomainResult<()> {
        details.validate()?;
        self.details = details;
        Ok(())
    }
}

impl Entity for Customer {
    type Id = CustomerId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
