use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use jewelbill_core::numeric::{parse_lenient, parse_strict, product_or_zero, round_currency};
use jewelbill_core::{DomainError, DomainResult, Entity, ItemId};

/// Amount for a line: `rate * net_weight`, rounded to two places.
///
/// Never fails; a product outside the decimal range reads as zero.
pub fn compute_item_amount(rate: Decimal, net_weight: Decimal) -> Decimal {
    round_currency(product_or_zero(rate, net_weight))
}

/// [`compute_item_amount`] over raw form text; non-numeric fields read as zero.
pub fn compute_item_amount_from_input(rate: &str, net_weight: &str) -> Decimal {
    compute_item_amount(parse_lenient(rate), parse_lenient(net_weight))
}

/// Validated fields of a line item (everything except id and derived amount).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDetails {
    pub description: String,
    pub quantity: u32,
    /// Grams.
    pub gross_weight: Decimal,
    /// Grams.
    pub net_weight: Decimal,
    /// Currency per gram.
    pub rate: Decimal,
}

impl ItemDetails {
    pub fn new(description: impl Into<String>, net_weight: Decimal, rate: Decimal) -> Self {
        Self {
            description: description.into(),
            quantity: 1,
            gross_weight: net_weight,
            net_weight,
            rate,
        }
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_gross_weight(mut self, gross_weight: Decimal) -> Self {
        self.gross_weight = gross_weight;
        self
    }

    /// Data-model constraints for a stored line.
    pub fn validate(&self) -> DomainResult<()> {
        if self.quantity == 0 {
            return Err(DomainError::validation("item quantity must be at least 1"));
        }
        if self.gross_weight.is_sign_negative() && !self.gross_weight.is_zero() {
            return Err(DomainError::validation("item gross weight must not be negative"));
        }
        if self.net_weight <= Decimal::ZERO {
            return Err(DomainError::validation("item net weight must be positive"));
        }
        if self.rate.is_sign_negative() && !self.rate.is_zero() {
            return Err(DomainError::validation("item rate must not be negative"));
        }
        Ok(())
    }
}

/// One line on a bill.
///
/// The amount is derived from rate and net weight when the line is built and
/// only changes through an explicit edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    id: ItemId,
    description: String,
    #[serde(default = "default_quantity")]
    quantity: u32,
    #[serde(default)]
    gross_weight: Decimal,
    #[serde(default)]
    net_weight: Decimal,
    #[serde(default)]
    rate: Decimal,
    /// Older records may lack an amount; it then counts as zero.
    #[serde(default)]
    amount: Decimal,
}

fn default_quantity() -> u32 {
    1
}

impl LineItem {
    /// Build a line with the given id, computing its amount.
    pub fn new(id: ItemId, details: ItemDetails) -> DomainResult<Self> {
        details.validate()?;
        let amount = compute_item_amount(details.rate, details.net_weight);
        Ok(Self {
            id,
            description: details.description,
            quantity: details.quantity,
            gross_weight: details.gross_weight,
            net_weight: details.net_weight,
            rate: details.rate,
            amount,
        })
    }

    pub fn id_typed(&self) -> ItemId {
        self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn gross_weight(&self) -> Decimal {
        self.gross_weight
    }

    pub fn net_weight(&self) -> Decimal {
        self.net_weight
    }

    pub fn rate(&self) -> Decimal {
        self.rate
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// The editable fields of this line, e.g. to prefill an edit form.
    pub fn details(&self) -> ItemDetails {
        ItemDetails {
            description: self.description.clone(),
            quantity: self.quantity,
            gross_weight: self.gross_weight,
            net_weight: self.net_weight,
            rate: self.rate,
        }
    }
}

impl Entity for LineItem {
    type Id = ItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Raw text of the item entry form.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ItemInput {
    pub description: String,
    pub quantity: String,
    pub gross_weight: String,
    pub net_weight: String,
    pub rate: String,
}

impl ItemInput {
    /// Amount shown while the form is being typed.
    pub fn preview_amount(&self) -> Decimal {
        compute_item_amount_from_input(&self.rate, &self.net_weight)
    }

    /// Validate the form before the item goes on the bill.
    ///
    /// Description, net weight and rate are required; rate and net weight must be
    /// non-zero. A blank quantity means 1 and a blank gross weight means 0.
    pub fn to_details(&self) -> DomainResult<ItemDetails> {
        let description = self.description.trim();
        if description.is_empty() {
            return Err(DomainError::validation("item description is required"));
        }

        let net_weight = parse_strict("net weight", &self.net_weight)?;
        let rate = parse_strict("rate", &self.rate)?;
        if net_weight.is_zero() || rate.is_zero() {
            return Err(DomainError::validation("net weight and rate must be non-zero"));
        }

        let gross_weight = if self.gross_weight.trim().is_empty() {
            Decimal::ZERO
        } else {
            parse_strict("gross weight", &self.gross_weight)?
        };

        let quantity = match self.quantity.trim() {
            "" => 1,
            q => q
                .parse::<u32>()
                .map_err(|_| DomainError::validation(format!("quantity must be a whole number, got '{q}'")))?,
        };

        let details = ItemDetails {
            description: description.to_string(),
            quantity,
            gross_weight,
            net_weight,
            rate,
        };
        details.validate()?;
        Ok(details)
    }
}

impl From<&LineItem> for ItemInput {
    fn from(item: &LineItem) -> Self {
        Self {
            description: item.description.clone(),
            quantity: item.quantity.to_string(),
            gross_weight: item.gross_weight.to_string(),
            net_weight: item.net_weight.to_string(),
            rate: item.rate.to_string(),
        }
    }
}
