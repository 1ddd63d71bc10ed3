use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use jewelbill_core::numeric::parse_lenient;
use jewelbill_core::{DomainError, ValueObject};

/// Percentage rates applied to a bill.
///
/// The discount is a percentage of the subtotal. Making charge, SGST and CGST
/// are percentages of the taxable amount (subtotal minus discount).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillRates {
    #[serde(default)]
    pub discount_rate: Decimal,
    #[serde(default)]
    pub making_charge_rate: Decimal,
    #[serde(default)]
    pub sgst_rate: Decimal,
    #[serde(default)]
    pub cgst_rate: Decimal,
}

impl BillRates {
    pub fn new(
        discount_rate: Decimal,
        making_charge_rate: Decimal,
        sgst_rate: Decimal,
        cgst_rate: Decimal,
    ) -> Self {
        Self {
            discount_rate,
            making_charge_rate,
            sgst_rate,
            cgst_rate,
        }
    }

    /// All rates zero.
    pub fn zero() -> Self {
        Self::new(Decimal::ZERO, Decimal::ZERO, Decimal::ZERO, Decimal::ZERO)
    }
}

/// No discount, 10% making charge, 1.5% SGST, 1.5% CGST.
impl Default for BillRates {
    fn default() -> Self {
        Self::new(
            Decimal::ZERO,
            Decimal::TEN,
            Decimal::new(15, 1),
            Decimal::new(15, 1),
        )
    }
}

impl ValueObject for BillRates {}

/// Raw text of the rate fields on the payment form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateInputs {
    pub discount: String,
    pub making_charge: String,
    pub sgst: String,
    pub cgst: String,
}

impl RateInputs {
    /// Rates for live totals; blank, non-numeric or negative fields read as zero.
    pub fn to_rates(&self) -> BillRates {
        BillRates::new(
            parse_rate(&self.discount),
            parse_rate(&self.making_charge),
            parse_rate(&self.sgst),
            parse_rate(&self.cgst),
        )
    }
}

fn parse_rate(input: &str) -> Decimal {
    parse_lenient(input).max(Decimal::ZERO)
}

impl From<&BillRates> for RateInputs {
    fn from(rates: &BillRates) -> Self {
        Self {
            discount: rates.discount_rate.to_string(),
            making_charge: rates.making_charge_rate.to_string(),
            sgst: rates.sgst_rate.to_string(),
            cgst: rates.cgst_rate.to_string(),
        }
    }
}

/// How the customer paid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMode {
    #[default]
    Cash,
    Card,
    #[serde(rename = "UPI")]
    Upi,
    #[serde(rename = "Bank Transfer")]
    BankTransfer,
}

impl PaymentMode {
    pub const ALL: [PaymentMode; 4] = [
        PaymentMode::Cash,
        PaymentMode::Card,
        PaymentMode::Upi,
        PaymentMode::BankTransfer,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PaymentMode::Cash => "Cash",
            PaymentMode::Card => "Card",
            PaymentMode::Upi => "UPI",
            PaymentMode::BankTransfer => "Bank Transfer",
        }
    }
}

impl core::fmt::Display for PaymentMode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PaymentMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        PaymentMode::ALL
            .into_iter()
            .find(|m| m.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| DomainError::validation(format!("unknown payment mode '{wanted}'")))
    }
}
