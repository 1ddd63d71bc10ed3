use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use jewelbill_core::{BillId, Entity};
use jewelbill_parties::CustomerDetails;

use crate::calculator::{compute_totals, InvoiceTotals};
use crate::item::LineItem;
use crate::rates::{BillRates, PaymentMode};

/// A saved bill.
///
/// Records are history: they are never edited. The totals are the snapshot
/// taken at save time and are what reprints and listings show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillRecord {
    id: BillId,
    invoice_number: String,
    date: NaiveDate,
    seller_gstin: String,
    customer: CustomerDetails,
    items: Vec<LineItem>,
    rates: BillRates,
    #[serde(default)]
    payment_mode: PaymentMode,
    #[serde(default)]
    notes: String,
    totals: InvoiceTotals,
    created_at: DateTime<Utc>,
}

/// Fields of a bill at the moment it is saved.
#[derive(Debug, Clone)]
pub(crate) struct BillSnapshot {
    pub invoice_number: String,
    pub date: NaiveDate,
    pub seller_gstin: String,
    pub customer: CustomerDetails,
    pub items: Vec<LineItem>,
    pub rates: BillRates,
    pub payment_mode: PaymentMode,
    pub notes: String,
}

impl BillRecord {
    pub(crate) fn freeze(snapshot: BillSnapshot, created_at: DateTime<Utc>) -> Self {
        let totals = compute_totals(&snapshot.items, &snapshot.rates);
        Self {
            id: BillId::new(),
            invoice_number: snapshot.invoice_number,
            date: snapshot.date,
            seller_gstin: snapshot.seller_gstin,
            customer: snapshot.customer,
            items: snapshot.items,
            rates: snapshot.rates,
            payment_mode: snapshot.payment_mode,
            notes: snapshot.notes,
            totals,
            created_at,
        }
    }

    pub fn id_typed(&self) -> BillId {
        self.id
    }

    pub fn invoice_number(&self) -> &str {
        &self.invoice_number
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn seller_gstin(&self) -> &str {
        &self.seller_gstin
    }

    pub fn customer(&self) -> &CustomerDetails {
        &self.customer
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn rates(&self) -> &BillRates {
        &self.rates
    }

    pub fn payment_mode(&self) -> PaymentMode {
        self.payment_mode
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// Totals as saved.
    pub fn totals(&self) -> &InvoiceTotals {
        &self.totals
    }

    /// Totals recomputed from the stored lines and rates.
    ///
    /// Equal to [`totals`](Self::totals) for any record produced by this crate.
    pub fn recompute_totals(&self) -> InvoiceTotals {
        compute_totals(&self.items, &self.rates)
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Entity for BillRecord {
    type Id = BillId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl AsRef<BillRecord> for BillRecord {
    fn as_ref(&self) -> &BillRecord {
        self
    }
}
