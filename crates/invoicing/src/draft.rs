use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use jewelbill_core::{DomainError, DomainResult, ItemId};
use jewelbill_parties::{Customer, CustomerDetails};

use crate::calculator::{compute_totals, InvoiceTotals};
use crate::item::{ItemDetails, LineItem};
use crate::item_list::ItemList;
use crate::numbering::increment_invoice_number;
use crate::rates::{BillRates, PaymentMode};
use crate::record::{BillRecord, BillSnapshot};

/// Shop-level defaults for new bills.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillDefaults {
    /// GSTIN printed as the seller on every invoice.
    pub seller_gstin: String,
    /// Invoice number used when there is no bill history yet.
    pub first_invoice_number: String,
    pub rates: BillRates,
    pub payment_mode: PaymentMode,
}

impl Default for BillDefaults {
    fn default() -> Self {
        Self {
            seller_gstin: "07AZTPS3304H1Z2".to_string(),
            first_invoice_number: "602".to_string(),
            rates: BillRates::default(),
            payment_mode: PaymentMode::Cash,
        }
    }
}

/// The bill being edited.
///
/// A draft is plain state: mutate it, then call [`totals`](Self::totals) to get
/// fresh figures. [`finalize`](Self::finalize) turns it into an immutable
/// [`BillRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillDraft {
    pub invoice_number: String,
    pub date: NaiveDate,
    pub seller_gstin: String,
    pub customer: CustomerDetails,
    items: ItemList,
    pub rates: BillRates,
    pub payment_mode: PaymentMode,
    pub notes: String,
}

impl BillDraft {
    /// Empty draft numbered `invoice_number`, dated `date`.
    pub fn new(defaults: &BillDefaults, invoice_number: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            invoice_number: invoice_number.into(),
            date,
            seller_gstin: defaults.seller_gstin.clone(),
            customer: CustomerDetails::default(),
            items: ItemList::new(),
            rates: defaults.rates,
            payment_mode: defaults.payment_mode,
            notes: String::new(),
        }
    }

    pub fn items(&self) -> &ItemList {
        &self.items
    }

    pub fn add_item(&mut self, details: ItemDetails) -> DomainResult<ItemId> {
        self.items.add(details)
    }

    pub fn update_item(&mut self, id: ItemId, details: ItemDetails) -> DomainResult<&LineItem> {
        self.items.update(id, details)
    }

    pub fn remove_item(&mut self, id: ItemId) -> DomainResult<LineItem> {
        self.items.remove(id)
    }

    pub fn set_rates(&mut self, rates: BillRates) {
        self.rates = rates;
    }

    /// Copy a known customer's details onto the bill.
    pub fn fill_customer(&mut self, customer: &Customer) {
        self.customer = customer.details().clone();
    }

    /// Current totals for the draft.
    pub fn totals(&self) -> InvoiceTotals {
        compute_totals(self.items.as_slice(), &self.rates)
    }

    /// Check the draft can be saved.
    pub fn validate_for_save(&self) -> DomainResult<()> {
        if self.items.is_empty() {
            return Err(DomainError::validation("add at least one item to the bill"));
        }
        if self.customer.name.trim().is_empty() {
            return Err(DomainError::validation("customer name is required"));
        }
        Ok(())
    }

    /// Freeze the draft into a record created at `created_at`.
    pub fn finalize(&self, created_at: DateTime<Utc>) -> DomainResult<BillRecord> {
        self.validate_for_save()?;

        let snapshot = BillSnapshot {
            invoice_number: self.invoice_number.clone(),
            date: self.date,
            seller_gstin: self.seller_gstin.clone(),
            customer: self.customer.clone(),
            items: self.items.as_slice().to_vec(),
            rates: self.rates,
            payment_mode: self.payment_mode,
            notes: self.notes.clone(),
        };
        Ok(BillRecord::freeze(snapshot, created_at))
    }

    /// Reset for the next bill after a save.
    ///
    /// The invoice number advances by one. Customer, items, notes, payment mode
    /// and discount are cleared; date, seller GSTIN, making charge and GST
    /// rates carry over.
    pub fn start_next(&mut self, defaults: &BillDefaults) {
        self.invoice_number = increment_invoice_number(&self.invoice_number);
        self.customer = CustomerDetails::default();
        self.items.clear();
        self.notes.clear();
        self.payment_mode = defaults.payment_mode;
        self.rates.discount_rate = defaults.rates.discount_rate;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use core::str::FromStr;
    use rust_decimal::Decimal;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 11, 1).unwrap()
    }

    fn saved_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 11, 1, 10, 30, 0).unwrap()
    }

    fn draft() -> BillDraft {
        BillDraft::new(&BillDefaults::default(), "602", today())
    }

    #[test]
    fn new_draft_takes_shop_defaults() {
        let d = draft();
        assert_eq!(d.seller_gstin, "07AZTPS3304H1Z2");
        assert_eq!(d.payment_mode, PaymentMode::Cash);
        assert_eq!(d.rates, BillRates::default());
        assert!(d.items().is_empty());
    }

    #[test]
    fn totals_follow_each_edit() {
        let mut d = draft();
        assert_eq!(d.totals().grand_total, Decimal::ZERO);

        let id = d
            .add_item(ItemDetails::new("Gold necklace", dec("10"), dec("5000")))
            .unwrap();
        assert_eq!(d.totals().grand_total, dec("56500"));

        d.update_item(id, ItemDetails::new("Gold necklace", dec("5"), dec("5000")))
            .unwrap();
        assert_eq!(d.totals().grand_total, dec("28250"));

        d.rates.discount_rate = dec("10");
        assert_eq!(d.totals().taxable_amount, dec("22500"));

        d.remove_item(id).unwrap();
        assert_eq!(d.totals().grand_total, Decimal::ZERO);
    }

    #[test]
    fn finalize_requires_items_and_customer_name() {
        let mut d = draft();
        d.customer = CustomerDetails::named("Asha Verma");
        let err = d.finalize(saved_at()).unwrap_err();
        assert!(matches!(err, DomainError::Validation(msg) if msg.contains("at least one item")));

        d.customer = CustomerDetails::default();
        d.add_item(ItemDetails::new("Ring", dec("4"), dec("5000"))).unwrap();
        let err = d.finalize(saved_at()).unwrap_err();
        assert!(matches!(err, DomainError::Validation(msg) if msg.contains("customer name")));
    }

    #[test]
    fn finalize_snapshots_totals_and_inputs() {
        let mut d = draft();
        d.customer = CustomerDetails::named("Asha Verma").with_phone("9810000001");
        d.add_item(ItemDetails::new("Gold necklace", dec("10"), dec("5000")))
            .unwrap();
        d.notes = "Hallmarked".to_string();

        let record = d.finalize(saved_at()).unwrap();
        assert_eq!(record.invoice_number(), "602");
        assert_eq!(record.items().len(), 1);
        assert_eq!(record.totals().grand_total, dec("56500"));
        assert_eq!(record.recompute_totals(), *record.totals());
        assert_eq!(record.created_at(), saved_at());
        assert_eq!(record.notes(), "Hallmarked");

        // Later edits to the draft do not reach the saved record.
        d.rates.making_charge_rate = dec("20");
        assert_eq!(record.totals().grand_total, dec("56500"));
    }

    #[test]
    fn start_next_advances_number_and_clears_the_bill() {
        let defaults = BillDefaults::default();
        let mut d = draft();
        d.customer = CustomerDetails::named("Asha Verma");
        d.add_item(ItemDetails::new("Ring", dec("4"), dec("5000"))).unwrap();
        d.payment_mode = PaymentMode::Upi;
        d.rates.discount_rate = dec("5");
        d.rates.making_charge_rate = dec("12");
        d.notes = "Gift wrap".to_string();

        d.start_next(&defaults);

        assert_eq!(d.invoice_number, "603");
        assert!(d.customer.name.is_empty());
        assert!(d.items().is_empty());
        assert!(d.notes.is_empty());
        assert_eq!(d.payment_mode, PaymentMode::Cash);
        assert_eq!(d.rates.discount_rate, Decimal::ZERO);
        assert_eq!(d.rates.making_charge_rate, dec("12"));
        assert_eq!(d.date, today());
    }

    #[test]
    fn fill_customer_copies_saved_details() {
        let customer = Customer::register(
            CustomerDetails::named("Ravi Kumar")
                .with_phone("9999912345")
                .with_gstin("07ABCDE1234F1Z5")
                .with_state("Delhi", "07"),
        )
        .unwrap();

        let mut d = draft();
        d.fill_customer(&customer);
        assert_eq!(&d.customer, customer.details());
    }
}
