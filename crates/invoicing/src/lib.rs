//! Jewelry-shop GST invoicing.
//!
//! Deterministic domain logic only (no IO, no storage): line items and their
//! amounts, the invoice totals calculator, bill drafts and saved records,
//! invoice numbering, history queries and Indian-locale formatting.

pub mod calculator;
pub mod draft;
pub mod format;
pub mod history;
pub mod item;
pub mod item_list;
pub mod numbering;
pub mod rates;
pub mod record;

pub use calculator::{compute_totals, compute_totals_from_amounts, InvoiceTotals};
pub use draft::{BillDefaults, BillDraft};
pub use format::{format_amount, format_inr, format_invoice_date};
pub use history::{HistoryFilter, HistoryQuery, SortOrder};
pub use item::{compute_item_amount, compute_item_amount_from_input, ItemDetails, ItemInput, LineItem};
pub use item_list::ItemList;
pub use numbering::{increment_invoice_number, next_invoice_number};
pub use rates::{BillRates, PaymentMode, RateInputs};
pub use record::BillRecord;
