use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::record::BillRecord;

/// Bills saved within this many days count as recent.
pub const RECENT_DAYS: i64 = 30;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryFilter {
    #[default]
    All,
    /// Saved within the last [`RECENT_DAYS`].
    Recent,
    /// Search term must match the customer name.
    Customer,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    /// Newest first.
    #[default]
    Desc,
}

/// Search, filter and order over saved bills.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryQuery {
    /// Case-insensitive substring of customer name or invoice number.
    pub search: String,
    pub filter: HistoryFilter,
    pub order: SortOrder,
}

impl HistoryQuery {
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search: term.into(),
            ..Self::default()
        }
    }

    pub fn with_filter(mut self, filter: HistoryFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_order(mut self, order: SortOrder) -> Self {
        self.order = order;
        self
    }

    /// Whether `record` passes the search and filter as of `now`.
    pub fn matches(&self, record: &BillRecord, now: DateTime<Utc>) -> bool {
        let needle = self.search.trim().to_lowercase();
        let name = record.customer().name.to_lowercase();

        let matches_search = needle.is_empty()
            || name.contains(&needle)
            || record.invoice_number().to_lowercase().contains(&needle);

        let matches_filter = match self.filter {
            HistoryFilter::All => true,
            HistoryFilter::Recent => record.created_at() >= now - Duration::days(RECENT_DAYS),
            HistoryFilter::Customer => name.contains(&needle),
        };

        matches_search && matches_filter
    }

    /// Matching bills, ordered by save time.
    pub fn apply<'a, T>(&self, bills: &'a [T], now: DateTime<Utc>) -> Vec<&'a T>
    where
        T: AsRef<BillRecord>,
    {
        let mut selected: Vec<&T> = bills
            .iter()
            .filter(|b| self.matches(b.as_ref(), now))
            .collect();

        selected.sort_by_key(|b| b.as_ref().created_at());
        if self.order == SortOrder::Desc {
            selected.reverse();
        }
        selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};
    use core::str::FromStr;
    use jewelbill_parties::CustomerDetails;
    use rust_decimal::Decimal;

    use crate::draft::{BillDefaults, BillDraft};
    use crate::item::ItemDetails;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 11, 30, 12, 0, 0).unwrap()
    }

    fn bill(number: &str, customer: &str, days_ago: i64) -> BillRecord {
        let mut d = BillDraft::new(
            &BillDefaults::default(),
            number,
            NaiveDate::from_ymd_opt(2024, 11, 1).unwrap(),
        );
        d.customer = CustomerDetails::named(customer);
        d.add_item(ItemDetails::new(
            "Ring",
            Decimal::from_str("4").unwrap(),
            Decimal::from_str("5000").unwrap(),
        ))
        .unwrap();
        d.finalize(now() - Duration::days(days_ago)).unwrap()
    }

    fn numbers(bills: Vec<&BillRecord>) -> Vec<String> {
        bills.iter().map(|b| b.invoice_number().to_string()).collect()
    }

    fn sample() -> Vec<BillRecord> {
        vec![
            bill("602", "Asha Verma", 45),
            bill("603", "Ravi Kumar", 10),
            bill("604", "Ashok Mehta", 1),
        ]
    }

    #[test]
    fn default_query_lists_newest_first() {
        let bills = sample();
        let out = HistoryQuery::default().apply(&bills, now());
        assert_eq!(numbers(out), vec!["604", "603", "602"]);
    }

    #[test]
    fn search_matches_customer_or_invoice_number() {
        let bills = sample();
        let by_name = HistoryQuery::search("ash").with_order(SortOrder::Asc);
        assert_eq!(numbers(by_name.apply(&bills, now())), vec!["602", "604"]);

        let by_number = HistoryQuery::search("603");
        assert_eq!(numbers(by_number.apply(&bills, now())), vec!["603"]);
    }

    #[test]
    fn recent_filter_keeps_last_thirty_days() {
        let bills = sample();
        let q = HistoryQuery::default().with_filter(HistoryFilter::Recent);
        assert_eq!(numbers(q.apply(&bills, now())), vec!["604", "603"]);
    }

    #[test]
    fn customer_filter_ignores_invoice_numbers() {
        let bills = sample();
        let q = HistoryQuery::search("603").with_filter(HistoryFilter::Customer);
        assert!(q.apply(&bills, now()).is_empty());
    }
}
