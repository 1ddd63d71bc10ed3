//! Invoice totals.
//!
//! Pure functions over line amounts and [`BillRates`]. Every intermediate
//! figure is kept because the invoice prints each of them. Values are exact
//! decimals; rounding to paise happens only when formatting for display.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use jewelbill_core::ValueObject;
use jewelbill_core::numeric::{percent_of, round_currency};

use crate::item::LineItem;
use crate::rates::BillRates;

/// Totals derived from a bill's lines and rates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceTotals {
    pub subtotal: Decimal,
    pub discount_amount: Decimal,
    pub taxable_amount: Decimal,
    pub making_charge_amount: Decimal,
    pub sgst_amount: Decimal,
    pub cgst_amount: Decimal,
    pub grand_total: Decimal,
}

impl InvoiceTotals {
    /// SGST + CGST.
    pub fn total_tax(&self) -> Decimal {
        self.sgst_amount + self.cgst_amount
    }

    /// Every figure rounded to two places, for display.
    pub fn rounded(&self) -> Self {
        Self {
            subtotal: round_currency(self.subtotal),
            discount_amount: round_currency(self.discount_amount),
            taxable_amount: round_currency(self.taxable_amount),
            making_charge_amount: round_currency(self.making_charge_amount),
            sgst_amount: round_currency(self.sgst_amount),
            cgst_amount: round_currency(self.cgst_amount),
            grand_total: round_currency(self.grand_total),
        }
    }
}

impl ValueObject for InvoiceTotals {}

/// Totals for a list of line items.
pub fn compute_totals(items: &[LineItem], rates: &BillRates) -> InvoiceTotals {
    compute_totals_from_amounts(items.iter().map(LineItem::amount), rates)
}

/// Totals from bare line amounts.
///
/// 1. `subtotal = Σ amounts`
/// 2. `discount = subtotal × discount_rate / 100`
/// 3. `taxable = subtotal − discount`
/// 4. `making = taxable × making_charge_rate / 100`
/// 5. `sgst`, `cgst` likewise on `taxable`
/// 6. `grand = taxable + making + sgst + cgst`
///
/// Never fails: a step that leaves the decimal range yields zero.
pub fn compute_totals_from_amounts<I>(amounts: I, rates: &BillRates) -> InvoiceTotals
where
    I: IntoIterator<Item = Decimal>,
{
    let subtotal = amounts
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, amount| acc.checked_add(amount))
        .unwrap_or(Decimal::ZERO);

    let discount_amount = percent_of(subtotal, rates.discount_rate);
    let taxable_amount = subtotal
        .checked_sub(discount_amount)
        .unwrap_or(Decimal::ZERO);

    let making_charge_amount = percent_of(taxable_amount, rates.making_charge_rate);
    let sgst_amount = percent_of(taxable_amount, rates.sgst_rate);
    let cgst_amount = percent_of(taxable_amount, rates.cgst_rate);

    let grand_total = [making_charge_amount, sgst_amount, cgst_amount]
        .into_iter()
        .try_fold(taxable_amount, |acc, v| acc.checked_add(v))
        .unwrap_or(Decimal::ZERO);

    InvoiceTotals {
        subtotal,
        discount_amount,
        taxable_amount,
        making_charge_amount,
        sgst_amount,
        cgst_amount,
        grand_total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::str::FromStr;
    use jewelbill_core::ItemId;
    use proptest::prelude::*;

    use crate::item::ItemDetails;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn rates(discount: &str, making: &str, sgst: &str, cgst: &str) -> BillRates {
        BillRates::new(dec(discount), dec(making), dec(sgst), dec(cgst))
    }

    #[test]
    fn single_gold_item_with_default_rates() {
        let item = LineItem::new(
            ItemId::new(),
            ItemDetails::new("Gold necklace", dec("10"), dec("5000")),
        )
        .unwrap();
        assert_eq!(item.amount(), dec("50000.00"));

        let totals = compute_totals(&[item], &rates("0", "10", "1.5", "1.5"));
        assert_eq!(totals.subtotal, dec("50000.00"));
        assert_eq!(totals.discount_amount, Decimal::ZERO);
        assert_eq!(totals.taxable_amount, dec("50000.00"));
        assert_eq!(totals.making_charge_amount, dec("5000.00"));
        assert_eq!(totals.sgst_amount, dec("750.00"));
        assert_eq!(totals.cgst_amount, dec("750.00"));
        assert_eq!(totals.grand_total, dec("56500.00"));
        assert_eq!(totals.total_tax(), dec("1500"));
    }

    #[test]
    fn empty_bill_totals_zero_whatever_the_rates() {
        for r in [rates("0", "10", "1.5", "1.5"), rates("50", "25", "9", "9")] {
            let totals = compute_totals(&[], &r);
            assert_eq!(totals.subtotal, Decimal::ZERO);
            assert_eq!(totals.taxable_amount, Decimal::ZERO);
            assert_eq!(totals.grand_total, Decimal::ZERO);
        }
    }

    #[test]
    fn percentage_discount_on_two_amounts() {
        let totals = compute_totals_from_amounts(
            [dec("100"), dec("250.5")],
            &rates("10", "0", "0", "0"),
        );
        assert_eq!(totals.subtotal, dec("350.5"));
        assert_eq!(totals.discount_amount, dec("35.05"));
        assert_eq!(totals.taxable_amount, dec("315.45"));
        assert_eq!(totals.grand_total, dec("315.45"));
    }

    #[test]
    fn rounded_totals_are_for_display_only() {
        let totals = compute_totals_from_amounts([dec("333.33")], &rates("0", "0", "1.5", "1.5"));
        assert_eq!(totals.sgst_amount, dec("4.99995"));
        assert_eq!(totals.rounded().sgst_amount, dec("5.00"));
    }

    #[test]
    fn overflowing_subtotal_degrades_to_zero() {
        let totals =
            compute_totals_from_amounts([Decimal::MAX, Decimal::MAX], &BillRates::default());
        assert_eq!(totals.subtotal, Decimal::ZERO);
        assert_eq!(totals.grand_total, Decimal::ZERO);
    }

    fn amount_strategy() -> impl Strategy<Value = Decimal> {
        (0i64..100_000_000i64).prop_map(|paise| Decimal::new(paise, 2))
    }

    fn rate_strategy() -> impl Strategy<Value = Decimal> {
        (0i64..10_000i64).prop_map(|bp| Decimal::new(bp, 2))
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        #[test]
        fn subtotal_is_sum_of_amounts(
            amounts in prop::collection::vec(amount_strategy(), 0..20),
        ) {
            let expected: Decimal = amounts.iter().copied().sum();
            let totals = compute_totals_from_amounts(amounts, &BillRates::default());
            prop_assert_eq!(totals.subtotal, expected);
        }

        #[test]
        fn taxable_plus_discount_is_subtotal(
            amounts in prop::collection::vec(amount_strategy(), 0..20),
            discount in rate_strategy(),
        ) {
            let r = BillRates { discount_rate: discount, ..BillRates::default() };
            let totals = compute_totals_from_amounts(amounts, &r);
            prop_assert_eq!(totals.taxable_amount + totals.discount_amount, totals.subtotal);
        }

        #[test]
        fn grand_total_is_sum_of_components(
            amounts in prop::collection::vec(amount_strategy(), 0..20),
            discount in rate_strategy(),
            making in rate_strategy(),
            sgst in rate_strategy(),
            cgst in rate_strategy(),
        ) {
            let totals = compute_totals_from_amounts(
                amounts,
                &BillRates::new(discount, making, sgst, cgst),
            );
            prop_assert_eq!(
                totals.grand_total,
                totals.taxable_amount
                    + totals.making_charge_amount
                    + totals.sgst_amount
                    + totals.cgst_amount
            );
        }

        #[test]
        fn totals_are_idempotent(
            amounts in prop::collection::vec(amount_strategy(), 0..20),
            making in rate_strategy(),
        ) {
            let r = BillRates { making_charge_rate: making, ..BillRates::default() };
            let first = compute_totals_from_amounts(amounts.clone(), &r);
            let second = compute_totals_from_amounts(amounts, &r);
            prop_assert_eq!(first, second);
        }
    }
}
