//! Display formatting for invoices (Indian locale).

use chrono::NaiveDate;
use rust_decimal::Decimal;

use jewelbill_core::numeric::{round_currency, CURRENCY_DP};

const RUPEE: char = '₹';

/// Amount with Indian digit grouping and two decimals: `1,23,456.70`.
pub fn format_amount(value: Decimal) -> String {
    let mut rounded = round_currency(value);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    rounded.set_sign_positive(true);
    rounded.rescale(CURRENCY_DP);

    let text = rounded.to_string();
    let (whole, frac) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let grouped = group_indian(whole);
    // Values near the decimal limit cannot always be rescaled to two places.
    let frac = format!("{frac:0<2}");
    if negative {
        format!("-{grouped}.{frac}")
    } else {
        format!("{grouped}.{frac}")
    }
}

/// Amount with the rupee sign: `₹1,23,456.70`, `-₹35.05`.
pub fn format_inr(value: Decimal) -> String {
    let amount = format_amount(value);
    match amount.strip_prefix('-') {
        Some(rest) => format!("-{RUPEE}{rest}"),
        None => format!("{RUPEE}{amount}"),
    }
}

/// Invoice date as printed: `dd/mm/yyyy`.
pub fn format_invoice_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Last three digits, then groups of two: `1234567` → `12,34,567`.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut rest = head;
    while rest.len() > 2 {
        let (left, right) = rest.split_at(rest.len() - 2);
        groups.push(right);
        rest = left;
    }
    groups.push(rest);
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}
