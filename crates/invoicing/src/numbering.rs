//! Invoice numbers.
//!
//! Numbers are free text on the record, but the shop numbers bills with
//! plain integers. The numeric value of a number is its leading digits;
//! anything without leading digits counts as 0.

/// Numeric value of an invoice number (`"602"` → 602, `"602-A"` → 602, `"A1"` → 0).
pub fn invoice_number_value(number: &str) -> u64 {
    let digits: String = number
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(0)
}

/// The number that follows `current`.
pub fn increment_invoice_number(current: &str) -> String {
    invoice_number_value(current).saturating_add(1).to_string()
}

/// The number for the next bill: highest existing number + 1.
///
/// With no history the `fallback` (the shop's configured first number) is used.
pub fn next_invoice_number<'a, I>(existing: I, fallback: &str) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    existing
        .into_iter()
        .map(invoice_number_value)
        .max()
        .map(|highest| highest.saturating_add(1).to_string())
        .unwrap_or_else(|| fallback.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_reads_leading_digits() {
        assert_eq!(invoice_number_value("602"), 602);
        assert_eq!(invoice_number_value(" 615/24 "), 615);
        assert_eq!(invoice_number_value("INV-7"), 0);
        assert_eq!(invoice_number_value(""), 0);
    }

    #[test]
    fn next_is_highest_plus_one() {
        let numbers = ["602", "610", "605"];
        assert_eq!(next_invoice_number(numbers, "602"), "611");
    }

    #[test]
    fn empty_history_uses_fallback() {
        assert_eq!(next_invoice_number(Vec::<&str>::new(), "602"), "602");
    }

    #[test]
    fn unparseable_history_restarts_at_one() {
        assert_eq!(next_invoice_number(["draft"], "602"), "1");
    }

    #[test]
    fn increment_follows_current() {
        assert_eq!(increment_invoice_number("602"), "603");
        assert_eq!(increment_invoice_number("x"), "1");
    }
}
