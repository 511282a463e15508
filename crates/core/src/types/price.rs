//! Price parsing for free-text price labels.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A parsed product price.
///
/// The catalog stores prices as display labels (`"$99.99"`, `"TBA"`),
/// not structured numbers; `Price` is the structured form extracted from
/// a label for machine consumers (structured data, comparisons). The site
/// is single-currency by design: everything is USD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in dollars.
    pub amount: Decimal,
}

impl Price {
    /// ISO 4217 code for the only supported currency.
    pub const CURRENCY_CODE: &'static str = "USD";

    /// The label value that marks a price as not yet announced.
    pub const TBA_SENTINEL: &'static str = "TBA";

    /// Create a price from a decimal dollar amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self { amount }
    }

    /// Parse a price from a free-text label.
    ///
    /// Returns `None` for the literal `"TBA"` sentinel, for labels with
    /// no digits at all, and for digit runs that do not form a valid
    /// decimal. Otherwise the first maximal run of digits and `.`
    /// characters is parsed as a decimal dollar amount.
    ///
    /// Thousands separators, negative values, and non-USD currencies are
    /// deliberately not handled.
    ///
    /// ```
    /// use brickmon_core::Price;
    ///
    /// assert_eq!(Price::parse_label("$99.99").map(|p| p.amount.to_string()),
    ///            Some("99.99".to_owned()));
    /// assert_eq!(Price::parse_label("TBA"), None);
    /// assert_eq!(Price::parse_label("Free!"), None);
    /// ```
    #[must_use]
    pub fn parse_label(label: &str) -> Option<Self> {
        if label == Self::TBA_SENTINEL {
            return None;
        }

        let run = first_numeric_run(label)?;
        run.parse::<Decimal>().ok().map(Self::new)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.amount)
    }
}

/// First maximal run of `[0-9.]` characters, or `None` if there is none.
fn first_numeric_run(s: &str) -> Option<&str> {
    let is_numeric = |c: char| c.is_ascii_digit() || c == '.';

    let start = s.find(is_numeric)?;
    let rest = s.get(start..)?;
    let end = rest.find(|c| !is_numeric(c)).unwrap_or(rest.len());
    rest.get(..end)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_label_dollar_amount() {
        let price = Price::parse_label("$99.99").unwrap();
        assert_eq!(price.amount, Decimal::new(9999, 2));
    }

    #[test]
    fn test_parse_label_tba_sentinel() {
        assert_eq!(Price::parse_label("TBA"), None);
    }

    #[test]
    fn test_parse_label_no_digits() {
        assert_eq!(Price::parse_label("Free!"), None);
        assert_eq!(Price::parse_label(""), None);
        assert_eq!(Price::parse_label("$TBA"), None);
    }

    #[test]
    fn test_parse_label_takes_first_run() {
        let price = Price::parse_label("was $129.99, now cheaper").unwrap();
        assert_eq!(price.amount, Decimal::new(12999, 2));
    }

    #[test]
    fn test_parse_label_whole_dollars() {
        let price = Price::parse_label("$49").unwrap();
        assert_eq!(price.amount, Decimal::new(49, 0));
    }

    #[test]
    fn test_parse_label_invalid_run() {
        // A run of dots is numeric-shaped but not a decimal
        assert_eq!(Price::parse_label("..."), None);
    }

    #[test]
    fn test_display_two_decimal_places() {
        let price = Price::parse_label("$49").unwrap();
        assert_eq!(price.to_string(), "$49.00");
    }

    #[test]
    fn test_parse_label_deterministic() {
        assert_eq!(Price::parse_label("$19.99"), Price::parse_label("$19.99"));
    }
}
