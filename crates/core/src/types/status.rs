//! Stock status classification.
//!
//! The catalog's `status` column is free text fed by retailer scrapes, so
//! the read path classifies it heuristically instead of trusting it as an
//! enum. The ordered substring rules live in one table here; both the
//! availability classifier and the badge-tone classifier consume it so
//! the precedence can never drift between call sites.

use serde::{Deserialize, Serialize};

/// Ordered (patterns, availability) rules for free-text classification.
///
/// Matching is case-insensitive substring containment, first rule wins.
/// "avail" is deliberately a stem: retailer feeds say both "Available"
/// and "Limited Availability", and both mean stock exists.
const STATUS_RULES: &[(&[&str], Availability)] = &[
    (&["in stock", "avail"], Availability::InStock),
    (&["out of stock"], Availability::OutOfStock),
    (&["coming soon", "soon"], Availability::PreOrder),
];

/// Match a raw status string against the ordered rule table.
fn match_status(status: &str) -> Option<Availability> {
    let normalized = status.to_lowercase();
    STATUS_RULES
        .iter()
        .find(|(patterns, _)| patterns.iter().any(|p| normalized.contains(p)))
        .map(|&(_, availability)| availability)
}

/// Normalized stock-state classification.
///
/// Used for structured data and badges. Arbitrary status text degrades to
/// [`Availability::OutOfStock`], the conservative default: never advertise
/// stock that cannot be confirmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Availability {
    InStock,
    #[default]
    OutOfStock,
    PreOrder,
}

impl Availability {
    /// Classify a free-text status string.
    ///
    /// Case-insensitive substring matching in a fixed precedence order:
    /// "in stock"/"available", then "out of stock", then
    /// "coming soon"/"soon". Unmatched text defaults to `OutOfStock`.
    #[must_use]
    pub fn classify(status: &str) -> Self {
        match_status(status).unwrap_or_default()
    }

    /// The schema.org availability URL for JSON-LD offers.
    #[must_use]
    pub const fn schema_org_url(self) -> &'static str {
        match self {
            Self::InStock => "https://schema.org/InStock",
            Self::OutOfStock => "https://schema.org/OutOfStock",
            Self::PreOrder => "https://schema.org/PreOrder",
        }
    }
}

/// Style token for status badges.
///
/// Same precedence as [`Availability::classify`], but unrecognized text
/// maps to `Neutral` rather than pretending to know the stock state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StatusTone {
    Success,
    Danger,
    Warning,
    #[default]
    Neutral,
}

impl StatusTone {
    /// Classify a free-text status string into a badge tone.
    #[must_use]
    pub fn classify(status: &str) -> Self {
        match match_status(status) {
            Some(Availability::InStock) => Self::Success,
            Some(Availability::OutOfStock) => Self::Danger,
            Some(Availability::PreOrder) => Self::Warning,
            None => Self::Neutral,
        }
    }

    /// CSS class for the badge element.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Success => "badge badge-success",
            Self::Danger => "badge badge-danger",
            Self::Warning => "badge badge-warning",
            Self::Neutral => "badge badge-neutral",
        }
    }
}

/// Error parsing a [`StockStatus`] from feed input.
#[derive(thiserror::Error, Debug, Clone)]
#[error("unrecognized stock status: {0:?}")]
pub struct StockStatusError(pub String);

/// Closed stock-status vocabulary for the write path.
///
/// Product imports validate feed values against this set and reject
/// anything else, so stored rows stay classifiable. The read path still
/// tolerates arbitrary text via [`Availability::classify`] because the
/// record store is shared with external writers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StockStatus {
    InStock,
    OutOfStock,
    ComingSoon,
}

impl StockStatus {
    /// Human-readable label, as shown on badges and stored in the
    /// `status` column.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::InStock => "IN STOCK",
            Self::OutOfStock => "OUT OF STOCK",
            Self::ComingSoon => "COMING SOON",
        }
    }

    /// The availability this status classifies to.
    #[must_use]
    pub const fn availability(self) -> Availability {
        match self {
            Self::InStock => Availability::InStock,
            Self::OutOfStock => Availability::OutOfStock,
            Self::ComingSoon => Availability::PreOrder,
        }
    }
}

impl std::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for StockStatus {
    type Err = StockStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().replace(['_', '-'], " ").as_str() {
            "IN STOCK" => Ok(Self::InStock),
            "OUT OF STOCK" => Ok(Self::OutOfStock),
            "COMING SOON" => Ok(Self::ComingSoon),
            _ => Err(StockStatusError(s.to_owned())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_out_of_stock() {
        assert_eq!(Availability::classify("OUT OF STOCK"), Availability::OutOfStock);
    }

    #[test]
    fn test_classify_coming_soon() {
        assert_eq!(Availability::classify("Coming Soon"), Availability::PreOrder);
        assert_eq!(Availability::classify("Restocking soon!"), Availability::PreOrder);
    }

    #[test]
    fn test_classify_available_means_in_stock() {
        assert_eq!(Availability::classify("Limited Availability"), Availability::InStock);
        assert_eq!(Availability::classify("in stock at Target"), Availability::InStock);
    }

    #[test]
    fn test_classify_unknown_defaults_to_out_of_stock() {
        assert_eq!(Availability::classify("Unknown"), Availability::OutOfStock);
        assert_eq!(Availability::classify(""), Availability::OutOfStock);
    }

    #[test]
    fn test_classify_precedence_is_ordered() {
        // "available" outranks "soon" because the in-stock rule is first
        assert_eq!(
            Availability::classify("Available soon"),
            Availability::InStock
        );
    }

    #[test]
    fn test_schema_org_urls() {
        assert_eq!(
            Availability::InStock.schema_org_url(),
            "https://schema.org/InStock"
        );
        assert_eq!(
            Availability::PreOrder.schema_org_url(),
            "https://schema.org/PreOrder"
        );
    }

    #[test]
    fn test_tone_follows_availability() {
        assert_eq!(StatusTone::classify("IN STOCK"), StatusTone::Success);
        assert_eq!(StatusTone::classify("Out of Stock"), StatusTone::Danger);
        assert_eq!(StatusTone::classify("COMING SOON"), StatusTone::Warning);
    }

    #[test]
    fn test_tone_unknown_is_neutral() {
        assert_eq!(StatusTone::classify("Discontinued?"), StatusTone::Neutral);
    }

    #[test]
    fn test_stock_status_parse() {
        assert_eq!("IN STOCK".parse::<StockStatus>().unwrap(), StockStatus::InStock);
        assert_eq!("in_stock".parse::<StockStatus>().unwrap(), StockStatus::InStock);
        assert_eq!("coming-soon".parse::<StockStatus>().unwrap(), StockStatus::ComingSoon);
        assert!("SOLD OUT".parse::<StockStatus>().is_err());
    }

    #[test]
    fn test_stock_status_label_roundtrip() {
        for status in [
            StockStatus::InStock,
            StockStatus::OutOfStock,
            StockStatus::ComingSoon,
        ] {
            assert_eq!(status.label().parse::<StockStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_closed_vocabulary_classifies_consistently() {
        for status in [
            StockStatus::InStock,
            StockStatus::OutOfStock,
            StockStatus::ComingSoon,
        ] {
            assert_eq!(Availability::classify(status.label()), status.availability());
        }
    }
}
