//! Product model.

use chrono::{DateTime, Utc};

use brickmon_core::{Availability, Price, ProductId, Slug, StatusTone};

/// A tracked product as stored in the `products` table.
///
/// The site never mutates products; the import CLI is the single writer.
/// `status` and `price` are kept as the raw text the tracker feed
/// delivered, and normalized on read via [`brickmon_core`] classifiers.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub slug: Slug,
    /// Raw status text, e.g. "IN STOCK". Classify, don't match.
    pub status: String,
    /// Display price label, e.g. "$99.99" or "TBA".
    pub price: Option<String>,
    pub retailer: Option<String>,
    pub image_url: Option<String>,
    pub buy_url: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Normalized availability for structured data and badges.
    #[must_use]
    pub fn availability(&self) -> Availability {
        Availability::classify(&self.status)
    }

    /// Badge tone for the status pill.
    #[must_use]
    pub fn status_tone(&self) -> StatusTone {
        StatusTone::classify(&self.status)
    }

    /// Structured price parsed from the display label, if any.
    #[must_use]
    pub fn parsed_price(&self) -> Option<Price> {
        self.price.as_deref().and_then(Price::parse_label)
    }

    /// Display label for the price, with "TBA" standing in for unknown.
    #[must_use]
    pub fn price_label(&self) -> &str {
        self.price.as_deref().unwrap_or("TBA")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn product(status: &str, price: Option<&str>) -> Product {
        Product {
            id: ProductId::new(1),
            name: "Life-Size Pikachu".to_string(),
            slug: Slug::from_name("Life-Size Pikachu"),
            status: status.to_string(),
            price: price.map(str::to_string),
            retailer: Some("LEGO Shop".to_string()),
            image_url: None,
            buy_url: None,
            description: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_availability_from_raw_status() {
        assert_eq!(product("IN STOCK", None).availability(), Availability::InStock);
        assert_eq!(
            product("something odd", None).availability(),
            Availability::OutOfStock
        );
    }

    #[test]
    fn test_parsed_price() {
        assert_eq!(
            product("IN STOCK", Some("$99.99")).parsed_price(),
            Some(Price::new(Decimal::new(9999, 2)))
        );
        assert_eq!(product("IN STOCK", Some("TBA")).parsed_price(), None);
        assert_eq!(product("IN STOCK", None).parsed_price(), None);
    }

    #[test]
    fn test_price_label_fallback() {
        assert_eq!(product("IN STOCK", None).price_label(), "TBA");
        assert_eq!(product("IN STOCK", Some("$49.99")).price_label(), "$49.99");
    }
}
