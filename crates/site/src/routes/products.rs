//! Product detail route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Map, Value, json};
use tracing::instrument;

use brickmon_core::Price;

use crate::error::Result;
use crate::filters;
use crate::models::Product;
use crate::routes::NotFoundTemplate;
use crate::state::AppState;

/// Product display data for the detail page.
pub struct ProductDetailView {
    pub name: String,
    pub status: String,
    pub badge_class: &'static str,
    pub price_label: String,
    pub retailer: Option<String>,
    pub image_url: Option<String>,
    pub buy_url: Option<String>,
    pub description: Option<String>,
    /// SEO description for meta/OpenGraph tags.
    pub meta_description: String,
}

impl From<&Product> for ProductDetailView {
    fn from(product: &Product) -> Self {
        let retailer_note = product
            .retailer
            .as_deref()
            .map(|r| format!("Available at {r}. "))
            .unwrap_or_default();
        let meta_description = format!(
            "Check stock status and pricing for {}. {}Real-time inventory tracking.",
            product.name, retailer_note
        );

        Self {
            name: product.name.clone(),
            status: product.status.clone(),
            badge_class: product.status_tone().css_class(),
            price_label: product.price_label().to_owned(),
            retailer: product.retailer.clone(),
            image_url: product.image_url.clone(),
            buy_url: product.buy_url.clone(),
            description: product.description.clone(),
            meta_description,
        }
    }
}

/// Build `Product` JSON-LD structured data for a catalog entry.
///
/// The offer block is only emitted when the price label parses to a
/// number; a "TBA" product still gets name/image/description markup.
fn product_json_ld(product: &Product) -> String {
    let mut root = Map::new();
    root.insert("@context".into(), json!("https://schema.org"));
    root.insert("@type".into(), json!("Product"));
    root.insert("name".into(), json!(product.name));

    if let Some(image_url) = &product.image_url {
        root.insert("image".into(), json!(image_url));
    }
    if let Some(description) = &product.description {
        root.insert("description".into(), json!(description));
    }

    if let Some(price) = product.parsed_price() {
        let mut offer = Map::new();
        offer.insert("@type".into(), json!("Offer"));
        offer.insert("price".into(), json!(price.amount.to_string()));
        offer.insert("priceCurrency".into(), json!(Price::CURRENCY_CODE));
        offer.insert(
            "availability".into(),
            json!(product.availability().schema_org_url()),
        );
        if let Some(buy_url) = &product.buy_url {
            offer.insert("url".into(), json!(buy_url));
        }
        if let Some(retailer) = &product.retailer {
            offer.insert(
                "seller".into(),
                json!({ "@type": "Organization", "name": retailer }),
            );
        }
        root.insert("offers".into(), Value::Object(offer));
    }

    Value::Object(root).to_string()
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub product: ProductDetailView,
    /// Serialized `Product` structured data.
    pub json_ld: String,
}

/// Display a product detail page.
///
/// The slug comes from the `/set/{slug}` path segment and is matched
/// against the stored slug column via the cached catalog index. An
/// unknown slug renders the 404 page; that is routing's concern, not a
/// failure of the catalog.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Response> {
    let Some(product) = state.catalog().resolve(&slug).await? else {
        tracing::debug!(slug = %slug, "No product for slug");
        return Ok((StatusCode::NOT_FOUND, NotFoundTemplate).into_response());
    };

    let template = ProductShowTemplate {
        json_ld: product_json_ld(&product),
        product: ProductDetailView::from(&product),
    };
    Ok(template.into_response())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use brickmon_core::{ProductId, Slug};
    use chrono::Utc;

    fn product(price: Option<&str>) -> Product {
        Product {
            id: ProductId::new(1),
            name: "Life-Size Pikachu".to_string(),
            slug: Slug::from_name("Life-Size Pikachu"),
            status: "OUT OF STOCK".to_string(),
            price: price.map(str::to_string),
            retailer: Some("LEGO Shop".to_string()),
            image_url: Some("https://cdn.example.com/pikachu.jpg".to_string()),
            buy_url: Some("https://shop.example.com/pikachu".to_string()),
            description: Some("A life-size buildable Pikachu.".to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_json_ld_with_priced_offer() {
        let json: serde_json::Value =
            serde_json::from_str(&product_json_ld(&product(Some("$99.99")))).unwrap();

        assert_eq!(json["@type"], "Product");
        assert_eq!(json["offers"]["price"], "99.99");
        assert_eq!(json["offers"]["priceCurrency"], "USD");
        assert_eq!(
            json["offers"]["availability"],
            "https://schema.org/OutOfStock"
        );
        assert_eq!(json["offers"]["seller"]["name"], "LEGO Shop");
    }

    #[test]
    fn test_json_ld_without_price_has_no_offer() {
        let json: serde_json::Value =
            serde_json::from_str(&product_json_ld(&product(Some("TBA")))).unwrap();

        assert_eq!(json["@type"], "Product");
        assert!(json.get("offers").is_none());
    }

    #[test]
    fn test_meta_description_mentions_retailer() {
        let view = ProductDetailView::from(&product(None));
        assert!(view.meta_description.contains("Available at LEGO Shop."));
    }

    #[test]
    fn test_show_template_renders() {
        let p = product(Some("$99.99"));
        let template = ProductShowTemplate {
            json_ld: product_json_ld(&p),
            product: ProductDetailView::from(&p),
        };

        let html = template.render().unwrap();
        assert!(html.contains("Life-Size Pikachu"));
        assert!(html.contains("$99.99"));
        assert!(html.contains("schema.org"));
        assert!(html.contains("Back to All Products"));
    }
}
