//! Sitemap route handler.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use tracing::instrument;

use crate::error::Result;
use crate::models::Product;
use crate::state::AppState;

/// Serve `/sitemap.xml` built from the cached catalog.
#[instrument(skip(state))]
pub async fn sitemap(State(state): State<AppState>) -> Result<Response> {
    let snapshot = state.catalog().snapshot().await?;
    let xml = build_sitemap(state.config().base_url_trimmed(), snapshot.products());

    Ok((
        [(header::CONTENT_TYPE, "application/xml")],
        xml,
    )
        .into_response())
}

/// Render the sitemap XML: the home page plus one URL per product.
///
/// The home page polls hourly-fresh stock data, detail pages change when
/// an import runs, so the change frequencies differ.
fn build_sitemap(base_url: &str, products: &[Product]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );

    xml.push_str(&format!(
        "  <url>\n    <loc>{base_url}/</loc>\n    <changefreq>hourly</changefreq>\n    <priority>1.0</priority>\n  </url>\n"
    ));

    for product in products {
        xml.push_str(&format!(
            "  <url>\n    <loc>{base_url}/set/{slug}</loc>\n    <lastmod>{lastmod}</lastmod>\n    <changefreq>daily</changefreq>\n    <priority>0.8</priority>\n  </url>\n",
            slug = product.slug,
            lastmod = product.updated_at.format("%Y-%m-%d"),
        ));
    }

    xml.push_str("</urlset>\n");
    xml
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use brickmon_core::{ProductId, Slug};
    use chrono::Utc;

    fn product(name: &str) -> Product {
        Product {
            id: ProductId::new(1),
            name: name.to_string(),
            slug: Slug::from_name(name),
            status: "IN STOCK".to_string(),
            price: None,
            retailer: None,
            image_url: None,
            buy_url: None,
            description: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_sitemap_contains_home_and_products() {
        let xml = build_sitemap(
            "https://brickmon.app",
            &[product("Life-Size Pikachu"), product("Kanto Region Set")],
        );

        assert!(xml.starts_with("<?xml version=\"1.0\""));
        assert!(xml.contains("<loc>https://brickmon.app/</loc>"));
        assert!(xml.contains("<loc>https://brickmon.app/set/life-size-pikachu</loc>"));
        assert!(xml.contains("<loc>https://brickmon.app/set/kanto-region-set</loc>"));
        assert!(xml.ends_with("</urlset>\n"));
    }

    #[test]
    fn test_sitemap_with_empty_catalog() {
        let xml = build_sitemap("https://brickmon.app", &[]);
        assert_eq!(xml.matches("<url>").count(), 1);
    }
}
