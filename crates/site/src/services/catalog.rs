//! Cached catalog snapshots.
//!
//! The catalog is read far more often than it changes: every page load
//! needs the product list or a slug lookup, while writes only happen when
//! an import runs. Instead of scanning the table per request, the service
//! loads the whole catalog once, builds a slug index over it, and caches
//! the snapshot in `moka` with a short TTL. Page loads within the TTL
//! share one snapshot; after it expires the next request re-fetches,
//! which is the site's polling model (no push, no invalidation hooks).

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use sqlx::PgPool;
use tracing::instrument;

use crate::db::ProductRepository;
use crate::error::AppError;
use crate::models::Product;

/// Cache TTL for the catalog snapshot.
const SNAPSHOT_TTL: Duration = Duration::from_secs(60);

/// Cache key; there is only ever one snapshot.
const SNAPSHOT_KEY: &str = "catalog";

/// Derived figures for the live stats bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogStats {
    /// Number of tracked products.
    pub tracked_sets: usize,
    /// Number of distinct retailers across the catalog.
    pub retailers: usize,
    /// Products currently classified as in stock.
    pub in_stock: usize,
}

/// An immutable point-in-time view of the catalog with a slug index.
#[derive(Debug)]
pub struct CatalogSnapshot {
    products: Vec<Product>,
    by_slug: HashMap<String, usize>,
}

impl CatalogSnapshot {
    /// Build a snapshot from a product list.
    ///
    /// The unique `slug` column makes collisions impossible among stored
    /// rows, but the index still defines a policy in case the store was
    /// populated by an older writer: first product in wins, later
    /// duplicates are logged and unreachable by slug.
    #[must_use]
    pub fn new(products: Vec<Product>) -> Self {
        let mut by_slug = HashMap::with_capacity(products.len());
        for (i, product) in products.iter().enumerate() {
            if let Some(&first) = by_slug.get(product.slug.as_str()) {
                tracing::warn!(
                    slug = %product.slug,
                    kept = %products.get(first).map_or("?", |p: &Product| p.name.as_str()),
                    shadowed = %product.name,
                    "Duplicate slug in catalog; first product wins"
                );
                continue;
            }
            by_slug.insert(product.slug.as_str().to_owned(), i);
        }
        Self { products, by_slug }
    }

    /// All products, ordered as loaded (by name).
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by slug.
    #[must_use]
    pub fn get(&self, slug: &str) -> Option<&Product> {
        self.by_slug.get(slug).and_then(|&i| self.products.get(i))
    }

    /// Stats derived from the snapshot.
    #[must_use]
    pub fn stats(&self) -> CatalogStats {
        let retailers = self
            .products
            .iter()
            .filter_map(|p| p.retailer.as_deref())
            .collect::<std::collections::HashSet<_>>()
            .len();
        let in_stock = self
            .products
            .iter()
            .filter(|p| p.availability() == brickmon_core::Availability::InStock)
            .count();
        CatalogStats {
            tracked_sets: self.products.len(),
            retailers,
            in_stock,
        }
    }
}

/// Read-through cache over the product table.
#[derive(Clone)]
pub struct CatalogService {
    inner: Arc<CatalogServiceInner>,
}

struct CatalogServiceInner {
    pool: PgPool,
    cache: Cache<&'static str, Arc<CatalogSnapshot>>,
}

impl CatalogService {
    /// Create a new catalog service over a connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        let cache = Cache::builder()
            .max_capacity(1)
            .time_to_live(SNAPSHOT_TTL)
            .build();

        Self {
            inner: Arc::new(CatalogServiceInner { pool, cache }),
        }
    }

    /// Get the current snapshot, loading it from the store if the cached
    /// one has expired.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Database` if the catalog cannot be loaded and
    /// no cached snapshot exists.
    #[instrument(skip(self))]
    pub async fn snapshot(&self) -> Result<Arc<CatalogSnapshot>, AppError> {
        self.inner
            .cache
            .try_get_with(SNAPSHOT_KEY, async {
                let products = ProductRepository::new(&self.inner.pool).list_all().await?;
                tracing::debug!(count = products.len(), "Catalog snapshot loaded");
                Ok::<_, crate::db::RepositoryError>(Arc::new(CatalogSnapshot::new(products)))
            })
            .await
            .map_err(|e: Arc<crate::db::RepositoryError>| {
                AppError::Internal(format!("catalog load failed: {e}"))
            })
    }

    /// Resolve a slug to a product.
    ///
    /// Misses in the cached snapshot fall through to a direct lookup so a
    /// freshly imported product is reachable before the TTL rolls over.
    ///
    /// # Errors
    ///
    /// Returns `AppError` if the store is unreachable.
    #[instrument(skip(self))]
    pub async fn resolve(&self, slug: &str) -> Result<Option<Product>, AppError> {
        let snapshot = self.snapshot().await?;
        if let Some(product) = snapshot.get(slug) {
            return Ok(Some(product.clone()));
        }

        let fresh = ProductRepository::new(&self.inner.pool)
            .get_by_slug(slug)
            .await?;
        Ok(fresh)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use brickmon_core::{ProductId, Slug};
    use chrono::Utc;

    fn product(id: i32, name: &str, status: &str, retailer: Option<&str>) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            slug: Slug::from_name(name),
            status: status.to_string(),
            price: None,
            retailer: retailer.map(str::to_string),
            image_url: None,
            buy_url: None,
            description: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_snapshot_slug_lookup() {
        let snapshot = CatalogSnapshot::new(vec![
            product(1, "Life-Size Pikachu", "OUT OF STOCK", None),
            product(2, "Eevee Evolution Pack", "IN STOCK", None),
        ]);

        let hit = snapshot.get("eevee-evolution-pack").unwrap();
        assert_eq!(hit.id, ProductId::new(2));
        assert!(snapshot.get("no-such-set").is_none());
    }

    #[test]
    fn test_snapshot_duplicate_slug_first_wins() {
        let snapshot = CatalogSnapshot::new(vec![
            product(1, "Kanto Set", "IN STOCK", None),
            product(2, "Kanto Set", "OUT OF STOCK", None),
        ]);

        assert_eq!(snapshot.get("kanto-set").unwrap().id, ProductId::new(1));
        assert_eq!(snapshot.products().len(), 2);
    }

    #[test]
    fn test_snapshot_stats() {
        let snapshot = CatalogSnapshot::new(vec![
            product(1, "A", "IN STOCK", Some("LEGO Shop")),
            product(2, "B", "IN STOCK", Some("LEGO Shop")),
            product(3, "C", "COMING SOON", Some("Target")),
            product(4, "D", "mystery", None),
        ]);

        let stats = snapshot.stats();
        assert_eq!(stats.tracked_sets, 4);
        assert_eq!(stats.retailers, 2);
        assert_eq!(stats.in_stock, 2);
    }
}
