//! Product repository for database operations.
//!
//! The site only reads products; the import CLI also writes through this
//! repository. Queries use the runtime sqlx API so the crate builds
//! without a live database.

use sqlx::PgPool;

use brickmon_core::{Slug, StockStatus};

use super::{RepositoryError, map_unique_violation};
use crate::models::Product;

/// A product row as delivered by an import feed, before it has an ID.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub slug: Slug,
    pub status: StockStatus,
    pub price: Option<String>,
    pub retailer: Option<String>,
    pub image_url: Option<String>,
    pub buy_url: Option<String>,
    pub description: Option<String>,
}

const PRODUCT_COLUMNS: &str =
    "id, name, slug, status, price, retailer, image_url, buy_url, description, \
     created_at, updated_at";

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List the full catalog, ordered by name.
    ///
    /// The catalog is small by design (a few dozen tracked sets), so the
    /// site loads it whole and derives views from the snapshot.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY name"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(products)
    }

    /// Get a product by its stored slug.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<Product>, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE slug = $1"
        ))
        .bind(slug)
        .fetch_optional(self.pool)
        .await?;

        Ok(product)
    }

    /// Insert a product, or update the existing row with the same slug.
    ///
    /// The slug is the import identity: re-importing a feed refreshes
    /// status, price, and links without duplicating rows.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the insert trips a unique
    /// constraint other than the slug (not expected with the current
    /// schema), `RepositoryError::Database` for other failures.
    pub async fn upsert(&self, new: &NewProduct) -> Result<Product, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "INSERT INTO products (name, slug, status, price, retailer, image_url, buy_url, description)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             ON CONFLICT (slug) DO UPDATE SET
                 name = EXCLUDED.name,
                 status = EXCLUDED.status,
                 price = EXCLUDED.price,
                 retailer = EXCLUDED.retailer,
                 image_url = EXCLUDED.image_url,
                 buy_url = EXCLUDED.buy_url,
                 description = EXCLUDED.description,
                 updated_at = now()
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(&new.name)
        .bind(new.slug.as_str())
        .bind(new.status.label())
        .bind(new.price.as_deref())
        .bind(new.retailer.as_deref())
        .bind(new.image_url.as_deref())
        .bind(new.buy_url.as_deref())
        .bind(new.description.as_deref())
        .fetch_one(self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "product"))?;

        Ok(product)
    }

    /// Delete every product whose slug is not in `keep`.
    ///
    /// Used by replace-mode imports to retire products that dropped out
    /// of the feed. Returns the number of rows removed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn prune_except(&self, keep: &[String]) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM products WHERE slug <> ALL($1)")
            .bind(keep)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
