//! Catalog import from a YAML product feed.
//!
//! The feed is the single write path into the `products` table: it names
//! each tracked set with its current status, price label, and retailer
//! links. The command validates the whole feed before touching the
//! database, derives slugs from names, and upserts row by row so a
//! re-import refreshes stock data without duplicating products.
//!
//! # Feed Format
//!
//! ```yaml
//! products:
//!   - name: Life-Size Pikachu
//!     status: OUT OF STOCK
//!     price: "$99.99"
//!     retailer: LEGO Shop
//!     buy_url: https://www.lego.com/...
//! ```

use std::path::Path;

use secrecy::SecretString;
use serde::Deserialize;
use tracing::{error, info, warn};

use brickmon_core::{Slug, StockStatus};
use brickmon_site::db::products::NewProduct;
use brickmon_site::db::{self, ProductRepository};

/// Errors from the seed command.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid feed YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("{0} validation errors found")]
    Validation(usize),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Repository error: {0}")]
    Repository(#[from] db::RepositoryError),
}

/// One product entry as written in the feed.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedEntry {
    pub name: String,
    pub status: String,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub retailer: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub buy_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// A parsed product feed.
#[derive(Debug, Deserialize)]
pub struct ProductFeed {
    pub products: Vec<FeedEntry>,
}

/// Validate a feed without touching the database.
///
/// Names must be non-empty and must yield a non-empty slug; status
/// values must come from the closed vocabulary. Unknown statuses are
/// rejected here rather than silently stored and later classified as
/// out of stock.
fn validate_feed(feed: &ProductFeed) -> Vec<String> {
    let mut errors = Vec::new();

    for (i, entry) in feed.products.iter().enumerate() {
        let position = i + 1;

        if entry.name.trim().is_empty() {
            errors.push(format!("entry {position}: name is empty"));
        } else if Slug::from_name(&entry.name).is_empty() {
            errors.push(format!(
                "entry {position}: name {:?} yields an empty slug",
                entry.name
            ));
        }

        if entry.status.parse::<StockStatus>().is_err() {
            errors.push(format!(
                "entry {position} ({:?}): unrecognized status {:?}",
                entry.name, entry.status
            ));
        }
    }

    errors
}

/// Turn a validated feed into upsert-ready rows.
///
/// Slugs are derived from names; when two feed entries collide on a
/// slug the first one wins and the duplicate is dropped with a warning,
/// matching the catalog's lookup policy.
fn plan_import(feed: ProductFeed) -> Vec<NewProduct> {
    let mut seen = std::collections::HashSet::new();
    let mut planned = Vec::with_capacity(feed.products.len());

    for entry in feed.products {
        let slug = Slug::from_name(&entry.name);
        if !seen.insert(slug.clone()) {
            warn!(slug = %slug, name = %entry.name, "Duplicate slug in feed; first entry wins");
            continue;
        }

        // Validation ran first, so the status parses.
        let Ok(status) = entry.status.parse::<StockStatus>() else {
            continue;
        };

        planned.push(NewProduct {
            name: entry.name.trim().to_owned(),
            slug,
            status,
            price: entry.price,
            retailer: entry.retailer,
            image_url: entry.image_url,
            buy_url: entry.buy_url,
            description: entry.description,
        });
    }

    planned
}

/// Import a product feed.
///
/// # Arguments
///
/// * `file_path` - Path to the YAML feed file
/// * `replace` - If true, delete products that are not in the feed
///
/// # Errors
///
/// Returns `SeedError` if the environment is incomplete, the file is
/// missing or malformed, validation fails, or a database operation fails.
pub async fn run(file_path: &str, replace: bool) -> Result<(), SeedError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("SITE_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| SeedError::MissingEnvVar("SITE_DATABASE_URL"))?;

    let path = Path::new(file_path);
    if !path.exists() {
        return Err(SeedError::FileNotFound(file_path.to_owned()));
    }

    info!(path = %file_path, "Loading product feed");

    // Read and validate the feed before connecting to the database
    let content = tokio::fs::read_to_string(path).await?;
    let feed: ProductFeed = serde_yaml::from_str(&content)?;

    info!(products = feed.products.len(), "Parsed feed");

    let errors = validate_feed(&feed);
    if !errors.is_empty() {
        error!("Feed validation failed:");
        for err in &errors {
            error!("  - {err}");
        }
        return Err(SeedError::Validation(errors.len()));
    }

    let planned = plan_import(feed);

    let pool = db::create_pool(&database_url).await?;
    info!("Connected to database");

    let repo = ProductRepository::new(&pool);
    let mut imported = 0usize;
    for new in &planned {
        repo.upsert(new).await?;
        imported += 1;
    }

    if replace {
        let keep: Vec<String> = planned
            .iter()
            .map(|p| p.slug.as_str().to_owned())
            .collect();
        let removed = repo.prune_except(&keep).await?;
        if removed > 0 {
            info!(removed, "Retired products no longer in the feed");
        }
    }

    info!(imported, "Import complete!");
    Ok(())
}
