/// Startup load sequence
///
/// Categories first (failure means an empty list), then products from the
/// API, then a fixture file on disk, then the dataset bundled with the
/// binary. Never returns an error: total failure is an empty catalog plus a
/// logged error.

use std::fmt;
use std::path::PathBuf;

use super::client::CatalogClient;
use super::fallback;
use crate::state::data::{Category, Product};

/// Where the product list came from
#[derive(Debug, Clone, PartialEq)]
pub enum DataSource {
    Remote,
    Fixture(PathBuf),
    Bundled,
    Empty,
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Remote => write!(f, "remote API"),
            DataSource::Fixture(path) => write!(f, "local dataset {}", path.display()),
            DataSource::Bundled => write!(f, "bundled sample dataset"),
            DataSource::Empty => write!(f, "no data source"),
        }
    }
}

/// Everything the startup sequence produced
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    pub categories: Vec<Category>,
    pub products: Vec<Product>,
    pub source: DataSource,
}

pub async fn load_catalog(client: CatalogClient, fallback_candidates: Vec<PathBuf>) -> CatalogSnapshot {
    let categories = match client.list_categories().await {
        Ok(categories) => {
            tracing::info!(count = categories.len(), "loaded categories");
            categories
        }
        Err(err) => {
            tracing::warn!(error = %err, "⚠️  could not load categories, continuing without them");
            Vec::new()
        }
    };

    let (products, source) = match client.list_products().await {
        Ok(products) => {
            tracing::info!(count = products.len(), base = client.base_url(), "🛒 loaded products");
            (products, DataSource::Remote)
        }
        Err(err) => {
            tracing::warn!(error = %err, "product API unavailable, trying local dataset");
            match fallback::load_first_available(&fallback_candidates).await {
                Some((path, products)) => (products, DataSource::Fixture(path)),
                None => match fallback::bundled_products() {
                    Ok(products) => {
                        tracing::info!(count = products.len(), "📦 using bundled sample dataset");
                        (products, DataSource::Bundled)
                    }
                    Err(err) => {
                        tracing::error!(
                            error = %err,
                            candidates = fallback_candidates.len(),
                            "no data source available, starting with an empty catalog"
                        );
                        (Vec::new(), DataSource::Empty)
                    }
                },
            }
        }
    };

    CatalogSnapshot { categories, products, source }
}
