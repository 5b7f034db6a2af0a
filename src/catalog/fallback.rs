/// Local fallback dataset
///
/// When the remote API cannot be reached, products are read from a
/// versioned fixture file:
///
/// ```json
/// { "version": 1, "products": [ { "id": 1, "title": "..." } ] }
/// ```
///
/// A sample dataset in the same format is compiled into the binary and used
/// when no fixture file is found on disk.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::FixtureError;
use crate::state::data::Product;

/// The only fixture format version understood
pub const FIXTURE_VERSION: u32 = 1;

#[derive(Debug, Clone, Deserialize)]
pub struct Fixture {
    pub version: u32,
    #[serde(default)]
    pub products: Vec<Product>,
}

/// Read and check a fixture file
pub async fn read_fixture(path: &Path) -> Result<Vec<Product>, FixtureError> {
    let bytes = tokio::fs::read(path).await.map_err(|source| FixtureError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_fixture(path, &bytes)
}

const BUNDLED_FIXTURE: &[u8] = include_bytes!("../../fixtures/products.fixture.json");

/// The sample dataset shipped inside the binary
pub fn bundled_products() -> Result<Vec<Product>, FixtureError> {
    parse_fixture(Path::new("fixtures/products.fixture.json"), BUNDLED_FIXTURE)
}

fn parse_fixture(path: &Path, bytes: &[u8]) -> Result<Vec<Product>, FixtureError> {
    let fixture: Fixture = serde_json::from_slice(bytes).map_err(|source| FixtureError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    if fixture.version != FIXTURE_VERSION {
        return Err(FixtureError::UnsupportedVersion {
            path: path.to_path_buf(),
            version: fixture.version,
        });
    }
    Ok(fixture.products)
}

/// Try each candidate in order; the first readable fixture wins
///
/// Missing files are skipped quietly, unreadable ones are logged.
pub async fn load_first_available(candidates: &[PathBuf]) -> Option<(PathBuf, Vec<Product>)> {
    for path in candidates {
        match read_fixture(path).await {
            Ok(products) => {
                tracing::info!(path = %path.display(), count = products.len(), "📦 loaded fallback dataset");
                return Some((path.clone(), products));
            }
            Err(err) if err.is_missing() => {
                tracing::debug!(path = %path.display(), "no fallback dataset here");
            }
            Err(err) => {
                tracing::error!(error = %err, "skipping unusable fallback dataset");
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_fixture(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_read_fixture() {
        let file = write_fixture(r#"{"version": 1, "products": [{"id": 1, "title": "Apple", "price": 10}]}"#);
        let products = read_fixture(file.path()).await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].title, "Apple");
    }

    #[test]
    fn test_bundled_sample_fixture_parses() {
        let products = bundled_products().unwrap();
        assert_eq!(products.len(), 4);
        assert!(products[2].images.is_empty());
        assert_eq!(products[1].category_label(), "Electronics");
    }

    #[tokio::test]
    async fn test_rejects_unknown_version() {
        let file = write_fixture(r#"{"version": 2, "products": []}"#);
        assert!(matches!(
            read_fixture(file.path()).await,
            Err(FixtureError::UnsupportedVersion { version: 2, .. })
        ));
    }

    #[tokio::test]
    async fn test_rejects_bare_array() {
        let file = write_fixture(r#"[{"id": 1}]"#);
        assert!(matches!(read_fixture(file.path()).await, Err(FixtureError::Parse { .. })));
    }

    #[tokio::test]
    async fn test_first_available_skips_missing_and_broken() {
        let dir = tempfile::tempdir().unwrap();
        let broken = write_fixture("not json");
        let good = write_fixture(r#"{"version": 1, "products": [{"id": 5}]}"#);
        let candidates = vec![
            dir.path().join("missing.json"),
            broken.path().to_path_buf(),
            good.path().to_path_buf(),
        ];

        let (path, products) = load_first_available(&candidates).await.unwrap();
        assert_eq!(path, good.path());
        assert_eq!(products[0].id, 5);
    }

    #[tokio::test]
    async fn test_nothing_available() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_first_available(&[dir.path().join("missing.json")]).await.is_none());
        assert!(load_first_available(&[]).await.is_none());
    }
}
