/// Remote catalog access
///
/// This module handles:
/// - Requests to the product/category API (client.rs)
/// - The versioned local fallback dataset (fallback.rs)
/// - The startup load sequence (loader.rs)
/// - Downloading and resizing product images (images.rs)

pub mod client;
pub mod fallback;
pub mod images;
pub mod loader;

pub use client::CatalogClient;
