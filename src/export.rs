/// CSV export of the filtered product list
///
/// Output is UTF-8 with a byte-order mark so spreadsheet tools pick the
/// right encoding. Numeric cells are bare, text cells are quoted with
/// internal quotes doubled.

use std::path::PathBuf;

use chrono::{NaiveDate, Utc};
use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::error::ExportError;
use crate::state::data::Product;

const BOM: &[u8] = "\u{FEFF}".as_bytes();
const HEADER: [&str; 6] = ["ID", "Title", "Price", "Category", "Description", "Images"];

/// Encode products as CSV bytes, BOM included
pub fn products_to_csv(products: &[Product]) -> Result<Vec<u8>, ExportError> {
    // Quoting is decided per column, so the writer never quotes on its own
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(BOM.to_vec());

    writer.write_record(HEADER)?;
    for product in products {
        let price = if product.price.is_finite() { product.price } else { 0.0 };
        writer.write_record([
            product.id.to_string(),
            quote_text(&product.title),
            price.to_string(),
            quote_text(&product.category_label()),
            quote_text(product.description_text()),
            quote_text(&product.images.join("; ")),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|err| ExportError::Csv(err.into_error().into()))
}

/// Wrap a text cell in double quotes, doubling any quotes inside
fn quote_text(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Suggested file name, e.g. `products_2024-05-01.csv`
pub fn export_file_name(date: NaiveDate) -> String {
    format!("products_{}.csv", date.format("%Y-%m-%d"))
}

pub fn default_export_file_name() -> String {
    export_file_name(Utc::now().date_naive())
}

/// Ask the user where to save, then write the file
///
/// Returns `Ok(None)` when the save dialog was cancelled.
pub async fn save_csv(products: Vec<Product>) -> Result<Option<PathBuf>, ExportError> {
    let handle = rfd::AsyncFileDialog::new()
        .set_title("Export products")
        .set_file_name(default_export_file_name())
        .add_filter("CSV", &["csv"])
        .save_file()
        .await;

    let Some(handle) = handle else {
        return Ok(None);
    };
    let path = handle.path().to_path_buf();

    let written = path.clone();
    tokio::task::spawn_blocking(move || write_csv(&written, &products))
        .await
        .map_err(|e| ExportError::Join(e.to_string()))??;

    Ok(Some(path))
}

/// Encode and write in one step
pub fn write_csv(path: &std::path::Path, products: &[Product]) -> Result<(), ExportError> {
    let bytes = products_to_csv(products)?;
    std::fs::write(path, bytes).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })
}
