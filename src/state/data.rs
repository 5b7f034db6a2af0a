/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the catalog API layer and the UI layer.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Label shown when a text field has nothing to display
pub const MISSING_LABEL: &str = "N/A";

/// Represents a single product in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique catalog ID
    pub id: i64,
    #[serde(default, deserialize_with = "lenient_title")]
    pub title: String,
    /// Price in dollars; missing or non-numeric prices read as zero
    #[serde(default, deserialize_with = "lenient_price")]
    pub price: f64,
    #[serde(default)]
    pub description: Option<String>,
    /// Denormalized category, either an object or a bare value
    #[serde(default)]
    pub category: Option<CategoryField>,
    /// Category reference sent by some payloads instead of a nested object
    #[serde(default, rename = "categoryId", skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    /// Image URLs; the first one is the thumbnail
    #[serde(default, deserialize_with = "lenient_images")]
    pub images: Vec<String>,
}

/// Null or non-string titles read as empty and display as `N/A`
fn lenient_title<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(title) => title,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

/// Numbers and numeric strings are kept; anything else reads as zero
fn lenient_price<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let price = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    Ok(if price.is_finite() { price } else { 0.0 })
}

/// A null image list is empty; non-string entries are skipped
fn lenient_images<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(url) => Some(url),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

/// The category as it appears on a product record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryField {
    Named {
        #[serde(default)]
        id: Option<i64>,
        #[serde(default)]
        name: Option<String>,
    },
    Raw(Value),
}

/// A selectable category, loaded once per session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.id, self.name)
    }
}

/// Body of a create or update request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductPayload {
    pub title: String,
    pub price: f64,
    pub description: String,
    #[serde(rename = "categoryId")]
    pub category_id: i64,
    pub images: Vec<String>,
}

impl Product {
    /// Title for display, falling back to a fixed label
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            MISSING_LABEL
        } else {
            &self.title
        }
    }

    /// Price with the currency prefix, e.g. `$10` or `$10.5`
    pub fn display_price(&self) -> String {
        let price = if self.price.is_finite() { self.price } else { 0.0 };
        format!("${}", price)
    }

    /// Description text, empty when absent
    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    /// Category label: denormalized name, then the raw value, then `N/A`
    pub fn category_label(&self) -> String {
        match &self.category {
            Some(CategoryField::Named { name: Some(name), .. }) if !name.is_empty() => name.clone(),
            Some(CategoryField::Raw(value)) => match value {
                Value::String(s) if !s.is_empty() => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                _ => MISSING_LABEL.to_string(),
            },
            _ => MISSING_LABEL.to_string(),
        }
    }

    /// The category id used to pre-seed selectors
    pub fn category_ref(&self) -> Option<i64> {
        match &self.category {
            Some(CategoryField::Named { id: Some(id), .. }) => Some(*id),
            Some(CategoryField::Raw(Value::Number(n))) => n.as_i64(),
            _ => None,
        }
        .or(self.category_id)
    }

    /// Thumbnail URL: first image, or the given placeholder
    pub fn thumbnail_url<'a>(&'a self, placeholder: &'a str) -> &'a str {
        self.images
            .iter()
            .map(String::as_str)
            .find(|url| !url.trim().is_empty())
            .unwrap_or(placeholder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const API_PRODUCT: &str = r#"{
        "id": 4,
        "title": "Handmade Fresh Table",
        "slug": "handmade-fresh-table",
        "price": 687,
        "description": "Andy shoes are designed",
        "category": { "id": 5, "name": "Others", "image": "https://placeimg.com/640/480/any" },
        "images": ["https://placeimg.com/640/480/any?r=0.9178"],
        "creationAt": "2024-01-01T00:00:00.000Z"
    }"#;

    #[test]
    fn test_deserialize_api_product() {
        let product: Product = serde_json::from_str(API_PRODUCT).unwrap();
        assert_eq!(product.id, 4);
        assert_eq!(product.price, 687.0);
        assert_eq!(product.category_label(), "Others");
        assert_eq!(product.category_ref(), Some(5));
        assert_eq!(product.images.len(), 1);
    }

    #[test]
    fn test_missing_fields_fall_back() {
        let product: Product = serde_json::from_str(r#"{"id": 9}"#).unwrap();
        assert_eq!(product.display_title(), "N/A");
        assert_eq!(product.display_price(), "$0");
        assert_eq!(product.category_label(), "N/A");
        assert_eq!(product.thumbnail_url("placeholder"), "placeholder");
    }

    #[test]
    fn test_raw_category_value() {
        let product: Product =
            serde_json::from_str(r#"{"id": 1, "category": "Shoes", "categoryId": 3}"#).unwrap();
        assert_eq!(product.category_label(), "Shoes");
        assert_eq!(product.category_ref(), Some(3));

        let nameless: Product =
            serde_json::from_str(r#"{"id": 2, "category": {"id": 7}}"#).unwrap();
        assert_eq!(nameless.category_label(), "N/A");
        assert_eq!(nameless.category_ref(), Some(7));
    }

    #[test]
    fn test_display_price() {
        let mut product: Product = serde_json::from_str(r#"{"id": 1, "price": 10}"#).unwrap();
        assert_eq!(product.display_price(), "$10");
        product.price = 10.5;
        assert_eq!(product.display_price(), "$10.5");
    }

    #[test]
    fn test_irregular_records_decode_in_a_list() {
        let products: Vec<Product> = serde_json::from_str(
            r#"[
                {"id": 1, "title": "Apple", "price": 10},
                {"id": 2, "title": "Pear", "price": null},
                {"id": 3, "title": "Plum", "price": "12.5"},
                {"id": 4, "title": null, "price": "free", "images": null},
                {"id": 5, "title": "Fig", "price": {"amount": 3}, "images": ["https://a/1.png", 7]}
            ]"#,
        )
        .unwrap();

        let prices: Vec<f64> = products.iter().map(|product| product.price).collect();
        assert_eq!(prices, vec![10.0, 0.0, 12.5, 0.0, 0.0]);
        assert_eq!(products[3].title, "");
        assert_eq!(products[3].display_title(), "N/A");
        assert!(products[3].images.is_empty());
        assert_eq!(products[4].images, vec!["https://a/1.png".to_string()]);
    }

    #[test]
    fn test_payload_uses_api_field_names() {
        let payload = ProductPayload {
            title: "Desk".into(),
            price: 12.5,
            description: String::new(),
            category_id: 2,
            images: vec!["https://a/1.png".into()],
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["categoryId"], 2);
        assert_eq!(json["images"][0], "https://a/1.png");
    }
}
