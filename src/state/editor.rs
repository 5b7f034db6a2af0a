/// Create/edit form state and form-to-payload mapping
///
/// A `ProductForm` holds the raw text the user typed. `validate` is the
/// only way to turn it into a request body, so a payload is never built
/// from a form that fails the required-field checks.

use std::fmt;

use super::data::{Category, Product, ProductPayload};

/// Editable fields of a product, as typed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductForm {
    pub title: String,
    pub price: String,
    pub description: String,
    pub category: Option<Category>,
    /// Comma-separated image URLs
    pub images: String,
}

/// A single field-level validation failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormIssue {
    TitleRequired,
    PriceRequired,
    PriceInvalid,
    CategoryRequired,
}

impl fmt::Display for FormIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            FormIssue::TitleRequired => "Title is required",
            FormIssue::PriceRequired => "Price is required",
            FormIssue::PriceInvalid => "Price must be a non-negative number",
            FormIssue::CategoryRequired => "Please choose a category",
        };
        f.write_str(message)
    }
}

/// A form field that can be edited through a text input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Price,
    Description,
    Images,
}

impl ProductForm {
    /// Pre-populate a form from an existing record
    ///
    /// The category is looked up in `categories`; when the record refers to
    /// a category that was not loaded, an option is built from the record's
    /// own denormalized name so the selector still shows it.
    pub fn from_product(product: &Product, categories: &[Category]) -> Self {
        let category = product.category_ref().map(|id| {
            categories
                .iter()
                .find(|category| category.id == id)
                .cloned()
                .unwrap_or_else(|| Category { id, name: product.category_label() })
        });

        Self {
            title: product.title.clone(),
            price: (if product.price.is_finite() { product.price } else { 0.0 }).to_string(),
            description: product.description.clone().unwrap_or_default(),
            category,
            images: product.images.join(", "),
        }
    }

    pub fn set_field(&mut self, field: FormField, value: String) {
        match field {
            FormField::Title => self.title = value,
            FormField::Price => self.price = value,
            FormField::Description => self.description = value,
            FormField::Images => self.images = value,
        }
    }

    /// Check the required fields and map the form to a request body
    pub fn validate(&self) -> Result<ProductPayload, Vec<FormIssue>> {
        let mut issues = Vec::new();

        let title = self.title.trim();
        if title.is_empty() {
            issues.push(FormIssue::TitleRequired);
        }

        let price_text = self.price.trim();
        let price = if price_text.is_empty() {
            issues.push(FormIssue::PriceRequired);
            None
        } else {
            match price_text.parse::<f64>() {
                Ok(price) if price.is_finite() && price >= 0.0 => Some(price),
                _ => {
                    issues.push(FormIssue::PriceInvalid);
                    None
                }
            }
        };

        if self.category.is_none() {
            issues.push(FormIssue::CategoryRequired);
        }

        match (price, &self.category) {
            (Some(price), Some(category)) if issues.is_empty() => Ok(ProductPayload {
                title: self.title.clone(),
                price,
                description: self.description.clone(),
                category_id: category.id,
                images: split_image_urls(&self.images),
            }),
            _ => Err(issues),
        }
    }
}

/// Split comma-separated URLs into a trimmed list without empty entries
pub fn split_image_urls(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(str::to_string)
        .collect()
}

/// Validate a form for submission
///
/// Records validation issues, or marks the request in flight and returns
/// the payload to send. Returns `None` while a request is already in flight.
pub fn begin_submit(form: &ProductForm, issues: &mut Vec<FormIssue>, saving: &mut bool) -> Option<ProductPayload> {
    if *saving {
        return None;
    }
    match form.validate() {
        Ok(payload) => {
            issues.clear();
            *saving = true;
            Some(payload)
        }
        Err(found) => {
            *issues = found;
            None
        }
    }
}

/// What the detail dialog is currently showing
#[derive(Debug, Clone, PartialEq)]
pub enum EditorMode {
    /// Read-only detail view
    Detail,
    /// Edit form with any validation issues from the last save attempt
    Editing {
        form: ProductForm,
        issues: Vec<FormIssue>,
        saving: bool,
    },
}

/// The single active detail/edit session
#[derive(Debug, Clone, PartialEq)]
pub struct EditorSession {
    /// The current edit id
    pub product_id: i64,
    pub mode: EditorMode,
}

impl EditorSession {
    pub fn open(product_id: i64) -> Self {
        Self { product_id, mode: EditorMode::Detail }
    }

    /// Switch to the edit form pre-populated from `product`
    pub fn begin_edit(&mut self, product: &Product, categories: &[Category]) {
        self.mode = EditorMode::Editing {
            form: ProductForm::from_product(product, categories),
            issues: Vec::new(),
            saving: false,
        };
    }

    /// Discard in-progress changes and return to the detail view
    pub fn cancel_edit(&mut self) {
        self.mode = EditorMode::Detail;
    }

    pub fn form_mut(&mut self) -> Option<&mut ProductForm> {
        match &mut self.mode {
            EditorMode::Editing { form, .. } => Some(form),
            EditorMode::Detail => None,
        }
    }
}

/// State of the create dialog; dropped (and so cleared) when it closes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateSession {
    pub form: ProductForm,
    pub issues: Vec<FormIssue>,
    pub saving: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::CategoryField;

    fn categories() -> Vec<Category> {
        vec![
            Category { id: 1, name: "Clothes".into() },
            Category { id: 2, name: "Electronics".into() },
        ]
    }

    fn valid_form() -> ProductForm {
        ProductForm {
            title: "Desk".into(),
            price: "12.5".into(),
            description: "Oak".into(),
            category: Some(categories()[1].clone()),
            images: " https://a/1.png, ,https://a/2.png ,".into(),
        }
    }

    #[test]
    fn test_split_image_urls() {
        assert_eq!(
            split_image_urls(" https://a/1.png, ,https://a/2.png ,"),
            vec!["https://a/1.png".to_string(), "https://a/2.png".to_string()]
        );
        assert!(split_image_urls("").is_empty());
        assert!(split_image_urls(" , ,").is_empty());
    }

    #[test]
    fn test_valid_form_maps_to_payload() {
        let payload = valid_form().validate().unwrap();
        assert_eq!(payload.title, "Desk");
        assert_eq!(payload.price, 12.5);
        assert_eq!(payload.category_id, 2);
        assert_eq!(payload.images.len(), 2);
    }

    #[test]
    fn test_empty_form_reports_every_required_field() {
        let issues = ProductForm::default().validate().unwrap_err();
        assert_eq!(
            issues,
            vec![FormIssue::TitleRequired, FormIssue::PriceRequired, FormIssue::CategoryRequired]
        );
    }

    #[test]
    fn test_price_must_be_non_negative_number() {
        let mut form = valid_form();
        form.price = "abc".into();
        assert_eq!(form.validate().unwrap_err(), vec![FormIssue::PriceInvalid]);
        form.price = "-3".into();
        assert_eq!(form.validate().unwrap_err(), vec![FormIssue::PriceInvalid]);
        form.price = "0".into();
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_blank_title_is_rejected() {
        let mut form = valid_form();
        form.title = "   ".into();
        assert_eq!(form.validate().unwrap_err(), vec![FormIssue::TitleRequired]);
    }

    #[test]
    fn test_form_from_product_preseeds_category() {
        let product = Product {
            id: 7,
            title: "Lamp".into(),
            price: 30.0,
            description: None,
            category: Some(CategoryField::Named { id: Some(2), name: Some("Electronics".into()) }),
            category_id: None,
            images: vec!["https://a/1.png".into(), "https://a/2.png".into()],
        };
        let form = ProductForm::from_product(&product, &categories());
        assert_eq!(form.title, "Lamp");
        assert_eq!(form.price, "30");
        assert_eq!(form.category, Some(categories()[1].clone()));
        assert_eq!(form.images, "https://a/1.png, https://a/2.png");
    }

    #[test]
    fn test_form_keeps_unknown_category() {
        let product = Product {
            id: 7,
            title: "Lamp".into(),
            price: 30.0,
            description: None,
            category: Some(CategoryField::Named { id: Some(99), name: Some("Legacy".into()) }),
            category_id: None,
            images: Vec::new(),
        };
        let form = ProductForm::from_product(&product, &[]);
        assert_eq!(form.category, Some(Category { id: 99, name: "Legacy".into() }));
    }

    #[test]
    fn test_begin_submit() {
        let mut issues = Vec::new();
        let mut saving = false;

        assert!(begin_submit(&ProductForm::default(), &mut issues, &mut saving).is_none());
        assert_eq!(issues.len(), 3);
        assert!(!saving);

        assert!(begin_submit(&valid_form(), &mut issues, &mut saving).is_some());
        assert!(issues.is_empty());
        assert!(saving);

        // A second press while the first request is in flight sends nothing
        assert!(begin_submit(&valid_form(), &mut issues, &mut saving).is_none());
    }

    #[test]
    fn test_cancel_returns_to_detail() {
        let product = Product {
            id: 3,
            title: "Chair".into(),
            price: 5.0,
            description: None,
            category: None,
            category_id: Some(1),
            images: Vec::new(),
        };
        let mut session = EditorSession::open(3);
        session.begin_edit(&product, &categories());
        session.form_mut().unwrap().set_field(FormField::Title, "Stool".into());
        session.cancel_edit();
        assert_eq!(session, EditorSession::open(3));
        assert!(session.form_mut().is_none());
    }
}
