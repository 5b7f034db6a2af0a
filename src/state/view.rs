/// View state and the query pipeline (filter -> sort -> paginate)
///
/// The pipeline stages are pure functions over slices. `ViewState`
/// composes them and owns the cursor invariants: the page always lies in
/// `[1, total_pages]` and the filtered set always matches the query.

use std::cmp::Ordering;
use std::fmt;

use super::collate::natural_cmp;
use super::data::Product;

/// Page sizes offered by the page-size selector
pub const PAGE_SIZE_OPTIONS: [PageSize; 4] = [PageSize(5), PageSize(10), PageSize(20), PageSize(50)];

/// Number of rows per page, restricted to [`PAGE_SIZE_OPTIONS`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSize(usize);

impl PageSize {
    /// Look up an allowed page size
    pub fn from_option(rows: usize) -> Option<Self> {
        PAGE_SIZE_OPTIONS.iter().copied().find(|size| size.0 == rows)
    }

    pub fn rows(self) -> usize {
        self.0
    }
}

impl Default for PageSize {
    fn default() -> Self {
        PageSize(10)
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / page", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Title,
    Price,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    fn reversed(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// The active (field, direction) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortDirective {
    pub field: SortField,
    pub direction: SortDirection,
}

// ========== Pipeline stages ==========

/// Records whose title contains the trimmed query, ignoring case
pub fn filter_products(products: &[Product], query: &str) -> Vec<Product> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return products.to_vec();
    }
    products
        .iter()
        .filter(|product| product.title.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Stable sort by the directive's field and direction
pub fn sort_products(products: &mut [Product], directive: SortDirective) {
    products.sort_by(|a, b| {
        let ordering = match directive.field {
            SortField::Title => natural_cmp(&a.title, &b.title),
            SortField::Price => numeric_key(a.price)
                .partial_cmp(&numeric_key(b.price))
                .unwrap_or(Ordering::Equal),
        };
        match directive.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}

fn numeric_key(price: f64) -> f64 {
    if price.is_finite() {
        price
    } else {
        0.0
    }
}

/// Number of pages needed for `count` rows; zero when there are no rows
pub fn total_pages(count: usize, page_size: PageSize) -> usize {
    count.div_ceil(page_size.rows())
}

/// Rows `[(page-1)*size, page*size)`, clipped to the slice
pub fn page_window(products: &[Product], page: usize, page_size: PageSize) -> &[Product] {
    let start = page.saturating_sub(1).saturating_mul(page_size.rows());
    if start >= products.len() {
        return &[];
    }
    let end = (start + page_size.rows()).min(products.len());
    &products[start..end]
}

// ========== View state ==========

/// Everything the table and pagination are rendered from
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    all: Vec<Product>,
    filtered: Vec<Product>,
    query: String,
    page: usize,
    page_size: PageSize,
    sort: Option<SortDirective>,
}

impl ViewState {
    pub fn new(page_size: PageSize) -> Self {
        Self {
            page: 1,
            page_size,
            ..Self::default()
        }
    }

    /// Replace the authoritative record set (initial load)
    pub fn load(&mut self, products: Vec<Product>) {
        self.all = products;
        self.refilter();
    }

    pub fn all(&self) -> &[Product] {
        &self.all
    }

    pub fn filtered(&self) -> &[Product] {
        &self.filtered
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    #[cfg(test)]
    pub fn sort(&self) -> Option<SortDirective> {
        self.sort
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.filtered.len(), self.page_size)
    }

    /// The rows visible on the current page
    pub fn page_window(&self) -> &[Product] {
        page_window(&self.filtered, self.page, self.page_size)
    }

    pub fn find(&self, id: i64) -> Option<&Product> {
        self.all.iter().find(|product| product.id == id)
    }

    /// Change the search term; always returns to the first page
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.refilter();
    }

    /// Change the page size; always returns to the first page
    pub fn set_page_size(&mut self, page_size: PageSize) {
        self.page_size = page_size;
        self.page = 1;
    }

    /// Activate a sort control
    ///
    /// The same field toggles direction; a different field starts ascending.
    pub fn toggle_sort(&mut self, field: SortField) {
        let direction = match self.sort {
            Some(current) if current.field == field => current.direction.reversed(),
            _ => SortDirection::Ascending,
        };
        let directive = SortDirective { field, direction };
        self.sort = Some(directive);
        sort_products(&mut self.filtered, directive);
    }

    /// Indicator for a sortable column header
    pub fn sort_indicator(&self, field: SortField) -> &'static str {
        match self.sort {
            Some(SortDirective { field: active, direction }) if active == field => match direction {
                SortDirection::Ascending => "↑",
                SortDirection::Descending => "↓",
            },
            _ => "⇅",
        }
    }

    /// Jump to a page; returns false when the page is out of range
    pub fn select_page(&mut self, page: usize) -> bool {
        if page < 1 || page > self.total_pages().max(1) {
            return false;
        }
        self.page = page;
        true
    }

    /// Replace a record at its existing position in both collections
    ///
    /// Returns false when no record with `id` exists.
    pub fn apply_update(&mut self, id: i64, updated: Product) -> bool {
        let Some(index) = self.all.iter().position(|product| product.id == id) else {
            return false;
        };
        self.all[index] = updated.clone();

        let still_matches = !filter_products(std::slice::from_ref(&updated), &self.query).is_empty();
        if let Some(index) = self.filtered.iter().position(|product| product.id == id) {
            if still_matches {
                self.filtered[index] = updated;
            } else {
                self.filtered.remove(index);
                self.clamp_page();
            }
        }
        true
    }

    /// Append a newly created record and recompute the filtered view
    pub fn append_created(&mut self, created: Product) {
        self.all.push(created);
        self.refilter();
    }

    fn refilter(&mut self) {
        self.filtered = filter_products(&self.all, &self.query);
        if let Some(directive) = self.sort {
            sort_products(&mut self.filtered, directive);
        }
        self.page = 1;
    }

    fn clamp_page(&mut self) {
        self.page = self.page.clamp(1, self.total_pages().max(1));
    }
}
