//! Free-text catalog filtering.

use core::borrow::Borrow;

use serde::{Deserialize, Serialize};

use storefront_core::ValueObject;

use crate::product::Product;

/// A search query as typed, plus its normalized (trimmed, lowercased) form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct SearchQuery {
    raw: String,
    normalized: String,
}

impl SearchQuery {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let normalized = raw.trim().to_lowercase();
        Self { raw, normalized }
    }

    /// The text as the shopper typed it (used in "no results" messages).
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    /// Blank queries match everything.
    pub fn is_blank(&self) -> bool {
        self.normalized.is_empty()
    }

    pub fn matches(&self, product: &Product) -> bool {
        if self.is_blank() {
            return true;
        }
        product
            .search_fields()
            .iter()
            .any(|field| field.contains(self.normalized.as_str()))
    }
}

impl ValueObject for SearchQuery {}

impl From<String> for SearchQuery {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for SearchQuery {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<SearchQuery> for String {
    fn from(value: SearchQuery) -> Self {
        value.raw
    }
}

/// Products matching `query`, in their original order.
///
/// A blank query returns every product. Otherwise a product is kept when the
/// normalized query is a substring of its lowercased name, description, or
/// space-joined tags.
pub fn filter<'a, P>(products: &'a [P], query: &str) -> Vec<&'a P>
where
    P: Borrow<Product>,
{
    let query = SearchQuery::new(query);
    filter_by(products, &query)
}

/// Same as [`filter`] with an already-normalized query.
pub fn filter_by<'a, P>(products: &'a [P], query: &SearchQuery) -> Vec<&'a P>
where
    P: Borrow<Product>,
{
    if query.is_blank() {
        return products.iter().collect();
    }
    products
        .iter()
        .filter(|p| query.matches(<P as Borrow<Product>>::borrow(p)))
        .collect()
}
