use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, Entity, Money, ProductId};

/// Unvalidated product fields, as found in a catalog document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub id: String,
    pub name: String,
    /// Price in smallest currency unit (e.g., centavos).
    pub price: Money,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub stock: Option<u32>,
}

/// A catalog product. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ProductDraft")]
pub struct Product {
    id: ProductId,
    name: String,
    price: Money,
    description: String,
    tags: Vec<String>,
    image: Option<String>,
    stock: Option<u32>,
}

impl Product {
    pub fn id_typed(&self) -> &ProductId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Money {
        self.price
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// First `limit` tags, in catalog order (product cards show two).
    pub fn display_tags(&self, limit: usize) -> &[String] {
        &self.tags[..self.tags.len().min(limit)]
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    /// Informational stock level; the cart never checks it.
    pub fn stock(&self) -> Option<u32> {
        self.stock
    }

    /// Lowercased haystacks a search query is matched against.
    pub(crate) fn search_fields(&self) -> [String; 3] {
        [
            self.name.to_lowercase(),
            self.description.to_lowercase(),
            self.tags.join(" ").to_lowercase(),
        ]
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl TryFrom<ProductDraft> for Product {
    type Error = DomainError;

    fn try_from(draft: ProductDraft) -> Result<Self, Self::Error> {
        let id = ProductId::new(draft.id)?;

        if draft.name.trim().is_empty() {
            return Err(DomainError::validation(format!(
                "product {id}: name cannot be empty"
            )));
        }

        Ok(Self {
            id,
            name: draft.name,
            price: draft.price,
            description: draft.description,
            tags: draft.tags,
            image: draft.image.filter(|s| !s.trim().is_empty()),
            stock: draft.stock,
        })
    }
}
