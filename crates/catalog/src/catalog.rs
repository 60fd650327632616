use std::collections::HashSet;
use std::sync::Arc;

use storefront_core::{DomainError, DomainResult, ProductId};

use crate::filter::{SearchQuery, filter_by};
use crate::product::Product;

const DEMO_CATALOG_JSON: &str = include_str!("../data/catalog.json");

/// The immutable product list known at startup.
///
/// Products are shared (`Arc`) so cart line items can reference them without
/// copying.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Catalog {
    products: Vec<Arc<Product>>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate product ids.
    pub fn from_products(products: Vec<Product>) -> DomainResult<Self> {
        let mut seen = HashSet::with_capacity(products.len());
        for p in &products {
            if !seen.insert(p.id_typed().clone()) {
                return Err(DomainError::conflict(format!(
                    "duplicate product id {}",
                    p.id_typed()
                )));
            }
        }

        Ok(Self {
            products: products.into_iter().map(Arc::new).collect(),
        })
    }

    /// Load a catalog from a JSON array of products.
    pub fn from_json(json: &str) -> DomainResult<Self> {
        let products: Vec<Product> = serde_json::from_str(json)
            .map_err(|e| DomainError::validation(format!("invalid catalog document: {e}")))?;
        let catalog = Self::from_products(products)?;
        tracing::debug!(products = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    pub fn products(&self) -> &[Arc<Product>] {
        &self.products
    }

    pub fn get(&self, id: &ProductId) -> Option<&Arc<Product>> {
        self.products.iter().find(|p| p.id_typed() == id)
    }

    /// The first `n` products in catalog order.
    pub fn featured(&self, n: usize) -> &[Arc<Product>] {
        &self.products[..self.products.len().min(n)]
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Products visible for `query`; see [`crate::filter`].
    pub fn search(&self, query: &SearchQuery) -> Vec<&Arc<Product>> {
        filter_by(&self.products, query)
    }
}

/// The four built-in sample products.
pub fn demo_catalog() -> DomainResult<Catalog> {
    Catalog::from_json(DEMO_CATALOG_JSON)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::tests::product;
    use storefront_core::Money;

    #[test]
    fn demo_catalog_has_four_products_in_order() {
        let catalog = demo_catalog().unwrap();
        let ids: Vec<&str> = catalog
            .products()
            .iter()
            .map(|p| p.id_typed().as_str())
            .collect();
        assert_eq!(ids, ["P-001", "P-002", "P-003", "P-004"]);
        assert_eq!(catalog.products()[0].price(), Money::from_major(349));
        assert_eq!(catalog.products()[0].stock(), Some(24));
        assert_eq!(catalog.products()[1].stock(), None);
    }

    #[test]
    fn termo_query_finds_only_the_thermos() {
        let catalog = demo_catalog().unwrap();
        for raw in ["termo", "TERMO", "  Termo  "] {
            let found = catalog.search(&SearchQuery::new(raw));
            assert_eq!(found.len(), 1, "query {raw:?}");
            assert_eq!(found[0].id_typed().as_str(), "P-003");
            assert!(found[0].name().contains("Termo Inox"));
        }
    }

    #[test]
    fn shared_tag_matches_several_products() {
        let catalog = demo_catalog().unwrap();
        let found = catalog.search(&SearchQuery::new("ropa"));
        let ids: Vec<&str> = found.iter().map(|p| p.id_typed().as_str()).collect();
        assert_eq!(ids, ["P-001", "P-004"]);
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = Catalog::from_products(vec![
            product("P-1", "Uno", 10),
            product("P-1", "Otro", 20),
        ])
        .unwrap_err();
        match err {
            DomainError::Conflict(msg) if msg.contains("P-1") => {}
            _ => panic!("Expected Conflict for duplicate product id"),
        }
    }

    #[test]
    fn malformed_json_is_a_validation_error() {
        let err = Catalog::from_json("{ not json").unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let err = Catalog::from_json(r#"[{"id":"P-1","name":"X","price":-5}]"#).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn featured_and_lookup() {
        let catalog = demo_catalog().unwrap();
        assert_eq!(catalog.featured(3).len(), 3);
        assert_eq!(catalog.featured(10).len(), 4);

        let id = ProductId::new("P-002").unwrap();
        assert_eq!(catalog.get(&id).map(|p| p.name()), Some("Gorra Snapback"));
        assert!(catalog.get(&ProductId::new("P-404").unwrap()).is_none());
    }
}
