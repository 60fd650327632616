use std::sync::Arc;

use storefront_cart::{CartEvent, CartStore, CheckoutPayload, Totals};
use storefront_catalog::{Catalog, Product, SearchQuery, demo_catalog};
use storefront_core::{CurrencyFormatter, DomainError, DomainResult, Money, ProductId, SessionId};
use storefront_events::{EventEnvelope, Subscription};

use crate::config::StoreConfig;
use crate::error::SessionError;

/// Number of products in the featured strip.
pub const FEATURED_COUNT: usize = 3;

/// Totals rendered for display. `shipping` is `None` when it is free.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedTotals {
    pub subtotal: String,
    pub shipping: Option<String>,
    pub total: String,
}

/// One shopper's view of the store.
///
/// The search query lives here and is passed explicitly to whatever renders
/// the catalog grid; changing it never touches the cart.
#[derive(Debug)]
pub struct StorefrontSession {
    catalog: Arc<Catalog>,
    query: SearchQuery,
    cart: CartStore,
    formatter: CurrencyFormatter,
}

impl StorefrontSession {
    pub fn new(catalog: Arc<Catalog>, config: &StoreConfig) -> Self {
        let session_id = SessionId::new();
        tracing::info!(
            session_id = %session_id,
            products = catalog.len(),
            currency = %config.currency,
            "storefront session started"
        );

        Self {
            catalog,
            query: SearchQuery::default(),
            cart: CartStore::new(session_id, config.shipping, config.currency.clone()),
            formatter: config.formatter(),
        }
    }

    /// Load the configured catalog (or the built-in one) and start a session.
    pub fn from_config(config: &StoreConfig) -> Result<Self, SessionError> {
        let catalog = load_catalog(config)?;
        Ok(Self::new(Arc::new(catalog), config))
    }

    pub fn session_id(&self) -> SessionId {
        self.cart.session_id()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn featured(&self) -> &[Arc<Product>] {
        self.catalog.featured(FEATURED_COUNT)
    }

    pub fn search(&mut self, query: impl Into<SearchQuery>) {
        self.query = query.into();
        tracing::debug!(query = self.query.raw(), "search query updated");
    }

    pub fn clear_search(&mut self) {
        self.query = SearchQuery::default();
    }

    pub fn query(&self) -> &SearchQuery {
        &self.query
    }

    /// Catalog products matching the current query, in catalog order.
    pub fn visible_products(&self) -> Vec<&Arc<Product>> {
        self.catalog.search(&self.query)
    }

    /// Add one unit of a catalog product to the cart.
    pub fn add_to_cart(&mut self, id: &ProductId) -> DomainResult<()> {
        let product = self.catalog.get(id).cloned().ok_or_else(DomainError::not_found)?;
        self.cart.add_item(product);
        Ok(())
    }

    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    pub fn cart_mut(&mut self) -> &mut CartStore {
        &mut self.cart
    }

    /// See [`CartStore::subscribe`]: undrained handles buffer without limit.
    pub fn subscribe_cart(&self) -> Subscription<EventEnvelope<CartEvent>> {
        self.cart.subscribe()
    }

    pub fn totals(&self) -> Totals {
        self.cart.totals()
    }

    pub fn format_money(&self, amount: Money) -> String {
        self.formatter.format(amount, self.cart.currency().as_str())
    }

    pub fn formatted_totals(&self) -> FormattedTotals {
        let totals = self.totals();
        FormattedTotals {
            subtotal: self.format_money(totals.subtotal),
            shipping: (!totals.is_free_shipping()).then(|| self.format_money(totals.shipping)),
            total: self.format_money(totals.total),
        }
    }

    pub fn checkout_payload(&self) -> CheckoutPayload {
        self.cart.checkout_payload()
    }
}

fn load_catalog(config: &StoreConfig) -> Result<Catalog, SessionError> {
    match &config.catalog_path {
        Some(path) => {
            let json = std::fs::read_to_string(path).map_err(|source| SessionError::CatalogIo {
                path: path.clone(),
                source,
            })?;
            Ok(Catalog::from_json(&json)?)
        }
        None => Ok(demo_catalog()?),
    }
}
