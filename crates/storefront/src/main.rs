//! Scripted storefront walkthrough: browse, search, fill a cart, print the
//! checkout payload as JSON on stdout.

use anyhow::Context;

use storefront::{StoreConfig, StorefrontSession};
use storefront_core::ProductId;
use storefront_events::Event;

fn main() -> anyhow::Result<()> {
    let config = StoreConfig::from_env().context("invalid storefront configuration")?;
    storefront_observability::tracing::init(config.log_format);

    let mut session = StorefrontSession::from_config(&config).context("failed to start session")?;
    let events = session.subscribe_cart();

    tracing::info!(
        featured = session.featured().len(),
        products = session.catalog().len(),
        "catalog ready"
    );

    session.search("termo");
    let hits: Vec<ProductId> = session
        .visible_products()
        .iter()
        .map(|p| p.id_typed().clone())
        .collect();
    tracing::info!(query = session.query().raw(), hits = hits.len(), "search");

    for id in &hits {
        session.add_to_cart(id)?;
    }
    session.clear_search();

    let playera = ProductId::new("P-001")?;
    session.add_to_cart(&playera)?;
    session.add_to_cart(&playera)?;
    session.cart_mut().set_quantity_input(&playera, "3");
    session.cart_mut().close();

    for envelope in events.drain() {
        tracing::info!(
            sequence = envelope.sequence_number(),
            event_type = envelope.payload().event_type(),
            "cart event"
        );
    }

    let totals = session.formatted_totals();
    tracing::info!(
        subtotal = %totals.subtotal,
        shipping = totals.shipping.as_deref().unwrap_or("free"),
        total = %totals.total,
        "cart totals"
    );

    let payload = session
        .checkout_payload()
        .to_json()
        .context("failed to serialize checkout payload")?;
    println!("{payload}");

    Ok(())
}
