use std::io::Write;

use tempfile::NamedTempFile;

use storefront::{SessionError, StoreConfig, StorefrontSession};
use storefront_cart::CartVisibility;
use storefront_core::{DomainError, Money, ProductId};
use storefront_events::Event;

fn pid(id: &str) -> ProductId {
    ProductId::new(id).unwrap()
}

fn write_catalog(json: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

#[test]
fn shopper_journey_end_to_end() {
    let mut session = StorefrontSession::from_config(&StoreConfig::default()).unwrap();
    let events = session.subscribe_cart();

    // Search is pure: the cart stays closed and empty.
    session.search("  Ropa ");
    let visible: Vec<&str> = session
        .visible_products()
        .iter()
        .map(|p| p.id_typed().as_str())
        .collect();
    assert_eq!(visible, ["P-001", "P-004"]);
    assert_eq!(session.cart().visibility(), CartVisibility::Closed);

    session.add_to_cart(&pid("P-001")).unwrap();
    session.add_to_cart(&pid("P-001")).unwrap();
    session.add_to_cart(&pid("P-002")).unwrap();
    assert!(session.cart().is_open());

    let totals = session.totals();
    assert_eq!(totals.subtotal, Money::from_major(997));
    assert_eq!(totals.shipping, Money::from_major(99));
    assert_eq!(totals.total, Money::from_major(1096));

    session.cart_mut().set_quantity(&pid("P-002"), 0);
    session.cart_mut().remove_item(&pid("P-001"));
    session.cart_mut().set_quantity(&pid("P-001"), 5);
    let ids: Vec<&str> = session
        .cart()
        .line_items()
        .map(|i| i.product().id_typed().as_str())
        .collect();
    assert_eq!(ids, ["P-002"]);

    session.cart_mut().close();
    assert_eq!(session.cart().visibility(), CartVisibility::Closed);

    let types: Vec<&str> = events
        .drain()
        .iter()
        .map(|e| e.payload().event_type())
        .collect();
    assert_eq!(
        types,
        [
            "cart.item_added",
            "cart.opened",
            "cart.quantity_changed",
            "cart.item_added",
            "cart.item_removed",
            "cart.closed",
        ]
    );

    let payload = session.checkout_payload();
    assert_eq!(payload.lines.len(), 1);
    assert_eq!(payload.totals.total, Money::from_major(398));
}

#[test]
fn custom_catalog_and_shipping_from_config() {
    let file = write_catalog(
        r#"[
            {"id": "T-1", "name": "Taza", "price": 15000, "tags": ["cocina"]},
            {"id": "T-2", "name": "Plato", "price": 20000, "description": "Cerámica"}
        ]"#,
    );
    let config = StoreConfig::default()
        .with_catalog_path(file.path())
        .with_flat_shipping(Money::from_major(50));

    let mut session = StorefrontSession::from_config(&config).unwrap();
    assert_eq!(session.catalog().len(), 2);

    session.search("cerámica");
    assert_eq!(session.visible_products().len(), 1);

    session.add_to_cart(&pid("T-1")).unwrap();
    assert_eq!(session.formatted_totals().total, "$200.00");
}

#[test]
fn duplicate_ids_in_catalog_file_are_rejected() {
    let file = write_catalog(
        r#"[{"id": "D-1", "name": "Uno", "price": 100}, {"id": "D-1", "name": "Dos", "price": 100}]"#,
    );
    let config = StoreConfig::default().with_catalog_path(file.path());

    let err = StorefrontSession::from_config(&config).unwrap_err();
    assert!(matches!(err, SessionError::Catalog(DomainError::Conflict(_))));
}
