//! Session-scoped cart store.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use storefront_catalog::Product;
use storefront_core::{CurrencyCode, ProductId, SessionId};
use storefront_events::{Event, EventBus, EventEnvelope, InMemoryEventBus, Subscription, execute};

use crate::cart::{
    AddItem, Cart, CartCommand, CartEvent, CartLineItem, CartVisibility, CloseCart, OpenCart,
    RemoveItem, SetQuantity,
};
use crate::checkout::{CheckoutLine, CheckoutPayload};
use crate::quantity::Quantity;
use crate::totals::{ShippingPolicy, Totals};

const AGGREGATE_TYPE: &str = "cart";

/// Owns one session's cart and notifies subscribers of every change.
///
/// All operations are synchronous and infallible. Totals are derived from the
/// current line items on each call.
#[derive(Debug)]
pub struct CartStore {
    cart: Cart,
    shipping: ShippingPolicy,
    currency: CurrencyCode,
    bus: InMemoryEventBus<EventEnvelope<CartEvent>>,
    sequence: u64,
}

impl CartStore {
    pub fn new(session_id: SessionId, shipping: ShippingPolicy, currency: CurrencyCode) -> Self {
        Self {
            cart: Cart::empty(session_id),
            shipping,
            currency,
            bus: InMemoryEventBus::new(),
            sequence: 0,
        }
    }

    pub fn session_id(&self) -> SessionId {
        self.cart.session_id()
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn shipping(&self) -> &ShippingPolicy {
        &self.shipping
    }

    pub fn currency(&self) -> &CurrencyCode {
        &self.currency
    }

    /// Receive every cart event applied from now on.
    ///
    /// The queue behind a subscription is unbounded; a handle that is held but
    /// never drained keeps every event. Drop it when it is no longer read.
    pub fn subscribe(&self) -> Subscription<EventEnvelope<CartEvent>> {
        self.bus.subscribe()
    }

    /// Add one unit of `product` and open the cart.
    pub fn add_item(&mut self, product: Arc<Product>) {
        tracing::info!(
            session_id = %self.session_id(),
            product_id = %product.id_typed(),
            "adding item to cart"
        );
        self.dispatch(CartCommand::AddItem(AddItem {
            product,
            occurred_at: Utc::now(),
        }));
    }

    /// Set the quantity of an existing line; values below 1 become 1.
    pub fn set_quantity(&mut self, id: &ProductId, requested: i64) {
        self.set_clamped_quantity(id, Quantity::clamp_i64(requested));
    }

    /// Fractional requests are floored before clamping.
    pub fn set_quantity_f64(&mut self, id: &ProductId, requested: f64) {
        self.set_clamped_quantity(id, Quantity::clamp_f64(requested));
    }

    /// Raw text from a quantity field; see [`Quantity::parse_lenient`].
    pub fn set_quantity_input(&mut self, id: &ProductId, input: &str) {
        self.set_clamped_quantity(id, Quantity::parse_lenient(input));
    }

    fn set_clamped_quantity(&mut self, id: &ProductId, quantity: Quantity) {
        if !self.cart.contains(id) {
            tracing::debug!(product_id = %id, "set_quantity ignored; item not in cart");
            return;
        }
        self.dispatch(CartCommand::SetQuantity(SetQuantity {
            product_id: id.clone(),
            quantity,
            occurred_at: Utc::now(),
        }));
    }

    pub fn remove_item(&mut self, id: &ProductId) {
        self.dispatch(CartCommand::RemoveItem(RemoveItem {
            product_id: id.clone(),
            occurred_at: Utc::now(),
        }));
    }

    pub fn open(&mut self) {
        self.dispatch(CartCommand::OpenCart(OpenCart {
            occurred_at: Utc::now(),
        }));
    }

    pub fn close(&mut self) {
        self.dispatch(CartCommand::CloseCart(CloseCart {
            occurred_at: Utc::now(),
        }));
    }

    pub fn visibility(&self) -> CartVisibility {
        self.cart.visibility()
    }

    pub fn is_open(&self) -> bool {
        self.cart.is_open()
    }

    pub fn line_items(&self) -> impl ExactSizeIterator<Item = &CartLineItem> {
        self.cart.line_items()
    }

    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    pub fn item_count(&self) -> u64 {
        self.cart.item_count()
    }

    pub fn totals(&self) -> Totals {
        self.cart.totals(&self.shipping)
    }

    pub fn checkout_payload(&self) -> CheckoutPayload {
        CheckoutPayload {
            session_id: self.session_id(),
            currency: self.currency.clone(),
            lines: self.line_items().map(CheckoutLine::from).collect(),
            totals: self.totals(),
            created_at: Utc::now(),
        }
    }

    fn dispatch(&mut self, command: CartCommand) {
        let Ok(events) = execute(&mut self.cart, &command);

        for event in events {
            self.sequence += 1;
            tracing::debug!(
                session_id = %self.cart.session_id(),
                event_type = event.event_type(),
                sequence = self.sequence,
                "cart event applied"
            );

            let envelope = EventEnvelope::new(
                Uuid::now_v7(),
                self.cart.session_id(),
                AGGREGATE_TYPE,
                self.sequence,
                event,
            );
            if let Err(err) = self.bus.publish(envelope) {
                tracing::warn!(error = %err, "failed to notify cart subscribers");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::tests::product;
    use storefront_core::{AggregateRoot, Money};

    fn store() -> CartStore {
        CartStore::new(SessionId::new(), ShippingPolicy::default(), CurrencyCode::mxn())
    }

    fn pid(id: &str) -> ProductId {
        ProductId::new(id).unwrap()
    }

    fn qty(store: &CartStore, id: &str) -> Option<u32> {
        store.cart().get(&pid(id)).map(|i| i.qty().get())
    }

    #[test]
    fn starts_empty_and_closed() {
        let s = store();
        assert!(s.is_empty());
        assert_eq!(s.visibility(), CartVisibility::Closed);
        assert_eq!(s.totals(), Totals::default());
        assert_eq!(s.shipping().flat_fee(), Money::from_major(99));
    }

    #[test]
    fn add_opens_and_increments() {
        let mut s = store();
        let p = product("P-001", 349);
        s.add_item(Arc::clone(&p));
        s.add_item(p);

        assert!(s.is_open());
        assert_eq!(s.line_items().len(), 1);
        assert_eq!(qty(&s, "P-001"), Some(2));
        assert_eq!(s.item_count(), 2);
    }

    #[test]
    fn quantity_entry_points_clamp() {
        let mut s = store();
        s.add_item(product("P-001", 349));

        s.set_quantity(&pid("P-001"), 0);
        assert_eq!(qty(&s, "P-001"), Some(1));
        s.set_quantity(&pid("P-001"), -5);
        assert_eq!(qty(&s, "P-001"), Some(1));
        s.set_quantity_f64(&pid("P-001"), 3.8);
        assert_eq!(qty(&s, "P-001"), Some(3));
        s.set_quantity_input(&pid("P-001"), "");
        assert_eq!(qty(&s, "P-001"), Some(1));
        s.set_quantity_input(&pid("P-001"), "7");
        assert_eq!(qty(&s, "P-001"), Some(7));
        s.set_quantity_input(&pid("P-001"), "lots");
        assert_eq!(qty(&s, "P-001"), Some(1));
    }

    #[test]
    fn remove_then_set_is_a_noop() {
        let mut s = store();
        s.add_item(product("P-001", 349));
        s.remove_item(&pid("P-001"));
        s.set_quantity(&pid("P-001"), 5);
        s.remove_item(&pid("P-001"));

        assert!(s.is_empty());
        assert_eq!(qty(&s, "P-001"), None);
    }

    #[test]
    fn close_action_hides_cart() {
        let mut s = store();
        s.add_item(product("P-001", 349));
        s.close();
        assert_eq!(s.visibility(), CartVisibility::Closed);
        s.open();
        assert!(s.is_open());
    }

    #[test]
    fn totals_follow_state() {
        let mut s = store();
        let playera = product("P-001", 349);
        s.add_item(Arc::clone(&playera));
        s.add_item(playera);
        s.add_item(product("P-002", 299));

        let t = s.totals();
        assert_eq!(t.subtotal, Money::from_major(997));
        assert_eq!(t.shipping, Money::from_major(99));
        assert_eq!(t.total, Money::from_major(1096));

        s.remove_item(&pid("P-001"));
        s.remove_item(&pid("P-002"));
        assert_eq!(s.totals(), Totals::default());
    }

    #[test]
    fn subscribers_receive_sequenced_envelopes() {
        let mut s = store();
        let sub = s.subscribe();

        s.add_item(product("P-001", 349));
        s.set_quantity(&pid("P-001"), 3);
        s.set_quantity(&pid("P-404"), 3);
        s.remove_item(&pid("P-001"));

        let received = sub.drain();
        let types: Vec<&str> = received.iter().map(|e| e.payload().event_type()).collect();
        assert_eq!(
            types,
            ["cart.item_added", "cart.opened", "cart.quantity_changed", "cart.item_removed"]
        );

        let seqs: Vec<u64> = received.iter().map(|e| e.sequence_number()).collect();
        assert_eq!(seqs, [1, 2, 3, 4]);
        assert!(received.iter().all(|e| e.session_id() == s.session_id()));
        assert!(received.iter().all(|e| e.aggregate_type() == "cart"));
        assert_eq!(s.cart().version(), 4);
    }

    #[test]
    fn envelopes_carry_unique_ids_and_event_timestamps() {
        let mut s = store();
        let sub = s.subscribe();

        let before = Utc::now();
        s.add_item(product("P-001", 349));
        s.close();
        let after = Utc::now();

        let received = sub.drain();
        assert_eq!(received.len(), 3);

        let mut ids: Vec<Uuid> = received.iter().map(|e| e.event_id()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 3);

        for envelope in &received {
            let event = envelope.payload();
            assert_eq!(event.version(), 1);
            assert!(event.occurred_at() >= before && event.occurred_at() <= after);
        }

        let last = received.into_iter().last().map(EventEnvelope::into_payload);
        assert!(matches!(last, Some(CartEvent::CartClosed(_))));
    }

    #[test]
    fn checkout_payload_snapshots_lines_and_totals() {
        let mut s = store();
        s.add_item(product("P-002", 299));
        s.add_item(product("P-001", 349));
        s.set_quantity(&pid("P-001"), 2);

        let payload = s.checkout_payload();
        assert_eq!(payload.lines.len(), 2);
        assert_eq!(payload.lines[0].product_id, pid("P-002"));
        assert_eq!(payload.lines[1].line_total, Money::from_major(698));
        assert_eq!(payload.totals.total, Money::from_major(1096));
        assert_eq!(payload.currency.as_str(), "MXN");

        let json: serde_json::Value = serde_json::from_str(&payload.to_json().unwrap()).unwrap();
        assert_eq!(json["currency"], "MXN");
        assert_eq!(json["lines"][1]["quantity"], 2);
        assert_eq!(json["totals"]["total"], 109_600);
    }
}
