use core::convert::Infallible;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use storefront_catalog::Product;
use storefront_core::{Aggregate, AggregateRoot, Entity, ProductId, SessionId};
use storefront_events::Event;

use crate::quantity::Quantity;
use crate::totals::{ShippingPolicy, Totals};

/// Whether the cart panel is showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CartVisibility {
    #[default]
    Closed,
    Open,
}

/// Cart line: one per product. `id` always equals the product's id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    id: ProductId,
    qty: Quantity,
    product: Arc<Product>,
}

impl CartLineItem {
    fn new(product: Arc<Product>) -> Self {
        Self {
            id: product.id_typed().clone(),
            qty: Quantity::ONE,
            product,
        }
    }

    pub fn qty(&self) -> Quantity {
        self.qty
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    /// `qty × unit price`.
    pub fn line_total(&self) -> storefront_core::Money {
        self.product.price().times(self.qty.get())
    }
}

impl Entity for CartLineItem {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Aggregate root: Cart.
///
/// Line items are keyed by product id and kept in insertion order; removing an
/// item does not reorder the others.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cart {
    id: SessionId,
    items: IndexMap<ProductId, CartLineItem>,
    visibility: CartVisibility,
    version: u64,
}

impl Cart {
    /// A new, empty, closed cart for a session.
    pub fn empty(id: SessionId) -> Self {
        Self {
            id,
            items: IndexMap::new(),
            visibility: CartVisibility::Closed,
            version: 0,
        }
    }

    pub fn session_id(&self) -> SessionId {
        self.id
    }

    /// Line items in display order.
    pub fn line_items(&self) -> impl ExactSizeIterator<Item = &CartLineItem> {
        self.items.values()
    }

    pub fn get(&self, id: &ProductId) -> Option<&CartLineItem> {
        self.items.get(id)
    }

    pub fn contains(&self, id: &ProductId) -> bool {
        self.items.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of quantities across all lines.
    pub fn item_count(&self) -> u64 {
        self.items.values().map(|i| u64::from(i.qty.get())).sum()
    }

    pub fn visibility(&self) -> CartVisibility {
        self.visibility
    }

    pub fn is_open(&self) -> bool {
        self.visibility == CartVisibility::Open
    }

    /// Derived totals; recomputed on every call.
    pub fn totals(&self, shipping: &ShippingPolicy) -> Totals {
        Totals::compute(self.line_items(), shipping)
    }
}

impl AggregateRoot for Cart {
    type Id = SessionId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: AddItem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddItem {
    pub product: Arc<Product>,
    pub occurred_at: DateTime<Utc>,
}

/// Command: SetQuantity. The requested quantity is already clamped by
/// construction of [`Quantity`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetQuantity {
    pub product_id: ProductId,
    pub quantity: Quantity,
    pub occurred_at: DateTime<Utc>,
}

/// Command: RemoveItem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveItem {
    pub product_id: ProductId,
    pub occurred_at: DateTime<Utc>,
}

/// Command: OpenCart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenCart {
    pub occurred_at: DateTime<Utc>,
}

/// Command: CloseCart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloseCart {
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CartCommand {
    AddItem(AddItem),
    SetQuantity(SetQuantity),
    RemoveItem(RemoveItem),
    OpenCart(OpenCart),
    CloseCart(CloseCart),
}

/// Event: ItemAdded (first add of a product).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemAdded {
    pub product: Arc<Product>,
    pub occurred_at: DateTime<Utc>,
}

/// Event: QuantityChanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityChanged {
    pub product_id: ProductId,
    pub quantity: Quantity,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ItemRemoved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRemoved {
    pub product_id: ProductId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: CartOpened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartOpened {
    pub occurred_at: DateTime<Utc>,
}

/// Event: CartClosed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartClosed {
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CartEvent {
    ItemAdded(ItemAdded),
    QuantityChanged(QuantityChanged),
    ItemRemoved(ItemRemoved),
    CartOpened(CartOpened),
    CartClosed(CartClosed),
}

impl Event for CartEvent {
    fn event_type(&self) -> &'static str {
        match self {
            CartEvent::ItemAdded(_) => "cart.item_added",
            CartEvent::QuantityChanged(_) => "cart.quantity_changed",
            CartEvent::ItemRemoved(_) => "cart.item_removed",
            CartEvent::CartOpened(_) => "cart.opened",
            CartEvent::CartClosed(_) => "cart.closed",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            CartEvent::ItemAdded(e) => e.occurred_at,
            CartEvent::QuantityChanged(e) => e.occurred_at,
            CartEvent::ItemRemoved(e) => e.occurred_at,
            CartEvent::CartOpened(e) => e.occurred_at,
            CartEvent::CartClosed(e) => e.occurred_at,
        }
    }
}

impl Aggregate for Cart {
    type Command = CartCommand;
    type Event = CartEvent;
    // Every cart command is total: invalid input is clamped, unknown ids are
    // no-ops.
    type Error = Infallible;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            CartEvent::ItemAdded(e) => {
                let line = CartLineItem::new(Arc::clone(&e.product));
                self.items.insert(line.id.clone(), line);
            }
            CartEvent::QuantityChanged(e) => {
                if let Some(line) = self.items.get_mut(&e.product_id) {
                    line.qty = e.quantity;
                }
            }
            CartEvent::ItemRemoved(e) => {
                self.items.shift_remove(&e.product_id);
            }
            CartEvent::CartOpened(_) => {
                self.visibility = CartVisibility::Open;
            }
            CartEvent::CartClosed(_) => {
                self.visibility = CartVisibility::Closed;
            }
        }

        // Deterministic version tracking: +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        let events = match command {
            CartCommand::AddItem(cmd) => self.handle_add_item(cmd),
            CartCommand::SetQuantity(cmd) => self.handle_set_quantity(cmd),
            CartCommand::RemoveItem(cmd) => self.handle_remove_item(cmd),
            CartCommand::OpenCart(cmd) => self.handle_open(cmd.occurred_at),
            CartCommand::CloseCart(cmd) => self.handle_close(cmd),
        };
        Ok(events)
    }
}

impl Cart {
    fn handle_add_item(&self, cmd: &AddItem) -> Vec<CartEvent> {
        let mut events = Vec::with_capacity(2);

        match self.items.get(cmd.product.id_typed()) {
            Some(line) => events.push(CartEvent::QuantityChanged(QuantityChanged {
                product_id: line.id.clone(),
                quantity: line.qty.increment(),
                occurred_at: cmd.occurred_at,
            })),
            None => events.push(CartEvent::ItemAdded(ItemAdded {
                product: Arc::clone(&cmd.product),
                occurred_at: cmd.occurred_at,
            })),
        }

        // Adding always reveals the cart.
        events.extend(self.handle_open(cmd.occurred_at));
        events
    }

    fn handle_set_quantity(&self, cmd: &SetQuantity) -> Vec<CartEvent> {
        match self.items.get(&cmd.product_id) {
            Some(line) if line.qty != cmd.quantity => {
                vec![CartEvent::QuantityChanged(QuantityChanged {
                    product_id: cmd.product_id.clone(),
                    quantity: cmd.quantity,
                    occurred_at: cmd.occurred_at,
                })]
            }
            _ => Vec::new(),
        }
    }

    fn handle_remove_item(&self, cmd: &RemoveItem) -> Vec<CartEvent> {
        if !self.items.contains_key(&cmd.product_id) {
            return Vec::new();
        }
        vec![CartEvent::ItemRemoved(ItemRemoved {
            product_id: cmd.product_id.clone(),
            occurred_at: cmd.occurred_at,
        })]
    }

    fn handle_open(&self, occurred_at: DateTime<Utc>) -> Vec<CartEvent> {
        if self.is_open() {
            return Vec::new();
        }
        vec![CartEvent::CartOpened(CartOpened { occurred_at })]
    }

    fn handle_close(&self, cmd: &CloseCart) -> Vec<CartEvent> {
        if !self.is_open() {
            return Vec::new();
        }
        vec![CartEvent::CartClosed(CartClosed {
            occurred_at: cmd.occurred_at,
        })]
    }
}
