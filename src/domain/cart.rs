//! Shopping cart store.
//!
//! The cart is a flat list of lines, each tagged with the restaurant it
//! belongs to. Lines from several restaurants live side by side; grouping is
//! a derived view (see [`crate::domain::pricing`]).
//!
//! Every operation is total: unknown keys are no-ops, never errors.

use serde::{Deserialize, Serialize};

/// Data needed to put a menu item in the cart for the first time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineInput {
    pub item_id: String,
    pub restaurant_id: String,
    pub restaurant_name: String,
    pub name: String,
    pub image: Option<String>,
    pub unit_price: u64,
}

/// One distinct (item, restaurant) entry with a positive quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub item_id: String,
    pub restaurant_id: String,
    pub restaurant_name: String,
    pub name: String,
    pub image: Option<String>,
    pub unit_price: u64,
    pub quantity: u32,
}

impl CartLine {
    fn from_input(input: CartLineInput) -> Self {
        Self {
            item_id: input.item_id,
            restaurant_id: input.restaurant_id,
            restaurant_name: input.restaurant_name,
            name: input.name,
            image: input.image,
            unit_price: input.unit_price,
            quantity: 1,
        }
    }

    pub fn key(&self) -> LineKey {
        LineKey::new(&self.item_id, &self.restaurant_id)
    }

    pub fn matches(&self, key: &LineKey) -> bool {
        self.item_id == key.item_id && self.restaurant_id == key.restaurant_id
    }

    /// Quantity times unit price, saturating at `u64::MAX`.
    pub fn subtotal(&self) -> u64 {
        u64::from(self.quantity).saturating_mul(self.unit_price)
    }
}

/// Identity of a cart line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineKey {
    pub item_id: String,
    pub restaurant_id: String,
}

impl LineKey {
    pub fn new(item_id: impl Into<String>, restaurant_id: impl Into<String>) -> Self {
        Self {
            item_id: item_id.into(),
            restaurant_id: restaurant_id.into(),
        }
    }
}

/// Mutations accepted by the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartAction {
    Add(CartLineInput),
    Increase(LineKey),
    Decrease(LineKey),
    ClearAll,
    ClearRestaurant(String),
}

/// What a single action did to the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    /// A new line was created with quantity 1
    Inserted(CartLine),
    /// An existing line changed quantity and is still present
    Updated(CartLine),
    /// A line dropped to zero and was removed
    Removed(CartLine),
    /// A clear removed this many lines
    Cleared(usize),
    /// The key was not in the cart
    Unchanged,
}

/// The cart state container.
///
/// # Examples
///
/// ```
/// use tsfood::domain::{Cart, CartLineInput};
///
/// let mut cart = Cart::default();
/// let whopper = CartLineInput {
///     item_id: "m1".to_string(),
///     restaurant_id: "r1".to_string(),
///     restaurant_name: "Burger King".to_string(),
///     name: "Whopper".to_string(),
///     image: None,
///     unit_price: 50_000,
/// };
/// cart.add_item(whopper.clone());
/// cart.add_item(whopper);
/// assert_eq!(cart.lines().len(), 1);
/// assert_eq!(cart.lines()[0].quantity, 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn find(&self, key: &LineKey) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.matches(key))
    }

    /// Quantity held for a key, zero when absent.
    pub fn quantity_of(&self, key: &LineKey) -> u32 {
        self.find(key).map(|line| line.quantity).unwrap_or(0)
    }

    pub fn lines_for<'a>(&'a self, restaurant_id: &'a str) -> impl Iterator<Item = &'a CartLine> + 'a {
        self.lines
            .iter()
            .filter(move |line| line.restaurant_id == restaurant_id)
    }

    /// Applies an action in place and reports what happened.
    pub fn apply(&mut self, action: CartAction) -> CartEvent {
        match action {
            CartAction::Add(input) => {
                let key = LineKey::new(&input.item_id, &input.restaurant_id);
                match self.position(&key) {
                    Some(index) => self.bump(index),
                    None => {
                        let line = CartLine::from_input(input);
                        self.lines.push(line.clone());
                        CartEvent::Inserted(line)
                    }
                }
            }
            CartAction::Increase(key) => match self.position(&key) {
                Some(index) => self.bump(index),
                None => CartEvent::Unchanged,
            },
            CartAction::Decrease(key) => {
                let Some(index) = self.position(&key) else {
                    return CartEvent::Unchanged;
                };
                if self.lines[index].quantity <= 1 {
                    CartEvent::Removed(self.lines.remove(index))
                } else {
                    self.lines[index].quantity -= 1;
                    CartEvent::Updated(self.lines[index].clone())
                }
            }
            CartAction::ClearAll => {
                let removed = self.lines.len();
                self.lines.clear();
                CartEvent::Cleared(removed)
            }
            CartAction::ClearRestaurant(restaurant_id) => {
                let before = self.lines.len();
                self.lines.retain(|line| line.restaurant_id != restaurant_id);
                CartEvent::Cleared(before - self.lines.len())
            }
        }
    }

    pub fn add_item(&mut self, input: CartLineInput) -> CartEvent {
        self.apply(CartAction::Add(input))
    }

    pub fn increase_quantity(&mut self, item_id: &str, restaurant_id: &str) -> CartEvent {
        self.apply(CartAction::Increase(LineKey::new(item_id, restaurant_id)))
    }

    pub fn decrease_quantity(&mut self, item_id: &str, restaurant_id: &str) -> CartEvent {
        self.apply(CartAction::Decrease(LineKey::new(item_id, restaurant_id)))
    }

    pub fn clear_all(&mut self) -> CartEvent {
        self.apply(CartAction::ClearAll)
    }

    pub fn clear_by_restaurant(&mut self, restaurant_id: &str) -> CartEvent {
        self.apply(CartAction::ClearRestaurant(restaurant_id.to_string()))
    }

    fn position(&self, key: &LineKey) -> Option<usize> {
        self.lines.iter().position(|line| line.matches(key))
    }

    fn bump(&mut self, index: usize) -> CartEvent {
        let line = &mut self.lines[index];
        line.quantity = line.quantity.saturating_add(1);
        CartEvent::Updated(line.clone())
    }
}

/// Pure reducer: consumes the old cart and returns the next one.
pub fn reduce_cart(mut cart: Cart, action: CartAction) -> (Cart, CartEvent) {
    let event = cart.apply(action);
    (cart, event)
}
