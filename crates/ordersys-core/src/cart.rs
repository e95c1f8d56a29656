//! Shopping cart state

use ordersys_util::FoodId;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A food item as delivered by the backend menu API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    #[serde(rename = "FoodID")]
    pub id: FoodId,

    #[serde(rename = "FoodName")]
    pub name: String,

    /// Unit price
    #[serde(rename = "Price")]
    pub price: f64,

    #[serde(rename = "FoodTag", default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

impl FoodItem {
    pub fn new(id: impl Into<FoodId>, name: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            tag: None,
        }
    }
}

/// One cart line; quantity is always at least 1
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineItem {
    pub item: FoodItem,
    pub quantity: u32,
}

impl LineItem {
    pub fn subtotal(&self) -> f64 {
        self.item.price * f64::from(self.quantity)
    }
}

/// Snapshot of lines and totals, as handed to the view host
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartSummary {
    pub items: Vec<LineItem>,
    pub total_items: u64,
    pub total_price: f64,
}

/// Ordered cart lines keyed by food id.
///
/// Lines keep their first-insertion order. A line whose quantity would drop
/// to zero is removed. Operations on ids not in the cart do nothing.
#[derive(Debug, Clone, Default)]
pub struct CartState {
    items: Vec<LineItem>,
}

impl CartState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one of `item`, merging with an existing line
    pub fn add_item(&mut self, item: FoodItem) {
        match self.position(item.id) {
            Some(i) => {
                let line = &mut self.items[i];
                line.quantity = line.quantity.saturating_add(1);
                debug!(food_id = %item.id, quantity = line.quantity, "Cart line incremented");
            }
            None => {
                debug!(food_id = %item.id, "Cart line added");
                self.items.push(LineItem { item, quantity: 1 });
            }
        }
    }

    pub fn remove_item(&mut self, id: FoodId) {
        if let Some(i) = self.position(id) {
            self.items.remove(i);
            debug!(food_id = %id, "Cart line removed");
        }
    }

    /// Set a line's quantity; zero or less removes the line
    pub fn set_quantity(&mut self, id: FoodId, quantity: i64) {
        let Some(i) = self.position(id) else {
            return;
        };

        if quantity <= 0 {
            self.remove_item(id);
        } else {
            let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
            self.items[i].quantity = quantity;
            debug!(food_id = %id, quantity, "Cart quantity set");
        }
    }

    pub fn increment(&mut self, id: FoodId) {
        if let Some(line) = self.line_mut(id) {
            line.quantity = line.quantity.saturating_add(1);
            debug!(food_id = %id, quantity = line.quantity, "Cart line incremented");
        }
    }

    /// Take one away; the line disappears when none are left
    pub fn decrement(&mut self, id: FoodId) {
        let Some(line) = self.line_mut(id) else {
            return;
        };

        if line.quantity <= 1 {
            self.remove_item(id);
        } else {
            line.quantity -= 1;
            debug!(food_id = %id, quantity = line.quantity, "Cart line decremented");
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
        debug!("Cart cleared");
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn get(&self, id: FoodId) -> Option<&LineItem> {
        self.items.iter().find(|line| line.item.id == id)
    }

    /// Number of distinct lines
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all quantities
    pub fn total_item_count(&self) -> u64 {
        self.items.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Sum of unit price times quantity over all lines
    pub fn total_price(&self) -> f64 {
        self.items.iter().map(LineItem::subtotal).sum()
    }

    pub fn summary(&self) -> CartSummary {
        CartSummary {
            items: self.items.clone(),
            total_items: self.total_item_count(),
            total_price: self.total_price(),
        }
    }

    fn position(&self, id: FoodId) -> Option<usize> {
        self.items.iter().position(|line| line.item.id == id)
    }

    fn line_mut(&mut self, id: FoodId) -> Option<&mut LineItem> {
        self.items.iter_mut().find(|line| line.item.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pizza() -> FoodItem {
        FoodItem::new(1, "Pizza", 12.5)
    }

    fn soup() -> FoodItem {
        FoodItem::new(2, "Soup", 4.0)
    }

    fn id(n: i32) -> FoodId {
        FoodId::new(n)
    }

    #[test]
    fn starts_empty() {
        let cart = CartState::new();
        assert!(cart.is_empty());
        assert_eq!(cart.total_item_count(), 0);
        assert_eq!(cart.total_price(), 0.0);
    }

    #[test]
    fn adding_twice_merges_lines() {
        let mut cart = CartState::new();
        cart.add_item(pizza());
        cart.add_item(pizza());

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get(id(1)).unwrap().quantity, 2);
    }

    #[test]
    fn totals_follow_quantities() {
        let mut cart = CartState::new();
        cart.add_item(pizza());
        cart.add_item(soup());
        cart.add_item(soup());

        assert_eq!(cart.total_item_count(), 3);
        assert_eq!(cart.total_price(), 12.5 + 2.0 * 4.0);
    }

    #[test]
    fn repeat_add_keeps_insertion_order() {
        let mut cart = CartState::new();
        cart.add_item(pizza());
        cart.add_item(soup());
        cart.add_item(pizza());

        let ids: Vec<_> = cart.items().iter().map(|l| l.item.id).collect();
        assert_eq!(ids, vec![id(1), id(2)]);
    }

    #[test]
    fn remove_item() {
        let mut cart = CartState::new();
        cart.add_item(pizza());
        cart.add_item(soup());

        cart.remove_item(id(1));
        assert!(cart.get(id(1)).is_none());
        assert_eq!(cart.len(), 1);

        // Absent id is a no-op
        cart.remove_item(id(99));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn set_quantity() {
        let mut cart = CartState::new();
        cart.add_item(pizza());

        cart.set_quantity(id(1), 5);
        assert_eq!(cart.get(id(1)).unwrap().quantity, 5);

        // Absent id does not create a line
        cart.set_quantity(id(2), 3);
        assert!(cart.get(id(2)).is_none());

        cart.set_quantity(id(1), 0);
        assert!(cart.is_empty());

        cart.add_item(pizza());
        cart.set_quantity(id(1), -4);
        assert!(cart.is_empty());
    }

    #[test]
    fn increment_and_decrement() {
        let mut cart = CartState::new();
        cart.add_item(soup());

        cart.increment(id(2));
        assert_eq!(cart.get(id(2)).unwrap().quantity, 2);

        cart.decrement(id(2));
        assert_eq!(cart.get(id(2)).unwrap().quantity, 1);

        // Reaching zero removes the line
        cart.decrement(id(2));
        assert!(cart.get(id(2)).is_none());

        // And further decrements are no-ops
        cart.decrement(id(2));
        cart.increment(id(2));
        assert!(cart.is_empty());
    }

    #[test]
    fn clear_empties_cart() {
        let mut cart = CartState::new();
        cart.add_item(pizza());
        cart.add_item(soup());

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total_price(), 0.0);
    }

    #[test]
    fn food_item_uses_backend_field_names() {
        let json = r#"{"FoodID": 7, "FoodName": "Dumplings", "Price": 6.5, "FoodTag": "main"}"#;
        let item: FoodItem = serde_json::from_str(json).unwrap();

        assert_eq!(item.id, id(7));
        assert_eq!(item.name, "Dumplings");
        assert_eq!(item.tag.as_deref(), Some("main"));

        let json = r#"{"FoodID": 8, "FoodName": "Tea", "Price": 2}"#;
        let item: FoodItem = serde_json::from_str(json).unwrap();
        assert!(item.tag.is_none());
        assert_eq!(item.price, 2.0);
    }

    #[test]
    fn summary_serializes_totals() {
        let mut cart = CartState::new();
        cart.add_item(soup());
        cart.add_item(soup());

        let value = serde_json::to_value(cart.summary()).unwrap();
        assert_eq!(value["total_items"], 2);
        assert_eq!(value["total_price"], 8.0);
        assert_eq!(value["items"][0]["quantity"], 2);
        assert_eq!(value["items"][0]["item"]["FoodName"], "Soup");
    }
}
