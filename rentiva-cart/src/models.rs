use serde::{Deserialize, Serialize};

/// A priced add-on attached to a cart line (damage waiver, setup fee, etc.).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Addon {
    pub id: String,
    pub description: String,
    pub unit_amount: f64,
    pub quantity: u32,
}

impl Addon {
    pub fn total(&self) -> f64 {
        self.unit_amount * self.quantity as f64
    }
}

/// One rentable item in the cart.
///
/// `base_amount` and `amount` are derived: recomputed by the pricing pass on
/// every window or cart change, never authoritative on their own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLineItem {
    pub id: String,
    pub name: String,
    pub category_id: String,
    pub quantity: u32,
    /// Stock limit from the most recent availability check.
    pub max_quantity: u32,
    pub weekday_rate: f64,
    pub weekend_rate: f64,
    pub discount_eligible: bool,
    pub container_units: u32,
    pub addons: Vec<Addon>,
    /// Window total before any volume discount.
    pub base_amount: f64,
    /// Window total after the volume discount, if this line received it.
    pub amount: f64,
    pub discount_processed: bool,
}

impl CartLineItem {
    pub fn new(
        id: &str,
        name: &str,
        category_id: &str,
        quantity: u32,
        max_quantity: u32,
        weekday_rate: f64,
        weekend_rate: f64,
        discount_eligible: bool,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            category_id: category_id.to_string(),
            quantity,
            max_quantity,
            weekday_rate,
            weekend_rate,
            discount_eligible,
            container_units: 0,
            addons: Vec::new(),
            base_amount: 0.0,
            amount: 0.0,
            discount_processed: false,
        }
    }

    pub fn unit_price(&self) -> f64 {
        if self.quantity == 0 {
            0.0
        } else {
            self.amount / self.quantity as f64
        }
    }

    pub fn addon_total(&self) -> f64 {
        self.addons.iter().map(Addon::total).sum()
    }
}

/// Ordered collection of cart lines, unique by item id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartLineItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    pub(crate) fn items_mut(&mut self) -> &mut [CartLineItem] {
        &mut self.items
    }

    pub fn get(&self, item_id: &str) -> Option<&CartLineItem> {
        self.items.iter().find(|i| i.id == item_id)
    }

    /// Add a line, merging with an existing line for the same item:
    /// quantities combine (capped at the incoming availability limit) and
    /// add-ons union by id instead of duplicating.
    pub fn add(&mut self, incoming: CartLineItem) {
        match self.items.iter_mut().find(|i| i.id == incoming.id) {
            Some(existing) => {
                existing.quantity =
                    (existing.quantity + incoming.quantity).min(incoming.max_quantity);
                existing.max_quantity = incoming.max_quantity;
                for addon in incoming.addons {
                    if !existing.addons.iter().any(|a| a.id == addon.id) {
                        existing.addons.push(addon);
                    }
                }
            }
            None => self.items.push(incoming),
        }
    }

    pub fn remove(&mut self, item_id: &str) -> Option<CartLineItem> {
        let index = self.items.iter().position(|i| i.id == item_id)?;
        Some(self.items.remove(index))
    }

    /// Set an add-on quantity on a line; quantity 0 drops the add-on.
    pub fn set_addon_quantity(&mut self, item_id: &str, addon_id: &str, quantity: u32) {
        if let Some(item) = self.items.iter_mut().find(|i| i.id == item_id) {
            if quantity == 0 {
                item.addons.retain(|a| a.id != addon_id);
            } else if let Some(addon) = item.addons.iter_mut().find(|a| a.id == addon_id) {
                addon.quantity = quantity;
            }
        }
    }

    /// Cleared on successful order completion.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn total_quantity(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(id: &str, quantity: u32, max_quantity: u32) -> CartLineItem {
        CartLineItem::new(id, "Bounce House", "cat-1", quantity, max_quantity, 50.0, 60.0, true)
    }

    #[test]
    fn test_re_add_merges_quantity_capped_at_limit() {
        let mut cart = Cart::new();
        cart.add(line("item-1", 2, 3));
        cart.add(line("item-1", 2, 3));

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get("item-1").unwrap().quantity, 3);
    }

    #[test]
    fn test_re_add_unions_addons() {
        let mut cart = Cart::new();
        let mut first = line("item-1", 1, 5);
        first.addons.push(Addon {
            id: "a1".to_string(),
            description: "Setup".to_string(),
            unit_amount: 15.0,
            quantity: 1,
        });
        cart.add(first);

        let mut second = line("item-1", 1, 5);
        second.addons.push(Addon {
            id: "a1".to_string(),
            description: "Setup".to_string(),
            unit_amount: 15.0,
            quantity: 2,
        });
        second.addons.push(Addon {
            id: "a2".to_string(),
            description: "Generator".to_string(),
            unit_amount: 40.0,
            quantity: 1,
        });
        cart.add(second);

        let merged = cart.get("item-1").unwrap();
        assert_eq!(merged.addons.len(), 2);
        // Existing addon wins over the incoming duplicate
        assert_eq!(merged.addons[0].quantity, 1);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut cart = Cart::new();
        cart.add(line("item-1", 1, 5));
        cart.add(line("item-2", 2, 5));

        assert!(cart.remove("item-1").is_some());
        assert!(cart.remove("item-1").is_none());
        assert_eq!(cart.len(), 1);

        cart.clear();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_addon_quantity_zero_drops_addon() {
        let mut cart = Cart::new();
        let mut item = line("item-1", 1, 5);
        item.addons.push(Addon {
            id: "a1".to_string(),
            description: "Setup".to_string(),
            unit_amount: 15.0,
            quantity: 2,
        });
        cart.add(item);

        cart.set_addon_quantity("item-1", "a1", 0);
        assert!(cart.get("item-1").unwrap().addons.is_empty());
    }
}
