//! Inventory - per-house stock of goods

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// A stocked consumable good
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Good {
    Wheat,
    Vegetables,
    Fruit,
    Meat,
    Pottery,
    Furniture,
    Oil,
    Wine,
}

impl Good {
    pub const FOODS: [Good; 4] = [Good::Wheat, Good::Vegetables, Good::Fruit, Good::Meat];

    /// Non-food inventory goods, in consumption order
    pub const GOODS: [Good; 4] = [Good::Pottery, Good::Furniture, Good::Oil, Good::Wine];

    pub fn is_food(self) -> bool {
        Self::FOODS.contains(&self)
    }
}

/// Stock held by one house
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    stock: AHashMap<Good, u32>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get current amount of a good
    pub fn get(&self, good: Good) -> u32 {
        self.stock.get(&good).copied().unwrap_or(0)
    }

    pub fn set(&mut self, good: Good, amount: u32) {
        self.stock.insert(good, amount);
    }

    pub fn add(&mut self, good: Good, amount: u32) {
        let entry = self.stock.entry(good).or_insert(0);
        *entry = entry.saturating_add(amount);
    }

    /// Remove up to `amount`, returns amount actually removed
    pub fn remove(&mut self, good: Good, amount: u32) -> u32 {
        if let Some(current) = self.stock.get_mut(&good) {
            let removed = amount.min(*current);
            *current -= removed;
            removed
        } else {
            0
        }
    }

    /// Number of distinct food kinds with positive stock
    pub fn food_types_available(&self) -> u8 {
        Good::FOODS.iter().filter(|food| self.get(**food) > 0).count() as u8
    }

    /// Move everything from `other` into this inventory
    pub fn absorb(&mut self, other: Inventory) {
        for (good, amount) in other.stock {
            self.add(good, amount);
        }
    }

    /// Split off an equal share for each of `parts` new holders
    ///
    /// Returns `parts` inventories; this inventory keeps its own share plus
    /// the remainder of the integer division.
    pub fn split(&mut self, parts: usize) -> Vec<Inventory> {
        let mut shares = vec![Inventory::new(); parts];
        if parts == 0 {
            return shares;
        }
        let holders = parts as u32 + 1;
        for (good, amount) in self.stock.iter_mut() {
            let share = *amount / holders;
            if share == 0 {
                continue;
            }
            for inventory in shares.iter_mut() {
                inventory.set(*good, share);
            }
            *amount -= share * parts as u32;
        }
        shares
    }

    pub fn is_empty(&self) -> bool {
        self.stock.values().all(|amount| *amount == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inventory_add_remove() {
        let mut inventory = Inventory::new();
        inventory.add(Good::Pottery, 30);
        assert_eq!(inventory.get(Good::Pottery), 30);

        assert_eq!(inventory.remove(Good::Pottery, 20), 20);
        assert_eq!(inventory.get(Good::Pottery), 10);
    }

    #[test]
    fn test_remove_more_than_stocked_clamps_to_zero() {
        let mut inventory = Inventory::new();
        inventory.add(Good::Oil, 3);
        assert_eq!(inventory.remove(Good::Oil, 10), 3);
        assert_eq!(inventory.get(Good::Oil), 0);
        assert_eq!(inventory.remove(Good::Wine, 5), 0);
    }

    #[test]
    fn test_food_types_counts_positive_food_only() {
        let mut inventory = Inventory::new();
        inventory.add(Good::Wheat, 10);
        inventory.add(Good::Fruit, 0);
        inventory.add(Good::Pottery, 5);
        assert_eq!(inventory.food_types_available(), 1);

        inventory.add(Good::Meat, 1);
        assert_eq!(inventory.food_types_available(), 2);
    }

    #[test]
    fn test_split_shares_evenly_and_keeps_remainder() {
        let mut inventory = Inventory::new();
        inventory.add(Good::Wheat, 10);
        inventory.add(Good::Wine, 2);

        let shares = inventory.split(3);
        assert_eq!(shares.len(), 3);
        for share in &shares {
            assert_eq!(share.get(Good::Wheat), 2);
            assert_eq!(share.get(Good::Wine), 0);
        }
        // 10 - 3 * 2
        assert_eq!(inventory.get(Good::Wheat), 4);
        assert_eq!(inventory.get(Good::Wine), 2);
    }

    #[test]
    fn test_absorb_sums_stock() {
        let mut a = Inventory::new();
        a.add(Good::Furniture, 2);
        let mut b = Inventory::new();
        b.add(Good::Furniture, 3);
        b.add(Good::Meat, 7);

        a.absorb(b);
        assert_eq!(a.get(Good::Furniture), 5);
        assert_eq!(a.get(Good::Meat), 7);
    }
}
