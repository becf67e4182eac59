//! Inventory and Production Context
//!
//! The minimal world snapshot the effect scorer reads: what an agent holds
//! and what its trade consumes and produces.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Item holdings, by item name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    items: HashMap<String, u32>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(mut self, item: impl Into<String>, count: u32) -> Self {
        self.items.insert(item.into(), count);
        self
    }

    /// How many of `item` are held; zero for unknown items.
    pub fn count(&self, item: &str) -> u32 {
        self.items.get(item).copied().unwrap_or(0)
    }

    pub fn add(&mut self, item: impl Into<String>, amount: u32) {
        *self.items.entry(item.into()).or_insert(0) += amount;
    }

    /// Removes up to `amount` of `item`; returns false if the holding was
    /// insufficient (nothing is removed in that case).
    pub fn remove(&mut self, item: &str, amount: u32) -> bool {
        match self.items.get_mut(item) {
            Some(count) if *count >= amount => {
                *count -= amount;
                true
            }
            _ => false,
        }
    }
}

/// What an agent's trade produces and what inputs it requires.
///
/// Items on the `requires` list are worth substantially more to the agent
/// than their face value; the scorer treats them as rational rather than
/// idiosyncratic demand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Produces {
    pub produces: Vec<String>,
    pub requires: Vec<String>,
}

impl Produces {
    pub fn new(
        produces: impl IntoIterator<Item = String>,
        requires: impl IntoIterator<Item = String>,
    ) -> Self {
        Self { produces: produces.into_iter().collect(), requires: requires.into_iter().collect() }
    }

    pub fn requires_item(&self, item: &str) -> bool {
        self.requires.iter().any(|i| i == item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_is_all_or_nothing() {
        let mut inventory = Inventory::new().with_item("hops", 2);
        assert!(!inventory.remove("hops", 3));
        assert_eq!(inventory.count("hops"), 2);
        assert!(inventory.remove("hops", 2));
        assert_eq!(inventory.count("hops"), 0);
    }

    #[test]
    fn test_unknown_item_counts_zero() {
        assert_eq!(Inventory::new().count("gold"), 0);
    }

    #[test]
    fn test_requires_item() {
        let produces = Produces::new(vec!["beer".to_string()], vec!["hops".to_string()]);
        assert!(produces.requires_item("hops"));
        assert!(!produces.requires_item("beer"));
    }
}
