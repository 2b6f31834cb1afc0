//! Gate conditions evaluated against the player's inventory.

use serde::{Deserialize, Serialize};

use crate::inventory::Inventory;

/// A predicate over the inventory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    /// The inventory holds an item.
    HasItem {
        /// Item name.
        item: String,
    },
    /// Logical NOT.
    Not(Box<Condition>),
    /// Logical AND.
    All(Vec<Condition>),
    /// Logical OR.
    Any(Vec<Condition>),
    /// Always true.
    #[default]
    Always,
}

impl Condition {
    /// Shorthand for [`Condition::HasItem`].
    pub fn has_item(item: impl Into<String>) -> Self {
        Condition::HasItem { item: item.into() }
    }

    /// Evaluate the condition against the inventory.
    pub fn evaluate(&self, inventory: &Inventory) -> bool {
        match self {
            Condition::HasItem { item } => inventory.has_item(item),
            Condition::Not(inner) => !inner.evaluate(inventory),
            Condition::All(conditions) => conditions.iter().all(|c| c.evaluate(inventory)),
            Condition::Any(conditions) => conditions.iter().any(|c| c.evaluate(inventory)),
            Condition::Always => true,
        }
    }

    /// Every item name this condition mentions, in order of appearance.
    pub fn items(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_items(&mut out);
        out
    }

    fn collect_items<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Condition::HasItem { item } => out.push(item),
            Condition::Not(inner) => inner.collect_items(out),
            Condition::All(conditions) | Condition::Any(conditions) => {
                for c in conditions {
                    c.collect_items(out);
                }
            }
            Condition::Always => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn holding(items: &[&str]) -> Inventory {
        let mut inv = Inventory::new();
        for item in items {
            inv.insert(*item);
        }
        inv
    }

    #[test]
    fn has_item() {
        let cond = Condition::has_item("torch");
        assert!(!cond.evaluate(&holding(&[])));
        assert!(cond.evaluate(&holding(&["torch"])));
        assert!(!cond.evaluate(&holding(&["rope"])));
    }

    #[test]
    fn logical_not() {
        let cond = Condition::Not(Box::new(Condition::has_item("torch")));
        assert!(cond.evaluate(&holding(&[])));
        assert!(!cond.evaluate(&holding(&["torch"])));
    }

    #[test]
    fn logical_all_and_any() {
        let both = Condition::All(vec![
            Condition::has_item("torch"),
            Condition::has_item("rope"),
        ]);
        let either = Condition::Any(vec![
            Condition::has_item("torch"),
            Condition::has_item("rope"),
        ]);

        let inv = holding(&["rope"]);
        assert!(!both.evaluate(&inv));
        assert!(either.evaluate(&inv));

        let inv = holding(&["rope", "torch"]);
        assert!(both.evaluate(&inv));
    }

    #[test]
    fn always_is_default() {
        assert_eq!(Condition::default(), Condition::Always);
        assert!(Condition::Always.evaluate(&holding(&[])));
    }

    #[test]
    fn items_are_collected_recursively() {
        let cond = Condition::Any(vec![
            Condition::has_item("torch"),
            Condition::Not(Box::new(Condition::has_item("rope"))),
        ]);
        assert_eq!(cond.items(), vec!["torch", "rope"]);
    }

    #[test]
    fn json_shape() {
        let json = serde_json::to_string(&Condition::has_item("torch")).unwrap();
        assert_eq!(json, r#"{"has_item":{"item":"torch"}}"#);
    }
}
