//! In-memory item storage.
//!
//! # Design Decisions
//! - A `std::sync::RwLock` over a `Vec` is enough here: writes are rare,
//!   reads clone the list, and no await point ever holds the guard
//! - Poisoning is recovered rather than propagated; a panicking peer must
//!   not take the store down with it
//! - Nothing is persisted; the collection lives for the process lifetime

use std::sync::RwLock;

use serde::{Deserialize, Serialize};

/// A stored item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
}

/// Process-local, append-only item collection shared across handlers.
#[derive(Debug, Default)]
pub struct ItemStore {
    items: RwLock<Vec<Item>>,
}

impl ItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item to the end of the collection.
    pub fn append(&self, item: Item) {
        let mut items = self
            .items
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        items.push(item);
    }

    /// Point-in-time snapshot of all items in insertion order.
    pub fn list(&self) -> Vec<Item> {
        let items = self
            .items
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        items.clone()
    }

    pub fn len(&self) -> usize {
        let items = self
            .items
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str) -> Item {
        Item {
            name: name.to_string(),
        }
    }

    #[test]
    fn starts_empty() {
        let store = ItemStore::new();
        assert!(store.is_empty());
        assert!(store.list().is_empty());
    }

    #[test]
    fn append_preserves_insertion_order() {
        let store = ItemStore::new();
        for name in ["a", "b", "c"] {
            store.append(item(name));
        }

        let names: Vec<String> = store.list().into_iter().map(|i| i.name).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn list_is_a_snapshot() {
        let store = ItemStore::new();
        store.append(item("first"));

        let snapshot = store.list();
        store.append(item("second"));

        assert_eq!(snapshot.len(), 1);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn concurrent_appends_lose_nothing() {
        use std::sync::Arc;

        let store = Arc::new(ItemStore::new());
        let handles: Vec<_> = (0..8)
            .map(|worker| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for i in 0..25 {
                        store.append(Item {
                            name: format!("item-{worker}-{i}"),
                        });
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.len(), 200);
    }
}
