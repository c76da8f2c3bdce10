//! Application data storage.

pub mod items;

pub use items::{Item, ItemStore};
