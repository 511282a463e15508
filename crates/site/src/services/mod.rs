//! Site services.

pub mod catalog;
pub mod waitlist;

pub use catalog::{CatalogService, CatalogSnapshot, CatalogStats};
pub use waitlist::SubscribeOutcome;
