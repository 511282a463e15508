//! Database-backed domain models.

pub mod product;
pub mod subscriber;

pub use product::Product;
pub use subscriber::Subscriber;
