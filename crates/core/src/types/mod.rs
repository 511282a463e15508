//! Core types for BrickMon.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod price;
pub mod slug;
pub mod status;

pub use email::{Email, EmailError};
pub use id::*;
pub use price::Price;
pub use slug::Slug;
pub use status::{Availability, StatusTone, StockStatus, StockStatusError};
