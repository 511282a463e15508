//! HTTP middleware for the site.

pub mod rate_limit;

pub use rate_limit::waitlist_rate_limiter;
