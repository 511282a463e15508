//! Waitlist subscriber model.

use chrono::{DateTime, Utc};

use brickmon_core::{Email, SubscriberId};

/// A waitlist subscriber as stored in the `subscribers` table.
///
/// At most one row exists per normalized email; the unique index on
/// `email` is the invariant's enforcement point.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Subscriber {
    pub id: SubscriberId,
    pub email: Email,
    pub created_at: DateTime<Utc>,
}
