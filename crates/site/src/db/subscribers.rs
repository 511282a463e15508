//! Subscriber repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use brickmon_core::{Email, SubscriberId};

use super::{RepositoryError, map_unique_violation};
use crate::models::Subscriber;

const SUBSCRIBER_COLUMNS: &str = "id, email, created_at";

/// Repository for waitlist subscriber operations.
pub struct SubscriberRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SubscriberRepository<'a> {
    /// Create a new subscriber repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Look up a subscriber by normalized email.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<Subscriber>, RepositoryError> {
        let subscriber = sqlx::query_as::<_, Subscriber>(&format!(
            "SELECT {SUBSCRIBER_COLUMNS} FROM subscribers WHERE email = $1"
        ))
        .bind(email.as_str())
        .fetch_optional(self.pool)
        .await?;

        Ok(subscriber)
    }

    /// Insert a new subscriber.
    ///
    /// The unique index on `email` is the correctness backstop for
    /// concurrent signups of the same address: whichever insert lands
    /// second gets `RepositoryError::Conflict`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists,
    /// `RepositoryError::Database` for other database errors.
    pub async fn insert(&self, email: &Email) -> Result<Subscriber, RepositoryError> {
        let id = SubscriberId::new(Uuid::new_v4());

        let subscriber = sqlx::query_as::<_, Subscriber>(&format!(
            "INSERT INTO subscribers (id, email) VALUES ($1, $2)
             RETURNING {SUBSCRIBER_COLUMNS}"
        ))
        .bind(id)
        .bind(email.as_str())
        .fetch_one(self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "subscriber"))?;

        Ok(subscriber)
    }
}
