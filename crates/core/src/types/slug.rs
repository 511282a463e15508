//! URL-safe product slugs.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Maximum slug length in characters.
const MAX_SLUG_LENGTH: usize = 100;

/// A URL-safe lowercase identifier derived from a product name.
///
/// Slugs are stored alongside products with a unique index, and derived
/// exactly once at import time via [`Slug::from_name`]. Route resolution
/// compares the inbound path segment against the stored column; it never
/// re-derives slugs on the fly, so a renamed product keeps its URL.
///
/// ## Examples
///
/// ```
/// use brickmon_core::Slug;
///
/// let slug = Slug::from_name("LEGO Charizard (Flame Edition)");
/// assert_eq!(slug.as_str(), "lego-charizard-flame-edition");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    /// Derive a slug from a display name.
    ///
    /// Lowercases the input, replaces every maximal run of characters
    /// outside `[a-z0-9]` with a single hyphen, strips leading and
    /// trailing hyphens, and truncates to 100 characters. Total: an empty
    /// or all-punctuation name yields an empty slug.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        let mut slug = String::with_capacity(name.len());
        let mut pending_hyphen = false;

        for c in name.to_lowercase().chars() {
            if c.is_ascii_lowercase() || c.is_ascii_digit() {
                if pending_hyphen && !slug.is_empty() {
                    slug.push('-');
                }
                pending_hyphen = false;
                slug.push(c);
            } else {
                pending_hyphen = true;
            }
        }

        slug.truncate(MAX_SLUG_LENGTH);
        Self(slug)
    }

    /// Returns the slug as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Slug` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Whether the slug is empty (derived from a name with no
    /// alphanumeric characters).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// SQLx support (with postgres feature)
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Slug {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Slug {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self(s))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Slug {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_basic() {
        assert_eq!(
            Slug::from_name("LEGO Charizard (Flame Edition)").as_str(),
            "lego-charizard-flame-edition"
        );
    }

    #[test]
    fn test_from_name_collapses_runs() {
        assert_eq!(Slug::from_name("a  --  b").as_str(), "a-b");
        assert_eq!(Slug::from_name("Kanto / Region!! Set").as_str(), "kanto-region-set");
    }

    #[test]
    fn test_from_name_strips_edges() {
        assert_eq!(Slug::from_name("  ...Eevee Pack...  ").as_str(), "eevee-pack");
    }

    #[test]
    fn test_from_name_keeps_digits() {
        assert_eq!(Slug::from_name("Set #10323 (2nd Ed.)").as_str(), "set-10323-2nd-ed");
    }

    #[test]
    fn test_from_name_total_on_degenerate_input() {
        assert!(Slug::from_name("").is_empty());
        assert!(Slug::from_name("!!! ???").is_empty());
    }

    #[test]
    fn test_from_name_truncates() {
        let name = "a".repeat(150);
        assert_eq!(Slug::from_name(&name).as_str().len(), 100);
    }

    #[test]
    fn test_from_name_deterministic() {
        let name = "Life-Size Pikachu";
        assert_eq!(Slug::from_name(name), Slug::from_name(name));
    }

    #[test]
    fn test_from_name_lowercases_unicode() {
        assert_eq!(Slug::from_name("Pokémon Édition").as_str(), "pok-mon-dition");
    }
}
