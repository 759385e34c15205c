//! Display name for shopping lists and items.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Name`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum NameError {
    /// The input is empty or contains only whitespace.
    #[error("This field may not be blank.")]
    Blank,

    /// The input contains a NUL (`U+0000`) character, which `TEXT` columns
    /// cannot store.
    #[error("Null characters are not allowed.")]
    NullCharacter,
}

/// The name of a shopping list or shopping item.
///
/// Surrounding whitespace is trimmed; what remains must not be empty and must
/// not contain NUL characters. Every stored list and item carries a `Name`,
/// so a stored name is never blank.
///
/// ## Examples
///
/// ```
/// use shopping_list_core::Name;
///
/// assert_eq!(Name::parse("  Dairy ").unwrap().as_str(), "Dairy");
///
/// assert!(Name::parse("").is_err());
/// assert!(Name::parse("   ").is_err());
/// assert!(Name::parse("Da\0iry").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct Name(String);

impl Name {
    /// Parse a `Name` from a string, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`NameError::Blank`] if nothing remains after trimming, or
    /// [`NameError::NullCharacter`] if the name contains `'\0'`.
    pub fn parse(s: &str) -> Result<Self, NameError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(NameError::Blank);
        }
        if trimmed.contains('\0') {
            return Err(NameError::NullCharacter);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Name` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Name {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Name {
    type Error = NameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Name> for String {
    fn from(name: Name) -> Self {
        name.0
    }
}

impl AsRef<str> for Name {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// SQLx support (with postgres feature)
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Name {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Name {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        // The table CHECK constraint rejects blank names, but re-validate anyway
        Ok(Self::parse(&s)?)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Name {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}
