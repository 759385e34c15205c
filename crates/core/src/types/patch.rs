//! Tri-state field values for partial updates.

/// A field value as supplied in a write request.
///
/// Partial updates need to tell apart a field that was left out of the
/// request body (`Unset`), a field explicitly sent as `null` (`Null`), and a
/// field carrying a value (`Value`) - which may itself be an empty string that
/// validation later rejects. Collapsing these into `Option<T>` loses the
/// difference between "keep the stored value" and "clear it".
///
/// # Example
///
/// ```
/// use shopping_list_core::Patch;
///
/// let parsed = Patch::Value("4").try_map(str::parse::<u8>);
/// assert_eq!(parsed, Ok(Patch::Value(4)));
///
/// let unset: Patch<&str> = Patch::default();
/// assert_eq!(unset.try_map(str::parse::<u8>), Ok(Patch::Unset));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Patch<T> {
    /// The field was not present in the request.
    #[default]
    Unset,
    /// The field was present with an explicit `null`.
    Null,
    /// The field was present with a value.
    Value(T),
}

impl<T> Patch<T> {
    /// Maps the contained value with a fallible conversion, leaving `Unset`
    /// and `Null` untouched.
    ///
    /// # Errors
    ///
    /// Returns the conversion error if `f` fails.
    pub fn try_map<U, E, F: FnOnce(T) -> Result<U, E>>(self, f: F) -> Result<Patch<U>, E> {
        match self {
            Self::Unset => Ok(Patch::Unset),
            Self::Null => Ok(Patch::Null),
            Self::Value(value) => f(value).map(Patch::Value),
        }
    }
}
