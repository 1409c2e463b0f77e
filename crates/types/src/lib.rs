/// Errors that can occur when creating a procedure row identifier.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RowIdError {
    /// The input was empty or contained only whitespace
    #[error("Row identifier cannot be empty")]
    Empty,
}

/// Identifier correlating a feed record with the local procedure store.
///
/// The scheduling feed reports `rowID` as either a JSON string or a JSON number, and the local
/// store may hold the same value as INTEGER or TEXT. Both sides normalise into this type so that
/// `7`, `"7"` and `" 7 "` compare equal.
///
/// The wrapped value is trimmed and guaranteed non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(String);

impl RowId {
    /// Creates a new `RowId` from textual input.
    ///
    /// # Arguments
    ///
    /// * `input` - Any type that can be converted to a string reference
    ///
    /// # Returns
    ///
    /// Returns `Ok(RowId)` if the trimmed input is non-empty,
    /// or `Err(RowIdError::Empty)` if it's empty or contains only whitespace.
    pub fn new(input: impl AsRef<str>) -> Result<Self, RowIdError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(RowIdError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the inner identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<i64> for RowId {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl From<u64> for RowId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl std::fmt::Display for RowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> serde::Deserialize<'de> for RowId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct RowIdVisitor;

        impl serde::de::Visitor<'_> for RowIdVisitor {
            type Value = RowId;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a non-empty string or an integer row identifier")
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<RowId, E> {
                RowId::new(v).map_err(E::custom)
            }

            fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<RowId, E> {
                Ok(RowId::from(v))
            }

            fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<RowId, E> {
                Ok(RowId::from(v))
            }

            // Some exports send whole numbers as `101.0`.
            fn visit_f64<E: serde::de::Error>(self, v: f64) -> Result<RowId, E> {
                if v.is_finite() && v.fract() == 0.0 && v.abs() < i64::MAX as f64 {
                    Ok(RowId::from(v as i64))
                } else {
                    Err(E::invalid_value(serde::de::Unexpected::Float(v), &self))
                }
            }
        }

        deserializer.deserialize_any(RowIdVisitor)
    }
}
