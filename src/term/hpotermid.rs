use core::fmt::Debug;
use std::fmt::Display;

use crate::{HpoError, HpoResult};

/// The unique identifier of an HPO term, e.g. `HP:0000118`
///
/// The id wraps the numerical part of the canonical term id and is used
/// as the term index throughout the crate. It is cheap to copy and
/// formats back into the canonical `HP:%07d` representation.
///
/// ```
/// use phenosim::HpoTermId;
///
/// let id1 = HpoTermId::try_from("HP:0000118").unwrap();
/// let id2 = HpoTermId::from(118u32);
/// assert_eq!(id1, id2);
/// assert_eq!(id1.to_string(), "HP:0000118");
/// ```
#[derive(Clone, Copy, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct HpoTermId {
    inner: u32,
}

impl HpoTermId {
    /// Constructs an `HpoTermId` from a `u32` in const context
    pub const fn from_u32(n: u32) -> Self {
        Self { inner: n }
    }

    /// Returns the numerical part of the term id
    pub fn as_u32(&self) -> u32 {
        self.inner
    }
}

impl TryFrom<&str> for HpoTermId {
    type Error = HpoError;

    /// Parses the canonical string representation, e.g. `HP:0000118`
    ///
    /// A bare integer string, e.g. `118`, is accepted as well.
    fn try_from(value: &str) -> HpoResult<Self> {
        let digits = value.strip_prefix("HP:").unwrap_or(value);
        if digits.is_empty() {
            return Err(HpoError::ParseError(format!("invalid term id: {value}")));
        }
        Ok(Self {
            inner: digits
                .parse::<u32>()
                .map_err(|_| HpoError::ParseError(format!("invalid term id: {value}")))?,
        })
    }
}

impl From<u32> for HpoTermId {
    fn from(inner: u32) -> Self {
        Self { inner }
    }
}

impl Debug for HpoTermId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "HpoTermId({self})")
    }
}

impl Display for HpoTermId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "HP:{:07}", self.inner)
    }
}

impl PartialEq<str> for HpoTermId {
    fn eq(&self, other: &str) -> bool {
        match HpoTermId::try_from(other) {
            Ok(other_id) => self == &other_id,
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn from_canonical_string() {
        let id = HpoTermId::try_from("HP:0000118").unwrap();
        assert_eq!(id.as_u32(), 118);
        assert_eq!(format!("{id}"), "HP:0000118");
    }

    #[test]
    fn from_bare_integer_string() {
        let id = HpoTermId::try_from("2650").unwrap();
        assert_eq!(id, HpoTermId::from(2650u32));
    }

    #[test]
    fn invalid_strings() {
        assert!(HpoTermId::try_from("HP:00001a8").is_err());
        assert!(HpoTermId::try_from("HP:").is_err());
        assert!(HpoTermId::try_from("foobar").is_err());
    }

    #[test]
    fn compare_to_str() {
        let id = HpoTermId::from(118u32);
        assert!(id == *"HP:0000118");
        assert!(id != *"HP:0000001");
    }
}
