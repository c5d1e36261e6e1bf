//! 12-byte server identifiers rendered as 24 hex characters.

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ObjectIdError;

const ID_LEN: usize = 12;

/// Identifier of a single server-side record.
///
/// Only well-formed ids can be constructed, so anything holding an
/// `ObjectId` can format it into a path without further checks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId([u8; ID_LEN]);

impl ObjectId {
    pub const fn from_bytes(bytes: [u8; ID_LEN]) -> Self {
        Self(bytes)
    }

    pub const fn bytes(&self) -> [u8; ID_LEN] {
        self.0
    }

    pub fn parse_str(input: &str) -> Result<Self, ObjectIdError> {
        if input.len() != ID_LEN * 2 {
            return Err(ObjectIdError::InvalidLength(input.chars().count()));
        }
        if let Some(bad) = input.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(ObjectIdError::InvalidCharacter(bad));
        }

        let mut bytes = [0u8; ID_LEN];
        for (i, byte) in bytes.iter_mut().enumerate() {
            let pair = &input[i * 2..i * 2 + 2];
            *byte = u8::from_str_radix(pair, 16)
                .map_err(|_| ObjectIdError::InvalidCharacter(pair.chars().next().unwrap_or('?')))?;
        }
        Ok(Self(bytes))
    }

    /// Lowercase hex form, as used in API paths.
    pub fn to_hex(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl FromStr for ObjectId {
    type Err = ObjectIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl Serialize for ObjectId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}
