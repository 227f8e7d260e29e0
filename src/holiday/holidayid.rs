use std::borrow::Borrow;
use std::fmt;

use serde::{
    Serialize,
    Deserialize
};

/// Opaque token naming a holiday within a region.
///
/// Identifiers are dictionary keys, not display names. An empty identifier
/// is still a valid holiday; "not a holiday" is always `None`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HolidayId(String);

impl HolidayId {
    pub fn new(id: impl Into<String>) -> HolidayId {
        HolidayId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl From<&str> for HolidayId {
    fn from(id: &str) -> Self {
        HolidayId::new(id)
    }
}

impl From<String> for HolidayId {
    fn from(id: String) -> Self {
        HolidayId(id)
    }
}

impl Borrow<str> for HolidayId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for HolidayId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for HolidayId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for HolidayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
