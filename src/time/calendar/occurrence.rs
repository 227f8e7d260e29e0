use std::fmt;

use chrono::{Datelike, NaiveDate};

/// Serialized date of a holiday within a year's enumeration.
///
/// `dd/mm` recurs every year; `dd/mm/yyyy` is a one-off tied to its year.
/// Only the length tells the two forms apart.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Occurrence(String);

impl Occurrence {
    pub fn new(occurrence: impl Into<String>) -> Occurrence {
        Occurrence(occurrence.into())
    }

    pub fn recurring(d: NaiveDate) -> Occurrence {
        Occurrence(d.format("%d/%m").to_string())
    }

    /// `dd/mm/` followed by the year as a plain integer, without padding.
    pub fn one_off(d: NaiveDate) -> Occurrence {
        Occurrence(format!("{}/{}", d.format("%d/%m"), d.year()))
    }

    #[inline]
    pub fn is_one_off(&self) -> bool {
        self.0.len() > 5
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Occurrence {
    fn from(occurrence: &str) -> Self {
        Occurrence::new(occurrence)
    }
}

impl fmt::Display for Occurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
