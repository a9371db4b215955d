use serde::{Deserialize, Serialize};
use std::fmt;

/// A string-valued attribute that questions can probe.
///
/// Iteration order of [`CategoricalAttribute::ALL`] is the order in which the
/// question selector enumerates attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoricalAttribute {
    Gender,
    Country,
    Occupation,
}

impl CategoricalAttribute {
    /// All categorical attributes in selection order.
    pub const ALL: [CategoricalAttribute; 3] = [Self::Gender, Self::Country, Self::Occupation];

    /// Column name used in datasets and question text.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Gender => "gender",
            Self::Country => "country",
            Self::Occupation => "occupation",
        }
    }
}

impl fmt::Display for CategoricalAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
