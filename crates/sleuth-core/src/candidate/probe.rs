use serde::{Deserialize, Serialize};
use std::fmt;

use super::CategoricalAttribute;

/// A single yes/no question: an attribute and a target value, or the
/// synthetic boolean "alive" question.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeProbe {
    Categorical {
        attribute: CategoricalAttribute,
        value: String,
    },
    Alive,
}

impl AttributeProbe {
    pub fn categorical(attribute: CategoricalAttribute, value: impl Into<String>) -> Self {
        Self::Categorical {
            attribute,
            value: value.into(),
        }
    }

    /// Attribute name as it appears in datasets ("alive" for the boolean probe).
    pub fn attribute_name(&self) -> &'static str {
        match self {
            Self::Categorical { attribute, .. } => attribute.as_str(),
            Self::Alive => "alive",
        }
    }

    /// Target value, `None` for the alive probe.
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Categorical { value, .. } => Some(value),
            Self::Alive => None,
        }
    }

    /// The question presented to the user.
    pub fn question_text(&self) -> String {
        match self {
            Self::Categorical { attribute, value } => {
                format!("Is the character's {attribute} '{value}'?")
            }
            Self::Alive => "Is the character still alive?".to_string(),
        }
    }
}

impl fmt::Display for AttributeProbe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Categorical { attribute, value } => write!(f, "{attribute}={value}"),
            Self::Alive => f.write_str("alive"),
        }
    }
}
