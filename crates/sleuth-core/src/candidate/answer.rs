use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A user's reply to a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Answer {
    Yes,
    No,
    #[serde(rename = "idk")]
    DontKnow,
}

impl Answer {
    /// Parse free-form console input. Accepts `yes`/`y`, `no`/`n`, and
    /// `idk`/`i dont know`/`dont know`/`unknown`, case-insensitively.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "yes" | "y" => Some(Self::Yes),
            "no" | "n" => Some(Self::No),
            "idk" | "i dont know" | "dont know" | "unknown" => Some(Self::DontKnow),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::No => "no",
            Self::DontKnow => "idk",
        }
    }
}

impl FromStr for Answer {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("expected yes / no / idk, got {s:?}"))
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
