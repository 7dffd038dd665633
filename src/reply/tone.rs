use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Style constraint applied to a generated reply
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Formal,
    #[default]
    Friendly,
    Direct,
    Casual,
    Professional,
}

impl Tone {
    /// All tones in selector order
    pub const ALL: [Tone; 5] = [
        Tone::Formal,
        Tone::Friendly,
        Tone::Direct,
        Tone::Casual,
        Tone::Professional,
    ];

    /// Name shown in the tone selector
    pub fn label(self) -> &'static str {
        match self {
            Self::Formal => "Formal",
            Self::Friendly => "Friendly",
            Self::Direct => "Direct",
            Self::Casual => "Casual",
            Self::Professional => "Professional",
        }
    }

    /// Lower-cased name embedded in the prompt
    pub fn prompt_name(self) -> &'static str {
        match self {
            Self::Formal => "formal",
            Self::Friendly => "friendly",
            Self::Direct => "direct",
            Self::Casual => "casual",
            Self::Professional => "professional",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown tone '{0}' (expected one of: formal, friendly, direct, casual, professional)")]
pub struct UnknownTone(pub String);

impl FromStr for Tone {
    type Err = UnknownTone;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownTone(s.to_string()))
    }
}
