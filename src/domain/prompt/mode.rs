use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Conversation mode selecting the system prompt.
///
/// Unrecognized modes fall back to `General` when deserialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatMode {
    Learning,
    Advocacy,
    #[default]
    #[serde(other)]
    General,
}

impl ChatMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatMode::Learning => "learning",
            ChatMode::Advocacy => "advocacy",
            ChatMode::General => "general",
        }
    }
}

impl fmt::Display for ChatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChatMode {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "learning" => ChatMode::Learning,
            "advocacy" => ChatMode::Advocacy,
            _ => ChatMode::General,
        })
    }
}
