use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Language the input phrase is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "english")]
    English,
    #[serde(rename = "arabiJuba")]
    ArabiJuba,
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Direction::English => Direction::ArabiJuba,
            Direction::ArabiJuba => Direction::English,
        }
    }

    /// Wire literal, as sent by clients
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::English => "english",
            Direction::ArabiJuba => "arabiJuba",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDirectionError(pub String);

impl fmt::Display for ParseDirectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown source language '{}', expected 'english' or 'arabiJuba'",
            self.0
        )
    }
}

impl std::error::Error for ParseDirectionError {}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "english" => Ok(Direction::English),
            // CLI spelling
            "arabiJuba" | "arabi-juba" => Ok(Direction::ArabiJuba),
            other => Err(ParseDirectionError(other.to_string())),
        }
    }
}
