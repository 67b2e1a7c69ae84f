//! Shopper UI preferences persisted on the device.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an unknown layout name.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid layout: {0} (expected `grid` or `list`)")]
pub struct ParseLayoutError(String);

/// Catalog listing layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LayoutPreference {
    #[default]
    Grid,
    List,
}

impl LayoutPreference {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Grid => "grid",
            Self::List => "list",
        }
    }
}

impl fmt::Display for LayoutPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayoutPreference {
    type Err = ParseLayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "grid" => Ok(Self::Grid),
            "list" => Ok(Self::List),
            other => Err(ParseLayoutError(other.to_owned())),
        }
    }
}
