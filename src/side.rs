use std::fmt;
use std::str::FromStr;

/// One of a market's two opposing pools.
///
/// On chain this is the `position` bool: `true` is YES.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Yes,
    No,
}

impl Side {
    /// The contract's `position` argument.
    pub fn as_position(&self) -> bool {
        matches!(self, Side::Yes)
    }

    pub fn from_position(position: bool) -> Side {
        if position {
            Side::Yes
        } else {
            Side::No
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Yes => write!(f, "YES"),
            Side::No => write!(f, "NO"),
        }
    }
}

impl FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yes" | "y" | "true" => Ok(Side::Yes),
            "no" | "n" | "false" => Ok(Side::No),
            other => Err(format!("expected yes or no, got {:?}", other)),
        }
    }
}
