
use serde::Serialize;
use std::str::FromStr;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum OrientationError {
    #[error("invalid reversal character cannot be parsed: {symbol:?}")]
    MalformedOrientationSymbol { symbol: String },
}

/// Orientation of a segment within a link, GFA uses '+' and '-'
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, strum_macros::Display)]
pub enum Orientation {
    /// '+', read in the original direction
    #[default]
    #[strum(serialize = "+")]
    #[serde(rename = "+")]
    Forward,
    /// '-', read reverse-complemented
    #[strum(serialize = "-")]
    #[serde(rename = "-")]
    Reverse
}

impl FromStr for Orientation {
    type Err = OrientationError;

    fn from_str(symbol: &str) -> Result<Self, Self::Err> {
        match symbol {
            "+" => Ok(Orientation::Forward),
            "-" => Ok(Orientation::Reverse),
            _ => Err(OrientationError::MalformedOrientationSymbol { symbol: symbol.to_string() })
        }
    }
}

impl Orientation {
    /// Returns true if the walk over this sequence runs backwards
    pub fn is_reverse(&self) -> bool {
        match self {
            Orientation::Forward => false,
            Orientation::Reverse => true
        }
    }
}
