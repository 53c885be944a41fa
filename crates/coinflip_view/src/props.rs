//! Coin flip inputs and the visual state derived from them
//!
//! The caller owns the props and passes them in on every render. The view
//! never mutates them and keeps nothing between renders.

use crate::error::ParseFlipResultError;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Outcome of a flip, decided outside this crate
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlipResult {
    Heads,
    Tails,
}

impl FlipResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlipResult::Heads => "heads",
            FlipResult::Tails => "tails",
        }
    }

    /// Parse a result, treating anything unrecognized as absent
    pub fn parse_lenient(value: &str) -> Option<Self> {
        value.parse().ok()
    }
}

impl FromStr for FlipResult {
    type Err = ParseFlipResultError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "heads" => Ok(FlipResult::Heads),
            "tails" => Ok(FlipResult::Tails),
            other => Err(ParseFlipResultError(other.to_string())),
        }
    }
}

impl fmt::Display for FlipResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inputs to `CoinFlipView::render`
///
/// `result` only matters while `is_flipping` is false.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CoinFlipProps {
    #[serde(alias = "isFlipping")]
    pub is_flipping: bool,
    #[serde(default, deserialize_with = "deserialize_lenient_result")]
    pub result: Option<FlipResult>,
}

impl CoinFlipProps {
    pub fn new(is_flipping: bool, result: Option<FlipResult>) -> Self {
        Self {
            is_flipping,
            result,
        }
    }

    /// Neither flipping nor settled
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn flipping() -> Self {
        Self::new(true, None)
    }

    pub fn settled(result: FlipResult) -> Self {
        Self::new(false, Some(result))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawResult {
    Text(String),
    Other(#[allow(dead_code)] IgnoredAny),
}

/// Values outside the two-valued enum (unknown strings, numbers, objects)
/// deserialize to `None` instead of failing the whole props object.
fn deserialize_lenient_result<'de, D>(deserializer: D) -> Result<Option<FlipResult>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawResult>::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawResult::Text(text)) => {
            let parsed = FlipResult::parse_lenient(&text);
            if parsed.is_none() {
                tracing::debug!("ignoring unknown flip result {:?}", text);
            }
            parsed
        }
        Some(RawResult::Other(_)) | None => None,
    })
}

/// The three visual states of the coin
///
/// Derived from props alone; transitions happen only when the caller
/// changes props.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "state", content = "result", rename_all = "snake_case")]
pub enum VisualState {
    /// Not flipping and no result
    Idle,
    /// Flipping; any result is ignored
    Flipping,
    /// Not flipping, showing a result
    Settled(FlipResult),
}

impl VisualState {
    pub fn from_props(props: &CoinFlipProps) -> Self {
        if props.is_flipping {
            return VisualState::Flipping;
        }
        match props.result {
            Some(result) => VisualState::Settled(result),
            None => VisualState::Idle,
        }
    }

    pub fn is_flipping(&self) -> bool {
        matches!(self, VisualState::Flipping)
    }
}

impl From<&CoinFlipProps> for VisualState {
    fn from(props: &CoinFlipProps) -> Self {
        Self::from_props(props)
    }
}
