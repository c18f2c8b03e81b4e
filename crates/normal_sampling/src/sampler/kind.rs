//! Strategy identifiers.

use crate::error::SamplingError;
use std::fmt;
use std::str::FromStr;

/// Identifies a sampling strategy.
///
/// # Example
///
/// ```
/// use normal_sampling::sampler::StrategyKind;
///
/// let kind: StrategyKind = "cached-halton".parse().unwrap();
/// assert_eq!(kind, StrategyKind::CachedHalton);
/// assert_eq!(kind.to_string(), "cached-halton");
/// assert!(!kind.supports_dimension(4));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum StrategyKind {
    /// Independent pseudo-random points per box
    Random,
    /// Halton points computed on the fly
    Halton,
    /// Halton points read from a shared cache
    #[default]
    CachedHalton,
    /// Enumeration of box corners (3D only)
    Corner,
}

impl StrategyKind {
    /// All strategies, in declaration order.
    pub const ALL: [StrategyKind; 4] = [
        StrategyKind::Random,
        StrategyKind::Halton,
        StrategyKind::CachedHalton,
        StrategyKind::Corner,
    ];

    /// Return the canonical name.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::Random => "random",
            StrategyKind::Halton => "halton",
            StrategyKind::CachedHalton => "cached-halton",
            StrategyKind::Corner => "corner",
        }
    }

    /// Returns whether the strategy exists for scenarios of `dimension`.
    #[inline]
    pub fn supports_dimension(&self, dimension: usize) -> bool {
        match self {
            StrategyKind::Corner => dimension == 3,
            _ => dimension == 2 || dimension == 3,
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyKind {
    type Err = SamplingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "random" | "basic" => Ok(StrategyKind::Random),
            "halton" => Ok(StrategyKind::Halton),
            "cached-halton" | "cachedhalton" => Ok(StrategyKind::CachedHalton),
            "corner" | "corners" => Ok(StrategyKind::Corner),
            _ => Err(SamplingError::UnknownStrategy(s.to_string())),
        }
    }
}
