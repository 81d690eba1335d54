//! Intelligence-level score adjustment.
//!
//! The level is a 1-5 knob that decides which situational signal may
//! scale a candidate's weighted score. The adjustment is a pure function
//! of the level and a set of precomputed flags, so each level can be
//! tested without a registry.
//!
//! | Level | Name | Multiplier |
//! |-------|------|------------|
//! | 1 | Basic | 1.0 |
//! | 2 | Standard | 0.1 if a large aircraft meets a special bay |
//! | 3 | Advanced | 0.8 if the move has an occupied dependency |
//! | 4 | Expert | 0.7 with a future conflict, else 1.1 |
//! | 5 | Master | 0.6 for low priority in paint, × 1.2 with batch peers |

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Scoring aggressiveness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum IntelligenceLevel {
    Basic = 1,
    Standard = 2,
    #[default]
    Advanced = 3,
    Expert = 4,
    Master = 5,
}

/// Error for a level outside 1..=5.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("intelligence level must be 1..=5, got {0}")]
pub struct InvalidLevel(pub u8);

impl TryFrom<u8> for IntelligenceLevel {
    type Error = InvalidLevel;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Basic),
            2 => Ok(Self::Standard),
            3 => Ok(Self::Advanced),
            4 => Ok(Self::Expert),
            5 => Ok(Self::Master),
            other => Err(InvalidLevel(other)),
        }
    }
}

impl From<IntelligenceLevel> for u8 {
    fn from(level: IntelligenceLevel) -> Self {
        level as u8
    }
}

/// Situational flags the adjustment may look at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModifierSignals {
    /// Large aircraft scored against a special bay.
    pub large_in_special: bool,
    /// The move into the bay has at least one occupied dependency.
    pub occupied_dependency: bool,
    /// Another aircraft arrives between now and this aircraft's departure.
    pub future_conflict: bool,
    /// Low-priority aircraft scored against a paint bay.
    pub low_priority_in_paint: bool,
    /// Another unassigned aircraft shares this aircraft's work type.
    pub batch_peer: bool,
}

impl IntelligenceLevel {
    pub fn name(self) -> &'static str {
        match self {
            Self::Basic => "Basic",
            Self::Standard => "Standard",
            Self::Advanced => "Advanced",
            Self::Expert => "Expert",
            Self::Master => "Master",
        }
    }

    /// Multiplier applied to the weighted score.
    pub fn multiplier(self, signals: &ModifierSignals) -> f64 {
        match self {
            Self::Basic => 1.0,
            Self::Standard => {
                if signals.large_in_special {
                    0.1
                } else {
                    1.0
                }
            }
            Self::Advanced => {
                if signals.occupied_dependency {
                    0.8
                } else {
                    1.0
                }
            }
            Self::Expert => {
                if signals.future_conflict {
                    0.7
                } else {
                    1.1
                }
            }
            Self::Master => {
                let mut m = 1.0;
                if signals.low_priority_in_paint {
                    m *= 0.6;
                }
                if signals.batch_peer {
                    m *= 1.2;
                }
                m
            }
        }
    }
}
