//! Recommendation (optimizer output) model.

use serde::{Deserialize, Serialize};

use super::{AircraftId, BayId};

/// Lower bound of the confidence range.
pub const MIN_CONFIDENCE: f64 = 60.0;
/// Upper bound of the confidence range.
pub const MAX_CONFIDENCE: f64 = 95.0;

/// A ranked aircraft → bay pairing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub aircraft_id: AircraftId,
    /// Registration, denormalized for display.
    pub registration: String,
    pub bay_id: BayId,
    /// Weighted, intelligence-adjusted score.
    pub score: f64,
    /// Confidence percentage, always within 60..=95.
    pub confidence: f64,
    /// One line per scoring factor.
    pub reasoning: Vec<String>,
    /// 1-based position after ranking (0 before ranking).
    pub rank: usize,
    /// Display sentence, e.g. "Assign B-HNA to Bay 2 (Recommended)".
    pub recommendation: String,
}

/// Qualitative band derived from confidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceBand {
    HighlyRecommended,
    Recommended,
    Consider,
    Alternative,
}

impl ConfidenceBand {
    /// Classifies a confidence percentage.
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence >= 90.0 {
            Self::HighlyRecommended
        } else if confidence >= 75.0 {
            Self::Recommended
        } else if confidence >= 60.0 {
            Self::Consider
        } else {
            Self::Alternative
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::HighlyRecommended => "Highly Recommended",
            Self::Recommended => "Recommended",
            Self::Consider => "Consider",
            Self::Alternative => "Alternative",
        }
    }
}

impl Recommendation {
    /// Creates an unranked recommendation; the display text is filled in
    /// from the confidence band.
    pub fn new(
        aircraft_id: impl Into<AircraftId>,
        registration: impl Into<String>,
        bay_id: impl Into<BayId>,
        score: f64,
        confidence: f64,
        reasoning: Vec<String>,
    ) -> Self {
        let registration = registration.into();
        let bay_id = bay_id.into();
        let recommendation = format!(
            "Assign {registration} to Bay {bay_id} ({})",
            ConfidenceBand::from_confidence(confidence).label()
        );
        Self {
            aircraft_id: aircraft_id.into(),
            registration,
            bay_id,
            score,
            confidence,
            reasoning,
            rank: 0,
            recommendation,
        }
    }

    pub fn band(&self) -> ConfidenceBand {
        ConfidenceBand::from_confidence(self.confidence)
    }
}
