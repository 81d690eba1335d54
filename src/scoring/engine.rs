//! Weighted bay scorer.
//!
//! Combines scoring factors into one total, applies the intelligence
//! multiplier and derives a confidence percentage.

use std::sync::Arc;

use super::{IntelligenceLevel, ScoringContext, ScoringFactor};
use super::factors::{Efficiency, MovementCost, PriorityHandling, WorkTypeMatch};
use crate::models::{Aircraft, Bay, MAX_CONFIDENCE, MIN_CONFIDENCE};

#[derive(Clone)]
struct WeightedFactor {
    factor: Arc<dyn ScoringFactor>,
    weight: f64,
}

/// Result of scoring one (aircraft, bay) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct BayScore {
    /// Weighted sum after the intelligence multiplier.
    pub total: f64,
    /// Weighted sum before the multiplier.
    pub base: f64,
    /// Multiplier applied for the intelligence level.
    pub multiplier: f64,
    /// `clamp(total * 10, 60, 95)`.
    pub confidence: f64,
    /// One line per factor, e.g. "Efficiency: 8.0/10".
    pub reasoning: Vec<String>,
}

/// A weighted, composable bay scorer.
///
/// # Example
/// ```
/// use hangar_bay::scoring::BayScorer;
///
/// let scorer = BayScorer::standard();
/// assert_eq!(scorer.factor_names(), vec![
///     "Work type match", "Priority handling", "Efficiency", "Cost efficiency",
/// ]);
/// ```
#[derive(Clone)]
pub struct BayScorer {
    factors: Vec<WeightedFactor>,
}

impl BayScorer {
    /// Creates a scorer with no factors.
    pub fn new() -> Self {
        Self {
            factors: Vec::new(),
        }
    }

    /// The four standard factors weighted 0.4 / 0.3 / 0.2 / 0.1.
    pub fn standard() -> Self {
        Self::new()
            .with_weighted_factor(WorkTypeMatch, 0.4)
            .with_weighted_factor(PriorityHandling, 0.3)
            .with_weighted_factor(Efficiency, 0.2)
            .with_weighted_factor(MovementCost, 0.1)
    }

    /// Adds a weighted factor.
    pub fn with_weighted_factor<F: ScoringFactor + 'static>(mut self, factor: F, weight: f64) -> Self {
        self.factors.push(WeightedFactor {
            factor: Arc::new(factor),
            weight,
        });
        self
    }

    /// Factor labels, in evaluation order.
    pub fn factor_names(&self) -> Vec<&'static str> {
        self.factors.iter().map(|wf| wf.factor.name()).collect()
    }

    /// Scores `aircraft` against `bay`.
    pub fn score(
        &self,
        aircraft: &Aircraft,
        bay: &Bay,
        context: &ScoringContext<'_>,
        level: IntelligenceLevel,
    ) -> BayScore {
        let mut base = 0.0;
        let mut reasoning = Vec::with_capacity(self.factors.len() + 1);

        for wf in &self.factors {
            let value = wf.factor.evaluate(aircraft, bay, context);
            base += value * wf.weight;
            reasoning.push(format!("{}: {value:.1}/10", wf.factor.name()));
        }

        let multiplier = level.multiplier(&context.signals(aircraft, bay));
        if (multiplier - 1.0).abs() > 1e-9 {
            reasoning.push(format!("{} adjustment: x{multiplier:.2}", level.name()));
        }

        let total = base * multiplier;
        BayScore {
            total,
            base,
            multiplier,
            confidence: (total * 10.0).clamp(MIN_CONFIDENCE, MAX_CONFIDENCE),
            reasoning,
        }
    }
}

impl Default for BayScorer {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for BayScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let factors: Vec<_> = self
            .factors
            .iter()
            .map(|wf| format!("{}(w={:.2})", wf.factor.name(), wf.weight))
            .collect();
        f.debug_struct("BayScorer").field("factors", &factors).finish()
    }
}
