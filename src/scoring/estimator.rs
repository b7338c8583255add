use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::EngineConfig;
use crate::features::TextFeatures;
use crate::profile::AuthorProfile;
use crate::scoring::{
    ActionPredictor, ActionProbs, PredictedCounts, QualityScorer, ReachProjector, RiskPredictor,
    RiskProbs, WeightedScorer,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub virality_score: u8,
    pub normalized_score: f64,
    pub weighted_score: f64,
    pub quality_score: f64,
    pub base_probability: f64,
    pub actions: ActionProbs,
    pub risks: RiskProbs,
    pub counts: PredictedCounts,
}

#[derive(Debug, Clone)]
pub struct EngagementEstimator {
    quality: QualityScorer,
    actions: ActionPredictor,
    risks: RiskPredictor,
    scorer: WeightedScorer,
    reach: ReachProjector,
}

impl Default for EngagementEstimator {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

impl EngagementEstimator {
    pub fn new(
        quality: QualityScorer,
        actions: ActionPredictor,
        risks: RiskPredictor,
        scorer: WeightedScorer,
        reach: ReachProjector,
    ) -> Self {
        Self {
            quality,
            actions,
            risks,
            scorer,
            reach,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(
            QualityScorer::new(config.quality.clone()),
            ActionPredictor::new(config.actions.clone()),
            RiskPredictor::new(config.risks.clone()),
            WeightedScorer::new(config.weights.clone()),
            ReachProjector::new(config.reach.clone()),
        )
    }

    pub fn quality_score(&self, features: &TextFeatures) -> f64 {
        self.quality.score(features)
    }

    pub fn estimate(&self, features: &TextFeatures, profile: &AuthorProfile) -> Prediction {
        if features.is_blank() {
            return Prediction::default();
        }

        let profile = profile.sanitized();
        let quality_score = self.quality.score(features);
        let base_probability = self.actions.base_probability(quality_score, &profile);

        let actions = self.actions.predict(base_probability, features);
        let risks = self.risks.predict(features);

        let weighted_score = self.scorer.score(&actions, &risks);
        let normalized_score = self.reach.normalize(weighted_score);
        let counts = self.reach.project(profile.followers, normalized_score, &actions);
        let virality_score = normalized_score.round().clamp(0.0, 100.0) as u8;

        debug!(
            quality_score,
            base_probability,
            weighted_score,
            virality_score,
            expected_views = counts.views.expected,
            "estimated engagement"
        );

        Prediction {
            virality_score,
            normalized_score,
            weighted_score,
            quality_score,
            base_probability,
            actions,
            risks,
            counts,
        }
    }
}
