use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::features::{FeatureExtractor, MediaOptions, TextFeatures};
use crate::format::ViralityLevel;
use crate::insights::{Insight, InsightGenerator};
use crate::profile::AuthorProfile;
use crate::scoring::{EngagementEstimator, Prediction};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub features: TextFeatures,
    pub prediction: Prediction,
    pub insights: Vec<Insight>,
}

impl Analysis {
    pub fn level(&self) -> ViralityLevel {
        ViralityLevel::from_score(f64::from(self.prediction.virality_score))
    }
}

#[derive(Debug, Clone, Default)]
pub struct ViralityEngine {
    extractor: FeatureExtractor,
    estimator: EngagementEstimator,
    generator: InsightGenerator,
}

impl ViralityEngine {
    pub fn new(
        extractor: FeatureExtractor,
        estimator: EngagementEstimator,
        generator: InsightGenerator,
    ) -> Self {
        Self {
            extractor,
            estimator,
            generator,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Result<Self, EngineError> {
        Ok(Self::new(
            FeatureExtractor::from_config(&config.patterns)?,
            EngagementEstimator::from_config(config),
            InsightGenerator::from_config(config),
        ))
    }

    pub fn extract(&self, text: &str, options: &MediaOptions) -> TextFeatures {
        self.extractor.extract(text, options)
    }

    pub fn estimate(&self, features: &TextFeatures, profile: &AuthorProfile) -> Prediction {
        self.estimator.estimate(features, profile)
    }

    pub fn generate(&self, features: &TextFeatures, prediction: &Prediction) -> Vec<Insight> {
        self.generator.generate(features, prediction)
    }

    pub fn quality_score(&self, features: &TextFeatures) -> f64 {
        self.estimator.quality_score(features)
    }

    // Blank text gets the all-zero prediction and no insights.
    pub fn analyze(&self, text: &str, options: &MediaOptions, profile: &AuthorProfile) -> Analysis {
        let features = self.extract(text, options);
        let prediction = self.estimate(&features, profile);
        let insights = if features.is_blank() {
            Vec::new()
        } else {
            self.generate(&features, &prediction)
        };

        debug!(
            chars = features.char_count,
            words = features.word_count,
            virality_score = prediction.virality_score,
            insights = insights.len(),
            "analysis complete"
        );

        Analysis {
            features,
            prediction,
            insights,
        }
    }
}
