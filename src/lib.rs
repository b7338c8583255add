pub mod config;
pub mod error;
pub mod features;
pub mod format;
pub mod insights;
pub mod pipeline;
pub mod profile;
pub mod scoring;

use std::sync::LazyLock;

pub use crate::config::EngineConfig;
pub use crate::error::EngineError;
pub use crate::features::{FeatureExtractor, MediaOptions, PatternConfig, PatternSet, TextFeatures};
pub use crate::format::{format_float, format_number, format_percent, ViralityLevel};
pub use crate::insights::{Impact, Insight, InsightConfig, InsightGenerator, InsightKind, InsightRule};
pub use crate::pipeline::{Analysis, ViralityEngine};
pub use crate::profile::{AuthorProfile, Niche, PostFrequency};
pub use crate::scoring::{
    ActionProbs, ActionWeights, CountEstimate, EngagementEstimator, PredictedCounts, Prediction,
    RiskProbs,
};

static DEFAULT_ENGINE: LazyLock<ViralityEngine> = LazyLock::new(ViralityEngine::default);

pub fn extract(text: &str, options: &MediaOptions) -> TextFeatures {
    DEFAULT_ENGINE.extract(text, options)
}

pub fn estimate(features: &TextFeatures, profile: &AuthorProfile) -> Prediction {
    DEFAULT_ENGINE.estimate(features, profile)
}

pub fn generate(features: &TextFeatures, prediction: &Prediction) -> Vec<Insight> {
    DEFAULT_ENGINE.generate(features, prediction)
}

pub fn analyze(text: &str, options: &MediaOptions, profile: &AuthorProfile) -> Analysis {
    DEFAULT_ENGINE.analyze(text, options, profile)
}

pub fn virality_level(score: f64) -> ViralityLevel {
    ViralityLevel::from_score(score)
}
