pub mod actions;
pub mod estimator;
pub mod quality;
pub mod reach;
pub mod weighted;

pub use actions::{
    ActionConfig, ActionPredictor, ActionProbs, ActionRate, RiskConfig, RiskPredictor, RiskProbs,
    RiskRate,
};
pub use estimator::{EngagementEstimator, Prediction};
pub use quality::{QualityConfig, QualityScorer};
pub use reach::{CountEstimate, PredictedCounts, ReachConfig, ReachProjector};
pub use weighted::{ActionWeights, WeightedScorer};
