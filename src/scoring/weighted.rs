use serde::{Deserialize, Serialize};

use crate::scoring::{ActionProbs, RiskProbs};

/// Ranking weights per action. Negative-feedback weights are stored signed;
/// only their magnitude is used.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionWeights {
    pub favorite: f64,
    pub reply: f64,
    pub repost: f64,
    pub quote: f64,
    pub click: f64,
    pub profile_click: f64,
    pub share: f64,
    pub dwell: f64,
    pub follow_author: f64,
    pub bookmark: f64,
    pub bookmark_scale: f64,
    pub not_interested: f64,
    pub block: f64,
    pub mute: f64,
    pub report: f64,
}

impl Default for ActionWeights {
    fn default() -> Self {
        Self {
            favorite: 1.0,
            reply: 27.0,
            repost: 1.0,
            quote: 1.0,
            click: 0.5,
            profile_click: 1.0,
            share: 1.0,
            dwell: 1.0,
            follow_author: 4.0,
            bookmark: 50.0,
            bookmark_scale: 0.01,
            not_interested: -74.0,
            block: -74.0,
            mute: -74.0,
            report: -369.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct WeightedScorer {
    weights: ActionWeights,
}

impl WeightedScorer {
    pub fn new(weights: ActionWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &ActionWeights {
        &self.weights
    }

    pub fn positive(&self, actions: &ActionProbs) -> f64 {
        let mut score = 0.0;

        score += actions.favorite * self.weights.favorite;
        score += actions.reply * self.weights.reply;
        score += actions.repost * self.weights.repost;
        score += actions.quote * self.weights.quote;
        score += actions.click * self.weights.click;
        score += actions.profile_click * self.weights.profile_click;
        score += actions.share * self.weights.share;
        score += actions.dwell * self.weights.dwell;
        score += actions.follow_author * self.weights.follow_author;
        score += actions.bookmark * self.weights.bookmark * self.weights.bookmark_scale;

        score
    }

    pub fn negative(&self, risks: &RiskProbs) -> f64 {
        let mut score = 0.0;

        score += risks.not_interested * self.weights.not_interested.abs();
        score += risks.block * self.weights.block.abs();
        score += risks.mute * self.weights.mute.abs();
        score += risks.report * self.weights.report.abs();

        score
    }

    pub fn score(&self, actions: &ActionProbs, risks: &RiskProbs) -> f64 {
        self.positive(actions) - self.negative(risks)
    }
}
