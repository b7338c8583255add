use serde::{Deserialize, Serialize};

use crate::scoring::ActionProbs;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReachConfig {
    pub score_span: f64,
    pub score_midpoint: f64,
    pub base_reach: f64,
    pub virality_reach: f64,
    pub viral_threshold: f64,
    pub viral_exponent: i32,
    pub viral_scale: f64,
    pub like_conversion: f64,
    pub repost_conversion: f64,
    pub reply_conversion: f64,
    pub bookmark_conversion: f64,
    pub variance: f64,
}

impl Default for ReachConfig {
    fn default() -> Self {
        Self {
            score_span: 100.0,
            score_midpoint: 50.0,
            base_reach: 0.1,
            virality_reach: 0.5,
            viral_threshold: 0.7,
            viral_exponent: 3,
            viral_scale: 10.0,
            like_conversion: 0.05,
            repost_conversion: 0.02,
            reply_conversion: 0.01,
            bookmark_conversion: 0.005,
            variance: 0.4,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountEstimate {
    pub min: u64,
    pub expected: u64,
    pub max: u64,
}

impl CountEstimate {
    pub fn with_variance(expected: u64, variance: f64) -> Self {
        let variance = variance.clamp(0.0, 1.0);
        let value = expected as f64;
        Self {
            min: round_count(value * (1.0 - variance)),
            expected,
            max: round_count(value * (1.0 + variance)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictedCounts {
    pub views: CountEstimate,
    pub likes: CountEstimate,
    pub reposts: CountEstimate,
    pub replies: CountEstimate,
    pub bookmarks: CountEstimate,
}

#[derive(Debug, Clone)]
pub struct ReachProjector {
    config: ReachConfig,
}

impl ReachProjector {
    pub fn new(config: ReachConfig) -> Self {
        Self { config }
    }

    pub fn normalize(&self, weighted_score: f64) -> f64 {
        let normalized = weighted_score / self.config.score_span * 100.0 + self.config.score_midpoint;
        if normalized.is_nan() {
            return 0.0;
        }
        normalized.clamp(0.0, 100.0)
    }

    pub fn viral_multiplier(&self, virality_factor: f64) -> f64 {
        if virality_factor > self.config.viral_threshold {
            virality_factor.powi(self.config.viral_exponent) * self.config.viral_scale
        } else {
            1.0
        }
    }

    pub fn expected_views(&self, followers: u64, normalized_score: f64) -> u64 {
        let virality_factor = normalized_score / 100.0;
        let base_views =
            followers as f64 * (self.config.base_reach + virality_factor * self.config.virality_reach);
        round_count(base_views * self.viral_multiplier(virality_factor))
    }

    pub fn project(&self, followers: u64, normalized_score: f64, actions: &ActionProbs) -> PredictedCounts {
        let config = &self.config;
        let views = self.expected_views(followers, normalized_score);
        let view_count = views as f64;

        let likes = round_count(view_count * actions.favorite * config.like_conversion);
        let reposts = round_count(view_count * actions.repost * config.repost_conversion);
        let replies = round_count(view_count * actions.reply * config.reply_conversion);
        let bookmarks = round_count(view_count * actions.bookmark * config.bookmark_conversion);

        PredictedCounts {
            views: CountEstimate::with_variance(views, config.variance),
            likes: CountEstimate::with_variance(likes, config.variance),
            reposts: CountEstimate::with_variance(reposts, config.variance),
            replies: CountEstimate::with_variance(replies, config.variance),
            bookmarks: CountEstimate::with_variance(bookmarks, config.variance),
        }
    }
}

fn round_count(value: f64) -> u64 {
    if value.is_nan() {
        return 0;
    }
    value.round().max(0.0) as u64
}
