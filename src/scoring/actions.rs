use serde::{Deserialize, Serialize};

use crate::features::TextFeatures;
use crate::profile::AuthorProfile;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionProbs {
    pub favorite: f64,
    pub reply: f64,
    pub repost: f64,
    pub quote: f64,
    pub click: f64,
    pub profile_click: f64,
    pub share: f64,
    pub bookmark: f64,
    pub dwell: f64,
    pub follow_author: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskProbs {
    pub not_interested: f64,
    pub block: f64,
    pub mute: f64,
    pub report: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActionRate {
    pub fraction: f64,
    pub cap: f64,
}

impl ActionRate {
    pub const fn new(fraction: f64, cap: f64) -> Self {
        Self { fraction, cap }
    }

    pub fn apply(self, base_probability: f64, boost: f64) -> f64 {
        (base_probability * self.fraction * boost).min(self.cap).max(0.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionConfig {
    pub follower_floor: u64,
    pub follower_log_divisor: f64,
    pub engagement_divisor: f64,
    pub base_cap: f64,
    pub favorite: ActionRate,
    pub reply: ActionRate,
    pub repost: ActionRate,
    pub quote: ActionRate,
    pub click: ActionRate,
    pub profile_click: ActionRate,
    pub share: ActionRate,
    pub bookmark: ActionRate,
    pub dwell: ActionRate,
    pub follow_author: ActionRate,
    pub reply_question_boost: f64,
    pub dwell_video_boost: f64,
}

impl Default for ActionConfig {
    fn default() -> Self {
        Self {
            follower_floor: 100,
            follower_log_divisor: 6.0,
            engagement_divisor: 2.0,
            base_cap: 0.95,
            favorite: ActionRate::new(1.0, 0.95),
            reply: ActionRate::new(0.15, 0.70),
            repost: ActionRate::new(0.08, 0.50),
            quote: ActionRate::new(0.03, 0.30),
            click: ActionRate::new(0.40, 0.80),
            profile_click: ActionRate::new(0.12, 0.50),
            share: ActionRate::new(0.05, 0.30),
            bookmark: ActionRate::new(0.04, 0.25),
            dwell: ActionRate::new(0.60, 0.90),
            follow_author: ActionRate::new(0.02, 0.15),
            reply_question_boost: 2.5,
            dwell_video_boost: 1.5,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ActionPredictor {
    config: ActionConfig,
}

impl ActionPredictor {
    pub fn new(config: ActionConfig) -> Self {
        Self { config }
    }

    pub fn follower_factor(&self, profile: &AuthorProfile) -> f64 {
        let followers = profile.followers.max(self.config.follower_floor).max(1);
        (followers as f64).log10() / self.config.follower_log_divisor
    }

    pub fn engagement_factor(&self, profile: &AuthorProfile) -> f64 {
        profile.avg_engagement_rate / self.config.engagement_divisor
    }

    pub fn base_probability(&self, quality_score: f64, profile: &AuthorProfile) -> f64 {
        let raw = quality_score * self.follower_factor(profile) * self.engagement_factor(profile);
        if raw.is_nan() {
            return 0.0;
        }
        raw.min(self.config.base_cap).max(0.0)
    }

    pub fn predict(&self, base_probability: f64, features: &TextFeatures) -> ActionProbs {
        let config = &self.config;
        let reply_boost = if features.has_question {
            config.reply_question_boost
        } else {
            1.0
        };
        let dwell_boost = if features.has_video {
            config.dwell_video_boost
        } else {
            1.0
        };

        ActionProbs {
            favorite: config.favorite.apply(base_probability, 1.0),
            reply: config.reply.apply(base_probability, reply_boost),
            repost: config.repost.apply(base_probability, 1.0),
            quote: config.quote.apply(base_probability, 1.0),
            click: config.click.apply(base_probability, 1.0),
            profile_click: config.profile_click.apply(base_probability, 1.0),
            share: config.share.apply(base_probability, 1.0),
            bookmark: config.bookmark.apply(base_probability, 1.0),
            dwell: config.dwell.apply(base_probability, dwell_boost),
            follow_author: config.follow_author.apply(base_probability, 1.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskRate {
    pub floor: f64,
    pub controversy_bump: f64,
}

impl RiskRate {
    pub const fn new(floor: f64, controversy_bump: f64) -> Self {
        Self {
            floor,
            controversy_bump,
        }
    }

    pub fn apply(self, is_controversial: bool) -> f64 {
        let value = if is_controversial {
            self.floor + self.controversy_bump
        } else {
            self.floor
        };
        value.clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    pub not_interested: RiskRate,
    pub block: RiskRate,
    pub mute: RiskRate,
    pub report: RiskRate,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            not_interested: RiskRate::new(0.05, 0.15),
            block: RiskRate::new(0.01, 0.05),
            mute: RiskRate::new(0.02, 0.08),
            report: RiskRate::new(0.005, 0.02),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RiskPredictor {
    config: RiskConfig,
}

impl RiskPredictor {
    pub fn new(config: RiskConfig) -> Self {
        Self { config }
    }

    pub fn predict(&self, features: &TextFeatures) -> RiskProbs {
        let controversial = features.is_controversial;
        RiskProbs {
            not_interested: self.config.not_interested.apply(controversial),
            block: self.config.block.apply(controversial),
            mute: self.config.mute.apply(controversial),
            report: self.config.report.apply(controversial),
        }
    }
}
