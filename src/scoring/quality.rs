use serde::{Deserialize, Serialize};

use crate::features::TextFeatures;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityConfig {
    pub baseline: f64,
    pub hook_bonus: f64,
    pub absurdity_bonus: f64,
    pub question_bonus: f64,
    pub cta_bonus: f64,
    pub optimal_length_bonus: f64,
    pub optimal_min_words: usize,
    pub optimal_max_words: usize,
    pub video_multiplier: f64,
    pub image_multiplier: f64,
    pub link_penalty: f64,
    pub thread_step: f64,
    pub hashtag_bonus: f64,
    pub hashtag_optimal_max: usize,
    pub hashtag_spam_threshold: usize,
    pub hashtag_penalty: f64,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            baseline: 0.5,
            hook_bonus: 0.15,
            absurdity_bonus: 0.10,
            question_bonus: 0.08,
            cta_bonus: 0.05,
            optimal_length_bonus: 0.10,
            optimal_min_words: 10,
            optimal_max_words: 50,
            video_multiplier: 2.0,
            image_multiplier: 1.5,
            link_penalty: 0.25,
            thread_step: 0.1,
            hashtag_bonus: 0.05,
            hashtag_optimal_max: 2,
            hashtag_spam_threshold: 3,
            hashtag_penalty: 0.10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct QualityScorer {
    config: QualityConfig,
}

impl QualityScorer {
    pub fn new(config: QualityConfig) -> Self {
        Self { config }
    }

    /// Order matters: additive bonuses, then media, link tax, thread, and the
    /// hashtag adjustment last.
    pub fn score(&self, features: &TextFeatures) -> f64 {
        let config = &self.config;
        let mut score = config.baseline;

        if features.has_hook {
            score += config.hook_bonus;
        }
        if features.has_absurdity {
            score += config.absurdity_bonus;
        }
        if features.has_question {
            score += config.question_bonus;
        }
        if features.has_cta {
            score += config.cta_bonus;
        }
        if (config.optimal_min_words..=config.optimal_max_words).contains(&features.word_count) {
            score += config.optimal_length_bonus;
        }

        if features.has_video {
            score *= config.video_multiplier;
        } else if features.has_image {
            score *= config.image_multiplier;
        }

        if features.has_link {
            score *= config.link_penalty;
        }

        if features.is_thread && features.thread_length > 1 {
            score *= 1.0 + features.thread_length as f64 * config.thread_step;
        }

        if (1..=config.hashtag_optimal_max).contains(&features.hashtag_count) {
            score += config.hashtag_bonus;
        } else if features.hashtag_count > config.hashtag_spam_threshold {
            score -= config.hashtag_penalty;
        }

        score
    }
}
