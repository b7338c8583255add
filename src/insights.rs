use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::EngineConfig;
use crate::features::TextFeatures;
use crate::scoring::{Prediction, QualityConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Positive,
    Negative,
    Neutral,
    Warning,
}

impl InsightKind {
    pub fn label(self) -> &'static str {
        match self {
            InsightKind::Positive => "positive",
            InsightKind::Negative => "negative",
            InsightKind::Neutral => "neutral",
            InsightKind::Warning => "warning",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    High,
    Medium,
    Low,
}

impl Impact {
    pub fn label(self) -> &'static str {
        match self {
            Impact::High => "high",
            Impact::Medium => "medium",
            Impact::Low => "low",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    #[serde(rename = "type")]
    pub kind: InsightKind,
    pub title: String,
    pub description: String,
    pub impact: Impact,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub algorithm_reference: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightConfig {
    pub not_interested_threshold: f64,
    pub block_threshold: f64,
    pub bookmark_threshold: f64,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            not_interested_threshold: 0.1,
            block_threshold: 0.03,
            bookmark_threshold: 0.02,
        }
    }
}

pub struct RuleContext<'a> {
    pub features: &'a TextFeatures,
    pub prediction: &'a Prediction,
    pub config: &'a InsightConfig,
    pub hashtag_spam_threshold: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsightTemplate {
    pub kind: InsightKind,
    pub title: &'static str,
    pub description: &'static str,
    pub impact: Impact,
    pub reference: Option<&'static str>,
}

impl InsightTemplate {
    pub fn render(&self) -> Insight {
        Insight {
            kind: self.kind,
            title: self.title.to_string(),
            description: self.description.to_string(),
            impact: self.impact,
            algorithm_reference: self.reference.map(str::to_string),
        }
    }
}

pub type RuleCondition = fn(&RuleContext<'_>) -> bool;

#[derive(Clone, Copy)]
pub struct InsightRule {
    pub name: &'static str,
    pub condition: RuleCondition,
    pub template: InsightTemplate,
}

impl fmt::Debug for InsightRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InsightRule")
            .field("name", &self.name)
            .field("template", &self.template)
            .finish()
    }
}

impl InsightRule {
    pub fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<Insight> {
        (self.condition)(ctx).then(|| self.template.render())
    }
}

fn has_hook(ctx: &RuleContext<'_>) -> bool {
    ctx.features.has_hook
}

fn missing_hook(ctx: &RuleContext<'_>) -> bool {
    !ctx.features.has_hook
}

fn has_video(ctx: &RuleContext<'_>) -> bool {
    ctx.features.has_video
}

fn text_only(ctx: &RuleContext<'_>) -> bool {
    !ctx.features.has_media()
}

fn has_link(ctx: &RuleContext<'_>) -> bool {
    ctx.features.has_link
}

fn has_question(ctx: &RuleContext<'_>) -> bool {
    ctx.features.has_question
}

fn missing_question(ctx: &RuleContext<'_>) -> bool {
    !ctx.features.has_question
}

fn is_controversial(ctx: &RuleContext<'_>) -> bool {
    ctx.features.is_controversial
}

fn no_hashtags(ctx: &RuleContext<'_>) -> bool {
    ctx.features.hashtag_count == 0
}

fn too_many_hashtags(ctx: &RuleContext<'_>) -> bool {
    ctx.features.hashtag_count > ctx.hashtag_spam_threshold
}

fn has_absurdity(ctx: &RuleContext<'_>) -> bool {
    ctx.features.has_absurdity
}

fn multi_post_thread(ctx: &RuleContext<'_>) -> bool {
    ctx.features.is_thread && ctx.features.thread_length > 1
}

fn has_mentions(ctx: &RuleContext<'_>) -> bool {
    ctx.features.mention_count > 0
}

fn always(_: &RuleContext<'_>) -> bool {
    true
}

fn negative_signal_risk(ctx: &RuleContext<'_>) -> bool {
    let risks = &ctx.prediction.risks;
    risks.not_interested > ctx.config.not_interested_threshold
        || risks.block > ctx.config.block_threshold
}

fn low_bookmark_odds(ctx: &RuleContext<'_>) -> bool {
    ctx.prediction.actions.bookmark < ctx.config.bookmark_threshold
}

pub const STANDARD_RULES: [InsightRule; 16] = [
    InsightRule {
        name: "hook",
        condition: has_hook,
        template: InsightTemplate {
            kind: InsightKind::Positive,
            title: "Strong Hook Detected",
            description: "Your opening creates curiosity. Hooks spike initial dwell time, triggering the engagement snowball.",
            impact: Impact::High,
            reference: Some("Dwell score + early engagement signals"),
        },
    },
    InsightRule {
        name: "missing_hook",
        condition: missing_hook,
        template: InsightTemplate {
            kind: InsightKind::Neutral,
            title: "Consider a Stronger Hook",
            description: "Start with a pattern interrupt, number, or provocative statement to stop the scroll.",
            impact: Impact::High,
            reference: None,
        },
    },
    InsightRule {
        name: "video",
        condition: has_video,
        template: InsightTemplate {
            kind: InsightKind::Positive,
            title: "Video Content Bonus",
            description: "Videos spike dwell time and p(video_view). Looping clips are especially effective for the algorithm.",
            impact: Impact::High,
            reference: Some("VQV_WEIGHT applies when video > 6s duration"),
        },
    },
    InsightRule {
        name: "text_only",
        condition: text_only,
        template: InsightTemplate {
            kind: InsightKind::Warning,
            title: "Text-Only May Get Buried",
            description: "The algorithm favors media-rich content. Video demos are non-negotiable for maximum reach.",
            impact: Impact::High,
            reference: Some("Photo expand and VQV scores missing"),
        },
    },
    InsightRule {
        name: "link_tax",
        condition: has_link,
        template: InsightTemplate {
            kind: InsightKind::Negative,
            title: "Link Tax Applied",
            description: "Outbound links reduce reach by ~75%. Move links to bio or first reply instead.",
            impact: Impact::High,
            reference: Some("Algorithm penalizes exits from platform"),
        },
    },
    InsightRule {
        name: "conversation_bait",
        condition: has_question,
        template: InsightTemplate {
            kind: InsightKind::Positive,
            title: "Conversation Bait Detected",
            description: "Questions drive replies, and reply_score has massive weight (27x). Smart move.",
            impact: Impact::High,
            reference: Some("REPLY_WEIGHT is 27x FAVORITE_WEIGHT"),
        },
    },
    InsightRule {
        name: "missing_conversation_bait",
        condition: missing_question,
        template: InsightTemplate {
            kind: InsightKind::Neutral,
            title: "Add Conversation Bait",
            description: "End with a question or invite opinions. Replies weight 27x more than likes in ranking.",
            impact: Impact::High,
            reference: None,
        },
    },
    InsightRule {
        name: "polarizing",
        condition: is_controversial,
        template: InsightTemplate {
            kind: InsightKind::Warning,
            title: "Polarizing Content Risk",
            description: "Controversial takes can hijack your embeddings toward drama clusters. This affects future distribution permanently.",
            impact: Impact::High,
            reference: Some("SimCluster lock-in from negative signals"),
        },
    },
    InsightRule {
        name: "no_hashtags",
        condition: no_hashtags,
        template: InsightTemplate {
            kind: InsightKind::Neutral,
            title: "Consider 1-2 Hashtags",
            description: "Strategic hashtags help discovery. Avoid more than 2 as it triggers spam signals.",
            impact: Impact::Low,
            reference: None,
        },
    },
    InsightRule {
        name: "too_many_hashtags",
        condition: too_many_hashtags,
        template: InsightTemplate {
            kind: InsightKind::Negative,
            title: "Too Many Hashtags",
            description: "Excessive hashtags signal spam. Reduce to 1-2 relevant ones max.",
            impact: Impact::Medium,
            reference: None,
        },
    },
    InsightRule {
        name: "absurdity",
        condition: has_absurdity,
        template: InsightTemplate {
            kind: InsightKind::Positive,
            title: "Absurdity Factor",
            description: "Unusual/absurd content spikes initial dwell and sets up the engagement snowball.",
            impact: Impact::Medium,
            reference: Some("Dwell time multiplier"),
        },
    },
    InsightRule {
        name: "thread",
        condition: multi_post_thread,
        template: InsightTemplate {
            kind: InsightKind::Positive,
            title: "Thread Format",
            description: "Threads increase total dwell time and create multiple engagement touchpoints.",
            impact: Impact::Medium,
            reference: None,
        },
    },
    InsightRule {
        name: "mentions",
        condition: has_mentions,
        template: InsightTemplate {
            kind: InsightKind::Positive,
            title: "Power User Potential",
            description: "Engaging power users can amplify your signal disproportionately. Add real value in their threads.",
            impact: Impact::Medium,
            reference: Some("Network effects through engaged followers"),
        },
    },
    InsightRule {
        name: "reply_fast",
        condition: always,
        template: InsightTemplate {
            kind: InsightKind::Neutral,
            title: "Reply to Your Own Post Fast",
            description: "Reply to your own tweet immediately. A reply + your response is the strongest signal (75x) and trains the transformer on your content.",
            impact: Impact::High,
            reference: Some("REPLY_CHAIN_MULTIPLIER in scoring"),
        },
    },
    InsightRule {
        name: "negative_signal_risk",
        condition: negative_signal_risk,
        template: InsightTemplate {
            kind: InsightKind::Warning,
            title: "High Negative Signal Risk",
            description: "This content may trigger blocks/mutes. Negatives hit small accounts way harder - one salty wave = semi-permanent suppression.",
            impact: Impact::High,
            reference: Some("BLOCK_AUTHOR_WEIGHT: -74, REPORT_WEIGHT: -369"),
        },
    },
    InsightRule {
        name: "bookmark_worthy",
        condition: low_bookmark_odds,
        template: InsightTemplate {
            kind: InsightKind::Neutral,
            title: "Make It Bookmark-Worthy",
            description: "Bookmarks are 50x multipliers. If your post isn't worth referencing later, it's invisible to the algorithm.",
            impact: Impact::High,
            reference: Some("Save/Bookmark is weighted 50x in scoring"),
        },
    },
];

#[derive(Debug, Clone)]
pub struct InsightGenerator {
    rules: Vec<InsightRule>,
    config: InsightConfig,
    // Shared with the quality score so the penalty and the advice agree.
    hashtag_spam_threshold: usize,
}

impl Default for InsightGenerator {
    fn default() -> Self {
        Self::new(InsightConfig::default())
    }
}

impl InsightGenerator {
    pub fn new(config: InsightConfig) -> Self {
        Self::with_rules(STANDARD_RULES.to_vec(), config)
    }

    pub fn with_rules(rules: Vec<InsightRule>, config: InsightConfig) -> Self {
        Self {
            rules,
            config,
            hashtag_spam_threshold: QualityConfig::default().hashtag_spam_threshold,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.insights.clone())
            .with_hashtag_spam_threshold(config.quality.hashtag_spam_threshold)
    }

    pub fn with_hashtag_spam_threshold(mut self, threshold: usize) -> Self {
        self.hashtag_spam_threshold = threshold;
        self
    }

    pub fn rules(&self) -> &[InsightRule] {
        &self.rules
    }

    pub fn generate(&self, features: &TextFeatures, prediction: &Prediction) -> Vec<Insight> {
        let ctx = RuleContext {
            features,
            prediction,
            config: &self.config,
            hashtag_spam_threshold: self.hashtag_spam_threshold,
        };
        self.rules.iter().filter_map(|rule| rule.evaluate(&ctx)).collect()
    }
}
