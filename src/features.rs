use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::error::EngineError;

static URL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"https?://[^\s]+").unwrap());
static HASHTAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#[A-Za-z0-9_]+").unwrap());
static MENTION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"@[A-Za-z0-9_]+").unwrap());
static EMOJI_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"[\x{1F600}-\x{1F64F}\x{1F300}-\x{1F5FF}\x{1F680}-\x{1F6FF}\x{1F1E0}-\x{1F1FF}\x{2600}-\x{26FF}\x{2700}-\x{27BF}]",
    )
    .unwrap()
});

static STANDARD_PATTERNS: LazyLock<PatternSet> = LazyLock::new(|| {
    PatternSet::compile(&PatternConfig::default()).expect("built-in vocabulary patterns compile")
});

/// Hook patterns are expected to be anchored with `^`; the others match anywhere.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternConfig {
    pub hook: Vec<String>,
    pub absurdity: Vec<String>,
    pub controversy: Vec<String>,
    pub cta: Vec<String>,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            hook: strings(&[
                r"(?i)^(here's|here is|this is|i just|just|wow|breaking|unpopular opinion|hot take|thread|🧵)",
                r"(?i)^(the truth about|nobody talks about|what they don't tell you|secret|revealed)",
                r"(?i)^(stop|don't|never|always|you need to|you have to|you should)",
                r"(?i)^\d+\s*(things|ways|reasons|tips|tricks|secrets|lessons)",
            ]),
            absurdity: strings(&[
                r"(?i)fireplace|warmer|bizarre|crazy|insane|wild|unhinged",
                r"🔥|💀|😭|🤯|😱",
            ]),
            controversy: strings(&[
                r"(?i)politics|political|democrat|republican|liberal|conservative",
                r"(?i)controversy|controversial|debate|fight|war|hate|love it or hate",
            ]),
            cta: strings(&[
                r"(?i)follow|retweet|rt|share|like|comment|reply|subscribe|join|click|tap|check out",
                r"(?i)link in bio|dm me|let me know|what do you think|thoughts\?",
            ]),
        }
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

#[derive(Debug, Clone)]
pub struct PatternSet {
    hook: Vec<Regex>,
    absurdity: Vec<Regex>,
    controversy: Vec<Regex>,
    cta: Vec<Regex>,
}

impl PatternSet {
    pub fn compile(config: &PatternConfig) -> Result<Self, EngineError> {
        Ok(Self {
            hook: compile_group("hook", &config.hook)?,
            absurdity: compile_group("absurdity", &config.absurdity)?,
            controversy: compile_group("controversy", &config.controversy)?,
            cta: compile_group("cta", &config.cta)?,
        })
    }

    pub fn standard() -> Self {
        STANDARD_PATTERNS.clone()
    }
}

fn compile_group(group: &'static str, patterns: &[String]) -> Result<Vec<Regex>, EngineError> {
    patterns
        .iter()
        .map(|pattern| {
            Regex::new(pattern).map_err(|source| EngineError::InvalidPattern {
                group,
                pattern: pattern.clone(),
                source,
            })
        })
        .collect()
}

fn any_match(patterns: &[Regex], text: &str) -> bool {
    patterns.iter().any(|re| re.is_match(text))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaOptions {
    pub has_video: bool,
    pub has_image: bool,
    pub is_thread: bool,
    pub thread_length: usize,
}

impl Default for MediaOptions {
    fn default() -> Self {
        Self {
            has_video: false,
            has_image: false,
            is_thread: false,
            thread_length: 1,
        }
    }
}

impl MediaOptions {
    pub fn with_video(mut self) -> Self {
        self.has_video = true;
        self
    }

    pub fn with_image(mut self) -> Self {
        self.has_image = true;
        self
    }

    pub fn thread(mut self, length: usize) -> Self {
        self.is_thread = true;
        self.thread_length = length;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextFeatures {
    pub text: String,
    pub has_video: bool,
    pub has_image: bool,
    pub has_link: bool,
    pub has_hashtags: bool,
    pub hashtag_count: usize,
    pub has_question: bool,
    pub has_cta: bool,
    pub word_count: usize,
    pub char_count: usize,
    pub is_thread: bool,
    pub thread_length: usize,
    pub has_emoji: bool,
    pub emoji_count: usize,
    pub has_mention: bool,
    pub mention_count: usize,
    pub is_controversial: bool,
    /// Never detected; there is not enough context in a single post.
    pub is_niche: bool,
    pub has_hook: bool,
    pub has_absurdity: bool,
}

impl TextFeatures {
    pub fn blank(text: &str) -> Self {
        Self {
            text: text.to_string(),
            has_video: false,
            has_image: false,
            has_link: false,
            has_hashtags: false,
            hashtag_count: 0,
            has_question: false,
            has_cta: false,
            word_count: 0,
            char_count: 0,
            is_thread: false,
            thread_length: 1,
            has_emoji: false,
            emoji_count: 0,
            has_mention: false,
            mention_count: 0,
            is_controversial: false,
            is_niche: false,
            has_hook: false,
            has_absurdity: false,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    pub fn has_media(&self) -> bool {
        self.has_video || self.has_image
    }
}

#[derive(Debug, Clone)]
pub struct FeatureExtractor {
    patterns: PatternSet,
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self::new(PatternSet::standard())
    }
}

impl FeatureExtractor {
    pub fn new(patterns: PatternSet) -> Self {
        Self { patterns }
    }

    pub fn from_config(config: &PatternConfig) -> Result<Self, EngineError> {
        Ok(Self::new(PatternSet::compile(config)?))
    }

    pub fn extract(&self, text: &str, options: &MediaOptions) -> TextFeatures {
        if text.trim().is_empty() {
            return TextFeatures::blank(text);
        }

        let links = URL_RE.find_iter(text).count();
        let hashtag_count = HASHTAG_RE.find_iter(text).count();
        let mention_count = MENTION_RE.find_iter(text).count();
        let emoji_count = EMOJI_RE.find_iter(text).count();

        let without_urls = URL_RE.replace_all(text, "");
        let word_count = without_urls.split_whitespace().count();

        TextFeatures {
            text: text.to_string(),
            has_video: options.has_video,
            has_image: options.has_image,
            has_link: links > 0,
            has_hashtags: hashtag_count > 0,
            hashtag_count,
            has_question: text.contains('?'),
            has_cta: any_match(&self.patterns.cta, text),
            word_count,
            char_count: text.chars().count(),
            is_thread: options.is_thread,
            thread_length: options.thread_length.max(1),
            has_emoji: emoji_count > 0,
            emoji_count,
            has_mention: mention_count > 0,
            mention_count,
            is_controversial: any_match(&self.patterns.controversy, text),
            is_niche: false,
            has_hook: any_match(&self.patterns.hook, text),
            has_absurdity: any_match(&self.patterns.absurdity, text),
        }
    }
}
