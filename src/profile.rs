use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Niche {
    Tech,
    Ai,
    Crypto,
    Startup,
    Marketing,
    Design,
    Finance,
    Health,
    Lifestyle,
    News,
    Entertainment,
    Other,
}

impl Niche {
    pub const ALL: [Niche; 12] = [
        Niche::Tech,
        Niche::Ai,
        Niche::Crypto,
        Niche::Startup,
        Niche::Marketing,
        Niche::Design,
        Niche::Finance,
        Niche::Health,
        Niche::Lifestyle,
        Niche::News,
        Niche::Entertainment,
        Niche::Other,
    ];

    pub fn from_label(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "tech" | "programming" => Some(Niche::Tech),
            "ai" | "ml" => Some(Niche::Ai),
            "crypto" | "web3" => Some(Niche::Crypto),
            "startup" | "startups" => Some(Niche::Startup),
            "marketing" | "growth" => Some(Niche::Marketing),
            "design" | "creative" => Some(Niche::Design),
            "finance" | "investing" => Some(Niche::Finance),
            "health" | "fitness" => Some(Niche::Health),
            "lifestyle" | "personal" => Some(Niche::Lifestyle),
            "news" => Some(Niche::News),
            "entertainment" => Some(Niche::Entertainment),
            "other" => Some(Niche::Other),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Niche::Tech => "tech",
            Niche::Ai => "ai",
            Niche::Crypto => "crypto",
            Niche::Startup => "startup",
            Niche::Marketing => "marketing",
            Niche::Design => "design",
            Niche::Finance => "finance",
            Niche::Health => "health",
            Niche::Lifestyle => "lifestyle",
            Niche::News => "news",
            Niche::Entertainment => "entertainment",
            Niche::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostFrequency {
    Low,
    Medium,
    High,
}

impl PostFrequency {
    pub fn from_label(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "low" => Some(PostFrequency::Low),
            "medium" | "med" => Some(PostFrequency::Medium),
            "high" => Some(PostFrequency::High),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PostFrequency::Low => "low",
            PostFrequency::Medium => "medium",
            PostFrequency::High => "high",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorProfile {
    pub followers: u64,
    pub following: u64,
    pub avg_engagement_rate: f64,
    pub account_age_days: u32,
    pub is_verified: bool,
    pub niche: Niche,
    pub post_frequency: PostFrequency,
}

impl Default for AuthorProfile {
    fn default() -> Self {
        Self {
            followers: 5_000,
            following: 500,
            avg_engagement_rate: 2.5,
            account_age_days: 365,
            is_verified: false,
            niche: Niche::Tech,
            post_frequency: PostFrequency::Medium,
        }
    }
}

impl AuthorProfile {
    pub fn sanitized(&self) -> Self {
        let avg_engagement_rate = if self.avg_engagement_rate.is_nan() {
            0.0
        } else {
            self.avg_engagement_rate.clamp(0.0, 100.0)
        };

        Self {
            avg_engagement_rate,
            account_age_days: self.account_age_days.max(1),
            ..self.clone()
        }
    }
}
