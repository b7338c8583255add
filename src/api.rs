use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use virality_engine::{
    format_number, Analysis, AuthorProfile, CountEstimate, Insight, MediaOptions, Niche,
    PostFrequency, Prediction, TextFeatures,
};

#[derive(Debug, Default, Deserialize)]
pub struct ApiAnalyzeRequest {
    pub text: Option<String>,
    pub has_video: Option<bool>,
    pub has_image: Option<bool>,
    pub is_thread: Option<bool>,
    pub thread_length: Option<usize>,
    pub followers: Option<u64>,
    pub following: Option<u64>,
    pub avg_engagement_rate: Option<f64>,
    pub account_age_days: Option<u32>,
    pub verified: Option<bool>,
    pub niche: Option<String>,
    pub post_frequency: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AnalyzeInput {
    pub text: String,
    pub options: MediaOptions,
    pub profile: AuthorProfile,
}

impl ApiAnalyzeRequest {
    pub fn into_input(self) -> Result<AnalyzeInput, String> {
        let text = self.text.unwrap_or_default();
        if text.trim().is_empty() {
            return Err("text is required".to_string());
        }

        let mut options = MediaOptions::default();
        if let Some(value) = self.has_video {
            options.has_video = value;
        }
        if let Some(value) = self.has_image {
            options.has_image = value;
        }
        if let Some(value) = self.is_thread {
            options.is_thread = value;
        }
        if let Some(value) = self.thread_length {
            options.thread_length = value.max(1);
        }

        let mut profile = AuthorProfile::default();
        if let Some(value) = self.followers {
            profile.followers = value;
        }
        if let Some(value) = self.following {
            profile.following = value;
        }
        if let Some(value) = self.avg_engagement_rate {
            if !(0.0..=100.0).contains(&value) {
                return Err(format!("avg_engagement_rate must be within 0-100: {}", value));
            }
            profile.avg_engagement_rate = value;
        }
        if let Some(value) = self.account_age_days {
            profile.account_age_days = value.max(1);
        }
        if let Some(value) = self.verified {
            profile.is_verified = value;
        }
        if let Some(niche) = self.niche.as_deref() {
            profile.niche =
                Niche::from_label(niche).ok_or_else(|| format!("invalid niche: {}", niche))?;
        }
        if let Some(frequency) = self.post_frequency.as_deref() {
            profile.post_frequency = PostFrequency::from_label(frequency)
                .ok_or_else(|| format!("invalid post frequency: {}", frequency))?;
        }

        Ok(AnalyzeInput {
            text,
            options,
            profile,
        })
    }
}

impl AnalyzeInput {
    pub fn fingerprint(&self) -> String {
        let payload = format!(
            "{}\u{1f}{:?}\u{1f}{:?}",
            self.text, self.options, self.profile
        );
        let mut hasher = Sha256::new();
        hasher.update(payload.as_bytes());
        let digest = hasher.finalize();
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&digest[..8]);
        format!("analysis_{:016x}", u64::from_be_bytes(bytes))
    }
}

#[derive(Debug, Serialize)]
pub struct DisplayCounts {
    pub views: String,
    pub likes: String,
    pub reposts: String,
    pub replies: String,
    pub bookmarks: String,
}

#[derive(Debug, Serialize)]
pub struct ApiAnalyzeResponse {
    pub analysis_id: String,
    pub virality_score: u8,
    pub level: String,
    pub level_description: String,
    pub prediction: Prediction,
    pub features: TextFeatures,
    pub insights: Vec<Insight>,
    pub display: DisplayCounts,
}

impl ApiAnalyzeResponse {
    pub fn from_analysis(analysis: Analysis, analysis_id: String) -> Self {
        let level = analysis.level();
        let counts = &analysis.prediction.counts;
        let display = DisplayCounts {
            views: display_range(&counts.views),
            likes: display_range(&counts.likes),
            reposts: display_range(&counts.reposts),
            replies: display_range(&counts.replies),
            bookmarks: display_range(&counts.bookmarks),
        };

        Self {
            analysis_id,
            virality_score: analysis.prediction.virality_score,
            level: level.label().to_string(),
            level_description: level.description().to_string(),
            display,
            prediction: analysis.prediction,
            features: analysis.features,
            insights: analysis.insights,
        }
    }
}

pub fn display_range(estimate: &CountEstimate) -> String {
    format!(
        "{} ({} - {})",
        format_number(estimate.expected),
        format_number(estimate.min),
        format_number(estimate.max)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(text: &str) -> ApiAnalyzeRequest {
        ApiAnalyzeRequest {
            text: Some(text.to_string()),
            ..ApiAnalyzeRequest::default()
        }
    }

    #[test]
    fn blank_text_is_rejected() {
        let err = request("   ").into_input().unwrap_err();
        assert_eq!(err, "text is required");
    }

    #[test]
    fn missing_fields_fall_back_to_default_profile() {
        let input = request("hello world").into_input().unwrap();
        assert_eq!(input.profile, AuthorProfile::default());
        assert_eq!(input.options, MediaOptions::default());
    }

    #[test]
    fn unknown_niche_is_rejected() {
        let mut req = request("hello");
        req.niche = Some("gardening".to_string());
        assert_eq!(req.into_input().unwrap_err(), "invalid niche: gardening");
    }

    #[test]
    fn thread_length_is_at_least_one() {
        let mut req = request("hello");
        req.is_thread = Some(true);
        req.thread_length = Some(0);
        let input = req.into_input().unwrap();
        assert!(input.options.is_thread);
        assert_eq!(input.options.thread_length, 1);
    }

    #[test]
    fn fingerprint_is_stable_and_input_sensitive() {
        let a = request("same text").into_input().unwrap();
        let b = request("same text").into_input().unwrap();
        let c = request("other text").into_input().unwrap();
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_ne!(a.fingerprint(), c.fingerprint());
        assert!(a.fingerprint().starts_with("analysis_"));
    }

    #[test]
    fn display_range_uses_compact_numbers() {
        let estimate = CountEstimate::with_variance(2_500, 0.4);
        assert_eq!(display_range(&estimate), "2.5K (1.5K - 3.5K)");
    }
}
