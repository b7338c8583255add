use virality_engine::scoring::{
    ActionConfig, ActionPredictor, ActionRate, ActionWeights, EngagementEstimator, QualityConfig,
    QualityScorer, ReachConfig, ReachProjector, RiskConfig, WeightedScorer,
};
use virality_engine::{
    ActionProbs, AuthorProfile, CountEstimate, EngineConfig, FeatureExtractor, MediaOptions,
    RiskProbs, TextFeatures,
};

fn features(text: &str, options: MediaOptions) -> TextFeatures {
    FeatureExtractor::default().extract(text, &options)
}

fn plain(text: &str) -> TextFeatures {
    features(text, MediaOptions::default())
}

fn empty_actions() -> ActionProbs {
    ActionProbs::default()
}

fn empty_risks() -> RiskProbs {
    RiskProbs::default()
}

fn assert_band(estimate: &CountEstimate) {
    let expected = estimate.expected as f64;
    assert_eq!(estimate.min, (expected * 0.6).round() as u64);
    assert_eq!(estimate.max, (expected * 1.4).round() as u64);
    assert!(estimate.min <= estimate.expected && estimate.expected <= estimate.max);
}

#[test]
fn weighted_scorer_uses_reply_and_bookmark_weights() {
    let mut actions = empty_actions();
    actions.reply = 0.1;
    actions.bookmark = 0.2;

    let scorer = WeightedScorer::new(ActionWeights::default());
    let score = scorer.score(&actions, &empty_risks());

    let expected = 0.1 * 27.0 + 0.2 * 50.0 * 0.01;
    assert!((score - expected).abs() < 1e-9);
}

#[test]
fn weighted_scorer_subtracts_risk_magnitudes() {
    let mut risks = empty_risks();
    risks.block = 0.01;
    risks.report = 0.01;

    let scorer = WeightedScorer::new(ActionWeights::default());
    let score = scorer.score(&empty_actions(), &risks);

    assert!((score + (0.74 + 3.69)).abs() < 1e-9);
}

#[test]
fn weighted_scorer_treats_positive_risk_weights_as_magnitudes() {
    let mut risks = empty_risks();
    risks.mute = 0.5;

    let weights = ActionWeights {
        mute: 10.0,
        ..ActionWeights::default()
    };
    let scorer = WeightedScorer::new(weights);

    assert!((scorer.score(&empty_actions(), &risks) + 5.0).abs() < 1e-9);
}

#[test]
fn quality_link_tax_quarters_the_score() {
    let scorer = QualityScorer::new(QualityConfig::default());
    let with_link = plain("Check this out: https://example.com");
    let mut without_link = with_link.clone();
    without_link.has_link = false;

    assert!(with_link.has_link);
    let ratio = scorer.score(&with_link) / scorer.score(&without_link);
    assert!((ratio - 0.25).abs() < 1e-12);

    let bare = plain("Check this out:");
    assert_eq!(bare.word_count, with_link.word_count);
    assert!((scorer.score(&with_link) - 0.25 * scorer.score(&bare)).abs() < 1e-12);
}

#[test]
fn quality_media_bonus_is_applied_before_link_tax() {
    let scorer = QualityScorer::new(QualityConfig::default());
    let features = features(
        "Check this out: https://example.com",
        MediaOptions::default().with_video(),
    );

    // (0.5 * 2.0) * 0.25
    assert!((scorer.score(&features) - 0.25).abs() < 1e-12);
}

#[test]
fn quality_hashtag_adjustments() {
    let scorer = QualityScorer::new(QualityConfig::default());

    let one = plain("Shipping today #rust");
    let mut none = one.clone();
    none.hashtag_count = 0;
    none.has_hashtags = false;
    assert!((scorer.score(&one) - scorer.score(&none) - 0.05).abs() < 1e-12);

    let mut three = one.clone();
    three.hashtag_count = 3;
    assert!((scorer.score(&three) - scorer.score(&none)).abs() < 1e-12);

    let five = plain("Shipping today #rust #dev #code #oss #build");
    assert_eq!(five.hashtag_count, 5);
    assert!((scorer.score(&five) - (0.5 - 0.10)).abs() < 1e-12);
}

#[test]
fn quality_thread_multiplier_scales_with_length() {
    let scorer = QualityScorer::new(QualityConfig::default());
    let single = features("hello world", MediaOptions::default().thread(1));
    let long = features("hello world", MediaOptions::default().thread(4));

    assert!((scorer.score(&single) - 0.5).abs() < 1e-12);
    assert!((scorer.score(&long) - 0.5 * 1.4).abs() < 1e-12);
}

#[test]
fn quality_rewards_optimal_length() {
    let scorer = QualityScorer::new(QualityConfig::default());
    let short = plain("Compilers are neat");
    let optimal = plain("Our new parser handles every edge case we could find in the test corpus");

    assert!((scorer.score(&short) - 0.5).abs() < 1e-12);
    assert!((scorer.score(&optimal) - 0.6).abs() < 1e-12);
}

#[test]
fn question_scenario_matches_reference_numbers() {
    let estimator = EngagementEstimator::default();
    let prediction = estimator.estimate(
        &plain("What do you think about this?"),
        &AuthorProfile::default(),
    );

    assert!((prediction.quality_score - 0.63).abs() < 1e-12);
    assert!((prediction.base_probability - 0.485_489_813_069).abs() < 1e-9);
    assert!((prediction.actions.reply - 0.182_058_679_901).abs() < 1e-9);
    assert!((prediction.weighted_score + 1.791_047_850_185).abs() < 1e-9);
    assert_eq!(prediction.virality_score, 48);
    assert_eq!(prediction.counts.views.expected, 1705);
    assert_eq!(prediction.counts.likes.expected, 41);
    assert_eq!(prediction.counts.reposts.expected, 1);
    assert_eq!(prediction.counts.replies.expected, 3);
    assert_eq!(prediction.counts.bookmarks.expected, 0);
}

#[test]
fn question_mark_raises_reply_probability() {
    let estimator = EngagementEstimator::default();
    let profile = AuthorProfile::default();

    let with_question = estimator.estimate(&plain("What do you think about this?"), &profile);
    let without_question = estimator.estimate(&plain("What do you think about this"), &profile);

    assert!(with_question.actions.reply > without_question.actions.reply);
    assert!(with_question.virality_score <= 100);
}

#[test]
fn video_boosts_dwell_probability() {
    let estimator = EngagementEstimator::default();
    let profile = AuthorProfile::default();
    let text_only = estimator.estimate(&plain("Compilers are neat"), &profile);
    let video = estimator.estimate(
        &features("Compilers are neat", MediaOptions::default().with_video()),
        &profile,
    );

    // quality doubles and dwell gets its own 1.5x boost
    let ratio = video.actions.dwell / text_only.actions.dwell;
    assert!((ratio - 3.0).abs() < 1e-9);
}

#[test]
fn controversy_lifts_every_risk_above_its_floor() {
    let estimator = EngagementEstimator::default();
    let prediction = estimator.estimate(
        &plain("The political debate tonight was something else"),
        &AuthorProfile::default(),
    );
    let floors = RiskConfig::default();

    assert!(prediction.risks.not_interested > floors.not_interested.floor);
    assert!(prediction.risks.block > floors.block.floor);
    assert!(prediction.risks.mute > floors.mute.floor);
    assert!(prediction.risks.report > floors.report.floor);
    assert!((prediction.risks.not_interested - 0.20).abs() < 1e-12);
    assert!((prediction.risks.report - 0.025).abs() < 1e-12);
}

#[test]
fn calm_content_stays_at_risk_floors() {
    let estimator = EngagementEstimator::default();
    let prediction = estimator.estimate(&plain("Compilers are neat"), &AuthorProfile::default());

    assert!((prediction.risks.not_interested - 0.05).abs() < 1e-12);
    assert!((prediction.risks.block - 0.01).abs() < 1e-12);
    assert!((prediction.risks.mute - 0.02).abs() < 1e-12);
    assert!((prediction.risks.report - 0.005).abs() < 1e-12);
}

#[test]
fn probabilities_respect_caps_across_profiles() {
    let estimator = EngagementEstimator::default();
    let caps = ActionConfig::default();
    let texts = [
        features(
            "Here's why our new parser handles every edge case we found this year, a short write up?",
            MediaOptions::default().with_video().thread(8),
        ),
        plain("What do you think about this?"),
        plain("Check this out: https://example.com #a #b #c #d #e"),
    ];
    let profiles = [
        AuthorProfile::default(),
        AuthorProfile {
            followers: 50_000_000,
            avg_engagement_rate: 100.0,
            ..AuthorProfile::default()
        },
        AuthorProfile {
            followers: 0,
            avg_engagement_rate: 0.0,
            ..AuthorProfile::default()
        },
        AuthorProfile {
            avg_engagement_rate: 900.0,
            ..AuthorProfile::default()
        },
    ];

    for features in &texts {
        for profile in &profiles {
            let p = estimator.estimate(features, profile);
            let a = &p.actions;
            let checks = [
                (a.favorite, caps.favorite.cap),
                (a.reply, caps.reply.cap),
                (a.repost, caps.repost.cap),
                (a.quote, caps.quote.cap),
                (a.click, caps.click.cap),
                (a.profile_click, caps.profile_click.cap),
                (a.share, caps.share.cap),
                (a.bookmark, caps.bookmark.cap),
                (a.dwell, caps.dwell.cap),
                (a.follow_author, caps.follow_author.cap),
            ];
            for (value, cap) in checks {
                assert!((0.0..=cap).contains(&value), "{} exceeds cap {}", value, cap);
            }
            assert!(a.favorite <= 0.95);
            assert!(a.reply <= 0.70);

            for risk in [p.risks.not_interested, p.risks.block, p.risks.mute, p.risks.report] {
                assert!((0.0..=1.0).contains(&risk));
            }

            assert!((0.0..=100.0).contains(&p.normalized_score));
            assert_eq!(p.virality_score as f64, p.normalized_score.round());

            for estimate in [
                &p.counts.views,
                &p.counts.likes,
                &p.counts.reposts,
                &p.counts.replies,
                &p.counts.bookmarks,
            ] {
                assert_band(estimate);
            }
        }
    }
}

#[test]
fn saturated_base_probability_hits_caps() {
    let estimator = EngagementEstimator::default();
    let features = features(
        "Here's why our new parser handles every edge case we found this year, a short write up?",
        MediaOptions::default().with_video(),
    );
    let profile = AuthorProfile {
        followers: 10_000_000,
        avg_engagement_rate: 80.0,
        ..AuthorProfile::default()
    };
    let prediction = estimator.estimate(&features, &profile);

    assert!((prediction.base_probability - 0.95).abs() < 1e-12);
    assert!((prediction.actions.favorite - 0.95).abs() < 1e-12);
    assert!((prediction.actions.dwell - 0.855).abs() < 1e-12);
}

#[test]
fn more_followers_never_means_fewer_views() {
    let estimator = EngagementEstimator::default();
    let samples = [
        plain("What do you think about this?"),
        features("Stop shipping untested code", MediaOptions::default().with_video()),
        plain("The political debate tonight was something else"),
    ];
    let followers = [0, 10, 100, 999, 5_000, 20_000, 250_000, 1_000_000, 40_000_000];

    for features in &samples {
        let mut previous = 0;
        for count in followers {
            let profile = AuthorProfile {
                followers: count,
                ..AuthorProfile::default()
            };
            let views = estimator.estimate(features, &profile).counts.views.expected;
            assert!(views >= previous, "views dropped from {} to {}", previous, views);
            previous = views;
        }
    }
}

#[test]
fn blank_features_give_all_zero_prediction() {
    let estimator = EngagementEstimator::default();
    let prediction = estimator.estimate(&plain("   "), &AuthorProfile::default());

    assert_eq!(prediction, Default::default());
    assert_eq!(prediction.virality_score, 0);
    assert_eq!(prediction.counts.views, CountEstimate::default());
}

#[test]
fn custom_weight_table_changes_the_score() {
    let features = plain("What do you think about this?");
    let profile = AuthorProfile::default();
    let baseline = EngagementEstimator::default().estimate(&features, &profile);

    let mut config = EngineConfig::default();
    config.weights.reply = 0.0;
    let muted = EngagementEstimator::from_config(&config).estimate(&features, &profile);

    let expected_drop = baseline.actions.reply * 27.0;
    assert!((baseline.weighted_score - muted.weighted_score - expected_drop).abs() < 1e-9);
    assert_eq!(baseline.actions, muted.actions);
}

#[test]
fn viral_multiplier_kicks_in_above_seventy() {
    let mut config = EngineConfig::default();
    config.weights.reply = 100.0;
    let estimator = EngagementEstimator::from_config(&config);

    let features = plain("What do you think about this?");
    let profile = AuthorProfile {
        followers: 10_000,
        avg_engagement_rate: 10.0,
        ..AuthorProfile::default()
    };
    let prediction = estimator.estimate(&features, &profile);

    let factor = prediction.normalized_score / 100.0;
    assert!(factor > 0.7 && factor < 1.0);
    let multiplier = factor.powi(3) * 10.0;
    let expected = (10_000.0 * (0.1 + factor * 0.5) * multiplier).round() as u64;
    assert_eq!(prediction.counts.views.expected, expected);
}

#[test]
fn action_rate_caps_and_floors() {
    let rate = ActionRate::new(0.5, 0.3);
    assert!((rate.apply(0.4, 1.0) - 0.2).abs() < 1e-12);
    assert!((rate.apply(0.9, 1.0) - 0.3).abs() < 1e-12);
    assert_eq!(rate.apply(-1.0, 1.0), 0.0);
}

#[test]
fn follower_floor_keeps_tiny_accounts_positive() {
    let predictor = ActionPredictor::new(ActionConfig::default());
    let tiny = AuthorProfile {
        followers: 0,
        ..AuthorProfile::default()
    };
    let floor = AuthorProfile {
        followers: 100,
        ..AuthorProfile::default()
    };
    assert!((predictor.follower_factor(&tiny) - 2.0 / 6.0).abs() < 1e-12);
    assert_eq!(predictor.follower_factor(&tiny), predictor.follower_factor(&floor));
}

#[test]
fn variance_band_rounds_each_bound() {
    let estimate = CountEstimate::with_variance(7, 0.4);
    assert_eq!(estimate.min, 4);
    assert_eq!(estimate.expected, 7);
    assert_eq!(estimate.max, 10);
}

#[test]
fn normalize_centers_zero_and_clamps() {
    let projector = ReachProjector::new(ReachConfig::default());
    assert_eq!(projector.normalize(0.0), 50.0);
    assert_eq!(projector.normalize(-25.0), 25.0);
    assert_eq!(projector.normalize(500.0), 100.0);
    assert_eq!(projector.normalize(-500.0), 0.0);
}

#[test]
fn viral_multiplier_only_above_threshold() {
    let projector = ReachProjector::new(ReachConfig::default());
    assert_eq!(projector.viral_multiplier(0.7), 1.0);
    assert!((projector.viral_multiplier(0.8) - 5.12).abs() < 1e-9);
    // 1000 * (0.1 + 0.5 * 0.5)
    assert_eq!(projector.expected_views(1_000, 50.0), 350);
}
