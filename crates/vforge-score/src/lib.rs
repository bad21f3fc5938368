//! Viral score engine.
//!
//! Pure, deterministic scoring of a video's popularity velocity
//! relative to its channel's normal reach. The score combines two
//! saturating terms:
//!
//! - reach: views divided by subscribers, against a per-format
//!   reference ratio
//! - velocity: views per hour of age, against a per-format reference
//!   velocity
//!
//! Age is floored at one hour so brand-new videos neither divide by
//! zero nor get penalized for low absolute view counts, and channels
//! reporting zero subscribers are scored against an explicit baseline
//! instead of a raw floor of 1 (which would make any unknown channel
//! look like it massively outperformed its reach).

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use vforge_models::{ContentFormat, ViralGrade};

/// Minimum age used for velocity normalization, in hours.
const MIN_AGE_HOURS: f64 = 1.0;

/// Subscriber count assumed for channels reporting zero subscribers.
const ZERO_SUBSCRIBER_BASELINE: u64 = 1_000;

/// Weight of the reach (views/subscribers) term.
const REACH_WEIGHT: f64 = 60.0;

/// Weight of the velocity (views/hour) term.
const VELOCITY_WEIGHT: f64 = 40.0;

/// Per-format normalization constants.
///
/// Shorts are surfaced by feed algorithms and burn much faster than
/// long-form uploads, so both references sit higher for `Short`.
#[derive(Debug, Clone, Copy)]
struct FormatProfile {
    /// views/subscribers ratio considered "clearly outperforming"
    ratio_ref: f64,
    /// views per hour considered "clearly outperforming"
    velocity_ref: f64,
}

fn profile(format: ContentFormat) -> FormatProfile {
    match format {
        ContentFormat::Short => FormatProfile {
            ratio_ref: 5.0,
            velocity_ref: 500.0,
        },
        ContentFormat::Long => FormatProfile {
            ratio_ref: 2.0,
            velocity_ref: 150.0,
        },
    }
}

/// Grade thresholds over the `[0, 100)` score range, highest first.
const GRADE_BANDS: [(f64, ViralGrade); 4] = [
    (85.0, ViralGrade::S),
    (65.0, ViralGrade::A),
    (40.0, ViralGrade::B),
    (20.0, ViralGrade::C),
];

/// A computed viral score and its letter grade.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ViralScore {
    pub score: f64,
    pub grade: ViralGrade,
}

impl ViralScore {
    /// True for the grades operators shortlist for generation.
    pub fn is_viral(&self) -> bool {
        matches!(self.grade, ViralGrade::S | ViralGrade::A)
    }
}

// Saturating normalization: maps `[0, inf)` into `[0, 1)`.
fn saturate(x: f64) -> f64 {
    x / (1.0 + x)
}

/// Map a finite non-negative score onto its grade band.
pub fn grade_for(score: f64) -> ViralGrade {
    for (threshold, grade) in GRADE_BANDS {
        if score >= threshold {
            return grade;
        }
    }
    ViralGrade::D
}

/// Score a video against the current clock.
pub fn score(
    view_count: u64,
    subscriber_count: u64,
    published_at: DateTime<Utc>,
    format: ContentFormat,
) -> ViralScore {
    score_at(view_count, subscriber_count, published_at, format, Utc::now())
}

/// Score a video against an explicit clock.
///
/// Deterministic: identical inputs always yield an identical score and
/// grade. The result is always finite, for any input combination.
pub fn score_at(
    view_count: u64,
    subscriber_count: u64,
    published_at: DateTime<Utc>,
    format: ContentFormat,
    now: DateTime<Utc>,
) -> ViralScore {
    let profile = profile(format);

    let subscribers = if subscriber_count == 0 {
        ZERO_SUBSCRIBER_BASELINE
    } else {
        subscriber_count
    };

    // Future publish timestamps clamp to the same floor as brand-new
    // uploads.
    let age_hours = ((now - published_at).num_seconds() as f64 / 3600.0).max(MIN_AGE_HOURS);

    let reach = view_count as f64 / subscribers as f64;
    let velocity = view_count as f64 / age_hours;

    let score = REACH_WEIGHT * saturate(reach / profile.ratio_ref)
        + VELOCITY_WEIGHT * saturate(velocity / profile.velocity_ref);

    ViralScore {
        score,
        grade: grade_for(score),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn clock() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn published(hours_ago: i64) -> DateTime<Utc> {
        clock() - Duration::hours(hours_ago)
    }

    #[test]
    fn test_determinism() {
        let a = score_at(10_000, 500, published(24), ContentFormat::Short, clock());
        let b = score_at(10_000, 500, published(24), ContentFormat::Short, clock());
        assert_eq!(a.score, b.score);
        assert_eq!(a.grade, b.grade);
    }

    #[test]
    fn test_monotonic_in_reach_ratio() {
        // Fixed age and format, increasing views: the ratio grows and
        // the score must never decrease.
        let mut last = f64::NEG_INFINITY;
        for views in [0u64, 10, 100, 1_000, 10_000, 100_000, 1_000_000] {
            let s = score_at(views, 10_000, published(48), ContentFormat::Long, clock());
            assert!(s.score >= last, "score regressed at views={}", views);
            last = s.score;
        }

        // Same sweep through decreasing subscribers at fixed views.
        let mut last = f64::NEG_INFINITY;
        for subs in [1_000_000u64, 100_000, 10_000, 1_000, 100, 1] {
            let s = score_at(50_000, subs, published(48), ContentFormat::Long, clock());
            assert!(s.score >= last, "score regressed at subs={}", subs);
            last = s.score;
        }
    }

    #[test]
    fn test_no_degenerate_inputs() {
        let cases = [
            (0u64, 0u64, published(0)),
            (100, 0, published(0)),
            (u64::MAX / 2, 1, published(0)),
            (0, u64::MAX / 2, published(24 * 365 * 20)),
            // published in the future
            (5_000, 100, clock() + Duration::hours(6)),
        ];
        for (views, subs, at) in cases {
            for format in [ContentFormat::Short, ContentFormat::Long] {
                let s = score_at(views, subs, at, format, clock());
                assert!(s.score.is_finite(), "non-finite for {views}/{subs}");
                assert!(s.score >= 0.0);
            }
        }
    }

    #[test]
    fn test_grade_completeness_and_ordering() {
        // Every finite non-negative score maps to exactly one grade and
        // band boundaries are ordered S..D. ViralGrade derives Ord in
        // declaration order, so S is the minimum.
        let mut previous = ViralGrade::D;
        let mut x = 0.0;
        while x <= 120.0 {
            let g = grade_for(x);
            // walking upward in score only moves toward S
            assert!(g <= previous, "grade order broke at {}", x);
            previous = g;
            x += 0.5;
        }
        assert_eq!(grade_for(0.0), ViralGrade::D);
        assert_eq!(grade_for(1e9), ViralGrade::S);
        // boundary values land in the upper band
        assert_eq!(grade_for(85.0), ViralGrade::S);
        assert_eq!(grade_for(65.0), ViralGrade::A);
        assert_eq!(grade_for(40.0), ViralGrade::B);
        assert_eq!(grade_for(20.0), ViralGrade::C);
    }

    #[test]
    fn test_outperformer_scores_s() {
        // 1M views on a 10k-subscriber channel, two days old, long form.
        let s = score_at(1_000_000, 10_000, published(48), ContentFormat::Long, clock());
        assert_eq!(s.grade, ViralGrade::S, "score was {}", s.score);
        assert!(s.is_viral());
    }

    #[test]
    fn test_underperformer_scores_d() {
        // 500 views on a 50k-subscriber channel after a month.
        let s = score_at(500, 50_000, published(24 * 30), ContentFormat::Short, clock());
        assert_eq!(s.grade, ViralGrade::D, "score was {}", s.score);
        assert!(!s.is_viral());
    }

    #[test]
    fn test_zero_subscribers_lowest_bracket() {
        // Unknown channel with a trickle of views stays in the lowest
        // bracket rather than looking like a 100x outperformer.
        let s = score_at(100, 0, published(1), ContentFormat::Short, clock());
        assert!(s.score.is_finite());
        assert_eq!(s.grade, ViralGrade::D, "score was {}", s.score);
    }

    #[test]
    fn test_age_decay() {
        // Same views and subscribers: the older video never outscores
        // the recent one.
        let recent = score_at(100_000, 5_000, published(12), ContentFormat::Long, clock());
        let old = score_at(100_000, 5_000, published(24 * 60), ContentFormat::Long, clock());
        assert!(old.score <= recent.score);
    }

    #[test]
    fn test_age_floor() {
        // Anything under an hour old scores identically to one hour old.
        let at_floor = score_at(2_000, 1_000, published(1), ContentFormat::Short, clock());
        let brand_new = score_at(2_000, 1_000, clock(), ContentFormat::Short, clock());
        assert_eq!(at_floor.score, brand_new.score);
    }

    #[test]
    fn test_format_profiles_differ() {
        // The same raw numbers read differently per format: long form
        // expects lower velocity, so it scores at least as high.
        let short = score_at(20_000, 4_000, published(24), ContentFormat::Short, clock());
        let long = score_at(20_000, 4_000, published(24), ContentFormat::Long, clock());
        assert!(long.score >= short.score);
        assert_ne!(long.score, short.score);
    }
}
