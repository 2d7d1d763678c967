//! Session Analyzer - rule-based adaptation of a cognitive twin.
//!
//! Turns one completed session plus the current profile into a partial
//! profile update and a list of insights. Pure and synchronous: no I/O and
//! no shared state, so callers are free to run it on any task.
//!
//! All thresholds below are fixed heuristic constants. Changing any of them
//! changes analysis output for existing fixtures.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Affinity, DomainError, Score};
use crate::domain::twin::{
    merge_unique, CognitiveProfile, ExplanationLength, LearningHours, LearningStyle,
    NeuralPatterns, ProfileUpdate,
};

use super::{EngagementMetrics, Insight, InsightPriority, InsightType, SessionRecord};

// ───────────────────────────────────────────────────────────────
// Engagement
// ───────────────────────────────────────────────────────────────

/// Starting engagement score.
pub const ENGAGEMENT_BASE: f64 = 50.0;
/// Maximum bonus for fast responses (30 points minus mean seconds).
pub const RESPONSE_SPEED_BONUS_MAX: f64 = 30.0;
pub const POINTS_PER_QUESTION: f64 = 5.0;
pub const QUESTION_POINTS_CAP: f64 = 30.0;
pub const POINTS_PER_CLARIFICATION: f64 = 3.0;
pub const CLARIFICATION_POINTS_CAP: f64 = 20.0;

// ───────────────────────────────────────────────────────────────
// Comprehension
// ───────────────────────────────────────────────────────────────

pub const PENALTY_PER_MISTAKE: f64 = 2.0;
pub const MISTAKE_PENALTY_CAP: f64 = 10.0;
pub const BONUS_PER_CORRECTION: f64 = 1.0;
pub const CORRECTION_BONUS_CAP: f64 = 5.0;
/// Questions-per-mistake ratio above which inquiry counts as productive.
pub const PRODUCTIVE_INQUIRY_RATIO: f64 = 2.0;
pub const PRODUCTIVE_INQUIRY_BONUS: f64 = 3.0;

// ───────────────────────────────────────────────────────────────
// Signals, velocity, insights
// ───────────────────────────────────────────────────────────────

/// Share of messages that must carry a cue before it counts as a signal.
pub const SIGNAL_MESSAGE_SHARE: f64 = 0.3;
pub const AFFINITY_NUDGE: f64 = 0.5;
/// Baseline used when a stored affinity is zero (unset).
pub const UNSET_AFFINITY_BASELINE: f64 = 5.0;

pub const VELOCITY_STEP: f64 = 0.05;
pub const HIGH_PERFORMANCE_ABOVE: f64 = 80.0;
pub const LOW_PERFORMANCE_BELOW: f64 = 60.0;

pub const LONG_SESSION_MINUTES: f64 = 10.0;
/// Mistakes above this share of messages raise a warning.
pub const HIGH_ERROR_SHARE: f64 = 0.2;
pub const CURIOSITY_QUESTION_THRESHOLD: u32 = 5;
pub const ACCURACY_MIN_MESSAGES: usize = 5;

pub const SELF_CORRECTION: &str = "Self-correction ability";
pub const CURIOSITY: &str = "Curiosity and inquiry";
pub const ACCURACY: &str = "Accuracy and attention to detail";

pub const NUMERICAL_ACCURACY: &str = "Numerical accuracy";
pub const LANGUAGE_PRECISION: &str = "Language precision";
pub const CONCEPTUAL_UNDERSTANDING: &str = "Conceptual understanding";

/// Keyword families mapped to the improvement area they indicate.
const MISTAKE_CATEGORIES: &[(&[&str], &str)] = &[
    (&["calculation", "math"], NUMERICAL_ACCURACY),
    (&["grammar", "syntax"], LANGUAGE_PRECISION),
    (&["concept", "understand"], CONCEPTUAL_UNDERSTANDING),
];

static VISUAL_CUES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)see|look|picture|diagram|chart|visual|show|image|color|shape")
        .expect("visual cue regex")
});

static PRACTICAL_CUES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)example|practice|try|do|use|apply|real|actual").expect("practical cue regex")
});

/// Learning-style signals detected across a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSignals {
    pub visual_preference: bool,
    pub practical_preference: bool,
}

/// Result of analyzing one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionAnalysis {
    pub profile_update: ProfileUpdate,
    pub insights: Vec<Insight>,
    pub comprehension_score: Score,
    pub engagement_score: Score,
}

/// Stateless analyzer for completed sessions.
pub struct SessionAnalyzer;

impl SessionAnalyzer {
    /// Analyzes a session against the user's current profile.
    ///
    /// Fails only on malformed input (see [`SessionRecord::validate`]).
    pub fn analyze(
        session: &SessionRecord,
        profile: &CognitiveProfile,
    ) -> Result<SessionAnalysis, DomainError> {
        session.validate()?;

        let engagement = Self::engagement_score(&session.engagement);
        let comprehension = Self::comprehension_score(session, profile.comprehension_score());
        let signals = Self::detect_signals(session);

        let mut insights = Self::session_insights(&signals, session, profile);
        let mut update = ProfileUpdate::default();

        let velocity = Self::velocity_adjustment(engagement, comprehension);
        if velocity != 0.0 {
            update.learning_velocity = Some(profile.learning_velocity().adjusted_by(velocity));
        }

        if let Some(hours) = Self::detect_optimal_hours(session) {
            update.optimal_learning_hours = Some(hours);
            insights.push(
                Insight::new(
                    InsightType::Pattern,
                    "Optimal Learning Time Detected",
                    format!(
                        "Your cognitive twin noticed you perform best between {}:00 and {}:00. \
                         Consider scheduling important learning sessions during this window.",
                        hours.start, hours.end
                    ),
                    InsightPriority::Medium,
                )
                .actionable()
                .with_metadata(
                    "optimalHours",
                    serde_json::json!({ "start": hours.start, "end": hours.end }),
                ),
            );
        }

        if !session.mistakes.is_empty() {
            update.areas_for_improvement = Some(merge_unique(
                profile.areas_for_improvement(),
                Self::classify_mistakes(&session.mistakes),
            ));
        }

        let strengths = Self::detect_strengths(session);
        if !strengths.is_empty() {
            update.strengths = Some(merge_unique(profile.strengths(), strengths));
        }

        update.comprehension_score = Some(comprehension);
        update.neural_patterns = Some(Self::updated_patterns(
            profile.neural_patterns(),
            &signals,
            session,
        ));

        Ok(SessionAnalysis {
            profile_update: update,
            insights,
            comprehension_score: comprehension,
            engagement_score: engagement,
        })
    }

    /// Engagement score in [0, 100].
    pub fn engagement_score(metrics: &EngagementMetrics) -> Score {
        let mut score = ENGAGEMENT_BASE;

        if let Some(mean_ms) = metrics.mean_response_time_ms() {
            score += (RESPONSE_SPEED_BONUS_MAX - mean_ms / 1000.0).max(0.0);
        }
        score += (f64::from(metrics.question_frequency) * POINTS_PER_QUESTION).min(QUESTION_POINTS_CAP);
        score += (f64::from(metrics.clarification_requests) * POINTS_PER_CLARIFICATION)
            .min(CLARIFICATION_POINTS_CAP);

        Score::new(score)
    }

    /// Comprehension score in [0, 100], starting from the current score.
    pub fn comprehension_score(session: &SessionRecord, current: Score) -> Score {
        let mistakes = session.mistakes.len() as f64;
        let questions = f64::from(session.engagement.question_frequency);

        let mut score = current.value();
        score -= (mistakes * PENALTY_PER_MISTAKE).min(MISTAKE_PENALTY_CAP);
        score += (session.corrections.len() as f64 * BONUS_PER_CORRECTION).min(CORRECTION_BONUS_CAP);

        if questions > 0.0 && questions / mistakes.max(1.0) > PRODUCTIVE_INQUIRY_RATIO {
            score += PRODUCTIVE_INQUIRY_BONUS;
        }

        Score::new(score)
    }

    /// Detects visual and practical cues across the session's messages.
    pub fn detect_signals(session: &SessionRecord) -> SessionSignals {
        let threshold = session.messages.len() as f64 * SIGNAL_MESSAGE_SHARE;
        let share_exceeds = |cues: &Regex| {
            let hits = session
                .messages
                .iter()
                .filter(|m| cues.is_match(&m.content))
                .count();
            hits as f64 > threshold
        };

        SessionSignals {
            visual_preference: share_exceeds(&VISUAL_CUES),
            practical_preference: share_exceeds(&PRACTICAL_CUES),
        }
    }

    /// Velocity delta from the mean of engagement and comprehension.
    pub fn velocity_adjustment(engagement: Score, comprehension: Score) -> f64 {
        let performance = (engagement.value() + comprehension.value()) / 2.0;
        if performance > HIGH_PERFORMANCE_ABOVE {
            VELOCITY_STEP
        } else if performance < LOW_PERFORMANCE_BELOW {
            -VELOCITY_STEP
        } else {
            0.0
        }
    }

    /// Optimal-hours detection needs timestamped history that sessions do
    /// not carry, so it never reports a window.
    pub fn detect_optimal_hours(_session: &SessionRecord) -> Option<LearningHours> {
        None
    }

    /// Maps mistake descriptions onto improvement areas.
    pub fn classify_mistakes(mistakes: &[String]) -> Vec<String> {
        let text = mistakes.join(" ").to_lowercase();
        MISTAKE_CATEGORIES
            .iter()
            .filter(|(keywords, _)| keywords.iter().any(|k| text.contains(k)))
            .map(|(_, area)| area.to_string())
            .collect()
    }

    /// Strengths demonstrated in this session.
    pub fn detect_strengths(session: &SessionRecord) -> Vec<String> {
        let mut strengths = Vec::new();
        if session.corrections.len() > session.mistakes.len() {
            strengths.push(SELF_CORRECTION.to_string());
        }
        if session.engagement.question_frequency > CURIOSITY_QUESTION_THRESHOLD {
            strengths.push(CURIOSITY.to_string());
        }
        if session.mistakes.is_empty() && session.messages.len() > ACCURACY_MIN_MESSAGES {
            strengths.push(ACCURACY.to_string());
        }
        strengths
    }

    /// Mean message length in characters; zero for an empty session.
    pub fn mean_message_length(session: &SessionRecord) -> f64 {
        if session.messages.is_empty() {
            return 0.0;
        }
        let total: usize = session.messages.iter().map(|m| m.content.chars().count()).sum();
        total as f64 / session.messages.len() as f64
    }

    fn updated_patterns(
        current: &NeuralPatterns,
        signals: &SessionSignals,
        session: &SessionRecord,
    ) -> NeuralPatterns {
        let mut patterns = current.clone();
        if signals.visual_preference {
            patterns.visual_learning_affinity = nudge(patterns.visual_learning_affinity);
        }
        if signals.practical_preference {
            patterns.practical_application_preference =
                nudge(patterns.practical_application_preference);
        }
        patterns.preferred_explanation_length =
            ExplanationLength::from_message_length(Self::mean_message_length(session));
        patterns
    }

    fn session_insights(
        signals: &SessionSignals,
        session: &SessionRecord,
        profile: &CognitiveProfile,
    ) -> Vec<Insight> {
        let mut insights = Vec::new();
        let mistakes = session.mistakes.len();

        if session.duration_minutes > LONG_SESSION_MINUTES {
            insights.push(Insight::new(
                InsightType::Achievement,
                "Great Learning Session!",
                format!(
                    "You completed a {}-minute learning session on \"{}\". \
                     Your cognitive twin is learning from your patterns.",
                    session.duration_minutes, session.topic
                ),
                InsightPriority::Low,
            ));
        }

        if signals.visual_preference && profile.learning_style() != LearningStyle::Visual {
            insights.push(
                Insight::new(
                    InsightType::Pattern,
                    "Visual Learning Detected",
                    "Your interactions suggest you may benefit from more visual explanations. \
                     Consider switching to Visual learning style in your profile.",
                    InsightPriority::Medium,
                )
                .actionable()
                .with_metadata("suggestedStyle", LearningStyle::Visual.label()),
            );
        }

        if mistakes as f64 > session.messages.len() as f64 * HIGH_ERROR_SHARE {
            insights.push(
                Insight::new(
                    InsightType::Warning,
                    "High Error Rate",
                    format!(
                        "You encountered {} mistakes in this session. \
                         Consider reviewing the fundamentals or slowing down the pace.",
                        mistakes
                    ),
                    InsightPriority::High,
                )
                .actionable()
                .with_metadata("mistakeCount", mistakes),
            );
        }

        if !session.corrections.is_empty() && mistakes == 0 {
            insights.push(Insight::new(
                InsightType::Achievement,
                "Perfect Understanding!",
                "You corrected all mistakes and showed complete comprehension. \
                 Keep up the excellent work!",
                InsightPriority::Low,
            ));
        }

        insights
    }
}

fn nudge(affinity: Affinity) -> Affinity {
    let base = if affinity.value() == 0.0 {
        UNSET_AFFINITY_BASELINE
    } else {
        affinity.value()
    };
    Affinity::new(base + AFFINITY_NUDGE)
}
