//! IPAQ scoring module
//!
//! Converts the weekly activity answers of the International Physical
//! Activity Questionnaire into MET-minutes/week and a three-tier activity
//! level.
//!
//! # Design Principles
//!
//! 1. **Pure Functions**: Scoring has no side effects and no hidden state
//! 2. **Consistency**: Score and level are only ever produced together
//! 3. **Type Safety**: Day and minute counts are unsigned, levels are a closed enum

use serde::{Deserialize, Serialize};
use std::fmt;

/// MET value for vigorous-intensity activity
pub const VIGOROUS_MET: f64 = 8.0;
/// MET value for moderate-intensity activity
pub const MODERATE_MET: f64 = 4.0;
/// MET value for walking
pub const WALKING_MET: f64 = 3.3;

/// Lower bound (inclusive) of the moderate band, in MET-min/week
pub const MODERATE_THRESHOLD_MET: f64 = 600.0;
/// Lower bound (inclusive) of the high band, in MET-min/week
pub const HIGH_THRESHOLD_MET: f64 = 3000.0;

// ============================================================================
// Activity Level
// ============================================================================

/// Physical activity level derived from weekly MET-minutes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityLevel {
    /// Below 600 MET-min/week
    Low,
    /// 600 up to 3000 MET-min/week
    Moderate,
    /// 3000 MET-min/week or more
    High,
}

impl ActivityLevel {
    /// All levels in ascending order
    pub const ALL: [ActivityLevel; 3] = [
        ActivityLevel::Low,
        ActivityLevel::Moderate,
        ActivityLevel::High,
    ];

    /// Storage/wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Low => "low",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::High => "high",
        }
    }

    /// Human-readable label
    pub fn description(&self) -> &'static str {
        match self {
            ActivityLevel::Low => "Low",
            ActivityLevel::Moderate => "Moderate",
            ActivityLevel::High => "High",
        }
    }

    /// MET-minute band covered by this level (lower inclusive, upper exclusive)
    pub fn range(&self) -> (f64, f64) {
        match self {
            ActivityLevel::Low => (f64::NEG_INFINITY, MODERATE_THRESHOLD_MET),
            ActivityLevel::Moderate => (MODERATE_THRESHOLD_MET, HIGH_THRESHOLD_MET),
            ActivityLevel::High => (HIGH_THRESHOLD_MET, f64::INFINITY),
        }
    }

    /// Participants at this level are counted as sedentary in study results
    pub fn is_sedentary(&self) -> bool {
        matches!(self, ActivityLevel::Low)
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ActivityLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(ActivityLevel::Low),
            "moderate" => Ok(ActivityLevel::Moderate),
            "high" => Ok(ActivityLevel::High),
            _ => Err(format!("Unknown activity level: {}", s)),
        }
    }
}

// ============================================================================
// Scoring
// ============================================================================

/// Raw questionnaire answers for one participant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityQuestionnaire {
    pub vigorous_days: u32,
    pub vigorous_minutes: u32,
    pub moderate_days: u32,
    pub moderate_minutes: u32,
    pub walking_days: u32,
    pub walking_minutes: u32,
    /// Hours/day sitting on weekdays. Descriptive only, not scored.
    pub sitting_hours_weekday: f64,
    /// Hours/day sitting on weekend days. Descriptive only, not scored.
    pub sitting_hours_weekend: f64,
}

/// Derived activity score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActivityScore {
    pub total_met: f64,
    pub activity_level: ActivityLevel,
}

/// MET-minutes/week contributed by each intensity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetBreakdown {
    pub vigorous: f64,
    pub moderate: f64,
    pub walking: f64,
}

impl MetBreakdown {
    pub fn total(&self) -> f64 {
        self.vigorous + self.moderate + self.walking
    }
}

/// Weekly MET-minutes for one intensity
fn weekly_met(days: u32, minutes: u32, met: f64) -> f64 {
    f64::from(days) * f64::from(minutes) * met
}

/// Per-intensity MET-minutes/week
pub fn met_breakdown(
    vigorous_days: u32,
    vigorous_minutes: u32,
    moderate_days: u32,
    moderate_minutes: u32,
    walking_days: u32,
    walking_minutes: u32,
) -> MetBreakdown {
    MetBreakdown {
        vigorous: weekly_met(vigorous_days, vigorous_minutes, VIGOROUS_MET),
        moderate: weekly_met(moderate_days, moderate_minutes, MODERATE_MET),
        walking: weekly_met(walking_days, walking_minutes, WALKING_MET),
    }
}

/// Calculate total MET-minutes/week
///
/// Formula: days × minutes × MET, summed over vigorous (8.0),
/// moderate (4.0) and walking (3.3).
pub fn calculate_total_met(
    vigorous_days: u32,
    vigorous_minutes: u32,
    moderate_days: u32,
    moderate_minutes: u32,
    walking_days: u32,
    walking_minutes: u32,
) -> f64 {
    met_breakdown(
        vigorous_days,
        vigorous_minutes,
        moderate_days,
        moderate_minutes,
        walking_days,
        walking_minutes,
    )
    .total()
}

/// Classify weekly MET-minutes into an activity level
pub fn classify_activity(total_met: f64) -> ActivityLevel {
    if total_met < MODERATE_THRESHOLD_MET {
        ActivityLevel::Low
    } else if total_met < HIGH_THRESHOLD_MET {
        ActivityLevel::Moderate
    } else {
        ActivityLevel::High
    }
}

/// Score raw weekly activity answers
///
/// Day counts are not range-checked here; days outside 0-7 are rejected
/// by the request validation layer.
pub fn score(
    vigorous_days: u32,
    vigorous_minutes: u32,
    moderate_days: u32,
    moderate_minutes: u32,
    walking_days: u32,
    walking_minutes: u32,
) -> ActivityScore {
    let total_met = calculate_total_met(
        vigorous_days,
        vigorous_minutes,
        moderate_days,
        moderate_minutes,
        walking_days,
        walking_minutes,
    );

    ActivityScore {
        total_met,
        activity_level: classify_activity(total_met),
    }
}

impl ActivityQuestionnaire {
    /// Score these answers
    pub fn score(&self) -> ActivityScore {
        score(
            self.vigorous_days,
            self.vigorous_minutes,
            self.moderate_days,
            self.moderate_minutes,
            self.walking_days,
            self.walking_minutes,
        )
    }

    /// Per-intensity breakdown of these answers
    pub fn breakdown(&self) -> MetBreakdown {
        met_breakdown(
            self.vigorous_days,
            self.vigorous_minutes,
            self.moderate_days,
            self.moderate_minutes,
            self.walking_days,
            self.walking_minutes,
        )
    }
}

// ============================================================================
// Recompute-before-write
// ============================================================================

/// Questionnaire answers paired with the score derived from them
///
/// The only constructor is [`ScoredQuestionnaire::recompute`], so a value of
/// this type always carries a score that matches its answers.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredQuestionnaire {
    input: ActivityQuestionnaire,
    score: ActivityScore,
}

impl ScoredQuestionnaire {
    /// Score `input` from scratch
    pub fn recompute(input: ActivityQuestionnaire) -> Self {
        let score = input.score();
        Self { input, score }
    }

    pub fn input(&self) -> &ActivityQuestionnaire {
        &self.input
    }

    pub fn score(&self) -> ActivityScore {
        self.score
    }

    pub fn total_met(&self) -> f64 {
        self.score.total_met
    }

    pub fn activity_level(&self) -> ActivityLevel {
        self.score.activity_level
    }
}
