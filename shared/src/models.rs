//! Domain models for the sedentarism study
//!
//! Closed choice sets used by participants, barriers and prevention
//! strategies. All of them are stored as lowercase snake_case text.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Participant's relationship to the institution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticipantType {
    Student,
    Staff,
    /// Lives in the surrounding community
    Resident,
}

impl ParticipantType {
    pub const ALL: [ParticipantType; 3] = [
        ParticipantType::Student,
        ParticipantType::Staff,
        ParticipantType::Resident,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ParticipantType::Student => "student",
            ParticipantType::Staff => "staff",
            ParticipantType::Resident => "resident",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ParticipantType::Student => "Student",
            ParticipantType::Staff => "Staff member",
            ParticipantType::Resident => "Local resident",
        }
    }
}

impl fmt::Display for ParticipantType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ParticipantType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "student" => Ok(ParticipantType::Student),
            "staff" => Ok(ParticipantType::Staff),
            "resident" => Ok(ParticipantType::Resident),
            _ => Err(format!("Unknown participant type: {}", s)),
        }
    }
}

/// Self-reported sex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
    Other,
}

impl Sex {
    pub const ALL: [Sex; 3] = [Sex::Male, Sex::Female, Sex::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
            Sex::Other => "other",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Sex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "male" | "m" => Ok(Sex::Male),
            "female" | "f" => Ok(Sex::Female),
            "other" | "o" => Ok(Sex::Other),
            _ => Err(format!("Unknown sex: {}", s)),
        }
    }
}

/// Perceived barrier to physical activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BarrierCategory {
    Time,
    Infrastructure,
    Motivation,
    Knowledge,
    Financial,
    Health,
    Social,
    Technology,
}

impl BarrierCategory {
    pub const ALL: [BarrierCategory; 8] = [
        BarrierCategory::Time,
        BarrierCategory::Infrastructure,
        BarrierCategory::Motivation,
        BarrierCategory::Knowledge,
        BarrierCategory::Financial,
        BarrierCategory::Health,
        BarrierCategory::Social,
        BarrierCategory::Technology,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BarrierCategory::Time => "time",
            BarrierCategory::Infrastructure => "infrastructure",
            BarrierCategory::Motivation => "motivation",
            BarrierCategory::Knowledge => "knowledge",
            BarrierCategory::Financial => "financial",
            BarrierCategory::Health => "health",
            BarrierCategory::Social => "social",
            BarrierCategory::Technology => "technology",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            BarrierCategory::Time => "Lack of time",
            BarrierCategory::Infrastructure => "Inadequate infrastructure",
            BarrierCategory::Motivation => "Lack of motivation",
            BarrierCategory::Knowledge => "Lack of knowledge",
            BarrierCategory::Financial => "Financial limitations",
            BarrierCategory::Health => "Health problems",
            BarrierCategory::Social => "Lack of social support",
            BarrierCategory::Technology => "Excessive technology use",
        }
    }
}

impl fmt::Display for BarrierCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for BarrierCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.to_lowercase();
        BarrierCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == normalized)
            .ok_or_else(|| format!("Unknown barrier category: {}", s))
    }
}

/// Scope at which a prevention strategy acts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyType {
    Individual,
    Institutional,
    Community,
}

impl StrategyType {
    pub const ALL: [StrategyType; 3] = [
        StrategyType::Individual,
        StrategyType::Institutional,
        StrategyType::Community,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyType::Individual => "individual",
            StrategyType::Institutional => "institutional",
            StrategyType::Community => "community",
        }
    }
}

impl fmt::Display for StrategyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for StrategyType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "individual" => Ok(StrategyType::Individual),
            "institutional" => Ok(StrategyType::Institutional),
            "community" => Ok(StrategyType::Community),
            _ => Err(format!("Unknown strategy type: {}", s)),
        }
    }
}

/// Age bands used in the study results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AgeBand {
    #[serde(rename = "18-25")]
    UpTo25,
    #[serde(rename = "26-35")]
    From26To35,
    #[serde(rename = "36-45")]
    From36To45,
    #[serde(rename = "46-55")]
    From46To55,
    #[serde(rename = "56+")]
    From56,
}

impl AgeBand {
    pub const ALL: [AgeBand; 5] = [
        AgeBand::UpTo25,
        AgeBand::From26To35,
        AgeBand::From36To45,
        AgeBand::From46To55,
        AgeBand::From56,
    ];

    /// Band for an age in years. Ages under 18 fall in the first band.
    pub fn for_age(age: u32) -> Self {
        match age {
            0..=25 => AgeBand::UpTo25,
            26..=35 => AgeBand::From26To35,
            36..=45 => AgeBand::From36To45,
            46..=55 => AgeBand::From46To55,
            _ => AgeBand::From56,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AgeBand::UpTo25 => "18-25",
            AgeBand::From26To35 => "26-35",
            AgeBand::From36To45 => "36-45",
            AgeBand::From46To55 => "46-55",
            AgeBand::From56 => "56+",
        }
    }
}
