//! Trip request model: the immutable input of one generation run

use crate::TripsmithError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Who is travelling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompanionType {
    Solo,
    Couple,
    WithParents,
    WithChildren,
    Friends,
}

impl CompanionType {
    /// Label used in prompts and reports
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            CompanionType::Solo => "独自一人",
            CompanionType::Couple => "情侣",
            CompanionType::WithParents => "带父母",
            CompanionType::WithChildren => "带孩子",
            CompanionType::Friends => "朋友结伴",
        }
    }
}

impl fmt::Display for CompanionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for CompanionType {
    type Err = TripsmithError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "solo" | "独自一人" => Ok(CompanionType::Solo),
            "couple" | "情侣" => Ok(CompanionType::Couple),
            "with-parents" | "带父母" => Ok(CompanionType::WithParents),
            "with-children" | "带孩子" => Ok(CompanionType::WithChildren),
            "friends" | "朋友结伴" => Ok(CompanionType::Friends),
            other => Err(TripsmithError::validation(format!(
                "Unknown companion type '{other}'. Expected one of: solo, couple, with-parents, with-children, friends"
            ))),
        }
    }
}

/// Budget tier, ordered from cheapest to most expensive
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BudgetTier {
    Shoestring,
    Economy,
    Comfort,
    Luxury,
}

impl BudgetTier {
    /// Label used in prompts and reports
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            BudgetTier::Shoestring => "穷游",
            BudgetTier::Economy => "经济",
            BudgetTier::Comfort => "舒适",
            BudgetTier::Luxury => "豪华",
        }
    }
}

impl fmt::Display for BudgetTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for BudgetTier {
    type Err = TripsmithError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "shoestring" | "穷游" => Ok(BudgetTier::Shoestring),
            "economy" | "经济" => Ok(BudgetTier::Economy),
            "comfort" | "舒适" => Ok(BudgetTier::Comfort),
            "luxury" | "豪华" => Ok(BudgetTier::Luxury),
            other => Err(TripsmithError::validation(format!(
                "Unknown budget tier '{other}'. Expected one of: shoestring, economy, comfort, luxury"
            ))),
        }
    }
}

/// Preferred trip pace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PacePreference {
    Relaxed,
    Moderate,
    Packed,
}

impl PacePreference {
    /// Label used in prompts and reports
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            PacePreference::Relaxed => "悠闲",
            PacePreference::Moderate => "适中",
            PacePreference::Packed => "紧凑",
        }
    }
}

impl fmt::Display for PacePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for PacePreference {
    type Err = TripsmithError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "relaxed" | "悠闲" => Ok(PacePreference::Relaxed),
            "moderate" | "适中" => Ok(PacePreference::Moderate),
            "packed" | "紧凑" => Ok(PacePreference::Packed),
            other => Err(TripsmithError::validation(format!(
                "Unknown pace preference '{other}'. Expected one of: relaxed, moderate, packed"
            ))),
        }
    }
}

/// User travel preferences for a single generation run.
///
/// Created once per run from user input; immutable for the run's duration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripRequest {
    /// Destination text, as typed by the user
    pub destination: String,
    /// Departure date
    pub departure: NaiveDate,
    /// Trip length in days
    pub days: u32,
    /// Traveler composition
    pub companions: CompanionType,
    /// Budget tier
    pub budget: BudgetTier,
    /// Pace preference, if any
    pub pace: Option<PacePreference>,
    /// Interest tags
    pub interests: Vec<String>,
}

impl TripRequest {
    /// Maximum supported trip length
    pub const MAX_DAYS: u32 = 10;

    /// Validate the request before a run starts
    pub fn validate(&self) -> crate::Result<()> {
        if self.destination.trim().is_empty() {
            return Err(TripsmithError::validation("Destination cannot be empty"));
        }

        if self.days == 0 || self.days > Self::MAX_DAYS {
            return Err(TripsmithError::validation(format!(
                "Trip length must be between 1 and {} days, got: {}",
                Self::MAX_DAYS,
                self.days
            )));
        }

        Ok(())
    }

    /// Short user profile string passed to the day detailer
    #[must_use]
    pub fn user_profile(&self) -> String {
        match self.pace {
            Some(pace) => format!("{}、{}、节奏{}", self.companions, self.budget, pace),
            None => format!("{}、{}", self.companions, self.budget),
        }
    }

    /// Interest tags joined for prompt embedding
    #[must_use]
    pub fn interests_joined(&self) -> String {
        self.interests.join("、")
    }
}
