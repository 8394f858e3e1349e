//! `Tripsmith` - Prompt-chained multi-day travel itinerary planning
//!
//! This library turns a small set of user travel preferences into a
//! multi-day itinerary with geolocated stops, a markdown report, and a
//! pre-departure logistics checklist, by chaining four sequential
//! chat-completion stages.

pub mod config;
pub mod destination;
pub mod error;
pub mod llm;
pub mod models;
pub mod pipeline;
pub mod report;
pub mod stages;

// Re-export core types for public API
pub use config::TripsmithConfig;
pub use destination::TravelScope;
pub use error::{Stage, TripsmithError};
pub use llm::{ChatApiClient, ChatClient};
pub use models::{
    BudgetTier, CompanionType, DayContent, ItineraryDay, LogisticsChecklist, MapPoint,
    PacePreference, Stop, TravelSummary, TripPlan, TripRequest,
};
pub use pipeline::{NoopObserver, PlannerPipeline, ProgressObserver};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, TripsmithError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
