//! Data models for the Tripsmith application
//!
//! This module contains the core domain models organized by concern:
//! - Request: user-facing trip parameters for one generation run
//! - Itinerary: the skeleton, per-day content, and final aggregate plan

pub mod itinerary;
pub mod request;

// Re-export all public types for convenient access
pub use itinerary::{
    DayContent, ItineraryDay, LogisticsChecklist, MapPoint, Stop, TravelSummary, TripPlan,
};
pub use request::{BudgetTier, CompanionType, PacePreference, TripRequest};
