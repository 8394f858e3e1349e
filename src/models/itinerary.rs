//! Itinerary models: skeleton days, stops, and the final trip plan

use crate::destination::TravelScope;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Short natural-language description of the trip's tone and theme.
///
/// Produced by the intent analyzer; consumed by the skeleton planner and
/// the logistics generator. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelSummary(pub String);

impl TravelSummary {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TravelSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single named, geolocated point of interest within a day.
///
/// Coordinates are decimal degrees. Missing coordinates are a recoverable
/// rendering condition, not a pipeline failure: the stop stays in the
/// itinerary text and is skipped from map geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    /// Place name
    pub name: String,
    /// Latitude in decimal degrees
    #[serde(default)]
    pub lat: Option<f64>,
    /// Longitude in decimal degrees
    #[serde(default)]
    pub lon: Option<f64>,
}

impl Stop {
    /// Create a stop with known coordinates
    #[must_use]
    pub fn new(name: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            name: name.into(),
            lat: Some(lat),
            lon: Some(lon),
        }
    }

    /// Whether both coordinates are present
    #[must_use]
    pub fn has_coordinates(&self) -> bool {
        self.lat.is_some() && self.lon.is_some()
    }
}

/// Markdown narrative attached to exactly one itinerary day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayContent(pub String);

impl DayContent {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DayContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One day of the itinerary skeleton.
///
/// Day indices are 1-based, unique and contiguous; the skeleton planner
/// rejects any model output that violates this. `content` is attached
/// exactly once by the day detailer, after which the day is immutable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItineraryDay {
    /// 1-based day index
    pub day: u32,
    /// Title or theme for the day
    pub title: String,
    /// Ordered stops for the day
    pub spots: Vec<Stop>,
    /// Detailed narrative, attached by the day detailer
    #[serde(default)]
    pub content: Option<DayContent>,
}

impl ItineraryDay {
    /// Stop names joined into a readable route list
    #[must_use]
    pub fn spot_names(&self) -> String {
        self.spots
            .iter()
            .map(|s| s.name.as_str())
            .collect::<Vec<_>>()
            .join("、")
    }
}

/// Pre-departure checklist produced once per run, scoped to the whole trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticsChecklist {
    /// Checklist body, markdown
    pub markdown: String,
    /// The classification the checklist was composed for
    pub scope: TravelScope,
}

/// A map-ready point extracted from the itinerary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapPoint {
    /// 1-based day index the point belongs to
    pub day: u32,
    /// Place name
    pub name: String,
    /// Latitude in decimal degrees
    pub lat: f64,
    /// Longitude in decimal degrees
    pub lon: f64,
}

/// The terminal artifact of one pipeline run.
///
/// Built incrementally across the four stages within a single run and
/// handed to external consumers (display layer, exporters). A new run
/// produces a fresh plan; there is no merge of prior results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripPlan {
    /// Destination the plan was generated for
    pub destination: String,
    /// Travel tone summary
    pub summary: TravelSummary,
    /// Ordered days, each with detailed content
    pub days: Vec<ItineraryDay>,
    /// Pre-departure checklist
    pub logistics: LogisticsChecklist,
    /// Concatenated per-day markdown report
    pub full_report: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_coordinates() {
        let stop = Stop::new("故宫博物院", 39.9163, 116.3971);
        assert!(stop.has_coordinates());

        let nameless = Stop {
            name: "未知景点".to_string(),
            lat: Some(39.9),
            lon: None,
        };
        assert!(!nameless.has_coordinates());
    }

    #[test]
    fn test_spot_names_join() {
        let day = ItineraryDay {
            day: 1,
            title: "皇城根下".to_string(),
            spots: vec![
                Stop::new("故宫博物院", 39.9163, 116.3971),
                Stop::new("景山公园", 39.9220, 116.3956),
            ],
            content: None,
        };
        assert_eq!(day.spot_names(), "故宫博物院、景山公园");
    }

    #[test]
    fn test_stop_deserializes_without_coordinates() {
        let stop: Stop = serde_json::from_str(r#"{"name": "胡同漫步"}"#).unwrap();
        assert_eq!(stop.name, "胡同漫步");
        assert!(stop.lat.is_none());
        assert!(stop.lon.is_none());
    }
}
