//! Report rendering: markdown document and map-point extraction
//!
//! External consumers get two views of a finished plan: a human-facing
//! markdown document and a flat geometry list for map display. Stops
//! with missing coordinates stay in the document but are skipped from
//! geometry — degraded rendering, never a failure.

use crate::models::{ItineraryDay, MapPoint, TripPlan};

/// Render the complete trip plan as a markdown document
#[must_use]
pub fn render_markdown(plan: &TripPlan) -> String {
    let mut doc = format!("# {} 专属旅行攻略\n\n", plan.destination);

    doc.push_str("## 旅行基调\n\n");
    doc.push_str(plan.summary.as_str());
    doc.push_str("\n\n");

    doc.push_str("## 详细行程\n\n");
    for day in &plan.days {
        doc.push_str(&format!("### Day {}：{}\n\n", day.day, day.title));
        if let Some(content) = &day.content {
            doc.push_str(content.as_str());
            doc.push_str("\n\n");
        }
    }

    doc.push_str("## 行前准备与后勤\n\n");
    doc.push_str(&plan.logistics.markdown);
    doc.push('\n');

    doc
}

/// Extract map-ready points from the itinerary.
///
/// Identity on the geometry fields: every stop that carries both
/// coordinates appears exactly once with its name, latitude and
/// longitude unchanged, in day-then-stop order.
#[must_use]
pub fn map_points(days: &[ItineraryDay]) -> Vec<MapPoint> {
    days.iter()
        .flat_map(|day| {
            day.spots.iter().filter_map(|stop| {
                let (lat, lon) = (stop.lat?, stop.lon?);
                Some(MapPoint {
                    day: day.day,
                    name: stop.name.clone(),
                    lat,
                    lon,
                })
            })
        })
        .collect()
}
