//! Skeleton planning: travel summary -> ordered day-by-day skeleton

use crate::Result;
use crate::error::{Stage, TripsmithError};
use crate::llm::ChatClient;
use crate::models::{ItineraryDay, Stop, TravelSummary};
use crate::stages::strip_code_fences;
use serde::Deserialize;
use tracing::{debug, info};

const SYSTEM_ROLE: &str = "精通地理信息的行程规划师";

#[derive(Debug, Deserialize)]
struct SkeletonResponse {
    itinerary: Vec<SkeletonDay>,
}

#[derive(Debug, Deserialize)]
struct SkeletonDay {
    day: u32,
    title: String,
    spots: Vec<SkeletonSpot>,
}

#[derive(Debug, Deserialize)]
struct SkeletonSpot {
    name: String,
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lon: Option<f64>,
}

/// Converts the travel summary into an ordered list of day records with
/// named, geolocated stops
pub struct SkeletonPlanner;

impl SkeletonPlanner {
    /// Plan the day-by-day skeleton for the trip.
    ///
    /// Parsing fails closed: invalid JSON, missing keys, wrong element
    /// types, a wrong day count, or non-contiguous day indices are all
    /// fatal for the run. Stops with missing coordinates pass through
    /// unchanged; a downstream map consumer degrades to text-only.
    pub async fn plan<C>(
        client: &C,
        summary: &TravelSummary,
        day_count: u32,
        destination: &str,
    ) -> Result<Vec<ItineraryDay>>
    where
        C: ChatClient + ?Sized,
    {
        debug!("Planning {}-day skeleton for '{}'", day_count, destination);

        let prompt = Self::build_prompt(summary, day_count, destination);
        let raw = client.complete(&prompt, SYSTEM_ROLE, true).await?;
        let days = Self::parse_skeleton(&raw, day_count)?;

        info!(
            "Skeleton ready: {} days, {} stops total",
            days.len(),
            days.iter().map(|d| d.spots.len()).sum::<usize>()
        );
        Ok(days)
    }

    fn build_prompt(summary: &TravelSummary, day_count: u32, destination: &str) -> String {
        format!(
            "目的地：{destination}\n\
             基调：{summary}\n\
             天数：{day_count}天\n\
             \n\
             任务：规划每天的行程骨架，重点是地理位置。\n\
             要求：\n\
             1. 返回 JSON 格式，不要包含 Markdown 标记。\n\
             2. 包含一个列表 \"itinerary\"，恰好 {day_count} 项，\"day\" 从 1 开始连续编号。\n\
             3. 每一天包含：\"day\"(数字), \"title\"(标题), \"spots\"(景点列表)。\n\
             4. \"spots\" 列表中的每个景点，必须包含 \"name\"(名称), \"lat\"(纬度), \"lon\"(经度)。\n\
             5. 经纬度请根据景点实际位置尽可能准确（例如：故宫和颐和园的坐标必须不同）。\n\
             \n\
             JSON 结构示例：\n\
             {{\"itinerary\": [{{\"day\": 1, \"title\": \"皇城根下\", \"spots\": \
             [{{\"name\": \"故宫博物院\", \"lat\": 39.9163, \"lon\": 116.3971}}]}}]}}"
        )
    }

    /// Parse and validate a raw skeleton response
    pub(crate) fn parse_skeleton(raw: &str, day_count: u32) -> Result<Vec<ItineraryDay>> {
        let cleaned = strip_code_fences(raw);

        let response: SkeletonResponse = serde_json::from_str(cleaned).map_err(|e| {
            TripsmithError::response_shape(
                Stage::SkeletonPlanning,
                format!("expected a JSON object with an \"itinerary\" list: {e}"),
            )
        })?;

        if response.itinerary.len() != day_count as usize {
            return Err(TripsmithError::response_shape(
                Stage::SkeletonPlanning,
                format!(
                    "expected exactly {} days, got {}",
                    day_count,
                    response.itinerary.len()
                ),
            ));
        }

        for (index, entry) in response.itinerary.iter().enumerate() {
            let expected = index as u32 + 1;
            if entry.day != expected {
                return Err(TripsmithError::response_shape(
                    Stage::SkeletonPlanning,
                    format!(
                        "day indices must be contiguous ascending from 1; position {} has day {}",
                        index + 1,
                        entry.day
                    ),
                ));
            }
            if entry.title.trim().is_empty() {
                return Err(TripsmithError::response_shape(
                    Stage::SkeletonPlanning,
                    format!("day {} has an empty title", entry.day),
                ));
            }
            if entry.spots.is_empty() {
                return Err(TripsmithError::response_shape(
                    Stage::SkeletonPlanning,
                    format!("day {} has no stops", entry.day),
                ));
            }
        }

        Ok(response
            .itinerary
            .into_iter()
            .map(|entry| ItineraryDay {
                day: entry.day,
                title: entry.title,
                spots: entry
                    .spots
                    .into_iter()
                    .map(|spot| Stop {
                        name: spot.name,
                        lat: spot.lat,
                        lon: spot.lon,
                    })
                    .collect(),
                content: None,
            })
            .collect())
    }
}
