//! Intent analysis: trip request -> travel tone summary

use crate::Result;
use crate::error::{Stage, TripsmithError};
use crate::llm::ChatClient;
use crate::models::{TravelSummary, TripRequest};
use crate::stages::strip_code_fences;
use serde::Deserialize;
use tracing::{debug, info};

const SYSTEM_ROLE: &str = "资深旅行顾问";

#[derive(Debug, Deserialize)]
struct IntentResponse {
    summary: String,
}

/// Converts raw user inputs into a short travel tone summary
pub struct IntentAnalyzer;

impl IntentAnalyzer {
    /// Analyze a trip request and distill its travel tone.
    ///
    /// An invalid JSON response or a missing/empty `summary` field is
    /// fatal for the run: no fallback, no retry.
    pub async fn analyze<C>(client: &C, request: &TripRequest) -> Result<TravelSummary>
    where
        C: ChatClient + ?Sized,
    {
        debug!("Analyzing intent for destination '{}'", request.destination);

        let prompt = Self::build_prompt(request);
        let raw = client.complete(&prompt, SYSTEM_ROLE, true).await?;
        let summary = Self::parse_summary(&raw)?;

        info!("Travel tone: {}", summary);
        Ok(summary)
    }

    fn build_prompt(request: &TripRequest) -> String {
        let mut prompt = format!(
            "用户输入：\n\
             - 目的地：{}\n\
             - 出发日期：{}\n\
             - 行程天数：{}天\n\
             - 人员构成：{}\n\
             - 预算等级：{}\n",
            request.destination,
            request.departure,
            request.days,
            request.companions,
            request.budget,
        );
        if let Some(pace) = request.pace {
            prompt.push_str(&format!("- 节奏偏好：{pace}\n"));
        }
        prompt.push_str(&format!("- 特殊兴趣：{}\n", request.interests_joined()));
        prompt.push_str(
            "\n任务：分析并返回一个 JSON 对象，包含字段 \"summary\"\
             （一段简短的「旅行基调」描述，50字以内）。",
        );
        prompt
    }

    /// Extract the tone string from a raw model response
    pub(crate) fn parse_summary(raw: &str) -> Result<TravelSummary> {
        let cleaned = strip_code_fences(raw);

        let response: IntentResponse = serde_json::from_str(cleaned).map_err(|e| {
            TripsmithError::response_shape(
                Stage::IntentAnalysis,
                format!("expected a JSON object with a \"summary\" field: {e}"),
            )
        })?;

        let summary = response.summary.trim();
        if summary.is_empty() {
            return Err(TripsmithError::response_shape(
                Stage::IntentAnalysis,
                "the \"summary\" field is empty",
            ));
        }

        Ok(TravelSummary(summary.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetTier, CompanionType, PacePreference};
    use chrono::NaiveDate;

    fn request() -> TripRequest {
        TripRequest {
            destination: "北京".to_string(),
            departure: NaiveDate::from_ymd_opt(2026, 10, 1).unwrap(),
            days: 3,
            companions: CompanionType::Couple,
            budget: BudgetTier::Comfort,
            pace: Some(PacePreference::Moderate),
            interests: vec!["历史人文".to_string(), "地道美食".to_string()],
        }
    }

    #[test]
    fn test_prompt_embeds_all_fields() {
        let prompt = IntentAnalyzer::build_prompt(&request());
        assert!(prompt.contains("北京"));
        assert!(prompt.contains("2026-10-01"));
        assert!(prompt.contains("3天"));
        assert!(prompt.contains("情侣"));
        assert!(prompt.contains("舒适"));
        assert!(prompt.contains("适中"));
        assert!(prompt.contains("历史人文、地道美食"));
    }

    #[test]
    fn test_prompt_omits_absent_pace() {
        let mut req = request();
        req.pace = None;
        let prompt = IntentAnalyzer::build_prompt(&req);
        assert!(!prompt.contains("节奏偏好"));
    }

    #[test]
    fn test_parse_summary() {
        let raw = r#"{"summary": " 针对年轻情侣的北京古都之旅，主打历史人文与美食。 "}"#;
        let summary = IntentAnalyzer::parse_summary(raw).unwrap();
        assert_eq!(
            summary.as_str(),
            "针对年轻情侣的北京古都之旅，主打历史人文与美食。"
        );
    }

    #[test]
    fn test_parse_summary_with_fences() {
        let raw = "```json\n{\"summary\": \"短途美食之旅\"}\n```";
        let summary = IntentAnalyzer::parse_summary(raw).unwrap();
        assert_eq!(summary.as_str(), "短途美食之旅");
    }

    #[test]
    fn test_parse_rejects_non_json() {
        let err = IntentAnalyzer::parse_summary("这不是 JSON").unwrap_err();
        assert_eq!(err.stage(), Some(Stage::IntentAnalysis));
    }

    #[test]
    fn test_parse_rejects_missing_field() {
        let err = IntentAnalyzer::parse_summary(r#"{"tone": "x"}"#).unwrap_err();
        assert_eq!(err.stage(), Some(Stage::IntentAnalysis));
    }

    #[test]
    fn test_parse_rejects_empty_summary() {
        let err = IntentAnalyzer::parse_summary(r#"{"summary": "  "}"#).unwrap_err();
        assert_eq!(err.stage(), Some(Stage::IntentAnalysis));
    }
}
