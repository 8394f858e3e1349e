//! Logistics generation: itinerary -> pre-departure checklist
//!
//! The domestic/international branch is decided by the destination
//! classifier before the prompt is composed; the prompt then pins the
//! decided branch instead of delegating the decision to the model.

use crate::Result;
use crate::destination::{self, TravelScope};
use crate::error::{Stage, TripsmithError};
use crate::llm::ChatClient;
use crate::models::{LogisticsChecklist, TravelSummary};
use tracing::{debug, info};

const SYSTEM_ROLE: &str = "贴心的旅行管家";

/// Produces the whole-trip pre-departure checklist
pub struct LogisticsGenerator;

impl LogisticsGenerator {
    /// Generate the checklist for the trip.
    ///
    /// Output always covers: document/visa guidance, a packing list, app
    /// recommendations, and an estimated-cost note. App and document
    /// guidance diverge on the classified travel scope.
    pub async fn generate<C>(
        client: &C,
        destination: &str,
        summary: &TravelSummary,
        aggregated_report: &str,
    ) -> Result<LogisticsChecklist>
    where
        C: ChatClient + ?Sized,
    {
        let scope = destination::classify_with_hint(client, destination).await?;
        debug!("Generating {} logistics for '{}'", scope, destination);

        let prompt = Self::build_prompt(destination, summary, aggregated_report, scope);
        let raw = client.complete(&prompt, SYSTEM_ROLE, false).await?;

        let markdown = raw.trim();
        if markdown.is_empty() {
            return Err(TripsmithError::response_shape(
                Stage::LogisticsGeneration,
                "empty checklist",
            ));
        }

        info!("Logistics checklist ready ({} scope)", scope);
        Ok(LogisticsChecklist {
            markdown: markdown.to_string(),
            scope,
        })
    }

    fn build_prompt(
        destination: &str,
        summary: &TravelSummary,
        aggregated_report: &str,
        scope: TravelScope,
    ) -> String {
        let branch = match scope {
            TravelScope::Domestic => {
                "目的地位于中国大陆境内。\n\
                 - 证件：仅需提醒携带身份证。\n\
                 - APP 推荐：高德地图或百度地图、大众点评、美团、支付宝/微信支付。\
                 绝对不要推荐 Google Maps。"
            }
            TravelScope::International => {
                "目的地位于境外（含港澳台）。\n\
                 - 证件：提醒护照有效期，并给出签证政策注意事项。\n\
                 - APP 推荐：Google Maps、Uber 或 Grab，以及目的地特色 App。"
            }
        };

        format!(
            "使用者是中国人。目的地：{destination}。\n\
             旅行基调：{summary}\n\
             基于已生成的完整行程：\n\
             {aggregated_report}\n\
             \n\
             请生成「行前准备清单」（Markdown 格式）。\n\
             {branch}\n\
             \n\
             输出必须包含：证件/签证、必备衣物与物品清单、APP 推荐、预估花费提示。"
        )
    }
}
