//! Day detailing: one skeleton day -> markdown narrative

use crate::Result;
use crate::error::{Stage, TripsmithError};
use crate::llm::ChatClient;
use crate::models::{DayContent, ItineraryDay};
use tracing::debug;

const SYSTEM_ROLE: &str = "金牌导游";

/// Expands one skeleton day into a detailed markdown narrative.
///
/// The orchestrator invokes this once per day, sequentially, in
/// ascending day order; there is no fan-out.
pub struct DayDetailer;

impl DayDetailer {
    /// Write the detailed guide for a single day
    pub async fn detail<C>(
        client: &C,
        day: &ItineraryDay,
        user_profile: &str,
    ) -> Result<DayContent>
    where
        C: ChatClient + ?Sized,
    {
        debug!("Detailing day {}: {}", day.day, day.title);

        let prompt = Self::build_prompt(day, user_profile);
        let raw = client.complete(&prompt, SYSTEM_ROLE, false).await?;

        let content = raw.trim();
        if content.is_empty() {
            return Err(TripsmithError::response_shape(
                Stage::DayDetailing,
                format!("empty narrative for day {}", day.day),
            ));
        }

        Ok(DayContent(content.to_string()))
    }

    fn build_prompt(day: &ItineraryDay, user_profile: &str) -> String {
        format!(
            "为第 {} 天生成详细攻略。\n\
             \n\
             当日主题：{}\n\
             核心景点路线：{}\n\
             用户画像：{}\n\
             \n\
             要求：\n\
             1. 输出 Markdown 格式，层级清晰。\n\
             2. 按「上午」「午餐」「下午」「晚餐」「晚上」的时间轴撰写。\n\
             3. 详细描写景点玩法，推荐具体的餐厅与招牌菜（给出店名）。\n\
             4. 给出景点之间的具体交通建议。\n\
             5. 附上避坑提示。",
            day.day,
            day.title,
            day.spot_names(),
            user_profile,
        )
    }
}
