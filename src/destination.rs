//! Destination classification for logistics branching
//!
//! The logistics stage diverges on whether the destination is inside
//! mainland China. The decision is made here, by explicit lookup, before
//! any prompt is composed; a single model call is used only as a fallback
//! hint when the lookup is inconclusive.

use crate::Result;
use crate::llm::ChatClient;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// Whether a trip stays inside mainland China
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TravelScope {
    /// Mainland China: identity card, domestic apps
    Domestic,
    /// Abroad, including 港澳台: passport/visa, international apps
    International,
}

impl fmt::Display for TravelScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TravelScope::Domestic => write!(f, "境内"),
            TravelScope::International => write!(f, "境外"),
        }
    }
}

/// Mainland provinces, regions and frequently-planned cities
const DOMESTIC_MARKERS: &[&str] = &[
    "北京", "上海", "天津", "重庆", "河北", "山西", "辽宁", "吉林", "黑龙江", "江苏", "浙江",
    "安徽", "福建", "江西", "山东", "河南", "湖北", "湖南", "广东", "海南", "四川", "贵州",
    "云南", "陕西", "甘肃", "青海", "内蒙古", "广西", "西藏", "宁夏", "新疆", "广州", "深圳",
    "成都", "杭州", "西安", "南京", "武汉", "苏州", "厦门", "青岛", "大连", "长沙", "桂林",
    "丽江", "大理", "三亚", "敦煌", "哈尔滨", "昆明", "拉萨", "乌鲁木齐", "张家界", "黄山",
];

/// 港澳台 plus frequently-planned foreign destinations.
/// Checked before the domestic table so that e.g. "台湾" never matches a
/// mainland marker by accident.
const INTERNATIONAL_MARKERS: &[&str] = &[
    "香港", "澳门", "台湾", "台北", "高雄", "日本", "东京", "大阪", "京都", "关西", "北海道",
    "冲绳", "奈良", "韩国", "首尔", "釜山", "济州", "泰国", "曼谷", "清迈", "普吉", "新加坡",
    "马来西亚", "吉隆坡", "越南", "河内", "印尼", "巴厘岛", "菲律宾", "柬埔寨", "缅甸", "老挝",
    "尼泊尔", "印度", "斯里兰卡", "马尔代夫", "迪拜", "阿联酋", "土耳其", "伊斯坦布尔", "埃及",
    "法国", "巴黎", "英国", "伦敦", "意大利", "罗马", "米兰", "西班牙", "巴塞罗那", "德国",
    "柏林", "瑞士", "荷兰", "希腊", "葡萄牙", "奥地利", "捷克", "布拉格", "俄罗斯", "莫斯科",
    "美国", "纽约", "洛杉矶", "旧金山", "加拿大", "墨西哥", "巴西", "阿根廷", "澳大利亚",
    "悉尼", "墨尔本", "新西兰", "奥克兰",
];

/// Classify a destination by lookup.
///
/// Returns `None` when neither table matches; callers fall back to
/// [`classify_with_hint`].
#[must_use]
pub fn classify(destination: &str) -> Option<TravelScope> {
    let destination = destination.trim();
    if destination.is_empty() {
        return None;
    }

    if INTERNATIONAL_MARKERS
        .iter()
        .any(|marker| destination.contains(marker))
    {
        return Some(TravelScope::International);
    }

    if DOMESTIC_MARKERS
        .iter()
        .any(|marker| destination.contains(marker))
    {
        return Some(TravelScope::Domestic);
    }

    None
}

#[derive(Debug, Deserialize)]
struct ScopeHint {
    domestic: bool,
}

/// Classify a destination, consulting the model when the lookup is
/// inconclusive.
///
/// The model's answer is a hint only: an unparseable hint falls back to
/// [`TravelScope::International`], so an unknown destination still gets
/// passport and visa guidance.
pub async fn classify_with_hint<C>(client: &C, destination: &str) -> Result<TravelScope>
where
    C: ChatClient + ?Sized,
{
    if let Some(scope) = classify(destination) {
        debug!("Destination '{}' classified as {} by lookup", destination, scope);
        return Ok(scope);
    }

    debug!(
        "Destination '{}' not covered by lookup tables, asking the model",
        destination
    );

    let prompt = format!(
        "判断旅行目的地「{destination}」是否位于中国大陆境内（港澳台视为境外）。\n\
         只返回一个 JSON 对象，包含字段 \"domestic\"（布尔值）。"
    );
    let raw = client.complete(&prompt, "地理常识助手", true).await?;

    match serde_json::from_str::<ScopeHint>(raw.trim()) {
        Ok(hint) if hint.domestic => Ok(TravelScope::Domestic),
        Ok(_) => Ok(TravelScope::International),
        Err(e) => {
            warn!(
                "Unparseable scope hint for '{}' ({}), defaulting to international",
                destination, e
            );
            Ok(TravelScope::International)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TripsmithError;
    use async_trait::async_trait;

    struct FixedClient(String);

    #[async_trait]
    impl ChatClient for FixedClient {
        async fn complete(&self, _: &str, _: &str, _: bool) -> Result<String> {
            Ok(self.0.clone())
        }
    }

    struct FailingClient;

    #[async_trait]
    impl ChatClient for FailingClient {
        async fn complete(&self, _: &str, _: &str, _: bool) -> Result<String> {
            Err(TripsmithError::backend("connection refused"))
        }
    }

    #[test]
    fn test_domestic_lookup() {
        assert_eq!(classify("北京"), Some(TravelScope::Domestic));
        assert_eq!(classify("上海"), Some(TravelScope::Domestic));
        assert_eq!(classify("成都及周边"), Some(TravelScope::Domestic));
    }

    #[test]
    fn test_international_lookup() {
        assert_eq!(classify("日本·关西地区"), Some(TravelScope::International));
        assert_eq!(classify("巴黎"), Some(TravelScope::International));
        assert_eq!(classify("香港"), Some(TravelScope::International));
        assert_eq!(classify("台北"), Some(TravelScope::International));
    }

    #[test]
    fn test_unknown_destination_is_inconclusive() {
        assert_eq!(classify("阿特兰蒂斯"), None);
        assert_eq!(classify(""), None);
    }

    #[tokio::test]
    async fn test_hint_used_when_lookup_inconclusive() {
        let client = FixedClient(r#"{"domestic": true}"#.to_string());
        let scope = classify_with_hint(&client, "阿特兰蒂斯").await.unwrap();
        assert_eq!(scope, TravelScope::Domestic);
    }

    #[tokio::test]
    async fn test_lookup_wins_over_hint() {
        // Lookup hit: the model must not be consulted, so even a client
        // that would claim "domestic" cannot flip an international match.
        let client = FixedClient(r#"{"domestic": true}"#.to_string());
        let scope = classify_with_hint(&client, "巴黎").await.unwrap();
        assert_eq!(scope, TravelScope::International);
    }

    #[tokio::test]
    async fn test_unparseable_hint_defaults_to_international() {
        let client = FixedClient("呃，这个我不太确定".to_string());
        let scope = classify_with_hint(&client, "阿特兰蒂斯").await.unwrap();
        assert_eq!(scope, TravelScope::International);
    }

    #[tokio::test]
    async fn test_backend_failure_propagates() {
        let result = classify_with_hint(&FailingClient, "阿特兰蒂斯").await;
        assert!(matches!(result, Err(TripsmithError::Backend { .. })));
    }
}
