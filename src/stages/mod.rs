//! The four sequential pipeline stages
//!
//! Each stage is a stateless service struct with one async operation
//! taking the chat client, mirroring the chain nodes of the workflow:
//! intent analysis, skeleton planning, day detailing, logistics.

pub mod detail;
pub mod intent;
pub mod logistics;
pub mod skeleton;

pub use detail::DayDetailer;
pub use intent::IntentAnalyzer;
pub use logistics::LogisticsGenerator;
pub use skeleton::SkeletonPlanner;

/// Strip surrounding code-fence markup from a model response.
///
/// Models are not guaranteed to honor "no markdown" instructions, so JSON
/// payloads sometimes arrive wrapped in ``` fences.
pub(crate) fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_json_fence() {
        let raw = "```json\n{\"summary\": \"好\"}\n```";
        assert_eq!(strip_code_fences(raw), "{\"summary\": \"好\"}");
    }

    #[test]
    fn test_strip_bare_fence() {
        let raw = "```\n[1, 2]\n```";
        assert_eq!(strip_code_fences(raw), "[1, 2]");
    }

    #[test]
    fn test_unfenced_text_only_trimmed() {
        assert_eq!(strip_code_fences("  {\"a\": 1} \n"), "{\"a\": 1}");
    }
}
