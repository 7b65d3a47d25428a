//! Structured prompt assembly
//!
//! Joins role/context/action fields into one labeled prompt and gives quick
//! structural feedback on which of the three parts are missing or too thin.

use serde::{Deserialize, Serialize};

const ROLE_MIN_CHARS: usize = 5;
const CONTEXT_MIN_CHARS: usize = 10;
const ACTION_MIN_CHARS: usize = 5;

/// Join the provided parts with their section labels. Empty or absent parts
/// are skipped.
pub fn build_prompt(role: Option<&str>, context: Option<&str>, action: Option<&str>) -> String {
    let mut parts = Vec::new();

    if let Some(role) = role.filter(|s| !s.is_empty()) {
        parts.push(format!("역할: {role}"));
    }
    if let Some(context) = context.filter(|s| !s.is_empty()) {
        parts.push(format!("상황: {context}"));
    }
    if let Some(action) = action.filter(|s| !s.is_empty()) {
        parts.push(format!("행동: {action}"));
    }

    parts.join("\n")
}

/// Structural completeness score with per-part feedback lines
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructureAnalysis {
    pub score: i32,
    pub feedback: Vec<String>,
}

fn part_len(part: Option<&str>) -> usize {
    part.map(|s| s.chars().count()).unwrap_or(0)
}

/// Score the three-part structure: 100 minus fixed deductions for each part
/// that is missing or below its minimum length.
pub fn analyze_structure(
    role: Option<&str>,
    context: Option<&str>,
    action: Option<&str>,
) -> StructureAnalysis {
    let mut score = 100;
    let mut feedback = Vec::new();

    if part_len(role) < ROLE_MIN_CHARS {
        score -= 20;
        feedback.push("⚠️ 역할(Role) 정의가 불명확합니다. 구체적인 페르소나를 지정하세요.".to_string());
    } else {
        feedback.push("✅ 역할 정의가 훌륭합니다.".to_string());
    }

    if part_len(context) < CONTEXT_MIN_CHARS {
        score -= 30;
        feedback.push("⚠️ 상황(Context) 설명이 부족합니다. 현재 상태를 더 자세히 묘사하세요.".to_string());
    } else {
        feedback.push("✅ 상황 설명이 명확합니다.".to_string());
    }

    if part_len(action) < ACTION_MIN_CHARS {
        score -= 20;
        feedback.push("⚠️ 행동(Action) 지시가 모호합니다. 원하는 결과를 명확히 요청하세요.".to_string());
    } else {
        feedback.push("✅ 행동 지시가 구체적입니다.".to_string());
    }

    if score < 60 {
        feedback.push("💡 전체적으로 프롬프트의 완성도가 낮습니다. 3요소를 모두 갖춰보세요.".to_string());
    } else if score >= 90 {
        feedback.push("🏆 완벽한 프롬프트 구조입니다!".to_string());
    }

    StructureAnalysis { score, feedback }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_labeled_sections() {
        let prompt = build_prompt(Some("senior reviewer"), Some("legacy codebase"), Some("find bugs"));
        assert_eq!(
            prompt,
            "역할: senior reviewer\n상황: legacy codebase\n행동: find bugs"
        );
    }

    #[test]
    fn skips_empty_parts() {
        assert_eq!(build_prompt(None, Some("context here"), None), "상황: context here");
        assert_eq!(build_prompt(Some(""), None, None), "");
    }

    #[test]
    fn full_structure_scores_100() {
        let analysis = analyze_structure(
            Some("backend engineer"),
            Some("service is timing out"),
            Some("diagnose it"),
        );
        assert_eq!(analysis.score, 100);
        assert_eq!(analysis.feedback.len(), 4);
        assert!(analysis.feedback[3].contains("완벽한"));
    }

    #[test]
    fn missing_parts_deduct_fixed_points() {
        let analysis = analyze_structure(None, None, None);
        assert_eq!(analysis.score, 30); // 100 - 20 - 30 - 20
        assert_eq!(analysis.feedback.len(), 4);
        assert!(analysis.feedback[3].contains("완성도가 낮습니다"));
    }

    #[test]
    fn short_parts_count_as_missing() {
        let analysis = analyze_structure(Some("dev"), Some("context is long enough"), Some("do x"));
        // role (3 chars) and action (4 chars) are below their minimums
        assert_eq!(analysis.score, 60);
    }

    #[test]
    fn korean_lengths_counted_in_chars() {
        let analysis = analyze_structure(Some("백엔드 엔지니어"), Some("서비스 응답이 느려지고 있습니다"), Some("원인을 분석해줘"));
        assert_eq!(analysis.score, 100);
    }
}
