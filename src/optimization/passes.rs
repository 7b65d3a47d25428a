//! The rewrite passes
//!
//! Passes run strictly in order — each pass's output is the next pass's
//! input: filler removal, line deduplication, whitespace normalization,
//! verbosity reduction. Every rule that changes the text logs a technique.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

use super::{
    CompressionStats, Impact, ModelSavings, OptimizationResult, PromptSnapshot, Technique,
    TechniqueCategory,
};
use crate::cost::{self, ASSUMED_OUTPUT_TOKENS, MODEL_PRICING};
use crate::quality::QualityScorer;
use crate::tokens;

/// Accepted quality regression, in overall score points
const QUALITY_DELTA_TOLERANCE: i64 = 5;

/// Duplicate-line technique names embed this many leading characters
const DUPLICATE_PREVIEW_CHARS: usize = 30;

struct RewriteRule {
    pattern: Regex,
    replacement: &'static str,
    name: &'static str,
}

impl RewriteRule {
    fn new(pattern: &str, replacement: &'static str, name: &'static str) -> Self {
        Self {
            pattern: Regex::new(pattern).expect("static rewrite pattern"),
            replacement,
            name,
        }
    }
}

/// Politeness and filler phrases, Korean and English
static FILLER_RULES: Lazy<Vec<RewriteRule>> = Lazy::new(|| {
    vec![
        RewriteRule::new(r"제발\s*", "", "Removed emotional filler"),
        RewriteRule::new(r"부탁드립니다\.?\s*", "", "Removed closing request phrase"),
        RewriteRule::new(r"감사합니다\.?\s*", "", "Removed thank-you phrase"),
        RewriteRule::new(r"(?i)please\s*", "", "Removed \"please\""),
        RewriteRule::new(r"(?i)could you (please\s*)?", "", "Simplified \"could you\""),
        RewriteRule::new(r"(?i)I would like you to\s*", "", "Simplified \"I would like you to\""),
        RewriteRule::new(r"(?i)would you (kindly\s*)?(please\s*)?", "", "Simplified \"would you\""),
        RewriteRule::new(r"(?i)I want you to\s*", "", "Simplified \"I want you to\""),
    ]
});

/// Wordy phrases swapped for concise equivalents
static VERBOSE_RULES: Lazy<Vec<RewriteRule>> = Lazy::new(|| {
    vec![
        RewriteRule::new(r"(?i)in order to", "to", "\"in order to\" → \"to\""),
        RewriteRule::new(r"(?i)due to the fact that", "because", "\"due to the fact that\" → \"because\""),
        RewriteRule::new(r"(?i)at this point in time", "now", "\"at this point in time\" → \"now\""),
        RewriteRule::new(r"(?i)in the event that", "if", "\"in the event that\" → \"if\""),
        RewriteRule::new(r"(?i)with regard to", "about", "\"with regard to\" → \"about\""),
        RewriteRule::new(r"~에 대해서", "~에 대해", "\"~에 대해서\" → \"~에 대해\""),
    ]
});

static EXCESS_NEWLINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());
static EXCESS_SPACES: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]{2,}").unwrap());

fn apply_rewrite_rules(
    text: String,
    rules: &[RewriteRule],
    category: TechniqueCategory,
    impact: Impact,
    techniques: &mut Vec<Technique>,
) -> String {
    let mut result = text;
    for rule in rules {
        let rewritten = rule.pattern.replace_all(&result, rule.replacement);
        if rewritten != result {
            techniques.push(Technique {
                name: rule.name.to_string(),
                category,
                impact,
            });
            result = rewritten.into_owned();
        }
    }
    result
}

/// Drop repeated non-blank lines, comparing trimmed lowercased forms.
/// Blank lines are always kept.
fn dedupe_lines(text: &str, techniques: &mut Vec<Technique>) -> String {
    let mut seen = HashSet::new();
    let mut kept = Vec::new();

    for line in text.split('\n') {
        let normalized = line.trim().to_lowercase();
        if normalized.is_empty() || seen.insert(normalized) {
            kept.push(line);
        } else {
            let preview: String = line.trim().chars().take(DUPLICATE_PREVIEW_CHARS).collect();
            techniques.push(Technique {
                name: format!("Removed duplicate instruction: \"{preview}...\""),
                category: TechniqueCategory::Deduplication,
                impact: Impact::Medium,
            });
        }
    }

    kept.join("\n")
}

/// Collapse 3+ line breaks to 2, runs of spaces/tabs to one space, and trim
fn normalize_whitespace(text: &str, techniques: &mut Vec<Technique>) -> String {
    let collapsed = EXCESS_NEWLINES.replace_all(text, "\n\n");
    let collapsed = EXCESS_SPACES.replace_all(&collapsed, " ");
    let result = collapsed.trim().to_string();

    if result != text {
        techniques.push(Technique {
            name: "Collapsed excess whitespace and blank lines".to_string(),
            category: TechniqueCategory::Whitespace,
            impact: Impact::Low,
        });
    }

    result
}

/// Runs the rewrite passes under one domain's quality profile
pub struct OptimizationPipeline {
    scorer: QualityScorer,
}

impl OptimizationPipeline {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            scorer: QualityScorer::new(domain),
        }
    }

    /// Rewrite `text` and compare before/after tokens, quality, and cost.
    /// Callers are expected to validate that `text` is non-blank.
    pub fn optimize(&self, text: &str, requests_per_month: u32) -> OptimizationResult {
        let original_tokens = tokens::estimate(text);
        let original_quality = self.scorer.evaluate(text);
        let original_cost = cost::compare_all(original_tokens, ASSUMED_OUTPUT_TOKENS);

        let mut techniques = Vec::new();

        let optimized = apply_rewrite_rules(
            text.to_string(),
            &FILLER_RULES,
            TechniqueCategory::FillerRemoval,
            Impact::Low,
            &mut techniques,
        );
        let optimized = dedupe_lines(&optimized, &mut techniques);
        let optimized = normalize_whitespace(&optimized, &mut techniques);
        let optimized = apply_rewrite_rules(
            optimized,
            &VERBOSE_RULES,
            TechniqueCategory::VerboseReduction,
            Impact::Medium,
            &mut techniques,
        );

        let optimized_tokens = tokens::estimate(&optimized);
        let optimized_quality = self.scorer.evaluate(&optimized);
        let optimized_cost = cost::compare_all(optimized_tokens, ASSUMED_OUTPUT_TOKENS);

        let tokens_saved = original_tokens as i64 - optimized_tokens as i64;
        let compression_ratio = if original_tokens > 0 {
            (tokens_saved as f64 / original_tokens as f64 * 1000.0).round() / 10.0
        } else {
            0.0
        };
        let quality_delta =
            optimized_quality.overall.score as i64 - original_quality.overall.score as i64;

        let requests_per_year = requests_per_month as u64 * 12;
        let mut model_savings = BTreeMap::new();
        for pricing in &MODEL_PRICING {
            if let Some(savings) =
                cost::annual_savings(original_tokens, optimized_tokens, requests_per_year, pricing.model_id)
            {
                model_savings.insert(
                    pricing.model_id.to_string(),
                    ModelSavings {
                        model_name: pricing.name.to_string(),
                        provider: pricing.provider.to_string(),
                        savings,
                    },
                );
            }
        }

        debug!(
            original_tokens,
            optimized_tokens,
            techniques = techniques.len(),
            quality_delta,
            "optimization complete"
        );

        OptimizationResult {
            original: PromptSnapshot {
                text: text.to_string(),
                tokens: original_tokens,
                quality: original_quality,
                cost: original_cost,
            },
            optimized: PromptSnapshot {
                text: optimized,
                tokens: optimized_tokens,
                quality: optimized_quality,
                cost: optimized_cost,
            },
            compression: CompressionStats {
                tokens_saved,
                compression_ratio,
                quality_delta,
                quality_preserved: quality_delta >= -QUALITY_DELTA_TOLERANCE,
                techniques,
            },
            model_savings,
            requests_per_month,
        }
    }
}

/// One-shot convenience wrapper around [`OptimizationPipeline`]
pub fn optimize(text: &str, domain: &str, requests_per_month: u32) -> OptimizationResult {
    OptimizationPipeline::new(domain).optimize(text, requests_per_month)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn techniques_in(result: &OptimizationResult, category: TechniqueCategory) -> usize {
        result
            .compression
            .techniques
            .iter()
            .filter(|t| t.category == category)
            .count()
    }

    #[test]
    fn fillers_stripped_but_word_repetition_kept() {
        let result = optimize("please could you explain explain things", "general", 1000);
        assert_eq!(result.optimized.text, "explain explain things");
        // Dedup works per line, not per word, so the doubled word survives.
        assert!(result.optimized.text.contains("explain explain"));
        assert_eq!(techniques_in(&result, TechniqueCategory::FillerRemoval), 2);
        assert_eq!(techniques_in(&result, TechniqueCategory::Deduplication), 0);
    }

    #[test]
    fn duplicate_lines_dropped_case_insensitively() {
        let text = "Check the inputs\n\ncheck the inputs\nThen report";
        let result = optimize(text, "general", 1000);
        assert_eq!(result.optimized.text, "Check the inputs\n\nThen report");
        assert_eq!(techniques_in(&result, TechniqueCategory::Deduplication), 1);
        let technique = result
            .compression
            .techniques
            .iter()
            .find(|t| t.category == TechniqueCategory::Deduplication)
            .unwrap();
        assert_eq!(technique.name, "Removed duplicate instruction: \"check the inputs...\"");
        assert_eq!(technique.impact, Impact::Medium);
    }

    #[test]
    fn duplicate_preview_truncated_to_30_chars() {
        let long_line = "Summarize the findings of the quarterly report in detail";
        let text = format!("{long_line}\n{long_line}");
        let result = optimize(&text, "general", 1000);
        let technique = &result.compression.techniques[0];
        assert_eq!(
            technique.name,
            "Removed duplicate instruction: \"Summarize the findings of the ...\""
        );
    }

    #[test]
    fn whitespace_collapsed_and_trimmed() {
        let text = "  keep this\n\n\n\nand  this\t\tend  ";
        let result = optimize(text, "general", 1000);
        assert_eq!(result.optimized.text, "keep this\n\nand this end");
        assert_eq!(techniques_in(&result, TechniqueCategory::Whitespace), 1);
    }

    #[test]
    fn verbose_phrases_shortened() {
        let text = "In order to pass, rewrite this due to the fact that it fails";
        let result = optimize(text, "general", 1000);
        assert_eq!(result.optimized.text, "to pass, rewrite this because it fails");
        assert_eq!(techniques_in(&result, TechniqueCategory::VerboseReduction), 2);
    }

    #[test]
    fn dedup_and_whitespace_idempotent_on_pipeline_output() {
        let text = "Step one\nStep one\n\n\n\nStep   two with	tabs";
        let first = optimize(text, "general", 1000);
        let second = optimize(&first.optimized.text, "general", 1000);
        assert_eq!(second.optimized.text, first.optimized.text);
        assert_eq!(techniques_in(&second, TechniqueCategory::Deduplication), 0);
        assert_eq!(techniques_in(&second, TechniqueCategory::Whitespace), 0);
    }

    #[test]
    fn compression_math_is_consistent() {
        let text = "please summarize this document for me\nplease summarize this document for me";
        let result = optimize(text, "general", 1000);
        assert_eq!(
            result.compression.tokens_saved,
            result.original.tokens as i64 - result.optimized.tokens as i64
        );
        let expected_ratio = (result.compression.tokens_saved as f64
            / result.original.tokens as f64
            * 1000.0)
            .round()
            / 10.0;
        assert_eq!(result.compression.compression_ratio, expected_ratio);
        assert_eq!(
            result.compression.quality_delta,
            result.optimized.quality.overall.score as i64
                - result.original.quality.overall.score as i64
        );
        assert_eq!(
            result.compression.quality_preserved,
            result.compression.quality_delta >= -5
        );
    }

    #[test]
    fn model_savings_cover_the_pricing_table() {
        let result = optimize("please write a very detailed summary", "general", 1000);
        assert_eq!(result.model_savings.len(), 6);
        let gpt5 = &result.model_savings["gpt-5"];
        assert_eq!(gpt5.provider, "OpenAI");
        assert_eq!(gpt5.savings.requests_per_year, 12_000);

        let direct = cost::annual_savings(
            result.original.tokens,
            result.optimized.tokens,
            12_000,
            "gpt-5",
        )
        .unwrap();
        assert_eq!(gpt5.savings.annual_savings, direct.annual_savings);
    }

    #[test]
    fn korean_fillers_removed() {
        let result = optimize("제발 요약해 주세요. 감사합니다.", "general", 1000);
        assert!(!result.optimized.text.contains("제발"));
        assert!(!result.optimized.text.contains("감사합니다"));
        assert!(techniques_in(&result, TechniqueCategory::FillerRemoval) >= 2);
    }

    #[test]
    fn both_snapshots_share_the_domain_profile() {
        let result = optimize("please refactor the code", "coding", 500);
        assert_eq!(result.original.quality.metadata.domain, "coding");
        assert_eq!(result.optimized.quality.metadata.domain, "coding");
        assert_eq!(result.requests_per_month, 500);
    }
}
