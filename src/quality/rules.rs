//! Static rule tables for quality scoring
//!
//! Weight profiles, lexical pattern rules, topical category detectors, and
//! improvement suggestion lists. Everything here is process-wide immutable
//! data built once at first use; evaluation is a pure function over it.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{Dimension, Level};

/// Weight vector over the seven dimensions. Weights need not sum to 1;
/// aggregation normalizes by the total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainWeights {
    pub clarity: f64,
    pub specificity: f64,
    pub structure: f64,
    pub completeness: f64,
    pub efficiency: f64,
    pub actionability: f64,
    pub domain_fit: f64,
}

impl DomainWeights {
    pub fn get(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Clarity => self.clarity,
            Dimension::Specificity => self.specificity,
            Dimension::Structure => self.structure,
            Dimension::Completeness => self.completeness,
            Dimension::Efficiency => self.efficiency,
            Dimension::Actionability => self.actionability,
            Dimension::DomainFit => self.domain_fit,
        }
    }
}

pub const CODING_WEIGHTS: DomainWeights = DomainWeights {
    clarity: 0.15,
    specificity: 0.20,
    structure: 0.20,
    completeness: 0.15,
    efficiency: 0.10,
    actionability: 0.15,
    domain_fit: 0.05,
};

pub const CREATIVE_WEIGHTS: DomainWeights = DomainWeights {
    clarity: 0.20,
    specificity: 0.10,
    structure: 0.10,
    completeness: 0.15,
    efficiency: 0.05,
    actionability: 0.20,
    domain_fit: 0.20,
};

pub const BUSINESS_WEIGHTS: DomainWeights = DomainWeights {
    clarity: 0.15,
    specificity: 0.15,
    structure: 0.20,
    completeness: 0.20,
    efficiency: 0.10,
    actionability: 0.15,
    domain_fit: 0.05,
};

pub const EDUCATION_WEIGHTS: DomainWeights = DomainWeights {
    clarity: 0.25,
    specificity: 0.15,
    structure: 0.15,
    completeness: 0.15,
    efficiency: 0.05,
    actionability: 0.15,
    domain_fit: 0.10,
};

pub const GENERAL_WEIGHTS: DomainWeights = DomainWeights {
    clarity: 0.20,
    specificity: 0.15,
    structure: 0.15,
    completeness: 0.15,
    efficiency: 0.10,
    actionability: 0.15,
    domain_fit: 0.10,
};

/// Resolve a domain name to its weight profile. Unknown names fall back to
/// the general profile.
pub fn weights_for(domain: &str) -> &'static DomainWeights {
    match domain {
        "coding" => &CODING_WEIGHTS,
        "creative" => &CREATIVE_WEIGHTS,
        "business" => &BUSINESS_WEIGHTS,
        "education" => &EDUCATION_WEIGHTS,
        _ => &GENERAL_WEIGHTS,
    }
}

/// One lexical rule: occurrences of `pattern` apply `points` per match,
/// capped at three matches.
pub struct PatternRule {
    pub pattern: Regex,
    pub points: f64,
    pub label: &'static str,
}

impl PatternRule {
    fn new(pattern: &str, points: f64, label: &'static str) -> Self {
        Self {
            pattern: Regex::new(pattern).expect("static rule pattern"),
            points,
            label,
        }
    }
}

/// Rule set for one dimension
pub struct DimensionRules {
    pub base_score: f64,
    pub positive: Vec<PatternRule>,
    pub negative: Vec<PatternRule>,
}

/// Occurrence count cap per rule
pub const MATCH_CAP: usize = 3;

/// Efficiency length check: prompts past this many words are penalized
pub const OPTIMAL_MAX_WORDS: usize = 500;
pub const PENALTY_PER_EXTRA_WORD: f64 = 0.05;
pub const MAX_LENGTH_PENALTY: f64 = 30.0;

/// Domain-fit bonuses, each applied at most once
pub const DETECTED_DOMAIN_BONUS: f64 = 20.0;
pub const TARGET_DOMAIN_BONUS: f64 = 15.0;

static RULE_TABLE: Lazy<[DimensionRules; 7]> = Lazy::new(|| {
    [
        // clarity
        DimensionRules {
            base_score: 50.0,
            positive: vec![
                PatternRule::new(r"(?i)^you are", 10.0, "Clear role definition"),
                PatternRule::new(r"(?i)\b(specifically|exactly|precisely)\b", 5.0, "Precision words"),
                PatternRule::new(r"(?i)\b(must|should|need to)\b", 5.0, "Clear requirements"),
            ],
            negative: vec![
                PatternRule::new(r"(?i)\b(maybe|perhaps|possibly|might)\b", -5.0, "Ambiguous hedging"),
                PatternRule::new(r"(?i)\b(stuff|things|something|whatever)\b", -8.0, "Vague terms"),
                PatternRule::new(r"(?i)\b(etc|and so on|and more)\b", -5.0, "Incomplete listing"),
            ],
        },
        // specificity
        DimensionRules {
            base_score: 40.0,
            positive: vec![
                PatternRule::new(
                    r"(?i)\b\d+\s*(words?|characters?|lines?|sentences?)\b",
                    15.0,
                    "Quantified output",
                ),
                PatternRule::new(r"(?i)\b(example|for instance|such as)\b", 10.0, "Examples provided"),
                PatternRule::new(
                    r"(?i)\b(between|range|from\s+\d+\s+to\s+\d+)\b",
                    10.0,
                    "Specific ranges",
                ),
                PatternRule::new(r"```[\s\S]*?```", 15.0, "Code examples"),
            ],
            negative: vec![
                PatternRule::new(r"(?i)\b(some|a few|several|many)\b", -5.0, "Vague quantities"),
                PatternRule::new(r"(?i)\b(good|nice|better|best|great)\b", -3.0, "Subjective quality"),
            ],
        },
        // structure
        DimensionRules {
            base_score: 45.0,
            positive: vec![
                PatternRule::new(r"\n\d+\.\s", 15.0, "Numbered list"),
                PatternRule::new(r"\n[-•]\s", 10.0, "Bullet points"),
                PatternRule::new(r"#{1,6}\s", 10.0, "Headers"),
                PatternRule::new(r"\*\*[^*]+\*\*", 5.0, "Bold emphasis"),
                PatternRule::new(
                    r"(?i)context:|background:|task:|output:|format:",
                    15.0,
                    "Section labels",
                ),
            ],
            negative: vec![
                PatternRule::new(r"(?m)^[^\n]{500,}$", -15.0, "Wall of text"),
                // Same doubled-terminator pairs counted per character class,
                // since backreferences are unavailable here.
                PatternRule::new(r"\.\s*\.|!\s*!|\?\s*\?", -5.0, "Repeated punctuation"),
            ],
        },
        // completeness
        DimensionRules {
            base_score: 25.0,
            positive: vec![
                PatternRule::new(r"(?i)you are|act as|role", 15.0, "Role defined"),
                PatternRule::new(r"(?i)context|background|given", 15.0, "Context provided"),
                PatternRule::new(r"(?i)task|goal|objective|purpose", 15.0, "Task stated"),
                PatternRule::new(r"(?i)format|structure|output", 10.0, "Format specified"),
                PatternRule::new(r"(?i)constraint|requirement|rule|must not", 10.0, "Constraints listed"),
            ],
            negative: vec![],
        },
        // efficiency
        DimensionRules {
            base_score: 70.0,
            positive: vec![],
            negative: vec![
                PatternRule::new(
                    r"(?i)\b(please|kindly|would you|could you)\b",
                    -3.0,
                    "Unnecessary politeness",
                ),
                PatternRule::new(
                    r"(?i)\b(very|really|extremely|absolutely)\b",
                    -2.0,
                    "Excessive intensifiers",
                ),
            ],
        },
        // actionability
        DimensionRules {
            base_score: 45.0,
            positive: vec![
                PatternRule::new(
                    r"(?i)\b(write|create|generate|analyze|summarize|explain|describe)\b",
                    15.0,
                    "Action verb",
                ),
                PatternRule::new(r"(?i)\b(first|then|next|finally|step\s+\d+)\b", 10.0, "Sequenced actions"),
                PatternRule::new(r"(?i)\b(provide|include|ensure|make sure)\b", 8.0, "Clear deliverables"),
            ],
            negative: vec![PatternRule::new(r"(?m)\?$", -5.0, "Ends with question")],
        },
        // domainFit (pattern rules empty; detection handled separately)
        DimensionRules {
            base_score: 50.0,
            positive: vec![],
            negative: vec![],
        },
    ]
});

/// Rules for one dimension, in enumeration order
pub fn rules_for(dimension: Dimension) -> &'static DimensionRules {
    &RULE_TABLE[dimension.index()]
}

/// Topical categories tested by the domain-fit dimension. Category names
/// overlap the weight profile names except for `analysis`, which is
/// detectable but has no profile of its own.
pub static TOPIC_CATEGORIES: Lazy<[(&'static str, Regex); 5]> = Lazy::new(|| {
    [
        (
            "coding",
            Regex::new(r"(?i)\b(code|function|class|variable|algorithm|debug|refactor|api|database)\b")
                .unwrap(),
        ),
        (
            "creative",
            Regex::new(r"(?i)\b(story|poem|creative|imaginative|artistic|narrative|character)\b").unwrap(),
        ),
        (
            "business",
            Regex::new(r"(?i)\b(business|market|strategy|roi|revenue|customer|sales|marketing)\b").unwrap(),
        ),
        (
            "education",
            Regex::new(r"(?i)\b(teach|learn|explain|student|lesson|curriculum|educational)\b").unwrap(),
        ),
        (
            "analysis",
            Regex::new(r"(?i)\b(analyze|data|statistics|trend|insight|research|evaluate)\b").unwrap(),
        ),
    ]
});

/// Remediation ideas keyed by (dimension, level). High-scoring dimensions
/// have nothing to suggest.
pub fn suggestions_for(dimension: Dimension, level: Level) -> &'static [&'static str] {
    match (dimension, level) {
        (Dimension::Clarity, Level::Low) => &[
            "Add a clear role definition at the beginning (e.g., \"You are an expert...\")",
            "Replace vague terms like \"stuff\" or \"things\" with specific nouns",
            "Use definitive language instead of \"maybe\" or \"possibly\"",
        ],
        (Dimension::Clarity, Level::Medium) => {
            &["Consider adding more precision words like \"exactly\" or \"specifically\""]
        }
        (Dimension::Specificity, Level::Low) => &[
            "Add specific numbers for output length (e.g., \"500 words\")",
            "Include concrete examples of desired output",
        ],
        (Dimension::Specificity, Level::Medium) => &["Consider adding sample inputs and outputs"],
        (Dimension::Structure, Level::Low) => &[
            "Break the prompt into labeled sections (Role, Context, Task, Format)",
            "Use numbered lists for sequential instructions",
        ],
        (Dimension::Structure, Level::Medium) => {
            &["Consider using headers or bold text for key sections"]
        }
        (Dimension::Completeness, Level::Low) => &[
            "Add a role definition (who should the AI be?)",
            "Include context or background information",
            "Specify the desired output format",
        ],
        (Dimension::Completeness, Level::Medium) => {
            &["Consider adding examples of expected output"]
        }
        (Dimension::Efficiency, Level::Low) => &[
            "Remove polite phrases like \"please\" or \"would you\"",
            "Eliminate filler words and redundant expressions",
        ],
        (Dimension::Efficiency, Level::Medium) => {
            &["Consider more concise phrasing for long sentences"]
        }
        (Dimension::Actionability, Level::Low) => &[
            "Start with a clear action verb (write, create, analyze, etc.)",
            "Specify the exact deliverable expected",
        ],
        (Dimension::Actionability, Level::Medium) => {
            &["Consider sequencing multiple tasks with \"first\", \"then\", \"finally\""]
        }
        (Dimension::DomainFit, Level::Low) => &["Include domain-specific terminology"],
        (Dimension::DomainFit, Level::Medium) => &["Consider adding domain-specific constraints"],
        (_, Level::High) => &[],
    }
}
