//! Single-dimension evaluation
//!
//! Applies one dimension's rule table to a prompt: base score, positive and
//! negative pattern rules with a per-rule occurrence cap, and the two
//! dimension-specific extensions (efficiency length penalty, domain-fit
//! category bonuses). The final score is clamped to [0, 100].

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::rules::{
    self, PatternRule, DETECTED_DOMAIN_BONUS, MATCH_CAP, MAX_LENGTH_PENALTY, OPTIMAL_MAX_WORDS,
    PENALTY_PER_EXTRA_WORD, TARGET_DOMAIN_BONUS, TOPIC_CATEGORIES,
};

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// The seven quality axes, in evaluation and display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Dimension {
    Clarity,
    Specificity,
    Structure,
    Completeness,
    Efficiency,
    Actionability,
    DomainFit,
}

impl Dimension {
    pub const ALL: [Dimension; 7] = [
        Dimension::Clarity,
        Dimension::Specificity,
        Dimension::Structure,
        Dimension::Completeness,
        Dimension::Efficiency,
        Dimension::Actionability,
        Dimension::DomainFit,
    ];

    pub(crate) fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Dimension::Clarity => "clarity",
            Dimension::Specificity => "specificity",
            Dimension::Structure => "structure",
            Dimension::Completeness => "completeness",
            Dimension::Efficiency => "efficiency",
            Dimension::Actionability => "actionability",
            Dimension::DomainFit => "domainFit",
        }
    }

    /// Localized label used on the radar chart
    pub fn display_name(self) -> &'static str {
        match self {
            Dimension::Clarity => "명확성",
            Dimension::Specificity => "구체성",
            Dimension::Structure => "구조성",
            Dimension::Completeness => "완전성",
            Dimension::Efficiency => "효율성",
            Dimension::Actionability => "실행가능성",
            Dimension::DomainFit => "도메인 적합성",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    Positive,
    Negative,
}

/// One matched rule or special-case adjustment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationDetail {
    #[serde(rename = "type")]
    pub polarity: Polarity,
    pub label: String,
    pub points: f64,
    /// Raw occurrence count for pattern rules; absent for length penalties
    /// and domain bonuses
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

/// Partial result for one dimension; the scorer adds weight and level
#[derive(Debug, Clone, PartialEq)]
pub struct DimensionScore {
    pub score: f64,
    pub details: Vec<EvaluationDetail>,
}

fn apply_rules(text: &str, rules: &[PatternRule], details: &mut Vec<EvaluationDetail>) -> f64 {
    let mut delta = 0.0;
    for rule in rules {
        let count = rule.pattern.find_iter(text).count();
        if count > 0 {
            let points = rule.points * count.min(MATCH_CAP) as f64;
            delta += points;
            details.push(EvaluationDetail {
                polarity: if rule.points >= 0.0 {
                    Polarity::Positive
                } else {
                    Polarity::Negative
                },
                label: rule.label.to_string(),
                points,
                count: Some(count),
            });
        }
    }
    delta
}

/// Evaluate one dimension of `text`. `target_domain` is the caller's domain
/// tag, consulted only by the domain-fit dimension.
pub fn evaluate_dimension(text: &str, dimension: Dimension, target_domain: &str) -> DimensionScore {
    let rules = rules::rules_for(dimension);
    let mut details = Vec::new();
    let mut score = rules.base_score;

    score += apply_rules(text, &rules.positive, &mut details);
    score += apply_rules(text, &rules.negative, &mut details);

    if dimension == Dimension::Efficiency {
        let word_count = WHITESPACE.split(text).count();
        if word_count > OPTIMAL_MAX_WORDS {
            let excess = word_count - OPTIMAL_MAX_WORDS;
            let penalty = (excess as f64 * PENALTY_PER_EXTRA_WORD).min(MAX_LENGTH_PENALTY);
            score -= penalty;
            details.push(EvaluationDetail {
                polarity: Polarity::Negative,
                label: format!("Exceeds optimal length by {excess} words"),
                points: -penalty,
                count: None,
            });
        }
    }

    if dimension == Dimension::DomainFit {
        let detected: Vec<&str> = TOPIC_CATEGORIES
            .iter()
            .filter(|(_, pattern)| pattern.is_match(text))
            .map(|(category, _)| *category)
            .collect();

        if !detected.is_empty() {
            score += DETECTED_DOMAIN_BONUS;
            details.push(EvaluationDetail {
                polarity: Polarity::Positive,
                label: format!("Detected domains: {}", detected.join(", ")),
                points: DETECTED_DOMAIN_BONUS,
                count: None,
            });
        }
        if detected.contains(&target_domain) {
            score += TARGET_DOMAIN_BONUS;
            details.push(EvaluationDetail {
                polarity: Polarity::Positive,
                label: "Matches target domain".to_string(),
                points: TARGET_DOMAIN_BONUS,
                count: None,
            });
        }
    }

    DimensionScore {
        score: score.clamp(0.0, 100.0),
        details,
    }
}
