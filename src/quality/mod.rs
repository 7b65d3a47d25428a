//! Multi-dimensional prompt quality scoring
//!
//! Rates a prompt across seven weighted dimensions, derives an overall
//! score/grade/level, and produces ranked improvement recommendations plus
//! radar-chart data. Scoring is deterministic: the same text and domain
//! always produce the same scores (the report timestamp is informational
//! only and excluded from any equality comparison).

mod dimension;
pub mod rules;

pub use dimension::{evaluate_dimension, Dimension, DimensionScore, EvaluationDetail, Polarity};
pub use rules::DomainWeights;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Scoring algorithm identifier carried in report metadata
pub const ALGORITHM_VERSION: &str = "mdqs-v1.0";

/// Coarse bucket derived from a numeric score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    High,
    Medium,
    Low,
}

impl Level {
    pub fn for_score(score: f64) -> Self {
        if score >= 80.0 {
            Level::High
        } else if score >= 50.0 {
            Level::Medium
        } else {
            Level::Low
        }
    }
}

/// Letter grade for an overall score, inclusive lower bounds
pub fn grade_for(score: u32) -> &'static str {
    match score {
        95.. => "A+",
        90..=94 => "A",
        85..=89 => "A-",
        80..=84 => "B+",
        75..=79 => "B",
        70..=74 => "B-",
        65..=69 => "C+",
        60..=64 => "C",
        55..=59 => "C-",
        50..=54 => "D",
        _ => "F",
    }
}

/// One dimension's contribution to the report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionResult {
    pub score: f64,
    pub weight: f64,
    pub weighted_score: f64,
    pub details: Vec<EvaluationDetail>,
    pub level: Level,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallScore {
    pub score: u32,
    pub grade: String,
    pub level: Level,
}

/// Remediation entry for one of the three lowest-scoring dimensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub dimension: Dimension,
    pub score: f64,
    pub priority: u32,
    pub suggestions: Vec<String>,
}

/// One radar-chart spoke
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RadarEntry {
    pub dimension: Dimension,
    pub display_name: String,
    pub score: f64,
    pub full_mark: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetadata {
    /// The caller's domain tag, echoed verbatim even when unrecognized
    pub domain: String,
    pub weights: DomainWeights,
    pub algorithm: String,
    pub timestamp: String,
}

/// Full quality evaluation of one prompt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityReport {
    pub overall: OverallScore,
    pub dimensions: BTreeMap<Dimension, DimensionResult>,
    pub recommendations: Vec<Recommendation>,
    pub radar_data: Vec<RadarEntry>,
    pub metadata: ReportMetadata,
}

/// Scores prompts under one domain's weight profile
#[derive(Debug, Clone)]
pub struct QualityScorer {
    domain: String,
    weights: &'static DomainWeights,
}

impl QualityScorer {
    /// Unrecognized domain names fall back to the general weight profile;
    /// the given name is still echoed in report metadata and used for the
    /// domain-fit target match.
    pub fn new(domain: impl Into<String>) -> Self {
        let domain = domain.into();
        let weights = rules::weights_for(&domain);
        Self { domain, weights }
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn weights(&self) -> &DomainWeights {
        self.weights
    }

    /// Evaluate all seven dimensions and aggregate them into a report
    pub fn evaluate(&self, text: &str) -> QualityReport {
        let mut dimensions = BTreeMap::new();
        let mut weighted_total = 0.0;
        let mut total_weight = 0.0;

        for dim in Dimension::ALL {
            let evaluation = evaluate_dimension(text, dim, &self.domain);
            let weight = self.weights.get(dim);
            let weighted_score = evaluation.score * weight;
            weighted_total += weighted_score;
            total_weight += weight;

            dimensions.insert(
                dim,
                DimensionResult {
                    score: evaluation.score,
                    weight,
                    weighted_score,
                    details: evaluation.details,
                    level: Level::for_score(evaluation.score),
                },
            );
        }

        let overall_score = if total_weight > 0.0 {
            (weighted_total / total_weight).round() as u32
        } else {
            0
        };

        QualityReport {
            overall: OverallScore {
                score: overall_score,
                grade: grade_for(overall_score).to_string(),
                level: Level::for_score(overall_score as f64),
            },
            recommendations: recommendations(&dimensions),
            radar_data: radar_data(&dimensions),
            dimensions,
            metadata: ReportMetadata {
                domain: self.domain.clone(),
                weights: *self.weights,
                algorithm: ALGORITHM_VERSION.to_string(),
                timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            },
        }
    }
}

/// The three lowest-scoring dimensions, each with up to three suggestions.
/// Low-level dimensions also take the medium-level list, so weaker
/// dimensions get more remediation ideas.
fn recommendations(dimensions: &BTreeMap<Dimension, DimensionResult>) -> Vec<Recommendation> {
    let mut ranked: Vec<(&Dimension, &DimensionResult)> = dimensions.iter().collect();
    ranked.sort_by(|a, b| {
        a.1.score
            .partial_cmp(&b.1.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    ranked
        .into_iter()
        .take(3)
        .enumerate()
        .map(|(i, (&dim, result))| {
            let mut suggestions: Vec<String> = rules::suggestions_for(dim, result.level)
                .iter()
                .map(|s| s.to_string())
                .collect();
            if result.level == Level::Low {
                suggestions.extend(
                    rules::suggestions_for(dim, Level::Medium)
                        .iter()
                        .map(|s| s.to_string()),
                );
            }
            suggestions.truncate(3);

            Recommendation {
                dimension: dim,
                score: result.score,
                priority: i as u32 + 1,
                suggestions,
            }
        })
        .collect()
}

fn radar_data(dimensions: &BTreeMap<Dimension, DimensionResult>) -> Vec<RadarEntry> {
    Dimension::ALL
        .iter()
        .map(|&dim| RadarEntry {
            dimension: dim,
            display_name: dim.display_name().to_string(),
            score: dimensions[&dim].score,
            full_mark: 100,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "You are a code reviewer.\nTask: analyze this function and \
                          summarize issues in 100 words.\nFormat: numbered list.";

    #[test]
    fn evaluation_is_deterministic() {
        let scorer = QualityScorer::new("coding");
        let first = scorer.evaluate(SAMPLE);
        let second = scorer.evaluate(SAMPLE);
        assert_eq!(first.overall, second.overall);
        assert_eq!(first.dimensions, second.dimensions);
        assert_eq!(first.recommendations, second.recommendations);
        assert_eq!(first.radar_data, second.radar_data);
        // Only the timestamp may differ between runs.
    }

    #[test]
    fn report_covers_all_dimensions() {
        let report = QualityScorer::new("general").evaluate(SAMPLE);
        assert_eq!(report.dimensions.len(), 7);
        assert_eq!(report.radar_data.len(), 7);
        assert_eq!(report.radar_data[0].dimension, Dimension::Clarity);
        assert_eq!(report.radar_data[6].dimension, Dimension::DomainFit);
        assert!(report.radar_data.iter().all(|r| r.full_mark == 100));
    }

    #[test]
    fn overall_is_weight_normalized() {
        let scorer = QualityScorer::new("general");
        let report = scorer.evaluate(SAMPLE);
        let weighted: f64 = report.dimensions.values().map(|d| d.weighted_score).sum();
        let total: f64 = report.dimensions.values().map(|d| d.weight).sum();
        assert_eq!(report.overall.score, (weighted / total).round() as u32);
    }

    #[test]
    fn unknown_domain_echoed_with_general_weights() {
        let scorer = QualityScorer::new("astrology");
        let report = scorer.evaluate(SAMPLE);
        assert_eq!(report.metadata.domain, "astrology");
        assert_eq!(report.metadata.weights, rules::GENERAL_WEIGHTS);
    }

    #[test]
    fn empty_text_scores_from_base_constants() {
        let report = QualityScorer::new("general").evaluate("");
        assert_eq!(report.dimensions[&Dimension::Clarity].score, 50.0);
        assert_eq!(report.dimensions[&Dimension::Completeness].score, 25.0);
        assert_eq!(report.dimensions[&Dimension::Efficiency].score, 70.0);
        assert!(report.overall.score > 0);
    }

    #[test]
    fn grade_bands() {
        assert_eq!(grade_for(100), "A+");
        assert_eq!(grade_for(95), "A+");
        assert_eq!(grade_for(94), "A");
        assert_eq!(grade_for(85), "A-");
        assert_eq!(grade_for(80), "B+");
        assert_eq!(grade_for(79), "B");
        assert_eq!(grade_for(70), "B-");
        assert_eq!(grade_for(65), "C+");
        assert_eq!(grade_for(60), "C");
        assert_eq!(grade_for(55), "C-");
        assert_eq!(grade_for(50), "D");
        assert_eq!(grade_for(49), "F");
        assert_eq!(grade_for(0), "F");
    }

    #[test]
    fn level_thresholds() {
        assert_eq!(Level::for_score(80.0), Level::High);
        assert_eq!(Level::for_score(79.9), Level::Medium);
        assert_eq!(Level::for_score(50.0), Level::Medium);
        assert_eq!(Level::for_score(49.9), Level::Low);
    }

    #[test]
    fn recommendations_target_three_lowest() {
        let report = QualityScorer::new("general").evaluate(SAMPLE);
        assert_eq!(report.recommendations.len(), 3);
        assert_eq!(
            report.recommendations.iter().map(|r| r.priority).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        // Ascending by dimension score
        for pair in report.recommendations.windows(2) {
            assert!(pair[0].score <= pair[1].score);
        }
        for rec in &report.recommendations {
            assert!(rec.suggestions.len() <= 3);
        }
    }

    #[test]
    fn low_dimensions_get_medium_suggestions_too() {
        // Vague, unstructured text drives completeness low.
        let report = QualityScorer::new("general").evaluate("do something with the stuff");
        let completeness = report
            .recommendations
            .iter()
            .find(|r| r.dimension == Dimension::Completeness);
        if let Some(rec) = completeness {
            assert_eq!(rec.suggestions.len(), 3);
        }
        // Repeated evaluation must not grow any suggestion list.
        let again = QualityScorer::new("general").evaluate("do something with the stuff");
        assert_eq!(report.recommendations, again.recommendations);
    }

    #[test]
    fn serialized_report_uses_wire_field_names() {
        let report = QualityScorer::new("coding").evaluate(SAMPLE);
        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("radarData").is_some());
        assert!(json["dimensions"].get("domainFit").is_some());
        assert!(json["metadata"]["weights"].get("domainFit").is_some());
        assert_eq!(json["metadata"]["domain"], "coding");
        let clarity = &json["dimensions"]["clarity"];
        assert!(clarity.get("weightedScore").is_some());
    }
}
