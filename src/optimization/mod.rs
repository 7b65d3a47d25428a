//! Deterministic prompt rewriting
//!
//! An ordered sequence of rewrite passes that shrink a prompt's token
//! footprint, a technique log of every edit that fired, and a before/after
//! comparison proving the cost/quality tradeoff.

mod passes;

pub use passes::{optimize, OptimizationPipeline};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::cost::{AnnualSavings, CostComparison};
use crate::quality::QualityReport;

/// How strongly a technique tends to change meaning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TechniqueCategory {
    FillerRemoval,
    Deduplication,
    Whitespace,
    VerboseReduction,
}

/// One rewrite pass invocation that actually changed the text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Technique {
    pub name: String,
    pub category: TechniqueCategory,
    pub impact: Impact,
}

/// Text plus its derived token, quality, and cost figures
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptSnapshot {
    pub text: String,
    pub tokens: u32,
    pub quality: QualityReport,
    pub cost: CostComparison,
}

/// Compression outcome of one optimize run
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompressionStats {
    pub tokens_saved: i64,
    /// Percentage reduction, rounded to one decimal; 0 on a zero baseline
    pub compression_ratio: f64,
    pub quality_delta: i64,
    /// Up to 5 points of quality regression is an accepted tradeoff
    pub quality_preserved: bool,
    pub techniques: Vec<Technique>,
}

/// Annualized projection for one pricing-table model
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelSavings {
    pub model_name: String,
    pub provider: String,
    #[serde(flatten)]
    pub savings: AnnualSavings,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationResult {
    pub original: PromptSnapshot,
    pub optimized: PromptSnapshot,
    pub compression: CompressionStats,
    /// Keyed by model id, one entry per pricing-table row
    pub model_savings: BTreeMap<String, ModelSavings>,
    pub requests_per_month: u32,
}
