//! promptwise - Score prompt quality and cut token spend
//!
//! This library evaluates natural-language instruction prompts, estimates
//! their operating cost across model providers, and deterministically
//! rewrites prompts to reduce token usage while tracking the quality impact
//! of every edit.
//!
//! ## Key Features
//!
//! - **Token Estimation**: Heuristic token counts without a tokenizer dependency
//! - **Cost Modeling**: Per-provider pricing comparison and annualized savings projections
//! - **Quality Scoring**: Seven weighted dimensions with grades, levels, and recommendations
//! - **Deterministic Optimization**: Ordered rewrite passes with a full technique log
//!
//! Everything here is pure, synchronous, and CPU-bound: no I/O, no shared
//! mutable state, and identical inputs always produce identical outputs
//! (report timestamps aside).

pub mod compose;
pub mod config;
pub mod cost;
pub mod optimization;
pub mod quality;
pub mod tokens;

pub use compose::{analyze_structure, build_prompt, StructureAnalysis};
pub use config::{Config, ConfigError};
pub use cost::{
    analyze_prompt_cost, annual_savings, compare_all, cost_for, recommend, AnnualSavings,
    CostBreakdown, CostComparison, CostStatus, ModelPricing, Priority, PromptCostAnalysis,
    MODEL_PRICING,
};
pub use optimization::{
    optimize, Impact, OptimizationPipeline, OptimizationResult, Technique, TechniqueCategory,
};
pub use quality::{
    Dimension, DimensionResult, DomainWeights, Level, QualityReport, QualityScorer,
};
