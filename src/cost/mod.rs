//! Model pricing and cost projections
//!
//! A fixed six-entry pricing table plus the arithmetic derived from it:
//! per-request cost breakdowns, cross-provider comparison, priority-based
//! model recommendation, and annualized savings projections. The table is
//! domain data shared with downstream consumers and must not drift.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::tokens;

/// Output length assumed when a request's completion size is unknown
pub const ASSUMED_OUTPUT_TOKENS: u32 = 50;

/// One row of the static pricing table
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelPricing {
    #[serde(rename = "id")]
    pub model_id: &'static str,
    pub name: &'static str,
    pub provider: &'static str,
    #[serde(rename = "inputCostPer1M")]
    pub input_cost_per_1m: f64,
    #[serde(rename = "outputCostPer1M")]
    pub output_cost_per_1m: f64,
    pub context_window: u64,
    pub description: &'static str,
}

/// The pricing table, in display order. Values are currency units per one
/// million tokens.
pub static MODEL_PRICING: [ModelPricing; 6] = [
    ModelPricing {
        model_id: "gpt-5.2",
        name: "GPT-5.2 (Garlic)",
        provider: "OpenAI",
        input_cost_per_1m: 2.50,
        output_cost_per_1m: 10.00,
        context_window: 512_000,
        description: "최신 멀티모달 모델, 코딩/로직 최강",
    },
    ModelPricing {
        model_id: "gpt-5",
        name: "GPT-5",
        provider: "OpenAI",
        input_cost_per_1m: 2.00,
        output_cost_per_1m: 8.00,
        context_window: 256_000,
        description: "범용 최상위 모델",
    },
    ModelPricing {
        model_id: "claude-opus-4.6",
        name: "Claude Opus 4.6",
        provider: "Anthropic",
        input_cost_per_1m: 15.00,
        output_cost_per_1m: 75.00,
        context_window: 1_000_000,
        description: "Agent Team 지원, 1M 컨텍스트",
    },
    ModelPricing {
        model_id: "claude-sonnet-5",
        name: "Claude Sonnet 5",
        provider: "Anthropic",
        input_cost_per_1m: 3.00,
        output_cost_per_1m: 15.00,
        context_window: 500_000,
        description: "균형잡힌 성능, 500K 컨텍스트",
    },
    ModelPricing {
        model_id: "gemini-3-pro",
        name: "Gemini 3 Pro",
        provider: "Google",
        input_cost_per_1m: 1.75,
        output_cost_per_1m: 7.00,
        context_window: 2_000_000,
        description: "Deep Think 모드, 2M 컨텍스트",
    },
    ModelPricing {
        model_id: "gemini-3-flash",
        name: "Gemini 3 Flash",
        provider: "Google",
        input_cost_per_1m: 0.10,
        output_cost_per_1m: 0.40,
        context_window: 1_000_000,
        description: "초저가 고속 모델, 대량 처리에 적합",
    },
];

/// Look up a pricing entry by model id
pub fn pricing(model_id: &str) -> Option<&'static ModelPricing> {
    MODEL_PRICING.iter().find(|p| p.model_id == model_id)
}

/// Cost of one request against one model
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    pub model_id: String,
    pub model_name: String,
    pub provider: String,
    pub input_tokens: u32,
    pub output_tokens: u32,
    pub input_cost: f64,
    pub output_cost: f64,
    pub total_cost: f64,
    pub cost_per_1000: f64,
    /// Filled in within a comparison
    #[serde(skip_serializing_if = "Option::is_none")]
    pub savings_vs_most_expensive: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub savings_percentage: Option<f64>,
}

/// Compute the cost of a request, or None for an unknown model id
pub fn cost_for(model_id: &str, input_tokens: u32, output_tokens: u32) -> Option<CostBreakdown> {
    let pricing = pricing(model_id)?;

    let input_cost = input_tokens as f64 / 1_000_000.0 * pricing.input_cost_per_1m;
    let output_cost = output_tokens as f64 / 1_000_000.0 * pricing.output_cost_per_1m;
    let total_cost = input_cost + output_cost;

    Some(CostBreakdown {
        model_id: pricing.model_id.to_string(),
        model_name: pricing.name.to_string(),
        provider: pricing.provider.to_string(),
        input_tokens,
        output_tokens,
        input_cost,
        output_cost,
        total_cost,
        cost_per_1000: total_cost * 1000.0,
        savings_vs_most_expensive: None,
        savings_percentage: None,
    })
}

/// Cost comparison across every model in the pricing table
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostComparison {
    /// Ascending by total cost
    pub models: Vec<CostBreakdown>,
    pub cheapest: CostBreakdown,
    pub most_expensive: CostBreakdown,
    pub max_savings: f64,
    pub max_savings_percentage: f64,
}

/// Cost every table entry and rank them by total cost
pub fn compare_all(input_tokens: u32, output_tokens: u32) -> CostComparison {
    let mut models: Vec<CostBreakdown> = MODEL_PRICING
        .iter()
        .filter_map(|p| cost_for(p.model_id, input_tokens, output_tokens))
        .collect();

    models.sort_by(|a, b| {
        a.total_cost
            .partial_cmp(&b.total_cost)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let most_expensive_total = models.last().map(|m| m.total_cost).unwrap_or(0.0);

    for model in &mut models {
        let savings = most_expensive_total - model.total_cost;
        model.savings_vs_most_expensive = Some(savings);
        model.savings_percentage = Some(if most_expensive_total > 0.0 {
            savings / most_expensive_total * 100.0
        } else {
            0.0
        });
    }

    let cheapest = models.first().cloned().expect("pricing table is non-empty");
    let most_expensive = models.last().cloned().expect("pricing table is non-empty");
    let max_savings = most_expensive.total_cost - cheapest.total_cost;
    let max_savings_percentage = if most_expensive.total_cost > 0.0 {
        max_savings / most_expensive.total_cost * 100.0
    } else {
        0.0
    };

    CostComparison {
        models,
        cheapest,
        most_expensive,
        max_savings,
        max_savings_percentage,
    }
}

/// What to optimize for when recommending a model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Cost,
    Performance,
    Balance,
    Context,
}

impl Priority {
    /// The designated model for this priority, if any. Cost has no designated
    /// model; it always resolves to the cheapest entry.
    fn designated_model(&self) -> Option<&'static str> {
        match self {
            Priority::Cost => None,
            Priority::Performance => Some("gpt-5.2"),
            Priority::Balance => Some("claude-sonnet-5"),
            Priority::Context => Some("gemini-3-pro"),
        }
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cost" => Ok(Priority::Cost),
            "performance" => Ok(Priority::Performance),
            "balance" => Ok(Priority::Balance),
            "context" => Ok(Priority::Context),
            other => Err(format!(
                "unknown priority '{other}' (expected cost, performance, balance, or context)"
            )),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Priority::Cost => "cost",
            Priority::Performance => "performance",
            Priority::Balance => "balance",
            Priority::Context => "context",
        };
        f.write_str(name)
    }
}

/// Recommend a model for the given token volume and priority. Falls back to
/// the cheapest entry when the designated model is absent from the comparison.
pub fn recommend(input_tokens: u32, output_tokens: u32, priority: Priority) -> CostBreakdown {
    let comparison = compare_all(input_tokens, output_tokens);

    match priority.designated_model() {
        Some(id) => comparison
            .models
            .iter()
            .find(|m| m.model_id == id)
            .cloned()
            .unwrap_or(comparison.cheapest),
        None => comparison.cheapest,
    }
}

/// Annualized savings projection for a token reduction on one model
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnualSavings {
    pub original_cost_per_request: f64,
    pub optimized_cost_per_request: f64,
    pub savings_per_request: f64,
    pub requests_per_year: u64,
    pub annual_savings: f64,
    pub savings_percentage: f64,
    pub token_reduction: i64,
    pub token_reduction_percentage: f64,
}

/// Project yearly savings from shrinking a prompt, assuming a fixed
/// 50-token output per request. None for an unknown model id.
pub fn annual_savings(
    original_tokens: u32,
    optimized_tokens: u32,
    requests_per_year: u64,
    model_id: &str,
) -> Option<AnnualSavings> {
    let original = cost_for(model_id, original_tokens, ASSUMED_OUTPUT_TOKENS)?;
    let optimized = cost_for(model_id, optimized_tokens, ASSUMED_OUTPUT_TOKENS)?;

    let savings_per_request = original.total_cost - optimized.total_cost;
    let savings_percentage = if original.total_cost > 0.0 {
        savings_per_request / original.total_cost * 100.0
    } else {
        0.0
    };
    let token_reduction = original_tokens as i64 - optimized_tokens as i64;
    let token_reduction_percentage = if original_tokens > 0 {
        token_reduction as f64 / original_tokens as f64 * 100.0
    } else {
        0.0
    };

    Some(AnnualSavings {
        original_cost_per_request: original.total_cost,
        optimized_cost_per_request: optimized.total_cost,
        savings_per_request,
        requests_per_year,
        annual_savings: savings_per_request * requests_per_year as f64,
        savings_percentage,
        token_reduction,
        token_reduction_percentage,
    })
}

/// How a prompt's estimated input size relates to typical request budgets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostStatus {
    Efficient,
    Moderate,
    Inefficient,
}

/// Token, efficiency, and pricing snapshot for a raw prompt
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptCostAnalysis {
    pub input_tokens: u32,
    pub estimated_output_tokens: u32,
    pub efficiency_score: u32,
    pub status: CostStatus,
    pub model_comparison: CostComparison,
    pub recommendation: CostBreakdown,
}

/// Estimate a prompt's tokens and cost posture across all models
pub fn analyze_prompt_cost(text: &str) -> PromptCostAnalysis {
    let input_tokens = tokens::estimate(text);

    let efficiency_score = (100.0 - input_tokens as f64 / 5.0).clamp(0.0, 100.0).round() as u32;
    let status = if input_tokens > 200 {
        CostStatus::Inefficient
    } else if input_tokens > 100 {
        CostStatus::Moderate
    } else {
        CostStatus::Efficient
    };

    PromptCostAnalysis {
        input_tokens,
        estimated_output_tokens: ASSUMED_OUTPUT_TOKENS,
        efficiency_score,
        status,
        model_comparison: compare_all(input_tokens, ASSUMED_OUTPUT_TOKENS),
        recommendation: recommend(input_tokens, ASSUMED_OUTPUT_TOKENS, Priority::Cost),
    }
}

impl fmt::Display for CostComparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Model Cost Comparison ===")?;
        for model in &self.models {
            writeln!(
                f,
                "{:<18} {:<10} ${:.6} (per 1k requests: ${:.2})",
                model.model_id, model.provider, model.total_cost, model.cost_per_1000
            )?;
        }
        writeln!(
            f,
            "Max savings: ${:.6} ({:.1}%) choosing {} over {}",
            self.max_savings,
            self.max_savings_percentage,
            self.cheapest.model_id,
            self.most_expensive.model_id
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn pricing_table_is_stable() {
        assert_eq!(MODEL_PRICING.len(), 6);
        let entry = pricing("gpt-5").unwrap();
        assert_eq!(entry.input_cost_per_1m, 2.00);
        assert_eq!(entry.output_cost_per_1m, 8.00);
        assert_eq!(pricing("gemini-3-flash").unwrap().input_cost_per_1m, 0.10);
    }

    #[test]
    fn unknown_model_yields_none() {
        assert!(cost_for("gpt-3", 100, 100).is_none());
        assert!(annual_savings(300, 120, 1000, "nope").is_none());
    }

    #[test]
    fn cost_arithmetic() {
        let cost = cost_for("gpt-5", 300, 50).unwrap();
        approx(cost.input_cost, 0.0006);
        approx(cost.output_cost, 0.0004);
        approx(cost.total_cost, 0.001);
        approx(cost.cost_per_1000, 1.0);
    }

    #[test]
    fn comparison_is_sorted_ascending() {
        let comparison = compare_all(5000, 1000);
        for pair in comparison.models.windows(2) {
            assert!(pair[0].total_cost <= pair[1].total_cost);
        }
        assert_eq!(comparison.cheapest.model_id, comparison.models[0].model_id);
        assert_eq!(comparison.cheapest.model_id, "gemini-3-flash");
        assert_eq!(comparison.most_expensive.model_id, "claude-opus-4.6");
    }

    #[test]
    fn savings_percentages_are_bounded() {
        let comparison = compare_all(12345, 678);
        for model in &comparison.models {
            let pct = model.savings_percentage.unwrap();
            assert!((0.0..=100.0).contains(&pct));
            assert!(model.savings_vs_most_expensive.unwrap() >= 0.0);
        }
        assert!(comparison.max_savings_percentage <= 100.0);
    }

    #[test]
    fn zero_tokens_zero_percentages() {
        let comparison = compare_all(0, 0);
        approx(comparison.max_savings, 0.0);
        approx(comparison.max_savings_percentage, 0.0);
        for model in &comparison.models {
            approx(model.savings_percentage.unwrap(), 0.0);
        }
    }

    #[test]
    fn recommend_honors_priority() {
        assert_eq!(recommend(100, 50, Priority::Cost).model_id, "gemini-3-flash");
        assert_eq!(recommend(100, 50, Priority::Performance).model_id, "gpt-5.2");
        assert_eq!(recommend(100, 50, Priority::Balance).model_id, "claude-sonnet-5");
        assert_eq!(recommend(100, 50, Priority::Context).model_id, "gemini-3-pro");
    }

    #[test]
    fn annual_savings_projection() {
        // 300 -> 120 tokens at 12000 requests/year on gpt-5 pricing
        let savings = annual_savings(300, 120, 12_000, "gpt-5").unwrap();
        approx(savings.original_cost_per_request, 0.001);
        approx(savings.optimized_cost_per_request, 0.00064);
        approx(savings.savings_per_request, 0.00036);
        approx(savings.annual_savings, 4.32);
        approx(savings.savings_percentage, 36.0);
        assert_eq!(savings.token_reduction, 180);
        approx(savings.token_reduction_percentage, 60.0);
    }

    #[test]
    fn annual_savings_zero_baseline_guard() {
        let savings = annual_savings(0, 0, 1000, "gemini-3-flash").unwrap();
        // Output cost alone is non-zero, so percentage is defined; token
        // reduction percentage must guard the zero baseline.
        approx(savings.token_reduction_percentage, 0.0);
        approx(savings.savings_per_request, 0.0);
    }

    #[test]
    fn prompt_cost_analysis_status_bands() {
        assert_eq!(analyze_prompt_cost("short prompt").status, CostStatus::Efficient);
        let medium = "word ".repeat(90);
        assert_eq!(analyze_prompt_cost(&medium).status, CostStatus::Moderate);
        let long = "word ".repeat(200);
        let analysis = analyze_prompt_cost(&long);
        assert_eq!(analysis.status, CostStatus::Inefficient);
        assert_eq!(analysis.efficiency_score, 48); // 100 - 260/5
        assert_eq!(analysis.recommendation.model_id, "gemini-3-flash");
    }

    #[test]
    fn priority_round_trips_from_str() {
        for name in ["cost", "performance", "balance", "context"] {
            let priority: Priority = name.parse().unwrap();
            assert_eq!(priority.to_string(), name);
        }
        assert!("speed".parse::<Priority>().is_err());
    }
}
