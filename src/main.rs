//! promptwise CLI - Score prompt quality and cut token spend

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use promptwise::{
    compose,
    config::Config,
    cost::{self, Priority},
    optimization::OptimizationPipeline,
    quality::QualityScorer,
    tokens,
};
use std::path::{Path, PathBuf};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "promptwise")]
#[command(about = "Evaluate prompt quality and rewrite prompts to minimize token cost")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbosity level
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate the token count of a prompt
    Estimate {
        /// Input file or prompt text
        input: String,
    },

    /// Score a prompt across the seven quality dimensions
    Score {
        /// Input file or prompt text
        input: String,

        /// Domain profile (coding, creative, business, education, general)
        #[arg(short, long)]
        domain: Option<String>,
    },

    /// Rewrite a prompt to reduce tokens and report the tradeoff
    Optimize {
        /// Input file or prompt text
        input: String,

        /// Domain profile (coding, creative, business, education, general)
        #[arg(short, long)]
        domain: Option<String>,

        /// Monthly request volume for savings projections
        #[arg(short, long)]
        requests_per_month: Option<u32>,

        /// Output file for the optimized prompt (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Compare request cost across all models in the pricing table
    Compare {
        /// Input token count
        #[arg(short, long)]
        input_tokens: u32,

        /// Output token count
        #[arg(short, long, default_value = "50")]
        output_tokens: u32,
    },

    /// Recommend a model for a token volume and priority
    Recommend {
        /// Input token count
        #[arg(short, long)]
        input_tokens: u32,

        /// Output token count
        #[arg(short, long, default_value = "50")]
        output_tokens: u32,

        /// Priority: cost, performance, balance, or context
        #[arg(short, long, default_value = "cost")]
        priority: String,
    },

    /// Full token/efficiency/cost analysis of a prompt
    Analyze {
        /// Input file or prompt text
        input: String,
    },

    /// Build a structured prompt from role/context/action and check it
    Compose {
        /// Who the model should be
        #[arg(short = 'r', long)]
        role: Option<String>,

        /// Background for the task
        #[arg(short = 'c', long)]
        context: Option<String>,

        /// What the model should do
        #[arg(short = 'a', long)]
        action: Option<String>,
    },

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Initialize configuration file with defaults
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },

    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Estimate { input } => run_estimate(&input),
        Commands::Score { input, domain } => run_score(&input, domain),
        Commands::Optimize {
            input,
            domain,
            requests_per_month,
            output,
        } => run_optimize(&input, domain, requests_per_month, output),
        Commands::Compare {
            input_tokens,
            output_tokens,
        } => run_compare(input_tokens, output_tokens),
        Commands::Recommend {
            input_tokens,
            output_tokens,
            priority,
        } => run_recommend(input_tokens, output_tokens, &priority),
        Commands::Analyze { input } => run_analyze(&input),
        Commands::Compose {
            role,
            context,
            action,
        } => run_compose(role, context, action),
        Commands::Config(cmd) => run_config_command(cmd),
    }
}

/// Treat `input` as a file path if one exists, otherwise as literal text
fn read_input(input: &str) -> Result<String> {
    let path = Path::new(input);
    if path.is_file() {
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
    } else {
        Ok(input.to_string())
    }
}

fn run_estimate(input: &str) -> Result<()> {
    let text = read_input(input)?;
    let breakdown = tokens::TokenBreakdown::of(&text);
    println!("Estimated tokens: {}", breakdown.estimate());
    println!(
        "  hangul: {}, words: {}, numbers: {}, punctuation: {}",
        breakdown.hangul_chars, breakdown.latin_words, breakdown.number_runs, breakdown.punctuation
    );
    Ok(())
}

fn run_score(input: &str, domain: Option<String>) -> Result<()> {
    let text = read_input(input)?;
    let domain = domain.unwrap_or_else(|| Config::load().unwrap_or_default().default_domain);

    let report = QualityScorer::new(domain).evaluate(&text);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn run_optimize(
    input: &str,
    domain: Option<String>,
    requests_per_month: Option<u32>,
    output: Option<PathBuf>,
) -> Result<()> {
    let text = read_input(input)?;
    if text.trim().is_empty() {
        bail!("prompt text is empty");
    }

    let config = Config::load().unwrap_or_default();
    let domain = domain.unwrap_or(config.default_domain);
    let requests_per_month = requests_per_month.unwrap_or(config.requests_per_month);

    info!(
        "Optimizing under '{}' profile at {} requests/month",
        domain, requests_per_month
    );

    let result = OptimizationPipeline::new(domain).optimize(&text, requests_per_month);

    println!(
        "Tokens: {} -> {} (saved {}, {:.1}% compression)",
        result.original.tokens,
        result.optimized.tokens,
        result.compression.tokens_saved,
        result.compression.compression_ratio
    );
    println!(
        "Quality: {} -> {} (delta {}, preserved: {})",
        result.original.quality.overall.score,
        result.optimized.quality.overall.score,
        result.compression.quality_delta,
        result.compression.quality_preserved
    );
    for technique in &result.compression.techniques {
        println!("  applied: {}", technique.name);
    }

    match output {
        Some(path) => {
            std::fs::write(&path, &result.optimized.text)
                .with_context(|| format!("writing {}", path.display()))?;
            info!("Optimized prompt written to {}", path.display());
        }
        None => {
            println!("--- optimized prompt ---");
            println!("{}", result.optimized.text);
        }
    }

    println!("{}", serde_json::to_string_pretty(&result.model_savings)?);
    Ok(())
}

fn run_compare(input_tokens: u32, output_tokens: u32) -> Result<()> {
    let comparison = cost::compare_all(input_tokens, output_tokens);
    println!("{comparison}");
    Ok(())
}

fn run_recommend(input_tokens: u32, output_tokens: u32, priority: &str) -> Result<()> {
    let priority: Priority = priority.parse().map_err(anyhow::Error::msg)?;
    let pick = cost::recommend(input_tokens, output_tokens, priority);
    println!(
        "Recommended for {priority}: {} ({}) at ${:.6}/request",
        pick.model_id, pick.provider, pick.total_cost
    );
    Ok(())
}

fn run_analyze(input: &str) -> Result<()> {
    let text = read_input(input)?;
    let analysis = cost::analyze_prompt_cost(&text);
    println!("{}", serde_json::to_string_pretty(&analysis)?);
    Ok(())
}

fn run_compose(role: Option<String>, context: Option<String>, action: Option<String>) -> Result<()> {
    let prompt = compose::build_prompt(role.as_deref(), context.as_deref(), action.as_deref());
    let analysis = compose::analyze_structure(role.as_deref(), context.as_deref(), action.as_deref());

    if !prompt.is_empty() {
        println!("{prompt}");
        println!();
    }
    println!("Structure score: {}", analysis.score);
    for line in &analysis.feedback {
        println!("  {line}");
    }
    Ok(())
}

fn run_config_command(cmd: ConfigCommands) -> Result<()> {
    match cmd {
        ConfigCommands::Init { force } => {
            let path = Config::default_path();
            if path.exists() && !force {
                bail!("config already exists at {} (use --force to overwrite)", path.display());
            }
            Config::default().save()?;
            println!("Config written to {}", path.display());
        }
        ConfigCommands::Show => {
            let config = Config::load()?;
            println!("{}", toml::to_string_pretty(&config)?);
        }
        ConfigCommands::Path => {
            println!("{}", Config::default_path().display());
        }
    }
    Ok(())
}
