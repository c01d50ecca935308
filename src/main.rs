//! Sumfold - deferred element-wise summation CLI
//!
//! Folds the sequences listed in a JSON plan (or the built-in demo
//! scenario) into one lazy sum, evaluates it in a single pass, and
//! writes a Markdown or JSON report.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (bad plan, config, write failure, etc.)

use anyhow::{Context, Result};
use chrono::Utc;
use std::time::Instant;
use sumfold::cli::{Args, OutputFormat};
use sumfold::config::Config;
use sumfold::graph::PendingSum;
use sumfold::models::{EvaluationReport, ReportMetadata};
use sumfold::{plan, report};
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Initialize logging
    init_logging(&args);

    info!("Sumfold v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    // Run the evaluation
    match run(args) {
        Ok(()) => Ok(()),
        Err(e) => {
            error!("Evaluation failed: {}", e);
            eprintln!("\n❌ Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .sumfold.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(".sumfold.toml");

    if path.exists() {
        eprintln!("⚠️  .sumfold.toml already exists. Remove it first or edit it manually.");
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).context("Failed to write .sumfold.toml")?;

    println!("✅ Created .sumfold.toml with default settings.");
    println!("   Edit it to customize the output path and demo scenario.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Run the complete evaluation workflow.
fn run(args: Args) -> Result<()> {
    // Load configuration
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    // Step 1: Build the summation graph
    let mut graph = build_graph(&args, &config)?;

    println!("📐 Summation graph built:");
    println!("   Operands: {}", graph.operand_count());
    println!("   Sequence length: {}", graph.len());

    // Handle --dry-run: validate only, skip evaluation
    if args.dry_run {
        println!("\n✅ Dry run complete. No evaluation was performed.");
        return Ok(());
    }

    // Step 2: Evaluate (all additions fuse into one pass here)
    println!("\n🔬 Evaluating...");
    let start_time = Instant::now();
    let result = graph.evaluate();
    let duration = start_time.elapsed().as_secs_f64();

    // A second read is served from the cache without another pass.
    let cached = graph.evaluate();
    debug!(
        same_allocation = std::rc::Rc::ptr_eq(&result, &cached),
        "cache hit on second read"
    );

    // Step 3: Build the report
    let metadata = ReportMetadata {
        source: args.plan_source(),
        evaluated_at: Utc::now(),
        operand_count: graph.operand_count(),
        sequence_length: graph.len(),
        summation_runs: graph.summation_runs(),
        duration_seconds: duration,
    };
    let eval_report = EvaluationReport::new(metadata, result.values().to_vec());

    // Step 4: Generate and save the report
    let output = match args.format {
        OutputFormat::Json => report::generate_json_report(&eval_report)?,
        OutputFormat::Markdown => report::generate_markdown_report(&eval_report),
    };

    let output_path = &config.general.output;
    std::fs::write(output_path, &output)
        .with_context(|| format!("Failed to write report to {}", output_path))?;

    // Print summary
    println!("\n📊 Evaluation Summary:");
    println!("   Summation passes: {}", eval_report.metadata.summation_runs);
    if let Some(last) = eval_report.summary.last {
        println!("   Last element: {}", last);
    }
    println!("   Total: {}", eval_report.summary.total);
    println!("   Duration: {:.3}s", duration);
    println!("\n✅ Done! Report saved to: {}", output_path);

    Ok(())
}

/// Build the graph from the plan file or the demo settings.
fn build_graph(args: &Args, config: &Config) -> Result<PendingSum> {
    if let Some(ref input) = args.input {
        info!("Loading plan from: {}", input.display());
        let loaded = plan::Plan::load(input)?;
        let graph = loaded
            .build_graph()
            .with_context(|| format!("Invalid plan: {}", input.display()))?;
        return Ok(graph);
    }

    info!(
        "Running demo scenario: {} sequences of 0..={}",
        config.demo.sequences, config.demo.max_value
    );
    plan::demo_graph(config.demo.sequences, config.demo.max_value).map_err(Into::into)
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from .sumfold.toml");
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}
