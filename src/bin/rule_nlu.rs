//! Rule request extractor CLI
//!
//! Prints the structured rule request extracted from an instruction as JSON.
//!
//! Usage:
//!   cargo run --features cli --bin rule_nlu -- \
//!     "Create a correlation rule for Active Directory using sAMAccountName"
//!
//! Examples:
//!   # Instruction from a file, pretty-printed to another file
//!   cargo run --features cli --bin rule_nlu -- \
//!     --input request.txt --output out/result.json --pretty
//!
//!   # Use an explicit language model
//!   cargo run --features cli --bin rule_nlu -- \
//!     --model config/model/en_rules.yaml "What is the pre-iterate rule for SAP"

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use iiq_rule_nlu::analysis::{ModelLoader, ShallowParser, SharedEngine, MODEL_ENV_VAR};
use iiq_rule_nlu::io::read_from_file;
use iiq_rule_nlu::RuleExtractor;

/// Extract intent, rule type, application and attributes from a rule request
#[derive(Parser, Debug)]
#[command(name = "rule_nlu")]
#[command(about = "Extract a structured IdentityIQ rule request from free text")]
struct Args {
    /// Instruction text (e.g., "Create a correlation rule for Workday")
    #[arg(required_unless_present = "input", conflicts_with = "input")]
    text: Option<String>,

    /// Read the instruction from a file instead
    #[arg(long, short = 'i')]
    input: Option<PathBuf>,

    /// Language model file (overrides the shared engine and RULE_NLU_MODEL)
    #[arg(long, short = 'm')]
    model: Option<PathBuf>,

    /// Write the JSON result to a file instead of stdout
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// Pretty-print the JSON result
    #[arg(long, short = 'p')]
    pretty: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let text = match (&args.text, &args.input) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => read_from_file(path)
            .with_context(|| format!("Failed to read instruction from {}", path.display()))?,
        (None, None) => anyhow::bail!("Either an instruction or --input is required"),
    };
    let text = text.trim();

    let result = match &args.model {
        Some(path) => {
            let parser = ShallowParser::from_loader(&ModelLoader::from_path(path))
                .with_context(|| format!("Failed to load language model {}", path.display()))?;
            RuleExtractor::new(parser).extract(text)
        }
        None => RuleExtractor::new(SharedEngine).extract(text),
    }
    .with_context(|| {
        format!(
            "Extraction failed (set {} to choose a language model)",
            MODEL_ENV_VAR
        )
    })?;

    match &args.output {
        Some(path) => result
            .write_json(path, args.pretty)
            .with_context(|| format!("Failed to write result to {}", path.display()))?,
        None => {
            let json = result
                .to_json(args.pretty)
                .context("Failed to serialize extraction result")?;
            println!("{}", json);
        }
    }

    Ok(())
}
