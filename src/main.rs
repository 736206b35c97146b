use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use notetaker::{
    read_transcript, read_transcript_file, report_to_json, write_report_json, Capabilities,
    HumanReport, ModelConfig, NotetakerPipeline, RuleTable, Transcript,
};

#[derive(Parser)]
#[command(name = "notetaker")]
#[command(author, version, about = "Clinical transcript analysis and SOAP note generation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full analysis: medical summary, patient sentiment and SOAP note
    Analyze {
        /// Input transcript file ("Speaker: utterance" lines); reads stdin if omitted
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file for the JSON report; prints to stdout if omitted
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output file for a human-readable clinical note (text)
        #[arg(long)]
        human_readable: Option<PathBuf>,

        /// Model provider (huggingface, anthropic) [env: NOTETAKER_PROVIDER]
        #[arg(long)]
        provider: Option<String>,

        /// Zero-shot classification model [env: NOTETAKER_CLASSIFIER_MODEL]
        #[arg(long)]
        classifier_model: Option<String>,

        /// Text generation model [env: NOTETAKER_GENERATOR_MODEL]
        #[arg(long)]
        generator_model: Option<String>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Produce only the rule-based medical summary (no models needed)
    Summarize {
        /// Input transcript file; reads stdin if omitted
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            input,
            output,
            human_readable,
            provider,
            classifier_model,
            generator_model,
            verbose,
        } => {
            setup_logging(verbose);
            let config = load_model_config(provider, classifier_model, generator_model)?;
            analyze(input.as_deref(), output.as_deref(), human_readable.as_deref(), &config).await
        }
        Commands::Summarize { input, verbose } => {
            setup_logging(verbose);
            summarize(input.as_deref())
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

/// Environment configuration with command-line overrides applied
fn load_model_config(
    provider: Option<String>,
    classifier_model: Option<String>,
    generator_model: Option<String>,
) -> Result<ModelConfig> {
    let config = ModelConfig::from_lookup(|key| {
        let flag = match key {
            "NOTETAKER_PROVIDER" => provider.clone(),
            "NOTETAKER_CLASSIFIER_MODEL" => classifier_model.clone(),
            "NOTETAKER_GENERATOR_MODEL" => generator_model.clone(),
            _ => None,
        };
        flag.or_else(|| std::env::var(key).ok())
    })
    .context("Failed to load model configuration")?;

    info!(
        "Using {:?}: classifier {}, generator {}",
        config.provider, config.classifier_model, config.generator_model
    );
    Ok(config)
}

fn load_transcript(input: Option<&Path>) -> Result<Transcript> {
    match input {
        Some(path) => {
            info!("Loading transcript from {:?}", path);
            read_transcript_file(path).context("Failed to load input transcript")
        }
        None => {
            info!("Reading transcript from stdin");
            read_transcript(std::io::stdin().lock())
        }
    }
}

async fn analyze(
    input: Option<&Path>,
    output: Option<&Path>,
    human_readable: Option<&Path>,
    config: &ModelConfig,
) -> Result<()> {
    let transcript = load_transcript(input)?;

    let capabilities =
        Capabilities::from_config(config).context("Failed to initialize model clients")?;
    let pipeline = NotetakerPipeline::new(capabilities);

    let report = pipeline.run_full_analysis(&transcript).await?;

    match output {
        Some(path) => {
            write_report_json(&report, path)?;
            info!("Report written to {:?}", path);
        }
        None => println!("{}", report_to_json(&report)?),
    }

    if let Some(path) = human_readable {
        HumanReport::new(&report).write_file(path)?;
        info!("Human-readable note written to {:?}", path);
    }

    Ok(())
}

fn summarize(input: Option<&Path>) -> Result<()> {
    let transcript = load_transcript(input)?;
    let summary = NotetakerPipeline::summarize_only(&transcript, &RuleTable::default());

    println!(
        "{}",
        serde_json::to_string_pretty(&summary).context("Failed to serialize summary")?
    );
    Ok(())
}
