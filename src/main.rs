use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use veridian::config::Config;
use veridian::detector::Detector;
use veridian::output::terminal;
use veridian::status;
use veridian::store::{self, ModelStore};

/// Veridian: originality risk scoring for text documents.
///
/// Combines a stylometric classifier with reference-corpus similarity to
/// flag documents for human review. A heuristic scorer, not a verdict.
#[derive(Parser)]
#[command(name = "veridian", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a document and print the 0-100 plagiarism score
    Score {
        #[command(flatten)]
        input: TextInput,
    },

    /// Generate a full originality report
    Report {
        #[command(flatten)]
        input: TextInput,

        /// Emit the report as JSON instead of formatted terminal output
        #[arg(long)]
        json: bool,
    },

    /// Add a text to the reference corpus used for similarity comparison
    AddReference {
        #[command(flatten)]
        input: TextInput,
    },

    /// Retrain the classifier from the bootstrap dataset (resets the corpus)
    Train,

    /// Show model artifact status (path, corpus size, training info)
    Status,
}

/// Document input: inline text or a file path.
#[derive(Args)]
struct TextInput {
    /// Document text, passed directly as an argument
    text: Option<String>,

    /// Read the document from a plain-text file instead
    #[arg(long, conflicts_with = "text")]
    file: Option<PathBuf>,
}

impl TextInput {
    fn read(&self) -> Result<String> {
        if let Some(text) = &self.text {
            return Ok(text.clone());
        }
        if let Some(path) = &self.file {
            return std::fs::read_to_string(path)
                .map_err(|err| anyhow::anyhow!("reading {}: {err}", path.display()));
        }
        anyhow::bail!("provide the document text as an argument or via --file");
    }
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("veridian=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;
    let store = ModelStore::new(config.model_path.clone());

    match cli.command {
        Commands::Score { input } => {
            let text = input.read()?;
            let detector = Detector::open(store, config.train_seed)?;
            terminal::display_score(detector.score(&text));
        }

        Commands::Report { input, json } => {
            let text = input.read()?;
            let detector = Detector::open(store, config.train_seed)?;
            let report = detector.build_report(&text);
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                terminal::display_report(&report);
            }
        }

        Commands::AddReference { input } => {
            let text = input.read()?;
            let mut detector = Detector::open(store, config.train_seed)?;
            detector.add_reference(&text)?;
            println!(
                "Reference corpus now holds {} texts",
                detector.artifact().reference_corpus.len()
            );
        }

        Commands::Train => {
            let artifact = store::train_artifact(config.train_seed)?;
            store.save(&artifact)?;
            println!(
                "Model trained with accuracy: {:.2}",
                artifact.holdout_accuracy
            );
            println!("Artifact saved to {}", store.path().display());
        }

        Commands::Status => {
            status::show(&store)?;
        }
    }

    Ok(())
}
