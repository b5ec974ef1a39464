//! Command-line front end: train on a labeled corpus, then evaluate against a
//! held-out corpus or classify a single text.

use std::{
    io::Read,
    path::{Path, PathBuf},
    time::Instant,
};

use anyhow::{Context, Result, bail, ensure};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use topic_bayes_preprocessing::pre_processor::DEFAULT_MIN_TOKEN_CHARS;
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

use crate::{Classifier, CorpusReader, Evaluation, Prediction, TokenizerParams};

#[derive(Parser, Debug)]
#[command(name = "topic-bayes", version)]
#[command(about = "Naive Bayes topic classification of short documents", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Field delimiter of the corpus files
    #[arg(long, default_value_t = ',', global = true)]
    pub delimiter: char,

    /// Treat the first line of every corpus file as a header
    #[arg(long, global = true)]
    pub has_headers: bool,

    /// Drop tokens with fewer characters than this
    #[arg(long, default_value_t = DEFAULT_MIN_TOKEN_CHARS, global = true)]
    pub min_token_chars: usize,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Train on one corpus and report hits and misses on another
    Evaluate {
        /// Training corpus (`label,"text"` per line)
        #[arg(long, value_name = "PATH", env = "TOPIC_BAYES_TRAIN")]
        train: PathBuf,

        /// Held-out corpus in the same format
        #[arg(long, value_name = "PATH", env = "TOPIC_BAYES_TEST")]
        test: PathBuf,

        /// Output format
        #[arg(short = 'o', long, value_enum, default_value = "human")]
        format: ReportFormat,

        /// Also list every misclassified document
        #[arg(long)]
        show_misses: bool,
    },
    /// Train on a corpus and classify one text
    Predict {
        /// Training corpus (`label,"text"` per line)
        #[arg(long, value_name = "PATH", env = "TOPIC_BAYES_TRAIN")]
        train: PathBuf,

        /// Text to classify (if not provided, reads from stdin)
        #[arg(value_name = "TEXT")]
        text: Option<String>,

        /// Read the text from a file
        #[arg(short, long, value_name = "PATH", conflicts_with = "text")]
        file: Option<PathBuf>,

        /// Output format
        #[arg(short = 'o', long, value_enum, default_value = "human")]
        format: PredictionFormat,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportFormat {
    /// `Hits: N` / `Misses: M` lines
    Human,
    /// A single JSON object
    Json,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PredictionFormat {
    /// Just the predicted label
    Label,
    /// Label, confidence and the full distribution
    Human,
    /// A single JSON object
    Json,
}

/// Install a stderr `tracing` subscriber. `RUST_LOG` overrides the level
/// derived from `-v`/`-q`.
pub fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => LevelFilter::ERROR,
        (false, 0) => LevelFilter::WARN,
        (false, 1) => LevelFilter::INFO,
        (false, _) => LevelFilter::DEBUG,
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    // A subscriber may already be installed when embedded in another program.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

pub fn run(cli: &Cli) -> Result<()> {
    let reader = corpus_reader(cli)?;
    match &cli.command {
        Command::Evaluate {
            train,
            test,
            format,
            show_misses,
        } => run_evaluate(&reader, train, test, *format, *show_misses),
        Command::Predict {
            train,
            text,
            file,
            format,
        } => {
            let text = read_input(text.as_deref(), file.as_deref())?;
            run_predict(&reader, train, &text, *format)
        }
    }
}

fn corpus_reader(cli: &Cli) -> Result<CorpusReader> {
    let delimiter = u8::try_from(cli.delimiter)
        .ok()
        .filter(u8::is_ascii)
        .with_context(|| format!("Delimiter must be a single ASCII character, got {:?}", cli.delimiter))?;
    ensure!(cli.min_token_chars > 0, "--min-token-chars must be at least 1");

    let tokenizer = TokenizerParams::default().with_min_token_chars(cli.min_token_chars);
    Ok(CorpusReader::new()
        .with_delimiter(delimiter)
        .with_headers(cli.has_headers)
        .with_tokenizer(tokenizer))
}

/// Priority: text arg > file > stdin
fn read_input(text: Option<&str>, file: Option<&Path>) -> Result<String> {
    if let Some(text) = text {
        return Ok(text.to_owned());
    }
    if let Some(path) = file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()));
    }
    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read from stdin")?;
    Ok(buffer)
}

fn train(reader: &CorpusReader, path: &Path) -> Result<Classifier> {
    let start = Instant::now();
    let documents = reader
        .read_path(path)
        .with_context(|| format!("Failed to load training corpus: {}", path.display()))?;
    if documents.is_empty() {
        warn!(path = %path.display(), "Training corpus contains no documents");
    }

    let classifier = Classifier::fit(&documents, reader.tokenizer().clone());
    let model = classifier.model();
    info!(
        num_documents = model.num_documents(),
        num_labels = model.num_labels(),
        vocabulary_size = model.vocabulary_size(),
        elapsed = ?start.elapsed(),
        "Model trained"
    );

    let mut labels = model.labels().collect::<Vec<_>>();
    labels.sort_unstable();
    for label in labels {
        debug!(
            label,
            documents = model.document_count(label),
            words = model.total_word_count(label),
            distinct_words = model.word_counts(label).map_or(0, |table| table.len()),
            "Label statistics"
        );
    }
    Ok(classifier)
}

fn run_evaluate(
    reader: &CorpusReader,
    train_path: &Path,
    test_path: &Path,
    format: ReportFormat,
    show_misses: bool,
) -> Result<()> {
    let classifier = train(reader, train_path)?;
    let test_documents = reader
        .read_path(test_path)
        .with_context(|| format!("Failed to load test corpus: {}", test_path.display()))?;

    let start = Instant::now();
    let evaluation = classifier.evaluate(&test_documents);
    info!(elapsed = ?start.elapsed(), "Evaluated test corpus");

    output_evaluation(&evaluation, format, show_misses)
}

fn output_evaluation(evaluation: &Evaluation<'_>, format: ReportFormat, show_misses: bool) -> Result<()> {
    match format {
        ReportFormat::Human => {
            if show_misses {
                for miss in evaluation.misses() {
                    println!("{}\t{}", miss.expected(), miss.predicted().unwrap_or("-"));
                }
                println!("-------");
            }
            println!("Hits: {}", evaluation.hit_count());
            println!("Misses: {}", evaluation.miss_count());
            if let Some(accuracy) = evaluation.accuracy() {
                println!("Accuracy: {:.2}%", accuracy * 100.0);
            }
        }
        ReportFormat::Json => {
            println!("{}", serde_json::to_string(&evaluation_json(evaluation, show_misses)?)?);
        }
    }
    Ok(())
}

fn evaluation_json(evaluation: &Evaluation<'_>, show_misses: bool) -> Result<serde_json::Value> {
    let mut json_output = serde_json::to_value(evaluation.summary())?;
    if show_misses {
        json_output["missed"] = serde_json::to_value(evaluation.misses())?;
    }
    Ok(json_output)
}

fn run_predict(reader: &CorpusReader, train_path: &Path, text: &str, format: PredictionFormat) -> Result<()> {
    let classifier = train(reader, train_path)?;
    let start = Instant::now();
    let prediction = classifier.predict(text);
    debug!(elapsed = ?start.elapsed(), "Prediction complete");

    output_prediction(&prediction, format)
}

fn output_prediction(prediction: &Prediction, format: PredictionFormat) -> Result<()> {
    let Some((label, probability)) = prediction.top() else {
        bail!("No label could be predicted: the training corpus has no labels");
    };

    match format {
        PredictionFormat::Label => println!("{label}"),
        PredictionFormat::Human => {
            println!("Result: {label}");
            println!("Confidence: {:.1}%", probability * 100.0);
            for (label, probability) in prediction.ranked() {
                println!("  {label:<20} {probability:.4}");
            }
        }
        PredictionFormat::Json => {
            let json_output = serde_json::json!({
                "label": label,
                "probabilities": prediction,
            });
            println!("{}", serde_json::to_string(&json_output)?);
        }
    }
    Ok(())
}
