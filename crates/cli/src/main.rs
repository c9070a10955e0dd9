//! docqa CLI
//!
//! Answers a single natural-language question against the indexed
//! passage corpus. Stdout carries exactly one JSON object — `{"answer":
//! ...}` on success, `{"error": ...}` on failure — and every diagnostic
//! goes to stderr.

use clap::error::ErrorKind;
use clap::Parser;
use docqa_core::{logging, AppConfig};
use docqa_corpus::AnswerPipeline;

/// Answer a question from indexed document passages
#[derive(Parser, Debug)]
#[command(name = "docqa")]
#[command(about = "Answer questions from indexed document passages", long_about = None)]
#[command(version)]
struct Cli {
    /// The question to answer
    question: String,
}

/// Emit the single JSON error object and exit with a failure code.
fn fail(message: &str) -> ! {
    println!("{}", serde_json::json!({ "error": message }));
    std::process::exit(1);
}

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
                let _ = err.print();
                return;
            }
            // Usage details go to stderr; stdout stays a single JSON object.
            eprintln!("{}", err);
            fail("Question argument required");
        }
    };

    if let Err(err) = logging::init_logging(None) {
        eprintln!("{}", err);
    }

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!("{}", err);
            fail(&err.to_string());
        }
    };

    tracing::debug!("Using passage index at {:?}", config.index_path);

    let pipeline = match AnswerPipeline::from_config(&config) {
        Ok(pipeline) => pipeline,
        Err(err) => {
            tracing::error!("{}", err);
            fail(&err.to_string());
        }
    };

    match pipeline.answer(&cli.question).await {
        Ok(answer) => {
            tracing::info!("Answer ready (source: {})", answer.source.as_str());
            println!("{}", serde_json::json!({ "answer": answer.text }));
        }
        Err(err) => {
            tracing::error!("{}", err);
            fail(&err.to_string());
        }
    }
}
