//! CLI binary for scout.

use clap::{Parser, Subcommand};
use scout::eval::{self, EvalSettings};
use scout::rerank::{EmbeddingReranker, OnnxEmbedder};
use scout::{ResearchRequest, Researcher, ScoutConfig};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

/// Scout: search, read and summarize the web into a short report.
#[derive(Parser)]
#[command(name = "scout", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Command,
}

/// Available commands.
#[derive(Subcommand)]
enum Command {
    /// Research a question and print the report.
    Research {
        /// The question to research.
        query: String,

        /// Number of search results to summarize.
        #[arg(short, long)]
        k: Option<usize>,

        /// Model selector: an Ollama model id, or `hf:<alias>` for the
        /// hosted summarizer.
        #[arg(short, long)]
        model: Option<String>,

        /// Page text budget in characters.
        #[arg(long)]
        max_chars: Option<usize>,

        /// Keep the search engine's order.
        #[arg(long)]
        no_rerank: bool,
    },

    /// Run the offline keyword evaluation over a JSONL test set.
    Eval {
        /// Test set, one `{"query", "keywords"}` object per line.
        #[arg(long, default_value = "eval/testset.jsonl")]
        file: PathBuf,

        /// Model selector used for every query.
        #[arg(long, default_value = "hf:distilbart")]
        model: String,

        /// Number of search results per query.
        #[arg(long, default_value_t = 2)]
        k: usize,

        /// Page text budget in characters.
        #[arg(long, default_value_t = 900)]
        max_chars: usize,

        /// Limit the number of rows (0 = all).
        #[arg(long, default_value_t = 0)]
        n: usize,

        /// Keep the search engine's order.
        #[arg(long)]
        no_rerank: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = ScoutConfig::load(cli.config.as_deref())?;
    let _log_guard = scout::logging::init(&config.logging)?;

    match cli.command {
        Command::Research {
            query,
            k,
            model,
            max_chars,
            no_rerank,
        } => {
            let mut request = ResearchRequest::new(query)
                .with_k(k.unwrap_or(config.research.k))
                .with_max_chars(max_chars.unwrap_or(config.research.max_chars))
                .with_reranker(config.rerank.enabled && !no_rerank);
            request.model = model;

            let researcher = build_researcher(&config, request.use_reranker).await?;
            let report = researcher.research(&request).await?;
            println!("{}", report.render());
            Ok(())
        }
        Command::Eval {
            file,
            model,
            k,
            max_chars,
            n,
            no_rerank,
        } => {
            let cases = eval::load_cases(&file, n)?;
            let settings = EvalSettings {
                model,
                k,
                max_chars,
                use_reranker: config.rerank.enabled && !no_rerank,
            };
            let researcher = build_researcher(&config, settings.use_reranker).await?;
            let mut stdout = std::io::stdout().lock();
            eval::run_eval(&researcher, &cases, &settings, &mut stdout).await?;
            Ok(())
        }
    }
}

/// Build the researcher, loading the embedding model when reranking is on.
///
/// A reranker that fails to load is logged and skipped; runs then keep the
/// search order.
async fn build_researcher(config: &ScoutConfig, with_reranker: bool) -> anyhow::Result<Researcher> {
    let researcher = Researcher::from_config(config)?;
    if !with_reranker {
        return Ok(researcher);
    }

    let rerank_config = config.rerank.clone();
    let loaded = tokio::task::spawn_blocking(move || OnnxEmbedder::load(&rerank_config)).await?;
    match loaded {
        Ok(embedder) => {
            info!(repo = config.rerank.model_repo.as_str(), "reranker_ready");
            Ok(researcher.with_reranker(Arc::new(EmbeddingReranker::new(embedder))))
        }
        Err(e) => {
            warn!(error = %e, "reranker_unavailable");
            Ok(researcher)
        }
    }
}
