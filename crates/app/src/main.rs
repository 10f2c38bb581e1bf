use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use pricelist_core::{
    build_catalog, search, JaroWinklerScorer, OpenAiExtractor, PipelineOptions, PriceCatalog,
    SearchHit, DEFAULT_MODEL, DEFAULT_OPENAI_URL, DEFAULT_SCORE_THRESHOLD,
};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "pricelist-cli", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Extraction service base URL
    #[arg(long, default_value = DEFAULT_OPENAI_URL)]
    openai_url: String,

    /// Extraction model name
    #[arg(long, default_value = DEFAULT_MODEL)]
    model: String,

    /// Maximum characters per extraction chunk
    #[arg(long, default_value_t = 40_000)]
    max_chunk_chars: usize,

    /// Words shared between consecutive chunks
    #[arg(long, default_value_t = 10)]
    overlap_words: usize,
}

#[derive(Subcommand)]
enum Command {
    /// Extract the given price-list files and print a catalog summary.
    Ingest {
        /// Price-list file (.xlsx or .pdf); repeat for a batch.
        #[arg(long = "file", required = true)]
        files: Vec<PathBuf>,
    },
    /// Build the catalog from the given files, then answer product queries.
    Search {
        /// Price-list file (.xlsx or .pdf); repeat for a batch.
        #[arg(long = "file", required = true)]
        files: Vec<PathBuf>,
        /// One-shot query; omit to answer queries interactively.
        #[arg(long)]
        query: Option<String>,
        /// Minimum fuzzy score (0-100) for a product to match.
        #[arg(long, default_value_t = DEFAULT_SCORE_THRESHOLD)]
        threshold: f64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app_version = env!("CARGO_PKG_VERSION");

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer())
        .init();

    let cli = Cli::parse();

    let extractor = OpenAiExtractor::from_env(&cli.openai_url, &cli.model)
        .context("extraction service credential")?;
    let options = PipelineOptions {
        max_chunk_chars: cli.max_chunk_chars,
        overlap_words: cli.overlap_words,
    };

    info!(
        version = app_version,
        started_at = %Utc::now().to_rfc3339(),
        "pricelist-cli boot"
    );

    match cli.command {
        Command::Ingest { files } => {
            let catalog = build_catalog(&files, &extractor, options).await;

            println!(
                "{} distributors, {} products extracted at {}",
                catalog.distributor_count(),
                catalog.product_count(),
                catalog.built_at().to_rfc3339()
            );
            for (distributor, products) in catalog.distributors() {
                println!("  {distributor}: {} products", products.len());
            }
        }
        Command::Search {
            files,
            query,
            threshold,
        } => {
            // The catalog is session state: built once per uploaded batch,
            // reused across every query below.
            let catalog = build_catalog(&files, &extractor, options).await;
            info!(
                distributors = catalog.distributor_count(),
                products = catalog.product_count(),
                "catalog built"
            );

            match query {
                Some(query) => {
                    render_hits(&search(&catalog, &query, &JaroWinklerScorer, threshold));
                }
                None => run_query_loop(&catalog, threshold)?,
            }
        }
    }

    Ok(())
}

fn run_query_loop(catalog: &PriceCatalog, threshold: f64) -> anyhow::Result<()> {
    let scorer = JaroWinklerScorer;
    let stdin = io::stdin();
    let mut line = String::new();

    loop {
        print!("search> ");
        io::stdout().flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let query = line.trim();
        if query.is_empty() {
            break;
        }

        render_hits(&search(catalog, query, &scorer, threshold));
    }

    Ok(())
}

fn render_hits(hits: &[SearchHit]) {
    if hits.is_empty() {
        println!("No products found matching your search.");
        return;
    }

    let prices: Vec<String> = hits.iter().map(|hit| hit.final_price.to_string()).collect();
    let name_width = hits
        .iter()
        .map(|hit| hit.product_name.len())
        .chain(std::iter::once("Product Name".len()))
        .max()
        .unwrap_or(0);
    let price_width = prices
        .iter()
        .map(String::len)
        .chain(std::iter::once("Final Price".len()))
        .max()
        .unwrap_or(0);

    println!(
        "{:<name_width$}  {:>price_width$}  {}",
        "Product Name", "Final Price", "Distributor"
    );
    for (hit, price) in hits.iter().zip(&prices) {
        println!(
            "{:<name_width$}  {:>price_width$}  {}",
            hit.product_name, price, hit.distributor_name
        );
    }
}
