use crate::catalog::PriceCatalog;
use crate::chunking::{split_into_chunks, ChunkingConfig};
use crate::extractor::PriceListExtractor;
use crate::ingest::flatten_file;
use crate::models::PipelineOptions;
use std::path::PathBuf;
use tracing::{error, info};

/// Builds the session catalog for one uploaded batch: each file is flattened
/// to text, chunked, and its chunks sent to the extraction service one at a
/// time, in order. A failing chunk is logged and contributes zero records;
/// it never aborts sibling chunks or sibling files.
pub async fn build_catalog<E>(
    files: &[PathBuf],
    extractor: &E,
    options: PipelineOptions,
) -> PriceCatalog
where
    E: PriceListExtractor + Sync + ?Sized,
{
    let mut catalog = PriceCatalog::new();

    for path in files {
        info!(file = %path.display(), "processing file");
        let Some(text) = flatten_file(path) else {
            continue;
        };
        extract_into(&mut catalog, &text, extractor, options).await;
    }

    catalog
}

/// Same pipeline, starting from already-flattened text blobs (one per file).
pub async fn build_catalog_from_texts<E>(
    texts: &[String],
    extractor: &E,
    options: PipelineOptions,
) -> PriceCatalog
where
    E: PriceListExtractor + Sync + ?Sized,
{
    let mut catalog = PriceCatalog::new();
    for text in texts {
        extract_into(&mut catalog, text, extractor, options).await;
    }
    catalog
}

async fn extract_into<E>(
    catalog: &mut PriceCatalog,
    text: &str,
    extractor: &E,
    options: PipelineOptions,
) where
    E: PriceListExtractor + Sync + ?Sized,
{
    let chunks = split_into_chunks(text, ChunkingConfig::from(options));
    info!(chunk_count = chunks.len(), "sending chunks for extraction");

    for chunk in chunks {
        match extractor.extract(&chunk).await {
            Ok(results) => {
                for extraction in results {
                    catalog.absorb(extraction);
                }
            }
            Err(error) => error!(%error, "error processing chunk"),
        }
    }
}
