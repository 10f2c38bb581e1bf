pub mod catalog;
pub mod chunking;
pub mod error;
pub mod extractor;
pub mod ingest;
pub mod models;
pub mod pipeline;
pub mod search;

pub use catalog::PriceCatalog;
pub use chunking::{split_into_chunks, ChunkingConfig};
pub use error::{ExtractError, IngestError};
pub use extractor::{OpenAiExtractor, PriceListExtractor, DEFAULT_MODEL, DEFAULT_OPENAI_URL};
pub use ingest::flatten_file;
pub use models::{PipelineOptions, PriceListExtraction, Product, SearchHit};
pub use pipeline::{build_catalog, build_catalog_from_texts};
pub use search::{search, FuzzyScorer, JaroWinklerScorer, DEFAULT_SCORE_THRESHOLD};
