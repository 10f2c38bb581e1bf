use serde::{Deserialize, Serialize};

/// One product line as extracted from a price list. Values are passed through
/// exactly as the extraction service returned them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub product_name: String,
    pub final_price: f64,
}

/// What the extraction service returns for one chunk of one file. The same
/// distributor name may appear in several extractions when its data spans
/// chunks; the catalog merges them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceListExtraction {
    pub distributor_name: String,
    pub products: Vec<Product>,
}

/// A single row of a search answer, derived per query and never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub product_name: String,
    pub final_price: f64,
    pub distributor_name: String,
}

#[derive(Debug, Clone, Copy)]
pub struct PipelineOptions {
    pub max_chunk_chars: usize,
    pub overlap_words: usize,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            max_chunk_chars: 40_000,
            overlap_words: 10,
        }
    }
}
