use crate::models::PriceListExtraction;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;

/// In-memory aggregation of everything extracted from one uploaded batch:
/// distributor name → (product name → final price).
///
/// Built once per batch and held for the session; a new batch replaces it
/// wholesale. Writes for the same (distributor, product) pair are
/// last-write-wins in encounter order, with no conflict detection and no
/// validation of the extracted values.
#[derive(Debug, Clone)]
pub struct PriceCatalog {
    distributors: IndexMap<String, IndexMap<String, f64>>,
    built_at: DateTime<Utc>,
}

impl PriceCatalog {
    pub fn new() -> Self {
        Self {
            distributors: IndexMap::new(),
            built_at: Utc::now(),
        }
    }

    /// Folds one extraction result into the catalog. A new distributor name
    /// opens an empty product map; every product then overwrites any prior
    /// price recorded under the same name.
    pub fn absorb(&mut self, extraction: PriceListExtraction) {
        let products = self
            .distributors
            .entry(extraction.distributor_name)
            .or_default();

        for product in extraction.products {
            products.insert(product.product_name, product.final_price);
        }
    }

    pub fn aggregate(results: impl IntoIterator<Item = PriceListExtraction>) -> Self {
        let mut catalog = Self::new();
        for extraction in results {
            catalog.absorb(extraction);
        }
        catalog
    }

    /// Distributors in encounter order, each with its product → price map.
    pub fn distributors(&self) -> impl Iterator<Item = (&str, &IndexMap<String, f64>)> {
        self.distributors
            .iter()
            .map(|(name, products)| (name.as_str(), products))
    }

    pub fn price_of(&self, distributor: &str, product: &str) -> Option<f64> {
        self.distributors.get(distributor)?.get(product).copied()
    }

    pub fn distributor_count(&self) -> usize {
        self.distributors.len()
    }

    pub fn product_count(&self) -> usize {
        self.distributors.values().map(IndexMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.distributors.is_empty()
    }

    pub fn built_at(&self) -> DateTime<Utc> {
        self.built_at
    }
}

impl Default for PriceCatalog {
    fn default() -> Self {
        Self::new()
    }
}
