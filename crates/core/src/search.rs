use crate::catalog::PriceCatalog;
use crate::models::SearchHit;
use indexmap::IndexSet;

pub const DEFAULT_SCORE_THRESHOLD: f64 = 80.0;

/// Similarity between a query and a candidate product name on a 0–100 scale.
/// Behind a trait so tests can substitute a deterministic scorer.
pub trait FuzzyScorer {
    fn score(&self, query: &str, candidate: &str) -> f64;
}

/// Default scorer: Jaro-Winkler similarity scaled to 0–100. Candidates are
/// lower-cased here; callers are expected to normalize the query.
#[derive(Debug, Default, Clone, Copy)]
pub struct JaroWinklerScorer;

impl FuzzyScorer for JaroWinklerScorer {
    fn score(&self, query: &str, candidate: &str) -> f64 {
        strsim::jaro_winkler(query, &candidate.to_lowercase()) * 100.0
    }
}

/// Fuzzy-matches `query` against every product name in the catalog and joins
/// the candidates scoring at least `threshold` back to the distributors that
/// carry them.
///
/// Candidates rank by descending score; equal scores keep catalog encounter
/// order. A product listed by several distributors yields one hit per
/// distributor. An empty result is the "no products found" state.
pub fn search(
    catalog: &PriceCatalog,
    query: &str,
    scorer: &dyn FuzzyScorer,
    threshold: f64,
) -> Vec<SearchHit> {
    let normalized = query.trim().to_lowercase();
    if normalized.is_empty() {
        return Vec::new();
    }

    let mut candidates: IndexSet<&str> = IndexSet::new();
    for (_, products) in catalog.distributors() {
        for name in products.keys() {
            candidates.insert(name.as_str());
        }
    }

    let mut ranked: Vec<(&str, f64)> = candidates
        .into_iter()
        .map(|name| (name, scorer.score(&normalized, name)))
        .filter(|(_, score)| *score >= threshold)
        .collect();

    // Stable sort, so ties keep catalog encounter order.
    ranked.sort_by(|left, right| right.1.total_cmp(&left.1));

    let mut hits = Vec::new();
    for (name, _) in ranked {
        for (distributor, products) in catalog.distributors() {
            if let Some(&price) = products.get(name) {
                hits.push(SearchHit {
                    product_name: name.to_string(),
                    final_price: price,
                    distributor_name: distributor.to_string(),
                });
            }
        }
    }

    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PriceListExtraction, Product};
    use std::collections::HashMap;

    struct CannedScorer {
        scores: HashMap<String, f64>,
    }

    impl CannedScorer {
        fn new(scores: &[(&str, f64)]) -> Self {
            Self {
                scores: scores
                    .iter()
                    .map(|(name, score)| (name.to_string(), *score))
                    .collect(),
            }
        }
    }

    impl FuzzyScorer for CannedScorer {
        fn score(&self, _query: &str, candidate: &str) -> f64 {
            self.scores.get(candidate).copied().unwrap_or(0.0)
        }
    }

    fn catalog(entries: &[(&str, &[(&str, f64)])]) -> PriceCatalog {
        PriceCatalog::aggregate(entries.iter().map(|(distributor, products)| {
            PriceListExtraction {
                distributor_name: distributor.to_string(),
                products: products
                    .iter()
                    .map(|(name, price)| Product {
                        product_name: name.to_string(),
                        final_price: *price,
                    })
                    .collect(),
            }
        }))
    }

    #[test]
    fn threshold_is_inclusive_at_eighty() {
        let catalog = catalog(&[("ACME", &[("Keep", 100.0), ("Drop", 200.0)][..])]);
        let scorer = CannedScorer::new(&[("Keep", 80.0), ("Drop", 79.0)]);

        let hits = search(&catalog, "anything", &scorer, DEFAULT_SCORE_THRESHOLD);

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].product_name, "Keep");
        assert_eq!(hits[0].final_price, 100.0);
    }

    #[test]
    fn shared_product_yields_one_hit_per_distributor() {
        let catalog = catalog(&[
            ("ACME", &[("Paracetamol 500mg", 12000.0)][..]),
            ("Beta Pharma", &[("Paracetamol 500mg", 11800.0)][..]),
        ]);
        let scorer = CannedScorer::new(&[("Paracetamol 500mg", 95.0)]);

        let hits = search(&catalog, "paracetamol", &scorer, DEFAULT_SCORE_THRESHOLD);

        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].distributor_name, "ACME");
        assert_eq!(hits[0].final_price, 12000.0);
        assert_eq!(hits[1].distributor_name, "Beta Pharma");
        assert_eq!(hits[1].final_price, 11800.0);
    }

    #[test]
    fn results_rank_by_descending_score() {
        let catalog = catalog(&[(
            "ACME",
            &[("Low", 1.0), ("High", 2.0), ("Mid", 3.0)][..],
        )]);
        let scorer = CannedScorer::new(&[("Low", 81.0), ("High", 99.0), ("Mid", 90.0)]);

        let hits = search(&catalog, "q", &scorer, DEFAULT_SCORE_THRESHOLD);

        let names: Vec<&str> = hits.iter().map(|hit| hit.product_name.as_str()).collect();
        assert_eq!(names, vec!["High", "Mid", "Low"]);
    }

    #[test]
    fn no_match_yields_empty_result() {
        let catalog = catalog(&[("ACME", &[("Paracetamol 500mg", 12000.0)][..])]);

        let hits = search(
            &catalog,
            "motor oil",
            &JaroWinklerScorer,
            DEFAULT_SCORE_THRESHOLD,
        );

        assert!(hits.is_empty());
    }

    #[test]
    fn empty_query_yields_empty_result() {
        let catalog = catalog(&[("ACME", &[("Paracetamol 500mg", 12000.0)][..])]);

        let hits = search(&catalog, "   ", &JaroWinklerScorer, DEFAULT_SCORE_THRESHOLD);

        assert!(hits.is_empty());
    }

    #[test]
    fn jaro_winkler_matches_case_insensitively() {
        let catalog = catalog(&[("ACME", &[("Paracetamol 500mg", 12000.0)][..])]);

        let hits = search(
            &catalog,
            "PARACETAMOL",
            &JaroWinklerScorer,
            DEFAULT_SCORE_THRESHOLD,
        );

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].product_name, "Paracetamol 500mg");
    }
}
