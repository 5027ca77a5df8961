//! Database query: match a probe feature set against every stored entry
//! and keep the best-scoring one.

use crate::matcher::{MatcherKind, match_features};
use mops_core::{FeatureMatch, FeatureSet};

/// An image identity paired with its precomputed features
#[derive(Debug, Clone)]
pub struct DatabaseEntry {
    pub name: String,
    pub features: FeatureSet,
}

/// Ordered collection of entries, iterated read-only once per query
pub type ImageDatabase = Vec<DatabaseEntry>;

#[derive(Debug, Clone)]
pub struct QueryResult {
    pub index: usize,
    pub matches: Vec<FeatureMatch>,
    pub score: f64,
}

/// Match `features` against every database entry and return the one with
/// the highest total score. Strict greater-than against a running best
/// initialized to -1e100 means ties favor the earliest entry. An empty
/// database yields `None`.
pub fn perform_query(
    features: &FeatureSet,
    db: &ImageDatabase,
    kind: MatcherKind,
) -> Option<QueryResult> {
    let mut best: Option<QueryResult> = None;
    let mut best_score = -1e100;

    for (index, entry) in db.iter().enumerate() {
        let (matches, score) = match_features(kind, features, &entry.features);
        if score > best_score {
            best_score = score;
            best = Some(QueryResult { index, matches, score });
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use mops_core::Feature;

    fn feature(id: u32, data: &[f64]) -> Feature {
        Feature {
            x: 0,
            y: 0,
            angle: 0.0,
            id,
            data: data.to_vec(),
        }
    }

    fn entry(name: &str, values: &[f64]) -> DatabaseEntry {
        DatabaseEntry {
            name: name.to_string(),
            features: values
                .iter()
                .enumerate()
                .map(|(i, &v)| feature(i as u32 + 1, &[v]))
                .collect(),
        }
    }

    #[test]
    fn empty_database_yields_none() {
        let probe = vec![feature(1, &[0.0])];
        assert!(perform_query(&probe, &ImageDatabase::new(), MatcherKind::Nearest).is_none());
    }

    #[test]
    fn exact_entry_wins() {
        let probe = vec![feature(1, &[1.0]), feature(2, &[2.0])];
        let db = vec![
            entry("far", &[10.0, 20.0]),
            entry("exact", &[1.0, 2.0]),
            entry("near", &[1.5, 2.5]),
        ];
        let result = perform_query(&probe, &db, MatcherKind::Nearest).unwrap();
        assert_eq!(result.index, 1);
        assert_eq!(result.score, 0.0);
        assert_eq!(result.matches.len(), 2);
    }

    #[test]
    fn ties_favor_earliest_entry() {
        let probe = vec![feature(1, &[1.0])];
        let db = vec![entry("first", &[1.0]), entry("second", &[1.0])];
        let result = perform_query(&probe, &db, MatcherKind::Nearest).unwrap();
        assert_eq!(result.index, 0);
    }
}
