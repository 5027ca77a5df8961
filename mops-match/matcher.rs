//! Nearest-neighbor and ratio-test matching between two feature sets.
//!
//! Both strategies are total: every source feature produces exactly one
//! `FeatureMatch`. Several source features may map to the same target.

use crate::distance::{DISTANCE_SENTINEL, distance_ssd};
use mops_core::{FeatureMatch, FeatureSet};
use rayon::prelude::*;

/// Matching strategy selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatcherKind {
    Nearest,
    Ratio,
}

/// Match every feature of `f1` against `f2` with the chosen strategy.
/// Returns the matches in source order and the aggregate score.
pub fn match_features(kind: MatcherKind, f1: &FeatureSet, f2: &FeatureSet) -> (Vec<FeatureMatch>, f64) {
    match kind {
        MatcherKind::Nearest => nearest_match(f1, f2),
        MatcherKind::Ratio => ratio_match(f1, f2),
    }
}

/// Nearest-neighbor matching on descriptor distance; `score = -distance`,
/// and the total is the sum of all scores.
pub fn nearest_match(f1: &FeatureSet, f2: &FeatureSet) -> (Vec<FeatureMatch>, f64) {
    let matches: Vec<FeatureMatch> = f1
        .par_iter()
        .map(|f| {
            let mut d_best = DISTANCE_SENTINEL;
            let mut id_best = 0u32;
            for g in f2 {
                let d = distance_ssd(&f.data, &g.data);
                if d < d_best {
                    d_best = d;
                    id_best = g.id;
                }
            }
            FeatureMatch {
                id1: f.id,
                id2: id_best,
                score: -d_best,
                second: 0.0,
            }
        })
        .collect();

    let total_score = matches.iter().map(|m| m.score).sum();
    (matches, total_score)
}

/// Ratio-test matching: a running top-2 over descriptor distances per
/// source feature. `score = -best`, `second = -second_best`, and the total
/// accumulates the per-match discriminability ratio `score / second`
/// (equal best and runner-up give 1.0, maximally ambiguous; smaller is
/// more discriminative).
pub fn ratio_match(f1: &FeatureSet, f2: &FeatureSet) -> (Vec<FeatureMatch>, f64) {
    let matches: Vec<FeatureMatch> = f1
        .par_iter()
        .map(|f| {
            let mut d_best = DISTANCE_SENTINEL;
            let mut d_second = DISTANCE_SENTINEL;
            let mut id_best = 0u32;
            for g in f2 {
                let d = distance_ssd(&f.data, &g.data);
                if d < d_best {
                    d_second = d_best;
                    d_best = d;
                    id_best = g.id;
                } else if d < d_second {
                    d_second = d;
                }
            }
            FeatureMatch {
                id1: f.id,
                id2: id_best,
                score: -d_best,
                second: -d_second,
            }
        })
        .collect();

    let total_score = matches.iter().map(|m| discriminability(m)).sum();
    (matches, total_score)
}

/// Per-match ambiguity ratio in [0, 1]. A zero runner-up distance means
/// two equally perfect candidates, defined as fully ambiguous (1.0).
pub fn discriminability(m: &FeatureMatch) -> f64 {
    if m.second == 0.0 {
        return 1.0;
    }
    m.score / m.second
}
