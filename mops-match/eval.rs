//! Match-quality evaluation against a known ground-truth homography:
//! geometric error, ROC curve over a threshold sweep, and its area
//! under curve.

use mops_core::{FeatureMatch, FeatureSet, RocPoint};

/// Transform a point by a row-major 3x3 projective matrix.
/// Returns `None` when the point maps to the line at infinity.
pub fn apply_homography(x: f64, y: f64, h: &[f64; 9]) -> Option<(f64, f64)> {
    let w = h[6] * x + h[7] * y + h[8];
    if w == 0.0 {
        return None;
    }
    Some(((h[0] * x + h[1] * y + h[2]) / w, (h[3] * x + h[4] * y + h[5]) / w))
}

/// Look up a feature by its 1-based id.
fn by_id(set: &FeatureSet, id: u32) -> Option<&mops_core::Feature> {
    if id == 0 {
        return None;
    }
    set.get(id as usize - 1)
}

/// Geometric distance between the transformed source location of a match
/// and its matched target location. `None` for unmatched or degenerate
/// entries.
fn match_distance(f1: &FeatureSet, f2: &FeatureSet, m: &FeatureMatch, h: &[f64; 9]) -> Option<f64> {
    let a = by_id(f1, m.id1)?;
    let b = by_id(f2, m.id2)?;
    let (xn, yn) = apply_homography(a.x as f64, a.y as f64, h)?;
    let dx = xn - b.x as f64;
    let dy = yn - b.y as f64;
    Some((dx * dx + dy * dy).sqrt())
}

/// Mean Euclidean error of the matches under the ground-truth transform.
/// `None` when no match contributes (empty match list, or every entry is
/// unmatched/degenerate) — never a silent division by zero.
pub fn evaluate_match(
    f1: &FeatureSet,
    f2: &FeatureSet,
    matches: &[FeatureMatch],
    h: &[f64; 9],
) -> Option<f64> {
    let mut d = 0.0;
    let mut n = 0usize;

    for m in matches {
        if let Some(dist) = match_distance(f1, f2, m, h) {
            d += dist;
            n += 1;
        }
    }

    if n == 0 { None } else { Some(d / n as f64) }
}

/// Ground-truth label per match (transformed distance within `threshold`)
/// plus the maximum match score seen, for building a threshold sweep.
/// Unmatched or degenerate entries are labeled false so the labels stay
/// aligned one-to-one with the matches.
pub fn roc_labels(
    f1: &FeatureSet,
    f2: &FeatureSet,
    matches: &[FeatureMatch],
    h: &[f64; 9],
    threshold: f64,
) -> (Vec<bool>, f64) {
    let mut labels = Vec::with_capacity(matches.len());
    let mut max_score = f64::NEG_INFINITY;

    for m in matches {
        let is_match = match match_distance(f1, f2, m, h) {
            Some(d) => d <= threshold,
            None => false,
        };
        labels.push(is_match);
        if m.score > max_score {
            max_score = m.score;
        }
    }

    (labels, max_score)
}

/// ROC operating points, one per threshold, in the thresholds' order.
///
/// A match counts as accepted at threshold t when its score is strictly
/// below t. If either label population is empty the corresponding rate is
/// NaN — a flagged degenerate value, not a division fault.
pub fn compute_roc_curve(
    matches: &[FeatureMatch],
    labels: &[bool],
    thresholds: &[f64],
) -> Vec<RocPoint> {
    let total_true = labels.iter().filter(|&&l| l).count();
    let total_false = labels.len() - total_true;

    thresholds
        .iter()
        .map(|&t| {
            let mut tp = 0usize;
            let mut fp = 0usize;
            for (m, &is_match) in matches.iter().zip(labels.iter()) {
                if m.score < t {
                    if is_match {
                        tp += 1;
                    } else {
                        fp += 1;
                    }
                }
            }
            RocPoint {
                true_rate: if total_true == 0 {
                    f64::NAN
                } else {
                    tp as f64 / total_true as f64
                },
                false_rate: if total_false == 0 {
                    f64::NAN
                } else {
                    fp as f64 / total_false as f64
                },
            }
        })
        .collect()
}

/// Trapezoidal area under an ROC sequence ordered by ascending false rate.
pub fn compute_auc(results: &[RocPoint]) -> f64 {
    let mut auc = 0.0;
    for pair in results.windows(2) {
        let xdiff = pair[1].false_rate - pair[0].false_rate;
        let ydiff = pair[1].true_rate - pair[0].true_rate;
        auc += xdiff * pair[0].true_rate + xdiff * ydiff / 2.0;
    }
    auc
}

#[cfg(test)]
mod tests {
    use super::*;
    use mops_core::Feature;

    const IDENTITY: [f64; 9] = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0];

    fn feature_at(id: u32, x: i32, y: i32) -> Feature {
        Feature {
            x,
            y,
            angle: 0.0,
            id,
            data: Vec::new(),
        }
    }

    #[test]
    fn identity_homography_is_identity_map() {
        assert_eq!(apply_homography(3.0, -7.5, &IDENTITY), Some((3.0, -7.5)));
    }

    #[test]
    fn translation_homography_shifts() {
        let h = [1.0, 0.0, 4.0, 0.0, 1.0, -2.0, 0.0, 0.0, 1.0];
        assert_eq!(apply_homography(1.0, 1.0, &h), Some((5.0, -1.0)));
    }

    #[test]
    fn zero_denominator_is_guarded() {
        let h = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0];
        assert_eq!(apply_homography(1.0, 1.0, &h), None);
    }

    #[test]
    fn projective_division_applies() {
        let h = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 2.0];
        assert_eq!(apply_homography(4.0, 6.0, &h), Some((2.0, 3.0)));
    }

    #[test]
    fn perfect_matches_have_zero_error() {
        let f1 = vec![feature_at(1, 2, 3), feature_at(2, 8, 1)];
        let f2 = f1.clone();
        let matches = vec![
            FeatureMatch { id1: 1, id2: 1, score: 0.0, second: 0.0 },
            FeatureMatch { id1: 2, id2: 2, score: 0.0, second: 0.0 },
        ];
        let err = evaluate_match(&f1, &f2, &matches, &IDENTITY).unwrap();
        assert_eq!(err, 0.0);
    }

    #[test]
    fn translation_error_is_measured() {
        let f1 = vec![feature_at(1, 0, 0)];
        let f2 = vec![feature_at(1, 3, 4)];
        let matches = vec![FeatureMatch { id1: 1, id2: 1, score: 0.0, second: 0.0 }];
        let err = evaluate_match(&f1, &f2, &matches, &IDENTITY).unwrap();
        assert_eq!(err, 5.0);
    }

    #[test]
    fn zero_matches_is_none_not_nan() {
        let f1 = vec![feature_at(1, 0, 0)];
        let f2 = vec![feature_at(1, 0, 0)];
        assert_eq!(evaluate_match(&f1, &f2, &[], &IDENTITY), None);

        // An unmatched entry (id2 = 0) contributes nothing either.
        let unmatched = vec![FeatureMatch { id1: 1, id2: 0, score: 0.0, second: 0.0 }];
        assert_eq!(evaluate_match(&f1, &f2, &unmatched, &IDENTITY), None);
    }

    #[test]
    fn labels_follow_distance_threshold() {
        let f1 = vec![feature_at(1, 0, 0), feature_at(2, 10, 10)];
        let f2 = vec![feature_at(1, 0, 1), feature_at(2, 20, 20)];
        let matches = vec![
            FeatureMatch { id1: 1, id2: 1, score: -1.0, second: 0.0 },
            FeatureMatch { id1: 2, id2: 2, score: -9.0, second: 0.0 },
        ];
        let (labels, max_score) = roc_labels(&f1, &f2, &matches, &IDENTITY, 5.0);
        assert_eq!(labels, vec![true, false]);
        assert_eq!(max_score, -1.0);
    }

    #[test]
    fn roc_counts_scores_below_threshold() {
        let matches = vec![
            FeatureMatch { id1: 1, id2: 1, score: -1.0, second: 0.0 },
            FeatureMatch { id1: 2, id2: 2, score: -3.0, second: 0.0 },
            FeatureMatch { id1: 3, id2: 3, score: -2.0, second: 0.0 },
        ];
        let labels = vec![true, false, true];
        let points = compute_roc_curve(&matches, &labels, &[-2.5, 0.0]);

        // At -2.5 only the score -3.0 match is accepted (a false one).
        assert_eq!(points[0].true_rate, 0.0);
        assert_eq!(points[0].false_rate, 1.0);
        // At 0.0 everything is accepted.
        assert_eq!(points[1].true_rate, 1.0);
        assert_eq!(points[1].false_rate, 1.0);
    }

    #[test]
    fn degenerate_label_population_flags_nan() {
        let matches = vec![FeatureMatch { id1: 1, id2: 1, score: -1.0, second: 0.0 }];
        let points = compute_roc_curve(&matches, &[true], &[0.0]);
        assert_eq!(points[0].true_rate, 1.0);
        assert!(points[0].false_rate.is_nan());
    }

    #[test]
    fn auc_of_perfect_classifier_is_one() {
        let points = vec![
            RocPoint { true_rate: 0.0, false_rate: 0.0 },
            RocPoint { true_rate: 1.0, false_rate: 0.0 },
            RocPoint { true_rate: 1.0, false_rate: 1.0 },
        ];
        assert!((compute_auc(&points) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn auc_of_random_guess_is_half() {
        let points = vec![
            RocPoint { true_rate: 0.0, false_rate: 0.0 },
            RocPoint { true_rate: 1.0, false_rate: 1.0 },
        ];
        assert!((compute_auc(&points) - 0.5).abs() < 1e-12);
    }
}
