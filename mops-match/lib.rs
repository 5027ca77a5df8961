//! Feature matching and evaluation: descriptor distance, nearest-neighbor
//! and ratio-test correspondence selection, homography-based ground-truth
//! scoring (ROC / AUC), and database queries.

mod distance;
mod eval;
mod matcher;
mod query;

pub use distance::{DISTANCE_SENTINEL, distance_ssd};
pub use eval::{apply_homography, compute_auc, compute_roc_curve, evaluate_match, roc_labels};
pub use matcher::{MatcherKind, discriminability, match_features, nearest_match, ratio_match};
pub use query::{DatabaseEntry, ImageDatabase, QueryResult, perform_query};
