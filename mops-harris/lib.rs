//! Harris corner detection: cornerness response, thresholded 3x3
//! non-maximum suppression, and candidate feature emission in scan order.

mod config;
mod detector;
mod error;
pub mod nms;
pub mod response;

pub use config::{DetectorBuilder, DetectorConfig};
pub use detector::{DummyDetector, HarrisDetector};
pub use error::{HarrisError, HarrisResult};
