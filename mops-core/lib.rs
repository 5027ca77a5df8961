pub mod filter;

/// Row-major single-channel image, intensities in [0, 1]
pub type GrayImage = Vec<f32>;

/// Detected point feature with orientation and descriptor
#[derive(Debug, Clone, Default)]
pub struct Feature {
    pub x: i32,
    pub y: i32,
    /// Dominant orientation in radians, 0.0 when the detector defines none
    pub angle: f32,
    /// 1-based position within the finalized set; 0 until finalization
    pub id: u32,
    /// Descriptor vector, empty until an extractor fills it
    pub data: Vec<f64>,
}

impl Feature {
    pub fn at(x: i32, y: i32) -> Self {
        Feature {
            x,
            y,
            angle: 0.0,
            id: 0,
            data: Vec::new(),
        }
    }
}

/// Ordered feature sequence in row-major detection scan order
pub type FeatureSet = Vec<Feature>;

/// One correspondence per source feature; higher score = better match
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureMatch {
    pub id1: u32,
    /// Best target id, 0 when the target set is empty
    pub id2: u32,
    pub score: f64,
    /// Runner-up similarity, used by ratio matching only, 0.0 otherwise
    pub second: f64,
}

/// One ROC operating point for a single decision threshold
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RocPoint {
    pub true_rate: f64,
    pub false_rate: f64,
}

#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MopsConfig {
    /// Cornerness cutoff applied to the Harris response image
    pub threshold: f32,
    pub n_threads: usize,
}

impl Default for MopsConfig {
    fn default() -> Self {
        Self {
            threshold: 0.2,
            n_threads: num_cpus::get().max(1),
        }
    }
}

/// Initialize Rayon thread pool with the specified number of threads
pub fn init_thread_pool(n_threads: usize) -> Result<(), rayon::ThreadPoolBuildError> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(n_threads)
        .build_global()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feature_starts_unfinalized() {
        let f = Feature::at(3, 7);
        assert_eq!((f.x, f.y), (3, 7));
        assert_eq!(f.id, 0);
        assert_eq!(f.angle, 0.0);
        assert!(f.data.is_empty());
    }

    #[test]
    fn default_config_threshold() {
        let cfg = MopsConfig::default();
        assert_eq!(cfg.threshold, 0.2);
        assert!(cfg.n_threads >= 1);
    }
}
