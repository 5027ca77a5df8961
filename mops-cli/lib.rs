use mops_core::{FeatureMatch, FeatureSet, GrayImage, MopsConfig, init_thread_pool};
use mops_harris::{DummyDetector, HarrisDetector, HarrisError};
use mops_match::{ImageDatabase, MatcherKind, QueryResult};
use mops_patch::{DescriptorKind, PatchDescriber};

pub use mops_core::{self, Feature, RocPoint, GrayImage as MopsImage, MopsConfig as Config};
pub use mops_harris::{DetectorBuilder, DetectorConfig};
pub use mops_match::{
    DatabaseEntry, apply_homography, compute_auc, compute_roc_curve, evaluate_match, roc_labels,
};
pub use mops_match::MatcherKind as Matcher;
pub use mops_patch::DescriptorKind as Descriptor;

#[derive(Debug)]
pub enum PipelineError {
    Harris(HarrisError),
    UnsupportedDetector(u8),
    UnsupportedDescriptor(u8),
    UnsupportedMatcher(u8),
}

impl std::fmt::Display for PipelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineError::Harris(e) => write!(f, "Harris error: {}", e),
            PipelineError::UnsupportedDetector(v) => write!(f, "Unsupported detector selector: {}", v),
            PipelineError::UnsupportedDescriptor(v) => {
                write!(f, "Unsupported descriptor selector: {}", v)
            }
            PipelineError::UnsupportedMatcher(v) => write!(f, "Unsupported matcher selector: {}", v),
        }
    }
}

impl std::error::Error for PipelineError {}

impl From<HarrisError> for PipelineError {
    fn from(err: HarrisError) -> Self {
        PipelineError::Harris(err)
    }
}

pub type PipelineResult<T> = Result<T, PipelineError>;

/// Corner detection strategy selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectorKind {
    Dummy,
    Harris,
}

/// Map the legacy integer detector selector (1 = dummy, 2 = Harris).
/// An unknown value is a definite failure before any work is done.
pub fn detector_from_selector(v: u8) -> PipelineResult<DetectorKind> {
    match v {
        1 => Ok(DetectorKind::Dummy),
        2 => Ok(DetectorKind::Harris),
        other => Err(PipelineError::UnsupportedDetector(other)),
    }
}

/// Map the legacy integer descriptor selector
/// (1 = raw patch, 2 = normalized, 3 = custom).
pub fn descriptor_from_selector(v: u8) -> PipelineResult<DescriptorKind> {
    match v {
        1 => Ok(DescriptorKind::RawPatch),
        2 => Ok(DescriptorKind::Normalized),
        3 => Ok(DescriptorKind::Custom),
        other => Err(PipelineError::UnsupportedDescriptor(other)),
    }
}

/// Map the legacy integer matcher selector (1 = nearest, 2 = ratio).
pub fn matcher_from_selector(v: u8) -> PipelineResult<MatcherKind> {
    match v {
        1 => Ok(MatcherKind::Nearest),
        2 => Ok(MatcherKind::Ratio),
        other => Err(PipelineError::UnsupportedMatcher(other)),
    }
}

/// High-level feature pipeline: detect corners, fill descriptors, and
/// finalize feature ids for one image geometry.
pub struct FeaturePipeline {
    detector_kind: DetectorKind,
    descriptor_kind: DescriptorKind,
    harris: HarrisDetector,
    dummy: DummyDetector,
    describer: PatchDescriber,
}

impl FeaturePipeline {
    /// Create a new pipeline with the given configuration and image
    /// dimensions
    pub fn new(
        cfg: MopsConfig,
        detector: DetectorKind,
        descriptor: DescriptorKind,
        width: usize,
        height: usize,
    ) -> PipelineResult<Self> {
        // Thread pool may already be initialized by an earlier pipeline.
        init_thread_pool(cfg.n_threads).ok();

        let harris = HarrisDetector::new(cfg, width, height)?;
        let dummy = DummyDetector::new(width, height)?;
        let describer = PatchDescriber::new(width, height);

        Ok(Self {
            detector_kind: detector,
            descriptor_kind: descriptor,
            harris,
            dummy,
            describer,
        })
    }

    /// Detect, describe, and finalize a complete feature set.
    ///
    /// Ids are assigned 1..N by insertion order in a single pass after
    /// detection and description complete; the set is immutable afterwards.
    pub fn compute_features(&self, img: &GrayImage) -> PipelineResult<FeatureSet> {
        let mut features = match self.detector_kind {
            DetectorKind::Dummy => self.dummy.detect(img)?,
            DetectorKind::Harris => self.harris.detect(img)?,
        };

        self.describer.describe(self.descriptor_kind, img, &mut features);

        for (i, f) in features.iter_mut().enumerate() {
            f.id = i as u32 + 1;
        }

        Ok(features)
    }

    /// Match two finalized feature sets with the chosen strategy
    pub fn match_features(
        &self,
        kind: MatcherKind,
        f1: &FeatureSet,
        f2: &FeatureSet,
    ) -> (Vec<FeatureMatch>, f64) {
        mops_match::match_features(kind, f1, f2)
    }

    /// Query a database of precomputed feature sets
    pub fn query(
        &self,
        features: &FeatureSet,
        db: &ImageDatabase,
        kind: MatcherKind,
    ) -> Option<QueryResult> {
        mops_match::perform_query(features, db, kind)
    }

    /// Get detector configuration
    pub fn config(&self) -> &MopsConfig {
        self.harris.config()
    }

    /// Get image dimensions
    pub fn dimensions(&self) -> (usize, usize) {
        self.harris.dimensions()
    }
}
