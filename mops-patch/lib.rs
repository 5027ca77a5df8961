//! Descriptor extraction: reduce the neighborhood of each detected feature
//! to a fixed 25-value vector, either as raw intensities or as an
//! orientation-normalized, smoothed and subsampled patch.

mod normalized;
mod raw;

use mops_core::{FeatureSet, GrayImage};

/// Descriptor strategy selector.
///
/// `Custom` is a deliberate no-op extension point: it leaves descriptors
/// empty, and empty descriptors compare as maximally distant downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptorKind {
    RawPatch,
    Normalized,
    Custom,
}

/// Descriptor extractor over a fixed image geometry.
pub struct PatchDescriber {
    w: usize,
    h: usize,
}

impl PatchDescriber {
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0);
        Self { w: width, h: height }
    }

    /// Fill orientation and descriptor of every feature in place.
    ///
    /// Features must lie inside the image (the detectors guarantee this).
    pub fn describe(&self, kind: DescriptorKind, img: &GrayImage, features: &mut FeatureSet) {
        match kind {
            DescriptorKind::RawPatch => raw::describe(img, self.w, self.h, features),
            DescriptorKind::Normalized => normalized::describe(img, self.w, self.h, features),
            DescriptorKind::Custom => {}
        }
    }
}

/// Descriptor length produced by both patch strategies
pub const DESCRIPTOR_LEN: usize = 25;

#[cfg(test)]
mod tests {
    use super::*;
    use mops_core::Feature;

    #[test]
    fn custom_kind_leaves_descriptors_empty() {
        let img = vec![0.5f32; 10 * 10];
        let mut features = vec![Feature::at(5, 5)];
        PatchDescriber::new(10, 10).describe(DescriptorKind::Custom, &img, &mut features);
        assert!(features[0].data.is_empty());
        assert_eq!(features[0].angle, 0.0);
    }
}
