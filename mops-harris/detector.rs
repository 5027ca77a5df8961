use crate::error::{HarrisError, HarrisResult};
use crate::nms::local_maxima;
use crate::response::compute_response;
use mops_core::{Feature, FeatureSet, GrayImage, MopsConfig};

/// Harris corner detector over a fixed image geometry.
///
/// Emits candidate locations only: descriptors stay empty, orientation is
/// 0.0, and ids are placeholders until the pipeline finalizes the set.
pub struct HarrisDetector {
    cfg: MopsConfig,
    w: usize,
    h: usize,
}

impl HarrisDetector {
    /// Creates a new Harris detector with validation
    pub fn new(cfg: MopsConfig, width: usize, height: usize) -> HarrisResult<Self> {
        if width == 0 || height == 0 {
            return Err(HarrisError::InvalidImageSize { width, height });
        }

        if !cfg.threshold.is_finite() || cfg.threshold <= 0.0 {
            return Err(HarrisError::InvalidThreshold(cfg.threshold));
        }

        Ok(Self {
            cfg,
            w: width,
            h: height,
        })
    }

    /// Validates image data before processing
    fn validate_image(&self, img: &GrayImage) -> HarrisResult<()> {
        let expected_len = self.w * self.h;
        if img.len() != expected_len {
            return Err(HarrisError::InvalidImageData {
                expected_len,
                actual_len: img.len(),
            });
        }
        Ok(())
    }

    /// Detect corner candidates in row-major scan order.
    ///
    /// An image with no response above threshold yields an empty set; that
    /// is not an error.
    pub fn detect(&self, img: &GrayImage) -> HarrisResult<FeatureSet> {
        self.validate_image(img)?;

        let response = compute_response(img, self.w, self.h);
        let maxima = local_maxima(&response, self.w, self.h, self.cfg.threshold);

        Ok(maxima.into_iter().map(|(x, y)| Feature::at(x, y)).collect())
    }

    /// Raw cornerness map, exposed for inspection and threshold tuning.
    pub fn response_image(&self, img: &GrayImage) -> HarrisResult<GrayImage> {
        self.validate_image(img)?;
        Ok(compute_response(img, self.w, self.h))
    }

    /// Get detector configuration
    pub fn config(&self) -> &MopsConfig {
        &self.cfg
    }

    /// Get image dimensions
    pub fn dimensions(&self) -> (usize, usize) {
        (self.w, self.h)
    }
}

/// Placeholder detector that marks pixels by an arbitrary intensity
/// criterion. Useful as a pipeline smoke test; not a real detector.
pub struct DummyDetector {
    w: usize,
    h: usize,
}

impl DummyDetector {
    pub fn new(width: usize, height: usize) -> HarrisResult<Self> {
        if width == 0 || height == 0 {
            return Err(HarrisError::InvalidImageSize { width, height });
        }
        Ok(Self { w: width, h: height })
    }

    pub fn detect(&self, img: &GrayImage) -> HarrisResult<FeatureSet> {
        let expected_len = self.w * self.h;
        if img.len() != expected_len {
            return Err(HarrisError::InvalidImageData {
                expected_len,
                actual_len: img.len(),
            });
        }

        let mut features = FeatureSet::new();
        for y in 0..self.h {
            for x in 0..self.w {
                let v = img[y * self.w + x];
                if (255.0 * 3.0 * v + 0.5) as i64 % 100 == 1 {
                    features.push(Feature::at(x as i32, y as i32));
                }
            }
        }
        Ok(features)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> MopsConfig {
        MopsConfig {
            threshold: 0.2,
            n_threads: 1,
        }
    }

    fn flat_image(w: usize, h: usize) -> GrayImage {
        vec![0.5; w * h]
    }

    fn corner_image(w: usize, h: usize) -> GrayImage {
        // Single bright rectangle on dark background: four corners.
        let mut img = vec![0.0f32; w * h];
        for y in h / 4..3 * h / 4 {
            for x in w / 4..3 * w / 4 {
                img[y * w + x] = 1.0;
            }
        }
        img
    }

    #[test]
    fn valid_constructor() {
        assert!(HarrisDetector::new(test_config(), 64, 64).is_ok());
    }

    #[test]
    fn invalid_dimensions() {
        let result = HarrisDetector::new(test_config(), 0, 64);
        assert!(matches!(result, Err(HarrisError::InvalidImageSize { .. })));

        let result = HarrisDetector::new(test_config(), 64, 0);
        assert!(matches!(result, Err(HarrisError::InvalidImageSize { .. })));
    }

    #[test]
    fn invalid_threshold() {
        let mut cfg = test_config();
        cfg.threshold = 0.0;
        let result = HarrisDetector::new(cfg.clone(), 64, 64);
        assert!(matches!(result, Err(HarrisError::InvalidThreshold(_))));

        cfg.threshold = f32::NAN;
        let result = HarrisDetector::new(cfg, 64, 64);
        assert!(matches!(result, Err(HarrisError::InvalidThreshold(_))));
    }

    #[test]
    fn invalid_image_data() {
        let detector = HarrisDetector::new(test_config(), 10, 10).unwrap();
        let img = vec![0.0; 50];
        let result = detector.detect(&img);
        assert!(matches!(result, Err(HarrisError::InvalidImageData { .. })));
    }

    #[test]
    fn flat_image_yields_empty_set() {
        let detector = HarrisDetector::new(test_config(), 20, 20).unwrap();
        let features = detector.detect(&flat_image(20, 20)).unwrap();
        assert!(features.is_empty());
    }

    #[test]
    fn rectangle_corners_are_detected() {
        let detector = HarrisDetector::new(test_config(), 32, 32).unwrap();
        let features = detector.detect(&corner_image(32, 32)).unwrap();
        assert!(!features.is_empty());

        // Every detection sits near one of the four rectangle corners.
        let corners = [(8, 8), (23, 8), (8, 23), (23, 23)];
        for f in &features {
            let near = corners
                .iter()
                .any(|&(cx, cy)| (f.x - cx).abs() <= 3 && (f.y - cy).abs() <= 3);
            assert!(near, "feature at ({}, {}) is not near a corner", f.x, f.y);
        }
    }

    #[test]
    fn detections_are_row_major_with_placeholder_ids() {
        let detector = HarrisDetector::new(test_config(), 32, 32).unwrap();
        let features = detector.detect(&corner_image(32, 32)).unwrap();
        for pair in features.windows(2) {
            let a = (pair[0].y, pair[0].x);
            let b = (pair[1].y, pair[1].x);
            assert!(a < b, "not in scan order: {:?} then {:?}", a, b);
        }
        for f in &features {
            assert_eq!(f.id, 0);
            assert_eq!(f.angle, 0.0);
            assert!(f.data.is_empty());
        }
    }

    #[test]
    fn dummy_detector_marks_criterion_pixels() {
        let detector = DummyDetector::new(16, 16).unwrap();
        // 255 * 3 * v + 0.5 lands in [101, 102) for v near 0.1318.
        let mut img = vec![0.0f32; 16 * 16];
        img[5 * 16 + 5] = 100.8 / 765.0;
        let features = detector.detect(&img).unwrap();
        assert_eq!(features.len(), 1);
        assert_eq!((features[0].x, features[0].y), (5, 5));
    }
}
