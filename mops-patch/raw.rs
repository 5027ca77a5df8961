//! Raw 5x5 intensity patch descriptor.

use mops_core::{FeatureSet, GrayImage};
use rayon::prelude::*;

/// Sample a 5x5 intensity window centered on each feature, row-major.
/// Out-of-bounds samples are 0.0, so the vector is always 25 values long.
pub(crate) fn describe(img: &GrayImage, w: usize, h: usize, features: &mut FeatureSet) {
    features.par_iter_mut().for_each(|f| {
        let mut data = Vec::with_capacity(25);
        for dy in -2i32..=2 {
            for dx in -2i32..=2 {
                let x = f.x + dx;
                let y = f.y + dy;
                let v = if x >= 0 && x < w as i32 && y >= 0 && y < h as i32 {
                    img[y as usize * w + x as usize] as f64
                } else {
                    0.0
                };
                data.push(v);
            }
        }
        f.data = data;
    });
}
