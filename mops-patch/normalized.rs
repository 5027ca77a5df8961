//! Orientation-normalized multi-scale patch descriptor.
//!
//! A 41x41 window around each feature is rotated so the dominant gradient
//! direction lands on the +x axis, then smoothed with a separable binomial
//! kernel and subsampled to 5x5. The result is approximately invariant to
//! image-plane rotation and robust to small shifts and noise.

use mops_core::filter::{BINOMIAL_5, apply_separable, sobel_gradients};
use mops_core::{FeatureSet, GrayImage};
use rayon::prelude::*;

const WINDOW: usize = 41;
const HALF: i32 = 20;
/// Subsample taps 2, 11, 20, 29, 38: stride 9 with the window center on
/// the middle descriptor cell
const SUBSAMPLE_OFFSET: usize = 2;
const SUBSAMPLE_STRIDE: usize = 9;

pub(crate) fn describe(img: &GrayImage, w: usize, h: usize, features: &mut FeatureSet) {
    let (gx, gy) = sobel_gradients(img, w, h);

    features.par_iter_mut().for_each(|f| {
        let idx = f.y as usize * w + f.x as usize;
        f.angle = gy[idx].atan2(gx[idx]);

        let window = extract_window(img, w, h, f.x, f.y);
        let aligned = rotate_window(&window, f.angle);
        let smoothed = apply_separable(&aligned, WINDOW, WINDOW, &BINOMIAL_5, &BINOMIAL_5);

        let mut data = Vec::with_capacity(25);
        for sy in 0..5 {
            for sx in 0..5 {
                let y = SUBSAMPLE_OFFSET + sy * SUBSAMPLE_STRIDE;
                let x = SUBSAMPLE_OFFSET + sx * SUBSAMPLE_STRIDE;
                let v = smoothed[y * WINDOW + x];
                data.push(if v.is_finite() { v as f64 } else { 0.0 });
            }
        }
        f.data = data;
    });
}

/// Copy the 41x41 neighborhood of (cx, cy); out-of-bounds samples stay 0.0.
fn extract_window(img: &GrayImage, w: usize, h: usize, cx: i32, cy: i32) -> Vec<f32> {
    let mut window = vec![0.0f32; WINDOW * WINDOW];
    for dy in -HALF..=HALF {
        let y = cy + dy;
        if y < 0 || y >= h as i32 {
            continue;
        }
        for dx in -HALF..=HALF {
            let x = cx + dx;
            if x < 0 || x >= w as i32 {
                continue;
            }
            window[(dy + HALF) as usize * WINDOW + (dx + HALF) as usize] =
                img[y as usize * w + x as usize];
        }
    }
    window
}

/// Resample the window by inverse mapping: each destination offset is
/// rotated by `angle` to find its source sample, so the direction `angle`
/// maps onto the destination +x axis.
fn rotate_window(window: &[f32], angle: f32) -> Vec<f32> {
    let (s, c) = angle.sin_cos();
    let mut out = vec![0.0f32; WINDOW * WINDOW];
    for v in 0..WINDOW {
        let dv = v as f32 - HALF as f32;
        for u in 0..WINDOW {
            let du = u as f32 - HALF as f32;
            let sx = c * du - s * dv + HALF as f32;
            let sy = s * du + c * dv + HALF as f32;
            out[v * WINDOW + u] = bilinear_sample(window, sx, sy);
        }
    }
    out
}

/// Bilinear interpolation inside the window; samples outside read 0.0.
fn bilinear_sample(window: &[f32], x: f32, y: f32) -> f32 {
    let x0 = x.floor();
    let y0 = y.floor();
    let dx = x - x0;
    let dy = y - y0;

    let at = |xi: i32, yi: i32| -> f32 {
        if xi < 0 || yi < 0 || xi >= WINDOW as i32 || yi >= WINDOW as i32 {
            0.0
        } else {
            window[yi as usize * WINDOW + xi as usize]
        }
    };

    let x0 = x0 as i32;
    let y0 = y0 as i32;
    let top = at(x0, y0) * (1.0 - dx) + at(x0 + 1, y0) * dx;
    let bottom = at(x0, y0 + 1) * (1.0 - dx) + at(x0 + 1, y0 + 1) * dx;
    top * (1.0 - dy) + bottom * dy
}
