//! Harris cornerness response image.
//!
//! The response at each pixel is `det(M) / trace(M)` of the structure tensor
//! M, built from Sobel gradient products smoothed over a 5x5 binomial window.
//! Flat regions (zero trace) are defined as response 0.0.

use mops_core::GrayImage;
use mops_core::filter::{BINOMIAL_5, apply_separable, sobel_gradients};
use rayon::prelude::*;

/// Compute the per-pixel cornerness map for a grayscale image.
pub fn compute_response(img: &GrayImage, w: usize, h: usize) -> GrayImage {
    let (gx, gy) = sobel_gradients(img, w, h);

    let n = w * h;
    let mut ixx: GrayImage = Vec::with_capacity(n);
    let mut ixy: GrayImage = Vec::with_capacity(n);
    let mut iyy: GrayImage = Vec::with_capacity(n);
    for i in 0..n {
        ixx.push(gx[i] * gx[i]);
        ixy.push(gx[i] * gy[i]);
        iyy.push(gy[i] * gy[i]);
    }

    // Aggregate gradient statistics over the local window; this turns the
    // raw products into the structure tensor entries.
    let ixx = apply_separable(&ixx, w, h, &BINOMIAL_5, &BINOMIAL_5);
    let ixy = apply_separable(&ixy, w, h, &BINOMIAL_5, &BINOMIAL_5);
    let iyy = apply_separable(&iyy, w, h, &BINOMIAL_5, &BINOMIAL_5);

    (0..n)
        .into_par_iter()
        .map(|i| {
            let trace = ixx[i] + iyy[i];
            if trace == 0.0 {
                0.0
            } else {
                (ixx[i] * iyy[i] - ixy[i] * ixy[i]) / trace
            }
        })
        .collect()
}
