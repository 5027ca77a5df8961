//! Float-image filtering primitives shared by the detector and descriptor
//! crates: 2D and separable correlation plus the Sobel gradient pair.
//! Samples outside the image read as 0.0 so output dimensions always equal
//! input dimensions.

use crate::GrayImage;
use rayon::prelude::*;

/// Smoothing axis of the Sobel operator
pub const SOBEL_SMOOTH: [f32; 3] = [1.0, 2.0, 1.0];
/// Derivative axis of the Sobel operator
pub const SOBEL_DERIV: [f32; 3] = [-1.0, 0.0, 1.0];

/// Normalized 1D binomial kernel, the separable half of the 5x5
/// Gaussian-like window
pub const BINOMIAL_5: [f32; 5] = [
    1.0 / 16.0,
    4.0 / 16.0,
    6.0 / 16.0,
    4.0 / 16.0,
    1.0 / 16.0,
];

/// Apply an odd-sized 2D kernel by correlation. Out-of-bounds samples
/// contribute 0.0.
pub fn apply_kernel_2d(
    img: &GrayImage,
    w: usize,
    h: usize,
    kernel: &[f32],
    kw: usize,
    kh: usize,
) -> GrayImage {
    assert_eq!(img.len(), w * h);
    assert_eq!(kernel.len(), kw * kh);
    assert!(kw % 2 == 1 && kh % 2 == 1);

    let rx = (kw / 2) as i32;
    let ry = (kh / 2) as i32;

    let rows: Vec<Vec<f32>> = (0..h as i32)
        .into_par_iter()
        .map(|y| {
            let mut row = Vec::with_capacity(w);
            for x in 0..w as i32 {
                let mut acc = 0.0f32;
                for ky in 0..kh as i32 {
                    let sy = y + ky - ry;
                    if sy < 0 || sy >= h as i32 {
                        continue;
                    }
                    for kx in 0..kw as i32 {
                        let sx = x + kx - rx;
                        if sx < 0 || sx >= w as i32 {
                            continue;
                        }
                        acc += kernel[(ky * kw as i32 + kx) as usize]
                            * img[(sy * w as i32 + sx) as usize];
                    }
                }
                row.push(acc);
            }
            row
        })
        .collect();

    rows.into_iter().flatten().collect()
}

/// Apply a separable kernel: `kx` along the x axis, then `ky` along the
/// y axis. Equivalent to the outer-product 2D kernel.
pub fn apply_separable(
    img: &GrayImage,
    w: usize,
    h: usize,
    kx: &[f32],
    ky: &[f32],
) -> GrayImage {
    assert_eq!(img.len(), w * h);
    assert!(kx.len() % 2 == 1 && ky.len() % 2 == 1);

    let rx = (kx.len() / 2) as i32;
    let horizontal: Vec<Vec<f32>> = (0..h)
        .into_par_iter()
        .map(|y| {
            let mut row = Vec::with_capacity(w);
            for x in 0..w as i32 {
                let mut acc = 0.0f32;
                for (i, &k) in kx.iter().enumerate() {
                    let sx = x + i as i32 - rx;
                    if sx >= 0 && sx < w as i32 {
                        acc += k * img[y * w + sx as usize];
                    }
                }
                row.push(acc);
            }
            row
        })
        .collect();
    let horizontal: GrayImage = horizontal.into_iter().flatten().collect();

    let ry = (ky.len() / 2) as i32;
    let rows: Vec<Vec<f32>> = (0..h as i32)
        .into_par_iter()
        .map(|y| {
            let mut row = Vec::with_capacity(w);
            for x in 0..w {
                let mut acc = 0.0f32;
                for (i, &k) in ky.iter().enumerate() {
                    let sy = y + i as i32 - ry;
                    if sy >= 0 && sy < h as i32 {
                        acc += k * horizontal[sy as usize * w + x];
                    }
                }
                row.push(acc);
            }
            row
        })
        .collect();

    rows.into_iter().flatten().collect()
}

/// Sobel derivative images (gx, gy). Positive gx points toward brighter
/// pixels on the right, positive gy toward brighter pixels below.
pub fn sobel_gradients(img: &GrayImage, w: usize, h: usize) -> (GrayImage, GrayImage) {
    let gx = apply_separable(img, w, h, &SOBEL_DERIV, &SOBEL_SMOOTH);
    let gy = apply_separable(img, w, h, &SOBEL_SMOOTH, &SOBEL_DERIV);
    (gx, gy)
}
