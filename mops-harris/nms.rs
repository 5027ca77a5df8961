//! Thresholding and 3x3 non-maximum suppression over a response image.
//!
//! Tie policy: a candidate survives only if no neighbor in its 3x3 window has
//! a strictly greater response, and no neighbor with an equal response
//! precedes it in row-major order. Equal-valued plateaus therefore keep
//! exactly one pixel (the first scanned) instead of being erased wholesale.

use mops_core::GrayImage;

/// Select thresholded local maxima, returned in row-major scan order.
pub fn local_maxima(response: &GrayImage, w: usize, h: usize, threshold: f32) -> Vec<(i32, i32)> {
    let mut maxima = Vec::new();

    for y in 0..h as i32 {
        for x in 0..w as i32 {
            let v = response[y as usize * w + x as usize];
            if v < threshold {
                continue;
            }
            if is_window_maximum(response, w, h, x, y, v) {
                maxima.push((x, y));
            }
        }
    }

    maxima
}

fn is_window_maximum(response: &GrayImage, w: usize, h: usize, x: i32, y: i32, v: f32) -> bool {
    for dy in -1..=1 {
        for dx in -1..=1 {
            if dx == 0 && dy == 0 {
                continue;
            }
            let nx = x + dx;
            let ny = y + dy;
            if nx < 0 || nx >= w as i32 || ny < 0 || ny >= h as i32 {
                continue;
            }
            let nv = response[ny as usize * w + nx as usize];
            if nv > v {
                return false;
            }
            // Equal neighbor earlier in scan order wins the plateau.
            if nv == v && (ny < y || (ny == y && nx < x)) {
                return false;
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_below_threshold() {
        let resp = vec![0.1f32; 5 * 5];
        assert!(local_maxima(&resp, 5, 5, 0.2).is_empty());
    }

    #[test]
    fn strict_maximum_survives() {
        let mut resp = vec![0.0f32; 7 * 7];
        resp[3 * 7 + 3] = 1.0;
        resp[3 * 7 + 4] = 0.5;
        resp[2 * 7 + 3] = 0.5;
        let maxima = local_maxima(&resp, 7, 7, 0.2);
        assert_eq!(maxima, vec![(3, 3)]);
    }

    #[test]
    fn plateau_keeps_one_feature() {
        // Two equal adjacent maxima: the first in row-major order survives.
        let mut resp = vec![0.0f32; 7 * 7];
        resp[3 * 7 + 3] = 1.0;
        resp[3 * 7 + 4] = 1.0;
        let maxima = local_maxima(&resp, 7, 7, 0.2);
        assert_eq!(maxima, vec![(3, 3)]);
    }

    #[test]
    fn separated_peaks_both_survive() {
        let mut resp = vec![0.0f32; 9 * 9];
        resp[2 * 9 + 2] = 1.0;
        resp[6 * 9 + 6] = 0.8;
        let maxima = local_maxima(&resp, 9, 9, 0.2);
        assert_eq!(maxima, vec![(2, 2), (6, 6)]);
    }

    #[test]
    fn border_pixels_are_eligible() {
        let mut resp = vec![0.0f32; 5 * 5];
        resp[0] = 1.0;
        let maxima = local_maxima(&resp, 5, 5, 0.2);
        assert_eq!(maxima, vec![(0, 0)]);
    }

    #[test]
    fn threshold_is_inclusive() {
        let mut resp = vec![0.0f32; 5 * 5];
        resp[2 * 5 + 2] = 0.2;
        let maxima = local_maxima(&resp, 5, 5, 0.2);
        assert_eq!(maxima, vec![(2, 2)]);
    }

    proptest::proptest! {
        #[test]
        fn maxima_are_above_threshold_and_separated(
            values in proptest::collection::vec(0.0f32..1.0, 8 * 8),
            threshold in 0.1f32..0.9,
        ) {
            let maxima = local_maxima(&values, 8, 8, threshold);
            for &(x, y) in &maxima {
                proptest::prop_assert!(values[y as usize * 8 + x as usize] >= threshold);
            }
            // No two survivors may sit in each other's 3x3 window.
            for (i, &(x1, y1)) in maxima.iter().enumerate() {
                for &(x2, y2) in &maxima[i + 1..] {
                    proptest::prop_assert!((x1 - x2).abs() > 1 || (y1 - y2).abs() > 1);
                }
            }
        }
    }
}
