use image::{ImageReader, Rgba, RgbaImage};
use imageproc::drawing::{draw_hollow_circle_mut, draw_line_segment_mut};
use log::info;
use mops_cli::{
    Config, FeaturePipeline, compute_auc, compute_roc_curve, descriptor_from_selector,
    detector_from_selector, evaluate_match, matcher_from_selector, roc_labels,
};
use mops_core::{FeatureSet, GrayImage};
use std::time::Instant;

struct Args {
    image_a: String,
    image_b: String,
    detector: u8,
    descriptor: u8,
    matcher: u8,
    homography: Option<[f64; 9]>,
    roc_threshold: f64,
    out: Option<String>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = std::env::args().skip(1);
    let image_a = args.next().ok_or_else(usage)?;
    let image_b = args.next().ok_or_else(usage)?;

    let mut parsed = Args {
        image_a,
        image_b,
        detector: 2,
        descriptor: 1,
        matcher: 1,
        homography: None,
        roc_threshold: 5.0,
        out: None,
    };

    while let Some(flag) = args.next() {
        let value = args.next().ok_or_else(|| format!("Missing value for {}", flag))?;
        match flag.as_str() {
            "--detector" => parsed.detector = value.parse().map_err(|e| format!("{}: {}", flag, e))?,
            "--descriptor" => {
                parsed.descriptor = value.parse().map_err(|e| format!("{}: {}", flag, e))?
            }
            "--matcher" => parsed.matcher = value.parse().map_err(|e| format!("{}: {}", flag, e))?,
            "--homography" => {
                let values: Vec<f64> = value
                    .split(',')
                    .map(|s| s.trim().parse::<f64>())
                    .collect::<Result<_, _>>()
                    .map_err(|e| format!("{}: {}", flag, e))?;
                let h: [f64; 9] = values
                    .try_into()
                    .map_err(|_| "Homography needs exactly 9 comma-separated values".to_string())?;
                parsed.homography = Some(h);
            }
            "--roc-threshold" => {
                parsed.roc_threshold = value.parse().map_err(|e| format!("{}: {}", flag, e))?
            }
            "--out" => parsed.out = Some(value),
            other => return Err(format!("Unknown flag: {}\n{}", other, usage())),
        }
    }

    Ok(parsed)
}

fn usage() -> String {
    "Usage: mops <image-a> <image-b> \
     [--detector 1|2] [--descriptor 1|2|3] [--matcher 1|2] \
     [--homography h0,..,h8] [--roc-threshold T] [--out matches.png]"
        .to_string()
}

fn load_gray(path: &str) -> (GrayImage, usize, usize) {
    let img = ImageReader::open(path)
        .expect("Image not found")
        .decode()
        .expect("Decode failed")
        .to_luma8();
    let (w, h) = img.dimensions();
    let gray = img.as_raw().iter().map(|&p| p as f32 / 255.0).collect();
    (gray, w as usize, h as usize)
}

/// Linear threshold sweep spanning the observed score range.
fn score_sweep(matches: &[mops_core::FeatureMatch], steps: usize) -> Vec<f64> {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for m in matches {
        lo = lo.min(m.score);
        hi = hi.max(m.score);
    }
    if !lo.is_finite() || !hi.is_finite() {
        return Vec::new();
    }
    let span = (hi - lo).max(1e-12);
    (0..=steps)
        .map(|i| lo + span * i as f64 / steps as f64 + span * 1e-9)
        .collect()
}

fn draw_matches(
    path: &str,
    a: (&GrayImage, usize, usize),
    b: (&GrayImage, usize, usize),
    fa: &FeatureSet,
    fb: &FeatureSet,
    matches: &[mops_core::FeatureMatch],
) {
    let (img_a, wa, ha) = a;
    let (img_b, wb, hb) = b;
    let w = wa + wb;
    let h = ha.max(hb);

    let mut canvas = RgbaImage::from_pixel(w as u32, h as u32, Rgba([0, 0, 0, 255]));
    for (img, iw, ih, x_off) in [(img_a, wa, ha, 0usize), (img_b, wb, hb, wa)] {
        for y in 0..ih {
            for x in 0..iw {
                let v = (img[y * iw + x] * 255.0).clamp(0.0, 255.0) as u8;
                canvas.put_pixel((x + x_off) as u32, y as u32, Rgba([v, v, v, 255]));
            }
        }
    }

    for m in matches {
        let p = m.id1.checked_sub(1).and_then(|i| fa.get(i as usize));
        let q = m.id2.checked_sub(1).and_then(|i| fb.get(i as usize));
        let (Some(p), Some(q)) = (p, q) else {
            continue;
        };
        draw_hollow_circle_mut(&mut canvas, (p.x, p.y), 3, Rgba([255, 0, 0, 255]));
        draw_hollow_circle_mut(&mut canvas, (q.x + wa as i32, q.y), 3, Rgba([255, 0, 0, 255]));
        draw_line_segment_mut(
            &mut canvas,
            (p.x as f32, p.y as f32),
            ((q.x + wa as i32) as f32, q.y as f32),
            Rgba([0, 255, 0, 255]),
        );
    }

    canvas.save(path).expect("Failed to save output image");
    info!("saved match visualization to {}", path);
}

fn main() {
    env_logger::init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{}", msg);
            std::process::exit(2);
        }
    };

    let detector = detector_from_selector(args.detector).expect("Bad detector selector");
    let descriptor = descriptor_from_selector(args.descriptor).expect("Bad descriptor selector");
    let matcher = matcher_from_selector(args.matcher).expect("Bad matcher selector");

    let (gray_a, wa, ha) = load_gray(&args.image_a);
    let (gray_b, wb, hb) = load_gray(&args.image_b);
    info!("loaded {} ({}x{}) and {} ({}x{})", args.image_a, wa, ha, args.image_b, wb, hb);

    let cfg = Config::default();
    let pipeline_a = FeaturePipeline::new(cfg.clone(), detector, descriptor, wa, ha)
        .expect("Pipeline construction failed");
    let pipeline_b = FeaturePipeline::new(cfg, detector, descriptor, wb, hb)
        .expect("Pipeline construction failed");

    let t0 = Instant::now();
    let fa = pipeline_a.compute_features(&gray_a).expect("Feature computation failed");
    let fb = pipeline_b.compute_features(&gray_b).expect("Feature computation failed");
    info!("computed {} + {} features in {:.2?}", fa.len(), fb.len(), t0.elapsed());

    let t1 = Instant::now();
    let (matches, total_score) = pipeline_a.match_features(matcher, &fa, &fb);
    info!("matched in {:.2?}", t1.elapsed());

    println!("Features: {} in A, {} in B", fa.len(), fb.len());
    println!("Matches: {} (total score {:.4})", matches.len(), total_score);

    if let Some(h) = args.homography {
        match evaluate_match(&fa, &fb, &matches, &h) {
            Some(err) => println!("Mean match error under ground truth: {:.4} px", err),
            None => println!("Mean match error under ground truth: undefined (no usable matches)"),
        }

        let (labels, max_score) = roc_labels(&fa, &fb, &matches, &h, args.roc_threshold);
        let positives = labels.iter().filter(|&&l| l).count();
        println!(
            "Ground-truth labels: {} true / {} false (distance threshold {}, best score {:.4})",
            positives,
            labels.len() - positives,
            args.roc_threshold,
            max_score
        );

        let thresholds = score_sweep(&matches, 100);
        let roc = compute_roc_curve(&matches, &labels, &thresholds);
        let auc = compute_auc(&roc);
        println!("AUC over {} thresholds: {:.4}", thresholds.len(), auc);
    }

    if let Some(out) = &args.out {
        draw_matches(out, (&gray_a, wa, ha), (&gray_b, wb, hb), &fa, &fb, &matches);
    }
}
