use mops_cli::DetectorBuilder;
#[cfg(feature = "serde")]
use mops_cli::DetectorConfig;
use mops_core::GrayImage;
use std::time::Instant;

/// Dark image sprinkled with bright squares of varying contrast.
fn test_image(width: usize, height: usize) -> GrayImage {
    let mut img = vec![0.1f32; width * height];
    let spots = [(30, 30, 0.9), (90, 40, 0.5), (50, 90, 0.3), (100, 100, 0.7)];
    for &(cx, cy, v) in &spots {
        for y in cy..cy + 10 {
            for x in cx..cx + 10 {
                if x < width && y < height {
                    img[y * width + x] = v;
                }
            }
        }
    }
    img
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🎯 DetectorBuilder API Demo");
    println!("===========================\n");

    let width = 128;
    let height = 128;
    let img = test_image(width, height);
    println!("📷 Synthetic image: {}x{}", width, height);

    // Demo 1: custom threshold
    println!("\n🔧 Demo 1: Custom Threshold");
    let detector = DetectorBuilder::new(width, height)
        .threshold(0.3)
        .threads(2)
        .build()?;
    let start = Instant::now();
    let features = detector.detect(&img)?;
    println!("   • threshold 0.3: {:.2?}, {} features", start.elapsed(), features.len());

    // Demo 2: presets trade sensitivity against strictness
    println!("\n⚖️  Demo 2: Presets");
    for (name, builder) in [
        ("Sensitive", DetectorBuilder::new(width, height).preset_sensitive()),
        ("Strict", DetectorBuilder::new(width, height).preset_strict()),
    ] {
        let detector = builder.build()?;
        let start = Instant::now();
        let features = detector.detect(&img)?;
        println!(
            "   • {} (threshold {}): {:.2?}, {} features",
            name,
            detector.config().threshold,
            start.elapsed(),
            features.len()
        );
    }

    // Demo 3: configuration persistence (requires --features serde)
    #[cfg(feature = "serde")]
    {
        println!("\n💾 Demo 3: Configuration Persistence");
        let config = DetectorConfig::sensitive_preset(width, height)
            .with_metadata("demo", "sensitive preset for the builder demo");
        let path = std::env::temp_dir().join("mops_detector_config.toml");
        config.save_toml(&path)?;
        let loaded = DetectorConfig::load_toml(&path)?;
        println!("   • round-tripped: {}", loaded.summary());
    }

    println!("\n✅ Demo complete");
    Ok(())
}
