use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use yolo_aug::augmenter;
use yolo_aug::config::AugmentConfig;
use yolo_aug::dataset::data_augmenters::image_augmentations::ComposedTransform;

/// Augment a yolo dataset: randomized image transforms with bounding
/// boxes kept in sync.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Path of the yolo dataset directory
    #[arg(long, default_value = "data")]
    data: PathBuf,

    /// Directory to write augmented images and labels to
    #[arg(long, default_value = "aug_data")]
    out: PathBuf,

    /// Prefix to add to augmented output files
    #[arg(long, default_value = "aug")]
    prefix: String,
}

fn run() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = AugmentConfig::new(args.data, args.out, args.prefix);
    let transform = ComposedTransform::new(config.min_visibility);

    let summary = augmenter::run_augmentation(&config, &transform)
        .with_context(|| format!("augmentation run over {}", config.data_root.display()))?;
    println!(
        "Augmented {} images, {} failed",
        summary.augmented, summary.failed
    );
    Ok(())
}

// Errors are printed, not propagated: the process exits 0 on any outcome.
fn main() {
    env_logger::init();
    if let Err(err) = run() {
        println!("{err:#}");
    }
}
