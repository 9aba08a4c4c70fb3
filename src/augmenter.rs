use std::fs;
use std::path::Path;

use image::{DynamicImage, GenericImageView};
use log::{info, warn};

use crate::config::AugmentConfig;
use crate::dataset::annotation_codec;
use crate::dataset::common_structs::AnnotationPair;
use crate::dataset::data_augmenters::BboxTransform;
use crate::dataset::data_loaders::yolo_pair_walker::YoloPairWalker;
use crate::dataset::DatasetWalker;
use crate::error::AugmentError;

/// Outcome counts of one full dataset walk.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub augmented: usize,
    pub failed: usize,
}

/// Runs one image through the transform and writes the augmented image
/// plus its re-encoded annotation file. All fallible work happens
/// before the first write, so a failure leaves no partial artifacts.
pub fn augment_and_save(
    image: &DynamicImage,
    raw_lines: &[String],
    out_image_path: &Path,
    out_annotation_path: &Path,
    transform: &dyn BboxTransform,
) -> Result<(), AugmentError> {
    let annotations = annotation_codec::convert(raw_lines, image.width(), image.height())?;
    let mut bboxes = Vec::with_capacity(annotations.len());
    let mut class_labels = Vec::with_capacity(annotations.len());
    for ann in annotations {
        bboxes.push(ann.geometry);
        class_labels.push(ann.class);
    }

    let augmented = transform.apply(image.clone(), bboxes, class_labels)?;
    let lines = annotation_codec::encode(&augmented.bboxes, &augmented.class_labels)?;

    augmented.image.save(out_image_path)?;
    annotation_codec::write_file(out_annotation_path, &lines)?;
    Ok(())
}

fn augment_pair(
    pair: &AnnotationPair,
    config: &AugmentConfig,
    transform: &dyn BboxTransform,
    out_images_dir: &Path,
    out_labels_dir: &Path,
) -> Result<(), AugmentError> {
    let image = image::open(&pair.image_path)?;
    let raw_lines = annotation_codec::decode_file(&pair.label_path)?;

    let out_name = format!("{}_{}", config.prefix, pair.file_name);
    let out_image_path = out_images_dir.join(&out_name);
    let out_annotation_path = out_labels_dir.join(Path::new(&out_name).with_extension("txt"));
    augment_and_save(
        &image,
        &raw_lines,
        &out_image_path,
        &out_annotation_path,
        transform,
    )
}

/// Walks the whole dataset, augmenting every image/label pair. A
/// missing dataset root fails the run; any other failure is charged to
/// its pair, printed, and the walk continues.
pub fn run_augmentation(
    config: &AugmentConfig,
    transform: &dyn BboxTransform,
) -> Result<RunSummary, AugmentError> {
    let walker = YoloPairWalker::new(&config.data_root)?;

    let out_images_dir = config.out_root.join("images");
    let out_labels_dir = config.out_root.join("labels");
    fs::create_dir_all(&out_images_dir)?;
    fs::create_dir_all(&out_labels_dir)?;

    let total = walker.max_elem_index();
    let mut summary = RunSummary::default();
    for (index, pair) in walker.enumerate() {
        info!("Working on {} ({}/{})", pair.file_name, index + 1, total);
        match augment_pair(&pair, config, transform, &out_images_dir, &out_labels_dir) {
            Ok(()) => summary.augmented += 1,
            Err(err) => {
                summary.failed += 1;
                warn!("augmentation failed for {}: {}", pair.file_name, err);
                println!("Failed to augment image: {} ({})", pair.file_name, err);
            }
        }
    }
    Ok(summary)
}
