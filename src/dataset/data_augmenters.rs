use image::DynamicImage;

use crate::dataset::common_structs::NormalizedBbox;
use crate::error::AugmentError;

pub mod bbox_math;
pub mod image_augmentations;

/// A transformed image with its surviving boxes and their class labels.
#[derive(Debug)]
pub struct Augmented {
    pub image: DynamicImage,
    pub bboxes: Vec<NormalizedBbox>,
    pub class_labels: Vec<u32>,
}

/// A configured image+bbox transformation pipeline.
///
/// `class_labels[i]` labels `bboxes[i]` on the way in and on the way
/// out. Implementations must keep the two sequences equal in length,
/// never longer than the input, and must drop a box's label whenever
/// the box itself is dropped for falling below the visibility
/// threshold after a crop or rotation.
pub trait BboxTransform {
    fn apply(
        &self,
        image: DynamicImage,
        bboxes: Vec<NormalizedBbox>,
        class_labels: Vec<u32>,
    ) -> Result<Augmented, AugmentError>;
}
