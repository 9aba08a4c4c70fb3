use image::{DynamicImage, GenericImageView, Rgb};
use imageproc::geometric_transformations::{rotate_about_center, Interpolation};
use rand::{thread_rng, Rng};

use super::bbox_math::{self, CropWindow};
use super::{Augmented, BboxTransform};
use crate::dataset::common_structs::NormalizedBbox;
use crate::error::AugmentError;

// Reasonable values are -40 and +40, max is 255, min is 0
pub fn random_change_brightness(img: &DynamicImage, min: i32, max: i32) -> DynamicImage {
    let value = thread_rng().gen_range(min..=max);
    img.brighten(value)
}

// Reasonable values are -15 and +15
pub fn random_change_contrast(img: &DynamicImage, min: f32, max: f32) -> DynamicImage {
    let value = thread_rng().gen_range(min..=max);
    img.adjust_contrast(value)
}

// Reasonable values are -35 and +35
pub fn random_hue_rotation(img: &DynamicImage, min: i32, max: i32) -> DynamicImage {
    let value = thread_rng().gen_range(min..=max);
    img.huerotate(value)
}

/// Gaussian blur with a random odd kernel size in [min, max], sigma
/// derived from the kernel size the way opencv does when left
/// unspecified.
pub fn random_blur(img: &DynamicImage, min: u32, max: u32) -> DynamicImage {
    let kernel = {
        let mut k = thread_rng().gen_range(min..=max);
        if k % 2 == 0 {
            k += 1;
        }
        k
    };
    let sigma = 0.3 * ((kernel - 1) as f32 * 0.5 - 1.0) + 0.8;
    img.blur(sigma)
}

/// Darkens a random rectangular region, leaving geometry untouched.
/// Images too small to carve a region out of are returned unchanged.
pub fn random_shadow(img: &DynamicImage) -> DynamicImage {
    let (width, height) = img.dimensions();
    if width < 4 || height < 4 {
        return img.clone();
    }
    let mut rng = thread_rng();
    let shadow_w = rng.gen_range(width / 4..=width / 2);
    let shadow_h = rng.gen_range(height / 4..=height / 2);
    let x0 = rng.gen_range(0..=width - shadow_w);
    let y0 = rng.gen_range(0..=height - shadow_h);

    let mut rgb = img.to_rgb8();
    for y in y0..y0 + shadow_h {
        for x in x0..x0 + shadow_w {
            let Rgb(channels) = *rgb.get_pixel(x, y);
            rgb.put_pixel(x, y, Rgb(channels.map(|c| (f32::from(c) * 0.55) as u8)));
        }
    }
    DynamicImage::ImageRgb8(rgb)
}

fn rotate_image(img: &DynamicImage, theta: f32) -> DynamicImage {
    let rotated = rotate_about_center(
        &img.to_rgb8(),
        theta,
        Interpolation::Bilinear,
        Rgb([0, 0, 0]),
    );
    DynamicImage::ImageRgb8(rotated)
}

/// Maps every box through `op`, dropping the paired class label
/// whenever `op` drops the box.
fn retain_mapped(
    bboxes: Vec<NormalizedBbox>,
    class_labels: Vec<u32>,
    mut op: impl FnMut(NormalizedBbox) -> Option<NormalizedBbox>,
) -> (Vec<NormalizedBbox>, Vec<u32>) {
    let mut kept_bboxes = Vec::with_capacity(bboxes.len());
    let mut kept_labels = Vec::with_capacity(class_labels.len());
    for (bb, label) in bboxes.into_iter().zip(class_labels) {
        if let Some(mapped) = op(bb) {
            kept_bboxes.push(mapped);
            kept_labels.push(label);
        }
    }
    (kept_bboxes, kept_labels)
}

/// The fixed augmentation pipeline: vertical flip, rotation,
/// brightness/contrast jitter, hue jitter, gaussian blur, random crop
/// and random shadow, each activated independently per call. The order
/// is part of the contract since the operations do not commute.
pub struct ComposedTransform {
    pub min_visibility: f64,
    pub crop_size: u32,
}

impl ComposedTransform {
    pub fn new(min_visibility: f64) -> ComposedTransform {
        ComposedTransform {
            min_visibility,
            crop_size: 640,
        }
    }
}

impl BboxTransform for ComposedTransform {
    fn apply(
        &self,
        image: DynamicImage,
        bboxes: Vec<NormalizedBbox>,
        class_labels: Vec<u32>,
    ) -> Result<Augmented, AugmentError> {
        if bboxes.len() != class_labels.len() {
            return Err(AugmentError::LengthMismatch {
                bboxes: bboxes.len(),
                labels: class_labels.len(),
            });
        }
        let mut rng = thread_rng();
        let mut image = image;
        let mut bboxes = bboxes;
        let mut class_labels = class_labels;

        if rng.gen_bool(0.3) {
            image = image.flipv();
            bboxes = bboxes
                .into_iter()
                .map(bbox_math::flip_bbox_vertically)
                .collect();
        }

        if rng.gen_bool(0.3) {
            let angle_deg: f64 = rng.gen_range(-30.0..=30.0);
            let angle_rad = angle_deg.to_radians();
            let (img_width, img_height) = image.dimensions();
            image = rotate_image(&image, angle_rad as f32);
            (bboxes, class_labels) = retain_mapped(bboxes, class_labels, |bb| {
                bbox_math::rotate_bbox(bb, angle_rad, img_width, img_height, self.min_visibility)
            });
        }

        if rng.gen_bool(0.2) {
            image = random_change_brightness(&image, -40, 40);
            image = random_change_contrast(&image, -15., 15.);
        }

        if rng.gen_bool(0.2) {
            image = random_hue_rotation(&image, -35, 35);
        }

        if rng.gen_bool(0.2) {
            image = random_blur(&image, 3, 7);
        }

        if rng.gen_bool(0.2) {
            let (img_width, img_height) = image.dimensions();
            if img_width < self.crop_size || img_height < self.crop_size {
                return Err(AugmentError::Transform(format!(
                    "crop size {size}x{size} exceeds image {img_width}x{img_height}",
                    size = self.crop_size,
                )));
            }
            let crop = CropWindow {
                x: rng.gen_range(0..=img_width - self.crop_size),
                y: rng.gen_range(0..=img_height - self.crop_size),
                width: self.crop_size,
                height: self.crop_size,
            };
            image = image.crop_imm(crop.x, crop.y, crop.width, crop.height);
            (bboxes, class_labels) = retain_mapped(bboxes, class_labels, |bb| {
                bbox_math::crop_bbox(bb, crop, img_width, img_height, self.min_visibility)
            });
        }

        if rng.gen_bool(0.3) {
            image = random_shadow(&image);
        }

        Ok(Augmented {
            image,
            bboxes,
            class_labels,
        })
    }
}
