use std::path::PathBuf;

/// Frequently used structs shared by the codec, walker and augmenters

/// A bounding box in normalized center format: all four values are
/// fractions of the image dimensions, each in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedBbox {
    pub x_center: f64,
    pub y_center: f64,
    pub width: f64,
    pub height: f64,
}

/// One parsed annotation line: box geometry plus its class id, kept as
/// two separate values so the geometry can be handed to a transform
/// with the labels threaded alongside.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YoloBbox {
    pub geometry: NormalizedBbox,
    pub class: u32,
}

/// An image file with its matching label file, sharing a base name.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationPair {
    pub image_path: PathBuf,
    pub label_path: PathBuf,
    pub file_name: String,
}
