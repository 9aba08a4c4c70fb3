use std::fs;
use std::path::Path;

use crate::dataset::common_structs::{NormalizedBbox, YoloBbox};
use crate::error::AugmentError;

/// Codec for the yolo annotation line format:
/// `<class_id> <x_center> <y_center> <width> <height>`, one box per
/// line, geometry normalized to [0, 1].

fn malformed(line: &str, reason: String) -> AugmentError {
    AugmentError::MalformedAnnotation {
        line: line.to_owned(),
        reason,
    }
}

/// Parses one annotation line into its transform-ready form, geometry
/// first and class id carried separately.
pub fn decode(line: &str) -> Result<YoloBbox, AugmentError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() != 5 {
        return Err(malformed(
            line,
            format!("expected 5 fields, got {}", tokens.len()),
        ));
    }
    let class = tokens[0]
        .parse::<u32>()
        .map_err(|e| malformed(line, format!("bad class id {:?}: {}", tokens[0], e)))?;
    let mut geometry = [0f64; 4];
    for (slot, token) in geometry.iter_mut().zip(&tokens[1..]) {
        *slot = token
            .parse::<f64>()
            .map_err(|e| malformed(line, format!("bad coordinate {:?}: {}", token, e)))?;
    }
    Ok(YoloBbox {
        geometry: NormalizedBbox {
            x_center: geometry[0],
            y_center: geometry[1],
            width: geometry[2],
            height: geometry[3],
        },
        class,
    })
}

/// Reads an annotation file into raw stripped lines, one per box.
/// Parsing is deferred to [`convert`]; blank lines carry no box and are
/// dropped here.
pub fn decode_file(path: &Path) -> Result<Vec<String>, AugmentError> {
    let content = fs::read_to_string(path)?;
    Ok(content
        .lines()
        .map(|line| line.trim().to_owned())
        .filter(|line| !line.is_empty())
        .collect())
}

/// Parses every raw line into a [`YoloBbox`], failing on the first
/// malformed one. The image dimensions are accepted for parity with
/// pixel-coordinate annotation formats; the normalized format needs no
/// rescaling, so they are unused.
pub fn convert(
    lines: &[String],
    _image_width: u32,
    _image_height: u32,
) -> Result<Vec<YoloBbox>, AugmentError> {
    lines.iter().map(|line| decode(line)).collect()
}

/// Serializes each (geometry, label) pair back into a newline-terminated
/// annotation line, class id leading.
pub fn encode(bboxes: &[NormalizedBbox], class_labels: &[u32]) -> Result<Vec<String>, AugmentError> {
    if bboxes.len() != class_labels.len() {
        return Err(AugmentError::LengthMismatch {
            bboxes: bboxes.len(),
            labels: class_labels.len(),
        });
    }
    Ok(bboxes
        .iter()
        .zip(class_labels)
        .map(|(bb, class)| {
            format!(
                "{} {} {} {} {}\n",
                class, bb.x_center, bb.y_center, bb.width, bb.height
            )
        })
        .collect())
}

/// Writes already newline-terminated lines verbatim, replacing any
/// existing file.
pub fn write_file(path: &Path, lines: &[String]) -> Result<(), AugmentError> {
    fs::write(path, lines.concat())?;
    Ok(())
}
