use std::fs;
use std::path::Path;

use crate::dataset::common_structs::AnnotationPair;
use crate::dataset::DatasetWalker;
use crate::error::AugmentError;

const IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Walks a yolo dataset root, yielding one image/label path pair per
/// recognized image under `<root>/images`. The label path is derived by
/// extension substitution into `<root>/labels`; whether it exists is
/// the per-pair consumer's problem, a missing root is fatal here.
#[derive(Debug)]
pub struct YoloPairWalker {
    pairs: Vec<AnnotationPair>,
    max_elem_index: usize,
    next_element_index: usize,
}

impl YoloPairWalker {
    pub fn new(data_root: &Path) -> Result<YoloPairWalker, AugmentError> {
        if !data_root.exists() {
            return Err(AugmentError::DatasetNotFound(data_root.to_owned()));
        }
        let images_dir = data_root.join("images");
        let labels_dir = data_root.join("labels");

        let mut pairs = vec![];
        for entry in fs::read_dir(&images_dir)? {
            let path = entry?.path();
            let ext = match path.extension().and_then(|e| e.to_str()) {
                Some(ext) => ext.to_ascii_lowercase(),
                None => continue,
            };
            if !IMAGE_EXTENSIONS.contains(&ext.as_str()) {
                continue;
            }
            let file_name = match path.file_name().and_then(|n| n.to_str()) {
                Some(name) => name.to_owned(),
                None => continue,
            };
            let label_path = labels_dir.join(Path::new(&file_name).with_extension("txt"));
            pairs.push(AnnotationPair {
                image_path: path,
                label_path,
                file_name,
            });
        }
        // yielded by popping from the back, so sort descending to walk
        // in file name order
        pairs.sort_by(|a, b| b.file_name.cmp(&a.file_name));
        Ok(YoloPairWalker {
            max_elem_index: pairs.len(),
            pairs,
            next_element_index: 0,
        })
    }
}

impl Iterator for YoloPairWalker {
    type Item = AnnotationPair;

    fn next(&mut self) -> Option<Self::Item> {
        let pair = self.pairs.pop()?;
        self.next_element_index += 1;
        Some(pair)
    }
}

impl DatasetWalker for YoloPairWalker {
    fn next_element_index(&self) -> usize {
        self.next_element_index
    }

    fn max_elem_index(&self) -> usize {
        self.max_elem_index
    }
}
