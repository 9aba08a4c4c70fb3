pub mod annotation_codec;
pub mod common_structs;

pub mod data_augmenters;
pub mod data_loaders;

/// Extends the iterator trait so dataset walkers can display progress
pub trait DatasetWalker: Iterator {
    /// Returns the next element index, starting from 0
    fn next_element_index(&self) -> usize;
    /// Returns the total number of elements to be walked
    fn max_elem_index(&self) -> usize;
}
