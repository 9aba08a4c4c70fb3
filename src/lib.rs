pub mod augmenter;
pub mod config;
pub mod dataset;
pub mod error;
