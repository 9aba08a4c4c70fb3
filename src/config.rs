use std::path::PathBuf;

/// Boxes keeping less than this fraction of their area visible after a
/// crop or rotation are dropped along with their label.
pub const DEFAULT_MIN_VISIBILITY: f64 = 0.4;

/// Run configuration, resolved once from the command line at startup
/// and passed down unchanged.
#[derive(Debug, Clone)]
pub struct AugmentConfig {
    pub data_root: PathBuf,
    pub out_root: PathBuf,
    pub prefix: String,
    pub min_visibility: f64,
}

impl AugmentConfig {
    pub fn new(data_root: PathBuf, out_root: PathBuf, prefix: String) -> AugmentConfig {
        AugmentConfig {
            data_root,
            out_root,
            prefix,
            min_visibility: DEFAULT_MIN_VISIBILITY,
        }
    }
}
