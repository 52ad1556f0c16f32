use std::path::PathBuf;

use norad::error::FontLoadError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to load UFO '{path}'")]
    FontLoad {
        path: PathBuf,
        #[source]
        source: FontLoadError,
    },
}
