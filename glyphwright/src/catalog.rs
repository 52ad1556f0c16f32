//! Raw recipe catalog text.

use std::{fs, path::Path, sync::Arc};

use log::debug;

use crate::Error;

static BUNDLED: &str = include_str!("../resources/default_catalog.txt");

/// The raw text of a recipe catalog.
///
/// Cheap to clone; the text is shared and never changes once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    text: Arc<str>,
}

impl Catalog {
    pub fn new(text: impl Into<Arc<str>>) -> Self {
        Catalog { text: text.into() }
    }

    /// The default catalog shipped with glyphwright.
    pub fn bundled() -> Self {
        Catalog::new(BUNDLED)
    }

    pub fn load(path: &Path) -> Result<Self, Error> {
        let text = fs::read_to_string(path).map_err(|source| Error::FileIo {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("read {} bytes of catalog from {path:?}", text.len());
        Ok(Catalog::new(text))
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::bundled()
    }
}
