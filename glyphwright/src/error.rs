use std::{io, path::PathBuf};

use thiserror::Error;
use wrightir::GlyphName;

use crate::compile::CompileError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Unable to segment catalog at line {line}: {reason}")]
    MalformedCatalog { line: usize, reason: String },
    #[error("'{glyph}' asks for unknown post-build transform '{name}'")]
    UnknownTransform { glyph: GlyphName, name: String },
    #[error("Failed to compile '{glyph}'")]
    Compile {
        glyph: GlyphName,
        #[source]
        source: CompileError,
    },
    #[error("Plan covers {plans} targets but {targets} were given")]
    TargetMismatch { plans: usize, targets: usize },
    #[error("io failed for '{path}': '{source}'")]
    FileIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
    #[cfg(feature = "cli")]
    #[error(transparent)]
    Ufo(#[from] ufo2wrightir::error::Error),
}
