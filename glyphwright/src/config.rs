//! Settings for a single run

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{
    build::FailurePolicy,
    catalog::Catalog,
    library::{ParseOptions, RecipeLoader},
    variables::ReferenceGlyphs,
    Args, Error,
};

/// The effective settings of a run, separate from what it was asked to do.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Config {
    /// `None` for the bundled catalog
    pub catalog: Option<PathBuf>,
    pub references: ReferenceGlyphs,
    /// Options for libraries used in bulk
    pub batch: ParseOptions,
    /// `clear` for a recipe resolved for a single glyph
    pub glyph_clear: bool,
    pub failure_policy: FailurePolicy,
}

impl Config {
    pub fn new(args: &Args) -> Config {
        Config {
            catalog: args.catalog.clone(),
            references: ReferenceGlyphs {
                upper: args.upper_reference.as_str().into(),
                lower: args.lower_reference.as_str().into(),
            },
            batch: ParseOptions {
                default_clear: args.batch_clear,
            },
            glyph_clear: args.glyph_clear,
            failure_policy: args.on_failure,
        }
    }

    /// A loader that builds libraries the way this config says.
    pub fn loader(&self) -> Result<RecipeLoader, Error> {
        let catalog = match &self.catalog {
            Some(path) => Catalog::load(path)?,
            None => Catalog::bundled(),
        };
        Ok(RecipeLoader {
            catalog,
            references: self.references.clone(),
            options: self.batch,
            ..Default::default()
        })
    }
}
