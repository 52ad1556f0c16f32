//! The recipe record and the markers it is written with.

use serde::{Deserialize, Serialize};
use wrightir::GlyphName;

/// Leading a recipe name in catalog text, requests decomposed output.
pub const DECOMPOSE_MARKER: char = '*';

/// Separates a formula from the name of a transform to run after building.
pub const TRANSFORM_DIRECTIVE: &str = "# >>>";

/// How to build one glyph.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Recipe {
    pub name: GlyphName,
    /// Construction formula, opaque to everything but the recipe compiler.
    pub formula: String,
    #[serde(default)]
    pub decompose: bool,
    /// Erase the glyph's contours and components before building.
    #[serde(default = "default_clear")]
    pub clear: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_build_transform: Option<String>,
}

fn default_clear() -> bool {
    true
}

impl Recipe {
    pub fn new(name: impl Into<GlyphName>, formula: impl Into<String>) -> Self {
        Recipe {
            name: name.into(),
            formula: formula.into(),
            decompose: false,
            clear: true,
            post_build_transform: None,
        }
    }

    pub fn with_decompose(mut self, decompose: bool) -> Self {
        self.decompose = decompose;
        self
    }

    pub fn with_clear(mut self, clear: bool) -> Self {
        self.clear = clear;
        self
    }

    pub fn with_transform(mut self, transform: impl Into<String>) -> Self {
        self.post_build_transform = Some(transform.into());
        self
    }

    /// The formula to compile and the transform to run afterwards.
    ///
    /// An explicit [`post_build_transform`](Self::post_build_transform) wins;
    /// otherwise a directive still embedded in the formula (as typed into an
    /// edited row) is honored.
    pub fn formula_and_transform(&self) -> (&str, Option<&str>) {
        let (formula, embedded) = split_directive(&self.formula);
        match self.post_build_transform.as_deref() {
            Some(transform) => (formula, Some(transform)),
            None => (formula, embedded),
        }
    }
}

/// Split a raw formula at the first transform directive.
///
/// Both halves are trimmed; a directive naming nothing is no directive.
pub fn split_directive(raw: &str) -> (&str, Option<&str>) {
    match raw.split_once(TRANSFORM_DIRECTIVE) {
        Some((formula, transform)) => {
            let transform = transform.trim();
            (formula.trim(), (!transform.is_empty()).then_some(transform))
        }
        None => (raw.trim(), None),
    }
}

/// Strip the decompose marker from a raw catalog name.
pub fn split_decompose_marker(raw: &str) -> (&str, bool) {
    match raw.strip_prefix(DECOMPOSE_MARKER) {
        Some(name) => (name.trim_start(), true),
        None => (raw, false),
    }
}
