//! Glyph and layer model shared by the glyphwright engine and its sources.
//!
//! The engine treats glyph storage as an external collaborator; the traits in
//! [`layer`] describe what it needs, and [`layer::GlyphLayer`] / [`glyph::Glyph`]
//! are the in-memory implementation used by the UFO loader and the tests.

pub mod error;
pub mod glyph;
pub mod layer;
mod path_builder;
pub mod pen;
pub mod types;
pub mod unicode;

#[cfg(any(test, feature = "test-util"))]
pub mod test_util;

pub use glyph::{Component, Contour, ContourPoint, Glyph, PointType};
pub use layer::{GlyphEditor, GlyphLayer, Layer};
pub use pen::PointPen;
pub use types::GlyphName;
