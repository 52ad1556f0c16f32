//! Layer-dependent values substituted into recipe formulas.

use log::debug;
use serde::{Deserialize, Serialize};
use wrightir::{GlyphName, Layer};

/// The glyphs whose bounds the variables are measured from.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ReferenceGlyphs {
    /// A round capital; its overshoot below the baseline is `overshootUpper`.
    pub upper: GlyphName,
    /// A round lowercase; its overshoot is `overshootLower`.
    pub lower: GlyphName,
}

impl Default for ReferenceGlyphs {
    fn default() -> Self {
        ReferenceGlyphs {
            upper: GlyphName::new("O"),
            lower: GlyphName::new("o"),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq)]
pub struct VariableSnapshot {
    pub overshoot_upper: f64,
    pub overshoot_lower: f64,
}

impl VariableSnapshot {
    /// Declarations of the variables, in catalog syntax.
    pub fn preamble(&self) -> String {
        format!(
            "\n$overshootUpper = {}\n$overshootLower = {}\n",
            self.overshoot_upper, self.overshoot_lower
        )
    }
}

fn overshoot(layer: &impl Layer, reference: &GlyphName) -> f64 {
    match layer.glyph_bounds(reference.as_str()) {
        Some(bounds) => bounds.y0,
        None => {
            debug!("no bounds for '{reference}', its overshoot is 0");
            0.0
        }
    }
}

/// Measure the variables in `layer`.
///
/// A reference glyph that is missing or draws nothing contributes `0`.
pub fn compute_variables(layer: &impl Layer, references: &ReferenceGlyphs) -> VariableSnapshot {
    VariableSnapshot {
        overshoot_upper: overshoot(layer, &references.upper),
        overshoot_lower: overshoot(layer, &references.lower),
    }
}
