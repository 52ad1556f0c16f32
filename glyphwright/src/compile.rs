//! The seam to the external recipe compiler.
//!
//! Formula grammar lives entirely on the other side of [`RecipeCompiler`];
//! glyphwright only hands it a construction line and draws what comes back.

use wrightir::PointPen;

/// Whatever went wrong inside a compiler.
pub type CompileError = Box<dyn std::error::Error + Send + Sync>;

/// The name compiled constructions are declared under.
const PLACEHOLDER_NAME: &str = "null";

/// A compiled glyph, ready to be copied into the target.
pub trait BuiltGlyph {
    fn unicode(&self) -> Option<char>;

    fn note(&self) -> Option<&str>;

    fn width(&self) -> f64;

    /// Replay contours and components into `pen`.
    fn draw_points(&self, pen: &mut dyn PointPen);
}

/// Turns a construction line into glyph geometry.
///
/// `font` is the layer being built, so formulas can reference its glyphs.
pub trait RecipeCompiler<L: ?Sized> {
    type Built: BuiltGlyph;

    fn compile(&self, construction: &str, font: &L) -> Result<Self::Built, CompileError>;
}

/// The construction line handed to the compiler for `formula`.
///
/// The result is declared under a placeholder name, marked for
/// decomposition when requested.
pub fn compiler_input(formula: &str, decompose: bool) -> String {
    let marker = if decompose { "*" } else { "" };
    format!("{marker}{PLACEHOLDER_NAME} = {formula}")
}
