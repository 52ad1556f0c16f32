//! A stand-in recipe compiler.

use std::cell::RefCell;

use kurbo::{Affine, Point};
use wrightir::{Component, Contour, GlyphLayer, Layer, PointPen};

use crate::compile::{BuiltGlyph, CompileError, RecipeCompiler};

#[derive(Debug, Clone, Default)]
pub(crate) struct Drawing {
    pub unicode: Option<char>,
    pub note: Option<String>,
    pub width: f64,
    pub contours: Vec<Contour>,
    pub components: Vec<Component>,
}

impl BuiltGlyph for Drawing {
    fn unicode(&self) -> Option<char> {
        self.unicode
    }

    fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    fn width(&self) -> f64 {
        self.width
    }

    fn draw_points(&self, pen: &mut dyn PointPen) {
        for contour in self.contours.iter() {
            pen.begin_path();
            for pt in contour.points.iter() {
                pen.add_point(Point::new(pt.x, pt.y), pt.typ, pt.smooth, pt.name.as_deref());
            }
            pen.end_path();
        }
        for component in self.components.iter() {
            pen.add_component(&component.base, component.transform);
        }
    }
}

/// Understands only `a + b + ...`: glyphs of the font set side by side.
///
/// Decomposed output copies their contours, otherwise they are placed as
/// components. Every construction line received is remembered.
#[derive(Debug, Default)]
pub(crate) struct SideBySideCompiler {
    pub unicode: Option<char>,
    pub note: Option<String>,
    pub seen: RefCell<Vec<String>>,
}

impl SideBySideCompiler {
    pub fn seen(&self) -> Vec<String> {
        self.seen.borrow().clone()
    }
}

fn shifted(contour: &Contour, dx: f64) -> Contour {
    let mut contour = contour.clone();
    contour.points.iter_mut().for_each(|pt| pt.x += dx);
    contour
}

impl RecipeCompiler<GlyphLayer> for SideBySideCompiler {
    type Built = Drawing;

    fn compile(&self, construction: &str, font: &GlyphLayer) -> Result<Drawing, CompileError> {
        self.seen.borrow_mut().push(construction.to_string());
        let (decompose, line) = match construction.strip_prefix('*') {
            Some(line) => (true, line),
            None => (false, construction),
        };
        let formula = line
            .strip_prefix("null = ")
            .ok_or_else(|| format!("'{construction}' doesn't declare null"))?;

        let mut drawing = Drawing {
            unicode: self.unicode,
            note: self.note.clone(),
            ..Default::default()
        };
        for part in formula.split('+').map(str::trim) {
            let glyph = font
                .glyph(part)
                .ok_or_else(|| format!("no glyph '{part}' to place"))?;
            if decompose {
                drawing
                    .contours
                    .extend(glyph.contours.iter().map(|c| shifted(c, drawing.width)));
            } else {
                drawing.components.push(Component {
                    base: part.into(),
                    transform: Affine::translate((drawing.width, 0.0)),
                });
            }
            drawing.width += glyph.width;
        }
        Ok(drawing)
    }
}
