//! Point pens: the drawing protocol compiled constructions are replayed through.
//!
//! Mirrors the fontTools point pen protocol: contours are bracketed by
//! `begin_path`/`end_path`, off-curve points are reported with
//! [`PointType::OffCurve`], and components are added whole.

use kurbo::{Affine, Point};
use log::warn;

use crate::{Component, Contour, ContourPoint, Glyph, GlyphName, PointType};

pub trait PointPen {
    fn begin_path(&mut self);

    fn add_point(&mut self, pt: Point, typ: PointType, smooth: bool, name: Option<&str>);

    fn end_path(&mut self);

    fn add_component(&mut self, base: &GlyphName, transform: Affine);
}

/// Appends whatever is drawn to a [`Glyph`].
///
/// Existing contours and components are kept; clearing is the caller's
/// business.
#[derive(Debug)]
pub struct GlyphPointPen<'a> {
    glyph: &'a mut Glyph,
    current: Option<Vec<ContourPoint>>,
}

impl<'a> GlyphPointPen<'a> {
    pub fn new(glyph: &'a mut Glyph) -> Self {
        GlyphPointPen {
            glyph,
            current: None,
        }
    }
}

impl PointPen for GlyphPointPen<'_> {
    fn begin_path(&mut self) {
        if let Some(points) = self.current.take() {
            warn!("{}: begin_path inside an open path", self.glyph.name());
            self.glyph.contours.push(Contour::new(points));
        }
        self.current = Some(Vec::new());
    }

    fn add_point(&mut self, pt: Point, typ: PointType, smooth: bool, name: Option<&str>) {
        let Some(points) = self.current.as_mut() else {
            warn!(
                "{}: dropping point {pt:?} drawn outside a path",
                self.glyph.name()
            );
            return;
        };
        points.push(ContourPoint {
            x: pt.x,
            y: pt.y,
            typ,
            smooth,
            name: name.map(str::to_string),
        });
    }

    fn end_path(&mut self) {
        match self.current.take() {
            Some(points) if !points.is_empty() => self.glyph.contours.push(Contour::new(points)),
            Some(_) => (),
            None => warn!("{}: end_path without begin_path", self.glyph.name()),
        }
    }

    fn add_component(&mut self, base: &GlyphName, transform: Affine) {
        self.glyph.components.push(Component {
            base: base.clone(),
            transform,
        });
    }
}

impl Drop for GlyphPointPen<'_> {
    fn drop(&mut self) {
        if let Some(points) = self.current.take() {
            if !points.is_empty() {
                warn!("{}: closing unterminated path", self.glyph.name());
                self.glyph.contours.push(Contour::new(points));
            }
        }
    }
}
