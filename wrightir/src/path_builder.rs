//! Converts a contour's point stream into a [`BezPath`].
//!
//! Only used to measure contours, so quadratic runs with several off-curve
//! points are expanded with implied on-curve midpoints rather than kept as
//! TrueType splines.

use kurbo::{BezPath, PathEl, Point};

use crate::{error::PathConversionError, glyph::PointType, ContourPoint};

#[derive(Debug)]
pub(crate) struct ContourPathBuilder {
    els: Vec<PathEl>,
    pending_offcurve: Vec<Point>,
    leading_offcurve: Vec<Point>,
    first_oncurve: Option<(Point, PointType)>,
}

impl ContourPathBuilder {
    fn new(n_points: usize) -> Self {
        ContourPathBuilder {
            els: Vec::with_capacity(n_points + 2),
            pending_offcurve: Vec::with_capacity(2),
            leading_offcurve: Vec::new(),
            first_oncurve: None,
        }
    }

    /// Build the path for a single contour.
    ///
    /// A contour that starts with a `move` is open; anything else is closed,
    /// following UFO glif semantics.
    pub(crate) fn build(points: &[ContourPoint]) -> Result<BezPath, PathConversionError> {
        let mut builder = ContourPathBuilder::new(points.len());
        for point in points {
            builder.push(point)?;
        }
        builder.finish()
    }

    fn push(&mut self, point: &ContourPoint) -> Result<(), PathConversionError> {
        let p = Point::new(point.x, point.y);
        match point.typ {
            PointType::OffCurve if self.first_oncurve.is_none() => self.leading_offcurve.push(p),
            PointType::OffCurve => self.pending_offcurve.push(p),
            PointType::Move if self.first_oncurve.is_some() || !self.leading_offcurve.is_empty() => {
                return Err(PathConversionError::MoveAfterFirstPoint { point: p })
            }
            typ if self.first_oncurve.is_none() => {
                self.els.push(PathEl::MoveTo(p));
                self.first_oncurve = Some((p, typ));
            }
            PointType::Move | PointType::Line => {
                self.require_no_offcurve()?;
                self.els.push(PathEl::LineTo(p));
            }
            PointType::Curve => self.curve_to(p)?,
            PointType::QCurve => self.qcurve_to(p),
        }
        Ok(())
    }

    fn require_no_offcurve(&self) -> Result<(), PathConversionError> {
        if self.pending_offcurve.is_empty() {
            Ok(())
        } else {
            Err(PathConversionError::TooManyOffcurvePoints {
                points: self.pending_offcurve.clone(),
            })
        }
    }

    fn curve_to(&mut self, p: Point) -> Result<(), PathConversionError> {
        let el = match self.pending_offcurve.as_slice() {
            [] => PathEl::LineTo(p),
            [c0] => PathEl::QuadTo(*c0, p),
            [c0, c1] => PathEl::CurveTo(*c0, *c1, p),
            points => {
                return Err(PathConversionError::TooManyOffcurvePoints {
                    points: points.to_vec(),
                })
            }
        };
        self.els.push(el);
        self.pending_offcurve.clear();
        Ok(())
    }

    fn qcurve_to(&mut self, p: Point) {
        let Some(last) = self.pending_offcurve.last().copied() else {
            self.els.push(PathEl::LineTo(p));
            return;
        };
        for pair in self.pending_offcurve.windows(2) {
            self.els.push(PathEl::QuadTo(pair[0], pair[0].midpoint(pair[1])));
        }
        self.els.push(PathEl::QuadTo(last, p));
        self.pending_offcurve.clear();
    }

    fn finish(mut self) -> Result<BezPath, PathConversionError> {
        let Some((start, start_typ)) = self.first_oncurve else {
            // no on-curve at all; treat the off-curves as the outline's extent
            let mut points = self.leading_offcurve.into_iter();
            let mut path = BezPath::new();
            if let Some(first) = points.next() {
                path.move_to(first);
                points.for_each(|p| path.line_to(p));
                path.close_path();
            }
            return Ok(path);
        };
        if start_typ == PointType::Move {
            if !self.pending_offcurve.is_empty() {
                return Err(PathConversionError::TrailingOffcurvePoints {
                    points: self.pending_offcurve,
                });
            }
            return Ok(BezPath::from_vec(self.els));
        }
        // closed: leading off-curves belong to the segment returning to the start
        let mut leading = std::mem::take(&mut self.leading_offcurve);
        self.pending_offcurve.append(&mut leading);
        match start_typ {
            PointType::QCurve => self.qcurve_to(start),
            PointType::Curve => self.curve_to(start)?,
            _ => {
                self.require_no_offcurve()?;
                self.els.push(PathEl::LineTo(start));
            }
        }
        self.els.push(PathEl::ClosePath);
        Ok(BezPath::from_vec(self.els))
    }
}
