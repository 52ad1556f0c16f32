//! Helpers for tests in this crate and its dependents.

use crate::{Contour, ContourPoint, PointType};

/// A closed rectangular contour.
pub fn rect_contour(x0: f64, y0: f64, x1: f64, y1: f64) -> Contour {
    Contour::new(vec![
        ContourPoint::new(x0, y0, PointType::Line),
        ContourPoint::new(x1, y0, PointType::Line),
        ContourPoint::new(x1, y1, PointType::Line),
        ContourPoint::new(x0, y1, PointType::Line),
    ])
}
