use kurbo::Point;
use thiserror::Error;

/// Problems converting a contour's points into a bezier path.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PathConversionError {
    #[error("more than two off-curve points before a curve: {points:?}")]
    TooManyOffcurvePoints { points: Vec<Point> },
    #[error("'move' at {point} is not the first point of its contour")]
    MoveAfterFirstPoint { point: Point },
    #[error("open contour ends with off-curve points {points:?}")]
    TrailingOffcurvePoints { points: Vec<Point> },
}
