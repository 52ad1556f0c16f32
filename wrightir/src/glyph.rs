//! In-memory glyph model.

use kurbo::{Affine, BezPath, ParamCurveExtrema, Rect};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::{error::PathConversionError, path_builder::ContourPathBuilder, GlyphName};

/// Possible types of a point in a glyph contour, following UFO GLIF semantics.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointType {
    Move,
    Line,
    OffCurve,
    Curve,
    QCurve,
}

/// A single point in a glyph contour.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ContourPoint {
    pub x: f64,
    pub y: f64,
    pub typ: PointType,
    #[serde(default)]
    pub smooth: bool,
    #[serde(default)]
    pub name: Option<String>,
}

impl ContourPoint {
    pub fn new(x: f64, y: f64, typ: PointType) -> Self {
        ContourPoint {
            x,
            y,
            typ,
            smooth: false,
            name: None,
        }
    }
}

/// A single glyph contour consisting of a list of points.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Contour {
    pub points: Vec<ContourPoint>,
}

impl Contour {
    pub fn new(points: Vec<ContourPoint>) -> Self {
        Contour { points }
    }

    pub fn to_path(&self) -> Result<BezPath, PathConversionError> {
        ContourPathBuilder::build(&self.points)
    }

    /// The tight bounds of the contour's outline.
    ///
    /// `None` for an empty contour or one whose points don't form a valid
    /// path.
    pub fn bounds(&self) -> Option<Rect> {
        let path = match self.to_path() {
            Ok(path) => path,
            Err(e) => {
                debug!("contour has no measurable bounds: {e}");
                return None;
            }
        };
        path.segments()
            .map(|seg| seg.bounding_box())
            .reduce(|acc, bbox| acc.union(bbox))
            .or_else(|| {
                // a lone point still has an extent, if a degenerate one
                self.points
                    .first()
                    .map(|p| Rect::new(p.x, p.y, p.x, p.y))
            })
    }
}

/// A reference to another glyph, placed with an affine transform.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Component {
    pub base: GlyphName,
    pub transform: Affine,
}

/// Everything an undo step restores.
#[derive(Debug, Clone, Default, PartialEq)]
struct GlyphState {
    width: f64,
    unicodes: Vec<char>,
    note: Option<String>,
    contours: Vec<Contour>,
    components: Vec<Component>,
}

#[derive(Debug, Clone)]
struct UndoStep {
    title: String,
    before: GlyphState,
}

#[derive(Debug, Clone, Default)]
struct UndoHistory {
    open: Option<UndoStep>,
    done: Vec<UndoStep>,
}

/// A glyph in a [`GlyphLayer`](crate::GlyphLayer).
#[derive(Debug, Clone)]
pub struct Glyph {
    name: GlyphName,
    pub width: f64,
    pub unicodes: Vec<char>,
    pub note: Option<String>,
    pub contours: Vec<Contour>,
    pub components: Vec<Component>,
    history: UndoHistory,
}

impl Glyph {
    pub fn new(name: impl Into<GlyphName>) -> Self {
        Glyph {
            name: name.into(),
            width: 0.0,
            unicodes: Vec::new(),
            note: None,
            contours: Vec::new(),
            components: Vec::new(),
            history: UndoHistory::default(),
        }
    }

    pub fn name(&self) -> &GlyphName {
        &self.name
    }

    pub fn has_outlines(&self) -> bool {
        !self.contours.is_empty() || !self.components.is_empty()
    }

    /// Bounds of this glyph's own contours, ignoring components.
    pub fn own_bounds(&self) -> Option<Rect> {
        self.contours
            .iter()
            .filter_map(Contour::bounds)
            .reduce(|acc, bbox| acc.union(bbox))
    }

    fn state(&self) -> GlyphState {
        GlyphState {
            width: self.width,
            unicodes: self.unicodes.clone(),
            note: self.note.clone(),
            contours: self.contours.clone(),
            components: self.components.clone(),
        }
    }

    fn restore(&mut self, state: GlyphState) {
        self.width = state.width;
        self.unicodes = state.unicodes;
        self.note = state.note;
        self.contours = state.contours;
        self.components = state.components;
    }

    /// Start recording an undoable change.
    ///
    /// A scope that is already open is kept, so nested calls fold into the
    /// outermost step.
    pub fn begin_undo(&mut self, title: &str) {
        if self.history.open.is_some() {
            debug!("{}: undo scope already open, not starting '{title}'", self.name);
            return;
        }
        self.history.open = Some(UndoStep {
            title: title.to_string(),
            before: self.state(),
        });
    }

    /// Close the open undo scope, recording it if anything changed.
    pub fn end_undo(&mut self) {
        let Some(step) = self.history.open.take() else {
            debug!("{}: no undo scope to close", self.name);
            return;
        };
        if step.before != self.state() {
            self.history.done.push(step);
        }
    }

    /// Titles of the recorded undo steps, oldest first.
    pub fn undo_titles(&self) -> impl Iterator<Item = &str> {
        self.history.done.iter().map(|step| step.title.as_str())
    }

    /// Revert the most recent recorded step; returns its title.
    pub fn undo(&mut self) -> Option<String> {
        let step = self.history.done.pop()?;
        self.restore(step.before);
        Some(step.title)
    }
}
