//! The geometry service the engine builds against.
//!
//! [`Layer`] and [`GlyphEditor`] are the seams: the engine only ever talks to
//! glyph storage through them. [`GlyphLayer`] is the in-memory implementation.

use indexmap::{IndexMap, IndexSet};
use kurbo::Rect;
use log::warn;

use crate::{
    pen::{GlyphPointPen, PointPen},
    unicode::char_for_glyph_name,
    Glyph, GlyphName,
};

/// Mutations a build applies to one glyph.
pub trait GlyphEditor {
    fn name(&self) -> &GlyphName;

    /// Open an undo scope; everything until [`perform_undo`](Self::perform_undo)
    /// is one step.
    fn prepare_undo(&mut self, title: &str);

    fn perform_undo(&mut self);

    /// Remove all contours and components.
    fn clear(&mut self);

    fn has_outlines(&self) -> bool;

    fn unicode(&self) -> Option<char>;

    fn set_unicode(&mut self, unicode: Option<char>);

    fn set_note(&mut self, note: Option<String>);

    fn set_width(&mut self, width: f64);

    /// Assign code points derived from the glyph name.
    fn auto_unicodes(&mut self);

    fn point_pen(&mut self) -> Box<dyn PointPen + '_>;

    /// Bounds of each contour, in contour order.
    fn contour_bounds(&self) -> Vec<Option<Rect>>;

    fn remove_contour(&mut self, index: usize);
}

/// A named collection of glyphs.
pub trait Layer {
    type Glyph: GlyphEditor;

    fn glyph(&self, name: &str) -> Option<&Self::Glyph>;

    /// The named glyph, created empty if the layer doesn't have it yet.
    fn glyph_mut(&mut self, name: &GlyphName) -> &mut Self::Glyph;

    fn glyph_names(&self) -> Vec<GlyphName>;

    /// `(xMin, yMin, xMax, yMax)` of the glyph including its components, or
    /// `None` if it is absent or draws nothing.
    fn glyph_bounds(&self, name: &str) -> Option<Rect>;

    fn contains_glyph(&self, name: &str) -> bool {
        self.glyph(name).is_some()
    }

    fn has_outlines(&self, name: &str) -> bool {
        self.glyph(name).is_some_and(GlyphEditor::has_outlines)
    }
}

impl GlyphEditor for Glyph {
    fn name(&self) -> &GlyphName {
        Glyph::name(self)
    }

    fn prepare_undo(&mut self, title: &str) {
        self.begin_undo(title);
    }

    fn perform_undo(&mut self) {
        self.end_undo();
    }

    fn clear(&mut self) {
        self.contours.clear();
        self.components.clear();
    }

    fn has_outlines(&self) -> bool {
        Glyph::has_outlines(self)
    }

    fn unicode(&self) -> Option<char> {
        self.unicodes.first().copied()
    }

    fn set_unicode(&mut self, unicode: Option<char>) {
        self.unicodes = unicode.into_iter().collect();
    }

    fn set_note(&mut self, note: Option<String>) {
        self.note = note;
    }

    fn set_width(&mut self, width: f64) {
        self.width = width;
    }

    fn auto_unicodes(&mut self) {
        self.unicodes = char_for_glyph_name(self.name().as_str())
            .into_iter()
            .collect();
    }

    fn point_pen(&mut self) -> Box<dyn PointPen + '_> {
        Box::new(GlyphPointPen::new(self))
    }

    fn contour_bounds(&self) -> Vec<Option<Rect>> {
        self.contours.iter().map(|c| c.bounds()).collect()
    }

    fn remove_contour(&mut self, index: usize) {
        if index < self.contours.len() {
            self.contours.remove(index);
        } else {
            warn!(
                "{}: no contour {index} to remove, it has {}",
                self.name(),
                self.contours.len()
            );
        }
    }
}

/// An in-memory layer, glyphs kept in insertion order.
#[derive(Debug, Clone, Default)]
pub struct GlyphLayer {
    name: String,
    glyphs: IndexMap<GlyphName, Glyph>,
}

impl GlyphLayer {
    pub fn new(name: impl Into<String>) -> Self {
        GlyphLayer {
            name: name.into(),
            glyphs: IndexMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add a glyph, replacing any glyph of the same name.
    pub fn insert(&mut self, glyph: Glyph) -> Option<Glyph> {
        self.glyphs.insert(glyph.name().clone(), glyph)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Glyph> {
        self.glyphs.values()
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Bounds of `name`, skipping components whose base is already on
    /// `path`, the chain of glyphs currently being measured.
    fn bounds_along<'a>(&'a self, name: &str, path: &mut IndexSet<&'a str>) -> Option<Rect> {
        let glyph = self.glyphs.get(name)?;
        if !path.insert(glyph.name().as_str()) {
            warn!("{}: '{name}' is its own component, via {path:?}", self.name);
            return None;
        }
        let mut bounds = glyph.own_bounds();
        for component in glyph.components.iter() {
            let Some(bbox) = self.bounds_along(component.base.as_str(), path) else {
                continue;
            };
            let bbox = component.transform.transform_rect_bbox(bbox);
            bounds = Some(bounds.map_or(bbox, |acc| acc.union(bbox)));
        }
        path.pop();
        bounds
    }
}

impl Layer for GlyphLayer {
    type Glyph = Glyph;

    fn glyph(&self, name: &str) -> Option<&Glyph> {
        self.glyphs.get(name)
    }

    fn glyph_mut(&mut self, name: &GlyphName) -> &mut Glyph {
        self.glyphs
            .entry(name.clone())
            .or_insert_with(|| Glyph::new(name.clone()))
    }

    fn glyph_names(&self) -> Vec<GlyphName> {
        self.glyphs.keys().cloned().collect()
    }

    fn glyph_bounds(&self, name: &str) -> Option<Rect> {
        self.bounds_along(name, &mut IndexSet::new())
    }
}

impl FromIterator<Glyph> for GlyphLayer {
    fn from_iter<T: IntoIterator<Item = Glyph>>(iter: T) -> Self {
        let mut layer = GlyphLayer::new("public.default");
        for glyph in iter {
            layer.insert(glyph);
        }
        layer
    }
}
