//! Contour surgery run after a glyph is built.
//!
//! Some constructions assemble more than they need: `dotlessi` is built from
//! `i` and then loses the dot. The transform a recipe asks for is named in
//! its formula after a `# >>>` directive.

use std::fmt::{self, Display};

use kurbo::Rect;
use log::debug;
use serde::{Deserialize, Serialize};
use wrightir::{GlyphEditor, GlyphName};

use crate::Error;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum PostBuildTransform {
    /// Drop the contour reaching highest, e.g. the dot of an `i`.
    RemoveTallestContour,
    /// Drop the contour reaching lowest, e.g. the ring of a cedilla.
    RemoveLowestContour,
}

impl PostBuildTransform {
    pub const ALL: [PostBuildTransform; 2] = [
        PostBuildTransform::RemoveTallestContour,
        PostBuildTransform::RemoveLowestContour,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PostBuildTransform::RemoveTallestContour => "remove-tallest-contour",
            PostBuildTransform::RemoveLowestContour => "remove-lowest-contour",
        }
    }

    /// The transform called `name`, as requested while building `glyph`.
    pub fn lookup(glyph: &GlyphName, name: &str) -> Result<PostBuildTransform, Error> {
        PostBuildTransform::ALL
            .into_iter()
            .find(|t| t.name() == name)
            .ok_or_else(|| Error::UnknownTransform {
                glyph: glyph.clone(),
                name: name.to_string(),
            })
    }

    /// Apply to `glyph`, returning the index of the contour removed, if any.
    ///
    /// Contours without bounds are never candidates. On a tie the earliest
    /// contour goes.
    pub fn apply<G: GlyphEditor + ?Sized>(&self, glyph: &mut G) -> Option<usize> {
        let bounds = glyph.contour_bounds();
        let victim = match self {
            PostBuildTransform::RemoveTallestContour => pick(&bounds, |b, best| b.y1 > best.y1),
            PostBuildTransform::RemoveLowestContour => pick(&bounds, |b, best| b.y0 < best.y0),
        };
        match victim {
            Some(idx) => {
                debug!("{}: {self} removes contour {idx}", glyph.name());
                glyph.remove_contour(idx);
            }
            None => debug!("{}: {self} found no contour", glyph.name()),
        }
        victim
    }
}

impl Display for PostBuildTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn pick(bounds: &[Option<Rect>], beats: impl Fn(&Rect, &Rect) -> bool) -> Option<usize> {
    let mut best: Option<(usize, Rect)> = None;
    for (idx, rect) in bounds.iter().enumerate() {
        let Some(rect) = rect else {
            continue;
        };
        match best {
            Some((_, current)) if !beats(rect, &current) => (),
            _ => best = Some((idx, *rect)),
        }
    }
    best.map(|(idx, _)| idx)
}
