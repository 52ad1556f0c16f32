use std::path::Path;

use kurbo::Affine;
use log::debug;
use wrightir::{Component, Contour, ContourPoint, Glyph, GlyphLayer, PointType};

use crate::error::Error;

fn to_ir_point_type(typ: &norad::PointType) -> PointType {
    match typ {
        norad::PointType::Move => PointType::Move,
        norad::PointType::Line => PointType::Line,
        norad::PointType::OffCurve => PointType::OffCurve,
        norad::PointType::QCurve => PointType::QCurve,
        norad::PointType::Curve => PointType::Curve,
    }
}

fn to_ir_contour_point(point: &norad::ContourPoint) -> ContourPoint {
    ContourPoint {
        x: point.x,
        y: point.y,
        typ: to_ir_point_type(&point.typ),
        smooth: point.smooth,
        name: point.name.as_ref().map(|name| name.to_string()),
    }
}

fn to_ir_contour(contour: &norad::Contour) -> Contour {
    Contour::new(contour.points.iter().map(to_ir_contour_point).collect())
}

fn to_ir_component(component: &norad::Component) -> Component {
    let t = &component.transform;
    Component {
        base: component.base.as_str().into(),
        transform: Affine::new([
            t.x_scale,
            t.xy_scale,
            t.yx_scale,
            t.y_scale,
            t.x_offset,
            t.y_offset,
        ]),
    }
}

pub fn to_ir_glyph(glyph: &norad::Glyph) -> Glyph {
    let mut ir_glyph = Glyph::new(glyph.name().as_str());
    ir_glyph.width = glyph.width;
    ir_glyph.unicodes = glyph.codepoints.iter().collect();
    ir_glyph.note = glyph.note.clone();
    ir_glyph.contours = glyph.contours.iter().map(to_ir_contour).collect();
    ir_glyph.components = glyph.components.iter().map(to_ir_component).collect();
    ir_glyph
}

pub fn to_ir_layer(layer: &norad::Layer) -> GlyphLayer {
    let mut ir_layer = GlyphLayer::new(layer.name().as_str());
    for glyph in layer.iter() {
        ir_layer.insert(to_ir_glyph(glyph));
    }
    debug!("loaded {} glyphs from layer '{}'", ir_layer.len(), layer.name());
    ir_layer
}

/// Load the default layer of the UFO at `path`.
pub fn load_default_layer(path: &Path) -> Result<GlyphLayer, Error> {
    let font = norad::Font::load(path).map_err(|source| Error::FontLoad {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(to_ir_layer(font.default_layer()))
}
