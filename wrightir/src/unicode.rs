//! Guessing a glyph's code point from its name.
//!
//! Names are looked up in the Adobe Glyph List, which also understands
//! `uniXXXX` and `uXXXX`–`uXXXXXX`. Ligatures (names with `_`) and
//! alternates (names with a `.` suffix) get no code point: they share their
//! characters with the glyphs they are made of.

use fontdrasil::agl::glyph_name_to_unicode;

/// The single code point `name` stands for, if any.
pub fn char_for_glyph_name(name: &str) -> Option<char> {
    if name.contains(['.', '_']) {
        return None;
    }
    let uv = glyph_name_to_unicode(name);
    let mut chars = uv.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}
