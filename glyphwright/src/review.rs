//! The rows a caller shows for picking what to build.

use std::{fs, path::Path};

use indexmap::IndexMap;
use log::debug;
use wrightir::{GlyphName, Layer};

use crate::{library::RecipeLibrary, recipe::Recipe, Error};

/// Copies of the library's recipes, sorted by name, ready to be edited.
///
/// Unless `show_existing`, glyphs the layer already draws (any contour or
/// component) are left out.
pub fn review_rows(
    library: &RecipeLibrary,
    layer: &impl Layer,
    show_existing: bool,
) -> IndexMap<GlyphName, Recipe> {
    let mut rows: IndexMap<_, _> = library
        .iter()
        .filter(|(name, _)| show_existing || !layer.has_outlines(name.as_str()))
        .map(|(name, recipe)| (name.clone(), recipe.clone()))
        .collect();
    rows.sort_keys();
    rows
}

/// Rows edited outside the session: a YAML sequence of recipes.
///
/// A name listed twice keeps its last row.
pub fn read_edits(path: &Path) -> Result<IndexMap<GlyphName, Recipe>, Error> {
    let yml = fs::read_to_string(path).map_err(|source| Error::FileIo {
        path: path.to_path_buf(),
        source,
    })?;
    let rows: Vec<Recipe> = serde_yaml::from_str(&yml)?;
    debug!("{} edited row(s) in {path:?}", rows.len());
    Ok(rows.into_iter().map(|r| (r.name.clone(), r)).collect())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use wrightir::{test_util::rect_contour, Glyph, GlyphLayer};

    use super::*;
    use crate::{
        catalog::Catalog, library::ParseOptions, splitter::LineSplitter,
        variables::VariableSnapshot,
    };

    fn library() -> RecipeLibrary {
        RecipeLibrary::parse(
            &Catalog::new("*o = n ^ n\n*n = o ^ o\n*b = h + o ^ n, o\n*h = n ^ n"),
            VariableSnapshot::default(),
            &LineSplitter,
            ParseOptions::default(),
        )
        .unwrap()
    }

    fn layer() -> GlyphLayer {
        let mut n = Glyph::new("n");
        n.contours.push(rect_contour(0.0, 0.0, 100.0, 500.0));
        // present but empty, still offered
        let h = Glyph::new("h");
        [n, h].into_iter().collect()
    }

    #[test]
    fn hides_drawn_glyphs_and_sorts() {
        let rows = review_rows(&library(), &layer(), false);
        assert_eq!(
            vec!["b", "h", "o"],
            rows.keys().map(|n| n.as_str()).collect::<Vec<_>>()
        );
    }

    #[test]
    fn show_existing_keeps_everything() {
        let rows = review_rows(&library(), &layer(), true);
        assert_eq!(
            vec!["b", "h", "n", "o"],
            rows.keys().map(|n| n.as_str()).collect::<Vec<_>>()
        );
    }

    #[test]
    fn edits_from_yaml() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("edits.yml");
        std::fs::write(
            &path,
            "- name: o\n  formula: c ^ c\n- name: dotlessi\n  formula: i\n  decompose: true\n  post_build_transform: remove-tallest-contour\n",
        )
        .unwrap();
        let edits = read_edits(&path).unwrap();
        assert_eq!(
            vec![
                Recipe::new("o", "c ^ c"),
                Recipe::new("dotlessi", "i")
                    .with_decompose(true)
                    .with_transform("remove-tallest-contour"),
            ],
            edits.into_values().collect::<Vec<_>>()
        );
    }

    #[test]
    fn malformed_edits() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("edits.yml");
        std::fs::write(&path, "- formula: no name\n").unwrap();
        assert!(matches!(read_edits(&path), Err(Error::Yaml(..))));
        assert!(matches!(
            read_edits(&temp_dir.path().join("missing.yml")),
            Err(Error::FileIo { .. })
        ));
    }

    #[test]
    fn rows_are_copies() {
        let library = library();
        let mut rows = review_rows(&library, &layer(), true);
        rows["o"].formula = "edited".to_string();
        assert_eq!("n ^ n", library.get("o").unwrap().formula);
    }
}
