//! Finding the recipe for a glyph name.

use indexmap::IndexMap;
use log::debug;
use wrightir::GlyphName;

use crate::{library::RecipeLibrary, recipe::Recipe};

/// The recipe for `glyph_name`, falling back to the recipe for its base name.
///
/// `a.sc` resolves to the `a` recipe if there is no `a.sc` recipe; the
/// fallback is returned as-is and still names `a`. `None` is an ordinary
/// outcome: the caller should offer to define a recipe.
pub fn resolve<'a>(library: &'a RecipeLibrary, glyph_name: &str) -> Option<&'a Recipe> {
    if let Some(recipe) = library.get(glyph_name) {
        return Some(recipe);
    }
    let (base, _suffix) = glyph_name.split_once('.')?;
    let recipe = library.get(base);
    if recipe.is_some() {
        debug!("'{glyph_name}' falls back to the '{base}' recipe");
    }
    recipe
}

/// Resolve several names against one library.
pub fn resolve_many<'a>(
    library: &RecipeLibrary,
    glyph_names: impl IntoIterator<Item = &'a GlyphName>,
) -> IndexMap<GlyphName, Option<Recipe>> {
    glyph_names
        .into_iter()
        .map(|name| (name.clone(), resolve(library, name.as_str()).cloned()))
        .collect()
}

/// Resolve a recipe to edit and build a single glyph.
///
/// The copy's `clear` comes from the caller rather than the library: the
/// single-glyph flow has its own default, distinct from batch building.
pub fn resolve_for_editing(
    library: &RecipeLibrary,
    glyph_name: &str,
    clear: bool,
) -> Option<Recipe> {
    resolve(library, glyph_name).map(|recipe| recipe.clone().with_clear(clear))
}
