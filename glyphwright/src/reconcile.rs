//! Turning a selection and session edits into per-target build plans.
//!
//! The library a session starts from is loaded from the first target only,
//! but variables differ per layer, so every target gets its own freshly
//! loaded library. Only rows the user actually edited are forced onto every
//! target; everything else reflects the target's own values.

use indexmap::{IndexMap, IndexSet};
use log::{debug, info};
use wrightir::{GlyphName, Layer};

use crate::{
    library::{RecipeLibrary, RecipeLoader},
    recipe::Recipe,
    Error,
};

/// Recipes to build in one target, in build order.
pub type TargetPlan = IndexMap<GlyphName, Recipe>;

/// One [`TargetPlan`] per target, in the order the targets were given.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildPlan {
    plans: Vec<TargetPlan>,
}

impl BuildPlan {
    pub fn new(plans: Vec<TargetPlan>) -> Self {
        BuildPlan { plans }
    }

    pub fn for_target(&self, index: usize) -> Option<&TargetPlan> {
        self.plans.get(index)
    }

    pub fn targets(&self) -> usize {
        self.plans.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TargetPlan> {
        self.plans.iter()
    }

    /// Total number of glyph builds across all targets.
    pub fn glyph_count(&self) -> usize {
        self.plans.iter().map(IndexMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.glyph_count() == 0
    }
}

/// Selected rows whose value differs from the original library.
///
/// A selected row the original doesn't know at all counts as an edit.
pub fn modified_recipes(
    original: &RecipeLibrary,
    selection: &IndexSet<GlyphName>,
    edited_rows: &IndexMap<GlyphName, Recipe>,
) -> IndexMap<GlyphName, Recipe> {
    edited_rows
        .iter()
        .filter(|(name, _)| selection.contains(*name))
        .filter(|(name, row)| original.get(name.as_str()) != Some(*row))
        .map(|(name, row)| (name.clone(), row.clone()))
        .collect()
}

/// Work out what to build in each of `targets`.
///
/// `original` is the library the rows were first shown from, `edited_rows`
/// the rows as they are now. For every target a fresh library is loaded;
/// the selected entries come from it, then every edited row replaces or
/// extends them.
pub fn build_plan<L: Layer>(
    original: &RecipeLibrary,
    selection: &IndexSet<GlyphName>,
    edited_rows: &IndexMap<GlyphName, Recipe>,
    targets: &[L],
    loader: &RecipeLoader,
) -> Result<BuildPlan, Error> {
    if selection.is_empty() {
        debug!("nothing selected, nothing to build");
        return Ok(BuildPlan::new(vec![TargetPlan::new(); targets.len()]));
    }
    let selected: IndexSet<&GlyphName> = edited_rows
        .keys()
        .filter(|name| selection.contains(*name))
        .collect();
    let modified = modified_recipes(original, selection, edited_rows);
    if !modified.is_empty() {
        info!(
            "{} edited recipe(s) apply to every target: {:?}",
            modified.len(),
            modified.keys().collect::<Vec<_>>()
        );
    }

    let mut plans = Vec::with_capacity(targets.len());
    for (idx, target) in targets.iter().enumerate() {
        let library = loader.load(target)?;
        let mut plan: TargetPlan = library
            .iter()
            .filter(|(name, _)| selected.contains(name))
            .map(|(name, recipe)| (name.clone(), recipe.clone()))
            .collect();
        for (name, recipe) in modified.iter() {
            plan.insert(name.clone(), recipe.clone());
        }
        for name in selected.iter().filter(|name| !plan.contains_key(**name)) {
            debug!("target {idx} has no recipe for '{name}'");
        }
        plans.push(plan);
    }
    Ok(BuildPlan::new(plans))
}
