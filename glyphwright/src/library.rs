//! Parsing a catalog into a library of recipes.

use indexmap::IndexMap;
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use wrightir::{GlyphName, Layer};

use crate::{
    catalog::Catalog,
    recipe::{split_decompose_marker, split_directive, Recipe},
    splitter::{ConstructionSplitter, LineSplitter},
    variables::{compute_variables, ReferenceGlyphs, VariableSnapshot},
    Error,
};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ParseOptions {
    /// `clear` for every recipe read from the catalog.
    pub default_clear: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            default_clear: true,
        }
    }
}

/// Recipes by glyph name, built for one layer's variables.
///
/// Never modified after parsing; edits live in copies.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeLibrary {
    recipes: IndexMap<GlyphName, Recipe>,
    variables: VariableSnapshot,
}

impl RecipeLibrary {
    /// Parse `catalog` with `variables` declared ahead of it.
    ///
    /// Statements that name nothing are skipped. When a name appears more
    /// than once the last definition wins, keeping the position of the
    /// first.
    pub fn parse(
        catalog: &Catalog,
        variables: VariableSnapshot,
        splitter: &dyn ConstructionSplitter,
        options: ParseOptions,
    ) -> Result<RecipeLibrary, Error> {
        let mut text = variables.preamble();
        text.push_str(catalog.text());

        let mut recipes = IndexMap::new();
        for statement in splitter.split_statements(&text)? {
            if statement.trim().is_empty() {
                continue;
            }
            let Some((raw_name, raw_formula)) = splitter.split_name(&statement) else {
                debug!("skipping '{statement}', it names no glyph");
                continue;
            };
            let (name, decompose) = split_decompose_marker(raw_name.trim());
            if name.is_empty() {
                debug!("skipping '{statement}', the name is empty");
                continue;
            }
            let (formula, transform) = split_directive(raw_formula);
            let recipe = Recipe {
                name: name.into(),
                formula: formula.to_string(),
                decompose,
                clear: options.default_clear,
                post_build_transform: transform.map(str::to_string),
            };
            trace!("{} = {}", recipe.name, recipe.formula);
            if let Some(prev) = recipes.insert(recipe.name.clone(), recipe) {
                debug!("'{}' is defined again, replacing '{}'", prev.name, prev.formula);
            }
        }
        Ok(RecipeLibrary { recipes, variables })
    }

    pub fn get(&self, name: &str) -> Option<&Recipe> {
        self.recipes.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.recipes.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &GlyphName> {
        self.recipes.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&GlyphName, &Recipe)> {
        self.recipes.iter()
    }

    pub fn variables(&self) -> VariableSnapshot {
        self.variables
    }
}

/// Everything needed to build a fresh library for a layer.
#[derive(Debug, Clone, Default)]
pub struct RecipeLoader {
    pub catalog: Catalog,
    pub references: ReferenceGlyphs,
    pub options: ParseOptions,
    pub splitter: LineSplitter,
}

impl RecipeLoader {
    pub fn new(catalog: Catalog) -> Self {
        RecipeLoader {
            catalog,
            ..Default::default()
        }
    }

    /// Measure `layer` and parse the catalog with its variables.
    pub fn load(&self, layer: &impl Layer) -> Result<RecipeLibrary, Error> {
        let variables = compute_variables(layer, &self.references);
        debug!("variables {variables:?}");
        RecipeLibrary::parse(&self.catalog, variables, &self.splitter, self.options)
    }
}
