//! Resolve glyph construction recipes and build them in bulk.
//!
//! A catalog of `name = formula` recipes is parsed per layer, since formulas
//! may mention layer-dependent variables such as overshoots. Recipes are
//! looked up by glyph name, edited as copies, reconciled into a plan for
//! every target layer, then handed to an external [`compile::RecipeCompiler`]
//! one glyph at a time.

#[cfg(feature = "cli")]
mod args;
pub mod build;
pub mod catalog;
pub mod compile;
#[cfg(feature = "cli")]
mod config;
mod error;
pub mod library;
pub mod recipe;
pub mod reconcile;
pub mod resolve;
pub mod review;
pub mod splitter;
pub mod transform;
pub mod variables;

#[cfg(test)]
mod test_util;

#[cfg(feature = "cli")]
pub use args::{Args, Command};
#[cfg(feature = "cli")]
pub use config::Config;
pub use error::Error;

pub use build::{build_glyph, execute_plan, BuildReport, FailurePolicy};
pub use catalog::Catalog;
pub use library::{RecipeLibrary, RecipeLoader};
pub use recipe::Recipe;
pub use reconcile::{build_plan, BuildPlan};
pub use resolve::{resolve, resolve_for_editing};
