//! Building glyphs from recipes.

use log::{debug, info, trace, warn};
use serde::{Deserialize, Serialize};
use wrightir::{GlyphEditor, GlyphName, Layer};

use crate::{
    compile::{compiler_input, BuiltGlyph, RecipeCompiler},
    recipe::Recipe,
    reconcile::BuildPlan,
    transform::PostBuildTransform,
    Error,
};

/// Title of the undo step each build records.
pub const UNDO_TITLE: &str = "glyphwright";

/// What a batch does when a glyph fails to build.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Stop at the first failure.
    #[default]
    Abort,
    /// Note the failure and carry on with the next glyph.
    Continue,
}

#[derive(Debug)]
pub struct BuildFailure {
    pub target: usize,
    pub glyph: GlyphName,
    pub error: Error,
}

/// The outcome of [`execute_plan`].
#[derive(Debug, Default)]
pub struct BuildReport {
    /// `(target index, glyph)` for every glyph built, in build order.
    pub built: Vec<(usize, GlyphName)>,
    pub failed: Vec<BuildFailure>,
}

impl BuildReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Build `glyph_name` in `layer` from `recipe`.
///
/// The glyph is created if the layer lacks it. Everything the build does is
/// one undo step, closed even when the build fails part way; whatever was
/// done before the failure stays done.
pub fn build_glyph<L, C>(
    layer: &mut L,
    glyph_name: &GlyphName,
    recipe: &Recipe,
    compiler: &C,
) -> Result<(), Error>
where
    L: Layer,
    C: RecipeCompiler<L> + ?Sized,
{
    layer.glyph_mut(glyph_name).prepare_undo(UNDO_TITLE);
    let result = build_in_scope(layer, glyph_name, recipe, compiler);
    layer.glyph_mut(glyph_name).perform_undo();
    result
}

fn build_in_scope<L, C>(
    layer: &mut L,
    glyph_name: &GlyphName,
    recipe: &Recipe,
    compiler: &C,
) -> Result<(), Error>
where
    L: Layer,
    C: RecipeCompiler<L> + ?Sized,
{
    let (formula, transform) = recipe.formula_and_transform();
    if recipe.clear {
        layer.glyph_mut(glyph_name).clear();
    }

    let input = compiler_input(formula, recipe.decompose);
    trace!("{glyph_name}: compiling '{input}'");
    let built = compiler
        .compile(&input, &*layer)
        .map_err(|source| Error::Compile {
            glyph: glyph_name.clone(),
            source,
        })?;

    let glyph = layer.glyph_mut(glyph_name);
    glyph.set_unicode(built.unicode());
    glyph.set_note(built.note().map(str::to_string));
    glyph.set_width(built.width());
    if built.unicode().is_none() {
        glyph.auto_unicodes();
    }
    built.draw_points(&mut *glyph.point_pen());

    if let Some(name) = transform {
        PostBuildTransform::lookup(glyph_name, name)?.apply(glyph);
    }
    Ok(())
}

/// Build every plan into the target at the same index.
///
/// Targets are processed in order, and within a target the glyphs in plan
/// order; nothing runs concurrently.
pub fn execute_plan<L, C>(
    plan: &BuildPlan,
    targets: &mut [L],
    compiler: &C,
    policy: FailurePolicy,
) -> Result<BuildReport, Error>
where
    L: Layer,
    C: RecipeCompiler<L> + ?Sized,
{
    if plan.targets() != targets.len() {
        return Err(Error::TargetMismatch {
            plans: plan.targets(),
            targets: targets.len(),
        });
    }
    let mut report = BuildReport::default();
    for (idx, (target_plan, layer)) in plan.iter().zip(targets.iter_mut()).enumerate() {
        debug!("target {idx}: {} glyph(s) to build", target_plan.len());
        for (name, recipe) in target_plan.iter() {
            info!("Building {name}...");
            match build_glyph(layer, name, recipe, compiler) {
                Ok(()) => report.built.push((idx, name.clone())),
                Err(error) if policy == FailurePolicy::Continue => {
                    warn!("target {idx}: failed to build {name}: {error}");
                    report.failed.push(BuildFailure {
                        target: idx,
                        glyph: name.clone(),
                        error,
                    });
                }
                Err(error) => return Err(error),
            }
        }
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;
    use pretty_assertions::assert_eq;
    use wrightir::{test_util::rect_contour, Glyph, GlyphLayer};

    use super::*;
    use crate::{reconcile::TargetPlan, test_util::SideBySideCompiler};

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn glyph(name: &str, width: f64, contours: &[(f64, f64)]) -> Glyph {
        let mut glyph = Glyph::new(name);
        glyph.width = width;
        glyph.contours = contours
            .iter()
            .map(|(y0, y1)| rect_contour(0.0, *y0, 100.0, *y1))
            .collect();
        glyph
    }

    /// `i` has a stem and a dot, `n` one stem, `cedilla` a hook and a ring.
    fn layer() -> GlyphLayer {
        [
            glyph("i", 200.0, &[(0.0, 500.0), (600.0, 700.0)]),
            glyph("n", 500.0, &[(0.0, 500.0)]),
            glyph("cedilla", 300.0, &[(-50.0, 0.0), (-200.0, -120.0)]),
        ]
        .into_iter()
        .collect()
    }

    fn built<'a>(layer: &'a GlyphLayer, name: &str) -> &'a Glyph {
        layer.glyph(name).unwrap()
    }

    fn y_extents(glyph: &Glyph) -> Vec<(f64, f64)> {
        glyph
            .contours
            .iter()
            .filter_map(|c| c.bounds())
            .map(|b| (b.y0, b.y1))
            .collect()
    }

    #[test]
    fn decomposed_build() {
        init_logging();
        let mut layer = layer();
        let compiler = SideBySideCompiler::default();
        let recipe = Recipe::new("nn", "n + n").with_decompose(true);
        build_glyph(&mut layer, &"nn".into(), &recipe, &compiler).unwrap();

        assert_eq!(vec!["*null = n + n".to_string()], compiler.seen());
        let nn = built(&layer, "nn");
        assert_eq!(1000.0, nn.width);
        assert_eq!(2, nn.contours.len());
        assert!(nn.components.is_empty());
    }

    #[test]
    fn component_build() {
        let mut layer = layer();
        let compiler = SideBySideCompiler::default();
        let recipe = Recipe::new("in", "i + n");
        build_glyph(&mut layer, &"in".into(), &recipe, &compiler).unwrap();

        assert_eq!(vec!["null = i + n".to_string()], compiler.seen());
        let glyph = built(&layer, "in");
        assert_eq!(
            vec!["i", "n"],
            glyph
                .components
                .iter()
                .map(|c| c.base.as_str())
                .collect::<Vec<_>>()
        );
        assert_eq!(700.0, glyph.width);
    }

    #[test]
    fn copies_unicode_and_note() {
        let mut layer = layer();
        let compiler = SideBySideCompiler {
            unicode: Some('\u{131}'),
            note: Some("from i".to_string()),
            ..Default::default()
        };
        build_glyph(&mut layer, &"dotlessi".into(), &Recipe::new("dotlessi", "i"), &compiler)
            .unwrap();
        let glyph = built(&layer, "dotlessi");
        assert_eq!(vec!['\u{131}'], glyph.unicodes);
        assert_eq!(Some("from i"), glyph.note.as_deref());
    }

    #[test]
    fn missing_unicode_is_derived_from_the_name() {
        let mut layer = layer();
        let compiler = SideBySideCompiler::default();
        build_glyph(&mut layer, &"N".into(), &Recipe::new("N", "n"), &compiler).unwrap();
        build_glyph(&mut layer, &"n.sc".into(), &Recipe::new("n", "n"), &compiler).unwrap();
        assert_eq!(vec!['N'], built(&layer, "N").unicodes);
        assert!(built(&layer, "n.sc").unicodes.is_empty());
    }

    #[test]
    fn accented_names_get_their_code_point() {
        let mut layer = layer();
        let compiler = SideBySideCompiler::default();
        let recipe = Recipe::new("Dcroat", "n").with_decompose(true);
        build_glyph(&mut layer, &"Dcroat".into(), &recipe, &compiler).unwrap();
        build_glyph(&mut layer, &"eacute".into(), &Recipe::new("eacute", "n"), &compiler)
            .unwrap();
        assert_eq!(vec!['\u{0110}'], built(&layer, "Dcroat").unicodes);
        assert_eq!(vec!['\u{00E9}'], built(&layer, "eacute").unicodes);
    }

    #[test]
    fn clear_decides_whether_old_outlines_stay() {
        let compiler = SideBySideCompiler::default();
        let mut layer = layer();
        layer.insert(glyph("x", 10.0, &[(0.0, 5.0)]));

        let recipe = Recipe::new("x", "n").with_decompose(true).with_clear(false);
        build_glyph(&mut layer, &"x".into(), &recipe, &compiler).unwrap();
        assert_eq!(vec![(0.0, 5.0), (0.0, 500.0)], y_extents(built(&layer, "x")));

        let recipe = recipe.with_clear(true);
        build_glyph(&mut layer, &"x".into(), &recipe, &compiler).unwrap();
        assert_eq!(vec![(0.0, 500.0)], y_extents(built(&layer, "x")));
    }

    #[test]
    fn transform_from_directive() {
        let mut layer = layer();
        let compiler = SideBySideCompiler::default();
        let recipe = Recipe::new("dotlessi", "i # >>> remove-tallest-contour").with_decompose(true);
        build_glyph(&mut layer, &"dotlessi".into(), &recipe, &compiler).unwrap();

        // the directive never reaches the compiler
        assert_eq!(vec!["*null = i".to_string()], compiler.seen());
        assert_eq!(vec![(0.0, 500.0)], y_extents(built(&layer, "dotlessi")));
    }

    #[test]
    fn explicit_transform() {
        let mut layer = layer();
        let compiler = SideBySideCompiler::default();
        let recipe = Recipe::new("hook", "cedilla")
            .with_decompose(true)
            .with_transform("remove-lowest-contour");
        build_glyph(&mut layer, &"hook".into(), &recipe, &compiler).unwrap();
        assert_eq!(vec![(-50.0, 0.0)], y_extents(built(&layer, "hook")));
    }

    #[test]
    fn unknown_transform_fails_after_drawing() {
        let mut layer = layer();
        let compiler = SideBySideCompiler::default();
        let recipe = Recipe::new("dotlessi", "i")
            .with_decompose(true)
            .with_transform("deleteSmallestContour");
        let result = build_glyph(&mut layer, &"dotlessi".into(), &recipe, &compiler);
        assert!(
            matches!(result, Err(Error::UnknownTransform { ref name, .. }) if name == "deleteSmallestContour"),
            "{result:?}"
        );

        let glyph = built(&layer, "dotlessi");
        assert_eq!(200.0, glyph.width);
        assert_eq!(2, glyph.contours.len());
        assert_eq!(vec![UNDO_TITLE], glyph.undo_titles().collect::<Vec<_>>());
    }

    #[test]
    fn compile_failure_keeps_earlier_steps() {
        let mut layer = layer();
        layer.insert(glyph("x", 10.0, &[(0.0, 5.0)]));
        let compiler = SideBySideCompiler::default();
        let result = build_glyph(&mut layer, &"x".into(), &Recipe::new("x", "nope"), &compiler);

        match result {
            Err(Error::Compile { glyph, source }) => {
                assert_eq!("x", glyph.as_str());
                assert_eq!("no glyph 'nope' to place", source.to_string());
            }
            other => panic!("expected a compile error, got {other:?}"),
        }
        let x = layer.glyph_mut(&"x".into());
        assert!(x.contours.is_empty());
        assert_eq!(10.0, x.width);
        // the scope was closed, so the clear can be undone
        assert_eq!(Some(UNDO_TITLE.to_string()), x.undo());
        assert_eq!(vec![(0.0, 5.0)], y_extents(x));
    }

    #[test]
    fn undo_restores_the_glyph() {
        let mut layer = layer();
        layer.insert(glyph("x", 10.0, &[(0.0, 5.0)]));
        let compiler = SideBySideCompiler::default();
        let recipe = Recipe::new("x", "i + n").with_decompose(true);
        build_glyph(&mut layer, &"x".into(), &recipe, &compiler).unwrap();

        let x = layer.glyph_mut(&"x".into());
        assert_eq!(3, x.contours.len());
        assert_eq!(Some(UNDO_TITLE.to_string()), x.undo());
        assert_eq!(10.0, x.width);
        assert_eq!(vec![(0.0, 5.0)], y_extents(x));
        assert_eq!(None, x.undo());
    }

    fn plan(entries: Vec<Vec<Recipe>>) -> BuildPlan {
        BuildPlan::new(
            entries
                .into_iter()
                .map(|recipes| {
                    recipes
                        .into_iter()
                        .map(|r| (r.name.clone(), r))
                        .collect::<TargetPlan>()
                })
                .collect(),
        )
    }

    #[test]
    fn executes_every_target() {
        init_logging();
        let mut targets = vec![layer(), layer()];
        let compiler = SideBySideCompiler::default();
        let plan = plan(vec![
            vec![Recipe::new("nn", "n + n"), Recipe::new("ni", "n + i")],
            vec![Recipe::new("ii", "i + i")],
        ]);

        let report = execute_plan(&plan, &mut targets, &compiler, FailurePolicy::Abort).unwrap();
        assert!(report.is_success());
        assert_eq!(
            vec![(0, "nn"), (0, "ni"), (1, "ii")],
            report
                .built
                .iter()
                .map(|(t, n)| (*t, n.as_str()))
                .collect::<Vec<_>>()
        );
        assert!(targets[0].contains_glyph("ni"));
        assert!(!targets[0].contains_glyph("ii"));
        assert!(targets[1].contains_glyph("ii"));
    }

    #[test]
    fn abort_stops_at_first_failure() {
        let mut targets = vec![layer()];
        let compiler = SideBySideCompiler::default();
        let plan = plan(vec![vec![
            Recipe::new("bad", "missing"),
            Recipe::new("nn", "n + n"),
        ]]);
        let result = execute_plan(&plan, &mut targets, &compiler, FailurePolicy::Abort);
        assert!(matches!(result, Err(Error::Compile { .. })));
        assert!(!targets[0].contains_glyph("nn"));
    }

    #[test]
    fn continue_builds_the_rest() {
        let mut targets = vec![layer(), layer()];
        let compiler = SideBySideCompiler::default();
        let plan = plan(vec![
            vec![Recipe::new("bad", "missing"), Recipe::new("nn", "n + n")],
            vec![Recipe::new("ii", "i + i")],
        ]);
        let report =
            execute_plan(&plan, &mut targets, &compiler, FailurePolicy::Continue).unwrap();
        assert!(!report.is_success());
        assert_eq!(1, report.failed.len());
        assert_eq!((0, "bad"), (report.failed[0].target, report.failed[0].glyph.as_str()));
        assert_eq!(2, report.built.len());
        assert!(targets[0].contains_glyph("nn"));
    }

    #[test]
    fn plan_and_targets_must_line_up() {
        let mut targets = vec![layer()];
        let plan = BuildPlan::new(vec![IndexMap::new(), IndexMap::new()]);
        let result = execute_plan(
            &plan,
            &mut targets,
            &SideBySideCompiler::default(),
            FailurePolicy::Abort,
        );
        assert!(matches!(
            result,
            Err(Error::TargetMismatch {
                plans: 2,
                targets: 1
            })
        ));
    }
}
