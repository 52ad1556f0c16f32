use std::{
    io::Write,
    path::{Path, PathBuf},
};

use clap::Parser;
use indexmap::IndexSet;
use log::{info, warn};
use serde::Serialize;

use glyphwright::{
    build_plan,
    resolve_for_editing,
    review::{read_edits, review_rows},
    Args, Command, Config, Error, Recipe, RecipeLoader,
};
use ufo2wrightir::load_default_layer;
use wrightir::{GlyphLayer, GlyphName};

#[derive(Serialize)]
struct TargetPlanOutput<'a> {
    font: &'a Path,
    recipes: Vec<&'a Recipe>,
}

fn print_yaml(value: &impl Serialize) -> Result<(), Error> {
    print!("{}", serde_yaml::to_string(value)?);
    Ok(())
}

fn list(loader: &RecipeLoader, font: &Path, show_existing: bool) -> Result<(), Error> {
    let layer = load_default_layer(font)?;
    let library = loader.load(&layer)?;
    let rows = review_rows(&library, &layer, show_existing);
    info!("{} of {} recipes offered", rows.len(), library.len());
    print_yaml(&rows.values().collect::<Vec<_>>())
}

fn resolve(
    loader: &RecipeLoader,
    font: &Path,
    names: &[String],
    glyph_clear: bool,
) -> Result<(), Error> {
    let layer = load_default_layer(font)?;
    let library = loader.load(&layer)?;
    for name in names {
        match resolve_for_editing(&library, name, glyph_clear) {
            Some(recipe) => print_yaml(&[recipe])?,
            None => println!("# no recipe for '{name}', define one as '{name} = ...'"),
        }
    }
    Ok(())
}

fn plan(
    loader: &RecipeLoader,
    fonts: &[PathBuf],
    select: &[String],
    edits: Option<&Path>,
    show_existing: bool,
) -> Result<(), Error> {
    let targets = fonts
        .iter()
        .map(|font| load_default_layer(font))
        .collect::<Result<Vec<GlyphLayer>, _>>()?;
    let Some(first) = targets.first() else {
        warn!("no fonts, nothing to plan");
        return Ok(());
    };

    let original = loader.load(first)?;
    let mut rows = review_rows(&original, first, show_existing);
    if let Some(edits) = edits {
        rows.extend(read_edits(edits)?);
    }
    let selection: IndexSet<GlyphName> = if select.is_empty() {
        rows.keys().cloned().collect()
    } else {
        select.iter().map(GlyphName::new).collect()
    };

    let plan = build_plan(&original, &selection, &rows, &targets, loader)?;
    info!(
        "{} glyph build(s) across {} font(s)",
        plan.glyph_count(),
        plan.targets()
    );
    let output: Vec<_> = fonts
        .iter()
        .zip(plan.iter())
        .map(|(font, target_plan)| TargetPlanOutput {
            font,
            recipes: target_plan.values().collect(),
        })
        .collect();
    print_yaml(&output)
}

fn main() -> Result<(), Error> {
    env_logger::builder()
        .format(|buf, record| {
            let ts = buf.timestamp_micros();
            let style = buf.default_level_style(record.level());
            writeln!(
                buf,
                "{}: {:?}: {style}{}{style:#}: {}",
                ts,
                std::thread::current().id(),
                record.level(),
                record.args()
            )
        })
        .init();

    let args = Args::parse();
    let config = Config::new(&args);
    if args.dump_config {
        print_yaml(&config)?;
    }
    let loader = config.loader()?;

    match &args.command {
        Command::List {
            font,
            show_existing,
        } => list(&loader, font, *show_existing),
        Command::Resolve { font, names } => resolve(&loader, font, names, config.glyph_clear),
        Command::Plan {
            font,
            select,
            edits,
            show_existing,
        } => plan(
            &loader,
            font,
            select,
            edits.as_deref(),
            *show_existing,
        ),
    }
}
