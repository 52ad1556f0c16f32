//! Command line arguments

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::build::FailurePolicy;

/// Which glyphs can we construct for you today?
#[derive(Serialize, Deserialize, Parser, Debug, Clone, PartialEq)]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Read recipes from this file instead of the bundled catalog
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Round capital whose overshoot is $overshootUpper
    #[arg(long, global = true)]
    #[clap(default_value = "O")]
    pub upper_reference: String,

    /// Round lowercase whose overshoot is $overshootLower
    #[arg(long, global = true)]
    #[clap(default_value = "o")]
    pub lower_reference: String,

    /// Whether recipes built in bulk erase the glyph first
    #[arg(long, global = true, action = ArgAction::Set)]
    #[clap(default_value = "true")]
    pub batch_clear: bool,

    /// Whether a recipe resolved for a single glyph erases it first
    #[arg(long, global = true, action = ArgAction::Set)]
    #[clap(default_value = "false")]
    pub glyph_clear: bool,

    /// What a batch does when one glyph fails to build
    #[arg(long, global = true, value_enum)]
    #[clap(default_value_t = FailurePolicy::Abort)]
    pub on_failure: FailurePolicy,

    /// Print the effective configuration before doing anything else
    #[arg(long, global = true)]
    pub dump_config: bool,
}

#[derive(Serialize, Deserialize, Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Print the recipes offered for a font, as YAML
    List {
        /// A ufo
        #[arg(short, long)]
        font: PathBuf,

        /// Also offer glyphs the font already draws
        #[arg(long)]
        show_existing: bool,
    },
    /// Print the recipe each glyph name resolves to
    Resolve {
        /// A ufo
        #[arg(short, long)]
        font: PathBuf,

        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Print what a batch build would do to each font
    Plan {
        /// One or more ufos; the first supplies the rows to select from
        #[arg(short, long, required = true)]
        font: Vec<PathBuf>,

        /// Glyphs to build; every offered row if omitted
        #[arg(short, long)]
        select: Vec<String>,

        /// YAML list of edited recipes to apply to every font
        #[arg(short, long)]
        edits: Option<PathBuf>,

        /// Also offer glyphs the first font already draws
        #[arg(long)]
        show_existing: bool,
    },
}
