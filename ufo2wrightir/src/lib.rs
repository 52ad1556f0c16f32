//! Reading UFO sources into [`wrightir`] layers.

pub mod error;
mod toir;

pub use toir::{load_default_layer, to_ir_glyph, to_ir_layer};
