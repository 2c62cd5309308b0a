//! Default dataset styling.
//!
//! Used only when a dataset has no explicit color entry; every function here is
//! a pure function of its inputs.

mod color;
mod palette;

pub use color::Color;
pub use palette::{BASE_PALETTE, StyleFamily, assign_style, palette_color};
