//! Conversion of layout cells to foreign formats.

pub mod error;
pub mod gds;
