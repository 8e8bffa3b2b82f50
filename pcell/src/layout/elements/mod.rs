//! Drawable layout elements built from simple parameters.

pub mod fill;
