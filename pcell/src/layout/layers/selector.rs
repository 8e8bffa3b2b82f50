//! The `Selector` type for PDK layer selection.

use serde::Serialize;

/// An enumeration for selecting layers in a PDK.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize)]
pub enum Selector<'a> {
    /// The n'th metal layer, counting from 1.
    Metal(usize),
    /// The via layer below metal `N + 1`.
    ///
    /// `Via(0)` is the contact layer below metal 1.
    Via(usize),
    /// The layer with the given name.
    Name(&'a str),
}
