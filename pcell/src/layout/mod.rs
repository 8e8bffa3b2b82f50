//! APIs for layout generation.

use self::group::Group;

pub mod cell;
pub mod context;
pub mod convert;
pub mod elements;
pub mod error;
pub mod group;
pub mod layers;
pub mod validation;

/// A trait implemented by objects that can be drawn
/// inside a layout cell's context.
pub trait Draw {
    /// Draws the object.
    fn draw(self) -> crate::error::Result<Group>;
}
