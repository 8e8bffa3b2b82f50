use std::any::Any;

use crate::layout::layers::Layers;
use crate::units::SiPrefix;

/// Units used for lengths in a PDK.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Units {
    pub(crate) layout: SiPrefix,
}

impl Units {
    pub fn new(layout: SiPrefix) -> Self {
        Self { layout }
    }

    #[inline]
    pub fn layout(&self) -> SiPrefix {
        self.layout
    }
}

pub trait Pdk: Any {
    fn name(&self) -> &'static str;

    fn process(&self) -> &'static str;

    fn lengths(&self) -> Units;

    fn layers(&self) -> Layers;

    /// The grid on which all layout geometry must lie.
    fn layout_grid(&self) -> i64;

    /// Allows components to reach PDK-specific data.
    fn as_any(&self) -> &dyn Any;
}
