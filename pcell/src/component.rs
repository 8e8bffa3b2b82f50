//! APIs for creating parametric components.

use std::any::Any;

use arcstr::ArcStr;
use serde::Serialize;

use crate::data::PcellCtx;
use crate::error::Result;
use crate::layout::context::LayoutCtx;

/// The trait that all parametric cells implement.
pub trait Component: Any {
    /// The parameter type.
    type Params: Serialize;

    /// Creates a new instance of this component with the given parameters.
    ///
    /// Parameter validation happens here, before any geometry is drawn.
    fn new(params: &Self::Params, ctx: &PcellCtx) -> Result<Self>
    where
        Self: Sized;

    /// Returns the desired name of this component.
    ///
    /// The name becomes the GDS structure name, so it should be a valid
    /// GDSII identifier.
    fn name(&self) -> ArcStr {
        arcstr::literal!("unnamed")
    }

    /// Creates a layout view of this component.
    fn layout(&self, ctx: &mut LayoutCtx) -> Result<()>;
}
