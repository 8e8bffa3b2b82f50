use std::path::Path;
use std::sync::Arc;

use itertools::Itertools;

use crate::component::Component;
use crate::error::{with_err_context, ErrorContext, ErrorSource, Result};
use crate::io::create_dir_all;
use crate::layout::cell::Cell;
use crate::layout::context::LayoutCtx;
use crate::layout::layers::Layers;
use crate::layout::validation::validate_cell;
use crate::log::{self, Log};
use crate::pdk::Pdk;

/// The global context for generating cells with one PDK.
///
/// Cheap to clone; the PDK and its layer table are shared.
#[derive(Clone)]
pub struct PcellCtx {
    pdk: Arc<dyn Pdk>,
    layers: Arc<Layers>,
}

impl PcellCtx {
    pub fn new<T>(pdk: T) -> Self
    where
        T: Pdk + 'static,
    {
        let layers = Arc::new(pdk.layers());
        Self {
            pdk: Arc::new(pdk),
            layers,
        }
    }

    #[inline]
    pub fn pdk(&self) -> Arc<dyn Pdk> {
        self.pdk.clone()
    }

    #[inline]
    pub fn layers(&self) -> &Layers {
        &self.layers
    }

    fn init_component<T>(&self, params: &T::Params) -> Result<T>
    where
        T: Component,
    {
        let component = with_err_context(T::new(params, self), || ErrorContext::InitComponent {
            type_name: std::any::type_name::<T>().into(),
        })?;
        Ok(component)
    }

    /// Generates the layout of component `T` with parameters `params`.
    pub fn generate_layout<T>(&self, params: &T::Params) -> Result<Arc<Cell>>
    where
        T: Component,
    {
        let component = self.init_component::<T>(params)?;
        let name = component.name();
        let mut ctx = LayoutCtx::new(self.clone(), Cell::new(name.clone()));

        log::info!(
            "generating layout of {} ({})",
            name,
            std::any::type_name::<T>()
        );
        with_err_context(component.layout(&mut ctx), || ErrorContext::GenComponent {
            name: name.clone(),
            type_name: std::any::type_name::<T>().into(),
        })?;

        let cell = ctx.finish();
        let validation = validate_cell(&cell, self.layers(), self.pdk.layout_grid());
        validation.log();
        if validation.has_errors() {
            return Err(ErrorSource::InvalidLayout(validation.first_error()).into());
        }
        cell.log();
        for (layer, count) in self.layer_report(&cell) {
            log::debug!("  {layer}: {count}");
        }

        Ok(Arc::new(cell))
    }

    /// Per-layer element counts of `cell`, as `name/purpose` strings in layer table order.
    pub fn layer_report(&self, cell: &Cell) -> Vec<(String, usize)> {
        cell.layer_counts()
            .into_iter()
            .sorted_by_key(|(spec, _)| (self.layers.position(spec.layer()), spec.purpose().clone()))
            .map(|(spec, count)| (self.layers.describe(&spec), count))
            .collect()
    }

    /// Generates component `T` and writes it to a GDS file at `path`.
    ///
    /// Parent directories are created as needed.
    pub fn write_layout<T>(&self, params: &T::Params, path: impl AsRef<Path>) -> Result<Arc<Cell>>
    where
        T: Component,
    {
        let path = path.as_ref();

        let inner = || -> Result<Arc<Cell>> {
            let cell = self.generate_layout::<T>(params)?;
            if let Some(parent) = path.parent() {
                create_dir_all(parent)?;
            }
            self.to_gds(&cell, path)?;
            Ok(cell)
        };

        with_err_context(inner(), || {
            ErrorContext::Task(arcstr::format!("writing layout to file {:?}", path))
        })
    }
}

impl Log for Cell {
    fn log(&self) {
        log::info!(
            "cell {} has {} elements and {} annotations",
            self.name(),
            self.len(),
            self.annotations().count()
        );
    }
}
