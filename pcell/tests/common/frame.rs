use arcstr::ArcStr;
use pcell::component::Component;
use pcell::data::PcellCtx;
use pcell::error::{ErrorSource, Result};
use pcell::layout::cell::TextElement;
use pcell::layout::context::LayoutCtx;
use pcell::layout::elements::fill::FillArray;
use pcell::layout::group::Group;
use pcell::layout::layers::selector::Selector;
use pcell::layout::layers::LayerSpec;
use pcellgeom::orientation::Named;
use pcellgeom::ring::RingBuilder;
use pcellgeom::tile::TileGrid;
use pcellgeom::{Dims, Dir, Point, Rect, Side, Span};
use serde::Serialize;

/// A square Metal1 frame with notched corners and Metal1 fill inside.
pub struct Frame {
    params: FrameParams,
}

#[derive(Debug, Clone, Serialize)]
pub struct FrameParams {
    pub size: i64,
    pub width: i64,
    pub fill: bool,
    pub label: Option<String>,
}

impl Component for Frame {
    type Params = FrameParams;

    fn new(params: &Self::Params, _ctx: &PcellCtx) -> Result<Self> {
        if params.size < 4 * params.width {
            return Err(ErrorSource::InvalidArgs(format!(
                "frame size {} is less than four widths",
                params.size
            ))
            .into());
        }
        Ok(Self {
            params: params.clone(),
        })
    }

    fn name(&self) -> ArcStr {
        arcstr::literal!("frame")
    }

    fn layout(&self, ctx: &mut LayoutCtx) -> Result<()> {
        let m1 = ctx.layers().get(Selector::Metal(1))?;
        let (size, width) = (self.params.size, self.params.width);

        let ring = RingBuilder::new()
            .outer(Rect::from_coords(0, 0, size, size))
            .uniform_width(width)
            .build()?;
        let straight = Span::new(2 * width, size - 2 * width);
        for side in Side::ALL {
            if let Some(rect) = ring.segment(side, straight) {
                ctx.draw_rect(LayerSpec::drawing(m1), rect);
            }
        }

        let mut corner = Group::new();
        corner.add_rect(
            LayerSpec::drawing(m1),
            Rect::from_coords(width, width, 2 * width, 2 * width),
        );
        ctx.draw(corner.clone())?;
        ctx.draw(corner.placed(Point::new(size, size), Named::R180))?;
        ctx.draw(corner.placed(Point::new(size, 0), Named::R90))?;
        ctx.draw(corner.placed(Point::new(0, size), Named::R270))?;

        if self.params.fill {
            let inner = Rect::from_coords(2 * width, 2 * width, size - 2 * width, size - 2 * width);
            let grid = TileGrid::new(inner, Dims::square(width), Dims::square(width), Dir::Horiz);
            ctx.draw(FillArray::new(LayerSpec::filler(m1), grid))?;
        }

        if let Some(label) = &self.params.label {
            ctx.add_annotation(TextElement::new(
                label.as_str(),
                Point::new(size / 2, width / 2),
                LayerSpec::label(m1),
            ));
        }
        Ok(())
    }
}
