use anyhow::Result;
use fluent_config::FluentConfig;
use fluent_geom::{BorderSides, BorderStyle};
use fluent_view::{Decoration, Mask};

use super::{Scene, accent, background, tile};
use crate::canvas::Canvas;

/// One masked tile per configured shape.
pub struct ShapesScene;

impl Scene for ShapesScene {
    fn name(&self) -> &'static str {
        "shapes"
    }

    fn tiles(&self, config: &FluentConfig) -> usize {
        config.mask.shape_defaults().len()
    }

    fn paint(&self, canvas: &mut Canvas, config: &FluentConfig) -> Result<()> {
        canvas.clear(background());
        for (i, shape) in config.mask.shape_defaults().into_iter().enumerate() {
            log::debug!("shape tile {i}: {}", shape.name());
            let mut view = Decoration::new(tile(i, config));
            view.mask(Mask::Shape(shape), &Mask::None).border(
                BorderStyle::Solid,
                Some(config.border.color()),
                config.border.width,
                BorderSides::ALL,
            );
            canvas.draw_decoration(&view, accent());
        }
        Ok(())
    }
}
