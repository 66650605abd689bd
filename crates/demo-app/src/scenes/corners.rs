use anyhow::Result;
use fluent_config::FluentConfig;
use fluent_geom::{BorderSides, BorderStyle, CornerSides};
use fluent_view::Decoration;

use super::{Scene, accent, background, tile};
use crate::canvas::Canvas;

pub struct CornersScene;

const SIDES: [CornerSides; 6] = [
    CornerSides::ALL,
    CornerSides::TOP_LEFT,
    CornerSides::TOP_LEFT.union(CornerSides::TOP_RIGHT),
    CornerSides::BOTTOM_LEFT.union(CornerSides::BOTTOM_RIGHT),
    CornerSides::TOP_LEFT.union(CornerSides::BOTTOM_RIGHT),
    CornerSides::TOP_RIGHT.union(CornerSides::BOTTOM_LEFT),
];

impl Scene for CornersScene {
    fn name(&self) -> &'static str {
        "corners"
    }

    fn tiles(&self, _config: &FluentConfig) -> usize {
        SIDES.len()
    }

    fn paint(&self, canvas: &mut Canvas, config: &FluentConfig) -> Result<()> {
        canvas.clear(background());
        // the configured radius is sized for small controls
        let radius = config.corner.radius * 12.0;
        for (i, sides) in SIDES.into_iter().enumerate() {
            let mut view = Decoration::new(tile(i, config));
            view.corner(radius, sides).border(
                BorderStyle::Solid,
                Some(config.border.color().darken(0.3)),
                config.border.width * 2.0,
                BorderSides::ALL,
            );
            // alternate light and dark washes over the accent fill
            view.fill(accent(), 1.0);
            if i % 2 == 0 {
                view.tint(0.25, f32::NAN, None, 0.0);
            } else {
                view.tint(f32::NAN, 0.2, Some(background()), 0.15);
            }
            canvas.draw_decoration(&view, accent());
        }
        Ok(())
    }
}
