use anyhow::Result;
use fluent_config::FluentConfig;
use fluent_geom::{BorderSides, BorderStyle, Color, Shape};
use fluent_view::{Decoration, Mask};

use super::{Scene, accent, background, tile};
use crate::canvas::Canvas;

pub struct BordersScene;

fn variants() -> Vec<(BorderStyle, BorderSides, Option<Shape>)> {
    let dash = BorderStyle::Dash { dash: 6.0, gap: 4.0 };
    vec![
        (BorderStyle::Solid, BorderSides::ALL, None),
        (BorderStyle::Solid, BorderSides::TOP | BorderSides::BOTTOM, None),
        (dash, BorderSides::ALL, None),
        (dash, BorderSides::LEFT | BorderSides::RIGHT, None),
        (BorderStyle::Solid, BorderSides::ALL, Some(Shape::Circle)),
        (BorderStyle::Solid, BorderSides::ALL, Some(Shape::Triangle)),
        (BorderStyle::None, BorderSides::RIGHT, None),
        (BorderStyle::Solid, BorderSides::empty(), None),
    ]
}

impl Scene for BordersScene {
    fn name(&self) -> &'static str {
        "borders"
    }

    fn tiles(&self, _config: &FluentConfig) -> usize {
        variants().len()
    }

    fn paint(&self, canvas: &mut Canvas, config: &FluentConfig) -> Result<()> {
        canvas.clear(background());
        let width = config.border.width.max(1.0) * 4.0;
        let color = Color::grey80();
        for (i, (style, sides, mask)) in variants().into_iter().enumerate() {
            let mut view = Decoration::new(tile(i, config));
            if let Some(shape) = mask {
                view.mask(Mask::Shape(shape), &Mask::None);
            }
            view.border(style, Some(color), width, sides);
            canvas.draw_decoration(&view, accent().lighten(0.4));
        }
        Ok(())
    }
}
