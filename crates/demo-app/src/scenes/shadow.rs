use anyhow::Result;
use fluent_config::FluentConfig;
use fluent_geom::{Color, CornerSides, Path, Point, Shape, WaveDirection};
use fluent_view::{Decoration, Mask};

use super::{Scene, accent, background, tile};
use crate::canvas::Canvas;

/// View shadows next to mask-shaped shadows.
pub struct ShadowScene;

fn diamond() -> Mask {
    Mask::custom(|size| {
        let mut path = Path::new();
        path.move_to(Point::new(size.w / 2.0, 0.0))
            .line_to(Point::new(size.w, size.h / 2.0))
            .line_to(Point::new(size.w / 2.0, size.h))
            .line_to(Point::new(0.0, size.h / 2.0))
            .close();
        path
    })
}

impl Scene for ShadowScene {
    fn name(&self) -> &'static str {
        "shadows"
    }

    fn tiles(&self, _config: &FluentConfig) -> usize {
        5
    }

    fn paint(&self, canvas: &mut Canvas, config: &FluentConfig) -> Result<()> {
        canvas.clear(background());
        let shade = Some(Color::grey80());
        let offset = Point::new(0.0, 6.0);

        let mut plain = Decoration::new(tile(0, config));
        plain.shadow(shade, 8.0, 0.5, offset);

        let mut rounded = Decoration::new(tile(1, config));
        rounded
            .corner(config.corner.radius * 8.0, CornerSides::ALL)
            .shadow(shade, 8.0, 0.5, offset);

        let mut star = Decoration::new(tile(2, config));
        star.mask(Mask::Shape(Shape::Star { points: config.mask.star_points }), &Mask::None)
            .mask_shadow(shade, 8.0, 0.6, offset);

        let mut wave = Decoration::new(tile(3, config));
        wave.mask(
            Mask::Shape(Shape::Wave {
                direction: WaveDirection::Down,
                width: config.mask.wave_width,
                offset: config.mask.wave_offset,
            }),
            &Mask::None,
        )
        .mask_shadow(shade, 6.0, 0.6, offset);

        let mut custom = Decoration::new(tile(4, config));
        custom.mask(diamond(), &Mask::None).mask_shadow(shade, 8.0, 0.6, offset);

        for view in [&plain, &rounded, &star, &wave, &custom] {
            canvas.draw_decoration(view, accent());
        }
        Ok(())
    }
}
