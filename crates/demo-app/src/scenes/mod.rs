use anyhow::Result;
use fluent_config::FluentConfig;
use fluent_geom::{Color, Rect};

use crate::canvas::Canvas;

pub mod borders;
pub mod corners;
pub mod mesh;
pub mod shadow;
pub mod shapes;

const COLUMNS: usize = 4;
const GUTTER: f32 = 16.0;

pub trait Scene {
    fn name(&self) -> &'static str;
    /// Number of tiles the scene lays out.
    fn tiles(&self, config: &FluentConfig) -> usize;
    fn paint(&self, canvas: &mut Canvas, config: &FluentConfig) -> Result<()>;

    fn size(&self, config: &FluentConfig) -> (u32, u32) {
        let tiles = self.tiles(config).max(1);
        let rows = tiles.div_ceil(COLUMNS);
        let cols = tiles.min(COLUMNS);
        let side = config.demo.canvas.max(32.0);
        (
            (cols as f32 * side).ceil() as u32,
            (rows as f32 * side).ceil() as u32,
        )
    }
}

pub fn all() -> Vec<Box<dyn Scene>> {
    vec![
        Box::new(shapes::ShapesScene),
        Box::new(borders::BordersScene),
        Box::new(corners::CornersScene),
        Box::new(shadow::ShadowScene),
        Box::new(mesh::MeshScene),
    ]
}

/// Frame of tile `index`, inset by the gutter.
pub fn tile(index: usize, config: &FluentConfig) -> Rect {
    let side = config.demo.canvas.max(32.0);
    let (col, row) = (index % COLUMNS, index / COLUMNS);
    Rect::new(
        col as f32 * side + GUTTER,
        row as f32 * side + GUTTER,
        side - 2.0 * GUTTER,
        side - 2.0 * GUTTER,
    )
}

pub fn background() -> Color {
    Color::from_hex("#FFFFFF")
}

pub fn accent() -> Color {
    Color::from_hex("#3F7FBF")
}
