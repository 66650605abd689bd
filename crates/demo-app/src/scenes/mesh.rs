use anyhow::Result;
use fluent_config::FluentConfig;
use fluent_geom::tessellate::{self, Mesh};
use fluent_geom::{Color, Path, Point, Shape, generate_path};

use super::{Scene, accent, background, tile};
use crate::canvas::Canvas;

/// Tessellated shape outlines, drawn as triangle wireframes.
pub struct MeshScene;

fn wireframe(mesh: &Mesh) -> Path {
    let mut path = Path::new();
    for tri in mesh.indices.chunks_exact(3) {
        let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| Point::from(mesh.vertices[i as usize]));
        path.move_to(a).line_to(b).line_to(c).close();
    }
    path
}

impl Scene for MeshScene {
    fn name(&self) -> &'static str {
        "mesh"
    }

    fn tiles(&self, config: &FluentConfig) -> usize {
        config.mask.shape_defaults().len()
    }

    fn paint(&self, canvas: &mut Canvas, config: &FluentConfig) -> Result<()> {
        canvas.clear(background());
        let tolerance = config.render.tolerance;
        for (i, shape) in config.mask.shape_defaults().into_iter().enumerate() {
            let frame = tile(i, config);
            let outline = generate_path(&shape, frame);
            let mesh = match shape {
                Shape::BorderSides { stroke_width, .. } => {
                    tessellate::stroke(&outline, stroke_width, tolerance)?
                }
                _ => tessellate::fill(&outline, tolerance)?,
            };
            log::info!(
                "{}: {} triangles, area {:.1}",
                shape.name(),
                mesh.triangle_count(),
                mesh.area()
            );
            canvas.fill(&outline, accent().lighten(0.5), [0.0, 0.0]);
            canvas.stroke(&wireframe(&mesh), Color::grey80(), 0.5, None, [0.0, 0.0]);
        }
        Ok(())
    }
}
