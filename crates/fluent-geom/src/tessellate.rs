use lyon_geom::point;
use lyon_tessellation::{
    BuffersBuilder, FillOptions, FillTessellator, FillVertex, LineCap, LineJoin, StrokeOptions,
    StrokeTessellator, StrokeVertex, VertexBuffers,
};
use tracing::trace;

use crate::GeometryError;
use crate::geometry::{FillRule, Path, PathCmd, Point};

/// Default flattening tolerance for curves.
pub const DEFAULT_TOLERANCE: f32 = 0.1;

/// Indexed triangle list.
#[derive(Clone, Debug, Default)]
pub struct Mesh {
    pub vertices: Vec<[f32; 2]>,
    pub indices: Vec<u16>,
}

impl Mesh {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    fn triangles(&self) -> impl Iterator<Item = [[f32; 2]; 3]> + '_ {
        self.indices.chunks_exact(3).map(|tri| {
            [
                self.vertices[tri[0] as usize],
                self.vertices[tri[1] as usize],
                self.vertices[tri[2] as usize],
            ]
        })
    }

    /// Sum of triangle areas.
    pub fn area(&self) -> f32 {
        self.triangles()
            .map(|[a, b, c]| cross(a, b, c).abs() * 0.5)
            .sum()
    }

    /// Point-in-mesh test (edges count as inside).
    pub fn contains(&self, p: Point) -> bool {
        let p = [p.x, p.y];
        self.triangles().any(|[a, b, c]| {
            let d1 = cross(a, b, p);
            let d2 = cross(b, c, p);
            let d3 = cross(c, a, p);
            let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
            let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
            !(has_neg && has_pos)
        })
    }
}

fn cross(a: [f32; 2], b: [f32; 2], c: [f32; 2]) -> f32 {
    (b[0] - a[0]) * (c[1] - a[1]) - (b[1] - a[1]) * (c[0] - a[0])
}

/// Convert to a lyon path. Sub-paths without `Close` are ended open.
pub fn to_lyon_path(path: &Path) -> lyon_path::Path {
    let mut builder = lyon_path::Path::builder();
    let mut started = false;
    for cmd in &path.cmds {
        match *cmd {
            PathCmd::MoveTo(p) => {
                if started {
                    builder.end(false);
                }
                builder.begin(point(p.x, p.y));
                started = true;
            }
            PathCmd::LineTo(p) => {
                if !started {
                    builder.begin(point(p.x, p.y));
                    started = true;
                } else {
                    builder.line_to(point(p.x, p.y));
                }
            }
            PathCmd::QuadTo(c, p) => {
                if !started {
                    builder.begin(point(c.x, c.y));
                    started = true;
                }
                builder.quadratic_bezier_to(point(c.x, c.y), point(p.x, p.y));
            }
            PathCmd::CubicTo(c1, c2, p) => {
                if !started {
                    builder.begin(point(c1.x, c1.y));
                    started = true;
                }
                builder.cubic_bezier_to(point(c1.x, c1.y), point(c2.x, c2.y), point(p.x, p.y));
            }
            PathCmd::Close => {
                if started {
                    builder.end(true);
                }
                started = false;
            }
        }
    }
    if started {
        builder.end(false);
    }
    builder.build()
}

/// Fill tessellation honoring the path's fill rule.
pub fn fill(path: &Path, tolerance: f32) -> Result<Mesh, GeometryError> {
    let lyon_path = to_lyon_path(path);
    let base_opts = FillOptions::default().with_tolerance(sanitize_tolerance(tolerance));
    let options = match path.fill_rule {
        FillRule::NonZero => base_opts.with_fill_rule(lyon_tessellation::FillRule::NonZero),
        FillRule::EvenOdd => base_opts.with_fill_rule(lyon_tessellation::FillRule::EvenOdd),
    };
    let mut geom: VertexBuffers<[f32; 2], u16> = VertexBuffers::new();
    FillTessellator::new()
        .tessellate_path(
            &lyon_path,
            &options,
            &mut BuffersBuilder::new(&mut geom, |fv: FillVertex| {
                let p = fv.position();
                [p.x, p.y]
            }),
        )
        .map_err(|e| GeometryError::Tessellation(format!("{e:?}")))?;
    trace!(
        vertices = geom.vertices.len(),
        triangles = geom.indices.len() / 3,
        "fill tessellated"
    );
    Ok(Mesh {
        vertices: geom.vertices,
        indices: geom.indices,
    })
}

/// Stroke tessellation with round joins and caps.
pub fn stroke(path: &Path, width: f32, tolerance: f32) -> Result<Mesh, GeometryError> {
    let lyon_path = to_lyon_path(path);
    let options = StrokeOptions::default()
        .with_line_width(width.max(0.0))
        .with_tolerance(sanitize_tolerance(tolerance))
        .with_line_join(LineJoin::Round)
        .with_start_cap(LineCap::Round)
        .with_end_cap(LineCap::Round);
    let mut geom: VertexBuffers<[f32; 2], u16> = VertexBuffers::new();
    StrokeTessellator::new()
        .tessellate_path(
            &lyon_path,
            &options,
            &mut BuffersBuilder::new(&mut geom, |sv: StrokeVertex| {
                let p = sv.position();
                [p.x, p.y]
            }),
        )
        .map_err(|e| GeometryError::Tessellation(format!("{e:?}")))?;
    Ok(Mesh {
        vertices: geom.vertices,
        indices: geom.indices,
    })
}

fn sanitize_tolerance(tolerance: f32) -> f32 {
    if tolerance.is_finite() && tolerance > 0.0 {
        tolerance
    } else {
        DEFAULT_TOLERANCE
    }
}
