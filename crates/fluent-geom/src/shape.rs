//! Shape descriptors and the path generator behind masks and side borders.
//!
//! Every generator works in y-down coordinates relative to the bounds origin
//! and never fails: degenerate bounds produce degenerate (possibly single
//! point) paths.

use std::f32::consts::{FRAC_PI_2, PI};

use tracing::trace;

use crate::border::{BorderSides, border_path};
use crate::corner::KAPPA;
use crate::geometry::{Path, Point, Rect};

pub const DEFAULT_POLYGON_SIDES: u32 = 6;
pub const DEFAULT_STAR_POINTS: u32 = 5;
pub const DEFAULT_WAVE_WIDTH: f32 = 40.0;
pub const DEFAULT_WAVE_OFFSET: f32 = 0.0;
pub const DEFAULT_PARALLELOGRAM_ANGLE: f32 = 60.0;

const MIN_POLYGON_SIDES: u32 = 3;

/// Which way the humps of a wave mask face.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum WaveDirection {
    #[default]
    Up,
    Down,
}

/// Shape to generate inside a rect.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    /// Circle with diameter `ceil(min(w, h))`, centered.
    Circle,
    /// Regular polygon, first vertex pointing up. At least 3 sides.
    Polygon { sides: u32 },
    /// Star with `points` outer vertices; inner vertices sit at half the radius.
    Star { points: u32 },
    /// Isosceles triangle, apex at top-center, base on the bottom edge.
    Triangle,
    /// Horizontal wave of quadratic humps `width / 2` wide, shifted by `offset`.
    Wave {
        direction: WaveDirection,
        width: f32,
        offset: f32,
    },
    /// Parallelogram with the given top-left angle in degrees. 90 is a rect.
    Parallelogram { angle: f32 },
    /// Independent stroke segments along a subset of the edges.
    BorderSides { sides: BorderSides, stroke_width: f32 },
}

impl Shape {
    pub fn polygon() -> Self {
        Shape::Polygon {
            sides: DEFAULT_POLYGON_SIDES,
        }
    }

    pub fn star() -> Self {
        Shape::Star {
            points: DEFAULT_STAR_POINTS,
        }
    }

    pub fn wave(direction: WaveDirection) -> Self {
        Shape::Wave {
            direction,
            width: DEFAULT_WAVE_WIDTH,
            offset: DEFAULT_WAVE_OFFSET,
        }
    }

    pub fn parallelogram() -> Self {
        Shape::Parallelogram {
            angle: DEFAULT_PARALLELOGRAM_ANGLE,
        }
    }

    /// Short lowercase name, used for logging and demo file names.
    pub fn name(&self) -> &'static str {
        match self {
            Shape::Circle => "circle",
            Shape::Polygon { .. } => "polygon",
            Shape::Star { .. } => "star",
            Shape::Triangle => "triangle",
            Shape::Wave { .. } => "wave",
            Shape::Parallelogram { .. } => "parallelogram",
            Shape::BorderSides { .. } => "border-sides",
        }
    }

    /// Clamp parameters into their usable ranges.
    ///
    /// Polygons get at least 3 sides. Stars with 2 or fewer points fall back to
    /// 5; 3 and 4 points are kept. Non-positive or non-finite wave widths fall
    /// back to the default width.
    pub fn normalized(self) -> Self {
        match self {
            Shape::Polygon { sides } => Shape::Polygon {
                sides: sides.max(MIN_POLYGON_SIDES),
            },
            Shape::Star { points } => Shape::Star {
                points: if points <= 2 { DEFAULT_STAR_POINTS } else { points },
            },
            Shape::Wave {
                direction,
                width,
                offset,
            } => Shape::Wave {
                direction,
                width: if width.is_finite() && width > 0.0 {
                    width
                } else {
                    DEFAULT_WAVE_WIDTH
                },
                offset: if offset.is_finite() { offset } else { DEFAULT_WAVE_OFFSET },
            },
            Shape::Parallelogram { angle } => Shape::Parallelogram {
                angle: if angle.is_finite() {
                    angle
                } else {
                    DEFAULT_PARALLELOGRAM_ANGLE
                },
            },
            Shape::BorderSides {
                sides,
                stroke_width,
            } => Shape::BorderSides {
                sides,
                stroke_width: if stroke_width.is_finite() {
                    stroke_width.max(0.0)
                } else {
                    0.0
                },
            },
            Shape::Circle | Shape::Triangle => self,
        }
    }
}

/// Build the path for `shape` inside `bounds`.
pub fn generate_path(shape: &Shape, bounds: Rect) -> Path {
    let path = match shape.normalized() {
        Shape::Circle => circle_path(bounds),
        Shape::Polygon { sides } => polygon_path(bounds, sides),
        Shape::Star { points } => star_path(bounds, points),
        Shape::Triangle => triangle_path(bounds),
        Shape::Wave {
            direction,
            width,
            offset,
        } => wave_path(bounds, direction, width, offset),
        Shape::Parallelogram { angle } => parallelogram_path(bounds, angle),
        Shape::BorderSides {
            sides,
            stroke_width,
        } => border_path(bounds, sides, stroke_width),
    };
    trace!(shape = shape.name(), cmds = path.cmds.len(), "generated shape path");
    path
}

fn circle_path(bounds: Rect) -> Path {
    let diameter = bounds.w.min(bounds.h).ceil();
    let r = diameter / 2.0;
    let cx = bounds.x + (bounds.w - diameter) / 2.0 + r;
    let cy = bounds.y + (bounds.h - diameter) / 2.0 + r;
    let k = KAPPA * r;

    let mut path = Path::new();
    path.move_to(Point::new(cx, cy - r));
    path.cubic_to(
        Point::new(cx + k, cy - r),
        Point::new(cx + r, cy - k),
        Point::new(cx + r, cy),
    );
    path.cubic_to(
        Point::new(cx + r, cy + k),
        Point::new(cx + k, cy + r),
        Point::new(cx, cy + r),
    );
    path.cubic_to(
        Point::new(cx - k, cy + r),
        Point::new(cx - r, cy + k),
        Point::new(cx - r, cy),
    );
    path.cubic_to(
        Point::new(cx - r, cy - k),
        Point::new(cx - k, cy - r),
        Point::new(cx, cy - r),
    );
    path.close();
    path
}

fn polygon_path(bounds: Rect, sides: u32) -> Path {
    let center = bounds.center();
    let radius = bounds.w.min(bounds.h) / 2.0;
    let step = 2.0 * PI / sides as f32;
    let start = -FRAC_PI_2;

    let mut path = Path::new();
    path.move_to(Point::polar(center, radius, start));
    for i in 1..sides {
        path.line_to(Point::polar(center, radius, start + i as f32 * step));
    }
    path.close();
    path
}

fn star_path(bounds: Rect, points: u32) -> Path {
    let center = bounds.center();
    let radius = bounds.w.min(bounds.h) / 2.0;
    let extrusion = radius / 2.0;
    let step = 2.0 * PI / points as f32;
    let start = -FRAC_PI_2;

    let mut path = Path::new();
    path.move_to(Point::polar(center, radius, start));
    for i in 0..points {
        let angle = start + i as f32 * step;
        path.line_to(Point::polar(center, extrusion, angle + step / 2.0));
        // The last outer vertex is the first one again; `close` draws that edge.
        if i + 1 < points {
            path.line_to(Point::polar(center, radius, angle + step));
        }
    }
    path.close();
    path
}

fn triangle_path(bounds: Rect) -> Path {
    let mut path = Path::new();
    path.move_to(Point::new(bounds.mid_x(), bounds.min_y()))
        .line_to(Point::new(bounds.max_x(), bounds.max_y()))
        .line_to(Point::new(bounds.min_x(), bounds.max_y()))
        .close();
    path
}

fn parallelogram_path(bounds: Rect, angle: f32) -> Path {
    let offset = ((angle.to_radians() - FRAC_PI_2).tan() * bounds.h).abs();
    let (x0, y0, x1, y1) = (bounds.min_x(), bounds.min_y(), bounds.max_x(), bounds.max_y());

    let mut path = Path::new();
    if angle <= 90.0 {
        path.move_to(Point::new(x0, y0))
            .line_to(Point::new(x1 - offset, y0))
            .line_to(Point::new(x1, y1))
            .line_to(Point::new(x0 + offset, y1));
    } else {
        path.move_to(Point::new(x0 + offset, y0))
            .line_to(Point::new(x1, y0))
            .line_to(Point::new(x1 - offset, y1))
            .line_to(Point::new(x0, y1));
    }
    path.close();
    path
}

/// Open wave path anchored on the max-y edge for `Up` and the min-y edge for `Down`.
///
/// Hump positions come from an integer index in `f64`, so narrow waves far
/// from the origin still reach the max-x edge.
fn wave_path(bounds: Rect, direction: WaveDirection, width: f32, offset: f32) -> Path {
    let mut up = direction == WaveDirection::Up;
    let origin_y = if up { bounds.max_y() } else { bounds.min_y() };
    let half_height = bounds.h / 2.0;

    let width = f64::from(width);
    let half_width = width / 2.0;
    let quarter_width = width / 4.0;
    let max_x = f64::from(bounds.max_x());
    let first_x = f64::from(bounds.min_x()) - quarter_width - f64::from(offset) % width;

    let mut path = Path::new();
    path.move_to(Point::new(first_x as f32, origin_y));
    path.line_to(Point::new(first_x as f32, bounds.mid_y()));

    let mut hump: u64 = 0;
    loop {
        let start_x = first_x + hump as f64 * half_width;
        let end_x = start_x + half_width;
        let ctrl_y = if up {
            bounds.max_y() + half_height
        } else {
            bounds.min_y() - half_height
        };
        path.quad_to(
            Point::new((start_x + quarter_width) as f32, ctrl_y),
            Point::new(end_x as f32, bounds.mid_y()),
        );
        if end_x >= max_x {
            path.line_to(Point::new(end_x as f32, origin_y));
            return path;
        }
        hump += 1;
        up = !up;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::PathCmd;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn normalization_clamps() {
        assert_eq!(
            Shape::Polygon { sides: 1 }.normalized(),
            Shape::Polygon { sides: 3 }
        );
        assert_eq!(Shape::Star { points: 2 }.normalized(), Shape::Star { points: 5 });
        assert_eq!(Shape::Star { points: 0 }.normalized(), Shape::Star { points: 5 });
        assert_eq!(Shape::Star { points: 3 }.normalized(), Shape::Star { points: 3 });
        assert_eq!(Shape::Star { points: 4 }.normalized(), Shape::Star { points: 4 });
        match (Shape::Wave {
            direction: WaveDirection::Down,
            width: 0.0,
            offset: f32::NAN,
        })
        .normalized()
        {
            Shape::Wave { width, offset, .. } => {
                assert_eq!(width, DEFAULT_WAVE_WIDTH);
                assert_eq!(offset, 0.0);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn circle_is_centered_in_wide_rect() {
        let path = generate_path(&Shape::Circle, Rect::new(0.0, 0.0, 200.0, 100.0));
        let b = path.bounds().unwrap();
        assert!(approx(b.x, 50.0) && approx(b.w, 100.0));
        assert!(approx(b.y, 0.0) && approx(b.h, 100.0));
        assert!(path.is_closed());
    }

    #[test]
    fn circle_diameter_rounds_up() {
        let path = generate_path(&Shape::Circle, Rect::new(0.0, 0.0, 10.5, 20.0));
        let b = path.bounds().unwrap();
        assert!(approx(b.w, 11.0));
    }

    #[test]
    fn polygon_first_vertex_points_up() {
        let path = generate_path(&Shape::Polygon { sides: 4 }, Rect::new(0.0, 0.0, 100.0, 100.0));
        let v = path.vertices();
        assert_eq!(v.len(), 4);
        assert!(approx(v[0].x, 50.0) && approx(v[0].y, 0.0));
        assert!(approx(v[1].x, 100.0) && approx(v[1].y, 50.0));
    }

    #[test]
    fn star_alternates_outer_and_inner() {
        let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
        let path = generate_path(&Shape::Star { points: 5 }, bounds);
        let v = path.vertices();
        assert_eq!(v.len(), 10);
        let c = bounds.center();
        for (i, p) in v.iter().enumerate() {
            let d = ((p.x - c.x).powi(2) + (p.y - c.y).powi(2)).sqrt();
            let expected = if i % 2 == 0 { 50.0 } else { 25.0 };
            assert!(approx(d, expected), "vertex {i} at distance {d}");
        }
    }

    #[test]
    fn triangle_spans_full_base() {
        let path = generate_path(&Shape::Triangle, Rect::new(0.0, 0.0, 60.0, 30.0));
        assert_eq!(
            path.cmds,
            vec![
                PathCmd::MoveTo(Point::new(30.0, 0.0)),
                PathCmd::LineTo(Point::new(60.0, 30.0)),
                PathCmd::LineTo(Point::new(0.0, 30.0)),
                PathCmd::Close,
            ]
        );
    }

    #[test]
    fn parallelogram_leans_by_angle() {
        // 45 degrees: horizontal offset equals the height.
        let path = generate_path(&Shape::Parallelogram { angle: 45.0 }, Rect::new(0.0, 0.0, 100.0, 20.0));
        let v = path.vertices();
        assert!(approx(v[1].x, 80.0));
        assert!(approx(v[3].x, 20.0));

        let mirrored = generate_path(&Shape::Parallelogram { angle: 135.0 }, Rect::new(0.0, 0.0, 100.0, 20.0));
        let v = mirrored.vertices();
        assert!(approx(v[0].x, 20.0) && approx(v[0].y, 0.0));
        assert!(approx(v[2].x, 80.0) && approx(v[2].y, 20.0));
        assert!(approx(v[3].x, 0.0));
    }

    #[test]
    fn right_angle_parallelogram_is_rect() {
        let path = generate_path(&Shape::Parallelogram { angle: 90.0 }, Rect::new(0.0, 0.0, 40.0, 10.0));
        let b = path.bounds().unwrap();
        assert!(approx(b.w, 40.0) && approx(b.h, 10.0));
        assert!(approx(path.vertices()[1].x, 40.0));
    }

    #[test]
    fn wave_covers_width_and_returns_to_origin_edge() {
        let bounds = Rect::new(0.0, 0.0, 100.0, 40.0);
        let path = generate_path(&Shape::wave(WaveDirection::Up), bounds);
        assert!(!path.is_closed());
        assert_eq!(path.cmds[0], PathCmd::MoveTo(Point::new(-10.0, 40.0)));
        assert_eq!(path.cmds[1], PathCmd::LineTo(Point::new(-10.0, 20.0)));
        let last = path.current_point().unwrap();
        assert!(last.x >= bounds.max_x());
        assert_eq!(last.y, bounds.max_y());

        let humps: Vec<_> = path
            .cmds
            .iter()
            .filter_map(|c| match c {
                PathCmd::QuadTo(ctrl, _) => Some(*ctrl),
                _ => None,
            })
            .collect();
        // -10 -> 110 in steps of 20.
        assert_eq!(humps.len(), 6);
        assert_eq!(humps[0].y, 60.0);
        assert_eq!(humps[1].y, -20.0);
    }

    #[test]
    fn narrow_wave_far_from_origin_reaches_max_x() {
        let bounds = Rect::new(20_000.0, 0.0, 100.0, 40.0);
        let path = generate_path(
            &Shape::Wave {
                direction: WaveDirection::Up,
                width: 0.001,
                offset: 0.0,
            },
            bounds,
        );
        let last = path.current_point().unwrap();
        assert!(last.x >= bounds.max_x(), "wave stopped at {}", last.x);
        assert_eq!(last.y, bounds.max_y());
        let humps = path
            .cmds
            .iter()
            .filter(|c| matches!(c, PathCmd::QuadTo(..)))
            .count();
        assert!(humps > 100_000);
    }

    #[test]
    fn down_wave_anchors_on_min_edge_and_honours_offset() {
        let bounds = Rect::new(0.0, 0.0, 100.0, 40.0);
        let path = generate_path(
            &Shape::Wave {
                direction: WaveDirection::Down,
                width: 40.0,
                offset: 50.0,
            },
            bounds,
        );
        // 50 % 40 == 10 shifts the start left.
        assert_eq!(path.cmds[0], PathCmd::MoveTo(Point::new(-20.0, 0.0)));
        assert_eq!(path.current_point().unwrap().y, 0.0);
    }

    #[test]
    fn degenerate_bounds_do_not_produce_nan() {
        let zero = Rect::new(0.0, 0.0, 0.0, 0.0);
        for shape in [
            Shape::Circle,
            Shape::polygon(),
            Shape::star(),
            Shape::Triangle,
            Shape::wave(WaveDirection::Down),
            Shape::parallelogram(),
            Shape::BorderSides {
                sides: BorderSides::ALL,
                stroke_width: 1.0,
            },
        ] {
            let path = generate_path(&shape, zero);
            assert!(
                path.vertices().iter().all(|p| p.x.is_finite() && p.y.is_finite()),
                "{} produced non-finite points",
                shape.name()
            );
        }
    }
}
