use anyhow::Result;
use fluent_geom::tessellate::{self, DEFAULT_TOLERANCE};
use fluent_geom::{
    BorderSides, CornerSides, Path, PathCmd, Point, Rect, RoundedRadii, RoundedRect, Shape,
    WaveDirection, generate_path, rounded_rect_path,
};

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

fn all_shapes() -> Vec<Shape> {
    vec![
        Shape::Circle,
        Shape::polygon(),
        Shape::star(),
        Shape::Triangle,
        Shape::wave(WaveDirection::Up),
        Shape::wave(WaveDirection::Down),
        Shape::parallelogram(),
        Shape::BorderSides {
            sides: BorderSides::ALL,
            stroke_width: 2.0,
        },
    ]
}

#[test]
fn circle_touches_every_edge_of_a_square() {
    let path = generate_path(&Shape::Circle, Rect::new(0.0, 0.0, 100.0, 100.0));
    assert!(path.is_closed());
    let b = path.bounds().expect("circle has bounds");
    assert!(approx_eq(b.x, 0.0) && approx_eq(b.y, 0.0));
    assert!(approx_eq(b.w, 100.0) && approx_eq(b.h, 100.0));
}

#[test]
fn polygon_sides_below_three_clamp() {
    let rect = Rect::new(0.0, 0.0, 80.0, 60.0);
    assert_eq!(
        generate_path(&Shape::Polygon { sides: 3 }, rect),
        generate_path(&Shape::Polygon { sides: 2 }, rect)
    );
    assert_eq!(
        generate_path(&Shape::Polygon { sides: 0 }, rect),
        generate_path(&Shape::Polygon { sides: 3 }, rect)
    );
}

#[test]
fn five_point_star_has_ten_vertices() {
    let path = generate_path(&Shape::Star { points: 5 }, Rect::new(0.0, 0.0, 100.0, 100.0));
    assert_eq!(path.vertices().len(), 10);
    assert_eq!(path.cmds.last(), Some(&PathCmd::Close));
    // Two or fewer points fall back to five; three and four are kept.
    let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert_eq!(generate_path(&Shape::Star { points: 2 }, rect).vertices().len(), 10);
    assert_eq!(generate_path(&Shape::Star { points: 4 }, rect).vertices().len(), 8);
}

#[test]
fn single_top_border_segment() {
    let path = generate_path(
        &Shape::BorderSides {
            sides: BorderSides::TOP,
            stroke_width: 2.0,
        },
        Rect::new(0.0, 0.0, 50.0, 20.0),
    );
    assert_eq!(
        path.cmds,
        vec![
            PathCmd::MoveTo(Point::new(0.0, 1.0)),
            PathCmd::LineTo(Point::new(50.0, 1.0)),
        ]
    );
}

#[test]
fn degenerate_bounds_stay_finite() {
    for rect in [Rect::ZERO, Rect::new(5.0, 5.0, 0.0, 30.0)] {
        for shape in all_shapes() {
            let path = generate_path(&shape, rect);
            assert!(
                path.vertices().iter().all(|p| p.x.is_finite() && p.y.is_finite()),
                "{} produced a non-finite point",
                shape.name()
            );
        }
    }
}

#[test]
fn shapes_follow_their_bounds_origin() {
    let local = Rect::new(0.0, 0.0, 60.0, 40.0);
    let moved = local.translate(25.0, -10.0);
    for shape in all_shapes() {
        let a = generate_path(&shape, moved).vertices();
        let b = generate_path(&shape, local).translated(25.0, -10.0).vertices();
        assert_eq!(a.len(), b.len(), "{}", shape.name());
        assert!(
            a.iter().zip(&b).all(|(p, q)| approx_eq(p.x, q.x) && approx_eq(p.y, q.y)),
            "{}",
            shape.name()
        );
    }
}

#[test]
fn filled_areas_match_geometry() -> Result<()> {
    let square = Rect::new(0.0, 0.0, 100.0, 100.0);

    let triangle = tessellate::fill(&generate_path(&Shape::Triangle, square), DEFAULT_TOLERANCE)?;
    assert!(approx_eq(triangle.area(), 5000.0));

    let rect_like = tessellate::fill(
        &generate_path(&Shape::Parallelogram { angle: 90.0 }, square),
        DEFAULT_TOLERANCE,
    )?;
    assert!(approx_eq(rect_like.area(), 10_000.0));

    let hexagon = tessellate::fill(&generate_path(&Shape::polygon(), square), DEFAULT_TOLERANCE)?;
    let expected = 3.0 * 3f32.sqrt() / 2.0 * 50.0 * 50.0;
    assert!((hexagon.area() - expected).abs() < 0.5);
    assert!(hexagon.contains(Point::new(50.0, 50.0)));
    assert!(!hexagon.contains(Point::new(1.0, 1.0)));
    Ok(())
}

#[test]
fn partially_rounded_rect_keeps_square_corners() -> Result<()> {
    let rrect = RoundedRect {
        rect: Rect::new(0.0, 0.0, 40.0, 40.0),
        radii: RoundedRadii::for_corners(10.0, CornerSides::TOP_LEFT),
    };
    let mesh = tessellate::fill(&rounded_rect_path(rrect), 0.01)?;
    assert!(!mesh.contains(Point::new(0.5, 0.5)));
    assert!(mesh.contains(Point::new(39.5, 0.5)));
    assert!(mesh.contains(Point::new(39.5, 39.5)));
    Ok(())
}

#[test]
fn empty_path_tessellates_to_nothing() -> Result<()> {
    let mesh = tessellate::fill(&Path::new(), DEFAULT_TOLERANCE)?;
    assert_eq!(mesh.triangle_count(), 0);
    Ok(())
}
