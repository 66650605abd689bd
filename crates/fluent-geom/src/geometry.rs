use lyon_geom::{CubicBezierSegment, QuadraticBezierSegment, point as lpoint};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Point at `angle` (radians) on a circle of `radius` around `center`.
    pub fn polar(center: Point, radius: f32, angle: f32) -> Self {
        Self {
            x: radius * angle.cos() + center.x,
            y: radius * angle.sin() + center.y,
        }
    }

    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl From<[f32; 2]> for Point {
    fn from(p: [f32; 2]) -> Self {
        Self { x: p[0], y: p[1] }
    }
}

impl From<Point> for [f32; 2] {
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub w: f32,
    pub h: f32,
}

impl Size {
    pub const ZERO: Size = Size { w: 0.0, h: 0.0 };

    pub const fn new(w: f32, h: f32) -> Self {
        Self { w, h }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        x: 0.0,
        y: 0.0,
        w: 0.0,
        h: 0.0,
    };

    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Rect at the origin with the given size.
    pub const fn from_size(size: Size) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            w: size.w,
            h: size.h,
        }
    }

    pub fn min_x(&self) -> f32 {
        self.x
    }
    pub fn max_x(&self) -> f32 {
        self.x + self.w
    }
    pub fn mid_x(&self) -> f32 {
        self.x + self.w / 2.0
    }
    pub fn min_y(&self) -> f32 {
        self.y
    }
    pub fn max_y(&self) -> f32 {
        self.y + self.h
    }
    pub fn mid_y(&self) -> f32 {
        self.y + self.h / 2.0
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn center(&self) -> Point {
        Point::new(self.mid_x(), self.mid_y())
    }

    pub fn size(&self) -> Size {
        Size::new(self.w, self.h)
    }

    /// True when either side has no positive extent.
    pub fn is_empty(&self) -> bool {
        !(self.w > 0.0 && self.h > 0.0)
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min_x() && p.x <= self.max_x() && p.y >= self.min_y() && p.y <= self.max_y()
    }

    /// Overlap test; touching edges do not count.
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.min_x() < other.max_x()
            && other.min_x() < self.max_x()
            && self.min_y() < other.max_y()
            && other.min_y() < self.max_y()
    }

    pub fn union(&self, other: &Rect) -> Rect {
        let x0 = self.min_x().min(other.min_x());
        let y0 = self.min_y().min(other.min_y());
        let x1 = self.max_x().max(other.max_x());
        let y1 = self.max_y().max(other.max_y());
        Rect::new(x0, y0, x1 - x0, y1 - y0)
    }

    /// Shrink by `insets` on each side; sides never go negative.
    pub fn inset(&self, insets: EdgeInsets) -> Rect {
        Rect::new(
            self.x + insets.left,
            self.y + insets.top,
            (self.w - insets.left - insets.right).max(0.0),
            (self.h - insets.top - insets.bottom).max(0.0),
        )
    }

    pub fn translate(&self, dx: f32, dy: f32) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.w, self.h)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EdgeInsets {
    pub top: f32,
    pub left: f32,
    pub bottom: f32,
    pub right: f32,
}

impl EdgeInsets {
    pub const ZERO: EdgeInsets = EdgeInsets {
        top: 0.0,
        left: 0.0,
        bottom: 0.0,
        right: 0.0,
    };

    pub const fn new(top: f32, left: f32, bottom: f32, right: f32) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }
}

// --- Path geometry (consumed by lyon and the demo rasterizer) ---

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FillRule {
    #[default]
    NonZero,
    EvenOdd,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCmd {
    MoveTo(Point),
    LineTo(Point),
    /// Quadratic curve: control point, then end point.
    QuadTo(Point, Point),
    /// Cubic curve: two control points, then end point.
    CubicTo(Point, Point, Point),
    Close,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    pub cmds: Vec<PathCmd>,
    pub fill_rule: FillRule,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, p: Point) -> &mut Self {
        self.cmds.push(PathCmd::MoveTo(p));
        self
    }

    pub fn line_to(&mut self, p: Point) -> &mut Self {
        self.cmds.push(PathCmd::LineTo(p));
        self
    }

    pub fn quad_to(&mut self, ctrl: Point, to: Point) -> &mut Self {
        self.cmds.push(PathCmd::QuadTo(ctrl, to));
        self
    }

    pub fn cubic_to(&mut self, c1: Point, c2: Point, to: Point) -> &mut Self {
        self.cmds.push(PathCmd::CubicTo(c1, c2, to));
        self
    }

    pub fn close(&mut self) -> &mut Self {
        self.cmds.push(PathCmd::Close);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    /// The pen position after the last command, if any.
    pub fn current_point(&self) -> Option<Point> {
        let mut current = None;
        let mut start = None;
        for cmd in &self.cmds {
            match *cmd {
                PathCmd::MoveTo(p) => {
                    start = Some(p);
                    current = Some(p);
                }
                PathCmd::LineTo(p) | PathCmd::QuadTo(_, p) | PathCmd::CubicTo(_, _, p) => {
                    current = Some(p)
                }
                PathCmd::Close => current = start,
            }
        }
        current
    }

    /// On-curve points in command order. `Close` contributes nothing.
    pub fn vertices(&self) -> Vec<Point> {
        self.cmds
            .iter()
            .filter_map(|cmd| match *cmd {
                PathCmd::MoveTo(p)
                | PathCmd::LineTo(p)
                | PathCmd::QuadTo(_, p)
                | PathCmd::CubicTo(_, _, p) => Some(p),
                PathCmd::Close => None,
            })
            .collect()
    }

    pub fn subpath_count(&self) -> usize {
        self.cmds
            .iter()
            .filter(|cmd| matches!(cmd, PathCmd::MoveTo(_)))
            .count()
    }

    /// True when the last command closes the final sub-path.
    pub fn is_closed(&self) -> bool {
        matches!(self.cmds.last(), Some(PathCmd::Close))
    }

    pub fn translated(&self, dx: f32, dy: f32) -> Path {
        let t = |p: Point| p.offset(dx, dy);
        let cmds = self
            .cmds
            .iter()
            .map(|cmd| match *cmd {
                PathCmd::MoveTo(p) => PathCmd::MoveTo(t(p)),
                PathCmd::LineTo(p) => PathCmd::LineTo(t(p)),
                PathCmd::QuadTo(c, p) => PathCmd::QuadTo(t(c), t(p)),
                PathCmd::CubicTo(c1, c2, p) => PathCmd::CubicTo(t(c1), t(c2), t(p)),
                PathCmd::Close => PathCmd::Close,
            })
            .collect();
        Path {
            cmds,
            fill_rule: self.fill_rule,
        }
    }

    /// Tight bounding box of the geometry, curves included. `None` for an empty path.
    pub fn bounds(&self) -> Option<Rect> {
        let mut acc: Option<(Point, Point)> = None;
        let mut extend = |p: Point| {
            acc = Some(match acc {
                None => (p, p),
                Some((lo, hi)) => (
                    Point::new(lo.x.min(p.x), lo.y.min(p.y)),
                    Point::new(hi.x.max(p.x), hi.y.max(p.y)),
                ),
            });
        };

        let mut current = Point::ZERO;
        let mut start = Point::ZERO;
        for cmd in &self.cmds {
            match *cmd {
                PathCmd::MoveTo(p) => {
                    extend(p);
                    current = p;
                    start = p;
                }
                PathCmd::LineTo(p) => {
                    extend(p);
                    current = p;
                }
                PathCmd::QuadTo(c, p) => {
                    let seg = QuadraticBezierSegment {
                        from: lpoint(current.x, current.y),
                        ctrl: lpoint(c.x, c.y),
                        to: lpoint(p.x, p.y),
                    };
                    let bb = seg.bounding_box();
                    extend(Point::new(bb.min.x, bb.min.y));
                    extend(Point::new(bb.max.x, bb.max.y));
                    current = p;
                }
                PathCmd::CubicTo(c1, c2, p) => {
                    let seg = CubicBezierSegment {
                        from: lpoint(current.x, current.y),
                        ctrl1: lpoint(c1.x, c1.y),
                        ctrl2: lpoint(c2.x, c2.y),
                        to: lpoint(p.x, p.y),
                    };
                    let bb = seg.bounding_box();
                    extend(Point::new(bb.min.x, bb.min.y));
                    extend(Point::new(bb.max.x, bb.max.y));
                    current = p;
                }
                PathCmd::Close => current = start,
            }
        }
        acc.map(|(lo, hi)| Rect::new(lo.x, lo.y, hi.x - lo.x, hi.y - lo.y))
    }
}
