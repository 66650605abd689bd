use bitflags::bitflags;

use crate::geometry::{Path, Point, Rect};

bitflags! {
    /// Edges of a rect that receive a border stroke.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct BorderSides: u8 {
        const TOP = 1;
        const RIGHT = 1 << 1;
        const BOTTOM = 1 << 2;
        const LEFT = 1 << 3;
        const ALL = Self::TOP.bits() | Self::RIGHT.bits() | Self::BOTTOM.bits() | Self::LEFT.bits();
    }
}

/// Stroke style for borders.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum BorderStyle {
    #[default]
    Solid,
    Dash {
        dash: f32,
        gap: f32,
    },
    None,
}

impl BorderStyle {
    /// Dash pattern as `[dash, gap]`, only for dashed borders.
    pub fn dash_pattern(&self) -> Option<[f32; 2]> {
        match *self {
            BorderStyle::Dash { dash, gap } => Some([dash, gap]),
            BorderStyle::Solid | BorderStyle::None => None,
        }
    }
}

/// A single border stroke segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BorderLine {
    pub start: Point,
    pub end: Point,
}

/// Lines for each requested side, inset by half the stroke so the stroke sits
/// inside the rect. Emitted in top, right, bottom, left order.
pub fn border_lines(bounds: Rect, sides: BorderSides, width: f32) -> Vec<BorderLine> {
    let shift = if width.is_finite() { width.max(0.0) / 2.0 } else { 0.0 };
    let (x0, y0, x1, y1) = (bounds.min_x(), bounds.min_y(), bounds.max_x(), bounds.max_y());

    let mut lines = Vec::with_capacity(4);
    if sides.contains(BorderSides::TOP) {
        lines.push(BorderLine {
            start: Point::new(x0, y0 + shift),
            end: Point::new(x1, y0 + shift),
        });
    }
    if sides.contains(BorderSides::RIGHT) {
        lines.push(BorderLine {
            start: Point::new(x1 - shift, y0),
            end: Point::new(x1 - shift, y1),
        });
    }
    if sides.contains(BorderSides::BOTTOM) {
        lines.push(BorderLine {
            start: Point::new(x0, y1 - shift),
            end: Point::new(x1, y1 - shift),
        });
    }
    if sides.contains(BorderSides::LEFT) {
        lines.push(BorderLine {
            start: Point::new(x0 + shift, y0),
            end: Point::new(x0 + shift, y1),
        });
    }
    lines
}

/// Open path with one independent `MoveTo`/`LineTo` pair per side.
pub fn border_path(bounds: Rect, sides: BorderSides, width: f32) -> Path {
    let mut path = Path::new();
    for line in border_lines(bounds, sides, width) {
        path.move_to(line.start).line_to(line.end);
    }
    path
}
