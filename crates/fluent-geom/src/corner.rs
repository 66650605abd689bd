use bitflags::bitflags;

use crate::geometry::{Path, Point, Rect};

bitflags! {
    /// Corners of a rect that get rounded.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct CornerSides: u8 {
        const TOP_LEFT = 1;
        const TOP_RIGHT = 1 << 1;
        const BOTTOM_LEFT = 1 << 2;
        const BOTTOM_RIGHT = 1 << 3;
        const ALL = Self::TOP_LEFT.bits()
            | Self::TOP_RIGHT.bits()
            | Self::BOTTOM_LEFT.bits()
            | Self::BOTTOM_RIGHT.bits();
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RoundedRadii {
    pub tl: f32,
    pub tr: f32,
    pub br: f32,
    pub bl: f32,
}

impl RoundedRadii {
    pub fn uniform(radius: f32) -> Self {
        Self {
            tl: radius,
            tr: radius,
            br: radius,
            bl: radius,
        }
    }

    /// `radius` on the selected corners, square elsewhere.
    pub fn for_corners(radius: f32, sides: CornerSides) -> Self {
        let pick = |side| if sides.contains(side) { radius } else { 0.0 };
        Self {
            tl: pick(CornerSides::TOP_LEFT),
            tr: pick(CornerSides::TOP_RIGHT),
            br: pick(CornerSides::BOTTOM_RIGHT),
            bl: pick(CornerSides::BOTTOM_LEFT),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoundedRect {
    pub rect: Rect,
    pub radii: RoundedRadii,
}

// Quarter circle as a cubic.
pub(crate) const KAPPA: f32 = 0.552_284_75;

/// Closed rounded-rect outline using cubic quarter arcs, clockwise from the top edge.
///
/// Radii are clamped to half the shorter side; negative or NaN radii square the corner.
pub fn rounded_rect_path(rrect: RoundedRect) -> Path {
    let rect = rrect.rect;
    let limit = (rect.w * 0.5).min(rect.h * 0.5).max(0.0);
    let clamp = |r: f32| {
        if !r.is_finite() || r < 0.0 {
            0.0
        } else {
            r.min(limit)
        }
    };
    let tl = clamp(rrect.radii.tl);
    let tr = clamp(rrect.radii.tr);
    let br = clamp(rrect.radii.br);
    let bl = clamp(rrect.radii.bl);

    let (x0, y0, x1, y1) = (rect.min_x(), rect.min_y(), rect.max_x(), rect.max_y());

    let mut path = Path::new();
    path.move_to(Point::new(x0 + tl, y0));

    path.line_to(Point::new(x1 - tr, y0));
    if tr > 0.0 {
        path.cubic_to(
            Point::new(x1 - tr + KAPPA * tr, y0),
            Point::new(x1, y0 + tr - KAPPA * tr),
            Point::new(x1, y0 + tr),
        );
    }

    path.line_to(Point::new(x1, y1 - br));
    if br > 0.0 {
        path.cubic_to(
            Point::new(x1, y1 - br + KAPPA * br),
            Point::new(x1 - br + KAPPA * br, y1),
            Point::new(x1 - br, y1),
        );
    }

    path.line_to(Point::new(x0 + bl, y1));
    if bl > 0.0 {
        path.cubic_to(
            Point::new(x0 + bl - KAPPA * bl, y1),
            Point::new(x0, y1 - bl + KAPPA * bl),
            Point::new(x0, y1 - bl),
        );
    }

    path.line_to(Point::new(x0, y0 + tl));
    if tl > 0.0 {
        path.cubic_to(
            Point::new(x0, y0 + tl - KAPPA * tl),
            Point::new(x0 + tl - KAPPA * tl, y0),
            Point::new(x0 + tl, y0),
        );
    }

    path.close();
    path
}
