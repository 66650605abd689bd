use anyhow::{Context, Result};
use fluent_geom::{
    Color, FillRule, Path, PathCmd, Rect, RoundedRadii, RoundedRect, rounded_rect_path,
};
use fluent_view::{Decoration, Shadow};
use tiny_skia::{LineJoin, Paint, Pixmap, Stroke, StrokeDash, Transform};

// tiny-skia has no blur filter, so shadows are stacked strokes.
const SHADOW_RINGS: u32 = 6;

/// Software raster target for the demo scenes.
pub struct Canvas {
    pixmap: Pixmap,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let pixmap = Pixmap::new(width.max(1), height.max(1))
            .with_context(|| format!("cannot allocate {width}x{height} pixmap"))?;
        Ok(Self { pixmap })
    }

    pub fn clear(&mut self, color: Color) {
        self.pixmap.fill(to_skia(color));
    }

    pub fn fill(&mut self, path: &Path, color: Color, origin: [f32; 2]) {
        let Some(sk) = to_skia_path(path) else {
            return;
        };
        let rule = match path.fill_rule {
            FillRule::NonZero => tiny_skia::FillRule::Winding,
            FillRule::EvenOdd => tiny_skia::FillRule::EvenOdd,
        };
        self.pixmap.fill_path(
            &sk,
            &paint(color),
            rule,
            Transform::from_translate(origin[0], origin[1]),
            None,
        );
    }

    pub fn stroke(
        &mut self,
        path: &Path,
        color: Color,
        width: f32,
        dash: Option<[f32; 2]>,
        origin: [f32; 2],
    ) {
        let Some(sk) = to_skia_path(path) else {
            return;
        };
        let mut stroke = Stroke {
            width,
            ..Stroke::default()
        };
        if let Some([on, off]) = dash {
            stroke.dash = StrokeDash::new(vec![on, off], 0.0);
            stroke.line_join = LineJoin::Round;
        }
        self.pixmap.stroke_path(
            &sk,
            &paint(color),
            &stroke,
            Transform::from_translate(origin[0], origin[1]),
            None,
        );
    }

    /// Draw a decorated view, shadows first. `body` stands in for a missing
    /// background color.
    pub fn draw_decoration(&mut self, view: &Decoration, body: Color) {
        let frame = view.frame();
        let origin = [frame.x, frame.y];

        if let Some(layer) = view.shadow_layer() {
            if let Some(shadow) = layer.shadow {
                self.draw_shadow(&layer.path, shadow, [layer.frame.x, layer.frame.y]);
            }
        }

        let outline = match view.mask_path() {
            Some(mask) => mask.clone(),
            None => rounded_rect_path(RoundedRect {
                rect: view.bounds(),
                radii: RoundedRadii::uniform(view.corner_radius()),
            }),
        };

        self.draw_shadow(&outline, view.shadow_properties(), origin);
        let body = view.background_color().unwrap_or(body);
        self.fill(&outline, faded(body, view.alpha()), origin);

        for overlay in view.overlays() {
            let Some(color) = overlay.fill_color else {
                continue;
            };
            // overlays span the bounds, so a mask clips them to its outline
            let shape = if view.mask_path().is_some() {
                &outline
            } else {
                &overlay.path
            };
            self.fill(shape, faded(color, overlay.opacity * view.alpha()), origin);
        }

        for layer in view.layers() {
            if let Some(color) = layer.stroke_color {
                self.stroke(&layer.path, color, layer.line_width, layer.dash_pattern, origin);
            }
        }

        if let Some(border) = view.uniform_border() {
            let half = border.width / 2.0;
            let bounds = view.bounds();
            let rect = Rect::new(half, half, bounds.w - border.width, bounds.h - border.width);
            let path = rounded_rect_path(RoundedRect {
                rect,
                radii: RoundedRadii::uniform((view.corner_radius() - half).max(0.0)),
            });
            self.stroke(&path, border.color, border.width, None, origin);
        }
    }

    fn draw_shadow(&mut self, outline: &Path, shadow: Shadow, origin: [f32; 2]) {
        if shadow.opacity <= 0.0 {
            return;
        }
        let origin = [origin[0] + shadow.offset.w, origin[1] + shadow.offset.h];
        let color = faded(shadow.color, shadow.opacity / SHADOW_RINGS as f32);
        for ring in (1..=SHADOW_RINGS).rev() {
            let width = shadow.radius * 2.0 * ring as f32 / SHADOW_RINGS as f32;
            self.stroke(outline, color, width, None, origin);
        }
        self.fill(outline, color, origin);
    }

    pub fn save_png(&self, path: &std::path::Path) -> Result<()> {
        self.pixmap
            .save_png(path)
            .with_context(|| format!("writing {}", path.display()))
    }
}

fn faded(color: Color, opacity: f32) -> Color {
    let [r, g, b, a] = color.to_srgba_u8();
    let alpha = (f32::from(a) * opacity).round().clamp(0.0, 255.0);
    Color::rgba(r, g, b, alpha as u8)
}

fn to_skia(color: Color) -> tiny_skia::Color {
    let [r, g, b, a] = color.to_srgba_u8();
    tiny_skia::Color::from_rgba8(r, g, b, a)
}

fn paint(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(to_skia(color));
    paint.anti_alias = true;
    paint
}

fn to_skia_path(path: &Path) -> Option<tiny_skia::Path> {
    let mut pb = tiny_skia::PathBuilder::new();
    for cmd in &path.cmds {
        match *cmd {
            PathCmd::MoveTo(p) => pb.move_to(p.x, p.y),
            PathCmd::LineTo(p) => pb.line_to(p.x, p.y),
            PathCmd::QuadTo(c, p) => pb.quad_to(c.x, c.y, p.x, p.y),
            PathCmd::CubicTo(c1, c2, p) => pb.cubic_to(c1.x, c1.y, c2.x, c2.y, p.x, p.y),
            PathCmd::Close => pb.close(),
        }
    }
    pb.finish()
}
