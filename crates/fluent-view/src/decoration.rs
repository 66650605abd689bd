//! Masks, borders, corners, shadows and fills for a single view.
//!
//! [`Decoration`] owns everything a view needs to be drawn with a decorated
//! outline: its frame in the parent, the uniform layer properties (border,
//! corner radius, shadow) and the stack of shape layers built from the mask
//! and border requests. A host toolkit reads the result back through the
//! accessors and renders it however it likes.

use std::fmt;
use std::sync::Arc;

use fluent_geom::tessellate::{self, DEFAULT_TOLERANCE};
use fluent_geom::{
    BorderSides, BorderStyle, Color, CornerSides, Path, Point, Rect, RoundedRadii, RoundedRect,
    Shape, Size, border_path, generate_path, rounded_rect_path,
};
use tracing::{debug, warn};

/// Builds a mask outline for a given view size.
pub type MaskProvider = Arc<dyn Fn(Size) -> Path + Send + Sync>;

/// What to clip a view to.
#[derive(Clone, Default)]
pub enum Mask {
    /// No mask. Removes the current one only if a previous mask is named.
    #[default]
    None,
    Shape(Shape),
    /// Caller-supplied outline, rebuilt whenever the bounds change.
    Custom(MaskProvider),
}

impl Mask {
    pub fn custom(provider: impl Fn(Size) -> Path + Send + Sync + 'static) -> Self {
        Mask::Custom(Arc::new(provider))
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Mask::None)
    }
}

impl fmt::Debug for Mask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mask::None => f.write_str("None"),
            Mask::Shape(shape) => f.debug_tuple("Shape").field(shape).finish(),
            Mask::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Identifies what a shape layer was created for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LayerName {
    Mask,
    /// Stroke following the mask outline.
    BorderAllSides,
    /// Stroke along a subset of the rect edges, or a dashed border.
    BorderSide,
    /// Mask rounding only some corners.
    CornerSide,
    /// Sibling layer that draws a shadow in the shape of the mask.
    Shadow,
    /// Translucent color overlay added by [`Decoration::tint`].
    Tint,
}

/// Layer shadow properties.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shadow {
    pub color: Color,
    pub radius: f32,
    pub opacity: f32,
    pub offset: Size,
}

impl Default for Shadow {
    fn default() -> Self {
        Self {
            color: Color::rgba(0, 0, 0, 255),
            radius: 3.0,
            opacity: 0.0,
            offset: Size::new(0.0, -3.0),
        }
    }
}

impl Shadow {
    /// Copy over each component that is valid, leaving the rest untouched.
    fn apply(&mut self, color: Option<Color>, radius: f32, opacity: f32, offset: Point) {
        if let Some(color) = color {
            self.color = color;
        }
        if radius.is_finite() && radius > 0.0 {
            self.radius = radius;
        }
        if (0.0..=1.0).contains(&opacity) {
            self.opacity = opacity;
        }
        if !offset.x.is_nan() {
            self.offset.w = offset.x;
        }
        if !offset.y.is_nan() {
            self.offset.h = offset.y;
        }
    }
}

/// A path-backed layer.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapeLayer {
    pub name: LayerName,
    /// Frame in the owning view's coordinates, or the parent's for
    /// [`LayerName::Shadow`].
    pub frame: Rect,
    pub path: Path,
    pub stroke_color: Option<Color>,
    pub line_width: f32,
    pub dash_pattern: Option<[f32; 2]>,
    pub round_join: bool,
    /// Only set on tint overlays.
    pub fill_color: Option<Color>,
    pub opacity: f32,
    pub corner_radius: f32,
    /// Only set on shadow layers.
    pub shadow: Option<Shadow>,
}

impl ShapeLayer {
    fn filled(name: LayerName, frame: Rect, path: Path) -> Self {
        Self {
            name,
            frame,
            path,
            stroke_color: None,
            line_width: 0.0,
            dash_pattern: None,
            round_join: false,
            fill_color: None,
            opacity: 1.0,
            corner_radius: 0.0,
            shadow: None,
        }
    }

    fn overlay(bounds: Rect, color: Color, opacity: f32, corner_radius: f32) -> Self {
        Self {
            fill_color: Some(color),
            opacity,
            corner_radius,
            ..Self::filled(LayerName::Tint, bounds, overlay_path(bounds, corner_radius))
        }
    }

    fn stroked(name: LayerName, frame: Rect, path: Path, color: Color, width: f32) -> Self {
        Self {
            stroke_color: Some(color),
            line_width: width,
            ..Self::filled(name, frame, path)
        }
    }
}

/// Uniform border drawn by the view itself.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UniformBorder {
    pub color: Color,
    pub width: f32,
}

#[derive(Clone)]
enum MaskSource {
    Shape(Shape),
    Custom(MaskProvider),
    Corners { radius: f32, sides: CornerSides },
}

#[derive(Clone)]
struct MaskState {
    source: MaskSource,
    layer: ShapeLayer,
}

#[derive(Clone, Copy)]
struct BorderRequest {
    style: BorderStyle,
    color: Color,
    width: f32,
    sides: BorderSides,
}

/// Decoration state for one view.
#[derive(Clone)]
pub struct Decoration {
    frame: Rect,
    mask: Option<MaskState>,
    /// Border layers, bottom-most first.
    sublayers: Vec<ShapeLayer>,
    border: Option<BorderRequest>,
    uniform_border: Option<UniformBorder>,
    corner_radius: f32,
    masks_to_bounds: bool,
    shadow: Shadow,
    shadow_layer: Option<ShapeLayer>,
    background: Option<Color>,
    alpha: f32,
    opaque: bool,
    /// Tint overlays, bottom-most first.
    overlays: Vec<ShapeLayer>,
}

impl Decoration {
    /// Decoration for a view occupying `frame` in its parent.
    pub fn new(frame: Rect) -> Self {
        Self {
            frame,
            mask: None,
            sublayers: Vec::new(),
            border: None,
            uniform_border: None,
            corner_radius: 0.0,
            masks_to_bounds: false,
            shadow: Shadow::default(),
            shadow_layer: None,
            background: None,
            alpha: 1.0,
            opaque: true,
            overlays: Vec::new(),
        }
    }

    pub fn frame(&self) -> Rect {
        self.frame
    }

    /// The view's own coordinate space.
    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.frame.size())
    }

    /// Install or remove a mask.
    ///
    /// `Mask::None` leaves the current mask alone when `previous` is also
    /// `None`, so a mask set up elsewhere survives a reset. Removing a mask
    /// drops the mask-shaped shadow layer and redraws any border along the
    /// plain bounds.
    pub fn mask(&mut self, mask: Mask, previous: &Mask) -> &mut Self {
        match mask {
            Mask::None => {
                if !previous.is_none() && self.mask.take().is_some() {
                    self.shadow_layer = None;
                    self.rebuild_border();
                }
            }
            Mask::Shape(shape) => self.install_mask(MaskSource::Shape(shape)),
            Mask::Custom(provider) => self.install_mask(MaskSource::Custom(provider)),
        }
        self
    }

    /// Stroke the view's outline.
    ///
    /// Any earlier border is removed first. A missing color or non-positive
    /// width only clears. With a mask, the stroke follows the mask; a solid
    /// border on every side becomes the uniform layer border; anything else
    /// strokes the selected edges.
    pub fn border(
        &mut self,
        style: BorderStyle,
        color: Option<Color>,
        width: f32,
        sides: BorderSides,
    ) -> &mut Self {
        self.clear_border();
        let Some(color) = color else {
            return self;
        };
        if width.is_nan() || width <= 0.0 {
            return self;
        }
        self.border = Some(BorderRequest {
            style,
            color,
            width,
            sides,
        });
        self.build_border();
        self
    }

    /// Round the corners named by `sides`.
    ///
    /// All four corners use the uniform corner radius. A subset replaces the
    /// mask with a rounded-rect outline. Non-positive or NaN radii are ignored.
    pub fn corner(&mut self, radius: f32, sides: CornerSides) -> &mut Self {
        if !(radius.is_finite() && radius > 0.0) {
            return self;
        }
        if sides == CornerSides::ALL {
            self.corner_radius = radius;
        } else {
            self.corner_radius = 0.0;
            self.install_mask(MaskSource::Corners { radius, sides });
        }
        self
    }

    /// Set the view's own shadow. Invalid components keep their current value.
    pub fn shadow(
        &mut self,
        color: Option<Color>,
        radius: f32,
        opacity: f32,
        offset: Point,
    ) -> &mut Self {
        self.masks_to_bounds = false;
        self.shadow.apply(color, radius, opacity, offset);
        self
    }

    /// Shadow shaped like the mask, drawn by a sibling layer below the view.
    ///
    /// Does nothing without a mask.
    pub fn mask_shadow(
        &mut self,
        color: Option<Color>,
        radius: f32,
        opacity: f32,
        offset: Point,
    ) -> &mut Self {
        let Some(mask) = &self.mask else {
            return self;
        };
        let path = mask.layer.path.clone();

        self.masks_to_bounds = false;
        self.shadow.color = Color::clear();
        self.shadow.radius = 0.0;
        self.shadow.opacity = 0.0;

        let mut shadow = Shadow::default();
        shadow.apply(color, radius, opacity, offset);
        let mut layer = ShapeLayer::filled(LayerName::Shadow, self.frame, path);
        layer.shadow = Some(shadow);
        self.shadow_layer = Some(layer);
        self
    }

    /// Set the background color, and the view opacity when it lies in
    /// `[0, 1]`. The view only counts as opaque at exactly 1.
    pub fn fill(&mut self, color: Color, opacity: f32) -> &mut Self {
        self.background = Some(color);
        if (0.0..=1.0).contains(&opacity) {
            self.alpha = opacity;
            self.opaque = opacity == 1.0;
        }
        self
    }

    /// Lay white, black and tone overlays under the view's content.
    ///
    /// Each overlay is added only when its opacity lies in `[0, 1]`, and the
    /// tone only with a color. Overlays take the current uniform corner
    /// radius and follow the view's size afterwards.
    pub fn tint(
        &mut self,
        tint_opacity: f32,
        shade_opacity: f32,
        tone: Option<Color>,
        tone_opacity: f32,
    ) -> &mut Self {
        self.add_overlay(Color::rgba(255, 255, 255, 255), tint_opacity);
        self.add_overlay(Color::rgba(0, 0, 0, 255), shade_opacity);
        if let Some(tone) = tone {
            self.add_overlay(tone, tone_opacity);
        }
        self
    }

    /// Resize or move the view. Masks built from shapes, corners or custom
    /// providers are regenerated, along with borders that depend on them.
    pub fn set_frame(&mut self, frame: Rect) -> &mut Self {
        self.frame = frame;
        self.refresh();
        self
    }

    /// Resize the view in place.
    pub fn set_bounds(&mut self, size: Size) -> &mut Self {
        self.frame.w = size.w;
        self.frame.h = size.h;
        self.refresh();
        self
    }

    pub fn set_masks_to_bounds(&mut self, clip: bool) -> &mut Self {
        self.masks_to_bounds = clip;
        self
    }

    /// Border layers, bottom-most first.
    pub fn layers(&self) -> &[ShapeLayer] {
        &self.sublayers
    }

    pub fn mask_layer(&self) -> Option<&ShapeLayer> {
        self.mask.as_ref().map(|m| &m.layer)
    }

    pub fn mask_path(&self) -> Option<&Path> {
        self.mask_layer().map(|layer| &layer.path)
    }

    pub fn uniform_border(&self) -> Option<UniformBorder> {
        self.uniform_border
    }

    pub fn corner_radius(&self) -> f32 {
        self.corner_radius
    }

    pub fn masks_to_bounds(&self) -> bool {
        self.masks_to_bounds
    }

    pub fn shadow_properties(&self) -> Shadow {
        self.shadow
    }

    pub fn shadow_layer(&self) -> Option<&ShapeLayer> {
        self.shadow_layer.as_ref()
    }

    pub fn background_color(&self) -> Option<Color> {
        self.background
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn is_opaque(&self) -> bool {
        self.opaque
    }

    /// Tint overlays, bottom-most first.
    pub fn overlays(&self) -> &[ShapeLayer] {
        &self.overlays
    }

    /// Whether `point` (in view coordinates) lands on the visible view.
    pub fn hit_test(&self, point: Point) -> bool {
        if !self.bounds().contains(point) {
            return false;
        }
        let Some(path) = self.mask_path() else {
            return true;
        };
        match tessellate::fill(path, DEFAULT_TOLERANCE) {
            Ok(mesh) => mesh.contains(point),
            Err(error) => {
                warn!(%error, "mask tessellation failed during hit test");
                false
            }
        }
    }

    fn install_mask(&mut self, source: MaskSource) {
        let name = match source {
            MaskSource::Corners { .. } => LayerName::CornerSide,
            MaskSource::Shape(_) | MaskSource::Custom(_) => LayerName::Mask,
        };
        let path = self.mask_outline(&source);
        debug!(?name, cmds = path.cmds.len(), "mask installed");
        self.mask = Some(MaskState {
            source,
            layer: ShapeLayer::filled(name, self.bounds(), path),
        });
    }

    fn mask_outline(&self, source: &MaskSource) -> Path {
        let bounds = self.bounds();
        match source {
            MaskSource::Shape(shape) => generate_path(shape, bounds),
            MaskSource::Custom(provider) => provider(bounds.size()),
            MaskSource::Corners { radius, sides } => rounded_rect_path(RoundedRect {
                rect: bounds,
                radii: RoundedRadii::for_corners(*radius, *sides),
            }),
        }
    }

    fn add_overlay(&mut self, color: Color, opacity: f32) {
        if !(0.0..=1.0).contains(&opacity) {
            return;
        }
        let radius = self.corner_radius.max(0.0);
        self.overlays
            .insert(0, ShapeLayer::overlay(self.bounds(), color, opacity, radius));
    }

    fn clear_border(&mut self) {
        self.uniform_border = None;
        self.border = None;
        self.sublayers.retain(|layer| {
            !matches!(layer.name, LayerName::BorderSide | LayerName::BorderAllSides)
        });
    }

    fn build_border(&mut self) {
        let Some(req) = self.border else {
            return;
        };
        let bounds = self.bounds();
        let layer = if let Some(mask) = &self.mask {
            ShapeLayer::stroked(
                LayerName::BorderAllSides,
                bounds,
                mask.layer.path.clone(),
                req.color,
                req.width,
            )
        } else if req.style == BorderStyle::Solid && req.sides == BorderSides::ALL {
            self.uniform_border = Some(UniformBorder {
                color: req.color,
                width: req.width,
            });
            return;
        } else {
            let mut layer = ShapeLayer::stroked(
                LayerName::BorderSide,
                bounds,
                border_path(bounds, req.sides, req.width),
                req.color,
                req.width,
            );
            if let Some(pattern) = req.style.dash_pattern() {
                layer.dash_pattern = Some(pattern);
                layer.round_join = true;
            }
            layer
        };
        self.sublayers.insert(0, layer);
    }

    fn rebuild_border(&mut self) {
        if let Some(req) = self.border {
            self.clear_border();
            self.border = Some(req);
            self.build_border();
        }
    }

    fn refresh(&mut self) {
        if let Some(source) = self.mask.as_ref().map(|m| m.source.clone()) {
            self.install_mask(source);
        }
        self.rebuild_border();
        if let Some(layer) = &mut self.shadow_layer {
            layer.frame = self.frame;
            if let Some(mask) = &self.mask {
                layer.path = mask.layer.path.clone();
            }
        }
        let bounds = self.bounds();
        for layer in &mut self.overlays {
            layer.frame = bounds;
            layer.path = overlay_path(bounds, layer.corner_radius);
        }
    }
}

fn overlay_path(bounds: Rect, corner_radius: f32) -> Path {
    rounded_rect_path(RoundedRect {
        rect: bounds,
        radii: RoundedRadii::uniform(corner_radius),
    })
}

impl fmt::Debug for Decoration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Decoration")
            .field("frame", &self.frame)
            .field("mask", &self.mask_layer())
            .field("layers", &self.sublayers)
            .field("uniform_border", &self.uniform_border)
            .field("corner_radius", &self.corner_radius)
            .field("shadow", &self.shadow)
            .field("shadow_layer", &self.shadow_layer)
            .field("background", &self.background)
            .field("alpha", &self.alpha)
            .field("overlays", &self.overlays)
            .finish()
    }
}
