//! Character and paragraph attributes with chainable setters.
//!
//! Every attribute is optional. Merging two attribute sets keeps the left
//! side's values except where the right side sets its own.

use std::ops::Add;

use fluent_geom::{Color, Size};

#[derive(Clone, Debug, PartialEq)]
pub struct FontSpec {
    pub name: String,
    pub size: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LigatureStyle {
    None,
    #[default]
    Default,
    All,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum UnderlineStyle {
    #[default]
    None,
    Single,
    Thick,
    Double,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum VerticalGlyphForm {
    #[default]
    Horizontal,
    Vertical,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextEffect {
    Letterpress,
}

impl TextEffect {
    pub fn name(&self) -> &'static str {
        match self {
            TextEffect::Letterpress => "letterpress",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "letterpress" => Some(TextEffect::Letterpress),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextShadow {
    pub color: Option<Color>,
    pub offset: Size,
    pub blur_radius: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextAlignment {
    #[default]
    Natural,
    Left,
    Center,
    Right,
    Justified,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LineBreakMode {
    #[default]
    WordWrapping,
    CharWrapping,
    Clipping,
    TruncatingHead,
    TruncatingTail,
    TruncatingMiddle,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum WritingDirection {
    #[default]
    Natural,
    LeftToRight,
    RightToLeft,
}

macro_rules! optional_setters {
    ($($name:ident: $ty:ty),* $(,)?) => {
        $(
            pub fn $name(mut self, value: $ty) -> Self {
                self.$name = Some(value);
                self
            }
        )*
    };
}

macro_rules! merge_fields {
    ($lhs:expr, $rhs:expr, [$($name:ident),* $(,)?] $(, $field:ident: $value:expr)*) => {
        Self {
            $($name: $rhs.$name.clone().or_else(|| $lhs.$name.clone()),)*
            $($field: $value,)*
        }
    };
}

/// Paragraph-level layout settings.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParagraphStyle {
    pub alignment: Option<TextAlignment>,
    pub first_line_head_indent: Option<f32>,
    pub head_indent: Option<f32>,
    pub tail_indent: Option<f32>,
    pub line_height_multiple: Option<f32>,
    pub maximum_line_height: Option<f32>,
    pub minimum_line_height: Option<f32>,
    pub line_spacing: Option<f32>,
    pub paragraph_spacing: Option<f32>,
    pub paragraph_spacing_before: Option<f32>,
    pub line_break_mode: Option<LineBreakMode>,
    pub base_writing_direction: Option<WritingDirection>,
}

impl ParagraphStyle {
    optional_setters! {
        alignment: TextAlignment,
        first_line_head_indent: f32,
        head_indent: f32,
        tail_indent: f32,
        line_height_multiple: f32,
        maximum_line_height: f32,
        minimum_line_height: f32,
        line_spacing: f32,
        paragraph_spacing: f32,
        paragraph_spacing_before: f32,
        line_break_mode: LineBreakMode,
        base_writing_direction: WritingDirection,
    }

    /// Field-by-field merge; `other` wins where it is set.
    pub fn merge(&self, other: &ParagraphStyle) -> ParagraphStyle {
        merge_fields!(
            self,
            other,
            [
                alignment,
                first_line_head_indent,
                head_indent,
                tail_indent,
                line_height_multiple,
                maximum_line_height,
                minimum_line_height,
                line_spacing,
                paragraph_spacing,
                paragraph_spacing_before,
                line_break_mode,
                base_writing_direction,
            ]
        )
    }

    pub fn is_empty(&self) -> bool {
        *self == ParagraphStyle::default()
    }
}

impl Add for ParagraphStyle {
    type Output = ParagraphStyle;

    fn add(self, rhs: ParagraphStyle) -> ParagraphStyle {
        self.merge(&rhs)
    }
}

/// Character attributes plus a paragraph style.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextAttributes {
    pub font: Option<FontSpec>,
    pub ligature: Option<LigatureStyle>,
    pub kern: Option<f32>,
    pub strikethrough_style: Option<UnderlineStyle>,
    pub strikethrough_color: Option<Color>,
    pub underline_style: Option<UnderlineStyle>,
    pub underline_color: Option<Color>,
    pub stroke_color: Option<Color>,
    pub stroke_width: Option<f32>,
    pub foreground_color: Option<Color>,
    pub background_color: Option<Color>,
    pub text_effect: Option<TextEffect>,
    pub link: Option<String>,
    pub baseline_offset: Option<f32>,
    pub obliqueness: Option<f32>,
    pub expansion: Option<f32>,
    pub vertical_glyph_form: Option<VerticalGlyphForm>,
    pub shadow: Option<TextShadow>,
    pub attachment: Option<String>,
    pub paragraph: ParagraphStyle,
}

impl TextAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn font(mut self, name: impl Into<String>, size: f32) -> Self {
        self.font = Some(FontSpec {
            name: name.into(),
            size,
        });
        self
    }

    pub fn link(mut self, url: impl Into<String>) -> Self {
        self.link = Some(url.into());
        self
    }

    pub fn attachment(mut self, name: impl Into<String>) -> Self {
        self.attachment = Some(name.into());
        self
    }

    pub fn shadow(mut self, color: Option<Color>, offset: Size, blur_radius: f32) -> Self {
        self.shadow = Some(TextShadow {
            color,
            offset,
            blur_radius,
        });
        self
    }

    optional_setters! {
        ligature: LigatureStyle,
        kern: f32,
        strikethrough_style: UnderlineStyle,
        strikethrough_color: Color,
        underline_style: UnderlineStyle,
        underline_color: Color,
        stroke_color: Color,
        stroke_width: f32,
        foreground_color: Color,
        background_color: Color,
        text_effect: TextEffect,
        baseline_offset: f32,
        obliqueness: f32,
        expansion: f32,
        vertical_glyph_form: VerticalGlyphForm,
    }

    pub fn paragraph_style(mut self, style: ParagraphStyle) -> Self {
        self.paragraph = style;
        self
    }

    pub fn alignment(mut self, alignment: TextAlignment) -> Self {
        self.paragraph.alignment = Some(alignment);
        self
    }

    pub fn line_spacing(mut self, value: f32) -> Self {
        self.paragraph.line_spacing = Some(value);
        self
    }

    pub fn line_break_mode(mut self, mode: LineBreakMode) -> Self {
        self.paragraph.line_break_mode = Some(mode);
        self
    }

    /// Combine with `other`; `other` wins per attribute and paragraph
    /// styles merge field by field.
    pub fn merge(&self, other: &TextAttributes) -> TextAttributes {
        merge_fields!(
            self,
            other,
            [
                font,
                ligature,
                kern,
                strikethrough_style,
                strikethrough_color,
                underline_style,
                underline_color,
                stroke_color,
                stroke_width,
                foreground_color,
                background_color,
                text_effect,
                link,
                baseline_offset,
                obliqueness,
                expansion,
                vertical_glyph_form,
                shadow,
                attachment,
            ],
            paragraph: self.paragraph.merge(&other.paragraph)
        )
    }
}

impl Add for TextAttributes {
    type Output = TextAttributes;

    fn add(self, rhs: TextAttributes) -> TextAttributes {
        self.merge(&rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setters_chain() {
        let attrs = TextAttributes::new()
            .font("Avenir", 14.0)
            .kern(1.5)
            .underline_style(UnderlineStyle::Single)
            .alignment(TextAlignment::Center);
        assert_eq!(attrs.font.as_ref().map(|f| f.size), Some(14.0));
        assert_eq!(attrs.kern, Some(1.5));
        assert_eq!(attrs.paragraph.alignment, Some(TextAlignment::Center));
        assert_eq!(attrs.link, None);
    }

    #[test]
    fn right_side_wins_on_merge() {
        let base = TextAttributes::new()
            .font("Avenir", 14.0)
            .foreground_color(Color::grey80())
            .line_spacing(4.0);
        let overlay = TextAttributes::new()
            .foreground_color(Color::grey20())
            .alignment(TextAlignment::Right);
        let merged = base.clone() + overlay;
        assert_eq!(merged.font, base.font);
        assert_eq!(merged.foreground_color, Some(Color::grey20()));
        assert_eq!(merged.paragraph.line_spacing, Some(4.0));
        assert_eq!(merged.paragraph.alignment, Some(TextAlignment::Right));
    }

    #[test]
    fn merging_empty_is_identity() {
        let attrs = TextAttributes::new().obliqueness(0.2).link("https://example.org");
        assert_eq!(attrs.merge(&TextAttributes::new()), attrs);
        assert_eq!(TextAttributes::new().merge(&attrs), attrs);
    }

    #[test]
    fn text_effect_names() {
        assert_eq!(TextEffect::from_name("letterpress"), Some(TextEffect::Letterpress));
        assert_eq!(TextEffect::from_name("emboss"), None);
        assert_eq!(TextEffect::Letterpress.name(), "letterpress");
    }
}
