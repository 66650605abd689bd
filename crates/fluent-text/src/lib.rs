//! fluent-text: fuzzy scoring, string helpers and attributed text.

mod error;
pub mod attributed;
pub mod attributes;
pub mod graphemes;
pub mod html;
pub mod score;
pub mod string;

pub use attributed::AttributedText;
pub use attributes::{
    FontSpec, LigatureStyle, LineBreakMode, ParagraphStyle, TextAlignment, TextAttributes,
    TextEffect, TextShadow, UnderlineStyle, VerticalGlyphForm, WritingDirection,
};
pub use error::AttributedTextError;
pub use html::decode_html;
pub use score::{Ranked, StringScore, fuzzy_score, rank};
pub use string::StrExt;
