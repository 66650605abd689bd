//! fluent-geom: geometry primitives, shape path generation and tessellation.

mod error;
pub mod border;
pub mod color;
pub mod corner;
pub mod geometry;
pub mod shape;
pub mod tessellate;

pub use border::{BorderLine, BorderSides, BorderStyle, border_lines, border_path};
pub use color::{Color, ColorLinPremul};
pub use corner::{CornerSides, RoundedRadii, RoundedRect, rounded_rect_path};
pub use error::GeometryError;
pub use geometry::{EdgeInsets, FillRule, Path, PathCmd, Point, Rect, Size};
pub use shape::{Shape, WaveDirection, generate_path};
pub use tessellate::{DEFAULT_TOLERANCE, Mesh};
