//! fluent: view-decoration geometry and string helpers.
//!
//! This crate re-exports the workspace members so applications can depend on a
//! single package:
//! - [`geom`]: points, rects, paths, mask/border/corner path generation, colors
//! - [`view`]: decoration and keyboard-avoidance adapters
//! - [`text`]: fuzzy scoring, string helpers, HTML decoding, text attributes
//! - [`config`]: `fluent.toml` loading

pub use fluent_config as config;
pub use fluent_geom as geom;
pub use fluent_text as text;
pub use fluent_view as view;

pub use fluent_geom::{Path, PathCmd, Point, Rect, Shape, generate_path};
pub use fluent_text::fuzzy_score;
