//! Fluent configuration
//!
//! Settings are read from `fluent.toml` and can be overridden per run with
//! `FLUENT_*` environment variables.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use fluent_geom::shape::{
    DEFAULT_PARALLELOGRAM_ANGLE, DEFAULT_POLYGON_SIDES, DEFAULT_STAR_POINTS, DEFAULT_WAVE_OFFSET,
    DEFAULT_WAVE_WIDTH,
};
use fluent_geom::{BorderSides, Color, Shape, WaveDirection};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Default file name looked up in the working directory.
pub const CONFIG_FILE: &str = "fluent.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FluentConfig {
    pub mask: MaskConfig,
    pub border: BorderConfig,
    pub corner: CornerConfig,
    pub score: ScoreConfig,
    pub render: RenderConfig,
    pub demo: DemoConfig,
}

/// Default parameters for shape masks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaskConfig {
    pub polygon_sides: u32,
    pub star_points: u32,
    pub wave_width: f32,
    pub wave_offset: f32,
    /// Top-left angle in degrees
    pub parallelogram_angle: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BorderConfig {
    pub width: f32,
    /// Hex color, `#RGB`, `#RRGGBB` or `#AARRGGBB`
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CornerConfig {
    pub radius: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ScoreConfig {
    /// Tolerance for missing query characters; unset means strict matching
    pub fuzziness: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Lyon flattening tolerance
    pub tolerance: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub output_dir: PathBuf,
    /// Side length of each rendered tile in pixels
    pub canvas: f32,
}

impl Default for MaskConfig {
    fn default() -> Self {
        Self {
            polygon_sides: DEFAULT_POLYGON_SIDES,
            star_points: DEFAULT_STAR_POINTS,
            wave_width: DEFAULT_WAVE_WIDTH,
            wave_offset: DEFAULT_WAVE_OFFSET,
            parallelogram_angle: DEFAULT_PARALLELOGRAM_ANGLE,
        }
    }
}

impl Default for BorderConfig {
    fn default() -> Self {
        Self {
            width: 1.0,
            color: "#EDEDED".to_string(),
        }
    }
}

impl Default for CornerConfig {
    fn default() -> Self {
        Self { radius: 2.0 }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            tolerance: fluent_geom::DEFAULT_TOLERANCE,
        }
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("target/fluent-demo"),
            canvas: 160.0,
        }
    }
}

impl MaskConfig {
    /// One of each shape, parameterised from this config.
    pub fn shape_defaults(&self) -> Vec<Shape> {
        vec![
            Shape::Circle,
            Shape::Polygon {
                sides: self.polygon_sides,
            },
            Shape::Star {
                points: self.star_points,
            },
            Shape::Triangle,
            Shape::Wave {
                direction: WaveDirection::Up,
                width: self.wave_width,
                offset: self.wave_offset,
            },
            Shape::Wave {
                direction: WaveDirection::Down,
                width: self.wave_width,
                offset: self.wave_offset,
            },
            Shape::Parallelogram {
                angle: self.parallelogram_angle,
            },
            Shape::BorderSides {
                sides: BorderSides::TOP | BorderSides::BOTTOM,
                stroke_width: 2.0,
            },
        ]
    }
}

impl BorderConfig {
    pub fn color(&self) -> Color {
        Color::from_hex(&self.color)
    }
}

impl FluentConfig {
    /// Load configuration from a TOML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&content)?)
    }

    /// Load `fluent.toml` from the working directory, or defaults if it is
    /// missing or malformed.
    pub fn load_or_default() -> Self {
        match Self::load_from_file(CONFIG_FILE) {
            Ok(config) => config,
            Err(ConfigError::Io { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                debug!("no {CONFIG_FILE}, using defaults");
                Self::default()
            }
            Err(error) => {
                warn!(%error, "ignoring {CONFIG_FILE}");
                Self::default()
            }
        }
    }

    /// Environment variables take precedence over file values.
    pub fn merge_with_env(&mut self) {
        if let Some(v) = env_parse("FLUENT_POLYGON_SIDES") {
            self.mask.polygon_sides = v;
        }
        if let Some(v) = env_parse("FLUENT_STAR_POINTS") {
            self.mask.star_points = v;
        }
        if let Some(v) = env_parse("FLUENT_WAVE_WIDTH") {
            self.mask.wave_width = v;
        }
        if let Some(v) = env_parse("FLUENT_WAVE_OFFSET") {
            self.mask.wave_offset = v;
        }
        if let Some(v) = env_parse("FLUENT_PARALLELOGRAM_ANGLE") {
            self.mask.parallelogram_angle = v;
        }

        if let Some(v) = env_parse("FLUENT_BORDER_WIDTH") {
            self.border.width = v;
        }
        if let Ok(color) = std::env::var("FLUENT_BORDER_COLOR") {
            self.border.color = color;
        }

        if let Some(v) = env_parse("FLUENT_CORNER_RADIUS") {
            self.corner.radius = v;
        }

        if let Some(v) = env_parse("FLUENT_FUZZINESS") {
            self.score.fuzziness = Some(v);
        }

        if let Some(v) = env_parse("FLUENT_TOLERANCE") {
            self.render.tolerance = v;
        }

        if let Ok(dir) = std::env::var("FLUENT_OUTPUT_DIR") {
            self.demo.output_dir = PathBuf::from(dir);
        }
        if let Some(v) = env_parse("FLUENT_CANVAS") {
            self.demo.canvas = v;
        }
    }

    /// File (or defaults) first, then environment overrides.
    pub fn load() -> Self {
        let mut config = Self::load_or_default();
        config.merge_with_env();
        config
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, value = %raw, "ignoring unparsable environment override");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FluentConfig::default();
        assert_eq!(config.mask.polygon_sides, 6);
        assert_eq!(config.mask.star_points, 5);
        assert_eq!(config.border.color, "#EDEDED");
        assert_eq!(config.corner.radius, 2.0);
        assert_eq!(config.score.fuzziness, None);
        assert_eq!(config.demo.canvas, 160.0);
    }

    #[test]
    fn test_toml_serialization() {
        let config = FluentConfig::default();
        let toml_str = config.to_toml_string().unwrap();
        let parsed: FluentConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let parsed: FluentConfig = toml::from_str(
            r#"
            [mask]
            star_points = 7

            [score]
            fuzziness = 0.4
            "#,
        )
        .unwrap();
        assert_eq!(parsed.mask.star_points, 7);
        assert_eq!(parsed.mask.polygon_sides, 6);
        assert_eq!(parsed.score.fuzziness, Some(0.4));
        assert_eq!(parsed.border, BorderConfig::default());
    }

    #[test]
    fn test_load_from_missing_file() {
        let err = FluentConfig::load_from_file("does/not/exist.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_load_or_default() {
        // Should not panic even if fluent.toml doesn't exist
        let config = FluentConfig::load_or_default();
        assert!(config.render.tolerance > 0.0);
    }

    #[test]
    fn test_shape_defaults_follow_config() {
        let mask = MaskConfig {
            star_points: 8,
            ..MaskConfig::default()
        };
        let shapes = mask.shape_defaults();
        assert!(shapes.contains(&Shape::Star { points: 8 }));
        assert_eq!(shapes.len(), 8);
    }

    #[test]
    fn test_merge_with_env() {
        unsafe {
            std::env::set_var("FLUENT_STAR_POINTS", "9");
            std::env::set_var("FLUENT_BORDER_COLOR", "#FF0000");
            std::env::set_var("FLUENT_WAVE_WIDTH", "not-a-number");
        }

        let mut config = FluentConfig::default();
        config.merge_with_env();

        assert_eq!(config.mask.star_points, 9);
        assert_eq!(config.border.color(), Color::from_hex("#FF0000"));
        assert_eq!(config.mask.wave_width, DEFAULT_WAVE_WIDTH);

        unsafe {
            std::env::remove_var("FLUENT_STAR_POINTS");
            std::env::remove_var("FLUENT_BORDER_COLOR");
            std::env::remove_var("FLUENT_WAVE_WIDTH");
        }
    }
}
