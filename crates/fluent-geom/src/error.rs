use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("tessellation failed: {0}")]
    Tessellation(String),
}
