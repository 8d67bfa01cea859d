use std::fmt;

/// What kind of record a lookup was for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Object,
    Camera,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Object => f.write_str("object"),
            RecordKind::Camera => f.write_str("camera"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RelationError {
    #[error("{kind} {id} not found")]
    NotFound { kind: RecordKind, id: i64 },

    #[error("camera {camera_id} coincides with the centroid of object {reference_id} in XY; azimuth is undefined")]
    DegenerateGeometry { camera_id: i64, reference_id: i64 },

    #[error("scale factor must be finite and non-negative, got {0}")]
    InvalidScale(f64),

    #[error("lateral margin must be finite and non-negative, got {0}")]
    InvalidMargin(f64),

    #[error("object {id} has a bounding box with min > max")]
    InvalidBox { id: i64 },

    #[error("camera {id} has a non-finite position")]
    InvalidCamera { id: i64 },

    #[error("duplicate {kind} id {id}")]
    DuplicateId { kind: RecordKind, id: i64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed scene document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed configuration: {0}")]
    Config(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, RelationError>;
