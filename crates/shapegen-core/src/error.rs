use thiserror::Error;

#[derive(Debug, Error)]
pub enum MeshError {
    #[error("Invalid parameter `{field}`: {reason}")]
    InvalidParameter { field: &'static str, reason: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Too many vertices: {count} cannot be addressed by 32-bit indices")]
    TooManyVertices { count: usize },

    #[error("Topology error: {0}")]
    Topology(String),
}

impl MeshError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            field,
            reason: reason.into(),
        }
    }

    /// Name of the offending parameter, if this is a parameter error.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::InvalidParameter { field, .. } => Some(field),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, MeshError>;
