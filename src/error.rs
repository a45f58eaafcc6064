use thiserror::Error;

pub type Result<T> = std::result::Result<T, TreemapError>;

/// Failures of the treemap pipeline.
///
/// Everything except `FetchFailure` is structural: the render attempt that hit
/// it is abandoned before anything reaches a surface.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TreemapError {
    #[error("malformed tree at '{node}': {message}")]
    MalformedTree { node: String, message: String },

    #[error("invalid layout bounds {width}x{height} (padding {padding})")]
    InvalidBounds {
        width: f64,
        height: f64,
        padding: f64,
    },

    #[error("node '{0}' has no depth-1 ancestor")]
    Unrooted(String),

    #[error("category '{0}' is not in the color table")]
    UnknownCategory(String),

    #[error("color palette is empty")]
    InvalidPalette,

    #[error("failed to fetch dataset '{dataset}': {message}")]
    FetchFailure { dataset: String, message: String },
}

impl TreemapError {
    pub(crate) fn malformed(node: &str, message: impl Into<String>) -> Self {
        Self::MalformedTree {
            node: node.to_string(),
            message: message.into(),
        }
    }

    pub(crate) fn fetch(dataset: &str, message: impl ToString) -> Self {
        Self::FetchFailure {
            dataset: dataset.to_string(),
            message: message.to_string(),
        }
    }

    /// Structural errors abort a render; fetch failures only skip it.
    pub fn is_structural(&self) -> bool {
        !matches!(self, Self::FetchFailure { .. })
    }
}
