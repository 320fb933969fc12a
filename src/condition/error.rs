use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A study condition that cannot be turned into a visualization. These are
/// deployment problems and are shown to the operator as-is.
#[derive(Debug, Error)]
pub enum ConditionError {
    #[error("no layout mode configured; pass --layout or set \"layout\" in the condition file")]
    MissingLayout,
    #[error("unknown layout mode {0:?}; expected one of: {expected}", expected = super::VariantKind::selector_list())]
    UnknownLayout(String),
    #[error("cutoffs must be finite numbers (like = {like}, dislike = {dislike})")]
    NonFiniteCutoff { like: f32, dislike: f32 },
    #[error("dislike cutoff {dislike} is above like cutoff {like}")]
    InvertedCutoffs { like: f32, dislike: f32 },
    #[error("failed to read condition file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse condition file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
