use thiserror::Error;

/// Failures raised by the tour model and the navigation core.
///
/// Audio problems never show up here: a pack whose asset cannot play is
/// simply silent.
#[derive(Debug, Error)]
pub enum PanoError {
    #[error("no state with id `{0}` in the tour")]
    UnknownState(String),
    #[error("state id `{0}` appears more than once")]
    DuplicateState(String),
    #[error("state `{from}` links to missing state `{to}`")]
    DanglingLink { from: String, to: String },
    #[error("tour has no states")]
    EmptyTour,
    #[error("malformed JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type PanoResult<T> = Result<T, PanoError>;
