use thiserror::Error;

/// Errors raised by the timeline layout engine.
///
/// Only `UnsupportedScale` ever reaches a caller of the view builder; a bad
/// focus date is recovered by substituting today.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimelineError {
    #[error("unsupported timeline scale '{0}' (expected week, month or quarter)")]
    UnsupportedScale(String),

    #[error("invalid focus date '{0}' (expected YYYY-MM-DD)")]
    InvalidDateInput(String),

    #[error("timeline window starting {0} runs past the supported calendar range")]
    DateOutOfRange(chrono::NaiveDate),
}
