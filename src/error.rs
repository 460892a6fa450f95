use thiserror::Error;

/// Failures of the review subsystem. None of them is fatal to the page.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReviewError {
    /// Remote transport or storage failure on load or write.
    #[error("review store unavailable: {0}")]
    StoreUnavailable(String),

    /// The locally persisted value could not be read back.
    #[error("stored reviews could not be parsed: {0}")]
    ParseFailure(String),

    /// Submission attempted without a star rating (or outside 1-5).
    #[error("invalid rating {0}, expected 1 to 5")]
    InvalidRating(u8),

    /// The initial load has not finished; there is nothing to append to yet.
    #[error("reviews are still loading")]
    NotLoaded,

    /// A remote write for this form is still pending.
    #[error("a review submission is already in flight")]
    SubmissionInFlight,
}

impl From<serde_json::Error> for ReviewError {
    fn from(err: serde_json::Error) -> Self {
        ReviewError::ParseFailure(err.to_string())
    }
}
