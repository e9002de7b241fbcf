//! error.rs — typed error surface. `Display` carries the exact user-visible
//! message; HTTP status mapping happens at the API edge.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalyzeError {
    /// Input was empty or whitespace-only. The caller may resubmit; no
    /// state changes.
    #[error("Please enter some text to analyze.")]
    EmptyInput,

    /// Networked-classifier path only: connectivity failure or non-success
    /// response. No automatic retry; the caller resubmits explicitly.
    #[error("Unable to reach server. Try again in a moment.")]
    Transport {
        /// Diagnostic detail for logs; never shown to the caller.
        detail: String,
    },
}

impl From<reqwest::Error> for AnalyzeError {
    fn from(err: reqwest::Error) -> Self {
        AnalyzeError::Transport {
            detail: err.to_string(),
        }
    }
}
