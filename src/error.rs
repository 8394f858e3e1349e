//! Error types and handling for the `Tripsmith` pipeline

use std::fmt;

use thiserror::Error;

/// One of the four sequential pipeline stages.
///
/// Carried inside [`TripsmithError::ResponseShape`] so a caller always
/// learns which stage rejected the model output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Intent analysis (trip request -> travel summary)
    IntentAnalysis,
    /// Skeleton planning (summary -> day-by-day skeleton)
    SkeletonPlanning,
    /// Day detailing (one skeleton day -> markdown narrative)
    DayDetailing,
    /// Logistics generation (itinerary -> pre-departure checklist)
    LogisticsGeneration,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::IntentAnalysis => "intent analysis",
            Stage::SkeletonPlanning => "skeleton planning",
            Stage::DayDetailing => "day detailing",
            Stage::LogisticsGeneration => "logistics generation",
        };
        write!(f, "{name}")
    }
}

/// Main error type for the `Tripsmith` pipeline
#[derive(Error, Debug)]
pub enum TripsmithError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Chat backend communication errors (network, auth, quota, status).
    /// Always surfaced as an error, never as content-shaped text.
    #[error("Chat backend error: {message}")]
    Backend { message: String },

    /// Model output that does not match the stage's declared response
    /// shape, or violates a stage contract. Fatal for the current run.
    #[error("Response shape error during {stage}: {message}")]
    ResponseShape { stage: Stage, message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl TripsmithError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new backend error
    pub fn backend<S: Into<String>>(message: S) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }

    /// Create a new response-shape error for the given stage
    pub fn response_shape<S: Into<String>>(stage: Stage, message: S) -> Self {
        Self::ResponseShape {
            stage,
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// The pipeline stage this error is attributed to, if any
    #[must_use]
    pub fn stage(&self) -> Option<Stage> {
        match self {
            TripsmithError::ResponseShape { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            TripsmithError::Config { .. } => {
                "Configuration error. Please check your config file and API key.".to_string()
            }
            TripsmithError::Backend { .. } => {
                "Unable to reach the chat backend. Please check your network and API key."
                    .to_string()
            }
            TripsmithError::ResponseShape { stage, message } => {
                format!("The {stage} stage returned unusable output: {message}")
            }
            TripsmithError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            TripsmithError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}
