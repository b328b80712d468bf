/// Convenience result type used across reelkit.
pub type ReelResult<T> = Result<T, ReelError>;

/// Typed planning failures.
///
/// Every variant carries the offending field or value so callers can render a precise message.
/// Planning is pure: retrying a failed plan with the same input reproduces the same error.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum PlanError {
    /// A list that must hold at least one source was empty.
    #[error("'{field}' must contain at least one entry")]
    EmptyInput {
        /// Request field name.
        field: &'static str,
    },

    /// A duration that must be finite and strictly positive was not.
    #[error("'{field}' must be a finite number of seconds > 0 (got {value})")]
    InvalidDuration {
        /// Request field name.
        field: &'static str,
        /// Offending value.
        value: f64,
    },

    /// The fit mode token is not one of `cover` / `contain`.
    #[error("unsupported fit mode '{value}' (expected 'cover' or 'contain')")]
    InvalidFitMode {
        /// Offending token.
        value: String,
    },

    /// A caption's visibility window is empty or malformed.
    #[error(
        "caption #{index} has an invalid window [{start}, {end}): start must be >= 0 and before end"
    )]
    InvalidCaptionWindow {
        /// Position of the caption in the request list.
        index: usize,
        /// Declared start in seconds.
        start: f64,
        /// Declared end in seconds.
        end: f64,
    },

    /// The chosen operation needs a field the request omitted.
    #[error("'{field}' is required for this operation")]
    MissingRequiredField {
        /// Request field name.
        field: &'static str,
    },

    /// A field is present but out of range.
    #[error("'{field}' {reason}")]
    InvalidValue {
        /// Request field name.
        field: &'static str,
        /// Human-readable constraint that was violated.
        reason: String,
    },
}

impl PlanError {
    /// Build a [`PlanError::InvalidValue`] value.
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            reason: reason.into(),
        }
    }
}

/// Top-level error taxonomy used by reelkit APIs.
#[derive(thiserror::Error, Debug)]
pub enum ReelError {
    /// The request could not be turned into a render plan.
    #[error("planning error: {0}")]
    Plan(#[from] PlanError),

    /// Invalid configuration or asset references.
    #[error("validation error: {0}")]
    Validation(String),

    /// The rendering engine ran and failed. Never produced by the planner.
    #[error("render execution failed: {label} exited with {status}: {stderr}")]
    Render {
        /// Operation label used for diagnostics.
        label: String,
        /// Exit status as reported by the OS.
        status: String,
        /// Trimmed stderr output from the engine.
        stderr: String,
    },

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReelError {
    /// Build a [`ReelError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ReelError::Render`] value.
    pub fn render(
        label: impl Into<String>,
        status: impl Into<String>,
        stderr: impl Into<String>,
    ) -> Self {
        Self::Render {
            label: label.into(),
            status: status.into(),
            stderr: stderr.into(),
        }
    }

    /// Build a [`ReelError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Return the planning error when this failure happened before any rendering.
    pub fn as_plan_error(&self) -> Option<&PlanError> {
        match self {
            Self::Plan(e) => Some(e),
            _ => None,
        }
    }

    /// `true` when the rendering engine itself failed.
    pub fn is_render_failure(&self) -> bool {
        matches!(self, Self::Render { .. })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
