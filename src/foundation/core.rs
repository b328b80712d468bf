use std::fmt;
use std::str::FromStr;

use crate::foundation::error::PlanError;

/// Policy for reconciling a source's aspect ratio with a fixed output canvas.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum FitMode {
    /// Scale to cover the canvas, then center-crop the overflow.
    Cover,
    /// Scale down to fit inside the canvas, then letterbox.
    #[default]
    Contain,
}

impl FitMode {
    /// Parse a request token (`cover` / `contain`, case-insensitive).
    pub fn parse(token: &str) -> Result<Self, PlanError> {
        match token.trim().to_ascii_lowercase().as_str() {
            "cover" => Ok(Self::Cover),
            "contain" => Ok(Self::Contain),
            _ => Err(PlanError::InvalidFitMode {
                value: token.to_string(),
            }),
        }
    }

    /// Parse an optional token, falling back to `default` when absent.
    pub fn parse_or(token: Option<&str>, default: Self) -> Result<Self, PlanError> {
        token.map_or(Ok(default), Self::parse)
    }

    /// Canonical lowercase token.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cover => "cover",
            Self::Contain => "contain",
        }
    }
}

impl FromStr for FitMode {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for FitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Target output canvas for one planning call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CanvasSpec {
    /// Output width in pixels (even).
    pub width: u32,
    /// Output height in pixels (even).
    pub height: u32,
    /// Locked output frame rate.
    pub fps: u32,
    /// Aspect-fit policy.
    pub fit: FitMode,
}

impl CanvasSpec {
    /// Build a validated canvas.
    ///
    /// Width and height must be non-zero and even since output is 4:2:0 chroma-subsampled.
    pub fn new(width: u32, height: u32, fps: u32, fit: FitMode) -> Result<Self, PlanError> {
        check_dimensions(width, height)?;
        if fps == 0 {
            return Err(PlanError::invalid("fps", "must be > 0"));
        }
        Ok(Self {
            width,
            height,
            fps,
            fit,
        })
    }
}

/// Require non-zero, even output dimensions.
pub fn check_dimensions(width: u32, height: u32) -> Result<(), PlanError> {
    for (field, value) in [("width", width), ("height", height)] {
        if value == 0 {
            return Err(PlanError::invalid(field, "must be > 0"));
        }
        if !value.is_multiple_of(2) {
            return Err(PlanError::invalid(
                field,
                format!("must be even for yuv420p output (got {value})"),
            ));
        }
    }
    Ok(())
}

/// Require a finite, strictly positive number of seconds.
pub fn require_positive_secs(field: &'static str, value: f64) -> Result<f64, PlanError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(PlanError::InvalidDuration { field, value });
    }
    Ok(value)
}

/// Require a finite, non-negative number.
pub fn require_non_negative(field: &'static str, value: f64) -> Result<f64, PlanError> {
    if !value.is_finite() || value < 0.0 {
        return Err(PlanError::invalid(
            field,
            format!("must be finite and >= 0 (got {value})"),
        ));
    }
    Ok(value)
}

/// Format seconds the way the engine reads them: shortest round-trip decimal.
pub fn format_secs(secs: f64) -> String {
    format!("{secs}")
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
