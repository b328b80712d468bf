use crate::foundation::core::{CanvasSpec, FitMode};
use crate::foundation::error::PlanError;

/// Aspect-ratio handling for a scale operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AspectPolicy {
    /// Grow the requested box on one axis until the source aspect fits (cover).
    Increase,
    /// Shrink the requested box on one axis until the source aspect fits (contain).
    Decrease,
}

/// Requested size along one scale axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleDim {
    /// Exactly this many pixels before aspect correction.
    Exact(u32),
    /// This many pixels, but never more than the source's own size on that axis.
    AtMostSource(u32),
}

impl ScaleDim {
    fn resolve(self, source: u32) -> u32 {
        match self {
            Self::Exact(px) => px,
            Self::AtMostSource(px) => px.min(source),
        }
    }
}

/// One geometric operation; operations run in chain order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum FitOp {
    /// Aspect-preserving scale into a requested box.
    Scale {
        /// Requested width.
        width: ScaleDim,
        /// Requested height.
        height: ScaleDim,
        /// How the box is corrected to the source aspect ratio.
        aspect: AspectPolicy,
    },
    /// Center crop to an exact size.
    Crop {
        /// Output width.
        width: u32,
        /// Output height.
        height: u32,
    },
    /// Center pad (letterbox) to an exact size.
    Pad {
        /// Output width.
        width: u32,
        /// Output height.
        height: u32,
    },
}

/// Ordered transform chain from a source's natural size to the output canvas.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct FitChain {
    /// Fit policy this chain implements.
    pub mode: FitMode,
    /// Operations in execution order.
    pub ops: Vec<FitOp>,
}

impl FitChain {
    /// Chain for an arbitrary target size.
    pub fn new(width: u32, height: u32, mode: FitMode) -> Self {
        let ops = match mode {
            FitMode::Cover => vec![
                FitOp::Scale {
                    width: ScaleDim::Exact(width),
                    height: ScaleDim::Exact(height),
                    aspect: AspectPolicy::Increase,
                },
                FitOp::Crop { width, height },
            ],
            FitMode::Contain => vec![
                FitOp::Scale {
                    width: ScaleDim::AtMostSource(width),
                    height: ScaleDim::AtMostSource(height),
                    aspect: AspectPolicy::Decrease,
                },
                FitOp::Pad { width, height },
            ],
        };
        Self { mode, ops }
    }

    /// Chain targeting a validated canvas.
    pub fn for_canvas(canvas: &CanvasSpec) -> Self {
        Self::new(canvas.width, canvas.height, canvas.fit)
    }

    /// Chain from a raw fit token; unknown tokens fail with [`PlanError::InvalidFitMode`].
    pub fn from_token(width: u32, height: u32, token: &str) -> Result<Self, PlanError> {
        Ok(Self::new(width, height, FitMode::parse(token)?))
    }

    /// Predict the pixel geometry this chain produces for a source of known size.
    pub fn geometry(&self, source_width: u32, source_height: u32) -> Result<FitGeometry, PlanError> {
        if source_width == 0 || source_height == 0 {
            return Err(PlanError::invalid(
                "source",
                format!("dimensions must be > 0 (got {source_width}x{source_height})"),
            ));
        }

        let mut g = FitGeometry {
            scaled_width: source_width,
            scaled_height: source_height,
            crop_x: 0,
            crop_y: 0,
            pad_x: 0,
            pad_y: 0,
            output_width: source_width,
            output_height: source_height,
        };

        for op in &self.ops {
            match *op {
                FitOp::Scale {
                    width,
                    height,
                    aspect,
                } => {
                    let (w, h) = scale_box(
                        g.output_width,
                        g.output_height,
                        width.resolve(g.output_width),
                        height.resolve(g.output_height),
                        aspect,
                    );
                    g.scaled_width = w;
                    g.scaled_height = h;
                    g.output_width = w;
                    g.output_height = h;
                }
                FitOp::Crop { width, height } => {
                    g.crop_x = g.output_width.saturating_sub(width) / 2;
                    g.crop_y = g.output_height.saturating_sub(height) / 2;
                    g.output_width = width.min(g.output_width);
                    g.output_height = height.min(g.output_height);
                }
                FitOp::Pad { width, height } => {
                    g.pad_x = width.saturating_sub(g.output_width) / 2;
                    g.pad_y = height.saturating_sub(g.output_height) / 2;
                    g.output_width = width.max(g.output_width);
                    g.output_height = height.max(g.output_height);
                }
            }
        }

        Ok(g)
    }
}

/// Pixel geometry produced by a [`FitChain`] for one source size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct FitGeometry {
    /// Width after the scale step.
    pub scaled_width: u32,
    /// Height after the scale step.
    pub scaled_height: u32,
    /// Left offset of the crop window inside the scaled image.
    pub crop_x: u32,
    /// Top offset of the crop window inside the scaled image.
    pub crop_y: u32,
    /// Left letterbox width.
    pub pad_x: u32,
    /// Top letterbox height.
    pub pad_y: u32,
    /// Final width.
    pub output_width: u32,
    /// Final height.
    pub output_height: u32,
}

// Mirrors the engine's aspect correction: each axis is recomputed from the other with
// round-to-nearest, then the smaller (decrease) or larger (increase) candidate wins.
fn scale_box(src_w: u32, src_h: u32, box_w: u32, box_h: u32, aspect: AspectPolicy) -> (u32, u32) {
    let tmp_w = rescale(box_h, src_w, src_h);
    let tmp_h = rescale(box_w, src_h, src_w);
    let (w, h) = match aspect {
        AspectPolicy::Decrease => (tmp_w.min(box_w), tmp_h.min(box_h)),
        AspectPolicy::Increase => (tmp_w.max(box_w), tmp_h.max(box_h)),
    };
    (w.max(1), h.max(1))
}

fn rescale(a: u32, b: u32, c: u32) -> u32 {
    let (a, b, c) = (u64::from(a), u64::from(b), u64::from(c));
    let v = (a * b + c / 2) / c;
    u32::try_from(v).unwrap_or(u32::MAX)
}

#[cfg(test)]
#[path = "../../tests/unit/fit/transform.rs"]
mod tests;
