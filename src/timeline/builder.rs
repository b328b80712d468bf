use crate::foundation::core::require_positive_secs;
use crate::foundation::error::PlanError;

/// Role of an asset inside a request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Still image shown for a fixed duration.
    Image,
    /// Audio-only track.
    Audio,
    /// Video file (with or without audio).
    Video,
    /// Subtitle file burned into a video.
    Subtitles,
}

/// One resolved input asset.
///
/// `index` is the asset's position among the request's sources of the same role and never
/// changes after resolution.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub struct MediaSource {
    /// Position among sources of the same role.
    pub index: usize,
    /// Local handle the engine can open (usually a filesystem path).
    pub locator: String,
    /// Asset role.
    pub kind: MediaKind,
}

impl MediaSource {
    /// Build a source reference.
    pub fn new(index: usize, locator: impl Into<String>, kind: MediaKind) -> Self {
        Self {
            index,
            locator: locator.into(),
            kind,
        }
    }

    /// Index a list of locators as sources of one kind, preserving order.
    pub fn indexed<I, S>(locators: I, kind: MediaKind) -> Vec<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        locators
            .into_iter()
            .enumerate()
            .map(|(index, locator)| Self::new(index, locator, kind))
            .collect()
    }
}

/// A `(source, duration)` pair in presentation order.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TimelineSegment {
    /// Source shown during this segment.
    pub source: MediaSource,
    /// Display duration; `None` means "no explicit duration" (terminal hold, or natural length).
    pub duration_sec: Option<f64>,
}

/// Ordered presentation timeline fed to the engine as a single concat input.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Timeline {
    segments: Vec<TimelineSegment>,
}

impl Timeline {
    /// Segments in presentation order.
    pub fn segments(&self) -> &[TimelineSegment] {
        &self.segments
    }

    /// Number of segments (including a terminal hold segment, if any).
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// `true` when the timeline has no segments. Builders never produce one.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Sum of explicit durations; `None` when no segment declares one.
    pub fn total_duration_sec(&self) -> Option<f64> {
        let mut total = None;
        for d in self.segments.iter().filter_map(|s| s.duration_sec) {
            *total.get_or_insert(0.0) += d;
        }
        total
    }
}

/// Stateless timeline construction.
pub struct TimelineBuilder;

impl TimelineBuilder {
    /// Build an image slideshow timeline.
    ///
    /// Invariant: for `N` images the result has exactly `N + 1` segments. The first `N` pair each
    /// image with `per_image_sec`; the last repeats the final image with no duration. Concat
    /// timelines end an entry's duration at the start of the next entry, so without the repeated
    /// sentinel the final image would not be held for its full duration.
    #[tracing::instrument(skip(sources), fields(images = sources.len()))]
    pub fn slideshow(sources: &[MediaSource], per_image_sec: f64) -> Result<Timeline, PlanError> {
        let Some(last) = sources.last() else {
            return Err(PlanError::EmptyInput { field: "images" });
        };
        let per_image_sec = require_positive_secs("perImageSec", per_image_sec)?;

        let mut segments = Vec::with_capacity(sources.len() + 1);
        segments.extend(sources.iter().map(|source| TimelineSegment {
            source: source.clone(),
            duration_sec: Some(per_image_sec),
        }));
        segments.push(TimelineSegment {
            source: last.clone(),
            duration_sec: None,
        });

        tracing::debug!(segments = segments.len(), "built slideshow timeline");
        Ok(Timeline { segments })
    }

    /// Build a back-to-back sequence where every source plays for its natural length.
    pub fn sequence(sources: &[MediaSource]) -> Result<Timeline, PlanError> {
        if sources.is_empty() {
            return Err(PlanError::EmptyInput { field: "videos" });
        }
        Ok(Timeline {
            segments: sources
                .iter()
                .map(|source| TimelineSegment {
                    source: source.clone(),
                    duration_sec: None,
                })
                .collect(),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/builder.rs"]
mod tests;
