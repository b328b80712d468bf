use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::caption::layer::DrawText;
use crate::compile::plan::{
    AudioCodec, AudioMix, Container, FilterStage, InputSource, MixDuration, RenderPlan,
    SubtitleBurn, Truncation, VideoCodec,
};
use crate::fit::transform::{AspectPolicy, FitChain, FitOp, ScaleDim};
use crate::foundation::core::format_secs;
use crate::foundation::error::{ReelError, ReelResult};
use crate::foundation::escape::{quote_concat_path, quote_graph_token};
use crate::timeline::builder::Timeline;

/// Label of the video chain inside a `-filter_complex` graph.
const VIDEO_OUT_LABEL: &str = "vout";

/// A file the engine expects on disk before it runs.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct SideFile {
    /// Absolute or work-dir-relative path.
    pub path: PathBuf,
    /// Full file contents.
    pub contents: String,
}

/// One fully serialized `ffmpeg` invocation.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct FfmpegJob {
    /// Plan label, used in failure messages.
    pub label: String,
    /// Arguments after the program name.
    pub args: Vec<String>,
    /// Files to write before spawning.
    pub side_files: Vec<SideFile>,
    /// Output file the job produces.
    pub output: PathBuf,
}

impl FfmpegJob {
    /// Serialize a plan.
    ///
    /// Concat timelines become `<work_dir>/input_<n>.ffconcat` side files. The engine resolves
    /// relative entries against the list's own directory, so timeline locators should already be
    /// absolute (as [`crate::assets::resolve::LocalResolver`] produces them).
    pub fn from_plan(plan: &RenderPlan, output: &Path, work_dir: &Path) -> ReelResult<Self> {
        if !plan.stage_order_is_canonical() {
            return Err(ReelError::validation(format!(
                "plan '{}' lists stages out of order: {:?}",
                plan.label,
                plan.stage_kinds()
            )));
        }

        let mut args = Vec::from(["-y", "-hide_banner", "-loglevel", "error"].map(String::from));
        let mut side_files = Vec::new();

        for input in &plan.inputs {
            match &input.source {
                InputSource::Timeline(timeline) => {
                    let path = work_dir.join(format!("input_{}.ffconcat", input.index.0));
                    args.extend(["-f", "concat", "-safe", "0"].map(String::from));
                    args.push("-i".to_string());
                    args.push(path_arg(&path)?);
                    side_files.push(SideFile {
                        path,
                        contents: concat_list(timeline),
                    });
                }
                InputSource::Media(media) => {
                    if let Some(seek) = input.seek_sec {
                        args.push("-ss".to_string());
                        args.push(format_secs(seek));
                    }
                    args.push("-i".to_string());
                    args.push(media.locator.clone());
                }
            }
        }

        let chain = video_filter(plan);
        let mixes: Vec<&AudioMix> = plan
            .stages
            .iter()
            .filter_map(|s| match s {
                FilterStage::Mix(m) => Some(m),
                _ => None,
            })
            .collect();

        if mixes.is_empty() {
            if let Some(chain) = chain {
                args.push("-vf".to_string());
                args.push(chain);
            }
        } else {
            let mut graph = Vec::with_capacity(mixes.len() + 1);
            let mut maps = Vec::new();
            if let Some(chain) = chain {
                graph.push(format!("[0:v]{chain}[{VIDEO_OUT_LABEL}]"));
                maps.push(format!("[{VIDEO_OUT_LABEL}]"));
            }
            for mix in mixes {
                graph.push(mix_graph(mix));
                maps.push(format!("[{}]", mix.output_label));
            }
            args.push("-filter_complex".to_string());
            args.push(graph.join(";"));
            for map in maps {
                args.push("-map".to_string());
                args.push(map);
            }
        }

        push_output_args(&mut args, plan);
        args.push(path_arg(output)?);

        Ok(Self {
            label: plan.label.clone(),
            args,
            side_files,
            output: output.to_path_buf(),
        })
    }

    /// Shell-style rendering for logs and `plan` output. Not used to spawn.
    pub fn command_line(&self) -> String {
        let mut out = String::from("ffmpeg");
        for arg in &self.args {
            out.push(' ');
            let plain = arg
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || "-_./:+=@,".contains(c));
            if plain && !arg.is_empty() {
                out.push_str(arg);
            } else {
                out.push_str(&quote_concat_path(arg));
            }
        }
        out
    }
}

/// Concat-list text for a timeline: header, then one `file` line per segment followed by
/// `duration` when the segment declares one.
pub fn concat_list(timeline: &Timeline) -> String {
    let mut out = String::from("ffconcat version 1.0\n");
    for seg in timeline.segments() {
        let _ = writeln!(out, "file {}", quote_concat_path(&seg.source.locator));
        if let Some(d) = seg.duration_sec {
            let _ = writeln!(out, "duration {}", format_secs(d));
        }
    }
    out
}

/// The comma-joined video filter chain (fit, format, overlays), or `None` when the plan has no
/// video stages.
pub fn video_filter(plan: &RenderPlan) -> Option<String> {
    let mut parts = Vec::new();
    for stage in &plan.stages {
        match stage {
            FilterStage::Fit(chain) => parts.extend(fit_filters(chain)),
            FilterStage::Format { format } => parts.push(format!("format={}", format.as_str())),
            FilterStage::Caption(draw) => parts.push(drawtext_filter(draw)),
            FilterStage::Subtitles(burn) => parts.push(subtitles_filter(burn)),
            FilterStage::Mix(_) => {}
        }
    }
    (!parts.is_empty()).then(|| parts.join(","))
}

/// Filters for one fit chain, in chain order.
pub fn fit_filters(chain: &FitChain) -> Vec<String> {
    chain
        .ops
        .iter()
        .map(|op| match *op {
            FitOp::Scale {
                width,
                height,
                aspect,
            } => {
                let policy = match aspect {
                    AspectPolicy::Increase => "increase",
                    AspectPolicy::Decrease => "decrease",
                };
                format!(
                    "scale={}:{}:force_original_aspect_ratio={policy}",
                    scale_dim(width, "iw"),
                    scale_dim(height, "ih")
                )
            }
            FitOp::Crop { width, height } => format!("crop={width}:{height}"),
            FitOp::Pad { width, height } => {
                format!("pad={width}:{height}:(ow-iw)/2:(oh-ih)/2")
            }
        })
        .collect()
}

fn scale_dim(dim: ScaleDim, source: &str) -> String {
    match dim {
        ScaleDim::Exact(px) => px.to_string(),
        ScaleDim::AtMostSource(px) => format!("'min({px},{source})'"),
    }
}

/// One `drawtext` filter.
///
/// Text and font arrive with their option-level escapes. Every free-form value is then quoted for
/// the graph tokenizer, so commas in expressions and quotes in text stay inside their option.
pub fn drawtext_filter(draw: &DrawText) -> String {
    let style = &draw.style;
    let mut out = format!(
        "drawtext=fontfile={}:text={}:x={}:y={}:fontsize={}:fontcolor={}",
        quote_graph_token(draw.font.as_str()),
        quote_graph_token(draw.text.as_str()),
        quote_graph_token(&draw.x),
        quote_graph_token(&draw.y),
        draw.font_size,
        style.font_color
    );
    if style.boxed {
        let _ = write!(
            out,
            ":box=1:boxcolor={}:boxborderw={}",
            style.box_color, style.box_border_px
        );
    }
    let enable = format!(
        "gte(t,{})*lt(t,{})",
        format_secs(draw.window.start_sec),
        format_secs(draw.window.end_sec)
    );
    let _ = write!(
        out,
        ":line_spacing={}:enable={}",
        style.line_spacing_px,
        quote_graph_token(&enable)
    );
    out
}

fn subtitles_filter(burn: &SubtitleBurn) -> String {
    format!("subtitles={}", quote_graph_token(burn.path.as_str()))
}

fn mix_graph(mix: &AudioMix) -> String {
    let mut parts: Vec<String> = mix
        .inputs
        .iter()
        .map(|i| format!("[{}:a]volume={}[{}]", i.input.0, format_secs(i.gain), i.label))
        .collect();
    let labels: String = mix.inputs.iter().map(|i| format!("[{}]", i.label)).collect();
    let duration = match mix.duration {
        MixDuration::Longest => "longest",
        MixDuration::Shortest => "shortest",
    };
    parts.push(format!(
        "{labels}amix=inputs={}:duration={duration}:dropout_transition={}[{}]",
        mix.inputs.len(),
        mix.dropout_transition_sec,
        mix.output_label
    ));
    parts.join(";")
}

fn push_output_args(args: &mut Vec<String>, plan: &RenderPlan) {
    let out = &plan.output;
    let mut push = |a: &str, b: String| {
        args.push(a.to_string());
        args.push(b);
    };

    if let Some(fps) = out.frame_rate {
        push("-fps_mode", "cfr".to_string());
        push("-r", fps.to_string());
    }
    match (out.video_codec, out.audio_codec) {
        (Some(VideoCodec::Copy), Some(AudioCodec::Copy)) => push("-c", "copy".to_string()),
        (video, audio) => {
            match video {
                Some(VideoCodec::H264) => push("-c:v", "libx264".to_string()),
                Some(VideoCodec::Copy) => push("-c:v", "copy".to_string()),
                None => {}
            }
            match audio {
                Some(AudioCodec::Aac) => push("-c:a", "aac".to_string()),
                Some(AudioCodec::Copy) => push("-c:a", "copy".to_string()),
                None => {}
            }
        }
    }
    if let Some(bitrate) = &out.video_bitrate {
        push("-b:v", bitrate.clone());
    }
    if let Some(frames) = out.max_video_frames {
        push("-frames:v", frames.to_string());
    }
    if let Some(q) = out.image_quality {
        push("-q:v", q.to_string());
    }
    if out.truncation == Truncation::ShortestStream {
        args.push("-shortest".to_string());
    }
    if out.container == Container::Mp4 {
        args.extend(["-movflags", "+faststart"].map(String::from));
    }
}

fn path_arg(path: &Path) -> ReelResult<String> {
    path.to_str().map(str::to_string).ok_or_else(|| {
        ReelError::validation(format!("path '{}' is not valid UTF-8", path.display()))
    })
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
