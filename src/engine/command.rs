//! FFmpeg command builder and external tool runner

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tracing::{debug, warn};

use crate::error::{ShortxError, ShortxResult};

/// Default timeout for a single external tool invocation. A hung encoder
/// otherwise blocks the pipeline forever.
pub const DEFAULT_TOOL_TIMEOUT_SECS: u64 = 600;

/// Builder for ffmpeg argument lists. Supports multiple inputs (montage
/// feeds clip + narration + music + watermark into one invocation); the
/// pre-input arguments (`-ss`, `-t`) apply to the first input only.
#[derive(Debug, Clone, Default)]
pub struct FfmpegCommand {
    pre_input_args: Vec<String>,
    inputs: Vec<PathBuf>,
    output_args: Vec<String>,
    output: PathBuf,
}

impl FfmpegCommand {
    pub fn new(output: impl AsRef<Path>) -> Self {
        Self {
            pre_input_args: Vec::new(),
            inputs: Vec::new(),
            output_args: Vec::new(),
            output: output.as_ref().to_path_buf(),
        }
    }

    /// Add an input file; returns its ffmpeg input index.
    pub fn push_input(&mut self, path: impl AsRef<Path>) -> usize {
        self.inputs.push(path.as_ref().to_path_buf());
        self.inputs.len() - 1
    }

    /// Add an input file (builder form).
    pub fn input(mut self, path: impl AsRef<Path>) -> Self {
        self.inputs.push(path.as_ref().to_path_buf());
        self
    }

    /// Seek position before the first input.
    pub fn seek(mut self, seconds: f64) -> Self {
        self.pre_input_args.push("-ss".to_string());
        self.pre_input_args.push(format!("{seconds:.3}"));
        self
    }

    /// Read duration for the first input.
    pub fn read_duration(mut self, seconds: f64) -> Self {
        self.pre_input_args.push("-t".to_string());
        self.pre_input_args.push(format!("{seconds:.3}"));
        self
    }

    /// Add an output-side argument (after the `-i` list).
    pub fn output_arg(mut self, arg: impl Into<String>) -> Self {
        self.output_args.push(arg.into());
        self
    }

    /// Add multiple output-side arguments.
    pub fn output_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.output_args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn video_filter(self, filter: impl Into<String>) -> Self {
        self.output_arg("-vf").output_arg(filter)
    }

    pub fn filter_complex(self, graph: impl Into<String>) -> Self {
        self.output_arg("-filter_complex").output_arg(graph)
    }

    pub fn map(self, spec: impl Into<String>) -> Self {
        self.output_arg("-map").output_arg(spec)
    }

    pub fn video_codec(self, codec: impl Into<String>) -> Self {
        self.output_arg("-c:v").output_arg(codec)
    }

    pub fn audio_codec(self, codec: impl Into<String>) -> Self {
        self.output_arg("-c:a").output_arg(codec)
    }

    pub fn crf(self, crf: u8) -> Self {
        self.output_arg("-crf").output_arg(crf.to_string())
    }

    pub fn preset(self, preset: impl Into<String>) -> Self {
        self.output_arg("-preset").output_arg(preset)
    }

    pub fn audio_bitrate(self, bitrate: impl Into<String>) -> Self {
        self.output_arg("-b:a").output_arg(bitrate)
    }

    pub fn frame_rate(self, fps: u32) -> Self {
        self.output_arg("-r").output_arg(fps.to_string())
    }

    pub fn pixel_format(self, format: impl Into<String>) -> Self {
        self.output_arg("-pix_fmt").output_arg(format)
    }

    /// Build the final argument vector.
    pub fn build_args(&self) -> Vec<String> {
        let mut args = vec!["-y".to_string(), "-v".to_string(), "error".to_string()];

        args.extend(self.pre_input_args.clone());
        for input in &self.inputs {
            args.push("-i".to_string());
            args.push(input.to_string_lossy().to_string());
        }
        args.extend(self.output_args.clone());
        args.push(self.output.to_string_lossy().to_string());

        args
    }
}

/// Runs an external tool to completion, capturing stderr for diagnostics.
/// Invocations are blocking from the pipeline's point of view; a timeout
/// bounds how long a hung process can stall a stage.
#[derive(Debug, Clone)]
pub struct ToolRunner {
    program: String,
    timeout: Duration,
}

impl ToolRunner {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            timeout: Duration::from_secs(DEFAULT_TOOL_TIMEOUT_SECS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Run the tool with the given arguments. Errors carry the tool name,
    /// exit code, and a stderr excerpt; callers decide whether to degrade.
    pub async fn run(&self, args: &[String]) -> ShortxResult<()> {
        which::which(&self.program).map_err(|_| ShortxError::ToolMissing {
            tool: self.program.clone(),
        })?;

        debug!("Running: {} {}", self.program, args.join(" "));

        // wait_with_output takes the child by value; kill_on_drop ensures a
        // timed-out child does not outlive the dropped wait future.
        let child = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        let result = tokio::time::timeout(self.timeout, child.wait_with_output()).await;
        let output = match result {
            Ok(output) => output?,
            Err(_) => {
                warn!(
                    "{} timed out after {}s, killing process",
                    self.program,
                    self.timeout.as_secs()
                );
                return Err(ShortxError::ToolTimeout {
                    tool: self.program.clone(),
                    secs: self.timeout.as_secs(),
                });
            }
        };

        if output.status.success() {
            Ok(())
        } else {
            Err(ShortxError::ToolFailed {
                tool: self.program.clone(),
                exit_code: output.status.code(),
                stderr: stderr_excerpt(&output.stderr),
            })
        }
    }
}

/// Keep the tail of stderr; ffmpeg puts the actionable message last.
fn stderr_excerpt(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let trimmed = text.trim();
    const MAX_LEN: usize = 512;
    if trimmed.len() > MAX_LEN {
        let start = trimmed.len() - MAX_LEN;
        let boundary = trimmed
            .char_indices()
            .map(|(i, _)| i)
            .find(|&i| i >= start)
            .unwrap_or(start);
        format!("...{}", &trimmed[boundary..])
    } else {
        trimmed.to_string()
    }
}
