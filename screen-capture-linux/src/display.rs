//! Queries against the running X server through xrandr and wmctrl.

use std::process::Command;

use crate::config::FfmpegOptions;
use crate::error::BackendError;
use crate::x11_parse::{self, MonitorInfo, WindowInfo};

/// Run `tool args…` against `display` and return its stdout.
fn run_tool(tool: &str, args: &[&str], display: &str) -> Result<String, BackendError> {
    let output = Command::new(tool)
        .args(args)
        .env("DISPLAY", display)
        .output()
        .map_err(|source| BackendError::Spawn {
            tool: tool.to_string(),
            source,
        })?;

    if !output.status.success() {
        return Err(BackendError::ToolFailed {
            tool: tool.to_string(),
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Resolve the display or fail with `NoDisplay`.
pub fn require_display(options: &FfmpegOptions) -> Result<String, BackendError> {
    options.resolved_display().ok_or(BackendError::NoDisplay)
}

pub fn query_monitors(options: &FfmpegOptions, display: &str) -> Result<Vec<MonitorInfo>, BackendError> {
    let out = run_tool(&options.xrandr_path, &["--listmonitors"], display)?;
    Ok(x11_parse::parse_monitors(&out))
}

/// List top-level windows. A missing wmctrl only disables window capture.
pub fn query_windows(options: &FfmpegOptions, display: &str) -> Result<Vec<WindowInfo>, BackendError> {
    match run_tool(&options.wmctrl_path, &["-l"], display) {
        Ok(out) => Ok(x11_parse::parse_windows(&out)),
        Err(BackendError::Spawn { tool, source }) if source.kind() == std::io::ErrorKind::NotFound => {
            log::warn!("{} not found; window capture unavailable", tool);
            Ok(Vec::new())
        }
        Err(e) => Err(e),
    }
}
