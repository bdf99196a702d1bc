//! Parsers for `xrandr --listmonitors` and `wmctrl -l` output.
//!
//! Kept free of process handling so they can be tested on any platform.

use screen_capture_core::models::source::{CaptureSource, SourceKind};

/// Position and size of a monitor on the X root window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorInfo {
    pub index: usize,
    pub output: String,
    pub primary: bool,
    pub geometry: Geometry,
}

impl MonitorInfo {
    pub fn source_id(&self) -> String {
        format!("{}:{}", SourceKind::Screen.id_prefix(), self.index)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowInfo {
    /// X window id as printed by wmctrl (`0x03a00007`).
    pub xid: String,
    pub desktop: i32,
    pub title: String,
}

impl WindowInfo {
    pub fn source_id(&self) -> String {
        format!("{}:{}", SourceKind::Window.id_prefix(), self.xid)
    }
}

/// Parse `xrandr --listmonitors`.
///
/// ```text
/// Monitors: 2
///  0: +*eDP-1 1920/344x1080/194+0+0  eDP-1
///  1: +HDMI-1 2560/597x1440/336+1920+0  HDMI-1
/// ```
pub fn parse_monitors(output: &str) -> Vec<MonitorInfo> {
    output.lines().filter_map(parse_monitor_line).collect()
}

fn parse_monitor_line(line: &str) -> Option<MonitorInfo> {
    let (index, rest) = line.trim().split_once(':')?;
    let index = index.trim().parse().ok()?;

    let mut fields = rest.split_whitespace();
    let flagged_name = fields.next()?;
    let geometry = parse_geometry(fields.next()?)?;
    let output = fields.next().unwrap_or_else(|| flagged_name.trim_start_matches(['+', '*']));

    Some(MonitorInfo {
        index,
        output: output.to_string(),
        primary: flagged_name.contains('*'),
        geometry,
    })
}

/// `1920/344x1080/194+0+0` (physical size in mm after the slashes).
fn parse_geometry(field: &str) -> Option<Geometry> {
    let split = field.find(['+', '-'])?;
    let (size, offsets) = field.split_at(split);
    let (w, h) = size.split_once('x')?;
    let width = w.split('/').next()?.parse().ok()?;
    let height = h.split('/').next()?.parse().ok()?;

    let (x, y) = parse_offsets(offsets)?;
    Some(Geometry { x, y, width, height })
}

/// `+1920+0`, `-1280+0`
fn parse_offsets(s: &str) -> Option<(i32, i32)> {
    let second = s[1..].find(['+', '-'])? + 1;
    let x = s[..second].parse().ok()?;
    let y = s[second..].parse().ok()?;
    Some((x, y))
}

/// Parse `wmctrl -l`.
///
/// ```text
/// 0x03a00007  0 host Terminal - bash
/// 0x04200003 -1 host xfce4-panel
/// ```
///
/// Sticky entries (desktop `-1`: panels, docks, the desktop itself) and
/// untitled windows are skipped.
pub fn parse_windows(output: &str) -> Vec<WindowInfo> {
    output.lines().filter_map(parse_window_line).collect()
}

fn parse_window_line(line: &str) -> Option<WindowInfo> {
    let (xid, rest) = next_field(line)?;
    if !xid.starts_with("0x") {
        return None;
    }
    let (desktop, rest) = next_field(rest)?;
    let desktop: i32 = desktop.parse().ok()?;
    let (_host, title) = next_field(rest)?;
    let title = title.trim();

    if desktop < 0 || title.is_empty() {
        return None;
    }
    Some(WindowInfo {
        xid: xid.to_string(),
        desktop,
        title: title.to_string(),
    })
}

fn next_field(s: &str) -> Option<(&str, &str)> {
    let s = s.trim_start();
    if s.is_empty() {
        return None;
    }
    match s.find(char::is_whitespace) {
        Some(end) => Some((&s[..end], &s[end..])),
        None => Some((s, "")),
    }
}

/// Display name for a monitor. A single monitor is just "Entire Screen".
pub fn monitor_name(monitor: &MonitorInfo, monitor_count: usize) -> String {
    if monitor_count <= 1 {
        "Entire Screen".to_string()
    } else {
        format!("Screen {} ({})", monitor.index + 1, monitor.output)
    }
}

/// Combine parsed windows and monitors into picker entries, windows first.
pub fn to_sources(windows: &[WindowInfo], monitors: &[MonitorInfo]) -> Vec<CaptureSource> {
    let windows = windows
        .iter()
        .map(|w| CaptureSource::new(w.source_id(), w.title.clone(), SourceKind::Window));
    let screens = monitors.iter().map(|m| {
        CaptureSource::new(m.source_id(), monitor_name(m, monitors.len()), SourceKind::Screen)
    });
    windows.chain(screens).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const XRANDR: &str = "Monitors: 2
 0: +*eDP-1 1920/344x1080/194+0+0  eDP-1
 1: +HDMI-1 2560/597x1440/336+1920+0  HDMI-1
";

    const WMCTRL: &str = "0x03a00007  0 laptop Terminal - bash
0x04200003 -1 laptop xfce4-panel
0x05e00004  1 laptop   Design  review.pdf
0x06000001  0 laptop
";

    #[test]
    fn parses_monitors_with_geometry() {
        let monitors = parse_monitors(XRANDR);
        assert_eq!(monitors.len(), 2);

        assert_eq!(monitors[0].output, "eDP-1");
        assert!(monitors[0].primary);
        assert_eq!(monitors[0].geometry, Geometry { x: 0, y: 0, width: 1920, height: 1080 });

        assert_eq!(monitors[1].source_id(), "screen:1");
        assert!(!monitors[1].primary);
        assert_eq!(monitors[1].geometry, Geometry { x: 1920, y: 0, width: 2560, height: 1440 });
    }

    #[test]
    fn parses_negative_offsets() {
        let monitors = parse_monitors(" 0: +DP-2 1280/300x1024/240-1280+56  DP-2\n");
        assert_eq!(monitors[0].geometry, Geometry { x: -1280, y: 56, width: 1280, height: 1024 });
    }

    #[test]
    fn parses_windows_skipping_sticky_and_untitled() {
        let windows = parse_windows(WMCTRL);
        assert_eq!(windows.len(), 2);
        assert_eq!(windows[0].source_id(), "window:0x03a00007");
        assert_eq!(windows[0].title, "Terminal - bash");
        assert_eq!(windows[1].title, "Design  review.pdf");
        assert_eq!(windows[1].desktop, 1);
    }

    #[test]
    fn garbage_yields_nothing() {
        assert!(parse_monitors("Can't open display").is_empty());
        assert!(parse_windows("Cannot get client list properties.").is_empty());
    }

    #[test]
    fn sources_list_windows_then_screens() {
        let sources = to_sources(&parse_windows(WMCTRL), &parse_monitors(XRANDR));
        let ids: Vec<_> = sources.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["window:0x03a00007", "window:0x05e00004", "screen:0", "screen:1"]);
        assert_eq!(sources[2].name, "Screen 1 (eDP-1)");
        assert!(sources[3].is_screen());
    }

    #[test]
    fn single_monitor_is_entire_screen() {
        let monitors = parse_monitors(" 0: +*eDP-1 1920/344x1080/194+0+0  eDP-1");
        assert_eq!(to_sources(&[], &monitors)[0].name, "Entire Screen");
    }
}
