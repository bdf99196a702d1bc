//! ffmpeg/ffplay argument construction.

use crate::config::FfmpegOptions;
use crate::stream::GrabTarget;

#[derive(Debug, Clone)]
pub struct FfmpegCommandBuilder {
    display: String,
    target: GrabTarget,
    framerate: u32,
    video_codec: String,
    bitrate: String,
    deadline: String,
    cpu_used: u8,
    container: String,
    audio: bool,
}

impl FfmpegCommandBuilder {
    pub fn new(display: impl Into<String>, target: GrabTarget) -> Self {
        Self {
            display: display.into(),
            target,
            framerate: 30,
            video_codec: "libvpx-vp9".to_string(),
            bitrate: "2M".to_string(),
            deadline: "realtime".to_string(),
            cpu_used: 8,
            container: "webm".to_string(),
            audio: false,
        }
    }

    /// Apply frame rate and encoder tuning from `options`.
    pub fn with_options(mut self, options: &FfmpegOptions) -> Self {
        self.framerate = options.framerate;
        self.bitrate = options.bitrate.clone();
        self.deadline = options.deadline.clone();
        self.cpu_used = options.cpu_used;
        self
    }

    pub fn with_container(mut self, container: impl Into<String>) -> Self {
        self.container = container.into();
        self
    }

    /// Also record the default PulseAudio source.
    pub fn with_audio(mut self, audio: bool) -> Self {
        self.audio = audio;
        self
    }

    /// x11grab input options plus `-i`.
    pub fn grab_input(&self) -> Vec<String> {
        let mut args = vec![
            "-f".to_string(), "x11grab".to_string(),
            "-framerate".to_string(), self.framerate.to_string(),
        ];

        match &self.target {
            GrabTarget::Region(g) => {
                args.extend([
                    "-video_size".to_string(), format!("{}x{}", g.width, g.height),
                    "-i".to_string(), format!("{}+{},{}", self.display, g.x, g.y),
                ]);
            }
            GrabTarget::Window(xid) => {
                args.extend([
                    "-window_id".to_string(), xid.clone(),
                    "-i".to_string(), self.display.clone(),
                ]);
            }
        }
        args
    }

    /// Encoder invocation streaming the container to stdout.
    ///
    /// stdin stays open: writing `q` to it makes ffmpeg finalize and exit.
    pub fn build(&self) -> Vec<String> {
        let mut args = vec![
            "-hide_banner".to_string(),
            "-loglevel".to_string(), "error".to_string(),
        ];
        args.extend(self.grab_input());

        if self.audio {
            args.extend(["-f".to_string(), "pulse".to_string(), "-i".to_string(), "default".to_string()]);
        }

        args.extend([
            "-c:v".to_string(), self.video_codec.clone(),
            "-b:v".to_string(), self.bitrate.clone(),
            "-deadline".to_string(), self.deadline.clone(),
            "-cpu-used".to_string(), self.cpu_used.to_string(),
            "-pix_fmt".to_string(), "yuv420p".to_string(),
        ]);

        if self.audio {
            args.extend(["-c:a".to_string(), "libopus".to_string()]);
        }

        args.extend([
            "-f".to_string(), self.container.clone(),
            "pipe:1".to_string(),
        ]);
        args
    }

    /// ffplay invocation showing the same grab target.
    pub fn build_preview(&self, title: &str) -> Vec<String> {
        let mut args = vec![
            "-hide_banner".to_string(),
            "-loglevel".to_string(), "error".to_string(),
            "-window_title".to_string(), title.to_string(),
            "-fflags".to_string(), "nobuffer".to_string(),
        ];
        args.extend(self.grab_input());
        args
    }
}
