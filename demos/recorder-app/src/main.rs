mod app_config;
mod console_delegate;
mod dialogs;

use std::io::BufRead;
use std::thread;

use crossbeam_channel::Sender;

use screen_capture_core::{event_channel, AtomicFileSink, EventLoop, Platform, RecorderController, RecorderEvent};
use screen_capture_linux::linux_platform;

use app_config::AppConfig;
use console_delegate::{render_controls, ConsoleDelegate};
use dialogs::{RfdErrorPresenter, RfdSaveDialog, TerminalPicker};

const HELP: &str = "Commands: s = select source, r = start, x = stop, w = save again, d = discard, q = quit";

/// Map a single-key command to its event.
fn parse_command(line: &str) -> Option<RecorderEvent> {
    match line.trim() {
        "s" => Some(RecorderEvent::OpenPicker),
        "r" => Some(RecorderEvent::Start),
        "x" => Some(RecorderEvent::Stop),
        "w" => Some(RecorderEvent::SaveAgain),
        "d" => Some(RecorderEvent::Discard),
        "q" => Some(RecorderEvent::Shutdown),
        _ => None,
    }
}

/// Forward stdin to the event loop. Lines answer the source menu while it
/// is open and are commands otherwise.
fn spawn_input(picker: TerminalPicker, events: Sender<RecorderEvent>) -> std::io::Result<thread::JoinHandle<()>> {
    thread::Builder::new().name("stdin-input".into()).spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };

            if picker.answer(&line) {
                continue;
            }
            match parse_command(&line) {
                Some(event) => {
                    let quit = event == RecorderEvent::Shutdown;
                    if events.send(event).is_err() || quit {
                        return;
                    }
                }
                None => println!("{}", HELP),
            }
        }
        let _ = events.send(RecorderEvent::Shutdown);
    })
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load();
    let (tx, rx) = event_channel();

    let picker = TerminalPicker::new();
    let (enumerator, acquirer, preview, encoders) = linux_platform(config.ffmpeg.clone());
    let platform = Platform {
        enumerator: Box::new(enumerator),
        picker: Box::new(picker.clone()),
        acquirer: Box::new(acquirer),
        preview: Box::new(preview),
        encoders: Box::new(encoders),
        save_dialog: Box::new(RfdSaveDialog::new(config.save_directory())),
        file_sink: Box::new(AtomicFileSink::new()),
        errors: Box::new(RfdErrorPresenter),
    };

    let mut controller = RecorderController::new(platform, config.recorder.clone(), tx.clone())?;
    controller.set_delegate(ConsoleDelegate::new());
    println!("{}", render_controls(&controller.controls()));
    println!("{}", HELP);

    spawn_input(picker, tx)?;
    EventLoop::new(controller, rx).run();
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        log::error!("recorder-app failed: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_map_to_events() {
        assert_eq!(parse_command("s\n"), Some(RecorderEvent::OpenPicker));
        assert_eq!(parse_command(" r "), Some(RecorderEvent::Start));
        assert_eq!(parse_command("x"), Some(RecorderEvent::Stop));
        assert_eq!(parse_command("q"), Some(RecorderEvent::Shutdown));
        assert_eq!(parse_command("record"), None);
    }
}
