use std::time::Instant;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TryRecvError};

use crate::session::controller::RecorderController;
use crate::session::recording::SessionId;
use crate::traits::encoder::EncoderEvent;

/// Everything the recorder reacts to: user actions and platform callbacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecorderEvent {
    /// "Select video source" clicked.
    OpenPicker,
    /// Picker closed with the chosen source id, or `None` when dismissed.
    SourceChosen(Option<String>),
    Start,
    Stop,
    /// Offer the save dialog again for the pending recording.
    SaveAgain,
    /// Drop the pending recording.
    Discard,
    Encoder { session: SessionId, event: EncoderEvent },
    Shutdown,
}

/// Unbounded FIFO connecting event producers to the `EventLoop`.
pub fn event_channel() -> (Sender<RecorderEvent>, Receiver<RecorderEvent>) {
    crossbeam_channel::unbounded()
}

/// Single-threaded dispatcher: every event is handled to completion before
/// the next one is taken off the queue.
pub struct EventLoop {
    controller: RecorderController,
    receiver: Receiver<RecorderEvent>,
}

impl EventLoop {
    pub fn new(controller: RecorderController, receiver: Receiver<RecorderEvent>) -> Self {
        Self { controller, receiver }
    }

    pub fn controller(&self) -> &RecorderController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut RecorderController {
        &mut self.controller
    }

    pub fn into_controller(self) -> RecorderController {
        self.controller
    }

    /// Block and dispatch until `Shutdown`.
    ///
    /// While a stop is pending the wait is bounded by the controller's stop
    /// deadline so a silent encoder cannot hang the recorder.
    pub fn run(&mut self) {
        loop {
            let next = match self.controller.stop_deadline() {
                Some(deadline) => self.receiver.recv_deadline(deadline),
                None => self
                    .receiver
                    .recv()
                    .map_err(|_| RecvTimeoutError::Disconnected),
            };

            match next {
                Ok(event) => {
                    if !self.controller.handle(event) {
                        break;
                    }
                }
                Err(RecvTimeoutError::Timeout) => {
                    self.controller.check_stop_timeout(Instant::now());
                }
                Err(RecvTimeoutError::Disconnected) => {
                    self.controller.shutdown();
                    break;
                }
            }
        }
        log::info!("Event loop finished");
    }

    /// Dispatch everything currently queued without blocking.
    ///
    /// Returns `false` once `Shutdown` has been handled.
    pub fn run_pending(&mut self) -> bool {
        loop {
            match self.receiver.try_recv() {
                Ok(event) => {
                    if !self.controller.handle(event) {
                        return false;
                    }
                }
                Err(TryRecvError::Empty) => {
                    self.controller.check_stop_timeout(Instant::now());
                    return true;
                }
                Err(TryRecvError::Disconnected) => return false,
            }
        }
    }
}
