//! Capture-session state machine for speech input.
//!
//! The session owns what used to be ambient client state (current transcript,
//! listening flag) so classification stays pure. Transitions:
//!
//! ```text
//! Idle → Listening → Finalizing → Idle
//!             └─────── Idle (error / cancel, interim text discarded)
//! ```

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CaptureError {
    /// The capability is missing entirely. Surfaced once; voice controls
    /// stay disabled but the session remains usable for typed input.
    #[error("speech recognition is not available")]
    Unavailable,
    #[error("recognition error: {0}")]
    Recognition(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    Idle,
    Listening,
    Finalizing,
}

/// Event emitted by a recognition engine during a single-shot session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionEvent {
    Interim(String),
    Final(String),
    Error(String),
    /// Session ended without a final result (e.g. user cancelled).
    End,
}

/// Shape of a substitutable speech engine: single-shot (continuous=false),
/// interim results, explicit start/stop.
pub trait SpeechRecognizer {
    fn is_available(&self) -> bool;
    fn start(&mut self) -> Result<(), CaptureError>;
    fn stop(&mut self);
    /// Next event of the active session; None once the engine is drained.
    fn next_event(&mut self) -> Option<RecognitionEvent>;
}

#[derive(Debug, Default)]
pub struct CaptureSession {
    state: CaptureState,
    interim: String,
}

impl Default for CaptureState {
    fn default() -> Self {
        CaptureState::Idle
    }
}

impl CaptureSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    /// Partially-recognized text of the active session, for live display.
    pub fn interim(&self) -> &str {
        &self.interim
    }

    /// Begin a capture. Returns false (a no-op) when one is already active.
    pub fn start(&mut self) -> bool {
        if self.state != CaptureState::Idle {
            return false;
        }
        self.interim.clear();
        self.state = CaptureState::Listening;
        true
    }

    pub fn on_interim(&mut self, text: &str) {
        if self.state == CaptureState::Listening {
            self.interim = text.to_string();
        }
    }

    /// A final result ends the session and yields the utterance exactly once.
    pub fn on_final(&mut self, text: &str) -> Option<String> {
        if self.state != CaptureState::Listening {
            return None;
        }
        self.state = CaptureState::Finalizing;
        self.interim.clear();
        let utterance = text.trim().to_string();
        self.state = CaptureState::Idle;
        if utterance.is_empty() {
            None
        } else {
            Some(utterance)
        }
    }

    /// An engine error ends the session; interim text is discarded.
    pub fn on_error(&mut self, message: &str) -> CaptureError {
        self.interim.clear();
        self.state = CaptureState::Idle;
        CaptureError::Recognition(message.to_string())
    }

    /// Explicit cancellation: back to Idle without processing interim text.
    pub fn cancel(&mut self) {
        self.interim.clear();
        self.state = CaptureState::Idle;
    }

    /// Drive one single-shot capture against an engine. Returns the final
    /// utterance, None when the session ended without one, or the error that
    /// ended it.
    pub fn run(
        &mut self,
        recognizer: &mut dyn SpeechRecognizer,
    ) -> Result<Option<String>, CaptureError> {
        if !recognizer.is_available() {
            return Err(CaptureError::Unavailable);
        }
        if !self.start() {
            // A capture is already active; starting again is a no-op.
            return Ok(None);
        }
        recognizer.start()?;
        while let Some(event) = recognizer.next_event() {
            match event {
                RecognitionEvent::Interim(text) => self.on_interim(&text),
                RecognitionEvent::Final(text) => {
                    recognizer.stop();
                    return Ok(self.on_final(&text));
                }
                RecognitionEvent::Error(message) => {
                    recognizer.stop();
                    return Err(self.on_error(&message));
                }
                RecognitionEvent::End => break,
            }
        }
        self.cancel();
        Ok(None)
    }
}
