//! Typed-input recognition engine
//!
//! Stand-in for a microphone-backed engine: one line of typed text plays the
//! role of the recognized speech, emitted through the same single-shot event
//! shape. Anything implementing `SpeechRecognizer` slots in here unchanged.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use services::services::capture::{CaptureError, RecognitionEvent, SpeechRecognizer};

pub struct TypedRecognizer {
    events: VecDeque<RecognitionEvent>,
}

impl TypedRecognizer {
    /// Engine that replays the given line as a final result.
    pub fn from_line(line: &str) -> Self {
        let trimmed = line.trim();
        let events = if trimmed.is_empty() {
            vec![RecognitionEvent::End]
        } else {
            vec![RecognitionEvent::Final(trimmed.to_string())]
        };
        Self {
            events: events.into(),
        }
    }

    /// Prompt and read the "spoken" line from stdin. An empty line ends the
    /// session without a result, like a cancelled capture.
    pub fn from_stdin() -> io::Result<Self> {
        print!("listening (type your command, empty line to cancel): ");
        io::stdout().flush()?;
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        Ok(Self::from_line(&line))
    }
}

impl SpeechRecognizer for TypedRecognizer {
    fn is_available(&self) -> bool {
        true
    }

    fn start(&mut self) -> Result<(), CaptureError> {
        Ok(())
    }

    fn stop(&mut self) {}

    fn next_event(&mut self) -> Option<RecognitionEvent> {
        self.events.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use services::services::capture::CaptureSession;

    use super::*;

    #[test]
    fn typed_line_comes_back_as_the_final_utterance() {
        let mut session = CaptureSession::new();
        let mut rec = TypedRecognizer::from_line("mark groceries done\n");
        assert_eq!(
            session.run(&mut rec).unwrap(),
            Some("mark groceries done".to_string())
        );
    }

    #[test]
    fn empty_line_ends_the_session_without_a_result() {
        let mut session = CaptureSession::new();
        let mut rec = TypedRecognizer::from_line("   \n");
        assert_eq!(session.run(&mut rec).unwrap(), None);
    }
}
