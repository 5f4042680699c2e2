pub mod capture;
pub mod intent;
pub mod matcher;
pub mod voice;

pub use capture::{CaptureError, CaptureSession, CaptureState, RecognitionEvent, SpeechRecognizer};
pub use intent::{Intent, IntentError, interpret};
pub use matcher::best_match;
pub use voice::{VoiceCompleteOutcome, VoiceTaskService};
