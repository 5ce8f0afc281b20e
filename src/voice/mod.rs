pub mod capture;
pub mod recorder;
pub mod remote;
pub mod style;
pub mod synth;

pub use capture::{VoiceCapture, VoiceCaptureAdapter};
pub use recorder::{Recorder, Recording, RecordingSession, RecordingSink, SinkFormat, WavRecorder};
pub use remote::RemoteSpeechSynthesizer;
pub use style::{StyleProfile, VoiceParams};
pub use synth::{SpeechSynthesizer, ToneSynthesizer};
