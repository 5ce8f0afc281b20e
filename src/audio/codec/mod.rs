pub mod wav;

pub use wav::{WAV_MIME_TYPE, WavEncoder};
