pub mod buffer;
pub mod codec;
pub mod constants;
pub mod demux;
pub mod mix;
pub mod pipeline;
pub mod render;
pub mod resample;
pub mod silence;
pub mod source;

pub use buffer::AudioSampleBuffer;
pub use codec::WavEncoder;
pub use mix::Mixer;
pub use pipeline::{AudioDecoder, SymphoniaDecoder};
pub use render::OfflineRenderer;
pub use source::{FetchedAudio, MusicFetcher, SourceRouter};
