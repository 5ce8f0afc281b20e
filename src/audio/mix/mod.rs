pub mod mixer;

pub use mixer::{Mixer, effective_gain, overlay_window};
