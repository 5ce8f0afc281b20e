pub mod base;
pub mod capture;
pub mod fetch;
pub mod logging;
pub mod mixer;
pub mod tts;

pub use base::*;
pub use capture::*;
pub use fetch::*;
pub use logging::*;
pub use mixer::*;
pub use tts::*;
