pub mod decoder;

pub use decoder::{AudioDecoder, SymphoniaDecoder};
