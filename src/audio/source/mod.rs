//! Music sources: where the base track bytes come from.
//!
//! # Module layout
//!
//! ```text
//! src/audio/source/
//! ├── mod.rs      ← re-exports
//! ├── traits.rs   ← MusicFetcher capability + FetchedAudio
//! ├── client.rs   ← shared reqwest client builder
//! ├── http.rs     ← HttpFetcher  (http:// and https://)
//! ├── file.rs     ← FileFetcher  (file://, plain and root-relative paths)
//! ├── store.rs    ← StoreFetcher (blob: handles from the ResourceStore)
//! └── router.rs   ← SourceRouter (first fetcher that claims a reference)
//! ```

pub mod client;
pub mod file;
pub mod http;
pub mod router;
pub mod store;
pub mod traits;

pub use client::create_client;
pub use file::FileFetcher;
pub use http::HttpFetcher;
pub use router::{BoxedFetcher, SourceRouter};
pub use store::StoreFetcher;
pub use traits::{FetchedAudio, MusicFetcher};
