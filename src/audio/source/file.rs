//! `FileFetcher`: reads music from disk.
//!
//! `file://` URLs and relative paths are read as given. Root-relative paths
//! (`/edm/myedm1.mp3`) are the locally hosted sample tracks and resolve
//! against the configured asset root.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tracing::debug;

use crate::common::{
    errors::{MixError, Result},
    types::AudioFormat,
};

use super::{FetchedAudio, MusicFetcher};

pub struct FileFetcher {
    asset_root: PathBuf,
}

impl FileFetcher {
    pub fn new(asset_root: impl Into<PathBuf>) -> Self {
        Self {
            asset_root: asset_root.into(),
        }
    }

    pub fn resolve(&self, source_ref: &str) -> PathBuf {
        if let Some(path) = source_ref.strip_prefix("file://") {
            return PathBuf::from(path);
        }
        match source_ref.strip_prefix('/') {
            Some(rel) => self.asset_root.join(rel),
            None => PathBuf::from(source_ref),
        }
    }
}

#[async_trait]
impl MusicFetcher for FileFetcher {
    fn name(&self) -> &str {
        "file"
    }

    fn can_handle(&self, source_ref: &str) -> bool {
        source_ref.starts_with("file://")
            || (!source_ref.contains("://") && !source_ref.starts_with("blob:"))
    }

    async fn fetch(&self, source_ref: &str) -> Result<FetchedAudio> {
        let path = self.resolve(source_ref);
        let data = tokio::fs::read(&path)
            .await
            .map_err(|e| MixError::Fetch(format!("{}: {}", path.display(), e)))?;

        let format = Path::new(&path)
            .extension()
            .and_then(|e| e.to_str())
            .map(AudioFormat::from_ext)
            .unwrap_or(AudioFormat::Unknown);
        debug!("Read {} bytes from {} ({:?})", data.len(), path.display(), format);

        Ok(FetchedAudio {
            bytes: Bytes::from(data),
            format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_relative_paths_use_asset_root() {
        let f = FileFetcher::new("public");
        assert_eq!(f.resolve("/edm/myedm1.mp3"), PathBuf::from("public/edm/myedm1.mp3"));
        assert_eq!(f.resolve("file:///tmp/a.wav"), PathBuf::from("/tmp/a.wav"));
        assert_eq!(f.resolve("tracks/a.wav"), PathBuf::from("tracks/a.wav"));
    }

    #[test]
    fn does_not_claim_urls_or_blobs() {
        let f = FileFetcher::new("public");
        assert!(f.can_handle("/edm/myedm1.mp3"));
        assert!(f.can_handle("file:///tmp/a.wav"));
        assert!(!f.can_handle("https://example.com/a.mp3"));
        assert!(!f.can_handle("blob:prismix/abc"));
    }

    #[tokio::test]
    async fn reads_file_under_asset_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("edm")).unwrap();
        std::fs::write(dir.path().join("edm/track.wav"), b"RIFF").unwrap();

        let fetched = FileFetcher::new(dir.path())
            .fetch("/edm/track.wav")
            .await
            .unwrap();
        assert_eq!(&fetched.bytes[..], b"RIFF");
        assert_eq!(fetched.format, AudioFormat::Wav);
    }

    #[tokio::test]
    async fn missing_file_is_a_fetch_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileFetcher::new(dir.path()).fetch("/nope.mp3").await.unwrap_err();
        assert!(matches!(err, MixError::Fetch(_)));
    }
}
