use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use anyhow::{Context, Result};
use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};

use crate::mime::mime_type_for;

/// Terminal event of a single payload read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadEvent {
    /// The read finished. `None` means it finished without a result.
    Loaded(Option<Bytes>),
    Aborted,
    Errored,
}

/// Where a file's payload comes from.
#[async_trait]
pub trait BlobSource: fmt::Debug + Send + Sync {
    async fn load(&self) -> LoadEvent;
}

#[derive(Debug, Clone)]
pub struct MemorySource {
    bytes: Bytes,
}

impl MemorySource {
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }
}

#[async_trait]
impl BlobSource for MemorySource {
    async fn load(&self) -> LoadEvent {
        LoadEvent::Loaded(Some(self.bytes.clone()))
    }
}

#[derive(Debug, Clone)]
pub struct DiskSource {
    path: PathBuf,
}

impl DiskSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl BlobSource for DiskSource {
    async fn load(&self) -> LoadEvent {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => LoadEvent::Loaded(Some(Bytes::from(bytes))),
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "failed to read file payload");
                LoadEvent::Errored
            }
        }
    }
}

/// Signed milliseconds since the Unix epoch.
fn timestamp_millis(time: SystemTime) -> i64 {
    DateTime::<Utc>::from(time).timestamp_millis()
}

#[derive(Debug, Clone, Default)]
pub struct FileOptions {
    pub mime_type: Option<String>,
    pub last_modified: Option<i64>,
}

impl FileOptions {
    pub fn mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    pub fn last_modified(mut self, millis: i64) -> Self {
        self.last_modified = Some(millis);
        self
    }
}

/// A named, typed, sized and timestamped blob.
#[derive(Debug, Clone)]
pub struct File {
    name: String,
    mime_type: String,
    size: u64,
    last_modified: i64,
    source: Arc<dyn BlobSource>,
}

impl File {
    pub const TYPE_NAME: &'static str = "File";

    pub fn new(bits: impl Into<Bytes>, name: impl Into<String>) -> Self {
        Self::with_options(bits, name, FileOptions::default())
    }

    pub fn with_options(bits: impl Into<Bytes>, name: impl Into<String>, opts: FileOptions) -> Self {
        let bytes = bits.into();
        Self {
            name: name.into(),
            mime_type: opts.mime_type.unwrap_or_default(),
            size: bytes.len() as u64,
            last_modified: opts
                .last_modified
                .unwrap_or_else(|| Utc::now().timestamp_millis()),
            source: Arc::new(MemorySource::new(bytes)),
        }
    }

    pub fn from_source(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        size: u64,
        last_modified: i64,
        source: Arc<dyn BlobSource>,
    ) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size,
            last_modified,
            source,
        }
    }

    /// Describes a file on disk. The payload is only read when content is
    /// compared.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let meta = tokio::fs::metadata(path)
            .await
            .with_context(|| format!("Cannot stat {path:?}"))?;
        if !meta.is_file() {
            anyhow::bail!("{path:?} is not a regular file");
        }
        let last_modified = meta
            .modified()
            .map(timestamp_millis)
            .unwrap_or_default();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self::from_source(
            name,
            mime_type_for(path),
            meta.len(),
            last_modified,
            Arc::new(DiskSource::new(path)),
        ))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn last_modified(&self) -> i64 {
        self.last_modified
    }

    pub(crate) async fn load(&self) -> LoadEvent {
        self.source.load().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn in_memory_file_reports_metadata() {
        let file = File::with_options(
            "I am sample file",
            "example.txt",
            FileOptions::default()
                .mime_type("application/text")
                .last_modified(1619799002227),
        );
        assert_eq!(file.name(), "example.txt");
        assert_eq!(file.mime_type(), "application/text");
        assert_eq!(file.size(), 16);
        assert_eq!(file.last_modified(), 1619799002227);
        assert_eq!(
            file.load().await,
            LoadEvent::Loaded(Some(Bytes::from_static(b"I am sample file")))
        );
    }

    #[test]
    fn defaults_to_empty_type_and_current_time() {
        let before = Utc::now().timestamp_millis();
        let file = File::new(Vec::<u8>::new(), "example.tsx");
        assert_eq!(file.mime_type(), "");
        assert_eq!(file.size(), 0);
        assert!(file.last_modified() >= before);
    }

    #[test]
    fn timestamps_before_the_epoch_stay_negative() {
        use std::time::{Duration, UNIX_EPOCH};

        assert_eq!(timestamp_millis(UNIX_EPOCH - Duration::from_millis(1500)), -1500);
        assert_eq!(
            timestamp_millis(UNIX_EPOCH + Duration::from_millis(1619799002227)),
            1619799002227
        );
    }

    #[tokio::test]
    async fn open_reads_metadata_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "hello").unwrap();

        let file = File::open(&path).await.unwrap();
        assert_eq!(file.name(), "notes.txt");
        assert_eq!(file.mime_type(), "text/plain");
        assert_eq!(file.size(), 5);
        assert_eq!(
            file.load().await,
            LoadEvent::Loaded(Some(Bytes::from_static(b"hello")))
        );
    }

    #[tokio::test]
    async fn disk_source_reports_missing_file_as_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = DiskSource::new(dir.path().join("missing.bin"));
        assert_eq!(source.load().await, LoadEvent::Errored);
    }

    #[tokio::test]
    async fn open_rejects_directories() {
        let dir = tempfile::tempdir().unwrap();
        assert!(File::open(dir.path()).await.is_err());
    }
}
