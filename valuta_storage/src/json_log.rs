use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use valuta_core::{ConversionLog, ConversionRecord, MAX_RECORDS};

use crate::error::{Result, StorageError};

/// Conversion log kept as a single JSON array, rewritten on every append.
///
/// Appends from one process are serialized; separate processes sharing the
/// file are not coordinated and the last writer wins.
#[derive(Debug)]
pub struct JsonFileLog {
    path: PathBuf,
    capacity: usize,
    write_lock: Mutex<()>,
}

impl JsonFileLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            capacity: MAX_RECORDS,
            write_lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the log. A missing file, or one that does not decode as a JSON
    /// array of records (including non-UTF-8 bytes), is an empty log.
    pub async fn load(&self) -> Result<Vec<ConversionRecord>> {
        let content = match fs::read(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(StorageError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        match serde_json::from_slice(&content) {
            Ok(records) => Ok(records),
            Err(e) => {
                warn!(
                    "Ignoring corrupt conversion log {}: {e}",
                    self.path.display()
                );
                Ok(Vec::new())
            }
        }
    }

    async fn store(&self, records: &[ConversionRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|source| StorageError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        let content = serde_json::to_string_pretty(records)?;
        fs::write(&self.path, content)
            .await
            .map_err(|source| StorageError::Io {
                path: self.path.clone(),
                source,
            })
    }

    /// Append `record` and return the log as written.
    pub async fn push(&self, record: ConversionRecord) -> Result<Vec<ConversionRecord>> {
        let _guard = self.write_lock.lock().await;

        let mut records = self.load().await?;
        records.push(record);
        keep_most_recent(&mut records, self.capacity);
        self.store(&records).await?;

        debug!(
            "Conversion log {} now holds {} records",
            self.path.display(),
            records.len()
        );
        Ok(records)
    }
}

/// Drop the oldest entries so at most `capacity` remain.
fn keep_most_recent<T>(records: &mut Vec<T>, capacity: usize) {
    let excess = records.len().saturating_sub(capacity);
    if excess > 0 {
        records.drain(..excess);
    }
}

#[async_trait]
impl ConversionLog for JsonFileLog {
    async fn append(&self, record: ConversionRecord) -> anyhow::Result<()> {
        self.push(record).await?;
        info!("Saved conversion to {}", self.path.display());
        Ok(())
    }

    async fn recent(&self) -> anyhow::Result<Vec<ConversionRecord>> {
        Ok(self.load().await?)
    }
}
