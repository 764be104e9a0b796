// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Module image sources.
//!
//! Reading the image is one of the two points where startup suspends. The
//! image is read whole and checked against the configured size ceiling; its
//! format is not inspected here (see `detector`).

use crate::errors::ModuleLoadError;
use crate::observability::messages::bridge::ModuleImageLoaded;
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;

/// Raw bytes of the compiled engine. Immutable once read.
#[derive(Debug, Clone)]
pub struct BinaryModuleImage {
    source: String,
    bytes: Arc<[u8]>,
}

impl BinaryModuleImage {
    pub fn new(source: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            source: source.into(),
            bytes: bytes.into(),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Where a module image comes from.
#[async_trait]
pub trait ModuleSource: Send + Sync {
    /// Human-readable origin, used in logs and errors.
    fn describe(&self) -> String;

    async fn read_bytes(&self) -> Result<Vec<u8>, ModuleLoadError>;
}

/// Image stored in a file.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ModuleSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn read_bytes(&self) -> Result<Vec<u8>, ModuleLoadError> {
        tokio::fs::read(&self.path)
            .await
            .map_err(|error| ModuleLoadError::Io {
                source_name: self.describe(),
                error,
            })
    }
}

/// Image already in memory, e.g. embedded with `include_bytes!`.
#[derive(Debug, Clone)]
pub struct BytesSource {
    name: String,
    bytes: Vec<u8>,
}

impl BytesSource {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

#[async_trait]
impl ModuleSource for BytesSource {
    fn describe(&self) -> String {
        self.name.clone()
    }

    async fn read_bytes(&self) -> Result<Vec<u8>, ModuleLoadError> {
        Ok(self.bytes.clone())
    }
}

/// Read an image from `source`, rejecting anything larger than `max_size`.
pub async fn read_image(
    source: &dyn ModuleSource,
    max_size: usize,
) -> Result<BinaryModuleImage, ModuleLoadError> {
    let name = source.describe();

    let bytes = source.read_bytes().await?;

    if bytes.len() > max_size {
        return Err(ModuleLoadError::TooLarge {
            size: bytes.len(),
            max: max_size,
        });
    }

    tracing::info!(
        "{}",
        ModuleImageLoaded {
            source: &name,
            size_bytes: bytes.len(),
        }
    );

    Ok(BinaryModuleImage::new(name, bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_read_file_source() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"\0asm").unwrap();

        let image = read_image(&FileSource::new(temp_file.path()), 1024).await.unwrap();
        assert_eq!(image.bytes(), b"\0asm");
        assert_eq!(image.source(), temp_file.path().display().to_string());
    }

    #[tokio::test]
    async fn test_image_too_large() {
        let source = BytesSource::new("inline", vec![0u8; 9]);
        let result = read_image(&source, 8).await;

        match result {
            Err(ModuleLoadError::TooLarge { size, max }) => {
                assert_eq!(size, 9);
                assert_eq!(max, 8);
            }
            other => panic!("Expected TooLarge, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_size_boundary_is_inclusive() {
        let source = BytesSource::new("inline", vec![0u8; 8]);
        assert_eq!(read_image(&source, 8).await.unwrap().len(), 8);
    }

    #[tokio::test]
    async fn test_nonexistent_file() {
        let result = read_image(&FileSource::new("/nonexistent/path/engine.wasm"), 1024).await;
        assert!(matches!(result, Err(ModuleLoadError::Io { .. })));
    }
}
