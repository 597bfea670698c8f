//! File-backed picker and share destination for headless sessions.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use mememe_capture_flow::{Acquisition, ImageSource, ImageSourceKind, ShareOutcome, ShareSink};
use mememe_common::error::MemeResult;
use mememe_model::Bitmap;
use serde::Deserialize;

/// "Picks" a file from disk. There is no camera on the command line.
#[derive(Debug, Clone)]
pub struct FileImageSource {
    path: Option<PathBuf>,
}

impl FileImageSource {
    /// `None` behaves like a user who dismisses the picker.
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }
}

#[async_trait::async_trait]
impl ImageSource for FileImageSource {
    fn is_available(&self, kind: ImageSourceKind) -> bool {
        kind == ImageSourceKind::Library
    }

    async fn request_image(&self, _kind: ImageSourceKind) -> MemeResult<Acquisition> {
        let Some(path) = &self.path else {
            return Ok(Acquisition::Cancelled);
        };
        let bytes = tokio::fs::read(path).await?;
        Ok(Acquisition::Picked(Bitmap::decode(&bytes)?))
    }
}

/// Writes each shared meme as `meme-NNNN.png` into a directory.
#[derive(Debug)]
pub struct DirectoryShareSink {
    dir: PathBuf,
    next: AtomicUsize,
}

impl DirectoryShareSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            next: AtomicUsize::new(0),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// First unused file name, so earlier runs are never overwritten.
    fn next_path(&self) -> PathBuf {
        loop {
            let n = self.next.fetch_add(1, Ordering::SeqCst);
            let path = self.dir.join(format!("meme-{n:04}.png"));
            if !path.exists() {
                return path;
            }
        }
    }

    async fn write(&self, image: &Bitmap) -> MemeResult<PathBuf> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.next_path();
        tokio::fs::write(&path, image.to_png_bytes()?).await?;
        Ok(path)
    }
}

#[async_trait::async_trait]
impl ShareSink for DirectoryShareSink {
    async fn present(&self, image: &Bitmap) -> ShareOutcome {
        match self.write(image).await {
            Ok(path) => {
                tracing::info!(path = %path.display(), "Meme exported");
                ShareOutcome::Completed
            }
            Err(e) => ShareOutcome::Failed {
                reason: e.to_string(),
            },
        }
    }
}

/// How a scripted session dismisses the share sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShareAction {
    #[default]
    Complete,
    Cancel,
    Fail,
}

/// Share sink that follows a script entry: exports on `complete`, otherwise
/// reports the scripted outcome without touching disk.
#[derive(Debug)]
pub struct ScriptedShareSink {
    action: ShareAction,
    export: Arc<DirectoryShareSink>,
}

impl ScriptedShareSink {
    pub fn new(action: ShareAction, export: Arc<DirectoryShareSink>) -> Self {
        Self { action, export }
    }
}

#[async_trait::async_trait]
impl ShareSink for ScriptedShareSink {
    async fn present(&self, image: &Bitmap) -> ShareOutcome {
        match self.action {
            ShareAction::Complete => self.export.present(image).await,
            ShareAction::Cancel => ShareOutcome::Cancelled,
            ShareAction::Fail => ShareOutcome::Failed {
                reason: "share failed by script".to_string(),
            },
        }
    }
}
