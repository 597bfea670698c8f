//! Interfaces to the platform around a capture flow.

use std::fmt;

use mememe_common::error::MemeResult;
use mememe_model::bitmap::Bitmap;

/// Where a photo comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageSourceKind {
    Camera,
    Library,
}

impl fmt::Display for ImageSourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Camera => f.write_str("camera"),
            Self::Library => f.write_str("library"),
        }
    }
}

/// What the picker handed back.
#[derive(Debug, Clone, PartialEq)]
pub enum Acquisition {
    Picked(Bitmap),
    Cancelled,
}

/// How the share sheet was dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareOutcome {
    Completed,
    Cancelled,
    Failed { reason: String },
}

impl ShareOutcome {
    pub fn from_success(success: bool) -> Self {
        if success {
            Self::Completed
        } else {
            Self::Cancelled
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// Camera / photo library picker.
#[async_trait::async_trait]
pub trait ImageSource: Send + Sync {
    /// Whether `kind` can be offered at all (no camera on a simulator, say).
    fn is_available(&self, kind: ImageSourceKind) -> bool;

    /// Present the picker and wait for the user's choice.
    async fn request_image(&self, kind: ImageSourceKind) -> MemeResult<Acquisition>;
}

/// Share sheet / export destination.
#[async_trait::async_trait]
pub trait ShareSink: Send + Sync {
    /// Offer `image` and wait for exactly one outcome.
    async fn present(&self, image: &Bitmap) -> ShareOutcome;
}

/// Toolbars and buttons that must not end up in a composed meme.
pub trait HostSurface: Send {
    fn hide_chrome(&mut self);
    fn restore_chrome(&mut self);
}

/// Headless surface with nothing to hide.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoChrome;

impl HostSurface for NoChrome {
    fn hide_chrome(&mut self) {}
    fn restore_chrome(&mut self) {}
}

/// Hides chrome on creation and restores it when dropped, so an error in
/// between still leaves the surface intact.
pub(crate) struct ChromeGuard<'a> {
    surface: &'a mut dyn HostSurface,
}

impl<'a> ChromeGuard<'a> {
    pub(crate) fn hide(surface: &'a mut dyn HostSurface) -> Self {
        surface.hide_chrome();
        Self { surface }
    }
}

impl Drop for ChromeGuard<'_> {
    fn drop(&mut self) {
        self.surface.restore_chrome();
    }
}
