//! Capture-to-save flow.

use std::sync::Arc;

use mememe_common::error::{MemeError, MemeResult};
use mememe_model::bitmap::Bitmap;
use mememe_model::meme::Meme;
use mememe_model::style::RenderStyle;
use mememe_render_engine::Compositor;
use mememe_store::MemeStore;

use crate::collaborators::{
    Acquisition, ChromeGuard, HostSurface, ImageSource, ImageSourceKind, NoChrome, ShareOutcome,
    ShareSink,
};

/// Placeholder shown in the top caption field.
pub const DEFAULT_TOP_TEXT: &str = "TOP";

/// Placeholder shown in the bottom caption field.
pub const DEFAULT_BOTTOM_TEXT: &str = "BOTTOM";

/// State of a capture flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    /// No image, placeholder captions, share disabled.
    Idle,
    /// Editor in use but no image yet.
    Editing,
    /// Image present; captions editable, share enabled.
    Ready,
    /// Meme flattened and handed to the share sink.
    Composed,
    /// Meme committed to the store. Terminal.
    Saved,
}

impl FlowState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Editing => "editing",
            Self::Ready => "ready",
            Self::Composed => "composed",
            Self::Saved => "saved",
        }
    }
}

/// One of the two caption fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    Top,
    Bottom,
}

/// What a share attempt led to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareResult {
    /// The sink completed; the meme is in the store at `index`.
    Saved { index: usize },
    /// The sink was cancelled or failed; image and captions are kept.
    Retained { reason: String },
}

/// One capture-to-save interaction.
pub struct CaptureFlow {
    store: Arc<MemeStore>,
    compositor: Arc<Compositor>,
    style: RenderStyle,
    source: Box<dyn ImageSource>,
    sink: Box<dyn ShareSink>,
    surface: Box<dyn HostSurface>,
    state: FlowState,
    image: Option<Bitmap>,
    top_text: String,
    bottom_text: String,
    top_placeholder: bool,
    bottom_placeholder: bool,
    composed: Option<Bitmap>,
}

impl CaptureFlow {
    /// Create a flow in [`FlowState::Idle`] that commits into `store`.
    pub fn new(
        store: Arc<MemeStore>,
        compositor: Arc<Compositor>,
        style: RenderStyle,
        source: Box<dyn ImageSource>,
        sink: Box<dyn ShareSink>,
    ) -> Self {
        Self {
            store,
            compositor,
            style,
            source,
            sink,
            surface: Box::new(NoChrome),
            state: FlowState::Idle,
            image: None,
            top_text: DEFAULT_TOP_TEXT.to_string(),
            bottom_text: DEFAULT_BOTTOM_TEXT.to_string(),
            top_placeholder: true,
            bottom_placeholder: true,
            composed: None,
        }
    }

    /// Use `surface` for chrome hiding during compose.
    pub fn with_surface(mut self, surface: Box<dyn HostSurface>) -> Self {
        self.surface = surface;
        self
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    pub fn image(&self) -> Option<&Bitmap> {
        self.image.as_ref()
    }

    pub fn top_text(&self) -> &str {
        &self.top_text
    }

    pub fn bottom_text(&self) -> &str {
        &self.bottom_text
    }

    pub fn text(&self, field: TextField) -> &str {
        match field {
            TextField::Top => &self.top_text,
            TextField::Bottom => &self.bottom_text,
        }
    }

    /// The flattened image while it is with the share sink or after saving.
    pub fn composed_image(&self) -> Option<&Bitmap> {
        self.composed.as_ref()
    }

    /// Whether the share action should be enabled.
    pub fn share_enabled(&self) -> bool {
        self.state == FlowState::Ready
    }

    /// Whether the picker for `kind` should be offered.
    pub fn source_available(&self, kind: ImageSourceKind) -> bool {
        self.source.is_available(kind)
    }

    /// Ask the image source for a photo.
    ///
    /// A picked photo replaces the current one and moves the flow to
    /// [`FlowState::Ready`]. A cancelled picker changes nothing except that
    /// an idle flow becomes [`FlowState::Editing`].
    pub async fn acquire_image(&mut self, kind: ImageSourceKind) -> MemeResult<FlowState> {
        self.ensure_editable("acquire an image")?;
        if !self.source.is_available(kind) {
            return Err(MemeError::source_unavailable(kind.to_string()));
        }

        let previous = self.state;
        if self.state == FlowState::Idle {
            self.state = FlowState::Editing;
        }

        tracing::debug!(%kind, "Requesting image");
        let acquisition = match self.source.request_image(kind).await {
            Ok(acquisition) => acquisition,
            Err(e) => {
                self.state = previous;
                return Err(e);
            }
        };

        match acquisition {
            Acquisition::Picked(image) => {
                tracing::info!(
                    %kind,
                    width = image.width(),
                    height = image.height(),
                    "Image acquired"
                );
                self.image = Some(image);
                self.state = FlowState::Ready;
            }
            Acquisition::Cancelled => {
                tracing::debug!(%kind, error = %MemeError::PickerCancelled, "Keeping current image");
            }
        }
        Ok(self.state)
    }

    /// Focus a caption field. The first time after creation or cancel, the
    /// placeholder is cleared.
    pub fn begin_editing(&mut self, field: TextField) -> MemeResult<()> {
        self.ensure_editable("edit text")?;
        let placeholder = match field {
            TextField::Top => &mut self.top_placeholder,
            TextField::Bottom => &mut self.bottom_placeholder,
        };
        if std::mem::replace(placeholder, false) {
            self.text_mut(field).clear();
        }
        self.enter_editing();
        Ok(())
    }

    /// Replace the content of a caption field.
    pub fn set_text(&mut self, field: TextField, text: impl Into<String>) -> MemeResult<()> {
        self.ensure_editable("edit text")?;
        match field {
            TextField::Top => self.top_placeholder = false,
            TextField::Bottom => self.bottom_placeholder = false,
        }
        *self.text_mut(field) = text.into();
        self.enter_editing();
        Ok(())
    }

    /// Discard the image and captions and return to [`FlowState::Idle`].
    pub fn cancel(&mut self) -> MemeResult<()> {
        if self.state == FlowState::Saved {
            return Err(MemeError::invalid_transition(self.state.name(), "cancel"));
        }
        tracing::debug!(from = self.state.name(), "Flow cancelled");
        self.image = None;
        self.composed = None;
        self.top_text = DEFAULT_TOP_TEXT.to_string();
        self.bottom_text = DEFAULT_BOTTOM_TEXT.to_string();
        self.top_placeholder = true;
        self.bottom_placeholder = true;
        self.state = FlowState::Idle;
        Ok(())
    }

    /// Flatten the meme, offer it to the share sink, and save it if the
    /// sink completes.
    pub async fn share(&mut self) -> MemeResult<ShareResult> {
        match self.state {
            FlowState::Ready => {}
            FlowState::Idle | FlowState::Editing => return Err(MemeError::ImageMissing),
            FlowState::Composed | FlowState::Saved => {
                return Err(MemeError::invalid_transition(self.state.name(), "share"));
            }
        }
        let image = self.image.clone().ok_or(MemeError::ImageMissing)?;

        let memed = {
            let _chrome = ChromeGuard::hide(self.surface.as_mut());
            self.compositor.compose(
                Some(&image),
                &self.top_text,
                &self.bottom_text,
                &self.style,
            )?
        };
        self.composed = Some(memed.clone());
        self.state = FlowState::Composed;

        tracing::info!(hash = memed.content_hash(), "Presenting meme to share sink");
        match self.sink.present(&memed).await {
            ShareOutcome::Completed => {
                let meme = Meme::new(
                    self.top_text.clone(),
                    self.bottom_text.clone(),
                    image,
                    memed,
                );
                let index = self.store.append(meme);
                self.state = FlowState::Saved;
                tracing::info!(index, count = self.store.count(), "Meme saved");
                Ok(ShareResult::Saved { index })
            }
            outcome => {
                let reason = match outcome {
                    ShareOutcome::Failed { reason } => reason,
                    _ => "cancelled".to_string(),
                };
                let error = MemeError::share_failed(reason.clone());
                tracing::warn!(error = %error, "Share did not complete; meme kept for retry");
                self.composed = None;
                self.state = FlowState::Ready;
                Ok(ShareResult::Retained { reason })
            }
        }
    }

    fn ensure_editable(&self, action: &'static str) -> MemeResult<()> {
        match self.state {
            FlowState::Idle | FlowState::Editing | FlowState::Ready => Ok(()),
            FlowState::Composed | FlowState::Saved => {
                Err(MemeError::invalid_transition(self.state.name(), action))
            }
        }
    }

    fn enter_editing(&mut self) {
        if self.state == FlowState::Idle {
            self.state = FlowState::Editing;
        }
    }

    fn text_mut(&mut self, field: TextField) -> &mut String {
        match field {
            TextField::Top => &mut self.top_text,
            TextField::Bottom => &mut self.bottom_text,
        }
    }
}
