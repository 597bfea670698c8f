//! Channel-backed collaborators.
//!
//! The flow side awaits a oneshot reply; the UI side receives requests on
//! an mpsc queue and answers each one exactly once. Dropping a request
//! without answering counts as the user cancelling.

use mememe_common::error::MemeResult;
use mememe_model::bitmap::Bitmap;
use tokio::sync::{mpsc, oneshot};

use crate::collaborators::{Acquisition, ImageSource, ImageSourceKind, ShareOutcome, ShareSink};

/// A pending share-sheet presentation.
#[derive(Debug)]
pub struct ShareRequest {
    pub image: Bitmap,
    responder: oneshot::Sender<bool>,
}

impl ShareRequest {
    /// Report the sheet's completion flag back to the flow.
    pub fn respond(self, success: bool) {
        // The flow may have been dropped mid-share; nothing to report to.
        let _ = self.responder.send(success);
    }

    pub fn complete(self) {
        self.respond(true);
    }

    pub fn cancel(self) {
        self.respond(false);
    }
}

/// [`ShareSink`] that forwards presentations over a channel.
#[derive(Debug, Clone)]
pub struct ChannelShareSink {
    requests: mpsc::Sender<ShareRequest>,
}

/// Create a share sink and the receiver its requests arrive on.
pub fn share_channel(buffer: usize) -> (ChannelShareSink, mpsc::Receiver<ShareRequest>) {
    let (tx, rx) = mpsc::channel(buffer.max(1));
    (ChannelShareSink { requests: tx }, rx)
}

#[async_trait::async_trait]
impl ShareSink for ChannelShareSink {
    async fn present(&self, image: &Bitmap) -> ShareOutcome {
        let (responder, reply) = oneshot::channel();
        let request = ShareRequest {
            image: image.clone(),
            responder,
        };
        if self.requests.send(request).await.is_err() {
            return ShareOutcome::Failed {
                reason: "share presenter is gone".to_string(),
            };
        }
        match reply.await {
            Ok(success) => ShareOutcome::from_success(success),
            Err(_) => ShareOutcome::Cancelled,
        }
    }
}

/// A pending picker presentation.
#[derive(Debug)]
pub struct ImageRequest {
    pub kind: ImageSourceKind,
    responder: oneshot::Sender<Option<Bitmap>>,
}

impl ImageRequest {
    pub fn pick(self, image: Bitmap) {
        let _ = self.responder.send(Some(image));
    }

    pub fn cancel(self) {
        let _ = self.responder.send(None);
    }
}

/// [`ImageSource`] that forwards picker requests over a channel.
#[derive(Debug, Clone)]
pub struct ChannelImageSource {
    requests: mpsc::Sender<ImageRequest>,
    camera_available: bool,
}

/// Create an image source and the receiver its requests arrive on.
pub fn image_channel(
    buffer: usize,
    camera_available: bool,
) -> (ChannelImageSource, mpsc::Receiver<ImageRequest>) {
    let (tx, rx) = mpsc::channel(buffer.max(1));
    (
        ChannelImageSource {
            requests: tx,
            camera_available,
        },
        rx,
    )
}

#[async_trait::async_trait]
impl ImageSource for ChannelImageSource {
    fn is_available(&self, kind: ImageSourceKind) -> bool {
        match kind {
            ImageSourceKind::Camera => self.camera_available,
            ImageSourceKind::Library => true,
        }
    }

    async fn request_image(&self, kind: ImageSourceKind) -> MemeResult<Acquisition> {
        let (responder, reply) = oneshot::channel();
        if self
            .requests
            .send(ImageRequest { kind, responder })
            .await
            .is_err()
        {
            tracing::warn!(%kind, "Picker presenter is gone; treating as cancelled");
            return Ok(Acquisition::Cancelled);
        }
        Ok(match reply.await {
            Ok(Some(image)) => Acquisition::Picked(image),
            Ok(None) | Err(_) => Acquisition::Cancelled,
        })
    }
}
