//! External collaborator boundary.
//!
//! The surrounding messaging platform owns image bytes, chat transport, and
//! button menus. The engine only sees these two seams: an [`ImageSource`]
//! that resolves a photo reference to bytes, and a [`Delivery`] channel that
//! carries results back to the originating chat.

mod http;

pub use http::HttpImageSource;

use async_trait::async_trait;

use crate::action::ActionTag;
use crate::session::{PhotoRef, UserId};

/// Errors fetching image bytes for a photo reference.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("photo reference '{reference}' is stale or unknown")]
    StaleReference {
        /// The reference the platform no longer recognizes
        reference: String,
    },

    #[error("transport failure while fetching image: {0}")]
    Transport(String),
}

/// Errors delivering a result to the user. Not retried by the engine.
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("transport failure while delivering result: {0}")]
    Transport(String),
}

/// Encoding of a delivered image payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// Lossy photo delivery (pixelate, invert, mirror, heatmap).
    Jpeg,
    /// Lossless, transparency-preserving delivery (sticker).
    Png,
}

/// Resolves an opaque photo reference to raw image bytes.
#[async_trait]
pub trait ImageSource: Send + Sync {
    async fn retrieve(&self, photo: &PhotoRef) -> Result<Vec<u8>, RetrievalError>;
}

/// Carries results back to the originating chat.
#[async_trait]
pub trait Delivery: Send + Sync {
    async fn deliver_text(&self, user: UserId, text: &str) -> Result<(), DeliveryError>;

    async fn deliver_image(
        &self,
        user: UserId,
        bytes: Vec<u8>,
        format: ImageFormat,
    ) -> Result<(), DeliveryError>;

    /// Surface the action choices as a button menu.
    async fn present_menu(&self, user: UserId, options: &[ActionTag]) -> Result<(), DeliveryError>;
}
