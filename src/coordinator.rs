//! Session coordinator: sequences photo, charset, and action events.
//!
//! One entry point per inbound event kind. The coordinator consults and
//! mutates the session store, runs the requested transform on bytes fetched
//! through the [`ImageSource`] seam, and hands results to the [`Delivery`]
//! seam. Per-user state machine:
//!
//! ```text
//! Idle --photo--> AwaitingCharset --text--> AwaitingAction --action--> AwaitingAction
//!                       ^                                                  |
//!                       +------------------- photo ----------------------+
//! ```
//!
//! Transform and decode failures are scoped to the one request: the user
//! gets a plain-text failure notice and no other session is touched.
//! Retrieval and delivery failures propagate upward unretried.

use crate::action::{ActionTag, MENU_ACTIONS};
use crate::ascii::{self, AsciiError, GlyphRamp};
use crate::config::Config;
use crate::platform::{Delivery, DeliveryError, ImageFormat, ImageSource, RetrievalError};
use crate::raster::{self, MirrorAxis, RasterError};
use crate::session::{PhotoRef, Session, SessionStore, UserId};

/// Reply to a `/start` or `/help` command; used by the platform glue.
pub const WELCOME_TEXT: &str = "Send me an image, and I'll provide options for you!";

/// Prompt delivered when a photo arrives.
pub const CHARSET_PROMPT: &str =
    "I got your photo! Please send me the set of characters you'd like to use for ASCII art.";

/// Prompt delivered with the action menu once the charset is captured.
pub const MENU_PROMPT: &str = "Got it! Please choose what you'd like to do with your image.";

/// Plain-text notice delivered when a transform fails for one request.
pub const FAILURE_NOTICE: &str =
    "Sorry, something went wrong while processing your image. Please try sending the photo again.";

/// Errors the coordinator reports upward. Everything else is scoped to the
/// current request and surfaced to the user instead.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Retrieval(#[from] RetrievalError),

    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}

/// A transform failure scoped to one user's one request.
#[derive(Debug, thiserror::Error)]
enum TransformError {
    #[error(transparent)]
    Raster(#[from] RasterError),

    #[error(transparent)]
    Ascii(#[from] AsciiError),
}

/// What a transform produced for delivery.
enum Outcome {
    Text(String),
    Image(Vec<u8>, ImageFormat),
}

/// Interprets inbound events against the session store and drives the
/// transforms and collaborators.
pub struct Coordinator<S, D> {
    store: SessionStore,
    source: S,
    delivery: D,
    config: Config,
}

impl<S: ImageSource, D: Delivery> Coordinator<S, D> {
    pub fn new(source: S, delivery: D) -> Self {
        Self::with_config(source, delivery, Config::default())
    }

    pub fn with_config(source: S, delivery: D, config: Config) -> Self {
        Self {
            store: SessionStore::new(),
            source,
            delivery,
            config,
        }
    }

    /// The session store, for platform glue that wants visibility.
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// A photo arrived. Unconditionally creates or overwrites the user's
    /// session (last photo wins, prior charset discarded) and prompts for a
    /// character set. Idempotent under replay.
    pub async fn on_photo(&self, user: UserId, photo: PhotoRef) -> Result<(), EngineError> {
        self.store.put(user, Session::AwaitingCharset { photo });
        self.delivery.deliver_text(user, CHARSET_PROMPT).await?;
        Ok(())
    }

    /// A text message arrived. Captured as the glyph ramp charset only when
    /// this user has a session still awaiting one; the text is stored
    /// verbatim, with no normalization. Any other text is not ours to
    /// handle and falls through as a no-op.
    pub async fn on_text(&self, user: UserId, text: &str) -> Result<(), EngineError> {
        if !self.store.capture_charset(user, text) {
            log::debug!("{user}: text outside charset capture, ignoring");
            return Ok(());
        }

        self.delivery.deliver_text(user, MENU_PROMPT).await?;
        self.delivery.present_menu(user, &MENU_ACTIONS).await?;
        Ok(())
    }

    /// An action button was pressed. Unknown tags and out-of-state presses
    /// are dropped (logged, no user-visible error). ASCII requires the
    /// charset to be set; every other action needs only the photo.
    pub async fn on_action(&self, user: UserId, tag: &str) -> Result<(), EngineError> {
        let Some(action) = ActionTag::from_tag(tag) else {
            log::debug!("{user}: unknown action tag '{tag}', ignoring");
            return Ok(());
        };
        let Some(session) = self.store.get(user) else {
            log::debug!("{user}: action '{action}' with no session, ignoring");
            return Ok(());
        };
        if action.needs_charset() && session.charset().is_none() {
            log::debug!("{user}: action '{action}' before charset capture, ignoring");
            return Ok(());
        }

        self.delivery
            .deliver_text(user, action.progress_notice())
            .await?;

        let bytes = self.source.retrieve(session.photo()).await?;

        match self.apply(action, &session, &bytes) {
            Ok(Outcome::Text(text)) => self.delivery.deliver_text(user, &text).await?,
            Ok(Outcome::Image(bytes, format)) => {
                self.delivery.deliver_image(user, bytes, format).await?
            }
            Err(err) => {
                log::warn!("{user}: transform '{action}' failed: {err}");
                self.delivery.deliver_text(user, FAILURE_NOTICE).await?;
            }
        }
        Ok(())
    }

    /// Run one transform over the fetched bytes. Pure with respect to the
    /// session store; failures here never cross user boundaries.
    fn apply(
        &self,
        action: ActionTag,
        session: &Session,
        bytes: &[u8],
    ) -> Result<Outcome, TransformError> {
        match action {
            ActionTag::Ascii => {
                // charset presence was checked at dispatch; an empty string
                // still fails ramp construction and surfaces as a notice
                let charset = session.charset().unwrap_or(ascii::DEFAULT_GLYPH_RAMP);
                let ramp = GlyphRamp::new(charset)?;
                let art = ascii::render_bytes(bytes, self.config.ascii.width, &ramp)?;
                Ok(Outcome::Text(art))
            }
            ActionTag::Pixelate => {
                let image = raster::decode(bytes)?;
                let out = raster::pixelate(&image, self.config.pixelate.cell_size)?;
                Ok(Outcome::Image(raster::encode_jpeg(&out)?, ImageFormat::Jpeg))
            }
            ActionTag::Invert => {
                let image = raster::decode(bytes)?;
                let out = raster::invert(&image);
                Ok(Outcome::Image(raster::encode_jpeg(&out)?, ImageFormat::Jpeg))
            }
            ActionTag::MirrorHorizontal => {
                let image = raster::decode(bytes)?;
                let out = raster::mirror(&image, MirrorAxis::Horizontal);
                Ok(Outcome::Image(raster::encode_jpeg(&out)?, ImageFormat::Jpeg))
            }
            ActionTag::MirrorVertical => {
                let image = raster::decode(bytes)?;
                let out = raster::mirror(&image, MirrorAxis::Vertical);
                Ok(Outcome::Image(raster::encode_jpeg(&out)?, ImageFormat::Jpeg))
            }
            ActionTag::Heatmap => {
                let image = raster::decode(bytes)?;
                let out = raster::heatmap(&image);
                Ok(Outcome::Image(raster::encode_jpeg(&out)?, ImageFormat::Jpeg))
            }
            ActionTag::Sticker => {
                let image = raster::decode(bytes)?;
                let out = raster::resize_to_bound(&image, self.config.sticker.max_side)?;
                Ok(Outcome::Image(raster::encode_png(&out)?, ImageFormat::Png))
            }
        }
    }
}
