//! Session middleware configuration and session-backed page state.
//!
//! Sessions live in process memory via tower-sessions' `MemoryStore`; a
//! restart logs everyone out. Besides the login they carry the last viewed
//! product (for recommendations) and a one-shot flash notice that survives a
//! post/redirect/get round trip.

use axum::{extract::FromRequestParts, http::request::Parts};
use cartiq_core::ProductId;
use tower_sessions::{Expiry, MemoryStore, Session, SessionManagerLayer};

use crate::config::StorefrontConfig;
use crate::models::{CurrentUser, session_keys};
use crate::views::Notice;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "cartiq_session";

/// Session expiry time in seconds (7 days).
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Create the session layer with an in-memory store.
#[must_use]
pub fn create_session_layer(config: &StorefrontConfig) -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}

// =============================================================================
// Flash notices
// =============================================================================

/// Store a notice to show on the next rendered page.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_flash(
    session: &Session,
    notice: &Notice,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::FLASH, notice).await
}

/// Take the pending notice, if any. It is shown once.
pub async fn take_flash(session: &Session) -> Option<Notice> {
    session
        .remove::<Notice>(session_keys::FLASH)
        .await
        .ok()
        .flatten()
}

// =============================================================================
// Last viewed product
// =============================================================================

/// Remember the product the user just viewed.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_last_viewed(
    session: &Session,
    id: ProductId,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::LAST_VIEWED, id).await
}

/// The product the user viewed most recently.
pub async fn last_viewed(session: &Session) -> Option<ProductId> {
    session
        .get::<ProductId>(session_keys::LAST_VIEWED)
        .await
        .ok()
        .flatten()
}

// =============================================================================
// Page chrome
// =============================================================================

/// Layout data every full page needs: who is logged in and any pending
/// notice.
///
/// Extracting it consumes the flash notice.
#[derive(Debug, Clone, Default)]
pub struct PageChrome {
    pub current_user: Option<String>,
    pub notice: Option<Notice>,
}

impl<S> FromRequestParts<S> for PageChrome
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(session) = parts.extensions.get::<Session>() else {
            return Ok(Self::default());
        };

        let current_user = session
            .get::<CurrentUser>(session_keys::CURRENT_USER)
            .await
            .ok()
            .flatten()
            .map(|user| user.username.into_inner());

        Ok(Self {
            current_user,
            notice: take_flash(session).await,
        })
    }
}
