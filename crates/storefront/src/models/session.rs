//! Session-related types.
//!
//! Types stored in the session for login state and cross-request UI state.

use cartiq_core::Username;
use serde::{Deserialize, Serialize};

/// Session-stored shopper identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Name the shopper logged in with.
    pub username: Username,
}

impl CurrentUser {
    #[must_use]
    pub const fn new(username: Username) -> Self {
        Self { username }
    }
}

/// Session keys.
pub mod keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";

    /// Key for the product the logged-in user viewed most recently.
    pub const LAST_VIEWED: &str = "last_viewed";

    /// Key for a one-shot notice carried across a redirect.
    pub const FLASH: &str = "flash";
}
