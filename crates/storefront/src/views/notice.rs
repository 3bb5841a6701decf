//! User-facing notices: action confirmations and load failures.

use askama::Template;
use serde::{Deserialize, Serialize};

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeLevel {
    Info,
    Error,
}

impl NoticeLevel {
    /// CSS modifier class.
    #[must_use]
    pub const fn class(self) -> &'static str {
        match self {
            Self::Info => "notice-info",
            Self::Error => "notice-error",
        }
    }

    /// ARIA role: errors interrupt, confirmations do not.
    #[must_use]
    pub const fn role(self) -> &'static str {
        match self {
            Self::Info => "status",
            Self::Error => "alert",
        }
    }
}

/// A short message shown above the page content.
///
/// Serializable so it can travel across a redirect as a session flash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Standalone notice fragment (HTMX responses, failed containers).
#[derive(Template)]
#[template(path = "partials/notice.html")]
pub struct NoticeTemplate {
    pub notice: Notice,
}

impl From<Notice> for NoticeTemplate {
    fn from(notice: Notice) -> Self {
        Self { notice }
    }
}
