//! Login and logout route handlers.
//!
//! Login only asks for a username. It personalises the storefront
//! (recommendations) but guards nothing.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use cartiq_core::Username;
use serde::Deserialize;
use tower_sessions::Session;

use crate::error::AppError;
use crate::filters;
use crate::middleware::{PageChrome, clear_current_user, set_current_user, set_flash};
use crate::models::CurrentUser;
use crate::views::Notice;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub chrome: PageChrome,
    pub error: Option<String>,
}

// =============================================================================
// Routes
// =============================================================================

/// Display the login page.
pub async fn login_page(chrome: PageChrome) -> impl IntoResponse {
    LoginTemplate {
        chrome,
        error: None,
    }
}

/// Handle login form submission.
///
/// An invalid username re-renders the form with the reason.
pub async fn login(
    session: Session,
    chrome: PageChrome,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let username = match Username::parse(&form.username) {
        Ok(username) => username,
        Err(e) => {
            tracing::debug!(error = %e, "Rejected username");
            return Ok((
                StatusCode::UNPROCESSABLE_ENTITY,
                LoginTemplate {
                    chrome,
                    error: Some(e.to_string()),
                },
            )
                .into_response());
        }
    };

    tracing::info!(username = %username, "User logged in");
    let user = CurrentUser::new(username);
    set_current_user(&session, &user).await?;
    set_flash(&session, &Notice::info(format!("Welcome, {}.", user.username))).await?;

    Ok(Redirect::to("/").into_response())
}

/// Handle logout.
///
/// Clears the login and destroys the session.
pub async fn logout(session: Session) -> Response {
    if let Err(e) = clear_current_user(&session).await {
        tracing::error!("Failed to clear session: {}", e);
    }

    // Also destroy the entire session
    if let Err(e) = session.flush().await {
        tracing::error!("Failed to flush session: {}", e);
    }

    Redirect::to("/").into_response()
}
