//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (request span)
//! 3. Request ID (recorded into the span)
//! 4. Security headers (CSP, frame and isolation policies)
//! 5. Session layer (tower-sessions with `MemoryStore`)
//! 6. Rate limiting on cart actions (governor)

pub mod auth;
pub mod rate_limit;
pub mod request_id;
pub mod security_headers;
pub mod session;

pub use auth::{OptionalUser, clear_current_user, set_current_user};
pub use rate_limit::cart_rate_limiter;
pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
pub use session::{
    PageChrome, create_session_layer, last_viewed, set_flash, set_last_viewed, take_flash,
};
