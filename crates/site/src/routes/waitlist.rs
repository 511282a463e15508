//! Waitlist signup route handler.
//!
//! Accepts the waitlist form and replaces it with a success or error
//! fragment via HTMX. Duplicate signups render the success fragment;
//! the intake service guarantees that policy.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, extract::State, response::IntoResponse};
use serde::Deserialize;
use tracing::instrument;

use crate::services::waitlist;
use crate::state::AppState;

/// Waitlist signup form data.
#[derive(Debug, Deserialize)]
pub struct SubscribeForm {
    pub email: String,
}

/// Success fragment template (replaces the form via HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "waitlist/subscribe_success.html")]
pub struct SubscribeSuccessTemplate {
    pub message: &'static str,
}

/// Error fragment template (replaces the form via HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "waitlist/subscribe_error.html")]
pub struct SubscribeErrorTemplate {
    pub message: &'static str,
    pub email: String,
}

/// Subscribe to the waitlist (HTMX).
#[instrument(skip(state, form))]
pub async fn subscribe(
    State(state): State<AppState>,
    Form(form): Form<SubscribeForm>,
) -> impl IntoResponse {
    let outcome = waitlist::subscribe(state.pool(), &form.email).await;

    if outcome.is_success() {
        SubscribeSuccessTemplate {
            message: outcome.message(),
        }
        .into_response()
    } else {
        SubscribeErrorTemplate {
            message: outcome.message(),
            email: form.email,
        }
        .into_response()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_success_fragment_renders_message() {
        let html = SubscribeSuccessTemplate {
            message: "Welcome to the club!",
        }
        .render()
        .unwrap();
        assert!(html.contains("Welcome to the club!"));
    }

    #[test]
    fn test_error_fragment_keeps_typed_email() {
        let html = SubscribeErrorTemplate {
            message: "Please enter a valid email address.",
            email: "typo@nowhere".to_string(),
        }
        .render()
        .unwrap();
        assert!(html.contains("Please enter a valid email address."));
        assert!(html.contains("typo@nowhere"));
    }

    #[test]
    fn test_error_fragment_escapes_email() {
        let html = SubscribeErrorTemplate {
            message: "Please enter a valid email address.",
            email: "<script>alert(1)</script>".to_string(),
        }
        .render()
        .unwrap();
        assert!(!html.contains("<script>alert(1)</script>"));
    }
}
