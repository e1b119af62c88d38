//! Newsletter subscription endpoint.
//!
//! `POST /api/newsletter` accepts `{email, locale?}` as JSON or as a form.
//! Every answer is JSON: `{"message": ...}` on success, `{"error": ...}`
//! otherwise.

use axum::{
    Form, Json,
    extract::{FromRequest, Request, State},
    http::{StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use assistra_core::{Email, Locale};

use crate::i18n;
use crate::state::AppState;

/// Newsletter subscription payload.
#[derive(Debug, Deserialize)]
pub struct SubscribeRequest {
    pub email: String,
    /// Locale of the page the visitor signed up from (`pt` when absent).
    #[serde(default)]
    pub locale: Option<String>,
}

/// JSON answer body.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum SubscribeResponse {
    Message { message: &'static str },
    Error { error: &'static str },
}

/// Extractor accepting either a JSON or a url-encoded body.
///
/// Bodies that fail to parse, including ones missing `email`, are answered
/// with `400 {"error": ...}` like any other invalid signup.
pub struct JsonOrForm<T>(pub T);

impl<S, T> FromRequest<S> for JsonOrForm<T>
where
    S: Send + Sync,
    T: serde::de::DeserializeOwned + 'static,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("application/json"));

        let payload = if is_json {
            Json::<T>::from_request(req, state)
                .await
                .map(|Json(payload)| payload)
                .map_err(|e| e.body_text())
        } else {
            Form::<T>::from_request(req, state)
                .await
                .map(|Form(payload)| payload)
                .map_err(|e| e.body_text())
        };

        payload.map(Self).map_err(|reason| {
            tracing::debug!(%reason, "Rejected newsletter body");
            reply(
                StatusCode::BAD_REQUEST,
                SubscribeResponse::Error {
                    error: i18n::messages(Locale::default()).newsletter_invalid_email,
                },
            )
        })
    }
}

fn reply(status: StatusCode, body: SubscribeResponse) -> Response {
    (status, Json(body)).into_response()
}

/// Subscribe an address to the newsletter list.
#[instrument(skip(state, payload))]
pub async fn subscribe(
    State(state): State<AppState>,
    JsonOrForm(payload): JsonOrForm<SubscribeRequest>,
) -> Response {
    let locale = payload
        .locale
        .as_deref()
        .map_or_else(Locale::default, Locale::parse_or_default);
    let t = i18n::messages(locale);

    let Some(client) = state.newsletter() else {
        tracing::error!("Newsletter signup attempted but Klaviyo is not configured");
        return reply(
            StatusCode::INTERNAL_SERVER_ERROR,
            SubscribeResponse::Error {
                error: t.newsletter_unavailable,
            },
        );
    };

    let email = match Email::parse(&payload.email) {
        Ok(email) => email,
        Err(e) => {
            tracing::debug!(error = %e, "Rejected newsletter email");
            return reply(
                StatusCode::BAD_REQUEST,
                SubscribeResponse::Error {
                    error: t.newsletter_invalid_email,
                },
            );
        }
    };

    match client.subscribe(&email, locale).await {
        Ok(()) => {
            tracing::info!(domain = %email.domain(), %locale, "Newsletter subscription accepted");
            reply(
                StatusCode::OK,
                SubscribeResponse::Message {
                    message: t.newsletter_success,
                },
            )
        }
        Err(e) => {
            let event_id = sentry::capture_error(&e);
            tracing::error!(error = %e, sentry_event_id = %event_id, "Newsletter subscription failed");
            reply(
                StatusCode::INTERNAL_SERVER_ERROR,
                SubscribeResponse::Error {
                    error: t.newsletter_failed,
                },
            )
        }
    }
}
