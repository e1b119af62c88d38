//! Shared helpers for router tests.

#![allow(dead_code, clippy::unwrap_used)]

use std::collections::HashMap;

use assistra_site::config::SiteConfig;
use assistra_site::routes::build_router;
use assistra_site::state::AppState;
use axum::{
    Router,
    body::Body,
    http::{
        Request, Response,
        header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE},
    },
};
use tower::ServiceExt;

pub const ADMIN_EMAIL: &str = "marina@assistra.com.br";
pub const ADMIN_USERNAME: &str = "marina";
pub const ADMIN_PASSWORD: &str = "k7#Qv9!rT2xLw4";

/// Configuration with only the required variables plus `extra`.
pub fn config(extra: &[(&str, &str)]) -> SiteConfig {
    let mut vars: HashMap<String, String> = [
        ("SITE_BASE_URL", "http://localhost:3000"),
        ("ADMIN_NAME", "Marina Alves"),
        ("ADMIN_EMAIL", ADMIN_EMAIL),
        ("ADMIN_USERNAME", ADMIN_USERNAME),
        ("ADMIN_PASSWORD", ADMIN_PASSWORD),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    for (key, value) in extra {
        vars.insert((*key).to_string(), (*value).to_string());
    }

    SiteConfig::from_lookup(|key| vars.get(key).cloned()).unwrap()
}

pub fn app(config: SiteConfig) -> Router {
    build_router(AppState::new(config).unwrap())
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn get_with_cookie(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(COOKIE, cookie)
        .body(Body::empty())
        .unwrap()
}

/// Login form submission from `client_ip`.
pub fn login_request(identifier: &str, password: &str, client_ip: &str) -> Request<Body> {
    let body = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("identifier", identifier)
        .append_pair("password", password)
        .finish();

    Request::builder()
        .method("POST")
        .uri("/admin/login")
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .header("x-forwarded-for", client_ip)
        .body(Body::from(body))
        .unwrap()
}

pub fn post_json(uri: &str, json: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(json.to_string()))
        .unwrap()
}

pub fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_str(&body_string(response).await).unwrap()
}

pub fn location(response: &Response<Body>) -> &str {
    response.headers().get(LOCATION).unwrap().to_str().unwrap()
}

/// `name=value` of the session cookie set by `response`.
pub fn session_cookie(response: &Response<Body>) -> String {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with("assistra_session="))
        .and_then(|value| value.split(';').next())
        .unwrap()
        .to_string()
}
