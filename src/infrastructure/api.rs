//! HTTP collaborator for the storefront API.
//!
//! Every endpoint answers with an [`ApiEnvelope`]; only its `success` flag and
//! `data` payload are looked at. Requests are blocking and issued one at a
//! time from the UI loop, with no retry.

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, warn};

use super::config::Config;
use crate::domain::{
    ApiEnvelope, AuthData, LoginPayload, OrderPage, OrderQuery, Profile, RegisterPayload, RestaurantDetail,
    RestaurantPage, RestaurantQuery, ReviewPage, ReviewPayload,
};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{message}")]
    Http { status: u16, message: String },
    #[error("{message}")]
    Unauthorized { message: String },
    #[error("{0}")]
    Rejected(String),
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Unexpected response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// A 401 means the held token is no longer valid.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Read and write operations the storefront needs from the remote API.
///
/// Authorized calls take the session token, if any, and send it as a bearer
/// credential.
pub trait StorefrontApi {
    fn restaurants(&self, token: Option<&str>, query: &RestaurantQuery) -> ApiResult<RestaurantPage>;
    fn restaurant_detail(&self, token: Option<&str>, restaurant_id: &str) -> ApiResult<RestaurantDetail>;
    fn restaurant_reviews(&self, token: Option<&str>, restaurant_id: &str, page: u32, limit: u32) -> ApiResult<ReviewPage>;
    fn orders(&self, token: Option<&str>, query: &OrderQuery) -> ApiResult<OrderPage>;
    fn profile(&self, token: Option<&str>) -> ApiResult<Profile>;
    fn login(&self, payload: &LoginPayload) -> ApiResult<AuthData>;
    fn register(&self, payload: &RegisterPayload) -> ApiResult<AuthData>;
    fn submit_review(&self, token: Option<&str>, payload: &ReviewPayload) -> ApiResult<()>;
}

pub struct HttpApi {
    client: Client,
    base_url: String,
}

impl HttpApi {
    pub fn new(config: &Config) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: config.api_base.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&'static str, String)], token: Option<&str>) -> ApiResult<T> {
        debug!(path, ?query, "GET");
        let request = self.client.get(self.url(path)).query(query);
        send(with_token(request, token))
    }

    fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B, token: Option<&str>) -> ApiResult<T> {
        debug!(path, "POST");
        let request = self.client.post(self.url(path)).json(body);
        send(with_token(request, token))
    }
}

impl StorefrontApi for HttpApi {
    fn restaurants(&self, token: Option<&str>, query: &RestaurantQuery) -> ApiResult<RestaurantPage> {
        self.get("/api/resto", &query.to_pairs(), token)
    }

    fn restaurant_detail(&self, token: Option<&str>, restaurant_id: &str) -> ApiResult<RestaurantDetail> {
        self.get(&format!("/api/resto/{}", restaurant_id), &[], token)
    }

    fn restaurant_reviews(&self, token: Option<&str>, restaurant_id: &str, page: u32, limit: u32) -> ApiResult<ReviewPage> {
        let query = [("page", page.to_string()), ("limit", limit.to_string())];
        self.get(&format!("/api/review/restaurant/{}", restaurant_id), &query, token)
    }

    fn orders(&self, token: Option<&str>, query: &OrderQuery) -> ApiResult<OrderPage> {
        self.get("/api/orders", &query.to_pairs(), token)
    }

    fn profile(&self, token: Option<&str>) -> ApiResult<Profile> {
        self.get("/api/auth/profile", &[], token)
    }

    fn login(&self, payload: &LoginPayload) -> ApiResult<AuthData> {
        self.post("/api/auth/login", payload, None)
    }

    fn register(&self, payload: &RegisterPayload) -> ApiResult<AuthData> {
        self.post("/api/auth/register", payload, None)
    }

    fn submit_review(&self, token: Option<&str>, payload: &ReviewPayload) -> ApiResult<()> {
        let _: Option<serde_json::Value> = self.post("/api/review", payload, token)?;
        Ok(())
    }
}

fn with_token(request: RequestBuilder, token: Option<&str>) -> RequestBuilder {
    match token {
        Some(token) => request.bearer_auth(token),
        None => request,
    }
}

fn send<T: DeserializeOwned>(request: RequestBuilder) -> ApiResult<T> {
    let response = request.send()?;
    let status = response.status().as_u16();
    let body = response.text()?;
    parse_response(status, &body)
}

/// Turns a status code and raw body into the envelope's payload or an error.
pub fn parse_response<T: DeserializeOwned>(status: u16, body: &str) -> ApiResult<T> {
    if !(200..300).contains(&status) {
        let message = error_message(status, body);
        warn!(status, %message, "API request failed");
        return Err(if status == 401 {
            ApiError::Unauthorized { message }
        } else {
            ApiError::Http { status, message }
        });
    }

    let envelope: ApiEnvelope<T> = serde_json::from_str(body)?;
    if !envelope.success {
        let message = envelope
            .message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| "Request was not successful".to_string());
        return Err(ApiError::Rejected(message));
    }
    match envelope.data {
        Some(data) => Ok(data),
        // Writes may answer without a payload; only `Option<_>` targets accept that
        None => Ok(serde_json::from_value(serde_json::Value::Null)?),
    }
}

/// The `message` field of an error body, or `Request failed (<status>)`.
pub fn error_message(status: u16, body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| value.get("message")?.as_str().map(str::to_string))
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| format!("Request failed ({})", status))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_from_body() {
        assert_eq!(error_message(400, r#"{"message":"Email already used"}"#), "Email already used");
    }

    #[test]
    fn test_error_message_fallback() {
        assert_eq!(error_message(500, "<html>oops</html>"), "Request failed (500)");
        assert_eq!(error_message(404, r#"{"error":"nope"}"#), "Request failed (404)");
        assert_eq!(error_message(422, r#"{"message":""}"#), "Request failed (422)");
        assert_eq!(error_message(503, ""), "Request failed (503)");
    }

    #[test]
    fn test_parse_response_unauthorized() {
        let err = parse_response::<Profile>(401, r#"{"message":"Token expired"}"#).unwrap_err();
        assert!(err.is_unauthorized());
        assert_eq!(err.to_string(), "Token expired");
    }

    #[test]
    fn test_parse_response_http_error() {
        let err = parse_response::<Profile>(500, "").unwrap_err();
        assert!(matches!(err, ApiError::Http { status: 500, .. }));
        assert!(!err.is_unauthorized());
        assert_eq!(err.to_string(), "Request failed (500)");
    }

    #[test]
    fn test_parse_response_success() {
        let profile: Profile = parse_response(
            200,
            r#"{"success":true,"data":{"id":7,"name":"Budi","email":"budi@mail.com"}}"#,
        )
        .unwrap();
        assert_eq!(profile.id, "7");
        assert_eq!(profile.name, "Budi");
        assert!(profile.phone.is_none());
    }

    #[test]
    fn test_parse_response_rejected() {
        let err = parse_response::<Option<Profile>>(200, r#"{"success":false,"message":"Not allowed","data":null}"#).unwrap_err();
        assert!(matches!(err, ApiError::Rejected(ref m) if m == "Not allowed"));
    }

    #[test]
    fn test_parse_response_rejected_without_data() {
        let err = parse_response::<RestaurantPage>(200, r#"{"success":false,"message":"Invalid range"}"#).unwrap_err();
        assert!(matches!(err, ApiError::Rejected(ref m) if m == "Invalid range"));

        let err =
            parse_response::<RestaurantPage>(200, r#"{"success":false,"message":"Invalid range","data":null}"#)
                .unwrap_err();
        assert!(matches!(err, ApiError::Rejected(ref m) if m == "Invalid range"));

        let err = parse_response::<OrderPage>(200, r#"{"success":false}"#).unwrap_err();
        assert_eq!(err.to_string(), "Request was not successful");
    }

    #[test]
    fn test_parse_response_success_without_data() {
        let err = parse_response::<RestaurantPage>(200, r#"{"success":true,"data":null}"#).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn test_parse_response_bad_json() {
        let err = parse_response::<Profile>(200, "not json").unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn test_parse_response_without_data_for_writes() {
        let data: Option<serde_json::Value> = parse_response(201, r#"{"success":true,"message":"ok"}"#).unwrap();
        assert!(data.is_none());
    }

    #[test]
    fn test_http_api_trims_base_url() {
        let config = Config {
            api_base: "http://localhost:8080/".to_string(),
            ..Config::default()
        };
        let api = HttpApi::new(&config).unwrap();
        assert_eq!(api.url("/api/resto"), "http://localhost:8080/api/resto");
    }
}
