//! Backend Client
//!
//! One async function per endpoint, organized by domain. Every call goes
//! through `request`, which sends the session cookie, maps a 401 to a login
//! redirect and decodes the JSON body.

mod applications;
mod auth;
mod destinations;
mod groups;
mod itinerary;
mod tags;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestCredentials, RequestInit, Response};

use crate::config::{api_url, LOGIN_PATH};
use crate::error::ApiError;
use crate::models::Envelope;

// Re-export all public items
pub use applications::*;
pub use auth::*;
pub use destinations::*;
pub use groups::*;
pub use itinerary::*;
pub use tags::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Method {
    Get,
    Post,
    Put,
}

impl Method {
    fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
        }
    }
}

/// Body of a non-2xx reply, when the server sent one
#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

fn js_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| js_sys::JSON::stringify(value).ok().map(String::from))
        .unwrap_or_else(|| "unknown error".to_string())
}

fn redirect_to_login() {
    let Some(window) = web_sys::window() else { return };
    let location = window.location();
    if location.pathname().ok().as_deref() == Some(LOGIN_PATH) {
        return;
    }
    if let Err(e) = location.set_href(LOGIN_PATH) {
        log::warn!("[API] login redirect failed: {}", js_message(&e));
    }
}

async fn read_json(resp: &Response) -> Result<JsValue, ApiError> {
    let promise = resp.json().map_err(|e| ApiError::Decode(js_message(&e)))?;
    JsFuture::from(promise).await.map_err(|e| ApiError::Decode(js_message(&e)))
}

/// Issue a request and return the parsed JSON body of a 2xx reply
async fn send(method: Method, path: &str, body: Option<String>) -> Result<JsValue, ApiError> {
    let window = web_sys::window().ok_or_else(|| ApiError::Network("no window".to_string()))?;
    let url = api_url(path);

    let init = RequestInit::new();
    init.set_method(method.as_str());
    init.set_credentials(RequestCredentials::Include);
    if let Some(body) = body.as_deref() {
        init.set_body(&JsValue::from_str(body));
    }

    let request = Request::new_with_str_and_init(&url, &init).map_err(|e| ApiError::Network(js_message(&e)))?;
    request
        .headers()
        .set("Content-Type", "application/json")
        .map_err(|e| ApiError::Network(js_message(&e)))?;

    log::debug!("[API] {} {}", method.as_str(), url);
    let reply = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| ApiError::Network(js_message(&e)))?;
    let resp: Response = reply.dyn_into().map_err(|e| ApiError::Decode(js_message(&e)))?;

    if resp.status() == 401 {
        log::info!("[API] {} {} unauthorized", method.as_str(), path);
        redirect_to_login();
        return Err(ApiError::Unauthorized);
    }
    if !resp.ok() {
        let code = resp.status();
        let message = read_json(&resp)
            .await
            .ok()
            .and_then(|v| serde_wasm_bindgen::from_value::<ErrorBody>(v).ok())
            .and_then(|b| b.message.or(b.error))
            .unwrap_or_else(|| resp.status_text());
        log::warn!("[API] {} {} -> {}: {}", method.as_str(), path, code, message);
        return Err(ApiError::Status { code, message });
    }
    read_json(&resp).await
}

fn encode_body<B: Serialize>(body: &B) -> Result<String, ApiError> {
    serde_json::to_string(body).map_err(|e| ApiError::Decode(e.to_string()))
}

fn decode<T: DeserializeOwned>(value: JsValue) -> Result<T, ApiError> {
    serde_wasm_bindgen::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Plain JSON reply
pub(crate) async fn request<T, B>(method: Method, path: &str, body: Option<&B>) -> Result<T, ApiError>
where
    T: DeserializeOwned,
    B: Serialize,
{
    let body = body.map(encode_body).transpose()?;
    decode(send(method, path, body).await?)
}

/// Enveloped reply; `Ok(None)` when a successful call carries `data: null`
pub(crate) async fn request_optional<T, B>(method: Method, path: &str, body: Option<&B>) -> Result<Option<T>, ApiError>
where
    T: DeserializeOwned,
    B: Serialize,
{
    let envelope: Envelope<T> = request(method, path, body).await?;
    envelope.into_optional().inspect_err(|e| log::warn!("[API] {} rejected: {}", path, e))
}

/// Enveloped reply that must carry data
pub(crate) async fn request_data<T, B>(method: Method, path: &str, body: Option<&B>) -> Result<T, ApiError>
where
    T: DeserializeOwned,
    B: Serialize,
{
    request_optional(method, path, body)
        .await?
        .ok_or_else(|| ApiError::Decode(format!("{} carried no data", path)))
}

/// Enveloped reply whose data is ignored
pub(crate) async fn request_ack<B: Serialize>(method: Method, path: &str, body: Option<&B>) -> Result<(), ApiError> {
    request_optional::<serde::de::IgnoredAny, B>(method, path, body).await.map(|_| ())
}

/// Placeholder body type for requests without one
pub(crate) const NO_BODY: Option<&()> = None;
