//! Request encoding for the HTTP/2 gateway.

use reqwest::header::{CONTENT_TYPE, HeaderValue};
use reqwest::{Method, Request, Url};

use crate::message::HttpMessage;
use crate::utils::ApnsError;

pub const MAX_PAYLOAD: usize = 4096;
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

pub const APNS_ID: &str = "apns-id";
pub const APNS_TOPIC: &str = "apns-topic";
pub const APNS_PRIORITY: &str = "apns-priority";
pub const APNS_EXPIRATION: &str = "apns-expiration";

/// Builds `POST https://{gateway_host}/3/device/{hex token}` for `message`.
pub fn encode(message: &HttpMessage, gateway_host: &str) -> Result<Request, ApnsError> {
    if gateway_host.is_empty() {
        return Err(ApnsError::ServiceUnavailable);
    }
    if !message.payload().has_aps() {
        return Err(ApnsError::EmptyPayload);
    }

    let body = message.payload().to_json()?;
    if body.len() > MAX_PAYLOAD {
        return Err(ApnsError::PayloadTooLarge {
            size: body.len(),
            limit: MAX_PAYLOAD,
        });
    }

    let url = Url::parse(&format!(
        "https://{gateway_host}/3/device/{}",
        message.device_token().to_hex()
    ))
    .map_err(|_| ApnsError::ServiceUnavailable)?;

    let apns_id =
        HeaderValue::from_str(&message.apns_id).map_err(|_| ApnsError::InvalidHeader(APNS_ID))?;
    let topic =
        HeaderValue::from_str(&message.topic).map_err(|_| ApnsError::InvalidHeader(APNS_TOPIC))?;

    let mut request = Request::new(Method::POST, url);
    let headers = request.headers_mut();
    headers.insert(APNS_ID, apns_id);
    headers.insert(APNS_TOPIC, topic);
    headers.insert(
        APNS_PRIORITY,
        HeaderValue::from(i32::from(message.priority.as_i8())),
    );
    headers.insert(APNS_EXPIRATION, HeaderValue::from(message.expiration));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
    *request.body_mut() = Some(body.into());

    Ok(request)
}
