//! Lookup tables for gateway status and reason codes.
//!
//! Unknown codes map to an empty description.

pub const NO_ERRORS: &str = "NO_ERRORS";
pub const PROCESSING_ERROR: &str = "PROCESSING_ERROR";
pub const MISSING_DEVICE_TOKEN: &str = "MISSING_DEVICE_TOKEN";
pub const MISSING_TOPIC: &str = "MISSING_TOPIC";
pub const MISSING_PAYLOAD: &str = "MISSING_PAYLOAD";
pub const INVALID_TOKEN_SIZE: &str = "INVALID_TOKEN_SIZE";
pub const INVALID_TOPIC_SIZE: &str = "INVALID_TOPIC_SIZE";
pub const INVALID_PAYLOAD_SIZE: &str = "INVALID_PAYLOAD_SIZE";
pub const INVALID_TOKEN: &str = "INVALID_TOKEN";
pub const SHUTDOWN: &str = "SHUTDOWN";
pub const UNKNOWN: &str = "UNKNOWN";

/// Status byte of a legacy error frame.
pub fn legacy_description(status: u8) -> &'static str {
    match status {
        0 => NO_ERRORS,
        1 => PROCESSING_ERROR,
        2 => MISSING_DEVICE_TOKEN,
        3 => MISSING_TOPIC,
        4 => MISSING_PAYLOAD,
        5 => INVALID_TOKEN_SIZE,
        6 => INVALID_TOPIC_SIZE,
        7 => INVALID_PAYLOAD_SIZE,
        8 => INVALID_TOKEN,
        10 => SHUTDOWN,
        255 => UNKNOWN,
        _ => "",
    }
}

/// HTTP status returned by the HTTP/2 gateway.
pub fn status_description(status: u16) -> &'static str {
    match status {
        200 => "Success.",
        400 => "Bad request.",
        403 => "There was an error with the certificate.",
        405 => "The request used a bad method value. Only \"POST\" requests are supported.",
        410 => "The device token is no longer active for the topic.",
        413 => "The notification payload was too large.",
        429 => "The server received too many requests for the same device token.",
        500 => "Internal server error.",
        503 => "The server is shutting down and unavailable.",
        _ => "",
    }
}

/// `reason` string from the JSON body of a non-200 HTTP/2 response.
pub fn reason_description(reason: &str) -> &'static str {
    match reason {
        "PayloadEmpty" => "The message payload was empty.",
        "PayloadTooLarge" => {
            "The message payload was too large. The maximum payload size is 4096 bytes."
        }
        "BadTopic" => "The apns-topic was invalid.",
        "TopicDisallowed" => "Pushing to this topic is not allowed.",
        "BadMessageId" => "The apns-id value is bad.",
        "BadExpirationDate" => "The apns-expiration value is bad.",
        "BadPriority" => "The apns-priority value is bad.",
        "MissingDeviceToken" => {
            "The device token is not specified in the request :path. Verify that the :path header contains the device token."
        }
        "BadDeviceToken" => {
            "The specified device token was bad. Verify that the request contains a valid token and that the token matches the environment."
        }
        "DeviceTokenNotForTopic" => "The device token does not match the specified topic.",
        "Unregistered" => "The device token is inactive for the specified topic.",
        "DuplicateHeaders" => "One or more headers were repeated.",
        "BadCertificateEnvironment" => "The client certificate was for the wrong environment.",
        "BadCertificate" => "The certificate was bad.",
        "Forbidden" => "The specified action is not allowed.",
        "BadPath" => "The request contained a bad :path value.",
        "MethodNotAllowed" => "The specified :method was not POST.",
        "TooManyRequests" => "Too many requests were made consecutively to the same device token.",
        "IdleTimeout" => "Idle time out.",
        "Shutdown" => "The server is shutting down.",
        "InternalServerError" => "An internal server error occurred.",
        "ServiceUnavailable" => "The service is unavailable.",
        "MissingTopic" => {
            "The apns-topic header of the request was not specified and was required. The apns-topic header is mandatory when the client is connected using a certificate that supports multiple topics."
        }
        _ => "",
    }
}
