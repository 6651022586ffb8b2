use crate::error::HandlerError;
use aws_lambda_events::apigw::{ApiGatewayProxyRequest, ApiGatewayProxyResponse};
use aws_lambda_events::encodings::Body;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use http::header::{HeaderValue, CONTENT_TYPE};
use http::HeaderMap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Status returned for a body that does not parse.
/// Existing callers expect 404 rather than 400.
pub const MALFORMED_INPUT_STATUS: i64 = 404;

pub const OK_STATUS: i64 = 200;

/// Returns the raw request body as text.
/// A missing body is the same as an empty one.
/// Bodies passed through by API Gateway as binary are base64-decoded first.
fn request_body(request: &ApiGatewayProxyRequest) -> Result<String, HandlerError> {
    let body = request.body.clone().unwrap_or_default();

    if !request.is_base64_encoded {
        return Ok(body);
    }

    debug!("Decoding base64 request body of {} chars", body.len());
    let bytes = STANDARD
        .decode(body.as_bytes())
        .map_err(|e| HandlerError::InputShape(format!("request body is not valid base64: {e}")))?;

    String::from_utf8(bytes).map_err(|e| HandlerError::InputShape(format!("request body is not valid UTF-8: {e}")))
}

/// Parses the request body as a JSON object into the handler input type.
/// A `null` body gives the default input.
/// Keys are matched case-insensitively, an exact match wins. Input field names must be lower case.
pub fn parse_body<T: DeserializeOwned + Default>(request: &ApiGatewayProxyRequest) -> Result<T, HandlerError> {
    let body = request_body(request)?;
    debug!("Body: {}", body);

    let value: Value = serde_json::from_str(&body).map_err(|e| HandlerError::InputShape(e.to_string()))?;

    match value {
        Value::Null => Ok(T::default()),
        Value::Object(map) => {
            serde_json::from_value(Value::Object(fold_keys(map))).map_err(|e| HandlerError::InputShape(e.to_string()))
        }
        other => Err(HandlerError::InputShape(format!(
            "invalid type: {}, expected a JSON object",
            json_type(&other)
        ))),
    }
}

/// Lower-cases the keys of the top level object. Keys already in lower case take precedence
/// over case variants of the same name.
fn fold_keys(map: Map<String, Value>) -> Map<String, Value> {
    let mut folded = Map::with_capacity(map.len());
    let mut variants = Vec::new();

    for (key, value) in map {
        let lower = key.to_lowercase();
        if lower == key {
            folded.insert(key, value);
        } else {
            variants.push((lower, value));
        }
    }

    for (key, value) in variants {
        folded.entry(key).or_insert(value);
    }

    folded
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Serializes `value` into a 200 response.
pub fn ok_json<T: Serialize>(value: &T) -> Result<ApiGatewayProxyResponse, HandlerError> {
    let body = serde_json::to_string(value).map_err(HandlerError::OutputEncoding)?;

    Ok(text_response(OK_STATUS, body, "application/json"))
}

/// A response for input that could not be parsed. The body is the error description.
pub fn client_error(message: String) -> ApiGatewayProxyResponse {
    text_response(MALFORMED_INPUT_STATUS, message, "text/plain")
}

/// Turns client errors into a response and passes everything else through to be raised.
pub fn into_response(
    result: Result<ApiGatewayProxyResponse, HandlerError>,
) -> Result<ApiGatewayProxyResponse, HandlerError> {
    match result {
        Err(HandlerError::InputShape(message)) => {
            warn!("Failed run: {message}");
            Ok(client_error(message))
        }
        other => other,
    }
}

/// Returns the text body of a response, if it has one.
pub fn response_text(response: &ApiGatewayProxyResponse) -> Option<&str> {
    match &response.body {
        Some(Body::Text(text)) => Some(text.as_str()),
        _ => None,
    }
}

fn text_response(status_code: i64, body: String, content_type: &'static str) -> ApiGatewayProxyResponse {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));

    ApiGatewayProxyResponse {
        status_code,
        headers,
        body: Some(Body::Text(body)),
        ..Default::default()
    }
}
