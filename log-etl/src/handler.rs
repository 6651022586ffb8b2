use crate::classifier::BrowserClassifier;
use aws_lambda_events::apigw::{ApiGatewayProxyRequest, ApiGatewayProxyResponse};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use gateway_envelope::{ok_json, parse_body, HandlerError};
use serde::Deserialize;
use tracing::{debug, info};

/// Missing fields are treated as empty strings.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct LogClassifierInput {
    /// Informational only, goes to the log
    pub filename: String,
    /// Base64 encoded log file
    pub contents: String,
}

/// Decodes the uploaded file into text.
/// Line breaks inside the base64 text are ignored because encoders often wrap long output.
/// Invalid UTF-8 sequences are replaced rather than rejected.
pub fn decode_contents(contents: &str) -> Result<String, HandlerError> {
    let unwrapped: String = contents.chars().filter(|c| *c != '\r' && *c != '\n').collect();

    let bytes = STANDARD
        .decode(unwrapped.as_bytes())
        .map_err(HandlerError::TransportDecoding)?;
    debug!("Decoded {} bytes", bytes.len());

    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

pub fn handle(
    request: &ApiGatewayProxyRequest,
    classifier: &BrowserClassifier,
) -> Result<ApiGatewayProxyResponse, HandlerError> {
    let input: LogClassifierInput = parse_body(request)?;

    // stdout and stderr are sent to AWS CloudWatch Logs
    info!("Processing Lambda request {}", input.filename);

    let log = decode_contents(&input.contents)?;
    let tally = classifier.tally(&log);

    info!(
        "Counted {} lines, {} without a user agent",
        tally.total(),
        tally.malformed()
    );

    ok_json(&tally)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gateway_envelope::response_text;
    use serde_json::json;

    fn request(body: serde_json::Value) -> ApiGatewayProxyRequest {
        ApiGatewayProxyRequest {
            body: Some(body.to_string()),
            ..Default::default()
        }
    }

    fn upload(log: &str) -> ApiGatewayProxyRequest {
        request(json!({"filename": "access.log", "contents": STANDARD.encode(log)}))
    }

    #[test]
    fn decodes_wrapped_base64() {
        let encoded = STANDARD.encode("line one\nline two\n");
        let (head, tail) = encoded.split_at(8);
        let wrapped = format!("{head}\r\n{tail}\n");

        assert_eq!(decode_contents(&wrapped).unwrap(), "line one\nline two\n");
    }

    #[test]
    fn invalid_base64_is_a_transport_error() {
        let err = decode_contents("this is not base64!").unwrap_err();

        assert!(matches!(err, HandlerError::TransportDecoding(_)));
        assert_eq!(err.to_string(), "file was not encoded properly");
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let encoded = STANDARD.encode([b'o', b'k', 0xff]);
        assert_eq!(decode_contents(&encoded).unwrap(), "ok\u{fffd}");
    }

    #[test]
    fn tallies_an_upload() {
        // `x` pads the record so the user agent starts at the 12th field
        let log = concat!(
            "1.1.1.1 - - [t] \"GET / HTTP/1.1\" 200 1 \"-\" x Mozilla/4.0 (compatible; MSIE 8.0)\n",
            "1.1.1.2 - - [t] \"GET / HTTP/1.1\" 200 1 \"-\" x AppleWebKit/537.36 Chrome/118.0 Safari/537.36\n",
        );
        let resp = handle(&upload(log), &BrowserClassifier::default()).unwrap();

        assert_eq!(resp.status_code, 200);
        let body: serde_json::Value = serde_json::from_str(response_text(&resp).unwrap()).unwrap();
        assert_eq!(
            body,
            json!({"Firefox": 0, "Chrome": 1, "Opera": 0, "Safari": 0, "MSIE": 1, "other": 0})
        );
    }

    #[test]
    fn bad_contents_are_not_reported_as_encoding_errors() {
        let req = request(json!({"filename": "access.log", "contents": "***"}));

        let err = handle(&req, &BrowserClassifier::default()).unwrap_err();
        assert!(matches!(err, HandlerError::TransportDecoding(_)));
    }

    #[test]
    fn null_body_is_an_empty_upload() {
        let req = ApiGatewayProxyRequest {
            body: Some("null".to_string()),
            ..Default::default()
        };

        let resp = handle(&req, &BrowserClassifier::default()).unwrap();
        assert_eq!(
            response_text(&resp),
            Some(r#"{"Firefox":0,"Chrome":0,"Opera":0,"Safari":0,"MSIE":0,"other":0}"#)
        );
    }

    #[test]
    fn capitalised_keys_are_accepted() {
        let req = request(json!({
            "FileName": "access.log",
            "Contents": STANDARD.encode("a b c d e f g h i j k Opera/9.80\n"),
        }));

        let resp = handle(&req, &BrowserClassifier::default()).unwrap();
        let body: serde_json::Value = serde_json::from_str(response_text(&resp).unwrap()).unwrap();
        assert_eq!(body["Opera"], 1);
    }

    #[test]
    fn malformed_body_is_a_client_error() {
        let req = ApiGatewayProxyRequest {
            body: Some("{\"filename\":".to_string()),
            ..Default::default()
        };

        assert!(handle(&req, &BrowserClassifier::default()).unwrap_err().is_client_error());
    }
}
