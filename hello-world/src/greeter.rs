use aws_lambda_events::apigw::{ApiGatewayProxyRequest, ApiGatewayProxyResponse};
use gateway_envelope::{ok_json, parse_body, HandlerError};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Missing fields are treated as empty strings.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub(crate) struct GreeterInput {
    pub user: String,
    pub message: String,
}

#[derive(Serialize, Debug, PartialEq)]
pub(crate) struct Greeting {
    pub message: String,
}

/// Reverses by Unicode code point so multi-byte characters survive intact.
pub(crate) fn reverse(message: &str) -> String {
    message.chars().rev().collect()
}

pub(crate) fn greet(input: &GreeterInput) -> Greeting {
    Greeting {
        message: format!("Hello {}, {}", input.user, reverse(&input.message)),
    }
}

pub(crate) fn handle(request: &ApiGatewayProxyRequest) -> Result<ApiGatewayProxyResponse, HandlerError> {
    let input: GreeterInput = parse_body(request)?;

    // stdout and stderr are sent to AWS CloudWatch Logs
    info!("Processing Lambda request {}", input.user);

    ok_json(&greet(&input))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(user: &str, message: &str) -> GreeterInput {
        GreeterInput {
            user: user.to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn reverses_the_message() {
        assert_eq!(greet(&input("Ada", "cat")).message, "Hello Ada, tac");
    }

    #[test]
    fn empty_message_leaves_a_trailing_separator() {
        assert_eq!(greet(&input("Ada", "")).message, "Hello Ada, ");
    }

    #[test]
    fn reverse_is_an_involution() {
        for message in ["", "a", "hello world", "añb", "日本語のテキスト", "e\u{301}x"] {
            assert_eq!(reverse(&reverse(message)), message);
        }
    }

    #[test]
    fn multi_byte_characters_are_kept_whole() {
        assert_eq!(reverse("añb"), "bña");
        assert_eq!(reverse("日本"), "本日");
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let request = ApiGatewayProxyRequest {
            body: Some(r#"{"message":"olleh"}"#.to_string()),
            ..Default::default()
        };

        let resp = handle(&request).unwrap();
        assert_eq!(
            gateway_envelope::response_text(&resp),
            Some(r#"{"message":"Hello , hello"}"#)
        );
    }

    #[test]
    fn null_body_greets_nobody() {
        let request = ApiGatewayProxyRequest {
            body: Some("null".to_string()),
            ..Default::default()
        };

        let resp = handle(&request).unwrap();
        assert_eq!(resp.status_code, 200);
        assert_eq!(gateway_envelope::response_text(&resp), Some(r#"{"message":"Hello , "}"#));
    }

    #[test]
    fn capitalised_keys_are_accepted() {
        let request = ApiGatewayProxyRequest {
            body: Some(r#"{"User":"Ada","Message":"cat"}"#.to_string()),
            ..Default::default()
        };

        let resp = handle(&request).unwrap();
        assert_eq!(
            gateway_envelope::response_text(&resp),
            Some(r#"{"message":"Hello Ada, tac"}"#)
        );
    }

    #[test]
    fn unparseable_body_is_a_client_error() {
        let request = ApiGatewayProxyRequest {
            body: Some("not json".to_string()),
            ..Default::default()
        };

        assert!(handle(&request).unwrap_err().is_client_error());
    }
}
