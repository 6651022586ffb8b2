//! Runs a handler once against an API Gateway request stored in a local file,
//! bypassing the Lambda runtime. Handy for debugging a lambda without deploying it.

use crate::envelope::response_text;
use aws_lambda_events::apigw::{ApiGatewayProxyRequest, ApiGatewayProxyResponse};
use lambda_runtime::{Context, Error, LambdaEvent};
use std::env::args;
use std::future::Future;
use tracing::{debug, info};

/// Payload read from a local file
pub struct LocalConfig {
    /// Contents of the file. Expected to be an API Gateway proxy request in JSON.
    pub payload: String,
    /// File name from which the payload was read, as provided in the param
    pub file_name: String,
}

/// What the binary was asked to do on start-up
pub enum Invocation {
    /// No arguments, which is always the case on AWS
    Runtime,
    /// Run once against a payload file
    Local(LocalConfig),
    /// `--help` or `-h`
    Help,
}

/// Works out the invocation mode from the first command line argument.
/// Reads the payload file if its name is given.
pub fn get_local_payload() -> Result<Invocation, std::io::Error> {
    invocation_from_arg(args().nth(1))
}

fn invocation_from_arg(arg: Option<String>) -> Result<Invocation, std::io::Error> {
    let payload_file = match arg {
        Some(v) => v,
        None => return Ok(Invocation::Runtime),
    };

    if payload_file == "--help" || payload_file == "-h" {
        return Ok(Invocation::Help);
    }

    let payload = std::fs::read_to_string(&payload_file)?;
    debug!("Read {} bytes from {}", payload.len(), payload_file);

    Ok(Invocation::Local(LocalConfig {
        payload,
        file_name: payload_file,
    }))
}

/// Prints `usage` followed by the generic command line help.
pub fn print_usage(usage: &str) {
    println!("{usage}");
    println!();
    println!("With local payload: <binary> [payload_file], e.g. payloads/hello.json");
    println!("On AWS: <binary> with no arguments starts the Lambda runtime");
}

/// Deserializes the local payload into a proxy request, invokes `handler` with a default context
/// and prints the response body to stdout.
pub async fn invoke<F, Fut>(local: &LocalConfig, handler: F) -> Result<ApiGatewayProxyResponse, Error>
where
    F: FnOnce(LambdaEvent<ApiGatewayProxyRequest>) -> Fut,
    Fut: Future<Output = Result<ApiGatewayProxyResponse, Error>>,
{
    info!("Payload from: {}", local.file_name);

    let request: ApiGatewayProxyRequest = serde_json::from_str(&local.payload)?;
    let response = handler(LambdaEvent::new(request, Context::default())).await?;

    info!("Status code: {}", response.status_code);
    println!("{}", response_text(&response).unwrap_or_default());

    Ok(response)
}
