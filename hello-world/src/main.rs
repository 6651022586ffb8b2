//! Greets the user and echoes their message back reversed.

use aws_lambda_events::apigw::{ApiGatewayProxyRequest, ApiGatewayProxyResponse};
use gateway_envelope::local::{self, Invocation};
use gateway_envelope::{into_response, logging};
use lambda_runtime::{service_fn, Error, LambdaEvent};
use tracing::{debug, error};

mod greeter;

const USAGE: &str = "hello-world: replies to {\"user\", \"message\"} with a greeting and the message reversed";

#[tokio::main]
async fn main() -> Result<(), Error> {
    logging::init_tracing();

    match local::get_local_payload()? {
        Invocation::Local(local_config) => {
            local::invoke(&local_config, my_handler).await?;
            Ok(())
        }
        Invocation::Help => {
            local::print_usage(USAGE);
            Ok(())
        }
        Invocation::Runtime => lambda_runtime::run(service_fn(my_handler)).await,
    }
}

pub(crate) async fn my_handler(event: LambdaEvent<ApiGatewayProxyRequest>) -> Result<ApiGatewayProxyResponse, Error> {
    let (request, ctx) = event.into_parts();
    debug!("Request ID: {}", ctx.request_id);

    match into_response(greeter::handle(&request)) {
        Ok(v) => Ok(v),
        Err(e) => {
            error!("Failed run: {e}");
            Err(Error::from(e))
        }
    }
}
