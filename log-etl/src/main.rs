use aws_lambda_events::apigw::{ApiGatewayProxyRequest, ApiGatewayProxyResponse};
use gateway_envelope::local::{self, Invocation};
use gateway_envelope::{into_response, logging};
use lambda_runtime::{service_fn, Error, LambdaEvent};
use log_etl::classifier::BrowserClassifier;
use log_etl::config::Config;
use log_etl::handler;
use std::sync::Arc;
use tracing::{debug, error, info};

const USAGE: &str =
    "log-etl: counts browser families in a base64 encoded access log sent as {\"filename\", \"contents\"}";

#[tokio::main]
async fn main() -> Result<(), Error> {
    logging::init_tracing();

    let config = Config::from_env();
    let classifier = Arc::new(BrowserClassifier::new(config.browsers));
    info!("Browser priority: {}", classifier.browsers().join(", "));

    match local::get_local_payload()? {
        Invocation::Local(local_config) => {
            local::invoke(&local_config, |event| my_handler(event, classifier)).await?;
            Ok(())
        }
        Invocation::Help => {
            local::print_usage(USAGE);
            Ok(())
        }
        Invocation::Runtime => {
            lambda_runtime::run(service_fn(move |event: LambdaEvent<ApiGatewayProxyRequest>| {
                let classifier = classifier.clone();
                async move { my_handler(event, classifier).await }
            }))
            .await
        }
    }
}

async fn my_handler(
    event: LambdaEvent<ApiGatewayProxyRequest>,
    classifier: Arc<BrowserClassifier>,
) -> Result<ApiGatewayProxyResponse, Error> {
    let (request, ctx) = event.into_parts();
    debug!("Request ID: {}", ctx.request_id);

    match into_response(handler::handle(&request, &classifier)) {
        Ok(v) => Ok(v),
        Err(e) => {
            error!("Failed run: {e}");
            Err(Error::from(e))
        }
    }
}
