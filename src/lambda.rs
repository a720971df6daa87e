#[cfg(feature = "lambda")]
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
#[cfg(feature = "lambda")]
use lifepath_leads::utils::{logger, validation::Validate};
#[cfg(feature = "lambda")]
use lifepath_leads::{HttpEvent, HttpResponse, LambdaConfig, Proxy};

#[cfg(feature = "lambda")]
async fn function_handler(proxy: &Proxy, event: LambdaEvent<HttpEvent>) -> Result<HttpResponse, Error> {
    tracing::info!(request_id = %event.context.request_id, "Handling proxy request");

    let response = proxy.handle(event.payload).await;

    tracing::info!(status = response.status_code, "Proxy request completed");
    Ok(response)
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    let config = LambdaConfig::from_env()
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;
    config
        .validate()
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;

    tracing::info!("Starting {:?} proxy Lambda function", config.handler);
    let proxy = config.build_proxy();
    let proxy = &proxy;

    run(service_fn(move |event: LambdaEvent<HttpEvent>| async move {
        function_handler(proxy, event).await
    }))
    .await
}
