mod config;
mod error;
mod handlers;
mod models;
mod routes;
mod service;
mod validation;
#[cfg(test)]
mod tests;

use axum::{body::Body, extract::Request, response::Response, Router};
use http_body_util::BodyExt;
use lambda_http::{
    run, service_fn, Body as LambdaBody, Error, Request as LambdaRequest,
    Response as LambdaResponse,
};
use log::{debug, error, info, trace};
use tokio::sync::OnceCell;
use tower::ServiceExt;

use crate::config::Config;

// Router instance shared by warm Lambda invocations
static ROUTER: OnceCell<Router> = OnceCell::const_new();

async fn lambda_router() -> Result<Router, Error> {
    let router = ROUTER
        .get_or_try_init(|| async {
            info!("Initializing the Axum router");
            let config = Config::from_env()?;
            let router = routes::create_router(&config).await?;
            Ok::<_, Error>(router)
        })
        .await?;

    Ok(router.clone())
}

// The Lambda handler function
async fn function_handler(event: LambdaRequest) -> Result<LambdaResponse<LambdaBody>, Error> {
    info!(
        "Received Lambda request: method={:?}, path={:?}, query_params={:?}",
        event.method(),
        event.uri().path(),
        event.uri().query()
    );

    let app = lambda_router().await?;

    let (parts, body) = event.into_parts();
    let body = match body {
        LambdaBody::Empty => Body::empty(),
        LambdaBody::Text(text) => {
            debug!("Request body (text): {}", text);
            Body::from(text)
        }
        LambdaBody::Binary(data) => {
            debug!("Request body (binary): {} bytes", data.len());
            Body::from(data)
        }
    };

    let http_request = Request::from_parts(parts, body);

    // Router's error type is Infallible
    let response = match app.oneshot(http_request).await {
        Ok(response) => response,
        Err(never) => match never {},
    };
    info!("Received response from Axum: status={}", response.status());

    let lambda_response = response_to_lambda(response).await?;
    info!(
        "Returning Lambda response: status={}",
        lambda_response.status()
    );

    Ok(lambda_response)
}

// Convert the Axum response to a format suitable for Lambda
async fn response_to_lambda(response: Response) -> Result<LambdaResponse<LambdaBody>, Error> {
    let (parts, body) = response.into_parts();
    debug!(
        "Converting response: status={}, headers={:?}",
        parts.status, parts.headers
    );

    let bytes = match body.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(err) => {
            error!("Failed to read response body: {:?}", err);
            return Err(Error::from(err));
        }
    };

    let builder = LambdaResponse::builder().status(parts.status);

    let builder_with_headers = parts
        .headers
        .iter()
        .fold(builder, |builder, (name, value)| {
            trace!("Adding response header: {}={:?}", name, value);
            builder.header(name, value)
        });

    let lambda_response = if bytes.is_empty() {
        builder_with_headers.body(LambdaBody::Empty)?
    } else {
        match String::from_utf8(bytes.to_vec()) {
            Ok(text) => builder_with_headers.body(LambdaBody::Text(text))?,
            Err(_) => builder_with_headers.body(LambdaBody::Binary(bytes.to_vec()))?,
        }
    };

    Ok(lambda_response)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", err);
    }
    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    info!("Logging initialized with env_logger");

    if let Ok(function_name) = std::env::var("AWS_LAMBDA_FUNCTION_NAME") {
        info!(
            "Running in AWS Lambda environment: {} (version: {})",
            function_name,
            std::env::var("AWS_LAMBDA_FUNCTION_VERSION").unwrap_or_else(|_| "unknown".into())
        );
        run(service_fn(function_handler)).await?;
    } else {
        info!("Starting service in non-Lambda environment");
        let config = Config::from_env()?;
        let app = routes::create_router(&config).await?;

        let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
        info!("listening on {}", config.bind_addr);
        axum::serve(listener, app.into_make_service())
            .with_graceful_shutdown(shutdown_signal())
            .await?;
    }

    info!("Service finished");
    Ok(())
}
