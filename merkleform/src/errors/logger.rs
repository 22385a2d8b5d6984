use std::future::{ready, Ready};

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error,
};
use futures_util::future::LocalBoxFuture;
use tracing::{error, warn};

use super::{http::HTTPError, reason::ReasonCode};

/// Logs every [`HTTPError`] returned by a handler, along with its chain of causes
pub struct TracingMiddleware;

impl<S, B> Transform<S, ServiceRequest> for TracingMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TracingMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TracingMiddlewareService { service }))
    }
}

pub struct TracingMiddlewareService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for TracingMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let path = req.path().to_string();
        let fut = self.service.call(req);

        Box::pin(async move {
            match fut.await {
                Ok(res) => {
                    if let Some(err) = res.response().error() {
                        if let Some(err) = err.as_error::<HTTPError>() {
                            let output = error_chain(err);
                            if err.reason == ReasonCode::Internal {
                                error!(%path, "Error: {output}");
                            } else {
                                warn!(%path, "Error: {output}");
                            }
                        } else {
                            error!(%path, "Error: {err:?}");
                        }
                    }

                    Ok(res)
                }
                Err(err) => {
                    error!(%path, "Error occurred: {err}");
                    Err(err)
                }
            }
        })
    }
}

fn error_chain(err: &dyn std::error::Error) -> String {
    let mut output = err.to_string();
    let mut error = err;
    while let Some(source) = error.source() {
        output = format!("{output}\n  Caused by: {source}");
        error = source;
    }
    output
}
