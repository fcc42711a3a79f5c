use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::HttpMessage;
use futures_util::future::{ready, LocalBoxFuture, Ready};

use crate::trace_ctx;

pub const TRACE_ID_HEADER: &str = "x-trace-id";

/// Trace id of the current request, kept in request extensions for the
/// middleware that wraps outside the `trace_ctx` scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTraceId(pub String);

/// The trace id `RequestTrace` assigned, or `"unassigned"` when it is not
/// installed.
pub fn request_trace_id(req: &ServiceRequest) -> String {
    req.extensions()
        .get::<RequestTraceId>()
        .map(|id| id.0.clone())
        .unwrap_or_else(|| "unassigned".to_string())
}

/// Assigns every request a trace id: stored in request extensions, made
/// visible to `trace_ctx::trace_id()` for the rest of the request, and
/// echoed back in `x-trace-id`.
pub struct RequestTrace;

impl<S, B> Transform<S, ServiceRequest> for RequestTrace
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = RequestTraceMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestTraceMiddleware { service }))
    }
}

pub struct RequestTraceMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequestTraceMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let trace_id = trace_ctx::new_trace_id();
        req.extensions_mut().insert(RequestTraceId(trace_id.clone()));

        let fut = self.service.call(req);

        Box::pin(async move {
            let mut res = trace_ctx::with_trace_id(trace_id.clone(), fut).await?;

            if let Ok(value) = HeaderValue::from_str(&trace_id) {
                res.headers_mut()
                    .insert(HeaderName::from_static(TRACE_ID_HEADER), value);
            }

            Ok(res)
        })
    }
}
