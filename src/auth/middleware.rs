use std::rc::Rc;

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};

use crate::auth::directory::UserDirectory;
use crate::auth::extractors::AuthContext;
use crate::error::AppError;

/// Request header carrying the session token.
pub const AUTH_HEADER: &str = "x-auth";

/// Rejects requests that do not carry a live session token in `x-auth`.
///
/// On success the resolved user and the raw token are stored in the request
/// extensions as an `AuthContext` for handlers to extract. On failure the
/// request never reaches the handler and the client gets an empty 401.
pub struct AuthGate;

impl<S, B> Transform<S, ServiceRequest> for AuthGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthGateService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthGateService {
            service: Rc::new(service),
        }))
    }
}

pub struct AuthGateService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthGateService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            match authenticate(&req).await {
                Ok(context) => {
                    req.extensions_mut().insert(context);
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                Err(app_err) => {
                    log::debug!("rejected {} {}: {}", req.method(), req.path(), app_err);
                    Ok(req.error_response(app_err).map_into_right_body())
                }
            }
        })
    }
}

async fn authenticate(req: &ServiceRequest) -> Result<AuthContext, AppError> {
    let directory = req
        .app_data::<web::Data<UserDirectory>>()
        .cloned()
        .ok_or_else(|| AppError::InternalServerError("UserDirectory is not registered".into()))?;

    let token = req
        .headers()
        .get(AUTH_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .ok_or(AppError::Unauthorized)?;

    let user = directory.resolve_token(&token).await?;
    Ok(AuthContext { user, token })
}
