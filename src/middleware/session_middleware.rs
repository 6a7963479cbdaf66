use std::sync::Arc;

use actix_web::{
    dev::{forward_ready, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage,
};
use actix_web::web::Data;
use futures::future::{LocalBoxFuture, ready, Ready};
use diesel::prelude::*;

use crate::constants::middleware_constants::PUBLIC_ROUTES;
use crate::db::DbPool;
use crate::models::session_models::Session;
use crate::schema::sessions::dsl::*;
use crate::utils::token_utils::verify_jwt;

pub struct SessionMiddleware;

impl<S, B> Transform<S, ServiceRequest> for SessionMiddleware
where
    S: actix_web::dev::Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = SessionMiddlewareMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionMiddlewareMiddleware { service: Arc::new(service) }))
    }
}

pub struct SessionMiddlewareMiddleware<S> {
    service: Arc<S>,
}

impl<S, B> actix_web::dev::Service<ServiceRequest> for SessionMiddlewareMiddleware<S>
where
    S: actix_web::dev::Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();

        let pool = req.app_data::<Data<DbPool>>().cloned();
        let secret = req.app_data::<Data<Vec<u8>>>().cloned();
        let path = req.path().to_string();
        let method = req.method().clone();

        Box::pin(async move {
            if PUBLIC_ROUTES
                .iter()
                .any(|(route, m)| *route == path && *m == method)
            {
                return service.call(req).await;
            }

            let (pool, secret) = match (pool, secret) {
                (Some(p), Some(s)) => (p, s),
                _ => return Err(actix_web::error::ErrorInternalServerError("App state missing")),
            };

            let auth_header = req
                .headers()
                .get("Authorization")
                .and_then(|h| h.to_str().ok())
                .unwrap_or("");
            let token_value = auth_header.strip_prefix("Bearer ").unwrap_or("");

            // Token must decode before we spend a DB round trip on it
            let claims = match verify_jwt(token_value, &secret) {
                Some(c) => c,
                None => return Err(actix_web::error::ErrorUnauthorized("No active session")),
            };

            let mut conn = pool
                .get()
                .map_err(|_| actix_web::error::ErrorInternalServerError("DB error"))?;

            // The session row must still exist; logout revokes the token
            let session_result = sessions
                .filter(token.eq(token_value))
                .first::<Session>(&mut conn)
                .optional()
                .map_err(|_| actix_web::error::ErrorInternalServerError("DB error"))?;

            let session = match session_result {
                Some(s) if s.profile_id == claims.sub => s,
                _ => return Err(actix_web::error::ErrorUnauthorized("No active session")),
            };

            // Attach identity to request extensions for handlers
            req.extensions_mut().insert(claims);
            req.extensions_mut().insert(session);

            service.call(req).await
        })
    }
}
