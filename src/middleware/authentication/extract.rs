use crate::helpers::JsonResponse;
use crate::models;
use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};
use std::ops::Deref;
use std::sync::Arc;

/// Extractor for handlers that require a valid session. Yields 401 when
/// the authentication middleware left the request anonymous.
#[derive(Debug)]
pub struct AuthenticatedUser(pub Arc<models::User>);

impl Deref for AuthenticatedUser {
    type Target = models::User;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<Arc<models::User>>()
                .cloned()
                .map(AuthenticatedUser)
                .ok_or_else(|| {
                    JsonResponse::<models::User>::build().unauthorized("not authorized")
                }),
        )
    }
}

/// Extractor for admin-gated handlers; the session user must carry the
/// admin flag.
#[derive(Debug)]
pub struct AdminUser(pub Arc<models::User>);

impl Deref for AdminUser {
    type Target = models::User;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for AdminUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<Arc<models::User>>()
                .cloned()
                .filter(|user| user.is_admin)
                .map(AdminUser)
                .ok_or_else(|| {
                    JsonResponse::<models::User>::build().unauthorized("not authorized as an admin")
                }),
        )
    }
}
