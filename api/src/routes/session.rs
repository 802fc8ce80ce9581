use actix_identity::Identity;
use actix_web::{
    HttpMessage, HttpRequest, HttpResponse, delete, get, post, web,
};
use payloads::responses::Authenticated;

use crate::password::{AuthError, Credentials, validate_credentials};
use crate::store::{self, Store};

use super::APIError;

/// Report whether the session cookie belongs to a known account. Never
/// fails; anything unexpected reads as logged out.
#[tracing::instrument(skip(user, store), ret)]
#[get("/authenticated")]
pub async fn authenticated(
    user: Option<Identity>,
    store: web::Data<Store>,
) -> HttpResponse {
    let username = user
        .and_then(|user| user.id().ok())
        .filter(|username| store::login::account_exists(username, &store));
    let body = match username {
        Some(username) => Authenticated::logged_in(username),
        None => Authenticated::logged_out(),
    };
    HttpResponse::Ok().json(body)
}

/// Development login used by the dev server and integration tests.
#[tracing::instrument(
    skip(credentials, store),
    fields(username=tracing::field::Empty)
    ret,
)]
#[post("/sessions")]
pub async fn sign_in(
    request: HttpRequest,
    credentials: web::Json<Credentials>,
    store: web::Data<Store>,
) -> Result<HttpResponse, APIError> {
    tracing::Span::current()
        .record("username", tracing::field::display(&credentials.username));
    match validate_credentials(credentials.0, &store).await {
        Ok(username) => {
            Identity::login(&request.extensions(), username)
                .map_err(|e| APIError::UnexpectedError(e.into()))?;
            Ok(HttpResponse::Ok().finish())
        }
        Err(e) => {
            let e = match e {
                AuthError::InvalidCredentials(_) => {
                    APIError::AuthError(e.into())
                }
                AuthError::UnexpectedError(_) => {
                    APIError::UnexpectedError(e.into())
                }
            };
            Err(e)
        }
    }
}

#[tracing::instrument(skip(user))]
#[delete("/sessions")]
pub async fn sign_out(user: Option<Identity>) -> HttpResponse {
    if let Some(user) = user {
        user.logout();
    }
    HttpResponse::Ok().finish()
}
