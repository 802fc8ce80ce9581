pub mod booking;
pub mod image;
pub mod property;
pub mod session;

use actix_identity::Identity;
use actix_web::{
    HttpResponse, Responder, ResponseError, body::BoxBody,
    dev::HttpServiceFactory, get, web,
};

use crate::store::StoreError;

pub fn api_services() -> impl HttpServiceFactory {
    web::scope("/api")
        .service(health_check)
        .service(session::authenticated)
        .service(session::sign_in)
        .service(session::sign_out)
        .service(property::create_property)
        .service(property::get_property)
        .service(property::update_property)
        .service(property::delete_property)
        .service(booking::create_booking)
        .service(booking::get_booking)
        .service(image::get_image)
}

#[get("/health_check")]
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().body("healthy")
}

#[derive(Debug, thiserror::Error)]
pub enum APIError {
    #[error("Authentication failed")]
    AuthError(#[source] anyhow::Error),
    #[error("Forbidden")]
    Forbidden(#[source] anyhow::Error),
    #[error("Bad request")]
    BadRequest(#[source] anyhow::Error),
    #[error("Not found")]
    NotFound(#[source] anyhow::Error),
    #[error("Something went wrong")]
    UnexpectedError(#[from] anyhow::Error),
}

impl ResponseError for APIError {
    fn error_response(&self) -> HttpResponse<BoxBody> {
        match self {
            Self::AuthError(e) => {
                HttpResponse::Unauthorized().body(format!("{self}: {e}"))
            }
            Self::Forbidden(e) => {
                HttpResponse::Forbidden().body(format!("{self}: {e}"))
            }
            Self::BadRequest(e) => {
                HttpResponse::BadRequest().body(format!("{self}: {e}"))
            }
            Self::NotFound(e) => {
                HttpResponse::NotFound().body(format!("{self}: {e}"))
            }
            Self::UnexpectedError(e) => {
                crate::telemetry::log_error(e);
                HttpResponse::InternalServerError().body(self.to_string())
            }
        }
    }
}

impl From<StoreError> for APIError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Unexpected(_) => APIError::UnexpectedError(e.into()),
            StoreError::InvalidCredentials => APIError::AuthError(e.into()),
            StoreError::PropertyNotFound => APIError::NotFound(e.into()),
            StoreError::BookingNotFound => APIError::NotFound(e.into()),
            StoreError::ImageNotFound => APIError::NotFound(e.into()),
            StoreError::NotOwner => APIError::Forbidden(e.into()),
            StoreError::NotGuest => APIError::Forbidden(e.into()),
            _ => APIError::BadRequest(e.into()),
        }
    }
}

/// The username of the logged in session, or a 401.
fn get_username(user: Option<Identity>) -> Result<String, APIError> {
    let user = user.ok_or_else(|| {
        APIError::AuthError(anyhow::anyhow!("Not logged in"))
    })?;
    let username = user.id().map_err(|e| {
        APIError::AuthError(
            anyhow::Error::from(e).context("Invalid login session"),
        )
    })?;
    // special case: since this is used in so many routes, the username is
    // recorded here, but attaches to the span for the api route itself
    tracing::Span::current()
        .record("username", tracing::field::display(&username));
    Ok(username)
}
