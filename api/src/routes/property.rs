use actix_identity::Identity;
use actix_multipart::Multipart;
use actix_web::{HttpResponse, delete, get, patch, post, web};
use payloads::PropertyId;
use payloads::responses::{PropertyEnvelope, Success};

use crate::form::read_property_params;
use crate::store::{self, Store};

use super::{APIError, get_username};

#[tracing::instrument(
    skip(user, payload, store),
    fields(username=tracing::field::Empty),
    ret
)]
#[post("/properties")]
pub async fn create_property(
    user: Option<Identity>,
    payload: Multipart,
    store: web::Data<Store>,
) -> Result<HttpResponse, APIError> {
    let username = get_username(user)?;
    let params = read_property_params(payload).await?;
    let property =
        store::property::create_property(&username, params, &store)?;
    tracing::info!(property_id = %property.id, "created property");
    Ok(HttpResponse::Ok().json(PropertyEnvelope { property }))
}

#[tracing::instrument(skip(store), ret)]
#[get("/properties/{property_id}")]
pub async fn get_property(
    property_id: web::Path<PropertyId>,
    store: web::Data<Store>,
) -> Result<HttpResponse, APIError> {
    let property = store::property::get_property(&property_id, &store)?;
    Ok(HttpResponse::Ok().json(PropertyEnvelope { property }))
}

#[tracing::instrument(
    skip(user, payload, store),
    fields(username=tracing::field::Empty),
    ret
)]
#[patch("/properties/{property_id}")]
pub async fn update_property(
    user: Option<Identity>,
    property_id: web::Path<PropertyId>,
    payload: Multipart,
    store: web::Data<Store>,
) -> Result<HttpResponse, APIError> {
    let username = get_username(user)?;
    let params = read_property_params(payload).await?;
    let property = store::property::update_property(
        &property_id,
        &username,
        params,
        &store,
    )?;
    Ok(HttpResponse::Ok().json(PropertyEnvelope { property }))
}

#[tracing::instrument(
    skip(user, store),
    fields(username=tracing::field::Empty),
    ret
)]
#[delete("/properties/{property_id}")]
pub async fn delete_property(
    user: Option<Identity>,
    property_id: web::Path<PropertyId>,
    store: web::Data<Store>,
) -> Result<HttpResponse, APIError> {
    let username = get_username(user)?;
    store::property::delete_property(&property_id, &username, &store)?;
    Ok(HttpResponse::Ok().json(Success { success: true }))
}
