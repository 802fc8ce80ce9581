use actix_web::{HttpResponse, get, web};
use payloads::ImageId;

use crate::store::Store;

use super::APIError;

/// Serve the bytes of an uploaded listing image.
#[tracing::instrument(skip(store))]
#[get("/images/{image_id}")]
pub async fn get_image(
    image_id: web::Path<ImageId>,
    store: web::Data<Store>,
) -> Result<HttpResponse, APIError> {
    let image = store.image(&image_id)?;
    Ok(HttpResponse::Ok()
        .content_type(image.content_type)
        .body(image.data))
}
