//! Reading Rails-style multipart property forms.
//!
//! Recognized parts are `property[<field>]` for scalar fields and the
//! repeated `property[images][]` for uploads. Everything else, including
//! `property[id]` and `property[user]`, is drained and ignored.

use actix_multipart::{Field, Multipart};
use futures::TryStreamExt;
use payloads::PropertyField;
use payloads::draft::ImageUpload;

use crate::routes::APIError;
use crate::store::property::PropertyParams;

/// Largest accepted upload for a single image.
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// Which field a multipart part name refers to, if any.
pub fn parse_part_name(name: &str) -> Option<PropertyField> {
    if name == PropertyField::Images.form_name() {
        return Some(PropertyField::Images);
    }
    let field = name
        .strip_prefix("property[")?
        .strip_suffix(']')?
        .parse::<PropertyField>()
        .ok()?;
    // images are only accepted as the repeated part
    (field != PropertyField::Images).then_some(field)
}

pub async fn read_property_params(
    mut payload: Multipart,
) -> Result<PropertyParams, APIError> {
    let mut params = PropertyParams::default();

    while let Some(mut field) = payload.try_next().await.map_err(bad_part)? {
        let name = field.name().unwrap_or_default().to_string();
        let Some(property_field) = parse_part_name(&name) else {
            tracing::debug!("ignoring multipart part {name:?}");
            read_bytes(&mut field, usize::MAX).await?;
            continue;
        };

        if property_field == PropertyField::Images {
            let file_name = field
                .content_disposition()
                .and_then(|disposition| disposition.get_filename())
                .unwrap_or("upload")
                .to_string();
            let content_type = field
                .content_type()
                .map(|mime| mime.to_string())
                .unwrap_or_else(|| "application/octet-stream".to_string());
            let data = read_bytes(&mut field, MAX_IMAGE_BYTES).await?;
            params.images.push(ImageUpload {
                file_name,
                content_type,
                data,
            });
        } else {
            let data = read_bytes(&mut field, usize::MAX).await?;
            let value = String::from_utf8(data).map_err(|e| {
                APIError::BadRequest(
                    anyhow::Error::from(e)
                        .context(format!("{name} is not valid UTF-8")),
                )
            })?;
            params.values.insert(property_field, value);
        }
    }

    Ok(params)
}

async fn read_bytes(
    field: &mut Field,
    limit: usize,
) -> Result<Vec<u8>, APIError> {
    let mut data = Vec::new();
    while let Some(chunk) = field.try_next().await.map_err(bad_part)? {
        if data.len() + chunk.len() > limit {
            return Err(APIError::BadRequest(anyhow::anyhow!(
                "Part exceeds {limit} bytes"
            )));
        }
        data.extend_from_slice(&chunk);
    }
    Ok(data)
}

fn bad_part(e: actix_multipart::MultipartError) -> APIError {
    APIError::BadRequest(anyhow::anyhow!("Malformed multipart body: {e}"))
}
