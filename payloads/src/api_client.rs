use crate::draft::{FormPart, FormValue};
use crate::{
    Booking, BookingId, FormDraft, Property, PropertyId, requests, responses,
};
use reqwest::StatusCode;
use reqwest::multipart::{Form, Part};
use serde::Serialize;

type ReqwestResult = Result<reqwest::Response, reqwest::Error>;

/// An API client for interfacing with the backend.
pub struct APIClient {
    pub address: String,
    pub inner_client: reqwest::Client,
}

/// Helper methods for http actions
impl APIClient {
    fn format_url(&self, path: &str) -> String {
        format!("{}/api/{path}", &self.address)
    }

    async fn post(&self, path: &str, body: &impl Serialize) -> ReqwestResult {
        let request = self.inner_client.post(self.format_url(path)).json(body);

        #[cfg(target_arch = "wasm32")]
        let request = request.fetch_credentials_include();

        request.send().await
    }

    async fn empty_get(&self, path: &str) -> ReqwestResult {
        let request = self.inner_client.get(self.format_url(path));

        #[cfg(target_arch = "wasm32")]
        let request = request.fetch_credentials_include();

        request.send().await
    }

    async fn empty_delete(&self, path: &str) -> ReqwestResult {
        let request = self.inner_client.delete(self.format_url(path));

        #[cfg(target_arch = "wasm32")]
        let request = request.fetch_credentials_include();

        request.send().await
    }

    async fn multipart_post(&self, path: &str, form: Form) -> ReqwestResult {
        let request =
            self.inner_client.post(self.format_url(path)).multipart(form);

        #[cfg(target_arch = "wasm32")]
        let request = request.fetch_credentials_include();

        request.send().await
    }

    async fn multipart_patch(&self, path: &str, form: Form) -> ReqwestResult {
        let request =
            self.inner_client.patch(self.format_url(path)).multipart(form);

        #[cfg(target_arch = "wasm32")]
        let request = request.fetch_credentials_include();

        request.send().await
    }
}

/// Methods on the backend API
impl APIClient {
    pub async fn health_check(&self) -> Result<(), ClientError> {
        let response = self.empty_get("health_check").await?;
        ok_empty(response).await
    }

    /// Log in against the development session endpoint.
    pub async fn login(
        &self,
        details: &requests::LoginCredentials,
    ) -> Result<(), ClientError> {
        let response = self.post("sessions", details).await?;
        ok_empty(response).await
    }

    pub async fn logout(&self) -> Result<(), ClientError> {
        let response = self.empty_delete("sessions").await?;
        ok_empty(response).await
    }

    /// Check whether the session cookie belongs to a logged in user.
    pub async fn authenticated(
        &self,
    ) -> Result<responses::Authenticated, ClientError> {
        let response = self.empty_get("authenticated").await?;
        ok_body(response).await
    }

    /// Create a listing from every field of a create-mode draft.
    pub async fn create_property(
        &self,
        draft: &FormDraft,
    ) -> Result<Property, ClientError> {
        let form = multipart_form(draft.create_parts())?;
        let response = self.multipart_post("properties", form).await?;
        ok_body::<responses::PropertyEnvelope>(response)
            .await
            .map(|envelope| envelope.property)
    }

    pub async fn get_property(
        &self,
        property_id: &PropertyId,
    ) -> Result<Property, ClientError> {
        let response =
            self.empty_get(&format!("properties/{property_id}")).await?;
        ok_body::<responses::PropertyEnvelope>(response)
            .await
            .map(|envelope| envelope.property)
    }

    /// Send only the fields marked as changed in the draft.
    pub async fn update_property(
        &self,
        property_id: &PropertyId,
        draft: &FormDraft,
    ) -> Result<Property, ClientError> {
        let form = multipart_form(draft.update_parts())?;
        let response = self
            .multipart_patch(&format!("properties/{property_id}"), form)
            .await?;
        ok_body::<responses::PropertyEnvelope>(response)
            .await
            .map(|envelope| envelope.property)
    }

    pub async fn delete_property(
        &self,
        property_id: &PropertyId,
    ) -> Result<(), ClientError> {
        let response = self
            .empty_delete(&format!("properties/{property_id}"))
            .await?;
        ok_empty(response).await
    }

    pub async fn create_booking(
        &self,
        booking: &requests::NewBooking,
    ) -> Result<Booking, ClientError> {
        let body = requests::CreateBooking {
            booking: booking.clone(),
        };
        let response = self.post("bookings", &body).await?;
        ok_body::<responses::BookingEnvelope>(response)
            .await
            .map(|envelope| envelope.booking)
    }

    pub async fn get_booking(
        &self,
        booking_id: &BookingId,
    ) -> Result<Booking, ClientError> {
        let response = self.empty_get(&format!("bookings/{booking_id}")).await?;
        ok_body::<responses::BookingEnvelope>(response)
            .await
            .map(|envelope| envelope.booking)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// An unhandled API error to display, containing response text.
    #[error("{1}")]
    APIError(StatusCode, String),
    #[error("Network error. Please check your connection.")]
    Network(#[from] reqwest::Error),
}

/// Build a multipart body from draft parts, preserving their order.
fn multipart_form(parts: Vec<FormPart>) -> Result<Form, ClientError> {
    let mut form = Form::new();
    for part in parts {
        form = match part.value {
            FormValue::Text(text) => form.text(part.name, text),
            FormValue::File(upload) => {
                let file = Part::bytes(upload.data)
                    .file_name(upload.file_name)
                    .mime_str(&upload.content_type)?;
                form.part(part.name, file)
            }
        };
    }
    Ok(form)
}

/// Deserialize a successful request into the desired type, or return an
/// appropriate error.
pub async fn ok_body<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ClientError> {
    if !response.status().is_success() {
        return Err(ClientError::APIError(
            response.status(),
            response.text().await?,
        ));
    }
    Ok(response.json::<T>().await?)
}

/// Check that an empty response is OK, returning a ClientError if not.
pub async fn ok_empty(response: reqwest::Response) -> Result<(), ClientError> {
    if !response.status().is_success() {
        return Err(ClientError::APIError(
            response.status(),
            response.text().await?,
        ));
    }
    Ok(())
}
