use payloads::{Property, PropertyId};
use yew::prelude::*;

use super::{FetchHookReturn, use_fetch};
use crate::get_api_client;

#[hook]
pub fn use_property(property_id: PropertyId) -> FetchHookReturn<Property> {
    use_fetch("Failed to load property", property_id, move || async move {
        get_api_client().get_property(&property_id).await
    })
}
