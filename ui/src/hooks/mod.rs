pub mod use_authentication;
pub mod use_booking;
pub mod use_fetch;
pub mod use_property;
pub mod use_push_route;
pub mod use_title;

pub use use_authentication::use_authentication;
pub use use_booking::use_booking;
pub use use_fetch::{FetchHookReturn, use_fetch};
pub use use_property::use_property;
pub use use_push_route::use_push_route;
pub use use_title::use_title;

/// Distinguishes "not fetched yet" from a fetched value.
#[derive(Clone, PartialEq, Debug)]
pub enum FetchState<T> {
    NotFetched,
    Fetched(T),
}

impl<T> FetchState<T> {
    pub fn as_ref(&self) -> Option<&T> {
        match self {
            Self::NotFetched => None,
            Self::Fetched(value) => Some(value),
        }
    }
}
