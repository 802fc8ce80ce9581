pub mod booking_widget;
pub mod confirmation_modal;
pub mod error_banner;
pub mod image_gallery;
pub mod layout;
pub mod login_prompt;
pub mod modal;
pub mod property_form;

pub use booking_widget::BookingWidget;
pub use confirmation_modal::ConfirmationModal;
pub use error_banner::ErrorBanner;
pub use image_gallery::ImageGallery;
pub use login_prompt::LoginPrompt;
pub use modal::Modal;
pub use property_form::{
    DraftAction, DraftState, FormMode, PropertyForm,
};
