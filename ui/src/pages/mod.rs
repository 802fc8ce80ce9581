pub mod booking_success;
pub mod home;
pub mod login;
pub mod not_found;
pub mod property_create;
pub mod property_detail;

pub use booking_success::BookingSuccessPage;
pub use home::HomePage;
pub use login::LoginPage;
pub use not_found::NotFoundPage;
pub use property_create::PropertyCreatePage;
pub use property_detail::PropertyDetailPage;
