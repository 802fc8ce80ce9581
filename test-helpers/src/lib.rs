pub mod mock;

use actix_web::web;
use api::store::Store;
use api::{Config, telemetry};
use payloads::draft::{DraftInput, ImageUpload};
use payloads::requests::{self, NewBooking};
use payloads::{
    Booking, FormDraft, Property, PropertyField, PropertyId, responses,
};
use reqwest::StatusCode;
use secrecy::SecretBox;
use tracing_log::LogTracer;
use tracing_subscriber::util::SubscriberInitExt;

pub struct TestApp {
    #[allow(unused)]
    pub port: u16,
    pub client: payloads::APIClient,
    pub store: web::Data<Store>,
}

/// Functions to populate test data
///
/// Using anyhow::Result lets us get a backtrace from when the error was first
/// converted to anyhow::Result. Run with RUST_BACKTRACE=1 to view.
impl TestApp {
    /// Register an account directly in the store.
    pub async fn create_user(
        &self,
        credentials: &requests::LoginCredentials,
    ) -> anyhow::Result<()> {
        api::password::create_account(
            &credentials.username,
            SecretBox::new(Box::new(credentials.password.clone())),
            &self.store,
        )
        .await?;
        Ok(())
    }

    /// Create alice and bob, leaving alice logged in.
    pub async fn create_alice_and_bob(&self) -> anyhow::Result<()> {
        self.create_user(&alice_credentials()).await?;
        self.create_user(&bob_credentials()).await?;
        self.client.login(&alice_credentials()).await?;
        Ok(())
    }

    pub async fn login_alice(&self) -> anyhow::Result<()> {
        self.client.logout().await?;
        self.client.login(&alice_credentials()).await?;
        Ok(())
    }

    pub async fn login_bob(&self) -> anyhow::Result<()> {
        self.client.logout().await?;
        self.client.login(&bob_credentials()).await?;
        Ok(())
    }

    /// The session user as reported by the authentication check.
    pub async fn session(&self) -> anyhow::Result<responses::Authenticated> {
        Ok(self.client.authenticated().await?)
    }

    /// Create a listing as the logged in user.
    pub async fn create_test_property(&self) -> anyhow::Result<Property> {
        Ok(self.client.create_property(&property_draft_a()).await?)
    }

    pub async fn create_test_booking(
        &self,
        property_id: PropertyId,
    ) -> anyhow::Result<Booking> {
        Ok(self.client.create_booking(&stay_a(property_id)).await?)
    }
}

pub fn alice_credentials() -> requests::LoginCredentials {
    requests::LoginCredentials {
        username: "alice".into(),
        password: "supersecret".into(),
    }
}

pub fn bob_credentials() -> requests::LoginCredentials {
    requests::LoginCredentials {
        username: "bob".into(),
        password: "bobspw".into(),
    }
}

/// Fill a form draft the way a user typing into the form would.
pub fn fill_draft(
    draft: &mut FormDraft,
    values: &[(PropertyField, &str)],
) {
    for (field, value) in values {
        draft.apply(DraftInput::Text {
            field: *field,
            value: value.to_string(),
        });
    }
}

pub fn image_upload(file_name: &str) -> ImageUpload {
    ImageUpload {
        file_name: file_name.to_string(),
        content_type: "image/png".to_string(),
        data: format!("fake png data for {file_name}").into_bytes(),
    }
}

/// A complete create-mode draft with one image.
pub fn property_draft_a() -> FormDraft {
    let mut draft = FormDraft::new();
    fill_draft(
        &mut draft,
        &[
            (PropertyField::Title, "Sunny loft near the canal"),
            (PropertyField::Description, "Bright open plan with a balcony"),
            (PropertyField::PricePerNight, "120"),
            (PropertyField::City, "Amsterdam"),
            (PropertyField::Country, "Netherlands"),
            (PropertyField::PropertyType, "loft"),
            (PropertyField::MaxGuests, "2"),
            (PropertyField::Bedrooms, "1"),
            (PropertyField::Beds, "1"),
            (PropertyField::Baths, "1"),
        ],
    );
    draft.apply(DraftInput::Images {
        uploads: vec![image_upload("loft.png")],
        preview: None,
    });
    draft
}

/// A two night stay starting on 2025-06-01.
pub fn stay_a(property_id: PropertyId) -> NewBooking {
    NewBooking {
        property_id,
        start_date: jiff::civil::date(2025, 6, 1),
        end_date: jiff::civil::date(2025, 6, 3),
    }
}

pub async fn spawn_app_on_port(port: u16) -> TestApp {
    let subscriber = telemetry::get_subscriber("error".into());
    let _ = LogTracer::init();
    let _ = subscriber.try_init();

    let mut config = Config {
        ip: "127.0.0.1".into(),
        port,
        allowed_origins: vec!["*".to_string()],
        session_key: None,
        public_url: None,
    };

    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .cookie_store(true)
        .build()
        .unwrap();

    let store = web::Data::new(Store::new());
    let server = api::build(&mut config, store.clone()).unwrap();
    tokio::spawn(server);

    TestApp {
        port: config.port,
        client: payloads::APIClient {
            address: format!("http://127.0.0.1:{}", config.port),
            inner_client: client,
        },
        store,
    }
}

/// Use OS-assigned port for parallel testing.
pub async fn spawn_app() -> TestApp {
    spawn_app_on_port(0).await
}

/// Assert that the result of an API action results in a specific status code.
pub fn assert_status_code<T>(
    result: Result<T, payloads::ClientError>,
    expected: StatusCode,
) {
    match result {
        Err(payloads::ClientError::APIError(code, _)) => {
            assert_eq!(code, expected)
        }
        _ => panic!("Expected APIError"),
    };
}
